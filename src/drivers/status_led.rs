//! RGB status LED driver.
//!
//! Three LEDC PWM channels (CH0-2) drive a common-cathode RGB LED.  A
//! global brightness (0.0-1.0) scales every colour before it reaches the
//! duty registers.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: drives three LEDC PWM channels via hw_init.
//! On host/test: tracks state in-memory only.

use crate::drivers::hw_init;
use crate::error::ActuatorError;

/// Colour as (R, G, B) tuple, each 0–255.
pub type Rgb = (u8, u8, u8);

pub const COLOUR_OFF: Rgb = (0, 0, 0);
/// Amber for Info/Notice.
pub const COLOUR_AMBER: Rgb = (156, 99, 0);
/// Red for Warning.
pub const COLOUR_RED: Rgb = (255, 0, 0);

pub struct StatusLed {
    brightness: f32,
    /// Last duty triple written to hardware (after scaling).
    current: Rgb,
}

impl StatusLed {
    pub fn new(brightness: f32) -> Self {
        Self {
            brightness: brightness.clamp(0.0, 1.0),
            current: COLOUR_OFF,
        }
    }

    /// Show `colour` at `level` × the global brightness.
    pub fn set_colour(&mut self, colour: Rgb, level: f32) -> Result<(), ActuatorError> {
        let scale = (self.brightness * level).clamp(0.0, 1.0);
        let scaled = (
            scale_channel(colour.0, scale),
            scale_channel(colour.1, scale),
            scale_channel(colour.2, scale),
        );

        let ok = hw_init::ledc_set(hw_init::LEDC_CH_LED_R, scaled.0)
            & hw_init::ledc_set(hw_init::LEDC_CH_LED_G, scaled.1)
            & hw_init::ledc_set(hw_init::LEDC_CH_LED_B, scaled.2);
        if !ok {
            return Err(ActuatorError::LedWriteFailed);
        }
        self.current = scaled;
        Ok(())
    }

    pub fn off(&mut self) -> Result<(), ActuatorError> {
        self.set_colour(COLOUR_OFF, 0.0)
    }

    pub fn current_colour(&self) -> Rgb {
        self.current
    }

    pub fn is_lit(&self) -> bool {
        self.current != COLOUR_OFF
    }
}

fn scale_channel(value: u8, scale: f32) -> u8 {
    (f32::from(value) * scale).round() as u8
}
