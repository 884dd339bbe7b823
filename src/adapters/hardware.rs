//! Hardware adapter — bridges real peripherals to domain port traits.
//!
//! Owns the level probe, status LED and piezo, exposing them through
//! [`LevelSensor`] and [`AlertSink`].  The relay is not here: it belongs
//! to the [`PowerGuard`](crate::control::PowerGuard).  On non-espidf
//! targets, the underlying drivers use cfg-gated simulation stubs.

use embedded_hal::delay::DelayNs;

use crate::app::ports::{AlertSink, LevelSensor};
use crate::drivers::piezo::Piezo;
use crate::drivers::status_led::{COLOUR_AMBER, COLOUR_RED, Rgb, StatusLed};
use crate::error::{ActuatorError, SensorError};
use crate::level::{Tier, Volts};
use crate::sensors::LevelProbe;

/// Info is shown dimmer than Notice.
pub const INFO_LEVEL: f32 = 0.25;

/// LED presentation for a tier: colour and relative intensity.
/// `None` means dark.
pub fn tier_presentation(tier: Tier) -> Option<(Rgb, f32)> {
    match tier {
        Tier::Normal => None,
        Tier::Info => Some((COLOUR_AMBER, INFO_LEVEL)),
        Tier::Notice => Some((COLOUR_AMBER, 1.0)),
        Tier::Warning => Some((COLOUR_RED, 1.0)),
    }
}

/// Concrete adapter that combines the alert/sensor hardware behind port traits.
pub struct HardwareAdapter<D: DelayNs> {
    probe: LevelProbe,
    led: StatusLed,
    piezo: Piezo,
    delay: D,
    audible: bool,
}

impl<D: DelayNs> HardwareAdapter<D> {
    pub fn new(probe: LevelProbe, led: StatusLed, piezo: Piezo, delay: D, audible: bool) -> Self {
        Self {
            probe,
            led,
            piezo,
            delay,
            audible,
        }
    }

    pub fn led(&self) -> &StatusLed {
        &self.led
    }

    pub fn piezo(&self) -> &Piezo {
        &self.piezo
    }

    pub fn probe(&self) -> &LevelProbe {
        &self.probe
    }
}

// ── LevelSensor implementation ────────────────────────────────

impl<D: DelayNs> LevelSensor for HardwareAdapter<D> {
    fn read_volts(&mut self) -> Result<Volts, SensorError> {
        Ok(self.probe.read()?.volts)
    }
}

// ── AlertSink implementation ──────────────────────────────────

impl<D: DelayNs> AlertSink for HardwareAdapter<D> {
    fn render(&mut self, tier: Tier) -> Result<(), ActuatorError> {
        match tier_presentation(tier) {
            Some((colour, level)) => self.led.set_colour(colour, level)?,
            None => self.led.off()?,
        }
        if self.audible && tier.is_audible() {
            self.piezo.chirp(&mut self.delay)?;
        }
        Ok(())
    }

    fn flash_off(&mut self) -> Result<(), ActuatorError> {
        self.led.off()
    }
}
