//! Passive piezo buzzer driver.
//!
//! One LEDC channel on its own timer; each note retunes the timer
//! frequency and gates the duty.  Plays a short descending chirp
//! (C5 then A4) for audible alerts.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: drives LEDC CH3 / timer 1 via hw_init.
//! On host/test: hw_init calls are no-ops, notes are only recorded.

use embedded_hal::delay::DelayNs;

use crate::drivers::hw_init;
use crate::error::ActuatorError;
use crate::pins;

/// Chirp notes in play order (Hz).
pub const CHIRP_NOTES_HZ: [u32; 2] = [523, 440];
pub const NOTE_ON_MS: u32 = 250;
pub const NOTE_GAP_MS: u32 = 50;
/// Time one chirp blocks the caller.
pub const CHIRP_MS: u32 = (NOTE_ON_MS + NOTE_GAP_MS) * CHIRP_NOTES_HZ.len() as u32;
/// Quarter duty.
const TONE_DUTY: u8 = ((pins::PWM_MAX_DUTY + 1) / 4) as u8;

pub struct Piezo {
    notes_played: u32,
}

impl Default for Piezo {
    fn default() -> Self {
        Self::new()
    }
}

impl Piezo {
    pub fn new() -> Self {
        Self { notes_played: 0 }
    }

    /// Play the alert chirp.  Blocks for [`CHIRP_MS`].
    pub fn chirp(&mut self, delay: &mut impl DelayNs) -> Result<(), ActuatorError> {
        for freq in CHIRP_NOTES_HZ {
            self.tone(freq)?;
            delay.delay_ms(NOTE_ON_MS);
            self.silence()?;
            delay.delay_ms(NOTE_GAP_MS);
        }
        Ok(())
    }

    fn tone(&mut self, freq_hz: u32) -> Result<(), ActuatorError> {
        if !hw_init::ledc_retune(hw_init::LEDC_TIMER_PIEZO, freq_hz)
            || !hw_init::ledc_set(hw_init::LEDC_CH_PIEZO, TONE_DUTY)
        {
            // Don't leave a stuck tone behind.
            let _ = hw_init::ledc_set(hw_init::LEDC_CH_PIEZO, 0);
            return Err(ActuatorError::PiezoWriteFailed);
        }
        self.notes_played = self.notes_played.saturating_add(1);
        Ok(())
    }

    pub fn silence(&mut self) -> Result<(), ActuatorError> {
        if hw_init::ledc_set(hw_init::LEDC_CH_PIEZO, 0) {
            Ok(())
        } else {
            Err(ActuatorError::PiezoWriteFailed)
        }
    }

    /// Notes played since boot.
    pub fn notes_played(&self) -> u32 {
        self.notes_played
    }
}
