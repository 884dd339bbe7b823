//! AC power relay driver.
//!
//! Generic over any `embedded_hal` [`OutputPin`]; on the device this is an
//! `esp-idf-hal` `PinDriver`.  Most opto-isolated relay modules are
//! active-low, so polarity is configurable.
//!
//! ## Safety contract
//!
//! This is a dumb actuator.  Cool-off policy lives in
//! [`PowerGuard`](crate::control::PowerGuard); any pin error is reported
//! and treated as fatal upstream.

use embedded_hal::digital::OutputPin;
use log::error;

use crate::app::ports::PowerOutput;
use crate::error::ActuatorError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    /// Pin HIGH energises the AC supply.
    ActiveHigh,
    /// Pin LOW energises the AC supply.
    ActiveLow,
}

impl Polarity {
    pub fn from_active_low(active_low: bool) -> Self {
        if active_low { Self::ActiveLow } else { Self::ActiveHigh }
    }
}

pub struct RelayOutput<P: OutputPin> {
    pin: P,
    polarity: Polarity,
    energized: Option<bool>,
}

impl<P: OutputPin> RelayOutput<P> {
    pub fn new(pin: P, polarity: Polarity) -> Self {
        Self {
            pin,
            polarity,
            energized: None,
        }
    }

    /// Last commanded state; `None` before the first command.
    pub fn energized(&self) -> Option<bool> {
        self.energized
    }

    pub fn polarity(&self) -> Polarity {
        self.polarity
    }

    pub fn pin(&self) -> &P {
        &self.pin
    }
}

impl<P: OutputPin> PowerOutput for RelayOutput<P> {
    fn set_energized(&mut self, on: bool) -> Result<(), ActuatorError> {
        let drive_high = match self.polarity {
            Polarity::ActiveHigh => on,
            Polarity::ActiveLow => !on,
        };
        let res = if drive_high {
            self.pin.set_high()
        } else {
            self.pin.set_low()
        };
        if let Err(e) = res {
            error!("relay: pin write failed: {:?}", e);
            return Err(ActuatorError::RelayWriteFailed);
        }
        self.energized = Some(on);
        Ok(())
    }
}
