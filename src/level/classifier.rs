//! Four-tier level classifier with an all-inputs-agree rule.
//!
//! Each input (in practice the instantaneous reading and the buffer
//! average) is placed into exactly one half-open voltage band:
//!
//! | Tier    | Band                          |
//! |---------|-------------------------------|
//! | Normal  | `v < info`                    |
//! | Info    | `info <= v < notice`          |
//! | Notice  | `notice <= v < warning`       |
//! | Warning | `v >= warning`                |
//!
//! The classifier only moves to a tier when **every** input lands in that
//! band.  When inputs disagree (a spike the average has not caught up
//! with, or a drop the average still remembers) the previous tier is kept.

use log::debug;

use super::{Tier, Volts};
use crate::error::ConfigError;

/// Band boundaries, strictly increasing.  Immutable once built.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    info: Volts,
    notice: Volts,
    warning: Volts,
}

impl Thresholds {
    pub fn new(info: Volts, notice: Volts, warning: Volts) -> Result<Self, ConfigError> {
        if !(info.is_finite() && notice.is_finite() && warning.is_finite()) {
            return Err(ConfigError::ThresholdNotFinite);
        }
        if !(info < notice && notice < warning) {
            return Err(ConfigError::ThresholdsNotIncreasing);
        }
        Ok(Self { info, notice, warning })
    }

    pub fn info(&self) -> Volts {
        self.info
    }

    pub fn notice(&self) -> Volts {
        self.notice
    }

    pub fn warning(&self) -> Volts {
        self.warning
    }

    /// Band containing `v`.  `None` only for NaN, which lies in no band.
    pub fn classify(&self, v: Volts) -> Option<Tier> {
        if v < self.info {
            Some(Tier::Normal)
        } else if v < self.notice {
            Some(Tier::Info)
        } else if v < self.warning {
            Some(Tier::Notice)
        } else if v >= self.warning {
            Some(Tier::Warning)
        } else {
            None
        }
    }
}

/// Stateful classifier.  Starts in [`Tier::Normal`].
#[derive(Debug, Clone)]
pub struct LevelClassifier {
    thresholds: Thresholds,
    tier: Tier,
}

impl LevelClassifier {
    pub fn new(thresholds: Thresholds) -> Self {
        Self {
            thresholds,
            tier: Tier::Normal,
        }
    }

    /// Current tier.
    pub fn tier(&self) -> Tier {
        self.tier
    }

    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    /// Band for a single value, ignoring classifier state.
    pub fn classify(&self, v: Volts) -> Option<Tier> {
        self.thresholds.classify(v)
    }

    /// Adopt the first tier (in severity order) every input agrees on;
    /// otherwise keep the current one.  An empty slice is a no-op.
    ///
    /// Returns the tier in effect after the call.
    pub fn apply_inputs(&mut self, inputs: &[Volts]) -> Tier {
        if inputs.is_empty() {
            return self.tier;
        }

        let agreed = Tier::ALL.into_iter().find(|&tier| {
            inputs
                .iter()
                .all(|&v| self.thresholds.classify(v) == Some(tier))
        });

        match agreed {
            Some(tier) => self.tier = tier,
            None => debug!(
                "classifier: inputs disagree {:?}, holding {}",
                inputs, self.tier
            ),
        }
        self.tier
    }
}
