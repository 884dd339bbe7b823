//! AC power guard with a cool-off interlock.
//!
//! Gates the relay so that, once power has been cut, it cannot be restored
//! until `cool_off` has elapsed on the monotonic clock.  Prevents relay
//! chatter (and compressor/pump damage) while the level hovers around the
//! warning threshold.
//!
//! ## Rules
//!
//! 1. `turn_off` always drives the relay off.  The off-timestamp is only
//!    recorded if the relay was on, or if it has never been turned off, so
//!    repeated cuts measure the window from the *first* one.
//! 2. `turn_on` is silently suppressed while cooling off.
//! 3. The guard can veto a turn-on, never a turn-off.

use core::time::Duration;

use log::{info, warn};

use crate::app::ports::PowerOutput;
use crate::clock::Instant;
use crate::error::Result;

/// Outcome of a [`PowerGuard::turn_on`] request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerAction {
    /// Relay went from off to on.
    Energized,
    /// Relay was already on (output re-asserted).
    AlreadyOn,
    /// Request ignored: still inside the cool-off window.
    Suppressed { remaining: Duration },
}

pub struct PowerGuard<O: PowerOutput> {
    output: O,
    switch_on: bool,
    last_off: Option<Instant>,
    cool_off: Duration,
}

impl<O: PowerOutput> PowerGuard<O> {
    /// The relay state is treated as off until the first command.
    pub fn new(output: O, cool_off: Duration) -> Self {
        Self {
            output,
            switch_on: false,
            last_off: None,
            cool_off,
        }
    }

    /// Cut power.  Returns the off-timestamp the cool-off is measured from.
    pub fn turn_off(&mut self, now: Instant) -> Result<Instant> {
        let off_at = match self.last_off {
            Some(prev) if !self.switch_on => prev,
            _ => now,
        };

        self.output.set_energized(false)?;

        if self.switch_on {
            warn!("power guard: AC cut at {off_at}");
        }
        self.switch_on = false;
        self.last_off = Some(off_at);
        Ok(off_at)
    }

    /// Restore power unless cooling off.
    pub fn turn_on(&mut self, now: Instant) -> Result<PowerAction> {
        if let Some(remaining) = self.cool_off_remaining(now) {
            return Ok(PowerAction::Suppressed { remaining });
        }

        self.output.set_energized(true)?;

        if self.switch_on {
            Ok(PowerAction::AlreadyOn)
        } else {
            info!("power guard: AC energised at {now}");
            self.switch_on = true;
            Ok(PowerAction::Energized)
        }
    }

    /// True iff power was cut less than `cool_off` ago.
    pub fn is_cooling_off(&self, now: Instant) -> bool {
        self.cool_off_remaining(now).is_some()
    }

    /// Time left in the cool-off window, `None` when not cooling off.
    pub fn cool_off_remaining(&self, now: Instant) -> Option<Duration> {
        let off_at = self.last_off?;
        let elapsed = now.saturating_duration_since(off_at);
        if elapsed < self.cool_off {
            Some(self.cool_off - elapsed)
        } else {
            None
        }
    }

    pub fn is_on(&self) -> bool {
        self.switch_on
    }

    /// When power was (first) cut, if ever.
    pub fn last_off(&self) -> Option<Instant> {
        self.last_off
    }

    pub fn cool_off(&self) -> Duration {
        self.cool_off
    }

    pub fn output(&self) -> &O {
        &self.output
    }
}
