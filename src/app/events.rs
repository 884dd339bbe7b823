//! Outbound application events.
//!
//! The [`ControlCycle`](super::service::ControlCycle) emits these through
//! the [`EventSink`](super::ports::EventSink) port.  Adapters on the other
//! side decide what to do with them (serial log today).

use core::time::Duration;

use serde::Serialize;

use crate::clock::Instant;
use crate::level::{Tier, Volts};

/// Structured events emitted by the application core.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// Per-tick telemetry snapshot.
    Telemetry(TelemetryData),

    /// The classifier adopted a new tier.
    TierChanged { from: Tier, to: Tier },

    /// AC power was cut; the cool-off window runs from `at`.
    PowerCut { at: Instant },

    /// AC power was restored.
    PowerRestored,

    /// A restore was vetoed by the cool-off guard.  Emitted once per
    /// window, on the first suppressed request.
    RestoreHeld { remaining: Duration },

    /// The control cycle has started (AC energised, carries initial tier).
    Started(Tier),
}

/// A point-in-time telemetry snapshot suitable for logging or transmission.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TelemetryData {
    pub tick: u64,
    pub reading_volts: Volts,
    pub average_volts: Volts,
    pub tier: Tier,
    pub power_on: bool,
    pub cooling_off: bool,
}
