//! Port traits — the hexagonal boundary between domain logic and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ ControlCycle (domain)
//! ```
//!
//! Driven adapters (level probe, relay, LED/piezo, clock, event sinks)
//! implement these traits.  The [`ControlCycle`](super::service::ControlCycle)
//! consumes them via generics, so the domain core never touches hardware
//! directly and can be unit-tested on the host.

use crate::clock::Instant;
use crate::error::{ActuatorError, SensorError};
use crate::level::{Tier, Volts};

// ───────────────────────────────────────────────────────────────
// Sensor port (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Read-side port: one probe voltage per tick.  Expected to be fast and
/// non-blocking.
pub trait LevelSensor {
    fn read_volts(&mut self) -> Result<Volts, SensorError>;
}

// ───────────────────────────────────────────────────────────────
// Actuator ports (driven adapters: domain → hardware)
// ───────────────────────────────────────────────────────────────

/// The physical AC relay, driven exclusively by the
/// [`PowerGuard`](crate::control::PowerGuard).
pub trait PowerOutput {
    /// `true` = AC supply energised.  Polarity is the adapter's concern.
    fn set_energized(&mut self, on: bool) -> Result<(), ActuatorError>;
}

/// Visual/audible presentation of a tier.  Stateless from the domain's
/// point of view.
pub trait AlertSink {
    /// Show the presentation for `tier` (colour, brightness, tone).
    fn render(&mut self, tier: Tier) -> Result<(), ActuatorError>;

    /// Blank the LED between ticks (heartbeat flash).
    fn flash_off(&mut self) -> Result<(), ActuatorError>;
}

// ───────────────────────────────────────────────────────────────
// Clock port
// ───────────────────────────────────────────────────────────────

/// Monotonic time source.  Must never go backwards (no wall clock).
pub trait Clock {
    fn now(&self) -> Instant;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  Adapters decide where they go.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}
