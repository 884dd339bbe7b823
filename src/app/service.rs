//! Control cycle — the hexagonal core.
//!
//! [`ControlCycle`] owns the smoothing buffer, the classifier and the power
//! guard.  Each tick is a synchronous step over injected ports, so the
//! whole pipeline runs on the host with mock adapters.
//!
//! ```text
//!  LevelSensor ──▶ ┌──────────────────────────────┐ ──▶ EventSink
//!                  │         ControlCycle          │
//!   AlertSink  ◀── │ Buffer · Classifier · Guard  │ ──▶ PowerOutput
//!                  └──────────────────────────────┘
//! ```
//!
//! Per tick, strictly in order: read → buffer → average → classify →
//! power decision → alert.  The power decision always uses this tick's
//! tier, and the clock is sampled at the moment of the decision.

use log::{debug, info, warn};

use crate::clock::Instant;
use crate::config::SystemConfig;
use crate::control::{PowerAction, PowerGuard};
use crate::error::{ConfigError, EmptyBufferError, Result};
use crate::level::{LevelClassifier, SampleBuffer, Tier, Volts};

use super::events::{AppEvent, TelemetryData};
use super::ports::{AlertSink, Clock, EventSink, LevelSensor, PowerOutput};

// ───────────────────────────────────────────────────────────────
// ControlCycle
// ───────────────────────────────────────────────────────────────

/// The control cycle orchestrates all domain logic.
pub struct ControlCycle<O: PowerOutput> {
    buffer: SampleBuffer,
    classifier: LevelClassifier,
    guard: PowerGuard<O>,
    tick_count: u64,
    /// A `RestoreHeld` event has been emitted for the current window.
    hold_reported: bool,
    last_telemetry: Option<TelemetryData>,
}

impl<O: PowerOutput> ControlCycle<O> {
    /// Construct from a validated configuration and the relay actuator.
    ///
    /// Does **not** touch the relay — call [`start`](Self::start) next.
    pub fn new(config: &SystemConfig, relay: O) -> core::result::Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            buffer: SampleBuffer::new(config.sample_buffer_len)?,
            classifier: LevelClassifier::new(config.thresholds()?),
            guard: PowerGuard::new(relay, config.cool_off()?),
            tick_count: 0,
            hold_reported: false,
            last_telemetry: None,
        })
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Energise the relay and announce the initial tier.
    pub fn start(&mut self, clock: &impl Clock, sink: &mut impl EventSink) -> Result<()> {
        self.guard.turn_on(clock.now())?;
        sink.emit(&AppEvent::Started(self.classifier.tier()));
        info!("ControlCycle started in {}", self.classifier.tier());
        Ok(())
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// Run one control step.
    ///
    /// The `hw` parameter satisfies **both** [`LevelSensor`] and
    /// [`AlertSink`], avoiding a double mutable borrow of the board adapter.
    /// Sensor and actuator failures propagate; the caller treats them as
    /// fatal.
    pub fn tick(
        &mut self,
        hw: &mut (impl LevelSensor + AlertSink),
        clock: &impl Clock,
        sink: &mut impl EventSink,
    ) -> Result<TelemetryData> {
        self.tick_count += 1;

        // 1-3. Sample and smooth
        let reading = hw.read_volts()?;
        self.buffer.push(reading);
        let average = match self.buffer.average() {
            Ok(avg) => avg,
            Err(EmptyBufferError) => reading,
        };

        // 4. Classify
        let prev = self.classifier.tier();
        let tier = self.classifier.apply_inputs(&[reading, average]);
        if tier != prev {
            sink.emit(&AppEvent::TierChanged { from: prev, to: tier });
        }

        // 5. Power, then alert
        let now = clock.now();
        self.apply_power(tier, now, sink)?;
        hw.render(tier)?;

        let telemetry = TelemetryData {
            tick: self.tick_count,
            reading_volts: reading,
            average_volts: average,
            tier,
            power_on: self.guard.is_on(),
            cooling_off: self.guard.is_cooling_off(now),
        };
        self.last_telemetry = Some(telemetry);
        sink.emit(&AppEvent::Telemetry(telemetry));
        Ok(telemetry)
    }

    /// Blank the alert LED before the next tick (heartbeat flash).
    pub fn end_tick(&mut self, alerts: &mut impl AlertSink) -> Result<()> {
        alerts.flash_off()?;
        Ok(())
    }

    /// Best-effort relay cut on a fatal error path.
    pub fn fail_safe(&mut self, clock: &impl Clock) -> Result<()> {
        warn!("ControlCycle: fail-safe relay cut");
        self.guard.turn_off(clock.now())?;
        Ok(())
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn tier(&self) -> Tier {
        self.classifier.tier()
    }

    /// Total ticks executed since startup.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Running average, `None` before the first tick.
    pub fn average(&self) -> Option<Volts> {
        self.buffer.average().ok()
    }

    pub fn is_powered(&self) -> bool {
        self.guard.is_on()
    }

    pub fn is_cooling_off(&self, now: Instant) -> bool {
        self.guard.is_cooling_off(now)
    }

    /// Snapshot from the most recent tick.
    pub fn last_telemetry(&self) -> Option<TelemetryData> {
        self.last_telemetry
    }

    pub fn buffer(&self) -> &SampleBuffer {
        &self.buffer
    }

    pub fn power_guard(&self) -> &PowerGuard<O> {
        &self.guard
    }

    // ── Internal ──────────────────────────────────────────────

    fn apply_power(&mut self, tier: Tier, now: Instant, sink: &mut impl EventSink) -> Result<()> {
        if tier.cuts_power() {
            let new_window = self.guard.is_on() || self.guard.last_off().is_none();
            let at = self.guard.turn_off(now)?;
            if new_window {
                self.hold_reported = false;
                sink.emit(&AppEvent::PowerCut { at });
            }
            return Ok(());
        }

        match self.guard.turn_on(now)? {
            PowerAction::Energized => {
                self.hold_reported = false;
                sink.emit(&AppEvent::PowerRestored);
            }
            PowerAction::AlreadyOn => {}
            PowerAction::Suppressed { remaining } => {
                debug!("restore held, {:?} cool-off left", remaining);
                if !self.hold_reported {
                    self.hold_reported = true;
                    sink.emit(&AppEvent::RestoreHeld { remaining });
                }
            }
        }
        Ok(())
    }
}
