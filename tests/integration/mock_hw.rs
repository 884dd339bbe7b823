//! Mock hardware adapters for integration tests.
//!
//! The board mock replays a scripted list of probe voltages and records
//! every alert call; the relay mock records every energise command.  A
//! manual clock lets tests jump across the cool-off window instantly.

use std::cell::Cell;
use std::collections::VecDeque;
use std::time::Duration;

use nooverflow::app::events::AppEvent;
use nooverflow::app::ports::{AlertSink, Clock, EventSink, LevelSensor, PowerOutput};
use nooverflow::clock::Instant;
use nooverflow::error::{ActuatorError, SensorError};
use nooverflow::level::{Tier, Volts};

// ── Alert call record ─────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AlertCall {
    Render(Tier),
    FlashOff,
}

// ── MockBoard (LevelSensor + AlertSink) ───────────────────────

pub struct MockBoard {
    readings: VecDeque<Volts>,
    /// Value returned once the script runs dry.
    idle: Volts,
    pub sensor_fault: bool,
    pub alert_fault: bool,
    pub calls: Vec<AlertCall>,
}

#[allow(dead_code)]
impl MockBoard {
    pub fn new(readings: &[Volts]) -> Self {
        Self {
            readings: readings.iter().copied().collect(),
            idle: 0.0,
            sensor_fault: false,
            alert_fault: false,
            calls: Vec::new(),
        }
    }

    /// Queue more readings behind the current script.
    pub fn script(&mut self, readings: &[Volts]) {
        self.readings.extend(readings.iter().copied());
    }

    pub fn renders(&self) -> Vec<Tier> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                AlertCall::Render(t) => Some(*t),
                AlertCall::FlashOff => None,
            })
            .collect()
    }

    pub fn flash_offs(&self) -> usize {
        self.calls.iter().filter(|c| **c == AlertCall::FlashOff).count()
    }
}

impl LevelSensor for MockBoard {
    fn read_volts(&mut self) -> Result<Volts, SensorError> {
        if self.sensor_fault {
            return Err(SensorError::AdcReadFailed);
        }
        Ok(self.readings.pop_front().unwrap_or(self.idle))
    }
}

impl AlertSink for MockBoard {
    fn render(&mut self, tier: Tier) -> Result<(), ActuatorError> {
        if self.alert_fault {
            return Err(ActuatorError::LedWriteFailed);
        }
        self.calls.push(AlertCall::Render(tier));
        Ok(())
    }

    fn flash_off(&mut self) -> Result<(), ActuatorError> {
        if self.alert_fault {
            return Err(ActuatorError::LedWriteFailed);
        }
        self.calls.push(AlertCall::FlashOff);
        Ok(())
    }
}

// ── MockRelay (PowerOutput) ───────────────────────────────────

#[derive(Default)]
pub struct MockRelay {
    pub writes: Vec<bool>,
    pub fault: bool,
}

#[allow(dead_code)]
impl MockRelay {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last commanded state, `false` if never commanded.
    pub fn energized(&self) -> bool {
        self.writes.last().copied().unwrap_or(false)
    }

    pub fn cuts(&self) -> usize {
        self.writes.iter().filter(|w| !**w).count()
    }
}

impl PowerOutput for MockRelay {
    fn set_energized(&mut self, on: bool) -> Result<(), ActuatorError> {
        if self.fault {
            return Err(ActuatorError::RelayWriteFailed);
        }
        self.writes.push(on);
        Ok(())
    }
}

// ── ManualClock ───────────────────────────────────────────────

pub struct ManualClock {
    now: Cell<Instant>,
}

#[allow(dead_code)]
impl ManualClock {
    pub fn new() -> Self {
        Self {
            now: Cell::new(Instant::ZERO),
        }
    }

    pub fn set_secs(&self, secs: u64) {
        self.now.set(Instant::from_secs(secs));
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get().saturating_add(by));
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.now.get()
    }
}

// ── RecordingSink (EventSink) ─────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, pred: impl Fn(&AppEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }

    pub fn power_cuts(&self) -> usize {
        self.count(|e| matches!(e, AppEvent::PowerCut { .. }))
    }

    pub fn restores(&self) -> usize {
        self.count(|e| matches!(e, AppEvent::PowerRestored))
    }

    pub fn holds(&self) -> usize {
        self.count(|e| matches!(e, AppEvent::RestoreHeld { .. }))
    }

    pub fn tier_changes(&self) -> Vec<(Tier, Tier)> {
        self.events
            .iter()
            .filter_map(|e| match e {
                AppEvent::TierChanged { from, to } => Some((*from, *to)),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(event.clone());
    }
}
