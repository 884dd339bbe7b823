//! ControlCycle integration tests.
//!
//! Drive the full read → smooth → classify → power → alert pipeline
//! through mock ports and assert on relay writes, alert calls and the
//! emitted event stream.

use std::time::Duration;

use nooverflow::app::events::AppEvent;
use nooverflow::app::service::ControlCycle;
use nooverflow::clock::Instant;
use nooverflow::config::SystemConfig;
use nooverflow::error::{ActuatorError, Error, SensorError};
use nooverflow::level::Tier;

use crate::mock_hw::{AlertCall, ManualClock, MockBoard, MockRelay, RecordingSink};

// ── Helpers ───────────────────────────────────────────────────

/// Default thresholds with a one-sample window, so every reading is
/// also the average and tiers follow the probe immediately.
fn unsmoothed_config() -> SystemConfig {
    SystemConfig {
        sample_buffer_len: 1,
        ..SystemConfig::default()
    }
}

fn started(config: &SystemConfig) -> (ControlCycle<MockRelay>, ManualClock, RecordingSink) {
    let clock = ManualClock::new();
    let mut sink = RecordingSink::new();
    let mut cycle = ControlCycle::new(config, MockRelay::new()).unwrap();
    cycle.start(&clock, &mut sink).unwrap();
    (cycle, clock, sink)
}

// ── Startup ───────────────────────────────────────────────────

#[test]
fn start_energises_relay_and_announces_normal() {
    let (cycle, _clock, sink) = started(&SystemConfig::default());

    assert!(cycle.is_powered());
    assert_eq!(cycle.power_guard().output().writes, vec![true]);
    assert_eq!(sink.events, vec![AppEvent::Started(Tier::Normal)]);
}

#[test]
fn start_propagates_relay_fault() {
    let clock = ManualClock::new();
    let mut sink = RecordingSink::new();
    let relay = MockRelay {
        fault: true,
        ..MockRelay::default()
    };
    let mut cycle = ControlCycle::new(&SystemConfig::default(), relay).unwrap();

    assert_eq!(
        cycle.start(&clock, &mut sink),
        Err(Error::Actuator(ActuatorError::RelayWriteFailed))
    );
    assert!(!cycle.is_powered());
    assert!(sink.events.is_empty());
}

// ── Smoothing + agreement ─────────────────────────────────────

#[test]
fn warning_waits_for_the_average_to_catch_up() {
    let (mut cycle, clock, mut sink) = started(&SystemConfig::default());
    let mut script = vec![1.5, 1.5];
    script.extend([2.25; 10]);
    let mut board = MockBoard::new(&script);

    // Ticks 3..=11 read Warning-range voltages, but the 10-sample average
    // lags behind (2.1 at tick 10, 2.175 at tick 11), so the tier holds.
    for tick in 1..=11 {
        clock.set_secs(tick);
        let t = cycle.tick(&mut board, &clock, &mut sink).unwrap();
        assert_eq!(t.tier, Tier::Normal, "tick {tick}");
        assert!(t.power_on, "tick {tick}");
    }
    let avg = cycle.average().unwrap();
    assert!((avg - 2.175).abs() < 1e-4, "avg {avg}");
    assert_eq!(sink.power_cuts(), 0);

    clock.set_secs(12);
    let t = cycle.tick(&mut board, &clock, &mut sink).unwrap();
    assert_eq!(t.tier, Tier::Warning);
    assert!(!t.power_on);
    assert!(t.cooling_off);
    assert_eq!(t.tick, 12);

    assert_eq!(sink.tier_changes(), vec![(Tier::Normal, Tier::Warning)]);
    assert!(sink.events.contains(&AppEvent::PowerCut {
        at: Instant::from_secs(12)
    }));
    assert!(!cycle.power_guard().output().energized());

    let renders = board.renders();
    assert_eq!(renders.len(), 12);
    assert!(renders[..11].iter().all(|t| *t == Tier::Normal));
    assert_eq!(renders[11], Tier::Warning);
}

#[test]
fn lower_tiers_keep_power_on() {
    let (mut cycle, clock, mut sink) = started(&unsmoothed_config());
    let mut board = MockBoard::new(&[2.05, 2.15, 1.0]);

    for _ in 0..3 {
        clock.advance(Duration::from_secs(1));
        cycle.tick(&mut board, &clock, &mut sink).unwrap();
        assert!(cycle.is_powered());
    }

    assert_eq!(board.renders(), vec![Tier::Info, Tier::Notice, Tier::Normal]);
    assert_eq!(
        sink.tier_changes(),
        vec![
            (Tier::Normal, Tier::Info),
            (Tier::Info, Tier::Notice),
            (Tier::Notice, Tier::Normal),
        ]
    );
    assert_eq!(sink.power_cuts(), 0);
    assert_eq!(cycle.power_guard().output().cuts(), 0);
}

#[test]
fn threshold_boundaries_are_inclusive() {
    let (mut cycle, clock, mut sink) = started(&unsmoothed_config());
    let mut board = MockBoard::new(&[2.00, 2.12, 2.20]);

    let tiers: Vec<Tier> = (0..3)
        .map(|_| cycle.tick(&mut board, &clock, &mut sink).unwrap().tier)
        .collect();

    assert_eq!(tiers, vec![Tier::Info, Tier::Notice, Tier::Warning]);
}

// ── Cool-off ──────────────────────────────────────────────────

#[test]
fn restore_is_held_until_cool_off_expires() {
    let (mut cycle, clock, mut sink) = started(&unsmoothed_config());
    let mut board = MockBoard::new(&[2.25, 1.5, 1.5, 1.5]);

    clock.set_secs(5);
    cycle.tick(&mut board, &clock, &mut sink).unwrap();
    assert!(!cycle.is_powered());
    assert_eq!(sink.power_cuts(), 1);

    // 30 s after the cut: level is back to Normal but the guard vetoes.
    clock.set_secs(35);
    let t = cycle.tick(&mut board, &clock, &mut sink).unwrap();
    assert_eq!(t.tier, Tier::Normal);
    assert!(!t.power_on);
    assert!(t.cooling_off);
    assert!(sink.events.contains(&AppEvent::RestoreHeld {
        remaining: Duration::from_secs(30)
    }));

    // Still inside the window: no second hold event, relay untouched.
    clock.set_secs(40);
    cycle.tick(&mut board, &clock, &mut sink).unwrap();
    assert_eq!(sink.holds(), 1);
    assert_eq!(cycle.power_guard().output().writes, vec![true, false]);

    clock.set_secs(65);
    let t = cycle.tick(&mut board, &clock, &mut sink).unwrap();
    assert!(t.power_on);
    assert!(!t.cooling_off);
    assert_eq!(sink.restores(), 1);
    assert!(cycle.power_guard().output().energized());
}

#[test]
fn repeated_warnings_keep_the_first_cut_time() {
    let (mut cycle, clock, mut sink) = started(&unsmoothed_config());
    let mut board = MockBoard::new(&[2.25, 2.30, 1.5, 1.5]);

    clock.set_secs(0);
    cycle.tick(&mut board, &clock, &mut sink).unwrap();
    clock.set_secs(20);
    cycle.tick(&mut board, &clock, &mut sink).unwrap();

    assert_eq!(sink.power_cuts(), 1);
    assert_eq!(cycle.power_guard().last_off(), Some(Instant::ZERO));

    // Window runs from t=0, not t=20.
    clock.set_secs(30);
    cycle.tick(&mut board, &clock, &mut sink).unwrap();
    assert!(!cycle.is_powered());

    clock.set_secs(60);
    cycle.tick(&mut board, &clock, &mut sink).unwrap();
    assert!(cycle.is_powered());
    assert_eq!(sink.restores(), 1);
}

#[test]
fn second_flood_opens_a_new_window() {
    let (mut cycle, clock, mut sink) = started(&unsmoothed_config());
    let mut board = MockBoard::new(&[2.25, 1.5, 2.25, 1.5, 1.5]);

    clock.set_secs(0);
    cycle.tick(&mut board, &clock, &mut sink).unwrap();
    clock.set_secs(70);
    cycle.tick(&mut board, &clock, &mut sink).unwrap();
    assert!(cycle.is_powered());

    clock.set_secs(100);
    cycle.tick(&mut board, &clock, &mut sink).unwrap();
    assert_eq!(sink.power_cuts(), 2);
    assert_eq!(cycle.power_guard().last_off(), Some(Instant::from_secs(100)));

    clock.set_secs(130);
    cycle.tick(&mut board, &clock, &mut sink).unwrap();
    assert!(!cycle.is_powered());
    assert_eq!(sink.holds(), 1);

    clock.set_secs(160);
    cycle.tick(&mut board, &clock, &mut sink).unwrap();
    assert!(cycle.is_powered());
    assert_eq!(sink.restores(), 2);
}

#[test]
fn zero_cool_off_restores_on_the_next_calm_tick() {
    let config = SystemConfig {
        cool_off_secs: 0.0,
        ..unsmoothed_config()
    };
    let (mut cycle, clock, mut sink) = started(&config);
    let mut board = MockBoard::new(&[2.25, 1.5]);

    cycle.tick(&mut board, &clock, &mut sink).unwrap();
    assert!(!cycle.is_powered());
    cycle.tick(&mut board, &clock, &mut sink).unwrap();
    assert!(cycle.is_powered());
    assert_eq!(sink.holds(), 0);
}

// ── Telemetry ─────────────────────────────────────────────────

#[test]
fn telemetry_reports_reading_and_average() {
    let (mut cycle, clock, mut sink) = started(&SystemConfig::default());
    let mut board = MockBoard::new(&[1.0, 2.0]);

    cycle.tick(&mut board, &clock, &mut sink).unwrap();
    let t = cycle.tick(&mut board, &clock, &mut sink).unwrap();

    assert_eq!(t.tick, 2);
    assert_eq!(t.reading_volts, 2.0);
    assert_eq!(t.average_volts, 1.5);
    assert_eq!(t.tier, Tier::Normal);
    assert_eq!(cycle.last_telemetry(), Some(t));
    assert_eq!(sink.count(|e| matches!(e, AppEvent::Telemetry(_))), 2);
    assert_eq!(sink.events.last(), Some(&AppEvent::Telemetry(t)));
}

#[test]
fn first_tick_average_is_the_reading() {
    let (mut cycle, clock, mut sink) = started(&SystemConfig::default());
    let mut board = MockBoard::new(&[1.75]);

    let t = cycle.tick(&mut board, &clock, &mut sink).unwrap();
    assert_eq!(t.average_volts, t.reading_volts);
    assert_eq!(cycle.buffer().len(), 1);
}

// ── Heartbeat flash ───────────────────────────────────────────

#[test]
fn end_tick_blanks_the_alert() {
    let (mut cycle, clock, mut sink) = started(&unsmoothed_config());
    let mut board = MockBoard::new(&[2.15]);

    cycle.tick(&mut board, &clock, &mut sink).unwrap();
    cycle.end_tick(&mut board).unwrap();

    assert_eq!(
        board.calls,
        vec![AlertCall::Render(Tier::Notice), AlertCall::FlashOff]
    );
}

// ── Faults ────────────────────────────────────────────────────

#[test]
fn sensor_fault_aborts_the_tick() {
    let (mut cycle, clock, mut sink) = started(&SystemConfig::default());
    let mut board = MockBoard::new(&[1.0]);
    board.sensor_fault = true;
    sink.clear();

    assert_eq!(
        cycle.tick(&mut board, &clock, &mut sink),
        Err(Error::Sensor(SensorError::AdcReadFailed))
    );
    assert!(cycle.buffer().is_empty());
    assert!(board.calls.is_empty());
    assert!(sink.events.is_empty());
    assert!(cycle.last_telemetry().is_none());

    cycle.fail_safe(&clock).unwrap();
    assert!(!cycle.is_powered());
    assert_eq!(cycle.power_guard().output().writes, vec![true, false]);
}

#[test]
fn power_decision_precedes_alert_fault() {
    let (mut cycle, clock, mut sink) = started(&unsmoothed_config());
    let mut board = MockBoard::new(&[2.25]);
    board.alert_fault = true;

    assert_eq!(
        cycle.tick(&mut board, &clock, &mut sink),
        Err(Error::Actuator(ActuatorError::LedWriteFailed))
    );
    // Relay was already cut before the LED write failed.
    assert!(!cycle.is_powered());
    assert_eq!(sink.power_cuts(), 1);
}

#[test]
fn script_exhaustion_reads_idle_level() {
    let (mut cycle, clock, mut sink) = started(&unsmoothed_config());
    let mut board = MockBoard::new(&[]);
    board.script(&[2.15]);

    assert_eq!(cycle.tick(&mut board, &clock, &mut sink).unwrap().tier, Tier::Notice);
    assert_eq!(cycle.tick(&mut board, &clock, &mut sink).unwrap().tier, Tier::Normal);
}
