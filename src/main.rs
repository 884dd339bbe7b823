//! NoOverflow Firmware — Main Entry Point
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                   Adapters (outer ring)                    │
//! │                                                            │
//! │  HardwareAdapter        RelayOutput     Esp32TimeAdapter   │
//! │  (LevelSensor+Alerts)   (PowerOutput)   (Clock)            │
//! │  LogEventSink (EventSink)                                  │
//! │                                                            │
//! │  ───────────────── Port Trait Boundary ─────────────────   │
//! │                                                            │
//! │  ┌──────────────────────────────────────────────────────┐  │
//! │  │            ControlCycle (pure logic)                 │  │
//! │  │   SampleBuffer · LevelClassifier · PowerGuard        │  │
//! │  └──────────────────────────────────────────────────────┘  │
//! │                                                            │
//! │  Fixed-rate loop: tick → hold → flash off → gap → feed WDT │
//! └────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use anyhow::Result;
use esp_idf_hal::delay::FreeRtos;
use esp_idf_hal::gpio::PinDriver;
use esp_idf_hal::peripherals::Peripherals;
use log::{error, info};

use nooverflow::adapters::hardware::HardwareAdapter;
use nooverflow::adapters::log_sink::LogEventSink;
use nooverflow::adapters::time::Esp32TimeAdapter;
use nooverflow::app::ports::{Clock, EventSink, PowerOutput};
use nooverflow::app::service::ControlCycle;
use nooverflow::config::SystemConfig;
use nooverflow::drivers::hw_init;
use nooverflow::drivers::piezo::Piezo;
use nooverflow::drivers::relay::{Polarity, RelayOutput};
use nooverflow::drivers::status_led::StatusLed;
use nooverflow::drivers::watchdog::Watchdog;
use nooverflow::error::Error;
use nooverflow::pins;
use nooverflow::sensors::LevelProbe;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  NoOverflow v{}                      ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Configuration (fatal if invalid) ───────────────────
    let config = SystemConfig::default();
    if let Err(e) = config.validate() {
        error!("Invalid configuration: {} — refusing to start", e);
        return Err(Error::from(e).into());
    }
    info!(
        "Config: info={:.2}V notice={:.2}V warn={:.2}V window={} cool_off={}s",
        config.info_threshold_volts,
        config.notice_threshold_volts,
        config.warning_threshold_volts,
        config.sample_buffer_len,
        config.cool_off_secs,
    );

    // ── 3. Peripherals ────────────────────────────────────────
    hw_init::init_peripherals().map_err(Error::from)?;
    let peripherals = Peripherals::take()?;
    const _: () = assert!(pins::RELAY_GPIO == 3, "relay PinDriver below is bound to gpio3");
    let relay_pin = PinDriver::output(peripherals.pins.gpio3)?;
    let relay = RelayOutput::new(relay_pin, Polarity::from_active_low(config.relay_active_low));

    let mut hw = HardwareAdapter::new(
        LevelProbe::new(pins::LEVEL_ADC_GPIO),
        StatusLed::new(config.led_brightness),
        Piezo::new(),
        FreeRtos,
        config.audible_alerts,
    );
    let clock = Esp32TimeAdapter::new();
    let mut sink = LogEventSink::new();

    // ── 4. Control cycle ──────────────────────────────────────
    let mut cycle = ControlCycle::new(&config, relay).map_err(Error::from)?;
    cycle.start(&clock, &mut sink)?;
    let mut watchdog = Watchdog::new(config.watchdog_timeout_ms);

    info!(
        "System ready. Entering control loop ({}ms/tick, worst {}ms, watchdog {}ms).",
        config.tick_period_ms(),
        config.worst_case_tick_ms(),
        config.watchdog_timeout_ms,
    );

    // ── 5. Control loop ───────────────────────────────────────
    loop {
        if let Err(e) = run_tick(&mut cycle, &mut hw, &clock, &mut sink, &config) {
            halt(&mut cycle, &clock, e);
        }
        watchdog.feed();
    }
}

/// One fixed-rate tick: classify and actuate, hold the alert, flash off,
/// then wait out the dark gap.
fn run_tick<O: PowerOutput>(
    cycle: &mut ControlCycle<O>,
    hw: &mut HardwareAdapter<FreeRtos>,
    clock: &impl Clock,
    sink: &mut impl EventSink,
    config: &SystemConfig,
) -> nooverflow::error::Result<()> {
    cycle.tick(hw, clock, sink)?;
    FreeRtos::delay_ms(config.alert_hold_ms);
    cycle.end_tick(hw)?;
    FreeRtos::delay_ms(config.flash_off_ms);
    Ok(())
}

/// Sensor/actuator failures have no safe degraded mode: cut AC, stop
/// feeding the watchdog and let it reset the board.
fn halt<O: PowerOutput>(cycle: &mut ControlCycle<O>, clock: &impl Clock, cause: Error) -> ! {
    error!("Control loop fault: {} — cutting AC and halting", cause);
    if let Err(e) = cycle.fail_safe(clock) {
        error!("Fail-safe relay cut failed: {}", e);
    }
    loop {
        FreeRtos::delay_ms(1_000);
    }
}
