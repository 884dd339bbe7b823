//! System configuration parameters
//!
//! All tunable parameters for the NoOverflow guard.  Set once at startup
//! and immutable thereafter; [`SystemConfig::validate`] must pass before
//! the control loop is allowed to run.

use core::time::Duration;

use serde::{Deserialize, Serialize};

use crate::drivers::piezo::CHIRP_MS;
use crate::drivers::watchdog::DEFAULT_TIMEOUT_MS;
use crate::error::ConfigError;
use crate::level::buffer::MAX_SAMPLE_CAPACITY;
use crate::level::classifier::Thresholds;

/// Core system configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemConfig {
    // --- Level thresholds (probe volts) ---
    /// Lowest voltage classified as Info
    pub info_threshold_volts: f32,
    /// Lowest voltage classified as Notice
    pub notice_threshold_volts: f32,
    /// Lowest voltage classified as Warning (AC cut)
    pub warning_threshold_volts: f32,

    // --- Smoothing ---
    /// Number of recent readings in the running average
    pub sample_buffer_len: usize,

    // --- Power ---
    /// Minimum off-time (seconds) before the relay may re-energise
    pub cool_off_secs: f32,
    /// Relay input is active-low (pin LOW = AC on)
    pub relay_active_low: bool,

    // --- Alerts ---
    /// Global LED brightness (0.0-1.0)
    pub led_brightness: f32,
    /// Chirp the piezo on Notice and Warning
    pub audible_alerts: bool,

    // --- Timing ---
    /// How long the alert colour is shown each tick (milliseconds)
    pub alert_hold_ms: u32,
    /// Dark gap after the alert, before the next tick (milliseconds)
    pub flash_off_ms: u32,
    /// Task watchdog timeout; the slowest tick must finish well inside it
    pub watchdog_timeout_ms: u32,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            info_threshold_volts: 2.00,
            notice_threshold_volts: 2.12,
            warning_threshold_volts: 2.20,

            sample_buffer_len: 10,

            cool_off_secs: 60.0,
            relay_active_low: true,

            led_brightness: 1.0,
            audible_alerts: false,

            alert_hold_ms: 250,
            flash_off_ms: 500, // 0.75 s per tick
            watchdog_timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

impl SystemConfig {
    /// Reject any configuration the control loop cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.thresholds()?;

        if self.sample_buffer_len == 0 {
            return Err(ConfigError::ZeroBufferCapacity);
        }
        if self.sample_buffer_len > MAX_SAMPLE_CAPACITY {
            return Err(ConfigError::BufferCapacityTooLarge {
                requested: self.sample_buffer_len,
                max: MAX_SAMPLE_CAPACITY,
            });
        }
        self.cool_off()?;
        if self.tick_period_ms() == 0 {
            return Err(ConfigError::ZeroTickPeriod);
        }
        let worst_tick_ms = self.worst_case_tick_ms();
        if worst_tick_ms >= self.watchdog_timeout_ms {
            return Err(ConfigError::TickExceedsWatchdog {
                tick_ms: worst_tick_ms,
                watchdog_ms: self.watchdog_timeout_ms,
            });
        }
        if !(0.0..=1.0).contains(&self.led_brightness) {
            return Err(ConfigError::BrightnessOutOfRange);
        }
        Ok(())
    }

    /// Build the classifier thresholds from the three configured voltages.
    pub fn thresholds(&self) -> Result<Thresholds, ConfigError> {
        Thresholds::new(
            self.info_threshold_volts,
            self.notice_threshold_volts,
            self.warning_threshold_volts,
        )
    }

    /// Cool-off interval as a [`Duration`].
    pub fn cool_off(&self) -> Result<Duration, ConfigError> {
        if !self.cool_off_secs.is_finite() || self.cool_off_secs < 0.0 {
            return Err(ConfigError::InvalidCoolOff);
        }
        Duration::try_from_secs_f32(self.cool_off_secs).map_err(|_| ConfigError::InvalidCoolOff)
    }

    /// Full tick period: alert hold plus dark gap.
    pub fn tick_period_ms(&self) -> u32 {
        self.alert_hold_ms.saturating_add(self.flash_off_ms)
    }

    /// Longest a single tick blocks between watchdog feeds: the tick
    /// period plus a full chirp when tones are enabled.
    pub fn worst_case_tick_ms(&self) -> u32 {
        if self.audible_alerts {
            self.tick_period_ms().saturating_add(CHIRP_MS)
        } else {
            self.tick_period_ms()
        }
    }
}
