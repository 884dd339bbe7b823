//! Unified error types for the NoOverflow firmware.
//!
//! A single `Error` enum that every subsystem converts into, keeping the
//! control loop's error handling uniform.  All variants are `Copy` so they
//! can be passed around the tick path without allocation.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

/// Every fallible operation in the firmware funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Configuration is invalid; the control loop must not start.
    Config(ConfigError),
    /// An average was requested from a buffer holding no samples.
    EmptyBuffer(EmptyBufferError),
    /// The level sensor could not be read.
    Sensor(SensorError),
    /// An actuator (relay, LED, piezo) command failed.
    Actuator(ActuatorError),
    /// Peripheral initialisation failed.
    Init(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "config: {e}"),
            Self::EmptyBuffer(e) => write!(f, "buffer: {e}"),
            Self::Sensor(e) => write!(f, "sensor: {e}"),
            Self::Actuator(e) => write!(f, "actuator: {e}"),
            Self::Init(msg) => write!(f, "init: {msg}"),
        }
    }
}

impl core::error::Error for Error {}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

/// Startup-only, fatal.  Reported to the operator before the loop starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// A threshold voltage is NaN or infinite.
    ThresholdNotFinite,
    /// Thresholds must satisfy `info < notice < warning`.
    ThresholdsNotIncreasing,
    /// The smoothing buffer needs room for at least one sample.
    ZeroBufferCapacity,
    /// Requested capacity exceeds the static sample storage.
    BufferCapacityTooLarge { requested: usize, max: usize },
    /// Cool-off must be a finite, non-negative number of seconds.
    InvalidCoolOff,
    /// Tick timing must be non-zero.
    ZeroTickPeriod,
    /// The slowest tick would starve the task watchdog.
    TickExceedsWatchdog { tick_ms: u32, watchdog_ms: u32 },
    /// LED brightness must lie in `0.0..=1.0`.
    BrightnessOutOfRange,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ThresholdNotFinite => write!(f, "threshold voltage is not finite"),
            Self::ThresholdsNotIncreasing => {
                write!(f, "thresholds must be strictly increasing (info < notice < warning)")
            }
            Self::ZeroBufferCapacity => write!(f, "buffer capacity must be at least 1"),
            Self::BufferCapacityTooLarge { requested, max } => {
                write!(f, "buffer capacity {requested} exceeds maximum {max}")
            }
            Self::InvalidCoolOff => write!(f, "cool-off must be finite and >= 0 seconds"),
            Self::ZeroTickPeriod => write!(f, "tick period must be non-zero"),
            Self::TickExceedsWatchdog { tick_ms, watchdog_ms } => {
                write!(f, "worst-case tick {tick_ms}ms does not fit watchdog {watchdog_ms}ms")
            }
            Self::BrightnessOutOfRange => write!(f, "LED brightness must be 0.0-1.0"),
        }
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

// ---------------------------------------------------------------------------
// Empty buffer
// ---------------------------------------------------------------------------

/// Recoverable: the control cycle substitutes the instantaneous reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmptyBufferError;

impl fmt::Display for EmptyBufferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "average of empty sample buffer")
    }
}

impl From<EmptyBufferError> for Error {
    fn from(e: EmptyBufferError) -> Self {
        Self::EmptyBuffer(e)
    }
}

// ---------------------------------------------------------------------------
// Sensor errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorError {
    /// ADC read returned an error or timed out.
    AdcReadFailed,
    /// Reading is outside the physically plausible range.
    OutOfRange,
}

impl fmt::Display for SensorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AdcReadFailed => write!(f, "ADC read failed"),
            Self::OutOfRange => write!(f, "reading out of range"),
        }
    }
}

impl From<SensorError> for Error {
    fn from(e: SensorError) -> Self {
        Self::Sensor(e)
    }
}

// ---------------------------------------------------------------------------
// Actuator errors
// ---------------------------------------------------------------------------

/// A stuck relay has no safe degraded mode, so these are fatal to the loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActuatorError {
    /// Relay GPIO write failed.
    RelayWriteFailed,
    /// LED PWM duty write failed.
    LedWriteFailed,
    /// Piezo PWM frequency/duty write failed.
    PiezoWriteFailed,
}

impl fmt::Display for ActuatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RelayWriteFailed => write!(f, "relay write failed"),
            Self::LedWriteFailed => write!(f, "LED write failed"),
            Self::PiezoWriteFailed => write!(f, "piezo write failed"),
        }
    }
}

impl From<ActuatorError> for Error {
    fn from(e: ActuatorError) -> Self {
        Self::Actuator(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Firmware-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
