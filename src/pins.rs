//! GPIO / peripheral pin assignments for the NoOverflow board.
//!
//! Single source of truth — every driver references this module rather than
//! hard-coding pin numbers.

// ---------------------------------------------------------------------------
// Level probe — Analog (ADC1)
// ---------------------------------------------------------------------------

/// Liquid level probe, analog voltage (0 – 3.3 V).
/// ADC1 channel 4 (GPIO 5 on ESP32-S3).
pub const LEVEL_ADC_GPIO: i32 = 5;

// ---------------------------------------------------------------------------
// AC relay
// ---------------------------------------------------------------------------

/// Digital output to the AC power relay module.  Active-low on the
/// reference board (LOW = AC on).
pub const RELAY_GPIO: i32 = 3;

// ---------------------------------------------------------------------------
// Alerts
// ---------------------------------------------------------------------------

pub const LED_R_GPIO: i32 = 11;
pub const LED_G_GPIO: i32 = 12;
pub const LED_B_GPIO: i32 = 13;

/// Passive piezo buzzer, driven by a variable-frequency LEDC channel.
pub const PIEZO_GPIO: i32 = 4;

// ---------------------------------------------------------------------------
// PWM configuration
// ---------------------------------------------------------------------------

/// LEDC timer resolution (bits).  8-bit gives 0 – 255 duty levels.
pub const PWM_RESOLUTION_BITS: u32 = 8;
/// Full-on duty at [`PWM_RESOLUTION_BITS`].
pub const PWM_MAX_DUTY: u32 = (1 << PWM_RESOLUTION_BITS) - 1;
/// LEDC frequency for the RGB status LED (1 kHz).
pub const LED_PWM_FREQ_HZ: u32 = 1_000;
/// Initial LEDC frequency for the piezo (A4); retuned per note.
pub const PIEZO_BASE_FREQ_HZ: u32 = 440;
