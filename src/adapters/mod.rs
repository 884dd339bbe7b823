//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter    | Implements            | Connects to                |
//! |------------|-----------------------|----------------------------|
//! | `hardware` | LevelSensor           | ESP32 ADC1                 |
//! |            | AlertSink             | LEDC PWM (RGB LED, piezo)  |
//! | `log_sink` | EventSink             | Serial log output          |
//! | `time`     | Clock                 | ESP32 system timer         |
//!
//! The relay's [`PowerOutput`](crate::app::ports::PowerOutput) lives in
//! [`drivers::relay`](crate::drivers::relay).

pub mod hardware;
pub mod log_sink;
pub mod time;
