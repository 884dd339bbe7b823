//! Sensor subsystem.
//!
//! A single analog level probe today; the board adapter wraps it behind
//! the [`LevelSensor`](crate::app::ports::LevelSensor) port.

pub mod level_probe;

pub use level_probe::{LevelProbe, LevelReading};
