//! Level smoothing and classification.
//!
//! ```text
//!  reading ──▶ SampleBuffer ──▶ average ─┐
//!     │                                  ├──▶ LevelClassifier ──▶ Tier
//!     └──────────────────────────────────┘
//! ```
//!
//! Both stages are pure logic with no I/O; the
//! [`ControlCycle`](crate::app::service::ControlCycle) feeds them once per
//! tick.

pub mod buffer;
pub mod classifier;
pub mod tier;

pub use buffer::SampleBuffer;
pub use classifier::{LevelClassifier, Thresholds};
pub use tier::Tier;

/// A probe voltage sample.
pub type Volts = f32;
