//! Actuation policy: the relay power guard.

pub mod power_guard;

pub use power_guard::{PowerAction, PowerGuard};
