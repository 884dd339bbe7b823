//! Application core — pure domain logic, zero I/O.
//!
//! This module wires the level pipeline (buffer, classifier) and the power
//! guard into one per-tick step.  All interaction with hardware happens
//! through **port traits** defined in [`ports`], keeping this layer fully
//! testable without real peripherals.

pub mod events;
pub mod ports;
pub mod service;
