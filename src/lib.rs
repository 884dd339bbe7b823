//! NoOverflow firmware library.
//!
//! Watches a liquid level probe, raises tiered LED/piezo alerts as the
//! level rises, and cuts an AC relay before overflow, with a cool-off
//! interlock against relay chatter.
//!
//! Exposes the pure-logic modules for integration testing.  All
//! ESP-IDF-specific code is guarded by `#[cfg(target_os = "espidf")]`
//! within each module.

#![deny(unused_must_use)]

pub mod app;
pub mod clock;
pub mod config;
pub mod control;
pub mod error;
pub mod level;

pub mod adapters;
pub mod drivers;
pub mod pins;
pub mod sensors;
