//! Laserbot firmware library.
//!
//! Exposes the pure-logic modules for integration testing and both
//! firmware binaries.  All ESP-IDF-specific code is guarded by
//! `#[cfg(target_os = "espidf")]` within each module.

#![deny(unused_must_use)]

pub mod app;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod pins;
pub mod protocol;
pub mod tick;

pub mod adapters;
pub mod drivers;
pub mod sensors;
