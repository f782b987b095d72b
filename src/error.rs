//! Unified error types for the laserbot firmware.
//!
//! A single `Error` enum that every bring-up path can convert into, keeping
//! the binaries' error handling uniform.  All variants are `Copy` so they
//! can be passed around without allocation.
//!
//! The control loop itself has no error path: unknown opcodes and
//! malformed packets are dropped, and the tick handler cannot fail.

use core::fmt;

use crate::config::ConfigError;
use crate::drivers::hw_init::HwInitError;

// ---------------------------------------------------------------------------
// Top-level firmware error
// ---------------------------------------------------------------------------

/// Every fallible bring-up operation in the firmware funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Peripheral initialisation failed.
    Init(HwInitError),
    /// The radio link could not be brought up or a send failed.
    Link(LinkError),
    /// Configuration is out of range.
    Config(ConfigError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Init(e) => write!(f, "init: {e}"),
            Self::Link(e) => write!(f, "link: {e}"),
            Self::Config(e) => write!(f, "config: {e}"),
        }
    }
}

impl core::error::Error for Error {}

impl From<HwInitError> for Error {
    fn from(e: HwInitError) -> Self {
        Self::Init(e)
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<LinkError> for Error {
    fn from(e: LinkError) -> Self {
        Self::Link(e)
    }
}

// ---------------------------------------------------------------------------
// Link errors
// ---------------------------------------------------------------------------

/// Radio link failures.  The link is best effort: none of these trigger a
/// retry, they are counted and logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkError {
    /// The radio stack refused to start (ESP-IDF error code).
    BringUp(i32),
    /// Registering the broadcast peer failed (ESP-IDF error code).
    Peer(i32),
    /// A packet could not be handed to the radio (ESP-IDF error code).
    SendFailed(i32),
}

impl fmt::Display for LinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BringUp(rc) => write!(f, "radio bring-up failed (rc={rc})"),
            Self::Peer(rc) => write!(f, "peer registration failed (rc={rc})"),
            Self::SendFailed(rc) => write!(f, "send failed (rc={rc})"),
        }
    }
}
