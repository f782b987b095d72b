//! System configuration parameters
//!
//! All tunable parameters for both nodes of the link.  Nothing is
//! persisted: every boot starts from [`SystemConfig::default`], which is
//! validated before use.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Full-scale reading of a 10-bit analog channel.
pub const ADC_MAX: u16 = 1023;

/// Number of life indicator lines on the receiver board.
pub const LIFE_LINES: u8 = 3;

/// Radio settings shared by both nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkConfig {
    /// WiFi channel the ESP-NOW link runs on (1-13).
    pub channel: u8,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self { channel: 1 }
    }
}

/// Receiver control-core parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceiverConfig {
    /// Light readings strictly below this (10-bit scale) count as a hit.
    pub hit_threshold: u16,
    /// Lives at boot and after a reset.
    pub max_lives: u8,
    /// Laser ticks spent in penalty before returning to Idle.
    pub penalty_secs: u8,
    /// Laser flash / penalty countdown period.
    pub laser_tick_ms: u32,
    /// Delay between main-loop iterations, lets the idle task feed the watchdog.
    pub loop_yield_ms: u32,
}

impl Default for ReceiverConfig {
    fn default() -> Self {
        Self {
            hit_threshold: 30,
            max_lives: 3,
            penalty_secs: 5,
            laser_tick_ms: 1000,
            loop_yield_ms: 1,
        }
    }
}

/// Joystick node parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransmitterConfig {
    /// Axis readings below this are "low" (left / back).
    pub deadzone_low: u16,
    /// Axis readings above this are "high" (right / forward).
    pub deadzone_high: u16,
    /// Packet period.
    pub send_interval_ms: u32,
}

impl Default for TransmitterConfig {
    fn default() -> Self {
        Self {
            deadzone_low: 200,
            deadzone_high: 800,
            send_interval_ms: 50,
        }
    }
}

/// Core system configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemConfig {
    pub link: LinkConfig,
    pub receiver: ReceiverConfig,
    pub transmitter: TransmitterConfig,
}

impl SystemConfig {
    /// Range-check every field.  Invalid values are rejected, never clamped.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=13).contains(&self.link.channel) {
            return Err(ConfigError::ValidationFailed("link.channel must be 1..=13"));
        }

        let rx = &self.receiver;
        if rx.hit_threshold > ADC_MAX {
            return Err(ConfigError::ValidationFailed(
                "receiver.hit_threshold exceeds the 10-bit ADC range",
            ));
        }
        if rx.max_lives == 0 || rx.max_lives > LIFE_LINES {
            return Err(ConfigError::ValidationFailed("receiver.max_lives must be 1..=3"));
        }
        if rx.penalty_secs == 0 {
            return Err(ConfigError::ValidationFailed("receiver.penalty_secs must be > 0"));
        }
        if rx.laser_tick_ms == 0 {
            return Err(ConfigError::ValidationFailed("receiver.laser_tick_ms must be > 0"));
        }

        let tx = &self.transmitter;
        // Both speed ramps need a non-zero span: low-1 and ADC_MAX-(high+1).
        if tx.deadzone_low < 2 {
            return Err(ConfigError::ValidationFailed("transmitter.deadzone_low must be >= 2"));
        }
        if tx.deadzone_high >= ADC_MAX - 1 {
            return Err(ConfigError::ValidationFailed(
                "transmitter.deadzone_high must leave room below the rail",
            ));
        }
        if tx.deadzone_low >= tx.deadzone_high {
            return Err(ConfigError::ValidationFailed(
                "transmitter.deadzone_low must be below deadzone_high",
            ));
        }
        if tx.send_interval_ms == 0 {
            return Err(ConfigError::ValidationFailed(
                "transmitter.send_interval_ms must be > 0",
            ));
        }
        Ok(())
    }
}

/// Errors from configuration validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// A config field failed range validation.
    /// The `&'static str` describes which field and why.
    ValidationFailed(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ValidationFailed(msg) => write!(f, "validation failed: {msg}"),
        }
    }
}
