//! Actuator drivers, hardware initialisation, and peripheral helpers.

pub mod hw_init;
pub mod hw_timer;
pub mod laser;
pub mod motor;
pub mod status_lines;
pub mod watchdog;
