//! Application core: pure domain logic, no I/O.
//!
//! This module contains the game rules of the receiver (penalty gate,
//! command decode, hit detection) and the joystick mapping of the
//! transmitter.  All interaction with hardware happens through **port
//! traits** defined in [`ports`], keeping this layer fully testable
//! without real peripherals.

pub mod drive;
pub mod events;
pub mod lives;
pub mod ports;
pub mod service;
pub mod transmitter;
