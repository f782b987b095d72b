//! Sensor drivers: the receiver's light sensor and the transmitter's
//! joystick.

pub mod joystick;
pub mod light;
