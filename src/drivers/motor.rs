//! Drive motor driver: two LEDC PWM channels, one per wheel.
//!
//! The motor stages are dumb actuators.  Direction comes from the relay
//! lines in [`StatusLines`](crate::drivers::status_lines::StatusLines);
//! this driver only writes 8-bit duties.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: drives real PWM via hw_init helpers.
//! On host/test: tracks state in-memory only.

use crate::app::drive::MotorOutputs;
use crate::drivers::hw_init;

pub struct MotorDriver {
    current: MotorOutputs,
}

impl MotorDriver {
    pub fn new() -> Self {
        Self {
            current: MotorOutputs::OFF,
        }
    }

    /// Write both duties, unconditionally.
    pub fn set(&mut self, outputs: MotorOutputs) {
        hw_init::ledc_set(hw_init::LEDC_CH_MOTOR_RIGHT, outputs.right_duty);
        hw_init::ledc_set(hw_init::LEDC_CH_MOTOR_LEFT, outputs.left_duty);
        self.current = outputs;
    }

    pub fn current(&self) -> MotorOutputs {
        self.current
    }
}

impl Default for MotorDriver {
    fn default() -> Self {
        Self::new()
    }
}
