//! Laser diode output.
//!
//! Stateless: the last level written is tracked by
//! [`TickShared`](crate::tick::TickShared), which is the only caller.
//! One register write per call, so it is safe from the timer callback.

use crate::app::ports::LaserPort;
use crate::drivers::hw_init;
use crate::pins;

#[derive(Debug, Clone, Copy, Default)]
pub struct GpioLaser;

impl LaserPort for GpioLaser {
    fn set_laser(&mut self, on: bool) {
        hw_init::gpio_write(pins::LASER_GPIO, on);
    }
}
