//! Life indicators and direction relays.
//!
//! Five on/off lines addressed by [`Line`].  The bank is generic over
//! `embedded-hal` output pins so the toggle logic can be tested against
//! fake pins; firmware uses [`GpioLine`], a raw ESP-IDF GPIO that keeps
//! its own copy of the level (output-only pads read back as 0).

use core::convert::Infallible;

use embedded_hal::digital::{ErrorType, OutputPin, StatefulOutputPin};
use log::warn;

use crate::drivers::hw_init;
use crate::pins;
use crate::protocol::Line;

/// Output GPIO configured by `hw_init`.
#[derive(Debug)]
pub struct GpioLine {
    gpio: i32,
    high: bool,
}

impl GpioLine {
    pub const fn new(gpio: i32) -> Self {
        Self { gpio, high: false }
    }
}

impl ErrorType for GpioLine {
    type Error = Infallible;
}

impl OutputPin for GpioLine {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        hw_init::gpio_write(self.gpio, false);
        self.high = false;
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        hw_init::gpio_write(self.gpio, true);
        self.high = true;
        Ok(())
    }
}

impl StatefulOutputPin for GpioLine {
    fn is_set_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.high)
    }

    fn is_set_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!self.high)
    }
}

/// Indexed by `Line as usize`.
pub struct StatusLines<P> {
    pins: [P; Line::COUNT],
}

impl StatusLines<GpioLine> {
    /// Receiver board wiring from [`pins`].
    pub fn receiver() -> Self {
        Self::new([
            GpioLine::new(pins::LIFE_1_GPIO),
            GpioLine::new(pins::LIFE_2_GPIO),
            GpioLine::new(pins::LIFE_3_GPIO),
            GpioLine::new(pins::RELAY_A_GPIO),
            GpioLine::new(pins::RELAY_B_GPIO),
        ])
    }
}

impl<P: StatefulOutputPin> StatusLines<P> {
    pub fn new(pins: [P; Line::COUNT]) -> Self {
        Self { pins }
    }

    pub fn set(&mut self, line: Line, high: bool) {
        let pin = &mut self.pins[line as usize];
        let res = if high { pin.set_high() } else { pin.set_low() };
        if let Err(e) = res {
            warn!("status_lines: {:?} write failed: {:?}", line, e);
        }
    }

    pub fn toggle(&mut self, line: Line) {
        if let Err(e) = self.pins[line as usize].toggle() {
            warn!("status_lines: {:?} toggle failed: {:?}", line, e);
        }
    }

    /// Last level driven.  A pin that cannot report reads as low.
    pub fn is_high(&mut self, line: Line) -> bool {
        self.pins[line as usize].is_set_high().unwrap_or(false)
    }
}
