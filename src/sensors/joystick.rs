//! Transmitter inputs: two-axis analog stick plus four push buttons.
//!
//! Axes are read on ADC1 and scaled to 10 bits like the light sensor.  A
//! failed conversion repeats that axis's previous value.  Buttons are
//! active-low with pull-ups; a held button sets its bit in
//! [`JoystickSample::buttons`].
//!
//! ## Dual-target design
//!
//! On ESP-IDF: reads ADC1 and GPIO via hw_init helpers.
//! On host/test: reads from static atomics for injection.

use core::sync::atomic::{AtomicU8, AtomicU16, Ordering};

use super::light::to_10_bit;
use crate::app::transmitter::JoystickSample;

#[cfg(target_os = "espidf")]
use crate::drivers::hw_init;
#[cfg(target_os = "espidf")]
use crate::pins;

// Centred stick, nothing held.
static SIM_JOY_X: AtomicU16 = AtomicU16::new(2048);
static SIM_JOY_Y: AtomicU16 = AtomicU16::new(2048);
static SIM_BUTTONS: AtomicU8 = AtomicU8::new(0);

/// Raw 12-bit axis values and a held-button mask.
#[cfg(not(target_os = "espidf"))]
pub fn sim_set_joystick(x_raw: u16, y_raw: u16, buttons: u8) {
    SIM_JOY_X.store(x_raw, Ordering::Relaxed);
    SIM_JOY_Y.store(y_raw, Ordering::Relaxed);
    SIM_BUTTONS.store(buttons, Ordering::Relaxed);
}

pub struct Joystick {
    last: JoystickSample,
}

impl Joystick {
    pub fn new() -> Self {
        Self {
            // Centred stick until the first good conversion.
            last: JoystickSample {
                x: 512,
                y: 512,
                buttons: 0,
            },
        }
    }

    pub fn read(&mut self) -> JoystickSample {
        let sample = JoystickSample {
            x: self.read_x().map_or(self.last.x, to_10_bit),
            y: self.read_y().map_or(self.last.y, to_10_bit),
            buttons: self.read_buttons(),
        };
        self.last = sample;
        sample
    }

    #[cfg(target_os = "espidf")]
    fn read_x(&self) -> Result<u16, i32> {
        hw_init::adc1_read(hw_init::ADC1_CH_JOY_X)
    }

    #[cfg(target_os = "espidf")]
    fn read_y(&self) -> Result<u16, i32> {
        hw_init::adc1_read(hw_init::ADC1_CH_JOY_Y)
    }

    #[cfg(target_os = "espidf")]
    fn read_buttons(&self) -> u8 {
        pins::BUTTON_GPIOS
            .iter()
            .enumerate()
            .filter(|&(_, &gpio)| !hw_init::gpio_read(gpio))
            .fold(0u8, |mask, (bit, _)| mask | (1 << bit))
    }

    #[cfg(not(target_os = "espidf"))]
    fn read_x(&self) -> Result<u16, i32> {
        Ok(SIM_JOY_X.load(Ordering::Relaxed))
    }

    #[cfg(not(target_os = "espidf"))]
    fn read_y(&self) -> Result<u16, i32> {
        Ok(SIM_JOY_Y.load(Ordering::Relaxed))
    }

    #[cfg(not(target_os = "espidf"))]
    fn read_buttons(&self) -> u8 {
        SIM_BUTTONS.load(Ordering::Relaxed)
    }
}

impl Default for Joystick {
    fn default() -> Self {
        Self::new()
    }
}
