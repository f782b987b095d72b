//! Hardware adapters: bridge real peripherals to domain port traits.
//!
//! [`HardwareAdapter`] owns every receiver driver and exposes them
//! through [`LightSensorPort`], [`ActuatorPort`], and [`LaserPort`].
//! [`JoystickAdapter`] does the same for the transmitter inputs.  These
//! are the only types the binaries hand to the domain.  On non-espidf
//! targets, the underlying drivers use cfg-gated simulation stubs.

use crate::app::drive::MotorOutputs;
use crate::app::ports::{ActuatorPort, JoystickPort, LaserPort, LightSensorPort};
use crate::app::transmitter::JoystickSample;
use crate::drivers::laser::GpioLaser;
use crate::drivers::motor::MotorDriver;
use crate::drivers::status_lines::{GpioLine, StatusLines};
use crate::protocol::Line;
use crate::sensors::joystick::Joystick;
use crate::sensors::light::LightSensor;

/// Receiver board: light sensor, motors, status lines, laser.
pub struct HardwareAdapter {
    light: LightSensor,
    motors: MotorDriver,
    lines: StatusLines<GpioLine>,
    laser: GpioLaser,
}

impl HardwareAdapter {
    pub fn new(light: LightSensor, motors: MotorDriver, lines: StatusLines<GpioLine>) -> Self {
        Self {
            light,
            motors,
            lines,
            laser: GpioLaser,
        }
    }

    /// Read counters for the periodic stats record.
    pub fn light(&self) -> &LightSensor {
        &self.light
    }
}

// ── LightSensorPort implementation ────────────────────────────

impl LightSensorPort for HardwareAdapter {
    fn sample_light(&mut self) -> u16 {
        self.light.read()
    }
}

// ── ActuatorPort implementation ───────────────────────────────

impl ActuatorPort for HardwareAdapter {
    fn set_motors(&mut self, outputs: MotorOutputs) {
        self.motors.set(outputs);
    }

    fn set_line(&mut self, line: Line, high: bool) {
        self.lines.set(line, high);
    }

    fn toggle_line(&mut self, line: Line) {
        self.lines.toggle(line);
    }
}

// ── LaserPort implementation ──────────────────────────────────

impl LaserPort for HardwareAdapter {
    fn set_laser(&mut self, on: bool) {
        self.laser.set_laser(on);
    }
}

/// Transmitter board inputs.
pub struct JoystickAdapter {
    joystick: Joystick,
}

impl JoystickAdapter {
    pub fn new(joystick: Joystick) -> Self {
        Self { joystick }
    }
}

impl JoystickPort for JoystickAdapter {
    fn sample(&mut self) -> JoystickSample {
        self.joystick.read()
    }
}
