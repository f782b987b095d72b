//! Command decoder and actuator.
//!
//! Turns a decoded [`Command`] into motor duties and status line writes.
//! The motor stages run in inverting PWM mode, so straight-line moves
//! use `255 - speed`; the throttled wheel of a diagonal gets `speed >> 1`.
//!
//! | command       | right duty  | left duty   | lines / latch             |
//! |---------------|-------------|-------------|---------------------------|
//! | Forward       | 255 - s     | 255 - s     | relays high, latch set    |
//! | Reverse       | 255 - s     | 255 - s     | relays low (latch clear)  |
//! | Stop          | 0           | 0           | relays low, latch cleared |
//! | TurnLeft      | 0           | s           |                           |
//! | TurnRight     | s           | 0           |                           |
//! | Fwd/Rev Left  | 255 - s     | s >> 1      |                           |
//! | Fwd/Rev Right | s >> 1      | 255 - s     |                           |

use log::debug;

use super::lives::LivesCounter;
use super::ports::ActuatorPort;
use crate::protocol::{Command, Line};

/// Two independent PWM duties.  No persistence: last command wins.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MotorOutputs {
    pub left_duty: u8,
    pub right_duty: u8,
}

impl MotorOutputs {
    pub const OFF: Self = Self::new(0, 0);
    pub const FULL: Self = Self::new(u8::MAX, u8::MAX);

    pub const fn new(left_duty: u8, right_duty: u8) -> Self {
        Self {
            left_duty,
            right_duty,
        }
    }
}

/// What applying a command did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// State changed.
    Applied,
    /// Recognised, but a no-op in the current state.
    Skipped,
    /// Opcode outside the table; nothing touched.
    Unknown,
}

#[derive(Debug)]
pub struct CommandDecoder {
    motors: MotorOutputs,
    /// Set by Forward, cleared by Stop.  Reverse is refused while set so
    /// the direction relays are never flipped under load.
    forward_latched: bool,
}

impl CommandDecoder {
    pub fn new() -> Self {
        Self {
            motors: MotorOutputs::OFF,
            forward_latched: false,
        }
    }

    pub fn motors(&self) -> MotorOutputs {
        self.motors
    }

    pub fn forward_latched(&self) -> bool {
        self.forward_latched
    }

    /// Write duties and remember them.
    pub fn drive(&mut self, hw: &mut impl ActuatorPort, outputs: MotorOutputs) {
        hw.set_motors(outputs);
        self.motors = outputs;
    }

    pub fn apply(
        &mut self,
        cmd: Command,
        lives: &mut LivesCounter,
        hw: &mut impl ActuatorPort,
    ) -> Dispatch {
        match cmd {
            Command::ResetLives => {
                if !lives.reset() {
                    return Dispatch::Skipped;
                }
                for &line in lives.lines() {
                    hw.set_line(line, true);
                }
            }
            Command::ToggleLine(line) => hw.toggle_line(line),
            Command::Reverse { speed } => {
                if self.forward_latched {
                    debug!("drive: reverse refused while forward latched");
                    return Dispatch::Skipped;
                }
                set_relays(hw, false);
                self.drive(hw, MotorOutputs::new(inverted(speed), inverted(speed)));
            }
            Command::Stop => {
                self.drive(hw, MotorOutputs::OFF);
                set_relays(hw, false);
                self.forward_latched = false;
            }
            Command::Forward { speed } => {
                set_relays(hw, true);
                self.forward_latched = true;
                self.drive(hw, MotorOutputs::new(inverted(speed), inverted(speed)));
            }
            Command::TurnLeft { speed } => self.drive(hw, MotorOutputs::new(speed, 0)),
            Command::TurnRight { speed } => self.drive(hw, MotorOutputs::new(0, speed)),
            Command::ForwardLeft { speed } | Command::ReverseLeft { speed } => {
                self.drive(hw, MotorOutputs::new(speed >> 1, inverted(speed)));
            }
            Command::ForwardRight { speed } | Command::ReverseRight { speed } => {
                self.drive(hw, MotorOutputs::new(inverted(speed), speed >> 1));
            }
            Command::Unknown(_) => return Dispatch::Unknown,
        }
        Dispatch::Applied
    }
}

impl Default for CommandDecoder {
    fn default() -> Self {
        Self::new()
    }
}

fn inverted(speed: u8) -> u8 {
    u8::MAX - speed
}

fn set_relays(hw: &mut impl ActuatorPort, high: bool) {
    hw.set_line(Line::RelayA, high);
    hw.set_line(Line::RelayB, high);
}
