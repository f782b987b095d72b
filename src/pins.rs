//! GPIO / peripheral pin assignments for both laserbot boards.
//!
//! Single source of truth: every driver references this module rather than
//! hard-coding pin numbers.

// ---------------------------------------------------------------------------
// Receiver: laser
// ---------------------------------------------------------------------------

/// Digital output: laser diode driver (active HIGH).  Written by the laser
/// timer callback and by penalty entry.
pub const LASER_GPIO: i32 = 4;

// ---------------------------------------------------------------------------
// Receiver: drive motors (LEDC PWM, 8-bit)
// ---------------------------------------------------------------------------

pub const MOTOR_RIGHT_PWM_GPIO: i32 = 5;
pub const MOTOR_LEFT_PWM_GPIO: i32 = 6;

/// LEDC base frequency for both drive motors (1 kHz).
pub const MOTOR_PWM_FREQ_HZ: u32 = 1_000;

// ---------------------------------------------------------------------------
// Receiver: status lines
// ---------------------------------------------------------------------------

/// Life indicators, cleared in this order as lives are lost.
pub const LIFE_1_GPIO: i32 = 7;
pub const LIFE_2_GPIO: i32 = 15;
pub const LIFE_3_GPIO: i32 = 16;

/// Direction relays on the motor H-bridges.
pub const RELAY_A_GPIO: i32 = 17;
pub const RELAY_B_GPIO: i32 = 18;

// ---------------------------------------------------------------------------
// Transmitter: joystick and buttons
// ---------------------------------------------------------------------------

/// Active-low push buttons with internal pull-ups, bit 0..3 of the mask.
pub const BUTTON_GPIOS: [i32; 4] = [10, 11, 12, 13];
