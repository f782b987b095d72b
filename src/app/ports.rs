//! Port traits: the hexagonal boundary between the control core and the
//! outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ ControlLoop / Transmitter (domain)
//! ```
//!
//! Driven adapters (light sensor, motors, status lines, laser, radio,
//! event sinks) implement these traits.  The domain consumes them via
//! generics, so it never touches hardware directly.

use super::drive::MotorOutputs;
use super::events::AppEvent;
use super::transmitter::JoystickSample;
use crate::error::LinkError;
use crate::protocol::{CommandPacket, Line};

// ───────────────────────────────────────────────────────────────
// Sensor ports (hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Light intensity input of the hit detector.
pub trait LightSensorPort {
    /// One reading on the 10-bit scale (0–1023).  May block for the
    /// duration of an ADC conversion.
    fn sample_light(&mut self) -> u16;
}

/// Joystick and button inputs of the transmitter node.
pub trait JoystickPort {
    fn sample(&mut self) -> JoystickSample;
}

// ───────────────────────────────────────────────────────────────
// Actuator ports (domain → hardware)
// ───────────────────────────────────────────────────────────────

/// Motor PWM and on/off status lines, owned by the main loop.
pub trait ActuatorPort {
    /// Write both motor duties; last write wins.
    fn set_motors(&mut self, outputs: MotorOutputs);

    fn set_line(&mut self, line: Line, high: bool);

    fn toggle_line(&mut self, line: Line);
}

/// Laser output line.  Driven from the tick handler, so implementations
/// must not block, allocate, or fail.
pub trait LaserPort {
    fn set_laser(&mut self, on: bool);
}

// ───────────────────────────────────────────────────────────────
// Tick rendezvous
// ───────────────────────────────────────────────────────────────

/// Blocks until the next laser tick fires.  Ticks that fired before the
/// call are not counted.
///
/// Production uses [`SpinTickWaiter`](crate::tick::SpinTickWaiter);
/// tests inject a fake that runs the tick handler in place.
pub trait TickWaiter {
    fn wait_next_tick(&mut self);
}

// ───────────────────────────────────────────────────────────────
// Radio ports
// ───────────────────────────────────────────────────────────────

/// Inbound packets.  Non-blocking: `None` means "no command this
/// iteration", not an error.
pub trait PacketSource {
    fn poll(&mut self) -> Option<CommandPacket>;
}

/// Outbound packets.  Best effort: no acknowledgement, no retry.
pub trait PacketSink {
    fn send(&mut self, packet: CommandPacket) -> Result<(), LinkError>;
}

// ───────────────────────────────────────────────────────────────
// Event sink port (domain → logging)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`]s through this port.
pub trait EventSink {
    fn emit(&mut self, event: &AppEvent);
}
