//! Outbound application events.
//!
//! The [`ControlLoop`](super::service::ControlLoop) emits these through the
//! [`EventSink`](super::ports::EventSink) port.  Adapters decide what to do
//! with them; on the robot they go to the serial log.

use crate::protocol::Command;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// The control loop has started (carries the starting lives).
    Started { lives: u8 },

    /// A recognised command changed actuator or lives state.
    CommandApplied(Command),

    /// A recognised command was a no-op in the current state (reset while
    /// lives remain, reverse while the forward latch is set).
    CommandSkipped(Command),

    /// The opcode byte is not in the table; the packet was dropped.
    UnknownOpcode(u8),

    /// Lives restored to the maximum.
    LivesReset { lives: u8 },

    /// One hit registered.
    HitRegistered { remaining: u8 },

    /// Actuation lockout started.
    PenaltyEntered,

    /// The timer ended the lockout (observed on the next free iteration).
    PenaltyCleared,
}
