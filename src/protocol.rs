//! Two-byte command packet and opcode dispatch.
//!
//! ```text
//!  byte 0      byte 1
//! ┌─────────┬─────────┐
//! │ opcode  │  speed  │
//! └─────────┴─────────┘
//! ```
//!
//! No sequence number and no acknowledgement: a stale or duplicated packet
//! is indistinguishable from a fresh one and is simply applied again.
//! Bytes that are not in the opcode table decode to [`Command::Unknown`],
//! which the receiver ignores.

/// Payload length, fixed on both nodes.
pub const PACKET_LEN: usize = 2;

/// Opcode byte values shared by the transmitter and the receiver.
pub mod opcode {
    pub const RESET_LIVES: u8 = 0xA1;
    pub const TOGGLE_LIFE_2: u8 = 0xA2;
    pub const TOGGLE_RELAY_A: u8 = 0xA3;
    pub const TOGGLE_RELAY_B: u8 = 0xA4;
    pub const REVERSE: u8 = 0xA5;
    pub const STOP: u8 = 0xA6;
    pub const FORWARD: u8 = 0xA7;
    pub const TURN_LEFT: u8 = 0xA8;
    pub const TURN_RIGHT: u8 = 0xAA;
    pub const FORWARD_LEFT: u8 = 0xAB;
    pub const FORWARD_RIGHT: u8 = 0xAC;
    pub const REVERSE_LEFT: u8 = 0xAD;
    pub const REVERSE_RIGHT: u8 = 0xAE;
}

/// Raw packet as it crosses the radio.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandPacket {
    pub opcode: u8,
    pub speed: u8,
}

impl CommandPacket {
    pub const fn new(opcode: u8, speed: u8) -> Self {
        Self { opcode, speed }
    }

    pub const fn to_bytes(self) -> [u8; PACKET_LEN] {
        [self.opcode, self.speed]
    }

    /// Parse a received payload.  Anything other than exactly
    /// [`PACKET_LEN`] bytes is not a packet of this link.
    pub fn from_bytes(payload: &[u8]) -> Option<Self> {
        match payload {
            &[opcode, speed] => Some(Self { opcode, speed }),
            _ => None,
        }
    }
}

/// Digital output lines the command table and the lives tracker drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Line {
    Life1 = 0,
    Life2 = 1,
    Life3 = 2,
    RelayA = 3,
    RelayB = 4,
}

impl Line {
    pub const COUNT: usize = 5;

    /// Life indicators in the order they are cleared.
    pub const LIVES: [Line; 3] = [Line::Life1, Line::Life2, Line::Life3];
}

/// Decoded command.  `speed` is the raw byte from the packet; direction
/// dependent inversion and halving happen at actuation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    ResetLives,
    ToggleLine(Line),
    Reverse { speed: u8 },
    Stop,
    Forward { speed: u8 },
    TurnLeft { speed: u8 },
    TurnRight { speed: u8 },
    ForwardLeft { speed: u8 },
    ForwardRight { speed: u8 },
    ReverseLeft { speed: u8 },
    ReverseRight { speed: u8 },
    /// Opcode outside the table.  Carried explicitly so callers see the
    /// drop instead of it vanishing in a wildcard arm.
    Unknown(u8),
}

impl Command {
    pub fn decode(packet: CommandPacket) -> Self {
        let speed = packet.speed;
        match packet.opcode {
            opcode::RESET_LIVES => Self::ResetLives,
            opcode::TOGGLE_LIFE_2 => Self::ToggleLine(Line::Life2),
            opcode::TOGGLE_RELAY_A => Self::ToggleLine(Line::RelayA),
            opcode::TOGGLE_RELAY_B => Self::ToggleLine(Line::RelayB),
            opcode::REVERSE => Self::Reverse { speed },
            opcode::STOP => Self::Stop,
            opcode::FORWARD => Self::Forward { speed },
            opcode::TURN_LEFT => Self::TurnLeft { speed },
            opcode::TURN_RIGHT => Self::TurnRight { speed },
            opcode::FORWARD_LEFT => Self::ForwardLeft { speed },
            opcode::FORWARD_RIGHT => Self::ForwardRight { speed },
            opcode::REVERSE_LEFT => Self::ReverseLeft { speed },
            opcode::REVERSE_RIGHT => Self::ReverseRight { speed },
            other => Self::Unknown(other),
        }
    }

    /// The opcode byte this command travels as.
    pub fn opcode(&self) -> u8 {
        match self {
            Self::ResetLives => opcode::RESET_LIVES,
            Self::ToggleLine(Line::RelayA) => opcode::TOGGLE_RELAY_A,
            Self::ToggleLine(Line::RelayB) => opcode::TOGGLE_RELAY_B,
            // Only life line 2 is wired to a toggle opcode.
            Self::ToggleLine(_) => opcode::TOGGLE_LIFE_2,
            Self::Reverse { .. } => opcode::REVERSE,
            Self::Stop => opcode::STOP,
            Self::Forward { .. } => opcode::FORWARD,
            Self::TurnLeft { .. } => opcode::TURN_LEFT,
            Self::TurnRight { .. } => opcode::TURN_RIGHT,
            Self::ForwardLeft { .. } => opcode::FORWARD_LEFT,
            Self::ForwardRight { .. } => opcode::FORWARD_RIGHT,
            Self::ReverseLeft { .. } => opcode::REVERSE_LEFT,
            Self::ReverseRight { .. } => opcode::REVERSE_RIGHT,
            Self::Unknown(op) => *op,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown(_))
    }
}
