//! Joystick node: maps stick position and buttons to command packets.
//!
//! ```text
//!        x <  low      centre       x >  high
//!  y > high  FwdLeft   Forward      FwdRight
//!  centre    Left      Stop         Right
//!  y <  low  RevLeft   Reverse      RevRight
//! ```
//!
//! A held button overrides the stick.  Speed comes from the forward/back
//! axis only; a lateral-only move always sends full scale (255).

use log::warn;

use super::ports::{JoystickPort, PacketSink};
use crate::config::{ADC_MAX, TransmitterConfig};
use crate::protocol::{CommandPacket, opcode};

/// One sample of the transmitter inputs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JoystickSample {
    /// Left/right axis, 0–1023.
    pub x: u16,
    /// Forward/back axis, 0–1023.
    pub y: u16,
    /// Bit `n` set while button `n` is held.
    pub buttons: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisDir {
    Low,
    Centre,
    High,
}

impl AxisDir {
    pub fn classify(value: u16, config: &TransmitterConfig) -> Self {
        if value < config.deadzone_low {
            Self::Low
        } else if value > config.deadzone_high {
            Self::High
        } else {
            Self::Centre
        }
    }

    fn index(self) -> usize {
        match self {
            Self::Low => 0,
            Self::Centre => 1,
            Self::High => 2,
        }
    }
}

/// Indexed by `x * 3 + y`, each axis as Low/Centre/High = 0/1/2.
const QUADRANT_OPCODES: [u8; 9] = [
    opcode::REVERSE_LEFT,  // x low,    y low
    opcode::TURN_LEFT,     // x low,    y centre
    opcode::FORWARD_LEFT,  // x low,    y high
    opcode::REVERSE,       // x centre, y low
    opcode::STOP,          // x centre, y centre
    opcode::FORWARD,       // x centre, y high
    opcode::REVERSE_RIGHT, // x high,   y low
    opcode::TURN_RIGHT,    // x high,   y centre
    opcode::FORWARD_RIGHT, // x high,   y high
];

/// Button `n` sends `BUTTON_OPCODES[n]`.
const BUTTON_OPCODES: [u8; 4] = [
    opcode::RESET_LIVES,
    opcode::TOGGLE_LIFE_2,
    opcode::TOGGLE_RELAY_A,
    opcode::TOGGLE_RELAY_B,
];

pub fn quadrant_opcode(x: u16, y: u16, config: &TransmitterConfig) -> u8 {
    let xi = AxisDir::classify(x, config).index();
    let yi = AxisDir::classify(y, config).index();
    QUADRANT_OPCODES[xi * 3 + yi]
}

/// Piecewise-linear speed from the forward/back axis.  Full scale at the
/// deadzone edge, falling to 0 at the rail.  A ramp with no span (edge on
/// the rail) stays at full scale.
pub fn axis_speed(y: u16, config: &TransmitterConfig) -> u8 {
    let y = u32::from(y.min(ADC_MAX));
    let low = u32::from(config.deadzone_low);
    let high = u32::from(config.deadzone_high);
    let full = u32::from(u8::MAX);

    let (offset, span) = if y > high {
        (y - (high + 1), u32::from(ADC_MAX).saturating_sub(high + 1))
    } else if y < low {
        ((low - 1) - y, low - 1)
    } else {
        (0, 0)
    };
    let drop = (offset * full).checked_div(span).unwrap_or(0);
    full.saturating_sub(drop) as u8
}

/// Lowest held button wins.
pub fn button_opcode(buttons: u8) -> Option<u8> {
    BUTTON_OPCODES
        .iter()
        .enumerate()
        .find(|&(bit, _)| buttons & (1 << bit) != 0)
        .map(|(_, &op)| op)
}

pub fn build_packet(sample: JoystickSample, config: &TransmitterConfig) -> CommandPacket {
    let speed = axis_speed(sample.y, config);
    let op = button_opcode(sample.buttons)
        .unwrap_or_else(|| quadrant_opcode(sample.x, sample.y, config));
    CommandPacket::new(op, speed)
}

/// Sample-and-send loop body for the joystick node.
pub struct Transmitter {
    config: TransmitterConfig,
    sent: u32,
    failed: u32,
}

impl Transmitter {
    pub fn new(config: TransmitterConfig) -> Self {
        Self {
            config,
            sent: 0,
            failed: 0,
        }
    }

    /// Sample once and send one packet.  A failed send is counted and
    /// dropped; the next period sends fresh state anyway.
    pub fn step(
        &mut self,
        joystick: &mut impl JoystickPort,
        link: &mut impl PacketSink,
    ) -> CommandPacket {
        let packet = build_packet(joystick.sample(), &self.config);
        match link.send(packet) {
            Ok(()) => self.sent = self.sent.wrapping_add(1),
            Err(e) => {
                self.failed = self.failed.wrapping_add(1);
                warn!("transmitter: {} (dropped opcode 0x{:02X})", e, packet.opcode);
            }
        }
        packet
    }

    pub fn sent(&self) -> u32 {
        self.sent
    }

    pub fn failed(&self) -> u32 {
        self.failed
    }

    pub fn interval_ms(&self) -> u32 {
        self.config.send_interval_ms
    }
}
