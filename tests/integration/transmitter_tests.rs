//! Integration tests for the Transmitter → PacketSink pipeline.

use crate::mock_hw::{MockJoystick, MockLink};

use laserbot::app::transmitter::{JoystickSample, Transmitter};
use laserbot::config::TransmitterConfig;
use laserbot::error::LinkError;
use laserbot::protocol::{CommandPacket, opcode};

fn stick(x: u16, y: u16, buttons: u8) -> MockJoystick {
    MockJoystick {
        sample: JoystickSample { x, y, buttons },
    }
}

#[test]
fn centred_forward_stick_sends_forward_on_the_ramp() {
    let mut tx = Transmitter::new(TransmitterConfig::default());
    let mut link = MockLink::default();

    let packet = tx.step(&mut stick(500, 900, 0), &mut link);

    assert_eq!(packet.opcode, opcode::FORWARD);
    assert!(packet.speed < 255, "y=900 is past the deadzone, so on the ramp");
    assert_eq!(link.sent, vec![packet]);
    assert_eq!(tx.sent(), 1);
}

#[test]
fn forward_deadzone_edge_is_800_801() {
    let mut tx = Transmitter::new(TransmitterConfig::default());
    let mut link = MockLink::default();

    tx.step(&mut stick(500, 800, 0), &mut link);
    tx.step(&mut stick(500, 801, 0), &mut link);

    assert_eq!(
        link.sent,
        vec![
            CommandPacket::new(opcode::STOP, 255),
            CommandPacket::new(opcode::FORWARD, 255),
        ]
    );
}

#[test]
fn held_button_wins_over_the_stick() {
    let mut tx = Transmitter::new(TransmitterConfig::default());
    let mut link = MockLink::default();

    let packet = tx.step(&mut stick(0, 1023, 0b0001), &mut link);
    assert_eq!(packet.opcode, opcode::RESET_LIVES);
}

#[test]
fn failed_sends_are_counted_not_retried() {
    let mut tx = Transmitter::new(TransmitterConfig::default());
    let mut link = MockLink {
        fail_with: Some(LinkError::SendFailed(-1)),
        ..Default::default()
    };

    for _ in 0..3 {
        tx.step(&mut stick(500, 500, 0), &mut link);
    }
    assert_eq!(tx.failed(), 3);
    assert_eq!(tx.sent(), 0);

    link.fail_with = None;
    tx.step(&mut stick(500, 500, 0), &mut link);
    assert_eq!(link.sent.len(), 1, "only the fresh sample goes out");
    assert_eq!(tx.sent(), 1);
}

#[test]
fn custom_deadzone_moves_the_quadrant_edges() {
    let config = TransmitterConfig {
        deadzone_low: 400,
        deadzone_high: 600,
        ..TransmitterConfig::default()
    };
    let mut tx = Transmitter::new(config);
    let mut link = MockLink::default();

    assert_eq!(tx.step(&mut stick(350, 500, 0), &mut link).opcode, opcode::TURN_LEFT);
    assert_eq!(tx.step(&mut stick(650, 650, 0), &mut link).opcode, opcode::FORWARD_RIGHT);
    assert_eq!(tx.interval_ms(), 50);
}
