//! Integration tests for the radio callback → ControlLoop path.

use crate::mock_hw::{FakeTicks, LogSink, MockHardware};

use laserbot::adapters::link::{ChannelPacketSource, PacketChannel, deliver};
use laserbot::app::drive::MotorOutputs;
use laserbot::app::events::AppEvent;
use laserbot::app::service::ControlLoop;
use laserbot::config::ReceiverConfig;
use laserbot::protocol::opcode;
use laserbot::tick::TickShared;

#[test]
fn delivered_payloads_drive_the_motors_in_order() {
    let shared = TickShared::new(5);
    let channel = PacketChannel::<4>::new();
    let mut ctl = ControlLoop::new(&ReceiverConfig::default(), &shared);
    let mut hw = MockHardware::new();
    let mut sink = LogSink::new();
    let mut ticks = FakeTicks::new(&shared);
    ctl.start(&mut hw, &mut sink);

    assert!(deliver(&channel, &[opcode::FORWARD_RIGHT, 200]));
    assert!(!deliver(&channel, &[opcode::STOP]), "short payload dropped");
    assert!(deliver(&channel, &[opcode::STOP, 0]));

    let mut radio = ChannelPacketSource::new(&channel);
    ctl.iterate(&mut hw, &mut radio, &mut ticks, &mut sink);
    assert_eq!(hw.motors, MotorOutputs::new(55, 100));
    ctl.iterate(&mut hw, &mut radio, &mut ticks, &mut sink);
    assert_eq!(hw.motors, MotorOutputs::OFF);
    ctl.iterate(&mut hw, &mut radio, &mut ticks, &mut sink);

    assert_eq!(radio.received(), 2);
    assert_eq!(sink.count(|e| matches!(e, AppEvent::CommandApplied(_))), 2);
}
