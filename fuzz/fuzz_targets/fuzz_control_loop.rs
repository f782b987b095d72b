//! Fuzz target: `ControlLoop::iterate` under arbitrary light, radio, and
//! tick interleavings.
//!
//! Each 4-byte record is (light, opcode, speed, ticks).  Asserts that the
//! motors are off after every penalized pass and that lives stay in range.
//!
//! cargo fuzz run fuzz_control_loop

#![no_main]

use laserbot::app::drive::MotorOutputs;
use laserbot::app::events::AppEvent;
use laserbot::app::ports::{
    ActuatorPort, EventSink, LaserPort, LightSensorPort, PacketSource, TickWaiter,
};
use laserbot::app::service::{ControlLoop, Iteration};
use laserbot::config::ReceiverConfig;
use laserbot::protocol::{CommandPacket, Line};
use laserbot::tick::TickShared;
use libfuzzer_sys::fuzz_target;

#[derive(Default)]
struct Board {
    light: u16,
    motors: MotorOutputs,
}

impl LightSensorPort for Board {
    fn sample_light(&mut self) -> u16 {
        self.light
    }
}

impl ActuatorPort for Board {
    fn set_motors(&mut self, outputs: MotorOutputs) {
        self.motors = outputs;
    }
    fn set_line(&mut self, _line: Line, _high: bool) {}
    fn toggle_line(&mut self, _line: Line) {}
}

impl LaserPort for Board {
    fn set_laser(&mut self, _on: bool) {}
}

struct OnePacket(Option<CommandPacket>);

impl PacketSource for OnePacket {
    fn poll(&mut self) -> Option<CommandPacket> {
        self.0.take()
    }
}

struct InPlaceTicks<'a>(&'a TickShared);

impl LaserPort for InPlaceTicks<'_> {
    fn set_laser(&mut self, _on: bool) {}
}

impl TickWaiter for InPlaceTicks<'_> {
    fn wait_next_tick(&mut self) {
        let shared = self.0;
        shared.arm_rendezvous();
        while !shared.take_laser_tick() {
            shared.on_tick(self);
        }
    }
}

struct Discard;

impl EventSink for Discard {
    fn emit(&mut self, _event: &AppEvent) {}
}

fuzz_target!(|data: &[u8]| {
    let shared = TickShared::new(5);
    let mut ctl = ControlLoop::new(&ReceiverConfig::default(), &shared);
    let mut board = Board::default();
    let mut ticks = InPlaceTicks(&shared);
    let mut sink = Discard;
    ctl.start(&mut board, &mut sink);

    for rec in data.chunks_exact(4) {
        board.light = u16::from(rec[0]) << 2;
        let mut radio = OnePacket(Some(CommandPacket::new(rec[1], rec[2])));

        if ctl.iterate(&mut board, &mut radio, &mut ticks, &mut sink) == Iteration::Penalized {
            assert_eq!(board.motors, MotorOutputs::OFF);
        }
        assert!(ctl.lives() <= 3);

        for _ in 0..(rec[3] % 8) {
            shared.on_tick(&mut ticks);
        }
    }
});
