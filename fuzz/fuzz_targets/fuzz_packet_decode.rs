//! Fuzz target: `CommandPacket::from_bytes` → `Command::decode` → `CommandDecoder::apply`
//!
//! Splits arbitrary bytes into radio payloads and asserts that decoding
//! never panics, that the opcode survives decoding, and that an unknown
//! opcode never reaches an output.
//!
//! cargo fuzz run fuzz_packet_decode

#![no_main]

use laserbot::app::drive::{CommandDecoder, Dispatch, MotorOutputs};
use laserbot::app::lives::LivesCounter;
use laserbot::app::ports::ActuatorPort;
use laserbot::protocol::{Command, CommandPacket, Line, PACKET_LEN};
use libfuzzer_sys::fuzz_target;

#[derive(Default)]
struct Counting {
    writes: usize,
}

impl ActuatorPort for Counting {
    fn set_motors(&mut self, _outputs: MotorOutputs) {
        self.writes += 1;
    }
    fn set_line(&mut self, _line: Line, _high: bool) {
        self.writes += 1;
    }
    fn toggle_line(&mut self, _line: Line) {
        self.writes += 1;
    }
}

fuzz_target!(|data: &[u8]| {
    // The first byte picks the payload length so short and long frames
    // are exercised too.
    let Some((&len, rest)) = data.split_first() else {
        return;
    };
    let len = usize::from(len % 4).max(1);

    let mut decoder = CommandDecoder::new();
    let mut lives = LivesCounter::new(3);

    for chunk in rest.chunks(len) {
        let Some(packet) = CommandPacket::from_bytes(chunk) else {
            assert_ne!(chunk.len(), PACKET_LEN, "two-byte payload rejected");
            continue;
        };
        let cmd = Command::decode(packet);
        assert_eq!(cmd.opcode(), packet.opcode);

        let mut hw = Counting::default();
        let d = decoder.apply(cmd, &mut lives, &mut hw);
        if !cmd.is_known() {
            assert_eq!(d, Dispatch::Unknown);
            assert_eq!(hw.writes, 0, "unknown opcode actuated");
        }
        assert!(lives.remaining() <= 3);
    }
});
