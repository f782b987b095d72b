//! Integration tests for the ControlLoop → actuators pipeline.
//!
//! The tick handler runs in place through [`FakeTicks`], so penalty and
//! laser timing are driven tick by tick from the test body.

use crate::mock_hw::{ActuatorCall, FakeTicks, LogSink, MockHardware, MockRadio};

use laserbot::app::drive::MotorOutputs;
use laserbot::app::events::AppEvent;
use laserbot::app::service::{ControlLoop, Iteration};
use laserbot::config::ReceiverConfig;
use laserbot::protocol::{Command, CommandPacket, Line, opcode};
use laserbot::tick::{PenaltyState, TickShared};

fn boot<'t>(shared: &'t TickShared, light: &[u16]) -> (ControlLoop<'t>, MockHardware, LogSink) {
    let mut ctl = ControlLoop::new(&ReceiverConfig::default(), shared);
    let mut hw = MockHardware::with_light(light);
    let mut sink = LogSink::new();
    ctl.start(&mut hw, &mut sink);
    (ctl, hw, sink)
}

fn hit(it: Iteration) -> bool {
    matches!(it, Iteration::Ran { hit: true, .. })
}

// ── Boot ──────────────────────────────────────────────────────

#[test]
fn boot_drives_every_output_to_its_idle_level() {
    let shared = TickShared::new(5);
    let (ctl, hw, sink) = boot(&shared, &[]);

    assert_eq!(hw.lives_lit(), 3);
    assert!(!hw.line(Line::RelayA));
    assert!(!hw.line(Line::RelayB));
    assert_eq!(hw.motors, MotorOutputs::OFF);
    assert!(!hw.laser);

    assert_eq!(ctl.lives(), 3);
    assert!(!ctl.debounce().armed);
    assert!(!shared.is_penalized());
    assert_eq!(sink.events, vec![AppEvent::Started { lives: 3 }]);
}

// ── Hit detection ─────────────────────────────────────────────

#[test]
fn dark_exposure_sequence_registers_two_hits() {
    let shared = TickShared::new(5);
    let (mut ctl, mut hw, mut sink) = boot(&shared, &[25, 25, 25, 40, 25]);
    let mut radio = MockRadio::default();
    let mut ticks = FakeTicks::new(&shared);

    let first = ctl.iterate(&mut hw, &mut radio, &mut ticks, &mut sink);
    assert!(hit(first));
    assert_eq!(ctl.lives(), 2);
    assert!(!hw.line(Line::Life1));

    ticks.fire(5);

    let mut rest = Vec::new();
    for _ in 0..4 {
        rest.push(hit(ctl.iterate(&mut hw, &mut radio, &mut ticks, &mut sink)));
    }
    assert_eq!(rest, vec![false, false, false, true]);
    assert_eq!(ctl.lives(), 1);
    assert!(!hw.line(Line::Life2));
    assert!(hw.line(Line::Life3));
    assert_eq!(sink.count(|e| matches!(e, AppEvent::HitRegistered { .. })), 2);
}

#[test]
fn hit_bursts_motors_until_the_next_tick_then_penalizes() {
    let shared = TickShared::new(5);
    let (mut ctl, mut hw, mut sink) = boot(&shared, &[10]);
    let mut radio = MockRadio::default();
    let mut ticks = FakeTicks::new(&shared);
    hw.clear_calls();

    ctl.iterate(&mut hw, &mut radio, &mut ticks, &mut sink);

    assert_eq!(ticks.waits, 1);
    assert_eq!(ticks.laser_writes, vec![true], "one flash tick before the penalty");
    assert_eq!(
        hw.calls,
        vec![
            ActuatorCall::SetLine { line: Line::Life1, high: false },
            ActuatorCall::SetLine { line: Line::RelayA, high: true },
            ActuatorCall::SetMotors(MotorOutputs::FULL),
            ActuatorCall::SetLaser(false),
        ]
    );
    assert_eq!(shared.penalty(), PenaltyState { active: true, elapsed_seconds: 0 });
    assert!(!shared.laser_on());
    assert!(matches!(
        sink.events.last(),
        Some(AppEvent::PenaltyEntered)
    ));
}

#[test]
fn no_hit_once_all_lives_are_gone() {
    let shared = TickShared::new(5);
    let (mut ctl, mut hw, mut sink) = boot(&shared, &[25, 40, 25, 40, 25, 40, 25]);
    let mut radio = MockRadio::default();
    let mut ticks = FakeTicks::new(&shared);

    for _ in 0..7 {
        if hit(ctl.iterate(&mut hw, &mut radio, &mut ticks, &mut sink)) {
            ticks.fire(5);
        }
    }
    assert_eq!(ctl.lives(), 0);
    assert_eq!(hw.lives_lit(), 0);
    assert!(!shared.is_penalized(), "the last dark reading found no lives to take");
    assert_eq!(sink.count(|e| matches!(e, AppEvent::HitRegistered { .. })), 3);
}

// ── Penalty ───────────────────────────────────────────────────

#[test]
fn penalty_lasts_five_ticks_and_gates_every_iteration() {
    let shared = TickShared::new(5);
    let (mut ctl, mut hw, mut sink) = boot(&shared, &[0]);
    let mut radio = MockRadio::default();
    let mut ticks = FakeTicks::new(&shared);

    ctl.iterate(&mut hw, &mut radio, &mut ticks, &mut sink);
    assert!(shared.is_penalized());
    ticks.laser_writes.clear();

    for elapsed in 1..=4u8 {
        ticks.fire(1);
        assert_eq!(shared.penalty().elapsed_seconds, elapsed);
        let it = ctl.iterate(&mut hw, &mut radio, &mut ticks, &mut sink);
        assert_eq!(it, Iteration::Penalized);
        assert_eq!(hw.motors, MotorOutputs::OFF);
    }

    ticks.fire(1);
    assert_eq!(shared.penalty(), PenaltyState::default());
    assert_eq!(ticks.laser_writes, vec![false; 5], "laser held off, including the exit tick");

    ticks.fire(1);
    assert_eq!(ticks.laser_writes.last(), Some(&true), "flashing resumes");
}

#[test]
fn motors_off_is_reasserted_on_every_penalized_pass() {
    let shared = TickShared::new(5);
    let (mut ctl, mut hw, mut sink) = boot(&shared, &[0]);
    let mut radio = MockRadio::default();
    let mut ticks = FakeTicks::new(&shared);

    ctl.iterate(&mut hw, &mut radio, &mut ticks, &mut sink);
    hw.clear_calls();

    for _ in 0..3 {
        ctl.iterate(&mut hw, &mut radio, &mut ticks, &mut sink);
    }
    assert_eq!(hw.calls, vec![ActuatorCall::SetMotors(MotorOutputs::OFF); 3]);
}

#[test]
fn commands_while_penalized_leave_motors_off() {
    let shared = TickShared::new(5);
    let (mut ctl, mut hw, mut sink) = boot(&shared, &[0]);
    let mut radio = MockRadio::default();
    let mut ticks = FakeTicks::new(&shared);

    ctl.iterate(&mut hw, &mut radio, &mut ticks, &mut sink);
    ctl.iterate(&mut hw, &mut radio, &mut ticks, &mut sink);
    assert_eq!(ctl.motors(), MotorOutputs::OFF);

    radio.push(opcode::FORWARD, 200);
    let it = ctl.iterate(&mut hw, &mut radio, &mut ticks, &mut sink);
    assert_eq!(it, Iteration::Penalized);
    assert_eq!(ctl.motors(), MotorOutputs::OFF);
    assert!(hw.motor_writes().iter().rev().take(2).all(|&m| m == MotorOutputs::OFF));
    assert_eq!(radio.inbound.len(), 1, "packet stays queued while gated");

    ticks.fire(5);
    let it = ctl.iterate(&mut hw, &mut radio, &mut ticks, &mut sink);
    assert_eq!(
        it,
        Iteration::Ran { command: Some(Command::Forward { speed: 200 }), hit: false }
    );
    assert_eq!(ctl.motors(), MotorOutputs::new(55, 55));
}

#[test]
fn penalty_cleared_is_reported_once() {
    let shared = TickShared::new(5);
    let (mut ctl, mut hw, mut sink) = boot(&shared, &[0]);
    let mut radio = MockRadio::default();
    let mut ticks = FakeTicks::new(&shared);

    ctl.iterate(&mut hw, &mut radio, &mut ticks, &mut sink);
    ctl.iterate(&mut hw, &mut radio, &mut ticks, &mut sink);
    ticks.fire(5);
    for _ in 0..3 {
        ctl.iterate(&mut hw, &mut radio, &mut ticks, &mut sink);
    }
    assert_eq!(sink.count(|e| *e == AppEvent::PenaltyCleared), 1);
}

// ── Command decode ────────────────────────────────────────────

#[test]
fn unknown_opcodes_leave_actuators_untouched() {
    let shared = TickShared::new(5);
    let (mut ctl, mut hw, mut sink) = boot(&shared, &[]);
    let mut radio = MockRadio::default();
    let mut ticks = FakeTicks::new(&shared);
    hw.clear_calls();

    let unknown: Vec<u8> = (0u8..=255)
        .filter(|&op| !Command::decode(CommandPacket::new(op, 0)).is_known())
        .collect();
    assert_eq!(unknown.len(), 256 - 13);

    for &op in &unknown {
        radio.push(op, 200);
        let it = ctl.iterate(&mut hw, &mut radio, &mut ticks, &mut sink);
        assert_eq!(it, Iteration::Ran { command: Some(Command::Unknown(op)), hit: false });
    }
    assert!(hw.calls.is_empty());
    assert_eq!(ctl.motors(), MotorOutputs::OFF);
    assert_eq!(sink.count(|e| matches!(e, AppEvent::UnknownOpcode(_))), unknown.len());
}

#[test]
fn at_most_one_command_per_iteration() {
    let shared = TickShared::new(5);
    let (mut ctl, mut hw, mut sink) = boot(&shared, &[]);
    let mut radio = MockRadio::default();
    let mut ticks = FakeTicks::new(&shared);

    radio.push(opcode::TURN_LEFT, 90);
    radio.push(opcode::TURN_RIGHT, 90);
    ctl.iterate(&mut hw, &mut radio, &mut ticks, &mut sink);
    assert_eq!(ctl.motors(), MotorOutputs::new(90, 0));
    ctl.iterate(&mut hw, &mut radio, &mut ticks, &mut sink);
    assert_eq!(ctl.motors(), MotorOutputs::new(0, 90));
}

#[test]
fn forward_left_throttles_the_left_wheel() {
    let shared = TickShared::new(5);
    let (mut ctl, mut hw, mut sink) = boot(&shared, &[]);
    let mut radio = MockRadio::default();
    let mut ticks = FakeTicks::new(&shared);

    radio.push(opcode::FORWARD_LEFT, 200);
    ctl.iterate(&mut hw, &mut radio, &mut ticks, &mut sink);
    assert_eq!(hw.motors, MotorOutputs { left_duty: 100, right_duty: 55 });
}

#[test]
fn forward_latch_refuses_reverse_until_stop() {
    let shared = TickShared::new(5);
    let (mut ctl, mut hw, mut sink) = boot(&shared, &[]);
    let mut radio = MockRadio::default();
    let mut ticks = FakeTicks::new(&shared);

    radio.push(opcode::FORWARD, 100);
    radio.push(opcode::REVERSE, 50);
    radio.push(opcode::STOP, 0);
    radio.push(opcode::REVERSE, 50);
    for _ in 0..4 {
        ctl.iterate(&mut hw, &mut radio, &mut ticks, &mut sink);
    }

    assert_eq!(
        sink.count(|e| *e == AppEvent::CommandSkipped(Command::Reverse { speed: 50 })),
        1
    );
    assert_eq!(hw.motors, MotorOutputs::new(205, 205));
    assert!(!hw.line(Line::RelayA));
}

#[test]
fn toggles_flip_their_lines() {
    let shared = TickShared::new(5);
    let (mut ctl, mut hw, mut sink) = boot(&shared, &[]);
    let mut radio = MockRadio::default();
    let mut ticks = FakeTicks::new(&shared);

    radio.push(opcode::TOGGLE_LIFE_2, 0);
    radio.push(opcode::TOGGLE_RELAY_A, 0);
    radio.push(opcode::TOGGLE_RELAY_B, 0);
    for _ in 0..3 {
        ctl.iterate(&mut hw, &mut radio, &mut ticks, &mut sink);
    }
    assert!(!hw.line(Line::Life2));
    assert!(hw.line(Line::RelayA));
    assert!(hw.line(Line::RelayB));
    assert_eq!(ctl.lives(), 3, "toggling an indicator does not touch the counter");
}

#[test]
fn command_and_hit_in_the_same_iteration_both_take_effect() {
    let shared = TickShared::new(5);
    let (mut ctl, mut hw, mut sink) = boot(&shared, &[20]);
    let mut radio = MockRadio::default();
    let mut ticks = FakeTicks::new(&shared);

    radio.push(opcode::FORWARD, 200);
    let it = ctl.iterate(&mut hw, &mut radio, &mut ticks, &mut sink);

    assert_eq!(
        it,
        Iteration::Ran { command: Some(Command::Forward { speed: 200 }), hit: true }
    );
    assert_eq!(hw.motor_writes(), vec![MotorOutputs::new(55, 55), MotorOutputs::FULL]);
    assert_eq!(
        &sink.events[1..],
        &[
            AppEvent::CommandApplied(Command::Forward { speed: 200 }),
            AppEvent::HitRegistered { remaining: 2 },
            AppEvent::PenaltyEntered,
        ]
    );

    assert_eq!(
        ctl.iterate(&mut hw, &mut radio, &mut ticks, &mut sink),
        Iteration::Penalized
    );
    assert_eq!(hw.motors, MotorOutputs::OFF);
}

// ── Lives reset ───────────────────────────────────────────────

#[test]
fn reset_lives_is_ignored_while_lives_remain() {
    let shared = TickShared::new(5);
    let (mut ctl, mut hw, mut sink) = boot(&shared, &[25]);
    let mut radio = MockRadio::default();
    let mut ticks = FakeTicks::new(&shared);

    ctl.iterate(&mut hw, &mut radio, &mut ticks, &mut sink);
    ticks.fire(5);
    hw.clear_calls();

    radio.push(opcode::RESET_LIVES, 0);
    ctl.iterate(&mut hw, &mut radio, &mut ticks, &mut sink);

    assert_eq!(ctl.lives(), 2);
    assert_eq!(hw.lives_lit(), 2);
    assert!(hw.calls.is_empty());
    assert_eq!(sink.count(|e| *e == AppEvent::CommandSkipped(Command::ResetLives)), 1);
}

#[test]
fn reset_lives_restores_all_three_once_out() {
    let shared = TickShared::new(5);
    let (mut ctl, mut hw, mut sink) = boot(&shared, &[25, 40, 25, 40, 25]);
    let mut radio = MockRadio::default();
    let mut ticks = FakeTicks::new(&shared);

    for _ in 0..5 {
        if hit(ctl.iterate(&mut hw, &mut radio, &mut ticks, &mut sink)) {
            ticks.fire(5);
        }
    }
    assert_eq!(ctl.lives(), 0);
    assert_eq!(hw.lives_lit(), 0);

    radio.push(opcode::RESET_LIVES, 0);
    ctl.iterate(&mut hw, &mut radio, &mut ticks, &mut sink);

    assert_eq!(ctl.lives(), 3);
    assert_eq!(hw.lives_lit(), 3);
    assert_eq!(sink.count(|e| *e == AppEvent::LivesReset { lives: 3 }), 1);
}
