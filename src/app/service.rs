//! Receiver control loop, the hexagonal core.
//!
//! [`ControlLoop`] owns the lives counter, the hit detector, and the
//! command decoder.  It shares penalty and laser state with the tick
//! handler through [`TickShared`].  All I/O flows through port traits
//! injected at call sites.
//!
//! ```text
//!  LightSensorPort ──▶ ┌──────────────────────────┐ ──▶ EventSink
//!  PacketSource    ──▶ │        ControlLoop       │
//!  TickWaiter      ──▶ │ gate · decode · hit      │
//!                      └──────────────────────────┘
//!                        │ ActuatorPort + LaserPort
//!                        ▼
//! ```
//!
//! One iteration, in strict order:
//!
//! 1. Penalty gate: while penalized, motors are forced off and the rest of
//!    the iteration is skipped.  This is repeated every pass, not done once
//!    on entry.
//! 2. Sample the light sensor.
//! 3. Apply at most one inbound command.
//! 4. Hit detection.  A hit in the same pass as a command still lets the
//!    command apply; the penalty gates the *next* pass.

use log::{debug, info};

use crate::config::ReceiverConfig;
use crate::protocol::{Command, Line};
use crate::tick::TickShared;

use super::drive::{CommandDecoder, Dispatch, MotorOutputs};
use super::events::AppEvent;
use super::lives::{HitDebounce, HitDetector, LivesCounter};
use super::ports::{ActuatorPort, EventSink, LaserPort, LightSensorPort, PacketSource, TickWaiter};

/// What one pass of the loop did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Iteration {
    /// Gated by the penalty; only the motor-off write happened.
    Penalized,
    Ran {
        command: Option<Command>,
        hit: bool,
    },
}

pub struct ControlLoop<'t> {
    timer: &'t TickShared,
    lives: LivesCounter,
    detector: HitDetector,
    decoder: CommandDecoder,
    was_penalized: bool,
    iterations: u64,
}

impl<'t> ControlLoop<'t> {
    /// Construct from config.  Does **not** touch outputs; call
    /// [`start`](Self::start) next.
    pub fn new(config: &ReceiverConfig, timer: &'t TickShared) -> Self {
        timer.set_penalty_secs(config.penalty_secs);
        Self {
            timer,
            lives: LivesCounter::new(config.max_lives),
            detector: HitDetector::new(config.hit_threshold),
            decoder: CommandDecoder::new(),
            was_penalized: false,
            iterations: 0,
        }
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Drive every output to its boot level: life lines on, relays low,
    /// motors off, laser off.
    pub fn start(&mut self, hw: &mut (impl ActuatorPort + LaserPort), sink: &mut impl EventSink) {
        for &line in self.lives.lines() {
            hw.set_line(line, true);
        }
        hw.set_line(Line::RelayA, false);
        hw.set_line(Line::RelayB, false);
        self.decoder.drive(hw, MotorOutputs::OFF);
        hw.set_laser(false);

        sink.emit(&AppEvent::Started {
            lives: self.lives.remaining(),
        });
        info!("ControlLoop started with {} lives", self.lives.remaining());
    }

    // ── Per-iteration orchestration ───────────────────────────

    pub fn iterate(
        &mut self,
        hw: &mut (impl LightSensorPort + ActuatorPort + LaserPort),
        radio: &mut impl PacketSource,
        ticks: &mut impl TickWaiter,
        sink: &mut impl EventSink,
    ) -> Iteration {
        self.iterations += 1;

        // 1. Penalty gate
        if self.timer.is_penalized() {
            self.decoder.drive(hw, MotorOutputs::OFF);
            self.was_penalized = true;
            return Iteration::Penalized;
        }
        if self.was_penalized {
            self.was_penalized = false;
            sink.emit(&AppEvent::PenaltyCleared);
        }

        // 2. Light sample
        let reading = hw.sample_light();

        // 3. At most one command
        let command = radio.poll().map(Command::decode);
        if let Some(cmd) = command {
            self.dispatch(cmd, hw, sink);
        }

        // 4. Hit detection
        let hit = self.detector.observe(reading, &self.lives);
        if hit {
            self.respond_to_hit(hw, ticks, sink);
        }

        Iteration::Ran { command, hit }
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn lives(&self) -> u8 {
        self.lives.remaining()
    }

    pub fn debounce(&self) -> HitDebounce {
        self.detector.debounce()
    }

    pub fn motors(&self) -> MotorOutputs {
        self.decoder.motors()
    }

    pub fn iterations(&self) -> u64 {
        self.iterations
    }

    // ── Internal ──────────────────────────────────────────────

    fn dispatch(&mut self, cmd: Command, hw: &mut impl ActuatorPort, sink: &mut impl EventSink) {
        match self.decoder.apply(cmd, &mut self.lives, hw) {
            Dispatch::Applied => {
                if cmd == Command::ResetLives {
                    info!("Lives reset to {}", self.lives.remaining());
                    sink.emit(&AppEvent::LivesReset {
                        lives: self.lives.remaining(),
                    });
                }
                sink.emit(&AppEvent::CommandApplied(cmd));
            }
            Dispatch::Skipped => sink.emit(&AppEvent::CommandSkipped(cmd)),
            Dispatch::Unknown => {
                debug!("Dropped unknown opcode 0x{:02X}", cmd.opcode());
                sink.emit(&AppEvent::UnknownOpcode(cmd.opcode()));
            }
        }
    }

    /// Consume a life, burst the motors until the next laser tick, then
    /// enter the penalty.
    fn respond_to_hit(
        &mut self,
        hw: &mut (impl ActuatorPort + LaserPort),
        ticks: &mut impl TickWaiter,
        sink: &mut impl EventSink,
    ) {
        if let Some(line) = self.lives.lose_one() {
            hw.set_line(line, false);
        }
        info!("Hit! {} lives left", self.lives.remaining());
        sink.emit(&AppEvent::HitRegistered {
            remaining: self.lives.remaining(),
        });

        hw.set_line(Line::RelayA, true);
        self.decoder.drive(hw, MotorOutputs::FULL);
        ticks.wait_next_tick();

        self.timer.enter_penalty(hw);
        self.was_penalized = true;
        sink.emit(&AppEvent::PenaltyEntered);
    }
}
