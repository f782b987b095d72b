//! Laser tick: the 1 Hz timer handler and the state it shares with the
//! main loop.
//!
//! ```text
//!  ┌──────────────┐  on_tick()   ┌──────────────────────────┐
//!  │ Laser timer  │─────────────▶│ TickShared               │
//!  │ (preemptive) │              │  penalty  (cs::Mutex)    │
//!  └──────────────┘              │  laser_on (atomic)       │
//!                                │  laser_tick (Signal)     │
//!  ┌──────────────┐ enter_penalty│                          │
//!  │  Main loop   │─────────────▶│                          │
//!  │              │◀─────────────│ is_penalized / take_tick │
//!  └──────────────┘              └──────────────────────────┘
//! ```
//!
//! Ownership per field:
//! - `penalty`: the tick handler advances and clears it; the main loop only
//!   enters it (Idle → Penalized) and reads it.
//! - `laser_on`: written only inside a critical section, by whichever
//!   side is driving the laser line.
//! - `laser_tick`: one-shot signal, produced by the tick handler and
//!   consumed by the hit response rendezvous.
//!
//! Every critical section here is O(1): no loops, no logging, no I/O
//! other than one laser pin write.  Holding one for longer than a tick
//! period would desynchronise the flash cadence.

use core::cell::Cell;
use core::sync::atomic::{AtomicBool, AtomicU8, Ordering};

use critical_section::Mutex;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;

use crate::app::ports::{LaserPort, TickWaiter};

/// Ticks spent penalized unless reconfigured at boot.
pub const DEFAULT_PENALTY_SECS: u8 = 5;

/// Shared instance driven by the hardware laser timer.
pub static LASER_TIMER: TickShared = TickShared::new(DEFAULT_PENALTY_SECS);

/// Actuation lockout following a hit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PenaltyState {
    pub active: bool,
    /// Only advances while `active`.
    pub elapsed_seconds: u8,
}

pub struct TickShared {
    penalty: Mutex<Cell<PenaltyState>>,
    penalty_secs: AtomicU8,
    laser_on: AtomicBool,
    laser_tick: Signal<CriticalSectionRawMutex, ()>,
}

impl TickShared {
    pub const fn new(penalty_secs: u8) -> Self {
        Self {
            penalty: Mutex::new(Cell::new(PenaltyState {
                active: false,
                elapsed_seconds: 0,
            })),
            penalty_secs: AtomicU8::new(penalty_secs),
            laser_on: AtomicBool::new(false),
            laser_tick: Signal::new(),
        }
    }

    /// Set the penalty length.  Call at boot, before the timer starts.
    pub fn set_penalty_secs(&self, secs: u8) {
        self.penalty_secs.store(secs.max(1), Ordering::Relaxed);
    }

    // ── Timer context ─────────────────────────────────────────

    /// Tick handler body.  Runs once per laser period, preempting the main
    /// loop.  Never blocks, never fails.
    pub fn on_tick(&self, laser: &mut impl LaserPort) {
        let limit = self.penalty_secs.load(Ordering::Relaxed);
        critical_section::with(|cs| {
            let cell = self.penalty.borrow(cs);
            let mut state = cell.get();

            if state.active {
                state.elapsed_seconds = state.elapsed_seconds.saturating_add(1);
                if state.elapsed_seconds >= limit {
                    state = PenaltyState::default();
                }
                cell.set(state);
                // Off while penalized and on the tick that ends it; flashing
                // resumes on the following tick.
                self.drive_laser(laser, false);
            } else {
                let next = !self.laser_on.load(Ordering::Relaxed);
                self.drive_laser(laser, next);
                self.laser_tick.signal(());
            }
        });
    }

    // ── Main-loop context ─────────────────────────────────────

    /// Idle → Penalized.  Zeroes the elapsed counter and forces the laser
    /// off in the same critical section so a tick cannot interleave.
    pub fn enter_penalty(&self, laser: &mut impl LaserPort) {
        critical_section::with(|cs| {
            self.penalty.borrow(cs).set(PenaltyState {
                active: true,
                elapsed_seconds: 0,
            });
            self.drive_laser(laser, false);
        });
    }

    pub fn penalty(&self) -> PenaltyState {
        critical_section::with(|cs| self.penalty.borrow(cs).get())
    }

    pub fn is_penalized(&self) -> bool {
        self.penalty().active
    }

    /// Last level written to the laser line.
    pub fn laser_on(&self) -> bool {
        self.laser_on.load(Ordering::Relaxed)
    }

    /// Discard any tick that fired before now, so the next
    /// [`take_laser_tick`](Self::take_laser_tick) only sees a fresh one.
    pub fn arm_rendezvous(&self) {
        self.laser_tick.reset();
    }

    /// Read-and-clear of the tick flag, atomic with respect to the timer.
    pub fn take_laser_tick(&self) -> bool {
        self.laser_tick.try_take().is_some()
    }

    /// Must be called with a critical section held.
    fn drive_laser(&self, laser: &mut impl LaserPort, on: bool) {
        self.laser_on.store(on, Ordering::Relaxed);
        laser.set_laser(on);
    }
}

/// Production rendezvous: busy-waits for the next laser tick.  Bounded by
/// one tick period while not penalized.
pub struct SpinTickWaiter<'a> {
    shared: &'a TickShared,
}

impl<'a> SpinTickWaiter<'a> {
    pub fn new(shared: &'a TickShared) -> Self {
        Self { shared }
    }
}

impl TickWaiter for SpinTickWaiter<'_> {
    fn wait_next_tick(&mut self) {
        self.shared.arm_rendezvous();
        while !self.shared.take_laser_tick() {
            core::hint::spin_loop();
        }
    }
}
