//! Lives counter and hit debounce.
//!
//! A hit is one continuous dark exposure of the light sensor, not one
//! dark sample.  The main loop runs orders of magnitude faster than light
//! changes, so without the debounce a single exposure would drain every
//! life.
//!
//! ```text
//!   reading < threshold, not armed, lives > 0  ──▶ HIT, armed = true
//!   reading > threshold                        ──▶ armed = false
//!   reading == threshold                       ──▶ unchanged
//! ```

use crate::protocol::Line;

/// Lives left, bounded by the number of indicator lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LivesCounter {
    remaining: u8,
    max: u8,
}

impl LivesCounter {
    pub fn new(max: u8) -> Self {
        let max = max.clamp(1, Line::LIVES.len() as u8);
        Self { remaining: max, max }
    }

    pub fn remaining(&self) -> u8 {
        self.remaining
    }

    pub fn max(&self) -> u8 {
        self.max
    }

    /// Indicator lines for the lives this counter can hold.
    pub fn lines(&self) -> &'static [Line] {
        &Line::LIVES[..self.max as usize]
    }

    /// Consume one life.  Returns the indicator to clear, first life's
    /// line first.  `None` once no lives remain.
    pub fn lose_one(&mut self) -> Option<Line> {
        if self.remaining == 0 {
            return None;
        }
        let index = (self.max - self.remaining) as usize;
        self.remaining -= 1;
        Some(Line::LIVES[index])
    }

    /// Restore every life, but only once all are gone.  Returns `true` if
    /// the counter changed.
    pub fn reset(&mut self) -> bool {
        if self.remaining != 0 {
            return false;
        }
        self.remaining = self.max;
        true
    }
}

/// `armed` is set while the sensor stays dark after a hit; a new hit can
/// only register while it is clear.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HitDebounce {
    pub armed: bool,
}

/// Threshold test plus debounce.
#[derive(Debug, Clone, Copy)]
pub struct HitDetector {
    threshold: u16,
    debounce: HitDebounce,
}

impl HitDetector {
    pub fn new(threshold: u16) -> Self {
        Self {
            threshold,
            debounce: HitDebounce::default(),
        }
    }

    pub fn debounce(&self) -> HitDebounce {
        self.debounce
    }

    /// Feed one reading.  Returns `true` if it registers a hit; the caller
    /// is then responsible for consuming the life.
    pub fn observe(&mut self, reading: u16, lives: &LivesCounter) -> bool {
        if reading < self.threshold && !self.debounce.armed && lives.remaining() > 0 {
            self.debounce.armed = true;
            return true;
        }
        if reading > self.threshold {
            self.debounce.armed = false;
        }
        false
    }
}
