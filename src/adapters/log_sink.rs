//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing structured application events to
//! the ESP-IDF logger (which goes to UART / USB-CDC in production).
//! Per-command records are `debug!`; game state changes are `info!`.

use log::{debug, info};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`] to the serial console.
#[derive(Debug, Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started { lives } => info!("START | lives={}", lives),
            AppEvent::CommandApplied(cmd) => {
                debug!("CMD   | applied op=0x{:02X} {:?}", cmd.opcode(), cmd)
            }
            AppEvent::CommandSkipped(cmd) => {
                debug!("CMD   | skipped op=0x{:02X} {:?}", cmd.opcode(), cmd)
            }
            AppEvent::UnknownOpcode(op) => debug!("CMD   | unknown op=0x{:02X}", op),
            AppEvent::LivesReset { lives } => info!("LIVES | reset to {}", lives),
            AppEvent::HitRegistered { remaining } => info!("HIT   | remaining={}", remaining),
            AppEvent::PenaltyEntered => info!("PENALTY | entered"),
            AppEvent::PenaltyCleared => info!("PENALTY | cleared"),
        }
    }
}
