//! Inbound packet queue between the radio callback and the control loop.
//!
//! ```text
//! ┌──────────────┐ deliver() ┌─────────────┐ poll() ┌──────────────┐
//! │ Radio recv   │──────────▶│ RX_PACKETS  │───────▶│ Control loop │
//! │ callback     │           │ (bounded)   │        │ (1 per iter) │
//! └──────────────┘           └─────────────┘        └──────────────┘
//! ```
//!
//! The callback validates the payload length and never blocks: a packet
//! that does not fit is dropped and counted.  With no sequencing on the
//! link, a dropped packet is simply superseded by the next one.

use core::sync::atomic::{AtomicU32, Ordering};

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;

use crate::app::ports::PacketSource;
use crate::protocol::CommandPacket;

/// Channel depth for inbound packets.
pub const RX_DEPTH: usize = 4;

pub type PacketChannel<const N: usize> = Channel<CriticalSectionRawMutex, CommandPacket, N>;

/// Radio callback → control loop.
pub static RX_PACKETS: PacketChannel<RX_DEPTH> = Channel::new();

/// Payloads rejected by [`deliver`] since boot (bad length or queue full).
pub static RX_DROPPED: AtomicU32 = AtomicU32::new(0);

/// Validate and enqueue one received payload.  Returns `false` when it was
/// dropped.
pub fn deliver<const N: usize>(channel: &PacketChannel<N>, payload: &[u8]) -> bool {
    let accepted = CommandPacket::from_bytes(payload)
        .map(|packet| channel.try_send(packet).is_ok())
        .unwrap_or(false);
    if !accepted {
        RX_DROPPED.fetch_add(1, Ordering::Relaxed);
    }
    accepted
}

/// [`PacketSource`] over a packet channel.
pub struct ChannelPacketSource<'a, const N: usize> {
    channel: &'a PacketChannel<N>,
    received: u32,
}

impl<'a, const N: usize> ChannelPacketSource<'a, N> {
    pub fn new(channel: &'a PacketChannel<N>) -> Self {
        Self {
            channel,
            received: 0,
        }
    }

    pub fn received(&self) -> u32 {
        self.received
    }
}

impl<const N: usize> PacketSource for ChannelPacketSource<'_, N> {
    fn poll(&mut self) -> Option<CommandPacket> {
        let packet = self.channel.try_receive().ok()?;
        self.received = self.received.wrapping_add(1);
        Some(packet)
    }
}
