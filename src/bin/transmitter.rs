//! Laserbot transmitter (joystick node) entry point.
//!
//! Samples the stick and buttons every `send_interval_ms` and broadcasts
//! one two-byte command packet over ESP-NOW.  Stateless apart from the
//! send counters.
#![deny(unused_must_use)]

use anyhow::Result;
use esp_idf_hal::delay::FreeRtos;
use esp_idf_hal::peripherals::Peripherals;
use log::{debug, info};

use laserbot::adapters::espnow::EspNowLink;
use laserbot::adapters::hardware::JoystickAdapter;
use laserbot::app::transmitter::Transmitter;
use laserbot::config::SystemConfig;
use laserbot::drivers::hw_init;
use laserbot::drivers::watchdog::{DEFAULT_TIMEOUT_MS, Watchdog};
use laserbot::error::Error;
use laserbot::sensors::joystick::Joystick;

/// Packets between send statistics records.
const STATS_EVERY: u32 = 200;

fn main() -> Result<()> {
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;
    info!("Laserbot transmitter v{}", env!("CARGO_PKG_VERSION"));

    let config = SystemConfig::default();
    config.validate().map_err(Error::from)?;
    info!("Config: {}", serde_json::to_string(&config.transmitter)?);

    hw_init::init_transmitter().map_err(Error::from)?;
    let mut joystick = JoystickAdapter::new(Joystick::new());

    let peripherals = Peripherals::take()?;
    let mut link = EspNowLink::start(peripherals.modem, &config.link).map_err(Error::from)?;
    link.add_broadcast_peer(&config.link).map_err(Error::from)?;

    let watchdog = Watchdog::new(DEFAULT_TIMEOUT_MS);
    let mut tx = Transmitter::new(config.transmitter);

    info!("Broadcasting every {} ms", tx.interval_ms());
    loop {
        let packet = tx.step(&mut joystick, &mut link);
        watchdog.feed();

        let total = tx.sent().wrapping_add(tx.failed());
        if total % STATS_EVERY == 0 {
            debug!(
                "tx: last=0x{:02X}/{} sent={} failed={}",
                packet.opcode,
                packet.speed,
                tx.sent(),
                tx.failed()
            );
        }

        FreeRtos::delay_ms(tx.interval_ms());
    }
}
