//! Laserbot receiver entry point.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  HardwareAdapter        LogEventSink     EspNowLink            │
//! │  (Light+Actuator+Laser) (EventSink)      (→ RX_PACKETS)        │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │              ControlLoop (pure logic)                  │    │
//! │  │  penalty gate · command decode · hit detection         │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! │                                                                │
//! │  Laser timer (esp_timer) ──▶ LASER_TIMER (tick, penalty)        │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

// ── Imports ───────────────────────────────────────────────────
use anyhow::Result;
use esp_idf_hal::delay::FreeRtos;
use esp_idf_hal::peripherals::Peripherals;
use log::{debug, info};

use laserbot::adapters::espnow::EspNowLink;
use laserbot::adapters::hardware::HardwareAdapter;
use laserbot::adapters::link::{ChannelPacketSource, RX_DROPPED, RX_PACKETS};
use laserbot::adapters::log_sink::LogEventSink;
use laserbot::app::service::ControlLoop;
use laserbot::config::SystemConfig;
use laserbot::diagnostics;
use laserbot::drivers::motor::MotorDriver;
use laserbot::drivers::status_lines::StatusLines;
use laserbot::drivers::watchdog::{DEFAULT_TIMEOUT_MS, Watchdog};
use laserbot::drivers::{hw_init, hw_timer};
use laserbot::error::Error;
use laserbot::sensors::light::LightSensor;
use laserbot::tick::{LASER_TIMER, SpinTickWaiter};

/// Iterations between statistics records.
const STATS_EVERY: u64 = 10_000;

// ── Main ──────────────────────────────────────────────────────

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  Laserbot receiver v{}            ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Config (compiled-in defaults) ──────────────────────
    let config = SystemConfig::default();
    config.validate().map_err(Error::from)?;
    info!("Config: {}", serde_json::to_string(&config.receiver)?);

    // ── 3. Peripherals ────────────────────────────────────────
    hw_init::init_receiver().map_err(Error::from)?;
    diagnostics::install_panic_handler();

    let mut hw = HardwareAdapter::new(LightSensor::new(), MotorDriver::new(), StatusLines::receiver());
    let mut log_sink = LogEventSink::new();

    // ── 4. Control core, boot outputs ─────────────────────────
    let mut control = ControlLoop::new(&config.receiver, &LASER_TIMER);
    control.start(&mut hw, &mut log_sink);

    // ── 5. Radio ──────────────────────────────────────────────
    let peripherals = Peripherals::take()?;
    let link = EspNowLink::start(peripherals.modem, &config.link).map_err(Error::from)?;
    link.listen().map_err(Error::from)?;

    // ── 6. Laser tick ─────────────────────────────────────────
    hw_timer::start_laser_timer(config.receiver.laser_tick_ms).map_err(Error::from)?;
    let watchdog = Watchdog::new(DEFAULT_TIMEOUT_MS);

    let mut radio = ChannelPacketSource::new(&RX_PACKETS);
    let mut ticks = SpinTickWaiter::new(&LASER_TIMER);

    info!(
        "System ready (watchdog {}). Entering control loop.",
        if watchdog.is_subscribed() { "armed" } else { "off" }
    );

    // ── 7. Control loop ───────────────────────────────────────
    loop {
        control.iterate(&mut hw, &mut radio, &mut ticks, &mut log_sink);
        watchdog.feed();

        if control.iterations() % STATS_EVERY == 0 {
            debug!(
                "STATS | rx received={} dropped={} | light reads={} failed={} | lives={}",
                radio.received(),
                RX_DROPPED.load(core::sync::atomic::Ordering::Relaxed),
                hw.light().total_reads(),
                hw.light().failed_reads(),
                control.lives()
            );
        }

        FreeRtos::delay_ms(config.receiver.loop_yield_ms);
    }
}
