//! Panic-time safe state.
//!
//! The panic hook logs the reason and uptime, stops the laser tick, and
//! drives every receiver output to its idle level before the default
//! handler resets the chip.  Nothing is persisted across the reset.

use crate::drivers::{hw_init, hw_timer};
use crate::pins;

/// Install once during init, after peripherals are configured.
pub fn install_panic_handler() {
    std::panic::set_hook(Box::new(|info| {
        let reason = panic_reason(info.payload());
        log::error!("PANIC: {} (uptime {} s)", reason, uptime_secs());
        force_safe_outputs();
    }));
}

/// Stop the tick and zero motors and laser.  Register writes only, so it
/// is usable from panic context.
pub fn force_safe_outputs() {
    hw_timer::stop_laser_timer();
    hw_init::ledc_set(hw_init::LEDC_CH_MOTOR_RIGHT, 0);
    hw_init::ledc_set(hw_init::LEDC_CH_MOTOR_LEFT, 0);
    hw_init::gpio_write(pins::LASER_GPIO, false);
}

fn panic_reason(payload: &(dyn core::any::Any + Send)) -> &str {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        *msg
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.as_str()
    } else {
        "unknown panic"
    }
}

#[cfg(target_os = "espidf")]
fn uptime_secs() -> u64 {
    // SAFETY: esp_timer_get_time is a counter read with no allocation.
    (unsafe { esp_idf_svc::sys::esp_timer_get_time() }) as u64 / 1_000_000
}

#[cfg(not(target_os = "espidf"))]
fn uptime_secs() -> u64 {
    0
}
