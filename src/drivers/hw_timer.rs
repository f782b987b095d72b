//! Laser tick timer using ESP-IDF's esp_timer API.
//!
//! One periodic timer drives [`LASER_TIMER`](crate::tick::LASER_TIMER):
//! laser flashing, the tick rendezvous, and the penalty countdown.  The
//! callback runs in the esp_timer task, which preempts the main loop.
//! On simulation targets nothing is started; tests call
//! [`TickShared::on_tick`](crate::tick::TickShared::on_tick) directly.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

#[cfg(target_os = "espidf")]
use log::info;

#[cfg(target_os = "espidf")]
use crate::drivers::laser::GpioLaser;
#[cfg(target_os = "espidf")]
use crate::tick::LASER_TIMER;

#[cfg(target_os = "espidf")]
static mut LASER_TICK_TIMER: esp_timer_handle_t = core::ptr::null_mut();

/// SAFETY: LASER_TICK_TIMER is written once in `start_laser_timer()` before
/// any callback fires.  Only called from the single main task.
#[cfg(target_os = "espidf")]
unsafe fn laser_tick_timer() -> esp_timer_handle_t {
    unsafe { LASER_TICK_TIMER }
}

#[cfg(target_os = "espidf")]
unsafe extern "C" fn laser_tick_cb(_arg: *mut core::ffi::c_void) {
    LASER_TIMER.on_tick(&mut GpioLaser);
}

/// Start the periodic laser tick.
#[cfg(target_os = "espidf")]
pub fn start_laser_timer(period_ms: u32) -> Result<(), crate::drivers::hw_init::HwInitError> {
    use crate::drivers::hw_init::HwInitError;

    // SAFETY: LASER_TICK_TIMER is written here once at boot from the main
    // task before the callback can fire.  The callback only touches
    // critical-section-guarded state and one GPIO register.
    unsafe {
        let args = esp_timer_create_args_t {
            callback: Some(laser_tick_cb),
            arg: core::ptr::null_mut(),
            dispatch_method: esp_timer_dispatch_t_ESP_TIMER_TASK,
            name: b"laser\0".as_ptr() as *const _,
            skip_unhandled_events: false,
        };
        let ret = esp_timer_create(&args, &raw mut LASER_TICK_TIMER);
        if ret != ESP_OK as i32 {
            log::error!("hw_timer: laser timer create failed (rc={})", ret);
            return Err(HwInitError::TimerInitFailed(ret));
        }
        let ret = esp_timer_start_periodic(laser_tick_timer(), u64::from(period_ms) * 1_000);
        if ret != ESP_OK as i32 {
            log::error!("hw_timer: laser timer start failed (rc={})", ret);
            return Err(HwInitError::TimerInitFailed(ret));
        }
    }

    info!("hw_timer: laser tick every {} ms", period_ms);
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn start_laser_timer(_period_ms: u32) -> Result<(), crate::drivers::hw_init::HwInitError> {
    log::info!("hw_timer(sim): laser timer not started (ticks driven by caller)");
    Ok(())
}

/// Stop the laser tick.  Penalty and flashing freeze where they are.
#[cfg(target_os = "espidf")]
pub fn stop_laser_timer() {
    // SAFETY: laser_tick_timer() contract: main task only; null-check
    // covers a failed start.
    unsafe {
        let t = laser_tick_timer();
        if !t.is_null() {
            esp_timer_stop(t);
        }
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn stop_laser_timer() {}
