//! One-shot hardware peripheral initialization.
//!
//! Configures ADC channels, GPIO directions, and LEDC timers/channels
//! using raw ESP-IDF sys calls. Called once from `main()` before the
//! control loop starts.  Each board has its own entry point.

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

// ── Error type ────────────────────────────────────────────────

/// Errors during one-shot peripheral initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HwInitError {
    AdcInitFailed(i32),
    GpioConfigFailed(i32),
    LedcInitFailed,
    TimerInitFailed(i32),
}

impl core::fmt::Display for HwInitError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::AdcInitFailed(rc) => write!(f, "ADC1 init failed (rc={})", rc),
            Self::GpioConfigFailed(rc) => write!(f, "GPIO config failed (rc={})", rc),
            Self::LedcInitFailed => write!(f, "LEDC timer/channel config failed"),
            Self::TimerInitFailed(rc) => write!(f, "esp_timer setup failed (rc={})", rc),
        }
    }
}

#[cfg(target_os = "espidf")]
use log::info;

#[cfg(target_os = "espidf")]
use crate::pins;

/// ADC1 channel of the light sensor (GPIO 1 on ESP32-S3).
pub const ADC1_CH_LDR: u32 = 0;
/// Forward/back axis (GPIO 3).
pub const ADC1_CH_JOY_Y: u32 = 2;
/// Left/right axis (GPIO 4).
pub const ADC1_CH_JOY_X: u32 = 3;

pub const LEDC_CH_MOTOR_RIGHT: u32 = 0;
pub const LEDC_CH_MOTOR_LEFT: u32 = 1;

// ── Board entry points ────────────────────────────────────────

/// Receiver: light sensor ADC, laser + status outputs, motor PWM.
#[cfg(target_os = "espidf")]
pub fn init_receiver() -> Result<(), HwInitError> {
    // SAFETY: Called once from main() before the control loop; single-threaded.
    unsafe {
        init_adc(&[ADC1_CH_LDR])?;
        init_gpio_outputs(&[
            pins::LASER_GPIO,
            pins::LIFE_1_GPIO,
            pins::LIFE_2_GPIO,
            pins::LIFE_3_GPIO,
            pins::RELAY_A_GPIO,
            pins::RELAY_B_GPIO,
        ])?;
        init_ledc()?;
    }
    info!("hw_init: receiver peripherals configured");
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_receiver() -> Result<(), HwInitError> {
    log::info!("hw_init(sim): receiver peripheral init skipped");
    Ok(())
}

/// Transmitter: two joystick ADC channels, four button inputs.
#[cfg(target_os = "espidf")]
pub fn init_transmitter() -> Result<(), HwInitError> {
    // SAFETY: Called once from main() before the send loop; single-threaded.
    unsafe {
        init_adc(&[ADC1_CH_JOY_Y, ADC1_CH_JOY_X])?;
        init_gpio_inputs(&pins::BUTTON_GPIOS)?;
    }
    info!("hw_init: transmitter peripherals configured");
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn init_transmitter() -> Result<(), HwInitError> {
    log::info!("hw_init(sim): transmitter peripheral init skipped");
    Ok(())
}

// ── ADC (oneshot) ─────────────────────────────────────────────

#[cfg(target_os = "espidf")]
static mut ADC1_HANDLE: adc_oneshot_unit_handle_t = core::ptr::null_mut();

/// SAFETY: Must be called only from the single-threaded init path or the
/// main-loop ADC read path.  No concurrent access is possible because
/// `init_adc()` completes before the loop starts.
#[cfg(target_os = "espidf")]
unsafe fn adc1_handle() -> adc_oneshot_unit_handle_t {
    unsafe { ADC1_HANDLE }
}

#[cfg(target_os = "espidf")]
unsafe fn init_adc(channels: &[u32]) -> Result<(), HwInitError> {
    let init_cfg = adc_oneshot_unit_init_cfg_t {
        unit_id: adc_unit_t_ADC_UNIT_1,
        ulp_mode: adc_ulp_mode_t_ADC_ULP_MODE_DISABLE,
        ..Default::default()
    };
    // SAFETY: ADC1_HANDLE is only written here, once at boot.
    let ret = unsafe { adc_oneshot_new_unit(&init_cfg, &raw mut ADC1_HANDLE) };
    if ret != ESP_OK as i32 {
        return Err(HwInitError::AdcInitFailed(ret));
    }

    let chan_cfg = adc_oneshot_chan_cfg_t {
        atten: adc_atten_t_ADC_ATTEN_DB_12,
        bitwidth: adc_bitwidth_t_ADC_BITWIDTH_12,
    };
    for &channel in channels {
        let ret = unsafe { adc_oneshot_config_channel(adc1_handle(), channel, &chan_cfg) };
        if ret != ESP_OK as i32 {
            return Err(HwInitError::AdcInitFailed(ret));
        }
    }

    info!("hw_init: ADC1 configured ({} channels, 12-bit)", channels.len());
    Ok(())
}

/// One 12-bit conversion (0–4095).  Blocks for the conversion time.
/// `Err` carries the ESP-IDF return code.
#[cfg(target_os = "espidf")]
pub fn adc1_read(channel: u32) -> Result<u16, i32> {
    let mut raw: i32 = 0;
    // SAFETY: adc1_handle() contract: single-threaded main-loop access only.
    let ret = unsafe { adc_oneshot_read(adc1_handle(), channel, &mut raw) };
    if ret != ESP_OK as i32 {
        return Err(ret);
    }
    Ok(raw.max(0) as u16)
}

#[cfg(not(target_os = "espidf"))]
pub fn adc1_read(_channel: u32) -> Result<u16, i32> {
    Ok(0)
}

// ── GPIO Inputs ───────────────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe fn init_gpio_inputs(input_pins: &[i32]) -> Result<(), HwInitError> {
    for &pin in input_pins {
        let cfg = gpio_config_t {
            pin_bit_mask: 1u64 << pin,
            mode: gpio_mode_t_GPIO_MODE_INPUT,
            pull_up_en: gpio_pullup_t_GPIO_PULLUP_ENABLE,
            pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
            intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
        };
        let ret = unsafe { gpio_config(&cfg) };
        if ret != ESP_OK as i32 {
            return Err(HwInitError::GpioConfigFailed(ret));
        }
    }

    info!("hw_init: GPIO inputs configured");
    Ok(())
}

#[cfg(target_os = "espidf")]
pub fn gpio_read(pin: i32) -> bool {
    // SAFETY: gpio_get_level is a read-only register access on an
    // already-configured input pin; safe to call from main context.
    (unsafe { gpio_get_level(pin) }) != 0
}

#[cfg(not(target_os = "espidf"))]
pub fn gpio_read(_pin: i32) -> bool {
    true
}

// ── GPIO Outputs ──────────────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe fn init_gpio_outputs(output_pins: &[i32]) -> Result<(), HwInitError> {
    for &pin in output_pins {
        let cfg = gpio_config_t {
            pin_bit_mask: 1u64 << pin,
            mode: gpio_mode_t_GPIO_MODE_OUTPUT,
            pull_up_en: gpio_pullup_t_GPIO_PULLUP_DISABLE,
            pull_down_en: gpio_pulldown_t_GPIO_PULLDOWN_DISABLE,
            intr_type: gpio_int_type_t_GPIO_INTR_DISABLE,
        };
        let ret = unsafe { gpio_config(&cfg) };
        if ret != ESP_OK as i32 {
            return Err(HwInitError::GpioConfigFailed(ret));
        }
        unsafe { gpio_set_level(pin as gpio_num_t, 0) };
    }

    info!("hw_init: GPIO outputs configured");
    Ok(())
}

/// Register write only; safe from the laser timer callback.
#[cfg(target_os = "espidf")]
pub fn gpio_write(pin: i32, high: bool) {
    // SAFETY: gpio_set_level writes to an already-configured output pin.
    unsafe {
        gpio_set_level(pin as gpio_num_t, u32::from(high));
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn gpio_write(_pin: i32, _high: bool) {}

// ── LEDC PWM ─────────────────────────────────────────────────

#[cfg(target_os = "espidf")]
unsafe fn init_ledc() -> Result<(), HwInitError> {
    // Timer 0: both drive motors (1 kHz, 8-bit)
    let timer0 = ledc_timer_config_t {
        speed_mode: ledc_mode_t_LEDC_LOW_SPEED_MODE,
        timer_num: ledc_timer_t_LEDC_TIMER_0,
        duty_resolution: ledc_timer_bit_t_LEDC_TIMER_8_BIT,
        freq_hz: pins::MOTOR_PWM_FREQ_HZ,
        clk_cfg: soc_periph_ledc_clk_src_legacy_t_LEDC_AUTO_CLK,
        ..Default::default()
    };
    // SAFETY: Called from single main-task context via init_receiver().
    if unsafe { ledc_timer_config(&timer0) } != ESP_OK as i32 {
        return Err(HwInitError::LedcInitFailed);
    }

    let motors = [
        (LEDC_CH_MOTOR_RIGHT, pins::MOTOR_RIGHT_PWM_GPIO),
        (LEDC_CH_MOTOR_LEFT, pins::MOTOR_LEFT_PWM_GPIO),
    ];
    for (channel, gpio) in motors {
        let ret = unsafe {
            ledc_channel_config(&ledc_channel_config_t {
                speed_mode: ledc_mode_t_LEDC_LOW_SPEED_MODE,
                channel,
                timer_sel: ledc_timer_t_LEDC_TIMER_0,
                gpio_num: gpio,
                duty: 0,
                hpoint: 0,
                ..Default::default()
            })
        };
        if ret != ESP_OK as i32 {
            return Err(HwInitError::LedcInitFailed);
        }
    }

    info!("hw_init: LEDC configured (motor right=CH0, left=CH1)");
    Ok(())
}

#[cfg(target_os = "espidf")]
pub fn ledc_set(channel: u32, duty: u8) {
    // SAFETY: LEDC channels were configured in init_ledc(); duty register
    // writes are race-free since only the main loop calls this function.
    unsafe {
        ledc_set_duty(ledc_mode_t_LEDC_LOW_SPEED_MODE, channel, u32::from(duty));
        ledc_update_duty(ledc_mode_t_LEDC_LOW_SPEED_MODE, channel);
    }
}

#[cfg(not(target_os = "espidf"))]
pub fn ledc_set(_channel: u32, _duty: u8) {}
