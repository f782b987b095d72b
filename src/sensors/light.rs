//! LDR light sensor on ADC1.
//!
//! The receiver's hit detector works on a 10-bit scale.  Each reading
//! takes two conversions and keeps the second: the first one after a
//! channel switch can carry charge from the previous input.
//!
//! A failed conversion repeats the previous reading (full-scale lit before
//! the first good one).  A read error must never look like darkness, or it
//! would register as a hit.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: reads ADC1_CH0 via the oneshot API (initialised by hw_init).
//! On host/test: reads from static atomics for injection.

use core::sync::atomic::{AtomicBool, AtomicU16, Ordering};

use log::{info, warn};

#[cfg(target_os = "espidf")]
use crate::drivers::hw_init;

/// 10-bit full scale; what the sensor reports before any good conversion.
pub const LIT: u16 = 1023;

/// Raw 12-bit value the simulated ADC returns.
static SIM_LDR_ADC: AtomicU16 = AtomicU16::new(4095);
/// While set, every simulated conversion fails.
static SIM_LDR_FAULT: AtomicBool = AtomicBool::new(false);

#[cfg(not(target_os = "espidf"))]
pub fn sim_set_ldr_adc(raw: u16) {
    SIM_LDR_ADC.store(raw, Ordering::Relaxed);
}

#[cfg(not(target_os = "espidf"))]
pub fn sim_set_ldr_fault(failing: bool) {
    SIM_LDR_FAULT.store(failing, Ordering::Relaxed);
}

/// 12-bit (0–4095) to 10-bit (0–1023).
pub fn to_10_bit(raw: u16) -> u16 {
    raw.min(4095) >> 2
}

pub struct LightSensor {
    last: u16,
    total_reads: u32,
    failed_reads: u32,
    faulted: bool,
}

impl LightSensor {
    pub fn new() -> Self {
        Self {
            last: LIT,
            total_reads: 0,
            failed_reads: 0,
            faulted: false,
        }
    }

    pub fn read(&mut self) -> u16 {
        self.read_with(adc_convert)
    }

    /// One reading from two calls to `convert`.
    pub fn read_with(&mut self, mut convert: impl FnMut() -> Result<u16, i32>) -> u16 {
        self.total_reads = self.total_reads.saturating_add(1);
        let _settle = convert();

        match convert() {
            Ok(raw) => {
                if self.faulted {
                    info!("light: ADC recovered after {} failed reads", self.failed_reads);
                    self.faulted = false;
                }
                self.last = to_10_bit(raw);
            }
            Err(rc) => {
                if !self.faulted {
                    warn!("light: ADC read failed (rc={}), holding {}", rc, self.last);
                    self.faulted = true;
                }
                self.failed_reads = self.failed_reads.saturating_add(1);
            }
        }
        self.last
    }

    pub fn total_reads(&self) -> u32 {
        self.total_reads
    }

    pub fn failed_reads(&self) -> u32 {
        self.failed_reads
    }
}

impl Default for LightSensor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(target_os = "espidf")]
fn adc_convert() -> Result<u16, i32> {
    hw_init::adc1_read(hw_init::ADC1_CH_LDR)
}

#[cfg(not(target_os = "espidf"))]
fn adc_convert() -> Result<u16, i32> {
    if SIM_LDR_FAULT.load(Ordering::Relaxed) {
        return Err(-1);
    }
    Ok(SIM_LDR_ADC.load(Ordering::Relaxed))
}
