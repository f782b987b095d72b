//! Light sensor through the real hardware adapter into the control loop.
//!
//! The simulated ADC is process-global, so every scenario that touches it
//! lives in this one test.

use crate::mock_hw::{FakeTicks, LogSink, MockRadio};

use laserbot::adapters::hardware::HardwareAdapter;
use laserbot::app::service::{ControlLoop, Iteration};
use laserbot::config::ReceiverConfig;
use laserbot::drivers::motor::MotorDriver;
use laserbot::drivers::status_lines::StatusLines;
use laserbot::sensors::light::{LightSensor, sim_set_ldr_adc, sim_set_ldr_fault};
use laserbot::tick::TickShared;

fn ran_without_hit(it: Iteration) -> bool {
    matches!(it, Iteration::Ran { hit: false, .. })
}

#[test]
fn failed_light_conversion_neither_hits_nor_rearms() {
    let shared = TickShared::new(5);
    let mut ctl = ControlLoop::new(&ReceiverConfig::default(), &shared);
    let mut hw = HardwareAdapter::new(LightSensor::new(), MotorDriver::new(), StatusLines::receiver());
    let mut radio = MockRadio::default();
    let mut ticks = FakeTicks::new(&shared);
    let mut sink = LogSink::new();
    ctl.start(&mut hw, &mut sink);

    // Failing before any good conversion reads as lit.
    sim_set_ldr_fault(true);
    let it = ctl.iterate(&mut hw, &mut radio, &mut ticks, &mut sink);
    assert!(ran_without_hit(it));
    assert_eq!(ctl.lives(), 3);
    assert!(!ctl.debounce().armed);

    // Real darkness still hits.
    sim_set_ldr_fault(false);
    sim_set_ldr_adc(0);
    let it = ctl.iterate(&mut hw, &mut radio, &mut ticks, &mut sink);
    assert!(matches!(it, Iteration::Ran { hit: true, .. }));
    assert_eq!(ctl.lives(), 2);
    ticks.fire(5);
    assert!(!shared.is_penalized());

    // A failure while the sensor is dark holds the dark reading: the
    // exposure stays latched and costs no further life.
    sim_set_ldr_fault(true);
    for _ in 0..3 {
        let it = ctl.iterate(&mut hw, &mut radio, &mut ticks, &mut sink);
        assert!(ran_without_hit(it));
        assert!(ctl.debounce().armed);
    }
    assert_eq!(ctl.lives(), 2);
    assert!(!shared.is_penalized());

    // Light returns once the ADC recovers.
    sim_set_ldr_fault(false);
    sim_set_ldr_adc(4095);
    ctl.iterate(&mut hw, &mut radio, &mut ticks, &mut sink);
    assert!(!ctl.debounce().armed);

    assert_eq!(hw.light().failed_reads(), 4);
    assert_eq!(hw.light().total_reads(), 6);
}
