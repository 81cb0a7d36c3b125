//! RTC bring-up against a mock DS3231 on a mock I2C bus.

use envnode::app::messages::TimeSample;
use envnode::app::ports::ClockPort;
use envnode::drivers::ds3231::Ds3231;
use envnode::error::{ClockError, Error};
use envnode::runtime::bring_up_clock;

use crate::mock_hw::{MockDs3231Bus, RecordingConsole, NOON};

const BUILD: TimeSample = TimeSample {
    hour: 8,
    minute: 30,
    second: 15,
    day: 29,
    month: 2,
    year: 2024,
};

#[test]
fn missing_rtc_is_fatal_and_announced() {
    let console = RecordingConsole::new();
    let mut rtc = Ds3231::new(MockDs3231Bus::absent());
    assert_eq!(
        bring_up_clock(&mut rtc, &console, &BUILD),
        Err(Error::Clock(ClockError::NotFound))
    );
    assert_eq!(console.lines(), vec!["No se encontró RTC".to_string()]);
}

#[test]
fn running_rtc_is_left_alone() {
    let console = RecordingConsole::new();
    let mut rtc = Ds3231::new(MockDs3231Bus::running());
    assert_eq!(bring_up_clock(&mut rtc, &console, &BUILD), Ok(()));
    assert!(console.lines().is_empty());
    assert_eq!(rtc.now(), Ok(NOON));
}

#[test]
fn lost_power_resets_to_build_time() {
    let console = RecordingConsole::new();
    let mut rtc = Ds3231::new(MockDs3231Bus::lost_power());
    assert_eq!(bring_up_clock(&mut rtc, &console, &BUILD), Ok(()));
    assert_eq!(
        console.lines(),
        vec!["RTC perdió la hora, estableciendo nueva hora...".to_string()]
    );
    assert_eq!(rtc.now(), Ok(BUILD));

    let bus = rtc.release();
    assert!(!bus.osf());
    assert_eq!(bus.regs[0x03], 4); // Thursday
}

#[test]
fn unusable_fallback_time_does_not_stop_bring_up() {
    let console = RecordingConsole::new();
    let mut rtc = Ds3231::new(MockDs3231Bus::lost_power());
    let epoch = TimeSample { year: 1970, ..BUILD };
    assert_eq!(bring_up_clock(&mut rtc, &console, &epoch), Ok(()));
    assert_eq!(
        console.lines(),
        vec!["RTC perdió la hora, estableciendo nueva hora...".to_string()]
    );

    // Nothing was written: the stored time and the stop flag are untouched.
    assert_eq!(rtc.now(), Ok(NOON));
    assert!(rtc.release().osf());
}

#[test]
fn status_read_failure_after_probe_is_not_fatal() {
    let console = RecordingConsole::new();
    // The probe is acknowledged, the oscillator-status read is not.
    let mut rtc = Ds3231::new(MockDs3231Bus::lost_power().failing_after(1));
    assert_eq!(bring_up_clock(&mut rtc, &console, &BUILD), Ok(()));
    assert!(console.lines().is_empty());
}

#[test]
fn adjust_bus_failure_does_not_stop_bring_up() {
    let console = RecordingConsole::new();
    // Probe and status read succeed, the register write fails.
    let mut rtc = Ds3231::new(MockDs3231Bus::lost_power().failing_after(2));
    assert_eq!(bring_up_clock(&mut rtc, &console, &BUILD), Ok(()));
    assert_eq!(console.count_prefix("RTC perdió la hora"), 1);
}

#[test]
fn adjust_rejects_out_of_range_year() {
    let mut rtc = Ds3231::new(MockDs3231Bus::running());
    let old = TimeSample { year: 1999, ..NOON };
    assert_eq!(rtc.adjust(&old), Err(ClockError::InvalidTime));
}
