//! Mock hardware for integration tests.
//!
//! Every mock records what the pipeline did with it so tests can assert
//! on the full history without touching real GPIO, ADC, or I2C.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::convert::Infallible;
use std::time::{Duration, Instant};

use embedded_hal::digital::{ErrorType as PinErrorType, OutputPin};
use embedded_hal::i2c::{ErrorKind, ErrorType as I2cErrorType, I2c, NoAcknowledgeSource, Operation};
use envnode::app::messages::TimeSample;
use envnode::app::ports::{ClimatePort, ClimateReading, ClockPort, ConsolePort, LightPort};
use envnode::config::NodeConfig;
use envnode::error::{ClockError, SensorError};

pub const NOON: TimeSample = TimeSample {
    hour: 12,
    minute: 0,
    second: 0,
    day: 1,
    month: 1,
    year: 2024,
};

/// Config with every period shrunk to a few milliseconds. One awake
/// interval of `liveness_ms`.
pub fn fast_config(liveness_ms: u32) -> NodeConfig {
    NodeConfig {
        climate_interval_ms: 20,
        light_interval_ms: 10,
        clock_interval_ms: 10,
        report_rx_timeout_ms: 5,
        alarm_hold_ms: 15,
        frame_rx_timeout_ms: 5,
        frame_period_ms: 20,
        frame_report_period_ms: 20,
        press_report_interval_ms: 10,
        liveness_interval_ms: liveness_ms,
        awake_intervals: 1,
        ..NodeConfig::default()
    }
}

// ── Console ───────────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingConsole {
    lines: RefCell<Vec<String>>,
}

#[allow(dead_code)]
impl RecordingConsole {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.borrow().clone()
    }

    pub fn contains(&self, line: &str) -> bool {
        self.lines.borrow().iter().any(|l| l == line)
    }

    pub fn count_prefix(&self, prefix: &str) -> usize {
        self.lines.borrow().iter().filter(|l| l.starts_with(prefix)).count()
    }
}

impl ConsolePort for RecordingConsole {
    fn write_line(&self, line: &str) {
        self.lines.borrow_mut().push(line.to_string());
    }
}

// ── Indicator ─────────────────────────────────────────────────

#[derive(Default)]
pub struct MockPin {
    pub levels: Vec<bool>,
    /// When each entry of `levels` was driven.
    pub changed_at: Vec<Instant>,
}

#[allow(dead_code)]
impl MockPin {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of completed high→low pulses.
    pub fn pulses(&self) -> usize {
        self.levels.windows(2).filter(|w| w[0] && !w[1]).count()
    }

    /// How long the pin stayed high for each completed pulse.
    pub fn pulse_widths(&self) -> Vec<Duration> {
        self.levels
            .windows(2)
            .zip(self.changed_at.windows(2))
            .filter(|(l, _)| l[0] && !l[1])
            .map(|(_, t)| t[1] - t[0])
            .collect()
    }
}

impl PinErrorType for MockPin {
    type Error = Infallible;
}

impl OutputPin for MockPin {
    fn set_low(&mut self) -> Result<(), Infallible> {
        self.levels.push(false);
        self.changed_at.push(Instant::now());
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        self.levels.push(true);
        self.changed_at.push(Instant::now());
        Ok(())
    }
}

// ── Sensors ───────────────────────────────────────────────────

/// Replays a script of results, then repeats `steady` forever.
pub struct ScriptedClimate {
    script: VecDeque<Result<ClimateReading, SensorError>>,
    steady: ClimateReading,
    pub reads: usize,
}

#[allow(dead_code)]
impl ScriptedClimate {
    pub fn steady(temperature_c: f32, humidity_pct: f32) -> Self {
        Self {
            script: VecDeque::new(),
            steady: ClimateReading { temperature_c, humidity_pct },
            reads: 0,
        }
    }

    pub fn with_script(mut self, script: Vec<Result<ClimateReading, SensorError>>) -> Self {
        self.script = script.into();
        self
    }
}

impl ClimatePort for ScriptedClimate {
    fn read(&mut self) -> Result<ClimateReading, SensorError> {
        self.reads += 1;
        self.script.pop_front().unwrap_or(Ok(self.steady))
    }
}

pub struct FixedLight {
    pub level: u16,
    pub reads: usize,
}

impl FixedLight {
    pub fn new(level: u16) -> Self {
        Self { level, reads: 0 }
    }
}

impl LightPort for FixedLight {
    fn read(&mut self) -> u16 {
        self.reads += 1;
        self.level
    }
}

pub struct FixedClock {
    pub time: TimeSample,
    pub reads: usize,
}

impl FixedClock {
    pub fn new(time: TimeSample) -> Self {
        Self { time, reads: 0 }
    }
}

impl ClockPort for FixedClock {
    fn now(&mut self) -> Result<TimeSample, ClockError> {
        self.reads += 1;
        Ok(self.time)
    }
}

// ── I2C bus with a DS3231 register file ───────────────────────

pub struct MockDs3231Bus {
    pub present: bool,
    pub regs: [u8; 0x13],
    pointer: usize,
    /// Transactions acknowledged before the bus starts failing.
    acks_left: Option<usize>,
}

#[allow(dead_code)]
impl MockDs3231Bus {
    /// Device on the bus holding 2024-01-01 12:00:00, oscillator running.
    pub fn running() -> Self {
        let mut regs = [0u8; 0x13];
        regs[0x02] = 0x12;
        regs[0x03] = 0x01;
        regs[0x04] = 0x01;
        regs[0x05] = 0x01;
        regs[0x06] = 0x24;
        Self { present: true, regs, pointer: 0, acks_left: None }
    }

    /// Device whose oscillator-stop flag is set.
    pub fn lost_power() -> Self {
        let mut bus = Self::running();
        bus.regs[0x0F] |= 0x80;
        bus
    }

    pub fn absent() -> Self {
        Self { present: false, ..Self::running() }
    }

    /// Present device that stops acknowledging after `acks` transactions.
    pub fn failing_after(mut self, acks: usize) -> Self {
        self.acks_left = Some(acks);
        self
    }

    pub fn osf(&self) -> bool {
        self.regs[0x0F] & 0x80 != 0
    }
}

impl I2cErrorType for MockDs3231Bus {
    type Error = ErrorKind;
}

impl I2c for MockDs3231Bus {
    fn transaction(&mut self, address: u8, operations: &mut [Operation<'_>]) -> Result<(), ErrorKind> {
        if !self.present || address != 0x68 {
            return Err(ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address));
        }
        if let Some(left) = self.acks_left.as_mut() {
            if *left == 0 {
                return Err(ErrorKind::Bus);
            }
            *left -= 1;
        }
        for op in operations {
            match op {
                Operation::Write(bytes) => {
                    if let Some((reg, data)) = bytes.split_first() {
                        self.pointer = usize::from(*reg);
                        for b in data {
                            self.regs[self.pointer % self.regs.len()] = *b;
                            self.pointer += 1;
                        }
                    }
                }
                Operation::Read(buf) => {
                    for b in buf.iter_mut() {
                        *b = self.regs[self.pointer % self.regs.len()];
                        self.pointer += 1;
                    }
                }
            }
        }
        Ok(())
    }
}
