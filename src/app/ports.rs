//! Port traits — the boundary between the task pipeline and the board.
//!
//! ```text
//!   Driver / adapter ──▶ Port trait ──▶ tasks (domain)
//! ```
//!
//! Drivers (DHT11, LDR, DS3231, UART console, deep-sleep controller)
//! implement these traits. The tasks consume them via generics, so the
//! pipeline never touches hardware directly and runs unchanged against
//! the mocks in `tests/integration/mock_hw.rs`.
//!
//! The alarm indicator is not a port of its own: it is any
//! `embedded_hal::digital::OutputPin`.

use core::fmt;
use core::time::Duration;

use crate::app::messages::TimeSample;
use crate::error::{ClockError, SensorError};
use crate::power::WakeReason;

// ───────────────────────────────────────────────────────────────
// Sensor ports (driven adapter: hardware → domain)
// ───────────────────────────────────────────────────────────────

/// Raw climate reading as returned by the driver. Values may be NaN on a
/// marginal read; the producer rejects those.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClimateReading {
    pub temperature_c: f32,
    pub humidity_pct: f32,
}

/// Temperature/humidity sensor.
pub trait ClimatePort {
    fn read(&mut self) -> Result<ClimateReading, SensorError>;
}

/// Analog light sensor. Always succeeds; range is device specific
/// (0–4095 on a 12-bit ADC).
pub trait LightPort {
    fn read(&mut self) -> u16;
}

/// Real-time clock.
pub trait ClockPort {
    fn now(&mut self) -> Result<TimeSample, ClockError>;
}

impl<T: ClimatePort + ?Sized> ClimatePort for &mut T {
    fn read(&mut self) -> Result<ClimateReading, SensorError> {
        (**self).read()
    }
}

impl<T: LightPort + ?Sized> LightPort for &mut T {
    fn read(&mut self) -> u16 {
        (**self).read()
    }
}

impl<T: ClockPort + ?Sized> ClockPort for &mut T {
    fn now(&mut self) -> Result<TimeSample, ClockError> {
        (**self).now()
    }
}

// ───────────────────────────────────────────────────────────────
// Console port (driven adapter: domain → serial)
// ───────────────────────────────────────────────────────────────

/// Line-oriented status output. Fire-and-forget: adapters must not block
/// the caller on the physical link.
pub trait ConsolePort {
    fn write_line(&self, line: &str);

    /// Format and write one line.
    fn print(&self, args: fmt::Arguments<'_>) {
        match args.as_str() {
            Some(s) => self.write_line(s),
            None => self.write_line(&args.to_string()),
        }
    }
}

impl<T: ConsolePort + ?Sized> ConsolePort for &T {
    fn write_line(&self, line: &str) {
        (**self).write_line(line);
    }
}

// ───────────────────────────────────────────────────────────────
// Power port (driven adapter: domain → sleep controller)
// ───────────────────────────────────────────────────────────────

/// Low-power control.
pub trait PowerPort {
    /// Why this boot happened.
    fn wake_reason(&self) -> WakeReason;

    /// Arm the wake timer and enter deep sleep.
    ///
    /// On hardware this never returns: the next thing that runs is a full
    /// reboot. Simulated platforms return once the sleep has elapsed and
    /// the caller restarts the boot sequence.
    fn enter_deep_sleep(&mut self, duration: Duration);
}

// ───────────────────────────────────────────────────────────────
// Error types
// ───────────────────────────────────────────────────────────────

/// Errors from configuration loading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// The override could not be parsed.
    Corrupted,
    /// A config field failed range validation.
    /// The `&'static str` describes which field and why.
    ValidationFailed(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Corrupted => write!(f, "config corrupted"),
            Self::ValidationFailed(msg) => write!(f, "validation failed: {}", msg),
        }
    }
}
