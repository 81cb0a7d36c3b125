//! Typed messages exchanged between the node's tasks.
//!
//! ```text
//!  ClimateProducer ─┐
//!                   ├─ SensorSample ──▶ Reporter / FrameBuilder
//!  LightProducer ───┘
//!  ClockProducer ──── TimeSample ─────▶ Reporter / FrameBuilder
//!  FrameBuilder ───── Frame ──────────▶ FrameReporter
//! ```

use core::fmt::{self, Write};

use crate::error::FrameError;

/// Capacity of an assembled frame, in bytes.
pub const FRAME_CAPACITY: usize = 100;

// ───────────────────────────────────────────────────────────────
// SensorSample
// ───────────────────────────────────────────────────────────────

/// One reading from a sensor producer. Each message carries exactly one
/// channel: a climate pair, or a light level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SensorSample {
    Climate { temperature_c: f32, humidity_pct: f32 },
    Light(u16),
}

impl SensorSample {
    pub fn temperature(&self) -> Option<f32> {
        match self {
            Self::Climate { temperature_c, .. } => Some(*temperature_c),
            Self::Light(_) => None,
        }
    }

    pub fn humidity(&self) -> Option<f32> {
        match self {
            Self::Climate { humidity_pct, .. } => Some(*humidity_pct),
            Self::Light(_) => None,
        }
    }

    pub fn light(&self) -> Option<u16> {
        match self {
            Self::Light(level) => Some(*level),
            Self::Climate { .. } => None,
        }
    }
}

// ───────────────────────────────────────────────────────────────
// TimeSample
// ───────────────────────────────────────────────────────────────

/// Calendar date and wall-clock time as read from the RTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeSample {
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
    pub day: u8,
    pub month: u8,
    pub year: u16,
}

impl TimeSample {
    /// Whether every field names a real calendar instant.
    pub fn is_valid(&self) -> bool {
        self.hour < 24
            && self.minute < 60
            && self.second < 60
            && (1..=12).contains(&self.month)
            && self.day >= 1
            && self.day <= days_in_month(self.year, self.month)
    }

    /// Convert seconds since the Unix epoch (UTC) to a calendar time.
    pub fn from_unix_secs(secs: u64) -> Self {
        let days = (secs / 86_400) as i64;
        let rem = secs % 86_400;

        // Civil-from-days (Howard Hinnant), shifted so March is month 0.
        let z = days + 719_468;
        let era = z.div_euclid(146_097);
        let doe = z - era * 146_097;
        let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
        let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
        let mp = (5 * doy + 2) / 153;
        let day = (doy - (153 * mp + 2) / 5 + 1) as u8;
        let month = (if mp < 10 { mp + 3 } else { mp - 9 }) as u8;
        let year = (yoe + era * 400 + i64::from(month <= 2)) as u16;

        Self {
            hour: (rem / 3600) as u8,
            minute: ((rem % 3600) / 60) as u8,
            second: (rem % 60) as u8,
            day,
            month,
            year,
        }
    }
}

fn days_in_month(year: u16, month: u8) -> u8 {
    match month {
        4 | 6 | 9 | 11 => 30,
        2 if (year % 4 == 0 && year % 100 != 0) || year % 400 == 0 => 29,
        2 => 28,
        _ => 31,
    }
}

// ───────────────────────────────────────────────────────────────
// Frame
// ───────────────────────────────────────────────────────────────

/// A formatted snapshot line:
/// `DD/MM/YYYY HH:MM:SS, Temp: X.XX C, Hum: XX.XX%, Luz: N`.
///
/// The punctuation and field widths are parsed by tools on the other end
/// of the serial link; do not change them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame(heapless::String<FRAME_CAPACITY>);

impl Frame {
    /// Assemble a frame. Unknown values render as `--`.
    pub fn compose(
        time: &TimeSample,
        temperature_c: Option<f32>,
        humidity_pct: Option<f32>,
        light: Option<u16>,
    ) -> Result<Self, FrameError> {
        let mut buf = heapless::String::new();
        write!(
            buf,
            "{:02}/{:02}/{:04} {:02}:{:02}:{:02}, Temp: {} C, Hum: {}%, Luz: {}",
            time.day,
            time.month,
            time.year,
            time.hour,
            time.minute,
            time.second,
            Fixed2(temperature_c),
            Fixed2(humidity_pct),
            Known(light),
        )
        .map_err(|_| FrameError::Overflow)?;
        Ok(Self(buf))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Two-decimal rendering of an optional reading.
struct Fixed2(Option<f32>);

impl fmt::Display for Fixed2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(v) => write!(f, "{v:.2}"),
            None => f.write_str("--"),
        }
    }
}

struct Known(Option<u16>);

impl fmt::Display for Known {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(v) => write!(f, "{v}"),
            None => f.write_str("--"),
        }
    }
}
