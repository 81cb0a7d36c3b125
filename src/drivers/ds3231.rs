//! DS3231 real-time clock over I2C.
//!
//! Generic over any `embedded_hal::i2c::I2c` bus, so the same driver
//! runs on the ESP-IDF I2C master and on the mock bus in tests.
//!
//! ## Register map (subset)
//!
//! | Addr | Content                                  |
//! |------|------------------------------------------|
//! | 0x00 | seconds (BCD)                            |
//! | 0x01 | minutes (BCD)                            |
//! | 0x02 | hours (BCD, bit 6 = 12h mode)            |
//! | 0x03 | day of week 1-7                          |
//! | 0x04 | date (BCD)                               |
//! | 0x05 | month (BCD, bit 7 = century)             |
//! | 0x06 | year 00-99 (BCD)                         |
//! | 0x0F | status, bit 7 = OSF (oscillator stopped) |

use embedded_hal::i2c::I2c;
use log::warn;

use crate::app::messages::TimeSample;
use crate::app::ports::ClockPort;
use crate::error::ClockError;

pub const DS3231_ADDR: u8 = 0x68;

const REG_SECONDS: u8 = 0x00;
const REG_STATUS: u8 = 0x0F;
const STATUS_OSF: u8 = 0x80;
const CENTURY_BIT: u8 = 0x80;
const HOUR_12H: u8 = 0x40;
const HOUR_PM: u8 = 0x20;

pub struct Ds3231<I> {
    i2c: I,
}

impl<I: I2c> Ds3231<I> {
    pub fn new(i2c: I) -> Self {
        Self { i2c }
    }

    /// Check that the device acknowledges on the bus.
    pub fn begin(&mut self) -> Result<(), ClockError> {
        let mut status = [0u8; 1];
        self.i2c
            .write_read(DS3231_ADDR, &[REG_STATUS], &mut status)
            .map_err(|e| {
                warn!("DS3231: probe failed: {:?}", e);
                ClockError::NotFound
            })
    }

    /// Whether the oscillator stopped since the flag was last cleared
    /// (battery removed or flat). The stored time is meaningless then.
    pub fn lost_power(&mut self) -> Result<bool, ClockError> {
        Ok(self.read_status()? & STATUS_OSF != 0)
    }

    /// Set the clock and clear the oscillator-stop flag.
    pub fn adjust(&mut self, t: &TimeSample) -> Result<(), ClockError> {
        if !t.is_valid() || !(2000..2200).contains(&t.year) {
            return Err(ClockError::InvalidTime);
        }
        let century = if t.year >= 2100 { CENTURY_BIT } else { 0 };
        let regs = [
            REG_SECONDS,
            bin2bcd(t.second),
            bin2bcd(t.minute),
            bin2bcd(t.hour),
            weekday(t.year, t.month, t.day),
            bin2bcd(t.day),
            bin2bcd(t.month) | century,
            bin2bcd((t.year % 100) as u8),
        ];
        self.i2c.write(DS3231_ADDR, &regs).map_err(bus_error)?;

        let status = self.read_status()?;
        self.i2c
            .write(DS3231_ADDR, &[REG_STATUS, status & !STATUS_OSF])
            .map_err(bus_error)
    }

    pub fn read_time(&mut self) -> Result<TimeSample, ClockError> {
        let mut raw = [0u8; 7];
        self.i2c
            .write_read(DS3231_ADDR, &[REG_SECONDS], &mut raw)
            .map_err(bus_error)?;
        decode_time(&raw)
    }

    /// Release the bus.
    pub fn release(self) -> I {
        self.i2c
    }

    fn read_status(&mut self) -> Result<u8, ClockError> {
        let mut status = [0u8; 1];
        self.i2c
            .write_read(DS3231_ADDR, &[REG_STATUS], &mut status)
            .map_err(bus_error)?;
        Ok(status[0])
    }
}

impl<I: I2c> ClockPort for Ds3231<I> {
    fn now(&mut self) -> Result<TimeSample, ClockError> {
        self.read_time()
    }
}

fn bus_error<E: core::fmt::Debug>(e: E) -> ClockError {
    warn!("DS3231: bus error: {:?}", e);
    ClockError::Bus
}

// ── Encoding ──────────────────────────────────────────────────

fn bcd2bin(v: u8) -> u8 {
    (v >> 4) * 10 + (v & 0x0F)
}

fn bin2bcd(v: u8) -> u8 {
    ((v / 10) << 4) | (v % 10)
}

/// Day of week, 1 = Monday .. 7 = Sunday.
fn weekday(year: u16, month: u8, day: u8) -> u8 {
    const OFFSETS: [u16; 12] = [0, 3, 2, 5, 0, 3, 5, 1, 4, 6, 2, 4];
    let y = if month < 3 { year - 1 } else { year };
    let sunday_based = (y + y / 4 - y / 100 + y / 400 + OFFSETS[usize::from(month - 1)] + u16::from(day)) % 7;
    if sunday_based == 0 { 7 } else { sunday_based as u8 }
}

fn decode_time(raw: &[u8; 7]) -> Result<TimeSample, ClockError> {
    let hour = if raw[2] & HOUR_12H != 0 {
        let h12 = bcd2bin(raw[2] & 0x1F) % 12;
        if raw[2] & HOUR_PM != 0 { h12 + 12 } else { h12 }
    } else {
        bcd2bin(raw[2] & 0x3F)
    };
    let century = if raw[5] & CENTURY_BIT != 0 { 2100 } else { 2000 };

    let t = TimeSample {
        second: bcd2bin(raw[0] & 0x7F),
        minute: bcd2bin(raw[1] & 0x7F),
        hour,
        day: bcd2bin(raw[4] & 0x3F),
        month: bcd2bin(raw[5] & 0x1F),
        year: century + u16::from(bcd2bin(raw[6])),
    };
    if t.is_valid() { Ok(t) } else { Err(ClockError::InvalidTime) }
}
