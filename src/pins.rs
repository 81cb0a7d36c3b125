//! GPIO / peripheral pin assignments for the EnvNode board.
//!
//! Single source of truth — every driver references this module rather than
//! hard-coding pin numbers.

// ---------------------------------------------------------------------------
// Sensors
// ---------------------------------------------------------------------------

/// DHT11 single-wire data line.
pub const DHT_GPIO: i32 = 4;

/// LDR voltage divider on ADC1 channel 6 (GPIO 34 on the ESP32).
pub const LDR_ADC_CHANNEL: u32 = 6;

// ---------------------------------------------------------------------------
// RTC (DS3231 on I²C0)
// ---------------------------------------------------------------------------

// SDA 21 / SCL 22 are taken as typed pins from `Peripherals` in `main()`.

/// Standard-mode bus clock.
pub const I2C_FREQ_HZ: u32 = 100_000;

// ---------------------------------------------------------------------------
// Alarm indicator
// ---------------------------------------------------------------------------

/// Alarm LED, active HIGH.
pub const LED_GPIO: i32 = 5;

// ---------------------------------------------------------------------------
// Press-counter buttons (active-low with internal pull-ups)
// ---------------------------------------------------------------------------

pub const BUTTON_A_GPIO: i32 = 18;
pub const BUTTON_B_GPIO: i32 = 19;
