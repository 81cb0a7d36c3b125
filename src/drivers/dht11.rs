//! DHT11 single-wire temperature/humidity sensor.
//!
//! ## Protocol
//!
//! Host pulls the line low for at least 18 ms, releases it, and the
//! sensor answers with an 80 us low / 80 us high preamble followed by 40
//! data bits. Each bit is a ~50 us low followed by a high whose length
//! encodes the value (~27 us = 0, ~70 us = 1).
//!
//! | Byte | Content                       |
//! |------|-------------------------------|
//! | 0    | humidity, integer part        |
//! | 1    | humidity, tenths              |
//! | 2    | temperature, integer part     |
//! | 3    | temperature, tenths (bit 7 = negative) |
//! | 4    | checksum: sum of bytes 0-3    |
//!
//! The bit-banged read only exists on ESP-IDF; [`decode`] is target
//! independent.

use crate::app::ports::ClimateReading;
use crate::error::SensorError;

pub const DHT_FRAME_LEN: usize = 5;

/// Turn a raw 5-byte frame into a reading.
pub fn decode(data: &[u8; DHT_FRAME_LEN]) -> Result<ClimateReading, SensorError> {
    let sum = data[..4].iter().fold(0u8, |acc, b| acc.wrapping_add(*b));
    if sum != data[4] {
        return Err(SensorError::Checksum);
    }

    let humidity_pct = f32::from(data[0]) + f32::from(data[1]) * 0.1;
    let mut temperature_c = f32::from(data[2]) + f32::from(data[3] & 0x7F) * 0.1;
    if data[3] & 0x80 != 0 {
        temperature_c = -temperature_c;
    }
    if humidity_pct > 100.0 {
        return Err(SensorError::InvalidReading);
    }

    Ok(ClimateReading { temperature_c, humidity_pct })
}

#[cfg(target_os = "espidf")]
pub use device::Dht11;

#[cfg(target_os = "espidf")]
mod device {
    use esp_idf_svc::sys::*;

    use super::{decode, DHT_FRAME_LEN};
    use crate::app::ports::{ClimatePort, ClimateReading};
    use crate::error::SensorError;

    pub struct Dht11 {
        pin: i32,
    }

    impl Dht11 {
        pub fn new(pin: i32) -> Self {
            Self { pin }
        }

        /// Microseconds spent at `level`, or `None` past `max_us`.
        fn wait_while(&self, level: i32, max_us: u32) -> Option<u32> {
            let mut us = 0;
            // SAFETY: level read on a pin this driver owns.
            while unsafe { gpio_get_level(self.pin) } == level {
                us += 1;
                if us > max_us {
                    return None;
                }
                unsafe { esp_rom_delay_us(1) };
            }
            Some(us)
        }

        fn read_frame(&self) -> Result<[u8; DHT_FRAME_LEN], SensorError> {
            let mut data = [0u8; DHT_FRAME_LEN];

            // SAFETY: the pin is only driven from this task; switching
            // direction and level is a register write.
            unsafe {
                gpio_set_direction(self.pin, gpio_mode_t_GPIO_MODE_OUTPUT);
                gpio_set_level(self.pin, 0);
                esp_rom_delay_us(20_000);
                gpio_set_level(self.pin, 1);
                esp_rom_delay_us(30);
                gpio_set_direction(self.pin, gpio_mode_t_GPIO_MODE_INPUT);
            }

            self.wait_while(1, 60).ok_or(SensorError::ReadTimeout)?;
            self.wait_while(0, 90).ok_or(SensorError::ReadTimeout)?;
            self.wait_while(1, 90).ok_or(SensorError::ReadTimeout)?;

            for bit in 0..DHT_FRAME_LEN * 8 {
                self.wait_while(0, 60).ok_or(SensorError::ReadTimeout)?;
                let high_us = self.wait_while(1, 80).ok_or(SensorError::ReadTimeout)?;
                if high_us > 40 {
                    data[bit / 8] |= 0x80 >> (bit % 8);
                }
            }
            Ok(data)
        }
    }

    impl ClimatePort for Dht11 {
        fn read(&mut self) -> Result<ClimateReading, SensorError> {
            decode(&self.read_frame()?)
        }
    }
}
