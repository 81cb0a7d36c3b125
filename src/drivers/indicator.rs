//! Alarm LED on a plain GPIO output.

use core::convert::Infallible;

use embedded_hal::digital::{ErrorType, OutputPin};

use crate::drivers::hw_init;

pub struct GpioIndicator {
    gpio: i32,
    high: bool,
}

impl GpioIndicator {
    /// Takes over an output configured by `hw_init` and drives it low.
    pub fn new(gpio: i32) -> Self {
        hw_init::gpio_write(gpio, false);
        Self { gpio, high: false }
    }

    pub fn is_high(&self) -> bool {
        self.high
    }
}

impl ErrorType for GpioIndicator {
    type Error = Infallible;
}

impl OutputPin for GpioIndicator {
    fn set_low(&mut self) -> Result<(), Infallible> {
        hw_init::gpio_write(self.gpio, false);
        self.high = false;
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        hw_init::gpio_write(self.gpio, true);
        self.high = true;
        Ok(())
    }
}
