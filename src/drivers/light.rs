//! Photoresistor divider on an ADC1 channel.
//!
//! ## Dual-target design
//!
//! On ESP-IDF: oneshot read of the channel configured by `hw_init`.
//! On host/test: reads from a static AtomicU16 for injection.

use core::sync::atomic::AtomicU16;
#[cfg(not(target_os = "espidf"))]
use core::sync::atomic::Ordering;

use crate::app::ports::LightPort;
#[cfg(target_os = "espidf")]
use crate::drivers::hw_init;

static SIM_LIGHT_ADC: AtomicU16 = AtomicU16::new(0);

#[cfg(not(target_os = "espidf"))]
pub fn sim_set_light_adc(raw: u16) {
    SIM_LIGHT_ADC.store(raw, Ordering::Relaxed);
}

pub struct AdcLight {
    #[cfg_attr(not(target_os = "espidf"), allow(dead_code))]
    channel: u32,
}

impl AdcLight {
    pub fn new(channel: u32) -> Self {
        Self { channel }
    }
}

impl LightPort for AdcLight {
    #[cfg(target_os = "espidf")]
    fn read(&mut self) -> u16 {
        hw_init::adc1_read(self.channel)
    }

    #[cfg(not(target_os = "espidf"))]
    fn read(&mut self) -> u16 {
        SIM_LIGHT_ADC.load(Ordering::Relaxed)
    }
}
