//! Sensor, clock, and indicator drivers, plus one-shot peripheral setup.

pub mod button;
pub mod dht11;
pub mod ds3231;
pub mod hw_init;
pub mod indicator;
pub mod light;
