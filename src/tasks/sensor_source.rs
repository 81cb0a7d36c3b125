//! Climate and light sample producers.
//!
//! Both feed the shared sensor queue. A full queue suspends the producer
//! until a consumer makes room; nothing is dropped.

use core::time::Duration;

use log::error;

use crate::app::channels::SensorQueue;
use crate::app::messages::SensorSample;
use crate::app::ports::{ClimatePort, LightPort};
use crate::config::{ms, NodeConfig};

use super::delay;

// ───────────────────────────────────────────────────────────────
// Climate (temperature + humidity)
// ───────────────────────────────────────────────────────────────

pub struct ClimateProducer<'a, C> {
    sensor: C,
    queue: &'a SensorQueue,
    period: Duration,
}

impl<'a, C: ClimatePort> ClimateProducer<'a, C> {
    pub fn new(sensor: C, queue: &'a SensorQueue, config: &NodeConfig) -> Self {
        Self {
            sensor,
            queue,
            period: ms(config.climate_interval_ms),
        }
    }

    /// Read the sensor once. Failed or NaN reads are logged and yield
    /// nothing.
    pub fn sample(&mut self) -> Option<SensorSample> {
        match self.sensor.read() {
            Ok(r) if r.temperature_c.is_nan() || r.humidity_pct.is_nan() => {
                error!("Climate: sensor returned NaN, sample skipped");
                None
            }
            Ok(r) => Some(SensorSample::Climate {
                temperature_c: r.temperature_c,
                humidity_pct: r.humidity_pct,
            }),
            Err(e) => {
                error!("Climate: read failed ({}), sample skipped", e);
                None
            }
        }
    }

    pub async fn cycle(&mut self) {
        if let Some(sample) = self.sample() {
            self.queue.send(sample).await;
        }
    }

    pub async fn run(mut self) {
        loop {
            self.cycle().await;
            delay(self.period).await;
        }
    }
}

// ───────────────────────────────────────────────────────────────
// Light
// ───────────────────────────────────────────────────────────────

pub struct LightProducer<'a, L> {
    sensor: L,
    queue: &'a SensorQueue,
    period: Duration,
}

impl<'a, L: LightPort> LightProducer<'a, L> {
    pub fn new(sensor: L, queue: &'a SensorQueue, config: &NodeConfig) -> Self {
        Self {
            sensor,
            queue,
            period: ms(config.light_interval_ms),
        }
    }

    pub async fn cycle(&mut self) {
        let level = self.sensor.read();
        self.queue.send(SensorSample::Light(level)).await;
    }

    pub async fn run(mut self) {
        loop {
            self.cycle().await;
            delay(self.period).await;
        }
    }
}
