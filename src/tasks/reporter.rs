//! Status reporter and alarm evaluation.
//!
//! Each cycle is two independent, best-effort receives: one sensor
//! sample, then one time sample. Either may time out without affecting
//! the other.

use core::time::Duration;

use log::debug;

use crate::app::channels::Pipeline;
use crate::app::messages::{SensorSample, TimeSample};
use crate::app::ports::ConsolePort;
use crate::config::{ms, NodeConfig};

/// Alarm predicate for one sample:
/// `(temperature > T && humidity > H) || light > L`.
///
/// Fields a sample does not carry make their clause false, so a light
/// sample can only trip the light clause and a climate sample only the
/// climate clause.
pub fn alarm_condition(sample: &SensorSample, config: &NodeConfig) -> bool {
    match *sample {
        SensorSample::Climate { temperature_c, humidity_pct } => {
            temperature_c > config.alarm_temperature_c && humidity_pct > config.alarm_humidity_pct
        }
        SensorSample::Light(level) => level > config.light_alarm_threshold,
    }
}

pub struct Reporter<'a, W> {
    pipeline: &'a Pipeline,
    console: W,
    config: NodeConfig,
    rx_timeout: Duration,
}

impl<'a, W: ConsolePort> Reporter<'a, W> {
    pub fn new(pipeline: &'a Pipeline, console: W, config: &NodeConfig) -> Self {
        Self {
            pipeline,
            console,
            config: config.clone(),
            rx_timeout: ms(config.report_rx_timeout_ms),
        }
    }

    pub async fn cycle(&mut self) {
        if let Some(sample) = self.pipeline.sensors.receive_within(self.rx_timeout).await {
            self.report_sample(&sample);
        }
        if let Some(time) = self.pipeline.clock.receive_within(self.rx_timeout).await {
            self.report_time(&time);
        }
    }

    pub async fn run(mut self) {
        loop {
            self.cycle().await;
        }
    }

    fn report_sample(&self, sample: &SensorSample) {
        match *sample {
            SensorSample::Climate { temperature_c, humidity_pct } => self.console.print(format_args!(
                "Temp: {:.2} C - Hum: {:.2}%",
                temperature_c, humidity_pct
            )),
            SensorSample::Light(level) => self.console.print(format_args!("Luz: {}", level)),
        }

        if alarm_condition(sample, &self.config) {
            debug!("Reporter: alarm condition met ({:?})", sample);
            self.pipeline.alarm.signal(());
        }
    }

    fn report_time(&self, t: &TimeSample) {
        self.console.print(format_args!(
            "Fecha: {:02}/{:02}/{:04} - Hora: {:02}:{:02}:{:02}",
            t.day, t.month, t.year, t.hour, t.minute, t.second
        ));
    }
}
