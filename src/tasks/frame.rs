//! Frame assembly and frame printing.
//!
//! The builder keeps the most recent value of every field it has seen
//! and emits one frame each time a time sample arrives. The reporter
//! prints frames verbatim, at its own pace.

use core::time::Duration;

use log::warn;

use crate::app::channels::{FrameQueue, Pipeline};
use crate::app::messages::{Frame, SensorSample, TimeSample};
use crate::app::ports::ConsolePort;
use crate::config::{ms, LightRetention, NodeConfig};
use crate::error::FrameError;

use super::delay;

// ───────────────────────────────────────────────────────────────
// Builder state
// ───────────────────────────────────────────────────────────────

/// Field values carried between frames. `None` until a sample has
/// supplied the field.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameState {
    pub temperature_c: Option<f32>,
    pub humidity_pct: Option<f32>,
    pub light: Option<u16>,
}

impl FrameState {
    /// Merge one sample into the state.
    pub fn absorb(&mut self, sample: &SensorSample, retention: LightRetention) {
        match *sample {
            SensorSample::Climate { temperature_c, humidity_pct } => {
                self.temperature_c = Some(temperature_c);
                self.humidity_pct = Some(humidity_pct);
                if retention == LightRetention::LastMessage {
                    self.light = None;
                }
            }
            SensorSample::Light(level) => self.light = Some(level),
        }
    }

    pub fn compose(&self, time: &TimeSample) -> Result<Frame, FrameError> {
        Frame::compose(time, self.temperature_c, self.humidity_pct, self.light)
    }
}

// ───────────────────────────────────────────────────────────────
// FrameBuilder
// ───────────────────────────────────────────────────────────────

pub struct FrameBuilder<'a> {
    pipeline: &'a Pipeline,
    state: FrameState,
    retention: LightRetention,
    rx_timeout: Duration,
    period: Duration,
}

impl<'a> FrameBuilder<'a> {
    pub fn new(pipeline: &'a Pipeline, config: &NodeConfig) -> Self {
        Self {
            pipeline,
            state: FrameState::default(),
            retention: config.light_retention,
            rx_timeout: ms(config.frame_rx_timeout_ms),
            period: ms(config.frame_period_ms),
        }
    }

    pub fn state(&self) -> &FrameState {
        &self.state
    }

    /// One receive/compose step, without the trailing period.
    pub async fn cycle(&mut self) {
        if let Some(sample) = self.pipeline.sensors.receive_within(self.rx_timeout).await {
            self.state.absorb(&sample, self.retention);
        }
        let Some(time) = self.pipeline.clock.receive_within(self.rx_timeout).await else {
            return;
        };
        match self.state.compose(&time) {
            Ok(frame) => self.pipeline.frames.send(frame).await,
            Err(e) => warn!("FrameBuilder: frame dropped ({})", e),
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
// FrameReporter
// ───────────────────────────────────────────────────────────────

pub struct FrameReporter<'a, W> {
    frames: &'a FrameQueue,
    console: W,
    period: Duration,
}

impl<'a, W: ConsolePort> FrameReporter<'a, W> {
    pub fn new(frames: &'a FrameQueue, console: W, config: &NodeConfig) -> Self {
        Self {
            frames,
            console,
            period: ms(config.frame_report_period_ms),
        }
    }

    /// Wait for a frame and print it.
    pub async fn cycle(&mut self) {
        let frame = self.frames.receive().await;
        self.console.write_line(frame.as_str());
    }

    pub async fn run(mut self) {
        loop {
            self.cycle().await;
            delay(self.period).await;
        }
    }
}
