//! Alarm indicator pulse.
//!
//! Runs on the elevated tier: when the reporter raises the alarm signal
//! this task drives the indicator high for the hold time and low again.
//! Raises that arrive during a pulse collapse into one pending raise.

use core::time::Duration;

use embedded_hal::digital::OutputPin;
use log::warn;

use crate::app::channels::AlarmSignal;
use crate::config::{ms, NodeConfig};

use super::delay;

pub struct AlarmActuator<'a, P> {
    signal: &'a AlarmSignal,
    indicator: P,
    hold: Duration,
}

impl<'a, P: OutputPin> AlarmActuator<'a, P> {
    pub fn new(signal: &'a AlarmSignal, indicator: P, config: &NodeConfig) -> Self {
        Self {
            signal,
            indicator,
            hold: ms(config.alarm_hold_ms),
        }
    }

    /// Wait for one raise, then pulse.
    pub async fn cycle(&mut self) {
        self.signal.wait().await;
        self.pulse().await;
    }

    pub async fn run(mut self) {
        loop {
            self.cycle().await;
        }
    }

    async fn pulse(&mut self) {
        if let Err(e) = self.indicator.set_high() {
            warn!("Alarm: indicator set_high failed: {:?}", e);
        }
        delay(self.hold).await;
        if let Err(e) = self.indicator.set_low() {
            warn!("Alarm: indicator set_low failed: {:?}", e);
        }
    }

    /// The indicator, for inspection once the task is stopped.
    pub fn into_indicator(self) -> P {
        self.indicator
    }
}
