//! Periodic press-count report.

use core::time::Duration;

use crate::app::ports::ConsolePort;
use crate::config::{ms, NodeConfig};
use crate::retained::RetainedCounters;

use super::delay;

pub struct PressReporter<'a, W> {
    counters: &'a RetainedCounters,
    console: W,
    period: Duration,
}

impl<'a, W: ConsolePort> PressReporter<'a, W> {
    pub fn new(counters: &'a RetainedCounters, console: W, config: &NodeConfig) -> Self {
        Self {
            counters,
            console,
            period: ms(config.press_report_interval_ms),
        }
    }

    pub fn cycle(&self) {
        self.console
            .print(format_args!("Contador: {}", self.counters.press_count()));
    }

    pub async fn run(self) {
        loop {
            self.cycle();
            delay(self.period).await;
        }
    }
}
