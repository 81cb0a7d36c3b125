//! Awake-period supervisor.
//!
//! Counts the wake, reports liveness for the configured number of
//! intervals, then hands the runtime a [`SleepRequest`]. Returning is the
//! end of the boot cycle: the runtime drops every other task.

use core::time::Duration;

use log::info;

use crate::app::ports::ConsolePort;
use crate::config::{ms, NodeConfig};
use crate::power::SleepRequest;
use crate::retained::RetainedCounters;

use super::delay;

pub struct PowerCycleSupervisor<'a, W> {
    counters: &'a RetainedCounters,
    console: W,
    liveness: Duration,
    awake_intervals: u32,
    sleep: Duration,
}

impl<'a, W: ConsolePort> PowerCycleSupervisor<'a, W> {
    pub fn new(counters: &'a RetainedCounters, console: W, config: &NodeConfig) -> Self {
        Self {
            counters,
            console,
            liveness: ms(config.liveness_interval_ms),
            awake_intervals: config.awake_intervals,
            sleep: config.sleep_duration(),
        }
    }

    pub async fn run(self) -> SleepRequest {
        let wakes = self.counters.record_wake();
        self.console.print(format_args!("Reinicio número: {}", wakes));
        info!("Supervisor: boot cycle {} started", wakes);

        for _ in 0..self.awake_intervals {
            self.console.write_line("Sistema en ejecución...");
            delay(self.liveness).await;
        }

        self.console.write_line("Entrando en Deep Sleep...");
        SleepRequest { duration: self.sleep }
    }
}
