//! Wall-clock producer.

use core::time::Duration;

use log::warn;

use crate::app::channels::ClockQueue;
use crate::app::ports::ClockPort;
use crate::config::{ms, NodeConfig};

use super::delay;

pub struct ClockProducer<'a, K> {
    clock: K,
    queue: &'a ClockQueue,
    period: Duration,
}

impl<'a, K: ClockPort> ClockProducer<'a, K> {
    pub fn new(clock: K, queue: &'a ClockQueue, config: &NodeConfig) -> Self {
        Self {
            clock,
            queue,
            period: ms(config.clock_interval_ms),
        }
    }

    /// Read the clock and queue the result. A bus error mid-cycle skips
    /// one sample; the device was already probed at bring-up.
    pub async fn cycle(&mut self) {
        match self.clock.now() {
            Ok(t) => self.queue.send(t).await,
            Err(e) => warn!("Clock: read failed ({}), sample skipped", e),
        }
    }

    pub async fn run(mut self) {
        loop {
            self.cycle().await;
            delay(self.period).await;
        }
    }
}
