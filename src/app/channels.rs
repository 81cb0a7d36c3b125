//! Inter-task queues and the alarm signal.
//!
//! The reporter and the frame builder both drain the sensor and clock
//! queues, so an item goes to whichever consumer asks first. Those queues
//! are `async-channel` bounded MPMC channels, which park every waiting
//! receiver on its own listener. The alarm has a single waiter and uses
//! an `embassy-sync` [`Signal`].
//!
//! The whole bundle lives in a [`Pipeline`] value that the runtime builds
//! at every boot and drops at sleep entry, so nothing queued survives a
//! power cycle.
//!
//! ```text
//! ┌──────────────┐ SensorSample ┌──────────────┐
//! │ Climate/Light│─────────────▶│ Reporter     │──▶ alarm ──▶ AlarmActuator
//! │ producers    │              │ FrameBuilder │──▶ frames ─▶ FrameReporter
//! ├──────────────┤  TimeSample  │              │
//! │ Clock        │─────────────▶│              │
//! └──────────────┘              └──────────────┘
//! ```

use core::time::Duration;

use async_channel::{Receiver, Sender};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use futures_lite::future;
use log::warn;

use super::messages::{Frame, SensorSample, TimeSample};

/// Sensor queue depth (shared by the climate and light producers).
pub const SENSOR_QUEUE_DEPTH: usize = 10;

/// RTC queue depth.
pub const CLOCK_QUEUE_DEPTH: usize = 5;

/// Assembled frame queue depth.
pub const FRAME_QUEUE_DEPTH: usize = 5;

/// Bounded FIFO. Holds both ends, so it never closes while it exists.
pub struct Queue<T> {
    tx: Sender<T>,
    rx: Receiver<T>,
}

impl<T> Queue<T> {
    pub fn bounded(depth: usize) -> Self {
        let (tx, rx) = async_channel::bounded(depth);
        Self { tx, rx }
    }

    /// Enqueue, waiting while the queue is full.
    pub async fn send(&self, item: T) {
        if self.tx.send(item).await.is_err() {
            warn!("Queue: send on closed queue, item dropped");
        }
    }

    /// Enqueue without waiting. Hands the item back if the queue is full.
    pub fn try_send(&self, item: T) -> Result<(), T> {
        self.tx.try_send(item).map_err(async_channel::TrySendError::into_inner)
    }

    /// Dequeue, waiting as long as it takes.
    pub async fn receive(&self) -> T {
        match self.rx.recv().await {
            Ok(item) => item,
            Err(_) => future::pending().await,
        }
    }

    pub fn try_receive(&self) -> Option<T> {
        self.rx.try_recv().ok()
    }

    /// Dequeue, giving up after `timeout`. An empty result is a normal
    /// outcome, not an error.
    pub async fn receive_within(&self, timeout: Duration) -> Option<T> {
        future::or(async { Some(self.receive().await) }, async {
            async_io_mini::Timer::after(timeout).await;
            None
        })
        .await
    }

    pub fn len(&self) -> usize {
        self.rx.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rx.is_empty()
    }
}

pub type SensorQueue = Queue<SensorSample>;
pub type ClockQueue = Queue<TimeSample>;
pub type FrameQueue = Queue<Frame>;

/// Binary, saturating alarm notification: raising while already raised
/// leaves a single pending raise.
pub type AlarmSignal = Signal<CriticalSectionRawMutex, ()>;

/// Every queue and signal of one boot cycle.
pub struct Pipeline {
    pub sensors: SensorQueue,
    pub clock: ClockQueue,
    pub frames: FrameQueue,
    pub alarm: AlarmSignal,
}

impl Pipeline {
    pub fn new() -> Self {
        Self {
            sensors: Queue::bounded(SENSOR_QUEUE_DEPTH),
            clock: Queue::bounded(CLOCK_QUEUE_DEPTH),
            frames: Queue::bounded(FRAME_QUEUE_DEPTH),
            alarm: Signal::new(),
        }
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}
