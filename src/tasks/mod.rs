//! The node's concurrent tasks.
//!
//! Every task is a plain struct holding its ports and queue references.
//! `cycle()` runs exactly one iteration of the task body so tests can step
//! it; `run()` is the endless loop the runtime spawns.
//!
//! | Task            | Consumes             | Produces           | Tier     |
//! |-----------------|----------------------|--------------------|----------|
//! | ClimateProducer | ClimatePort          | sensor queue       | baseline |
//! | LightProducer   | LightPort            | sensor queue       | baseline |
//! | ClockProducer   | ClockPort            | clock queue        | baseline |
//! | Reporter        | sensor + clock queue | console, alarm     | baseline |
//! | AlarmActuator   | alarm signal         | indicator pin      | elevated |
//! | FrameBuilder    | sensor + clock queue | frame queue        | baseline |
//! | FrameReporter   | frame queue          | console            | baseline |
//! | PressReporter   | retained counters    | console            | baseline |
//! | Supervisor      | retained counters    | console, sleep     | baseline |

use core::time::Duration;

pub mod alarm;
pub mod clock_source;
pub mod frame;
pub mod press;
pub mod reporter;
pub mod sensor_source;
pub mod supervisor;

pub use alarm::AlarmActuator;
pub use clock_source::ClockProducer;
pub use frame::{FrameBuilder, FrameReporter, FrameState};
pub use press::PressReporter;
pub use reporter::{alarm_condition, Reporter};
pub use sensor_source::{ClimateProducer, LightProducer};
pub use supervisor::PowerCycleSupervisor;

/// Suspend the calling task.
pub(crate) async fn delay(period: Duration) {
    async_io_mini::Timer::after(period).await;
}
