//! Boot-cycle runtime.
//!
//! One call to [`run_boot_cycle`] is one awake period of the node:
//!
//! ```text
//!   Pipeline::new()            fresh queues + alarm signal
//!   spawn TASK_TABLE           elevated tier / baseline tier
//!   or(elevated, baseline)     until the supervisor returns
//!   drop executors + Pipeline  every task and queued item is gone
//!   ─▶ SleepRequest            caller hands it to the PowerPort
//! ```
//!
//! Priority is cooperative. Both tiers share one thread, and
//! `futures_lite::future::or` polls its first argument first on every
//! wake, so a ready actuator always runs before any baseline task.

use core::future::Future;

use edge_executor::LocalExecutor;
use embedded_hal::digital::OutputPin;
use embedded_hal::i2c::I2c;
use futures_lite::future;
use log::{debug, info, warn};

use crate::app::channels::Pipeline;
use crate::app::messages::TimeSample;
use crate::app::ports::{ClimatePort, ClockPort, ConsolePort, LightPort};
use crate::config::NodeConfig;
use crate::drivers::ds3231::Ds3231;
use crate::error::Result;
use crate::power::SleepRequest;
use crate::retained::RetainedCounters;
use crate::tasks::{
    AlarmActuator, ClimateProducer, ClockProducer, FrameBuilder, FrameReporter, LightProducer,
    PowerCycleSupervisor, PressReporter, Reporter,
};

// ───────────────────────────────────────────────────────────────
// Task table
// ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskTier {
    /// Preempts everything else when ready.
    Elevated,
    Baseline,
}

#[derive(Debug, Clone, Copy)]
pub struct TaskSpec {
    pub name: &'static str,
    pub tier: TaskTier,
}

const fn task(name: &'static str, tier: TaskTier) -> TaskSpec {
    TaskSpec { name, tier }
}

/// Every task of a boot cycle and the tier it runs on.
pub const TASK_TABLE: [TaskSpec; 9] = [
    task("climate", TaskTier::Baseline),
    task("light", TaskTier::Baseline),
    task("clock", TaskTier::Baseline),
    task("reporter", TaskTier::Baseline),
    task("alarm", TaskTier::Elevated),
    task("frame-builder", TaskTier::Baseline),
    task("frame-reporter", TaskTier::Baseline),
    task("press-reporter", TaskTier::Baseline),
    task("supervisor", TaskTier::Baseline),
];

/// Tier assigned to `name` in [`TASK_TABLE`].
pub fn tier_of(name: &str) -> Option<TaskTier> {
    TASK_TABLE.iter().find(|t| t.name == name).map(|t| t.tier)
}

struct Tiers<'a> {
    elevated: LocalExecutor<'a, 4>,
    baseline: LocalExecutor<'a, 16>,
}

impl<'a> Tiers<'a> {
    fn new() -> Self {
        Self {
            elevated: LocalExecutor::new(),
            baseline: LocalExecutor::new(),
        }
    }

    fn spawn(&self, name: &'static str, fut: impl Future<Output = ()> + 'a) {
        let tier = tier_of(name).unwrap_or_else(|| {
            warn!("Runtime: '{}' missing from task table, using baseline", name);
            TaskTier::Baseline
        });
        debug!("Runtime: spawn '{}' ({:?})", name, tier);
        match tier {
            TaskTier::Elevated => self.elevated.spawn(fut).detach(),
            TaskTier::Baseline => self.baseline.spawn(fut).detach(),
        }
    }
}

// ───────────────────────────────────────────────────────────────
// Boot cycle
// ───────────────────────────────────────────────────────────────

/// Everything the pipeline needs from the board for one boot cycle.
pub struct NodeHardware<C, L, K, P, W> {
    pub climate: C,
    pub light: L,
    pub clock: K,
    pub indicator: P,
    pub console: W,
}

/// Run one awake period and return the supervisor's sleep request.
///
/// All queues and task state are created here and destroyed before the
/// function returns. Only `counters` outlives the call.
pub fn run_boot_cycle<C, L, K, P, W>(
    hw: NodeHardware<C, L, K, P, W>,
    counters: &RetainedCounters,
    config: &NodeConfig,
) -> SleepRequest
where
    C: ClimatePort,
    L: LightPort,
    K: ClockPort,
    P: OutputPin,
    W: ConsolePort,
{
    let NodeHardware { climate, light, clock, indicator, console } = hw;
    let pipeline = Pipeline::new();
    let tiers = Tiers::new();

    tiers.spawn("climate", ClimateProducer::new(climate, &pipeline.sensors, config).run());
    tiers.spawn("light", LightProducer::new(light, &pipeline.sensors, config).run());
    tiers.spawn("clock", ClockProducer::new(clock, &pipeline.clock, config).run());
    tiers.spawn("reporter", Reporter::new(&pipeline, &console, config).run());
    tiers.spawn("alarm", AlarmActuator::new(&pipeline.alarm, indicator, config).run());
    tiers.spawn("frame-builder", FrameBuilder::new(&pipeline, config).run());
    tiers.spawn("frame-reporter", FrameReporter::new(&pipeline.frames, &console, config).run());
    tiers.spawn("press-reporter", PressReporter::new(counters, &console, config).run());

    let supervisor = PowerCycleSupervisor::new(counters, &console, config);
    info!("Runtime: {} tasks started", TASK_TABLE.len());

    let request = future::block_on(future::or(
        tiers.elevated.run(future::pending::<SleepRequest>()),
        tiers.baseline.run(supervisor.run()),
    ));

    drop(tiers);
    info!("Runtime: tasks stopped, sleep {}s requested", request.duration.as_secs());
    request
}

// ───────────────────────────────────────────────────────────────
// RTC bring-up
// ───────────────────────────────────────────────────────────────

/// Firmware build time, stamped by `build.rs`.
pub fn build_time() -> TimeSample {
    let secs = env!("ENVNODE_BUILD_EPOCH").parse::<u64>().unwrap_or(0);
    TimeSample::from_unix_secs(secs)
}

/// Probe the RTC and reset it to `fallback` if it lost power.
///
/// Only a missing RTC is an error; the caller halts on it. A status read
/// or adjust that fails on a present RTC is logged and the node carries
/// on with whatever time the RTC holds.
pub fn bring_up_clock<I: I2c, W: ConsolePort>(
    rtc: &mut Ds3231<I>,
    console: &W,
    fallback: &TimeSample,
) -> Result<()> {
    if let Err(e) = rtc.begin() {
        console.write_line("No se encontró RTC");
        return Err(e.into());
    }
    match rtc.lost_power() {
        Ok(false) => {}
        Ok(true) => {
            console.write_line("RTC perdió la hora, estableciendo nueva hora...");
            match rtc.adjust(fallback) {
                Ok(()) => info!("RTC: set to build time {:?}", fallback),
                Err(e) => warn!("RTC: adjust to {:?} failed ({}), time left as is", fallback, e),
            }
        }
        Err(e) => warn!("RTC: status read failed ({}), assuming time is valid", e),
    }
    Ok(())
}
