//! Wake-reason detection and deep-sleep entry.
//!
//! The node never powers down cooperatively: the supervisor hands the
//! runtime a [`SleepRequest`], the runtime drops every task and queue,
//! and [`PowerPort::enter_deep_sleep`] arms the RTC timer and halts. The
//! next boot looks like a cold start except for the RTC-retained
//! counters (see [`crate::retained`]).
//!
//! - **`target_os = "espidf"`** — [`DeepSleep`] wraps `esp_sleep_*`.
//! - **`not(target_os = "espidf")`** — [`SimulatedPower`] records the
//!   requests so host tests can drive several boot cycles in a row.

use core::time::Duration;

use crate::app::ports::PowerPort;

/// Why the current boot happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WakeReason {
    /// Power applied, reset button, or brown-out.
    PowerOn,
    /// The deep-sleep wake timer fired.
    TimerWake,
    /// Any other wake source (not armed by this firmware).
    Other,
}

impl WakeReason {
    /// Whether RTC-retained state from the previous cycle can be trusted.
    pub fn is_warm(self) -> bool {
        self == Self::TimerWake
    }
}

/// What the supervisor asks for at the end of an awake period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SleepRequest {
    pub duration: Duration,
}

// ───────────────────────────────────────────────────────────────
// ESP-IDF deep sleep
// ───────────────────────────────────────────────────────────────

/// Deep-sleep controller for the ESP32.
#[cfg(target_os = "espidf")]
pub struct DeepSleep;

#[cfg(target_os = "espidf")]
impl PowerPort for DeepSleep {
    fn wake_reason(&self) -> WakeReason {
        use esp_idf_svc::sys::*;
        // SAFETY: read-only query of the RTC controller, valid any time.
        let cause = unsafe { esp_sleep_get_wakeup_cause() };
        #[allow(non_upper_case_globals)]
        match cause {
            esp_sleep_source_t_ESP_SLEEP_WAKEUP_TIMER => WakeReason::TimerWake,
            esp_sleep_source_t_ESP_SLEEP_WAKEUP_UNDEFINED => WakeReason::PowerOn,
            _ => WakeReason::Other,
        }
    }

    fn enter_deep_sleep(&mut self, duration: Duration) {
        use esp_idf_svc::sys::*;
        log::info!("Power: deep sleep for {}s", duration.as_secs());
        // SAFETY: all tasks have been dropped by the runtime before this
        // call; esp_deep_sleep_start() does not return.
        unsafe {
            esp_sleep_enable_timer_wakeup(duration.as_micros() as u64);
            esp_deep_sleep_start();
        }
    }
}

// ───────────────────────────────────────────────────────────────
// Host simulation
// ───────────────────────────────────────────────────────────────

/// Host stand-in for the sleep controller. Sleeps are recorded, not
/// waited out; the boot after a sleep reports a timer wake.
#[cfg(not(target_os = "espidf"))]
#[derive(Debug, Default)]
pub struct SimulatedPower {
    sleeps: Vec<Duration>,
}

#[cfg(not(target_os = "espidf"))]
impl SimulatedPower {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every sleep requested so far, oldest first.
    pub fn sleeps(&self) -> &[Duration] {
        &self.sleeps
    }
}

#[cfg(not(target_os = "espidf"))]
impl PowerPort for SimulatedPower {
    fn wake_reason(&self) -> WakeReason {
        if self.sleeps.is_empty() {
            WakeReason::PowerOn
        } else {
            WakeReason::TimerWake
        }
    }

    fn enter_deep_sleep(&mut self, duration: Duration) {
        log::info!("Power(sim): deep sleep for {}s", duration.as_secs());
        self.sleeps.push(duration);
    }
}
