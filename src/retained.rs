//! Counters that survive deep sleep.
//!
//! On the ESP32 the [`RETAINED`] block is linked into RTC slow memory,
//! which stays powered during deep sleep. Everything else in RAM is lost.
//!
//! Lifecycle:
//! 1. **Cold boot** — [`RetainedCounters::restore`] sees a non-timer wake
//!    (or a bad magic word) and zeroes both counters.
//! 2. **Warm boot** — after a timer wake with a valid magic word the
//!    counters are left exactly as the previous cycle wrote them.
//!
//! The press count is bumped from the button ISR, so every access is an
//! atomic operation: no lock, no allocation, no I/O.

use core::sync::atomic::{AtomicU32, Ordering};

use crate::power::WakeReason;

/// Marks the block as written by this firmware.
const RETAINED_MAGIC: u32 = 0x454E_5644;

/// Press and wake counters, retained across deep sleep.
pub struct RetainedCounters {
    magic: AtomicU32,
    presses: AtomicU32,
    wakes: AtomicU32,
}

/// The node's retained block.
#[cfg_attr(target_os = "espidf", unsafe(link_section = ".rtc.data"))]
pub static RETAINED: RetainedCounters = RetainedCounters::new();

impl RetainedCounters {
    pub const fn new() -> Self {
        Self {
            magic: AtomicU32::new(0),
            presses: AtomicU32::new(0),
            wakes: AtomicU32::new(0),
        }
    }

    /// Load-or-default. Returns `true` if the previous values were kept.
    /// Call once per boot, before the button ISR is armed.
    pub fn restore(&self, reason: WakeReason) -> bool {
        if reason.is_warm() && self.magic.load(Ordering::Acquire) == RETAINED_MAGIC {
            return true;
        }
        self.presses.store(0, Ordering::Relaxed);
        self.wakes.store(0, Ordering::Relaxed);
        self.magic.store(RETAINED_MAGIC, Ordering::Release);
        false
    }

    /// Button edge handler. Counts one press when both inputs read
    /// asserted at the same time. ISR safe.
    pub fn on_button_edge(&self, a_asserted: bool, b_asserted: bool) -> bool {
        if a_asserted && b_asserted {
            self.presses.fetch_add(1, Ordering::AcqRel);
            true
        } else {
            false
        }
    }

    pub fn press_count(&self) -> u32 {
        self.presses.load(Ordering::Acquire)
    }

    /// Count one more supervisor start and return the new total.
    pub fn record_wake(&self) -> u32 {
        self.wakes.fetch_add(1, Ordering::AcqRel).wrapping_add(1)
    }

    pub fn wake_count(&self) -> u32 {
        self.wakes.load(Ordering::Acquire)
    }
}

impl Default for RetainedCounters {
    fn default() -> Self {
        Self::new()
    }
}
