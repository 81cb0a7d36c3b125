//! Two-button press input.
//!
//! ## Hardware
//!
//! Two active-low momentary switches with internal pull-ups. Both GPIOs
//! fire on the falling edge into the same ISR, which samples both levels
//! and counts a press only when the two switches are held together.
//! The count lives in [`crate::retained::RETAINED`] so it survives deep
//! sleep.

use crate::retained::RetainedCounters;

/// Edge handler body. `a_level`/`b_level` are raw GPIO levels; a switch
/// is asserted when its line reads low. ISR safe.
pub fn handle_edge(counters: &RetainedCounters, a_level: bool, b_level: bool) -> bool {
    counters.on_button_edge(!a_level, !b_level)
}

/// ISR entry point registered on both button GPIOs.
#[cfg(target_os = "espidf")]
pub fn button_isr_handler() {
    use crate::drivers::hw_init::gpio_read;
    use crate::pins;

    handle_edge(
        &crate::retained::RETAINED,
        gpio_read(pins::BUTTON_A_GPIO),
        gpio_read(pins::BUTTON_B_GPIO),
    );
}
