//! Adapters — concrete implementations of the port traits.
//!
//! | Adapter   | Implements  | Connects to           |
//! |-----------|-------------|-----------------------|
//! | `console` | ConsolePort | UART0 via stdout      |
//!
//! Sensor, clock, and indicator ports are implemented directly by the
//! drivers in [`crate::drivers`]; the power port by [`crate::power`].

pub mod console;
