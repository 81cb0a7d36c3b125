//! Serial console adapter.
//!
//! Implements [`ConsolePort`] by writing each status line to stdout,
//! which ESP-IDF routes to UART0. Diagnostic logging goes through `log`
//! and is not mixed into these lines.

use std::io::Write;

use crate::app::ports::ConsolePort;

/// Adapter that prints every status line on the serial console.
#[derive(Debug, Default, Clone, Copy)]
pub struct SerialConsole;

impl SerialConsole {
    pub fn new() -> Self {
        Self
    }
}

impl ConsolePort for SerialConsole {
    fn write_line(&self, line: &str) {
        let mut out = std::io::stdout().lock();
        // Console output is fire-and-forget; a failed UART write is dropped.
        let _ = writeln!(out, "{}", line);
    }
}
