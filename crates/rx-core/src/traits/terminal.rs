//! Local terminal mode control

use std::io;

/// Switches the local terminal between its original and raw modes
pub trait TerminalControl {
    /// Saved terminal attributes, owned by whoever entered raw mode
    type Mode: Send;

    /// Whether standard input is an interactive terminal
    fn is_interactive(&self) -> bool;

    /// Capture the current mode, then disable line buffering, echo and
    /// signal-generating characters
    fn enter_raw(&mut self) -> io::Result<Self::Mode>;

    /// Reapply a previously captured mode
    fn restore(&mut self, mode: Self::Mode) -> io::Result<()>;
}
