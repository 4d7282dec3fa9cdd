//! Local terminal mode handling
//!
//! Raw mode is held by a [`RawModeGuard`]: the original mode is captured on
//! acquisition and reapplied when the guard drops, whichever way the session
//! scope is left.

mod local;

pub use local::{LocalTerminal, SavedMode};

use std::io;

use rx_core::traits::TerminalControl;

/// Scoped raw mode; restores the captured mode on drop
pub struct RawModeGuard<'a, T: TerminalControl> {
    terminal: &'a mut T,
    saved: Option<T::Mode>,
}

impl<'a, T: TerminalControl> RawModeGuard<'a, T> {
    /// Enter raw mode if the terminal is interactive
    ///
    /// For non-interactive input no mode is captured or changed.
    pub fn acquire(terminal: &'a mut T) -> io::Result<Self> {
        let saved = if terminal.is_interactive() {
            Some(terminal.enter_raw()?)
        } else {
            tracing::debug!("Input is not a terminal, leaving terminal mode untouched");
            None
        };
        Ok(Self { terminal, saved })
    }

    /// Whether this guard switched the terminal to raw mode
    pub fn is_raw(&self) -> bool {
        self.saved.is_some()
    }
}

impl<T: TerminalControl> Drop for RawModeGuard<'_, T> {
    fn drop(&mut self) {
        if let Some(mode) = self.saved.take() {
            if let Err(e) = self.terminal.restore(mode) {
                tracing::warn!("Failed to restore terminal mode: {}", e);
            }
        }
    }
}
