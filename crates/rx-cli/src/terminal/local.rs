//! Controller for the process's own standard input terminal

use std::io::{self, IsTerminal};

use rx_core::traits::TerminalControl;
use rx_core::TerminalSize;

/// The local terminal attached to standard input
pub struct LocalTerminal {
    interactive: bool,
}

impl LocalTerminal {
    /// Controller for standard input
    pub fn stdin() -> Self {
        Self {
            interactive: io::stdin().is_terminal(),
        }
    }

    /// Current window size, when standard input is interactive
    pub fn size(&self) -> Option<TerminalSize> {
        if !self.interactive {
            return None;
        }
        crossterm::terminal::size()
            .ok()
            .map(|(cols, rows)| TerminalSize::new(rows, cols))
    }
}

/// Terminal attributes captured before entering raw mode
#[cfg(unix)]
pub struct SavedMode(libc::termios);

#[cfg(not(unix))]
pub struct SavedMode(());

#[cfg(unix)]
impl TerminalControl for LocalTerminal {
    type Mode = SavedMode;

    fn is_interactive(&self) -> bool {
        self.interactive
    }

    fn enter_raw(&mut self) -> io::Result<SavedMode> {
        let fd = libc::STDIN_FILENO;
        // SAFETY: termios is plain data and tcgetattr fully initialises it on success
        let mut original: libc::termios = unsafe { std::mem::zeroed() };
        if unsafe { libc::tcgetattr(fd, &mut original) } != 0 {
            return Err(io::Error::last_os_error());
        }

        let mut raw = original;
        unsafe { libc::cfmakeraw(&mut raw) };
        if unsafe { libc::tcsetattr(fd, libc::TCSANOW, &raw) } != 0 {
            return Err(io::Error::last_os_error());
        }

        tracing::debug!("Terminal switched to raw mode");
        Ok(SavedMode(original))
    }

    fn restore(&mut self, mode: SavedMode) -> io::Result<()> {
        if unsafe { libc::tcsetattr(libc::STDIN_FILENO, libc::TCSANOW, &mode.0) } != 0 {
            return Err(io::Error::last_os_error());
        }
        tracing::debug!("Terminal mode restored");
        Ok(())
    }
}

#[cfg(not(unix))]
impl TerminalControl for LocalTerminal {
    type Mode = SavedMode;

    fn is_interactive(&self) -> bool {
        self.interactive
    }

    fn enter_raw(&mut self) -> io::Result<SavedMode> {
        crossterm::terminal::enable_raw_mode()?;
        Ok(SavedMode(()))
    }

    fn restore(&mut self, _mode: SavedMode) -> io::Result<()> {
        crossterm::terminal::disable_raw_mode()
    }
}
