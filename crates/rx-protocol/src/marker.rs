//! Exit marker extraction
//!
//! The remote wrapper script ends with `echo $?`, so the last non-empty line
//! of decoded output at normal stream close is the command's exit status.
//! Only the last non-empty line is ever needed, so the scanner keeps the
//! line in progress plus the most recent completed non-blank line instead of
//! the whole output.

use crate::error::ProtocolError;

/// Tracks the trailing non-empty line of a decoded output stream
#[derive(Debug, Default)]
pub struct ExitMarkerScanner {
    /// Bytes after the most recent newline
    current: Vec<u8>,
    /// Most recent completed line that was not blank
    last_line: Vec<u8>,
}

impl ExitMarkerScanner {
    /// Create an empty scanner
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the next chunk of decoded output
    pub fn feed(&mut self, chunk: &[u8]) {
        let mut rest = chunk;
        while let Some(pos) = rest.iter().position(|&b| b == b'\n') {
            self.current.extend_from_slice(&rest[..pos]);
            self.finish_line();
            rest = &rest[pos + 1..];
        }
        self.current.extend_from_slice(rest);
    }

    fn finish_line(&mut self) {
        if !is_blank(&self.current) {
            std::mem::swap(&mut self.last_line, &mut self.current);
        }
        self.current.clear();
    }

    /// The last non-empty line seen so far (without its line terminator)
    pub fn last_line(&self) -> &[u8] {
        if is_blank(&self.current) {
            &self.last_line
        } else {
            &self.current
        }
    }

    /// Parse the last non-empty line as the remote exit status
    ///
    /// A shell's `$?` is always in `0..=255`; a negative or larger number is
    /// not an exit status and is rejected like any other malformed line.
    pub fn exit_status(&self) -> Result<u8, ProtocolError> {
        let line = String::from_utf8_lossy(self.last_line());
        let line = line.trim();
        line.parse::<u8>().map_err(|_| ProtocolError::ExitMarker {
            line: line.to_string(),
        })
    }
}

fn is_blank(line: &[u8]) -> bool {
    line.iter().all(u8::is_ascii_whitespace)
}
