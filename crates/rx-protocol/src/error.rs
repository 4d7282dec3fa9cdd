//! Protocol error types

use thiserror::Error;

/// Errors that can occur while interpreting stream contents
#[derive(Error, Debug)]
pub enum ProtocolError {
    /// Frame payload is not valid base64
    #[error("Invalid frame encoding: {0}")]
    Encoding(#[from] base64::DecodeError),

    /// Stream closed without a parseable exit status line
    #[error("No exit status in trailing output (last line: {line:?})")]
    ExitMarker { line: String },
}
