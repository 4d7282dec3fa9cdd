//! Transport-safe token encoding
//!
//! Raw terminal bytes (control characters, escape sequences, arbitrary
//! binary output) travel as standard padded base64 text. Decoding is strict:
//! anything `encode` could not have produced is rejected.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::error::ProtocolError;

/// Encode raw bytes into their transport text form
pub fn encode(raw: &[u8]) -> String {
    STANDARD.encode(raw)
}

/// Decode transport text back into raw bytes
pub fn decode(text: impl AsRef<[u8]>) -> Result<Vec<u8>, ProtocolError> {
    Ok(STANDARD.decode(text)?)
}
