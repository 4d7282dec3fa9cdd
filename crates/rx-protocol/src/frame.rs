//! Stream frames
//!
//! A frame is one message on the duplex stream. Its payload is always the
//! encoded text form of some raw bytes, never the raw bytes themselves.

use bytes::Bytes;

use crate::codec;
use crate::error::ProtocolError;

/// A single encoded message exchanged with the remote process
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    payload: Bytes,
}

impl Frame {
    /// Wrap an already-encoded payload as received from the stream
    pub fn new(payload: impl Into<Bytes>) -> Self {
        Self {
            payload: payload.into(),
        }
    }

    /// Build a frame carrying the given raw bytes
    pub fn encode(raw: &[u8]) -> Self {
        Self::new(codec::encode(raw))
    }

    /// Recover the raw bytes carried by this frame
    pub fn decode(&self) -> Result<Vec<u8>, ProtocolError> {
        codec::decode(&self.payload)
    }

    /// Encoded payload
    pub fn payload(&self) -> &Bytes {
        &self.payload
    }

    /// Consume the frame, returning the encoded payload
    pub fn into_payload(self) -> Bytes {
        self.payload
    }

    /// Length of the encoded payload in bytes
    pub fn len(&self) -> usize {
        self.payload.len()
    }

    /// Whether the encoded payload is empty
    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }
}
