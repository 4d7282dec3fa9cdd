//! Stream traits
//!
//! The bridge only ever sends on one half and receives on the other, so a
//! stream is split once into independently owned halves.

use async_trait::async_trait;

use crate::error::{ResolveError, StreamError};
use rx_protocol::Frame;

/// Outbound half of a duplex frame stream
#[async_trait]
pub trait FrameSink: Send {
    /// Send one frame to the remote process
    async fn send(&mut self, frame: Frame) -> Result<(), StreamError>;
}

/// Inbound half of a duplex frame stream
#[async_trait]
pub trait FrameSource: Send {
    /// Receive the next frame from the remote process
    ///
    /// Returns `StreamError::NormalClosure` once the peer has closed the
    /// stream normally.
    async fn recv(&mut self) -> Result<Frame, StreamError>;
}

/// A duplex stream to the container's attached process
pub trait FrameStream: Send {
    /// Outbound half
    type Sink: FrameSink + 'static;
    /// Inbound half
    type Source: FrameSource + 'static;

    /// Split into independently owned halves
    fn split(self) -> (Self::Sink, Self::Source);
}

/// Locates a container and opens a stream to a command running inside it
#[async_trait]
pub trait StreamResolver: Send + Sync {
    /// The stream type produced
    type Stream: FrameStream;

    /// Resolve `query` to a single container, obtain an execution grant for
    /// `command` and open the stream
    async fn resolve(&self, query: &str, command: &str) -> Result<Self::Stream, ResolveError>;
}
