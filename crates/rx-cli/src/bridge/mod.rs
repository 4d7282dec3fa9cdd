//! Duplex stream bridge
//!
//! Runs the two directions of an interactive session concurrently:
//!
//! - **outbound**: local input, one byte per frame, to the remote process
//! - **inbound**: remote output frames, decoded and written through to local
//!   output while the trailing line is tracked for the exit marker
//!
//! Whichever direction reaches a decisive result first resolves the session.
//! The other direction is cancelled but never awaited.

mod slot;

pub use slot::{outcome_slot, OutcomeSlot, OutcomeWaiter};

use std::io;

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio_util::sync::CancellationToken;

use rx_core::error::{SessionError, StreamError};
use rx_core::traits::{FrameSink, FrameSource, FrameStream};
use rx_core::Outcome;
use rx_protocol::{ExitMarkerScanner, Frame};

/// Bridges local input/output to a duplex frame stream
pub struct Bridge<S> {
    stream: S,
}

impl<S: FrameStream> Bridge<S> {
    /// Create a bridge over an established stream
    pub fn new(stream: S) -> Self {
        Self { stream }
    }

    /// Run both directions until the first decisive outcome
    pub async fn run<I, O>(self, input: I, output: O) -> Outcome
    where
        I: AsyncRead + Unpin + Send + 'static,
        O: AsyncWrite + Unpin + Send + 'static,
    {
        let (sink, source) = self.stream.split();
        let (slot, waiter) = outcome_slot();
        let cancel = CancellationToken::new();

        let outbound_slot = slot.clone();
        let outbound_cancel = cancel.clone();
        tokio::spawn(async move {
            tokio::select! {
                _ = outbound_cancel.cancelled() => {}
                result = forward_input(input, sink) => {
                    if let Some(outcome) = result {
                        outbound_slot.report(outcome);
                    }
                }
            }
        });

        let inbound_cancel = cancel.clone();
        let mut inbound = tokio::spawn(async move {
            tokio::select! {
                _ = inbound_cancel.cancelled() => {}
                outcome = forward_output(source, output) => {
                    slot.report(outcome);
                }
            }
        });

        // Outbound may never finish; a dead inbound flow ends the session.
        let wait = waiter.wait();
        tokio::pin!(wait);
        let outcome = tokio::select! {
            outcome = &mut wait => outcome,
            joined = &mut inbound => match joined {
                Ok(()) => wait.await,
                Err(e) => {
                    tracing::warn!("Output flow terminated abnormally: {}", e);
                    Outcome::Failure(SessionError::Aborted)
                }
            },
        };
        cancel.cancel();
        tracing::debug!(?outcome, "Session resolved");
        outcome
    }
}

/// Forward local input to the remote process
///
/// Returns `None` when this direction ends without deciding the session:
/// local end-of-input, or a normal closure seen while sending (the inbound
/// direction will report how the session ended).
async fn forward_input<I, K>(mut input: I, mut sink: K) -> Option<Outcome>
where
    I: AsyncRead + Unpin,
    K: FrameSink,
{
    let mut key = [0u8; 1];
    loop {
        match input.read(&mut key).await {
            Ok(0) => {
                tracing::debug!("Local input reached end of file");
                return None;
            }
            Ok(_) => {}
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Some(Outcome::Failure(SessionError::Io(e))),
        }

        match sink.send(Frame::encode(&key)).await {
            Ok(()) => {}
            Err(StreamError::NormalClosure) => {
                tracing::debug!("Stream closed while sending input");
                return None;
            }
            Err(StreamError::Transport(msg)) => {
                return Some(Outcome::Failure(SessionError::Transport(msg)));
            }
        }
    }
}

/// Write remote output through to local output and resolve the session
/// when the stream ends
async fn forward_output<R, O>(mut source: R, mut output: O) -> Outcome
where
    R: FrameSource,
    O: AsyncWrite + Unpin,
{
    let mut marker = ExitMarkerScanner::new();
    loop {
        let frame = match source.recv().await {
            Ok(frame) => frame,
            Err(StreamError::NormalClosure) => {
                return match marker.exit_status() {
                    Ok(status) => {
                        tracing::debug!(exit_status = status, "Remote command finished");
                        Outcome::from_exit_status(status)
                    }
                    Err(e) => Outcome::Failure(e.into()),
                };
            }
            Err(StreamError::Transport(msg)) => {
                return Outcome::Failure(SessionError::Transport(msg));
            }
        };

        let chunk = match frame.decode() {
            Ok(chunk) => chunk,
            Err(e) => return Outcome::Failure(e.into()),
        };
        tracing::trace!(frame_len = frame.len(), chunk_len = chunk.len(), "Output frame");

        marker.feed(&chunk);
        if let Err(e) = write_through(&mut output, &chunk).await {
            return Outcome::Failure(SessionError::Io(e));
        }
    }
}

async fn write_through<O: AsyncWrite + Unpin>(output: &mut O, chunk: &[u8]) -> io::Result<()> {
    output.write_all(chunk).await?;
    output.flush().await
}
