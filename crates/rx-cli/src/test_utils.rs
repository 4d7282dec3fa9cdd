//! In-memory stand-ins for the stream, terminal and local I/O

use std::collections::VecDeque;
use std::io;
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};

use async_trait::async_trait;
use tokio::io::{AsyncRead, AsyncWrite, ReadBuf};
use tokio::sync::mpsc;

use rx_core::error::{ResolveError, StreamError};
use rx_core::traits::{FrameSink, FrameSource, FrameStream, StreamResolver, TerminalControl};
use rx_protocol::Frame;

/// Events the fake remote side will deliver
pub type Inbound = Result<Frame, StreamError>;

/// Sink that forwards frames to the test, or fails with a fixed error
pub struct FakeSink {
    sent: mpsc::UnboundedSender<Frame>,
    fail_with: Option<StreamError>,
}

#[async_trait]
impl FrameSink for FakeSink {
    async fn send(&mut self, frame: Frame) -> Result<(), StreamError> {
        if let Some(err) = &self.fail_with {
            return Err(err.clone());
        }
        let _ = self.sent.send(frame);
        Ok(())
    }
}

/// Source fed by the test; a dropped feeder leaves it pending forever
pub struct FakeSource {
    inbound: mpsc::UnboundedReceiver<Inbound>,
    panic_on_recv: bool,
}

#[async_trait]
impl FrameSource for FakeSource {
    async fn recv(&mut self) -> Result<Frame, StreamError> {
        if self.panic_on_recv {
            panic!("frame source crashed");
        }
        match self.inbound.recv().await {
            Some(event) => event,
            None => std::future::pending().await,
        }
    }
}

pub struct FakeStream {
    sink: FakeSink,
    source: FakeSource,
}

impl FrameStream for FakeStream {
    type Sink = FakeSink;
    type Source = FakeSource;

    fn split(self) -> (FakeSink, FakeSource) {
        (self.sink, self.source)
    }
}

/// Test-side handles of a [`FakeStream`]
pub struct Remote {
    pub inbound: mpsc::UnboundedSender<Inbound>,
    pub sent: mpsc::UnboundedReceiver<Frame>,
}

impl Remote {
    /// Deliver a frame carrying `text`
    pub fn output(&self, text: &str) {
        let _ = self.inbound.send(Ok(Frame::encode(text.as_bytes())));
    }

    /// Close the stream
    pub fn close(&self, err: StreamError) {
        let _ = self.inbound.send(Err(err));
    }
}

pub fn fake_stream() -> (FakeStream, Remote) {
    fake_stream_with(None)
}

/// Stream whose source panics on the first receive
pub fn panicking_source_stream() -> (FakeStream, Remote) {
    let (mut stream, remote) = fake_stream();
    stream.source.panic_on_recv = true;
    (stream, remote)
}

pub fn fake_stream_with(fail_sends: Option<StreamError>) -> (FakeStream, Remote) {
    let (sent_tx, sent_rx) = mpsc::unbounded_channel();
    let (inbound_tx, inbound_rx) = mpsc::unbounded_channel();
    let stream = FakeStream {
        sink: FakeSink {
            sent: sent_tx,
            fail_with: fail_sends,
        },
        source: FakeSource {
            inbound: inbound_rx,
            panic_on_recv: false,
        },
    };
    let remote = Remote {
        inbound: inbound_tx,
        sent: sent_rx,
    };
    (stream, remote)
}

/// Resolver that hands out a prepared stream once, or fails
pub struct FakeResolver {
    stream: Mutex<Option<FakeStream>>,
    pub requests: Mutex<Vec<(String, String)>>,
}

impl FakeResolver {
    pub fn with_stream(stream: FakeStream) -> Self {
        Self {
            stream: Mutex::new(Some(stream)),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            stream: Mutex::new(None),
            requests: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl StreamResolver for FakeResolver {
    type Stream = FakeStream;

    async fn resolve(&self, query: &str, command: &str) -> Result<FakeStream, ResolveError> {
        self.requests
            .lock()
            .unwrap()
            .push((query.to_string(), command.to_string()));
        self.stream
            .lock()
            .unwrap()
            .take()
            .ok_or_else(|| ResolveError::NotFound(query.to_string()))
    }
}

/// Terminal mode as seen by [`RecordingTerminal`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Cooked,
    Raw,
}

/// Terminal that records every mode transition
pub struct RecordingTerminal {
    interactive: bool,
    pub mode: Mode,
    pub calls: Vec<&'static str>,
}

impl RecordingTerminal {
    pub fn interactive() -> Self {
        Self {
            interactive: true,
            mode: Mode::Cooked,
            calls: Vec::new(),
        }
    }

    pub fn piped() -> Self {
        Self {
            interactive: false,
            ..Self::interactive()
        }
    }
}

impl TerminalControl for RecordingTerminal {
    type Mode = Mode;

    fn is_interactive(&self) -> bool {
        self.interactive
    }

    fn enter_raw(&mut self) -> io::Result<Mode> {
        self.calls.push("enter_raw");
        let saved = self.mode;
        self.mode = Mode::Raw;
        Ok(saved)
    }

    fn restore(&mut self, mode: Mode) -> io::Result<()> {
        self.calls.push("restore");
        self.mode = mode;
        Ok(())
    }
}

/// Cloneable in-memory writer standing in for stdout
#[derive(Clone, Default)]
pub struct SharedOutput(Arc<Mutex<Vec<u8>>>);

impl SharedOutput {
    pub fn contents(&self) -> Vec<u8> {
        self.0.lock().unwrap().clone()
    }
}

impl AsyncWrite for SharedOutput {
    fn poll_write(
        self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<io::Result<usize>> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Poll::Ready(Ok(buf.len()))
    }

    fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Ok(()))
    }

    fn poll_shutdown(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Ok(()))
    }
}

/// Reader that yields its script of results, then blocks forever
pub struct ScriptedInput {
    script: VecDeque<io::Result<u8>>,
}

impl ScriptedInput {
    pub fn bytes(data: &[u8]) -> Self {
        Self {
            script: data.iter().map(|&b| Ok(b)).collect(),
        }
    }

    pub fn failing(kind: io::ErrorKind) -> Self {
        Self {
            script: VecDeque::from([Err(io::Error::new(kind, "input failed"))]),
        }
    }

    pub fn push(&mut self, byte: u8) {
        self.script.push_back(Ok(byte));
    }
}

impl AsyncRead for ScriptedInput {
    fn poll_read(
        mut self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        match self.script.pop_front() {
            Some(Ok(byte)) => {
                buf.put_slice(&[byte]);
                Poll::Ready(Ok(()))
            }
            Some(Err(err)) => Poll::Ready(Err(err)),
            None => Poll::Pending,
        }
    }
}
