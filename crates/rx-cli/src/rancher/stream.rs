//! WebSocket stream to a container's attached process

use async_trait::async_trait;
use futures::stream::{SplitSink, SplitStream};
use futures::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::client::IntoClientRequest;
use tokio_tungstenite::tungstenite::error::{Error as WsError, ProtocolError as WsProtocolError};
use tokio_tungstenite::tungstenite::http::header::{HeaderValue, ORIGIN};
use tokio_tungstenite::tungstenite::protocol::frame::coding::CloseCode;
use tokio_tungstenite::tungstenite::protocol::CloseFrame;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};

use rx_core::error::{ResolveError, StreamError};
use rx_core::traits::{FrameSink, FrameSource, FrameStream};
use rx_protocol::Frame;

type WsConnection = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// An open exec stream
pub struct WsStream {
    inner: WsConnection,
}

/// Outbound half of a [`WsStream`]
pub struct WsSink {
    inner: SplitSink<WsConnection, Message>,
}

/// Inbound half of a [`WsStream`]
pub struct WsSource {
    inner: SplitStream<WsConnection>,
}

/// Open the stream for a grant URL, presenting the API base as `Origin`
pub async fn connect_stream(url: &str, origin: &str) -> Result<WsStream, ResolveError> {
    let mut request = url
        .into_client_request()
        .map_err(|e| ResolveError::Connect(e.to_string()))?;
    let origin = HeaderValue::from_str(origin)
        .map_err(|e| ResolveError::Connect(format!("invalid origin: {}", e)))?;
    request.headers_mut().insert(ORIGIN, origin);

    let (inner, response) = tokio_tungstenite::connect_async(request)
        .await
        .map_err(|e| ResolveError::Connect(e.to_string()))?;
    tracing::debug!(status = %response.status(), "WebSocket handshake complete");

    Ok(WsStream { inner })
}

impl FrameStream for WsStream {
    type Sink = WsSink;
    type Source = WsSource;

    fn split(self) -> (WsSink, WsSource) {
        let (sink, source) = self.inner.split();
        (WsSink { inner: sink }, WsSource { inner: source })
    }
}

#[async_trait]
impl FrameSink for WsSink {
    async fn send(&mut self, frame: Frame) -> Result<(), StreamError> {
        self.inner
            .send(Message::Binary(frame.into_payload().to_vec()))
            .await
            .map_err(classify_error)
    }
}

#[async_trait]
impl FrameSource for WsSource {
    async fn recv(&mut self) -> Result<Frame, StreamError> {
        loop {
            match self.inner.next().await {
                Some(Ok(Message::Text(text))) => return Ok(Frame::new(text)),
                Some(Ok(Message::Binary(data))) => return Ok(Frame::new(data)),
                Some(Ok(Message::Close(frame))) => return Err(close_reason(frame)),
                Some(Ok(_)) => continue,
                Some(Err(e)) => return Err(classify_error(e)),
                None => {
                    return Err(StreamError::Transport(
                        "stream ended without a close handshake".to_string(),
                    ))
                }
            }
        }
    }
}

/// Map a received close frame to the closure kind
fn close_reason(frame: Option<CloseFrame<'_>>) -> StreamError {
    match frame {
        None => StreamError::NormalClosure,
        Some(frame) if frame.code == CloseCode::Normal => StreamError::NormalClosure,
        Some(frame) => StreamError::Transport(format!(
            "closed with code {}: {}",
            u16::from(frame.code),
            frame.reason
        )),
    }
}

/// Separate an already-closed connection from genuine transport failures
fn classify_error(err: WsError) -> StreamError {
    match err {
        WsError::ConnectionClosed
        | WsError::AlreadyClosed
        | WsError::Protocol(WsProtocolError::SendAfterClosing) => StreamError::NormalClosure,
        other => StreamError::Transport(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::borrow::Cow;

    #[test]
    fn test_close_without_frame_is_normal() {
        assert_eq!(close_reason(None), StreamError::NormalClosure);
    }

    #[test]
    fn test_close_normal_code() {
        let frame = CloseFrame {
            code: CloseCode::Normal,
            reason: Cow::Borrowed(""),
        };
        assert_eq!(close_reason(Some(frame)), StreamError::NormalClosure);
    }

    #[test]
    fn test_close_abnormal_code() {
        let frame = CloseFrame {
            code: CloseCode::Error,
            reason: Cow::Borrowed("internal error"),
        };
        assert_eq!(
            close_reason(Some(frame)),
            StreamError::Transport("closed with code 1011: internal error".to_string())
        );
    }

    #[test]
    fn test_classify_errors() {
        assert_eq!(
            classify_error(WsError::ConnectionClosed),
            StreamError::NormalClosure
        );
        assert_eq!(
            classify_error(WsError::AlreadyClosed),
            StreamError::NormalClosure
        );
        assert_eq!(
            classify_error(WsError::Protocol(WsProtocolError::SendAfterClosing)),
            StreamError::NormalClosure
        );
        assert!(matches!(
            classify_error(WsError::Protocol(
                WsProtocolError::ResetWithoutClosingHandshake
            )),
            StreamError::Transport(_)
        ));
    }

    #[tokio::test]
    async fn test_connect_refused() {
        let result = connect_stream("ws://127.0.0.1:1/v1/exec/?token=x", "http://127.0.0.1:1/v1").await;
        assert!(matches!(result, Err(ResolveError::Connect(_))));
    }
}
