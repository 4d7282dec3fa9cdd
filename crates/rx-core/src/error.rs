//! Core error types for rancherexec

use rx_protocol::ProtocolError;
use std::path::PathBuf;
use thiserror::Error;

/// Failure reported by one direction of the duplex stream
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StreamError {
    /// The peer closed the stream with a normal closure
    #[error("Stream closed normally")]
    NormalClosure,

    /// Any other transport-level failure
    #[error("{0}")]
    Transport(String),
}

/// Causes of a failed session
#[derive(Error, Debug)]
pub enum SessionError {
    /// A received frame did not decode
    #[error("Invalid frame from container: {0}")]
    Encoding(#[source] ProtocolError),

    /// The stream failed other than by normal closure
    #[error("Transport error: {0}")]
    Transport(String),

    /// The stream closed normally without a valid exit status line
    #[error("Protocol violation: {0}")]
    ProtocolViolation(#[source] ProtocolError),

    /// Local terminal input or output failed
    #[error("Local I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Both data flows ended without reporting an outcome
    #[error("Session ended without an outcome")]
    Aborted,
}

impl From<ProtocolError> for SessionError {
    fn from(err: ProtocolError) -> Self {
        match err {
            ProtocolError::Encoding(_) => SessionError::Encoding(err),
            ProtocolError::ExitMarker { .. } => SessionError::ProtocolViolation(err),
        }
    }
}

/// Failures while locating the container and opening its stream
#[derive(Error, Debug)]
pub enum ResolveError {
    /// The API answered with an error document
    #[error("{0}")]
    Api(String),

    /// The API could not be reached or answered with garbage
    #[error("Failed to communicate with rancher API: {0}")]
    Http(String),

    /// No running container matched the query
    #[error("Container {0} not existed in system, not running, or you don't have access permissions.")]
    NotFound(String),

    /// The user did not pick a valid candidate
    #[error("Invalid selection: {0}")]
    Selection(String),

    /// The execute action did not yield a usable grant
    #[error("Failed to get access token: {0}")]
    Grant(String),

    /// The stream to the container could not be opened
    #[error("We couldn't connect to this container: {0}")]
    Connect(String),

    /// Prompt I/O failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-related errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file not found
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),

    /// Invalid configuration
    #[error("Invalid config: {0}")]
    Invalid(String),

    /// Config file extension not recognised
    #[error("Unsupported config format: {0}")]
    UnsupportedFormat(PathBuf),

    /// TOML parse error
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// JSON parse error
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML parse error
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Missing required field
    #[error("Missing required field: {0}")]
    MissingField(String),
}
