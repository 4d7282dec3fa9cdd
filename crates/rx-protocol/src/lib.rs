//! rx-protocol: Wire format for rancherexec terminal streams
//!
//! The container's attached process is reached through a duplex message
//! stream. Every message carries base64 text: outbound frames hold a single
//! keystroke byte, inbound frames hold an arbitrary chunk of remote output.
//! When the remote command finishes, the wrapper script echoes its exit
//! status as the final line of output before the stream closes.

pub mod codec;
pub mod error;
pub mod frame;
pub mod marker;

pub use codec::{decode, encode};
pub use error::ProtocolError;
pub use frame::Frame;
pub use marker::ExitMarkerScanner;
