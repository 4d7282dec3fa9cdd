//! Core trait definitions

mod stream;
mod terminal;

pub use stream::{FrameSink, FrameSource, FrameStream, StreamResolver};
pub use terminal::TerminalControl;
