//! rx-core: Core abstractions and configuration for rancherexec
//!
//! This crate provides the error taxonomy, the stream and terminal traits the
//! session bridge is written against, the Rancher API domain types and the
//! configuration loader shared by the CLI.

pub mod config;
pub mod error;
pub mod outcome;
pub mod traits;
pub mod types;

pub use outcome::Outcome;
pub use types::{Container, TerminalSize};
