//! rancherexec: interactive exec sessions into Rancher-managed containers
//!
//! Resolves a container by fuzzy name through the Rancher v1 API, opens the
//! exec websocket and bridges the local terminal to it in raw mode.

pub mod bridge;
pub mod commands;
pub mod output;
pub mod rancher;
pub mod terminal;

#[cfg(test)]
mod test_utils;
