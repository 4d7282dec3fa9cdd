//! CLI command implementations

mod exec;

pub use exec::{exec_command, report_outcome, run_session};
