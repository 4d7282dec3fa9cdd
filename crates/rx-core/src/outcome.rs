//! Terminal result of a bridged session

use crate::error::SessionError;

/// Exit status used for any failed session
pub const FAILURE_EXIT_STATUS: i32 = 1;

/// The single result a session resolves to
#[derive(Debug)]
pub enum Outcome {
    /// Remote command exited with status 0
    Clean,
    /// Remote command exited with a non-zero status (`1..=255`)
    ExitCode(i32),
    /// Transport, encoding or protocol failure
    Failure(SessionError),
}

impl Outcome {
    /// Outcome for a parsed remote exit status
    pub fn from_exit_status(status: u8) -> Self {
        if status == 0 {
            Outcome::Clean
        } else {
            Outcome::ExitCode(i32::from(status))
        }
    }

    /// Exit status the host process should terminate with
    pub fn exit_status(&self) -> i32 {
        match self {
            Outcome::Clean => 0,
            Outcome::ExitCode(code) => *code,
            Outcome::Failure(_) => FAILURE_EXIT_STATUS,
        }
    }
}

impl From<SessionError> for Outcome {
    fn from(err: SessionError) -> Self {
        Outcome::Failure(err)
    }
}
