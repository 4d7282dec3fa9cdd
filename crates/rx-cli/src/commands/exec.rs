//! Exec command implementation

use tokio::io::{AsyncRead, AsyncWrite};

use rx_core::config::ExecConfig;
use rx_core::error::{ResolveError, SessionError};
use rx_core::outcome::FAILURE_EXIT_STATUS;
use rx_core::traits::{StreamResolver, TerminalControl};
use rx_core::Outcome;

use crate::bridge::Bridge;
use crate::output::{print_error, print_warning};
use crate::rancher::{RancherClient, RancherResolver};
use crate::terminal::{LocalTerminal, RawModeGuard};

/// Resolve the stream and bridge it to local I/O under raw mode
///
/// Resolution happens before the terminal is touched, so its prompts run in
/// the original mode. The mode is restored before this returns.
pub async fn run_session<R, T, I, O>(
    resolver: &R,
    terminal: &mut T,
    query: &str,
    command: &str,
    input: I,
    output: O,
) -> Result<Outcome, ResolveError>
where
    R: StreamResolver,
    T: TerminalControl,
    I: AsyncRead + Unpin + Send + 'static,
    O: AsyncWrite + Unpin + Send + 'static,
{
    let stream = resolver.resolve(query, command).await?;

    let guard = match RawModeGuard::acquire(terminal) {
        Ok(guard) => guard,
        Err(e) => return Ok(Outcome::Failure(SessionError::Io(e))),
    };
    tracing::debug!(raw = guard.is_raw(), "Session started");

    let outcome = Bridge::new(stream).run(input, output).await;
    drop(guard);

    tracing::debug!(?outcome, "Session finished");
    Ok(outcome)
}

/// Report a session result and map it to the host exit status
pub fn report_outcome(result: Result<Outcome, ResolveError>) -> i32 {
    match result {
        Ok(Outcome::Failure(e)) => {
            print_error(&e.to_string());
            FAILURE_EXIT_STATUS
        }
        Ok(outcome) => outcome.exit_status(),
        Err(e) => {
            print_error(&e.to_string());
            FAILURE_EXIT_STATUS
        }
    }
}

/// Execute the exec command against the local terminal
pub async fn exec_command(config: &ExecConfig, query: &str) -> i32 {
    let mut terminal = LocalTerminal::stdin();
    if !terminal.is_interactive() {
        print_warning("Input is not a terminal, running without raw mode");
    }

    let client = match RancherClient::new(config) {
        Ok(client) => client,
        Err(e) => return report_outcome(Err(e)),
    };
    let resolver = RancherResolver::new(client, config.term.clone(), terminal.size());

    let result = run_session(
        &resolver,
        &mut terminal,
        query,
        &config.command,
        tokio::io::stdin(),
        tokio::io::stdout(),
    )
    .await;

    report_outcome(result)
}
