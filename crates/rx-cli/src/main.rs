//! rancherexec CLI
//!
//! Opens an interactive shell (or runs a single command) inside a container
//! managed by Rancher, and exits with the remote command's exit status.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use rancherexec::commands;
use rancherexec::output::print_error;
use rx_core::config::{self, ConfigOverrides};

/// Exit status for usage and configuration errors
const USAGE_EXIT_STATUS: i32 = 2;

const AFTER_HELP: &str = "\
Examples:
  rancherexec my-server-1
  rancherexec \"my-server*\"            (equals to)  rancherexec my-server%
  rancherexec \"*proxy*\"               (equals to)  rancherexec %proxy%
  rancherexec --command \"cat /etc/hostname\" web-1

Configuration:
  Settings are read from config.toml, config.json, config.yml or config.yaml
  in the current directory, ~/.rancherexec/ or /etc/rancherexec/ (first match
  wins), then overridden by the environment and command-line flags.

  YAML example (config.yml):
    url: https://rancher.example.com/v1/projects/1a5
    access_key: <access key>
    secret_key: <secret key>

Environment variables:
  RANCHER_URL          Rancher API URL, e.g. https://rancher.example.com/v1/projects/1a5
  RANCHER_ACCESS_KEY   API access key
  RANCHER_SECRET_KEY   API secret key
  RANCHER_COMMAND      Command run inside the container (default /bin/sh)";

#[derive(Parser)]
#[command(name = "rancherexec")]
#[command(author, version, about = "Interactive shell into Rancher-managed containers")]
#[command(after_help = AFTER_HELP)]
struct Cli {
    /// Container name to search for; `*` matches any characters
    container: String,

    /// Rancher API URL
    #[arg(long, env = "RANCHER_URL")]
    url: Option<String>,

    /// Rancher API access key
    #[arg(long, alias = "access_key", env = "RANCHER_ACCESS_KEY")]
    access_key: Option<String>,

    /// Rancher API secret key
    #[arg(long, alias = "secret_key", env = "RANCHER_SECRET_KEY", hide_env_values = true)]
    secret_key: Option<String>,

    /// Command line to run inside the container
    #[arg(long, env = "RANCHER_COMMAND")]
    command: Option<String>,

    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long)]
    quiet: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    let log_level = match (cli.quiet, cli.verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, 2) => "debug",
        (false, _) => "trace",
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.into()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let status = match run(cli).await {
        Ok(status) => status,
        Err(e) => {
            print_error(&format!("{:#}", e));
            eprintln!("Run `rancherexec --help` for usage.");
            USAGE_EXIT_STATUS
        }
    };

    // The stdin reader may still be parked on the blocking pool
    std::process::exit(status);
}

/// Build the effective configuration and run the session
///
/// Errors returned here are configuration problems; session results are
/// already mapped to an exit status.
async fn run(cli: Cli) -> Result<i32> {
    if cli.container.trim().is_empty() {
        anyhow::bail!("Container name must not be empty");
    }

    let file_config =
        config::load_exec_config(cli.config.as_deref()).context("Failed to load configuration")?;

    let config = file_config.merge(ConfigOverrides {
        url: cli.url,
        access_key: cli.access_key,
        secret_key: cli.secret_key,
        command: cli.command,
    });
    config.validate().context("Incomplete configuration")?;

    tracing::info!(url = %config.url, container = %cli.container, "Starting exec session");
    Ok(commands::exec_command(&config, &cli.container).await)
}
