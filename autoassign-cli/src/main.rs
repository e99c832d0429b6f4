//! Auto-assign CLI - CI entry point for the reviewer automation
//!
//! Runs once per pull request event: re-requests review after approvals are
//! invalidated, or tops up requested reviewers from a configured pool.

mod run;

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use run::RunArgs;

/// Assign random reviewers to pull requests and re-request stale approvals
#[derive(Parser, Debug)]
#[command(name = "auto-assign")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(flatten)]
    run: RunArgs,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .init();

    match cli.run.execute().await {
        Ok(outcome) => {
            tracing::info!(%outcome, "Run complete");
            ExitCode::SUCCESS
        }
        Err(err) => {
            let message = format!("{:#}", err);
            tracing::error!(error = %message, "Run failed");
            println!("::error::{}", escape_workflow_data(&message));
            ExitCode::FAILURE
        }
    }
}

/// Escape a message for use in a workflow command
fn escape_workflow_data(message: &str) -> String {
    message
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}
