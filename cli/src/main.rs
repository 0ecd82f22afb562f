//! CLI for the issue provisioner.
//!
//! This tool files every issue listed in a manifest and adds each one to a
//! GitHub project board.

use clap::Parser;
use issue_provisioner::{RunOutcome, RunSummary, Runner, RunnerConfig, RunnerError};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Issue Provisioner - Bulk-create GitHub issues and add them to a project board.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the provisioning manifest.
    #[arg(long, default_value = "provision.toml")]
    manifest: PathBuf,

    /// GitHub Personal Access Token.
    #[arg(long, env = "GITHUB_TOKEN")]
    token: String,

    /// Preview issues without creating them.
    #[arg(long)]
    dry_run: bool,

    /// Maximum issues filed concurrently.
    #[arg(long, default_value_t = 1)]
    concurrency: usize,

    /// Time limit in seconds for each GitHub call.
    #[arg(long, default_value_t = 30)]
    timeout_secs: u64,

    /// Skip titles that already have an open issue.
    #[arg(long)]
    skip_existing: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    let args = Args::parse();

    match run(args).await {
        Ok(outcome) => {
            print_summary(&outcome);

            if outcome.summary.has_failures() {
                ExitCode::from(1)
            } else {
                ExitCode::from(0)
            }
        }
        Err(e) => {
            error!(error = %e, "Critical failure");
            ExitCode::from(2)
        }
    }
}

/// Initializes tracing with environment filter support.
///
/// Sets up the global tracing subscriber with:
/// - Compact log formatting (single-line output)
/// - Log level filtering via `RUST_LOG` env var (defaults to "info")
fn init_tracing() {
    tracing_subscriber::registry()
        .with(fmt::layer().compact().with_target(false))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}

/// Main execution logic.
async fn run(args: Args) -> Result<RunOutcome, RunnerError> {
    let config = RunnerConfig::new(args.manifest, args.token, args.dry_run, args.concurrency)
        .with_timeout(Duration::from_secs(args.timeout_secs))
        .with_skip_existing(args.skip_existing);
    let runner = Runner::new(config)?;
    runner.run().await
}

/// Prints the final run summary.
fn print_summary(outcome: &RunOutcome) {
    let summary: &RunSummary = &outcome.summary;

    println!("\nSummary:");
    println!(
        "  Mode: {}",
        if summary.dry_run { "Dry Run" } else { "Live" }
    );
    println!("  Issues attempted: {}", summary.attempted);

    if !summary.dry_run {
        println!("  Issues created: {}", summary.succeeded);
        println!("  Issues skipped: {}", summary.skipped);
        println!("  Issues failed: {}", summary.failed);
        println!("  Not added to project: {}", summary.attach_failed);
    }

    if let Some(url) = &outcome.project_url {
        println!("\nView the project: {url}");
    }
}
