//! Flow Forge
//!
//! Triggers GitLab pipelines listed in a CSV file one after another, waiting
//! for each to finish before starting the next, and reports the outcome as
//! text on stdout and as an HTML page.
//!
//! Architecture:
//! - Configuration: CLI arguments with environment fallbacks
//! - Rows: CSV pipeline list into validated requests
//! - Scheduler: sequential trigger/poll loop, fail-fast
//! - Report: text summary and HTML chart

mod config;
mod report;
mod rows;
mod scheduler;

use anyhow::{Context, Result};
use clap::Parser;
use colored::*;
use flowforge_client::{DEFAULT_GITLAB_URL, GitLabClient};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{Config, DEFAULT_CSV_PATH, DEFAULT_REPORT_PATH};
use crate::scheduler::{Execution, SequentialExecutor};

#[derive(Parser)]
#[command(name = "flowforge")]
#[command(about = "Run GitLab pipelines sequentially from a CSV list", long_about = None)]
struct Cli {
    /// CSV file listing the pipelines to run
    #[arg(default_value = DEFAULT_CSV_PATH)]
    csv_path: PathBuf,

    /// GitLab base URL
    #[arg(long, env = "FLOWFORGE_GITLAB_URL", default_value = DEFAULT_GITLAB_URL)]
    gitlab_url: String,

    /// Seconds between status checks
    #[arg(long, env = "FLOWFORGE_POLL_INTERVAL", default_value_t = 10)]
    poll_interval: u64,

    /// Give up on a pipeline after this many seconds (unbounded when unset)
    #[arg(long, env = "FLOWFORGE_POLL_TIMEOUT")]
    poll_timeout: Option<u64>,

    /// Where to write the HTML report
    #[arg(long = "report", env = "FLOWFORGE_REPORT_PATH", default_value = DEFAULT_REPORT_PATH)]
    report_path: PathBuf,

    /// Per-request HTTP timeout in seconds
    #[arg(long, env = "FLOWFORGE_HTTP_TIMEOUT", default_value_t = 30)]
    http_timeout: u64,
}

impl From<Cli> for Config {
    fn from(cli: Cli) -> Self {
        Self {
            csv_path: cli.csv_path,
            gitlab_url: cli.gitlab_url,
            poll_interval: Duration::from_secs(cli.poll_interval),
            poll_timeout: cli.poll_timeout.map(Duration::from_secs),
            report_path: cli.report_path,
            http_timeout: Duration::from_secs(cli.http_timeout),
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "flowforge=info,flowforge_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config: Config = Cli::parse().into();

    let code = match run(config).await {
        Ok(execution) if execution.completed() => ExitCode::SUCCESS,
        Ok(_) => ExitCode::FAILURE,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    };

    info!("Flow Forge completed");
    code
}

async fn run(config: Config) -> Result<Execution> {
    info!("Starting Flow Forge");
    config.validate()?;

    let requests = rows::load_requests(&config.csv_path).context("Error reading CSV file")?;

    if requests.is_empty() {
        warn!("No valid pipeline configurations found in the CSV file");
        return Ok(Execution::default());
    }

    let http_client = reqwest::Client::builder()
        .timeout(config.http_timeout)
        .build()
        .context("Failed to build HTTP client")?;
    let client = Arc::new(GitLabClient::with_client(&config.gitlab_url, http_client));
    info!("GitLab client initialized for {}", client.base_url());

    let cancel = CancellationToken::new();
    spawn_interrupt_listener(cancel.clone());

    let executor = SequentialExecutor::new(client, config.poll_options(), cancel);
    let execution = executor.run(&requests).await;

    info!("Generating pipeline execution report...");
    println!("{}", report::text::render(&execution.results)?);

    if let Err(e) = report::html::write(&execution.results, &config.report_path) {
        error!("Error generating HTML report: {:#}", e);
    }

    print_outcome(&execution, requests.len());
    Ok(execution)
}

/// Cancels `token` on Ctrl-C so an in-flight poll stops waiting
fn spawn_interrupt_listener(token: CancellationToken) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupt received, aborting pipeline execution");
            token.cancel();
        }
    });
}

fn print_outcome(execution: &Execution, total: usize) {
    match &execution.halt {
        None => println!(
            "{}",
            format!("✓ All {} pipeline(s) succeeded", total).green().bold()
        ),
        Some(halt) => println!(
            "{} {} ({} of {} pipeline(s) ran)",
            "✗ Stopped:".red().bold(),
            halt,
            execution.results.len(),
            total
        ),
    }
}
