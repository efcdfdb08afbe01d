//! fmtgate - formatting gate for hosted code review
//!
//! Runs `cargo fmt` in check mode, captures its structured diagnostics, and
//! republishes them as inline annotations on a check run attached to the
//! commit under review. The job exits non-zero when reporting fails or when
//! formatting violations were found.

mod fmt;
mod input;
mod telemetry;
mod toolchain;

use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use tracing::{error, info, Level};

use fmtgate_checks::GithubChecksClient;
use fmtgate_domain::CheckContext;
use fmtgate_report::Reporter;

use input::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    telemetry::init_tracing(cli.json, level);

    // Captured before the formatter runs; the check run is timestamped with it.
    let started_at = Utc::now();

    let tool_versions = toolchain::probe_tool_versions()
        .await
        .context("failed to probe toolchain versions")?;
    for (name, version) in tool_versions.iter() {
        info!(tool = name, version = version, "toolchain");
    }

    let stdout = fmt::run_rustfmt(&cli.rustfmt_args()).await?;
    let workspace_root = std::env::current_dir().context("cannot determine workspace root")?;
    let diagnostics = fmt::decode_diagnostics(&stdout, &workspace_root)?;
    info!(files = diagnostics.len(), "formatter diagnostics captured");

    let (owner, repo) = input::split_repository(&cli.repository)?;
    let head_sha = input::resolve_head_sha(&cli.sha, cli.event_path.as_deref());

    let context = CheckContext::new(owner, repo, head_sha, &cli.name, started_at)
        .with_tool_versions(tool_versions);

    let service = Arc::new(GithubChecksClient::new(
        &context.owner,
        &context.repo,
        &cli.token,
    )?);
    let reporter = Reporter::new(service);

    let summary = match reporter.report(&diagnostics, &context).await {
        Ok(summary) => summary,
        Err(e) => {
            error!(error = %e, "check-run reporting failed");
            std::process::exit(1);
        }
    };

    info!(
        conclusion = %summary.conclusion,
        annotations = summary.annotation_count,
        files = summary.file_count,
        "check run reported"
    );

    if !summary.conclusion.is_success() {
        error!("formatting violations found");
        std::process::exit(1);
    }
    Ok(())
}
