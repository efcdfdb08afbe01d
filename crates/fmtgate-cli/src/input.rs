//! Adapter inputs from the hosting CI environment.
//!
//! Every flag has an environment fallback matching the conventions of the
//! hosting CI: adapter inputs arrive as `INPUT_*` variables, repository and
//! commit coordinates as `GITHUB_*` variables.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::debug;

#[derive(Parser, Debug)]
#[command(name = "fmtgate")]
#[command(author = "Stevedores Org")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Run cargo fmt and report mismatches as check-run annotations", long_about = None)]
pub struct Cli {
    /// Authorization token for the checks API
    #[arg(long, env = "INPUT_TOKEN", hide_env_values = true)]
    pub token: String,

    /// Display name of the check run
    #[arg(long, env = "INPUT_NAME", default_value = "rustfmt")]
    pub name: String,

    /// Extra arguments passed through to the formatter (whitespace-separated)
    #[arg(long, env = "INPUT_ARGS", default_value = "", allow_hyphen_values = true)]
    pub args: String,

    /// Repository under review, in `owner/repo` form
    #[arg(long, env = "GITHUB_REPOSITORY")]
    pub repository: String,

    /// Commit SHA of the push that triggered the job
    #[arg(long, env = "GITHUB_SHA")]
    pub sha: String,

    /// Path to the CI event payload file
    #[arg(long, env = "GITHUB_EVENT_PATH")]
    pub event_path: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// Extra formatter arguments, whitespace-split.
    pub fn rustfmt_args(&self) -> Vec<String> {
        self.args.split_whitespace().map(str::to_string).collect()
    }
}

/// Split `owner/repo` coordinates.
pub fn split_repository(repository: &str) -> Result<(String, String)> {
    match repository.split_once('/') {
        Some((owner, repo)) if !owner.is_empty() && !repo.is_empty() => {
            Ok((owner.to_string(), repo.to_string()))
        }
        _ => bail!("malformed repository coordinates: {repository:?} (expected owner/repo)"),
    }
}

/// Resolve the commit under review.
///
/// For pull-request events the pushed SHA is a synthetic merge commit; the
/// event payload carries the real head SHA under `pull_request.head.sha`.
/// Prefer it when present, otherwise fall back to the pushed SHA. Payload
/// problems (missing file, unreadable, not JSON) also fall back.
pub fn resolve_head_sha(push_sha: &str, event_path: Option<&Path>) -> String {
    let Some(path) = event_path else {
        return push_sha.to_string();
    };
    match pull_request_head_sha(path) {
        Ok(Some(sha)) => sha,
        Ok(None) => push_sha.to_string(),
        Err(e) => {
            debug!(error = %e, "event payload not usable, falling back to pushed SHA");
            push_sha.to_string()
        }
    }
}

fn pull_request_head_sha(path: &Path) -> Result<Option<String>> {
    let payload = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read event payload at {}", path.display()))?;
    let event: serde_json::Value =
        serde_json::from_str(&payload).context("event payload is not valid JSON")?;
    Ok(event["pull_request"]["head"]["sha"]
        .as_str()
        .map(str::to_string))
}
