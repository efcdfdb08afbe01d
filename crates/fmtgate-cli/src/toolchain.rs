//! Toolchain version probing.
//!
//! Captures the version strings surfaced in the completed report's summary.

use std::process::Stdio;

use anyhow::{bail, Context, Result};
use tokio::process::Command;

use fmtgate_domain::ToolVersions;

/// Probe rustc, cargo and rustfmt for the report summary.
pub async fn probe_tool_versions() -> Result<ToolVersions> {
    Ok(ToolVersions::new()
        .with_tool("rustc", capture_stdout("rustc", "-V").await?)
        .with_tool("cargo", capture_stdout("cargo", "-V").await?)
        .with_tool("rustfmt", capture_stdout("rustfmt", "-V").await?))
}

/// Run `<tool> <arg>` and capture trimmed stdout.
async fn capture_stdout(tool: &str, arg: &str) -> Result<String> {
    let output = Command::new(tool)
        .arg(arg)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .await
        .with_context(|| format!("failed to run {tool} {arg}"))?;

    if !output.status.success() {
        bail!(
            "{tool} {arg} exited with code {}",
            output.status.code().unwrap_or(-1)
        );
    }
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}
