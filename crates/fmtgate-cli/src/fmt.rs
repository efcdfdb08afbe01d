//! Formatter invocation and diagnostic capture.
//!
//! Runs `cargo fmt` in check mode with machine-readable output and decodes
//! the result into the diagnostic model. The formatter exits 1 when
//! differences exist; that is a successful capture, not an error.

use std::path::Path;
use std::process::Stdio;

use anyhow::{bail, Context, Result};
use tokio::process::Command;
use tracing::debug;

use fmtgate_domain::Diagnostic;

/// Run `cargo fmt --message-format=json -- --check <extra args>` and capture
/// stdout.
///
/// Caller-supplied duplicates of `--check` and `--message-format` are
/// filtered out, since the adapter injects its own.
pub async fn run_rustfmt(extra_args: &[String]) -> Result<String> {
    let mut command = Command::new("cargo");
    command
        .arg("fmt")
        .arg("--message-format=json")
        .arg("--")
        .arg("--check");
    for arg in sanitize_rustfmt_args(extra_args) {
        command.arg(arg);
    }

    debug!(extra_args = ?extra_args, "running cargo fmt");
    let output = command
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .await
        .context("failed to run cargo fmt")?;

    // Exit 0: clean. Exit 1: differences found, diagnostics on stdout.
    let code = output.status.code().unwrap_or(-1);
    if code != 0 && code != 1 {
        bail!(
            "cargo fmt exited with code {code}: {}",
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }
    Ok(String::from_utf8_lossy(&output.stdout).to_string())
}

/// Decode the formatter's JSON output, relativizing absolute paths against
/// the workspace root.
pub fn decode_diagnostics(stdout: &str, workspace_root: &Path) -> Result<Vec<Diagnostic>> {
    let trimmed = stdout.trim();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }

    let mut diagnostics: Vec<Diagnostic> = serde_json::from_str(trimmed)
        .context("formatter output did not match the expected JSON shape")?;
    for diag in &mut diagnostics {
        diag.path = relativize(&diag.path, workspace_root);
    }
    Ok(diagnostics)
}

fn sanitize_rustfmt_args(args: &[String]) -> Vec<String> {
    args.iter()
        .filter(|arg| *arg != "--check" && !arg.starts_with("--message-format"))
        .cloned()
        .collect()
}

fn relativize(path: &str, root: &Path) -> String {
    Path::new(path)
        .strip_prefix(root)
        .map(|p| p.to_string_lossy().into_owned())
        .unwrap_or_else(|_| path.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_filters_injected_flags() {
        let args = vec![
            "--check".to_string(),
            "--message-format=short".to_string(),
            "--edition".to_string(),
            "2021".to_string(),
        ];
        assert_eq!(sanitize_rustfmt_args(&args), vec!["--edition", "2021"]);
    }

    #[test]
    fn test_decode_empty_output_is_clean() {
        let diagnostics =
            decode_diagnostics("", Path::new("/work")).expect("decode failed");
        assert!(diagnostics.is_empty());

        let diagnostics =
            decode_diagnostics("  \n", Path::new("/work")).expect("decode failed");
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_decode_relativizes_absolute_paths() {
        let stdout = r#"[{
            "name": "/work/src/lib.rs",
            "mismatches": [{
                "original_begin_line": 1,
                "original_end_line": 1,
                "original": "use std::io ;",
                "expected": "use std::io;"
            }]
        }]"#;

        let diagnostics =
            decode_diagnostics(stdout, Path::new("/work")).expect("decode failed");
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].path, "src/lib.rs");
    }

    #[test]
    fn test_decode_keeps_paths_outside_the_root() {
        let stdout = r#"[{ "path": "src/lib.rs", "mismatches": [] }]"#;
        let diagnostics =
            decode_diagnostics(stdout, Path::new("/work")).expect("decode failed");
        assert_eq!(diagnostics[0].path, "src/lib.rs");
    }

    #[test]
    fn test_decode_rejects_malformed_output() {
        let result = decode_diagnostics("not json", Path::new("/work"));
        assert!(result.is_err());
    }
}
