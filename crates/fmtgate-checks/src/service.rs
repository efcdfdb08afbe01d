//! Check-run service trait and call payloads.
//!
//! This is the seam between the reporting pipeline and the hosted review
//! service. The trait is async and backend-agnostic; in-memory fakes are
//! provided for testing via the `fakes` module.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use fmtgate_domain::{Annotation, Conclusion};

use crate::error::ChecksError;

/// Result type for checks protocol operations
pub type ChecksResult<T> = std::result::Result<T, ChecksError>;

/// Identifier of a check run, allocated by the remote service at creation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CheckRunId(pub u64);

impl std::fmt::Display for CheckRunId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Parameters for opening a check run in the in-progress state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewCheckRun {
    /// Display name of the check.
    pub name: String,

    /// Commit identifier under review.
    pub head_sha: String,

    /// When the checked tool started running.
    pub started_at: DateTime<Utc>,
}

/// Output attached to an open run: a batch of annotations under a title.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CheckOutput {
    /// Output title shown above the annotations.
    pub title: String,

    /// Short textual summary.
    pub summary: String,

    /// Annotation batch. Must not exceed the service's per-request cap;
    /// enforcing that is the caller's job.
    pub annotations: Vec<Annotation>,
}

/// Terminal completion of a run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CheckCompletion {
    /// Pass/fail verdict.
    pub conclusion: Conclusion,

    /// When the check finished.
    pub completed_at: DateTime<Utc>,

    /// Output title for the completed report.
    pub title: String,

    /// Summary text for the completed report.
    pub summary: String,
}

/// Hosted check-run service.
///
/// Guarantees expected of implementations:
/// - `create_run` opens the run in the in-progress state and returns its id.
/// - `update_run` attaches annotations to an open run; calls are applied in
///   the order they are issued.
/// - `complete_run` closes the run with a terminal conclusion.
///
/// Implementations perform each call once; retry policy belongs to callers.
#[async_trait]
pub trait ChecksService: Send + Sync {
    /// Open a check run. Returns the service-allocated run id.
    async fn create_run(&self, run: &NewCheckRun) -> ChecksResult<CheckRunId>;

    /// Attach a batch of annotations to an open run.
    async fn update_run(&self, id: &CheckRunId, output: &CheckOutput) -> ChecksResult<()>;

    /// Close a run with its terminal conclusion.
    async fn complete_run(&self, id: &CheckRunId, completion: &CheckCompletion)
        -> ChecksResult<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_run_id_display() {
        assert_eq!(CheckRunId(42).to_string(), "42");
    }

    #[test]
    fn test_new_check_run_serde_roundtrip() {
        let run = NewCheckRun {
            name: "rustfmt".to_string(),
            head_sha: "abc123".to_string(),
            started_at: Utc::now(),
        };
        let json = serde_json::to_string(&run).expect("serialize");
        let deserialized: NewCheckRun = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(run, deserialized);
    }
}
