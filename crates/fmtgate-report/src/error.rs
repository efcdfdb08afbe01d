//! Error types for the reporting pipeline.

use thiserror::Error;

use crate::reporter::ReportSummary;

/// Errors surfaced by the batch reporter, one per pipeline state.
///
/// Each variant carries the underlying transport/status detail as an opaque
/// message. None of these are retried internally; the caller's only recovery
/// action is to log and signal failure.
#[derive(Error, Debug)]
pub enum ReportError {
    /// The check run could not be opened. Fully fatal: no partial report
    /// exists on the remote side.
    #[error("failed to create check run: {0}")]
    StartFailed(String),

    /// One or more annotation batches were rejected. A partial report may
    /// already be visible to reviewers.
    #[error("failed to post check-run annotations: {0}")]
    AnnotateFailed(String),

    /// Annotations were posted but the run could not be closed. The remote
    /// run remains visibly in-progress.
    #[error("failed to complete check run: {0}")]
    ConcludeFailed(String),
}

/// Result type for the reporting pipeline
pub type ReportResult = std::result::Result<ReportSummary, ReportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_names_the_failed_state() {
        assert!(ReportError::StartFailed("403".to_string())
            .to_string()
            .contains("create"));
        assert!(ReportError::AnnotateFailed("502".to_string())
            .to_string()
            .contains("annotations"));
        assert!(ReportError::ConcludeFailed("timeout".to_string())
            .to_string()
            .contains("complete"));
    }
}
