//! Check-run reporting pipeline.
//!
//! A strictly forward pipeline per invocation: Start -> Annotate -> Conclude
//! -> Done, with any state able to fail terminally. No state is revisited and
//! no cross-invocation state exists; re-running reports a fresh check run.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use fmtgate_checks::{
    CheckCompletion, CheckOutput, ChecksError, ChecksService, NewCheckRun,
};
use fmtgate_domain::{build_annotations, CheckContext, Conclusion, Diagnostic};

use crate::error::{ReportError, ReportResult};

/// Reporter configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReporterConfig {
    /// Hard per-request annotation cap imposed by the remote service.
    pub max_annotations_per_request: usize,
}

impl Default for ReporterConfig {
    fn default() -> Self {
        Self {
            max_annotations_per_request: 50,
        }
    }
}

/// Outcome of a completed report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportSummary {
    /// Terminal verdict of the check run.
    pub conclusion: Conclusion,

    /// Total annotations posted.
    pub annotation_count: usize,

    /// Files examined, clean files included.
    pub file_count: usize,
}

/// Batch check-run reporter.
///
/// Owns a handle to the checks service for the duration of one invocation;
/// remote calls are awaited one at a time, annotation batches in strict
/// sequence, so the order reviewers see is deterministic.
pub struct Reporter {
    service: Arc<dyn ChecksService>,
    config: ReporterConfig,
}

impl Reporter {
    /// Create a reporter with the default configuration.
    pub fn new(service: Arc<dyn ChecksService>) -> Self {
        Self::with_config(service, ReporterConfig::default())
    }

    /// Create a reporter with an explicit configuration.
    pub fn with_config(service: Arc<dyn ChecksService>, config: ReporterConfig) -> Self {
        Self { service, config }
    }

    /// Report diagnostics as a single check run.
    ///
    /// Opens the run, posts every annotation in batches under the configured
    /// cap, and closes the run with the aggregated conclusion. A failed batch
    /// does not roll back earlier batches and does not stop later ones;
    /// batches are sequential, so continuing cannot reorder what reviewers
    /// see. The first batch failure is reported as
    /// [`ReportError::AnnotateFailed`] after all batches were attempted.
    pub async fn report(
        &self,
        diagnostics: &[Diagnostic],
        context: &CheckContext,
    ) -> ReportResult {
        // Start
        let run = NewCheckRun {
            name: context.name.clone(),
            head_sha: context.head_sha.clone(),
            started_at: context.started_at,
        };
        let id = self
            .service
            .create_run(&run)
            .await
            .map_err(|e| ReportError::StartFailed(e.to_string()))?;
        info!(check_run = %id, head_sha = %context.head_sha, "check run created");

        // Annotate
        let annotations = build_annotations(diagnostics);
        let cap = self.config.max_annotations_per_request.max(1);
        let mut first_failure: Option<ChecksError> = None;

        for batch in annotations.chunks(cap) {
            let output = CheckOutput {
                title: context.name.clone(),
                summary: format!("{} formatting annotations in this batch", batch.len()),
                annotations: batch.to_vec(),
            };
            if let Err(e) = self.service.update_run(&id, &output).await {
                warn!(check_run = %id, error = %e, "annotation batch rejected");
                first_failure.get_or_insert(e);
            }
        }
        if let Some(e) = first_failure {
            return Err(ReportError::AnnotateFailed(e.to_string()));
        }

        // Conclude
        let conclusion = Conclusion::of(diagnostics);
        let completion = CheckCompletion {
            conclusion,
            completed_at: Utc::now(),
            title: context.name.clone(),
            summary: render_summary(context, diagnostics),
        };
        self.service
            .complete_run(&id, &completion)
            .await
            .map_err(|e| ReportError::ConcludeFailed(e.to_string()))?;
        info!(check_run = %id, conclusion = %conclusion, "check run completed");

        Ok(ReportSummary {
            conclusion,
            annotation_count: annotations.len(),
            file_count: diagnostics.len(),
        })
    }
}

/// Summary text for the completed report: file counts plus the toolchain
/// versions captured before the formatter ran.
fn render_summary(context: &CheckContext, diagnostics: &[Diagnostic]) -> String {
    let file_count = diagnostics.len();
    let dirty_count = diagnostics.iter().filter(|d| !d.is_clean()).count();

    let mut summary = if dirty_count == 0 {
        format!("All {file_count} checked files are formatted correctly.")
    } else {
        format!("{dirty_count} of {file_count} checked files need formatting.")
    };

    if !context.tool_versions.is_empty() {
        summary.push_str("\n\nToolchain:\n");
        for (name, version) in context.tool_versions.iter() {
            summary.push_str(&format!("- {name}: {version}\n"));
        }
    }
    summary
}
