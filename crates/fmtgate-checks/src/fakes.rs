//! In-memory fakes for the checks service (testing only)
//!
//! Provides `RecordingChecksService`, which satisfies the [`ChecksService`]
//! contract without any transport, records every attempted call in order,
//! and can inject failures per call kind.

use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;

use fmtgate_domain::Conclusion;

use crate::error::ChecksError;
use crate::service::{
    CheckCompletion, CheckOutput, CheckRunId, ChecksResult, ChecksService, NewCheckRun,
};

/// One attempted call against the fake service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedCall {
    Create {
        name: String,
        head_sha: String,
    },
    /// An annotation batch; `annotation_count` is the batch size.
    Update {
        annotation_count: usize,
    },
    Complete {
        conclusion: Conclusion,
        summary: String,
    },
}

/// Checks service fake that records calls and injects failures.
///
/// Calls are recorded even when they are made to fail, so tests can assert
/// on everything the caller attempted.
#[derive(Debug, Default)]
pub struct RecordingChecksService {
    calls: Mutex<Vec<RecordedCall>>,
    fail_create: bool,
    fail_complete: bool,
    /// Zero-based indices of update calls to reject.
    fail_updates: HashSet<usize>,
}

impl RecordingChecksService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `create_run` fail.
    pub fn failing_create(mut self) -> Self {
        self.fail_create = true;
        self
    }

    /// Make the `index`-th (zero-based) `update_run` call fail.
    pub fn failing_update_at(mut self, index: usize) -> Self {
        self.fail_updates.insert(index);
        self
    }

    /// Make `complete_run` fail.
    pub fn failing_complete(mut self) -> Self {
        self.fail_complete = true;
        self
    }

    /// Snapshot of every call attempted so far, in order.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Sizes of the annotation batches attempted so far, in order.
    pub fn update_sizes(&self) -> Vec<usize> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter_map(|call| match call {
                RecordedCall::Update { annotation_count } => Some(*annotation_count),
                _ => None,
            })
            .collect()
    }

    fn injected_failure() -> ChecksError {
        ChecksError::Status {
            status: 502,
            body: "injected transport failure".to_string(),
        }
    }
}

#[async_trait]
impl ChecksService for RecordingChecksService {
    async fn create_run(&self, run: &NewCheckRun) -> ChecksResult<CheckRunId> {
        self.calls.lock().unwrap().push(RecordedCall::Create {
            name: run.name.clone(),
            head_sha: run.head_sha.clone(),
        });
        if self.fail_create {
            return Err(Self::injected_failure());
        }
        Ok(CheckRunId(1))
    }

    async fn update_run(&self, _id: &CheckRunId, output: &CheckOutput) -> ChecksResult<()> {
        let update_index = {
            let mut calls = self.calls.lock().unwrap();
            let index = calls
                .iter()
                .filter(|call| matches!(call, RecordedCall::Update { .. }))
                .count();
            calls.push(RecordedCall::Update {
                annotation_count: output.annotations.len(),
            });
            index
        };
        if self.fail_updates.contains(&update_index) {
            return Err(Self::injected_failure());
        }
        Ok(())
    }

    async fn complete_run(
        &self,
        _id: &CheckRunId,
        completion: &CheckCompletion,
    ) -> ChecksResult<()> {
        self.calls.lock().unwrap().push(RecordedCall::Complete {
            conclusion: completion.conclusion,
            summary: completion.summary.clone(),
        });
        if self.fail_complete {
            return Err(Self::injected_failure());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn new_run() -> NewCheckRun {
        NewCheckRun {
            name: "rustfmt".to_string(),
            head_sha: "abc123".to_string(),
            started_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_records_calls_in_order() {
        let service = RecordingChecksService::new();
        let id = service.create_run(&new_run()).await.expect("create");
        service
            .update_run(
                &id,
                &CheckOutput {
                    title: "rustfmt".to_string(),
                    summary: String::new(),
                    annotations: Vec::new(),
                },
            )
            .await
            .expect("update");
        service
            .complete_run(
                &id,
                &CheckCompletion {
                    conclusion: Conclusion::Success,
                    completed_at: Utc::now(),
                    title: "rustfmt".to_string(),
                    summary: "all clean".to_string(),
                },
            )
            .await
            .expect("complete");

        let calls = service.calls();
        assert_eq!(calls.len(), 3);
        assert!(matches!(calls[0], RecordedCall::Create { .. }));
        assert!(matches!(calls[1], RecordedCall::Update { .. }));
        assert!(matches!(calls[2], RecordedCall::Complete { .. }));
    }

    #[tokio::test]
    async fn test_failing_update_is_still_recorded() {
        let service = RecordingChecksService::new().failing_update_at(0);
        let id = CheckRunId(1);
        let output = CheckOutput {
            title: "rustfmt".to_string(),
            summary: String::new(),
            annotations: Vec::new(),
        };

        let result = service.update_run(&id, &output).await;
        assert!(result.is_err());
        assert_eq!(service.update_sizes(), vec![0]);
    }

    #[tokio::test]
    async fn test_failure_injection_targets_specific_update() {
        let service = RecordingChecksService::new().failing_update_at(1);
        let id = CheckRunId(1);
        let output = CheckOutput {
            title: "rustfmt".to_string(),
            summary: String::new(),
            annotations: Vec::new(),
        };

        assert!(service.update_run(&id, &output).await.is_ok());
        assert!(service.update_run(&id, &output).await.is_err());
        assert!(service.update_run(&id, &output).await.is_ok());
    }

    #[tokio::test]
    async fn test_failing_create() {
        let service = RecordingChecksService::new().failing_create();
        let result = service.create_run(&new_run()).await;
        assert!(result.is_err());
        assert_eq!(service.calls().len(), 1);
    }
}
