//! GitHub REST implementation of the check-run protocol.
//!
//! Talks to `POST /repos/{owner}/{repo}/check-runs` and
//! `PATCH /repos/{owner}/{repo}/check-runs/{id}`. The authorization token is
//! a capability: it is held and sent, never inspected or logged.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use fmtgate_domain::{Annotation, Conclusion};

use crate::error::ChecksError;
use crate::service::{
    CheckCompletion, CheckOutput, CheckRunId, ChecksResult, ChecksService, NewCheckRun,
};

const DEFAULT_API_BASE: &str = "https://api.github.com";
const ACCEPT_HEADER: &str = "application/vnd.github+json";
const API_VERSION_HEADER: &str = "2022-11-28";

/// GitHub checks API client for one repository.
pub struct GithubChecksClient {
    http: reqwest::Client,
    api_base: String,
    owner: String,
    repo: String,
    token: String,
}

impl GithubChecksClient {
    /// Create a client for a repository with a bearer token.
    pub fn new(
        owner: impl Into<String>,
        repo: impl Into<String>,
        token: impl Into<String>,
    ) -> ChecksResult<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("fmtgate/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(GithubChecksClient {
            http,
            api_base: DEFAULT_API_BASE.to_string(),
            owner: owner.into(),
            repo: repo.into(),
            token: token.into(),
        })
    }

    /// Point the client at a non-default API base (e.g. GitHub Enterprise).
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    fn runs_url(&self) -> String {
        format!(
            "{}/repos/{}/{}/check-runs",
            self.api_base, self.owner, self.repo
        )
    }

    fn run_url(&self, id: &CheckRunId) -> String {
        format!("{}/{}", self.runs_url(), id)
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> ChecksResult<reqwest::Response> {
        let response = request
            .bearer_auth(&self.token)
            .header(reqwest::header::ACCEPT, ACCEPT_HEADER)
            .header("X-GitHub-Api-Version", API_VERSION_HEADER)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ChecksError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}

#[async_trait]
impl ChecksService for GithubChecksClient {
    async fn create_run(&self, run: &NewCheckRun) -> ChecksResult<CheckRunId> {
        debug!(name = %run.name, head_sha = %run.head_sha, "creating check run");

        let body = CreateCheckRunRequest {
            name: &run.name,
            head_sha: &run.head_sha,
            status: "in_progress",
            started_at: run.started_at,
        };
        let response = self.send(self.http.post(self.runs_url()).json(&body)).await?;

        let created: CheckRunCreated = response
            .json()
            .await
            .map_err(|e| ChecksError::Decode(e.to_string()))?;

        debug!(check_run = created.id, "check run created");
        Ok(CheckRunId(created.id))
    }

    async fn update_run(&self, id: &CheckRunId, output: &CheckOutput) -> ChecksResult<()> {
        debug!(
            check_run = %id,
            annotations = output.annotations.len(),
            "updating check run"
        );

        let body = UpdateCheckRunRequest {
            output: OutputBody {
                title: &output.title,
                summary: &output.summary,
                annotations: Some(&output.annotations),
            },
        };
        self.send(self.http.patch(self.run_url(id)).json(&body))
            .await?;
        Ok(())
    }

    async fn complete_run(
        &self,
        id: &CheckRunId,
        completion: &CheckCompletion,
    ) -> ChecksResult<()> {
        debug!(check_run = %id, conclusion = %completion.conclusion, "completing check run");

        let body = CompleteCheckRunRequest {
            status: "completed",
            conclusion: completion.conclusion,
            completed_at: completion.completed_at,
            output: OutputBody {
                title: &completion.title,
                summary: &completion.summary,
                annotations: None,
            },
        };
        self.send(self.http.patch(self.run_url(id)).json(&body))
            .await?;
        Ok(())
    }
}

// Wire bodies for the three calls.

#[derive(Serialize)]
struct CreateCheckRunRequest<'a> {
    name: &'a str,
    head_sha: &'a str,
    status: &'a str,
    started_at: DateTime<Utc>,
}

#[derive(Deserialize)]
struct CheckRunCreated {
    id: u64,
}

#[derive(Serialize)]
struct UpdateCheckRunRequest<'a> {
    output: OutputBody<'a>,
}

#[derive(Serialize)]
struct CompleteCheckRunRequest<'a> {
    status: &'a str,
    conclusion: Conclusion,
    completed_at: DateTime<Utc>,
    output: OutputBody<'a>,
}

#[derive(Serialize)]
struct OutputBody<'a> {
    title: &'a str,
    summary: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    annotations: Option<&'a [Annotation]>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use fmtgate_domain::AnnotationLevel;

    #[test]
    fn test_urls_include_repository_coordinates() {
        let client = GithubChecksClient::new("acme", "widgets", "token").expect("client");
        assert_eq!(
            client.runs_url(),
            "https://api.github.com/repos/acme/widgets/check-runs"
        );
        assert_eq!(
            client.run_url(&CheckRunId(7)),
            "https://api.github.com/repos/acme/widgets/check-runs/7"
        );
    }

    #[test]
    fn test_with_api_base_overrides_default() {
        let client = GithubChecksClient::new("acme", "widgets", "token")
            .expect("client")
            .with_api_base("https://ghe.example.com/api/v3");
        assert_eq!(
            client.runs_url(),
            "https://ghe.example.com/api/v3/repos/acme/widgets/check-runs"
        );
    }

    #[test]
    fn test_create_body_wire_shape() {
        let body = CreateCheckRunRequest {
            name: "rustfmt",
            head_sha: "abc123",
            status: "in_progress",
            started_at: Utc::now(),
        };
        let value = serde_json::to_value(&body).expect("serialize");
        assert_eq!(value["name"], "rustfmt");
        assert_eq!(value["head_sha"], "abc123");
        assert_eq!(value["status"], "in_progress");
        assert!(value["started_at"].is_string());
    }

    #[test]
    fn test_update_body_carries_annotations() {
        let annotations = vec![Annotation {
            path: "src/lib.rs".to_string(),
            start_line: 3,
            end_line: 4,
            level: AnnotationLevel::Failure,
            message: "Original:\n```\nx\n```\nExpected:\n```\ny\n```".to_string(),
        }];
        let body = UpdateCheckRunRequest {
            output: OutputBody {
                title: "rustfmt",
                summary: "1 annotation",
                annotations: Some(&annotations),
            },
        };
        let value = serde_json::to_value(&body).expect("serialize");
        let wire = &value["output"]["annotations"][0];
        assert_eq!(wire["path"], "src/lib.rs");
        assert_eq!(wire["start_line"], 3);
        assert_eq!(wire["end_line"], 4);
        assert_eq!(wire["annotation_level"], "failure");
    }

    #[test]
    fn test_complete_body_omits_annotations() {
        let body = CompleteCheckRunRequest {
            status: "completed",
            conclusion: Conclusion::Failure,
            completed_at: Utc::now(),
            output: OutputBody {
                title: "rustfmt",
                summary: "2 of 3 files need formatting",
                annotations: None,
            },
        };
        let value = serde_json::to_value(&body).expect("serialize");
        assert_eq!(value["status"], "completed");
        assert_eq!(value["conclusion"], "failure");
        assert!(value["output"].get("annotations").is_none());
    }
}
