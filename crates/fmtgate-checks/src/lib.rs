//! fmtgate checks protocol
//!
//! The remote check-run contract and its implementations. A check run has a
//! three-call lifecycle:
//!
//! - create run (name, head_sha, started_at, status=in_progress) -> run id
//! - update run (run id, batch of annotations) -> ok/err
//! - complete run (run id, conclusion, completed_at, summary) -> ok/err
//!
//! The reporting pipeline depends only on the [`ChecksService`] trait, not on
//! any particular transport. [`GithubChecksClient`] implements it against the
//! GitHub REST API; in-memory fakes for testing live in [`fakes`].

mod error;
pub mod fakes;
mod github;
pub mod service;

pub use error::ChecksError;
pub use github::GithubChecksClient;
pub use service::{
    CheckCompletion, CheckOutput, CheckRunId, ChecksResult, ChecksService, NewCheckRun,
};
