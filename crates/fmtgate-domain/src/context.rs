//! Identity and context for a single check-run invocation.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Version strings of the tools involved in a check, keyed by tool name.
///
/// Informational only; surfaced in the completed report's summary. The map
/// is ordered so the rendered summary is deterministic.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ToolVersions(BTreeMap<String, String>);

impl ToolVersions {
    /// Create an empty version map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a tool's version string.
    pub fn with_tool(mut self, name: impl Into<String>, version: impl Into<String>) -> Self {
        self.0.insert(name.into(), version.into());
        self
    }

    /// Whether no versions were recorded.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate tool name / version pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Per-invocation check identity.
///
/// Constructed once by the caller before the formatter runs, then passed by
/// reference into the reporter. Never persisted beyond the invocation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CheckContext {
    /// Repository owner (user or organization).
    pub owner: String,

    /// Repository name.
    pub repo: String,

    /// Commit identifier under review.
    pub head_sha: String,

    /// Display name of the check.
    pub name: String,

    /// Captured before the formatter ran.
    pub started_at: DateTime<Utc>,

    /// Toolchain versions surfaced in the completed summary.
    pub tool_versions: ToolVersions,
}

impl CheckContext {
    /// Create a context for a repository and commit.
    pub fn new(
        owner: impl Into<String>,
        repo: impl Into<String>,
        head_sha: impl Into<String>,
        name: impl Into<String>,
        started_at: DateTime<Utc>,
    ) -> Self {
        Self {
            owner: owner.into(),
            repo: repo.into(),
            head_sha: head_sha.into(),
            name: name.into(),
            started_at,
            tool_versions: ToolVersions::new(),
        }
    }

    /// Attach toolchain versions.
    pub fn with_tool_versions(mut self, tool_versions: ToolVersions) -> Self {
        self.tool_versions = tool_versions;
        self
    }
}
