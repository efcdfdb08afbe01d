//! Formatting mismatch diagnostics.
//!
//! Wire types for the formatter's machine-readable output: one [`Diagnostic`]
//! per file with at least one region where the produced output differs from
//! the expected output.

use serde::{Deserialize, Serialize};

/// One contiguous region where produced output differs from expected output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Mismatch {
    /// First affected line in the original file (1-indexed, inclusive).
    pub original_begin_line: u32,

    /// Last affected line in the original file (1-indexed, inclusive).
    pub original_end_line: u32,

    /// Text currently in the file. Empty for a pure insertion.
    #[serde(default)]
    pub original: String,

    /// Text the formatter expects instead. Empty for a pure deletion.
    #[serde(default)]
    pub expected: String,
}

impl Mismatch {
    /// Create a mismatch covering a line range of the original file.
    pub fn new(original_begin_line: u32, original_end_line: u32) -> Self {
        Self {
            original_begin_line,
            original_end_line,
            original: String::new(),
            expected: String::new(),
        }
    }

    /// Set the original text block.
    pub fn with_original(mut self, original: impl Into<String>) -> Self {
        self.original = original.into();
        self
    }

    /// Set the expected text block.
    pub fn with_expected(mut self, expected: impl Into<String>) -> Self {
        self.expected = expected.into();
        self
    }
}

/// All formatting mismatches reported for a single file.
///
/// `mismatches` preserves the order the formatter reported them in; an empty
/// list means the file was checked and found clean.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Diagnostic {
    /// File path relative to the repository root.
    ///
    /// Some formatter versions emit this under a `name` key with an absolute
    /// path; the caller relativizes it before reporting.
    #[serde(alias = "name")]
    pub path: String,

    /// Mismatches in reported order.
    #[serde(default)]
    pub mismatches: Vec<Mismatch>,
}

impl Diagnostic {
    /// Create a diagnostic for a file with no mismatches yet.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            mismatches: Vec::new(),
        }
    }

    /// Append a mismatch.
    pub fn with_mismatch(mut self, mismatch: Mismatch) -> Self {
        self.mismatches.push(mismatch);
        self
    }

    /// Whether the file had no formatting violations.
    pub fn is_clean(&self) -> bool {
        self.mismatches.is_empty()
    }
}
