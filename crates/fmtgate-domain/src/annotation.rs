//! Review annotations derived from formatting diagnostics.
//!
//! [`build_annotations`] is the pure transformation at the head of the
//! reporting pipeline: it flattens diagnostics into the ordered annotation
//! list the check-run protocol consumes, one annotation per mismatch.

use serde::{Deserialize, Serialize};

use crate::diagnostic::{Diagnostic, Mismatch};

/// Severity level of an annotation, as the check-run protocol names them.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AnnotationLevel {
    Notice,
    Warning,
    Failure,
}

/// One reviewer-visible inline comment attached to a file/line range.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Annotation {
    /// File path relative to the repository root.
    pub path: String,

    /// First annotated line (1-indexed, inclusive).
    pub start_line: u32,

    /// Last annotated line (1-indexed, inclusive). Equals `start_line` when
    /// the source range collapses to zero lines (pure insertion).
    pub end_line: u32,

    /// Severity shown in the review UI.
    #[serde(rename = "annotation_level")]
    pub level: AnnotationLevel,

    /// Human-readable rendering of the mismatch, self-explanatory without a
    /// diff view.
    pub message: String,
}

/// Flatten diagnostics into the ordered annotation list.
///
/// One annotation per mismatch, file order then in-file order preserved.
/// Every mismatch is a real formatting violation, so the level is always
/// [`AnnotationLevel::Failure`]. Never fails: an inverted line range is
/// clamped rather than rejected, since this stage must not be where the
/// whole report dies.
pub fn build_annotations(diagnostics: &[Diagnostic]) -> Vec<Annotation> {
    diagnostics
        .iter()
        .flat_map(|diag| {
            diag.mismatches
                .iter()
                .map(|mismatch| annotate(&diag.path, mismatch))
        })
        .collect()
}

fn annotate(path: &str, mismatch: &Mismatch) -> Annotation {
    let start_line = mismatch.original_begin_line;
    // Clamp inverted ranges to the start line.
    let end_line = mismatch.original_end_line.max(start_line);

    Annotation {
        path: path.to_string(),
        start_line,
        end_line,
        level: AnnotationLevel::Failure,
        message: render_message(mismatch),
    }
}

/// Fenced two-part body showing the original and expected text verbatim.
fn render_message(mismatch: &Mismatch) -> String {
    format!(
        "Original:\n```\n{}\n```\nExpected:\n```\n{}\n```",
        mismatch.original, mismatch.expected
    )
}
