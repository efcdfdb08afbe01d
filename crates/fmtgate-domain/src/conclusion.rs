//! Check-run conclusion aggregation.

use serde::{Deserialize, Serialize};

use crate::diagnostic::Diagnostic;

/// Terminal pass/fail verdict of a check run.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Conclusion {
    Success,
    Failure,
}

impl Conclusion {
    /// Aggregate the overall verdict from per-file diagnostics.
    ///
    /// Rule: success iff no diagnostic contains any mismatch. Files that were
    /// checked and found clean do not affect the verdict.
    pub fn of(diagnostics: &[Diagnostic]) -> Self {
        if diagnostics.iter().all(Diagnostic::is_clean) {
            Conclusion::Success
        } else {
            Conclusion::Failure
        }
    }

    /// Whether this conclusion is a pass.
    pub fn is_success(&self) -> bool {
        matches!(self, Conclusion::Success)
    }
}

impl std::fmt::Display for Conclusion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Conclusion::Success => write!(f, "success"),
            Conclusion::Failure => write!(f, "failure"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostic::Mismatch;

    #[test]
    fn test_empty_diagnostics_is_success() {
        assert_eq!(Conclusion::of(&[]), Conclusion::Success);
    }

    #[test]
    fn test_all_clean_is_success() {
        let diagnostics = vec![Diagnostic::new("src/a.rs"), Diagnostic::new("src/b.rs")];
        assert_eq!(Conclusion::of(&diagnostics), Conclusion::Success);
        assert!(Conclusion::of(&diagnostics).is_success());
    }

    #[test]
    fn test_any_mismatch_is_failure() {
        let diagnostics = vec![
            Diagnostic::new("src/a.rs"),
            Diagnostic::new("src/b.rs").with_mismatch(Mismatch::new(1, 1)),
        ];
        assert_eq!(Conclusion::of(&diagnostics), Conclusion::Failure);
    }

    #[test]
    fn test_wire_form_is_lowercase() {
        let json = serde_json::to_string(&Conclusion::Success).expect("serialize");
        assert_eq!(json, "\"success\"");
        let json = serde_json::to_string(&Conclusion::Failure).expect("serialize");
        assert_eq!(json, "\"failure\"");
    }

    #[test]
    fn test_display() {
        assert_eq!(Conclusion::Success.to_string(), "success");
        assert_eq!(Conclusion::Failure.to_string(), "failure");
    }
}
