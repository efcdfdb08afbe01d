//! fmtgate domain model
//!
//! Pure data shapes and transformations shared by the reporting pipeline:
//! - `Diagnostic` / `Mismatch`: one file's formatting mismatches as emitted
//!   by the formatter's JSON output mode
//! - `Annotation`: one reviewer-visible inline comment derived from a mismatch
//! - `build_annotations`: the diagnostics -> annotations transformation
//! - `Conclusion`: the terminal pass/fail verdict of a check run
//! - `CheckContext`: per-invocation identity (repository, commit, timestamps)
//!
//! No I/O happens in this crate; everything here is deterministic.

pub mod annotation;
pub mod conclusion;
pub mod context;
pub mod diagnostic;

pub use annotation::{build_annotations, Annotation, AnnotationLevel};
pub use conclusion::Conclusion;
pub use context::{CheckContext, ToolVersions};
pub use diagnostic::{Diagnostic, Mismatch};

/// fmtgate domain version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
