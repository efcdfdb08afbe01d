//! fmtgate report - batch check-run reporting
//!
//! Drives a single check run through its lifecycle against a
//! [`ChecksService`](fmtgate_checks::ChecksService):
//!
//! - Start: open the run in the in-progress state
//! - Annotate: push annotation batches under the per-request cap, in order
//! - Conclude: close the run with the aggregated pass/fail verdict
//!
//! Every failure is returned as a typed [`ReportError`]; nothing is thrown
//! past this boundary.

mod error;
mod reporter;

pub use error::{ReportError, ReportResult};
pub use reporter::{Reporter, ReporterConfig, ReportSummary};
