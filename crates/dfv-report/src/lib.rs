//! Presentation and export adapters for validator ledgers.
//!
//! - **Tables**: text rendering of the result and failure ledgers
//! - **Sinks**: persistence of the failure ledger (CSV, in-memory)
//! - **JSON**: machine-readable export of the result ledger

mod error;
mod json;
mod sink;
mod table;

pub use error::{ReportError, Result};
pub use json::{ResultsPayload, results_to_json, write_results_json};
pub use sink::{CsvFailureSink, FailureSink, MemorySink};
pub use table::{ordered_results, render_failures, render_results};
