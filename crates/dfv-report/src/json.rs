//! JSON export of the result ledger.

use std::path::{Path, PathBuf};

use serde::Serialize;

use dfv_model::ExpectationResult;

use crate::error::{ReportError, Result};

const RESULTS_SCHEMA: &str = "dataframe-validator.results";
const RESULTS_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Serialize)]
pub struct ResultsPayload<'a> {
    pub schema: &'static str,
    pub schema_version: u32,
    pub is_valid: bool,
    pub expectation_count: usize,
    pub failed_count: usize,
    pub results: &'a [ExpectationResult],
}

impl<'a> ResultsPayload<'a> {
    pub fn new(results: &'a [ExpectationResult]) -> Self {
        let failed_count = results.iter().filter(|result| result.failed()).count();
        Self {
            schema: RESULTS_SCHEMA,
            schema_version: RESULTS_SCHEMA_VERSION,
            is_valid: failed_count == 0,
            expectation_count: results.len(),
            failed_count,
            results,
        }
    }
}

/// Pretty-printed JSON in invocation order.
pub fn results_to_json(results: &[ExpectationResult]) -> Result<String> {
    Ok(serde_json::to_string_pretty(&ResultsPayload::new(results))?)
}

/// Write `validation_results.json` into `output_dir`.
pub fn write_results_json(output_dir: &Path, results: &[ExpectationResult]) -> Result<PathBuf> {
    std::fs::create_dir_all(output_dir)?;
    let output_path = output_dir.join("validation_results.json");
    let json = results_to_json(results)?;
    std::fs::write(&output_path, format!("{json}\n")).map_err(|source| ReportError::Create {
        path: output_path.clone(),
        source,
    })?;
    Ok(output_path)
}
