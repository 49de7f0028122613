//! Expectation evaluation.
//!
//! Each rule maps a dataset and its parameters to a pass/fail decision plus
//! the rows that broke it. Rules never touch the ledgers; the validator
//! records what they return.
//!
//! Missing columns and incomparable types are not errors here. They are
//! logged and reported as a failed evaluation with no row count. The only
//! condition that aborts an expectation is a string rule applied to a
//! non-string column.

mod comparison;
mod length;
mod membership;
mod presence;
mod uniqueness;

use polars::prelude::{BooleanChunked, DataFrame};
use tracing::warn;

use dfv_model::{Expectation, ValidatorError};

use crate::dataset::Dataset;
use crate::error::DatasetError;

/// Outcome of one rule against one dataset.
#[derive(Debug, Clone)]
pub struct Evaluation {
    pub passed: bool,
    /// Number of failing rows; `None` when the rule has no row-level result
    /// or could not be evaluated.
    pub fail_rows: Option<u64>,
    /// Failing rows with the dataset's schema. Empty when nothing failed.
    pub failures: DataFrame,
}

impl Evaluation {
    /// Rows flagged by `mask` are the failures.
    fn from_mask(dataset: &Dataset, mask: &BooleanChunked) -> Result<Self, DatasetError> {
        let failures = dataset.filter(mask)?;
        Ok(Self::from_failures(failures))
    }

    fn from_failures(failures: DataFrame) -> Self {
        let count = failures.height();
        Self {
            passed: count == 0,
            fail_rows: Some(count as u64),
            failures,
        }
    }

    fn without_rows(dataset: &Dataset, passed: bool) -> Self {
        Self {
            passed,
            fail_rows: None,
            failures: dataset.frame().slice(0, 0),
        }
    }
}

#[derive(Debug, Clone)]
pub enum Outcome {
    Evaluated(Evaluation),
    /// Unimplemented expectation; nothing to record.
    Skipped,
}

/// Evaluate one expectation.
///
/// # Errors
///
/// Returns [`ValidatorError::TypeMismatch`] when the string-length rule is
/// applied to a column that exists but does not hold strings.
pub fn evaluate(expectation: &Expectation, dataset: &Dataset) -> Result<Outcome, ValidatorError> {
    let evaluated = match expectation {
        Expectation::ColumnToExist { column } => Ok(presence::column_exists(dataset, column)),
        Expectation::ColumnToContainUniqueValues { column } => {
            uniqueness::column_values_unique(dataset, column)
        }
        Expectation::ColumnValueGreaterThan { column, value, .. } => {
            comparison::value_greater_than(dataset, column, value)
        }
        Expectation::ColumnValueToBeInSet { column, values } => {
            membership::value_in_set(dataset, column, values)
        }
        Expectation::ColumnValueLengthGreaterThan { column, length } => {
            length::require_string_column(dataset, column)?;
            length::value_length_greater_than(dataset, column, *length)
        }
        Expectation::ColumnAGreaterThanColumnB { column_a, column_b } => {
            comparison::column_a_greater_than_column_b(dataset, column_a, column_b)
        }
        Expectation::Unimplemented(_) => return Ok(Outcome::Skipped),
    };
    let mut evaluation = evaluated.unwrap_or_else(|err| {
        warn!(
            expectation = expectation.name(),
            column = expectation.column(),
            error = %err,
            "expectation could not be evaluated, recording as failed"
        );
        Evaluation::without_rows(dataset, false)
    });
    if !expectation.has_row_failures() {
        evaluation.fail_rows = None;
    }
    Ok(Outcome::Evaluated(evaluation))
}
