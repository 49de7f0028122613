use crate::dataset::Dataset;

use super::Evaluation;

/// Passes iff the column exists. No row can fail.
pub(super) fn column_exists(dataset: &Dataset, column: &str) -> Evaluation {
    Evaluation {
        passed: dataset.has_column(column),
        ..Evaluation::from_failures(dataset.frame().slice(0, 0))
    }
}
