use dfv_common::is_string_dtype;
use dfv_model::ValidatorError;

use crate::dataset::Dataset;
use crate::error::DatasetError;

use super::Evaluation;

/// A missing column passes through so it is recorded like any other
/// missing column.
pub(super) fn require_string_column(dataset: &Dataset, column: &str) -> Result<(), ValidatorError> {
    match dataset.dtype(column) {
        Ok(dtype) if !is_string_dtype(dtype) => Err(ValidatorError::TypeMismatch {
            column: column.to_string(),
            expected: "string".to_string(),
            actual: dtype.to_string(),
        }),
        _ => Ok(()),
    }
}

/// Strings of at most `length` characters fail. Nulls are skipped.
pub(super) fn value_length_greater_than(
    dataset: &Dataset,
    column: &str,
    length: usize,
) -> Result<Evaluation, DatasetError> {
    let mask = dataset.string_length_at_most(column, length)?;
    Evaluation::from_mask(dataset, &mask)
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::{DataFrame, NamedFrom, Series};

    #[test]
    fn short_strings_fail() {
        let frame = DataFrame::new(vec![
            Series::new("code".into(), vec![Some("AB123"), Some("AB"), None, Some("ABC")]).into(),
        ])
        .expect("frame");
        let data = Dataset::new(frame);
        require_string_column(&data, "code").expect("string column");
        let evaluation = value_length_greater_than(&data, "code", 3).expect("evaluate");
        assert!(!evaluation.passed);
        assert_eq!(evaluation.fail_rows, Some(2));
    }

    #[test]
    fn missing_column_is_not_a_type_mismatch() {
        let frame = DataFrame::new(vec![Series::new("code".into(), vec!["A"]).into()])
            .expect("frame");
        assert!(require_string_column(&Dataset::new(frame), "other").is_ok());
    }
}
