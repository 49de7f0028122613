use dfv_model::ScalarValue;

use crate::dataset::{Comparison, Dataset};
use crate::error::DatasetError;

use super::Evaluation;

/// Relation both rules require of every non-null row.
const REQUIRED: Comparison = Comparison::Gt;

/// Non-null values at or below `threshold` fail.
pub(super) fn value_greater_than(
    dataset: &Dataset,
    column: &str,
    threshold: &ScalarValue,
) -> Result<Evaluation, DatasetError> {
    let mask = dataset.compare_scalar(column, REQUIRED.negated(), threshold)?;
    Evaluation::from_mask(dataset, &mask)
}

/// Rows where `column_a <= column_b` fail; rows with a null on either side
/// are skipped.
pub(super) fn column_a_greater_than_column_b(
    dataset: &Dataset,
    column_a: &str,
    column_b: &str,
) -> Result<Evaluation, DatasetError> {
    let mask = dataset.compare_columns(column_a, REQUIRED.negated(), column_b)?;
    Evaluation::from_mask(dataset, &mask)
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::{DataFrame, NamedFrom, Series};

    #[test]
    fn positive_values_pass() {
        let frame =
            DataFrame::new(vec![Series::new("x".into(), vec![1i64, 2, 3]).into()]).expect("frame");
        let evaluation =
            value_greater_than(&Dataset::new(frame), "x", &ScalarValue::Int(0)).expect("evaluate");
        assert!(evaluation.passed);
        assert_eq!(evaluation.fail_rows, Some(0));
    }

    #[test]
    fn threshold_itself_fails() {
        let frame = DataFrame::new(vec![
            Series::new("x".into(), vec![Some(0i64), Some(4), None, Some(-3)]).into(),
        ])
        .expect("frame");
        let evaluation =
            value_greater_than(&Dataset::new(frame), "x", &ScalarValue::Int(0)).expect("evaluate");
        assert!(!evaluation.passed);
        assert_eq!(evaluation.fail_rows, Some(2));
    }

    #[test]
    fn column_pair_failures_keep_schema() {
        let frame = DataFrame::new(vec![
            Series::new("joined".into(), vec![2010i64, 1990, 2005]).into(),
            Series::new("born".into(), vec![1980i64, 1995, 2005]).into(),
        ])
        .expect("frame");
        let evaluation =
            column_a_greater_than_column_b(&Dataset::new(frame), "joined", "born").expect("evaluate");
        assert!(!evaluation.passed);
        assert_eq!(evaluation.fail_rows, Some(2));
        assert_eq!(evaluation.failures.width(), 2);
    }
}
