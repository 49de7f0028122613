use dfv_model::ScalarValue;

use crate::dataset::Dataset;
use crate::error::DatasetError;

use super::Evaluation;

pub(super) fn value_in_set(
    dataset: &Dataset,
    column: &str,
    allowed: &[ScalarValue],
) -> Result<Evaluation, DatasetError> {
    let mask = dataset.not_in_set(column, allowed)?;
    Evaluation::from_mask(dataset, &mask)
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::{DataFrame, NamedFrom, Series};

    #[test]
    fn non_members_fail() {
        let frame = DataFrame::new(vec![
            Series::new("status".into(), vec!["Active", "Inactive", "Retired"]).into(),
        ])
        .expect("frame");
        let allowed: Vec<ScalarValue> = vec!["Active".into(), "Retired".into(), "Deferred".into()];
        let evaluation = value_in_set(&Dataset::new(frame), "status", &allowed).expect("evaluate");
        assert!(!evaluation.passed);
        assert_eq!(evaluation.fail_rows, Some(1));
    }

    #[test]
    fn integer_column_matches_float_members() {
        let frame =
            DataFrame::new(vec![Series::new("n".into(), vec![1i32, 2]).into()]).expect("frame");
        let allowed = vec![ScalarValue::Float(1.0), ScalarValue::Float(2.0)];
        let evaluation = value_in_set(&Dataset::new(frame), "n", &allowed).expect("evaluate");
        assert!(evaluation.passed);
    }
}
