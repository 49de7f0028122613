use crate::dataset::Dataset;
use crate::error::DatasetError;

use super::Evaluation;

/// Every row that shares its value with another row fails.
pub(super) fn column_values_unique(
    dataset: &Dataset,
    column: &str,
) -> Result<Evaluation, DatasetError> {
    let (_, duplicates) = dataset.is_unique(column)?;
    Ok(Evaluation::from_failures(duplicates))
}
