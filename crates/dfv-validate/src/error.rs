use polars::prelude::{DataType, PolarsError};
use thiserror::Error;

/// Errors from dataset lookups and comparisons.
///
/// Rules turn these into failed expectations; they never escape a
/// `Validator` call.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("column not found: {0}")]
    ColumnNotFound(String),
    #[error("column '{column}' of type {dtype} cannot be compared with {literal}")]
    IncompatibleLiteral {
        column: String,
        dtype: DataType,
        literal: String,
    },
    #[error("columns '{left}' ({left_dtype}) and '{right}' ({right_dtype}) are not comparable")]
    IncompatibleColumns {
        left: String,
        left_dtype: DataType,
        right: String,
        right_dtype: DataType,
    },
    #[error("column '{column}' is not a string column (found {dtype})")]
    NotString { column: String, dtype: DataType },
    #[error(transparent)]
    Polars(#[from] PolarsError),
}

pub type Result<T> = std::result::Result<T, DatasetError>;
