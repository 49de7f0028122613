//! Shared utilities for the dataframe validator crates.
//!
//! Polars `AnyValue` formatting helpers and the tracing subscriber setup
//! used by applications embedding the validator.

pub mod logging;
pub mod polars;

pub use polars::{
    any_to_string, format_numeric, is_numeric_dtype, is_string_dtype, is_temporal_dtype,
};
