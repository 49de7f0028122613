//! Expectation-based validation of polars `DataFrame`s.
//!
//! A [`Validator`] wraps a [`Dataset`] and evaluates named expectations
//! against it. Each evaluation appends one entry to the result ledger and the
//! failing rows, tagged with `expectation_name` and `expectation_args`, to the
//! failure ledger. The validator stays valid until the first failed
//! expectation.

pub mod dataset;
pub mod error;
pub mod ledger;
pub mod rules;
pub mod validator;

pub use dataset::{Comparison, Dataset, count_flagged};
pub use error::DatasetError;
pub use ledger::{EXPECTATION_ARGS_COLUMN, EXPECTATION_NAME_COLUMN, FailureLedger, ResultLedger};
pub use rules::{Evaluation, Outcome, evaluate};
pub use validator::Validator;

pub use dfv_model::{
    Expectation, ExpectationResult, ExpectationSuite, RenderConfig, ResultStyle, ScalarValue,
    StubExpectation, ValidationError, ValidatorError, ValidatorOptions,
};
pub use dfv_report::{CsvFailureSink, FailureSink, MemorySink};
