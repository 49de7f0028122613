pub mod error;
pub mod expectation;
pub mod options;
pub mod result;
pub mod value;

pub use error::{ValidationError, ValidatorError};
pub use expectation::{Expectation, ExpectationSuite, StubExpectation};
pub use options::{RenderConfig, ResultStyle, ValidatorOptions};
pub use result::ExpectationResult;
pub use value::ScalarValue;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_reports_failed_count() {
        let err = ValidationError { failed: 3 };
        assert_eq!(err.to_string(), "Validation failed for 3 expectations");
    }

    #[test]
    fn result_serializes() {
        let result = ExpectationResult {
            column_name: "Index".to_string(),
            expectation_name: "expect_column_to_contain_unique_values".to_string(),
            expectation_args: String::new(),
            result: false,
            fail_rows: Some(2),
        };
        let json = serde_json::to_string(&result).expect("serialize result");
        let round: ExpectationResult = serde_json::from_str(&json).expect("deserialize result");
        assert_eq!(round, result);
    }
}
