use serde::{Deserialize, Serialize};

/// Outcome of one expectation invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpectationResult {
    /// Primary column (left operand for multi-column rules).
    pub column_name: String,
    /// Identifier of the rule, e.g. `expect_column_to_exist`.
    pub expectation_name: String,
    /// Rendered non-column parameters.
    #[serde(default)]
    pub expectation_args: String,
    /// Whether the rule passed.
    pub result: bool,
    /// Number of failing rows; `None` for rules without row-level failures.
    pub fail_rows: Option<u64>,
}

impl ExpectationResult {
    pub fn passed(&self) -> bool {
        self.result
    }

    pub fn failed(&self) -> bool {
        !self.result
    }
}
