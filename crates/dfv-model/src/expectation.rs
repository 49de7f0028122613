//! The expectation catalog.
//!
//! Each variant names one rule and carries its parameters. Evaluation lives
//! in `dfv-validate`; this module only describes the rules and renders their
//! arguments for the ledgers.

use serde::{Deserialize, Serialize};

use crate::value::ScalarValue;

/// A single named, parameterized rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Expectation {
    /// The column is present in the dataset.
    ColumnToExist { column: String },
    /// Every value of the column is distinct (nulls compare equal).
    ColumnToContainUniqueValues { column: String },
    /// Every non-null value is strictly greater than `value`.
    ///
    /// `allow_nulls` is recorded but not applied: null rows are always
    /// skipped.
    ColumnValueGreaterThan {
        column: String,
        value: ScalarValue,
        #[serde(default)]
        allow_nulls: bool,
    },
    /// Every value is a member of `values`.
    ColumnValueToBeInSet {
        column: String,
        values: Vec<ScalarValue>,
    },
    /// Every non-null string is longer than `length` characters.
    ColumnValueLengthGreaterThan { column: String, length: usize },
    /// `column_a > column_b` on every row.
    ColumnAGreaterThanColumnB { column_a: String, column_b: String },
    /// Accepted but never evaluated.
    Unimplemented(StubExpectation),
}

/// Rules that are part of the public surface but not evaluated yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StubExpectation {
    ValueToBeBetween {
        column: String,
        low: ScalarValue,
        high: ScalarValue,
    },
    ValueToMatchRegex { column: String, pattern: String },
    ToBeOfType { column: String, type_name: String },
}

impl StubExpectation {
    pub fn name(&self) -> &'static str {
        match self {
            Self::ValueToBeBetween { .. } => "expect_column_value_to_be_between",
            Self::ValueToMatchRegex { .. } => "expect_column_value_to_match_regex",
            Self::ToBeOfType { .. } => "expect_column_to_be_of_type",
        }
    }

    pub fn column(&self) -> &str {
        match self {
            Self::ValueToBeBetween { column, .. }
            | Self::ValueToMatchRegex { column, .. }
            | Self::ToBeOfType { column, .. } => column,
        }
    }
}

impl Expectation {
    /// Identifier written to the `expectation_name` field of both ledgers.
    pub fn name(&self) -> &'static str {
        match self {
            Self::ColumnToExist { .. } => "expect_column_to_exist",
            Self::ColumnToContainUniqueValues { .. } => "expect_column_to_contain_unique_values",
            Self::ColumnValueGreaterThan { .. } => "expect_column_value_greater_than",
            Self::ColumnValueToBeInSet { .. } => "expect_column_value_to_be_in_set",
            Self::ColumnValueLengthGreaterThan { .. } => "expect_column_value_length_greater_than",
            Self::ColumnAGreaterThanColumnB { .. } => "expect_column_a_greater_than_column_b",
            Self::Unimplemented(stub) => stub.name(),
        }
    }

    /// Column the outcome is attributed to (the left operand for
    /// multi-column rules).
    pub fn column(&self) -> &str {
        match self {
            Self::ColumnToExist { column }
            | Self::ColumnToContainUniqueValues { column }
            | Self::ColumnValueGreaterThan { column, .. }
            | Self::ColumnValueToBeInSet { column, .. }
            | Self::ColumnValueLengthGreaterThan { column, .. } => column,
            Self::ColumnAGreaterThanColumnB { column_a, .. } => column_a,
            Self::Unimplemented(stub) => stub.column(),
        }
    }

    pub fn is_stub(&self) -> bool {
        matches!(self, Self::Unimplemented(_))
    }

    /// Whether the rule produces row-level failures.
    pub fn has_row_failures(&self) -> bool {
        !matches!(self, Self::ColumnToExist { .. } | Self::Unimplemented(_))
    }

    /// Arguments for the result ledger: every parameter except the column(s).
    pub fn args(&self) -> String {
        render_pairs(&self.value_params())
    }

    /// Arguments for the failure ledger: column parameters first, then the
    /// remaining parameters in declaration order.
    pub fn provenance_args(&self) -> String {
        let mut pairs = self.column_params();
        pairs.extend(self.value_params());
        render_pairs(&pairs)
    }

    fn column_params(&self) -> Vec<(&'static str, String)> {
        match self {
            Self::ColumnAGreaterThanColumnB { column_a, column_b } => vec![
                ("column_a", quoted(column_a)),
                ("column_b", quoted(column_b)),
            ],
            Self::Unimplemented(_) => Vec::new(),
            other => vec![("column_name", quoted(other.column()))],
        }
    }

    fn value_params(&self) -> Vec<(&'static str, String)> {
        match self {
            Self::ColumnValueGreaterThan {
                value, allow_nulls, ..
            } => vec![
                ("value", value.to_string()),
                ("allow_nulls", allow_nulls.to_string()),
            ],
            Self::ColumnValueToBeInSet { values, .. } => {
                let rendered: Vec<String> = values.iter().map(ToString::to_string).collect();
                vec![("values", format!("[{}]", rendered.join(", ")))]
            }
            Self::ColumnValueLengthGreaterThan { length, .. } => {
                vec![("length", length.to_string())]
            }
            _ => Vec::new(),
        }
    }
}

fn quoted(value: &str) -> String {
    format!("{value:?}")
}

fn render_pairs(pairs: &[(&'static str, String)]) -> String {
    pairs
        .iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// An ordered list of expectations, typically loaded from JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExpectationSuite {
    #[serde(default)]
    pub name: Option<String>,
    pub expectations: Vec<Expectation>,
}

impl ExpectationSuite {
    pub fn new(expectations: Vec<Expectation>) -> Self {
        Self {
            name: None,
            expectations,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn len(&self) -> usize {
        self.expectations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expectations.is_empty()
    }
}

impl IntoIterator for ExpectationSuite {
    type Item = Expectation;
    type IntoIter = std::vec::IntoIter<Expectation>;

    fn into_iter(self) -> Self::IntoIter {
        self.expectations.into_iter()
    }
}
