//! The validator: one dataset, two ledgers and an aggregate flag.

use std::path::{Path, PathBuf};

use polars::prelude::DataFrame;
use tracing::{debug, info, info_span, trace, warn};

use dfv_model::{
    Expectation, ExpectationResult, ExpectationSuite, RenderConfig, ScalarValue, StubExpectation,
    ValidationError, ValidatorError, ValidatorOptions,
};
use dfv_report::FailureSink;

use crate::dataset::Dataset;
use crate::ledger::{FailureLedger, ResultLedger};
use crate::rules::{self, Outcome};

/// Checks expectations against one dataset and records the outcomes.
///
/// Expectation methods mutate the validator in place and return it so calls
/// can be chained:
///
/// ```no_run
/// use dfv_validate::Validator;
/// # fn run(frame: polars::prelude::DataFrame) -> Result<(), Box<dyn std::error::Error>> {
/// let mut validator = Validator::new(frame);
/// validator
///     .expect_column_to_exist("Member ID")
///     .expect_column_to_contain_unique_values("Member ID")
///     .expect_column_value_greater_than("Age", 17, false);
/// println!("{}", validator.render_results());
/// validator.raise_if_invalid()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Validator {
    dataset: Dataset,
    options: ValidatorOptions,
    render_config: RenderConfig,
    results: ResultLedger,
    failures: FailureLedger,
    valid: bool,
}

impl Validator {
    pub fn new(dataset: impl Into<Dataset>) -> Self {
        Self::with_options(dataset, ValidatorOptions::default())
    }

    pub fn with_options(dataset: impl Into<Dataset>, options: ValidatorOptions) -> Self {
        if options.quarantine {
            warn!("quarantine is not implemented; use export_failures to persist failing rows");
        }
        Self {
            dataset: dataset.into(),
            options,
            render_config: RenderConfig::default(),
            results: ResultLedger::new(),
            failures: FailureLedger::new(),
            valid: true,
        }
    }

    #[must_use]
    pub fn with_render_config(mut self, config: RenderConfig) -> Self {
        self.render_config = config;
        self
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn options(&self) -> &ValidatorOptions {
        &self.options
    }

    pub fn expect_column_to_exist(&mut self, column: &str) -> &mut Self {
        self.record(Expectation::ColumnToExist {
            column: column.to_string(),
        })
    }

    pub fn expect_column_to_contain_unique_values(&mut self, column: &str) -> &mut Self {
        self.record(Expectation::ColumnToContainUniqueValues {
            column: column.to_string(),
        })
    }

    /// Non-null values must be strictly greater than `value`.
    ///
    /// `allow_nulls` is recorded in the arguments but does not change the
    /// outcome; null rows never fail this rule.
    pub fn expect_column_value_greater_than(
        &mut self,
        column: &str,
        value: impl Into<ScalarValue>,
        allow_nulls: bool,
    ) -> &mut Self {
        self.record(Expectation::ColumnValueGreaterThan {
            column: column.to_string(),
            value: value.into(),
            allow_nulls,
        })
    }

    pub fn expect_column_value_to_be_in_set<I, V>(&mut self, column: &str, values: I) -> &mut Self
    where
        I: IntoIterator<Item = V>,
        V: Into<ScalarValue>,
    {
        self.record(Expectation::ColumnValueToBeInSet {
            column: column.to_string(),
            values: values.into_iter().map(Into::into).collect(),
        })
    }

    /// Every non-null string must be longer than `length` characters.
    ///
    /// # Errors
    ///
    /// Returns [`ValidatorError::TypeMismatch`] if the column is not a string
    /// column. Neither ledger is touched in that case.
    pub fn expect_column_value_length_greater_than(
        &mut self,
        column: &str,
        length: usize,
    ) -> Result<&mut Self, ValidatorError> {
        self.apply(Expectation::ColumnValueLengthGreaterThan {
            column: column.to_string(),
            length,
        })
    }

    /// `column_a > column_b` on every row; attributed to `column_a`.
    pub fn expect_column_a_greater_than_column_b(
        &mut self,
        column_a: &str,
        column_b: &str,
    ) -> &mut Self {
        self.record(Expectation::ColumnAGreaterThanColumnB {
            column_a: column_a.to_string(),
            column_b: column_b.to_string(),
        })
    }

    /// Not evaluated yet; nothing is recorded.
    pub fn expect_column_value_to_be_between(
        &mut self,
        column: &str,
        low: impl Into<ScalarValue>,
        high: impl Into<ScalarValue>,
    ) -> &mut Self {
        self.record(Expectation::Unimplemented(
            StubExpectation::ValueToBeBetween {
                column: column.to_string(),
                low: low.into(),
                high: high.into(),
            },
        ))
    }

    /// Not evaluated yet; nothing is recorded.
    pub fn expect_column_value_to_match_regex(&mut self, column: &str, pattern: &str) -> &mut Self {
        self.record(Expectation::Unimplemented(
            StubExpectation::ValueToMatchRegex {
                column: column.to_string(),
                pattern: pattern.to_string(),
            },
        ))
    }

    /// Not evaluated yet; nothing is recorded.
    pub fn expect_column_to_be_of_type(&mut self, column: &str, type_name: &str) -> &mut Self {
        self.record(Expectation::Unimplemented(StubExpectation::ToBeOfType {
            column: column.to_string(),
            type_name: type_name.to_string(),
        }))
    }

    /// Evaluate one expectation and record it.
    ///
    /// # Errors
    ///
    /// Returns [`ValidatorError::TypeMismatch`] for a string rule on a
    /// non-string column and [`ValidatorError::LedgerMerge`] when the failing
    /// rows cannot be stacked. Neither ledger changes on error.
    pub fn apply(&mut self, expectation: Expectation) -> Result<&mut Self, ValidatorError> {
        self.evaluate_and_record(&expectation)?;
        Ok(self)
    }

    /// Apply expectations in order, stopping at the first error.
    ///
    /// # Errors
    ///
    /// See [`Validator::apply`]. Expectations before the failing one stay
    /// recorded.
    pub fn apply_all<I>(&mut self, expectations: I) -> Result<&mut Self, ValidatorError>
    where
        I: IntoIterator<Item = Expectation>,
    {
        for expectation in expectations {
            self.evaluate_and_record(&expectation)?;
        }
        Ok(self)
    }

    /// Apply every expectation of a suite.
    ///
    /// # Errors
    ///
    /// See [`Validator::apply_all`].
    pub fn run_suite(&mut self, suite: ExpectationSuite) -> Result<&mut Self, ValidatorError> {
        let span = info_span!(
            "suite",
            name = suite.name.as_deref().unwrap_or("unnamed"),
            expectations = suite.len()
        );
        let _guard = span.enter();
        self.apply_all(suite)
    }

    /// Entries in invocation order.
    pub fn results(&self) -> &[ExpectationResult] {
        self.results.as_slice()
    }

    pub fn result_ledger(&self) -> &ResultLedger {
        &self.results
    }

    /// Every failing row, tagged with its expectation.
    pub fn failures(&self) -> &DataFrame {
        self.failures.frame()
    }

    pub fn failure_ledger(&self) -> &FailureLedger {
        &self.failures
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn failed_count(&self) -> usize {
        self.results.failed_count()
    }

    /// Result ledger as a text table, sorted by column name.
    pub fn render_results(&self) -> String {
        dfv_report::render_results(self.results(), &self.render_config)
    }

    /// Failure ledger as a text table.
    pub fn render_failures(&self) -> String {
        dfv_report::render_failures(self.failures(), &self.render_config)
    }

    /// Hand the failure ledger to `sink` unchanged.
    ///
    /// # Errors
    ///
    /// Propagates the sink's error.
    pub fn export_failures<S>(&self, sink: &mut S) -> dfv_report::Result<()>
    where
        S: FailureSink + ?Sized,
    {
        debug!(rows = self.failures.height(), "exporting failure ledger");
        sink.write_failures(self.failures())
    }

    /// Write the result ledger to `validation_results.json` in `output_dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or file cannot be written.
    pub fn write_results_json(&self, output_dir: &Path) -> dfv_report::Result<PathBuf> {
        dfv_report::write_results_json(output_dir, self.results())
    }

    /// # Errors
    ///
    /// Returns [`ValidationError`] with the number of failed expectations if
    /// any expectation failed.
    pub fn raise_if_invalid(&self) -> Result<(), ValidationError> {
        if self.valid {
            return Ok(());
        }
        let failed = self.failed_count();
        info!(failed, "validation failed");
        Err(ValidationError { failed })
    }

    /// Consume the validator, keeping both ledgers.
    pub fn into_ledgers(self) -> (ResultLedger, FailureLedger) {
        (self.results, self.failures)
    }

    /// Infallible entry point for the typed expectation methods: a merge
    /// error is recorded as a failed expectation instead of being returned.
    fn record(&mut self, expectation: Expectation) -> &mut Self {
        if let Err(err) = self.evaluate_and_record(&expectation) {
            warn!(
                expectation = expectation.name(),
                column = expectation.column(),
                error = %err,
                "failing rows could not be recorded"
            );
            self.push_result(&expectation, false, None);
        }
        self
    }

    fn evaluate_and_record(&mut self, expectation: &Expectation) -> Result<(), ValidatorError> {
        let evaluation = match rules::evaluate(expectation, &self.dataset)? {
            Outcome::Evaluated(evaluation) => evaluation,
            Outcome::Skipped => {
                trace!(
                    expectation = expectation.name(),
                    column = expectation.column(),
                    "expectation not implemented, skipping"
                );
                return Ok(());
            }
        };
        self.failures
            .append(
                expectation.name(),
                &expectation.provenance_args(),
                evaluation.failures,
            )
            .map_err(|err| ValidatorError::LedgerMerge {
                expectation: expectation.name().to_string(),
                message: err.to_string(),
            })?;
        debug!(
            expectation = expectation.name(),
            column = expectation.column(),
            passed = evaluation.passed,
            fail_rows = evaluation.fail_rows,
            "evaluated expectation"
        );
        self.push_result(expectation, evaluation.passed, evaluation.fail_rows);
        Ok(())
    }

    fn push_result(&mut self, expectation: &Expectation, passed: bool, fail_rows: Option<u64>) {
        let result = ExpectationResult {
            column_name: expectation.column().to_string(),
            expectation_name: expectation.name().to_string(),
            expectation_args: expectation.args(),
            result: passed,
            fail_rows,
        };
        self.valid &= result.passed();
        self.results.push(result);
    }
}
