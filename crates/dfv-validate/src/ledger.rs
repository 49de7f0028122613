//! Append-only records of what a validator has checked.
//!
//! The [`ResultLedger`] holds one entry per evaluated expectation. The
//! [`FailureLedger`] holds the failing rows of every expectation stacked into
//! one frame, each row tagged with the expectation that produced it.

use polars::prelude::{Column, DataFrame, NamedFrom, PolarsResult, Series};

use dfv_model::ExpectationResult;

/// Provenance column holding the expectation identifier.
pub const EXPECTATION_NAME_COLUMN: &str = "expectation_name";
/// Provenance column holding the rendered expectation arguments.
pub const EXPECTATION_ARGS_COLUMN: &str = "expectation_args";

/// Outcomes in invocation order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultLedger {
    entries: Vec<ExpectationResult>,
}

impl ResultLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, result: ExpectationResult) {
        self.entries.push(result);
    }

    pub fn as_slice(&self) -> &[ExpectationResult] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ExpectationResult> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn failed_count(&self) -> usize {
        self.entries.iter().filter(|entry| entry.failed()).count()
    }

    /// Sum of `fail_rows` over every entry that reports one.
    pub fn total_fail_rows(&self) -> u64 {
        self.entries.iter().filter_map(|entry| entry.fail_rows).sum()
    }

    /// Entries sorted by column name, ties in invocation order.
    pub fn ordered(&self) -> Vec<&ExpectationResult> {
        dfv_report::ordered_results(&self.entries)
    }

    /// The ledger as a frame with one row per entry, in invocation order.
    ///
    /// `fail_rows` is null for entries without a row count.
    pub fn to_frame(&self) -> PolarsResult<DataFrame> {
        let column_names: Vec<&str> = self.iter().map(|e| e.column_name.as_str()).collect();
        let names: Vec<&str> = self.iter().map(|e| e.expectation_name.as_str()).collect();
        let args: Vec<&str> = self.iter().map(|e| e.expectation_args.as_str()).collect();
        let results: Vec<bool> = self.iter().map(|e| e.result).collect();
        let fail_rows: Vec<Option<u64>> = self.iter().map(|e| e.fail_rows).collect();
        DataFrame::new(vec![
            Series::new("column_name".into(), column_names).into(),
            Series::new(EXPECTATION_NAME_COLUMN.into(), names).into(),
            Series::new(EXPECTATION_ARGS_COLUMN.into(), args).into(),
            Series::new("result".into(), results).into(),
            Series::new("fail_rows".into(), fail_rows).into(),
        ])
    }
}

impl<'a> IntoIterator for &'a ResultLedger {
    type Item = &'a ExpectationResult;
    type IntoIter = std::slice::Iter<'a, ExpectationResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Failing rows of every expectation, stacked.
///
/// Starts as a zero-width frame. The first append fixes the schema: the two
/// provenance columns followed by the dataset's columns.
#[derive(Debug, Clone)]
pub struct FailureLedger {
    frame: DataFrame,
}

impl Default for FailureLedger {
    fn default() -> Self {
        Self {
            frame: DataFrame::empty(),
        }
    }
}

impl FailureLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tag `rows` with provenance and stack them under the existing rows.
    ///
    /// `rows` may be empty; it still fixes the schema on the first append.
    pub fn append(
        &mut self,
        expectation_name: &str,
        expectation_args: &str,
        rows: DataFrame,
    ) -> PolarsResult<()> {
        let tagged = tag_rows(rows, expectation_name, expectation_args)?;
        if self.frame.width() == 0 {
            self.frame = tagged;
        } else {
            self.frame.vstack_mut(&tagged)?;
        }
        Ok(())
    }

    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    pub fn height(&self) -> usize {
        self.frame.height()
    }

    pub fn is_empty(&self) -> bool {
        self.frame.height() == 0
    }

    pub fn into_frame(self) -> DataFrame {
        self.frame
    }
}

fn tag_rows(mut rows: DataFrame, name: &str, args: &str) -> PolarsResult<DataFrame> {
    let height = rows.height();
    rows.insert_column(0, Column::new(EXPECTATION_NAME_COLUMN.into(), vec![name; height]))?;
    rows.insert_column(1, Column::new(EXPECTATION_ARGS_COLUMN.into(), vec![args; height]))?;
    Ok(rows)
}
