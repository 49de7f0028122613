//! Read-only view over the data being validated.
//!
//! Every operation leaves the underlying frame untouched; filters and masks
//! are returned as fresh values. Comparison masks never contain nulls: a row
//! whose value (or threshold) is null is reported as `false`, so nulls are
//! never flagged by a comparison.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use polars::prelude::{
    AnyValue, BooleanChunked, ChunkCompareIneq, Column, DataFrame, DataType, NamedFrom,
    NewChunkedArray, PolarsResult, Series, TimeUnit,
};

use dfv_common::{any_to_string, is_numeric_dtype, is_string_dtype, is_temporal_dtype};
use dfv_model::ScalarValue;

use crate::error::{DatasetError, Result};

/// Days between 0001-01-01 (CE day 1) and 1970-01-01.
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// Ordering test applied row by row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Gt,
    LtEq,
}

impl Comparison {
    /// The test that holds exactly where `self` does not, nulls aside.
    #[must_use]
    pub fn negated(self) -> Self {
        match self {
            Self::Gt => Self::LtEq,
            Self::LtEq => Self::Gt,
        }
    }

    fn apply(self, lhs: &Series, rhs: &Series) -> PolarsResult<BooleanChunked> {
        match self {
            Self::Gt => lhs.gt(rhs),
            Self::LtEq => lhs.lt_eq(rhs),
        }
    }
}

/// Shared, immutable handle to a `DataFrame`.
///
/// Cloning is cheap; several validators can check the same data.
#[derive(Debug, Clone)]
pub struct Dataset {
    frame: Arc<DataFrame>,
}

impl Dataset {
    pub fn new(frame: DataFrame) -> Self {
        Self {
            frame: Arc::new(frame),
        }
    }

    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.frame.get_column_index(name).is_some()
    }

    pub fn row_count(&self) -> usize {
        self.frame.height()
    }

    pub fn column_names(&self) -> Vec<String> {
        self.frame
            .get_column_names()
            .into_iter()
            .map(ToString::to_string)
            .collect()
    }

    pub fn column(&self, name: &str) -> Result<&Column> {
        self.frame
            .column(name)
            .map_err(|_| DatasetError::ColumnNotFound(name.to_string()))
    }

    pub fn dtype(&self, name: &str) -> Result<&DataType> {
        Ok(self.column(name)?.dtype())
    }

    /// Values of one column in row order.
    pub fn column_values(&self, name: &str) -> Result<Vec<AnyValue<'_>>> {
        let column = self.column(name)?;
        let mut values = Vec::with_capacity(column.len());
        for idx in 0..column.len() {
            values.push(column.get(idx)?);
        }
        Ok(values)
    }

    /// Rows whose value occurs more than once. Nulls compare equal to each
    /// other, so two null rows are duplicates of one another.
    pub fn duplicated_mask(&self, name: &str) -> Result<BooleanChunked> {
        let keys: Vec<Option<String>> = self
            .column_values(name)?
            .into_iter()
            .map(|value| match value {
                AnyValue::Null => None,
                other => Some(any_to_string(other)),
            })
            .collect();
        let mut counts: HashMap<&Option<String>, usize> = HashMap::new();
        for key in &keys {
            *counts.entry(key).or_insert(0) += 1;
        }
        let flags: Vec<bool> = keys
            .iter()
            .map(|key| counts.get(key).is_some_and(|count| *count > 1))
            .collect();
        Ok(BooleanChunked::from_slice(name.into(), &flags))
    }

    /// Whether every value is distinct, along with every duplicated row.
    pub fn is_unique(&self, name: &str) -> Result<(bool, DataFrame)> {
        let mask = self.duplicated_mask(name)?;
        let duplicates = self.filter(&mask)?;
        Ok((duplicates.height() == 0, duplicates))
    }

    /// Schema-preserving subset of the rows where `mask` is true.
    pub fn filter(&self, mask: &BooleanChunked) -> Result<DataFrame> {
        Ok(self.frame.filter(mask)?)
    }

    /// Rows where `column <op> value`.
    pub fn compare_scalar(
        &self,
        name: &str,
        op: Comparison,
        value: &ScalarValue,
    ) -> Result<BooleanChunked> {
        let column = self.column(name)?;
        if !literal_fits(column.dtype(), value) {
            return Err(DatasetError::IncompatibleLiteral {
                column: name.to_string(),
                dtype: column.dtype().clone(),
                literal: value.to_string(),
            });
        }
        let literal = literal_series(value)?;
        let mask = op.apply(column.as_materialized_series(), &literal)?;
        Ok(definite(&mask))
    }

    /// Rows where `left <op> right`.
    pub fn compare_columns(
        &self,
        left: &str,
        op: Comparison,
        right: &str,
    ) -> Result<BooleanChunked> {
        let lhs = self.column(left)?;
        let rhs = self.column(right)?;
        let comparable = matches!(
            (family(lhs.dtype()), family(rhs.dtype())),
            (Some(a), Some(b)) if a == b
        );
        if !comparable {
            return Err(DatasetError::IncompatibleColumns {
                left: left.to_string(),
                left_dtype: lhs.dtype().clone(),
                right: right.to_string(),
                right_dtype: rhs.dtype().clone(),
            });
        }
        let mask = op.apply(lhs.as_materialized_series(), rhs.as_materialized_series())?;
        Ok(definite(&mask))
    }

    /// Rows whose value is not in `allowed`. A null is a member only when
    /// `allowed` contains `ScalarValue::Null`.
    pub fn not_in_set(&self, name: &str, allowed: &[ScalarValue]) -> Result<BooleanChunked> {
        let flags: Vec<bool> = self
            .column_values(name)?
            .iter()
            .map(|value| {
                let value = scalar_from_any(value);
                !allowed.iter().any(|member| member.matches(&value))
            })
            .collect();
        Ok(BooleanChunked::from_slice(name.into(), &flags))
    }

    /// Rows whose string has at most `max` characters. Null rows are false.
    pub fn string_length_at_most(&self, name: &str, max: usize) -> Result<BooleanChunked> {
        let column = self.column(name)?;
        if !is_string_dtype(column.dtype()) {
            return Err(DatasetError::NotString {
                column: name.to_string(),
                dtype: column.dtype().clone(),
            });
        }
        let flags: Vec<bool> = column
            .str()?
            .into_iter()
            .map(|value| value.is_some_and(|s| s.chars().count() <= max))
            .collect();
        Ok(BooleanChunked::from_slice(name.into(), &flags))
    }
}

impl From<DataFrame> for Dataset {
    fn from(frame: DataFrame) -> Self {
        Self::new(frame)
    }
}

impl From<Arc<DataFrame>> for Dataset {
    fn from(frame: Arc<DataFrame>) -> Self {
        Self { frame }
    }
}

/// Number of rows flagged by a mask.
pub fn count_flagged(mask: &BooleanChunked) -> usize {
    mask.into_iter().filter(|flag| *flag == Some(true)).count()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Family {
    Numeric,
    Temporal,
    Text,
    Boolean,
}

fn family(dtype: &DataType) -> Option<Family> {
    if is_numeric_dtype(dtype) {
        Some(Family::Numeric)
    } else if is_temporal_dtype(dtype) {
        Some(Family::Temporal)
    } else if is_string_dtype(dtype) {
        Some(Family::Text)
    } else if matches!(dtype, DataType::Boolean) {
        Some(Family::Boolean)
    } else {
        None
    }
}

fn literal_fits(dtype: &DataType, value: &ScalarValue) -> bool {
    match value {
        ScalarValue::Null => true,
        ScalarValue::Boolean(_) => family(dtype) == Some(Family::Boolean),
        ScalarValue::Int(_) | ScalarValue::Float(_) => family(dtype) == Some(Family::Numeric),
        ScalarValue::Str(_) => family(dtype) == Some(Family::Text),
        ScalarValue::Date(_) | ScalarValue::Datetime(_) => family(dtype) == Some(Family::Temporal),
    }
}

/// Single-row series holding `value`; polars broadcasts it in comparisons.
fn literal_series(value: &ScalarValue) -> Result<Series> {
    let name = "literal".into();
    let series = match value {
        ScalarValue::Null => Series::full_null(name, 1, &DataType::Null),
        ScalarValue::Boolean(v) => Series::new(name, [*v]),
        ScalarValue::Int(v) => Series::new(name, [*v]),
        ScalarValue::Float(v) => Series::new(name, [*v]),
        ScalarValue::Str(v) => Series::new(name, [v.as_str()]),
        ScalarValue::Date(date) => {
            Series::new(name, [date.num_days_from_ce() - UNIX_EPOCH_DAYS_FROM_CE])
                .cast(&DataType::Date)?
        }
        ScalarValue::Datetime(ts) => Series::new(name, [ts.and_utc().timestamp_micros()])
            .cast(&DataType::Datetime(TimeUnit::Microseconds, None))?,
    };
    Ok(series)
}

/// Null entries become `false`.
fn definite(mask: &BooleanChunked) -> BooleanChunked {
    let flags: Vec<bool> = mask.into_iter().map(|flag| flag.unwrap_or(false)).collect();
    BooleanChunked::from_slice(mask.name().clone(), &flags)
}

fn scalar_from_any(value: &AnyValue<'_>) -> ScalarValue {
    match value {
        AnyValue::Null => ScalarValue::Null,
        AnyValue::Boolean(v) => ScalarValue::Boolean(*v),
        AnyValue::Int8(v) => ScalarValue::Int(i64::from(*v)),
        AnyValue::Int16(v) => ScalarValue::Int(i64::from(*v)),
        AnyValue::Int32(v) => ScalarValue::Int(i64::from(*v)),
        AnyValue::Int64(v) => ScalarValue::Int(*v),
        AnyValue::UInt8(v) => ScalarValue::Int(i64::from(*v)),
        AnyValue::UInt16(v) => ScalarValue::Int(i64::from(*v)),
        AnyValue::UInt32(v) => ScalarValue::Int(i64::from(*v)),
        AnyValue::UInt64(v) => {
            i64::try_from(*v).map_or(ScalarValue::Float(*v as f64), ScalarValue::Int)
        }
        AnyValue::Float32(v) => ScalarValue::Float(f64::from(*v)),
        AnyValue::Float64(v) => ScalarValue::Float(*v),
        AnyValue::String(s) => ScalarValue::Str((*s).to_string()),
        AnyValue::StringOwned(s) => ScalarValue::Str(s.to_string()),
        AnyValue::Date(days) => date_from_days(*days).map_or(ScalarValue::Null, ScalarValue::Date),
        AnyValue::Datetime(v, unit, _) => {
            datetime_from(*v, *unit).map_or(ScalarValue::Null, ScalarValue::Datetime)
        }
        other => ScalarValue::Str(other.to_string()),
    }
}

fn date_from_days(days: i32) -> Option<NaiveDate> {
    NaiveDate::from_num_days_from_ce_opt(days.checked_add(UNIX_EPOCH_DAYS_FROM_CE)?)
}

fn datetime_from(value: i64, unit: TimeUnit) -> Option<NaiveDateTime> {
    let ts = match unit {
        TimeUnit::Milliseconds => DateTime::from_timestamp_millis(value)?,
        TimeUnit::Microseconds => DateTime::from_timestamp_micros(value)?,
        TimeUnit::Nanoseconds => {
            let nanos = u32::try_from(value.rem_euclid(1_000_000_000)).ok()?;
            DateTime::from_timestamp(value.div_euclid(1_000_000_000), nanos)?
        }
    };
    Some(ts.naive_utc())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset(columns: Vec<Series>) -> Dataset {
        let columns = columns.into_iter().map(Into::into).collect();
        Dataset::new(DataFrame::new(columns).expect("frame"))
    }

    fn flags(mask: &BooleanChunked) -> Vec<bool> {
        mask.into_iter().map(|flag| flag.unwrap_or(false)).collect()
    }

    #[test]
    fn column_lookup() {
        let data = dataset(vec![
            Series::new("a".into(), vec![1i64, 2]),
            Series::new("b".into(), vec!["x", "y"]),
        ]);
        assert!(data.has_column("a"));
        assert!(!data.has_column("c"));
        assert_eq!(data.row_count(), 2);
        assert_eq!(data.column_names(), vec!["a".to_string(), "b".to_string()]);
        assert!(matches!(
            data.column_values("c"),
            Err(DatasetError::ColumnNotFound(name)) if name == "c"
        ));
    }

    #[test]
    fn nulls_are_duplicates_of_each_other() {
        let data = dataset(vec![Series::new(
            "a".into(),
            vec![Some(1i64), None, Some(1), None, Some(2)],
        )]);
        let mask = data.duplicated_mask("a").expect("mask");
        assert_eq!(flags(&mask), vec![true, true, true, true, false]);

        let single_null = dataset(vec![Series::new("a".into(), vec![Some(1i64), None])]);
        let (unique, duplicates) = single_null.is_unique("a").expect("unique");
        assert!(unique);
        assert_eq!(duplicates.height(), 0);
        assert_eq!(duplicates.width(), 1);
    }

    #[test]
    fn scalar_comparison_skips_nulls() {
        let data = dataset(vec![Series::new(
            "x".into(),
            vec![Some(0i32), Some(5), None, Some(-1)],
        )]);
        let mask = data
            .compare_scalar("x", Comparison::LtEq, &ScalarValue::Int(0))
            .expect("compare");
        assert_eq!(flags(&mask), vec![true, false, false, true]);
        assert_eq!(count_flagged(&mask), 2);
    }

    #[test]
    fn negated_comparison_splits_non_null_rows() {
        let data = dataset(vec![Series::new(
            "x".into(),
            vec![Some(3i64), None, Some(0), Some(-2)],
        )]);
        let above = data
            .compare_scalar("x", Comparison::Gt, &ScalarValue::Int(0))
            .expect("compare");
        let at_or_below = data
            .compare_scalar("x", Comparison::Gt.negated(), &ScalarValue::Int(0))
            .expect("compare");
        assert_eq!(flags(&above), vec![true, false, false, false]);
        assert_eq!(flags(&at_or_below), vec![false, false, true, true]);
        assert_eq!(Comparison::LtEq.negated(), Comparison::Gt);
    }

    #[test]
    fn float_column_against_integer_threshold() {
        let data = dataset(vec![Series::new("x".into(), vec![0.5f64, 1.0, 1.5])]);
        let mask = data
            .compare_scalar("x", Comparison::LtEq, &ScalarValue::Int(1))
            .expect("compare");
        assert_eq!(flags(&mask), vec![true, true, false]);
    }

    #[test]
    fn date_comparison() {
        let dates = vec![
            NaiveDate::from_ymd_opt(2020, 12, 31).expect("date"),
            NaiveDate::from_ymd_opt(2021, 1, 1).expect("date"),
            NaiveDate::from_ymd_opt(2021, 6, 1).expect("date"),
        ];
        let days: Vec<i32> = dates
            .iter()
            .map(|d| d.num_days_from_ce() - UNIX_EPOCH_DAYS_FROM_CE)
            .collect();
        let series = Series::new("d".into(), days)
            .cast(&DataType::Date)
            .expect("cast");
        let data = dataset(vec![series]);
        let mask = data
            .compare_scalar("d", Comparison::LtEq, &dates[1].into())
            .expect("compare");
        assert_eq!(flags(&mask), vec![true, true, false]);
    }

    #[test]
    fn incompatible_literal_is_an_error() {
        let data = dataset(vec![Series::new("x".into(), vec!["a", "b"])]);
        let err = data
            .compare_scalar("x", Comparison::LtEq, &ScalarValue::Int(1))
            .expect_err("string vs int");
        assert!(matches!(err, DatasetError::IncompatibleLiteral { .. }));
    }

    #[test]
    fn column_pair_comparison() {
        let data = dataset(vec![
            Series::new("a".into(), vec![Some(3i64), Some(1), None, Some(2)]),
            Series::new("b".into(), vec![Some(1i64), Some(1), Some(0), Some(5)]),
        ]);
        let mask = data
            .compare_columns("a", Comparison::LtEq, "b")
            .expect("compare");
        assert_eq!(flags(&mask), vec![false, true, false, true]);

        let mixed = dataset(vec![
            Series::new("a".into(), vec![1i64]),
            Series::new("b".into(), vec!["1"]),
        ]);
        assert!(matches!(
            mixed.compare_columns("a", Comparison::LtEq, "b"),
            Err(DatasetError::IncompatibleColumns { .. })
        ));
    }

    #[test]
    fn set_membership_flags_nulls_unless_allowed() {
        let data = dataset(vec![Series::new(
            "s".into(),
            vec![Some("A"), None, Some("C")],
        )]);
        let allowed = vec![ScalarValue::from("A"), ScalarValue::from("B")];
        let mask = data.not_in_set("s", &allowed).expect("mask");
        assert_eq!(flags(&mask), vec![false, true, true]);

        let with_null = vec![ScalarValue::from("A"), ScalarValue::Null];
        let mask = data.not_in_set("s", &with_null).expect("mask");
        assert_eq!(flags(&mask), vec![false, false, true]);
    }

    #[test]
    fn string_length_counts_characters() {
        let data = dataset(vec![Series::new(
            "s".into(),
            vec![Some("ab"), Some("äbc"), None, Some("abcd")],
        )]);
        let mask = data.string_length_at_most("s", 3).expect("mask");
        assert_eq!(flags(&mask), vec![true, true, false, false]);
    }

    #[test]
    fn any_value_conversion() {
        assert_eq!(
            scalar_from_any(&AnyValue::Date(0)),
            ScalarValue::Date(NaiveDate::from_ymd_opt(1970, 1, 1).expect("date"))
        );
        let expected = NaiveDate::from_ymd_opt(1970, 1, 1)
            .and_then(|d| d.and_hms_opt(0, 0, 1))
            .expect("datetime");
        assert_eq!(
            scalar_from_any(&AnyValue::Datetime(1_000, TimeUnit::Milliseconds, None)),
            ScalarValue::Datetime(expected)
        );
        assert_eq!(
            scalar_from_any(&AnyValue::Datetime(1_000_000_000, TimeUnit::Nanoseconds, None)),
            ScalarValue::Datetime(expected)
        );
        assert_eq!(scalar_from_any(&AnyValue::UInt8(7)), ScalarValue::Int(7));
    }

    #[test]
    fn filter_leaves_source_untouched() {
        let data = dataset(vec![Series::new("a".into(), vec![1i64, 2, 3])]);
        let mask = BooleanChunked::from_slice("m".into(), &[true, false, true]);
        let subset = data.filter(&mask).expect("filter");
        assert_eq!(subset.height(), 2);
        assert_eq!(data.row_count(), 3);
    }
}
