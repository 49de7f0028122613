//! Typed literals used as thresholds and allowed-value sets.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A single literal compared against column values.
///
/// The variant must match the column being checked: `Int`/`Float` for
/// numeric columns, `Date`/`Datetime` for temporal columns and `Str` for
/// string columns (compared lexicographically).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum ScalarValue {
    Null,
    Boolean(bool),
    Int(i64),
    Float(f64),
    Str(String),
    Date(NaiveDate),
    Datetime(NaiveDateTime),
}

impl ScalarValue {
    /// Numeric view used for cross-width comparisons.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(v) => Some(*v as f64),
            Self::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// Equality used for set membership.
    ///
    /// Integers and floats compare by numeric value; every other variant
    /// only matches the same variant. `Null` matches `Null`.
    pub fn matches(&self, other: &ScalarValue) -> bool {
        match (self, other) {
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Int(_) | Self::Float(_), Self::Int(_) | Self::Float(_)) => {
                self.as_f64() == other.as_f64()
            }
            _ => self == other,
        }
    }
}

impl fmt::Display for ScalarValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Boolean(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Str(v) => write!(f, "{v:?}"),
            Self::Date(v) => write!(f, "{}", v.format("%Y-%m-%d")),
            Self::Datetime(v) => write!(f, "{}", v.format("%Y-%m-%dT%H:%M:%S%.f")),
        }
    }
}

impl From<bool> for ScalarValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<i32> for ScalarValue {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<i64> for ScalarValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<u32> for ScalarValue {
    fn from(value: u32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<f64> for ScalarValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for ScalarValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for ScalarValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<NaiveDate> for ScalarValue {
    fn from(value: NaiveDate) -> Self {
        Self::Date(value)
    }
}

impl From<NaiveDateTime> for ScalarValue {
    fn from(value: NaiveDateTime) -> Self {
        Self::Datetime(value)
    }
}

impl<T: Into<ScalarValue>> From<Option<T>> for ScalarValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_stable() {
        assert_eq!(ScalarValue::from(0).to_string(), "0");
        assert_eq!(ScalarValue::from(1.0).to_string(), "1");
        assert_eq!(ScalarValue::from(2.5).to_string(), "2.5");
        assert_eq!(ScalarValue::from("Active").to_string(), "\"Active\"");
        assert_eq!(ScalarValue::Null.to_string(), "null");
        let date = NaiveDate::from_ymd_opt(2021, 1, 1).unwrap();
        assert_eq!(ScalarValue::from(date).to_string(), "2021-01-01");
        let ts = date.and_hms_opt(8, 30, 0).unwrap();
        assert_eq!(ScalarValue::from(ts).to_string(), "2021-01-01T08:30:00");
    }

    #[test]
    fn numeric_membership_ignores_width() {
        assert!(ScalarValue::Int(3).matches(&ScalarValue::Float(3.0)));
        assert!(!ScalarValue::Int(3).matches(&ScalarValue::Float(3.5)));
        assert!(!ScalarValue::from("3").matches(&ScalarValue::Int(3)));
        assert!(ScalarValue::Null.matches(&ScalarValue::Null));
    }

    #[test]
    fn option_converts_to_null() {
        assert_eq!(ScalarValue::from(None::<i64>), ScalarValue::Null);
        assert_eq!(ScalarValue::from(Some("x")), ScalarValue::Str("x".to_string()));
    }
}
