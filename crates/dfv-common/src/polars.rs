//! Helpers over polars values and dtypes.
//!
//! Rendered values end up in ledgers that must be identical across runs, so
//! floats use their shortest form and nulls render as empty cells.

use polars::prelude::{AnyValue, DataType};

/// Cell text for a single value; null is the empty string.
///
/// ```
/// use dfv_common::any_to_string;
/// use polars::prelude::AnyValue;
///
/// assert_eq!(any_to_string(AnyValue::Null), "");
/// assert_eq!(any_to_string(AnyValue::Float64(2.50)), "2.5");
/// assert_eq!(any_to_string(AnyValue::String("Active")), "Active");
/// ```
pub fn any_to_string(value: AnyValue<'_>) -> String {
    match value {
        AnyValue::Null => String::new(),
        AnyValue::String(text) => text.to_owned(),
        AnyValue::StringOwned(text) => text.to_string(),
        AnyValue::Float32(v) => format_numeric(f64::from(v)),
        AnyValue::Float64(v) => format_numeric(v),
        // Integers, booleans and temporal values all have a stable Display.
        other => other.to_string(),
    }
}

/// Shortest decimal form of `v`: no trailing zeros, no negative zero.
///
/// ```
/// use dfv_common::format_numeric;
///
/// assert_eq!(format_numeric(3.0), "3");
/// assert_eq!(format_numeric(-0.125), "-0.125");
/// ```
pub fn format_numeric(v: f64) -> String {
    if v == 0.0 {
        // Covers -0.0 as well.
        return "0".to_string();
    }
    // Rust's Display already prints the shortest round-trip representation
    // and drops a zero fraction.
    v.to_string()
}

pub fn is_string_dtype(dtype: &DataType) -> bool {
    matches!(dtype, DataType::String)
}

/// Integer or floating point.
pub fn is_numeric_dtype(dtype: &DataType) -> bool {
    dtype.is_integer() || dtype.is_float()
}

/// Date or datetime.
pub fn is_temporal_dtype(dtype: &DataType) -> bool {
    matches!(dtype, DataType::Date | DataType::Datetime(..))
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::TimeUnit;

    #[test]
    fn nulls_render_empty() {
        assert_eq!(any_to_string(AnyValue::Null), "");
    }

    #[test]
    fn scalars_render_plainly() {
        assert_eq!(any_to_string(AnyValue::Int64(-7)), "-7");
        assert_eq!(any_to_string(AnyValue::UInt16(12)), "12");
        assert_eq!(any_to_string(AnyValue::Boolean(false)), "false");
        assert_eq!(any_to_string(AnyValue::Float32(0.5)), "0.5");
        assert_eq!(any_to_string(AnyValue::Float64(10.0)), "10");
    }

    #[test]
    fn numeric_formatting_has_no_noise() {
        assert_eq!(format_numeric(-0.0), "0");
        assert_eq!(format_numeric(1e3), "1000");
        assert_eq!(format_numeric(0.1 + 0.2), "0.30000000000000004");
        assert_eq!(format_numeric(f64::NAN), "NaN");
    }

    #[test]
    fn dtype_families() {
        assert!(is_string_dtype(&DataType::String));
        assert!(!is_string_dtype(&DataType::Int64));
        assert!(is_numeric_dtype(&DataType::UInt8));
        assert!(is_numeric_dtype(&DataType::Float32));
        assert!(!is_numeric_dtype(&DataType::Date));
        assert!(is_temporal_dtype(&DataType::Date));
        assert!(is_temporal_dtype(&DataType::Datetime(TimeUnit::Milliseconds, None)));
        assert!(!is_temporal_dtype(&DataType::String));
    }
}
