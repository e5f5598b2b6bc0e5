//! Shared utilities for the insights pipeline.
//!
//! Helpers for recognizing missing markers, parsing numeric cells and
//! pulling typed views out of a [`DataFrame`].

use crate::error::Result;
use crate::schema::require_columns;
use polars::prelude::*;

// =============================================================================
// Data Type Utilities
// =============================================================================

/// Check if a DataType is numeric (integer or float).
#[inline]
pub fn is_numeric_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64
    )
}

// =============================================================================
// String Parsing Utilities
// =============================================================================

/// Cell contents read as "no value" when a file is loaded.
///
/// Matching is exact and case-sensitive; the empty string is included.
pub const MISSING_MARKERS: [&str; 19] = [
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Check if a raw cell is a missing-value marker.
///
/// # Example
///
/// ```rust,ignore
/// use restaurant_insights::utils::is_missing_marker;
///
/// assert!(is_missing_marker("N/A"));
/// assert!(!is_missing_marker("Not rated"));
/// ```
pub fn is_missing_marker(s: &str) -> bool {
    MISSING_MARKERS.contains(&s)
}

/// Try to parse a cell as a finite number.
///
/// Surrounding whitespace is ignored. Anything else that is not a plain
/// number (including `inf` and `NaN`) yields `None`.
pub fn parse_numeric_cell(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

// =============================================================================
// Series Transformation Utilities
// =============================================================================

/// Fill null values in a string Series with a specific value.
pub fn fill_string_nulls(series: &Series, fill_value: &str) -> PolarsResult<Series> {
    let values: Vec<&str> = series
        .str()?
        .into_iter()
        .map(|v| v.unwrap_or(fill_value))
        .collect();

    Ok(Series::new(series.name().clone(), values))
}

/// Replace missing-marker strings with nulls.
pub fn null_missing_markers(series: &Series) -> PolarsResult<Series> {
    let values: Vec<Option<&str>> = series
        .str()?
        .into_iter()
        .map(|v| v.filter(|s| !is_missing_marker(s)))
        .collect();

    Ok(Series::new(series.name().clone(), values))
}

/// Convert a series to Float64, turning unparsable text and NaN into nulls.
pub fn coerce_to_float(series: &Series) -> PolarsResult<Series> {
    let values: Vec<Option<f64>> = if series.dtype() == &DataType::String {
        series
            .str()?
            .into_iter()
            .map(|v| v.and_then(parse_numeric_cell))
            .collect()
    } else if is_numeric_dtype(series.dtype()) {
        series
            .cast(&DataType::Float64)?
            .f64()?
            .into_iter()
            .map(|v| v.filter(|x| x.is_finite()))
            .collect()
    } else {
        let as_text = series.cast(&DataType::String)?;
        as_text
            .str()?
            .into_iter()
            .map(|v| v.and_then(parse_numeric_cell))
            .collect()
    };

    Ok(Series::new(series.name().clone(), values))
}

// =============================================================================
// Column Access Utilities
// =============================================================================

/// Get a column as a String series, failing if the column is absent.
pub fn text_column(df: &DataFrame, name: &str) -> Result<Series> {
    require_columns(df, &[name])?;
    let series = df.column(name)?.as_materialized_series();
    if series.dtype() == &DataType::String {
        Ok(series.clone())
    } else {
        Ok(series.cast(&DataType::String)?)
    }
}

/// Get a column as a Float64 series, failing if the column is absent.
pub fn float_column(df: &DataFrame, name: &str) -> Result<Series> {
    require_columns(df, &[name])?;
    Ok(coerce_to_float(df.column(name)?.as_materialized_series())?)
}

// =============================================================================
// Tests
// =============================================================================
