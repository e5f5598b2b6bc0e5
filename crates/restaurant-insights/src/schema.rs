//! Column names of the restaurant listing dataset.

use crate::error::{InsightsError, Result};
use polars::prelude::*;

pub const CITY: &str = "City";
pub const RESTAURANT_NAME: &str = "Restaurant Name";
pub const CUISINES: &str = "Cuisines";
pub const AGGREGATE_RATING: &str = "Aggregate rating";
pub const VOTES: &str = "Votes";
pub const AVERAGE_COST: &str = "Average Cost for two";
pub const RATING_TEXT: &str = "Rating text";

/// Every column the dashboard reads.
pub const REQUIRED_COLUMNS: [&str; 7] = [
    CITY,
    RESTAURANT_NAME,
    CUISINES,
    AGGREGATE_RATING,
    VOTES,
    AVERAGE_COST,
    RATING_TEXT,
];

/// Columns coerced to Float64 during cleaning.
pub const NUMERIC_COLUMNS: [&str; 3] = [AGGREGATE_RATING, VOTES, AVERAGE_COST];

/// Fail with [`InsightsError::MissingColumn`] naming the first absent column.
pub fn require_columns(df: &DataFrame, columns: &[&str]) -> Result<()> {
    let present = df.get_column_names();
    for &column in columns {
        if !present.iter().any(|name| name.as_str() == column) {
            return Err(InsightsError::MissingColumn(column.to_string()));
        }
    }
    Ok(())
}

/// Columns from [`REQUIRED_COLUMNS`] that the table does not carry.
pub fn missing_columns(df: &DataFrame) -> Vec<&'static str> {
    let present = df.get_column_names();
    REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|column| !present.iter().any(|name| name.as_str() == *column))
        .collect()
}
