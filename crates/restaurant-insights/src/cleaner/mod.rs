//! Data cleaning for restaurant listing tables.
//!
//! Cleaning is a fixed, linear sequence:
//! 1. Fill missing `Cuisines` with a placeholder
//! 2. Coerce rating, votes and cost to Float64 (unparsable cells become null)
//! 3. Drop every row that still has a null in any column
//!
//! The fill runs before the drop so a row is never discarded only because
//! its cuisine is unknown.

use crate::config::DEFAULT_CUISINE_FILL;
use crate::error::{Result, ResultExt};
use crate::pipeline::progress::{
    AnalysisStage, NoopProgressReporter, ProgressReporter, ProgressUpdate,
};
use crate::schema::{self, CUISINES, NUMERIC_COLUMNS};
use crate::types::{CleaningSummary, ColumnCoercion};
use crate::utils::{coerce_to_float, fill_string_nulls};
use polars::prelude::*;
use tracing::{debug, info};

/// Number of progress steps reported by [`DataCleaner::clean_with_progress`].
const CLEANING_STEPS: usize = 2 + NUMERIC_COLUMNS.len();

/// Data cleaner for listing tables.
///
/// Cleaning never mutates its input and always produces the same output for
/// the same input table.
#[derive(Debug, Clone)]
pub struct DataCleaner {
    fill_value: String,
}

impl Default for DataCleaner {
    fn default() -> Self {
        Self::new(DEFAULT_CUISINE_FILL)
    }
}

impl DataCleaner {
    /// Create a cleaner that writes `fill_value` into missing cuisines.
    pub fn new(fill_value: impl Into<String>) -> Self {
        Self {
            fill_value: fill_value.into(),
        }
    }

    /// Clean a raw table.
    ///
    /// Fails only if one of the columns the cleaner rewrites is absent.
    /// If every row is dropped the result is an empty table with the same
    /// columns.
    pub fn clean(&self, df: &DataFrame) -> Result<(DataFrame, CleaningSummary)> {
        self.clean_with_progress(df, &NoopProgressReporter)
    }

    /// Clean a raw table, reporting each step to `reporter`.
    pub fn clean_with_progress(
        &self,
        df: &DataFrame,
        reporter: &dyn ProgressReporter,
    ) -> Result<(DataFrame, CleaningSummary)> {
        let mut required = vec![CUISINES];
        required.extend(NUMERIC_COLUMNS);
        schema::require_columns(df, &required)?;

        info!("Performing data cleaning...");

        let report = |step: usize, sub_stage: &str, message: String| {
            reporter.report(ProgressUpdate::with_items(
                AnalysisStage::Cleaning,
                sub_stage,
                step,
                CLEANING_STEPS,
                message,
            ));
        };

        let mut df = df.clone();
        let mut summary = CleaningSummary {
            rows_before: df.height(),
            columns: df.width(),
            ..Default::default()
        };

        // 1. Fill missing cuisines
        summary.cuisines_filled = self.fill_cuisines(&mut df)?;
        debug!(
            "Filled {} missing '{}' values with '{}'",
            summary.cuisines_filled, CUISINES, self.fill_value
        );
        report(
            1,
            "Column: Cuisines",
            format!("Filled {} missing cuisines", summary.cuisines_filled),
        );

        // 2. Coerce numeric columns
        for (i, column) in NUMERIC_COLUMNS.iter().enumerate() {
            let coercion = Self::coerce_numeric(&mut df, column)?;
            debug!(
                "Coerced '{}': {} unparsable, {} missing",
                column, coercion.unparsable, coercion.missing_after
            );
            report(
                2 + i,
                &format!("Column: {}", column),
                format!("Converted '{}' to numbers", column),
            );
            summary.coercions.push(coercion);
        }

        // 3. Drop incomplete rows
        let df = Self::drop_incomplete_rows(&df).context("Dropping incomplete rows")?;
        summary.rows_after = df.height();

        info!(
            "Cleaning complete: {} -> {} rows ({} dropped)",
            summary.rows_before,
            summary.rows_after,
            summary.rows_dropped()
        );
        report(
            CLEANING_STEPS,
            "Rows",
            format!("Dropped {} incomplete rows", summary.rows_dropped()),
        );

        Ok((df, summary))
    }

    /// Replace nulls in `Cuisines`; returns how many cells were filled.
    fn fill_cuisines(&self, df: &mut DataFrame) -> Result<usize> {
        let series = df.column(CUISINES)?.as_materialized_series();
        let series = if series.dtype() == &DataType::String {
            series.clone()
        } else {
            series.cast(&DataType::String)?
        };

        let missing = series.null_count();
        if missing > 0 {
            let filled = fill_string_nulls(&series, &self.fill_value)?;
            df.replace(CUISINES, filled)?;
        } else if df.column(CUISINES)?.dtype() != &DataType::String {
            df.replace(CUISINES, series)?;
        }

        Ok(missing)
    }

    fn coerce_numeric(df: &mut DataFrame, column: &str) -> Result<ColumnCoercion> {
        let series = df.column(column)?.as_materialized_series();
        let missing_before = series.null_count();

        let coerced =
            coerce_to_float(series).context(format!("Converting '{}' to numbers", column))?;
        let missing_after = coerced.null_count();
        df.replace(column, coerced)?;

        Ok(ColumnCoercion {
            column: column.to_string(),
            unparsable: missing_after.saturating_sub(missing_before),
            missing_after,
        })
    }

    /// Keep only rows with a value in every column.
    fn drop_incomplete_rows(df: &DataFrame) -> PolarsResult<DataFrame> {
        let mut keep = BooleanChunked::full("keep".into(), true, df.height());
        for column in df.get_columns() {
            let present = column.as_materialized_series().is_not_null();
            keep = &keep & &present;
        }
        df.filter(&keep)
    }
}
