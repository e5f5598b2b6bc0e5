//! Loading delimited listing files into a record table.
//!
//! Every column is read as text. Typing is left to the
//! [`DataCleaner`](crate::cleaner::DataCleaner), which decides what counts
//! as a number.

use crate::error::{InsightsError, Result};
use crate::utils::null_missing_markers;
use polars::io::csv::read::CsvReadOptions;
use polars::prelude::*;
use std::collections::HashSet;
use std::io::Cursor;
use std::path::Path;
use tracing::{debug, info};

/// Load a listing file from disk.
///
/// Read failures are reported as [`InsightsError::Load`] so callers see a
/// single error kind for "this file could not be used".
pub fn load_csv_path(path: impl AsRef<Path>) -> Result<DataFrame> {
    let path = path.as_ref();
    let source_name = path.display().to_string();

    info!("Loading dataset from: {}", source_name);

    let bytes = std::fs::read(path).map_err(|e| InsightsError::load(&source_name, e))?;
    load_csv_bytes(&bytes, &source_name)
}

/// Load a listing file from an in-memory byte buffer (e.g. an upload).
pub fn load_csv_bytes(bytes: &[u8], source_name: &str) -> Result<DataFrame> {
    // ISO-8859-1: every byte maps to the code point of the same value.
    let text = encoding_rs::mem::decode_latin1(bytes);

    if text.trim().is_empty() {
        return Err(InsightsError::load(source_name, "input is empty"));
    }

    validate_header(&text, source_name)?;

    let df = text_reader(true)
        .into_reader_with_file_handle(Cursor::new(text.into_owned()))
        .finish()
        .map_err(|e| InsightsError::load(source_name, e))?;

    let df = normalize_missing_markers(df).map_err(|e| InsightsError::load(source_name, e))?;

    debug!(
        "Loaded {} rows x {} columns from {}",
        df.height(),
        df.width(),
        source_name
    );

    Ok(df)
}

/// CSV options shared by the header check and the full read.
fn text_reader(has_header: bool) -> CsvReadOptions {
    CsvReadOptions::default()
        .with_has_header(has_header)
        .with_infer_schema_length(Some(0))
        .with_parse_options(CsvParseOptions::default().with_quote_char(Some(b'"')))
}

/// Reject header rows with blank or repeated field names.
///
/// The header is read as a plain data row. Read as a header, polars renames
/// duplicates and fills in blank names.
fn validate_header(text: &str, source_name: &str) -> Result<()> {
    let header = text_reader(false)
        .with_n_rows(Some(1))
        .into_reader_with_file_handle(Cursor::new(text.as_bytes()))
        .finish()
        .map_err(|e| InsightsError::load(source_name, e))?;

    let mut names = Vec::with_capacity(header.width());
    for column in header.get_columns() {
        let series = column.as_materialized_series();
        let name = series
            .str()
            .map_err(|e| InsightsError::load(source_name, e))?
            .get(0)
            .map(str::to_string);
        names.push(name);
    }

    let mut seen = HashSet::new();
    for name in &names {
        let Some(name) = name.as_deref().filter(|n| !n.trim().is_empty()) else {
            return Err(InsightsError::load(source_name, "header contains a blank column name"));
        };
        if !seen.insert(name) {
            return Err(InsightsError::load(
                source_name,
                format!("header contains duplicate column '{}'", name),
            ));
        }
    }
    Ok(())
}

/// Turn missing-value tokens ("NA", "null", "", ...) into nulls.
fn normalize_missing_markers(mut df: DataFrame) -> PolarsResult<DataFrame> {
    let column_names: Vec<String> = df
        .get_column_names()
        .into_iter()
        .map(|s| s.to_string())
        .collect();

    for col_name in column_names {
        let series = df.column(&col_name)?.as_materialized_series();
        if series.dtype() != &DataType::String {
            continue;
        }
        let normalized = null_missing_markers(series)?;
        df.replace(&col_name, normalized)?;
    }

    Ok(df)
}
