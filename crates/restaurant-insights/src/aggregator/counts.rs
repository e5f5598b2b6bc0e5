//! Ranked value counts over text columns.

use crate::error::Result;
use crate::types::ValueCount;
use crate::utils::text_column;
use polars::prelude::*;
use std::collections::HashMap;

/// Count rows per distinct value, most frequent first.
///
/// Values with equal counts keep the order in which they first appear in
/// the column. Nulls are not counted.
pub(crate) fn count_values(series: &Series) -> PolarsResult<Vec<ValueCount>> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<(&str, usize)> = Vec::new();

    for value in series.str()?.into_iter().flatten() {
        match index.get(value) {
            Some(&slot) => counts[slot].1 += 1,
            None => {
                index.insert(value, counts.len());
                counts.push((value, 1));
            }
        }
    }

    // Stable sort keeps first-seen order among equal counts.
    counts.sort_by(|a, b| b.1.cmp(&a.1));

    Ok(counts
        .into_iter()
        .map(|(value, count)| ValueCount::new(value, count))
        .collect())
}

/// The `n` most frequent values of `column`.
pub(crate) fn top_values(df: &DataFrame, column: &str, n: usize) -> Result<Vec<ValueCount>> {
    let series = text_column(df, column)?;
    let mut counts = count_values(&series)?;
    counts.truncate(n);
    Ok(counts)
}

/// Every distinct value of `column` with its count.
pub(crate) fn all_values(df: &DataFrame, column: &str) -> Result<Vec<ValueCount>> {
    let series = text_column(df, column)?;
    Ok(count_values(&series)?)
}
