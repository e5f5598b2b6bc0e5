//! Equal-width cost histogram.

use crate::error::Result;
use crate::schema::AVERAGE_COST;
use crate::types::{CostHistogram, HistogramBucket};
use crate::utils::float_column;
use polars::prelude::*;

/// Histogram of `Average Cost for two` with `bins` equal-width buckets.
pub(crate) fn cost_distribution(df: &DataFrame, bins: usize) -> Result<CostHistogram> {
    let costs = float_column(df, AVERAGE_COST)?;
    let values: Vec<f64> = costs.f64()?.into_iter().flatten().collect();
    Ok(build_histogram(&values, bins))
}

/// Bucket `values` between their min and max.
///
/// An empty slice yields no buckets. When every value is equal there is a
/// single zero-width bucket holding all of them.
pub fn build_histogram(values: &[f64], bins: usize) -> CostHistogram {
    if values.is_empty() || bins == 0 {
        return CostHistogram::default();
    }

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    if min == max {
        return CostHistogram {
            min: Some(min),
            max: Some(max),
            bucket_width: 0.0,
            buckets: vec![HistogramBucket {
                lower: min,
                upper: max,
                count: values.len(),
            }],
        };
    }

    let width = (max - min) / bins as f64;
    let edges: Vec<f64> = (0..=bins)
        .map(|i| {
            if i == bins {
                max
            } else {
                (min + i as f64 * width).min(max)
            }
        })
        .collect();

    // A value is counted in the bucket whose reported bounds contain it.
    let mut counts = vec![0usize; bins];
    for &value in values {
        let slot = (edges.partition_point(|&edge| edge <= value) - 1).min(bins - 1);
        counts[slot] += 1;
    }

    let buckets = counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| HistogramBucket {
            lower: edges[i],
            upper: edges[i + 1],
            count,
        })
        .collect();

    CostHistogram {
        min: Some(min),
        max: Some(max),
        bucket_width: width,
        buckets,
    }
}
