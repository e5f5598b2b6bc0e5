//! Dashboard summaries over a cleaned table.
//!
//! Six summaries are computed independently:
//! - Top cities and top cuisines by row count
//! - Highest rated restaurants
//! - Cost distribution histogram
//! - Votes against rating
//! - Rating category counts
//!
//! Each summary checks its own columns. When one is missing that summary
//! fails with a schema error and the others still run.

mod counts;
mod histogram;
mod ranking;
mod scatter;

use crate::config::{AnalysisConfig, DEFAULT_HISTOGRAM_BINS, DEFAULT_TOP_N};
use crate::error::Result;
use crate::pipeline::progress::{
    AnalysisStage, NoopProgressReporter, ProgressReporter, ProgressUpdate,
};
use crate::schema::{CITY, CUISINES, RATING_TEXT};
use crate::types::{
    CostHistogram, InsightsReport, RatedRestaurant, RatingVotesPoint, SkippedSummary, SummaryKind,
    ValueCount,
};
use polars::prelude::*;
use tracing::{debug, info, warn};

pub use histogram::build_histogram;

/// Computes the dashboard summaries.
#[derive(Debug, Clone)]
pub struct Aggregator {
    top_n: usize,
    histogram_bins: usize,
}

impl Default for Aggregator {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
            histogram_bins: DEFAULT_HISTOGRAM_BINS,
        }
    }
}

impl Aggregator {
    pub fn new(config: &AnalysisConfig) -> Self {
        Self {
            top_n: config.top_n,
            histogram_bins: config.histogram_bins,
        }
    }

    /// Most common cities, at most `top_n`.
    pub fn top_cities(&self, df: &DataFrame) -> Result<Vec<ValueCount>> {
        counts::top_values(df, CITY, self.top_n)
    }

    /// Most common cuisine strings, at most `top_n`.
    ///
    /// A multi-cuisine cell such as "Italian, Cafe" counts as its own value.
    pub fn top_cuisines(&self, df: &DataFrame) -> Result<Vec<ValueCount>> {
        counts::top_values(df, CUISINES, self.top_n)
    }

    /// Rows with the highest rating, at most `top_n`.
    pub fn highest_rated(&self, df: &DataFrame) -> Result<Vec<RatedRestaurant>> {
        ranking::highest_rated(df, self.top_n)
    }

    pub fn cost_distribution(&self, df: &DataFrame) -> Result<CostHistogram> {
        histogram::cost_distribution(df, self.histogram_bins)
    }

    pub fn votes_vs_rating(&self, df: &DataFrame) -> Result<Vec<RatingVotesPoint>> {
        scatter::votes_vs_rating(df)
    }

    /// Count of rows per `Rating text`, every category included.
    pub fn rating_categories(&self, df: &DataFrame) -> Result<Vec<ValueCount>> {
        counts::all_values(df, RATING_TEXT)
    }

    /// Compute all six summaries.
    ///
    /// A summary that fails is left as `None` and recorded in
    /// [`InsightsReport::skipped`].
    pub fn summarize(&self, df: &DataFrame) -> InsightsReport {
        self.summarize_with_progress(df, &NoopProgressReporter)
    }

    /// Compute all six summaries, reporting each one to `reporter`.
    pub fn summarize_with_progress(
        &self,
        df: &DataFrame,
        reporter: &dyn ProgressReporter,
    ) -> InsightsReport {
        info!("Computing dashboard summaries over {} rows", df.height());

        let mut report = InsightsReport {
            row_count: df.height(),
            ..Default::default()
        };
        let total = SummaryKind::ALL.len();

        for (i, kind) in SummaryKind::ALL.into_iter().enumerate() {
            let outcome = match kind {
                SummaryKind::TopCities => self.top_cities(df).map(|v| report.top_cities = Some(v)),
                SummaryKind::TopCuisines => {
                    self.top_cuisines(df).map(|v| report.top_cuisines = Some(v))
                }
                SummaryKind::HighestRated => {
                    self.highest_rated(df).map(|v| report.highest_rated = Some(v))
                }
                SummaryKind::CostDistribution => self
                    .cost_distribution(df)
                    .map(|v| report.cost_distribution = Some(v)),
                SummaryKind::VotesVsRating => self
                    .votes_vs_rating(df)
                    .map(|v| report.votes_vs_rating = Some(v)),
                SummaryKind::RatingCategories => self
                    .rating_categories(df)
                    .map(|v| report.rating_categories = Some(v)),
            };

            let message = match outcome {
                Ok(()) => {
                    debug!("Computed '{}'", kind);
                    format!("Computed {}", kind)
                }
                Err(e) => {
                    warn!("Skipping '{}': {}", kind, e);
                    report.skipped.push(SkippedSummary {
                        summary: kind,
                        reason: e.to_string(),
                    });
                    format!("Skipped {}", kind)
                }
            };

            reporter.report(ProgressUpdate::with_items(
                AnalysisStage::Aggregating,
                format!("Summary: {}", kind),
                i + 1,
                total,
                message,
            ));
        }

        if !report.is_complete() {
            info!(
                "{} of {} summaries skipped",
                report.skipped.len(),
                SummaryKind::ALL.len()
            );
        }

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::progress::ClosureProgressReporter;
    use crate::schema::{AGGREGATE_RATING, AVERAGE_COST, RESTAURANT_NAME, VOTES};
    use pretty_assertions::assert_eq;
    use std::sync::{Arc, Mutex};

    fn cleaned_table() -> DataFrame {
        df!(
            RESTAURANT_NAME => &["X", "Y", "Z", "V"],
            CITY => &["A", "A", "B", "C"],
            CUISINES => &["Unknown", "Cafe", "Cafe", "Italian, Cafe"],
            AGGREGATE_RATING => &[3.5, 4.1, 4.8, 4.1],
            VOTES => &[10.0, 22.0, 300.0, 40.0],
            AVERAGE_COST => &[200.0, 300.0, 1200.0, 500.0],
            RATING_TEXT => &["Good", "Very Good", "Excellent", "Very Good"]
        )
        .unwrap()
    }

    #[test]
    fn test_summarize_computes_all_six() {
        let report = Aggregator::default().summarize(&cleaned_table());

        assert!(report.is_complete());
        assert_eq!(report.row_count, 4);
        assert_eq!(
            report.top_cities.unwrap(),
            vec![
                ValueCount::new("A", 2),
                ValueCount::new("B", 1),
                ValueCount::new("C", 1),
            ]
        );
        assert_eq!(report.top_cuisines.unwrap()[0], ValueCount::new("Cafe", 2));
        assert_eq!(report.highest_rated.unwrap()[0].restaurant_name, "Z");
        assert_eq!(report.cost_distribution.unwrap().total(), 4);
        assert_eq!(report.votes_vs_rating.unwrap().len(), 4);
        assert_eq!(
            report.rating_categories.unwrap(),
            vec![
                ValueCount::new("Very Good", 2),
                ValueCount::new("Good", 1),
                ValueCount::new("Excellent", 1),
            ]
        );
    }

    #[test]
    fn test_summarize_respects_top_n() {
        let config = AnalysisConfig::builder().top_n(1).build().unwrap();
        let report = Aggregator::new(&config).summarize(&cleaned_table());

        assert_eq!(report.top_cities.unwrap().len(), 1);
        assert_eq!(report.top_cuisines.unwrap().len(), 1);
        assert_eq!(report.highest_rated.unwrap().len(), 1);
        // Categories are never truncated.
        assert_eq!(report.rating_categories.unwrap().len(), 3);
    }

    #[test]
    fn test_summarize_empty_table() {
        let df = cleaned_table().head(Some(0));
        let report = Aggregator::default().summarize(&df);

        assert!(report.is_complete());
        assert!(report.top_cities.unwrap().is_empty());
        assert!(report.highest_rated.unwrap().is_empty());
        assert!(report.cost_distribution.unwrap().is_empty());
        assert!(report.votes_vs_rating.unwrap().is_empty());
    }

    #[test]
    fn test_summarize_skips_only_affected_summaries() {
        let df = cleaned_table().drop(RATING_TEXT).unwrap();
        let report = Aggregator::default().summarize(&df);

        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].summary, SummaryKind::RatingCategories);
        assert!(report.skipped[0].reason.contains(RATING_TEXT));
        assert!(report.rating_categories.is_none());
        assert!(report.top_cities.is_some());
        assert!(report.votes_vs_rating.is_some());
    }

    #[test]
    fn test_missing_city_fails_city_summaries() {
        let df = cleaned_table().drop(CITY).unwrap();
        let aggregator = Aggregator::default();

        assert!(aggregator.top_cities(&df).unwrap_err().is_schema_error());
        let report = aggregator.summarize(&df);
        let skipped: Vec<SummaryKind> = report.skipped.iter().map(|s| s.summary).collect();
        assert_eq!(
            skipped,
            vec![
                SummaryKind::TopCities,
                SummaryKind::HighestRated,
                SummaryKind::VotesVsRating,
            ]
        );
    }

    #[test]
    fn test_summarize_reports_progress() {
        let updates = Arc::new(Mutex::new(Vec::new()));
        let sink = updates.clone();
        let reporter = ClosureProgressReporter::new(move |update: ProgressUpdate| {
            sink.lock().unwrap().push(update);
        });

        Aggregator::default().summarize_with_progress(&cleaned_table(), &reporter);

        let updates = updates.lock().unwrap();
        assert_eq!(updates.len(), SummaryKind::ALL.len());
        assert!(updates.iter().all(|u| u.stage == AnalysisStage::Aggregating));
        assert_eq!(updates[5].items_processed, Some(6));
    }

    #[test]
    fn test_summarize_matches_summarize_with_progress() {
        let aggregator = Aggregator::default();
        let table = cleaned_table();

        assert_eq!(
            aggregator.summarize(&table),
            aggregator.summarize_with_progress(&table, &NoopProgressReporter)
        );
    }
}
