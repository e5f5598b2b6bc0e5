use serde::{Deserialize, Serialize};

/// Number of rows sharing one value of a text column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueCount {
    pub value: String,
    pub count: usize,
}

impl ValueCount {
    pub fn new(value: impl Into<String>, count: usize) -> Self {
        Self {
            value: value.into(),
            count,
        }
    }
}

/// Row projection used by the highest rated table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatedRestaurant {
    pub restaurant_name: String,
    pub city: String,
    pub aggregate_rating: f64,
}

/// One bucket of the cost distribution.
///
/// Buckets cover `[lower, upper)`; the last bucket also includes `upper`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramBucket {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

/// Equal-width histogram of `Average Cost for two`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct CostHistogram {
    /// Smallest observed cost (`None` for an empty table)
    pub min: Option<f64>,
    /// Largest observed cost (`None` for an empty table)
    pub max: Option<f64>,
    /// Width shared by every bucket; 0 when all costs are equal
    pub bucket_width: f64,
    pub buckets: Vec<HistogramBucket>,
}

impl CostHistogram {
    /// Total number of values counted across all buckets.
    pub fn total(&self) -> usize {
        self.buckets.iter().map(|b| b.count).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}

/// One point of the votes-vs-rating scatter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingVotesPoint {
    pub aggregate_rating: f64,
    pub votes: f64,
    pub restaurant_name: String,
    pub city: String,
}

/// The six dashboard summaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SummaryKind {
    TopCities,
    TopCuisines,
    HighestRated,
    CostDistribution,
    VotesVsRating,
    RatingCategories,
}

impl SummaryKind {
    /// All summaries in dashboard order.
    pub const ALL: [SummaryKind; 6] = [
        SummaryKind::TopCities,
        SummaryKind::TopCuisines,
        SummaryKind::HighestRated,
        SummaryKind::CostDistribution,
        SummaryKind::VotesVsRating,
        SummaryKind::RatingCategories,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Self::TopCities => "Top Cities by Number of Restaurants",
            Self::TopCuisines => "Top Popular Cuisines",
            Self::HighestRated => "Highest Rated Restaurants",
            Self::CostDistribution => "Average Cost for Two - Distribution",
            Self::VotesVsRating => "Votes vs Rating",
            Self::RatingCategories => "Rating Category Count",
        }
    }
}

impl std::fmt::Display for SummaryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.title())
    }
}

/// A summary that could not be computed, with the reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedSummary {
    pub summary: SummaryKind,
    pub reason: String,
}

/// Structured results handed to the display layer.
///
/// A `None` section was skipped; the matching entry in `skipped` says why.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct InsightsReport {
    pub row_count: usize,
    pub top_cities: Option<Vec<ValueCount>>,
    pub top_cuisines: Option<Vec<ValueCount>>,
    pub highest_rated: Option<Vec<RatedRestaurant>>,
    pub cost_distribution: Option<CostHistogram>,
    pub votes_vs_rating: Option<Vec<RatingVotesPoint>>,
    pub rating_categories: Option<Vec<ValueCount>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skipped: Vec<SkippedSummary>,
}

impl InsightsReport {
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Outcome of numeric coercion for one column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnCoercion {
    pub column: String,
    /// Cells that held text but did not parse as a number
    pub unparsable: usize,
    /// Cells that were null after coercion
    pub missing_after: usize,
}

/// What the cleaner did to a table.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CleaningSummary {
    pub rows_before: usize,
    pub rows_after: usize,
    pub columns: usize,
    pub cuisines_filled: usize,
    pub coercions: Vec<ColumnCoercion>,
}

impl CleaningSummary {
    pub fn rows_dropped(&self) -> usize {
        self.rows_before.saturating_sub(self.rows_after)
    }

    /// Percentage of input rows that were dropped.
    pub fn rows_dropped_percent(&self) -> f64 {
        if self.rows_before == 0 {
            0.0
        } else {
            self.rows_dropped() as f64 / self.rows_before as f64 * 100.0
        }
    }
}

/// Everything produced by one run over one input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Name of the input (file path or caller-supplied label)
    pub source: String,
    pub cleaning: CleaningSummary,
    pub report: InsightsReport,
    pub duration_ms: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cleaning_summary_rows_dropped() {
        let summary = CleaningSummary {
            rows_before: 8,
            rows_after: 6,
            ..Default::default()
        };
        assert_eq!(summary.rows_dropped(), 2);
        assert_eq!(summary.rows_dropped_percent(), 25.0);
        assert_eq!(CleaningSummary::default().rows_dropped_percent(), 0.0);
    }

    #[test]
    fn test_histogram_total() {
        let histogram = CostHistogram {
            min: Some(0.0),
            max: Some(10.0),
            bucket_width: 5.0,
            buckets: vec![
                HistogramBucket { lower: 0.0, upper: 5.0, count: 2 },
                HistogramBucket { lower: 5.0, upper: 10.0, count: 3 },
            ],
        };
        assert_eq!(histogram.total(), 5);
        assert!(CostHistogram::default().is_empty());
    }

    #[test]
    fn test_summary_kind_serialization() {
        let json = serde_json::to_string(&SummaryKind::VotesVsRating).unwrap();
        assert_eq!(json, "\"votes_vs_rating\"");
    }

    #[test]
    fn test_report_skips_empty_skipped_list() {
        let json = serde_json::to_string(&InsightsReport::default()).unwrap();
        assert!(!json.contains("skipped"));
    }
}
