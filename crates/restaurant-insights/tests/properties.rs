//! Property tests for cleaning and aggregation.

use polars::prelude::*;
use proptest::prelude::*;
use restaurant_insights::schema::{
    AGGREGATE_RATING, AVERAGE_COST, CITY, CUISINES, RATING_TEXT, RESTAURANT_NAME, VOTES,
};
use restaurant_insights::{
    AnalysisConfig, Aggregator, DataCleaner, build_histogram, parse_numeric_cell,
};
use std::collections::HashSet;

#[derive(Debug, Clone)]
struct RawRow {
    name: Option<String>,
    city: Option<String>,
    cuisines: Option<String>,
    rating: Option<String>,
    votes: Option<String>,
    cost: Option<String>,
    rating_text: Option<String>,
}

impl RawRow {
    /// Whether the cleaner should keep this row.
    fn survives(&self) -> bool {
        let parses = |cell: &Option<String>| cell.as_deref().and_then(parse_numeric_cell).is_some();
        self.name.is_some()
            && self.city.is_some()
            && self.rating_text.is_some()
            && parses(&self.rating)
            && parses(&self.votes)
            && parses(&self.cost)
    }
}

fn text_cell(choices: &'static [&'static str]) -> impl Strategy<Value = Option<String>> {
    prop::option::weighted(0.9, prop::sample::select(choices).prop_map(str::to_string))
}

fn numeric_cell(max: f64) -> impl Strategy<Value = Option<String>> {
    prop::option::weighted(
        0.9,
        prop_oneof![
            6 => (0.0..max).prop_map(|v| format!("{:.1}", v)),
            1 => (0u32..50).prop_map(|v| format!(" {} ", v)),
            1 => Just("bad".to_string()),
            1 => Just("inf".to_string()),
        ],
    )
}

fn raw_row() -> impl Strategy<Value = RawRow> {
    (
        text_cell(&["X", "Y", "Z", "W"]),
        text_cell(&["Pune", "Goa", "Agra", "Delhi", "Mumbai"]),
        text_cell(&["Cafe", "Italian", "Italian, Cafe", "Chinese"]),
        numeric_cell(5.0),
        numeric_cell(500.0),
        numeric_cell(3000.0),
        text_cell(&["Poor", "Average", "Good", "Very Good", "Excellent"]),
    )
        .prop_map(|(name, city, cuisines, rating, votes, cost, rating_text)| RawRow {
            name,
            city,
            cuisines,
            rating,
            votes,
            cost,
            rating_text,
        })
}

fn raw_rows() -> impl Strategy<Value = Vec<RawRow>> {
    prop::collection::vec(raw_row(), 0..40)
}

fn column(rows: &[RawRow], get: impl Fn(&RawRow) -> Option<String>) -> Vec<Option<String>> {
    rows.iter().map(get).collect()
}

fn to_frame(rows: &[RawRow]) -> DataFrame {
    df!(
        RESTAURANT_NAME => column(rows, |r| r.name.clone()),
        CITY => column(rows, |r| r.city.clone()),
        CUISINES => column(rows, |r| r.cuisines.clone()),
        AGGREGATE_RATING => column(rows, |r| r.rating.clone()),
        VOTES => column(rows, |r| r.votes.clone()),
        AVERAGE_COST => column(rows, |r| r.cost.clone()),
        RATING_TEXT => column(rows, |r| r.rating_text.clone())
    )
    .unwrap()
}

fn text_values(df: &DataFrame, name: &str) -> Vec<String> {
    df.column(name)
        .unwrap()
        .as_materialized_series()
        .str()
        .unwrap()
        .into_iter()
        .flatten()
        .map(str::to_string)
        .collect()
}

proptest! {
    #[test]
    fn prop_cleaning_is_idempotent(rows in raw_rows()) {
        let cleaner = DataCleaner::default();
        let raw = to_frame(&rows);

        let (first, _) = cleaner.clean(&raw).unwrap();
        let (second, _) = cleaner.clean(&raw).unwrap();
        let (again, summary) = cleaner.clean(&first).unwrap();

        prop_assert!(first.equals_missing(&second));
        prop_assert!(first.equals_missing(&again));
        prop_assert_eq!(summary.rows_dropped(), 0);
    }

    #[test]
    fn prop_cleaning_never_adds_rows_or_nulls(rows in raw_rows()) {
        let (cleaned, summary) = DataCleaner::default().clean(&to_frame(&rows)).unwrap();

        prop_assert!(cleaned.height() <= rows.len());
        prop_assert_eq!(summary.rows_before, rows.len());
        for column in cleaned.get_columns() {
            prop_assert_eq!(column.null_count(), 0);
        }
    }

    #[test]
    fn prop_missing_cuisine_never_drops_a_row(rows in raw_rows()) {
        let (cleaned, _) = DataCleaner::default().clean(&to_frame(&rows)).unwrap();

        let expected: Vec<&RawRow> = rows.iter().filter(|r| r.survives()).collect();
        prop_assert_eq!(cleaned.height(), expected.len());

        let cuisines = text_values(&cleaned, CUISINES);
        for (row, cuisine) in expected.iter().zip(&cuisines) {
            let want = row.cuisines.as_deref().unwrap_or("Unknown");
            prop_assert_eq!(cuisine.as_str(), want);
        }
    }

    #[test]
    fn prop_top_n_is_bounded(rows in raw_rows(), n in 1usize..8) {
        let (cleaned, _) = DataCleaner::default().clean(&to_frame(&rows)).unwrap();
        let config = AnalysisConfig::builder().top_n(n).build().unwrap();
        let aggregator = Aggregator::new(&config);

        let distinct_cities: HashSet<String> = text_values(&cleaned, CITY).into_iter().collect();
        let cities = aggregator.top_cities(&cleaned).unwrap();
        prop_assert!(cities.len() <= n);
        prop_assert!(cities.len() <= distinct_cities.len());

        let rated = aggregator.highest_rated(&cleaned).unwrap();
        prop_assert_eq!(rated.len(), n.min(cleaned.height()));
    }

    #[test]
    fn prop_counts_break_ties_by_first_appearance(rows in raw_rows()) {
        let (cleaned, _) = DataCleaner::default().clean(&to_frame(&rows)).unwrap();
        let counts = Aggregator::default().top_cities(&cleaned).unwrap();
        let column = text_values(&cleaned, CITY);
        let first_seen = |value: &str| column.iter().position(|c| c == value).unwrap();

        for pair in counts.windows(2) {
            prop_assert!(pair[0].count >= pair[1].count);
            if pair[0].count == pair[1].count {
                prop_assert!(first_seen(&pair[0].value) < first_seen(&pair[1].value));
            }
        }
    }

    #[test]
    fn prop_highest_rated_is_sorted_and_stable(rows in raw_rows()) {
        let (cleaned, _) = DataCleaner::default().clean(&to_frame(&rows)).unwrap();
        let config = AnalysisConfig::builder().top_n(100).build().unwrap();
        let rated = Aggregator::new(&config).highest_rated(&cleaned).unwrap();

        let ratings: Vec<f64> = cleaned
            .column(AGGREGATE_RATING)
            .unwrap()
            .as_materialized_series()
            .f64()
            .unwrap()
            .into_iter()
            .flatten()
            .collect();
        let mut order: Vec<usize> = (0..ratings.len()).collect();
        order.sort_by(|&a, &b| ratings[b].total_cmp(&ratings[a]));

        let expected: Vec<f64> = order.iter().map(|&i| ratings[i]).collect();
        let actual: Vec<f64> = rated.iter().map(|r| r.aggregate_rating).collect();
        prop_assert_eq!(actual, expected);

        let names = text_values(&cleaned, RESTAURANT_NAME);
        for (row, &i) in rated.iter().zip(&order) {
            prop_assert_eq!(&row.restaurant_name, &names[i]);
        }
    }

    #[test]
    fn prop_histogram_conserves_rows(rows in raw_rows(), bins in 1usize..40) {
        let (cleaned, _) = DataCleaner::default().clean(&to_frame(&rows)).unwrap();
        let config = AnalysisConfig::builder().histogram_bins(bins).build().unwrap();
        let histogram = Aggregator::new(&config).cost_distribution(&cleaned).unwrap();

        prop_assert_eq!(histogram.total(), cleaned.height());
        prop_assert!(histogram.buckets.len() <= bins);
    }

    #[test]
    fn prop_histogram_buckets_cover_range(
        values in prop::collection::vec(-1.0e6f64..1.0e6, 1..200),
        bins in 1usize..50,
    ) {
        let histogram = build_histogram(&values, bins);

        prop_assert_eq!(histogram.total(), values.len());
        let first = histogram.buckets.first().unwrap();
        let last = histogram.buckets.last().unwrap();
        prop_assert_eq!(Some(first.lower), histogram.min);
        prop_assert_eq!(Some(last.upper), histogram.max);
    }

    #[test]
    fn prop_histogram_counts_match_bucket_bounds(
        values in prop::collection::vec(0.0f64..5000.0, 1..200),
        bins in 1usize..50,
    ) {
        let histogram = build_histogram(&values, bins);
        let last = histogram.buckets.len() - 1;

        let mut expected = vec![0usize; histogram.buckets.len()];
        for &value in &values {
            let slot = histogram.buckets.iter().enumerate().position(|(i, b)| {
                b.lower <= value && (value < b.upper || (i == last && value <= b.upper))
            });
            prop_assert!(slot.is_some(), "{} outside every bucket", value);
            expected[slot.unwrap()] += 1;
        }

        let counts: Vec<usize> = histogram.buckets.iter().map(|b| b.count).collect();
        prop_assert_eq!(counts, expected);
    }
}
