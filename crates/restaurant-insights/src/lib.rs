//! Restaurant Insights Library
//!
//! Loads a restaurant listing table, cleans it and computes the summaries
//! behind a small exploratory dashboard, built with Rust and Polars.
//!
//! # Overview
//!
//! - **Loading**: Latin-1 delimited text, every column read as text, common
//!   missing-value tokens turned into nulls
//! - **Cleaning**: Missing cuisines filled, rating/votes/cost coerced to
//!   numbers, incomplete rows dropped
//! - **Aggregation**: Top cities, top cuisines, highest rated, cost
//!   distribution, votes vs rating and rating categories
//! - **Progress Reporting**: Stage-by-stage updates for a host UI
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use restaurant_insights::{AnalysisConfig, Pipeline};
//!
//! let config = AnalysisConfig::builder()
//!     .top_n(10)
//!     .histogram_bins(30)
//!     .build()?;
//!
//! let result = Pipeline::builder()
//!     .config(config)
//!     .build()?
//!     .run_path("data/zomato.csv")?;
//!
//! for city in result.report.top_cities.unwrap_or_default() {
//!     println!("{}: {}", city.value, city.count);
//! }
//! ```
//!
//! # Using the stages directly
//!
//! ```rust,ignore
//! use restaurant_insights::{Aggregator, DataCleaner, load_csv_bytes};
//!
//! let raw = load_csv_bytes(&bytes, "upload.csv")?;
//! let (cleaned, summary) = DataCleaner::default().clean(&raw)?;
//! let top = Aggregator::default().top_cuisines(&cleaned)?;
//! ```
//!
//! # Progress Reporting
//!
//! ```rust,ignore
//! use restaurant_insights::Pipeline;
//!
//! let result = Pipeline::builder()
//!     .on_progress(|update| {
//!         println!("[{:?}] {}", update.stage, update.message);
//!     })
//!     .build()?
//!     .run_bytes(&bytes, "upload.csv");
//! ```

pub mod aggregator;
pub mod cleaner;
pub mod config;
pub mod error;
pub mod loader;
pub mod pipeline;
pub mod reporting;
pub mod schema;
pub mod types;
pub mod utils;

// Re-exports for convenient access
pub use aggregator::{Aggregator, build_histogram};
pub use cleaner::DataCleaner;
pub use config::{AnalysisConfig, AnalysisConfigBuilder, ConfigValidationError};
pub use error::{InsightsError, Result as InsightsResult, ResultExt};
pub use loader::{load_csv_bytes, load_csv_path};
pub use pipeline::{
    AnalysisStage, ClosureProgressReporter, NoopProgressReporter, Pipeline, PipelineBuilder,
    ProgressReporter, ProgressUpdate,
};
pub use reporting::{DashboardReport, ReportGenerator};
pub use types::{
    AnalysisResult, CleaningSummary, ColumnCoercion, CostHistogram, HistogramBucket,
    InsightsReport, RatedRestaurant, RatingVotesPoint, SkippedSummary, SummaryKind, ValueCount,
};
pub use utils::{MISSING_MARKERS, is_missing_marker, parse_numeric_cell};
