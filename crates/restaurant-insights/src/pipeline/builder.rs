//! Main insights pipeline module.
//!
//! This module provides the core `Pipeline` struct and builder for
//! running load, clean and aggregate over one input.

use crate::aggregator::Aggregator;
use crate::cleaner::DataCleaner;
use crate::config::AnalysisConfig;
use crate::error::Result;
use crate::loader;
use crate::schema;
use crate::pipeline::progress::{
    AnalysisStage, ClosureProgressReporter, ProgressReporter, ProgressUpdate,
};
use crate::types::{AnalysisResult, CleaningSummary, InsightsReport};
use polars::prelude::*;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info, warn};

/// The insights pipeline.
///
/// Use [`Pipeline::builder()`] to create a new pipeline with custom configuration.
///
/// # Example
///
/// ```rust,ignore
/// use restaurant_insights::{AnalysisConfig, Pipeline};
///
/// let result = Pipeline::builder()
///     .on_progress(|update| {
///         println!("[{:.0}%] {}", update.progress * 100.0, update.message);
///     })
///     .config(AnalysisConfig::builder().top_n(5).build()?)
///     .build()?
///     .run_path("data/zomato.csv")?;
///
/// println!("{} rows kept", result.cleaning.rows_after);
/// ```
pub struct Pipeline {
    config: AnalysisConfig,
    progress_reporter: Option<Arc<dyn ProgressReporter>>,
    cleaner: DataCleaner,
    aggregator: Aggregator,
}

// Hosts run the pipeline on a worker thread.
static_assertions::assert_impl_all!(Pipeline: Send);

impl Pipeline {
    /// Create a new pipeline builder.
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::default()
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Load a listing file from disk.
    pub fn load_path(&self, path: impl AsRef<Path>) -> Result<DataFrame> {
        let path = path.as_ref();
        self.report_progress(ProgressUpdate::new(
            AnalysisStage::Loading,
            0.0,
            format!("Reading {}", path.display()),
        ));
        let df = loader::load_csv_path(path)?;
        self.report_loaded(&df);
        Ok(df)
    }

    /// Load a listing file from an in-memory buffer.
    pub fn load_bytes(&self, bytes: &[u8], source_name: &str) -> Result<DataFrame> {
        self.report_progress(ProgressUpdate::new(
            AnalysisStage::Loading,
            0.0,
            format!("Reading {}", source_name),
        ));
        let df = loader::load_csv_bytes(bytes, source_name)?;
        self.report_loaded(&df);
        Ok(df)
    }

    /// Clean a loaded table with the configured fill value.
    pub fn clean(&self, df: &DataFrame) -> Result<(DataFrame, CleaningSummary)> {
        match &self.progress_reporter {
            Some(reporter) => self.cleaner.clean_with_progress(df, reporter.as_ref()),
            None => self.cleaner.clean(df),
        }
    }

    /// Compute the six dashboard summaries over a cleaned table.
    pub fn analyze(&self, df: &DataFrame) -> InsightsReport {
        match &self.progress_reporter {
            Some(reporter) => self.aggregator.summarize_with_progress(df, reporter.as_ref()),
            None => self.aggregator.summarize(df),
        }
    }

    /// Load, clean and analyze a file on disk.
    pub fn run_path(&self, path: impl AsRef<Path>) -> Result<AnalysisResult> {
        let path = path.as_ref();
        let source = path.display().to_string();
        self.finish(self.run_internal(source, || self.load_path(path)))
    }

    /// Load, clean and analyze an in-memory buffer.
    pub fn run_bytes(&self, bytes: &[u8], source_name: &str) -> Result<AnalysisResult> {
        self.finish(self.run_internal(source_name.to_string(), || {
            self.load_bytes(bytes, source_name)
        }))
    }

    fn run_internal<F>(&self, source: String, load: F) -> Result<AnalysisResult>
    where
        F: FnOnce() -> Result<DataFrame>,
    {
        let start_time = Instant::now();
        info!("Starting insights pipeline for {}", source);

        let raw = load()?;
        let (cleaned, cleaning) = self.clean(&raw)?;
        let report = self.analyze(&cleaned);

        Ok(AnalysisResult {
            source,
            cleaning,
            report,
            duration_ms: start_time.elapsed().as_millis() as u64,
        })
    }

    fn finish(&self, outcome: Result<AnalysisResult>) -> Result<AnalysisResult> {
        match outcome {
            Ok(result) => {
                info!("Pipeline finished in {} ms", result.duration_ms);
                self.report_progress(ProgressUpdate::complete("Dashboard ready"));
                Ok(result)
            }
            Err(e) => {
                error!("Pipeline error: {}", e);
                self.report_progress(ProgressUpdate::failed(e.to_string()));
                Err(e)
            }
        }
    }

    fn report_loaded(&self, df: &DataFrame) {
        let mut message = format!("Loaded {} rows x {} columns", df.height(), df.width());
        let missing = schema::missing_columns(df);
        if !missing.is_empty() {
            warn!("Input is missing expected columns: {}", missing.join(", "));
            message.push_str(&format!(" (missing: {})", missing.join(", ")));
        }
        self.report_progress(ProgressUpdate::new(AnalysisStage::Loading, 1.0, message));
    }

    /// Report progress if a reporter is configured.
    fn report_progress(&self, update: ProgressUpdate) {
        if let Some(reporter) = &self.progress_reporter {
            reporter.report(update);
        }
    }
}

/// Builder for creating a [`Pipeline`].
#[derive(Default)]
pub struct PipelineBuilder {
    config: Option<AnalysisConfig>,
    progress_reporter: Option<Arc<dyn ProgressReporter>>,
}

static_assertions::assert_impl_all!(PipelineBuilder: Send);

impl PipelineBuilder {
    pub fn config(mut self, config: AnalysisConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn progress_reporter(mut self, reporter: Arc<dyn ProgressReporter>) -> Self {
        self.progress_reporter = Some(reporter);
        self
    }

    /// Set a closure to receive progress updates.
    pub fn on_progress<F>(mut self, callback: F) -> Self
    where
        F: Fn(ProgressUpdate) + Send + Sync + 'static,
    {
        self.progress_reporter = Some(Arc::new(ClosureProgressReporter::new(callback)));
        self
    }

    /// Validate the configuration and build the pipeline.
    pub fn build(self) -> Result<Pipeline> {
        let config = self.config.unwrap_or_default();
        config.validate()?;

        Ok(Pipeline {
            cleaner: DataCleaner::new(config.cuisine_fill_value.clone()),
            aggregator: Aggregator::new(&config),
            progress_reporter: self.progress_reporter,
            config,
        })
    }
}
