//! Configuration types for the insights pipeline.
//!
//! This module provides configuration options using the builder pattern.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Default number of entries kept by the ranked summaries.
pub const DEFAULT_TOP_N: usize = 10;

/// Default number of equal-width buckets in the cost distribution.
pub const DEFAULT_HISTOGRAM_BINS: usize = 30;

/// Default replacement for a missing cuisine.
pub const DEFAULT_CUISINE_FILL: &str = "Unknown";

/// Configuration for the insights pipeline.
///
/// Use [`AnalysisConfig::builder()`] to create a new configuration
/// with fluent API.
///
/// # Example
///
/// ```rust,ignore
/// use restaurant_insights::config::AnalysisConfig;
///
/// let config = AnalysisConfig::builder()
///     .top_n(5)
///     .histogram_bins(20)
///     .build()?;
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Number of entries returned by top cities, top cuisines and highest rated.
    /// Default: 10
    pub top_n: usize,

    /// Number of equal-width buckets in the cost distribution.
    /// Default: 30
    pub histogram_bins: usize,

    /// Text written into missing `Cuisines` cells before rows are dropped.
    /// Default: "Unknown"
    pub cuisine_fill_value: String,

    /// Output directory for written reports.
    /// Default: "outputs"
    pub output_dir: PathBuf,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
            histogram_bins: DEFAULT_HISTOGRAM_BINS,
            cuisine_fill_value: DEFAULT_CUISINE_FILL.to_string(),
            output_dir: PathBuf::from("outputs"),
        }
    }
}

impl AnalysisConfig {
    /// Create a new configuration builder.
    pub fn builder() -> AnalysisConfigBuilder {
        AnalysisConfigBuilder::default()
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.top_n == 0 {
            return Err(ConfigValidationError::InvalidTopN(self.top_n));
        }

        if self.histogram_bins == 0 {
            return Err(ConfigValidationError::InvalidBinCount(self.histogram_bins));
        }

        if self.cuisine_fill_value.trim().is_empty() {
            return Err(ConfigValidationError::EmptyFillValue);
        }

        Ok(())
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Invalid top-N size: {0} (must be at least 1)")]
    InvalidTopN(usize),

    #[error("Invalid histogram bin count: {0} (must be at least 1)")]
    InvalidBinCount(usize),

    #[error("Cuisine fill value must not be empty")]
    EmptyFillValue,
}

impl From<ConfigValidationError> for crate::error::InsightsError {
    fn from(err: ConfigValidationError) -> Self {
        crate::error::InsightsError::InvalidConfig(err.to_string())
    }
}

/// Builder for [`AnalysisConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct AnalysisConfigBuilder {
    top_n: Option<usize>,
    histogram_bins: Option<usize>,
    cuisine_fill_value: Option<String>,
    output_dir: Option<PathBuf>,
}

impl AnalysisConfigBuilder {
    /// Set how many entries the ranked summaries keep.
    pub fn top_n(mut self, n: usize) -> Self {
        self.top_n = Some(n);
        self
    }

    /// Set the number of cost distribution buckets.
    pub fn histogram_bins(mut self, bins: usize) -> Self {
        self.histogram_bins = Some(bins);
        self
    }

    /// Set the text used for missing cuisines.
    pub fn cuisine_fill_value(mut self, value: impl Into<String>) -> Self {
        self.cuisine_fill_value = Some(value.into());
        self
    }

    /// Set the output directory for reports.
    pub fn output_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(path.into());
        self
    }

    /// Build the configuration.
    ///
    /// Returns a validated `AnalysisConfig` or an error if validation fails.
    pub fn build(self) -> Result<AnalysisConfig, ConfigValidationError> {
        let config = AnalysisConfig {
            top_n: self.top_n.unwrap_or(DEFAULT_TOP_N),
            histogram_bins: self.histogram_bins.unwrap_or(DEFAULT_HISTOGRAM_BINS),
            cuisine_fill_value: self
                .cuisine_fill_value
                .unwrap_or_else(|| DEFAULT_CUISINE_FILL.to_string()),
            output_dir: self.output_dir.unwrap_or_else(|| PathBuf::from("outputs")),
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AnalysisConfig::default();
        assert_eq!(config.top_n, 10);
        assert_eq!(config.histogram_bins, 30);
        assert_eq!(config.cuisine_fill_value, "Unknown");
    }

    #[test]
    fn test_builder_defaults_match_default() {
        let config = AnalysisConfig::builder().build().unwrap();
        assert_eq!(config, AnalysisConfig::default());
    }

    #[test]
    fn test_builder_custom_values() {
        let config = AnalysisConfig::builder()
            .top_n(3)
            .histogram_bins(12)
            .cuisine_fill_value("Not listed")
            .output_dir("reports")
            .build()
            .unwrap();

        assert_eq!(config.top_n, 3);
        assert_eq!(config.histogram_bins, 12);
        assert_eq!(config.cuisine_fill_value, "Not listed");
        assert_eq!(config.output_dir, PathBuf::from("reports"));
    }

    #[test]
    fn test_validation_rejects_zero_top_n() {
        let result = AnalysisConfig::builder().top_n(0).build();
        assert!(matches!(
            result.unwrap_err(),
            ConfigValidationError::InvalidTopN(0)
        ));
    }

    #[test]
    fn test_validation_rejects_zero_bins() {
        let result = AnalysisConfig::builder().histogram_bins(0).build();
        assert!(matches!(
            result.unwrap_err(),
            ConfigValidationError::InvalidBinCount(0)
        ));
    }

    #[test]
    fn test_validation_rejects_blank_fill_value() {
        let result = AnalysisConfig::builder().cuisine_fill_value("  ").build();
        assert!(matches!(
            result.unwrap_err(),
            ConfigValidationError::EmptyFillValue
        ));
    }

    #[test]
    fn test_config_from_json() {
        let json = r#"{
            "top_n": 5,
            "histogram_bins": 15,
            "cuisine_fill_value": "Other",
            "output_dir": "custom_output"
        }"#;

        let config: AnalysisConfig = serde_json::from_str(json).expect("Should deserialize");
        assert_eq!(config.top_n, 5);
        assert_eq!(config.histogram_bins, 15);
        assert_eq!(config.cuisine_fill_value, "Other");
        assert_eq!(config.output_dir.to_str().unwrap(), "custom_output");
    }
}
