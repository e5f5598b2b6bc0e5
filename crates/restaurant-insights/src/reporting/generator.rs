//! Dashboard report building and JSON output.

use crate::error::Result;
use crate::types::{AnalysisResult, CleaningSummary, InsightsReport};
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

/// Everything a run produced, plus when and from what.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardReport {
    /// Timestamp when the report was generated
    pub generated_at: String,
    /// Path or label of the input file
    pub input_file: String,
    /// Total execution time in milliseconds
    pub duration_ms: u64,
    pub cleaning: CleaningSummary,
    pub insights: InsightsReport,
}

/// Writes dashboard reports to an output directory.
#[derive(Debug, Clone)]
pub struct ReportGenerator {
    output_dir: PathBuf,
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("./outputs"),
        }
    }
}

impl ReportGenerator {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Build a report from a finished run.
    pub fn build_report(input_file: &str, result: &AnalysisResult) -> DashboardReport {
        DashboardReport {
            generated_at: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            input_file: input_file.to_string(),
            duration_ms: result.duration_ms,
            cleaning: result.cleaning.clone(),
            insights: result.report.clone(),
        }
    }

    /// Write a report as pretty JSON.
    ///
    /// For a `report_base_name` of "zomato" the file is
    /// `<output_dir>/zomato_insights.json`. The directory is created if needed.
    pub fn write_report_to_file(
        &self,
        report: &DashboardReport,
        report_base_name: &str,
    ) -> Result<PathBuf> {
        fs::create_dir_all(&self.output_dir)?;

        let report_path = self
            .output_dir
            .join(format!("{}_insights.json", report_base_name));
        let mut file = File::create(&report_path)?;
        file.write_all(serde_json::to_string_pretty(report)?.as_bytes())?;

        info!("Report saved: {}", report_path.display());

        Ok(report_path)
    }
}
