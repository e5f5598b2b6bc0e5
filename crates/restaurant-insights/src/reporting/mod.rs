//! Report generation module.
//!
//! A [`DashboardReport`] wraps one
//! [`AnalysisResult`](crate::types::AnalysisResult) with run metadata. The
//! same structure is used for:
//! - JSON output to stdout (`--json` CLI flag)
//! - JSON file output (`--emit-report` CLI flag)
//! - Programmatic access in library mode
//!
//! # Example
//!
//! ```rust,ignore
//! use restaurant_insights::reporting::ReportGenerator;
//!
//! let report = ReportGenerator::build_report("data/zomato.csv", &result);
//! println!("{}", serde_json::to_string_pretty(&report)?);
//!
//! let generator = ReportGenerator::new("outputs");
//! generator.write_report_to_file(&report, "zomato")?;
//! ```

mod generator;

pub use generator::{DashboardReport, ReportGenerator};
