//! Pipeline module.
//!
//! This module provides the load, clean and aggregate pipeline and its
//! progress reporting.

mod builder;
pub mod progress;

pub use builder::{Pipeline, PipelineBuilder};
pub use progress::{
    AnalysisStage, ClosureProgressReporter, NoopProgressReporter, ProgressReporter,
    ProgressUpdate,
};
