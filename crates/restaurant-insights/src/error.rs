//! Custom error types for the restaurant insights pipeline.
//!
//! Two failures matter to callers: a file that cannot be loaded
//! ([`InsightsError::Load`]) and a table that lacks a column an operation
//! needs ([`InsightsError::MissingColumn`]). The remaining variants wrap
//! lower-level failures so they can be propagated with `?`.
//!
//! Errors are serializable so a host UI can display them directly.

use serde::Serialize;
use serde::ser::SerializeStruct;
use thiserror::Error;

/// The main error type for the insights pipeline.
#[derive(Error, Debug)]
pub enum InsightsError {
    /// The input could not be decoded or parsed as delimited text.
    #[error("Failed to load '{source_name}': {reason}")]
    Load { source_name: String, reason: String },

    /// A column required by an operation is absent from the table.
    #[error("Column '{0}' not found in dataset")]
    MissingColumn(String),

    /// Invalid configuration provided.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Polars error wrapper.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with context.
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<InsightsError>,
    },
}

impl InsightsError {
    /// Build a load error for the given input.
    pub fn load(source_name: impl Into<String>, reason: impl ToString) -> Self {
        InsightsError::Load {
            source_name: source_name.into(),
            reason: reason.to_string(),
        }
    }

    /// Add context to an error.
    pub fn with_context(self, context: impl Into<String>) -> Self {
        InsightsError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Get error code for frontend handling.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Load { .. } => "LOAD_ERROR",
            Self::MissingColumn(_) => "SCHEMA_ERROR",
            Self::InvalidConfig(_) => "INVALID_CONFIG",
            Self::Io(_) => "IO_ERROR",
            Self::Polars(_) => "POLARS_ERROR",
            Self::Json(_) => "JSON_ERROR",
            Self::WithContext { source, .. } => source.error_code(),
        }
    }

    /// Check if this error means the input could not be loaded.
    pub fn is_load_error(&self) -> bool {
        match self {
            Self::Load { .. } => true,
            Self::WithContext { source, .. } => source.is_load_error(),
            _ => false,
        }
    }

    /// Check if this error means a required column was missing.
    pub fn is_schema_error(&self) -> bool {
        match self {
            Self::MissingColumn(_) => true,
            Self::WithContext { source, .. } => source.is_schema_error(),
            _ => false,
        }
    }
}

/// Errors are serialized as a struct with `code` and `message` fields.
impl Serialize for InsightsError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("InsightsError", 2)?;
        state.serialize_field("code", &self.error_code())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}

/// Result type alias for insights operations.
pub type Result<T> = std::result::Result<T, InsightsError>;

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, polars::error::PolarsError> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| InsightsError::Polars(e).with_context(context))
    }
}
