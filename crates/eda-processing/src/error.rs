//! Error types for missing-data analysis and imputation.
//!
//! Every failure is reported to the immediate caller as an [`EdaError`];
//! nothing here falls back to a default value. Errors serialize as
//! `{code, message}` so a presentation layer can turn them into user-facing
//! messages without matching on display strings.

use serde::Serialize;
use serde::ser::SerializeStruct;
use thiserror::Error;

use crate::config::ImputationStrategy;
use crate::types::ColumnType;

/// The main error type for the EDA core.
#[derive(Error, Debug)]
pub enum EdaError {
    /// Empty column selection, or a selected column that is not in the dataset.
    #[error("Invalid column selection: {0}")]
    InvalidSelection(String),

    /// A non-numeric column was selected for a numeric-only strategy.
    #[error("Column '{column}' is {column_type}, but {strategy} imputation requires a numeric column")]
    TypeMismatch {
        column: String,
        column_type: ColumnType,
        strategy: ImputationStrategy,
    },

    /// The statistic has no value because the column holds only missing values.
    #[error("Cannot compute {strategy} for column '{column}': no non-missing values")]
    UndefinedStatistic {
        column: String,
        strategy: ImputationStrategy,
    },

    /// Input bytes are not valid in the requested encoding.
    #[error("Failed to decode input as {encoding}: {reason}")]
    Decode { encoding: String, reason: String },

    /// Invalid configuration provided.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Polars error wrapper.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error with additional context.
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<EdaError>,
    },
}

impl EdaError {
    /// Add context to an error.
    pub fn with_context(self, context: impl Into<String>) -> Self {
        EdaError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Stable error code for frontend handling.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidSelection(_) => "INVALID_SELECTION",
            Self::TypeMismatch { .. } => "TYPE_MISMATCH",
            Self::UndefinedStatistic { .. } => "UNDEFINED_STATISTIC",
            Self::Decode { .. } => "DECODE_ERROR",
            Self::InvalidConfig(_) => "INVALID_CONFIG",
            Self::Io(_) => "IO_ERROR",
            Self::Polars(_) => "POLARS_ERROR",
            Self::Json(_) => "JSON_ERROR",
            Self::WithContext { source, .. } => source.error_code(),
        }
    }

    /// Whether the user can fix this by changing their choices
    /// (selection, strategy or load options) and trying again.
    pub fn is_user_error(&self) -> bool {
        match self {
            Self::InvalidSelection(_)
            | Self::TypeMismatch { .. }
            | Self::UndefinedStatistic { .. }
            | Self::Decode { .. }
            | Self::InvalidConfig(_) => true,
            Self::WithContext { source, .. } => source.is_user_error(),
            _ => false,
        }
    }
}

impl Serialize for EdaError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("EdaError", 2)?;
        state.serialize_field("code", &self.error_code())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}

/// Result type alias for EDA operations.
pub type Result<T> = std::result::Result<T, EdaError>;

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
        self.map_err(|e| EdaError::Polars(e).with_context(context))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code() {
        assert_eq!(
            EdaError::InvalidSelection("empty".to_string()).error_code(),
            "INVALID_SELECTION"
        );
        let mismatch = EdaError::TypeMismatch {
            column: "city".to_string(),
            column_type: ColumnType::Text,
            strategy: ImputationStrategy::Mean,
        };
        assert_eq!(mismatch.error_code(), "TYPE_MISMATCH");
    }

    #[test]
    fn test_type_mismatch_message() {
        let error = EdaError::TypeMismatch {
            column: "city".to_string(),
            column_type: ColumnType::Text,
            strategy: ImputationStrategy::Median,
        };
        let message = error.to_string();
        assert!(message.contains("city"));
        assert!(message.contains("text"));
        assert!(message.contains("median"));
    }

    #[test]
    fn test_is_user_error() {
        assert!(EdaError::InvalidSelection("x".to_string()).is_user_error());
        assert!(
            EdaError::UndefinedStatistic {
                column: "a".to_string(),
                strategy: ImputationStrategy::Mode,
            }
            .is_user_error()
        );
        let io = EdaError::Io(std::io::Error::other("disk"));
        assert!(!io.is_user_error());
    }

    #[test]
    fn test_error_serialization() {
        let error = EdaError::InvalidSelection("column 'Age' not found".to_string());
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("INVALID_SELECTION"));
        assert!(json.contains("Age"));
    }

    #[test]
    fn test_with_context() {
        let error = EdaError::InvalidSelection("no columns".to_string())
            .with_context("While imputing");
        assert!(error.to_string().contains("While imputing"));
        assert_eq!(error.error_code(), "INVALID_SELECTION");
        assert!(error.is_user_error());
    }
}
