//! Error handling for the clinical inference engine.

use arrow::error::ArrowError;
use std::io;

/// Errors raised by an external classifier or by the feature contract around it
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InferenceError {
    /// The model has not been fitted or loaded
    #[error("classifier is not fitted")]
    NotFitted,

    /// The classifier was fitted on a different feature layout
    #[error("feature schema mismatch: expected {expected:?}, supplied {supplied:?}")]
    FeatureMismatch {
        /// Feature names the classifier was fitted on
        expected: Vec<String>,
        /// Feature names the engine supplies
        supplied: Vec<String>,
    },

    /// The classifier answered, but with nothing usable
    #[error("unusable prediction: {0}")]
    InvalidPrediction(String),

    /// Failure inside the model-serving backend
    #[error("classifier backend failure: {0}")]
    Backend(String),
}

/// Specialized error type for the engine
#[derive(Debug, thiserror::Error)]
pub enum CdsError {
    /// The record schema lacks required numeric vitals columns
    #[error("Schema error: missing required vitals columns {missing:?}")]
    Schema {
        /// Canonical names of the absent columns
        missing: Vec<String>,
    },

    /// An external classifier failed
    #[error("Inference error: {0}")]
    Inference(#[from] InferenceError),

    /// Encryption box failure (key material, encoding)
    #[error("Cipher error: {0}")]
    Cipher(String),

    /// A custom knowledge base or protocol library is malformed
    #[error("Knowledge base error: {0}")]
    KnowledgeBase(String),

    /// Invalid engine configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Arrow error while reading a record batch
    #[error("Arrow error: {0}")]
    Arrow(#[from] ArrowError),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error opening or reading a file
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

impl CdsError {
    /// Build a schema error from the missing column names
    pub fn schema<I, S>(missing: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Schema {
            missing: missing.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether this error is a caller-configuration problem rather than a data problem
    #[must_use]
    pub const fn is_schema_error(&self) -> bool {
        matches!(self, Self::Schema { .. })
    }
}

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, CdsError>;
