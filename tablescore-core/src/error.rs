//! Error types for the scoring engine and its ingestion front ends.
//!
//! The engine distinguishes sharply between malformed *input* (the only
//! condition under which analysis fails) and poor-quality *data* (which is
//! always reported as issues inside a complete report, never as an error).

use thiserror::Error;

/// Main error type for Tablescore operations.
#[derive(Debug, Error)]
pub enum TablescoreError {
    /// The dataset itself is malformed and cannot be scored
    #[error("Invalid dataset: {reason}")]
    InvalidDataset { reason: String },

    /// Configuration or validation error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Reading or parsing a dataset source failed
    #[error("Dataset ingestion failed: {context}")]
    Ingest {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// I/O operation failed
    #[error("I/O operation failed: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    /// Serialization or deserialization failed
    #[error("Serialization failed: {context}")]
    Serialization {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Convenience type alias for Results with TablescoreError
pub type Result<T> = std::result::Result<T, TablescoreError>;

impl TablescoreError {
    /// Creates an invalid-dataset error.
    ///
    /// This is the only error `analyze` can return: the dataset argument
    /// violated its structural contract (no columns, non-object rows,
    /// undeclared keys, or non-scalar cell values).
    pub fn invalid_dataset(reason: impl Into<String>) -> Self {
        Self::InvalidDataset {
            reason: reason.into(),
        }
    }

    /// Creates a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Creates an ingestion error with context
    pub fn ingest_failed<E>(context: impl Into<String>, error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Ingest {
            context: context.into(),
            source: Box::new(error),
        }
    }

    /// Creates an I/O error with context
    pub fn io_failed(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Creates a serialization error with context
    pub fn serialization_failed(context: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Serialization {
            context: context.into(),
            source,
        }
    }

    /// Returns true when the error is the fatal invalid-dataset variant.
    pub fn is_invalid_dataset(&self) -> bool {
        matches!(self, Self::InvalidDataset { .. })
    }
}
