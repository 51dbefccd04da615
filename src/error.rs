//! Error types for Debt Drainer
//!
//! Pure computations (split, classify, aggregate) only ever produce
//! `Validation` errors. Mutating services add `NotFound`, `Storage` and
//! `Upstream` failures. A settlement that changes nothing is not an error.

use thiserror::Error;

/// The main error type for Debt Drainer operations
#[derive(Error, Debug)]
pub enum DrainerError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Malformed input to a split, settle or create operation
    #[error("Validation error: {0}")]
    Validation(String),

    /// Operation against an unknown entity
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// The backing store failed to read or persist
    #[error("Storage error: {0}")]
    Storage(String),

    /// An external collaborator (payment provider, bank aggregator) failed
    #[error("Upstream failure: {context}")]
    Upstream {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl DrainerError {
    pub fn expense_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Expense",
            identifier: identifier.into(),
        }
    }

    pub fn participant_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Participant",
            identifier: identifier.into(),
        }
    }

    pub fn debt_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Debt",
            identifier: identifier.into(),
        }
    }

    pub fn budget_category_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Budget category",
            identifier: identifier.into(),
        }
    }

    pub fn micropayment_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Micropayment",
            identifier: identifier.into(),
        }
    }

    /// Wrap a collaborator failure, keeping the original cause reachable via `source()`
    pub fn upstream<E>(context: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Upstream {
            context: context.into(),
            source: Box::new(source),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<std::io::Error> for DrainerError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for DrainerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for Debt Drainer operations
pub type DrainerResult<T> = Result<T, DrainerError>;
