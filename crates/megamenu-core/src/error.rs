//! Domain errors

use thiserror::Error;

use crate::domain::FieldError;
use crate::validation::ValidationError;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Parent menu item not found: {0}")]
    ParentNotFound(String),

    #[error("Menu depth limit exceeded: item would reach depth {depth}, maximum is {max}")]
    DepthLimitExceeded { depth: usize, max: usize },

    #[error("Menu item id already exists: {0}")]
    DuplicateId(String),

    #[error("Invalid menu data: {0}")]
    Validation(#[from] ValidationError),

    #[error("Invalid form input: {}", format_field_errors(.0))]
    InvalidForm(Vec<FieldError>),

    #[error("Invalid menu item {id}: {}", format_field_errors(.errors))]
    InvalidItem { id: String, errors: Vec<FieldError> },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

fn format_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join(", ")
}

impl From<Vec<FieldError>> for DomainError {
    fn from(errors: Vec<FieldError>) -> Self {
        DomainError::InvalidForm(errors)
    }
}

impl From<serde_json::Error> for DomainError {
    fn from(e: serde_json::Error) -> Self {
        DomainError::SerializationError(e.to_string())
    }
}

/// Failures of the key-value storage port.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Storage quota exceeded: {0}")]
    QuotaExceeded(String),

    #[error("Storage access denied: {0}")]
    AccessDenied(String),

    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage backend error: {0}")]
    Backend(String),
}

/// Failures of the host SDK port.
#[derive(Error, Debug)]
pub enum HostError {
    #[error("Host SDK not available: {0}")]
    Unavailable(String),

    #[error("Host SDK not initialized")]
    NotInitialized,

    #[error("Host navigation failed: {0}")]
    NavigationFailed(String),

    #[error("Host error: {0}")]
    Other(String),
}
