//! Error types for Gestor de Cine

use thiserror::Error;

/// Result type alias using the catalog Error
pub type Result<T> = std::result::Result<T, Error>;

/// Catalog error types
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Record not found: {kind} with id {id}")]
    NotFound { kind: &'static str, id: u32 },

    #[error("Invalid form field {field}: {value:?}")]
    InvalidField { field: &'static str, value: String },
}
