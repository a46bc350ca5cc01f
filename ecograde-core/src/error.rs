//! Error types for ecograde-core

use thiserror::Error;

/// Top-level error type for ecograde-core
#[derive(Error, Debug)]
pub enum EcogradeError {
    #[error("Referential error: {0}")]
    Referential(#[from] ReferentialError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// Errors from referential providers
#[derive(Error, Debug)]
pub enum ReferentialError {
    #[error("Referential not found: {0}")]
    NotFound(String),

    #[error("Failed to read referential: {0}")]
    Io(String),

    #[error("Failed to parse referential: {0}")]
    Parse(String),
}

/// Errors from assessment stores
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Storage I/O error: {0}")]
    Io(String),

    #[error("Serialization error: {0}")]
    Serialize(String),

    #[error("Backend error: {0}")]
    Backend(String),
}
