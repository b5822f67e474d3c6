//! # Catalog Error Types
//!
//! Error types for catalog loading.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  std::io::Error / serde_json::Error / ValidationError                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CatalogError (this module) ← Adds the offending path                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ApiError (in CLI) ← code + message for the user                       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use thiserror::Error;
use trimline_core::ValidationError;

/// Catalog loading errors.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// No vehicle with the requested id.
    ///
    /// ## When This Occurs
    /// - Typo in the vehicle id on the command line
    /// - A quote document from a vehicle no longer in the catalog
    #[error("Vehicle not found: {0}")]
    NotFound(String),

    /// The catalog path could not be read.
    #[error("Failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A catalog file is not valid catalog JSON.
    #[error("Failed to parse catalog {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// An entry parsed but failed validation.
    ///
    /// ## When This Occurs
    /// - Empty trims, exterior or interior list
    /// - Duplicate names, negative prices
    #[error("Invalid vehicle '{id}': {source}")]
    Invalid {
        id: String,
        #[source]
        source: ValidationError,
    },

    /// Two entries share one id.
    #[error("Duplicate vehicle id: {0}")]
    DuplicateId(String),
}

impl CatalogError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CatalogError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn parse(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        CatalogError::Parse {
            path: path.into(),
            source,
        }
    }
}

/// Result type for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;
