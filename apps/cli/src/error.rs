//! # API Error Type
//!
//! Unified error type for CLI commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Trimline                               │
//! │                                                                         │
//! │  trimline quote ev3 --trim GT-Line --wheel "22인치"                     │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  Result<T, ApiError>                                             │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Catalog Error? ─── CatalogError::NotFound("ev4") ──┐           │  │
//! │  │         │                                           │           │  │
//! │  │         ▼                                           ▼           │  │
//! │  │  Rules Error? ─── CoreError::UnknownChoice ─────── ApiError ───►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  stderr:  error: [SelectionError] wheel '22인치' is not offered …       │
//! │  --json:  { "code": "SELECTION_ERROR", "message": "wheel '22인치' …" } │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use trimline_catalog::CatalogError;
use trimline_core::{CoreError, QuoteError};

use crate::state::ConfigError;

/// API error returned from commands.
///
/// ## Serialization
/// This is what `--json` prints when a command fails:
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Vehicle not found: ev4"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Vehicle not in the catalog
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Catalog could not be loaded
    CatalogError,

    /// Quote document is malformed
    QuoteFormat,

    /// File read/write failed
    IoError,

    /// A choice or category the vehicle does not have
    SelectionError,

    /// Internal error
    Internal,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }

    /// Creates a selection error.
    pub fn selection(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::SelectionError, message)
    }
}

/// Converts catalog errors to API errors.
impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::NotFound(id) => ApiError::not_found("Vehicle", &id),
            other => {
                tracing::error!("Catalog load failed: {}", other);
                ApiError::new(ErrorCode::CatalogError, other.to_string())
            }
        }
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::VehicleNotFound(id) => ApiError::not_found("Vehicle", &id),
            e @ (CoreError::UnknownChoice { .. } | CoreError::UnknownCategory(_)) => {
                ApiError::selection(e.to_string())
            }
            e @ CoreError::TaxBenefitUnavailable(_) => ApiError::validation(e.to_string()),
            CoreError::Validation(e) => ApiError::validation(e.to_string()),
            CoreError::Quote(e) => ApiError::from(e),
        }
    }
}

/// Converts quote codec errors to API errors.
impl From<QuoteError> for ApiError {
    fn from(err: QuoteError) -> Self {
        match err {
            QuoteError::ExportFailed(message) => ApiError::internal(message),
            other => ApiError::new(ErrorCode::QuoteFormat, other.to_string()),
        }
    }
}

impl From<std::io::Error> for ApiError {
    fn from(err: std::io::Error) -> Self {
        tracing::error!("I/O failed: {}", err);
        ApiError::new(ErrorCode::IoError, err.to_string())
    }
}

impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        ApiError::validation(err.to_string())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;
    use trimline_core::ValidationError;

    #[test]
    fn test_serializes_screaming_code() {
        let err = ApiError::not_found("Vehicle", "ev4");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "NOT_FOUND");
        assert_eq!(json["message"], "Vehicle not found: ev4");
    }

    #[test]
    fn test_core_error_mapping() {
        let unknown: ApiError = CoreError::unknown_choice("wheel", "22인치").into();
        assert_eq!(unknown.code, ErrorCode::SelectionError);

        let category: ApiError = CoreError::UnknownCategory("액세서리".into()).into();
        assert_eq!(category.code, ErrorCode::SelectionError);

        let tax: ApiError = CoreError::TaxBenefitUnavailable("ev9-gt".into()).into();
        assert_eq!(tax.code, ErrorCode::ValidationError);

        let invalid: ApiError = CoreError::Validation(ValidationError::Required {
            field: "trims".into(),
        })
        .into();
        assert_eq!(invalid.code, ErrorCode::ValidationError);
    }

    #[test]
    fn test_quote_error_mapping() {
        let missing: ApiError = QuoteError::MissingField("selectedOptions.exterior".into()).into();
        assert_eq!(missing.code, ErrorCode::QuoteFormat);

        let nested: ApiError = CoreError::Quote(QuoteError::InvalidFormat("x".into())).into();
        assert_eq!(nested.code, ErrorCode::QuoteFormat);
    }

    #[test]
    fn test_catalog_error_mapping() {
        let missing: ApiError = CatalogError::NotFound("ev4".into()).into();
        assert_eq!(missing.code, ErrorCode::NotFound);

        let dup: ApiError = CatalogError::DuplicateId("ev3".into()).into();
        assert_eq!(dup.code, ErrorCode::CatalogError);
    }
}
