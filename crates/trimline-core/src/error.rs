//! # Error Types
//!
//! Domain-specific error types for trimline-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  trimline-core errors (this file)                                      │
//! │  ├── CoreError        - Catalog and selection failures                 │
//! │  ├── ValidationError  - Catalog shape/value problems                   │
//! │  └── QuoteError       - Quote document parse/schema failures           │
//! │                                                                         │
//! │  trimline-catalog errors (separate crate)                              │
//! │  └── CatalogError     - Catalog file loading failures                  │
//! │                                                                         │
//! │  CLI errors (in app)                                                   │
//! │  └── ApiError         - What the user sees (code + message)            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! None of these are fatal. A failed transition leaves the selection as it
//! was, a failed import leaves the session untouched.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Catalog and selection errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// No catalog entry exists for the requested vehicle id.
    #[error("Vehicle not found: {0}")]
    VehicleNotFound(String),

    /// A transition named a trim, colour or wheel the vehicle does not offer.
    ///
    /// ## When This Occurs
    /// - `ChangeTrim("Unknown")`
    /// - A stale exterior name carried over from another vehicle
    #[error("{kind} '{name}' is not offered for this vehicle")]
    UnknownChoice { kind: String, name: String },

    /// An option toggle named a category the vehicle does not have.
    #[error("Option category not found: {0}")]
    UnknownCategory(String),

    /// The tax benefit was requested on a vehicle without `taxBenefitDiscounts`.
    #[error("Tax benefit is not offered for {0}")]
    TaxBenefitUnavailable(String),

    /// Catalog entry failed validation.
    #[error("Invalid catalog entry: {0}")]
    Validation(#[from] ValidationError),

    /// A quote document could not be loaded into the store.
    #[error(transparent)]
    Quote(#[from] QuoteError),
}

impl CoreError {
    /// Creates an UnknownChoice error for a given list and name.
    pub fn unknown_choice(kind: impl Into<String>, name: impl Into<String>) -> Self {
        CoreError::UnknownChoice {
            kind: kind.into(),
            name: name.into(),
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Catalog validation errors.
///
/// Raised when a catalog entry is loaded, before any selection is built on it.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Invalid format (e.g., an unparsable base price).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Price must not be negative.
    #[error("{field} must not be negative (got {value})")]
    NegativePrice { field: String, value: i64 },

    /// Price above [`MAX_PRICE`](crate::money::MAX_PRICE).
    ///
    /// ## When This Occurs
    /// - A mistyped `fullPrice` with extra digit groups
    /// - A placeholder such as `9,223,372,036,854,775,807`
    #[error("{field} exceeds the price limit (got {value})")]
    PriceOutOfRange { field: String, value: i64 },

    /// Duplicate name within one list.
    #[error("{field} '{value}' appears more than once")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Quote Error
// =============================================================================

/// Quote document import errors.
#[derive(Debug, Error)]
pub enum QuoteError {
    /// The document is JSON but matches neither the canonical nor the
    /// legacy flat schema.
    #[error("invalid quote format: {0}")]
    InvalidFormat(String),

    /// A field the schema requires is missing or empty.
    #[error("quote is missing required field '{0}'")]
    MissingField(String),

    /// The document is not JSON at all.
    #[error("quote is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Export produced the `{error, timestamp}` shape instead of a document.
    #[error("quote export failed: {0}")]
    ExportFailed(String),
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

/// Convenience type alias for quote import results.
pub type QuoteResult<T> = Result<T, QuoteError>;

// =============================================================================
// Unit Tests
// =============================================================================
