//! # trimline-core: Vehicle Configuration Rules and Pricing
//!
//! This crate holds the configuration rules engine: which options a trim
//! allows, which defaults a trim change picks, what the configuration costs,
//! and how it is written to and read from a quote document.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Trimline Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    trimline CLI (apps/cli)                      │   │
//! │  │    list ──► show ──► check ──► quote ──► import                │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ trimline-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌────────────┐  ┌───────────┐  ┌──────────┐  │   │
//! │  │   │  catalog  │  │ restriction│  │   store   │  │  quote   │  │   │
//! │  │   │  Vehicle  │  │  Resolver  │  │ Selection │  │ export / │  │   │
//! │  │   │  Entry    │  │  + rules   │  │  events   │  │ import   │  │   │
//! │  │   └───────────┘  └────────────┘  └───────────┘  └──────────┘  │   │
//! │  │                         pricing • money • validation            │   │
//! │  │                                                                 │   │
//! │  │   NO FILE I/O • NO NETWORK • PURE TRANSITIONS                   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                trimline-catalog (Catalog Provider)              │   │
//! │  │              JSON catalog files, bundled seed catalog           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`catalog`] - Vehicle catalog schema and the `CatalogProvider` seam
//! - [`selection`] - The user's current choices
//! - [`rules`] - Vehicle-specific rules as data
//! - [`restriction`] - Disabled / included / hidden lookups
//! - [`store`] - Selection transitions (trim cascade, exclusions)
//! - [`pricing`] - Itemized prices and totals
//! - [`quote`] - Quote document export and import
//! - [`money`] - Whole-won money type
//! - [`validation`] - Catalog checks and stale-selection report
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use trimline_core::{SelectionEvent, SelectionStore, TaxBenefit, VehicleEntry};
//!
//! let entry: VehicleEntry = serde_json::from_str(r#"{
//!     "id": "ev3", "fullName": "The Kia EV3", "fullPrice": "50,000,000",
//!     "trims": [{ "name": "Air", "price": 0 }],
//!     "exterior": [{ "name": "화이트", "price": 0 }],
//!     "interior": [{ "name": "블랙", "price": 0 }],
//!     "taxBenefitDiscounts": { "Air": 1000000 }
//! }"#).unwrap();
//!
//! let mut store = SelectionStore::new(Arc::new(entry)).unwrap();
//! store.dispatch(SelectionEvent::ChangeTaxBenefit(TaxBenefit::Applied)).unwrap();
//!
//! assert_eq!(store.pricing().total_price().won(), 49_000_000);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod error;
pub mod money;
pub mod pricing;
pub mod quote;
pub mod restriction;
pub mod rules;
pub mod selection;
pub mod store;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use catalog::{CatalogList, CatalogProvider, CarOption, InMemoryCatalog, PricedItem, VehicleEntry};
pub use error::{CoreError, CoreResult, QuoteError, QuoteResult, ValidationError};
pub use money::Money;
pub use pricing::{PriceBreakdown, PriceCalculator};
pub use quote::{QuoteDocument, QuoteExport};
pub use restriction::{OptionAvailability, RestrictionResolver};
pub use rules::{RuleRegistry, VehicleRule};
pub use selection::{Selection, TaxBenefit};
pub use store::{SelectionEvent, SelectionStore};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Option category whose selection unlocks or blocks other options.
pub const PACKAGE_OPTION_CATEGORY: &str = "패키지옵션";
