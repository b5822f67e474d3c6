//! # trimline-catalog: Catalog Provider for Trimline
//!
//! This crate supplies vehicle catalog entries to the rules engine. Entries
//! come from JSON files on disk or from the seed catalog compiled into the
//! binary.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Trimline Data Flow                               │
//! │                                                                         │
//! │  CLI command (quote ev3 …)                                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  trimline-catalog (THIS CRATE)                  │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │    Catalog    │    │  Repository   │    │     Seed     │  │   │
//! │  │   │  (source.rs)  │    │ (vehicle.rs)  │    │  (seed.rs)   │  │   │
//! │  │   │               │    │               │    │              │  │   │
//! │  │   │ file / dir /  │◄───│ VehicleRepo   │    │ ev3, ev9-gt, │  │   │
//! │  │   │ bundled       │    │ require/search│    │ ray-ev       │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  trimline-core: SelectionStore::new(Arc<VehicleEntry>)                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`source`] - Catalog configuration and loading
//! - [`repository`] - Vehicle lookups
//! - [`seed`] - The bundled seed catalog
//! - [`error`] - Catalog error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use trimline_catalog::{Catalog, CatalogConfig};
//!
//! let catalog = Catalog::load(CatalogConfig::new("./catalog")).await?;
//! let entry = catalog.vehicles().require("ev3")?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod repository;
pub mod seed;
pub mod source;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{CatalogError, CatalogResult};
pub use repository::vehicle::VehicleRepository;
pub use source::{Catalog, CatalogConfig, CatalogSource};
