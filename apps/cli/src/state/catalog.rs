//! # Catalog State
//!
//! Wraps the loaded `Catalog` for use in commands.
//!
//! ## Thread Safety
//! The catalog is immutable after loading and shares its entries by `Arc`,
//! so commands read it concurrently without locking.
//!
//! ## Usage in Commands
//! ```rust,ignore
//! async fn show(catalog: &CatalogState, id: &str) -> Result<VehicleDetailDto, ApiError> {
//!     let entry = catalog.inner().vehicles().require(id)?;
//!     Ok(VehicleDetailDto::from_entry(&entry))
//! }
//! ```

use trimline_catalog::{Catalog, CatalogConfig};

use crate::error::ApiError;
use crate::state::AppConfig;

/// Wrapper around `Catalog` for command state.
#[derive(Debug, Clone)]
pub struct CatalogState {
    catalog: Catalog,
}

impl CatalogState {
    /// Wraps an already loaded catalog.
    pub fn new(catalog: Catalog) -> Self {
        CatalogState { catalog }
    }

    /// Loads the configured catalog, or the bundled seed when none is set.
    pub async fn load(config: &AppConfig) -> Result<Self, ApiError> {
        let catalog_config = match &config.catalog {
            Some(path) => CatalogConfig::new(path),
            None => CatalogConfig::bundled(),
        };
        Ok(CatalogState::new(Catalog::load(catalog_config).await?))
    }

    /// Returns a reference to the inner Catalog.
    pub fn inner(&self) -> &Catalog {
        &self.catalog
    }
}
