//! # Vehicle Repository
//!
//! Lookups over the loaded vehicle entries.
//!
//! ## Key Operations
//! - Lookup by id (`get_by_id`, `require`)
//! - Listing in catalog order
//! - Search by display name or id
//!
//! ## Search
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  User types: "ev9"                                                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  case-insensitive substring over: id, fullName                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ev3     | The Kia EV3      |                                           │
//! │  ev9-gt  | The Kia EV9 GT   | ← MATCH                                   │
//! │  ray-ev  | The Kia Ray EV   |                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use tracing::debug;
use trimline_core::{CatalogProvider, VehicleEntry};

use crate::error::{CatalogError, CatalogResult};

/// Repository over the loaded vehicles.
///
/// ## Usage
/// ```rust,ignore
/// let repo = catalog.vehicles();
///
/// let matches = repo.search("ev", 20);
/// let entry = repo.require("ev3")?;
/// ```
#[derive(Debug, Clone)]
pub struct VehicleRepository {
    vehicles: Arc<Vec<VehicleEntry>>,
}

impl VehicleRepository {
    pub fn new(vehicles: Arc<Vec<VehicleEntry>>) -> Self {
        VehicleRepository { vehicles }
    }

    /// Gets a vehicle by id as a shared handle for a selection store.
    ///
    /// ## Returns
    /// * `Ok(Arc<VehicleEntry>)` - vehicle found
    /// * `Err(CatalogError::NotFound)` - no such id
    pub fn require(&self, id: &str) -> CatalogResult<Arc<VehicleEntry>> {
        self.get_by_id(id)
            .cloned()
            .map(Arc::new)
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))
    }

    /// Searches vehicles by name or id.
    ///
    /// Empty query returns every vehicle, in catalog order.
    pub fn search(&self, query: &str, limit: usize) -> Vec<&VehicleEntry> {
        let mut matches = self.find_by_name(query);
        matches.truncate(limit);

        debug!(query = %query.trim(), count = matches.len(), "Search returned vehicles");
        matches
    }

    /// Number of vehicles.
    pub fn count(&self) -> usize {
        self.vehicles.len()
    }
}

impl CatalogProvider for VehicleRepository {
    fn get_by_id(&self, id: &str) -> Option<&VehicleEntry> {
        self.vehicles.iter().find(|v| v.id == id)
    }

    fn get_all(&self) -> &[VehicleEntry] {
        &self.vehicles
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
