//! # Catalog Loading
//!
//! Where catalog entries come from and how they are read.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Catalog Loading                                 │
//! │                                                                         │
//! │  CLI startup                                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CatalogConfig::bundled() / CatalogConfig::new(path)                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Catalog::load(config).await                                            │
//! │       │                                                                 │
//! │       ├── bundled    → seed_catalog.json compiled into the binary       │
//! │       ├── file       → JSON array of entries, or one entry              │
//! │       └── directory  → every *.json file, sorted by file name           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  validate every entry, reject duplicate ids                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Catalog ──► vehicles() ──► VehicleRepository                           │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Entries are immutable once loaded; the catalog is shared by `Arc`.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info, warn};
use trimline_core::validation::validate_vehicle_entry;
use trimline_core::{CatalogProvider, VehicleEntry};

use crate::error::{CatalogError, CatalogResult};
use crate::repository::vehicle::VehicleRepository;
use crate::seed::{seed_entries, SEED_ORIGIN};

// =============================================================================
// Configuration
// =============================================================================

/// Where to load the catalog from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    /// The seed catalog compiled into the binary.
    Bundled,
    /// A JSON file or a directory of JSON files.
    Path(PathBuf),
}

/// Catalog configuration.
///
/// ## Example
/// ```rust,ignore
/// let config = CatalogConfig::new("./catalog").validate(true);
/// let catalog = Catalog::load(config).await?;
/// ```
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    pub source: CatalogSource,

    /// Reject entries that fail validation.
    /// Default: true
    pub validate: bool,
}

impl CatalogConfig {
    /// Loads from a file or directory.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        CatalogConfig {
            source: CatalogSource::Path(path.into()),
            validate: true,
        }
    }

    /// Loads the bundled seed catalog.
    pub fn bundled() -> Self {
        CatalogConfig {
            source: CatalogSource::Bundled,
            validate: true,
        }
    }

    /// Sets whether entries are validated on load.
    pub fn validate(mut self, validate: bool) -> Self {
        self.validate = validate;
        self
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self::bundled()
    }
}

// =============================================================================
// Catalog
// =============================================================================

/// A loaded, read-only catalog.
#[derive(Debug, Clone)]
pub struct Catalog {
    vehicles: Arc<Vec<VehicleEntry>>,
    origin: String,
}

impl Catalog {
    /// Loads and validates a catalog.
    ///
    /// ## Returns
    /// * `Ok(Catalog)` - every entry parsed (and validated, if enabled)
    /// * `Err(CatalogError)` - unreadable path, bad JSON, invalid entry or
    ///   duplicate id
    pub async fn load(config: CatalogConfig) -> CatalogResult<Self> {
        let (vehicles, origin) = match &config.source {
            CatalogSource::Bundled => (seed_entries()?, SEED_ORIGIN.to_string()),
            CatalogSource::Path(path) => (load_path(path).await?, path.display().to_string()),
        };

        let catalog = Self::from_entries(vehicles, origin, config.validate)?;
        info!(origin = %catalog.origin, vehicles = catalog.vehicles.len(), "Catalog loaded");
        Ok(catalog)
    }

    /// Builds a catalog from entries already in memory.
    pub fn from_entries(
        vehicles: Vec<VehicleEntry>,
        origin: impl Into<String>,
        validate: bool,
    ) -> CatalogResult<Self> {
        let mut seen = HashSet::new();
        for entry in &vehicles {
            if validate {
                validate_vehicle_entry(entry).map_err(|source| CatalogError::Invalid {
                    id: entry.id.clone(),
                    source,
                })?;
            }
            if !seen.insert(entry.id.as_str()) {
                return Err(CatalogError::DuplicateId(entry.id.clone()));
            }
        }

        Ok(Catalog {
            vehicles: Arc::new(vehicles),
            origin: origin.into(),
        })
    }

    /// Where the catalog was loaded from.
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Vehicle lookups.
    pub fn vehicles(&self) -> VehicleRepository {
        VehicleRepository::new(Arc::clone(&self.vehicles))
    }
}

impl CatalogProvider for Catalog {
    fn get_by_id(&self, id: &str) -> Option<&VehicleEntry> {
        self.vehicles.iter().find(|v| v.id == id)
    }

    fn get_all(&self) -> &[VehicleEntry] {
        &self.vehicles
    }
}

// =============================================================================
// File Loading
// =============================================================================

async fn load_path(path: &Path) -> CatalogResult<Vec<VehicleEntry>> {
    let metadata = tokio::fs::metadata(path)
        .await
        .map_err(|e| CatalogError::io(path, e))?;

    if !metadata.is_dir() {
        return load_file(path).await;
    }

    let mut files = Vec::new();
    let mut dir = tokio::fs::read_dir(path)
        .await
        .map_err(|e| CatalogError::io(path, e))?;
    while let Some(item) = dir.next_entry().await.map_err(|e| CatalogError::io(path, e))? {
        let file = item.path();
        if file.extension().is_some_and(|ext| ext == "json") {
            files.push(file);
        } else {
            debug!(file = %file.display(), "Skipping non-JSON file in catalog directory");
        }
    }
    files.sort();

    if files.is_empty() {
        warn!(path = %path.display(), "Catalog directory has no JSON files");
    }

    let mut vehicles = Vec::new();
    for file in files {
        vehicles.extend(load_file(&file).await?);
    }
    Ok(vehicles)
}

async fn load_file(path: &Path) -> CatalogResult<Vec<VehicleEntry>> {
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| CatalogError::io(path, e))?;
    let entries = parse_entries(&text, path)?;
    debug!(file = %path.display(), count = entries.len(), "Catalog file read");
    Ok(entries)
}

/// Parses a catalog document: an array of entries or a single entry.
///
/// Entries are read straight from the text so option categories keep the
/// order the file lists them in.
pub fn parse_entries(text: &str, path: &Path) -> CatalogResult<Vec<VehicleEntry>> {
    if text.trim_start().starts_with('[') {
        serde_json::from_str(text).map_err(|e| CatalogError::parse(path, e))
    } else {
        serde_json::from_str(text)
            .map(|entry| vec![entry])
            .map_err(|e| CatalogError::parse(path, e))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
