//! Bundled seed catalog.
//!
//! Three vehicles that between them use every part of the catalog schema:
//! `ev3` (legacy `trimOptionRestrictions`, trim-priced packages),
//! `ev9-gt` (matte exteriors, GT-only wheel, no tax benefit) and
//! `ray-ev` (per-option `trimRestrictions`).

use std::path::Path;

use trimline_core::VehicleEntry;

use crate::error::CatalogResult;
use crate::source::parse_entries;

/// The seed catalog JSON.
pub const SEED_CATALOG: &str = include_str!("../data/seed_catalog.json");

/// Origin label reported for the bundled catalog.
pub const SEED_ORIGIN: &str = "<bundled seed catalog>";

/// Parses the bundled entries.
pub fn seed_entries() -> CatalogResult<Vec<VehicleEntry>> {
    parse_entries(SEED_CATALOG, Path::new(SEED_ORIGIN))
}
