//! # Validation Module
//!
//! Catalog entry checks and the stale-selection report.
//!
//! ## Where Validation Happens
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Catalog file ──► serde (shape) ──► validate_vehicle_entry (values)    │
//! │                                          │                              │
//! │                                          ▼                              │
//! │                                   SelectionStore::new                   │
//! │                                                                         │
//! │  After any transition ──► stale_selections (report only, no pruning)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use trimline_core::catalog::VehicleEntry;
//! use trimline_core::validation::validate_vehicle_entry;
//!
//! let entry = VehicleEntry { id: "ev3".to_string(), ..Default::default() };
//! assert!(validate_vehicle_entry(&entry).is_err());
//! ```

use std::collections::HashSet;

use crate::catalog::{CatalogList, PricedItem, VehicleEntry};
use crate::error::ValidationError;
use crate::money::{Money, MAX_PRICE};
use crate::restriction::RestrictionResolver;
use crate::rules::RuleRegistry;
use crate::selection::{Selection, LEGACY_OPTIONS_KEY};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Entry Validators
// =============================================================================

/// Validates a vehicle entry before a selection is built on it.
///
/// ## Rules
/// - `id` and `fullName` must not be blank
/// - `trims`, `exterior` and `interior` must not be empty
/// - Names are unique within each list and within each option category
/// - No negative prices anywhere, and none above [`MAX_PRICE`]
/// - `fullPrice`, when present, must contain digits
pub fn validate_vehicle_entry(entry: &VehicleEntry) -> ValidationResult<()> {
    require_text("id", &entry.id)?;
    require_text("fullName", &entry.full_name)?;

    if let Some(full_price) = &entry.full_price {
        match Money::parse_grouped(full_price) {
            Some(price) => price_in_range("fullPrice", price.won())?,
            None => {
                return Err(ValidationError::InvalidFormat {
                    field: "fullPrice".to_string(),
                    reason: format!("'{full_price}' is not a grouped number"),
                });
            }
        }
    }

    for list in CatalogList::ALL {
        let items = entry.list(list);
        if list != CatalogList::Wheels && items.is_empty() {
            return Err(ValidationError::Required {
                field: list.key().to_string(),
            });
        }
        validate_priced_list(list.key(), items)?;
    }

    for (category, options) in &entry.option_categories {
        let mut seen = HashSet::new();
        for option in options {
            require_text(category, &option.name)?;
            if !seen.insert(option.name.as_str()) {
                return Err(duplicate(category, &option.name));
            }
            price_in_range(category, option.price)?;
            for price in option.trim_prices.iter().flat_map(|p| p.values()) {
                price_in_range(&format!("{category}.trimPrices"), *price)?;
            }
        }
    }

    for (trim, discount) in entry.tax_benefit_discounts.iter().flat_map(|d| d.iter()) {
        price_in_range(&format!("taxBenefitDiscounts.{trim}"), *discount)?;
    }

    Ok(())
}

/// Validates one single-choice list.
pub fn validate_priced_list(field: &str, items: &[PricedItem]) -> ValidationResult<()> {
    let mut seen = HashSet::new();

    for item in items {
        require_text(field, &item.name)?;
        if !seen.insert(item.name.as_str()) {
            return Err(duplicate(field, &item.name));
        }
        price_in_range(field, item.price)?;
    }

    Ok(())
}

fn require_text(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    Ok(())
}

fn price_in_range(field: &str, value: i64) -> ValidationResult<()> {
    if value < 0 {
        return Err(ValidationError::NegativePrice {
            field: field.to_string(),
            value,
        });
    }
    if value > MAX_PRICE {
        return Err(ValidationError::PriceOutOfRange {
            field: field.to_string(),
            value,
        });
    }
    Ok(())
}

fn duplicate(field: &str, value: &str) -> ValidationError {
    ValidationError::Duplicate {
        field: field.to_string(),
        value: value.to_string(),
    }
}

// =============================================================================
// Stale Selections
// =============================================================================

/// Why a selected name no longer fits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StaleReason {
    /// The catalog does not list the name.
    Missing,
    /// The name is disabled under the current trim and selection.
    Disabled,
}

/// A selected name that no longer fits the vehicle or trim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaleSelection {
    /// List key (`"interior"`, `"wheels"`) or option category.
    pub field: String,
    pub name: String,
    pub reason: StaleReason,
}

/// Reports selected names that are unknown or disabled.
///
/// Selections are never pruned here. Changing the exterior can leave a
/// now-disabled option selected, and that is left for the caller to decide.
pub fn stale_selections(
    entry: &VehicleEntry,
    selection: &Selection,
    rules: &RuleRegistry,
) -> Vec<StaleSelection> {
    let resolver = RestrictionResolver::new(entry, selection, rules);
    let trim = selection.trim.as_str();
    let mut stale = Vec::new();

    let mut report = |field: &str, name: &str, reason: StaleReason| {
        stale.push(StaleSelection {
            field: field.to_string(),
            name: name.to_string(),
            reason,
        });
    };

    for (list, name) in [
        (CatalogList::Trims, &selection.trim),
        (CatalogList::Exterior, &selection.exterior),
        (CatalogList::Interior, &selection.interior),
        (CatalogList::Wheels, &selection.wheels),
    ] {
        if !name.is_empty() && entry.find_item(list, name).is_none() {
            report(list.key(), name.as_str(), StaleReason::Missing);
        }
    }

    if !selection.interior.is_empty() && resolver.is_interior_disabled(&selection.interior, trim) {
        report(CatalogList::Interior.key(), selection.interior.as_str(), StaleReason::Disabled);
    }
    if !selection.wheels.is_empty() && resolver.is_wheel_disabled(&selection.wheels, trim) {
        report(CatalogList::Wheels.key(), selection.wheels.as_str(), StaleReason::Disabled);
    }

    let categories = selection
        .categories
        .iter()
        .map(|(category, names)| (category.as_str(), names.as_slice()))
        .chain(std::iter::once((LEGACY_OPTIONS_KEY, selection.options.as_slice())));

    for (category, names) in categories {
        for name in names {
            let known = if category == LEGACY_OPTIONS_KEY {
                entry.find_option(name).is_some()
            } else {
                entry.find_option_in(category, name).is_some()
            };

            if !known {
                report(category, name.as_str(), StaleReason::Missing);
            } else if resolver.is_option_disabled(name, trim) {
                report(category, name.as_str(), StaleReason::Disabled);
            }
        }
    }

    stale
}

// =============================================================================
// Unit Tests
// =============================================================================
