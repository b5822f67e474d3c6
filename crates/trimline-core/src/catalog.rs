//! # Catalog Types
//!
//! The immutable vehicle catalog the rules engine works against.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         VehicleEntry                                    │
//! │                                                                         │
//! │  id, fullName, fullPrice ("50,000,000")                                │
//! │                                                                         │
//! │  trims ─────┐                                                           │
//! │  exterior ──┼── Vec<PricedItem>   { name, price, selected, ... }       │
//! │  interior ──┤                                                           │
//! │  wheels ────┘   (wheels may carry trimRestrictions)                    │
//! │                                                                         │
//! │  options ────── IndexMap<category, Vec<CarOption>>                     │
//! │                   trimPrices / trimDescriptions / trimRestrictions     │
//! │                   requiredPackageOptions                               │
//! │                                                                         │
//! │  taxBenefitDiscounts ───── Option<map trim → won>                      │
//! │  trimOptionRestrictions ── Option<map trim → LegacyRestrictions>       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every field the original catalog may omit is modelled as `Option` or a
//! defaulted collection, so lookups are total: an absent field simply takes
//! the non-restrictive branch.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::money::Money;

/// Description shown when an option has none of its own.
pub const DEFAULT_OPTION_DESCRIPTION: &str = "해당 옵션에 대한 상세 정보입니다.";

// =============================================================================
// Catalog Lists
// =============================================================================

/// The single-choice lists of a vehicle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CatalogList {
    Trims,
    Exterior,
    Interior,
    Wheels,
}

impl CatalogList {
    /// Every list, in display order.
    pub const ALL: [CatalogList; 4] = [
        CatalogList::Trims,
        CatalogList::Exterior,
        CatalogList::Interior,
        CatalogList::Wheels,
    ];

    /// Catalog JSON key of this list.
    pub const fn key(&self) -> &'static str {
        match self {
            CatalogList::Trims => "trims",
            CatalogList::Exterior => "exterior",
            CatalogList::Interior => "interior",
            CatalogList::Wheels => "wheels",
        }
    }

    /// Singular noun used in messages ("trim 'X' is not offered").
    pub const fn noun(&self) -> &'static str {
        match self {
            CatalogList::Trims => "trim",
            CatalogList::Exterior => "exterior",
            CatalogList::Interior => "interior",
            CatalogList::Wheels => "wheel",
        }
    }
}

// =============================================================================
// Trim Restriction (modern schema)
// =============================================================================

/// Per-trim restriction value of the modern `trimRestrictions` schema.
///
/// ## Catalog Values
/// - `"선택불가"` → `Disallowed`
/// - `"기본포함"` / `"기본옵션"` → `Included`
/// - anything else → `Selectable`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TrimRestriction {
    Disallowed,
    Included,
    Selectable(String),
}

impl TrimRestriction {
    pub const DISALLOWED: &'static str = "선택불가";
    pub const INCLUDED: &'static str = "기본포함";
    pub const INCLUDED_ALT: &'static str = "기본옵션";

    #[inline]
    pub fn is_disallowed(&self) -> bool {
        matches!(self, TrimRestriction::Disallowed)
    }

    #[inline]
    pub fn is_included(&self) -> bool {
        matches!(self, TrimRestriction::Included)
    }
}

impl From<String> for TrimRestriction {
    fn from(value: String) -> Self {
        match value.trim() {
            Self::DISALLOWED => TrimRestriction::Disallowed,
            Self::INCLUDED | Self::INCLUDED_ALT => TrimRestriction::Included,
            _ => TrimRestriction::Selectable(value),
        }
    }
}

impl From<TrimRestriction> for String {
    fn from(value: TrimRestriction) -> Self {
        match value {
            TrimRestriction::Disallowed => TrimRestriction::DISALLOWED.to_string(),
            TrimRestriction::Included => TrimRestriction::INCLUDED.to_string(),
            TrimRestriction::Selectable(raw) => raw,
        }
    }
}

// =============================================================================
// Priced Item
// =============================================================================

/// A trim, colour or wheel choice.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricedItem {
    /// Display name, unique within its list.
    pub name: String,

    /// Surcharge in won (0 for standard choices).
    #[serde(default)]
    pub price: i64,

    /// Catalog default flag.
    #[serde(default)]
    pub selected: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Modern per-trim restrictions (only wheels use these in practice).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trim_restrictions: Option<BTreeMap<String, TrimRestriction>>,
}

impl PricedItem {
    /// Returns the surcharge as Money.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_won(self.price)
    }
}

// =============================================================================
// Car Option
// =============================================================================

/// An add-on option inside an option category.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarOption {
    pub name: String,

    #[serde(default)]
    pub price: i64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Longer help text; preferred over `description` when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tooltip: Option<String>,

    /// Overrides `price` when the active trim is a key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trim_prices: Option<BTreeMap<String, i64>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trim_descriptions: Option<BTreeMap<String, String>>,

    /// When present, trims that are not keys hide the option entirely.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trim_restrictions: Option<BTreeMap<String, TrimRestriction>>,

    /// At least one of these must be selected as a package option.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_package_options: Option<Vec<String>>,
}

impl CarOption {
    /// Price for the given trim: `trimPrices[trim]` if defined, else `price`.
    pub fn price_for_trim(&self, trim: &str) -> Money {
        let won = self
            .trim_prices
            .as_ref()
            .and_then(|prices| prices.get(trim))
            .copied()
            .unwrap_or(self.price);
        Money::from_won(won)
    }

    /// Description for the given trim.
    ///
    /// ## Precedence
    /// `trimDescriptions[trim]` → `tooltip` → `description` → `None`
    pub fn description_for_trim(&self, trim: &str) -> Option<&str> {
        self.trim_descriptions
            .as_ref()
            .and_then(|d| d.get(trim))
            .filter(|d| !d.is_empty())
            .or(self.tooltip.as_ref().filter(|t| !t.is_empty()))
            .or(self.description.as_ref().filter(|d| !d.is_empty()))
            .map(String::as_str)
    }
}

// =============================================================================
// Legacy Restrictions
// =============================================================================

/// Per-trim restriction block of the legacy `trimOptionRestrictions` schema.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyRestrictions {
    #[serde(default)]
    pub disabled_options: Vec<String>,
    #[serde(default)]
    pub included_options: Vec<String>,
    #[serde(default)]
    pub disabled_package_options: Vec<String>,
    #[serde(default)]
    pub included_package_options: Vec<String>,
    #[serde(default)]
    pub disabled_wheels: Vec<String>,
    #[serde(default)]
    pub included_wheels: Vec<String>,
    #[serde(default)]
    pub disabled_interior: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_wheel: Option<String>,
}

impl LegacyRestrictions {
    pub fn disables_option(&self, name: &str) -> bool {
        contains(&self.disabled_options, name) || contains(&self.disabled_package_options, name)
    }

    pub fn includes_option(&self, name: &str) -> bool {
        contains(&self.included_options, name) || contains(&self.included_package_options, name)
    }

    pub fn disables_wheel(&self, name: &str) -> bool {
        contains(&self.disabled_wheels, name)
    }

    pub fn includes_wheel(&self, name: &str) -> bool {
        contains(&self.included_wheels, name)
    }

    pub fn disables_interior(&self, name: &str) -> bool {
        contains(&self.disabled_interior, name)
    }
}

fn contains(list: &[String], name: &str) -> bool {
    list.iter().any(|n| n == name)
}

// =============================================================================
// Vehicle Entry
// =============================================================================

/// One vehicle of the catalog. Read-only once loaded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleEntry {
    /// Vehicle tag, e.g. `"ev3"`, `"ev9-gt"`.
    pub id: String,

    /// Display name, e.g. `"The Kia EV3"`.
    #[serde(default)]
    pub full_name: String,

    /// Base price as a comma-grouped string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_price: Option<String>,

    #[serde(default)]
    pub trims: Vec<PricedItem>,
    #[serde(default)]
    pub exterior: Vec<PricedItem>,
    #[serde(default)]
    pub interior: Vec<PricedItem>,
    #[serde(default)]
    pub wheels: Vec<PricedItem>,

    /// Option categories, in catalog order.
    #[serde(default, rename = "options")]
    pub option_categories: IndexMap<String, Vec<CarOption>>,

    /// Absent ⇒ the tax benefit is not offered for this vehicle.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_benefit_discounts: Option<BTreeMap<String, i64>>,

    /// Legacy restriction schema, keyed by trim.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trim_option_restrictions: Option<BTreeMap<String, LegacyRestrictions>>,
}

impl VehicleEntry {
    /// Returns the list for a single-choice field.
    pub fn list(&self, list: CatalogList) -> &[PricedItem] {
        match list {
            CatalogList::Trims => &self.trims,
            CatalogList::Exterior => &self.exterior,
            CatalogList::Interior => &self.interior,
            CatalogList::Wheels => &self.wheels,
        }
    }

    /// Finds an item by name within one list.
    pub fn find_item(&self, list: CatalogList, name: &str) -> Option<&PricedItem> {
        self.list(list).iter().find(|item| item.name == name)
    }

    /// The catalog default: the item flagged `selected`, else the first.
    pub fn default_item(&self, list: CatalogList) -> Option<&PricedItem> {
        let items = self.list(list);
        items.iter().find(|item| item.selected).or_else(|| items.first())
    }

    /// Parsed base price. Absent or unparsable → zero.
    pub fn base_price(&self) -> Money {
        self.full_price
            .as_deref()
            .and_then(Money::parse_grouped)
            .unwrap_or_default()
    }

    /// Iterates category names in catalog order.
    pub fn category_names(&self) -> impl Iterator<Item = &str> {
        self.option_categories.keys().map(String::as_str)
    }

    /// Finds an option within one category.
    pub fn find_option_in(&self, category: &str, name: &str) -> Option<&CarOption> {
        self.option_categories
            .get(category)
            .and_then(|options| options.iter().find(|o| o.name == name))
    }

    /// Every option with the given name, across all categories.
    pub fn options_named<'a, 'n>(&'a self, name: &'n str) -> impl Iterator<Item = &'a CarOption> + 'n
    where
        'a: 'n,
    {
        self.option_categories
            .values()
            .flat_map(|options| options.iter())
            .filter(move |o| o.name == name)
    }

    /// First option with the given name in any category.
    pub fn find_option(&self, name: &str) -> Option<&CarOption> {
        self.options_named(name).next()
    }

    /// Legacy restriction block for a trim, if the vehicle has one.
    pub fn legacy_restrictions(&self, trim: &str) -> Option<&LegacyRestrictions> {
        self.trim_option_restrictions
            .as_ref()
            .and_then(|map| map.get(trim))
    }

    /// Whether the vehicle offers the tax benefit at all.
    pub fn offers_tax_benefit(&self) -> bool {
        self.tax_benefit_discounts.is_some()
    }

    /// Description of an option for the given trim, or the default text.
    pub fn option_description(&self, name: &str, trim: &str) -> &str {
        self.options_named(name)
            .find_map(|o| o.description_for_trim(trim))
            .unwrap_or(DEFAULT_OPTION_DESCRIPTION)
    }
}

// =============================================================================
// Catalog Provider
// =============================================================================

/// Source of catalog entries.
///
/// Implemented by `trimline-catalog` (JSON files, bundled seed data) and by
/// [`InMemoryCatalog`] for tests.
pub trait CatalogProvider {
    /// Looks up one vehicle by id.
    fn get_by_id(&self, id: &str) -> Option<&VehicleEntry>;

    /// All vehicles, in catalog order.
    fn get_all(&self) -> &[VehicleEntry];

    /// Case-insensitive substring match on display name or id.
    fn find_by_name(&self, query: &str) -> Vec<&VehicleEntry> {
        let query = query.trim().to_lowercase();
        self.get_all()
            .iter()
            .filter(|v| {
                query.is_empty()
                    || v.full_name.to_lowercase().contains(&query)
                    || v.id.to_lowercase().contains(&query)
            })
            .collect()
    }
}

/// A catalog held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    vehicles: Vec<VehicleEntry>,
}

impl InMemoryCatalog {
    pub fn new(vehicles: Vec<VehicleEntry>) -> Self {
        InMemoryCatalog { vehicles }
    }
}

impl CatalogProvider for InMemoryCatalog {
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
