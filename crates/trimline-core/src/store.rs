//! # Selection Store
//!
//! Owns the selection for one vehicle and applies transitions to it.
//!
//! ## Transitions
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Initialize / Reset   flagged-or-first of every list, empty categories │
//! │                                                                         │
//! │  ChangeTrim(T)        FULL RESET under T:                               │
//! │                         exterior  ← flagged / first                     │
//! │                         interior  ← flagged ∧ ¬disabled / first ¬dis.   │
//! │                         wheels    ← defaultWheel / flagged ∧ ¬dis. / …  │
//! │                         options   ← all cleared, taxBenefit ← 미적용     │
//! │                                                                         │
//! │  ChangeExterior(E)    assign; vehicle rules may drop package options    │
//! │  ChangeInterior / ChangeWheel / ChangeTaxBenefit   assign               │
//! │  ToggleOption         add/remove one name in one category               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Atomicity
//! Each transition builds the next selection from the current one and only
//! commits it when every step succeeded. On error the store is unchanged.
//!
//! The store does not re-check disabled or included options on toggle; the
//! caller consults the resolver before offering the toggle.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::catalog::{CatalogList, PricedItem, VehicleEntry};
use crate::error::{CoreError, CoreResult};
use crate::pricing::PriceCalculator;
use crate::quote::{self, QuoteExport};
use crate::restriction::RestrictionResolver;
use crate::rules::RuleRegistry;
use crate::selection::{Selection, TaxBenefit, LEGACY_OPTIONS_KEY};
use crate::validation::{stale_selections, validate_vehicle_entry, StaleSelection};
use crate::PACKAGE_OPTION_CATEGORY;

/// Notice shown after a reset.
pub const RESET_NOTICE: &str = "옵션이 초기 상태로 재설정되었습니다.";
/// Notice shown after a quote document was loaded.
pub const IMPORT_NOTICE: &str = "견적이 성공적으로 불러와졌습니다.";
/// Notice shown after a quote document was written.
pub const EXPORT_NOTICE: &str = "견적서가 성공적으로 저장되었습니다.";

// =============================================================================
// Events
// =============================================================================

/// A user action on the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionEvent {
    ChangeTrim(String),
    ChangeExterior(String),
    ChangeInterior(String),
    ChangeWheel(String),
    ChangeTaxBenefit(TaxBenefit),
    /// `category == "options"` addresses the legacy flat list.
    ToggleOption {
        category: String,
        name: String,
        checked: bool,
    },
    Reset,
}

impl SelectionEvent {
    pub fn toggle(category: impl Into<String>, name: impl Into<String>, checked: bool) -> Self {
        SelectionEvent::ToggleOption {
            category: category.into(),
            name: name.into(),
            checked,
        }
    }
}

// =============================================================================
// Store
// =============================================================================

/// Selection state for one loaded vehicle.
#[derive(Debug, Clone)]
pub struct SelectionStore {
    entry: Arc<VehicleEntry>,
    rules: Arc<RuleRegistry>,
    selection: Selection,
}

impl SelectionStore {
    /// Validates the entry and initializes the selection, using the
    /// built-in vehicle rules.
    pub fn new(entry: Arc<VehicleEntry>) -> CoreResult<Self> {
        Self::with_rules(entry, Arc::new(RuleRegistry::builtin()))
    }

    pub fn with_rules(entry: Arc<VehicleEntry>, rules: Arc<RuleRegistry>) -> CoreResult<Self> {
        validate_vehicle_entry(&entry)?;
        let selection = initial_selection(&entry);
        debug!(vehicle = %entry.id, trim = %selection.trim, "selection initialized");

        Ok(SelectionStore {
            entry,
            rules,
            selection,
        })
    }

    pub fn entry(&self) -> &VehicleEntry {
        &self.entry
    }

    /// Shared handle to the catalog entry.
    pub fn entry_arc(&self) -> Arc<VehicleEntry> {
        Arc::clone(&self.entry)
    }

    pub fn rules(&self) -> &RuleRegistry {
        &self.rules
    }

    /// Read-only snapshot of the current selection.
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn resolver(&self) -> RestrictionResolver<'_> {
        RestrictionResolver::new(&self.entry, &self.selection, &self.rules)
    }

    pub fn pricing(&self) -> PriceCalculator<'_> {
        PriceCalculator::new(&self.entry, &self.selection)
    }

    /// Selected names that are missing or disabled under the current trim.
    pub fn stale_selections(&self) -> Vec<StaleSelection> {
        stale_selections(&self.entry, &self.selection, &self.rules)
    }

    // ===== Transitions =====

    /// Applies one event. On error the selection is left untouched.
    pub fn dispatch(&mut self, event: SelectionEvent) -> CoreResult<()> {
        let next = self.transition(&event)?;
        debug!(vehicle = %self.entry.id, ?event, "transition applied");
        self.selection = next;
        Ok(())
    }

    /// Re-initializes and returns the notice to show.
    pub fn reset(&mut self) -> &'static str {
        self.selection = initial_selection(&self.entry);
        debug!(vehicle = %self.entry.id, "selection reset");
        RESET_NOTICE
    }

    fn transition(&self, event: &SelectionEvent) -> CoreResult<Selection> {
        match event {
            SelectionEvent::Reset => Ok(initial_selection(&self.entry)),
            SelectionEvent::ChangeTrim(trim) => self.change_trim(trim),
            SelectionEvent::ChangeExterior(name) => self.change_exterior(name),
            SelectionEvent::ChangeInterior(name) => {
                self.require(CatalogList::Interior, name)?;
                Ok(Selection {
                    interior: name.clone(),
                    ..self.selection.clone()
                })
            }
            SelectionEvent::ChangeWheel(name) => {
                self.require(CatalogList::Wheels, name)?;
                Ok(Selection {
                    wheels: name.clone(),
                    ..self.selection.clone()
                })
            }
            SelectionEvent::ChangeTaxBenefit(value) => {
                if value.is_applied() && !self.entry.offers_tax_benefit() {
                    return Err(CoreError::TaxBenefitUnavailable(self.entry.id.clone()));
                }
                Ok(Selection {
                    tax_benefit: *value,
                    ..self.selection.clone()
                })
            }
            SelectionEvent::ToggleOption {
                category,
                name,
                checked,
            } => self.toggle_option(category, name, *checked),
        }
    }

    fn require(&self, list: CatalogList, name: &str) -> CoreResult<()> {
        match self.entry.find_item(list, name) {
            Some(_) => Ok(()),
            None => Err(CoreError::unknown_choice(list.noun(), name)),
        }
    }

    fn change_trim(&self, trim: &str) -> CoreResult<Selection> {
        self.require(CatalogList::Trims, trim)?;

        let mut next = empty_selection(&self.entry);
        next.trim = trim.to_string();
        next.exterior = default_name(&self.entry, CatalogList::Exterior);

        let resolver = RestrictionResolver::new(&self.entry, &next, &self.rules);

        let interior = pick_enabled(&self.entry.interior, |name| {
            resolver.is_interior_disabled(name, trim)
        });

        let wheels = match self
            .entry
            .legacy_restrictions(trim)
            .and_then(|r| r.default_wheel.as_deref())
            .filter(|w| !w.is_empty())
        {
            Some(wheel) => wheel.to_string(),
            None => pick_enabled(&self.entry.wheels, |name| resolver.is_wheel_disabled(name, trim)),
        };

        next.interior = interior;
        next.wheels = wheels;
        Ok(next)
    }

    fn change_exterior(&self, exterior: &str) -> CoreResult<Selection> {
        self.require(CatalogList::Exterior, exterior)?;

        let mut next = Selection {
            exterior: exterior.to_string(),
            ..self.selection.clone()
        };

        let excluded: Vec<&str> = self
            .rules
            .packages_excluded_by_exterior(&self.entry, exterior)
            .collect();
        if !excluded.is_empty() {
            let packages = next.category_mut(PACKAGE_OPTION_CATEGORY);
            packages.retain(|p| !excluded.contains(&p.as_str()));
            debug!(exterior, ?excluded, "package options dropped by exterior");
        }

        Ok(next)
    }

    fn toggle_option(&self, category: &str, name: &str, checked: bool) -> CoreResult<Selection> {
        if category != LEGACY_OPTIONS_KEY && !self.entry.option_categories.contains_key(category) {
            return Err(CoreError::UnknownCategory(category.to_string()));
        }

        let mut next = self.selection.clone();
        let list = next.category_mut(category);
        if checked {
            if !list.iter().any(|n| n == name) {
                list.push(name.to_string());
            }
        } else {
            list.retain(|n| n != name);
        }
        Ok(next)
    }

    // ===== Quote documents =====

    /// Replaces the selection with one parsed from a quote document.
    ///
    /// Non-empty trim, colour and wheel names must exist in the catalog.
    /// On any error the selection is left untouched.
    pub fn import_quote(&mut self, text: &str) -> CoreResult<&'static str> {
        let imported = quote::import(text, Some(&self.entry))?;

        for (list, name) in [
            (CatalogList::Trims, &imported.trim),
            (CatalogList::Exterior, &imported.exterior),
            (CatalogList::Interior, &imported.interior),
            (CatalogList::Wheels, &imported.wheels),
        ] {
            if !name.is_empty() {
                self.require(list, name)?;
            }
        }

        debug!(vehicle = %self.entry.id, trim = %imported.trim, "quote loaded into store");
        self.selection = imported;
        Ok(IMPORT_NOTICE)
    }

    /// Quote document for the current selection.
    pub fn export_quote(&self) -> QuoteExport {
        self.export_quote_at(Utc::now())
    }

    pub fn export_quote_at(&self, now: DateTime<Utc>) -> QuoteExport {
        let discount = self.pricing().tax_benefit_discount();
        quote::export_at(Some(&self.entry), &self.selection, discount, now)
    }
}

// =============================================================================
// Initial Selection
// =============================================================================

/// Selection right after a vehicle is loaded.
pub fn initial_selection(entry: &VehicleEntry) -> Selection {
    let mut selection = empty_selection(entry);
    selection.trim = default_name(entry, CatalogList::Trims);
    selection.exterior = default_name(entry, CatalogList::Exterior);
    selection.interior = default_name(entry, CatalogList::Interior);
    selection.wheels = default_name(entry, CatalogList::Wheels);
    selection
}

/// No choices, every category present and empty, tax benefit off.
fn empty_selection(entry: &VehicleEntry) -> Selection {
    let mut selection = Selection::default();
    for category in entry.category_names() {
        selection.categories.insert(category.to_string(), Vec::new());
    }
    selection
}

fn default_name(entry: &VehicleEntry, list: CatalogList) -> String {
    entry
        .default_item(list)
        .map(|item| item.name.clone())
        .unwrap_or_default()
}

/// Flagged and enabled, else the first enabled, else empty.
fn pick_enabled(items: &[PricedItem], is_disabled: impl Fn(&str) -> bool) -> String {
    items
        .iter()
        .find(|item| item.selected && !is_disabled(&item.name))
        .or_else(|| items.iter().find(|item| !is_disabled(&item.name)))
        .map(|item| item.name.clone())
        .unwrap_or_default()
}

// =============================================================================
// Unit Tests
// =============================================================================
