//! # Pricing Calculator
//!
//! Derives itemized prices and the total from a vehicle and a selection.
//!
//! ```text
//! total = base price
//!       + trim + exterior + interior + wheels        ┐
//!       + Σ selected options (trimPrices honoured)   ┘ additional options
//!       − tax benefit discount (only when 적용)
//! ```
//!
//! Nothing is cached: every call recomputes from the catalog, so the totals
//! can never drift from the selection. Totals are never clamped.

use tracing::warn;

use crate::catalog::{CatalogList, CarOption, VehicleEntry};
use crate::money::Money;
use crate::selection::Selection;

/// Itemized prices for one selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PriceBreakdown {
    pub base: Money,
    pub trim: Money,
    pub exterior: Money,
    pub interior: Money,
    pub wheels: Money,
    pub options: Money,
    /// trim + exterior + interior + wheels + options
    pub additional: Money,
    pub tax_benefit_discount: Money,
    pub total: Money,
}

impl PriceBreakdown {
    /// Base price plus everything selected, before the discount.
    pub fn total_before_discount(&self) -> Money {
        self.base + self.additional
    }
}

/// Pure price computations over borrowed catalog and selection.
#[derive(Debug, Clone, Copy)]
pub struct PriceCalculator<'a> {
    entry: &'a VehicleEntry,
    selection: &'a Selection,
}

impl<'a> PriceCalculator<'a> {
    pub fn new(entry: &'a VehicleEntry, selection: &'a Selection) -> Self {
        PriceCalculator { entry, selection }
    }

    /// Price of a named item within one list; zero when absent.
    pub fn price_of(&self, list: CatalogList, name: &str) -> Money {
        if name.is_empty() {
            return Money::zero();
        }
        self.entry
            .find_item(list, name)
            .map(|item| item.price())
            .unwrap_or_default()
    }

    /// Price of the currently selected item of a list.
    pub fn selected_price(&self, list: CatalogList) -> Money {
        let name = match list {
            CatalogList::Trims => &self.selection.trim,
            CatalogList::Exterior => &self.selection.exterior,
            CatalogList::Interior => &self.selection.interior,
            CatalogList::Wheels => &self.selection.wheels,
        };
        self.price_of(list, name)
    }

    /// Resolves a selected option name to its catalog entry.
    ///
    /// A name is looked up in the categories it is selected under first,
    /// then (for the legacy list) in any category.
    fn resolve_option(&self, name: &str) -> Option<&'a CarOption> {
        self.selection
            .categories
            .iter()
            .filter(|(_, names)| names.iter().any(|n| n == name))
            .find_map(|(category, _)| self.entry.find_option_in(category, name))
            .or_else(|| self.entry.find_option(name))
    }

    /// Sum of every selected option, each distinct name counted once.
    pub fn options_price(&self) -> Money {
        let trim = self.selection.trim.as_str();

        self.selection
            .all_option_names()
            .into_iter()
            .map(|name| match self.resolve_option(name) {
                Some(option) => option.price_for_trim(trim),
                None => {
                    warn!(vehicle = %self.entry.id, option = name, "selected option is not in the catalog, priced at 0");
                    Money::zero()
                }
            })
            .sum()
    }

    /// trim + exterior + interior + wheels + options.
    pub fn additional_options_price(&self) -> Money {
        CatalogList::ALL
            .iter()
            .map(|list| self.selected_price(*list))
            .sum::<Money>()
            + self.options_price()
    }

    /// Discount for the active trim when the tax benefit is applied.
    pub fn tax_benefit_discount(&self) -> Money {
        if !self.selection.tax_benefit.is_applied() {
            return Money::zero();
        }
        self.entry
            .tax_benefit_discounts
            .as_ref()
            .and_then(|d| d.get(&self.selection.trim))
            .map(|won| Money::from_won(*won))
            .unwrap_or_default()
    }

    pub fn total_price(&self) -> Money {
        self.entry.base_price() + self.additional_options_price() - self.tax_benefit_discount()
    }

    /// Every line of the price at once.
    pub fn breakdown(&self) -> PriceBreakdown {
        let base = self.entry.base_price();
        let trim = self.selected_price(CatalogList::Trims);
        let exterior = self.selected_price(CatalogList::Exterior);
        let interior = self.selected_price(CatalogList::Interior);
        let wheels = self.selected_price(CatalogList::Wheels);
        let options = self.options_price();
        let additional = trim + exterior + interior + wheels + options;
        let tax_benefit_discount = self.tax_benefit_discount();

        PriceBreakdown {
            base,
            trim,
            exterior,
            interior,
            wheels,
            options,
            additional,
            tax_benefit_discount,
            total: base + additional - tax_benefit_discount,
        }
    }
}

/// Price of an option looked up by name alone, honouring `trimPrices`.
///
/// Searches every category; when a name appears in several, the last one
/// wins. Zero when absent.
pub fn option_price(entry: &VehicleEntry, name: &str, trim: &str) -> Money {
    entry
        .options_named(name)
        .last()
        .map(|o| o.price_for_trim(trim))
        .unwrap_or_default()
}

/// Summary label for a price: `""` or `" (+100,000원)"`.
pub fn price_label(price: Money) -> String {
    price.price_label()
}

// =============================================================================
// Unit Tests
// =============================================================================
