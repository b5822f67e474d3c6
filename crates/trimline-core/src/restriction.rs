//! # Restriction Resolver
//!
//! Answers, for one selection, whether a choice is disabled, auto-included
//! or hidden.
//!
//! ## Precedence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  isOptionDisabled(name, trim)                                           │
//! │                                                                         │
//! │  1. Vehicle rules (RuleRegistry)            ── ev3 sunroof, ev9 matte   │
//! │  2. requiredPackageOptions                  ── none selected → disabled │
//! │  3. RestrictionSource, resolved once:                                   │
//! │       Modern(trimRestrictions)  → trimRestrictions[trim] == 선택불가     │
//! │       Legacy(vehicle entry)     → disabledOptions ∪ disabledPackage…    │
//! │                                                                         │
//! │  First `true` wins. Missing data → `false` (`true` for shouldShow).     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every function is total. Catalog data has an untrusted shape, so a missing
//! trim, option or restriction block takes the permissive branch and is
//! logged instead of failing.

use std::collections::BTreeMap;
use tracing::warn;

use crate::catalog::{CatalogList, TrimRestriction, VehicleEntry};
use crate::rules::RuleRegistry;
use crate::selection::Selection;

/// Interior names containing this marker are reserved for matching trims.
pub const GT_LINE_MARKER: &str = "GT-Line";

// =============================================================================
// Restriction Source
// =============================================================================

/// Where the restrictions of one catalog entity come from.
#[derive(Debug, Clone, Copy)]
pub enum RestrictionSource<'a> {
    /// The entity carries its own `trimRestrictions` map.
    Modern(&'a BTreeMap<String, TrimRestriction>),
    /// The entity has none; consult the vehicle's `trimOptionRestrictions`.
    Legacy(&'a VehicleEntry),
}

impl<'a> RestrictionSource<'a> {
    /// Picks the source for an entity.
    pub fn resolve(
        modern: Option<&'a BTreeMap<String, TrimRestriction>>,
        entry: &'a VehicleEntry,
    ) -> Self {
        match modern {
            Some(map) => RestrictionSource::Modern(map),
            None => RestrictionSource::Legacy(entry),
        }
    }
}

// =============================================================================
// Option Availability
// =============================================================================

/// How an option is presented for the active trim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OptionAvailability {
    /// Not shown at all.
    Hidden,
    /// Shown, checked and locked.
    Included,
    /// Shown, locked.
    Disabled,
    /// Shown and togglable.
    Selectable,
}

impl OptionAvailability {
    /// Whether the user may toggle it.
    pub fn is_selectable(&self) -> bool {
        matches!(self, OptionAvailability::Selectable)
    }

    /// Lower-case name used in reports and error messages.
    pub fn label(&self) -> &'static str {
        match self {
            OptionAvailability::Hidden => "hidden",
            OptionAvailability::Included => "included",
            OptionAvailability::Disabled => "disabled",
            OptionAvailability::Selectable => "selectable",
        }
    }
}

// =============================================================================
// Resolver
// =============================================================================

/// Read-only view over a vehicle, a selection and the vehicle rules.
#[derive(Debug, Clone, Copy)]
pub struct RestrictionResolver<'a> {
    entry: &'a VehicleEntry,
    selection: &'a Selection,
    rules: &'a RuleRegistry,
}

impl<'a> RestrictionResolver<'a> {
    pub fn new(entry: &'a VehicleEntry, selection: &'a Selection, rules: &'a RuleRegistry) -> Self {
        RestrictionResolver {
            entry,
            selection,
            rules,
        }
    }

    /// Logs and reports whether `trim` can be used for a lookup.
    fn usable_trim(&self, trim: &str) -> bool {
        if trim.is_empty() {
            return false;
        }
        if !self.entry.trims.is_empty() && self.entry.find_item(CatalogList::Trims, trim).is_none() {
            warn!(vehicle = %self.entry.id, trim, "restriction lookup for a trim the catalog does not list");
        }
        true
    }

    fn option_source(&self, name: &str) -> RestrictionSource<'a> {
        let modern = self
            .entry
            .find_option(name)
            .and_then(|o| o.trim_restrictions.as_ref());
        RestrictionSource::resolve(modern, self.entry)
    }

    fn wheel_source(&self, name: &str) -> RestrictionSource<'a> {
        let modern = self
            .entry
            .find_item(CatalogList::Wheels, name)
            .and_then(|w| w.trim_restrictions.as_ref());
        RestrictionSource::resolve(modern, self.entry)
    }

    // ===== Options =====

    /// Whether the option cannot be toggled under `trim`.
    pub fn is_option_disabled(&self, name: &str, trim: &str) -> bool {
        if !self.usable_trim(trim) {
            return false;
        }

        if self.rules.disables_option(self.entry, self.selection, name, trim) {
            return true;
        }

        if let Some(required) = self
            .entry
            .find_option(name)
            .and_then(|o| o.required_package_options.as_ref())
        {
            if !required.is_empty() && !required.iter().any(|p| self.selection.has_package_option(p)) {
                return true;
            }
        }

        match self.option_source(name) {
            RestrictionSource::Modern(map) => map.get(trim).is_some_and(TrimRestriction::is_disallowed),
            RestrictionSource::Legacy(entry) => entry.legacy_restrictions(trim)
                .is_some_and(|r| r.disables_option(name)),
        }
    }

    /// Whether the option is part of `trim` as standard equipment.
    pub fn is_option_included(&self, name: &str, trim: &str) -> bool {
        if !self.usable_trim(trim) {
            return false;
        }

        match self.option_source(name) {
            RestrictionSource::Modern(map) => map.get(trim).is_some_and(TrimRestriction::is_included),
            RestrictionSource::Legacy(entry) => entry.legacy_restrictions(trim)
                .is_some_and(|r| r.includes_option(name)),
        }
    }

    /// False only when the option lists per-trim restrictions and `trim` is
    /// not one of them.
    pub fn should_show_option(&self, name: &str, trim: &str) -> bool {
        if trim.is_empty() {
            return true;
        }

        match self.option_source(name) {
            RestrictionSource::Modern(map) => map.contains_key(trim),
            RestrictionSource::Legacy(_) => true,
        }
    }

    /// Combined availability, in the order the options panel applies it.
    pub fn option_availability(&self, name: &str, trim: &str) -> OptionAvailability {
        if !self.should_show_option(name, trim) {
            OptionAvailability::Hidden
        } else if self.is_option_included(name, trim) {
            OptionAvailability::Included
        } else if self.is_option_disabled(name, trim) {
            OptionAvailability::Disabled
        } else {
            OptionAvailability::Selectable
        }
    }

    // ===== Wheels =====

    /// Whether a wheel is locked out for the trim.
    pub fn is_wheel_disabled(&self, name: &str, trim: &str) -> bool {
        if !self.usable_trim(trim) || self.rules.includes_wheel(self.entry, name) {
            return false;
        }

        match self.wheel_source(name) {
            RestrictionSource::Modern(map) => map.get(trim).is_some_and(TrimRestriction::is_disallowed),
            RestrictionSource::Legacy(entry) => entry.legacy_restrictions(trim)
                .is_some_and(|r| r.disables_wheel(name)),
        }
    }

    /// Whether a wheel comes standard with the trim.
    pub fn is_wheel_included(&self, name: &str, trim: &str) -> bool {
        if self.rules.includes_wheel(self.entry, name) {
            return true;
        }
        if !self.usable_trim(trim) {
            return false;
        }

        match self.wheel_source(name) {
            RestrictionSource::Modern(map) => map.get(trim).is_some_and(TrimRestriction::is_included),
            RestrictionSource::Legacy(entry) => entry.legacy_restrictions(trim)
                .is_some_and(|r| r.includes_wheel(name)),
        }
    }

    // ===== Interior =====

    /// GT-Line interiors need a GT-Line trim; otherwise the legacy
    /// `disabledInterior` list applies. There is no modern path.
    pub fn is_interior_disabled(&self, name: &str, trim: &str) -> bool {
        if !self.usable_trim(trim) {
            return false;
        }

        if name.contains(GT_LINE_MARKER) && !trim.contains(GT_LINE_MARKER) {
            return true;
        }

        self.entry
            .legacy_restrictions(trim)
            .is_some_and(|r| r.disables_interior(name))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
