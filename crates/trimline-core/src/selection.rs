//! # Selection
//!
//! The user's current configuration of one vehicle.
//!
//! ```text
//! {
//!   "trim": "Air", "exterior": "스노우 화이트 펄", "interior": "블랙",
//!   "wheels": "17인치 휠", "taxBenefit": "미적용",
//!   "options": [],                      ← legacy flat list
//!   "패키지옵션": ["스타일"],             ← one list per option category
//!   "선택옵션": []
//! }
//! ```
//!
//! A `Selection` is only mutated through [`crate::store::SelectionStore`];
//! pricing and the quote codec read it by reference.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::PACKAGE_OPTION_CATEGORY;

/// Category key addressing the legacy flat `options` list.
pub const LEGACY_OPTIONS_KEY: &str = "options";

// =============================================================================
// Tax Benefit
// =============================================================================

/// Whether the trim-indexed tax benefit discount is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum TaxBenefit {
    #[serde(rename = "적용")]
    Applied,
    #[default]
    #[serde(rename = "미적용")]
    NotApplied,
}

impl TaxBenefit {
    pub const APPLIED_LABEL: &'static str = "적용";
    pub const NOT_APPLIED_LABEL: &'static str = "미적용";

    #[inline]
    pub fn is_applied(&self) -> bool {
        matches!(self, TaxBenefit::Applied)
    }

    /// Parses the catalog label. Accepts `"적용"`, `"미적용"` and the
    /// English aliases used on the command line.
    pub fn parse(label: &str) -> Option<TaxBenefit> {
        match label.trim() {
            Self::APPLIED_LABEL | "applied" | "on" | "yes" => Some(TaxBenefit::Applied),
            Self::NOT_APPLIED_LABEL | "not-applied" | "off" | "no" => Some(TaxBenefit::NotApplied),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TaxBenefit::Applied => Self::APPLIED_LABEL,
            TaxBenefit::NotApplied => Self::NOT_APPLIED_LABEL,
        }
    }
}

impl From<bool> for TaxBenefit {
    fn from(applied: bool) -> Self {
        if applied {
            TaxBenefit::Applied
        } else {
            TaxBenefit::NotApplied
        }
    }
}

impl fmt::Display for TaxBenefit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Selection
// =============================================================================

/// Current choices for one vehicle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Selection {
    #[serde(default)]
    pub trim: String,
    #[serde(default)]
    pub exterior: String,
    #[serde(default)]
    pub interior: String,
    #[serde(default)]
    pub wheels: String,
    #[serde(default)]
    pub tax_benefit: TaxBenefit,

    /// Legacy flat option list.
    #[serde(default)]
    pub options: Vec<String>,

    /// Selected names per option category, in catalog order.
    #[serde(flatten)]
    pub categories: IndexMap<String, Vec<String>>,
}

impl Selection {
    /// Selected names in one category (empty when the category is absent).
    pub fn category(&self, name: &str) -> &[String] {
        if name == LEGACY_OPTIONS_KEY {
            return &self.options;
        }
        self.categories.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The active package-option selection.
    pub fn package_options(&self) -> &[String] {
        self.category(PACKAGE_OPTION_CATEGORY)
    }

    pub fn has_package_option(&self, name: &str) -> bool {
        self.package_options().iter().any(|n| n == name)
    }

    /// Whether `name` is selected in `category`.
    pub fn is_selected(&self, category: &str, name: &str) -> bool {
        self.category(category).iter().any(|n| n == name)
    }

    /// Every selected option name, category lists first, then the legacy
    /// list, each name once.
    pub fn all_option_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for name in self
            .categories
            .values()
            .flat_map(|list| list.iter())
            .chain(self.options.iter())
        {
            if !names.contains(&name.as_str()) {
                names.push(name);
            }
        }
        names
    }

    /// Whether every option list is empty.
    pub fn has_no_options(&self) -> bool {
        self.options.is_empty() && self.categories.values().all(Vec::is_empty)
    }

    pub(crate) fn category_mut(&mut self, name: &str) -> &mut Vec<String> {
        if name == LEGACY_OPTIONS_KEY {
            return &mut self.options;
        }
        self.categories.entry(name.to_string()).or_default()
    }
}
