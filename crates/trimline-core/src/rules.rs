//! # Vehicle Rules
//!
//! Hard rules that belong to one vehicle rather than to the catalog schema.
//!
//! ```text
//! ┌──────────┬──────────────────────────────────────────────────────────────┐
//! │ ev3      │ "와이드 선루프" needs package "스타일" on Air / Air_롱레인지   │
//! │ ev9-gt   │ matte ("무광") exterior excludes package "스타일"             │
//! │ ev9-gt   │ "21인치 GT전용 전면가공 휠" is always included                │
//! └──────────┴──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Rules are data. Adding a vehicle-specific rule means adding an entry to
//! [`RuleRegistry::builtin`], never a new branch in the resolver.

use crate::catalog::VehicleEntry;
use crate::selection::Selection;

/// One vehicle-specific rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VehicleRule {
    /// `option` is disabled on `trims` unless `package` is a selected
    /// package option.
    OptionRequiresPackage {
        vehicle_id: String,
        option: String,
        trims: Vec<String>,
        package: String,
    },

    /// While the exterior name contains `marker`, `package` is disabled and
    /// choosing such an exterior removes it from the package selection.
    ExteriorExcludesPackage {
        vehicle_id: String,
        marker: String,
        package: String,
    },

    /// `wheel` is always auto-included, whatever the trim.
    WheelAlwaysIncluded { vehicle_id: String, wheel: String },
}

impl VehicleRule {
    pub fn vehicle_id(&self) -> &str {
        match self {
            VehicleRule::OptionRequiresPackage { vehicle_id, .. }
            | VehicleRule::ExteriorExcludesPackage { vehicle_id, .. }
            | VehicleRule::WheelAlwaysIncluded { vehicle_id, .. } => vehicle_id,
        }
    }

    fn applies_to(&self, entry: &VehicleEntry) -> bool {
        self.vehicle_id() == entry.id
    }
}

/// The set of vehicle rules consulted by the resolver and the store.
#[derive(Debug, Clone, Default)]
pub struct RuleRegistry {
    rules: Vec<VehicleRule>,
}

impl RuleRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The rules shipped with the product catalog.
    pub fn builtin() -> Self {
        RuleRegistry::new()
            .with(VehicleRule::OptionRequiresPackage {
                vehicle_id: "ev3".to_string(),
                option: "와이드 선루프".to_string(),
                trims: vec!["Air".to_string(), "Air_롱레인지".to_string()],
                package: "스타일".to_string(),
            })
            .with(VehicleRule::ExteriorExcludesPackage {
                vehicle_id: "ev9-gt".to_string(),
                marker: "무광".to_string(),
                package: "스타일".to_string(),
            })
            .with(VehicleRule::WheelAlwaysIncluded {
                vehicle_id: "ev9-gt".to_string(),
                wheel: "21인치 GT전용 전면가공 휠".to_string(),
            })
    }

    /// Adds a rule (builder style).
    pub fn with(mut self, rule: VehicleRule) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn rules(&self) -> &[VehicleRule] {
        &self.rules
    }

    fn for_vehicle<'a>(&'a self, entry: &'a VehicleEntry) -> impl Iterator<Item = &'a VehicleRule> + 'a {
        self.rules.iter().filter(move |r| r.applies_to(entry))
    }

    /// Whether a vehicle rule disables `option` under the given selection.
    pub fn disables_option(
        &self,
        entry: &VehicleEntry,
        selection: &Selection,
        option: &str,
        trim: &str,
    ) -> bool {
        self.for_vehicle(entry).any(|rule| match rule {
            VehicleRule::OptionRequiresPackage {
                option: target,
                trims,
                package,
                ..
            } => {
                target == option
                    && trims.iter().any(|t| t == trim)
                    && !selection.has_package_option(package)
            }
            VehicleRule::ExteriorExcludesPackage {
                marker, package, ..
            } => package == option && selection.exterior.contains(marker.as_str()),
            VehicleRule::WheelAlwaysIncluded { .. } => false,
        })
    }

    /// Whether a vehicle rule always includes `wheel`.
    pub fn includes_wheel(&self, entry: &VehicleEntry, wheel: &str) -> bool {
        self.for_vehicle(entry).any(|rule| {
            matches!(rule, VehicleRule::WheelAlwaysIncluded { wheel: w, .. } if w == wheel)
        })
    }

    /// Package options that must be dropped when `exterior` is chosen.
    pub fn packages_excluded_by_exterior<'a>(
        &'a self,
        entry: &'a VehicleEntry,
        exterior: &'a str,
    ) -> impl Iterator<Item = &'a str> + 'a {
        self.for_vehicle(entry).filter_map(move |rule| match rule {
            VehicleRule::ExteriorExcludesPackage {
                marker, package, ..
            } if exterior.contains(marker.as_str()) => Some(package.as_str()),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PACKAGE_OPTION_CATEGORY;

    fn entry(id: &str) -> VehicleEntry {
        VehicleEntry {
            id: id.to_string(),
            ..Default::default()
        }
    }

    fn with_packages(packages: &[&str]) -> Selection {
        let mut selection = Selection::default();
        selection.categories.insert(
            PACKAGE_OPTION_CATEGORY.to_string(),
            packages.iter().map(|p| p.to_string()).collect(),
        );
        selection
    }

    #[test]
    fn test_ev3_sunroof_requires_style_on_air() {
        let rules = RuleRegistry::builtin();
        let ev3 = entry("ev3");

        assert!(rules.disables_option(&ev3, &with_packages(&[]), "와이드 선루프", "Air"));
        assert!(rules.disables_option(&ev3, &with_packages(&[]), "와이드 선루프", "Air_롱레인지"));
        assert!(!rules.disables_option(&ev3, &with_packages(&["스타일"]), "와이드 선루프", "Air"));
        assert!(!rules.disables_option(&ev3, &with_packages(&[]), "와이드 선루프", "Earth"));
        assert!(!rules.disables_option(&entry("ev4"), &with_packages(&[]), "와이드 선루프", "Air"));
    }

    #[test]
    fn test_ev9_matte_excludes_style() {
        let rules = RuleRegistry::builtin();
        let ev9 = entry("ev9-gt");
        let mut selection = with_packages(&[]);
        selection.exterior = "오로라 블랙 펄 무광".to_string();

        assert!(rules.disables_option(&ev9, &selection, "스타일", "GT"));
        assert!(!rules.disables_option(&ev9, &selection, "선루프", "GT"));

        selection.exterior = "스노우 화이트 펄".to_string();
        assert!(!rules.disables_option(&ev9, &selection, "스타일", "GT"));

        let excluded: Vec<&str> = rules.packages_excluded_by_exterior(&ev9, "무광 그레이").collect();
        assert_eq!(excluded, vec!["스타일"]);
        assert_eq!(rules.packages_excluded_by_exterior(&ev9, "화이트").count(), 0);
    }

    #[test]
    fn test_ev9_gt_wheel_always_included() {
        let rules = RuleRegistry::builtin();
        assert!(rules.includes_wheel(&entry("ev9-gt"), "21인치 GT전용 전면가공 휠"));
        assert!(!rules.includes_wheel(&entry("ev9-gt"), "19인치 휠"));
        assert!(!rules.includes_wheel(&entry("ev3"), "21인치 GT전용 전면가공 휠"));
    }

    #[test]
    fn test_empty_registry_has_no_effect() {
        let rules = RuleRegistry::new();
        let ev3 = entry("ev3");
        assert!(rules.rules().is_empty());
        assert!(!rules.disables_option(&ev3, &with_packages(&[]), "와이드 선루프", "Air"));
    }
}
