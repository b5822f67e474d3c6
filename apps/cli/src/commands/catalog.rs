//! # Catalog Commands
//!
//! Listing vehicles, showing one vehicle, and the availability check.
//!
//! ## Availability Check Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    trimline check ev3 --trim Earth                      │
//! │                                                                         │
//! │  open session (ev3)                                                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ChangeTrim("Earth")  ──► defaults cascade                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ChangeExterior(..)?  ──► may drop excluded packages                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ToggleOption(패키지옵션, ..)*                                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌───────────────────────────────────────────┐                         │
//! │  │  RestrictionResolver for every option,    │                         │
//! │  │  wheel and interior under the trim        │                         │
//! │  └───────────────────────────────────────────┘                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  AvailabilityReport                                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use tracing::debug;
use trimline_core::validation::StaleReason;
use trimline_core::{
    CatalogList, CatalogProvider, Money, SelectionEvent, SelectionStore, VehicleEntry,
    PACKAGE_OPTION_CATEGORY,
};

use crate::error::ApiError;
use crate::state::{AppConfig, CatalogState, SessionState};

// =============================================================================
// DTOs
// =============================================================================

/// One line of `trimline list`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleSummaryDto {
    pub id: String,
    pub full_name: String,
    pub base_price: Money,
    pub offers_tax_benefit: bool,
}

impl From<&VehicleEntry> for VehicleSummaryDto {
    fn from(entry: &VehicleEntry) -> Self {
        VehicleSummaryDto {
            id: entry.id.clone(),
            full_name: entry.full_name.clone(),
            base_price: entry.base_price(),
            offers_tax_benefit: entry.offers_tax_benefit(),
        }
    }
}

/// A trim, colour or wheel.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChoiceDto {
    pub name: String,
    pub price: Money,
    pub default: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionDto {
    pub name: String,
    pub price: Money,
    pub description: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDto {
    pub name: String,
    pub options: Vec<OptionDto>,
}

/// Output of `trimline show`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleDetailDto {
    pub id: String,
    pub full_name: String,
    pub base_price: Money,
    pub trims: Vec<ChoiceDto>,
    pub exterior: Vec<ChoiceDto>,
    pub interior: Vec<ChoiceDto>,
    pub wheels: Vec<ChoiceDto>,
    pub categories: Vec<CategoryDto>,
    pub offers_tax_benefit: bool,
}

impl From<&VehicleEntry> for VehicleDetailDto {
    fn from(entry: &VehicleEntry) -> Self {
        let choices = |list: CatalogList| -> Vec<ChoiceDto> {
            let default = entry.default_item(list).map(|item| item.name.as_str());
            entry
                .list(list)
                .iter()
                .map(|item| ChoiceDto {
                    name: item.name.clone(),
                    price: item.price(),
                    default: Some(item.name.as_str()) == default,
                    description: item.description.clone(),
                })
                .collect()
        };

        let categories = entry
            .option_categories
            .iter()
            .map(|(name, options)| CategoryDto {
                name: name.clone(),
                options: options
                    .iter()
                    .map(|option| OptionDto {
                        name: option.name.clone(),
                        price: Money::from_won(option.price),
                        description: entry.option_description(&option.name, "").to_string(),
                    })
                    .collect(),
            })
            .collect();

        VehicleDetailDto {
            id: entry.id.clone(),
            full_name: entry.full_name.clone(),
            base_price: entry.base_price(),
            trims: choices(CatalogList::Trims),
            exterior: choices(CatalogList::Exterior),
            interior: choices(CatalogList::Interior),
            wheels: choices(CatalogList::Wheels),
            categories,
            offers_tax_benefit: entry.offers_tax_benefit(),
        }
    }
}

/// Status of one option under the checked trim.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionStatusDto {
    pub category: String,
    pub name: String,
    pub status: &'static str,
    pub price: Money,
    pub description: String,
}

/// Status of one wheel or interior under the checked trim.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChoiceStatusDto {
    pub name: String,
    pub disabled: bool,
    pub included: bool,
    pub selected: bool,
}

/// Output of `trimline check`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityReport {
    pub vehicle: String,
    pub trim: String,
    pub exterior: String,
    pub packages: Vec<String>,
    pub options: Vec<OptionStatusDto>,
    pub wheels: Vec<ChoiceStatusDto>,
    pub interior: Vec<ChoiceStatusDto>,
    /// Selected names that are unknown or disabled, as `field: name`.
    pub stale: Vec<String>,
}

/// Arguments of `trimline check`.
#[derive(Debug, Clone, Default)]
pub struct CheckRequest {
    pub vehicle: String,
    pub trim: String,
    pub exterior: Option<String>,
    pub packages: Vec<String>,
}

// =============================================================================
// Commands
// =============================================================================

/// Lists vehicles, optionally filtered by name or id.
pub fn list_vehicles(catalog: &CatalogState, query: Option<&str>, limit: usize) -> Vec<VehicleSummaryDto> {
    let query = query.unwrap_or("");
    debug!(query = %query, limit, "list command");

    catalog
        .inner()
        .vehicles()
        .search(query, limit)
        .into_iter()
        .map(VehicleSummaryDto::from)
        .collect()
}

/// Shows every choice one vehicle offers.
pub fn show_vehicle(catalog: &CatalogState, id: &str) -> Result<VehicleDetailDto, ApiError> {
    debug!(id = %id, "show command");
    let entry = catalog
        .inner()
        .get_by_id(id)
        .ok_or_else(|| ApiError::not_found("Vehicle", id))?;
    Ok(VehicleDetailDto::from(entry))
}

/// Reports what the resolver allows under a trim, exterior and packages.
pub async fn check_availability(
    catalog: &CatalogState,
    session: &SessionState,
    request: &CheckRequest,
) -> Result<AvailabilityReport, ApiError> {
    debug!(vehicle = %request.vehicle, trim = %request.trim, "check command");

    let entry = catalog.inner().vehicles().require(&request.vehicle)?;
    session.open(entry).await?;
    session
        .dispatch(SelectionEvent::ChangeTrim(request.trim.clone()))
        .await?;
    if let Some(exterior) = &request.exterior {
        session
            .dispatch(SelectionEvent::ChangeExterior(exterior.clone()))
            .await?;
    }
    for package in &request.packages {
        session.select_option(PACKAGE_OPTION_CATEGORY, package).await?;
    }

    session.read(availability_report).await
}

fn availability_report(store: &SelectionStore) -> AvailabilityReport {
    let entry = store.entry();
    let selection = store.selection();
    let resolver = store.resolver();
    let trim = selection.trim.as_str();

    let options = entry
        .option_categories
        .iter()
        .flat_map(|(category, options)| {
            options.iter().map(move |option| (category, option))
        })
        .map(|(category, option)| OptionStatusDto {
            category: category.clone(),
            name: option.name.clone(),
            status: resolver.option_availability(&option.name, trim).label(),
            price: option.price_for_trim(trim),
            description: entry.option_description(&option.name, trim).to_string(),
        })
        .collect();

    let wheels = entry
        .wheels
        .iter()
        .map(|wheel| ChoiceStatusDto {
            name: wheel.name.clone(),
            disabled: resolver.is_wheel_disabled(&wheel.name, trim),
            included: resolver.is_wheel_included(&wheel.name, trim),
            selected: wheel.name == selection.wheels,
        })
        .collect();

    let interior = entry
        .interior
        .iter()
        .map(|item| ChoiceStatusDto {
            name: item.name.clone(),
            disabled: resolver.is_interior_disabled(&item.name, trim),
            included: false,
            selected: item.name == selection.interior,
        })
        .collect();

    let stale = store
        .stale_selections()
        .into_iter()
        .map(|s| {
            let reason = match s.reason {
                StaleReason::Missing => "missing",
                StaleReason::Disabled => "disabled",
            };
            format!("{}: {} ({})", s.field, s.name, reason)
        })
        .collect();

    AvailabilityReport {
        vehicle: entry.id.clone(),
        trim: selection.trim.clone(),
        exterior: selection.exterior.clone(),
        packages: selection.category(PACKAGE_OPTION_CATEGORY).to_vec(),
        options,
        wheels,
        interior,
        stale,
    }
}

// =============================================================================
// Text Output
// =============================================================================

pub fn render_list(vehicles: &[VehicleSummaryDto], config: &AppConfig) -> String {
    let mut lines = Vec::with_capacity(vehicles.len());
    for v in vehicles {
        let benefit = if v.offers_tax_benefit { "  [세제혜택]" } else { "" };
        lines.push(format!(
            "{:<10} {:<24} {:>16}{}",
            v.id,
            v.full_name,
            config.format_won(v.base_price),
            benefit
        ));
    }
    if lines.is_empty() {
        lines.push("No vehicles found".to_string());
    }
    lines.join("\n")
}

pub fn render_detail(detail: &VehicleDetailDto, config: &AppConfig) -> String {
    let mut lines = vec![
        format!("{} ({})", detail.full_name, detail.id),
        format!("Base price: {}", config.format_won(detail.base_price)),
    ];

    for (title, choices) in [
        ("Trims", &detail.trims),
        ("Exterior", &detail.exterior),
        ("Interior", &detail.interior),
        ("Wheels", &detail.wheels),
    ] {
        lines.push(String::new());
        lines.push(format!("{}:", title));
        for choice in choices {
            let marker = if choice.default { "*" } else { " " };
            lines.push(format!("  {} {}{}", marker, choice.name, choice.price.price_label()));
        }
    }

    for category in &detail.categories {
        lines.push(String::new());
        lines.push(format!("{}:", category.name));
        for option in &category.options {
            lines.push(format!("    {}{}", option.name, option.price.price_label()));
            lines.push(format!("      {}", option.description));
        }
    }

    lines.join("\n")
}

pub fn render_availability(report: &AvailabilityReport) -> String {
    let mut lines = vec![format!(
        "{} / trim {} / exterior {}",
        report.vehicle, report.trim, report.exterior
    )];
    if !report.packages.is_empty() {
        lines.push(format!("Packages: {}", report.packages.join(", ")));
    }

    lines.push(String::new());
    lines.push("Options:".to_string());
    for option in &report.options {
        lines.push(format!(
            "  {:<10} {:<12} {}{}",
            option.status,
            option.category,
            option.name,
            option.price.price_label()
        ));
    }

    for (title, choices) in [("Wheels", &report.wheels), ("Interior", &report.interior)] {
        lines.push(String::new());
        lines.push(format!("{}:", title));
        for choice in choices {
            let status = if choice.included {
                "included"
            } else if choice.disabled {
                "disabled"
            } else {
                "available"
            };
            let marker = if choice.selected { "*" } else { " " };
            lines.push(format!("  {} {:<10} {}", marker, status, choice.name));
        }
    }

    if !report.stale.is_empty() {
        lines.push(String::new());
        lines.push("Stale selections:".to_string());
        lines.extend(report.stale.iter().map(|s| format!("  {}", s)));
    }

    lines.join("\n")
}
