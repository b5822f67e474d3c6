//! # Quote Commands
//!
//! Configuring a vehicle, exporting the quote document, and importing one.
//!
//! ## Quote Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    trimline quote ev3 …                                 │
//! │                                                                         │
//! │  open session ──► --import? ──► --trim ──► --exterior ──► --interior    │
//! │                                               │                         │
//! │                                               ▼                         │
//! │            --wheel ──► --tax-benefit ──► --option cat=name …            │
//! │                                               │                         │
//! │                                               ▼                         │
//! │                          --export? ──► quote_<name>_<date>.json         │
//! │                                               │                         │
//! │                                               ▼                         │
//! │                          QuoteSummaryDto (document + notices)           │
//! │                                                                         │
//! │  Trim goes first: a trim change resets every other choice.              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};
use trimline_core::selection::LEGACY_OPTIONS_KEY;
use trimline_core::validation::StaleReason;
use trimline_core::{QuoteDocument, SelectionEvent, TaxBenefit, VehicleEntry};

use crate::error::ApiError;
use crate::state::{AppConfig, CatalogState, SessionState};

// =============================================================================
// Arguments
// =============================================================================

/// `--option` value: `<category>=<name>` or a bare option name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionArg {
    pub category: Option<String>,
    pub name: String,
}

/// Parses `--option` values for clap.
pub fn parse_option_arg(value: &str) -> Result<OptionArg, String> {
    let (category, name) = match value.split_once('=') {
        Some((category, name)) => (Some(category.trim().to_string()), name.trim()),
        None => (None, value.trim()),
    };

    if name.is_empty() || category.as_deref() == Some("") {
        return Err(format!("expected <category>=<name> or <name>, got '{}'", value));
    }

    Ok(OptionArg {
        category,
        name: name.to_string(),
    })
}

/// Arguments of `trimline quote`.
#[derive(Debug, Clone, Default)]
pub struct QuoteRequest {
    pub vehicle: String,
    pub import: Option<PathBuf>,
    pub trim: Option<String>,
    pub exterior: Option<String>,
    pub interior: Option<String>,
    pub wheel: Option<String>,
    pub tax_benefit: Option<String>,
    pub options: Vec<OptionArg>,
    pub export: bool,
}

// =============================================================================
// DTOs
// =============================================================================

/// Output of `trimline quote` and `trimline import`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteSummaryDto {
    pub session_id: String,
    pub quote: QuoteDocument,
    /// Selected names that are unknown or disabled, as `field: name`.
    pub warnings: Vec<String>,
    pub notices: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exported: Option<PathBuf>,
}

// =============================================================================
// Commands
// =============================================================================

/// Builds a configuration step by step and optionally exports it.
pub async fn configure_quote(
    catalog: &CatalogState,
    session: &SessionState,
    config: &AppConfig,
    request: &QuoteRequest,
    now: DateTime<Utc>,
) -> Result<QuoteSummaryDto, ApiError> {
    debug!(vehicle = %request.vehicle, session = %session.id(), "quote command");

    let entry = catalog.inner().vehicles().require(&request.vehicle)?;
    session.open(entry.clone()).await?;

    let mut notices = Vec::new();
    if let Some(path) = &request.import {
        notices.push(session.import_file(path).await?.to_string());
    }

    for event in quote_events(request)? {
        session.dispatch(event).await?;
    }
    for (category, name) in option_targets(&entry, request)? {
        session.select_option(&category, &name).await?;
    }

    let exported = if request.export {
        let exported = session.export_to(&config.export_dir, now).await?;
        notices.push(exported.notice.to_string());
        Some(exported.path)
    } else {
        None
    };

    summarize(session, notices, exported, now).await
}

/// Loads a quote document into a session.
///
/// The vehicle comes from `vehicle`, else from the document's `carId`.
pub async fn import_quote(
    catalog: &CatalogState,
    session: &SessionState,
    path: &Path,
    vehicle: Option<&str>,
    now: DateTime<Utc>,
) -> Result<QuoteSummaryDto, ApiError> {
    debug!(path = %path.display(), "import command");

    let text = tokio::fs::read_to_string(path).await?;
    let vehicle = match vehicle {
        Some(id) => id.to_string(),
        None => document_car_id(&text)?,
    };

    let entry = catalog.inner().vehicles().require(&vehicle)?;
    session.open(entry).await?;
    let notice = session.import_text(&text).await?;

    info!(session = %session.id(), %vehicle, "Quote loaded from {}", path.display());
    summarize(session, vec![notice.to_string()], None, now).await
}

/// Translates the choice flags into transitions, in application order.
fn quote_events(request: &QuoteRequest) -> Result<Vec<SelectionEvent>, ApiError> {
    let mut events = Vec::new();

    if let Some(trim) = &request.trim {
        events.push(SelectionEvent::ChangeTrim(trim.clone()));
    }
    if let Some(exterior) = &request.exterior {
        events.push(SelectionEvent::ChangeExterior(exterior.clone()));
    }
    if let Some(interior) = &request.interior {
        events.push(SelectionEvent::ChangeInterior(interior.clone()));
    }
    if let Some(wheel) = &request.wheel {
        events.push(SelectionEvent::ChangeWheel(wheel.clone()));
    }
    if let Some(label) = &request.tax_benefit {
        let value = TaxBenefit::parse(label).ok_or_else(|| {
            ApiError::validation(format!(
                "Unknown tax benefit '{}': use {} or {}",
                label,
                TaxBenefit::APPLIED_LABEL,
                TaxBenefit::NOT_APPLIED_LABEL
            ))
        })?;
        events.push(SelectionEvent::ChangeTaxBenefit(value));
    }

    Ok(events)
}

/// `(category, name)` for every `--option`, resolving bare names.
fn option_targets(entry: &VehicleEntry, request: &QuoteRequest) -> Result<Vec<(String, String)>, ApiError> {
    request
        .options
        .iter()
        .map(|option| {
            let category = match &option.category {
                Some(category) => category.clone(),
                None => category_of(entry, &option.name)?,
            };
            Ok((category, option.name.clone()))
        })
        .collect()
}

/// First catalog category offering `name`.
fn category_of(entry: &VehicleEntry, name: &str) -> Result<String, ApiError> {
    entry
        .option_categories
        .iter()
        .find(|(_, options)| options.iter().any(|o| o.name == name))
        .map(|(category, _)| category.clone())
        .ok_or_else(|| ApiError::selection(format!("Option '{}' is not offered by {}", name, entry.id)))
}

fn document_car_id(text: &str) -> Result<String, ApiError> {
    let value: Value = serde_json::from_str(text).map_err(trimline_core::QuoteError::from)?;
    value
        .get("carId")
        .and_then(Value::as_str)
        .filter(|id| !id.is_empty() && *id != "unknown")
        .map(str::to_string)
        .ok_or_else(|| ApiError::validation("Quote has no carId; pass --vehicle <id>"))
}

async fn summarize(
    session: &SessionState,
    notices: Vec<String>,
    exported: Option<PathBuf>,
    now: DateTime<Utc>,
) -> Result<QuoteSummaryDto, ApiError> {
    let (quote, warnings) = session
        .read(|store| {
            let warnings: Vec<String> = store
                .stale_selections()
                .into_iter()
                .map(|s| match s.reason {
                    StaleReason::Missing => format!("{}: '{}' is not in the catalog", s.field, s.name),
                    StaleReason::Disabled => {
                        format!("{}: '{}' is not available for this trim", s.field, s.name)
                    }
                })
                .collect();
            (store.export_quote_at(now), warnings)
        })
        .await?;

    for warning in &warnings {
        warn!(session = %session.id(), "{}", warning);
    }

    Ok(QuoteSummaryDto {
        session_id: session.id().to_string(),
        quote: quote.into_result()?,
        warnings,
        notices,
        exported,
    })
}

// =============================================================================
// Text Output
// =============================================================================

pub fn render_quote(summary: &QuoteSummaryDto, config: &AppConfig) -> String {
    let quote = &summary.quote;
    let selected = &quote.selected_options;
    let prices = &quote.price_breakdown;
    let won = |amount| config.format_won(amount);

    let mut lines = vec![
        format!("{} ({})", quote.car_model, quote.car_id),
        format!("  {:<28} {:>16}", "Base price", won(prices.base_price)),
    ];

    for (label, item) in [
        ("Trim", &selected.trim),
        ("Exterior", &selected.exterior),
        ("Interior", &selected.interior),
        ("Wheels", &selected.wheels),
    ] {
        lines.push(format!(
            "  {:<9} {:<18} {:>16}",
            label,
            item.name,
            won(item.price)
        ));
    }

    for option in &selected.additional_options {
        let category = if option.category == LEGACY_OPTIONS_KEY {
            String::new()
        } else {
            format!("[{}] ", option.category)
        };
        lines.push(format!(
            "  Option    {}{:<18} {:>16}",
            category,
            option.name,
            won(option.price)
        ));
    }

    lines.push(format!("  {:<28} {:>16}", "Subtotal", won(prices.total_before_discount)));
    if selected.tax_benefit.applied {
        lines.push(format!(
            "  {:<28} {:>16}",
            format!("Tax benefit ({})", TaxBenefit::APPLIED_LABEL),
            won(prices.tax_benefit_discount)
        ));
    }
    lines.push(format!("  {:<28} {:>16}", "Total", won(prices.total_after_discount)));

    if !summary.warnings.is_empty() {
        lines.push(String::new());
        lines.extend(summary.warnings.iter().map(|w| format!("warning: {}", w)));
    }
    if let Some(path) = &summary.exported {
        lines.push(String::new());
        lines.push(format!("Saved {}", path.display()));
    }
    for notice in &summary.notices {
        lines.push(notice.clone());
    }

    lines.join("\n")
}
