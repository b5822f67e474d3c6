//! # Quote Codec
//!
//! Encodes a configuration as a quote document and reads it back.
//!
//! ## Document Shape
//! ```text
//! {
//!   "carModel": "The Kia EV3", "carId": "ev3", "basePrice": 50000000,
//!   "selectedOptions": {
//!     "trim":     { "name": "Air", "price": 0 },
//!     "exterior": { ... }, "interior": { ... }, "wheels": { ... },
//!     "taxBenefit": { "applied": true, "discount": 1000000 },
//!     "additionalOptions": [ { "category", "name", "price", "description" } ]
//!   },
//!   "priceBredown": { ..., "taxBenefitDiscount": -1000000, ... },
//!   "timestamp": "2026-10-16T09:30:00.000Z"
//! }
//! ```
//!
//! `priceBredown` is spelled that way in every document ever exported, so the
//! key is kept for compatibility.
//!
//! ## Import Schemas
//! ```text
//! has selectedOptions.trim ──► canonical  (names as {name,price} or bare strings)
//! has trim+exterior+interior ► legacy flat ({trim, exterior, interior, options, wheels|wheel, taxBenefit})
//! anything else ────────────► QuoteError::InvalidFormat
//! ```

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};
use ts_rs::TS;

use crate::catalog::{CatalogList, VehicleEntry};
use crate::error::{QuoteError, QuoteResult};
use crate::money::Money;
use crate::selection::{Selection, TaxBenefit, LEGACY_OPTIONS_KEY};

/// Message carried by the failure shape of an export.
pub const EXPORT_FAILED_MESSAGE: &str = "견적 데이터 생성에 실패했습니다.";

// =============================================================================
// Document Types
// =============================================================================

/// A named choice with its resolved price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct QuoteItem {
    pub name: String,
    pub price: Money,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct QuoteTaxBenefit {
    pub applied: bool,
    pub discount: Money,
}

/// One selected add-on option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct QuoteOption {
    pub category: String,
    pub name: String,
    pub price: Money,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct QuoteSelection {
    pub trim: QuoteItem,
    pub exterior: QuoteItem,
    pub interior: QuoteItem,
    pub wheels: QuoteItem,
    pub tax_benefit: QuoteTaxBenefit,
    pub additional_options: Vec<QuoteOption>,
}

/// Price lines of a quote. The discount line is stored negated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct QuotePriceBreakdown {
    pub base_price: Money,
    pub trim_price: Money,
    pub exterior_price: Money,
    pub interior_price: Money,
    pub wheels_price: Money,
    /// Sum of `additionalOptions` prices only.
    pub additional_options_price: Money,
    pub total_before_discount: Money,
    pub tax_benefit_discount: Money,
    pub total_after_discount: Money,
}

/// The canonical quote document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct QuoteDocument {
    pub car_model: String,
    pub car_id: String,
    pub base_price: Money,
    pub selected_options: QuoteSelection,
    #[serde(rename = "priceBredown")]
    pub price_breakdown: QuotePriceBreakdown,
    pub timestamp: String,
}

impl QuoteDocument {
    /// Pretty JSON, the on-disk format.
    pub fn to_json_pretty(&self) -> QuoteResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Names of the additional options, in document order.
    pub fn option_names(&self) -> impl Iterator<Item = &str> {
        self.selected_options
            .additional_options
            .iter()
            .map(|o| o.name.as_str())
    }
}

/// Failure shape of an export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct QuoteFailure {
    pub error: String,
    pub timestamp: String,
}

/// Result of [`export`]: a document, or `{error, timestamp}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QuoteExport {
    Document(Box<QuoteDocument>),
    Failed(QuoteFailure),
}

impl QuoteExport {
    pub fn is_failed(&self) -> bool {
        matches!(self, QuoteExport::Failed(_))
    }

    /// Converts the failure shape into an error.
    pub fn into_result(self) -> QuoteResult<QuoteDocument> {
        match self {
            QuoteExport::Document(doc) => Ok(*doc),
            QuoteExport::Failed(failure) => Err(QuoteError::ExportFailed(failure.error)),
        }
    }
}

// =============================================================================
// Export
// =============================================================================

/// RFC 3339 UTC with milliseconds, e.g. `2026-10-16T09:30:00.000Z`.
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Builds a quote document stamped with the current time.
pub fn export(entry: Option<&VehicleEntry>, selection: &Selection, discount: Money) -> QuoteExport {
    export_at(entry, selection, discount, Utc::now())
}

/// Builds a quote document stamped with `now`.
///
/// Never fails: without a catalog entry the `{error, timestamp}` shape is
/// returned instead. `discount` only counts when the tax benefit is applied.
pub fn export_at(
    entry: Option<&VehicleEntry>,
    selection: &Selection,
    discount: Money,
    now: DateTime<Utc>,
) -> QuoteExport {
    let timestamp = format_timestamp(now);

    let Some(entry) = entry else {
        warn!("quote export without a vehicle entry");
        return QuoteExport::Failed(QuoteFailure {
            error: EXPORT_FAILED_MESSAGE.to_string(),
            timestamp,
        });
    };

    let item = |list: CatalogList, name: &str| QuoteItem {
        name: name.to_string(),
        price: entry
            .find_item(list, name)
            .map(|i| i.price())
            .unwrap_or_default(),
    };

    let trim = item(CatalogList::Trims, &selection.trim);
    let exterior = item(CatalogList::Exterior, &selection.exterior);
    let interior = item(CatalogList::Interior, &selection.interior);
    let wheels = item(CatalogList::Wheels, &selection.wheels);

    let additional_options = collect_options(entry, selection);

    let applied = selection.tax_benefit.is_applied();
    let discount = if applied { discount } else { Money::zero() };

    let base_price = entry.base_price();
    let additional_options_price: Money = additional_options.iter().map(|o| o.price).sum();
    let total_before_discount =
        base_price + trim.price + exterior.price + interior.price + wheels.price + additional_options_price;

    let price_breakdown = QuotePriceBreakdown {
        base_price,
        trim_price: trim.price,
        exterior_price: exterior.price,
        interior_price: interior.price,
        wheels_price: wheels.price,
        additional_options_price,
        total_before_discount,
        tax_benefit_discount: -discount,
        total_after_discount: total_before_discount - discount,
    };

    debug!(
        vehicle = %entry.id,
        options = additional_options.len(),
        total = %price_breakdown.total_after_discount,
        "quote exported"
    );

    QuoteExport::Document(Box::new(QuoteDocument {
        car_model: non_empty_or(&entry.full_name, "Unknown"),
        car_id: non_empty_or(&entry.id, "unknown"),
        base_price,
        selected_options: QuoteSelection {
            trim,
            exterior,
            interior,
            wheels,
            tax_benefit: QuoteTaxBenefit { applied, discount },
            additional_options,
        },
        price_breakdown,
        timestamp,
    }))
}

/// Selected options in catalog order, then legacy-list names that no
/// category selection already covered (category `"options"`).
fn collect_options(entry: &VehicleEntry, selection: &Selection) -> Vec<QuoteOption> {
    let trim = selection.trim.as_str();
    let mut details = Vec::new();

    for (category, options) in &entry.option_categories {
        let chosen = selection.category(category);
        if chosen.is_empty() {
            continue;
        }
        for option in options.iter().filter(|o| chosen.contains(&o.name)) {
            details.push(QuoteOption {
                category: category.clone(),
                name: option.name.clone(),
                price: option.price_for_trim(trim),
                description: option.description.clone().unwrap_or_default(),
            });
        }
    }

    for name in &selection.options {
        if details.iter().any(|d| &d.name == name) {
            continue;
        }
        let option = entry.find_option(name);
        details.push(QuoteOption {
            category: LEGACY_OPTIONS_KEY.to_string(),
            name: name.clone(),
            price: option.map(|o| o.price_for_trim(trim)).unwrap_or_default(),
            description: option
                .and_then(|o| o.description.clone())
                .unwrap_or_default(),
        });
    }

    details
}

fn non_empty_or(value: &str, fallback: &str) -> String {
    if value.is_empty() {
        fallback.to_string()
    } else {
        value.to_string()
    }
}

/// Export file name: `quote_<carFullName>_<YYYY-MM-DD>.json`.
pub fn quote_file_name(full_name: &str, date: NaiveDate) -> String {
    let safe: String = full_name
        .chars()
        .map(|c| if matches!(c, '/' | '\\') { '_' } else { c })
        .collect();
    format!("quote_{}_{}.json", safe, date.format("%Y-%m-%d"))
}

// =============================================================================
// Import
// =============================================================================

/// Parses a quote document of either schema into a selection.
///
/// `entry` is only used to give every catalog category an empty list when
/// the document names none.
pub fn import(text: &str, entry: Option<&VehicleEntry>) -> QuoteResult<Selection> {
    let value: Value = serde_json::from_str(text)?;
    import_value(&value, entry)
}

/// Same as [`import`], from an already-parsed JSON value.
pub fn import_value(value: &Value, entry: Option<&VehicleEntry>) -> QuoteResult<Selection> {
    let mut selection = match value.get("selectedOptions") {
        Some(selected) if is_present(selected.get("trim")) => import_canonical(selected)?,
        _ if ["trim", "exterior", "interior"].iter().all(|k| is_present(value.get(*k))) => {
            import_legacy(value)?
        }
        _ => {
            return Err(QuoteError::InvalidFormat(
                "expected a canonical quote or a flat {trim, exterior, interior} document".to_string(),
            ))
        }
    };

    if let Some(entry) = entry {
        for category in entry.category_names() {
            selection.categories.entry(category.to_string()).or_default();
        }
    }

    debug!(trim = %selection.trim, "quote imported");
    Ok(selection)
}

fn import_canonical(selected: &Value) -> QuoteResult<Selection> {
    let field = |key: &str| -> QuoteResult<String> {
        choice_name(selected.get(key)).ok_or_else(|| QuoteError::MissingField(format!("selectedOptions.{key}")))
    };

    let trim = field("trim")?;
    let exterior = field("exterior")?;
    let interior = field("interior")?;
    let wheels = choice_name(selected.get("wheels"))
        .or_else(|| choice_name(selected.get("wheel")))
        .unwrap_or_default();

    let tax_benefit = selected
        .get("taxBenefit")
        .and_then(|t| t.get("applied"))
        .and_then(Value::as_bool)
        .map(TaxBenefit::from)
        .unwrap_or_default();

    let mut selection = Selection {
        trim,
        exterior,
        interior,
        wheels,
        tax_benefit,
        ..Default::default()
    };

    match (selected.get("additionalOptions"), selected.get("options")) {
        (Some(Value::Array(items)), _) => {
            for (category, names) in group_by_category(items)? {
                selection.category_mut(&category).extend(names);
            }
        }
        (_, Some(options)) => selection.options = string_list(options, "selectedOptions.options")?,
        _ => {}
    }

    Ok(selection)
}

fn group_by_category(items: &[Value]) -> QuoteResult<IndexMap<String, Vec<String>>> {
    let mut grouped: IndexMap<String, Vec<String>> = IndexMap::new();

    for (i, item) in items.iter().enumerate() {
        let name = item
            .get("name")
            .and_then(Value::as_str)
            .filter(|n| !n.is_empty())
            .ok_or_else(|| QuoteError::MissingField(format!("selectedOptions.additionalOptions[{i}].name")))?;
        let category = item
            .get("category")
            .and_then(Value::as_str)
            .filter(|c| !c.is_empty())
            .unwrap_or(LEGACY_OPTIONS_KEY);

        let names = grouped.entry(category.to_string()).or_default();
        if !names.iter().any(|n| n == name) {
            names.push(name.to_string());
        }
    }

    Ok(grouped)
}

fn import_legacy(value: &Value) -> QuoteResult<Selection> {
    let text = |key: &str| -> String {
        value
            .get(key)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    };

    let wheels = value
        .get("wheels")
        .and_then(Value::as_str)
        .filter(|w| !w.is_empty())
        .or_else(|| value.get("wheel").and_then(Value::as_str))
        .unwrap_or_default()
        .to_string();

    let tax_benefit = match value.get("taxBenefit").and_then(Value::as_str) {
        Some(label) => TaxBenefit::parse(label).unwrap_or_else(|| {
            warn!(label, "unknown taxBenefit label in legacy quote, using 미적용");
            TaxBenefit::NotApplied
        }),
        None => TaxBenefit::NotApplied,
    };

    let options = match value.get("options") {
        Some(list) => string_list(list, "options")?,
        None => Vec::new(),
    };

    Ok(Selection {
        trim: text("trim"),
        exterior: text("exterior"),
        interior: text("interior"),
        wheels,
        tax_benefit,
        options,
        ..Default::default()
    })
}

/// A choice written as `{ "name": … }` or as a bare string.
fn choice_name(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Object(map) => map
            .get("name")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_string),
        _ => None,
    }
}

fn is_present(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) | Some(Value::Bool(false)) => false,
        Some(Value::String(s)) => !s.is_empty(),
        Some(_) => true,
    }
}

fn string_list(value: &Value, field: &str) -> QuoteResult<Vec<String>> {
    match value {
        Value::Null => Ok(Vec::new()),
        Value::Array(items) => items
            .iter()
            .map(|item| {
                item.as_str()
                    .map(str::to_string)
                    .ok_or_else(|| QuoteError::InvalidFormat(format!("{field} must be a list of names")))
            })
            .collect(),
        _ => Err(QuoteError::InvalidFormat(format!("{field} must be a list of names"))),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PACKAGE_OPTION_CATEGORY;
    use chrono::TimeZone;
    use serde_json::json;

    fn entry() -> VehicleEntry {
        serde_json::from_value(json!({
            "id": "ev3",
            "fullName": "The Kia EV3",
            "fullPrice": "50,000,000",
            "trims": [{ "name": "Air", "price": 0 }, { "name": "Earth", "price": 3000000 }],
            "exterior": [{ "name": "화이트", "price": 0 }, { "name": "블루", "price": 80000 }],
            "interior": [{ "name": "블랙", "price": 0 }],
            "wheels": [{ "name": "17인치", "price": 0 }],
            "options": {
                "패키지옵션": [
                    { "name": "스타일", "price": 500000, "trimPrices": { "Earth": 400000 }, "description": "스타일 패키지" }
                ],
                "선택옵션": [{ "name": "HUD", "price": 600000 }]
            },
            "taxBenefitDiscounts": { "Air": 1000000, "Earth": 1000000 }
        }))
        .unwrap()
    }

    fn selection() -> Selection {
        let mut selection = Selection {
            trim: "Earth".to_string(),
            exterior: "블루".to_string(),
            interior: "블랙".to_string(),
            wheels: "17인치".to_string(),
            tax_benefit: TaxBenefit::Applied,
            ..Default::default()
        };
        selection
            .categories
            .insert(PACKAGE_OPTION_CATEGORY.to_string(), vec!["스타일".to_string()]);
        selection
            .categories
            .insert("선택옵션".to_string(), vec!["HUD".to_string()]);
        selection
    }

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 16, 9, 30, 0).unwrap()
    }

    #[test]
    fn test_export_document_shape() {
        let entry = entry();
        let doc = export_at(Some(&entry), &selection(), Money::from_won(1_000_000), fixed_now())
            .into_result()
            .unwrap();
        let value = serde_json::to_value(&doc).unwrap();

        assert_eq!(value["carModel"], json!("The Kia EV3"));
        assert_eq!(value["carId"], json!("ev3"));
        assert_eq!(value["basePrice"], json!(50_000_000));
        assert_eq!(value["selectedOptions"]["trim"], json!({ "name": "Earth", "price": 3000000 }));
        assert_eq!(value["selectedOptions"]["taxBenefit"], json!({ "applied": true, "discount": 1000000 }));
        assert_eq!(
            value["selectedOptions"]["additionalOptions"][0],
            json!({ "category": "패키지옵션", "name": "스타일", "price": 400000, "description": "스타일 패키지" })
        );
        assert_eq!(value["selectedOptions"]["additionalOptions"][1]["description"], json!(""));
        assert_eq!(value["priceBredown"]["additionalOptionsPrice"], json!(1_000_000));
        assert_eq!(value["priceBredown"]["totalBeforeDiscount"], json!(54_080_000));
        assert_eq!(value["priceBredown"]["taxBenefitDiscount"], json!(-1_000_000));
        assert_eq!(value["priceBredown"]["totalAfterDiscount"], json!(53_080_000));
        assert_eq!(value["timestamp"], json!("2026-10-16T09:30:00.000Z"));
    }

    #[test]
    fn test_export_ignores_discount_when_not_applied() {
        let entry = entry();
        let mut sel = selection();
        sel.tax_benefit = TaxBenefit::NotApplied;

        let doc = export_at(Some(&entry), &sel, Money::from_won(1_000_000), fixed_now())
            .into_result()
            .unwrap();
        assert!(!doc.selected_options.tax_benefit.applied);
        assert!(doc.price_breakdown.tax_benefit_discount.is_zero());
        assert_eq!(doc.price_breakdown.total_after_discount, doc.price_breakdown.total_before_discount);
    }

    #[test]
    fn test_export_without_entry_returns_failure_shape() {
        let result = export_at(None, &selection(), Money::zero(), fixed_now());
        assert!(result.is_failed());

        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["error"], json!(EXPORT_FAILED_MESSAGE));
        assert_eq!(value["timestamp"], json!("2026-10-16T09:30:00.000Z"));
        assert!(matches!(result.into_result(), Err(QuoteError::ExportFailed(_))));
    }

    #[test]
    fn test_round_trip() {
        let entry = entry();
        let original = selection();
        let doc = export_at(Some(&entry), &original, Money::from_won(1_000_000), fixed_now())
            .into_result()
            .unwrap();
        let text = doc.to_json_pretty().unwrap();

        let back = import(&text, Some(&entry)).unwrap();
        assert_eq!(back, original);
    }

    #[test]
    fn test_import_canonical_bare_strings_and_wheel_alias() {
        let doc = json!({
            "selectedOptions": {
                "trim": "Air",
                "exterior": { "name": "화이트", "price": 0 },
                "interior": "블랙",
                "wheel": { "name": "17인치" },
                "options": ["HUD"]
            }
        });

        let sel = import_value(&doc, None).unwrap();
        assert_eq!(sel.trim, "Air");
        assert_eq!(sel.exterior, "화이트");
        assert_eq!(sel.wheels, "17인치");
        assert_eq!(sel.tax_benefit, TaxBenefit::NotApplied);
        assert_eq!(sel.options, vec!["HUD".to_string()]);
    }

    #[test]
    fn test_import_canonical_fills_catalog_categories() {
        let entry = entry();
        let doc = json!({
            "selectedOptions": {
                "trim": { "name": "Air" }, "exterior": "화이트", "interior": "블랙",
                "taxBenefit": { "applied": true }
            }
        });

        let sel = import_value(&doc, Some(&entry)).unwrap();
        assert!(sel.tax_benefit.is_applied());
        assert_eq!(sel.categories.len(), 2);
        assert!(sel.has_no_options());
    }

    #[test]
    fn test_import_canonical_missing_exterior() {
        let doc = json!({ "selectedOptions": { "trim": "Air", "interior": "블랙" } });
        let err = import_value(&doc, None).unwrap_err();
        assert!(matches!(err, QuoteError::MissingField(f) if f == "selectedOptions.exterior"));
    }

    #[test]
    fn test_import_legacy_flat() {
        let doc = json!({
            "trim": "Air", "exterior": "화이트", "interior": "블랙",
            "wheel": "17인치", "taxBenefit": "적용"
        });

        let sel = import_value(&doc, None).unwrap();
        assert_eq!(sel.wheels, "17인치");
        assert!(sel.tax_benefit.is_applied());
        assert!(sel.options.is_empty());
    }

    #[test]
    fn test_import_rejects_other_shapes() {
        assert!(matches!(
            import_value(&json!({ "trim": "Air", "exterior": "화이트" }), None),
            Err(QuoteError::InvalidFormat(_))
        ));
        assert!(matches!(import_value(&json!([1, 2, 3]), None), Err(QuoteError::InvalidFormat(_))));
        assert!(matches!(import("{ nope", None), Err(QuoteError::Json(_))));
    }

    #[test]
    fn test_quote_file_name() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
        assert_eq!(quote_file_name("The Kia EV3", date), "quote_The Kia EV3_2026-10-16.json");
        assert_eq!(quote_file_name("A/B", date), "quote_A_B_2026-10-16.json");
    }
}
