//! End-to-end configuration scenarios against realistic catalog entries.

mod common;

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use trimline_core::quote;
use trimline_core::restriction::OptionAvailability;
use trimline_core::store::{EXPORT_NOTICE, IMPORT_NOTICE};
use trimline_core::{
    CatalogList, CoreError, Money, SelectionEvent, SelectionStore, TaxBenefit, PACKAGE_OPTION_CATEGORY,
};

fn store(entry: trimline_core::VehicleEntry) -> SelectionStore {
    SelectionStore::new(Arc::new(entry)).expect("fixture passes validation")
}

#[test]
fn tax_benefit_reduces_total_by_trim_discount() {
    let mut store = store(common::tax_benefit_scenario());
    store
        .dispatch(SelectionEvent::ChangeTaxBenefit(TaxBenefit::Applied))
        .unwrap();

    assert_eq!(store.pricing().total_price(), Money::from_won(49_000_000));
}

#[test]
fn trim_price_override_applies_to_selected_option() {
    let mut store = store(common::ev3());
    store.dispatch(SelectionEvent::ChangeTrim("Earth".into())).unwrap();
    store
        .dispatch(SelectionEvent::toggle(PACKAGE_OPTION_CATEGORY, "스타일", true))
        .unwrap();

    assert_eq!(store.pricing().options_price().won(), 400_000);
    assert_eq!(
        quote::export_at(
            Some(store.entry()),
            store.selection(),
            Money::zero(),
            Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap()
        )
        .into_result()
        .unwrap()
        .selected_options
        .additional_options[0]
            .price
            .won(),
        400_000
    );
}

#[test]
fn ev3_sunroof_needs_style_package_on_air() {
    let mut store = store(common::ev3());
    assert_eq!(
        store.resolver().option_availability("와이드 선루프", "Air"),
        OptionAvailability::Disabled
    );

    store
        .dispatch(SelectionEvent::toggle(PACKAGE_OPTION_CATEGORY, "스타일", true))
        .unwrap();
    assert_eq!(
        store.resolver().option_availability("와이드 선루프", "Air"),
        OptionAvailability::Selectable
    );

    store.dispatch(SelectionEvent::ChangeTrim("Earth".into())).unwrap();
    assert!(!store.resolver().is_option_disabled("와이드 선루프", "Earth"));
}

#[test]
fn required_package_and_legacy_inclusion() {
    let mut store = store(common::ev3());
    assert!(store.resolver().is_option_disabled("빌트인 캠", "Air"));
    assert!(store.resolver().is_option_disabled("헤드업 디스플레이", "Air"));

    store
        .dispatch(SelectionEvent::toggle(PACKAGE_OPTION_CATEGORY, "컴포트", true))
        .unwrap();
    assert!(!store.resolver().is_option_disabled("빌트인 캠", "Air"));
    assert!(store.resolver().is_option_included("컴포트", "Earth"));
}

#[test]
fn ev9_matte_exterior_and_style_are_mutually_exclusive() {
    let mut store = store(common::ev9_gt());
    store
        .dispatch(SelectionEvent::toggle(PACKAGE_OPTION_CATEGORY, "스타일", true))
        .unwrap();

    store
        .dispatch(SelectionEvent::ChangeExterior("아이보리 매트 무광 실버".into()))
        .unwrap();

    assert!(!store.selection().has_package_option("스타일"));
    assert_eq!(
        store.resolver().option_availability("스타일", "GT"),
        OptionAvailability::Disabled
    );
    assert!(store.resolver().is_wheel_included("21인치 GT전용 전면가공 휠", "GT"));
    assert!(!store.resolver().is_wheel_disabled("21인치 GT전용 전면가공 휠", "GT"));
}

#[test]
fn non_trim_change_keeps_now_disabled_option() {
    // Selections are not pruned when a later change disables them; they
    // are only reported.
    let mut store = store(common::ev3());
    store
        .dispatch(SelectionEvent::toggle(PACKAGE_OPTION_CATEGORY, "컴포트", true))
        .unwrap();
    store
        .dispatch(SelectionEvent::toggle("선택옵션", "빌트인 캠", true))
        .unwrap();
    store
        .dispatch(SelectionEvent::toggle(PACKAGE_OPTION_CATEGORY, "컴포트", false))
        .unwrap();

    assert!(store.selection().is_selected("선택옵션", "빌트인 캠"));
    let stale = store.stale_selections();
    assert_eq!(stale.len(), 1);
    assert_eq!(stale[0].name, "빌트인 캠");
}

#[test]
fn trim_change_picks_restriction_aware_defaults() {
    let mut store = store(common::ev3());

    store.dispatch(SelectionEvent::ChangeTrim("GT-Line".into())).unwrap();
    assert_eq!(store.selection().wheels, "19인치 알로이 휠");

    store.dispatch(SelectionEvent::ChangeTrim("Air_롱레인지".into())).unwrap();
    assert_eq!(store.selection().interior, "블랙 원톤");
    assert_eq!(store.selection().wheels, "17인치 알로이 휠");

    let err = store
        .dispatch(SelectionEvent::ChangeInterior("없는 내장".into()))
        .unwrap_err();
    assert!(matches!(err, CoreError::UnknownChoice { .. }));
}

#[test]
fn export_then_import_restores_configuration() {
    let mut original = store(common::ev3());
    original.dispatch(SelectionEvent::ChangeTrim("Earth".into())).unwrap();
    original
        .dispatch(SelectionEvent::ChangeExterior("어벤츄린 그린".into()))
        .unwrap();
    original
        .dispatch(SelectionEvent::toggle(PACKAGE_OPTION_CATEGORY, "스타일", true))
        .unwrap();
    original
        .dispatch(SelectionEvent::toggle("선택옵션", "와이드 선루프", true))
        .unwrap();
    original
        .dispatch(SelectionEvent::ChangeTaxBenefit(TaxBenefit::Applied))
        .unwrap();

    let document = original.export_quote().into_result().unwrap();
    assert_eq!(
        document.price_breakdown.total_after_discount,
        original.pricing().total_price()
    );
    let text = document.to_json_pretty().unwrap();

    let mut restored = store(common::ev3());
    assert_eq!(restored.import_quote(&text).unwrap(), IMPORT_NOTICE);
    assert_eq!(restored.selection(), original.selection());
    assert_eq!(restored.pricing().breakdown(), original.pricing().breakdown());
    assert!(!EXPORT_NOTICE.is_empty());
}

#[test]
fn option_lookups_by_name() {
    let entry = common::ev3();
    assert_eq!(entry.option_description("스타일", "Air"), "스타일 패키지");
    assert_eq!(
        entry.option_description("컴포트", "Air"),
        trimline_core::catalog::DEFAULT_OPTION_DESCRIPTION
    );
    assert_eq!(
        trimline_core::pricing::option_price(&entry, "스타일", "Earth"),
        Money::from_won(400_000)
    );
    assert_eq!(
        Money::from_won(entry.find_item(CatalogList::Wheels, "19인치 알로이 휠").unwrap().price)
            .price_label(),
        " (+300,000원)"
    );
}
