//! Shared catalog fixtures for the integration tests.

#![allow(dead_code)]

use serde_json::json;
use trimline_core::VehicleEntry;

/// EV3 with the legacy restriction schema, a GT-Line interior and
/// trim-priced package options.
pub fn ev3() -> VehicleEntry {
    serde_json::from_value(json!({
        "id": "ev3",
        "fullName": "The Kia EV3",
        "fullPrice": "39,950,000",
        "trims": [
            { "name": "Air", "price": 0, "selected": true },
            { "name": "Air_롱레인지", "price": 4150000 },
            { "name": "Earth", "price": 3000000 },
            { "name": "GT-Line", "price": 4600000 }
        ],
        "exterior": [
            { "name": "스노우 화이트 펄", "price": 0, "selected": true },
            { "name": "아이보리 매트 실버", "price": 80000 },
            { "name": "어벤츄린 그린", "price": 80000 }
        ],
        "interior": [
            { "name": "GT-Line 블랙 원톤", "price": 0 },
            { "name": "블랙 원톤", "price": 0, "selected": true },
            { "name": "그레이 투톤", "price": 0 }
        ],
        "wheels": [
            { "name": "17인치 알로이 휠", "price": 0, "selected": true },
            { "name": "19인치 알로이 휠", "price": 300000 }
        ],
        "options": {
            "패키지옵션": [
                { "name": "스타일", "price": 500000, "trimPrices": { "Air": 500000, "Earth": 400000 }, "description": "스타일 패키지" },
                { "name": "컴포트", "price": 700000 }
            ],
            "선택옵션": [
                { "name": "와이드 선루프", "price": 900000 },
                { "name": "빌트인 캠", "price": 450000, "requiredPackageOptions": ["컴포트"] },
                { "name": "헤드업 디스플레이", "price": 600000 }
            ]
        },
        "taxBenefitDiscounts": { "Air": 1000000, "Air_롱레인지": 1000000, "Earth": 1000000, "GT-Line": 1000000 },
        "trimOptionRestrictions": {
            "Air": { "disabledWheels": ["19인치 알로이 휠"], "disabledOptions": ["헤드업 디스플레이"] },
            "Air_롱레인지": { "disabledInterior": ["그레이 투톤"] },
            "Earth": { "includedPackageOptions": ["컴포트"] },
            "GT-Line": { "defaultWheel": "19인치 알로이 휠" }
        }
    }))
    .expect("ev3 fixture is valid")
}

/// EV9 GT: matte exteriors exclude the 스타일 package, GT wheel always
/// included, no legacy restrictions.
pub fn ev9_gt() -> VehicleEntry {
    serde_json::from_value(json!({
        "id": "ev9-gt",
        "fullName": "The Kia EV9 GT",
        "fullPrice": "88,000,000",
        "trims": [{ "name": "GT", "price": 0 }],
        "exterior": [
            { "name": "스노우 화이트 펄", "price": 0 },
            { "name": "오로라 블랙 펄 무광", "price": 200000 },
            { "name": "아이보리 매트 무광 실버", "price": 200000 }
        ],
        "interior": [{ "name": "블랙", "price": 0 }],
        "wheels": [{ "name": "21인치 GT전용 전면가공 휠", "price": 0 }],
        "options": {
            "패키지옵션": [{ "name": "스타일", "price": 1200000 }],
            "선택옵션": [{ "name": "듀얼 선루프", "price": 1500000 }]
        }
    }))
    .expect("ev9-gt fixture is valid")
}

/// The smallest entry of the tax benefit scenario.
pub fn tax_benefit_scenario() -> VehicleEntry {
    serde_json::from_value(json!({
        "id": "scenario",
        "fullName": "Scenario Car",
        "fullPrice": "50,000,000",
        "trims": [{ "name": "Air", "price": 0 }],
        "exterior": [{ "name": "화이트", "price": 0 }],
        "interior": [{ "name": "블랙", "price": 0 }],
        "taxBenefitDiscounts": { "Air": 1000000 }
    }))
    .expect("scenario fixture is valid")
}
