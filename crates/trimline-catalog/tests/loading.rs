//! Catalog loading from disk.

use std::fs;

use tempfile::TempDir;
use trimline_catalog::seed::{seed_entries, SEED_CATALOG};
use trimline_catalog::{Catalog, CatalogConfig, CatalogError};
use trimline_core::CatalogProvider;

fn write_seed_files(dir: &TempDir) {
    for entry in seed_entries().unwrap() {
        let path = dir.path().join(format!("{}.json", entry.id));
        fs::write(path, serde_json::to_string_pretty(&entry).unwrap()).unwrap();
    }
}

#[tokio::test]
async fn loads_directory_in_file_name_order() {
    let dir = TempDir::new().unwrap();
    write_seed_files(&dir);
    fs::write(dir.path().join("README.txt"), "not a catalog").unwrap();

    let catalog = Catalog::load(CatalogConfig::new(dir.path())).await.unwrap();

    let ids: Vec<_> = catalog.get_all().iter().map(|v| v.id.as_str()).collect();
    assert_eq!(ids, vec!["ev3", "ev9-gt", "ray-ev"]);
}

#[tokio::test]
async fn directory_entries_match_bundled() {
    let dir = TempDir::new().unwrap();
    write_seed_files(&dir);

    let from_disk = Catalog::load(CatalogConfig::new(dir.path())).await.unwrap();
    let bundled = Catalog::load(CatalogConfig::bundled()).await.unwrap();

    for entry in bundled.get_all() {
        assert_eq!(from_disk.get_by_id(&entry.id), Some(entry));
    }
}

#[tokio::test]
async fn loads_single_file_array() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("catalog.json");
    fs::write(&path, SEED_CATALOG).unwrap();

    let catalog = Catalog::load(CatalogConfig::new(&path)).await.unwrap();

    assert_eq!(catalog.vehicles().count(), 3);
    assert_eq!(catalog.origin(), path.display().to_string());
}

#[tokio::test]
async fn missing_path_is_io_error() {
    let dir = TempDir::new().unwrap();
    let result = Catalog::load(CatalogConfig::new(dir.path().join("nope.json"))).await;

    assert!(matches!(result, Err(CatalogError::Io { .. })));
}

#[tokio::test]
async fn malformed_json_names_the_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.json");
    fs::write(&path, "{ \"id\": ").unwrap();

    match Catalog::load(CatalogConfig::new(dir.path())).await {
        Err(CatalogError::Parse { path: reported, .. }) => assert_eq!(reported, path),
        other => panic!("expected parse error, got {:?}", other),
    }
}

#[tokio::test]
async fn invalid_entry_is_rejected_unless_validation_is_off() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bare.json");
    fs::write(&path, r#"{ "id": "bare", "fullName": "Bare", "trims": [] }"#).unwrap();

    let strict = Catalog::load(CatalogConfig::new(&path)).await;
    assert!(matches!(strict, Err(CatalogError::Invalid { ref id, .. }) if id == "bare"));

    let lenient = Catalog::load(CatalogConfig::new(&path).validate(false)).await.unwrap();
    assert!(lenient.get_by_id("bare").is_some());
}

#[tokio::test]
async fn unknown_vehicle_is_not_found() {
    let catalog = Catalog::load(CatalogConfig::bundled()).await.unwrap();

    let err = catalog.vehicles().require("sorento").unwrap_err();
    assert!(matches!(err, CatalogError::NotFound(_)));
    assert_eq!(err.to_string(), "Vehicle not found: sorento");
}
