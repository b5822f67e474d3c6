//! End-to-end runs of the `trimline` command handler.

use clap::Parser;
use trimline_catalog::seed::SEED_CATALOG;
use trimline_cli::error::ErrorCode;
use trimline_cli::{run, Cli};

fn cli(args: &[&str]) -> Cli {
    Cli::try_parse_from(std::iter::once("trimline").chain(args.iter().copied())).unwrap()
}

#[tokio::test]
async fn quote_export_writes_into_configured_dir() {
    let dir = tempfile::tempdir().unwrap();
    let export_dir = dir.path().join("quotes");
    let config_path = dir.path().join("config.toml");
    std::fs::write(
        &config_path,
        format!("export_dir = {:?}\n", export_dir.display().to_string()),
    )
    .unwrap();

    run(cli(&[
        "quote",
        "ev3",
        "--trim",
        "GT-Line",
        "--option",
        "선택옵션=와이드 선루프",
        "--export",
        "--config",
        config_path.to_str().unwrap(),
    ]))
    .await
    .unwrap();

    let written: Vec<_> = std::fs::read_dir(&export_dir).unwrap().collect();
    assert_eq!(written.len(), 1);

    let path = written[0].as_ref().unwrap().path();
    let name = path.file_name().unwrap().to_string_lossy().to_string();
    assert!(name.starts_with("quote_The Kia EV3_"));

    let document: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(document["carId"], "ev3");
    assert_eq!(document["selectedOptions"]["trim"]["name"], "GT-Line");
    assert!(document["priceBredown"]["totalAfterDiscount"].is_i64());

    run(cli(&["import", path.to_str().unwrap(), "--json"])).await.unwrap();
}

#[tokio::test]
async fn catalog_flag_reads_a_file() {
    let dir = tempfile::tempdir().unwrap();
    let catalog = dir.path().join("catalog.json");
    std::fs::write(&catalog, SEED_CATALOG).unwrap();

    run(cli(&["list", "--catalog", catalog.to_str().unwrap()])).await.unwrap();
    run(cli(&["show", "ray-ev", "--catalog", catalog.to_str().unwrap(), "--json"]))
        .await
        .unwrap();
}

#[tokio::test]
async fn errors_carry_codes() {
    let err = run(cli(&["show", "ev4"])).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::NotFound);

    let err = run(cli(&["check", "ev3", "--trim", "Wind"])).await.unwrap_err();
    assert_eq!(err.code, ErrorCode::SelectionError);

    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("none.json");
    let err = run(cli(&["list", "--catalog", missing.to_str().unwrap()]))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::CatalogError);

    let err = run(cli(&["config", "--config", missing.to_str().unwrap()]))
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ValidationError);
}
