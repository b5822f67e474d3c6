//! # Seed Catalog Writer
//!
//! Writes the bundled seed catalog out as one editable JSON file per vehicle.
//!
//! ## Usage
//! ```bash
//! # Write to ./catalog (default)
//! cargo run -p trimline-catalog --bin seed
//!
//! # Choose the output directory
//! cargo run -p trimline-catalog --bin seed -- --out ./my-catalog
//!
//! # Overwrite files that already exist
//! cargo run -p trimline-catalog --bin seed -- --force
//! ```
//!
//! The output directory can then be passed to `trimline --catalog <dir>`.

use std::env;
use std::path::PathBuf;

use trimline_catalog::seed::seed_entries;
use trimline_catalog::{Catalog, CatalogConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut out_dir = PathBuf::from("./catalog");
    let mut force = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--out" | "-o" => {
                if i + 1 < args.len() {
                    out_dir = PathBuf::from(&args[i + 1]);
                    i += 1;
                }
            }
            "--force" | "-f" => force = true,
            "--help" | "-h" => {
                println!("Trimline Seed Catalog Writer");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -o, --out <DIR>    Output directory (default: ./catalog)");
                println!("  -f, --force        Overwrite existing files");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Trimline Seed Catalog Writer");
    println!("===============================");
    println!("Output: {}", out_dir.display());
    println!();

    let entries = seed_entries()?;
    println!("✓ Parsed {} bundled vehicles", entries.len());

    tokio::fs::create_dir_all(&out_dir).await?;

    let start = std::time::Instant::now();
    let mut written = 0;
    let mut skipped = 0;

    for entry in &entries {
        let file = out_dir.join(format!("{}.json", entry.id));

        if !force && tokio::fs::try_exists(&file).await? {
            println!("⚠ {} exists, skipping (use --force to overwrite)", file.display());
            skipped += 1;
            continue;
        }

        let json = serde_json::to_string_pretty(entry)?;
        tokio::fs::write(&file, json).await?;
        println!("  {} → {}", entry.full_name, file.display());
        written += 1;
    }

    // Read the directory back the way the CLI will
    let catalog = Catalog::load(CatalogConfig::new(&out_dir)).await?;

    println!();
    println!("✓ Wrote {} files, skipped {}", written, skipped);
    println!("✓ Directory loads as a catalog of {} vehicles", catalog.vehicles().count());
    println!("  Time: {:.2?}", start.elapsed());

    Ok(())
}
