//! # Trimline Entry Point
//!
//! ## Application Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        trimline                                         │
//! │                                                                         │
//! │  main.rs ────► parse arguments, run, map errors to the exit code        │
//! │                                                                         │
//! │  lib.rs ─────► config, logging, catalog, command dispatch               │
//! │                                                                         │
//! │  commands/ ──► list, show, check, quote, import, config                 │
//! │                                                                         │
//! │  state/ ─────► CatalogState, SessionState, AppConfig                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::process::ExitCode;

use clap::Parser;
use trimline_cli::Cli;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let json = cli.global.json;

    match trimline_cli::run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if json {
                match serde_json::to_string_pretty(&err) {
                    Ok(out) => println!("{}", out),
                    Err(_) => eprintln!("error: {}", err),
                }
            } else {
                eprintln!("error: {}", err);
            }
            ExitCode::FAILURE
        }
    }
}
