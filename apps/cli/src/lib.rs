//! # Trimline CLI Library
//!
//! Command-line front end for the Trimline configurator.
//!
//! ## Module Organization
//! ```text
//! trimline_cli/
//! ├── lib.rs          ◄─── You are here (arguments, logging, dispatch)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── catalog.rs  ◄─── Loaded catalog wrapper
//! │   ├── session.rs  ◄─── Selection store behind a Mutex
//! │   └── config.rs   ◄─── Flags > env > config.toml > defaults
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   ├── catalog.rs  ◄─── list / show / check
//! │   ├── quote.rs    ◄─── quote / import
//! │   └── config.rs   ◄─── config
//! └── error.rs        ◄─── API error type for commands
//! ```
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Application Startup                               │
//! │                                                                         │
//! │  1. Parse Arguments ──────────────────────────────────────────────────► │
//! │     • clap derive, global --catalog/--export-dir/--config/--log/--json  │
//! │                                                                         │
//! │  2. Resolve Configuration ────────────────────────────────────────────► │
//! │     • flags > TRIMLINE_* env > config.toml > defaults                   │
//! │                                                                         │
//! │  3. Initialize Logging ───────────────────────────────────────────────► │
//! │     • tracing-subscriber with env filter, to stderr                     │
//! │     • RUST_LOG > config log > "info,trimline=debug"                     │
//! │                                                                         │
//! │  4. Load Catalog ─────────────────────────────────────────────────────► │
//! │     • file, directory of *.json, or the bundled seed                    │
//! │                                                                         │
//! │  5. Run Command ──────────────────────────────────────────────────────► │
//! │     • print JSON (--json) or text to stdout                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod commands;
pub mod error;
pub mod state;

use std::path::PathBuf;

use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use commands::catalog::{self as catalog_cmd, CheckRequest};
use commands::quote::{self as quote_cmd, parse_option_arg, OptionArg, QuoteRequest};
use error::ApiError;
use state::{AppConfig, CatalogState, ConfigOverrides, SessionState};

/// Default log filter when neither `RUST_LOG` nor a configured filter is set.
pub const DEFAULT_LOG_FILTER: &str = "info,trimline=debug";

// =============================================================================
// Arguments
// =============================================================================

/// Vehicle configuration rules, pricing and quote documents.
#[derive(Debug, Parser)]
#[command(name = "trimline", version, about)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Args)]
pub struct GlobalArgs {
    /// Catalog file or directory (default: bundled seed catalog)
    #[arg(long, global = true, value_name = "PATH")]
    pub catalog: Option<PathBuf>,

    /// Directory for exported quotes
    #[arg(long, global = true, value_name = "DIR")]
    pub export_dir: Option<PathBuf>,

    /// Config file (default: platform config dir)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log filter, e.g. "debug" or "trimline_core=trace"
    #[arg(long, global = true, value_name = "FILTER")]
    pub log: Option<String>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,
}

impl GlobalArgs {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            config: self.config.clone(),
            catalog: self.catalog.clone(),
            export_dir: self.export_dir.clone(),
            log: self.log.clone(),
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List catalog vehicles
    List {
        /// Filter by name or id
        query: Option<String>,

        #[arg(long, default_value_t = 50)]
        limit: usize,
    },

    /// Show every choice a vehicle offers
    Show {
        vehicle: String,
    },

    /// Report option, wheel and interior availability under a trim
    Check {
        vehicle: String,

        #[arg(long)]
        trim: String,

        /// Selected package option (repeatable)
        #[arg(long = "package", value_name = "NAME")]
        packages: Vec<String>,

        #[arg(long)]
        exterior: Option<String>,
    },

    /// Configure a vehicle and print (or export) the quote
    Quote {
        vehicle: String,

        /// Start from a saved quote document
        #[arg(long, value_name = "FILE")]
        import: Option<PathBuf>,

        #[arg(long)]
        trim: Option<String>,

        #[arg(long)]
        exterior: Option<String>,

        #[arg(long)]
        interior: Option<String>,

        #[arg(long)]
        wheel: Option<String>,

        /// 적용 or 미적용
        #[arg(long, value_name = "VALUE")]
        tax_benefit: Option<String>,

        /// <category>=<name> or <name> (repeatable)
        #[arg(long = "option", value_name = "OPTION", value_parser = parse_option_arg)]
        options: Vec<OptionArg>,

        /// Write quote_<name>_<date>.json to the export directory
        #[arg(long)]
        export: bool,
    },

    /// Load a quote document and print its prices
    Import {
        file: PathBuf,

        /// Vehicle id when the document has no carId
        #[arg(long)]
        vehicle: Option<String>,
    },

    /// Print the resolved configuration
    Config,
}

// =============================================================================
// Run
// =============================================================================

/// Runs one CLI invocation.
pub async fn run(cli: Cli) -> Result<(), ApiError> {
    let config = AppConfig::load(&cli.global.overrides())?;
    init_tracing(config.log.as_deref());

    let json = cli.global.json;
    if let Command::Config = cli.command {
        let resolved = commands::config::get_config(&config);
        return emit(json, &resolved, || commands::config::render_config(&resolved));
    }

    let catalog = CatalogState::load(&config).await?;
    let session = SessionState::new();
    info!(session = %session.id(), origin = %catalog.inner().origin(), "Session started");

    match cli.command {
        Command::List { query, limit } => {
            let vehicles = catalog_cmd::list_vehicles(&catalog, query.as_deref(), limit);
            emit(json, &vehicles, || catalog_cmd::render_list(&vehicles, &config))
        }
        Command::Show { vehicle } => {
            let detail = catalog_cmd::show_vehicle(&catalog, &vehicle)?;
            emit(json, &detail, || catalog_cmd::render_detail(&detail, &config))
        }
        Command::Check {
            vehicle,
            trim,
            packages,
            exterior,
        } => {
            let request = CheckRequest {
                vehicle,
                trim,
                exterior,
                packages,
            };
            let report = catalog_cmd::check_availability(&catalog, &session, &request).await?;
            emit(json, &report, || catalog_cmd::render_availability(&report))
        }
        Command::Quote {
            vehicle,
            import,
            trim,
            exterior,
            interior,
            wheel,
            tax_benefit,
            options,
            export,
        } => {
            let request = QuoteRequest {
                vehicle,
                import,
                trim,
                exterior,
                interior,
                wheel,
                tax_benefit,
                options,
                export,
            };
            let summary =
                quote_cmd::configure_quote(&catalog, &session, &config, &request, Utc::now()).await?;
            emit(json, &summary, || quote_cmd::render_quote(&summary, &config))
        }
        Command::Import { file, vehicle } => {
            let summary =
                quote_cmd::import_quote(&catalog, &session, &file, vehicle.as_deref(), Utc::now())
                    .await?;
            emit(json, &summary, || quote_cmd::render_quote(&summary, &config))
        }
        Command::Config => Ok(()),
    }
}

/// Prints a command result to stdout.
fn emit<T: Serialize>(json: bool, value: &T, text: impl FnOnce() -> String) -> Result<(), ApiError> {
    if json {
        let out = serde_json::to_string_pretty(value)
            .map_err(|e| ApiError::internal(format!("Failed to serialize output: {}", e)))?;
        println!("{}", out);
    } else {
        println!("{}", text());
    }
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=trimline_core=trace` - Show trace for the rules engine only
/// - `--log` / `TRIMLINE_LOG` / config `log` when `RUST_LOG` is unset
/// - Default: `info,trimline=debug`
///
/// Logs go to stderr so stdout stays clean for `--json`.
pub fn init_tracing(configured: Option<&str>) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(configured.unwrap_or(DEFAULT_LOG_FILTER)))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    // A second init (tests) keeps the first subscriber
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_quote_command() {
        let cli = Cli::try_parse_from([
            "trimline",
            "quote",
            "ev3",
            "--trim",
            "GT-Line",
            "--option",
            "패키지옵션=스타일",
            "--option",
            "와이드 선루프",
            "--tax-benefit",
            "적용",
            "--export",
            "--json",
        ])
        .unwrap();

        assert!(cli.global.json);
        match cli.command {
            Command::Quote {
                vehicle,
                trim,
                options,
                tax_benefit,
                export,
                ..
            } => {
                assert_eq!(vehicle, "ev3");
                assert_eq!(trim.as_deref(), Some("GT-Line"));
                assert_eq!(options.len(), 2);
                assert_eq!(options[0].category.as_deref(), Some("패키지옵션"));
                assert_eq!(tax_benefit.as_deref(), Some("적용"));
                assert!(export);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_parse_check_packages() {
        let cli = Cli::try_parse_from([
            "trimline", "check", "ev9-gt", "--trim", "GT", "--package", "스타일", "--package", "컴포트",
        ])
        .unwrap();

        match cli.command {
            Command::Check { packages, .. } => assert_eq!(packages, vec!["스타일", "컴포트"]),
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_bad_option_value_rejected() {
        assert!(Cli::try_parse_from(["trimline", "quote", "ev3", "--option", "패키지옵션="]).is_err());
        assert!(Cli::try_parse_from(["trimline", "check", "ev3"]).is_err());
    }

    #[test]
    fn test_global_flags_become_overrides() {
        let cli = Cli::try_parse_from(["trimline", "list", "--catalog", "./catalog", "--log", "warn"]).unwrap();
        let overrides = cli.global.overrides();
        assert_eq!(overrides.catalog, Some(PathBuf::from("./catalog")));
        assert_eq!(overrides.log.as_deref(), Some("warn"));
        assert!(overrides.config.is_none());
    }
}
