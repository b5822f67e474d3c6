//! # State Module
//!
//! Application state shared by the CLI commands.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                      lib.rs run()                               │   │
//! │  │  AppConfig::load(&overrides)                                    │   │
//! │  │  CatalogState::load(&config)                                    │   │
//! │  │  SessionState::new()                                            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                              │                                          │
//! │          ┌──────────────────┼──────────────────┐                       │
//! │          ▼                  ▼                  ▼                        │
//! │  ┌──────────────┐  ┌──────────────────┐  ┌──────────────────┐          │
//! │  │ CatalogState │  │  SessionState    │  │   AppConfig      │          │
//! │  │              │  │                  │  │                  │          │
//! │  │  Catalog     │  │  Arc<Mutex<      │  │  catalog path    │          │
//! │  │  (Arc'd      │  │    Option<       │  │  export dir      │          │
//! │  │   entries)   │  │   SelectionStore │  │  log filter      │          │
//! │  │              │  │  >>>             │  │                  │          │
//! │  └──────────────┘  └──────────────────┘  └──────────────────┘          │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • CatalogState: immutable after load                                  │
//! │  • SessionState: tokio Mutex, one transition or export at a time       │
//! │  • AppConfig: read-only after startup                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod catalog;
mod config;
mod session;

pub use catalog::CatalogState;
pub use config::{AppConfig, ConfigError, ConfigOverrides, FileConfig};
pub use session::{ExportedQuote, SessionState};
