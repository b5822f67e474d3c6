//! # Commands Module
//!
//! Everything the `trimline` binary can do.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (exports)
//! ├── catalog.rs  ◄─── list, show, check
//! ├── quote.rs    ◄─── quote, import
//! └── config.rs   ◄─── config
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  $ trimline check ev3 --trim Air --package 스타일                       │
//! │         │                                                               │
//! │         │ (clap derive)                                                 │
//! │         ▼                                                               │
//! │  Command::Check { vehicle, trim, package, exterior }                     │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  async fn check_availability(                                           │
//! │      catalog: &CatalogState,   ◄── loaded once in run()                 │
//! │      session: &SessionState,   ◄── serialized store                     │
//! │      request: &CheckRequest,                                            │
//! │  ) -> Result<AvailabilityReport, ApiError>                              │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  --json ? serde_json : render_availability()                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each command takes only the state it needs and returns a serializable
//! DTO; printing happens in `run()`.

pub mod catalog;
pub mod config;
pub mod quote;
