//! # Repository Module
//!
//! Read access to the loaded catalog.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  CLI command                                                            │
//! │       │                                                                 │
//! │       │  catalog.vehicles().require("ev3")                              │
//! │       ▼                                                                 │
//! │  VehicleRepository                                                      │
//! │  ├── get_by_id(&self, id)        (CatalogProvider)                      │
//! │  ├── get_all(&self)              (CatalogProvider)                      │
//! │  ├── require(&self, id)                                                 │
//! │  └── search(&self, query, limit)                                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Arc<Vec<VehicleEntry>> loaded once at startup                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod vehicle;
