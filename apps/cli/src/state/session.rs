//! # Session State
//!
//! Holds the selection store for the vehicle being configured.
//!
//! ## Thread Safety
//! The store is wrapped in `Arc<tokio::sync::Mutex<T>>` because:
//! 1. Transitions, imports and exports all touch the same selection
//! 2. Only one of them may run at a time
//! 3. Export holds the lock across the file write so the file matches the
//!    selection it was built from
//!
//! ## Session Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Session Operations                                   │
//! │                                                                         │
//! │  Command step             Session call            Store change          │
//! │  ────────────             ────────────            ────────────          │
//! │                                                                         │
//! │  quote ev3 ──────────────► open(entry) ─────────► new SelectionStore    │
//! │                                                                         │
//! │  --import q.json ────────► import_file() ───────► selection replaced    │
//! │                                                                         │
//! │  --trim GT-Line ─────────► dispatch() ──────────► trim cascade          │
//! │                                                                         │
//! │  --option 패키지옵션=… ──► dispatch() ──────────► option toggled on     │
//! │                                                                         │
//! │  --export ───────────────► export_to() ─────────► (read only) + file    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use tracing::{debug, info};
use trimline_core::quote::quote_file_name;
use trimline_core::store::EXPORT_NOTICE;
use trimline_core::{QuoteDocument, SelectionEvent, SelectionStore, VehicleEntry};
use uuid::Uuid;

use crate::error::ApiError;

/// A quote written to disk.
#[derive(Debug, Clone)]
pub struct ExportedQuote {
    pub path: PathBuf,
    pub document: QuoteDocument,
    pub notice: &'static str,
}

/// The configuration session.
///
/// ## Invariants
/// - At most one vehicle is loaded at a time
/// - Every mutation goes through the store, so a failed step leaves the
///   previous selection in place
#[derive(Debug, Clone)]
pub struct SessionState {
    id: Uuid,
    store: Arc<Mutex<Option<SelectionStore>>>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionState {
    /// Creates an empty session.
    pub fn new() -> Self {
        SessionState {
            id: Uuid::new_v4(),
            store: Arc::new(Mutex::new(None)),
        }
    }

    /// Session id, for log correlation.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Loads a vehicle, replacing whatever was loaded before.
    pub async fn open(&self, entry: Arc<VehicleEntry>) -> Result<(), ApiError> {
        let vehicle = entry.id.clone();
        let store = SelectionStore::new(entry)?;

        *self.store.lock().await = Some(store);
        info!(session = %self.id, %vehicle, "Vehicle loaded");
        Ok(())
    }

    /// Applies one transition.
    pub async fn dispatch(&self, event: SelectionEvent) -> Result<(), ApiError> {
        let mut guard = self.store.lock().await;
        let store = guard.as_mut().ok_or_else(no_vehicle)?;
        store.dispatch(event)?;
        Ok(())
    }

    /// Turns an option on, refusing it unless the resolver lets the user
    /// toggle it under the current trim and selection.
    ///
    /// Hidden, included and disabled options are validation errors and the
    /// selection is left as it was.
    pub async fn select_option(&self, category: &str, name: &str) -> Result<(), ApiError> {
        let mut guard = self.store.lock().await;
        let store = guard.as_mut().ok_or_else(no_vehicle)?;

        let trim = store.selection().trim.clone();
        let availability = store.resolver().option_availability(name, &trim);
        if !availability.is_selectable() {
            debug!(session = %self.id, option = name, %trim, status = availability.label(), "Option refused");
            return Err(ApiError::validation(format!(
                "Option '{}' is {} for trim {}",
                name,
                availability.label(),
                trim
            )));
        }

        store.dispatch(SelectionEvent::toggle(category, name, true))?;
        Ok(())
    }

    /// Resets to the vehicle's initial selection.
    pub async fn reset(&self) -> Result<&'static str, ApiError> {
        let mut guard = self.store.lock().await;
        let store = guard.as_mut().ok_or_else(no_vehicle)?;
        Ok(store.reset())
    }

    /// Runs `f` against the store while holding the lock.
    pub async fn read<R>(&self, f: impl FnOnce(&SelectionStore) -> R) -> Result<R, ApiError> {
        let guard = self.store.lock().await;
        let store = guard.as_ref().ok_or_else(no_vehicle)?;
        Ok(f(store))
    }

    /// Replaces the selection with a quote document read from disk.
    pub async fn import_file(&self, path: &Path) -> Result<&'static str, ApiError> {
        let text = tokio::fs::read_to_string(path).await?;
        let notice = self.import_text(&text).await?;

        debug!(session = %self.id, path = %path.display(), "Quote imported");
        Ok(notice)
    }

    /// Replaces the selection with a quote document.
    pub async fn import_text(&self, text: &str) -> Result<&'static str, ApiError> {
        let mut guard = self.store.lock().await;
        let store = guard.as_mut().ok_or_else(no_vehicle)?;
        Ok(store.import_quote(text)?)
    }

    /// Writes the current selection as `quote_<name>_<date>.json` in `dir`.
    pub async fn export_to(&self, dir: &Path, now: DateTime<Utc>) -> Result<ExportedQuote, ApiError> {
        let guard = self.store.lock().await;
        let store = guard.as_ref().ok_or_else(no_vehicle)?;

        let document = store.export_quote_at(now).into_result()?;
        let json = document.to_json_pretty()?;
        let path = dir.join(quote_file_name(&store.entry().full_name, now.date_naive()));

        tokio::fs::create_dir_all(dir).await?;
        tokio::fs::write(&path, json).await?;

        info!(session = %self.id, path = %path.display(), total = %document.price_breakdown.total_after_discount, "Quote exported");
        Ok(ExportedQuote {
            path,
            document,
            notice: EXPORT_NOTICE,
        })
    }
}

fn no_vehicle() -> ApiError {
    ApiError::selection("No vehicle loaded in this session")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use trimline_catalog::seed::seed_entries;
    use trimline_core::store::{IMPORT_NOTICE, RESET_NOTICE};

    fn entry(id: &str) -> Arc<VehicleEntry> {
        let entry = seed_entries().unwrap().into_iter().find(|v| v.id == id).unwrap();
        Arc::new(entry)
    }

    #[tokio::test]
    async fn test_requires_open_vehicle() {
        let session = SessionState::new();
        let err = session
            .dispatch(SelectionEvent::ChangeTrim("Air".into()))
            .await
            .unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::SelectionError);
    }

    #[tokio::test]
    async fn test_failed_dispatch_keeps_selection() {
        let session = SessionState::new();
        session.open(entry("ev3")).await.unwrap();
        session
            .dispatch(SelectionEvent::ChangeTrim("Earth".into()))
            .await
            .unwrap();

        assert!(session
            .dispatch(SelectionEvent::ChangeWheel("22인치 휠".into()))
            .await
            .is_err());

        let trim = session.read(|s| s.selection().trim.clone()).await.unwrap();
        assert_eq!(trim, "Earth");
        assert_eq!(session.reset().await.unwrap(), RESET_NOTICE);
        let trim = session.read(|s| s.selection().trim.clone()).await.unwrap();
        assert_eq!(trim, "Air");
    }

    #[tokio::test]
    async fn test_select_option_refuses_locked_options() {
        let session = SessionState::new();
        session.open(entry("ev3")).await.unwrap();

        let err = session.select_option("선택옵션", "와이드 선루프").await.unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::ValidationError);
        assert!(err.message.contains("disabled"));
        let picked = session
            .read(|s| s.selection().category("선택옵션").to_vec())
            .await
            .unwrap();
        assert!(picked.is_empty());

        session
            .dispatch(SelectionEvent::ChangeTrim("GT-Line".into()))
            .await
            .unwrap();
        session.select_option("선택옵션", "와이드 선루프").await.unwrap();
        let picked = session
            .read(|s| s.selection().category("선택옵션").to_vec())
            .await
            .unwrap();
        assert_eq!(picked, vec!["와이드 선루프"]);
    }

    #[tokio::test]
    async fn test_export_then_import_file() {
        let dir = tempfile::tempdir().unwrap();
        let now = Utc.with_ymd_and_hms(2026, 10, 16, 9, 30, 0).unwrap();

        let session = SessionState::new();
        session.open(entry("ev3")).await.unwrap();
        session
            .dispatch(SelectionEvent::ChangeTrim("GT-Line".into()))
            .await
            .unwrap();
        session
            .dispatch(SelectionEvent::toggle("선택옵션", "와이드 선루프", true))
            .await
            .unwrap();

        let exported = session.export_to(dir.path(), now).await.unwrap();
        assert_eq!(exported.notice, EXPORT_NOTICE);
        assert_eq!(
            exported.path.file_name().unwrap().to_str().unwrap(),
            "quote_The Kia EV3_2026-10-16.json"
        );
        assert_eq!(exported.document.timestamp, "2026-10-16T09:30:00.000Z");

        let before = session.read(|s| s.selection().clone()).await.unwrap();
        session.reset().await.unwrap();
        assert_eq!(session.import_file(&exported.path).await.unwrap(), IMPORT_NOTICE);
        let after = session.read(|s| s.selection().clone()).await.unwrap();
        assert_eq!(after.trim, before.trim);
        assert_eq!(after.wheels, before.wheels);
        assert_eq!(after.category("선택옵션"), before.category("선택옵션"));
    }

    #[tokio::test]
    async fn test_missing_import_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let session = SessionState::new();
        session.open(entry("ray-ev")).await.unwrap();

        let err = session.import_file(&dir.path().join("none.json")).await.unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::IoError);
    }
}
