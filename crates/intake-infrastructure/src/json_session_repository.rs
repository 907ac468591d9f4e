//! File-backed session repository.
//!
//! The whole collection is stored as one JSON array under a single key of a
//! [`LocalStore`]. Reads and writes run on the blocking pool.

use crate::storage::LocalStore;
use async_trait::async_trait;
use intake_core::config::RecoveryMode;
use intake_core::session::{Session, SessionRepository};
use intake_core::{IntakeError, Result};
use std::path::PathBuf;
use std::sync::Arc;

/// Key under which the session collection is stored.
pub const SESSIONS_KEY: &str = "intake_sessions";

/// A [`SessionRepository`] persisting to a JSON file on disk.
#[derive(Clone)]
pub struct JsonSessionRepository {
    store: Arc<LocalStore>,
    recovery: RecoveryMode,
}

impl JsonSessionRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            store: Arc::new(LocalStore::new(path)),
            recovery: RecoveryMode::default(),
        }
    }

    /// Sets how a partly malformed collection is treated on load.
    pub fn with_recovery(mut self, recovery: RecoveryMode) -> Self {
        self.recovery = recovery;
        self
    }

    async fn read_raw(&self) -> Result<Option<String>> {
        let store = Arc::clone(&self.store);
        tokio::task::spawn_blocking(move || store.get(SESSIONS_KEY))
            .await
            .map_err(|e| IntakeError::internal(format!("Storage task failed: {}", e)))?
            .map_err(IntakeError::from)
    }
}

/// Parses a stored collection according to `recovery`.
///
/// `DiscardAll` fails on any malformed record. `PerRecord` keeps the records
/// that parse and logs the rest, but still fails when the payload is not an
/// array at all.
pub(crate) fn parse_sessions(raw: &str, recovery: RecoveryMode) -> Result<Vec<Session>> {
    match recovery {
        RecoveryMode::DiscardAll => Ok(serde_json::from_str(raw)?),
        RecoveryMode::PerRecord => {
            let records: Vec<serde_json::Value> = serde_json::from_str(raw)?;
            let total = records.len();
            let sessions: Vec<Session> = records
                .into_iter()
                .enumerate()
                .filter_map(|(index, record)| match serde_json::from_value(record) {
                    Ok(session) => Some(session),
                    Err(e) => {
                        tracing::warn!("Skipping malformed session record #{}: {}", index, e);
                        None
                    }
                })
                .collect();
            if sessions.len() < total {
                tracing::warn!(
                    "Recovered {} of {} stored sessions",
                    sessions.len(),
                    total
                );
            }
            Ok(sessions)
        }
    }
}

#[async_trait]
impl SessionRepository for JsonSessionRepository {
    async fn load_all(&self) -> Result<Vec<Session>> {
        match self.read_raw().await? {
            Some(raw) => parse_sessions(&raw, self.recovery),
            None => Ok(Vec::new()),
        }
    }

    async fn save_all(&self, sessions: &[Session]) -> Result<()> {
        let raw = serde_json::to_string(sessions)?;
        let store = Arc::clone(&self.store);
        tokio::task::spawn_blocking(move || store.set(SESSIONS_KEY, raw))
            .await
            .map_err(|e| IntakeError::internal(format!("Storage task failed: {}", e)))?
            .map_err(IntakeError::from)
    }
}
