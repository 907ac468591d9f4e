//! In-memory session repository.
//!
//! Keeps the serialized collection in memory, so every save/load goes
//! through the same JSON encoding as the file-backed repository.

use crate::json_session_repository::parse_sessions;
use async_trait::async_trait;
use intake_core::config::RecoveryMode;
use intake_core::session::{Session, SessionRepository};
use intake_core::Result;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Default)]
pub struct InMemorySessionRepository {
    raw: Mutex<Option<String>>,
    recovery: RecoveryMode,
    saves: AtomicUsize,
}

impl InMemorySessionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the repository with an already-serialized payload.
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            raw: Mutex::new(Some(raw.into())),
            ..Self::default()
        }
    }

    pub fn with_recovery(mut self, recovery: RecoveryMode) -> Self {
        self.recovery = recovery;
        self
    }

    /// Current serialized payload, if anything was stored.
    pub fn raw(&self) -> Option<String> {
        self.raw.lock().ok().and_then(|raw| raw.clone())
    }

    /// Number of successful `save_all` calls.
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn load_all(&self) -> Result<Vec<Session>> {
        match self.raw() {
            Some(raw) => parse_sessions(&raw, self.recovery),
            None => Ok(Vec::new()),
        }
    }

    async fn save_all(&self, sessions: &[Session]) -> Result<()> {
        let raw = serde_json::to_string(sessions)?;
        let mut slot = self
            .raw
            .lock()
            .map_err(|e| intake_core::IntakeError::internal(format!("Lock poisoned: {}", e)))?;
        *slot = Some(raw);
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_save_then_load() {
        let repo = InMemorySessionRepository::new();
        assert!(repo.load_all().await.unwrap().is_empty());

        let sessions = vec![Session::new(), Session::new()];
        repo.save_all(&sessions).await.unwrap();

        assert_eq!(repo.load_all().await.unwrap(), sessions);
        assert_eq!(repo.save_count(), 1);
    }

    #[tokio::test]
    async fn test_seeded_garbage_is_error() {
        let repo = InMemorySessionRepository::with_raw("[{\"oops\": true}]");
        assert!(repo.load_all().await.is_err());
    }
}
