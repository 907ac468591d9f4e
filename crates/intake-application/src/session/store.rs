//! The session store.
//!
//! `SessionStore` owns the canonical, most-recent-first list of sessions.
//! Every mutation rewrites the whole collection through the repository and
//! is announced to subscribers as a [`StoreEvent`].

use super::jobs::JobRegistry;
use intake_core::session::{Session, SessionRepository};
use intake_core::{IntakeError, Result};
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::{RwLock, broadcast};
use tokio_util::sync::CancellationToken;

const EVENT_CAPACITY: usize = 64;

/// Change notifications for store observers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    Created(String),
    Updated(String),
    Deleted(String),
    /// The whole collection was replaced from storage.
    Reloaded,
}

/// Single source of truth for sessions.
///
/// # Thread Safety
///
/// The list is guarded by a `tokio::sync::RwLock`; writers hold the lock
/// across the repository save, so saves land in mutation order. A mutation
/// is applied to a copy and replaces the list only once it is saved.
pub struct SessionStore {
    sessions: RwLock<Vec<Session>>,
    repository: Arc<dyn SessionRepository>,
    /// Ids deleted during this process lifetime; never written to again
    tombstones: RwLock<HashSet<String>>,
    jobs: JobRegistry,
    events: broadcast::Sender<StoreEvent>,
}

impl SessionStore {
    /// Opens the store and loads the persisted collection.
    ///
    /// Load failures are logged and leave the store empty.
    pub async fn open(repository: Arc<dyn SessionRepository>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        let store = Self {
            sessions: RwLock::new(Vec::new()),
            repository,
            tombstones: RwLock::new(HashSet::new()),
            jobs: JobRegistry::new(),
            events,
        };
        store.reload().await;
        store
    }

    /// Replaces the in-memory list with the persisted collection.
    ///
    /// # Returns
    ///
    /// The number of sessions loaded. A malformed collection yields zero.
    pub async fn reload(&self) -> usize {
        let loaded = match self.repository.load_all().await {
            Ok(sessions) => sessions,
            Err(e) => {
                tracing::error!("Failed to load sessions, starting empty: {}", e);
                Vec::new()
            }
        };
        let count = loaded.len();
        *self.sessions.write().await = loaded;
        tracing::info!("Loaded {} session(s)", count);
        self.notify(StoreEvent::Reloaded);
        count
    }

    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.events.subscribe()
    }

    /// Snapshot of all sessions, most recent first.
    pub async fn list(&self) -> Vec<Session> {
        self.sessions.read().await.clone()
    }

    pub async fn get(&self, id: &str) -> Option<Session> {
        self.sessions
            .read()
            .await
            .iter()
            .find(|session| session.id == id)
            .cloned()
    }

    /// Like [`SessionStore::get`], but a missing session is an error.
    pub async fn require(&self, id: &str) -> Result<Session> {
        self.get(id)
            .await
            .ok_or_else(|| IntakeError::not_found("Session", id))
    }

    /// Creates an empty session at the front of the list.
    pub async fn create(&self) -> Result<Session> {
        let session = Session::new();
        {
            let mut sessions = self.sessions.write().await;
            let mut next = sessions.clone();
            next.insert(0, session.clone());
            self.commit(&mut sessions, next).await?;
        }
        tracing::info!("Created session {}", session.id);
        self.notify(StoreEvent::Created(session.id.clone()));
        Ok(session)
    }

    /// Replaces the stored session with the same id.
    ///
    /// # Returns
    ///
    /// - `Ok(true)`: The session was replaced and persisted
    /// - `Ok(false)`: No such session (or it was deleted); nothing written
    pub async fn update(&self, session: Session) -> Result<bool> {
        if self.is_deleted(&session.id).await {
            tracing::debug!("Ignoring update for deleted session {}", session.id);
            return Ok(false);
        }

        let id = session.id.clone();
        {
            let mut sessions = self.sessions.write().await;
            let Some(index) = sessions.iter().position(|s| s.id == id) else {
                tracing::debug!("Ignoring update for unknown session {}", id);
                return Ok(false);
            };
            let mut next = sessions.clone();
            next[index] = session;
            self.commit(&mut sessions, next).await?;
        }
        self.notify(StoreEvent::Updated(id));
        Ok(true)
    }

    /// Applies `f` to the store's current copy of the session and persists.
    ///
    /// Unlike [`SessionStore::update`], this never overwrites fields the
    /// closure does not touch, so concurrent writers cannot roll each
    /// other back.
    ///
    /// # Returns
    ///
    /// The patched session, or `None` if it no longer exists.
    pub async fn patch<F>(&self, id: &str, f: F) -> Result<Option<Session>>
    where
        F: FnOnce(&mut Session),
    {
        if self.is_deleted(id).await {
            return Ok(None);
        }

        let patched = {
            let mut sessions = self.sessions.write().await;
            let Some(index) = sessions.iter().position(|s| s.id == id) else {
                return Ok(None);
            };
            let mut next = sessions.clone();
            f(&mut next[index]);
            let patched = next[index].clone();
            self.commit(&mut sessions, next).await?;
            patched
        };
        self.notify(StoreEvent::Updated(id.to_string()));
        Ok(Some(patched))
    }

    /// Removes a session and cancels its background jobs.
    ///
    /// Confirmation is the caller's concern. Returns whether it existed.
    pub async fn delete(&self, id: &str) -> Result<bool> {
        self.tombstones.write().await.insert(id.to_string());
        if self.jobs.cancel(id) {
            tracing::debug!("Cancelled background jobs of session {}", id);
        }

        let committed = {
            let mut sessions = self.sessions.write().await;
            let next: Vec<Session> = sessions
                .iter()
                .filter(|session| session.id != id)
                .cloned()
                .collect();
            if next.len() == sessions.len() {
                return Ok(false);
            }
            self.commit(&mut sessions, next).await
        };
        if let Err(e) = committed {
            // Still listed, so it must stay writable
            self.tombstones.write().await.remove(id);
            return Err(e);
        }
        tracing::info!("Deleted session {}", id);
        self.notify(StoreEvent::Deleted(id.to_string()));
        Ok(true)
    }

    /// Whether `id` was deleted during this store's lifetime.
    pub async fn is_deleted(&self, id: &str) -> bool {
        self.tombstones.read().await.contains(id)
    }

    /// Cancellation token for a background job working on `session_id`.
    pub fn job_token(&self, session_id: &str) -> CancellationToken {
        self.jobs.token_for(session_id)
    }

    /// Cancels the background jobs of a session that stays in the store.
    pub fn cancel_jobs(&self, session_id: &str) -> bool {
        self.jobs.cancel(session_id)
    }

    /// Cancels all background jobs.
    pub fn shutdown(&self) {
        self.jobs.cancel_all();
    }

    /// Persists `next` and only then makes it the in-memory list.
    async fn commit(&self, sessions: &mut Vec<Session>, next: Vec<Session>) -> Result<()> {
        self.repository.save_all(&next).await?;
        *sessions = next;
        Ok(())
    }

    fn notify(&self, event: StoreEvent) {
        // No subscribers is fine
        let _ = self.events.send(event);
    }
}
