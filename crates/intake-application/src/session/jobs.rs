use std::collections::HashMap;
use std::sync::Mutex;
use tokio_util::sync::CancellationToken;

/// Cancellation scopes for background work, one per session.
///
/// Jobs receive a child of the session's token, so cancelling the session
/// cancels every job started for it.
#[derive(Default)]
pub struct JobRegistry {
    scopes: Mutex<HashMap<String, CancellationToken>>,
}

impl JobRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a token for a new job bound to `session_id`.
    pub fn token_for(&self, session_id: &str) -> CancellationToken {
        match self.scopes.lock() {
            Ok(mut scopes) => scopes
                .entry(session_id.to_string())
                .or_default()
                .child_token(),
            // A poisoned registry cannot track the job; hand out a detached token
            Err(_) => CancellationToken::new(),
        }
    }

    /// Cancels every job bound to `session_id`. Returns whether a scope existed.
    pub fn cancel(&self, session_id: &str) -> bool {
        let scope = self
            .scopes
            .lock()
            .ok()
            .and_then(|mut scopes| scopes.remove(session_id));
        match scope {
            Some(token) => {
                token.cancel();
                true
            }
            None => false,
        }
    }

    /// Cancels everything, e.g. on shutdown.
    pub fn cancel_all(&self) {
        if let Ok(mut scopes) = self.scopes.lock() {
            for (_, token) in scopes.drain() {
                token.cancel();
            }
        }
    }
}
