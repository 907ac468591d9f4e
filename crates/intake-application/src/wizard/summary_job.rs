//! Background summary generation.
//!
//! Started after round 3 is saved. The wizard does not wait for it: the job
//! asks the generator for a narrative summary and attaches the result (or
//! the fixed failure message) to the session once it resolves.

use crate::generation::FailSoftGenerator;
use crate::session::SessionStore;
use intake_core::Result;
use intake_core::session::Session;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// How a summary job ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummaryOutcome {
    /// The summary was written to the session.
    Attached,
    /// The session was deleted before the summary arrived.
    Discarded,
    /// The job was cancelled while waiting for the generator.
    Cancelled,
    /// Persisting the summary failed.
    Failed(String),
}

/// Writes `summary` to the store's current copy of the session.
///
/// Only `aiSummary` (and the update timestamp) change, so edits made while
/// the summary was being generated are kept. Returns `false` when the
/// session no longer exists or is no longer completed.
pub async fn attach_summary(store: &SessionStore, session_id: &str, summary: String) -> Result<bool> {
    let mut attached = false;
    store
        .patch(session_id, |session| {
            if session.is_completed() {
                session.ai_summary = Some(summary);
                session.touch();
                attached = true;
            }
        })
        .await?;
    Ok(attached)
}

/// Spawns the summary job for a completed session snapshot.
pub fn spawn_summary_job(
    store: Arc<SessionStore>,
    generator: FailSoftGenerator,
    session: Session,
) -> JoinHandle<SummaryOutcome> {
    let token = store.job_token(&session.id);

    tokio::spawn(async move {
        tracing::info!(target: "summary_job", "Generating summary for session {}", session.id);

        let summary = tokio::select! {
            biased;
            _ = token.cancelled() => {
                tracing::info!(target: "summary_job", "Cancelled for session {}", session.id);
                return SummaryOutcome::Cancelled;
            }
            summary = generator.summary(&session) => summary,
        };

        if store.is_deleted(&session.id).await {
            tracing::info!(
                target: "summary_job",
                "Session {} was deleted, discarding summary",
                session.id
            );
            return SummaryOutcome::Discarded;
        }

        match attach_summary(&store, &session.id, summary).await {
            Ok(true) => {
                tracing::info!(target: "summary_job", "Summary attached to session {}", session.id);
                SummaryOutcome::Attached
            }
            Ok(false) => {
                tracing::info!(
                    target: "summary_job",
                    "Session {} was removed or reopened, discarding summary",
                    session.id
                );
                SummaryOutcome::Discarded
            }
            Err(e) => {
                tracing::error!(
                    target: "summary_job",
                    "Failed to persist summary for session {}: {}",
                    session.id,
                    e
                );
                SummaryOutcome::Failed(e.to_string())
            }
        }
    })
}
