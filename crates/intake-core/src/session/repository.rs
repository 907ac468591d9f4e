//! Session repository trait.
//!
//! Defines the interface for session persistence operations.

use super::model::Session;
use crate::error::Result;
use async_trait::async_trait;

/// An abstract repository holding the whole session collection.
///
/// The collection is always read and written as a unit: there are no
/// partial or delta writes.
///
/// # Implementation Notes
///
/// Implementations should:
/// - Return an empty collection when nothing has been stored yet
/// - Return `Err` (not an empty collection) when stored data is malformed,
///   so that callers can decide how to recover
/// - Preserve the order of the slice passed to `save_all`
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Loads the full session collection.
    ///
    /// # Returns
    ///
    /// - `Ok(Vec<Session>)`: Stored sessions, in stored order
    /// - `Err(_)`: Storage could not be read or parsed
    async fn load_all(&self) -> Result<Vec<Session>>;

    /// Replaces the stored collection with `sessions`.
    ///
    /// # Returns
    ///
    /// - `Ok(())`: Collection persisted
    /// - `Err(_)`: Error occurred during save
    async fn save_all(&self, sessions: &[Session]) -> Result<()>;
}
