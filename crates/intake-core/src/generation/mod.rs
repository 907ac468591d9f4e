//! Content generation service contract.
//!
//! The wizard consumes three best-effort capabilities from an external
//! generative service. Implementations report failures as `Err`; callers
//! substitute the data in [`fallback`] instead of surfacing them.

pub mod fallback;
mod request;

pub use request::ConceptRequest;

use crate::error::Result;
use crate::persona::Persona;
use crate::round::{ConfigOption, RoundKind};
use crate::session::Session;
use async_trait::async_trait;

/// Number of candidates requested per option batch.
pub const CONFIG_BATCH_SIZE: usize = 6;

/// An external service producing suggestions, concept images and summaries.
///
/// Every call is a single attempt; there is no retry policy.
#[async_trait]
pub trait ContentGenerator: Send + Sync {
    /// Produces a batch of configuration candidates for a round.
    async fn generate_configs(
        &self,
        kind: RoundKind,
        persona: &Persona,
        keywords: &[String],
    ) -> Result<Vec<ConfigOption>>;

    /// Produces concept image references (data URLs or plain URLs).
    async fn generate_concepts(&self, request: &ConceptRequest) -> Result<Vec<String>>;

    /// Produces a narrative summary of a completed session.
    async fn summarize(&self, session: &Session) -> Result<String>;
}

/// Builds the identifier of the `index`-th option of a batch generated at
/// `millis` (Unix epoch milliseconds).
pub fn option_id(kind: RoundKind, millis: i64, index: usize) -> String {
    format!("{}-{}-{}", kind.id_prefix(), millis, index)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_option_id_format() {
        assert_eq!(option_id(RoundKind::Functional, 1700, 2), "func-1700-2");
        assert_eq!(option_id(RoundKind::Interaction, 5, 0), "inter-5-0");
    }
}
