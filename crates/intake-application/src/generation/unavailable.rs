use async_trait::async_trait;
use intake_core::generation::{ConceptRequest, ContentGenerator};
use intake_core::persona::Persona;
use intake_core::round::{ConfigOption, RoundKind};
use intake_core::session::Session;
use intake_core::{IntakeError, Result};

/// Stand-in used when no generation backend is configured.
///
/// Every call fails, so the fail-soft layer serves fallback data.
pub struct UnavailableGenerator {
    reason: String,
}

impl UnavailableGenerator {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    fn error(&self) -> IntakeError {
        IntakeError::generation(format!("Generation backend unavailable: {}", self.reason))
    }
}

#[async_trait]
impl ContentGenerator for UnavailableGenerator {
    async fn generate_configs(
        &self,
        _kind: RoundKind,
        _persona: &Persona,
        _keywords: &[String],
    ) -> Result<Vec<ConfigOption>> {
        Err(self.error())
    }

    async fn generate_concepts(&self, _request: &ConceptRequest) -> Result<Vec<String>> {
        Err(self.error())
    }

    async fn summarize(&self, _session: &Session) -> Result<String> {
        Err(self.error())
    }
}
