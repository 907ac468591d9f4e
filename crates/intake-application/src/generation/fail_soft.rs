//! Converts generation failures into fallback data.

use intake_core::generation::fallback::{
    SUMMARY_FAILURE_MESSAGE, fallback_configs, fallback_images,
};
use intake_core::generation::{ConceptRequest, ContentGenerator};
use intake_core::persona::Persona;
use intake_core::round::{ConfigOption, RoundKind};
use intake_core::session::Session;
use std::sync::Arc;

/// Wraps a [`ContentGenerator`] so that callers never see an error.
///
/// - option batches fall back to the fixed "service busy" batch
/// - concept images fall back to placeholder URLs
/// - summaries fall back to a fixed failure message
#[derive(Clone)]
pub struct FailSoftGenerator {
    inner: Arc<dyn ContentGenerator>,
}

impl FailSoftGenerator {
    pub fn new(inner: Arc<dyn ContentGenerator>) -> Self {
        Self { inner }
    }

    pub async fn configs(
        &self,
        kind: RoundKind,
        persona: &Persona,
        keywords: &[String],
    ) -> Vec<ConfigOption> {
        match self.inner.generate_configs(kind, persona, keywords).await {
            Ok(options) if !options.is_empty() => options,
            Ok(_) => {
                tracing::warn!("Generator returned no {} options, using fallback", kind);
                fallback_configs()
            }
            Err(e) => {
                tracing::warn!("{} option generation failed, using fallback: {}", kind, e);
                fallback_configs()
            }
        }
    }

    pub async fn concepts(&self, request: &ConceptRequest) -> Vec<String> {
        match self.inner.generate_concepts(request).await {
            Ok(images) if !images.is_empty() => images,
            Ok(_) => {
                tracing::warn!("Generator returned no concept images, using placeholders");
                fallback_images()
            }
            Err(e) => {
                tracing::warn!("Concept generation failed, using placeholders: {}", e);
                fallback_images()
            }
        }
    }

    pub async fn summary(&self, session: &Session) -> String {
        match self.inner.summarize(session).await {
            Ok(summary) if !summary.trim().is_empty() => summary,
            Ok(_) => {
                tracing::warn!("Generator returned an empty summary for {}", session.id);
                SUMMARY_FAILURE_MESSAGE.to_string()
            }
            Err(e) => {
                tracing::warn!("Summary generation failed for {}: {}", session.id, e);
                SUMMARY_FAILURE_MESSAGE.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::UnavailableGenerator;
    use intake_core::generation::fallback::{FALLBACK_CONFIG_TITLE, is_fallback};

    #[tokio::test]
    async fn test_failures_become_fallbacks() {
        let generator = FailSoftGenerator::new(Arc::new(UnavailableGenerator::new("offline")));

        let options = generator
            .configs(RoundKind::Functional, &Persona::default(), &[])
            .await;
        assert_eq!(options.len(), 6);
        assert!(options.iter().all(|o| o.title == FALLBACK_CONFIG_TITLE && is_fallback(o)));

        let session = Session::new();
        let request = ConceptRequest::from_session(&session, "", None);
        assert_eq!(generator.concepts(&request).await, fallback_images());
        assert_eq!(generator.summary(&session).await, SUMMARY_FAILURE_MESSAGE);
    }
}
