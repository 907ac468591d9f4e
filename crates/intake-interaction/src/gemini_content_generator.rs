//! [`ContentGenerator`] backed by the Gemini REST API.

use crate::gemini_api_agent::{GeminiApiAgent, InlineImage};
use crate::prompts;
use async_trait::async_trait;
use chrono::Utc;
use futures::future::join_all;
use intake_core::config::GenerationConfig;
use intake_core::generation::{ConceptRequest, ContentGenerator, option_id};
use intake_core::persona::Persona;
use intake_core::round::{ConfigOption, RoundKind};
use intake_core::session::Session;
use intake_core::{IntakeError, Result};
use serde::Deserialize;

const CONCEPT_ASPECT_RATIO: &str = "16:9";

#[derive(Deserialize)]
struct ConfigCandidate {
    title: String,
    #[serde(default)]
    description: String,
}

pub struct GeminiContentGenerator {
    text_agent: GeminiApiAgent,
    image_agent: GeminiApiAgent,
    image_variants: usize,
}

impl GeminiContentGenerator {
    pub fn new(text_agent: GeminiApiAgent, image_agent: GeminiApiAgent) -> Self {
        Self {
            text_agent,
            image_agent,
            image_variants: GenerationConfig::default().image_variants,
        }
    }

    /// Builds both agents from configuration; the API key is read from the
    /// configured environment variable.
    pub fn from_config(config: &GenerationConfig) -> Result<Self> {
        let text_agent = GeminiApiAgent::try_from_config(config)?;
        let image_agent = text_agent.clone().with_model(config.image_model.clone());
        Ok(Self::new(text_agent, image_agent).with_image_variants(config.image_variants))
    }

    pub fn with_image_variants(mut self, variants: usize) -> Self {
        self.image_variants = variants.max(1);
        self
    }
}

/// Parses the model's JSON answer into options with fresh identifiers.
fn parse_config_candidates(kind: RoundKind, raw: &str, millis: i64) -> Result<Vec<ConfigOption>> {
    let candidates: Vec<ConfigCandidate> = serde_json::from_str(strip_code_fence(raw))?;
    if candidates.is_empty() {
        return Err(IntakeError::generation("Model returned no options"));
    }

    Ok(candidates
        .into_iter()
        .enumerate()
        .map(|(index, candidate)| {
            ConfigOption::new(
                option_id(kind, millis, index),
                candidate.title,
                candidate.description,
            )
        })
        .collect())
}

fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|rest| rest.strip_suffix("```"))
        .map(str::trim)
        .unwrap_or(trimmed)
}

#[async_trait]
impl ContentGenerator for GeminiContentGenerator {
    async fn generate_configs(
        &self,
        kind: RoundKind,
        persona: &Persona,
        keywords: &[String],
    ) -> Result<Vec<ConfigOption>> {
        let prompt = prompts::config_prompt(kind, persona, keywords)?;
        let raw = self.text_agent.generate_text(&prompt, true).await?;
        parse_config_candidates(kind, &raw, Utc::now().timestamp_millis())
    }

    async fn generate_concepts(&self, request: &ConceptRequest) -> Result<Vec<String>> {
        let prompt = prompts::concept_prompt(request)?;
        let reference = request
            .reference_image
            .as_deref()
            .map(InlineImage::from_data_url);

        let attempts = (0..self.image_variants).map(|_| {
            self.image_agent
                .generate_image(&prompt, reference.as_ref(), CONCEPT_ASPECT_RATIO)
        });
        let images: Vec<String> = join_all(attempts)
            .await
            .into_iter()
            .filter_map(|result| match result {
                Ok(image) => Some(image),
                Err(e) => {
                    tracing::warn!("Concept image variant failed: {}", e);
                    None
                }
            })
            .collect();

        if images.is_empty() {
            return Err(IntakeError::generation("No concept images were generated"));
        }
        Ok(images)
    }

    async fn summarize(&self, session: &Session) -> Result<String> {
        let prompt = prompts::summary_prompt(session)?;
        let summary = self.text_agent.generate_text(&prompt, false).await?;
        Ok(summary.trim().to_string())
    }
}
