//! Application configuration model.
//!
//! Loaded from `config.toml`; every field has a default so a missing or
//! partial file is valid.

use crate::session::DownstreamPolicy;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use strum::{Display, EnumString};

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub storage: StorageConfig,
    pub images: ImageConfig,
    pub generation: GenerationConfig,
    pub wizard: WizardConfig,
}

/// How to treat a stored collection that fails to parse.
#[derive(
    Deserialize, Serialize, Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RecoveryMode {
    /// Drop the whole collection and start empty.
    #[default]
    DiscardAll,
    /// Keep every record that parses on its own.
    PerRecord,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct StorageConfig {
    /// Overrides the default sessions file location
    pub sessions_file: Option<PathBuf>,
    pub recovery: RecoveryMode,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct ImageConfig {
    /// Longest allowed side, in pixels, after recompression
    pub max_dimension: u32,
    /// JPEG quality (1-100)
    pub jpeg_quality: u8,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            max_dimension: 1024,
            jpeg_quality: 80,
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct GenerationConfig {
    pub base_url: String,
    pub text_model: String,
    pub image_model: String,
    /// Concept images requested per generation
    pub image_variants: usize,
    /// Environment variable holding the API key
    pub api_key_env: String,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            base_url: "https://generativelanguage.googleapis.com/v1beta/models".to_string(),
            text_model: "gemini-2.5-flash".to_string(),
            image_model: "gemini-2.5-flash-image".to_string(),
            image_variants: 3,
            api_key_env: "GEMINI_API_KEY".to_string(),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct WizardConfig {
    pub downstream_policy: DownstreamPolicy,
}
