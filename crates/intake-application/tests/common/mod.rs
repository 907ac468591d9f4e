#![allow(dead_code)]

use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use intake_application::IntakeApp;
use intake_application::wizard::WizardController;
use intake_core::config::AppConfig;
use intake_core::generation::{ConceptRequest, ContentGenerator, option_id};
use intake_core::persona::Persona;
use intake_core::report::ReportExporter;
use intake_core::round::{ConfigOption, Round3Data, RoundData, RoundKind};
use intake_core::session::Session;
use intake_core::{IntakeError, Result};
use intake_infrastructure::InMemorySessionRepository;
use std::io::Cursor;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::Notify;

pub const SCRIPTED_SUMMARY: &str = "该用户重视家庭出行的安全感。";

/// Answers every request with fixed data.
pub struct ScriptedGenerator {
    images: Vec<String>,
    pub summaries: AtomicUsize,
}

impl ScriptedGenerator {
    pub fn new(images: Vec<String>) -> Self {
        Self {
            images,
            summaries: AtomicUsize::new(0),
        }
    }
}

pub fn scripted_options(kind: RoundKind) -> Vec<ConfigOption> {
    (0..6)
        .map(|i| ConfigOption::new(option_id(kind, 1, i), format!("选项{}", i), "说明"))
        .collect()
}

#[async_trait]
impl ContentGenerator for ScriptedGenerator {
    async fn generate_configs(
        &self,
        kind: RoundKind,
        _persona: &Persona,
        _keywords: &[String],
    ) -> Result<Vec<ConfigOption>> {
        Ok(scripted_options(kind))
    }

    async fn generate_concepts(&self, _request: &ConceptRequest) -> Result<Vec<String>> {
        Ok(self.images.clone())
    }

    async fn summarize(&self, _session: &Session) -> Result<String> {
        self.summaries.fetch_add(1, Ordering::SeqCst);
        Ok(SCRIPTED_SUMMARY.to_string())
    }
}

/// Fails every request.
pub struct FailingGenerator;

#[async_trait]
impl ContentGenerator for FailingGenerator {
    async fn generate_configs(
        &self,
        _kind: RoundKind,
        _persona: &Persona,
        _keywords: &[String],
    ) -> Result<Vec<ConfigOption>> {
        Err(IntakeError::generation("service unavailable"))
    }

    async fn generate_concepts(&self, _request: &ConceptRequest) -> Result<Vec<String>> {
        Err(IntakeError::generation("service unavailable"))
    }

    async fn summarize(&self, _session: &Session) -> Result<String> {
        Err(IntakeError::generation("service unavailable"))
    }
}

/// Holds option and summary requests until released.
pub struct GatedGenerator {
    pub started: Arc<Notify>,
    pub release: Arc<Notify>,
}

impl GatedGenerator {
    pub fn new() -> Self {
        Self {
            started: Arc::new(Notify::new()),
            release: Arc::new(Notify::new()),
        }
    }

    async fn wait(&self) {
        self.started.notify_one();
        self.release.notified().await;
    }
}

#[async_trait]
impl ContentGenerator for GatedGenerator {
    async fn generate_configs(
        &self,
        kind: RoundKind,
        _persona: &Persona,
        _keywords: &[String],
    ) -> Result<Vec<ConfigOption>> {
        self.wait().await;
        Ok(scripted_options(kind))
    }

    async fn generate_concepts(&self, _request: &ConceptRequest) -> Result<Vec<String>> {
        Ok(vec![png_data_url(32, 32)])
    }

    async fn summarize(&self, _session: &Session) -> Result<String> {
        self.wait().await;
        Ok(SCRIPTED_SUMMARY.to_string())
    }
}

pub async fn app_with(
    generator: Arc<dyn ContentGenerator>,
    repository: Arc<InMemorySessionRepository>,
) -> IntakeApp {
    app_with_config(AppConfig::default(), generator, repository, None).await
}

pub async fn app_with_config(
    config: AppConfig,
    generator: Arc<dyn ContentGenerator>,
    repository: Arc<InMemorySessionRepository>,
    exporter: Option<Arc<dyn ReportExporter>>,
) -> IntakeApp {
    IntakeApp::assemble(config, repository, generator, exporter).await
}

pub fn complete_persona() -> Persona {
    Persona {
        age_group: "30-40".to_string(),
        family_structure: "年轻小家庭2+1儿童（大致年龄30-40）".to_string(),
        travel_frequency: "中（每周有一定次数的出行）".to_string(),
        ad_knowledge: "了解".to_string(),
        ad_acceptance: "愿意尝试".to_string(),
        emotional_needs: vec!["安心".to_string()],
        social_needs: vec!["家庭陪伴".to_string()],
    }
}

/// Picks the first option and adds a comment.
pub fn choose_first(mut draft: RoundData) -> RoundData {
    let first = draft.generated_configs[0].id.clone();
    assert!(draft.toggle_selection(&first));
    draft.comment = "很实用".to_string();
    draft
}

/// Drives a fresh wizard through setup, round 1 and round 2.
pub async fn advance_to_round3(app: &IntakeApp) -> WizardController {
    let wizard = app.new_wizard().await.unwrap();
    wizard.complete_setup(complete_persona()).await.unwrap();

    let keywords = vec!["安全".to_string(), "舒适".to_string()];
    let draft = wizard
        .generate_options(RoundKind::Functional, RoundData::default(), keywords)
        .await
        .unwrap();
    wizard.complete_round1(choose_first(draft)).await.unwrap();

    let keywords = vec!["温暖".to_string()];
    let draft = wizard
        .generate_options(RoundKind::Interaction, RoundData::default(), keywords)
        .await
        .unwrap();
    wizard.complete_round2(choose_first(draft)).await.unwrap();
    wizard
}

pub fn round3_payload(style_image: Option<String>, images: Vec<String>) -> Round3Data {
    Round3Data {
        style_description: "温暖的木质内饰".to_string(),
        style_image,
        generated_images: images,
        selected_image_index: Some(0),
        ..Round3Data::default()
    }
}

/// A noisy PNG data URL, large enough to exercise downscaling.
pub fn png_data_url(width: u32, height: u32) -> String {
    let mut seed: u32 = width.wrapping_mul(31).wrapping_add(height);
    let img = RgbImage::from_fn(width, height, |_, _| {
        seed = seed.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
        let [r, g, b, _] = seed.to_le_bytes();
        Rgb([r, g, b])
    });
    let mut bytes = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(img)
        .write_to(&mut bytes, ImageFormat::Png)
        .unwrap();
    format!("data:image/png;base64,{}", BASE64.encode(bytes.get_ref()))
}

pub fn data_url_dimensions(data_url: &str) -> (u32, u32) {
    intake_infrastructure::image_processing::data_url_dimensions(data_url).unwrap()
}
