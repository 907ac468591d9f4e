//! Application wiring.
//!
//! Builds the store, generator, recompressor and exporter from an
//! [`AppConfig`] and hands out wizard controllers.

use crate::generation::{FailSoftGenerator, UnavailableGenerator};
use crate::session::SessionStore;
use crate::wizard::{WizardController, WizardServices};
use intake_core::Result;
use intake_core::config::AppConfig;
use intake_core::generation::ContentGenerator;
use intake_core::report::ReportExporter;
use intake_core::session::SessionRepository;
use intake_infrastructure::paths::IntakePaths;
use intake_infrastructure::{ImageRecompressor, JsonSessionRepository, MarkdownReportExporter};
use intake_interaction::GeminiContentGenerator;
use std::sync::Arc;

pub struct IntakeApp {
    config: AppConfig,
    services: WizardServices,
}

impl IntakeApp {
    /// Wires the application against the local file system and the
    /// configured generation backend.
    ///
    /// A missing API key is not fatal: generation then always serves
    /// fallback data.
    pub async fn bootstrap(config: AppConfig) -> Result<Self> {
        let sessions_file = match &config.storage.sessions_file {
            Some(path) => path.clone(),
            None => IntakePaths::storage_file()?,
        };
        tracing::debug!("Using session storage at {}", sessions_file.display());
        let repository: Arc<dyn SessionRepository> = Arc::new(
            JsonSessionRepository::new(sessions_file).with_recovery(config.storage.recovery),
        );

        let generator: Arc<dyn ContentGenerator> =
            match GeminiContentGenerator::from_config(&config.generation) {
                Ok(generator) => Arc::new(generator),
                Err(e) => {
                    tracing::warn!("Generation disabled, fallback data will be used: {}", e);
                    Arc::new(UnavailableGenerator::new(e.to_string()))
                }
            };

        let exporter: Arc<dyn ReportExporter> =
            Arc::new(MarkdownReportExporter::new(IntakePaths::reports_dir()?));

        Ok(Self::assemble(config, repository, generator, Some(exporter)).await)
    }

    /// Wires the application from explicit collaborators.
    pub async fn assemble(
        config: AppConfig,
        repository: Arc<dyn SessionRepository>,
        generator: Arc<dyn ContentGenerator>,
        exporter: Option<Arc<dyn ReportExporter>>,
    ) -> Self {
        let store = Arc::new(SessionStore::open(repository).await);
        let services = WizardServices {
            store,
            generator: FailSoftGenerator::new(generator),
            recompressor: ImageRecompressor::from_config(&config.images),
            exporter,
            policy: config.wizard.downstream_policy,
        };
        Self { config, services }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn store(&self) -> &Arc<SessionStore> {
        &self.services.store
    }

    pub fn services(&self) -> &WizardServices {
        &self.services
    }

    /// Starts a wizard on a brand-new session.
    pub async fn new_wizard(&self) -> Result<WizardController> {
        WizardController::create(self.services.clone()).await
    }

    /// Reopens an existing session.
    pub async fn resume(&self, session_id: &str) -> Result<WizardController> {
        WizardController::resume(self.services.clone(), session_id).await
    }
}
