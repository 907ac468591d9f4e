//! Wizard controller.
//!
//! Drives one session through `setup → round1 → round2 → round3 →
//! completion`. Every step completion is merged into the store's copy of
//! the session and persisted before the wizard advances. Generation calls
//! go through the fail-soft generator, so the state machine only ever sees
//! data, never generation errors.

use super::single_flight::SingleFlight;
use super::summary_job::{SummaryOutcome, attach_summary, spawn_summary_job};
use crate::generation::FailSoftGenerator;
use crate::session::SessionStore;
use intake_core::generation::ConceptRequest;
use intake_core::persona::Persona;
use intake_core::report::{ExportedReport, ReportExporter, SessionReport};
use intake_core::round::{ConfigOption, Round3Data, RoundData, RoundKind};
use intake_core::session::gate::{can_navigate_to, resume_step};
use intake_core::session::{DownstreamPolicy, Session, StepCompletion, WizardStep};
use intake_core::{IntakeError, Result};
use intake_infrastructure::ImageRecompressor;
use std::sync::Arc;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

/// Collaborators shared by every controller.
#[derive(Clone)]
pub struct WizardServices {
    pub store: Arc<SessionStore>,
    pub generator: FailSoftGenerator,
    pub recompressor: ImageRecompressor,
    pub exporter: Option<Arc<dyn ReportExporter>>,
    pub policy: DownstreamPolicy,
}

/// Result of finishing round 3.
pub struct Round3Completion {
    /// The session as persisted, already `completed`
    pub session: Session,
    /// Resolves once the background summary has been handled
    pub summary_job: JoinHandle<SummaryOutcome>,
}

fn step_for(kind: RoundKind) -> WizardStep {
    match kind {
        RoundKind::Functional => WizardStep::Round1,
        RoundKind::Interaction => WizardStep::Round2,
    }
}

/// State machine for one session.
pub struct WizardController {
    session_id: String,
    current_step: RwLock<WizardStep>,
    services: WizardServices,
    flights: SingleFlight,
}

impl WizardController {
    /// Creates a new session and opens it on the setup step.
    pub async fn create(services: WizardServices) -> Result<Self> {
        let session = services.store.create().await?;
        Ok(Self::with_step(services, session.id, WizardStep::Setup))
    }

    /// Reopens an existing session on the step chosen by the resume
    /// predicate.
    pub async fn resume(services: WizardServices, session_id: &str) -> Result<Self> {
        let session = services.store.require(session_id).await?;
        let step = resume_step(&session);
        tracing::debug!("Resuming session {} at {}", session.id, step);
        Ok(Self::with_step(services, session.id, step))
    }

    fn with_step(services: WizardServices, session_id: String, step: WizardStep) -> Self {
        Self {
            session_id,
            current_step: RwLock::new(step),
            services,
            flights: SingleFlight::new(),
        }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub async fn current_step(&self) -> WizardStep {
        *self.current_step.read().await
    }

    /// Snapshot of the session as currently stored.
    pub async fn session(&self) -> Result<Session> {
        self.services.store.require(&self.session_id).await
    }

    pub async fn can_navigate_to(&self, step: WizardStep) -> Result<bool> {
        Ok(can_navigate_to(&self.session().await?, step))
    }

    /// Jumps to `step` if the gate allows it. Later data is left in place.
    pub async fn navigate_to(&self, step: WizardStep) -> Result<()> {
        self.ensure_reachable(step).await?;
        self.set_step(step).await;
        Ok(())
    }

    async fn set_step(&self, step: WizardStep) {
        let mut current = self.current_step.write().await;
        tracing::debug!("Session {}: {} -> {}", self.session_id, *current, step);
        *current = step;
    }

    async fn ensure_reachable(&self, step: WizardStep) -> Result<Session> {
        let session = self.session().await?;
        if !can_navigate_to(&session, step) {
            return Err(IntakeError::invalid_transition(self.current_step().await, step));
        }
        Ok(session)
    }

    /// Validates, merges and persists a step payload, then advances.
    ///
    /// The payload is merged into the store's current copy of the session,
    /// so a summary attached in the meantime is kept.
    async fn complete(&self, completion: StepCompletion) -> Result<Session> {
        let step = completion.step();
        self.ensure_reachable(step).await?;
        if !completion.is_ready() {
            return Err(IntakeError::validation(format!(
                "The {} step is not complete",
                step
            )));
        }

        let policy = self.services.policy;
        let mut reset = Vec::new();
        let session = self
            .services
            .store
            .patch(&self.session_id, |session| {
                reset = session.apply(completion, policy);
            })
            .await?
            .ok_or_else(|| IntakeError::not_found("Session", &self.session_id))?;

        if !reset.is_empty() {
            tracing::info!(
                "Session {}: cleared data of {:?} after {} changed",
                self.session_id,
                reset,
                step
            );
            if self.services.store.cancel_jobs(&self.session_id) {
                tracing::debug!("Cancelled pending summary of session {}", self.session_id);
            }
        }

        if let Some(next) = step.next() {
            self.set_step(next).await;
        }
        Ok(session)
    }

    pub async fn complete_setup(&self, persona: Persona) -> Result<Session> {
        self.complete(StepCompletion::Setup(persona)).await
    }

    pub async fn complete_round1(&self, data: RoundData) -> Result<Session> {
        self.complete(StepCompletion::Round1(data)).await
    }

    pub async fn complete_round2(&self, data: RoundData) -> Result<Session> {
        self.complete(StepCompletion::Round2(data)).await
    }

    /// Finishes round 3.
    ///
    /// Recompresses the reference image and every generated image
    /// concurrently, persists the completed session, moves to the
    /// completion screen and starts the background summary job.
    pub async fn complete_round3(&self, data: Round3Data) -> Result<Round3Completion> {
        self.ensure_reachable(WizardStep::Round3).await?;
        if !data.can_finish() {
            return Err(IntakeError::validation(
                "Select one of the generated images before finishing",
            ));
        }
        let _flight = self.flights.begin(WizardStep::Round3)?;

        let data = self.recompress_round3(data).await;
        let session = self.complete(StepCompletion::Round3(data)).await?;
        tracing::info!("Session {} completed", self.session_id);

        let summary_job = spawn_summary_job(
            Arc::clone(&self.services.store),
            self.services.generator.clone(),
            session.clone(),
        );

        Ok(Round3Completion {
            session,
            summary_job,
        })
    }

    async fn recompress_round3(&self, mut data: Round3Data) -> Round3Data {
        let mut inputs = Vec::with_capacity(data.generated_images.len() + 1);
        inputs.push(data.style_image.take());
        inputs.extend(data.generated_images.drain(..).map(Some));

        let mut outputs = self.services.recompressor.recompress_all(inputs).await;
        let generated = outputs.split_off(1);
        data.style_image = outputs.pop().flatten();
        data.generated_images = generated.into_iter().flatten().collect();
        data
    }

    /// Generates a fresh option batch for the round of `kind`.
    ///
    /// Returns `draft` with the new options (selections cleared) and the
    /// keywords it was generated from. Nothing is persisted until the round
    /// is completed.
    pub async fn generate_options(
        &self,
        kind: RoundKind,
        mut draft: RoundData,
        keywords: Vec<String>,
    ) -> Result<RoundData> {
        let step = step_for(kind);
        let session = self.ensure_reachable(step).await?;
        if draft.keywords_locked() && draft.selected_keywords != keywords {
            return Err(IntakeError::validation(
                "Keywords cannot change after options were generated",
            ));
        }
        let _flight = self.flights.begin(step)?;

        let options: Vec<ConfigOption> = self
            .services
            .generator
            .configs(kind, &session.persona, &keywords)
            .await;
        tracing::debug!("Generated {} {} option(s)", options.len(), kind);

        draft.selected_keywords = keywords;
        draft.replace_options(options);
        Ok(draft)
    }

    /// Generates concept images from the earlier rounds.
    pub async fn generate_concepts(
        &self,
        style_description: &str,
        reference_image: Option<String>,
    ) -> Result<Vec<String>> {
        let session = self.ensure_reachable(WizardStep::Round3).await?;
        let request = ConceptRequest::from_session(&session, style_description, reference_image);
        if !request.has_style_description() {
            return Err(IntakeError::validation(
                "Describe the interior style before generating concepts",
            ));
        }
        let _flight = self.flights.begin(WizardStep::Round3)?;

        Ok(self.services.generator.concepts(&request).await)
    }

    /// Opens the summary screen of a completed session.
    pub async fn open_summary(&self) -> Result<SessionReport> {
        let session = self.session().await?;
        if !session.is_completed() {
            return Err(IntakeError::invalid_transition(
                self.current_step().await,
                WizardStep::Summary,
            ));
        }
        self.set_step(WizardStep::Summary).await;
        Ok(SessionReport::from_session(&session))
    }

    /// Generates and attaches the summary of a completed session if it has
    /// none, and returns the summary.
    pub async fn ensure_summary(&self) -> Result<String> {
        let session = self.session().await?;
        if session.has_summary()
            && let Some(summary) = session.ai_summary
        {
            return Ok(summary);
        }
        self.regenerate_summary().await
    }

    /// Requests a new summary for a completed session and waits for it.
    pub async fn regenerate_summary(&self) -> Result<String> {
        let session = self.session().await?;
        if !session.is_completed() {
            return Err(IntakeError::validation(
                "A summary can only be generated for a completed session",
            ));
        }
        let _flight = self.flights.begin(WizardStep::Summary)?;

        let summary = self.services.generator.summary(&session).await;
        if !attach_summary(&self.services.store, &self.session_id, summary.clone()).await? {
            self.session().await?;
            return Err(IntakeError::validation(
                "The session was reopened while its summary was generated",
            ));
        }
        Ok(summary)
    }

    /// Render-ready view of the session.
    pub async fn report(&self) -> Result<SessionReport> {
        Ok(SessionReport::from_session(&self.session().await?))
    }

    /// Exports the report through the configured exporter.
    pub async fn export_report(&self) -> Result<ExportedReport> {
        let exporter = self
            .services
            .exporter
            .as_ref()
            .ok_or_else(|| IntakeError::export("No report exporter is configured"))?;
        let report = self.report().await?;
        exporter.export(&report).await
    }
}
