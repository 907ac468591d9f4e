//! Session domain model.
//!
//! This module contains the root aggregate of the wizard: one end-to-end
//! research run and everything collected during it.

use super::event::StepCompletion;
use super::policy::DownstreamPolicy;
use super::step::WizardStep;
use crate::persona::Persona;
use crate::round::{Round3Data, RoundData};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use strum::Display;

/// Name given to freshly created sessions.
pub const DEFAULT_SESSION_NAME: &str = "New Session";

/// Lifecycle status of a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum SessionStatus {
    #[default]
    InProgress,
    Completed,
}

/// One research run through the wizard.
///
/// A session is:
/// - created with empty sub-objects and `in-progress` status
/// - mutated step by step through [`Session::apply`]
/// - marked `completed` exactly when round 3 is applied
/// - given its AI summary later, by a background job
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Unique session identifier (UUID format)
    pub id: String,
    /// Human-readable session name
    pub name: String,
    pub status: SessionStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub persona: Persona,
    #[serde(default)]
    pub round1: RoundData,
    #[serde(default)]
    pub round2: RoundData,
    #[serde(default)]
    pub round3: Round3Data,
    /// Narrative summary attached after completion
    #[serde(default)]
    pub ai_summary: Option<String>,
}

impl Session {
    /// Creates an empty in-progress session with a fresh identifier.
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: DEFAULT_SESSION_NAME.to_string(),
            status: SessionStatus::InProgress,
            created_at: now,
            updated_at: now,
            persona: Persona::default(),
            round1: RoundData::default(),
            round2: RoundData::default(),
            round3: Round3Data::default(),
            ai_summary: None,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status == SessionStatus::Completed
    }

    /// Whether a non-empty summary is attached.
    pub fn has_summary(&self) -> bool {
        self.ai_summary
            .as_deref()
            .is_some_and(|summary| !summary.trim().is_empty())
    }

    /// Last six characters of the identifier, upper-cased, for display.
    pub fn short_id(&self) -> String {
        let start = self
            .id
            .char_indices()
            .rev()
            .nth(5)
            .map_or(0, |(index, _)| index);
        self.id[start..].to_uppercase()
    }

    /// Refreshes `updated_at`.
    ///
    /// The timestamp always moves forward, even when the clock has not
    /// advanced since the previous write.
    pub fn touch(&mut self) {
        let now = Utc::now();
        self.updated_at = if now > self.updated_at {
            now
        } else {
            self.updated_at + Duration::microseconds(1)
        };
    }

    /// Merges a step payload into the session.
    ///
    /// Each payload replaces its section wholesale. Completing round 3 marks
    /// the session completed. When `policy` is [`DownstreamPolicy::Invalidate`]
    /// and the payload differs from what was stored, later steps are reset.
    ///
    /// Returns the steps whose data was reset.
    pub fn apply(&mut self, completion: StepCompletion, policy: DownstreamPolicy) -> Vec<WizardStep> {
        let step = completion.step();
        let changed = match completion {
            StepCompletion::Setup(persona) => replace(&mut self.persona, persona),
            StepCompletion::Round1(data) => replace(&mut self.round1, data),
            StepCompletion::Round2(data) => replace(&mut self.round2, data),
            StepCompletion::Round3(data) => {
                self.round3 = data;
                self.status = SessionStatus::Completed;
                false
            }
        };

        let reset = if changed && policy == DownstreamPolicy::Invalidate {
            self.reset_after(step)
        } else {
            Vec::new()
        };

        self.touch();
        reset
    }

    /// Resets every collection step after `step` that holds data.
    fn reset_after(&mut self, step: WizardStep) -> Vec<WizardStep> {
        let mut reset = Vec::new();
        let later = WizardStep::COLLECTION
            .iter()
            .skip_while(|candidate| **candidate != step)
            .skip(1);

        for candidate in later {
            let cleared = match candidate {
                WizardStep::Round1 => clear(&mut self.round1),
                WizardStep::Round2 => clear(&mut self.round2),
                WizardStep::Round3 => clear(&mut self.round3),
                _ => false,
            };
            if cleared {
                reset.push(*candidate);
            }
        }

        if !reset.is_empty() {
            self.status = SessionStatus::InProgress;
            self.ai_summary = None;
        }
        reset
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

/// Stores `value` in `slot`, reporting whether anything changed.
fn replace<T: PartialEq>(slot: &mut T, value: T) -> bool {
    let changed = *slot != value;
    *slot = value;
    changed
}

/// Resets `slot` to its default, reporting whether it held data.
fn clear<T: Default + PartialEq>(slot: &mut T) -> bool {
    let empty = T::default();
    if *slot == empty {
        return false;
    }
    *slot = empty;
    true
}
