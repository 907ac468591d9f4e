use crate::round::{EvaluationCategory, RoundData};
use crate::session::{Session, SessionStatus};
use chrono::{DateTime, Utc};
use serde::Serialize;
use strum::IntoEnumIterator;

/// A selected option as shown in the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportOption {
    pub title: String,
    pub description: String,
}

/// One evaluation category with its notes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EvaluationRow {
    pub category: String,
    pub liked: String,
    pub disliked: String,
}

/// Render-ready view of a session for the summary screen and exports.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionReport {
    pub session_id: String,
    pub short_id: String,
    pub name: String,
    pub status: SessionStatus,
    pub updated_at: DateTime<Utc>,
    pub family_structure: String,
    pub travel_frequency: String,
    pub ad_knowledge: String,
    pub ad_acceptance: String,
    pub emotional_needs: Vec<String>,
    pub social_needs: Vec<String>,
    pub functional_choices: Vec<ReportOption>,
    pub functional_comment: String,
    pub interaction_choices: Vec<ReportOption>,
    pub interaction_comment: String,
    pub style_description: String,
    pub final_image: Option<String>,
    pub evaluation: Vec<EvaluationRow>,
    pub summary: Option<String>,
}

impl SessionReport {
    pub fn from_session(session: &Session) -> Self {
        let persona = &session.persona;
        let evaluation = EvaluationCategory::iter()
            .map(|category| {
                let aspect = session.round3.evaluation.aspect(category);
                EvaluationRow {
                    category: category.label().to_string(),
                    liked: aspect.liked.clone(),
                    disliked: aspect.disliked.clone(),
                }
            })
            .collect();

        Self {
            session_id: session.id.clone(),
            short_id: session.short_id(),
            name: session.name.clone(),
            status: session.status,
            updated_at: session.updated_at,
            family_structure: persona.family_structure.clone(),
            travel_frequency: persona.travel_frequency.clone(),
            ad_knowledge: persona.ad_knowledge.clone(),
            ad_acceptance: persona.ad_acceptance.clone(),
            emotional_needs: persona.emotional_needs.clone(),
            social_needs: persona.social_needs.clone(),
            functional_choices: choices(&session.round1),
            functional_comment: session.round1.comment.clone(),
            interaction_choices: choices(&session.round2),
            interaction_comment: session.round2.comment.clone(),
            style_description: session.round3.style_description.clone(),
            final_image: session.round3.final_image().map(str::to_string),
            evaluation,
            summary: session.ai_summary.clone().filter(|s| !s.trim().is_empty()),
        }
    }
}

fn choices(round: &RoundData) -> Vec<ReportOption> {
    round
        .selected_options()
        .into_iter()
        .map(|option| ReportOption {
            title: option.title.clone(),
            description: option.description.clone(),
        })
        .collect()
}
