use crate::persona::Persona;
use crate::session::Session;
use serde::Serialize;

/// Everything the concept-image generator needs from a session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConceptRequest {
    pub persona: Persona,
    /// Titles of the options selected in round 1
    pub functional_features: Vec<String>,
    /// Titles of the options selected in round 2
    pub interaction_features: Vec<String>,
    pub style_description: String,
    /// Optional reference image as a data URL
    pub reference_image: Option<String>,
}

impl ConceptRequest {
    /// Collects the request from the session's earlier rounds.
    pub fn from_session(
        session: &Session,
        style_description: impl Into<String>,
        reference_image: Option<String>,
    ) -> Self {
        let titles = |round: &crate::round::RoundData| {
            round
                .selected_options()
                .into_iter()
                .map(|option| option.title.clone())
                .collect::<Vec<_>>()
        };

        Self {
            persona: session.persona.clone(),
            functional_features: titles(&session.round1),
            interaction_features: titles(&session.round2),
            style_description: style_description.into(),
            reference_image,
        }
    }

    /// Generation needs a style description.
    pub fn has_style_description(&self) -> bool {
        !self.style_description.trim().is_empty()
    }
}
