use serde::{Deserialize, Serialize};

use super::step::WizardStep;
use crate::persona::Persona;
use crate::round::{Round3Data, RoundData};

/// Payload submitted when the researcher finishes a collection step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "step", content = "data", rename_all = "lowercase")]
pub enum StepCompletion {
    Setup(Persona),
    Round1(RoundData),
    Round2(RoundData),
    Round3(Round3Data),
}

impl StepCompletion {
    /// The step this payload completes.
    pub fn step(&self) -> WizardStep {
        match self {
            StepCompletion::Setup(_) => WizardStep::Setup,
            StepCompletion::Round1(_) => WizardStep::Round1,
            StepCompletion::Round2(_) => WizardStep::Round2,
            StepCompletion::Round3(_) => WizardStep::Round3,
        }
    }

    /// Whether the payload satisfies the step's proceed rule.
    pub fn is_ready(&self) -> bool {
        match self {
            StepCompletion::Setup(persona) => persona.is_complete(),
            StepCompletion::Round1(data) | StepCompletion::Round2(data) => data.can_proceed(),
            StepCompletion::Round3(data) => data.can_finish(),
        }
    }
}
