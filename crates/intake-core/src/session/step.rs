//! Wizard step identifiers.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// A screen of the wizard.
///
/// `Setup` through `Round3` are the data-collection steps shown in the
/// progress indicator. `Completion` is the thank-you screen shown right
/// after round 3; `Summary` is the report screen reached when reopening a
/// finished session.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum WizardStep {
    Setup,
    Round1,
    Round2,
    Round3,
    Completion,
    Summary,
}

impl WizardStep {
    /// The data-collection steps, in order.
    pub const COLLECTION: [WizardStep; 4] = [
        WizardStep::Setup,
        WizardStep::Round1,
        WizardStep::Round2,
        WizardStep::Round3,
    ];

    /// The step that follows a successful completion of this one.
    pub fn next(self) -> Option<WizardStep> {
        match self {
            WizardStep::Setup => Some(WizardStep::Round1),
            WizardStep::Round1 => Some(WizardStep::Round2),
            WizardStep::Round2 => Some(WizardStep::Round3),
            WizardStep::Round3 => Some(WizardStep::Completion),
            WizardStep::Completion | WizardStep::Summary => None,
        }
    }
}
