pub mod session;
pub mod wizard;

use clap::ValueEnum;
use intake_core::session::WizardStep;

/// Steps that accept a payload from the command line.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum StepArg {
    Setup,
    Round1,
    Round2,
    Round3,
}

impl From<StepArg> for WizardStep {
    fn from(step: StepArg) -> Self {
        match step {
            StepArg::Setup => WizardStep::Setup,
            StepArg::Round1 => WizardStep::Round1,
            StepArg::Round2 => WizardStep::Round2,
            StepArg::Round3 => WizardStep::Round3,
        }
    }
}
