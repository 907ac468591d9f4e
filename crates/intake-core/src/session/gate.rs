//! Step gate and resume predicate.
//!
//! Both are pure functions of the session. The gate is re-evaluated on every
//! navigation attempt because earlier answers can change; the resume
//! predicate runs once when an existing session is reopened.

use super::model::Session;
use super::step::WizardStep;

/// Whether `step` can be shown for `session`.
///
/// - `setup` is always reachable
/// - `round1` needs a family structure on the persona
/// - `round2` needs a round 1 selection
/// - `round3` needs a round 2 selection
/// - anything else is never reachable by navigation
pub fn can_navigate_to(session: &Session, step: WizardStep) -> bool {
    match step {
        WizardStep::Setup => true,
        WizardStep::Round1 => session.persona.has_family_structure(),
        WizardStep::Round2 => session.round1.has_selection(),
        WizardStep::Round3 => session.round2.has_selection(),
        WizardStep::Completion | WizardStep::Summary => false,
    }
}

/// All collection steps currently reachable, in order.
pub fn reachable_steps(session: &Session) -> Vec<WizardStep> {
    WizardStep::COLLECTION
        .into_iter()
        .filter(|step| can_navigate_to(session, *step))
        .collect()
}

/// The step to show when reopening `session`.
///
/// Walks forward from setup and stops at the first step whose completion
/// proxy is not satisfied; a fully satisfied session opens on the summary.
pub fn resume_step(session: &Session) -> WizardStep {
    if !session.persona.has_family_structure() {
        WizardStep::Setup
    } else if !session.round1.has_selection() {
        WizardStep::Round1
    } else if !session.round2.has_selection() {
        WizardStep::Round2
    } else if !session.round3.has_selected_image() {
        WizardStep::Round3
    } else {
        WizardStep::Summary
    }
}
