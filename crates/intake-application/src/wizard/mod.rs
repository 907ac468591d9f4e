//! The research wizard.
//!
//! # Module Structure
//!
//! - `controller`: Step state machine over one session
//! - `single_flight`: At most one outstanding request per step
//! - `summary_job`: Background summary generation after round 3

mod controller;
mod single_flight;
pub mod summary_job;

pub use controller::{Round3Completion, WizardController, WizardServices};
pub use single_flight::{FlightGuard, SingleFlight};
pub use summary_job::SummaryOutcome;
