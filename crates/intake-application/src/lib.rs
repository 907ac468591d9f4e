//! Application layer for Intake.
//!
//! Coordinates the domain model, storage and generation adapters into the
//! research wizard: one owned session store, a fail-soft generation layer
//! and a per-session step state machine.

pub mod app;
pub mod generation;
pub mod session;
pub mod wizard;

pub use app::IntakeApp;
pub use generation::FailSoftGenerator;
pub use session::{SessionStore, StoreEvent};
pub use wizard::{WizardController, WizardServices};
