//! Session domain module.
//!
//! This module contains the session aggregate, the wizard steps and the
//! rules deciding which steps are reachable.
//!
//! # Module Structure
//!
//! - `model`: Root aggregate (`Session`, `SessionStatus`)
//! - `step`: Wizard steps (`WizardStep`)
//! - `gate`: Step gate and resume predicate
//! - `event`: Step-completion events (`StepCompletion`)
//! - `policy`: Downstream invalidation policy (`DownstreamPolicy`)
//! - `repository`: Repository trait for session persistence
//!
//! # Usage
//!
//! ```ignore
//! use intake_core::session::{Session, SessionRepository, WizardStep};
//! use intake_core::session::gate::{can_navigate_to, resume_step};
//! ```

mod event;
pub mod gate;
mod model;
mod policy;
mod repository;
mod step;

// Re-export public API
pub use event::StepCompletion;
pub use model::{DEFAULT_SESSION_NAME, Session, SessionStatus};
pub use policy::DownstreamPolicy;
pub use repository::SessionRepository;
pub use step::WizardStep;
