//! Domain layer for the Intake research wizard.
//!
//! Holds the session aggregate, the navigation rules between wizard steps and
//! the contracts of the external collaborators (content generation, report
//! export). Nothing in this crate performs I/O.

pub mod catalog;
pub mod config;
pub mod error;
pub mod generation;
pub mod persona;
pub mod report;
pub mod round;
pub mod session;

// Re-export common error type
pub use error::{IntakeError, Result};
