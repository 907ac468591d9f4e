//! Persona domain module.
//!
//! The persona is the structured description of the target user segment that
//! the setup step collects before any round can start.

mod model;

// Re-export public API
pub use model::Persona;
pub(crate) use model::toggle;
