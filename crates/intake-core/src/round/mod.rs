//! Round domain module.
//!
//! Rounds are the themed data-collection stages between persona setup and
//! the final summary.
//!
//! # Module Structure
//!
//! - `model`: Option-selection rounds (`ConfigOption`, `RoundData`, `RoundKind`)
//! - `concept`: The visual concept round (`Round3Data`, `Evaluation`)

mod concept;
mod model;

// Re-export public API
pub use concept::{Evaluation, EvaluationAspect, EvaluationCategory, Round3Data};
pub use model::{ConfigOption, RoundData, RoundKind};
