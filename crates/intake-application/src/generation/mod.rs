//! Generation adapters used by the wizard.

mod fail_soft;
mod unavailable;

pub use fail_soft::FailSoftGenerator;
pub use unavailable::UnavailableGenerator;
