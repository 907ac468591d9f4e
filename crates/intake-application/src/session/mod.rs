//! Session store and background-job bookkeeping.

mod jobs;
mod store;

pub use jobs::JobRegistry;
pub use store::{SessionStore, StoreEvent};
