//! File-backed storage primitives.

pub mod atomic_json;
pub mod local_store;

pub use atomic_json::{AtomicJsonError, AtomicJsonFile};
pub use local_store::LocalStore;
