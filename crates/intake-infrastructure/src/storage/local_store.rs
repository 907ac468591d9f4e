//! A small keyed string store persisted as one JSON file.
//!
//! Each key holds an opaque string (typically serialized JSON). Writes go
//! through [`AtomicJsonFile::update`], so the file is never half-written and
//! concurrent writers serialize on the file lock.

use super::atomic_json::{AtomicJsonError, AtomicJsonFile};
use std::collections::BTreeMap;
use std::path::PathBuf;

type Entries = BTreeMap<String, String>;

pub struct LocalStore {
    file: AtomicJsonFile<Entries>,
}

impl LocalStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            file: AtomicJsonFile::new(path),
        }
    }

    /// Reads the value stored under `key`.
    ///
    /// Returns `Ok(None)` when the file or the key is absent, and an error
    /// when the file itself cannot be parsed.
    pub fn get(&self, key: &str) -> Result<Option<String>, AtomicJsonError> {
        Ok(self
            .file
            .load()?
            .and_then(|mut entries| entries.remove(key)))
    }

    /// Stores `value` under `key`, leaving other keys untouched.
    ///
    /// A file that cannot be parsed is logged and rewritten from scratch,
    /// so a corrupted store does not block later writes.
    pub fn set(&self, key: &str, value: String) -> Result<(), AtomicJsonError> {
        self.file.update(Entries::new(), |entries| {
            entries.insert(key.to_string(), value);
            Ok(())
        })
    }
}
