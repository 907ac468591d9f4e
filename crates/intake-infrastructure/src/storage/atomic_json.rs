//! Atomic JSON file operations with ACID guarantees.
//!
//! Provides a thin layer for safe concurrent access to JSON data files.

use serde::{Serialize, de::DeserializeOwned};
use std::fs::{self, File, OpenOptions};
use std::io::Write as IoWrite;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

/// Errors that can occur during atomic JSON operations.
#[derive(Debug)]
pub enum AtomicJsonError {
    /// File I/O error.
    IoError(std::io::Error),
    /// JSON serialization/deserialization error.
    JsonError(serde_json::Error),
    /// File locking error.
    LockError(String),
}

impl std::fmt::Display for AtomicJsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AtomicJsonError::IoError(e) => write!(f, "I/O error: {}", e),
            AtomicJsonError::JsonError(e) => write!(f, "JSON error: {}", e),
            AtomicJsonError::LockError(e) => write!(f, "Lock error: {}", e),
        }
    }
}

impl std::error::Error for AtomicJsonError {}

impl From<std::io::Error> for AtomicJsonError {
    fn from(e: std::io::Error) -> Self {
        AtomicJsonError::IoError(e)
    }
}

impl From<serde_json::Error> for AtomicJsonError {
    fn from(e: serde_json::Error) -> Self {
        AtomicJsonError::JsonError(e)
    }
}

impl From<AtomicJsonError> for intake_core::IntakeError {
    fn from(e: AtomicJsonError) -> Self {
        match e {
            AtomicJsonError::IoError(e) => e.into(),
            AtomicJsonError::JsonError(e) => e.into(),
            AtomicJsonError::LockError(message) => intake_core::IntakeError::io(message),
        }
    }
}

/// A handle to an atomic JSON file.
///
/// Provides:
/// - **Atomicity**: Updates are all-or-nothing via tmp file + atomic rename
/// - **Consistency**: JSON validation on load/save
/// - **Isolation**: File locking prevents concurrent modifications
/// - **Durability**: Explicit fsync before rename
pub struct AtomicJsonFile<T> {
    path: PathBuf,
    _phantom: PhantomData<T>,
}

impl<T> AtomicJsonFile<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Creates a new atomic JSON file handle.
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _phantom: PhantomData,
        }
    }

    /// Loads the JSON file and deserializes it.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(T))`: Successfully loaded and deserialized
    /// - `Ok(None)`: File doesn't exist or is empty
    /// - `Err`: Failed to read or parse the file
    pub fn load(&self) -> Result<Option<T>, AtomicJsonError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path)?;

        if content.trim().is_empty() {
            return Ok(None);
        }

        let data: T = serde_json::from_str(&content)?;
        Ok(Some(data))
    }

    /// Saves data to the JSON file atomically.
    pub fn save(&self, data: &T) -> Result<(), AtomicJsonError> {
        if let Some(parent) = self.path.parent()
            && !parent.exists()
        {
            fs::create_dir_all(parent)?;
        }

        let json_string = serde_json::to_string_pretty(data)?;

        let tmp_path = self.get_temp_path()?;
        let mut tmp_file = File::create(&tmp_path)?;
        tmp_file.write_all(json_string.as_bytes())?;

        tmp_file.sync_all()?;
        drop(tmp_file);

        fs::rename(&tmp_path, &self.path)?;

        Ok(())
    }

    /// Performs a transactional read-modify-write under an exclusive lock.
    ///
    /// `f` receives the current data, or `default_value` when the file does
    /// not exist or cannot be parsed. If it returns `Ok`, the data is written
    /// back atomically, replacing an unparseable file.
    pub fn update<F, R>(&self, default_value: T, f: F) -> Result<R, AtomicJsonError>
    where
        F: FnOnce(&mut T) -> Result<R, AtomicJsonError>,
    {
        let _lock = self.acquire_lock()?;

        let mut data = match self.load() {
            Ok(data) => data.unwrap_or(default_value),
            Err(AtomicJsonError::JsonError(e)) => {
                tracing::error!(
                    "Discarding unparseable {}: {}",
                    self.path.display(),
                    e
                );
                default_value
            }
            Err(e) => return Err(e),
        };
        let result = f(&mut data)?;
        self.save(&data)?;

        Ok(result)
    }

    fn get_temp_path(&self) -> Result<PathBuf, AtomicJsonError> {
        let invalid = |message: &str| {
            AtomicJsonError::IoError(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                message.to_string(),
            ))
        };
        let parent = self
            .path
            .parent()
            .ok_or_else(|| invalid("Path has no parent directory"))?;
        let file_name = self
            .path
            .file_name()
            .ok_or_else(|| invalid("Path has no file name"))?;

        let tmp_name = format!(".{}.tmp", file_name.to_string_lossy());
        Ok(parent.join(tmp_name))
    }

    fn acquire_lock(&self) -> Result<FileLock, AtomicJsonError> {
        FileLock::acquire(&self.path)
    }
}

/// A file lock guard that releases the lock when dropped.
struct FileLock {
    #[allow(dead_code)]
    file: File,
    lock_path: PathBuf,
}

impl FileLock {
    fn acquire(path: &Path) -> Result<Self, AtomicJsonError> {
        let lock_path = path.with_extension("lock");

        if let Some(parent) = lock_path.parent()
            && !parent.exists()
        {
            fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)?;

        #[cfg(unix)]
        {
            use fs2::FileExt;
            file.lock_exclusive()
                .map_err(|e| AtomicJsonError::LockError(format!("Failed to acquire lock: {}", e)))?;
        }

        Ok(FileLock { file, lock_path })
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        // Best effort; the lock itself is released with the handle
        let _ = fs::remove_file(&self.lock_path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Counter {
        name: String,
        count: u32,
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let file = AtomicJsonFile::<Counter>::new(temp_dir.path().join("data.json"));

        file.save(&Counter {
            name: "test".to_string(),
            count: 42,
        })
        .unwrap();

        let loaded = file.load().unwrap().unwrap();
        assert_eq!(loaded.count, 42);
    }

    #[test]
    fn test_load_nonexistent_and_empty() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("data.json");
        let file = AtomicJsonFile::<Counter>::new(path.clone());
        assert!(file.load().unwrap().is_none());

        fs::write(&path, "   \n").unwrap();
        assert!(file.load().unwrap().is_none());
    }

    #[test]
    fn test_load_malformed_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("data.json");
        fs::write(&path, "{not json").unwrap();

        let file = AtomicJsonFile::<Counter>::new(path);
        assert!(matches!(file.load(), Err(AtomicJsonError::JsonError(_))));
    }

    #[test]
    fn test_update_creates_and_modifies() {
        let temp_dir = TempDir::new().unwrap();
        let file = AtomicJsonFile::<Counter>::new(temp_dir.path().join("nested/data.json"));
        let default = Counter {
            name: "default".to_string(),
            count: 0,
        };

        let after = file
            .update(default.clone(), |c| {
                c.count += 10;
                Ok(c.count)
            })
            .unwrap();
        assert_eq!(after, 10);

        file.update(default, |c| {
            c.count += 5;
            Ok(())
        })
        .unwrap();
        assert_eq!(file.load().unwrap().unwrap().count, 15);

        // No temp or lock file left behind
        assert!(!temp_dir.path().join("nested/.data.json.tmp").exists());
        assert!(!temp_dir.path().join("nested/data.lock").exists());
    }

    #[test]
    fn test_update_replaces_malformed_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("data.json");
        fs::write(&path, "{corrupted").unwrap();
        let file = AtomicJsonFile::<Counter>::new(path);

        file.update(
            Counter {
                name: "fresh".to_string(),
                count: 0,
            },
            |c| {
                c.count += 1;
                Ok(())
            },
        )
        .unwrap();

        let loaded = file.load().unwrap().unwrap();
        assert_eq!(loaded.name, "fresh");
        assert_eq!(loaded.count, 1);
    }
}
