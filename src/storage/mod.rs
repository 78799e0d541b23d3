//! File-backed key-value persistence
//!
//! One JSON blob per key, written atomically (tempfile + rename) so a crash
//! mid-write never leaves a corrupt blob behind. Reads are tolerant by
//! policy: a missing or malformed blob is treated as "no value", logged at
//! warn level, and never surfaced as an error.

mod error;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

pub use error::StorageError;

/// Directory name under the platform data dir
const DATA_DIR_NAME: &str = "greenthumb";

/// Well-known blob keys
pub mod keys {
    /// Cart line items
    pub const CART: &str = "cart";
    /// Recent search history
    pub const RECENT_SEARCHES: &str = "recent_searches";
    /// Selected display currency code
    pub const CURRENCY: &str = "currency";
}

/// File-backed key-value store
///
/// Cheap to clone conceptually but owned by the application root and handed
/// to each store by reference or clone of the path; there is no ambient
/// global instance.
#[derive(Debug, Clone)]
pub struct KvStore {
    dir: PathBuf,
}

impl KvStore {
    /// Open a store rooted at `dir`, creating it if needed
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// Open the default store under the platform data directory
    ///
    /// Falls back to the process working directory when the platform has no
    /// data dir (stripped-down containers).
    pub fn open_default() -> Result<Self, StorageError> {
        let base = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
        Self::open(base.join(DATA_DIR_NAME))
    }

    /// Path of the blob backing `key`
    fn blob_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    /// Load the value stored under `key`
    ///
    /// Missing and malformed blobs both read as `None`; corruption is logged
    /// and the blob is left in place for inspection.
    pub fn load<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let path = self.blob_path(key);
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return None,
            Err(e) => {
                warn!(key, error = %e, "failed to read blob, treating as empty");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(key, error = %e, "malformed blob, treating as empty");
                None
            }
        }
    }

    /// Persist `value` under `key`, replacing any previous blob
    pub fn save<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let raw = serde_json::to_string(value)?;
        atomic_write(&self.blob_path(key), raw.as_bytes())?;
        Ok(())
    }

    /// Remove the blob under `key`; absent blobs are not an error
    pub fn remove(&self, key: &str) -> Result<(), StorageError> {
        match fs::remove_file(self.blob_path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Atomic file write
///
/// tempfile in the target directory + atomic rename. Rename within one
/// filesystem is atomic, so readers see either the old blob or the new one,
/// never a partial write.
fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let parent = path.parent().unwrap_or(Path::new("."));
    fs::create_dir_all(parent)?;

    let temp_file = tempfile::NamedTempFile::new_in(parent)?;
    let temp_path = temp_file.into_temp_path();
    fs::write(&temp_path, content)?;

    if let Err(e) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(e);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};
    use tempfile::TempDir;

    use super::*;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Sample {
        name: String,
        count: u32,
    }

    fn open_test_store() -> (TempDir, KvStore) {
        let dir = TempDir::new().unwrap();
        let store = KvStore::open(dir.path()).unwrap();
        (dir, store)
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let (_dir, store) = open_test_store();
        let value = Sample {
            name: "pothos".to_string(),
            count: 3,
        };

        store.save("sample", &value).unwrap();
        let loaded: Sample = store.load("sample").unwrap();
        assert_eq!(loaded, value);
    }

    #[test]
    fn test_load_missing_key_is_none() {
        let (_dir, store) = open_test_store();
        let loaded: Option<Sample> = store.load("nope");
        assert!(loaded.is_none());
    }

    #[test]
    fn test_load_corrupt_blob_is_none() {
        let (dir, store) = open_test_store();
        std::fs::write(dir.path().join("sample.json"), "{not json").unwrap();

        let loaded: Option<Sample> = store.load("sample");
        assert!(loaded.is_none());
    }

    #[test]
    fn test_save_overwrites_previous_blob() {
        let (_dir, store) = open_test_store();
        store
            .save(
                "sample",
                &Sample {
                    name: "old".to_string(),
                    count: 1,
                },
            )
            .unwrap();
        store
            .save(
                "sample",
                &Sample {
                    name: "new".to_string(),
                    count: 2,
                },
            )
            .unwrap();

        let loaded: Sample = store.load("sample").unwrap();
        assert_eq!(loaded.name, "new");
        assert_eq!(loaded.count, 2);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let (_dir, store) = open_test_store();
        store
            .save(
                "sample",
                &Sample {
                    name: "x".to_string(),
                    count: 0,
                },
            )
            .unwrap();

        store.remove("sample").unwrap();
        store.remove("sample").unwrap();
        let loaded: Option<Sample> = store.load("sample");
        assert!(loaded.is_none());
    }

    #[test]
    fn test_atomic_write_leaves_no_temp_files() {
        let (dir, store) = open_test_store();
        store
            .save(
                "sample",
                &Sample {
                    name: "x".to_string(),
                    count: 0,
                },
            )
            .unwrap();

        let entries: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .collect();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].file_name().to_string_lossy(), "sample.json");
    }
}
