//! Directory-backed key/value storage
//!
//! [`LocalStorage`] keeps each key as a small file in one directory. Writes go
//! through a temporary file and a rename so a reader never observes a
//! partially written value, and every write fully replaces the previous one.

use crate::error::{EatRateLoveError, Result};
use anyhow::Context;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};

/// Storage key holding the bearer token.
pub const TOKEN_KEY: &str = "token";

/// Storage key holding the display theme.
pub const THEME_KEY: &str = "theme";

/// Persistent key/value store rooted at a directory
#[derive(Debug, Clone)]
pub struct LocalStorage {
    dir: PathBuf,
}

impl LocalStorage {
    /// Open storage in the platform data directory
    ///
    /// The `EATRATELOVE_STORAGE_DIR` environment variable, when set, takes
    /// precedence over the platform location.
    pub fn new() -> Result<Self> {
        if let Ok(override_dir) = std::env::var("EATRATELOVE_STORAGE_DIR") {
            return Self::new_with_path(override_dir);
        }

        let proj_dirs = ProjectDirs::from("com", "eatratelove", "eatratelove")
            .ok_or_else(|| EatRateLoveError::Storage("Could not determine data directory".into()))?;

        Self::new_with_path(proj_dirs.data_dir())
    }

    /// Open storage rooted at `dir`, creating it if needed
    ///
    /// # Examples
    ///
    /// ```
    /// use eatratelove::storage::LocalStorage;
    ///
    /// let dir = std::env::temp_dir().join("eatratelove-doc-storage");
    /// let storage = LocalStorage::new_with_path(&dir).unwrap();
    /// storage.set("theme", "light").unwrap();
    /// assert_eq!(storage.get("theme").unwrap().as_deref(), Some("light"));
    /// ```
    pub fn new_with_path<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create storage directory {}", dir.display()))
            .map_err(|e| EatRateLoveError::Storage(format!("{:#}", e)))?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Read a value. A missing key yields `Ok(None)`.
    pub fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        match std::fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(EatRateLoveError::Storage(format!(
                "Failed to read {}: {}",
                path.display(),
                e
            ))
            .into()),
        }
    }

    /// Write a value, replacing any previous one.
    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;
        let tmp = self.dir.join(format!(".{}.tmp", key));
        std::fs::write(&tmp, value)
            .and_then(|_| std::fs::rename(&tmp, &path))
            .map_err(|e| {
                EatRateLoveError::Storage(format!("Failed to write {}: {}", path.display(), e))
            })?;
        tracing::debug!("Stored key {}", key);
        Ok(())
    }

    /// Remove a value. Removing a missing key is a no-op.
    pub fn remove(&self, key: &str) -> Result<()> {
        let path = self.path_for(key)?;
        match std::fs::remove_file(&path) {
            Ok(()) => {
                tracing::debug!("Removed key {}", key);
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(EatRateLoveError::Storage(format!(
                "Failed to remove {}: {}",
                path.display(),
                e
            ))
            .into()),
        }
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(EatRateLoveError::Storage(format!("Invalid storage key: {:?}", key)).into());
        }
        Ok(self.dir.join(key))
    }
}
