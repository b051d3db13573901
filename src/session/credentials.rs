//! Persisted bearer token storage
//!
//! [`CredentialStore`] is the only place the session token is read from or
//! written to outside memory. At most one token is stored at a time and every
//! save fully replaces the previous one.
//!
//! Three backends are provided:
//!
//! - [`FileCredentialStore`]: a file in the local storage directory
//! - [`KeyringCredentialStore`]: the OS native keyring (Keychain, Secret
//!   Service, Windows Credential Manager)
//! - [`MemoryCredentialStore`]: process memory only, for tests and throwaway
//!   runs

use std::sync::{Arc, Mutex};

use crate::config::StorageConfig;
use crate::error::{EatRateLoveError, Result};
use crate::storage::{LocalStorage, TOKEN_KEY};

/// Backend for the persisted session token
pub trait CredentialStore: Send + Sync + std::fmt::Debug {
    /// Stored token, or `None` when logged out.
    fn load(&self) -> Result<Option<String>>;

    /// Replace the stored token.
    fn save(&self, token: &str) -> Result<()>;

    /// Remove the stored token. Clearing an empty store is a no-op.
    fn clear(&self) -> Result<()>;
}

/// Token kept under [`TOKEN_KEY`] in [`LocalStorage`]
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    storage: LocalStorage,
}

impl FileCredentialStore {
    pub fn new(storage: LocalStorage) -> Self {
        Self { storage }
    }
}

impl CredentialStore for FileCredentialStore {
    fn load(&self) -> Result<Option<String>> {
        Ok(self
            .storage
            .get(TOKEN_KEY)?
            .map(|token| token.trim().to_string())
            .filter(|token| !token.is_empty()))
    }

    fn save(&self, token: &str) -> Result<()> {
        self.storage.set(TOKEN_KEY, token)
    }

    fn clear(&self) -> Result<()> {
        self.storage.remove(TOKEN_KEY)
    }
}

/// Token kept in the OS keyring
///
/// Each backend host gets its own keyring service so tokens for different
/// servers never overwrite each other.
#[derive(Debug, Clone)]
pub struct KeyringCredentialStore {
    service: String,
}

impl KeyringCredentialStore {
    /// Store keyed by the backend's host (and port, when not the default).
    pub fn for_backend(base_url: &url::Url) -> Self {
        let host = base_url.host_str().unwrap_or("default");
        let backend = match base_url.port() {
            Some(port) => format!("{}:{}", host, port),
            None => host.to_string(),
        };
        Self {
            service: Self::service_name(&backend),
        }
    }

    /// Keyring service name, prefixed to avoid collisions with other
    /// applications.
    fn service_name(backend: &str) -> String {
        format!("eatratelove-{}", backend)
    }

    fn entry(&self) -> Result<keyring::Entry> {
        keyring::Entry::new(&self.service, TOKEN_KEY).map_err(|e| EatRateLoveError::Keyring(e).into())
    }
}

impl CredentialStore for KeyringCredentialStore {
    fn load(&self) -> Result<Option<String>> {
        match self.entry()?.get_password() {
            Ok(token) if token.is_empty() => Ok(None),
            Ok(token) => Ok(Some(token)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(EatRateLoveError::Keyring(e).into()),
        }
    }

    fn save(&self, token: &str) -> Result<()> {
        self.entry()?
            .set_password(token)
            .map_err(EatRateLoveError::Keyring)?;
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        match self.entry()?.delete_password() {
            Ok(()) => Ok(()),
            Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(EatRateLoveError::Keyring(e).into()),
        }
    }
}

/// Token kept in memory
///
/// Clones share the same slot, so a test can keep a handle and inspect what
/// the session store persisted.
#[derive(Debug, Clone, Default)]
pub struct MemoryCredentialStore {
    token: Arc<Mutex<Option<String>>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with `token`, as if left behind by an earlier run.
    pub fn with_token(token: &str) -> Self {
        Self {
            token: Arc::new(Mutex::new(Some(token.to_string()))),
        }
    }

    fn slot(&self) -> Result<std::sync::MutexGuard<'_, Option<String>>> {
        self.token
            .lock()
            .map_err(|_| EatRateLoveError::Storage("credential lock poisoned".into()).into())
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn load(&self) -> Result<Option<String>> {
        Ok(self.slot()?.clone())
    }

    fn save(&self, token: &str) -> Result<()> {
        *self.slot()? = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.slot()? = None;
        Ok(())
    }
}

/// Open the credential backend selected by `config.backend`.
///
/// # Errors
///
/// Returns [`EatRateLoveError::Config`] for an unknown backend and a storage
/// error if the local storage directory cannot be created.
pub fn open_credential_store(
    config: &StorageConfig,
    base_url: &url::Url,
) -> Result<Box<dyn CredentialStore>> {
    match config.backend.as_str() {
        "file" => {
            let storage = match &config.path {
                Some(dir) => LocalStorage::new_with_path(dir)?,
                None => LocalStorage::new()?,
            };
            tracing::debug!("Using file credential store at {}", storage.dir().display());
            Ok(Box::new(FileCredentialStore::new(storage)))
        }
        "keyring" => {
            tracing::debug!("Using OS keyring credential store");
            Ok(Box::new(KeyringCredentialStore::for_backend(base_url)))
        }
        "memory" => Ok(Box::new(MemoryCredentialStore::new())),
        other => Err(EatRateLoveError::Config(format!("Unknown storage backend: {}", other)).into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_store_roundtrip() {
        let tmp = TempDir::new().unwrap();
        let store = FileCredentialStore::new(LocalStorage::new_with_path(tmp.path()).unwrap());

        assert_eq!(store.load().unwrap(), None);
        store.save("tok-1").unwrap();
        store.save("tok-2").unwrap();
        assert_eq!(store.load().unwrap().as_deref(), Some("tok-2"));
        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);
        store.clear().unwrap();
    }

    #[test]
    fn test_file_store_ignores_blank_token() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new_with_path(tmp.path()).unwrap();
        storage.set(TOKEN_KEY, "  \n").unwrap();
        let store = FileCredentialStore::new(storage);
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn test_memory_store_clones_share_slot() {
        let store = MemoryCredentialStore::new();
        let handle = store.clone();
        store.save("abc").unwrap();
        assert_eq!(handle.load().unwrap().as_deref(), Some("abc"));
        handle.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn test_keyring_service_name_per_backend() {
        let local = KeyringCredentialStore::for_backend(&url::Url::parse("http://localhost:8000").unwrap());
        let remote =
            KeyringCredentialStore::for_backend(&url::Url::parse("https://reviews.example.com").unwrap());
        assert_eq!(local.service, "eatratelove-localhost:8000");
        assert_eq!(remote.service, "eatratelove-reviews.example.com");
    }

    #[test]
    fn test_open_rejects_unknown_backend() {
        let config = StorageConfig {
            backend: "cookie".to_string(),
            path: None,
        };
        let base = url::Url::parse("http://localhost:8000").unwrap();
        assert!(open_credential_store(&config, &base).is_err());
    }

    #[test]
    fn test_open_file_backend_with_path() {
        let tmp = TempDir::new().unwrap();
        let config = StorageConfig {
            backend: "file".to_string(),
            path: Some(tmp.path().to_string_lossy().to_string()),
        };
        let base = url::Url::parse("http://localhost:8000").unwrap();
        let store = open_credential_store(&config, &base).unwrap();
        store.save("persisted").unwrap();
        assert_eq!(
            std::fs::read_to_string(tmp.path().join(TOKEN_KEY)).unwrap(),
            "persisted"
        );
    }

    #[test]
    #[ignore = "requires system keyring"]
    fn test_keyring_store_roundtrip() {
        let store = KeyringCredentialStore {
            service: KeyringCredentialStore::service_name("integration-test"),
        };
        store.save("keyring-token").unwrap();
        assert_eq!(store.load().unwrap().as_deref(), Some("keyring-token"));
        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);
        store.clear().unwrap();
    }
}
