//! Durable and session-scoped credential stores

use crate::config::{secret_string, SecretString};
use crate::domain::CredentialError;
use secrecy::ExposeSecret;
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

/// Durable key/value credential store backed by a JSON file
///
/// The file is read on every lookup; nothing is cached in memory. Written
/// with owner-only permissions on Unix.
#[derive(Debug, Clone)]
pub struct LocalStore {
    path: PathBuf,
}

impl LocalStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<BTreeMap<String, String>, CredentialError> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let contents = fs::read_to_string(&self.path).map_err(|e| {
            CredentialError::Store(format!("Failed to read {}: {e}", self.path.display()))
        })?;
        if contents.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&contents).map_err(|e| {
            CredentialError::Store(format!("Failed to parse {}: {e}", self.path.display()))
        })
    }

    fn save(&self, entries: &BTreeMap<String, String>) -> Result<(), CredentialError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                CredentialError::Store(format!("Failed to create {}: {e}", parent.display()))
            })?;
        }
        let json = serde_json::to_string_pretty(entries)
            .map_err(|e| CredentialError::Store(e.to_string()))?;
        let write_err = |e: std::io::Error| {
            CredentialError::Store(format!("Failed to write {}: {e}", self.path.display()))
        };

        let mut options = fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }
        let mut file = options.open(&self.path).map_err(write_err)?;

        // `mode` applies only on creation; tighten a file that predates it
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            file.set_permissions(fs::Permissions::from_mode(0o600)).map_err(|e| {
                CredentialError::Store(format!(
                    "Failed to restrict permissions on {}: {e}",
                    self.path.display()
                ))
            })?;
        }

        file.write_all(json.as_bytes()).map_err(write_err)?;

        Ok(())
    }

    /// Read a credential
    pub fn get(&self, key: &str) -> Result<Option<SecretString>, CredentialError> {
        Ok(self.load()?.remove(key).map(secret_string))
    }

    /// Save a credential, replacing any previous value
    pub fn set(&self, key: &str, value: &SecretString) -> Result<(), CredentialError> {
        let mut entries = self.load()?;
        entries.insert(key.to_string(), value.expose_secret().as_ref().to_string());
        self.save(&entries)?;
        tracing::info!(key = key, path = %self.path.display(), "Credential saved to local store");
        Ok(())
    }

    /// Remove a credential; returns whether one was present
    pub fn clear(&self, key: &str) -> Result<bool, CredentialError> {
        let mut entries = self.load()?;
        let removed = entries.remove(key).is_some();
        if removed {
            self.save(&entries)?;
            tracing::info!(key = key, path = %self.path.display(), "Credential removed from local store");
        }
        Ok(removed)
    }
}

/// In-memory credential store shared for the lifetime of one session
///
/// Cloning yields a handle to the same store.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    entries: Arc<RwLock<BTreeMap<String, SecretString>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<SecretString> {
        let entries = self.entries.read().unwrap_or_else(|poisoned| poisoned.into_inner());
        entries.get(key).cloned()
    }

    pub fn set(&self, key: &str, value: impl Into<String>) {
        let mut entries = self.entries.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        entries.insert(key.to_string(), secret_string(value.into()));
    }

    pub fn remove(&self, key: &str) -> bool {
        let mut entries = self.entries.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        entries.remove(key).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_local_store_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = LocalStore::new(dir.path().join("credentials.json"));
        assert!(store.get("AGENT_2_API_KEY").unwrap().is_none());
    }

    #[test]
    fn test_local_store_set_get_clear() {
        let dir = TempDir::new().unwrap();
        let store = LocalStore::new(dir.path().join("nested").join("credentials.json"));

        store
            .set("AGENT_2_API_KEY", &secret_string("sk-local".to_string()))
            .unwrap();
        let value = store.get("AGENT_2_API_KEY").unwrap().unwrap();
        assert_eq!(value.expose_secret(), "sk-local");

        assert!(store.clear("AGENT_2_API_KEY").unwrap());
        assert!(store.get("AGENT_2_API_KEY").unwrap().is_none());
        assert!(!store.clear("AGENT_2_API_KEY").unwrap());
    }

    #[cfg(unix)]
    #[test]
    fn test_local_store_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let store = LocalStore::new(dir.path().join("credentials.json"));
        store.set("k", &secret_string("v".to_string())).unwrap();

        let mode = fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[cfg(unix)]
    #[test]
    fn test_local_store_tightens_existing_file() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("credentials.json");
        fs::write(&path, "{}").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();

        let store = LocalStore::new(&path);
        store.set("k", &secret_string("v".to_string())).unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
        assert_eq!(store.get("k").unwrap().unwrap().expose_secret(), "v");
    }

    #[test]
    fn test_local_store_corrupt_file_is_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("credentials.json");
        fs::write(&path, "not json").unwrap();

        let store = LocalStore::new(&path);
        assert!(matches!(store.get("k"), Err(CredentialError::Store(_))));
    }

    #[test]
    fn test_session_store_handles_share_state() {
        let store = SessionStore::new();
        let handle = store.clone();

        handle.set("k", "v");
        assert_eq!(store.get("k").unwrap().expose_secret(), "v");
        assert!(store.remove("k"));
        assert!(handle.get("k").is_none());
    }
}
