//! Credential source implementations

use super::store::{LocalStore, SessionStore};
use super::CredentialSource;
use crate::config::{secret_string_opt, CredentialsConfig, SecretString};

/// Process configuration: the value captured at startup, else the named
/// environment variable as it is right now
pub struct EnvironmentSource {
    var: String,
    captured: Option<SecretString>,
}

impl EnvironmentSource {
    pub fn new(var: impl Into<String>, captured: Option<SecretString>) -> Self {
        Self {
            var: var.into(),
            captured,
        }
    }

    pub fn from_config(config: &CredentialsConfig) -> Self {
        Self::new(config.api_key_env.clone(), config.api_key.clone())
    }
}

impl CredentialSource for EnvironmentSource {
    fn name(&self) -> &str {
        "environment"
    }

    fn fetch(&self) -> Option<SecretString> {
        use secrecy::ExposeSecret;

        self.captured
            .clone()
            .filter(|s| !s.expose_secret().is_empty())
            .or_else(|| secret_string_opt(std::env::var(&self.var).ok()))
    }
}

/// Durable local store, read fresh on every fetch
pub struct LocalStoreSource {
    store: LocalStore,
    key: String,
}

impl LocalStoreSource {
    pub fn new(store: LocalStore, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }
}

impl CredentialSource for LocalStoreSource {
    fn name(&self) -> &str {
        "persistent local store"
    }

    fn fetch(&self) -> Option<SecretString> {
        match self.store.get(&self.key) {
            Ok(value) => value,
            Err(e) => {
                // An unreadable store is treated as absent so the chain can continue.
                tracing::warn!(
                    path = %self.store.path().display(),
                    error = %e,
                    "Local credential store unreadable, skipping"
                );
                None
            }
        }
    }
}

/// Ephemeral session store
pub struct SessionStoreSource {
    store: SessionStore,
    key: String,
}

impl SessionStoreSource {
    pub fn new(store: SessionStore, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }
}

impl CredentialSource for SessionStoreSource {
    fn name(&self) -> &str {
        "session store"
    }

    fn fetch(&self) -> Option<SecretString> {
        self.store.get(&self.key)
    }
}

/// A source defined by an accessor closure
pub struct FnSource<F> {
    name: String,
    accessor: F,
}

impl<F> FnSource<F>
where
    F: Fn() -> Option<String> + Send + Sync,
{
    pub fn new(name: impl Into<String>, accessor: F) -> Self {
        Self {
            name: name.into(),
            accessor,
        }
    }
}

impl<F> CredentialSource for FnSource<F>
where
    F: Fn() -> Option<String> + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn fetch(&self) -> Option<SecretString> {
        secret_string_opt((self.accessor)())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::secret_string;
    use secrecy::ExposeSecret;
    use tempfile::TempDir;

    #[test]
    fn test_environment_source_prefers_captured_value() {
        let source = EnvironmentSource::new(
            "AEGIS_SOURCES_TEST_UNSET_VAR",
            Some(secret_string("captured".to_string())),
        );
        assert_eq!(source.fetch().unwrap().expose_secret(), "captured");
    }

    #[test]
    fn test_environment_source_reads_live_variable() {
        let var = "AEGIS_SOURCES_TEST_LIVE_VAR";
        let source = EnvironmentSource::new(var, None);
        std::env::remove_var(var);
        assert!(source.fetch().is_none());

        std::env::set_var(var, "live");
        assert_eq!(source.fetch().unwrap().expose_secret(), "live");
        std::env::remove_var(var);
    }

    #[test]
    fn test_environment_source_empty_captured_falls_through() {
        let var = "AEGIS_SOURCES_TEST_EMPTY_VAR";
        std::env::remove_var(var);
        let source = EnvironmentSource::new(var, Some(secret_string(String::new())));
        assert!(source.fetch().is_none());
    }

    #[test]
    fn test_local_store_source_unreadable_is_absent() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("credentials.json");
        std::fs::write(&path, "{broken").unwrap();

        let source = LocalStoreSource::new(LocalStore::new(&path), "k");
        assert!(source.fetch().is_none());
    }

    #[test]
    fn test_fn_source_empty_string_is_absent() {
        let source = FnSource::new("empty", || Some(String::new()));
        assert!(source.fetch().is_none());
    }

    #[test]
    fn test_source_names() {
        let local = LocalStoreSource::new(LocalStore::new("x.json"), "k");
        let session = SessionStoreSource::new(SessionStore::new(), "k");
        let env = EnvironmentSource::new("V", None);
        assert_eq!(env.name(), "environment");
        assert_eq!(local.name(), "persistent local store");
        assert_eq!(session.name(), "session store");
    }
}
