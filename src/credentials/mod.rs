//! Chat-service credential resolution
//!
//! A credential is resolved from an ordered list of named sources. The first
//! source yielding a non-empty secret wins; later sources are not consulted.
//! Every call checks all sources fresh, so a value that appears in the
//! session store after a failed attempt is picked up by the next call.
//!
//! # Example
//!
//! ```rust
//! use aegis::credentials::{CredentialResolver, FnSource};
//! use secrecy::ExposeSecret;
//!
//! let resolver = CredentialResolver::new(vec![
//!     Box::new(FnSource::new("environment", || None)),
//!     Box::new(FnSource::new("session store", || Some("sk-123".to_string()))),
//! ]);
//!
//! let credential = resolver.resolve().unwrap();
//! assert_eq!(credential.source(), "session store");
//! assert_eq!(credential.secret().expose_secret(), "sk-123");
//! ```

pub mod sources;
pub mod store;

pub use sources::{EnvironmentSource, FnSource, LocalStoreSource, SessionStoreSource};
pub use store::{LocalStore, SessionStore};

use crate::config::{AegisConfig, SecretString};
use crate::domain::CredentialError;

/// A named place a credential may come from
///
/// Implementations are read-only. Returning `Some` with an empty value is
/// allowed; the resolver treats it exactly like `None`.
pub trait CredentialSource: Send + Sync {
    /// Human-readable source identifier ("environment", "session store", ...)
    fn name(&self) -> &str;

    /// Current value of the credential, if any
    fn fetch(&self) -> Option<SecretString>;
}

/// A credential together with the source that supplied it
#[derive(Debug)]
pub struct ResolvedCredential {
    source: String,
    secret: SecretString,
}

impl ResolvedCredential {
    /// Name of the source that supplied the credential
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The credential itself
    pub fn secret(&self) -> &SecretString {
        &self.secret
    }

    /// Consume and return the credential
    pub fn into_secret(self) -> SecretString {
        self.secret
    }
}

/// Resolves a credential from ordered sources with fallback
pub struct CredentialResolver {
    sources: Vec<Box<dyn CredentialSource>>,
}

impl CredentialResolver {
    /// Create a resolver over sources in priority order
    pub fn new(sources: Vec<Box<dyn CredentialSource>>) -> Self {
        Self { sources }
    }

    /// The standard chain: environment, then durable local store, then session store
    pub fn standard(config: &AegisConfig, session: SessionStore) -> Self {
        let credentials = &config.credentials;
        Self::new(vec![
            Box::new(EnvironmentSource::from_config(credentials)),
            Box::new(LocalStoreSource::new(
                LocalStore::new(&credentials.store_path),
                &credentials.store_key,
            )),
            Box::new(SessionStoreSource::new(session, &credentials.store_key)),
        ])
    }

    /// Names of the configured sources in priority order
    pub fn source_names(&self) -> Vec<String> {
        self.sources.iter().map(|s| s.name().to_string()).collect()
    }

    /// Resolve the credential
    ///
    /// # Errors
    ///
    /// Returns [`CredentialError::CredentialUnavailable`] when no source
    /// yields a non-empty secret. The caller should send the user to
    /// credential configuration rather than proceed.
    pub fn resolve(&self) -> Result<ResolvedCredential, CredentialError> {
        use secrecy::ExposeSecret;

        for source in &self.sources {
            match source.fetch() {
                Some(secret) if !secret.expose_secret().is_empty() => {
                    tracing::debug!(source = source.name(), "Credential resolved");
                    return Ok(ResolvedCredential {
                        source: source.name().to_string(),
                        secret,
                    });
                }
                _ => {
                    tracing::trace!(source = source.name(), "Credential source empty");
                }
            }
        }

        let sources = self.source_names();
        tracing::warn!(sources = ?sources, "No credential available from any source");
        Err(CredentialError::CredentialUnavailable { sources })
    }
}
