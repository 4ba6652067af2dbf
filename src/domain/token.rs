//! Bearer access token

use crate::config::{secret_string, SecretString};
use chrono::{DateTime, Utc};
use secrecy::ExposeSecret;
use std::fmt;

/// Bearer token issued by the clinical OAuth token endpoint
///
/// Owned by a single orchestration run and dropped at its end. Never persisted
/// or shared between runs; expiry is not tracked because a token is never
/// reused. The token value is zeroized on drop and hidden from `Debug`.
pub struct AccessToken {
    value: SecretString,
    issued_at: DateTime<Utc>,
}

impl AccessToken {
    /// Wrap a freshly issued bearer string
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: secret_string(value.into()),
            issued_at: Utc::now(),
        }
    }

    /// Expose the bearer string for use in an `Authorization` header
    pub fn expose(&self) -> &str {
        self.value.expose_secret().as_ref()
    }

    /// When the token was received
    pub fn issued_at(&self) -> DateTime<Utc> {
        self.issued_at
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessToken")
            .field("value", &"[REDACTED]")
            .field("issued_at", &self.issued_at)
            .finish()
    }
}
