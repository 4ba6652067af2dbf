//! Domain identifier types with validation

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;

/// Patient identifier newtype wrapper
///
/// Opaque identifier of a patient record at the clinical system. Supplied by
/// the caller, never generated here. Because a patient identifier is itself
/// PHI, it must not be written to logs in clear text; use [`PatientId::digest`]
/// for log fields instead.
///
/// # Examples
///
/// ```
/// use aegis::domain::ids::PatientId;
/// use std::str::FromStr;
///
/// let patient = PatientId::from_str("erXuFYUfucBZaryVksYEcMg3").unwrap();
/// assert_eq!(patient.as_str(), "erXuFYUfucBZaryVksYEcMg3");
/// ```
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PatientId(String);

impl PatientId {
    /// Creates a new PatientId from a string
    ///
    /// Returns `Err` if the identifier is empty or whitespace only.
    pub fn new(id: impl Into<String>) -> Result<Self, String> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err("Patient ID cannot be empty".to_string());
        }
        Ok(Self(id))
    }

    /// Returns the patient ID as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Short SHA-256 digest of the identifier, safe for log fields
    pub fn digest(&self) -> String {
        let hash = Sha256::digest(self.0.as_bytes());
        hash.iter().take(8).map(|b| format!("{b:02x}")).collect()
    }
}

// Debug shows only the digest so that `?patient` in a log field cannot leak the identifier.
impl fmt::Debug for PatientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PatientId({})", self.digest())
    }
}

impl fmt::Display for PatientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PatientId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for PatientId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
