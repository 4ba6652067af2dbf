//! Domain error types
//!
//! This module defines the error hierarchy for Aegis. All errors are
//! domain-specific and don't expose third-party types: HTTP client errors are
//! stringified at the adapter boundary.

use thiserror::Error;

/// Main Aegis error type
///
/// This is the primary error type surfaced to gateway callers. Every failure
/// class of the clinical pipeline is a distinct variant so that callers can
/// tell "check credentials" apart from "no report found" and "service
/// unavailable".
#[derive(Debug, Error)]
pub enum AegisError {
    /// Configuration-related errors (missing client secrets, invalid TOML, ...)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Credential resolution errors
    #[error("Credential error: {0}")]
    Credential(#[from] CredentialError),

    /// FHIR authentication and report retrieval errors
    #[error("FHIR error: {0}")]
    Fhir(#[from] FhirError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Operation exceeded the caller-supplied deadline
    #[error("Operation timed out after {seconds}s: {operation}")]
    Timeout { operation: String, seconds: u64 },

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),
}

/// Credential resolution errors
#[derive(Debug, Error)]
pub enum CredentialError {
    /// No configured source yielded a non-empty secret
    #[error("No credential available from sources: {}", .sources.join(", "))]
    CredentialUnavailable { sources: Vec<String> },

    /// The durable local store could not be read or written
    #[error("Credential store error: {0}")]
    Store(String),
}

/// Clinical FHIR system errors
///
/// Authentication and report retrieval failures, classified so that the
/// caller can react differently to each.
#[derive(Debug, Error)]
pub enum FhirError {
    /// Token endpoint answered 401
    #[error("Invalid credentials provided")]
    InvalidCredentials,

    /// Any other failure of the token exchange
    #[error("Failed to authenticate with clinical system: {0}")]
    AuthenticationFailure(String),

    /// A required request parameter was empty
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    /// Report endpoint answered 404
    #[error("Diagnostic report not found for patient")]
    NotFound,

    /// Any other failure of the report fetch
    #[error("Failed to fetch diagnostic report: {0}")]
    FetchFailure(String),
}

impl AegisError {
    /// Short message suitable for showing to an end user
    ///
    /// Never includes server response bodies or secrets.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::Configuration(_) => {
                "The clinical integration is not configured. Contact your administrator."
            }
            Self::Credential(CredentialError::CredentialUnavailable { .. }) => {
                "No API key configured. Please configure your API key to continue."
            }
            Self::Credential(CredentialError::Store(_)) => {
                "The local credential store could not be accessed."
            }
            Self::Fhir(FhirError::InvalidCredentials) => {
                "Login failed. Please check your credentials."
            }
            Self::Fhir(FhirError::AuthenticationFailure(_)) => {
                "The clinical login service is unavailable. Please try again later."
            }
            Self::Fhir(FhirError::MissingParameter(_)) | Self::Validation(_) => {
                "A patient identifier and a valid session are required."
            }
            Self::Fhir(FhirError::NotFound) => "No report found for this patient.",
            Self::Fhir(FhirError::FetchFailure(_)) | Self::Timeout { .. } => {
                "The clinical report service is unavailable. Please try again later."
            }
            Self::Serialization(_) | Self::Io(_) => "An internal error occurred.",
        }
    }

    /// Process exit code for the CLI
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Configuration(_) | Self::Validation(_) => 2,
            Self::Credential(_) => 3,
            Self::Fhir(FhirError::InvalidCredentials)
            | Self::Fhir(FhirError::AuthenticationFailure(_)) => 4,
            _ => 5,
        }
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for AegisError {
    fn from(err: std::io::Error) -> Self {
        AegisError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for AegisError {
    fn from(err: serde_json::Error) -> Self {
        AegisError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for AegisError {
    fn from(err: toml::de::Error) -> Self {
        AegisError::Configuration(format!("TOML parse error: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aegis_error_display() {
        let err = AegisError::Configuration("client_id missing".to_string());
        assert_eq!(err.to_string(), "Configuration error: client_id missing");
    }

    #[test]
    fn test_fhir_error_conversion() {
        let err: AegisError = FhirError::NotFound.into();
        assert!(matches!(err, AegisError::Fhir(FhirError::NotFound)));
    }

    #[test]
    fn test_credential_unavailable_lists_sources() {
        let err = CredentialError::CredentialUnavailable {
            sources: vec!["environment".to_string(), "session store".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "No credential available from sources: environment, session store"
        );
    }

    #[test]
    fn test_user_messages_are_distinct() {
        let invalid: AegisError = FhirError::InvalidCredentials.into();
        let not_found: AegisError = FhirError::NotFound.into();
        let unavailable: AegisError = FhirError::FetchFailure("503".to_string()).into();

        assert!(invalid.user_message().contains("check your credentials"));
        assert!(not_found.user_message().contains("No report found"));
        assert!(unavailable.user_message().contains("unavailable"));
        assert_ne!(invalid.user_message(), not_found.user_message());
        assert_ne!(not_found.user_message(), unavailable.user_message());
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(AegisError::Configuration("x".into()).exit_code(), 2);
        let cred: AegisError = CredentialError::CredentialUnavailable { sources: vec![] }.into();
        assert_eq!(cred.exit_code(), 3);
        let auth: AegisError = FhirError::InvalidCredentials.into();
        assert_eq!(auth.exit_code(), 4);
        let fetch: AegisError = FhirError::NotFound.into();
        assert_eq!(fetch.exit_code(), 5);
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Value>("invalid = toml = syntax").unwrap_err();
        let err: AegisError = toml_err.into();
        assert!(matches!(err, AegisError::Configuration(_)));
        assert!(err.to_string().contains("TOML parse error"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let err: AegisError = io_err.into();
        assert!(matches!(err, AegisError::Io(_)));
    }
}
