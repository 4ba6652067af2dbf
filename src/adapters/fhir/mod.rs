//! Clinical FHIR system integration
//!
//! Two components talk to the clinical system, each over its own HTTP client:
//!
//! - [`FhirAuthClient`] exchanges user credentials for a bearer token
//!   (OAuth2 password grant). One round trip, never retried.
//! - [`DiagnosticReportFetcher`] searches `DiagnosticReport` resources for a
//!   patient. Transport errors and 5xx responses are retried within the
//!   configured bound.
//!
//! The gateway depends on the [`TokenProvider`] and [`ReportSource`] traits
//! rather than the concrete clients, so orchestration can be exercised with
//! in-process fakes.

pub mod auth;
pub mod models;
pub mod reports;

pub use auth::FhirAuthClient;
pub use reports::DiagnosticReportFetcher;

use crate::config::FhirConfig;
use crate::domain::{AccessToken, AegisError, Bundle, Result};
use async_trait::async_trait;
use reqwest::{Client, ClientBuilder};
use std::time::Duration;

/// Issues bearer tokens for the clinical system
#[async_trait]
pub trait TokenProvider: Send + Sync {
    /// Exchange user credentials for a fresh access token
    async fn authenticate(&self, username: &str, password: &str) -> Result<AccessToken>;
}

/// Retrieves diagnostic report bundles for a patient
#[async_trait]
pub trait ReportSource: Send + Sync {
    /// Fetch the patient's diagnostic reports
    ///
    /// `Ok(None)` means the search succeeded but found nothing.
    async fn fetch_report(&self, token: &AccessToken, patient_id: &str) -> Result<Option<Bundle>>;
}

/// Build the HTTP client for one FHIR component
pub(crate) fn build_http_client(config: &FhirConfig) -> Result<Client> {
    let mut builder = ClientBuilder::new()
        .timeout(Duration::from_secs(config.timeout_seconds))
        .connect_timeout(Duration::from_secs(config.timeout_seconds.min(30)));

    if !config.tls_verify {
        tracing::warn!(
            "⚠️  SECURITY WARNING: TLS certificate verification is DISABLED for the clinical FHIR server at {}. \
            This configuration is INSECURE and should only be used in development/testing environments. \
            Access tokens and patient data are exposed to man-in-the-middle attacks.",
            config.base_url
        );
        builder = builder.danger_accept_invalid_certs(true);
    }

    builder
        .build()
        .map_err(|e| AegisError::Configuration(format!("Failed to build HTTP client: {e}")))
}
