//! DiagnosticReport search

use super::{build_http_client, ReportSource};
use crate::config::{FhirConfig, RetryConfig, MAX_REPORT_ATTEMPTS};
use crate::domain::{AccessToken, AegisError, Bundle, FhirError, PatientId, Result};
use async_trait::async_trait;
use reqwest::{header, Client, StatusCode};
use std::future::Future;
use std::time::Duration;
use url::Url;

const FHIR_JSON: &str = "application/fhir+json";

/// A failed attempt, tagged with whether another attempt may help
struct AttemptFailure {
    error: FhirError,
    retryable: bool,
}

impl AttemptFailure {
    fn transient(error: FhirError) -> Self {
        Self {
            error,
            retryable: true,
        }
    }

    fn fatal(error: FhirError) -> Self {
        Self {
            error,
            retryable: false,
        }
    }
}

/// Fetches `DiagnosticReport` search bundles for a patient
///
/// The search is a plain GET and therefore safe to repeat: transport errors
/// and 5xx responses are retried with exponential backoff, up to
/// `fhir.report_retry.max_attempts`, never more than `MAX_REPORT_ATTEMPTS`
/// however the configuration was built. Client errors and malformed bodies are
/// never retried.
pub struct DiagnosticReportFetcher {
    endpoint: Url,
    client: Client,
    retry: RetryConfig,
}

impl DiagnosticReportFetcher {
    pub fn new(config: &FhirConfig) -> Result<Self> {
        let endpoint = Url::parse(&format!(
            "{}/DiagnosticReport",
            config.base_url.trim_end_matches('/')
        ))
        .map_err(|e| AegisError::Configuration(format!("fhir.base_url is not a valid URL: {e}")))?;

        Ok(Self {
            endpoint,
            client: build_http_client(config)?,
            retry: config.report_retry.clone(),
        })
    }

    /// Search the patient's diagnostic reports
    ///
    /// Returns `Ok(None)` for a well-formed bundle with no entries.
    pub async fn fetch_report(
        &self,
        token: &AccessToken,
        patient_id: &str,
    ) -> Result<Option<Bundle>> {
        if token.expose().is_empty() {
            return Err(FhirError::MissingParameter("token").into());
        }
        let patient = PatientId::new(patient_id)
            .map_err(|_| AegisError::from(FhirError::MissingParameter("patient_id")))?;

        let mut url = self.endpoint.clone();
        url.query_pairs_mut().append_pair("patient", patient.as_str());

        tracing::debug!(
            endpoint = %self.endpoint,
            patient = %patient.digest(),
            "Searching diagnostic reports"
        );

        let bundle = self
            .retry_request(|| self.attempt(&url, token))
            .await
            .map_err(AegisError::from)?;

        if bundle.is_empty() {
            tracing::info!(patient = %patient.digest(), "No diagnostic reports found");
            return Ok(None);
        }

        tracing::info!(
            patient = %patient.digest(),
            entries = bundle.len(),
            "Fetched diagnostic reports"
        );

        Ok(Some(bundle))
    }

    async fn attempt(
        &self,
        url: &Url,
        token: &AccessToken,
    ) -> std::result::Result<Bundle, AttemptFailure> {
        let response = self
            .client
            .get(url.clone())
            .bearer_auth(token.expose())
            .header(header::ACCEPT, FHIR_JSON)
            .send()
            .await
            .map_err(|e| {
                AttemptFailure::transient(FhirError::FetchFailure(format!(
                    "Failed to request diagnostic reports: {e}"
                )))
            })?;

        match response.status() {
            status if status.is_success() => {}
            StatusCode::NOT_FOUND => return Err(AttemptFailure::fatal(FhirError::NotFound)),
            status if status.is_server_error() => {
                return Err(AttemptFailure::transient(FhirError::FetchFailure(format!(
                    "Report endpoint returned status {status}"
                ))));
            }
            status => {
                return Err(AttemptFailure::fatal(FhirError::FetchFailure(format!(
                    "Report endpoint returned status {status}"
                ))));
            }
        }

        response.json::<Bundle>().await.map_err(|e| {
            AttemptFailure::fatal(FhirError::FetchFailure(format!(
                "Failed to parse diagnostic report bundle: {e}"
            )))
        })
    }

    /// Retry a request with exponential backoff
    async fn retry_request<F, T, Fut>(&self, operation: F) -> std::result::Result<T, FhirError>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = std::result::Result<T, AttemptFailure>>,
    {
        let max_attempts = self.retry.max_attempts.clamp(1, MAX_REPORT_ATTEMPTS);
        let mut attempt = 0;

        loop {
            match operation().await {
                Ok(result) => return Ok(result),
                Err(failure) => {
                    attempt += 1;
                    if !failure.retryable || attempt >= max_attempts {
                        return Err(failure.error);
                    }

                    let delay_ms = backoff_delay_ms(&self.retry, attempt);

                    crate::log_retry_attempt!(attempt, max_attempts, delay_ms, failure.error);

                    tokio::time::sleep(Duration::from_millis(delay_ms)).await;
                }
            }
        }
    }
}

/// Delay before the attempt following `attempt` (1-based)
fn backoff_delay_ms(retry: &RetryConfig, attempt: usize) -> u64 {
    let exponent = i32::try_from(attempt.saturating_sub(1)).unwrap_or(i32::MAX);
    let delay = retry.initial_delay_ms as f64 * retry.backoff_multiplier.powi(exponent);
    (delay as u64).min(retry.max_delay_ms)
}

#[async_trait]
impl ReportSource for DiagnosticReportFetcher {
    async fn fetch_report(&self, token: &AccessToken, patient_id: &str) -> Result<Option<Bundle>> {
        DiagnosticReportFetcher::fetch_report(self, token, patient_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_from_base_url() {
        let config = FhirConfig {
            base_url: "https://fhir.example.org/api/FHIR/R4/".to_string(),
            ..Default::default()
        };
        let fetcher = DiagnosticReportFetcher::new(&config).unwrap();
        assert_eq!(
            fetcher.endpoint.as_str(),
            "https://fhir.example.org/api/FHIR/R4/DiagnosticReport"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let config = FhirConfig {
            base_url: "not a url".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            DiagnosticReportFetcher::new(&config),
            Err(AegisError::Configuration(_))
        ));
    }

    #[test]
    fn test_backoff_delay() {
        let retry = RetryConfig {
            max_attempts: 2,
            initial_delay_ms: 100,
            max_delay_ms: 350,
            backoff_multiplier: 2.0,
        };
        assert_eq!(backoff_delay_ms(&retry, 1), 100);
        assert_eq!(backoff_delay_ms(&retry, 2), 200);
        assert_eq!(backoff_delay_ms(&retry, 3), 350);
    }

    #[tokio::test]
    async fn test_empty_parameters_fail_before_network() {
        let config = FhirConfig {
            base_url: "http://127.0.0.1:9/fhir".to_string(),
            ..Default::default()
        };
        let fetcher = DiagnosticReportFetcher::new(&config).unwrap();

        let err = fetcher
            .fetch_report(&AccessToken::new(""), "123")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            AegisError::Fhir(FhirError::MissingParameter("token"))
        ));

        let err = fetcher
            .fetch_report(&AccessToken::new("token"), "  ")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            AegisError::Fhir(FhirError::MissingParameter("patient_id"))
        ));
    }
}
