//! Compliance gateway - the single exit point for clinical text
//!
//! Every string that leaves for the conversational layer (user chat messages,
//! rendered diagnostic reports, file analysis output) is produced here and
//! typed as [`OutboundText`].

use super::outbound::OutboundText;
use crate::adapters::fhir::{DiagnosticReportFetcher, FhirAuthClient, ReportSource, TokenProvider};
use crate::config::{AegisConfig, SecretString};
use crate::credentials::{CredentialResolver, ResolvedCredential, SessionStore};
use crate::domain::{AegisError, Bundle, PatientId, Result};
use crate::phi::{AuditLogger, RedactionEngine};
use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use secrecy::ExposeSecret;
use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::Instrument;
use uuid::Uuid;

/// Shown with messages that contained sensitive information
pub const SENSITIVE_NOTICE: &str = "This message contains sensitive health information. \
Please be cautious when sharing protected health information (PHI). \
The message has been sanitized for HIPAA compliance.";

/// Shown with messages that were clear
pub const CLEAR_NOTICE: &str = "Message is clear of any sensitive health information.";

/// Sent instead of a report when the search found nothing
pub const NO_REPORT_MESSAGE: &str = "No diagnostic reports found for this patient.";

/// Rendered in place of a report that could not be serialized
pub const REPORT_FORMAT_FALLBACK: &str = "Error formatting report data";

/// Result of a report run that reached the clinical system
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportOutcome {
    /// Rendered and redacted report bundle
    Report(OutboundText),
    /// The search succeeded with no entries
    NoReport(OutboundText),
}

impl ReportOutcome {
    pub fn text(&self) -> &OutboundText {
        match self {
            Self::Report(text) | Self::NoReport(text) => text,
        }
    }

    pub fn is_report(&self) -> bool {
        matches!(self, Self::Report(_))
    }
}

/// External file analysis collaborator
///
/// Its output is untrusted with respect to PHI and always goes through
/// redaction before use.
#[async_trait]
pub trait FileAnalyzer: Send + Sync {
    async fn analyze(&self, file_name: &str, contents: &[u8]) -> Result<String>;
}

/// Orchestrates credential resolution, authentication, report retrieval and
/// redaction
pub struct ComplianceGateway {
    resolver: CredentialResolver,
    tokens: Arc<dyn TokenProvider>,
    reports: Arc<dyn ReportSource>,
    engine: RedactionEngine,
    audit: AuditLogger,
    request_timeout: Duration,
    max_concurrency: usize,
}

impl ComplianceGateway {
    /// Create a gateway talking to the configured clinical system
    pub fn new(config: &AegisConfig, session: SessionStore) -> Result<Self> {
        let tokens = Arc::new(FhirAuthClient::new(&config.fhir)?);
        let reports = Arc::new(DiagnosticReportFetcher::new(&config.fhir)?);
        let resolver = CredentialResolver::standard(config, session);
        Self::with_components(config, resolver, tokens, reports)
    }

    /// Create a gateway over explicit collaborators
    pub fn with_components(
        config: &AegisConfig,
        resolver: CredentialResolver,
        tokens: Arc<dyn TokenProvider>,
        reports: Arc<dyn ReportSource>,
    ) -> Result<Self> {
        let audit = AuditLogger::new(config.redaction.audit_log_path.as_ref().map(PathBuf::from))?;

        Ok(Self {
            resolver,
            tokens,
            reports,
            engine: RedactionEngine::with_policy(&config.redaction),
            audit,
            request_timeout: Duration::from_secs(config.gateway.request_timeout_seconds),
            max_concurrency: config.gateway.max_concurrency.max(1),
        })
    }

    pub fn engine(&self) -> &RedactionEngine {
        &self.engine
    }

    /// Redact a user chat message for transmission
    pub fn sanitize_message(&self, text: &str) -> OutboundText {
        let spans = self.engine.detector().scan(text);
        let message = self.engine.redact(text);

        if let Err(e) = self.audit.record(text, &spans, message.was_redacted()) {
            tracing::warn!(error = %e, "Failed to write redaction audit record");
        }

        OutboundText::from(message)
    }

    /// Notice to show the user about sensitive information in `text`
    pub fn phi_notice(&self, text: &str) -> &'static str {
        if self.engine.detector().detect(text) {
            SENSITIVE_NOTICE
        } else {
            CLEAR_NOTICE
        }
    }

    /// Pretty-printed JSON of a report bundle
    pub fn format_report(bundle: &Bundle) -> String {
        serde_json::to_string_pretty(bundle).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Failed to format report bundle");
            REPORT_FORMAT_FALLBACK.to_string()
        })
    }

    /// Resolve the chat-service credential
    pub fn chat_credential(&self) -> Result<ResolvedCredential> {
        Ok(self.resolver.resolve()?)
    }

    /// Run the full report sequence for one patient
    ///
    /// Resolves the chat credential, authenticates, fetches the patient's
    /// diagnostic reports and returns the rendered bundle after redaction.
    /// Each call authenticates afresh; the token is dropped on return.
    pub async fn report_for_patient(
        &self,
        username: &str,
        password: &SecretString,
        patient: &PatientId,
    ) -> Result<ReportOutcome> {
        let run_id = Uuid::new_v4();
        let span = tracing::info_span!("report_run", run_id = %run_id, patient = %patient.digest());

        async move {
            let credential = self.chat_credential()?;
            tracing::debug!(source = %credential.source(), "Chat credential resolved");

            let token = self
                .bounded(
                    "authentication",
                    self.tokens.authenticate(username, password.expose_secret().as_ref()),
                )
                .await?;

            let bundle = self
                .bounded(
                    "report fetch",
                    self.reports.fetch_report(&token, patient.as_str()),
                )
                .await?;

            let outcome = match bundle {
                Some(bundle) => {
                    ReportOutcome::Report(self.sanitize_message(&Self::format_report(&bundle)))
                }
                None => ReportOutcome::NoReport(self.sanitize_message(NO_REPORT_MESSAGE)),
            };

            tracing::info!(report = outcome.is_report(), "Report run completed");
            Ok::<_, AegisError>(outcome)
        }
        .instrument(span)
        .await
    }

    /// Run independent report sequences for several patients
    ///
    /// At most `gateway.max_concurrency` runs are in flight. Results are in
    /// input order; one patient's failure does not affect the others.
    pub async fn reports_for_patients(
        &self,
        username: &str,
        password: &SecretString,
        patients: &[PatientId],
    ) -> Vec<(PatientId, Result<ReportOutcome>)> {
        stream::iter(patients)
            .map(|patient| async move {
                let outcome = self.report_for_patient(username, password, patient).await;
                (patient.clone(), outcome)
            })
            .buffered(self.max_concurrency)
            .collect()
            .await
    }

    /// Analyze a file with an external collaborator and redact its output
    pub async fn analyze_file(
        &self,
        analyzer: &dyn FileAnalyzer,
        file_name: &str,
        contents: &[u8],
    ) -> Result<OutboundText> {
        let analysis = self
            .bounded("file analysis", analyzer.analyze(file_name, contents))
            .await?;
        Ok(self.sanitize_message(&analysis))
    }

    async fn bounded<T>(
        &self,
        operation: &str,
        future: impl Future<Output = Result<T>>,
    ) -> Result<T> {
        tokio::time::timeout(self.request_timeout, future)
            .await
            .map_err(|_| {
                tracing::warn!(
                    operation = operation,
                    timeout_seconds = self.request_timeout.as_secs(),
                    "Operation timed out"
                );
                AegisError::Timeout {
                    operation: operation.to_string(),
                    seconds: self.request_timeout.as_secs(),
                }
            })?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_format_report_pretty_prints() {
        let bundle: Bundle = serde_json::from_value(json!({
            "resourceType": "Bundle",
            "entry": [{"resource": {"resourceType": "DiagnosticReport", "id": "r1"}}]
        }))
        .unwrap();

        let text = ComplianceGateway::format_report(&bundle);
        assert!(text.contains("\"resourceType\": \"Bundle\""));
        assert!(text.contains('\n'));
    }

    #[test]
    fn test_report_outcome_accessors() {
        let engine = RedactionEngine::new();
        let outcome = ReportOutcome::NoReport(OutboundText::from(engine.redact(NO_REPORT_MESSAGE)));
        assert!(!outcome.is_report());
        assert_eq!(outcome.text().as_str(), NO_REPORT_MESSAGE);
    }
}
