//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the Aegis configuration file.

use crate::config::{load_config, AegisConfig};
use crate::credentials::{CredentialResolver, SessionStore};
use clap::Args;
use secrecy::ExposeSecret;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        // load_config validates before returning
        let config = match load_config(config_path) {
            Ok(c) => {
                println!("✅ Configuration is valid");
                c
            }
            Err(e) => {
                println!("❌ Configuration validation failed");
                println!("   Error: {e}");
                return Ok(2);
            }
        };

        println!();
        for line in summary_lines(&config) {
            println!("{line}");
        }
        println!();

        Ok(0)
    }
}

/// Configuration summary; secrets are reported only as present or missing
fn summary_lines(config: &AegisConfig) -> Vec<String> {
    let presence = |set: bool| if set { "configured" } else { "missing" };

    let client_id_set = config.fhir.client_id.as_deref().is_some_and(|s| !s.is_empty());
    let client_secret_set = config
        .fhir
        .client_secret
        .as_ref()
        .is_some_and(|s| !s.expose_secret().is_empty());

    let resolver = CredentialResolver::standard(config, SessionStore::new());
    let chat_key = match resolver.resolve() {
        Ok(credential) => format!("available ({})", credential.source()),
        Err(_) => "not available".to_string(),
    };

    vec![
        "Configuration Summary:".to_string(),
        format!("  Environment: {:?}", config.environment),
        format!("  Log Level: {}", config.application.log_level),
        format!("  FHIR Base URL: {}", config.fhir.base_url),
        format!("  FHIR Token URL: {}", config.fhir.token_url),
        format!("  Client ID: {}", presence(client_id_set)),
        format!("  Client Secret: {}", presence(client_secret_set)),
        format!("  TLS Verification: {}", config.fhir.tls_verify),
        format!(
            "  Report Fetch Attempts: {}",
            config.fhir.report_retry.max_attempts
        ),
        format!("  Chat API Key: {chat_key}"),
        format!(
            "  Credential Sources: {}",
            resolver.source_names().join(" → ")
        ),
        format!(
            "  Redact Patient ID / DOB: {} / {}",
            config.redaction.redact_patient_id, config.redaction.redact_date_of_birth
        ),
        format!(
            "  Redact All Occurrences: {}",
            config.redaction.redact_all_occurrences
        ),
        format!(
            "  Request Timeout: {}s",
            config.gateway.request_timeout_seconds
        ),
        format!("  Max Concurrency: {}", config.gateway.max_concurrency),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::secret_string;

    #[test]
    fn test_summary_never_prints_secrets() {
        let mut config = AegisConfig::default();
        config.fhir.client_id = Some("epic-app".to_string());
        config.fhir.client_secret = Some(secret_string("super-secret".to_string()));
        config.credentials.api_key = Some(secret_string("sk-chat-key".to_string()));

        let summary = summary_lines(&config).join("\n");
        assert!(summary.contains("Client Secret: configured"));
        assert!(summary.contains("Chat API Key: available (environment)"));
        assert!(!summary.contains("super-secret"));
        assert!(!summary.contains("sk-chat-key"));
        assert!(!summary.contains("epic-app"));
    }

    #[test]
    fn test_summary_reports_missing_client_secret() {
        let summary = summary_lines(&AegisConfig::default()).join("\n");
        assert!(summary.contains("Client Secret: missing"));
    }
}
