//! Configuration schema types
//!
//! This module defines the configuration structure for Aegis. Every section
//! has serde defaults, so an empty file (or no file at all, see
//! [`AegisConfig::from_env`](crate::config::loader)) is a usable configuration.

use crate::config::SecretString;
use serde::{Deserialize, Serialize};

/// Runtime environment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Development environment
    #[default]
    Development,
    /// Staging environment
    Staging,
    /// Production environment
    Production,
}

/// Main Aegis configuration
///
/// Constructed once at startup and passed explicitly into the credential
/// resolver, the FHIR clients and the gateway.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AegisConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// Runtime environment (development, staging, production)
    #[serde(default)]
    pub environment: Environment,

    /// Clinical FHIR system connection
    #[serde(default)]
    pub fhir: FhirConfig,

    /// Chat-service credential sources
    #[serde(default)]
    pub credentials: CredentialsConfig,

    /// PHI redaction policy
    #[serde(default)]
    pub redaction: RedactionConfig,

    /// Orchestration settings
    #[serde(default)]
    pub gateway: GatewayConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AegisConfig {
    /// Validates the configuration
    ///
    /// Missing FHIR client credentials are not a validation error here: they
    /// are reported as a configuration error when authentication is attempted.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.fhir.validate(&self.environment)?;
        self.credentials.validate()?;
        self.gateway.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

/// Retry configuration for idempotent report fetches
///
/// The token exchange is never retried regardless of these settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Total attempts including the first (1 or 2)
    #[serde(default = "default_max_attempts")]
    pub max_attempts: usize,

    /// Delay before the second attempt in milliseconds
    #[serde(default = "default_initial_delay_ms")]
    pub initial_delay_ms: u64,

    /// Maximum delay in milliseconds
    #[serde(default = "default_max_delay_ms")]
    pub max_delay_ms: u64,

    /// Backoff multiplier
    #[serde(default = "default_backoff_multiplier")]
    pub backoff_multiplier: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            initial_delay_ms: default_initial_delay_ms(),
            max_delay_ms: default_max_delay_ms(),
            backoff_multiplier: default_backoff_multiplier(),
        }
    }
}

impl RetryConfig {
    fn validate(&self) -> Result<(), String> {
        if self.max_attempts == 0 || self.max_attempts > MAX_REPORT_ATTEMPTS {
            return Err(format!(
                "fhir.report_retry.max_attempts must be between 1 and {MAX_REPORT_ATTEMPTS}, got {}",
                self.max_attempts
            ));
        }
        if self.backoff_multiplier < 1.0 {
            return Err(format!(
                "fhir.report_retry.backoff_multiplier must be >= 1.0, got {}",
                self.backoff_multiplier
            ));
        }
        Ok(())
    }
}

/// Upper bound on report fetch attempts
pub const MAX_REPORT_ATTEMPTS: usize = 2;

/// Clinical FHIR system configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FhirConfig {
    /// FHIR R4 API base URL (without trailing slash)
    #[serde(default = "default_fhir_base_url")]
    pub base_url: String,

    /// OAuth token endpoint
    #[serde(default = "default_token_url")]
    pub token_url: String,

    /// Application client identifier (env: EPIC_CLIENT_ID)
    #[serde(default)]
    pub client_id: Option<String>,

    /// Application client secret (env: EPIC_CLIENT_SECRET)
    /// Stored securely in memory and automatically zeroized on drop
    #[serde(default)]
    pub client_secret: Option<SecretString>,

    /// HTTP request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// TLS certificate verification enabled
    #[serde(default = "default_true")]
    pub tls_verify: bool,

    /// Retry policy for report fetches
    #[serde(default)]
    pub report_retry: RetryConfig,
}

impl Default for FhirConfig {
    fn default() -> Self {
        Self {
            base_url: default_fhir_base_url(),
            token_url: default_token_url(),
            client_id: None,
            client_secret: None,
            timeout_seconds: default_timeout_seconds(),
            tls_verify: true,
            report_retry: RetryConfig::default(),
        }
    }
}

impl FhirConfig {
    fn validate(&self, environment: &Environment) -> Result<(), String> {
        for (name, url) in [("fhir.base_url", &self.base_url), ("fhir.token_url", &self.token_url)] {
            if url.is_empty() {
                return Err(format!("{name} cannot be empty"));
            }
            let parsed = url::Url::parse(url).map_err(|e| format!("{name} is not a valid URL: {e}"))?;
            match parsed.scheme() {
                "https" => {}
                "http" if *environment != Environment::Production => {}
                "http" => {
                    return Err(format!("{name} must use https:// in production"));
                }
                scheme => {
                    return Err(format!("{name} has unsupported scheme '{scheme}'"));
                }
            }
        }

        if self.timeout_seconds == 0 {
            return Err("fhir.timeout_seconds must be greater than 0".to_string());
        }

        if !self.tls_verify && *environment == Environment::Production {
            return Err(
                "fhir.tls_verify cannot be disabled in production environment".to_string(),
            );
        }

        self.report_retry.validate()
    }
}

/// Chat-service credential sources
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CredentialsConfig {
    /// Environment variable consulted by the process-configuration source
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// API key captured from the process configuration at startup
    #[serde(default)]
    pub api_key: Option<SecretString>,

    /// Path of the durable local credential store (JSON object)
    #[serde(default = "default_store_path")]
    pub store_path: String,

    /// Key under which the API key is saved in the local and session stores
    #[serde(default = "default_store_key")]
    pub store_key: String,
}

impl Default for CredentialsConfig {
    fn default() -> Self {
        Self {
            api_key_env: default_api_key_env(),
            api_key: None,
            store_path: default_store_path(),
            store_key: default_store_key(),
        }
    }
}

impl CredentialsConfig {
    fn validate(&self) -> Result<(), String> {
        if self.api_key_env.is_empty() {
            return Err("credentials.api_key_env cannot be empty".to_string());
        }
        if self.store_path.is_empty() {
            return Err("credentials.store_path cannot be empty".to_string());
        }
        if self.store_key.is_empty() {
            return Err("credentials.store_key cannot be empty".to_string());
        }
        Ok(())
    }
}

/// PHI redaction policy
///
/// "patient id" and "date of birth" are always detected. Whether they are
/// also substituted is a policy decision, off by default.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RedactionConfig {
    /// Substitute "patient id" with `[REDACTED PATIENT ID]`
    #[serde(default)]
    pub redact_patient_id: bool,

    /// Substitute "date of birth" with `[REDACTED DOB]`
    #[serde(default)]
    pub redact_date_of_birth: bool,

    /// Substitute every match of a category instead of only the first
    #[serde(default)]
    pub redact_all_occurrences: bool,

    /// Append JSON-lines audit records here (hashes and counts only)
    #[serde(default)]
    pub audit_log_path: Option<String>,
}

/// Orchestration configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Deadline for authentication and for report fetch, each, in seconds
    #[serde(default = "default_request_timeout_seconds")]
    pub request_timeout_seconds: u64,

    /// Maximum patients fetched concurrently by a batch run
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: usize,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            request_timeout_seconds: default_request_timeout_seconds(),
            max_concurrency: default_max_concurrency(),
        }
    }
}

impl GatewayConfig {
    fn validate(&self) -> Result<(), String> {
        if self.request_timeout_seconds == 0 {
            return Err("gateway.request_timeout_seconds must be greater than 0".to_string());
        }
        if self.max_concurrency == 0 || self.max_concurrency > 32 {
            return Err(format!(
                "gateway.max_concurrency must be between 1 and 32, got {}",
                self.max_concurrency
            ));
        }
        Ok(())
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable JSON file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Directory for log files
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Rotation policy: daily, hourly or never
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }
        if self.local_enabled && self.local_path.is_empty() {
            return Err("logging.local_path cannot be empty when local logging is enabled".to_string());
        }
        Ok(())
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_fhir_base_url() -> String {
    "https://fhir.epic.com/interconnect-fhir-oauth/api/FHIR/R4".to_string()
}

fn default_token_url() -> String {
    "https://fhir.epic.com/interconnect-fhir-oauth/oauth2/token".to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_max_attempts() -> usize {
    MAX_REPORT_ATTEMPTS
}

fn default_initial_delay_ms() -> u64 {
    250
}

fn default_max_delay_ms() -> u64 {
    2000
}

fn default_backoff_multiplier() -> f64 {
    2.0
}

fn default_api_key_env() -> String {
    "AEGIS_API_KEY".to_string()
}

fn default_store_path() -> String {
    ".aegis/credentials.json".to_string()
}

fn default_store_key() -> String {
    "AGENT_2_API_KEY".to_string()
}

fn default_request_timeout_seconds() -> u64 {
    60
}

fn default_max_concurrency() -> usize {
    4
}

fn default_local_path() -> String {
    "/var/log/aegis".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = AegisConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.fhir.report_retry.max_attempts, 2);
        assert_eq!(config.credentials.store_key, "AGENT_2_API_KEY");
    }

    #[test]
    fn test_application_config_validation() {
        let mut config = ApplicationConfig::default();
        assert!(config.validate().is_ok());

        config.log_level = "verbose".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_fhir_http_allowed_outside_production() {
        let config = FhirConfig {
            base_url: "http://localhost:8080/fhir".to_string(),
            token_url: "http://localhost:8080/token".to_string(),
            ..Default::default()
        };
        assert!(config.validate(&Environment::Development).is_ok());

        let err = config.validate(&Environment::Production).unwrap_err();
        assert!(err.contains("https"));
    }

    #[test]
    fn test_fhir_invalid_url() {
        let config = FhirConfig {
            base_url: "not a url".to_string(),
            ..Default::default()
        };
        assert!(config.validate(&Environment::Development).is_err());
    }

    #[test]
    fn test_fhir_tls_verification_in_production() {
        let config = FhirConfig {
            tls_verify: false,
            ..Default::default()
        };
        assert!(config.validate(&Environment::Development).is_ok());
        let err = config.validate(&Environment::Production).unwrap_err();
        assert!(err.contains("tls_verify"));
    }

    #[test]
    fn test_retry_attempts_bounded() {
        let mut retry = RetryConfig::default();
        retry.max_attempts = 3;
        assert!(retry.validate().is_err());

        retry.max_attempts = 0;
        assert!(retry.validate().is_err());

        retry.max_attempts = 1;
        assert!(retry.validate().is_ok());
    }

    #[test]
    fn test_gateway_config_validation() {
        let mut gateway = GatewayConfig::default();
        assert!(gateway.validate().is_ok());

        gateway.request_timeout_seconds = 0;
        assert!(gateway.validate().is_err());
    }

    #[test]
    fn test_logging_rotation_validation() {
        let mut logging = LoggingConfig::default();
        logging.local_rotation = "weekly".to_string();
        assert!(logging.validate().is_err());
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config: AegisConfig = toml::from_str("").unwrap();
        assert_eq!(config.application.log_level, "info");
        assert!(config.fhir.client_id.is_none());
        assert!(!config.redaction.redact_patient_id);
        assert!(!config.redaction.redact_date_of_birth);
    }
}
