//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::AegisConfig;
use super::secret::secret_string_opt;
use crate::domain::errors::AegisError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into AegisConfig
/// 4. Applies environment variable overrides (AEGIS_* prefix, EPIC_CLIENT_*)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if the file cannot be read, a referenced environment
/// variable is unset, TOML parsing fails or validation fails.
///
/// # Examples
///
/// ```no_run
/// use aegis::config::loader::load_config;
///
/// let config = load_config("aegis.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<AegisConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(AegisError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        AegisError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let mut config: AegisConfig = toml::from_str(&contents)
        .map_err(|e| AegisError::Configuration(format!("Failed to parse TOML: {e}")))?;

    apply_env_overrides(&mut config);
    finish(config)
}

impl AegisConfig {
    /// Loads configuration from a TOML file, see [`load_config`]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        load_config(path)
    }

    /// Builds a configuration from defaults and environment variables only
    ///
    /// Used when no configuration file exists.
    pub fn from_env() -> Result<Self> {
        let mut config = AegisConfig::default();
        apply_env_overrides(&mut config);
        finish(config)
    }
}

fn finish(config: AegisConfig) -> Result<AegisConfig> {
    config.validate().map_err(|e| {
        AegisError::Configuration(format!("Configuration validation failed: {e}"))
    })?;

    tracing::debug!(
        environment = ?config.environment,
        fhir_base_url = %config.fhir.base_url,
        client_id_configured = config.fhir.client_id.is_some(),
        client_secret_configured = config.fhir.client_secret.is_some(),
        "Configuration loaded"
    );

    Ok(config)
}

fn env_var_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").expect("environment placeholder pattern is valid")
    })
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are copied untouched.
///
/// # Errors
///
/// Returns an error naming every referenced variable that is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = env_var_pattern();
    let mut result = String::with_capacity(input.len());
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    processed_line = processed_line.replace(&format!("${{{var_name}}}"), &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(AegisError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

fn env_nonempty(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

/// Applies environment variable overrides
///
/// `AEGIS_<SECTION>_<KEY>` variables override file values. The clinical
/// client credentials additionally fall back to `EPIC_CLIENT_ID` and
/// `EPIC_CLIENT_SECRET` when neither the file nor an override sets them.
fn apply_env_overrides(config: &mut AegisConfig) {
    if let Some(val) = env_nonempty("AEGIS_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // FHIR overrides
    if let Some(val) = env_nonempty("AEGIS_FHIR_BASE_URL") {
        config.fhir.base_url = val;
    }
    if let Some(val) = env_nonempty("AEGIS_FHIR_TOKEN_URL") {
        config.fhir.token_url = val;
    }
    if let Some(val) = env_nonempty("AEGIS_FHIR_CLIENT_ID").or_else(|| {
        config
            .fhir
            .client_id
            .is_none()
            .then(|| env_nonempty("EPIC_CLIENT_ID"))
            .flatten()
    }) {
        config.fhir.client_id = Some(val);
    }
    if let Some(secret) = secret_string_opt(env_nonempty("AEGIS_FHIR_CLIENT_SECRET").or_else(|| {
        config
            .fhir
            .client_secret
            .is_none()
            .then(|| env_nonempty("EPIC_CLIENT_SECRET"))
            .flatten()
    })) {
        config.fhir.client_secret = Some(secret);
    }
    if let Some(val) = env_nonempty("AEGIS_FHIR_TIMEOUT_SECONDS") {
        if let Ok(secs) = val.parse() {
            config.fhir.timeout_seconds = secs;
        }
    }
    if let Some(val) = env_nonempty("AEGIS_FHIR_TLS_VERIFY") {
        config.fhir.tls_verify = val.parse().unwrap_or(true);
    }

    // Credential overrides
    if let Some(val) = env_nonempty("AEGIS_CREDENTIALS_STORE_PATH") {
        config.credentials.store_path = val;
    }
    if config.credentials.api_key.is_none() {
        config.credentials.api_key = secret_string_opt(env_nonempty(&config.credentials.api_key_env));
    }

    // Redaction overrides
    if let Some(val) = env_nonempty("AEGIS_REDACTION_REDACT_PATIENT_ID") {
        config.redaction.redact_patient_id = val.parse().unwrap_or(false);
    }
    if let Some(val) = env_nonempty("AEGIS_REDACTION_REDACT_DATE_OF_BIRTH") {
        config.redaction.redact_date_of_birth = val.parse().unwrap_or(false);
    }
    if let Some(val) = env_nonempty("AEGIS_REDACTION_AUDIT_LOG_PATH") {
        config.redaction.audit_log_path = Some(val);
    }

    // Gateway overrides
    if let Some(val) = env_nonempty("AEGIS_GATEWAY_REQUEST_TIMEOUT_SECONDS") {
        if let Ok(secs) = val.parse() {
            config.gateway.request_timeout_seconds = secs;
        }
    }

    // Logging overrides
    if let Some(val) = env_nonempty("AEGIS_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Some(val) = env_nonempty("AEGIS_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
}
