//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "aegis.toml")]
    pub output: String,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing Aegis configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2);
        }

        match fs::write(&self.output, Self::generate_config()) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your settings", self.output);
                println!("  2. Create a .env file with your credentials:");
                println!("     - Set EPIC_CLIENT_ID and EPIC_CLIENT_SECRET");
                println!("     - Set AEGIS_API_KEY, or run: aegis set-key <KEY>");
                println!("  3. Validate configuration: aegis validate-config");
                println!("  4. Fetch a report: aegis report --patient <ID> --username <USER>");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {e}");
                Ok(5)
            }
        }
    }

    /// Sample configuration with comments
    fn generate_config() -> String {
        r#"# Aegis Configuration File
# Clinical data integration with HIPAA redaction

# Deployment environment (development | staging | production)
# Production requires https URLs and TLS verification.
environment = "development"

[application]
# Log level (trace, debug, info, warn, error)
log_level = "info"

# ============================================================================
# Clinical FHIR System
# ============================================================================
[fhir]
base_url = "https://fhir.epic.com/interconnect-fhir-oauth/api/FHIR/R4"
token_url = "https://fhir.epic.com/interconnect-fhir-oauth/oauth2/token"

# Application credentials (use environment variables)
client_id = "${EPIC_CLIENT_ID}"
client_secret = "${EPIC_CLIENT_SECRET}"

# HTTP request timeout in seconds
timeout_seconds = 30

# TLS/SSL verification
tls_verify = true

# Retry policy for report fetches (transport errors and 5xx only)
[fhir.report_retry]
max_attempts = 2          # 1-2
initial_delay_ms = 250
max_delay_ms = 2000
backoff_multiplier = 2.0

# ============================================================================
# Chat-service credential
# Resolved in order: environment variable, local store, session store
# ============================================================================
[credentials]
api_key_env = "AEGIS_API_KEY"
store_path = ".aegis/credentials.json"
store_key = "AGENT_2_API_KEY"

# ============================================================================
# Redaction policy
# ============================================================================
[redaction]
# "patient id" and "date of birth" are always detected; set these to also
# replace them with placeholders
redact_patient_id = false
redact_date_of_birth = false

# Replace every occurrence of a category instead of the first one
redact_all_occurrences = false

# Optional JSON-lines audit file (hashes and counts only)
# audit_log_path = "/var/log/aegis/redaction-audit.jsonl"

[gateway]
# Upper bound for authentication and report fetch, in seconds
request_timeout_seconds = 60

# Patients processed concurrently by `aegis report`
max_concurrency = 4

[logging]
local_enabled = false
local_path = "/var/log/aegis"
local_rotation = "daily"  # daily | hourly | never
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AegisConfig;
    use tempfile::TempDir;

    #[test]
    fn test_generated_config_parses() {
        let content = InitArgs::generate_config().replace("${EPIC_CLIENT_ID}", "app");
        let content = content.replace("${EPIC_CLIENT_SECRET}", "secret");
        let config: AegisConfig = toml::from_str(&content).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.credentials.store_key, "AGENT_2_API_KEY");
        assert_eq!(config.gateway.max_concurrency, 4);
    }

    #[tokio::test]
    async fn test_init_refuses_to_overwrite() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("aegis.toml");
        fs::write(&path, "existing").unwrap();

        let args = InitArgs {
            output: path.to_string_lossy().to_string(),
            force: false,
        };
        assert_eq!(args.execute().await.unwrap(), 2);
        assert_eq!(fs::read_to_string(&path).unwrap(), "existing");

        let args = InitArgs {
            output: path.to_string_lossy().to_string(),
            force: true,
        };
        assert_eq!(args.execute().await.unwrap(), 0);
        assert!(fs::read_to_string(&path).unwrap().contains("[fhir]"));
    }
}
