//! Configuration management for Aegis.
//!
//! One explicit [`AegisConfig`] is built at startup and handed to every
//! component that needs settings or secrets. Nothing else in the crate reads
//! process configuration on its own, except the environment credential source,
//! whose purpose is exactly that.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use aegis::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("aegis.toml")?;
//! println!("FHIR base URL: {}", config.fhir.base_url);
//! # Ok(())
//! # }
//! ```
//!
//! # Example Configuration
//!
//! ```toml
//! environment = "production"
//!
//! [application]
//! log_level = "info"
//!
//! [fhir]
//! base_url = "https://fhir.epic.com/interconnect-fhir-oauth/api/FHIR/R4"
//! token_url = "https://fhir.epic.com/interconnect-fhir-oauth/oauth2/token"
//! client_id = "${EPIC_CLIENT_ID}"
//! client_secret = "${EPIC_CLIENT_SECRET}"
//!
//! [redaction]
//! redact_patient_id = false
//! redact_date_of_birth = false
//! ```
//!
//! # Environment Variables
//!
//! `${VAR_NAME}` placeholders are substituted before parsing, and
//! `AEGIS_<SECTION>_<KEY>` variables override parsed values.

pub mod loader;
pub mod schema;
pub mod secret;

// Re-export commonly used types
pub use loader::load_config;
pub use schema::{
    AegisConfig, ApplicationConfig, CredentialsConfig, Environment, FhirConfig, GatewayConfig,
    LoggingConfig, RedactionConfig, RetryConfig, MAX_REPORT_ATTEMPTS,
};
pub use secret::{secret_string, secret_string_opt, SecretString, SecretValue};
