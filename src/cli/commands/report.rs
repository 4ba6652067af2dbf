//! Report command implementation
//!
//! Runs the full gateway sequence for one or more patients and prints the
//! redacted result for each.

use super::load_or_env;
use crate::config::secret_string;
use crate::credentials::SessionStore;
use crate::domain::PatientId;
use crate::gateway::{ComplianceGateway, ReportOutcome};
use clap::Args;
use std::fmt;

/// Arguments for the report command
#[derive(Args)]
pub struct ReportArgs {
    /// Patient identifier at the clinical system (repeatable)
    #[arg(short, long, required = true)]
    pub patient: Vec<String>,

    /// Clinical system username
    #[arg(short, long, env = "AEGIS_FHIR_USERNAME")]
    pub username: String,

    /// Clinical system password
    #[arg(long, env = "AEGIS_FHIR_PASSWORD", hide_env_values = true)]
    pub password: String,
}

impl fmt::Debug for ReportArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReportArgs")
            .field("patients", &self.patient.len())
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl ReportArgs {
    /// Execute the report command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        let config = match load_or_env(config_path) {
            Ok(c) => c,
            Err(e) => {
                crate::log_error_with_context!(&e, "Failed to load configuration");
                println!("❌ Failed to load configuration");
                println!("   Error: {e}");
                return Ok(e.exit_code());
            }
        };

        let patients = match self
            .patient
            .iter()
            .map(|p| PatientId::new(p.as_str()))
            .collect::<Result<Vec<_>, _>>()
        {
            Ok(p) => p,
            Err(e) => {
                println!("❌ {e}");
                return Ok(2);
            }
        };

        let gateway = match ComplianceGateway::new(&config, SessionStore::new()) {
            Ok(g) => g,
            Err(e) => {
                crate::log_error_with_context!(&e, "Failed to create compliance gateway");
                println!("❌ {}", e.user_message());
                return Ok(e.exit_code());
            }
        };

        tracing::info!(patients = patients.len(), "Fetching diagnostic reports");

        let password = secret_string(self.password.clone());
        let results = gateway
            .reports_for_patients(&self.username, &password, &patients)
            .await;

        let mut exit_code = 0;
        for (index, (patient, result)) in results.iter().enumerate() {
            println!("{}", patient_heading(index, patient));
            match result {
                Ok(ReportOutcome::Report(text)) => {
                    println!("{text}");
                }
                Ok(ReportOutcome::NoReport(text)) => {
                    println!("ℹ️  {text}");
                }
                Err(e) => {
                    crate::log_error_with_context!(e, "Report run failed");
                    println!("❌ {}", e.user_message());
                    if exit_code == 0 {
                        exit_code = e.exit_code();
                    }
                }
            }
            println!();
        }

        Ok(exit_code)
    }
}

/// Heading printed before each patient's result
///
/// The identifier itself is PHI, so only its position and digest are shown.
fn patient_heading(index: usize, patient: &PatientId) -> String {
    format!("🩺 Patient #{} ({})", index + 1, patient.digest())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_password() {
        let args = ReportArgs {
            patient: vec!["p1".to_string()],
            username: "clinician".to_string(),
            password: "hunter2".to_string(),
        };
        let debug = format!("{args:?}");
        assert!(!debug.contains("hunter2"));
        assert!(!debug.contains("p1"));
    }

    #[test]
    fn test_patient_heading_hides_identifier() {
        let patient = PatientId::new("erXuFYUfucBZaryVksYEcMg3").unwrap();
        let heading = patient_heading(0, &patient);
        assert!(heading.starts_with("🩺 Patient #1 ("));
        assert!(heading.contains(&patient.digest()));
        assert!(!heading.contains("erXuFYUfucBZaryVksYEcMg3"));
    }
}
