//! External system integrations for Aegis.
//!
//! - [`fhir`] - Clinical FHIR R4 system (OAuth token endpoint and
//!   `DiagnosticReport` search)
//!
//! # Design Pattern
//!
//! Adapters follow the **Adapter Pattern** to isolate external dependencies and
//! enable testing with mock implementations. HTTP client errors are converted
//! to domain errors here and never cross this boundary.
//!
//! ```rust,no_run
//! use aegis::adapters::fhir::{DiagnosticReportFetcher, FhirAuthClient};
//! use aegis::config::FhirConfig;
//!
//! # async fn example() -> aegis::domain::Result<()> {
//! let config = FhirConfig::default();
//! let auth = FhirAuthClient::new(&config)?;
//! let fetcher = DiagnosticReportFetcher::new(&config)?;
//!
//! let token = auth.authenticate("clinician", "password").await?;
//! if let Some(bundle) = fetcher.fetch_report(&token, "erXuFYUfucBZaryVksYEcMg3").await? {
//!     println!("{} reports", bundle.len());
//! }
//! # Ok(())
//! # }
//! ```

pub mod fhir;
