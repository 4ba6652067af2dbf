// Aegis - Clinical Data Integration & Compliance Gateway
// Copyright (c) 2025 Aegis Contributors
// Licensed under the MIT License

//! # Aegis - Clinical Data Integration & Compliance Gateway
//!
//! Aegis sits between a clinical FHIR system and a conversational assistant.
//! It fetches diagnostic reports on behalf of a clinician and guarantees that
//! nothing leaves for the assistant without passing HIPAA redaction.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Resolving** the chat-service credential from an ordered list of sources
//! - **Authenticating** against the clinical OAuth endpoint (password grant)
//! - **Fetching** `DiagnosticReport` search bundles for a patient
//! - **Redacting** PHI from every outbound string
//!
//! ## Architecture
//!
//! Aegis follows a layered architecture:
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`gateway`] - Orchestration and the single outbound enforcement point
//! - [`phi`] - PHI detection, redaction and audit
//! - [`credentials`] - Credential sources and the fallback resolver
//! - [`adapters`] - External integrations (clinical FHIR system)
//! - [`domain`] - Core domain types and errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging and observability
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use aegis::config::{load_config, secret_string};
//! use aegis::credentials::SessionStore;
//! use aegis::domain::PatientId;
//! use aegis::gateway::{ComplianceGateway, ReportOutcome};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("aegis.toml")?;
//!     let gateway = ComplianceGateway::new(&config, SessionStore::new())?;
//!
//!     let patient = PatientId::new("erXuFYUfucBZaryVksYEcMg3")?;
//!     let password = secret_string("password".to_string());
//!
//!     match gateway.report_for_patient("clinician", &password, &patient).await? {
//!         ReportOutcome::Report(text) => println!("{text}"),
//!         ReportOutcome::NoReport(text) => println!("{text}"),
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Redaction
//!
//! ```rust
//! use aegis::phi::RedactionEngine;
//!
//! let engine = RedactionEngine::new();
//! let message = engine.redact("Call me, my phone number is on file");
//! assert_eq!(
//!     message.text(),
//!     "Call me, my [REDACTED PHONE] is on file [This message was redacted for HIPAA compliance.]"
//! );
//! ```
//!
//! ## Error Handling
//!
//! Aegis uses the [`domain::AegisError`] type for all errors. Each failure
//! class has its own user-facing message and CLI exit code:
//!
//! ```rust
//! use aegis::domain::{AegisError, FhirError};
//!
//! let error = AegisError::from(FhirError::InvalidCredentials);
//! assert_eq!(error.user_message(), "Login failed. Please check your credentials.");
//! assert_eq!(error.exit_code(), 4);
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod credentials;
pub mod domain;
pub mod gateway;
pub mod logging;
pub mod phi;
