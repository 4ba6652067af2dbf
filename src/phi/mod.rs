//! PHI detection and HIPAA redaction
//!
//! Screens free-text that is about to leave the application (chat messages
//! sent to an external assistant) for protected health information.
//!
//! # Architecture
//!
//! - **Rules**: a fixed, ordered table of regex rules, one per category
//! - **Detection**: `detect` answers whether any rule matches; `scan` lists matches
//! - **Redaction**: per-category placeholders plus a single disclosure notice
//! - **Audit**: hashed records on the `aegis::audit` tracing target
//!
//! Placeholders and the disclosure notice produced by redaction are never
//! treated as PHI themselves, so redacting redacted text is a no-op.
//!
//! # Usage
//!
//! ```rust
//! use aegis::phi::RedactionEngine;
//!
//! let engine = RedactionEngine::new();
//! let message = engine.redact("My SSN is 123-45-6789");
//! assert!(message.was_redacted());
//! assert!(message.text().starts_with("My SSN is [REDACTED SSN]"));
//! ```

pub mod audit;
pub mod detector;
pub mod models;
pub mod patterns;
pub mod redaction;

pub use audit::AuditLogger;
pub use detector::PhiDetector;
pub use models::{PhiCategory, RedactedMessage, SensitiveSpan};
pub use patterns::{RuleTable, DISCLOSURE_SUFFIX};
pub use redaction::RedactionEngine;
