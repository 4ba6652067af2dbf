//! Compliance gateway
//!
//! The orchestration layer between the clinical system and the conversational
//! assistant:
//!
//! ```text
//! resolve chat credential → authenticate → fetch DiagnosticReport bundle
//!     → render → redact → OutboundText
//! ```
//!
//! User chat messages and file analysis output take the same final redaction
//! step. Nothing reaches the assistant except [`OutboundText`].

pub mod outbound;
pub mod service;
pub mod suggestions;

pub use outbound::OutboundText;
pub use service::{
    ComplianceGateway, FileAnalyzer, ReportOutcome, CLEAR_NOTICE, NO_REPORT_MESSAGE,
    REPORT_FORMAT_FALLBACK, SENSITIVE_NOTICE,
};
pub use suggestions::quick_replies;

/// Error type surfaced to gateway callers
pub type GatewayError = crate::domain::AegisError;
