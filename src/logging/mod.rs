//! Logging and observability
//!
//! Structured logging with support for:
//! - Console output with span timings
//! - JSON-formatted local file logs with rotation
//! - A redaction audit trail on the `aegis::audit` target
//!
//! Secrets, bearer tokens and unredacted message text are never logged.
//! Patient identifiers appear only as digests.
//!
//! # Example
//!
//! ```no_run
//! use aegis::logging::init_logging;
//! use aegis::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use aegis::log_error_with_context;
/// use aegis::domain::AegisError;
///
/// let error = AegisError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}

/// Log a retry attempt
///
/// # Example
///
/// ```no_run
/// use aegis::log_retry_attempt;
///
/// log_retry_attempt!(1, 2, 250, "Report endpoint returned status 503");
/// ```
#[macro_export]
macro_rules! log_retry_attempt {
    ($attempt:expr, $max_attempts:expr, $delay_ms:expr, $reason:expr) => {
        tracing::warn!(
            attempt = $attempt,
            max_attempts = $max_attempts,
            delay_ms = $delay_ms,
            reason = %$reason,
            "Request failed, retrying with exponential backoff"
        );
    };
}
