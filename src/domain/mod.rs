//! Domain models and types for Aegis.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Strongly-typed identifiers** ([`PatientId`])
//! - **Credentials** ([`AccessToken`])
//! - **Clinical data** ([`Bundle`], [`BundleEntry`])
//! - **Error types** ([`AegisError`], [`FhirError`], [`CredentialError`])
//! - **Result type alias** ([`Result`])
//!
//! # Error Handling
//!
//! All fallible operations return [`Result<T, AegisError>`]:
//!
//! ```rust
//! use aegis::domain::{AegisError, FhirError, Result};
//!
//! fn example() -> Result<()> {
//!     // Adapter errors convert with the ? operator
//!     Err(FhirError::NotFound)?;
//!     Ok(())
//! }
//! ```

pub mod bundle;
pub mod errors;
pub mod ids;
pub mod result;
pub mod token;

// Re-export commonly used types for convenience
pub use bundle::{Bundle, BundleEntry};
pub use errors::{AegisError, CredentialError, FhirError};
pub use ids::PatientId;
pub use result::Result;
pub use token::AccessToken;
