//! Result type alias for Aegis
//!
//! This module provides a convenient Result type alias that uses AegisError
//! as the error type.

use super::errors::AegisError;

/// Result type alias for Aegis operations
///
/// # Examples
///
/// ```
/// use aegis::domain::result::Result;
/// use aegis::domain::errors::AegisError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(AegisError::Validation("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, AegisError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::{AegisError, FhirError};

    #[test]
    fn test_result_with_question_mark() -> Result<()> {
        fn inner() -> Result<i32> {
            Ok(42)
        }

        let value = inner()?;
        assert_eq!(value, 42);
        Ok(())
    }

    #[test]
    fn test_fhir_error_propagates_with_question_mark() {
        fn inner() -> Result<()> {
            Err(FhirError::NotFound)?;
            Ok(())
        }

        assert!(matches!(inner(), Err(AegisError::Fhir(FhirError::NotFound))));
    }
}
