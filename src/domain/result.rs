//! Result type alias for Multi Export
//!
//! This module provides a convenient Result type alias that uses
//! MultiExportError as the error type.

use super::errors::MultiExportError;

/// Result type alias for Multi Export operations
///
/// # Examples
///
/// ```
/// use multi_export::domain::result::Result;
/// use multi_export::domain::errors::{MultiExportError, ValidationError};
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(MultiExportError::Validation(ValidationError::EmptySelection))
/// }
/// ```
pub type Result<T> = std::result::Result<T, MultiExportError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::errors::ValidationError;

    #[test]
    fn test_result_err() {
        let result: Result<i32> = Err(ValidationError::NoFormatsSelected.into());
        assert!(result.is_err());
    }

    #[test]
    fn test_result_with_question_mark() -> Result<()> {
        fn inner() -> std::result::Result<i32, ValidationError> {
            Ok(42)
        }

        let value = inner()?;
        assert_eq!(value, 42);
        Ok(())
    }
}
