//! # Error Crate Tests
//!
//! Tests for error construction, conversion, and HTTP mapping.

#[cfg(test)]
mod app_error_tests {
    use error::AppError;

    #[test]
    fn test_error_creation() {
        let error = AppError::not_found("Company 12");
        assert!(matches!(error, AppError::NotFound { .. }));
    }

    #[test]
    fn test_multiple_error_types() {
        let errors = vec![
            AppError::not_found("Zone 1"),
            AppError::conflict("items"),
            AppError::transaction_failure("rolled back"),
            AppError::config("cascade not registered for Item"),
        ];

        let codes: Vec<&str> = errors.iter().map(AppError::code).collect();
        assert_eq!(
            codes,
            vec!["NOT_FOUND", "CONFLICT", "TRANSACTION_FAILURE", "CONFIG_ERROR"]
        );
    }

    #[test]
    fn test_only_serialization_conflicts_are_retryable() {
        assert!(AppError::retryable_conflict("deadlock detected").is_retryable());
        assert!(!AppError::conflict("foreign key").is_retryable());
        assert!(!AppError::transaction_failure("boom").is_retryable());
        assert!(!AppError::database("boom").is_retryable());
    }
}

#[cfg(test)]
mod result_ext_tests {
    use error::{AppError, Result, ResultExt};

    #[test]
    fn test_result_ext_chains_context() {
        let result: Result<()> = Err(AppError::database("disk full"));
        let err = result
            .context("removing inventory rows")
            .context("branch 4")
            .unwrap_err();

        assert_eq!(err.message(), "branch 4: removing inventory rows: disk full");
    }
}
