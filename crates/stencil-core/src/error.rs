//! Unified error handling for Stencil Core.
//!
//! This module provides a unified error type that wraps domain and application
//! errors, with rich context and user-actionable suggestions.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for Stencil Core operations.
#[derive(Debug, Error, Clone)]
pub enum StencilError {
    /// Entity invariants or name resolution (domain layer).
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    /// Emission and orchestration failures (application layer).
    #[error("Application error: {0}")]
    Application(#[from] ApplicationError),

    /// Unexpected internal errors (bugs).
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl StencilError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Internal { .. } => vec!["This appears to be a bug in Stencil".into()],
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Configuration => ErrorCategory::Configuration,
                crate::domain::ErrorCategory::Resolution => ErrorCategory::Resolution,
                crate::domain::ErrorCategory::NotFound => ErrorCategory::NotFound,
            },
            Self::Application(e) => e.category(),
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Resolution,
    NotFound,
    Emission,
    Internal,
}

/// Convenient result type alias.
pub type StencilResult<T> = Result<T, StencilError>;

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn domain_categories_are_mapped() {
        let err: StencilError = DomainError::EmptyEntityName.into();
        assert_eq!(err.category(), ErrorCategory::Configuration);

        let err: StencilError = DomainError::UnresolvableName {
            entity: "Order".into(),
            artifact: "DeleteOrder.cs".into(),
            reason: "src directory is empty".into(),
        }
        .into();
        assert_eq!(err.category(), ErrorCategory::Resolution);
    }

    #[test]
    fn emission_errors_keep_the_path() {
        let err: StencilError = ApplicationError::EmissionFailed {
            path: PathBuf::from("/sln/src/DeleteOrder.cs"),
            reason: "permission denied".into(),
        }
        .into();
        assert_eq!(err.category(), ErrorCategory::Emission);
        assert!(err.to_string().contains("/sln/src/DeleteOrder.cs"));
    }

    #[test]
    fn internal_errors_ask_for_a_report() {
        let err = StencilError::Internal {
            message: "fragment out of order".into(),
        };
        assert_eq!(err.category(), ErrorCategory::Internal);
        assert!(err.to_string().contains("This is a bug"));
    }
}
