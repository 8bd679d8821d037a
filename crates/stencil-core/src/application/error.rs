//! Application layer errors.
//!
//! These errors represent failures in orchestration and emission, not
//! generation logic. Entity and naming failures are `DomainError` from
//! `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// The emission sink could not persist an artifact.
    #[error("Failed to write {path}: {reason}")]
    EmissionFailed { path: PathBuf, reason: String },

    /// A directory needed for emission could not be created.
    #[error("Failed to create directory {path}: {reason}")]
    DirectoryCreationFailed { path: PathBuf, reason: String },

    /// Shared sink state was poisoned by a panicking writer.
    #[error("Filesystem lock poisoned")]
    FilesystemLock,

    /// The domain manifest could not be read or parsed.
    #[error("Invalid domain manifest {path}: {reason}")]
    InvalidManifest { path: PathBuf, reason: String },

    /// The domain manifest does not exist.
    #[error("Domain manifest not found: {path}")]
    ManifestNotFound { path: PathBuf },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::EmissionFailed { path, .. } => vec![
                format!("Failed to write: {}", path.display()),
                "Check that you have write permissions and free disk space".into(),
                "Generation is idempotent: re-run it once the problem is fixed".into(),
            ],
            Self::DirectoryCreationFailed { path, .. } => vec![
                format!("Failed to create: {}", path.display()),
                "Check that the solution, src and test directories are writable".into(),
            ],
            Self::FilesystemLock => vec!["Try again; a previous write panicked".into()],
            Self::InvalidManifest { .. } => vec![
                "Manifests are TOML (.toml) or JSON (.json)".into(),
                "Each entity needs a name and a list of properties".into(),
            ],
            Self::ManifestNotFound { path } => vec![
                format!("No file at {}", path.display()),
                "Pass the path to your domain manifest".into(),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::EmissionFailed { .. } | Self::DirectoryCreationFailed { .. } => {
                ErrorCategory::Emission
            }
            Self::FilesystemLock => ErrorCategory::Internal,
            Self::InvalidManifest { .. } => ErrorCategory::Configuration,
            Self::ManifestNotFound { .. } => ErrorCategory::NotFound,
        }
    }
}
