//! Application layer errors.
//!
//! These errors represent failures in orchestration, not business logic.
//! Business logic errors are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// Template rendering failed outside of variable resolution.
    #[error("Template rendering failed: {reason}")]
    RenderingFailed { reason: String },

    /// A new file would land on a path that already exists.
    #[error("Refusing to overwrite existing file {path}")]
    Conflict { path: PathBuf },

    /// A file the mutators edit is missing.
    #[error("Target file not found: {path}")]
    TargetMissing { path: PathBuf },

    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// Shared state lock poisoned.
    #[error("Internal lock poisoned")]
    StoreLockError,

    /// Validation failed (application-level, not domain).
    #[error("Validation failed: {0}")]
    ValidationFailed(String),
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Conflict { path } => vec![
                format!("{} already exists", path.display()),
                "Pick another operation name, or remove the file first".into(),
            ],
            Self::TargetMissing { path } => vec![
                format!("Expected {} to exist", path.display()),
                "Run graft from the app root, or pass --path".into(),
                "Check the [layout] section of your config".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have read and write permissions".into(),
            ],
            Self::StoreLockError => vec!["Try again in a moment".into()],
            _ => vec!["Check the error details above".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::RenderingFailed { .. } => ErrorCategory::Render,
            Self::Conflict { .. } => ErrorCategory::Conflict,
            Self::TargetMissing { .. } | Self::FilesystemError { .. } => ErrorCategory::Io,
            Self::StoreLockError => ErrorCategory::Internal,
            Self::ValidationFailed(_) => ErrorCategory::Validation,
        }
    }
}
