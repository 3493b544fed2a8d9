//! Application layer errors.
//!
//! These errors represent failures in orchestration and at the ports, not in
//! the build graph itself. Build graph errors are `DomainError` from
//! `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApplicationError {
    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// A glob matched nothing and was not allowed to.
    #[error("Glob expanded to empty set: {description}")]
    EmptyGlob { description: String },

    /// A glob pattern could not be compiled.
    #[error("Invalid glob pattern '{pattern}': {reason}")]
    InvalidGlob { pattern: String, reason: String },

    /// Adapter state access failed (lock poisoned).
    #[error("Adapter state lock poisoned")]
    StoreLockError,
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
            ],
            Self::EmptyGlob { description } => vec![
                format!("No files matched: {}", description),
                "Check the patterns are relative to the build description directory".into(),
                "Set can_be_empty(true) if no matches is acceptable".into(),
            ],
            Self::InvalidGlob { pattern, .. } => vec![format!("Fix the pattern '{}'", pattern)],
            Self::StoreLockError => vec!["A previous operation panicked; start over".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::FilesystemError { .. } | Self::StoreLockError => ErrorCategory::Internal,
            Self::EmptyGlob { .. } => ErrorCategory::NotFound,
            Self::InvalidGlob { .. } => ErrorCategory::Validation,
        }
    }
}
