//! Application layer errors.
//!
//! These errors represent failures in orchestration, not business logic.
//! Rule violations are `DomainError::Rejected` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApplicationError {
    /// The sink refused an accepted product.
    #[error("Product sink rejected the product: {reason}")]
    SinkRejected { reason: String },

    /// Sink state is unavailable (lock poisoned).
    #[error("Product sink lock error")]
    SinkLockError,

    /// A draft file or directory could not be read.
    #[error("Failed to read drafts from {path}: {reason}")]
    DraftLoad { path: PathBuf, reason: String },

    /// A draft file was read but is not a draft or list of drafts.
    #[error("Failed to parse drafts in {path}: {reason}")]
    DraftParse { path: PathBuf, reason: String },

    /// A path was given whose extension no loader understands.
    #[error("Unsupported draft format: {path}")]
    UnsupportedFormat { path: PathBuf },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::SinkRejected { reason } => vec![
                format!("The product was valid but could not be stored: {reason}"),
                "Check the sink configuration and retry".into(),
            ],
            Self::SinkLockError => vec![
                "The product sink is locked".into(),
                "Try again in a moment".into(),
            ],
            Self::DraftLoad { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that the path exists and is readable".into(),
            ],
            Self::DraftParse { path, .. } => vec![
                format!("Fix the syntax in {}", path.display()),
                "A draft file holds one object, or a list of objects".into(),
                "TOML files may list drafts under [[drafts]]".into(),
            ],
            Self::UnsupportedFormat { path } => vec![
                format!("Cannot read {}", path.display()),
                "Supported extensions: .json, .toml".into(),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::SinkRejected { .. } | Self::SinkLockError => ErrorCategory::Internal,
            Self::DraftLoad { .. } => ErrorCategory::NotFound,
            Self::DraftParse { .. } | Self::UnsupportedFormat { .. } => ErrorCategory::Validation,
        }
    }

    /// Whether retrying the same call may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::SinkLockError)
    }
}
