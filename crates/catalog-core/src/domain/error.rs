// ============================================================================
// domain/error.rs - VALIDATION ERROR TAXONOMY
// ============================================================================

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::field::FieldErrors;

/// Machine-readable kind of a failed field rule.
///
/// Every [`FieldError`](crate::domain::FieldError) carries one of these next
/// to its display message so that non-UI consumers never have to match on
/// prose.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// The field is absent or null.
    RequiredMissing,
    /// The value could not be read as the expected type.
    TypeMismatch,
    /// A numeric bound was exceeded.
    OutOfRange,
    /// A text length bound was exceeded.
    LengthViolation,
    /// The text contains disallowed characters or lacks a required suffix.
    PatternMismatch,
    /// A refinement such as the cent-multiple check failed.
    CustomRuleViolation,
    /// The value is not a hyphenated UUID.
    InvalidIdentifier,
}

impl ErrorKind {
    pub const ALL: [ErrorKind; 7] = [
        Self::RequiredMissing,
        Self::TypeMismatch,
        Self::OutOfRange,
        Self::LengthViolation,
        Self::PatternMismatch,
        Self::CustomRuleViolation,
        Self::InvalidIdentifier,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::RequiredMissing => "required_missing",
            Self::TypeMismatch => "type_mismatch",
            Self::OutOfRange => "out_of_range",
            Self::LengthViolation => "length_violation",
            Self::PatternMismatch => "pattern_mismatch",
            Self::CustomRuleViolation => "custom_rule_violation",
            Self::InvalidIdentifier => "invalid_identifier",
        }
    }

    /// Evaluation stage of rules of this kind.
    ///
    /// Rules run in ascending stage order: presence and type, then bounds,
    /// then patterns, then custom refinements.
    pub const fn stage(&self) -> u8 {
        match self {
            Self::RequiredMissing | Self::TypeMismatch => 0,
            Self::OutOfRange | Self::LengthViolation => 1,
            Self::PatternMismatch | Self::InvalidIdentifier => 2,
            Self::CustomRuleViolation => 3,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Root domain error type.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    /// The draft failed one or more field rules.
    #[error("Draft rejected: {0}")]
    Rejected(FieldErrors),

    /// A field name that is not part of the product draft.
    #[error("Unknown draft field: {field}")]
    UnknownField { field: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Rejected(errors) => {
                let mut out: Vec<String> = errors
                    .iter()
                    .map(|(path, err)| format!("{path}: {}", err.message))
                    .collect();
                out.push("Correct the fields above and resubmit".into());
                out
            }
            Self::UnknownField { field } => vec![
                format!("'{field}' is not a product field"),
                "Known fields: id, name, description, price, imageURL, quantity, colors".into(),
            ],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Rejected(_) => ErrorCategory::Validation,
            Self::UnknownField { .. } => ErrorCategory::NotFound,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Internal,
}
