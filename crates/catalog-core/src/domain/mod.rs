//! Core domain layer for the catalog.
//!
//! Pure business logic: the product draft model, the rule table and the
//! validator that applies it. Nothing here performs I/O; identity generation
//! is reached through the [`IdGenerator`] capability so the layer stays
//! deterministic under test.
//!
//! ## Layout
//!
//! - **entities**: raw [`ProductDraftInput`] and accepted [`ProductDraft`]
//! - **rules**: [`ProductRules`], the declarative rule table
//! - **validation**: [`ProductValidator`], the single-pass engine driver
//! - **field / error**: per-field error map and the [`ErrorKind`] taxonomy

pub mod entities;
pub mod error;
pub mod field;
pub mod identity;
pub mod rules;
pub mod value_objects;

mod validation;

pub use entities::{ColorVariant, ColorVariantInput, ProductDraft, ProductDraftInput};
pub use error::{DomainError, ErrorCategory, ErrorKind};
pub use field::{FieldError, FieldErrors, FieldPath};
pub use identity::IdGenerator;
pub use rules::{
    Checked, ColorRules, FieldRules, Limits, Predicate, ProductRules, Rule, TextPattern,
    ValueType, DEFAULT_MAX_QUANTITY, MAX_PRICE,
};
pub use validation::ProductValidator;
pub use value_objects::Price;
