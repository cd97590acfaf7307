//! Application layer for the catalog.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (CreateProductService)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! business rules itself. Every rule lives in `crate::domain::rules`.

pub mod error;
pub mod ports;
pub mod services;

pub use services::{CreateProductService, RuleInfo, SubmitOutcome};

// Re-export port traits (for adapter implementation)
pub use ports::{DraftSource, IdGenerator, LoadedDraft, ProductSink};

pub use error::ApplicationError;
