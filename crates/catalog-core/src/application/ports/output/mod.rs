//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `catalog-adapters` crate provides implementations.

use std::path::Path;

use crate::domain::{ProductDraft, ProductDraftInput};
use crate::error::CatalogResult;

pub use crate::domain::IdGenerator;

/// Port for accepted products.
///
/// Implemented by:
/// - `catalog_adapters::sink::LoggingSink` (logs the record, like a form submit handler)
/// - `catalog_adapters::sink::MemorySink` (keeps records for inspection and tests)
#[cfg_attr(test, mockall::automock)]
pub trait ProductSink: Send + Sync {
    /// Receive one accepted product.
    fn accept(&self, product: &ProductDraft) -> CatalogResult<()>;
}

/// A raw draft together with where it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedDraft {
    /// Human-readable origin such as `drafts/lamp.json` or `batch.toml#2`.
    pub origin: String,
    pub input: ProductDraftInput,
}

/// Port for reading raw drafts.
///
/// Implemented by:
/// - `catalog_adapters::draft_loader::DraftLoader` (JSON and TOML files, directories)
#[cfg_attr(test, mockall::automock)]
pub trait DraftSource: Send + Sync {
    /// Load every draft found at `path`.
    fn load(&self, path: &Path) -> CatalogResult<Vec<LoadedDraft>>;
}
