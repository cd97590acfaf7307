//! Catalog Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for validating
//! product drafts before they enter a catalog, following hexagonal (ports and
//! adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           catalog-cli (CLI)             │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │        (CreateProductService)           │
//! │         Orchestrates Use Cases          │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ (Driven: IdGenerator, Sink, DraftSource)│
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     catalog-adapters (Infrastructure)   │
//! │  (RandomIdGenerator, MemorySink, etc)   │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Domain Layer (Pure Logic)        │
//! │ (ProductRules, ProductValidator, Draft) │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use catalog_core::prelude::*;
//!
//! # fn run(ids: Box<dyn IdGenerator>, sink: Box<dyn ProductSink>, draft: ProductDraftInput) -> CatalogResult<()> {
//! let service = CreateProductService::new(ids, sink);
//! match service.submit(draft)? {
//!     SubmitOutcome::Accepted { product, .. } => println!("created {}", product.id),
//!     SubmitOutcome::Rejected { errors, .. } => {
//!         for (path, err) in &errors {
//!             println!("{path}: {}", err.message);
//!         }
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        CreateProductService, RuleInfo, SubmitOutcome,
        ports::{DraftSource, IdGenerator, LoadedDraft, ProductSink},
    };
    pub use crate::domain::{
        ColorVariant, ColorVariantInput, ErrorKind, FieldError, FieldErrors, FieldPath, Limits,
        Price, ProductDraft, ProductDraftInput, ProductRules, ProductValidator,
    };
    pub use crate::error::{CatalogError, CatalogResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
