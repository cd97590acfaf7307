//! Infrastructure adapters for the catalog.
//!
//! This crate implements the ports defined in `catalog-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod draft_loader;
pub mod identity;
pub mod sink;

// Re-export commonly used adapters
pub use draft_loader::DraftLoader;
pub use identity::{RandomIdGenerator, SequentialIdGenerator};
pub use sink::{AcceptedProduct, FanOutSink, LoggingSink, MemorySink};
