//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `catalog-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `IdGenerator`: Fresh ids for accepted products
//!   - `ProductSink`: Receives accepted products
//!   - `DraftSource`: Reads raw drafts from files
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (Defined in CLI layer, implemented by services)

pub mod output;

pub use output::{DraftSource, IdGenerator, LoadedDraft, ProductSink};
