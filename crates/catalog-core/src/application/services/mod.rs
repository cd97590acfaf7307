//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "submit a product draft".

pub mod create_product_service;

pub use create_product_service::{CreateProductService, RuleInfo, SubmitOutcome};
