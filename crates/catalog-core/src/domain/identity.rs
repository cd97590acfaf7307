//! Identity generation capability.

use uuid::Uuid;

/// Supplies fresh ids for accepted products and their color variants.
///
/// The validator never creates ids on its own; callers inject a generator so
/// tests can use a deterministic one.
#[cfg_attr(test, mockall::automock)]
pub trait IdGenerator: Send + Sync {
    fn generate(&self) -> Uuid;
}
