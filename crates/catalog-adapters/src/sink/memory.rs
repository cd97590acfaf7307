//! In-memory product sink.

use std::sync::{Arc, RwLock};

use catalog_core::{
    application::{ApplicationError, ports::ProductSink},
    domain::ProductDraft,
    error::CatalogResult,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

/// An accepted product and when it arrived.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AcceptedProduct {
    pub product: ProductDraft,
    pub accepted_at: DateTime<Utc>,
}

/// Thread-safe sink that keeps every accepted product in arrival order.
///
/// Clones share the same storage, so a test can keep one handle and give
/// another to the service.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    inner: Arc<RwLock<Vec<AcceptedProduct>>>,
}

impl MemorySink {
    /// Create a new empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// All accepted products, oldest first.
    pub fn list(&self) -> CatalogResult<Vec<AcceptedProduct>> {
        let inner = self
            .inner
            .read()
            .map_err(|_| ApplicationError::SinkLockError)?;
        Ok(inner.clone())
    }

    /// Find an accepted product by its generated id.
    pub fn get(&self, id: Uuid) -> CatalogResult<Option<AcceptedProduct>> {
        let inner = self
            .inner
            .read()
            .map_err(|_| ApplicationError::SinkLockError)?;
        Ok(inner.iter().find(|p| p.product.id == id).cloned())
    }

    /// Get the number of accepted products.
    pub fn len(&self) -> CatalogResult<usize> {
        let inner = self
            .inner
            .read()
            .map_err(|_| ApplicationError::SinkLockError)?;
        Ok(inner.len())
    }

    /// Check if nothing has been accepted.
    pub fn is_empty(&self) -> CatalogResult<bool> {
        Ok(self.len()? == 0)
    }

    /// Forget every accepted product.
    pub fn clear(&self) -> CatalogResult<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::SinkLockError)?;
        inner.clear();
        Ok(())
    }
}

impl ProductSink for MemorySink {
    fn accept(&self, product: &ProductDraft) -> CatalogResult<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::SinkLockError)?;

        inner.push(AcceptedProduct {
            product: product.clone(),
            accepted_at: Utc::now(),
        });
        debug!(id = %product.id, stored = inner.len(), "product stored");
        Ok(())
    }
}
