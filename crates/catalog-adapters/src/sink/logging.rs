//! Sink that reports accepted products through `tracing`.

use catalog_core::{
    application::ports::ProductSink,
    domain::ProductDraft,
    error::{CatalogResult, Context},
};
use tracing::info;

/// Logs each accepted product as a JSON record at `INFO`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingSink;

impl LoggingSink {
    pub fn new() -> Self {
        Self
    }
}

impl ProductSink for LoggingSink {
    fn accept(&self, product: &ProductDraft) -> CatalogResult<()> {
        let record = serde_json::to_string(product).context("serialize accepted product")?;
        info!(
            id = %product.id,
            colors = product.colors.len(),
            product = %record,
            "product submitted"
        );
        Ok(())
    }
}
