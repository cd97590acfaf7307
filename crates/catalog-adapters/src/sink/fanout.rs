//! Sink that forwards each product to several sinks.

use catalog_core::{application::ports::ProductSink, domain::ProductDraft, error::CatalogResult};

/// Delivers every product to each inner sink in insertion order.
///
/// Stops at the first failing sink; later sinks do not see that product.
#[derive(Default)]
pub struct FanOutSink {
    sinks: Vec<Box<dyn ProductSink>>,
}

impl FanOutSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a sink.
    pub fn with(mut self, sink: impl ProductSink + 'static) -> Self {
        self.sinks.push(Box::new(sink));
        self
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }
}

impl ProductSink for FanOutSink {
    fn accept(&self, product: &ProductDraft) -> CatalogResult<()> {
        self.sinks.iter().try_for_each(|sink| sink.accept(product))
    }
}
