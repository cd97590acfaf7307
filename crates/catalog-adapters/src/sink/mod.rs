//! Product sink adapters.

mod fanout;
mod logging;
mod memory;

pub use fanout::FanOutSink;
pub use logging::LoggingSink;
pub use memory::{AcceptedProduct, MemorySink};
