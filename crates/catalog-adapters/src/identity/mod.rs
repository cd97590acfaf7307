//! Id generator adapters.

mod random;
mod sequential;

pub use random::RandomIdGenerator;
pub use sequential::SequentialIdGenerator;
