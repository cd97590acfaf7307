//! Deterministic id generator for reproducible runs and tests.

use std::sync::atomic::{AtomicU64, Ordering};

use catalog_core::application::ports::IdGenerator;
use uuid::{Builder, Uuid};

/// Produces the same sequence of v4-shaped ids for the same seed.
///
/// The ids carry the version and variant bits of a random UUID so they pass
/// the identifier rule like any generated id.
#[derive(Debug)]
pub struct SequentialIdGenerator {
    seed: u64,
    counter: AtomicU64,
}

impl SequentialIdGenerator {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            counter: AtomicU64::new(0),
        }
    }

    /// Number of ids handed out so far.
    pub fn issued(&self) -> u64 {
        self.counter.load(Ordering::Relaxed)
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn generate(&self) -> Uuid {
        let n = self.counter.fetch_add(1, Ordering::Relaxed);
        let hi = splitmix64(self.seed ^ n.rotate_left(32));
        let lo = splitmix64(hi ^ n);

        let mut bytes = [0u8; 16];
        bytes[..8].copy_from_slice(&hi.to_be_bytes());
        bytes[8..].copy_from_slice(&lo.to_be_bytes());
        Builder::from_random_bytes(bytes).into_uuid()
    }
}

fn splitmix64(mut x: u64) -> u64 {
    x = x.wrapping_add(0x9E37_79B9_7F4A_7C15);
    x = (x ^ (x >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    x = (x ^ (x >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    x ^ (x >> 31)
}
