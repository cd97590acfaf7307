//! Random (v4) id generator.

use catalog_core::application::ports::IdGenerator;
use uuid::Uuid;

/// Production generator: every id is a random UUID v4.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomIdGenerator;

impl RandomIdGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl IdGenerator for RandomIdGenerator {
    fn generate(&self) -> Uuid {
        Uuid::new_v4()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_v4_and_distinct() {
        let ids = RandomIdGenerator::new();
        let a = ids.generate();
        let b = ids.generate();

        assert_eq!(a.get_version_num(), 4);
        assert_ne!(a, b);
    }
}
