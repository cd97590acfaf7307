//! Domain value objects.
//!
//! # Design
//!
//! These are pure value types with equality-by-value and no identity. They
//! are only constructed from values that already passed the field rules, so
//! they hold no validation logic of their own.

use std::fmt;

use serde::{Serialize, Serializer};

/// A monetary amount stored as whole cents.
///
/// Storing cents makes the normalized draft exact: `19.99` is kept as `1999`
/// and serializes back to `19.99` without binary floating-point drift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Price(u32);

impl Price {
    pub const ZERO: Price = Price(0);

    pub const fn from_cents(cents: u32) -> Self {
        Self(cents)
    }

    /// Convert a dollar amount that already passed the range and cent rules.
    pub(crate) fn from_dollars(dollars: f64) -> Self {
        Self((dollars * 100.0).round() as u32)
    }

    pub const fn cents(&self) -> u32 {
        self.0
    }

    pub fn as_dollars(&self) -> f64 {
        f64::from(self.0) / 100.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_dollars())
    }
}
