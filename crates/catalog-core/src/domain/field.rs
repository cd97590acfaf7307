//! Field paths and the per-field error map returned by validation.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::error::ErrorKind;

/// Dotted/indexed location of a field inside a draft, e.g. `colors.0.price`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldPath(String);

impl FieldPath {
    /// A top-level field.
    pub fn new(field: impl Into<String>) -> Self {
        Self(field.into())
    }

    /// Path of the element at `index` inside this sequence field.
    pub fn index(&self, index: usize) -> Self {
        Self(format!("{}.{index}", self.0))
    }

    /// Path of a named child field.
    pub fn field(&self, name: &str) -> Self {
        Self(format!("{}.{name}", self.0))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for FieldPath {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// A single failed rule: stable kind and code plus the display message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub kind: ErrorKind,
    pub code: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(kind: ErrorKind, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            kind,
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.message, self.kind)
    }
}

/// Mapping from field path to the first rule that failed for that field.
///
/// Ordered by path so rendering and serialization are deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<FieldPath, FieldError>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an error; a field keeps only the first error reported for it.
    pub fn insert(&mut self, path: FieldPath, error: FieldError) {
        self.0.entry(path).or_insert(error);
    }

    pub fn get(&self, path: &str) -> Option<&FieldError> {
        self.0.get(&FieldPath::new(path))
    }

    pub fn contains(&self, path: &str) -> bool {
        self.get(path).is_some()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&FieldPath, &FieldError)> {
        self.0.iter()
    }

    pub fn paths(&self) -> impl Iterator<Item = &FieldPath> {
        self.0.keys()
    }

    /// Path to display message, the shape a form layer renders beside inputs.
    pub fn messages(&self) -> BTreeMap<String, String> {
        self.0
            .iter()
            .map(|(path, err)| (path.to_string(), err.message.clone()))
            .collect()
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let paths: Vec<&str> = self.0.keys().map(FieldPath::as_str).collect();
        match paths.len() {
            1 => write!(f, "1 invalid field ({})", paths[0]),
            n => write!(f, "{n} invalid fields ({})", paths.join(", ")),
        }
    }
}

impl std::error::Error for FieldErrors {}

impl<'a> IntoIterator for &'a FieldErrors {
    type Item = (&'a FieldPath, &'a FieldError);
    type IntoIter = std::collections::btree_map::Iter<'a, FieldPath, FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
