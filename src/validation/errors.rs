use std::collections::BTreeMap;
use std::fmt;

use serde::ser::{Serialize, SerializeMap, Serializer};

use super::path::FieldPath;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ViolationKind {
    Required,
    Format,
    Length,
    CrossField,
    TemporalBound,
}

/// A single failed rule: what kind of rule it was and the user-facing message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Violation {
    pub kind: ViolationKind,
    pub message: String,
}

impl Violation {
    pub fn new(kind: ViolationKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// At most one violation per field path, ordered by form position.
///
/// Serializes as a JSON object mapping the dotted path to its message.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValidationErrors(BTreeMap<FieldPath, Violation>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a violation unless the path already has one.
    pub fn add(&mut self, path: FieldPath, violation: Violation) {
        self.0.entry(path).or_insert(violation);
    }

    pub fn get(&self, path: &FieldPath) -> Option<&Violation> {
        self.0.get(path)
    }

    pub fn message(&self, path: &FieldPath) -> Option<&str> {
        self.0.get(path).map(|v| v.message.as_str())
    }

    pub fn contains(&self, path: &FieldPath) -> bool {
        self.0.contains_key(path)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&FieldPath, &Violation)> {
        self.0.iter()
    }

    /// Violations belonging to the passenger at `index`.
    pub fn for_passenger(&self, index: usize) -> impl Iterator<Item = (&FieldPath, &Violation)> {
        self.0
            .iter()
            .filter(move |(path, _)| path.passenger_index() == Some(index))
    }

    pub fn into_result<T>(self, value: T) -> Result<T, Self> {
        if self.is_empty() { Ok(value) } else { Err(self) }
    }
}

impl Serialize for ValidationErrors {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (path, violation) in &self.0 {
            map.serialize_entry(&path.to_string(), &violation.message)?;
        }
        map.end()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (path, violation) in &self.0 {
            writeln!(f, "{}: {}", path, violation)?;
        }
        Ok(())
    }
}
