//! Untyped rows handed over by fetch and load collaborators.

use serde::{Deserialize, Serialize};

/// A single untyped cell of a raw record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RawValue {
    /// Explicitly empty cell.
    Null,
    /// Numeric cell as delivered by the source.
    Number(f64),
    /// Textual cell; may hold a date, a number, or a sentinel such as `"."`.
    Text(String),
}

impl RawValue {
    /// Render the cell for diagnostics.
    #[must_use]
    pub fn display(&self) -> String {
        match self {
            Self::Null => String::new(),
            Self::Number(n) => n.to_string(),
            Self::Text(s) => s.clone(),
        }
    }
}

impl From<&str> for RawValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for RawValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<f64> for RawValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl<T: Into<Self>> From<Option<T>> for RawValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

/// An ordered key-value row. Field names vary by source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    fields: Vec<(String, RawValue)>,
}

impl RawRecord {
    /// Create an empty record.
    #[must_use]
    pub const fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Append a field, replacing an existing field of the same name.
    #[must_use]
    pub fn with(mut self, field: impl Into<String>, value: impl Into<RawValue>) -> Self {
        self.insert(field, value);
        self
    }

    /// Insert a field, replacing an existing field of the same name in place.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<RawValue>) {
        let field = field.into();
        let value = value.into();
        if let Some(slot) = self.fields.iter_mut().find(|(k, _)| *k == field) {
            slot.1 = value;
        } else {
            self.fields.push((field, value));
        }
    }

    /// Look up a field by name.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&RawValue> {
        self.fields
            .iter()
            .find_map(|(k, v)| (k == field).then_some(v))
    }

    /// True if the record carries the named field (even if its value is `Null`).
    #[must_use]
    pub fn contains(&self, field: &str) -> bool {
        self.fields.iter().any(|(k, _)| k == field)
    }

    /// Field names in insertion order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }

    /// Number of fields.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.fields.len()
    }

    /// True if the record has no fields.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K: Into<String>, V: Into<RawValue>> FromIterator<(K, V)> for RawRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut rec = Self::new();
        for (k, v) in iter {
            rec.insert(k, v);
        }
        rec
    }
}
