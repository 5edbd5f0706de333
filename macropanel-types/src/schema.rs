//! Declarations describing how to read a source's raw records.

use serde::{Deserialize, Serialize};

/// Where a record's calendar date lives and how to interpret it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum DateField {
    /// A textual date or timestamp; any time-of-day or offset is discarded.
    Text(String),
    /// A calendar year; the date is January 1 of that year.
    Year(String),
    /// Seconds since the Unix epoch, interpreted in UTC.
    EpochSeconds(String),
}

impl DateField {
    /// Name of the underlying raw field.
    #[must_use]
    pub fn field(&self) -> &str {
        match self {
            Self::Text(f) | Self::Year(f) | Self::EpochSeconds(f) => f,
        }
    }
}

/// Maps a raw value field to an output column name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueField {
    /// Raw field name in the source's records.
    pub field: String,
    /// Column name the normalized series is published under.
    pub column: String,
}

impl ValueField {
    /// Build a mapping from `field` to `column`.
    pub fn new(field: impl Into<String>, column: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            column: column.into(),
        }
    }

    /// Publish the field under its own name.
    pub fn same(field: impl Into<String>) -> Self {
        let field = field.into();
        Self {
            column: field.clone(),
            field,
        }
    }
}

/// Date field plus one or more value fields of a source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordSchema {
    /// Date field declaration.
    pub date: DateField,
    /// Value fields, in output column order.
    pub values: Vec<ValueField>,
}

impl RecordSchema {
    /// Schema with a textual date field and a single value field.
    pub fn single(date_field: impl Into<String>, value: ValueField) -> Self {
        Self {
            date: DateField::Text(date_field.into()),
            values: vec![value],
        }
    }

    /// Schema with an arbitrary date declaration and several value fields.
    #[must_use]
    pub const fn multi(date: DateField, values: Vec<ValueField>) -> Self {
        Self { date, values }
    }

    /// Output column names, in schema order.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.values.iter().map(|v| v.column.as_str())
    }
}
