//! Value enum for dynamic field values

use chrono::DateTime;
use chrono::Utc;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde::Serialize;

use super::Record;

/// A dynamic value that can hold any related-list field type.
///
/// This enum represents all possible values a fetched record field can carry.
/// Relationship fields resolved by the platform arrive as nested [`Record`]
/// values and are traversed by dotted field paths (one level deep).
///
/// # Example
///
/// ```
/// use relatedlist_lib::model::Value;
///
/// let name = Value::from("Acme Corp");
/// let employees = Value::from(120i64);
/// let active = Value::from(true);
/// let empty = Value::Null;
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// Null/empty value.
    Null,
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// Floating point value.
    Float(f64),
    /// Currency amount with exact precision.
    Currency(Decimal),
    /// String value.
    String(String),
    /// Date/time value.
    Date(DateTime<Utc>),
    /// Nested record from a resolved relationship field.
    Record(Box<Record>),
}

impl Value {
    /// Returns the type name of this value, for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Currency(_) => "currency",
            Self::String(_) => "string",
            Self::Date(_) => "date",
            Self::Record(_) => "record",
        }
    }

    /// Returns `true` if this value is `Null`.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Renders the value as display text.
    ///
    /// Nested records render as their primary display name when present,
    /// otherwise as an empty string. `Null` renders empty.
    pub fn display_text(&self) -> String {
        match self {
            Self::Null => String::new(),
            Self::Bool(b) => b.to_string(),
            Self::Int(n) => n.to_string(),
            Self::Float(n) => n.to_string(),
            Self::Currency(d) => d.to_string(),
            Self::String(s) => s.clone(),
            Self::Date(dt) => dt.to_rfc3339(),
            Self::Record(r) => r.display_name().unwrap_or_default().to_string(),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Self::Int(n as i64)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Float(n)
    }
}

impl From<Decimal> for Value {
    fn from(d: Decimal) -> Self {
        Self::Currency(d)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(dt: DateTime<Utc>) -> Self {
        Self::Date(dt)
    }
}

impl From<Record> for Value {
    fn from(r: Record) -> Self {
        Self::Record(Box::new(r))
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(v) => v.into(),
            None => Self::Null,
        }
    }
}
