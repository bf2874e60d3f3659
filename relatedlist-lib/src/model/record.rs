//! Dynamic related record

use std::collections::HashMap;

use chrono::DateTime;
use chrono::Utc;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde::Serialize;

use super::Value;
use crate::error::FieldError;

/// One label/value pair of a record's card projection.
///
/// Card projections are derived once at ingestion from the resolved columns,
/// never lazily per render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardField {
    /// Display label, after any custom-label override.
    pub label: String,
    /// Flattened field key the value was read from.
    pub field: String,
    /// Pre-rendered display text.
    pub value: String,
}

/// A dynamic record fetched from the platform.
///
/// Records hold field values as a `HashMap<String, Value>`, allowing dynamic
/// access to any field. Typed getter methods provide safe access with proper
/// error handling. Records are immutable once ingested; derived fields
/// (`link_url`, `card_view`) are computed once at ingestion.
///
/// # Example
///
/// ```
/// use relatedlist_lib::model::Record;
///
/// let record = Record::new("Contact", "003x000001")
///     .set("Name", "Amy Daulton")
///     .set("Phone", "555-0100");
///
/// assert_eq!(record.get_string("Name").unwrap(), Some("Amy Daulton"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// The API name of the object type.
    pub(crate) object: String,

    /// The platform record id.
    pub(crate) id: String,

    /// The field values.
    pub(crate) fields: HashMap<String, Value>,

    /// Derived navigation URL, set at ingestion when record linking is on.
    pub(crate) link_url: Option<String>,

    /// Derived card projection, set at ingestion.
    pub(crate) card_view: Vec<CardField>,
}

impl Record {
    /// Creates a new record for the given object type and id.
    pub fn new(object: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            object: object.into(),
            id: id.into(),
            fields: HashMap::new(),
            link_url: None,
            card_view: Vec::new(),
        }
    }

    /// Returns the object API name.
    pub fn object(&self) -> &str {
        &self.object
    }

    /// Returns the record id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the derived navigation URL, if record linking is enabled.
    pub fn link_url(&self) -> Option<&str> {
        self.link_url.as_deref()
    }

    /// Returns the derived card projection.
    pub fn card_view(&self) -> &[CardField] {
        &self.card_view
    }

    /// Returns the record's primary display name, if one of the conventional
    /// name fields is present.
    pub fn display_name(&self) -> Option<&str> {
        for field in ["Name", "Title", "Subject"] {
            if let Some(Value::String(s)) = self.fields.get(field) {
                return Some(s.as_str());
            }
        }
        None
    }

    // =========================================================================
    // Raw field access
    // =========================================================================

    /// Returns a reference to the field value, if it exists.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Returns `true` if the record contains the given field.
    pub fn contains(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Returns a reference to all fields.
    pub fn fields(&self) -> &HashMap<String, Value> {
        &self.fields
    }

    /// Resolves a field path with at most one dotted relationship level.
    ///
    /// `"Account.Name"` resolves the `Account` field to a nested record, then
    /// reads `Name` from it. A missing stage yields `Ok(None)`; traversing
    /// through a non-record value is a [`FieldError::NotAContainer`].
    pub fn get_path(&self, path: &str) -> Result<Option<&Value>, FieldError> {
        match path.split_once('.') {
            None => Ok(self.fields.get(path)),
            Some((container, nested)) => match self.fields.get(container) {
                None | Some(Value::Null) => Ok(None),
                Some(Value::Record(inner)) => Ok(inner.get(nested)),
                Some(_) => Err(FieldError::not_a_container(container, path)),
            },
        }
    }

    // =========================================================================
    // Setters
    // =========================================================================

    /// Sets a field value (builder pattern).
    pub fn set(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    /// Inserts a field value.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(field.into(), value.into());
    }

    /// Sets the derived navigation URL.
    pub(crate) fn set_link_url(&mut self, url: impl Into<String>) {
        self.link_url = Some(url.into());
    }

    /// Replaces the derived card projection.
    pub(crate) fn set_card_view(&mut self, card: Vec<CardField>) {
        self.card_view = card;
    }

    // =========================================================================
    // Typed getters
    //
    // Return Err if field is missing or wrong type.
    // Return Ok(None) only if the field exists and is Value::Null.
    // =========================================================================

    /// Gets a string field value.
    pub fn get_string(&self, field: &str) -> Result<Option<&str>, FieldError> {
        match self.fields.get(field) {
            None => Err(FieldError::missing(field)),
            Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.as_str())),
            Some(other) => Err(FieldError::type_mismatch(
                field,
                "string",
                other.type_name(),
            )),
        }
    }

    /// Gets a boolean field value.
    pub fn get_bool(&self, field: &str) -> Result<Option<bool>, FieldError> {
        match self.fields.get(field) {
            None => Err(FieldError::missing(field)),
            Some(Value::Null) => Ok(None),
            Some(Value::Bool(b)) => Ok(Some(*b)),
            Some(other) => Err(FieldError::type_mismatch(field, "bool", other.type_name())),
        }
    }

    /// Gets an integer field value.
    pub fn get_int(&self, field: &str) -> Result<Option<i64>, FieldError> {
        match self.fields.get(field) {
            None => Err(FieldError::missing(field)),
            Some(Value::Null) => Ok(None),
            Some(Value::Int(n)) => Ok(Some(*n)),
            Some(other) => Err(FieldError::type_mismatch(field, "int", other.type_name())),
        }
    }

    /// Gets a float field value.
    pub fn get_float(&self, field: &str) -> Result<Option<f64>, FieldError> {
        match self.fields.get(field) {
            None => Err(FieldError::missing(field)),
            Some(Value::Null) => Ok(None),
            Some(Value::Float(n)) => Ok(Some(*n)),
            Some(Value::Int(n)) => Ok(Some(*n as f64)), // Allow widening
            Some(other) => Err(FieldError::type_mismatch(field, "float", other.type_name())),
        }
    }

    /// Gets a currency field value.
    pub fn get_currency(&self, field: &str) -> Result<Option<Decimal>, FieldError> {
        match self.fields.get(field) {
            None => Err(FieldError::missing(field)),
            Some(Value::Null) => Ok(None),
            Some(Value::Currency(d)) => Ok(Some(*d)),
            Some(other) => Err(FieldError::type_mismatch(
                field,
                "currency",
                other.type_name(),
            )),
        }
    }

    /// Gets a date field value.
    pub fn get_date(&self, field: &str) -> Result<Option<DateTime<Utc>>, FieldError> {
        match self.fields.get(field) {
            None => Err(FieldError::missing(field)),
            Some(Value::Null) => Ok(None),
            Some(Value::Date(dt)) => Ok(Some(*dt)),
            Some(other) => Err(FieldError::type_mismatch(field, "date", other.type_name())),
        }
    }

    /// Gets a nested record field value (from a resolved relationship).
    pub fn get_record(&self, field: &str) -> Result<Option<&Record>, FieldError> {
        match self.fields.get(field) {
            None => Err(FieldError::missing(field)),
            Some(Value::Null) => Ok(None),
            Some(Value::Record(r)) => Ok(Some(r.as_ref())),
            Some(other) => Err(FieldError::type_mismatch(
                field,
                "record",
                other.type_name(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typed_getters() {
        let record = Record::new("Account", "001x000001")
            .set("Name", "Acme")
            .set("Employees", 40i64)
            .set("Active", true)
            .set("Fax", Value::Null);

        assert_eq!(record.get_string("Name").unwrap(), Some("Acme"));
        assert_eq!(record.get_int("Employees").unwrap(), Some(40));
        assert_eq!(record.get_bool("Active").unwrap(), Some(true));
        assert_eq!(record.get_string("Fax").unwrap(), None);
        assert!(record.get_string("Missing").is_err());
        assert!(record.get_bool("Name").is_err());
    }

    #[test]
    fn test_dotted_path_resolution() {
        let owner = Record::new("User", "005x000001").set("Name", "Dana");
        let record = Record::new("Case", "500x000001").set("Owner", owner);

        let value = record.get_path("Owner.Name").unwrap();
        assert_eq!(value, Some(&Value::from("Dana")));
        assert_eq!(record.get_path("Owner.Missing").unwrap(), None);
        assert_eq!(record.get_path("Missing.Name").unwrap(), None);
    }

    #[test]
    fn test_dotted_path_through_scalar_is_error() {
        let record = Record::new("Case", "500x000001").set("Subject", "Broken widget");
        assert!(record.get_path("Subject.Name").is_err());
    }
}
