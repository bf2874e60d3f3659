//! Column descriptors for the rendered list

use serde::Deserialize;
use serde::Serialize;

/// The value type a column renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    /// Plain text.
    #[default]
    Text,
    /// Numeric value.
    Number,
    /// Boolean checkbox.
    Boolean,
    /// Date or date/time.
    Date,
    /// Hyperlink.
    Url,
    /// Currency amount.
    Currency,
    /// Email address.
    Email,
    /// Phone number.
    Phone,
}

/// Describes one displayed column of the related list.
///
/// Columns are rebuilt from the fetched column descriptors whenever the
/// display signature changes; record linking turns the first column into a
/// URL-producing column pointing at each record's `link_url`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    /// Display label, after any positional custom-label override.
    pub label: String,

    /// Flattened field key read from each record. Dotted source paths are
    /// flattened to a single synthetic key at ingestion (`Account.Name`
    /// becomes `Account_Name`).
    pub field: String,

    /// The original source field path, possibly dotted.
    pub source_path: String,

    /// The value type this column renders.
    pub column_type: ColumnType,

    /// Whether the user may sort by this column.
    pub sortable: bool,

    /// Fixed width in pixels, if configured.
    pub width: Option<u16>,

    /// Whether cell values link to the record's navigation URL. Only ever set
    /// on the first column, and only when record linking is enabled.
    pub linkified: bool,
}

impl Column {
    /// Creates a text column with defaults for the optional attributes.
    pub fn new(label: impl Into<String>, field: impl Into<String>) -> Self {
        let field = field.into();
        Self {
            label: label.into(),
            source_path: field.clone(),
            field,
            column_type: ColumnType::Text,
            sortable: true,
            width: None,
            linkified: false,
        }
    }

    /// Sets the column type (builder pattern).
    pub fn with_type(mut self, column_type: ColumnType) -> Self {
        self.column_type = column_type;
        self
    }

    /// Sets the fixed width (builder pattern).
    pub fn with_width(mut self, width: u16) -> Self {
        self.width = Some(width);
        self
    }
}

/// Flattens a possibly dotted source path to a single synthetic field key.
pub fn flatten_path(path: &str) -> String {
    path.replace('.', "_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flatten_path() {
        assert_eq!(flatten_path("Name"), "Name");
        assert_eq!(flatten_path("Account.Name"), "Account_Name");
    }

    #[test]
    fn test_column_builder() {
        let column = Column::new("Amount", "Amount")
            .with_type(ColumnType::Currency)
            .with_width(120);
        assert_eq!(column.column_type, ColumnType::Currency);
        assert_eq!(column.width, Some(120));
        assert!(!column.linkified);
    }
}
