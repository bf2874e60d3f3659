//! Remote data source seam
//!
//! The controller treats all remote calls as opaque async operations behind
//! the [`DataSource`] trait: fetching related records (in any list mode),
//! checking delete permission, and deleting by id. Implementations live with
//! the embedding host; tests use in-memory mocks.

use async_trait::async_trait;

use crate::error::DeleteError;
use crate::error::FetchError;
use crate::model::ColumnType;
use crate::model::Record;

/// The closed set of list modes a related list can operate in.
///
/// The mode is parsed once per configuration change and selects one fetch
/// parameter shape and one column builder; it is never re-branched on during
/// rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListMode {
    /// Records related through a relationship field.
    #[default]
    Standard,
    /// Files attached to the parent record.
    Files,
    /// Knowledge articles joined to the parent record.
    Articles,
    /// Emails associated with the parent record.
    Email,
}

impl ListMode {
    /// Parses a raw mode string from the configuration.
    ///
    /// Unknown strings fall back to [`ListMode::Standard`] with a log entry,
    /// matching the soft-failure posture of configuration handling.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "" | "standard" | "related" => Self::Standard,
            "files" | "attachments" => Self::Files,
            "articles" | "knowledge" => Self::Articles,
            "email" | "emails" => Self::Email,
            other => {
                log::warn!("Unknown related list mode '{other}', using standard");
                Self::Standard
            }
        }
    }

    /// Returns the canonical name of this mode, used in signatures.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Files => "files",
            Self::Articles => "articles",
            Self::Email => "email",
        }
    }
}

/// A column as described by the remote source, before display overrides.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnDescriptor {
    /// Source field path, possibly dotted.
    pub field: String,
    /// Server-provided display label.
    pub label: String,
    /// The value type of the column.
    pub column_type: ColumnType,
    /// Whether the platform allows sorting by this column.
    pub sortable: bool,
}

impl ColumnDescriptor {
    /// Creates a sortable text column descriptor.
    pub fn new(field: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            label: label.into(),
            column_type: ColumnType::Text,
            sortable: true,
        }
    }

    /// Sets the column type (builder pattern).
    pub fn with_type(mut self, column_type: ColumnType) -> Self {
        self.column_type = column_type;
        self
    }

    /// Marks the column as not sortable (builder pattern).
    pub fn not_sortable(mut self) -> Self {
        self.sortable = false;
        self
    }
}

/// Parameters for one related-record fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchParams {
    /// The list mode in effect.
    pub mode: ListMode,
    /// The id of the parent record.
    pub parent_id: String,
    /// The API name of the related object type.
    pub object: String,
    /// The relationship field joining the related object to the parent.
    pub relationship: String,
    /// The source field paths to fetch.
    pub fields: Vec<String>,
    /// Serialized additional filters, if any.
    pub filters: String,
    /// Upper bound on the number of records to fetch.
    pub max_records: usize,
}

/// The result of one successful related-record fetch.
#[derive(Debug, Clone, Default)]
pub struct FetchResult {
    /// Column descriptors for the fetched fields.
    pub columns: Vec<ColumnDescriptor>,
    /// The fetched records, capped at the requested maximum.
    pub records: Vec<Record>,
    /// Whether the server holds more records beyond the fetched cap.
    pub server_has_more: bool,
}

/// The remote collaborators the controller depends on.
///
/// All calls are asynchronous and may fail with a transport-or-permission
/// error carrying a human-readable message; the controller treats them as
/// opaque.
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Fetches records related to the parent described by `params`.
    async fn fetch(&self, params: &FetchParams) -> Result<FetchResult, FetchError>;

    /// Checks whether the current user may delete records of the given object
    /// type.
    async fn can_delete(&self, object: &str) -> Result<bool, FetchError>;

    /// Deletes one record by id.
    async fn delete(&self, object: &str, record_id: &str) -> Result<(), DeleteError>;
}
