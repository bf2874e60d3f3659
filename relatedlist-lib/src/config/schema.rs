//! Typed configuration schema

use std::collections::HashMap;

use serde::Deserialize;

use super::defaults;
use crate::source::ListMode;

/// The typed configuration of one related list.
///
/// The raw configuration arrives as a JSON blob from the host; unknown keys
/// are ignored and missing keys take their field defaults, so any blob
/// deserializes into a valid structure. Defaulted accessors resolve through
/// [`defaults`](super::defaults) in one place.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RelatedListConfig {
    /// API name of the related object type.
    pub object_api_name: Option<String>,

    /// Relationship field joining the related object to the parent.
    pub relationship_field: Option<String>,

    /// Raw list mode string (standard/files/articles/email).
    pub related_list_type: Option<String>,

    /// Source field paths to fetch and display, in column order.
    pub fields: Vec<String>,

    /// Positional label overrides, matched to `fields` by index.
    pub custom_labels: Vec<String>,

    /// List title shown in the display label.
    pub title: Option<String>,

    /// Icon name shown next to the title.
    pub icon_name: Option<String>,

    /// Serialized additional filters applied by the fetch.
    pub filters: Option<String>,

    /// Initial page size and load-more increment.
    pub page_size: Option<usize>,

    /// Upper bound on records fetched per reload.
    pub max_records: Option<usize>,

    /// Fixed column widths in pixels, keyed by source field path.
    pub column_widths: HashMap<String, u16>,

    /// Whether the first column links to each record.
    pub link_records: bool,

    /// Whether inline deletion is offered.
    pub allow_delete: bool,

    /// Whether scrolling near the end triggers an automatic load-more.
    pub infinite_scroll: bool,

    /// Whether "view all" hands off to external navigation instead of
    /// revealing the locally fetched records.
    pub view_all_navigates: bool,

    /// Base path for derived record navigation URLs.
    pub record_base_path: Option<String>,
}

impl RelatedListConfig {
    /// Returns the initial page size, defaulted.
    pub fn initial_page_size(&self) -> usize {
        self.page_size.unwrap_or(defaults::PAGE_SIZE).max(1)
    }

    /// Returns the fetch cap, defaulted.
    pub fn fetch_cap(&self) -> usize {
        self.max_records.unwrap_or(defaults::MAX_RECORDS).max(1)
    }

    /// Returns the list mode, parsed once from the raw mode string.
    pub fn list_mode(&self) -> ListMode {
        self.related_list_type
            .as_deref()
            .map(ListMode::parse)
            .unwrap_or_default()
    }

    /// Returns the title to display, falling back to the object API name.
    pub fn display_title(&self) -> &str {
        self.title
            .as_deref()
            .or(self.object_api_name.as_deref())
            .unwrap_or("Related")
    }

    /// Returns the base path for derived record URLs, defaulted.
    pub fn link_base_path(&self) -> &str {
        self.record_base_path
            .as_deref()
            .unwrap_or(defaults::RECORD_BASE_PATH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_resolve_centrally() {
        let config = RelatedListConfig::default();
        assert_eq!(config.initial_page_size(), defaults::PAGE_SIZE);
        assert_eq!(config.fetch_cap(), defaults::MAX_RECORDS);
        assert_eq!(config.list_mode(), ListMode::Standard);
        assert_eq!(config.display_title(), "Related");
    }

    #[test]
    fn test_page_size_floor() {
        let config = RelatedListConfig {
            page_size: Some(0),
            ..Default::default()
        };
        assert_eq!(config.initial_page_size(), 1);
    }

    #[test]
    fn test_title_falls_back_to_object_name() {
        let config = RelatedListConfig {
            object_api_name: Some("Contact".to_string()),
            ..Default::default()
        };
        assert_eq!(config.display_title(), "Contact");
    }
}
