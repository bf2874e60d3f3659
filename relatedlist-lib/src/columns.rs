//! Column building
//!
//! Columns are rebuilt locally whenever the display signature changes; the
//! fetched descriptors are reused without touching the remote source. Each
//! list mode has exactly one builder path, selected once per configuration
//! change.

use crate::config::RelatedListConfig;
use crate::model::Column;
use crate::model::ColumnType;
use crate::model::flatten_path;
use crate::source::ColumnDescriptor;
use crate::source::ListMode;

/// Builds display columns from fetched descriptors and the current
/// configuration.
///
/// Custom labels are applied positionally by index; widths match by source
/// field path; when record linking is enabled the first column becomes
/// URL-producing. Dotted source paths are flattened to the synthetic keys
/// records are ingested under.
pub fn build_columns(
    mode: ListMode,
    descriptors: &[ColumnDescriptor],
    config: &RelatedListConfig,
) -> Vec<Column> {
    let fallback;
    let descriptors = if descriptors.is_empty() {
        fallback = mode_descriptors(mode);
        fallback.as_slice()
    } else {
        descriptors
    };

    descriptors
        .iter()
        .enumerate()
        .map(|(index, descriptor)| {
            let label = config
                .custom_labels
                .get(index)
                .filter(|label| !label.is_empty())
                .cloned()
                .unwrap_or_else(|| descriptor.label.clone());
            Column {
                label,
                field: flatten_path(&descriptor.field),
                source_path: descriptor.field.clone(),
                column_type: descriptor.column_type,
                sortable: descriptor.sortable,
                width: config.column_widths.get(&descriptor.field).copied(),
                linkified: index == 0 && config.link_records,
            }
        })
        .collect()
}

/// Returns the built-in descriptors used when the source sends none.
///
/// Standard lists always get descriptors from the source; the file, article
/// and email modes have a fixed column shape.
fn mode_descriptors(mode: ListMode) -> Vec<ColumnDescriptor> {
    match mode {
        ListMode::Standard => Vec::new(),
        ListMode::Files => vec![
            ColumnDescriptor::new("Title", "Name"),
            ColumnDescriptor::new("FileType", "Type"),
            ColumnDescriptor::new("ContentSize", "Size").with_type(ColumnType::Number),
            ColumnDescriptor::new("LastModifiedDate", "Last Modified").with_type(ColumnType::Date),
        ],
        ListMode::Articles => vec![
            ColumnDescriptor::new("Title", "Title"),
            ColumnDescriptor::new("ArticleNumber", "Article Number"),
            ColumnDescriptor::new("LastPublishedDate", "Last Published")
                .with_type(ColumnType::Date),
        ],
        ListMode::Email => vec![
            ColumnDescriptor::new("Subject", "Subject"),
            ColumnDescriptor::new("FromAddress", "From").with_type(ColumnType::Email),
            ColumnDescriptor::new("MessageDate", "Date").with_type(ColumnType::Date),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptors() -> Vec<ColumnDescriptor> {
        vec![
            ColumnDescriptor::new("Name", "Name"),
            ColumnDescriptor::new("Account.Name", "Account").not_sortable(),
            ColumnDescriptor::new("Amount", "Amount").with_type(ColumnType::Currency),
        ]
    }

    #[test]
    fn test_custom_labels_apply_positionally() {
        let config = RelatedListConfig {
            custom_labels: vec!["Contact".to_string(), String::new()],
            ..Default::default()
        };
        let columns = build_columns(ListMode::Standard, &descriptors(), &config);
        assert_eq!(columns[0].label, "Contact");
        // Empty override falls through to the server label.
        assert_eq!(columns[1].label, "Account");
        assert_eq!(columns[2].label, "Amount");
    }

    #[test]
    fn test_dotted_path_flattened() {
        let config = RelatedListConfig::default();
        let columns = build_columns(ListMode::Standard, &descriptors(), &config);
        assert_eq!(columns[1].field, "Account_Name");
        assert_eq!(columns[1].source_path, "Account.Name");
        assert!(!columns[1].sortable);
    }

    #[test]
    fn test_first_column_linkified_only_when_linking() {
        let mut config = RelatedListConfig::default();
        let columns = build_columns(ListMode::Standard, &descriptors(), &config);
        assert!(columns.iter().all(|c| !c.linkified));

        config.link_records = true;
        let columns = build_columns(ListMode::Standard, &descriptors(), &config);
        assert!(columns[0].linkified);
        assert!(!columns[1].linkified);
    }

    #[test]
    fn test_widths_match_by_source_path() {
        let mut config = RelatedListConfig::default();
        config.column_widths.insert("Account.Name".to_string(), 160);
        let columns = build_columns(ListMode::Standard, &descriptors(), &config);
        assert_eq!(columns[1].width, Some(160));
        assert_eq!(columns[0].width, None);
    }

    #[test]
    fn test_files_mode_has_builtin_columns() {
        let config = RelatedListConfig::default();
        let columns = build_columns(ListMode::Files, &[], &config);
        assert_eq!(columns[0].field, "Title");
        assert_eq!(columns[2].column_type, ColumnType::Number);
    }
}
