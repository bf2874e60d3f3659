//! Data-relevant and display-relevant input subsets

use std::collections::BTreeMap;

use super::Fingerprint;
use super::Signature;
use crate::config::RelatedListConfig;
use crate::source::ListMode;

/// The inputs whose change requires a remote refetch.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DataInputs {
    /// Id of the parent record.
    pub parent_id: String,
    /// API name of the related object type.
    pub object: String,
    /// Relationship field joining related records to the parent.
    pub relationship: String,
    /// Source field paths to fetch.
    pub fields: Vec<String>,
    /// Serialized additional filters.
    pub filters: String,
    /// List mode in effect.
    pub mode: ListMode,
    /// Fetch cap.
    pub max_records: usize,
}

impl DataInputs {
    /// Derives the data-relevant subset from configuration and parent context.
    pub fn derive(config: &RelatedListConfig, parent_id: &str) -> Self {
        Self {
            parent_id: parent_id.to_string(),
            object: config.object_api_name.clone().unwrap_or_default(),
            relationship: config.relationship_field.clone().unwrap_or_default(),
            fields: config.fields.clone(),
            filters: config.filters.clone().unwrap_or_default(),
            mode: config.list_mode(),
            max_records: config.fetch_cap(),
        }
    }
}

impl Fingerprint for DataInputs {
    fn fingerprint(&self) -> Signature {
        Signature::from_pairs(&[
            ("parent", &self.parent_id),
            ("object", &self.object),
            ("relationship", &self.relationship),
            ("fields", &self.fields.join(",")),
            ("filters", &self.filters),
            ("mode", self.mode.name()),
            ("max", &self.max_records.to_string()),
        ])
    }
}

/// The inputs that only affect local column/label rendering.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DisplayInputs {
    /// List title.
    pub title: String,
    /// Icon name.
    pub icon: String,
    /// Positional custom labels.
    pub custom_labels: Vec<String>,
    /// Fixed column widths by source field path.
    pub column_widths: BTreeMap<String, u16>,
    /// Whether the first column links to each record.
    pub link_records: bool,
    /// Whether inline deletion is offered.
    pub allow_delete: bool,
}

impl DisplayInputs {
    /// Derives the display-relevant subset from configuration.
    pub fn derive(config: &RelatedListConfig) -> Self {
        Self {
            title: config.display_title().to_string(),
            icon: config.icon_name.clone().unwrap_or_default(),
            custom_labels: config.custom_labels.clone(),
            // BTreeMap keeps width serialization key-order-stable.
            column_widths: config
                .column_widths
                .iter()
                .map(|(k, v)| (k.clone(), *v))
                .collect(),
            link_records: config.link_records,
            allow_delete: config.allow_delete,
        }
    }
}

impl Fingerprint for DisplayInputs {
    fn fingerprint(&self) -> Signature {
        let widths = self
            .column_widths
            .iter()
            .map(|(field, width)| format!("{field}:{width}"))
            .collect::<Vec<_>>()
            .join(",");
        Signature::from_pairs(&[
            ("title", &self.title),
            ("icon", &self.icon),
            ("labels", &self.custom_labels.join(",")),
            ("widths", &widths),
            ("link", if self.link_records { "1" } else { "0" }),
            ("delete", if self.allow_delete { "1" } else { "0" }),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> RelatedListConfig {
        RelatedListConfig {
            object_api_name: Some("Contact".to_string()),
            relationship_field: Some("AccountId".to_string()),
            fields: vec!["Name".to_string(), "Email".to_string()],
            icon_name: Some("standard:contact".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_parent_change_moves_data_signature_only() {
        let config = config();
        let data_one = DataInputs::derive(&config, "001x01").fingerprint();
        let data_two = DataInputs::derive(&config, "001x02").fingerprint();
        assert_ne!(data_one, data_two);

        let display_one = DisplayInputs::derive(&config).fingerprint();
        let display_two = DisplayInputs::derive(&config).fingerprint();
        assert_eq!(display_one, display_two);
    }

    #[test]
    fn test_icon_change_moves_display_signature_only() {
        let base = config();
        let mut changed = config();
        changed.icon_name = Some("standard:lead".to_string());

        assert_ne!(
            DisplayInputs::derive(&base).fingerprint(),
            DisplayInputs::derive(&changed).fingerprint()
        );
        assert_eq!(
            DataInputs::derive(&base, "001x01").fingerprint(),
            DataInputs::derive(&changed, "001x01").fingerprint()
        );
    }

    #[test]
    fn test_repeated_derivation_is_value_equal() {
        let config = config();
        assert_eq!(
            DataInputs::derive(&config, "001x01"),
            DataInputs::derive(&config, "001x01")
        );
    }
}
