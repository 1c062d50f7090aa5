//! Test type descriptors returned by the backend and test label parsing
//!
//! A [`TestType`] carries a list of [`ConfigField`]s describing the arguments
//! the test accepts. The configuration form is built from these descriptors.

use serde::{Deserialize, Deserializer, Serialize};

/// Which record kind a test is attached to. Selects the endpoint family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TestTarget {
    Model,
    Source,
}

impl TestTarget {
    /// Path segment used by the backend (`/api/models/...`, `/api/sources/...`)
    pub fn path_segment(&self) -> &'static str {
        match self {
            TestTarget::Model => "models",
            TestTarget::Source => "sources",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TestTarget::Model => "model",
            TestTarget::Source => "source",
        }
    }
}

/// Value kind of a config field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ConfigKind {
    String,
    Number,
    Boolean,
    Array,
    Dict,
    ModelOrSource,
    /// A kind this client does not know how to edit
    Unknown(String),
}

impl From<String> for ConfigKind {
    fn from(value: String) -> Self {
        match value.as_str() {
            "string" => ConfigKind::String,
            "number" => ConfigKind::Number,
            "boolean" => ConfigKind::Boolean,
            "array" => ConfigKind::Array,
            "dict" => ConfigKind::Dict,
            "model_or_source" => ConfigKind::ModelOrSource,
            _ => ConfigKind::Unknown(value),
        }
    }
}

impl From<ConfigKind> for String {
    fn from(kind: ConfigKind) -> Self {
        match kind {
            ConfigKind::String => "string".to_string(),
            ConfigKind::Number => "number".to_string(),
            ConfigKind::Boolean => "boolean".to_string(),
            ConfigKind::Array => "array".to_string(),
            ConfigKind::Dict => "dict".to_string(),
            ConfigKind::ModelOrSource => "model_or_source".to_string(),
            ConfigKind::Unknown(other) => other,
        }
    }
}

/// One argument of a test type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigField {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ConfigKind,
    #[serde(default)]
    pub description: String,
    /// Nested fields, only meaningful for [`ConfigKind::Dict`]
    #[serde(default, deserialize_with = "null_as_empty")]
    pub required_configs: Vec<ConfigField>,
}

impl ConfigField {
    /// Whether this field, or any field nested under it, selects a relation.
    pub fn needs_relations(&self) -> bool {
        self.kind == ConfigKind::ModelOrSource
            || self.required_configs.iter().any(ConfigField::needs_relations)
    }
}

/// A generic test the backend can attach (e.g. `unique`, `accepted_values`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestType {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub required_configs: Vec<ConfigField>,
}

impl TestType {
    pub fn display_label(&self) -> String {
        if self.description.is_empty() {
            self.name.clone()
        } else {
            format!("{} - {}", self.name, self.description)
        }
    }

    /// Whether the form needs the model/source list to render this type.
    pub fn needs_relations(&self) -> bool {
        self.required_configs.iter().any(ConfigField::needs_relations)
    }
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

// ─────────────────────────────────────────────────────────────────────────────
// Test Labels
// ─────────────────────────────────────────────────────────────────────────────

/// A test as listed on a source or model.
///
/// The backend reports tests as `"unique"` for table-level tests and
/// `"order_id: not_null"` for column-level tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestLabel {
    pub column: Option<String>,
    pub test: String,
    raw: String,
}

impl TestLabel {
    const SEPARATOR: &'static str = ": ";

    pub fn parse(label: &str) -> Self {
        match label.split_once(Self::SEPARATOR) {
            Some((column, test)) => Self {
                column: Some(column.to_string()),
                test: test.to_string(),
                raw: label.to_string(),
            },
            None => Self {
                column: None,
                test: label.to_string(),
                raw: label.to_string(),
            },
        }
    }

    /// The label exactly as the backend reported it
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn is_column_level(&self) -> bool {
        self.column.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_kind_from_string() {
        assert_eq!(ConfigKind::from("number".to_string()), ConfigKind::Number);
        assert_eq!(
            ConfigKind::from("model_or_source".to_string()),
            ConfigKind::ModelOrSource
        );
        assert_eq!(
            ConfigKind::from("regex".to_string()),
            ConfigKind::Unknown("regex".to_string())
        );
    }

    #[test]
    fn test_test_type_deserialize_nested_dict() {
        let json = r#"{
            "name": "relationships",
            "description": "Referential integrity",
            "required_configs": [
                {"name": "to", "type": "model_or_source", "description": "Target"},
                {"name": "field", "type": "string", "description": "Target column"},
                {"name": "config", "type": "dict", "description": "Extra",
                 "required_configs": [
                    {"name": "severity", "type": "string", "description": "warn or error"}
                 ]}
            ]
        }"#;
        let test_type: TestType = serde_json::from_str(json).unwrap();
        assert_eq!(test_type.required_configs.len(), 3);
        assert_eq!(test_type.required_configs[2].kind, ConfigKind::Dict);
        assert_eq!(test_type.required_configs[2].required_configs.len(), 1);
        assert!(test_type.needs_relations());
        assert_eq!(
            test_type.display_label(),
            "relationships - Referential integrity"
        );
    }

    #[test]
    fn test_test_type_null_required_configs() {
        let json = r#"{"name":"unique","description":"Unique values","required_configs":null}"#;
        let test_type: TestType = serde_json::from_str(json).unwrap();
        assert!(test_type.required_configs.is_empty());
        assert!(!test_type.needs_relations());
    }

    #[test]
    fn test_needs_relations_nested_in_dict() {
        let field = ConfigField {
            name: "config".into(),
            kind: ConfigKind::Dict,
            description: String::new(),
            required_configs: vec![ConfigField {
                name: "parent".into(),
                kind: ConfigKind::ModelOrSource,
                description: String::new(),
                required_configs: vec![],
            }],
        };
        assert!(field.needs_relations());
    }

    #[test]
    fn test_parse_table_level_label() {
        let label = TestLabel::parse("unique");
        assert_eq!(label.column, None);
        assert_eq!(label.test, "unique");
        assert!(!label.is_column_level());
    }

    #[test]
    fn test_parse_column_level_label() {
        let label = TestLabel::parse("order_id: not_null");
        assert_eq!(label.column.as_deref(), Some("order_id"));
        assert_eq!(label.test, "not_null");
        assert_eq!(label.as_str(), "order_id: not_null");
    }

    #[test]
    fn test_parse_label_splits_on_first_separator() {
        let label = TestLabel::parse("status: accepted_values: a");
        assert_eq!(label.column.as_deref(), Some("status"));
        assert_eq!(label.test, "accepted_values: a");
    }

    #[test]
    fn test_target_path_segment() {
        assert_eq!(TestTarget::Model.path_segment(), "models");
        assert_eq!(TestTarget::Source.path_segment(), "sources");
    }
}
