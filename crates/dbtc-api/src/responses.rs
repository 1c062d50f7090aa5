//! Response bodies returned by the backend

use dbtc_core::{ColumnInfo, Model, ModelOrSource, ProjectSettings, Source, TableInfo, TestType};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub(crate) struct HealthResponse {
    pub status: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SourcesResponse {
    pub sources: Vec<Source>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ModelsResponse {
    pub models: Vec<Model>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SchemasResponse {
    pub schemas: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TablesResponse {
    pub tables: Vec<TableInfo>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ColumnsResponse {
    pub columns: Vec<ColumnInfo>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TestTypesResponse {
    pub test_types: Vec<TestType>,
}

/// Result of a mutating call.
#[derive(Debug, Deserialize)]
pub(crate) struct OperationResponse {
    pub success: bool,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MessageResponse {
    #[serde(default)]
    pub message: String,
}

/// The settings endpoint answers either with the stored settings or with
/// `{"message": "No project settings found"}`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum StoredSettingsResponse {
    // Tried first: ProjectSettings defaults every field and would match anything
    Empty { message: String },
    Settings(ProjectSettings),
}

/// Models and sources that a test config can reference.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RelationCatalog {
    #[serde(default)]
    pub models: Vec<ModelOrSource>,
    #[serde(default)]
    pub sources: Vec<ModelOrSource>,
}

impl RelationCatalog {
    /// Models first, then sources
    pub fn entries(&self) -> impl Iterator<Item = &ModelOrSource> {
        self.models.iter().chain(self.sources.iter())
    }

    pub fn len(&self) -> usize {
        self.models.len() + self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Error body shapes: FastAPI's `{"detail": ...}` or our own `{"message": ...}`.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorBody {
    pub fn into_message(self) -> Option<String> {
        match self.detail {
            Some(serde_json::Value::String(s)) if !s.is_empty() => return Some(s),
            // Validation errors arrive as a list of {loc, msg, type}
            Some(serde_json::Value::Array(items)) => {
                let first = items
                    .first()
                    .and_then(|item| item.get("msg"))
                    .and_then(|msg| msg.as_str());
                if let Some(msg) = first {
                    return Some(msg.to_string());
                }
            }
            _ => {}
        }
        self.message.filter(|m| !m.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_body_string_detail() {
        let body: ErrorBody = serde_json::from_str(r#"{"detail":"Source not found"}"#).unwrap();
        assert_eq!(body.into_message().as_deref(), Some("Source not found"));
    }

    #[test]
    fn test_error_body_validation_detail() {
        let body: ErrorBody = serde_json::from_str(
            r#"{"detail":[{"loc":["body","target_name"],"msg":"field required","type":"value_error.missing"}]}"#,
        )
        .unwrap();
        assert_eq!(body.into_message().as_deref(), Some("field required"));
    }

    #[test]
    fn test_error_body_message_fallback() {
        let body: ErrorBody = serde_json::from_str(r#"{"message":"boom"}"#).unwrap();
        assert_eq!(body.into_message().as_deref(), Some("boom"));
        let empty: ErrorBody = serde_json::from_str("{}").unwrap();
        assert_eq!(empty.into_message(), None);
    }

    #[test]
    fn test_stored_settings_variants() {
        let stored: StoredSettingsResponse = serde_json::from_str(
            r#"{"dbt_project_path":"/p","profiles_yml_path":"/q","target_name":"dev"}"#,
        )
        .unwrap();
        assert!(matches!(stored, StoredSettingsResponse::Settings(_)));

        let empty: StoredSettingsResponse =
            serde_json::from_str(r#"{"message":"No project settings found"}"#).unwrap();
        assert!(matches!(empty, StoredSettingsResponse::Empty { .. }));
    }

    #[test]
    fn test_relation_catalog_orders_models_first() {
        let catalog: RelationCatalog = serde_json::from_str(
            r#"{
                "models": [{"name":"orders","value":"ref('orders')","type":"model","schema":"a","table":"orders"}],
                "sources": [{"name":"raw.users","value":"source('raw', 'users')","type":"source","schema":"raw","table":"users"}]
            }"#,
        )
        .unwrap();
        let names: Vec<_> = catalog.entries().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["orders", "raw.users"]);
        assert_eq!(catalog.len(), 2);
    }
}
