//! Request bodies sent to the backend

use dbtc_core::{ProjectSettings, Source, TestLabel, TestTarget};
use serde::Serialize;
use serde_json::{Map, Value};

/// Project/profile/target triple sent with every warehouse-backed request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConnectionRequest {
    pub dbt_project_path: String,
    pub profiles_yml_path: String,
    pub target_name: String,
}

impl From<&ProjectSettings> for ConnectionRequest {
    fn from(settings: &ProjectSettings) -> Self {
        Self {
            dbt_project_path: settings.dbt_project_path.clone(),
            profiles_yml_path: settings.profiles_yml_path.clone(),
            target_name: settings.target_name.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct SourcesRequest<'a> {
    pub dbt_project_path: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpdateSourceRequest {
    pub dbt_project_path: String,
    pub original_source: String,
    pub original_table: String,
    pub updated_source: Source,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeleteSourceRequest {
    pub dbt_project_path: String,
    pub source: String,
    pub table: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewSourceTable {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateSourcesRequest {
    pub dbt_project_path: String,
    pub source_name: String,
    pub schema_name: String,
    pub tables: Vec<NewSourceTable>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableColumnsRequest {
    #[serde(flatten)]
    pub connection: ConnectionRequest,
    pub schema: String,
    pub table: String,
}

/// `{test_type, config}` block of an add-test request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TestConfigPayload {
    pub test_type: String,
    pub config: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AddTestRequest {
    #[serde(flatten)]
    pub connection: ConnectionRequest,
    pub schema: String,
    pub table: String,
    /// SQL path for models, empty for sources
    pub model_path: String,
    /// Source name for sources, empty for models
    pub source: String,
    pub test_config: TestConfigPayload,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column_name: Option<String>,
}

/// Body of the remove-test endpoints. The variant selects the route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum RemoveTestRequest {
    Model {
        dbt_project_path: String,
        model_path: String,
        test_name: String,
    },
    Source {
        dbt_project_path: String,
        source_name: String,
        table_name: String,
        test_name: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        column_name: Option<String>,
    },
}

impl RemoveTestRequest {
    pub fn for_model(dbt_project_path: &str, sql_path: &str, label: &TestLabel) -> Self {
        RemoveTestRequest::Model {
            dbt_project_path: dbt_project_path.to_string(),
            model_path: sql_path.to_string(),
            test_name: label.as_str().to_string(),
        }
    }

    pub fn for_source(dbt_project_path: &str, source: &Source, label: &TestLabel) -> Self {
        RemoveTestRequest::Source {
            dbt_project_path: dbt_project_path.to_string(),
            source_name: source.source.clone(),
            table_name: source.table.clone(),
            test_name: label.as_str().to_string(),
            column_name: label.column.clone(),
        }
    }

    pub fn target(&self) -> TestTarget {
        match self {
            RemoveTestRequest::Model { .. } => TestTarget::Model,
            RemoveTestRequest::Source { .. } => TestTarget::Source,
        }
    }
}
