//! Backend service trait
//!
//! Background actions are written against this trait rather than the
//! concrete HTTP client.

use dbtc_core::prelude::*;
use dbtc_core::{ColumnInfo, Model, ProjectSettings, Source, TableInfo, TestTarget, TestType};

use crate::requests::{
    AddTestRequest, ConnectionRequest, CreateSourcesRequest, DeleteSourceRequest,
    RemoveTestRequest, TableColumnsRequest, UpdateSourceRequest,
};
use crate::responses::RelationCatalog;

/// Operations offered by the dbt backend.
///
/// Mutating operations return the backend's confirmation message.
#[trait_variant::make(Backend: Send)]
pub trait LocalBackend {
    /// `GET /health`, returns the reported status
    async fn health(&self) -> Result<String>;

    async fn list_sources(&self, dbt_project_path: &str) -> Result<Vec<Source>>;

    async fn update_source(&self, request: &UpdateSourceRequest) -> Result<String>;

    async fn delete_source(&self, request: &DeleteSourceRequest) -> Result<String>;

    async fn list_schemas(&self, connection: &ConnectionRequest) -> Result<Vec<String>>;

    async fn list_tables(
        &self,
        connection: &ConnectionRequest,
        schema: &str,
    ) -> Result<Vec<TableInfo>>;

    async fn create_sources(&self, request: &CreateSourcesRequest) -> Result<String>;

    async fn list_models(&self, connection: &ConnectionRequest) -> Result<Vec<Model>>;

    async fn test_types(&self, target: TestTarget) -> Result<Vec<TestType>>;

    async fn table_columns(&self, request: &TableColumnsRequest) -> Result<Vec<ColumnInfo>>;

    async fn models_and_sources(&self, connection: &ConnectionRequest)
        -> Result<RelationCatalog>;

    async fn add_test(&self, target: TestTarget, request: &AddTestRequest) -> Result<String>;

    async fn remove_test(&self, request: &RemoveTestRequest) -> Result<String>;

    async fn save_project_settings(&self, settings: &ProjectSettings) -> Result<()>;

    /// Settings the backend remembers, `None` when it has none
    async fn load_project_settings(&self) -> Result<Option<ProjectSettings>>;
}
