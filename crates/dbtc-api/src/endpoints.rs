//! Backend route paths

use dbtc_core::TestTarget;

pub const HEALTH: &str = "/health";
pub const SOURCES: &str = "/api/sources";
pub const MODELS: &str = "/api/models";
pub const MODEL_COLUMNS: &str = "/api/models/columns";
pub const MODELS_AND_SOURCES: &str = "/api/models-and-sources";
pub const WAREHOUSE_SCHEMAS: &str = "/api/warehouse/schemas";
pub const WAREHOUSE_TABLES: &str = "/api/warehouse/tables";
pub const WAREHOUSE_SOURCES: &str = "/api/warehouse/sources";
pub const PROJECT_SETTINGS: &str = "/api/project-settings";

pub fn test_types(target: TestTarget) -> String {
    format!("/api/{}/test-types", target.path_segment())
}

pub fn add_test(target: TestTarget) -> String {
    format!("/api/{}/add-test", target.path_segment())
}

pub fn remove_test(target: TestTarget) -> String {
    format!("/api/{}/remove-test", target.path_segment())
}
