//! Tests for the HTTP client against a mock backend

use super::*;
use crate::requests::{NewSourceTable, TestConfigPayload};
use dbtc_core::{ConfigKind, TestLabel};
use serde_json::{json, Map};
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> ApiClient {
    ApiClient::new(&server.uri(), Duration::from_secs(5)).unwrap()
}

fn settings() -> ProjectSettings {
    ProjectSettings::new("/work/shop", "/home/me/.dbt/profiles.yml", "dev")
}

fn connection() -> ConnectionRequest {
    ConnectionRequest::from(&settings())
}

#[tokio::test]
async fn test_health() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "healthy"})))
        .expect(1)
        .mount(&server)
        .await;

    let status = client_for(&server).health().await.unwrap();
    assert_eq!(status, "healthy");
}

#[tokio::test]
async fn test_list_sources_sends_project_path() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/sources"))
        .and(body_json(json!({"dbt_project_path": "/work/shop"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "sources": [
                {"source": "raw", "schema": "public", "table": "orders",
                 "tests": ["unique", "id: not_null"], "description": "Orders"},
                {"source": "raw", "schema": "public", "table": "users", "tests": []}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let sources = client_for(&server).list_sources("/work/shop").await.unwrap();
    assert_eq!(sources.len(), 2);
    assert_eq!(sources[0].tests.len(), 2);
    assert_eq!(sources[0].description.as_deref(), Some("Orders"));
    assert_eq!(sources[1].description, None);
}

#[tokio::test]
async fn test_update_source_success_returns_message() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/sources"))
        .and(body_json(json!({
            "dbt_project_path": "/work/shop",
            "original_source": "raw",
            "original_table": "orders",
            "updated_source": {
                "source": "raw", "schema": "public", "table": "orders_v2",
                "tests": ["unique"], "description": "Renamed"
            }
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"success": true, "message": "Source updated"})),
        )
        .mount(&server)
        .await;

    let request = UpdateSourceRequest {
        dbt_project_path: "/work/shop".into(),
        original_source: "raw".into(),
        original_table: "orders".into(),
        updated_source: Source {
            source: "raw".into(),
            schema: "public".into(),
            table: "orders_v2".into(),
            tests: vec!["unique".into()],
            description: Some("Renamed".into()),
        },
    };
    let message = client_for(&server).update_source(&request).await.unwrap();
    assert_eq!(message, "Source updated");
}

#[tokio::test]
async fn test_operation_failure_surfaces_backend_message() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/sources"))
        .and(body_json(json!({
            "dbt_project_path": "/work/shop", "source": "raw", "table": "orders"
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"success": false, "message": "Table not found"})),
        )
        .mount(&server)
        .await;

    let request = DeleteSourceRequest {
        dbt_project_path: "/work/shop".into(),
        source: "raw".into(),
        table: "orders".into(),
    };
    let err = client_for(&server)
        .delete_source(&request)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Operation { .. }));
    assert_eq!(err.user_message(), "Table not found");
}

#[tokio::test]
async fn test_operation_failure_without_message_uses_fallback() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/warehouse/sources"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": false})))
        .mount(&server)
        .await;

    let request = CreateSourcesRequest {
        dbt_project_path: "/work/shop".into(),
        source_name: "raw".into(),
        schema_name: "public".into(),
        tables: vec![NewSourceTable {
            name: "orders".into(),
            description: String::new(),
        }],
    };
    let err = client_for(&server)
        .create_sources(&request)
        .await
        .unwrap_err();
    assert_eq!(err.user_message(), "Failed to create sources");
}

#[tokio::test]
async fn test_http_error_uses_fastapi_detail() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/models"))
        .respond_with(
            ResponseTemplate::new(500)
                .set_body_json(json!({"detail": "profiles.yml not found"})),
        )
        .mount(&server)
        .await;

    let err = client_for(&server)
        .list_models(&connection())
        .await
        .unwrap_err();
    match err {
        Error::Http { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "profiles.yml not found");
        }
        other => panic!("expected Http error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_http_error_empty_body_uses_reason() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/models/test-types"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .test_types(TestTarget::Model)
        .await
        .unwrap_err();
    assert_eq!(err.user_message(), "Not Found");
}

#[tokio::test]
async fn test_malformed_body_is_invalid_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/warehouse/schemas"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .list_schemas(&connection())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::InvalidResponse { .. }));
}

#[tokio::test]
async fn test_list_tables_passes_schema_query() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/warehouse/tables"))
        .and(query_param("schema", "analytics"))
        .and(body_json(json!({
            "dbt_project_path": "/work/shop",
            "profiles_yml_path": "/home/me/.dbt/profiles.yml",
            "target_name": "dev"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "tables": [
                {"name": "orders", "description": "All orders"},
                {"name": "users"}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let tables = client_for(&server)
        .list_tables(&connection(), "analytics")
        .await
        .unwrap();
    assert_eq!(tables.len(), 2);
    assert_eq!(tables[0].description.as_deref(), Some("All orders"));
}

#[tokio::test]
async fn test_test_types_for_sources() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/sources/test-types"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "test_types": [
                {"name": "unique", "description": "Unique values", "required_configs": []},
                {"name": "accepted_values", "description": "Allowed values",
                 "required_configs": [{"name": "values", "type": "array", "description": "List"}]}
            ]
        })))
        .mount(&server)
        .await;

    let types = client_for(&server)
        .test_types(TestTarget::Source)
        .await
        .unwrap();
    assert_eq!(types.len(), 2);
    assert_eq!(types[1].required_configs[0].kind, ConfigKind::Array);
}

#[tokio::test]
async fn test_table_columns() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/models/columns"))
        .and(body_json(json!({
            "dbt_project_path": "/work/shop",
            "profiles_yml_path": "/home/me/.dbt/profiles.yml",
            "target_name": "dev",
            "schema": "analytics",
            "table": "orders"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "columns": [{"name": "id", "type": "integer"}]
        })))
        .mount(&server)
        .await;

    let request = TableColumnsRequest {
        connection: connection(),
        schema: "analytics".into(),
        table: "orders".into(),
    };
    let columns = client_for(&server).table_columns(&request).await.unwrap();
    assert_eq!(columns[0].name, "id");
    assert_eq!(columns[0].data_type, "integer");
}

#[tokio::test]
async fn test_models_and_sources() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/models-and-sources"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "models": [{"name": "orders", "value": "ref('orders')", "type": "model",
                        "schema": "analytics", "table": "orders"}],
            "sources": []
        })))
        .mount(&server)
        .await;

    let catalog = client_for(&server)
        .models_and_sources(&connection())
        .await
        .unwrap();
    assert_eq!(catalog.models.len(), 1);
    assert!(catalog.sources.is_empty());
}

#[tokio::test]
async fn test_add_model_test_route_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/models/add-test"))
        .and(body_json(json!({
            "dbt_project_path": "/work/shop",
            "profiles_yml_path": "/home/me/.dbt/profiles.yml",
            "target_name": "dev",
            "schema": "analytics",
            "table": "orders",
            "model_path": "models/orders.sql",
            "source": "",
            "test_config": {"test_type": "not_null", "config": {}},
            "column_name": "id"
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"success": true, "message": "Test added"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let request = AddTestRequest {
        connection: connection(),
        schema: "analytics".into(),
        table: "orders".into(),
        model_path: "models/orders.sql".into(),
        source: String::new(),
        test_config: TestConfigPayload {
            test_type: "not_null".into(),
            config: Map::new(),
        },
        column_name: Some("id".into()),
    };
    let message = client_for(&server)
        .add_test(TestTarget::Model, &request)
        .await
        .unwrap();
    assert_eq!(message, "Test added");
}

#[tokio::test]
async fn test_remove_source_test_route() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/sources/remove-test"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"success": true, "message": "Removed"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let source = Source {
        source: "raw".into(),
        schema: "public".into(),
        table: "orders".into(),
        ..Default::default()
    };
    let request =
        RemoveTestRequest::for_source("/work/shop", &source, &TestLabel::parse("id: unique"));
    let message = client_for(&server).remove_test(&request).await.unwrap();
    assert_eq!(message, "Removed");
}

#[tokio::test]
async fn test_project_settings_round_trip_with_backend() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/project-settings"))
        .and(body_json(json!({
            "dbt_project_path": "/work/shop",
            "profiles_yml_path": "/home/me/.dbt/profiles.yml",
            "target_name": "dev"
        })))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(json!({"message": "Project settings saved successfully"})),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/project-settings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "dbt_project_path": "/work/shop",
            "profiles_yml_path": "/home/me/.dbt/profiles.yml",
            "target_name": "dev"
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    client.save_project_settings(&settings()).await.unwrap();
    let loaded = client.load_project_settings().await.unwrap();
    assert_eq!(loaded, Some(settings()));
}

#[tokio::test]
async fn test_load_project_settings_when_backend_has_none() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/project-settings"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"message": "No project settings found"})),
        )
        .mount(&server)
        .await;

    let loaded = client_for(&server).load_project_settings().await.unwrap();
    assert_eq!(loaded, None);
}

#[tokio::test]
async fn test_unreachable_backend_is_transport_error() {
    // Port 9 (discard) on localhost is not expected to accept connections
    let client = ApiClient::new("http://127.0.0.1:9", Duration::from_secs(2)).unwrap();
    let err = client.health().await.unwrap_err();
    assert!(matches!(err, Error::Backend { .. }));
    assert!(err.is_recoverable());
}

#[test]
fn test_base_url_with_path_prefix_is_kept() {
    let client = ApiClient::new("http://example.com/dbt/", Duration::from_secs(1)).unwrap();
    assert_eq!(
        client.url("/api/sources").unwrap().as_str(),
        "http://example.com/dbt/api/sources"
    );
}

#[test]
fn test_parse_base_url_rejects_other_schemes() {
    assert!(parse_base_url("http://localhost:10000").is_ok());
    assert!(parse_base_url("ftp://localhost").unwrap_err().is_fatal());
    assert!(parse_base_url("not a url").is_err());
}
