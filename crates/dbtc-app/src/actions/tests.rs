//! Action execution against a mock backend

use std::time::Duration;

use super::*;
use dbtc_api::{ApiClient, ConnectionRequest, RemoveTestRequest};
use dbtc_core::{ProjectSettings, Source, TestLabel};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> ApiClient {
    ApiClient::new(&server.uri(), Duration::from_secs(5)).unwrap()
}

fn settings() -> ProjectSettings {
    ProjectSettings::new("/work/shop", "/home/me/.dbt/profiles.yml", "dev")
}

#[tokio::test]
async fn test_health_failure_becomes_unreachable() {
    let client = ApiClient::new("http://127.0.0.1:9", Duration::from_secs(2)).unwrap();
    let messages = execute(UpdateAction::CheckHealth, &client).await;
    assert!(matches!(
        messages.as_slice(),
        [Message::BackendUnreachable { .. }]
    ));
}

#[tokio::test]
async fn test_load_sources() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/sources"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "sources": [{"source": "raw", "schema": "public", "table": "orders", "tests": []}]
        })))
        .mount(&server)
        .await;

    let action = UpdateAction::LoadSources {
        generation: 3,
        dbt_project_path: "/work/shop".into(),
    };
    let messages = execute(action, &client_for(&server)).await;
    match messages.as_slice() {
        [Message::SourcesLoaded {
            generation: 3,
            sources,
        }] => assert_eq!(sources[0].table, "orders"),
        other => panic!("unexpected messages: {:?}", other),
    }
}

#[tokio::test]
async fn test_load_models_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/models"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"detail": "dbt exploded"})))
        .mount(&server)
        .await;

    let action = UpdateAction::LoadModels {
        generation: 1,
        connection: ConnectionRequest::from(&settings()),
    };
    let messages = execute(action, &client_for(&server)).await;
    match messages.as_slice() {
        [Message::ModelsLoadFailed {
            generation: 1,
            error,
        }] => assert!(error.contains("dbt exploded")),
        other => panic!("unexpected messages: {:?}", other),
    }
}

#[tokio::test]
async fn test_remove_test_failure_carries_backend_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/sources/remove-test"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"success": false, "message": "Test not found"})),
        )
        .mount(&server)
        .await;

    let source = Source {
        source: "raw".into(),
        schema: "public".into(),
        table: "orders".into(),
        tests: vec!["id: unique".into()],
        description: None,
    };
    let request =
        RemoveTestRequest::for_source("/work/shop", &source, &TestLabel::parse("id: unique"));
    let messages = execute(UpdateAction::RemoveTest(request), &client_for(&server)).await;
    match messages.as_slice() {
        [Message::TestMutationFailed {
            target,
            error,
            removing,
        }] => {
            assert_eq!(*target, TestTarget::Source);
            assert_eq!(error, "Test not found");
            assert!(removing);
        }
        other => panic!("unexpected messages: {:?}", other),
    }
}

#[tokio::test]
async fn test_test_config_data_reports_both_results() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/models/test-types"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "test_types": [{"name": "unique", "description": "", "required_configs": []}]
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/models/columns"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let action = UpdateAction::LoadTestConfigData {
        request_id: 7,
        target: TestTarget::Model,
        columns: Some(TableColumnsRequest {
            connection: ConnectionRequest::from(&settings()),
            schema: "analytics".into(),
            table: "orders".into(),
        }),
    };
    let messages = execute(action, &client_for(&server)).await;
    assert!(matches!(
        messages.as_slice(),
        [
            Message::TestTypesLoaded { request_id: 7, .. },
            Message::ColumnsLoadFailed { request_id: 7, .. }
        ]
    ));
}

#[tokio::test]
async fn test_test_config_data_without_table_skips_columns() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/sources/test-types"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"test_types": []})))
        .mount(&server)
        .await;

    let action = UpdateAction::LoadTestConfigData {
        request_id: 1,
        target: TestTarget::Source,
        columns: None,
    };
    let messages = execute(action, &client_for(&server)).await;
    assert_eq!(messages.len(), 1);
}

#[tokio::test]
async fn test_fetch_backend_settings_failure_is_silent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/project-settings"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let messages = execute(UpdateAction::FetchBackendSettings, &client_for(&server)).await;
    assert!(messages.is_empty());
}

#[tokio::test]
async fn test_handle_action_delivers_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "healthy"})))
        .mount(&server)
        .await;

    let (tx, mut rx) = mpsc::channel(4);
    handle_action(UpdateAction::CheckHealth, tx, Arc::new(client_for(&server)));

    let message = tokio::time::timeout(Duration::from_secs(5), rx.recv())
        .await
        .unwrap()
        .unwrap();
    assert!(matches!(message, Message::BackendHealthy { status } if status == "healthy"));
}
