//! reqwest-based implementation of [`Backend`]

use std::time::Duration;

use dbtc_core::prelude::*;
use dbtc_core::{ColumnInfo, Model, ProjectSettings, Source, TableInfo, TestTarget, TestType};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use url::Url;

use crate::backend::Backend;
use crate::endpoints;
use crate::requests::{
    AddTestRequest, ConnectionRequest, CreateSourcesRequest, DeleteSourceRequest,
    RemoveTestRequest, SourcesRequest, TableColumnsRequest, UpdateSourceRequest,
};
use crate::responses::{
    ColumnsResponse, ErrorBody, HealthResponse, MessageResponse, ModelsResponse,
    OperationResponse, RelationCatalog, SchemasResponse, SourcesResponse, StoredSettingsResponse,
    TablesResponse, TestTypesResponse,
};

pub const DEFAULT_BASE_URL: &str = "http://localhost:10000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const CONNECT_TIMEOUT_SECS: u64 = 5;
const MAX_ERROR_BODY_BYTES: usize = 32 * 1024;

/// HTTP client for the dbt backend.
///
/// Cheap to clone; the underlying connection pool is shared.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ApiClient {
    /// Build a client for `base_url` with a per-request timeout.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = parse_base_url(base_url)?;

        let mut default_headers = HeaderMap::new();
        default_headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .timeout(timeout)
            .user_agent(concat!("dbt-console/", env!("CARGO_PKG_VERSION")))
            .default_headers(default_headers)
            .build()
            .map_err(|e| Error::config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url(&self, path: &str) -> Result<Url> {
        // Append rather than `Url::join` so a base with a path prefix keeps it
        let joined = format!("{}{}", self.base_url.as_str().trim_end_matches('/'), path);
        Url::parse(&joined).map_err(|e| Error::config(format!("Invalid URL {}: {}", joined, e)))
    }

    async fn send<R: DeserializeOwned>(&self, request: RequestBuilder) -> Result<R> {
        let response = request.send().await.map_err(transport_error)?;
        let status = response.status();

        if !status.is_success() {
            let body = read_capped_error_body(response).await;
            let message = error_message(status, &body);
            debug!("Backend error {}: {}", status, body);
            return Err(Error::http(status.as_u16(), message));
        }

        response
            .json::<R>()
            .await
            .map_err(|e| Error::invalid_response(e.to_string()))
    }

    /// Send a mutating request and unwrap its `{success, message}` envelope.
    async fn operation(&self, request: RequestBuilder, fallback: &str) -> Result<String> {
        let outcome: OperationResponse = self.send(request).await?;
        if outcome.success {
            Ok(outcome.message)
        } else if outcome.message.is_empty() {
            Err(Error::operation(fallback))
        } else {
            Err(Error::operation(outcome.message))
        }
    }
}

impl Backend for ApiClient {
    async fn health(&self) -> Result<String> {
        let url = self.url(endpoints::HEALTH)?;
        let health: HealthResponse = self.send(self.http.get(url)).await?;
        Ok(health.status)
    }

    async fn list_sources(&self, dbt_project_path: &str) -> Result<Vec<Source>> {
        let url = self.url(endpoints::SOURCES)?;
        let body = SourcesRequest { dbt_project_path };
        let response: SourcesResponse = self.send(self.http.post(url).json(&body)).await?;
        debug!("Fetched {} sources", response.sources.len());
        Ok(response.sources)
    }

    async fn update_source(&self, request: &UpdateSourceRequest) -> Result<String> {
        let url = self.url(endpoints::SOURCES)?;
        self.operation(self.http.put(url).json(request), "Failed to update source")
            .await
    }

    async fn delete_source(&self, request: &DeleteSourceRequest) -> Result<String> {
        let url = self.url(endpoints::SOURCES)?;
        self.operation(self.http.delete(url).json(request), "Failed to delete source")
            .await
    }

    async fn list_schemas(&self, connection: &ConnectionRequest) -> Result<Vec<String>> {
        let url = self.url(endpoints::WAREHOUSE_SCHEMAS)?;
        let response: SchemasResponse = self.send(self.http.post(url).json(connection)).await?;
        Ok(response.schemas)
    }

    async fn list_tables(
        &self,
        connection: &ConnectionRequest,
        schema: &str,
    ) -> Result<Vec<TableInfo>> {
        let url = self.url(endpoints::WAREHOUSE_TABLES)?;
        let request = self
            .http
            .post(url)
            .query(&[("schema", schema)])
            .json(connection);
        let response: TablesResponse = self.send(request).await?;
        Ok(response.tables)
    }

    async fn create_sources(&self, request: &CreateSourcesRequest) -> Result<String> {
        let url = self.url(endpoints::WAREHOUSE_SOURCES)?;
        self.operation(self.http.post(url).json(request), "Failed to create sources")
            .await
    }

    async fn list_models(&self, connection: &ConnectionRequest) -> Result<Vec<Model>> {
        let url = self.url(endpoints::MODELS)?;
        let response: ModelsResponse = self.send(self.http.post(url).json(connection)).await?;
        debug!("Fetched {} models", response.models.len());
        Ok(response.models)
    }

    async fn test_types(&self, target: TestTarget) -> Result<Vec<TestType>> {
        let url = self.url(&endpoints::test_types(target))?;
        let response: TestTypesResponse = self.send(self.http.get(url)).await?;
        Ok(response.test_types)
    }

    async fn table_columns(&self, request: &TableColumnsRequest) -> Result<Vec<ColumnInfo>> {
        let url = self.url(endpoints::MODEL_COLUMNS)?;
        let response: ColumnsResponse = self.send(self.http.post(url).json(request)).await?;
        Ok(response.columns)
    }

    async fn models_and_sources(
        &self,
        connection: &ConnectionRequest,
    ) -> Result<RelationCatalog> {
        let url = self.url(endpoints::MODELS_AND_SOURCES)?;
        self.send(self.http.post(url).json(connection)).await
    }

    async fn add_test(&self, target: TestTarget, request: &AddTestRequest) -> Result<String> {
        let url = self.url(&endpoints::add_test(target))?;
        info!(
            "Adding {} test '{}' to {}.{}",
            target.label(),
            request.test_config.test_type,
            request.schema,
            request.table
        );
        self.operation(self.http.post(url).json(request), "Failed to add test")
            .await
    }

    async fn remove_test(&self, request: &RemoveTestRequest) -> Result<String> {
        let url = self.url(&endpoints::remove_test(request.target()))?;
        self.operation(self.http.post(url).json(request), "Failed to remove test")
            .await
    }

    async fn save_project_settings(&self, settings: &ProjectSettings) -> Result<()> {
        let url = self.url(endpoints::PROJECT_SETTINGS)?;
        let response: MessageResponse = self.send(self.http.post(url).json(settings)).await?;
        debug!("Backend stored project settings: {}", response.message);
        Ok(())
    }

    async fn load_project_settings(&self) -> Result<Option<ProjectSettings>> {
        let url = self.url(endpoints::PROJECT_SETTINGS)?;
        match self.send(self.http.get(url)).await? {
            StoredSettingsResponse::Settings(settings) => Ok(Some(settings)),
            StoredSettingsResponse::Empty { message } => {
                debug!("Backend has no project settings: {}", message);
                Ok(None)
            }
        }
    }
}

/// Validate a backend base URL (http/https only).
pub fn parse_base_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw.trim())
        .map_err(|e| Error::config_invalid(format!("Invalid backend URL '{}': {}", raw, e)))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(Error::config_invalid(format!(
            "Unsupported backend URL scheme '{}'",
            other
        ))),
    }
}

fn transport_error(e: reqwest::Error) -> Error {
    if e.is_timeout() {
        Error::backend("request timed out")
    } else if e.is_connect() {
        Error::backend(format!("could not connect ({})", e))
    } else {
        Error::backend(e.to_string())
    }
}

/// Pick the most useful message out of an error response body.
fn error_message(status: StatusCode, body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
        if let Some(message) = parsed.into_message() {
            return message;
        }
    }
    let trimmed = body.trim();
    if !trimmed.is_empty() && !trimmed.starts_with('{') {
        return trimmed.to_string();
    }
    status
        .canonical_reason()
        .unwrap_or("Request failed")
        .to_string()
}

/// Read at most [`MAX_ERROR_BODY_BYTES`] of an error response.
pub async fn read_capped_error_body(response: reqwest::Response) -> String {
    use futures_util::StreamExt;
    let mut body = Vec::new();
    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let Ok(chunk) = chunk else { break };
        body.extend_from_slice(&chunk);
        if body.len() > MAX_ERROR_BODY_BYTES {
            body.truncate(MAX_ERROR_BODY_BYTES);
            let text = String::from_utf8_lossy(&body);
            return format!("{text}...(truncated)");
        }
    }
    String::from_utf8_lossy(&body).into_owned()
}

#[cfg(test)]
mod tests;
