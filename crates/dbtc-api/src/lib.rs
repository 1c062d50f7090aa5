//! dbtc-api - HTTP client for the dbt backend
//!
//! The backend owns every dbt and warehouse operation; this crate only
//! speaks its JSON contract. [`ApiClient`] implements the [`Backend`] trait
//! that background actions in `dbtc-app` are written against.

pub mod backend;
pub mod client;
pub mod endpoints;
pub mod requests;
pub mod responses;

pub use backend::{Backend, LocalBackend};
pub use client::{parse_base_url, ApiClient, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
pub use requests::{
    AddTestRequest, ConnectionRequest, CreateSourcesRequest, DeleteSourceRequest,
    NewSourceTable, RemoveTestRequest, TableColumnsRequest, TestConfigPayload,
    UpdateSourceRequest,
};
pub use responses::RelationCatalog;
