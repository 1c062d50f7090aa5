//! Handler module - TEA update function and event handlers
//!
//! Organized into submodules:
//! - `update`: Main update() function and message dispatch
//! - `keys`: Key event handlers for UI modes
//! - `navigation`: View switching and table paging
//! - `sources`: Sources table, details, edit and delete dialogs
//! - `models`: Models table and details dialog
//! - `tests_dialog`: Adding and removing tests
//! - `add_source`: Add source dialog
//! - `settings`: Project settings form

pub(crate) mod add_source;
pub(crate) mod keys;
pub(crate) mod models;
pub(crate) mod navigation;
pub(crate) mod settings;
pub(crate) mod sources;
pub(crate) mod tests_dialog;
pub(crate) mod update;


use dbtc_api::{
    AddTestRequest, ConnectionRequest, CreateSourcesRequest, DeleteSourceRequest,
    RemoveTestRequest, TableColumnsRequest, UpdateSourceRequest,
};
use dbtc_core::{ProjectSettings, TestTarget};

use crate::message::Message;

// Re-export main entry point
pub use update::update;

#[cfg(test)]
pub(crate) use keys::handle_key;

/// Actions that the event loop should perform after update
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateAction {
    /// `GET /health`
    CheckHealth,

    /// `generation` comes from [`Grid::start_loading`](crate::grid::Grid::start_loading)
    LoadSources {
        generation: u64,
        dbt_project_path: String,
    },

    LoadModels {
        generation: u64,
        connection: ConnectionRequest,
    },

    UpdateSource(UpdateSourceRequest),

    DeleteSource(DeleteSourceRequest),

    /// Warehouse schemas for the add source dialog
    LoadSchemas {
        request_id: u64,
        connection: ConnectionRequest,
    },

    LoadTables {
        request_id: u64,
        connection: ConnectionRequest,
        schema: String,
    },

    CreateSources(CreateSourcesRequest),

    /// Test types for the target and, when the subject has a table,
    /// its columns. Both are fetched concurrently.
    LoadTestConfigData {
        request_id: u64,
        target: TestTarget,
        columns: Option<TableColumnsRequest>,
    },

    /// Models and sources for relation fields
    LoadRelations {
        request_id: u64,
        connection: ConnectionRequest,
    },

    AddTest {
        target: TestTarget,
        request: AddTestRequest,
    },

    RemoveTest(RemoveTestRequest),

    /// Mirror saved project settings to the backend
    PushProjectSettings(ProjectSettings),

    /// Read the backend's stored project settings
    FetchBackendSettings,
}

/// Result of processing a message
#[derive(Debug, Default)]
pub struct UpdateResult {
    /// Optional follow-up message to process
    pub message: Option<Message>,
    /// Optional action for the event loop to perform
    pub action: Option<UpdateAction>,
}

impl UpdateResult {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn message(msg: Message) -> Self {
        Self {
            message: Some(msg),
            action: None,
        }
    }

    pub fn action(action: UpdateAction) -> Self {
        Self {
            message: None,
            action: Some(action),
        }
    }

    pub fn with_message(mut self, msg: Message) -> Self {
        self.message = Some(msg);
        self
    }
}
