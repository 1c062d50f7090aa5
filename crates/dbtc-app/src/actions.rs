//! Action handlers: UpdateAction dispatch and background task spawning
//!
//! Every action runs on its own tokio task and reports back with a
//! [`Message`]. Backend errors never escape a task; they become the
//! matching `*Failed` message.

use std::sync::Arc;

use dbtc_api::{Backend, TableColumnsRequest};
use dbtc_core::prelude::*;
use dbtc_core::TestTarget;
use tokio::sync::mpsc;

use crate::handler::UpdateAction;
use crate::message::Message;

/// Execute an action by spawning a background task
pub fn handle_action<B>(action: UpdateAction, msg_tx: mpsc::Sender<Message>, backend: Arc<B>)
where
    B: Backend + Sync + 'static,
{
    tokio::spawn(async move {
        for message in execute(action, backend.as_ref()).await {
            if msg_tx.send(message).await.is_err() {
                debug!("Event loop closed before an action result was delivered");
                break;
            }
        }
    });
}

/// Run one action to completion and produce the messages describing its outcome
pub async fn execute<B>(action: UpdateAction, backend: &B) -> Vec<Message>
where
    B: Backend + Sync,
{
    let message = match action {
        UpdateAction::CheckHealth => match backend.health().await {
            Ok(status) => Message::BackendHealthy { status },
            Err(e) => Message::BackendUnreachable {
                error: e.to_string(),
            },
        },

        UpdateAction::LoadSources {
            generation,
            dbt_project_path,
        } => match backend.list_sources(&dbt_project_path).await {
            Ok(sources) => Message::SourcesLoaded {
                generation,
                sources,
            },
            Err(e) => Message::SourcesLoadFailed {
                generation,
                error: e.to_string(),
            },
        },

        UpdateAction::LoadModels {
            generation,
            connection,
        } => match backend.list_models(&connection).await {
            Ok(models) => Message::ModelsLoaded { generation, models },
            Err(e) => Message::ModelsLoadFailed {
                generation,
                error: e.to_string(),
            },
        },

        UpdateAction::UpdateSource(request) => match backend.update_source(&request).await {
            Ok(message) => Message::SourceSaved { message },
            Err(e) => Message::SourceMutationFailed {
                error: e.user_message(),
            },
        },

        UpdateAction::DeleteSource(request) => match backend.delete_source(&request).await {
            Ok(message) => Message::SourceDeleted { message },
            Err(e) => Message::SourceMutationFailed {
                error: e.user_message(),
            },
        },

        UpdateAction::LoadSchemas {
            request_id,
            connection,
        } => match backend.list_schemas(&connection).await {
            Ok(schemas) => Message::SchemasLoaded {
                request_id,
                schemas,
            },
            Err(e) => Message::SchemasLoadFailed {
                request_id,
                error: e.to_string(),
            },
        },

        UpdateAction::LoadTables {
            request_id,
            connection,
            schema,
        } => match backend.list_tables(&connection, &schema).await {
            Ok(tables) => Message::TablesLoaded {
                request_id,
                schema,
                tables,
            },
            Err(e) => Message::TablesLoadFailed {
                request_id,
                schema,
                error: e.to_string(),
            },
        },

        UpdateAction::CreateSources(request) => match backend.create_sources(&request).await {
            Ok(message) => Message::SourcesCreated { message },
            Err(e) => Message::CreateSourcesFailed {
                error: e.user_message(),
            },
        },

        UpdateAction::LoadTestConfigData {
            request_id,
            target,
            columns,
        } => {
            return load_test_config_data(backend, request_id, target, columns).await;
        }

        UpdateAction::LoadRelations {
            request_id,
            connection,
        } => match backend.models_and_sources(&connection).await {
            Ok(relations) => Message::RelationsLoaded {
                request_id,
                relations,
            },
            Err(e) => Message::RelationsLoadFailed {
                request_id,
                error: e.to_string(),
            },
        },

        UpdateAction::AddTest { target, request } => {
            match backend.add_test(target, &request).await {
                Ok(message) => Message::TestAdded { target, message },
                Err(e) => Message::TestMutationFailed {
                    target,
                    error: e.user_message(),
                    removing: false,
                },
            }
        }

        UpdateAction::RemoveTest(request) => {
            let target = request.target();
            match backend.remove_test(&request).await {
                Ok(message) => Message::TestRemoved { target, message },
                Err(e) => Message::TestMutationFailed {
                    target,
                    error: e.user_message(),
                    removing: true,
                },
            }
        }

        UpdateAction::PushProjectSettings(settings) => {
            match backend.save_project_settings(&settings).await {
                Ok(()) => Message::ProjectSettingsSynced,
                Err(e) => Message::ProjectSettingsSyncFailed {
                    error: e.user_message(),
                },
            }
        }

        UpdateAction::FetchBackendSettings => match backend.load_project_settings().await {
            Ok(settings) => Message::BackendSettingsLoaded { settings },
            Err(e) => {
                // Prefilling is best effort; an empty form is still usable
                warn!("Could not read project settings from the backend: {}", e);
                return Vec::new();
            }
        },
    };
    vec![message]
}

/// Test types and columns are fetched concurrently and reported separately,
/// so a failing column fetch still leaves the type list usable.
async fn load_test_config_data<B>(
    backend: &B,
    request_id: u64,
    target: TestTarget,
    columns: Option<TableColumnsRequest>,
) -> Vec<Message>
where
    B: Backend + Sync,
{
    let columns_future = async {
        match &columns {
            Some(request) => Some(backend.table_columns(request).await),
            None => None,
        }
    };
    let (test_types, columns) = tokio::join!(backend.test_types(target), columns_future);

    let mut messages = vec![match test_types {
        Ok(test_types) => Message::TestTypesLoaded {
            request_id,
            test_types,
        },
        Err(e) => Message::TestTypesLoadFailed {
            request_id,
            error: e.to_string(),
        },
    }];

    match columns {
        Some(Ok(columns)) => messages.push(Message::ColumnsLoaded {
            request_id,
            columns,
        }),
        Some(Err(e)) => messages.push(Message::ColumnsLoadFailed {
            request_id,
            error: e.to_string(),
        }),
        None => {}
    }
    messages
}

#[cfg(test)]
mod tests;
