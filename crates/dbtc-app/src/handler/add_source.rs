//! Add source dialog: schema and table pickers backed by warehouse introspection

use dbtc_api::ConnectionRequest;
use dbtc_core::prelude::*;
use dbtc_core::TableInfo;

use crate::add_source::{AddSourceFocus, AddSourceState};
use crate::state::{AppState, UiMode, View};
use crate::text_input::TextEdit;

use super::navigation::load_view;
use super::{UpdateAction, UpdateResult};

pub const SCHEMAS_FAILED: &str = "Failed to fetch schemas from the warehouse";
pub const TABLES_FAILED: &str = "Failed to fetch tables from the warehouse";
pub const SOURCES_CREATED: &str = "Sources created successfully";

pub fn handle_open(state: &mut AppState) -> UpdateResult {
    let request_id = state.next_request_id();
    state.add_source = Some(AddSourceState::open(request_id));
    state.ui_mode = UiMode::AddSource;
    UpdateResult::action(UpdateAction::LoadSchemas {
        request_id,
        connection: ConnectionRequest::from(&state.project),
    })
}

/// Esc discards the dialog; reopening starts from scratch
pub fn handle_close(state: &mut AppState) -> UpdateResult {
    state.add_source = None;
    state.ui_mode = UiMode::Normal;
    UpdateResult::none()
}

fn current_dialog(state: &mut AppState, request_id: u64) -> Option<&mut AddSourceState> {
    match state.add_source.as_mut() {
        Some(dialog) if dialog.request_id == request_id => Some(dialog),
        _ => {
            debug!("Dropping response for stale add-source request {}", request_id);
            None
        }
    }
}

pub fn handle_schemas_loaded(
    state: &mut AppState,
    request_id: u64,
    schemas: Vec<String>,
) -> UpdateResult {
    if let Some(dialog) = current_dialog(state, request_id) {
        debug!("Loaded {} schemas", schemas.len());
        dialog.set_schemas(schemas);
    }
    UpdateResult::none()
}

pub fn handle_schemas_failed(state: &mut AppState, request_id: u64, error: String) -> UpdateResult {
    if let Some(dialog) = current_dialog(state, request_id) {
        error!("Failed to fetch schemas: {}", error);
        dialog.set_schemas(Vec::new());
        state.show_error(SCHEMAS_FAILED);
    }
    UpdateResult::none()
}

pub fn handle_tables_loaded(
    state: &mut AppState,
    request_id: u64,
    schema: String,
    tables: Vec<TableInfo>,
) -> UpdateResult {
    if let Some(dialog) = current_dialog(state, request_id) {
        if dialog.is_current_schema(&schema) {
            debug!("Loaded {} tables for schema {}", tables.len(), schema);
            dialog.set_tables(tables);
        }
    }
    UpdateResult::none()
}

pub fn handle_tables_failed(
    state: &mut AppState,
    request_id: u64,
    schema: String,
    error: String,
) -> UpdateResult {
    let Some(dialog) = current_dialog(state, request_id) else {
        return UpdateResult::none();
    };
    if !dialog.is_current_schema(&schema) {
        return UpdateResult::none();
    }
    error!("Failed to fetch tables for schema {}: {}", schema, error);
    dialog.set_tables(Vec::new());
    state.show_error(TABLES_FAILED);
    UpdateResult::none()
}

pub fn handle_input(state: &mut AppState, edit: TextEdit) -> UpdateResult {
    if let Some(dialog) = state.add_source.as_mut() {
        dialog.apply(&edit);
    }
    UpdateResult::none()
}

pub fn handle_focus(state: &mut AppState, forward: bool) -> UpdateResult {
    if let Some(dialog) = state.add_source.as_mut() {
        if forward {
            dialog.focus_next();
        } else {
            dialog.focus_previous();
        }
    }
    UpdateResult::none()
}

pub fn handle_move(state: &mut AppState, down: bool) -> UpdateResult {
    if let Some(dialog) = state.add_source.as_mut() {
        dialog.move_cursor(down);
    }
    UpdateResult::none()
}

/// Enter/Space on the schema list chooses a schema; on the table list it
/// ticks or unticks the table under the cursor.
pub fn handle_toggle(state: &mut AppState) -> UpdateResult {
    let Some(dialog) = state.add_source.as_mut() else {
        return UpdateResult::none();
    };
    match dialog.focus {
        AddSourceFocus::Schemas => {
            if let Some(schema) = dialog.choose_schema() {
                return UpdateResult::action(UpdateAction::LoadTables {
                    request_id: dialog.request_id,
                    connection: ConnectionRequest::from(&state.project),
                    schema,
                });
            }
        }
        AddSourceFocus::Tables => dialog.toggle_table(),
        AddSourceFocus::Name | AddSourceFocus::Descriptions => {}
    }
    UpdateResult::none()
}

pub fn handle_submit(state: &mut AppState) -> UpdateResult {
    let path = state.project.dbt_project_path.clone();
    let Some(dialog) = state.add_source.as_mut() else {
        return UpdateResult::none();
    };
    if !dialog.can_save() {
        return UpdateResult::none();
    }
    let Some(request) = dialog.to_request(&path) else {
        return UpdateResult::none();
    };

    info!(
        "Creating source '{}' with {} tables from schema {}",
        request.source_name,
        request.tables.len(),
        request.schema_name
    );
    dialog.saving = true;
    UpdateResult::action(UpdateAction::CreateSources(request))
}

pub fn handle_created(state: &mut AppState, message: String) -> UpdateResult {
    let toast = if message.trim().is_empty() {
        SOURCES_CREATED.to_string()
    } else {
        message
    };
    info!("{}", toast);
    state.show_success(toast);
    state.add_source = None;
    state.ui_mode = UiMode::Normal;
    match load_view(state, View::Sources, true) {
        Some(action) => UpdateResult::action(action),
        None => UpdateResult::none(),
    }
}

pub fn handle_create_failed(state: &mut AppState, error: String) -> UpdateResult {
    warn!("Creating sources failed: {}", error);
    if let Some(dialog) = state.add_source.as_mut() {
        dialog.saving = false;
    }
    state.show_error(error);
    UpdateResult::none()
}
