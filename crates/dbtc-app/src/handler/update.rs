//! Main update function - handles state transitions (TEA pattern)
//!
//! Generic form messages (`FormInput`, `FocusNext`, `Submit`, ...) are routed
//! to whichever dialog or form owns the input for the current [`UiMode`].

use std::time::Instant;

use crate::message::Message;
use crate::state::{AppPhase, AppState, UiMode, View};
use crate::text_input::TextEdit;

use super::navigation::{self, GridMove};
use super::{add_source, keys::handle_key, models, settings, sources, tests_dialog};
use super::{UpdateAction, UpdateResult};

/// Process a message and update state
/// Returns optional follow-up message and/or action
pub fn update(state: &mut AppState, message: Message) -> UpdateResult {
    match message {
        Message::Quit => {
            state.phase = AppPhase::Quitting;
            UpdateResult::none()
        }

        Message::Key(key) => {
            if let Some(msg) = handle_key(state, key) {
                UpdateResult::message(msg)
            } else {
                UpdateResult::none()
            }
        }

        Message::Tick => {
            state.expire_toast(Instant::now());
            UpdateResult::none()
        }

        Message::Startup => navigation::handle_startup(state),

        // ─────────────────────────────────────────────────────────
        // Navigation
        // ─────────────────────────────────────────────────────────
        Message::SwitchView(view) => navigation::handle_switch_view(state, view),
        Message::NextView => navigation::handle_cycle_view(state, true),
        Message::PreviousView => navigation::handle_cycle_view(state, false),
        Message::Refresh => navigation::handle_refresh(state),

        Message::CheckHealth => UpdateResult::action(UpdateAction::CheckHealth),
        Message::BackendHealthy { status } => navigation::handle_backend_healthy(state, status),
        Message::BackendUnreachable { error } => {
            navigation::handle_backend_unreachable(state, error)
        }

        Message::GridNext => navigation::handle_grid_move(state, GridMove::Next),
        Message::GridPrevious => navigation::handle_grid_move(state, GridMove::Previous),
        Message::GridNextPage => navigation::handle_grid_move(state, GridMove::NextPage),
        Message::GridPreviousPage => navigation::handle_grid_move(state, GridMove::PreviousPage),
        Message::GridFirst => navigation::handle_grid_move(state, GridMove::First),
        Message::GridLast => navigation::handle_grid_move(state, GridMove::Last),

        // ─────────────────────────────────────────────────────────
        // Sources
        // ─────────────────────────────────────────────────────────
        Message::SourcesLoaded {
            generation,
            sources,
        } => sources::handle_sources_loaded(state, generation, sources),
        Message::SourcesLoadFailed { generation, error } => {
            sources::handle_sources_load_failed(state, generation, error)
        }
        Message::OpenSourceDetails => sources::handle_open_details(state),
        Message::OpenEditSource => sources::handle_open_edit(state),
        Message::OpenDeleteSource => sources::handle_open_delete(state),
        Message::ConfirmDelete => sources::handle_confirm_delete(state),
        Message::SourceSaved { message } => sources::handle_source_saved(state, message),
        Message::SourceDeleted { message } => sources::handle_source_deleted(state, message),
        Message::SourceMutationFailed { error } => {
            sources::handle_source_mutation_failed(state, error)
        }

        // ─────────────────────────────────────────────────────────
        // Models
        // ─────────────────────────────────────────────────────────
        Message::ModelsLoaded { generation, models } => {
            models::handle_models_loaded(state, generation, models)
        }
        Message::ModelsLoadFailed { generation, error } => {
            models::handle_models_load_failed(state, generation, error)
        }
        Message::OpenModelDetails => models::handle_open_details(state),

        // ─────────────────────────────────────────────────────────
        // Dialogs & Forms
        // ─────────────────────────────────────────────────────────
        Message::CloseDialog => handle_close_dialog(state),
        Message::FormInput(edit) => handle_form_input(state, edit),
        Message::FocusNext => handle_focus(state, true),
        Message::FocusPrevious => handle_focus(state, false),
        Message::Submit => handle_submit(state),
        Message::ListNext => handle_list_move(state, true),
        Message::ListPrevious => handle_list_move(state, false),
        Message::Toggle => match state.ui_mode {
            UiMode::AddSource => add_source::handle_toggle(state),
            _ => UpdateResult::none(),
        },
        Message::CycleOption { forward } => match state.ui_mode {
            UiMode::TestConfig => tests_dialog::handle_cycle_option(state, forward),
            _ => UpdateResult::none(),
        },
        Message::ArrayPush => match state.ui_mode {
            UiMode::TestConfig => tests_dialog::handle_array_push(state),
            _ => UpdateResult::none(),
        },

        // ─────────────────────────────────────────────────────────
        // Tests on Sources and Models
        // ─────────────────────────────────────────────────────────
        Message::DetailsNextTest => tests_dialog::handle_details_next(state),
        Message::DetailsPreviousTest => tests_dialog::handle_details_previous(state),
        Message::OpenAddTest => tests_dialog::handle_open_add_test(state),
        Message::RemoveSelectedTest => tests_dialog::handle_remove_selected(state),
        Message::TestAdded { target, message } => {
            tests_dialog::handle_test_added(state, target, message)
        }
        Message::TestRemoved { target, message } => {
            tests_dialog::handle_test_removed(state, target, message)
        }
        Message::TestMutationFailed {
            target,
            error,
            removing,
        } => tests_dialog::handle_test_mutation_failed(state, target, error, removing),

        // ─────────────────────────────────────────────────────────
        // Project Settings
        // ─────────────────────────────────────────────────────────
        Message::SaveProjectSettings => settings::handle_save(state),
        Message::ProjectSettingsSynced => settings::handle_synced(state),
        Message::ProjectSettingsSyncFailed { error } => settings::handle_sync_failed(state, error),
        Message::LoadBackendSettings => UpdateResult::action(UpdateAction::FetchBackendSettings),
        Message::BackendSettingsLoaded { settings } => {
            settings::handle_backend_settings_loaded(state, settings)
        }

        // ─────────────────────────────────────────────────────────
        // Add Source Dialog
        // ─────────────────────────────────────────────────────────
        Message::OpenAddSource => add_source::handle_open(state),
        Message::SchemasLoaded {
            request_id,
            schemas,
        } => add_source::handle_schemas_loaded(state, request_id, schemas),
        Message::SchemasLoadFailed { request_id, error } => {
            add_source::handle_schemas_failed(state, request_id, error)
        }
        Message::TablesLoaded {
            request_id,
            schema,
            tables,
        } => add_source::handle_tables_loaded(state, request_id, schema, tables),
        Message::TablesLoadFailed {
            request_id,
            schema,
            error,
        } => add_source::handle_tables_failed(state, request_id, schema, error),
        Message::SourcesCreated { message } => add_source::handle_created(state, message),
        Message::CreateSourcesFailed { error } => add_source::handle_create_failed(state, error),

        // ─────────────────────────────────────────────────────────
        // Add Test Dialog
        // ─────────────────────────────────────────────────────────
        Message::TestTypesLoaded {
            request_id,
            test_types,
        } => tests_dialog::handle_test_types_loaded(state, request_id, test_types),
        Message::TestTypesLoadFailed { request_id, error } => {
            tests_dialog::handle_test_types_failed(state, request_id, error)
        }
        Message::ColumnsLoaded {
            request_id,
            columns,
        } => tests_dialog::handle_columns_loaded(state, request_id, columns),
        Message::ColumnsLoadFailed { request_id, error } => {
            tests_dialog::handle_columns_failed(state, request_id, error)
        }
        Message::RelationsLoaded {
            request_id,
            relations,
        } => tests_dialog::handle_relations_loaded(state, request_id, relations),
        Message::RelationsLoadFailed { request_id, error } => {
            tests_dialog::handle_relations_failed(state, request_id, error)
        }
    }
}

// ─────────────────────────────────────────────────────────
// Routing by UI Mode
// ─────────────────────────────────────────────────────────

fn handle_close_dialog(state: &mut AppState) -> UpdateResult {
    match state.ui_mode {
        UiMode::TestConfig => tests_dialog::handle_close_add_test(state),
        UiMode::AddSource => add_source::handle_close(state),
        UiMode::SourceDetails
        | UiMode::ModelDetails
        | UiMode::EditSource
        | UiMode::ConfirmDeleteSource => {
            state.close_dialogs();
            UpdateResult::none()
        }
        UiMode::Normal => UpdateResult::none(),
    }
}

fn handle_form_input(state: &mut AppState, edit: TextEdit) -> UpdateResult {
    match state.ui_mode {
        UiMode::Normal if state.view == View::Settings => settings::handle_input(state, edit),
        UiMode::EditSource => {
            if let Some(editor) = state.source_editor.as_mut() {
                editor.apply(&edit);
            }
            UpdateResult::none()
        }
        UiMode::AddSource => add_source::handle_input(state, edit),
        UiMode::TestConfig => tests_dialog::handle_input(state, edit),
        _ => UpdateResult::none(),
    }
}

fn handle_focus(state: &mut AppState, forward: bool) -> UpdateResult {
    match state.ui_mode {
        UiMode::Normal if state.view == View::Settings => settings::handle_focus(state, forward),
        UiMode::EditSource => {
            if let Some(editor) = state.source_editor.as_mut() {
                if forward {
                    editor.focus_next();
                } else {
                    editor.focus_previous();
                }
            }
            UpdateResult::none()
        }
        UiMode::AddSource => add_source::handle_focus(state, forward),
        UiMode::TestConfig => tests_dialog::handle_focus(state, forward),
        _ => UpdateResult::none(),
    }
}

fn handle_submit(state: &mut AppState) -> UpdateResult {
    match state.ui_mode {
        UiMode::Normal if state.view == View::Settings => settings::handle_save(state),
        UiMode::EditSource => sources::handle_submit_edit(state),
        UiMode::ConfirmDeleteSource => sources::handle_confirm_delete(state),
        UiMode::AddSource => add_source::handle_submit(state),
        UiMode::TestConfig => tests_dialog::handle_submit_add_test(state),
        _ => UpdateResult::none(),
    }
}

fn handle_list_move(state: &mut AppState, down: bool) -> UpdateResult {
    match state.ui_mode {
        UiMode::AddSource => add_source::handle_move(state, down),
        UiMode::SourceDetails | UiMode::ModelDetails => {
            if down {
                tests_dialog::handle_details_next(state)
            } else {
                tests_dialog::handle_details_previous(state)
            }
        }
        _ => UpdateResult::none(),
    }
}
