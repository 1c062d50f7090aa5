//! Adding and removing tests on sources and models
//!
//! The add-test dialog is opened from a details dialog and returns to it when
//! closed. Responses carry the dialog's request id; anything tagged with an
//! older id is dropped.

use dbtc_api::{ConnectionRequest, RelationCatalog, RemoveTestRequest};
use dbtc_core::prelude::*;
use dbtc_core::{ColumnInfo, TestLabel, TestTarget, TestType};

use crate::state::{AppState, UiMode, View};
use crate::test_config::{TestConfigState, TestSubject};
use crate::text_input::TextEdit;

use super::navigation::load_view;
use super::{UpdateAction, UpdateResult};

pub const TEST_ADDED: &str = "Test added successfully";
pub const TEST_REMOVED: &str = "Test removed successfully";

// ─────────────────────────────────────────────────────────
// Details Dialog
// ─────────────────────────────────────────────────────────

pub fn handle_details_next(state: &mut AppState) -> UpdateResult {
    let count = state.details_tests().len();
    if let Some(details) = state.details.as_mut() {
        details.select_next(count);
    }
    UpdateResult::none()
}

pub fn handle_details_previous(state: &mut AppState) -> UpdateResult {
    if let Some(details) = state.details.as_mut() {
        details.select_previous();
    }
    UpdateResult::none()
}

/// Ignored while another test or source mutation is still running
pub fn handle_remove_selected(state: &mut AppState) -> UpdateResult {
    if state.mutation_in_flight {
        debug!("Ignoring test removal while a mutation is in flight");
        return UpdateResult::none();
    }
    let Some(selected) = state.details.as_ref().map(|d| d.selected_test) else {
        return UpdateResult::none();
    };
    let Some(label) = state.details_tests().get(selected).map(|t| TestLabel::parse(t)) else {
        return UpdateResult::none();
    };

    let path = &state.project.dbt_project_path;
    let request = if let Some(source) = state.details_source() {
        RemoveTestRequest::for_source(path, source, &label)
    } else if let Some(model) = state.details_model() {
        RemoveTestRequest::for_model(path, &model.sql_path, &label)
    } else {
        return UpdateResult::none();
    };

    info!("Removing {} test '{}'", request.target().label(), label.as_str());
    state.mutation_in_flight = true;
    UpdateResult::action(UpdateAction::RemoveTest(request))
}

pub fn handle_test_added(
    state: &mut AppState,
    target: TestTarget,
    message: String,
) -> UpdateResult {
    state.mutation_in_flight = false;
    info!("Test added to {}: {}", target.label(), message);
    state.show_success(TEST_ADDED);
    reload_target(state, target)
}

pub fn handle_test_removed(
    state: &mut AppState,
    target: TestTarget,
    message: String,
) -> UpdateResult {
    state.mutation_in_flight = false;
    info!("Test removed from {}: {}", target.label(), message);
    state.show_success(TEST_REMOVED);
    reload_target(state, target)
}

pub fn handle_test_mutation_failed(
    state: &mut AppState,
    target: TestTarget,
    error: String,
    removing: bool,
) -> UpdateResult {
    state.mutation_in_flight = false;
    warn!("Test mutation on {} failed: {}", target.label(), error);
    if removing {
        state.show_error(format!("Failed to remove test: {}", error));
    } else {
        state.show_error(error);
    }
    UpdateResult::none()
}

fn reload_target(state: &mut AppState, target: TestTarget) -> UpdateResult {
    let view = match target {
        TestTarget::Source => View::Sources,
        TestTarget::Model => View::Models,
    };
    match load_view(state, view, true) {
        Some(action) => UpdateResult::action(action),
        None => UpdateResult::none(),
    }
}

// ─────────────────────────────────────────────────────────
// Add Test Dialog
// ─────────────────────────────────────────────────────────

pub fn handle_open_add_test(state: &mut AppState) -> UpdateResult {
    let (target, subject) = if let Some(source) = state.details_source() {
        (TestTarget::Source, TestSubject::from(source))
    } else if let Some(model) = state.details_model() {
        (TestTarget::Model, TestSubject::from(model))
    } else {
        return UpdateResult::none();
    };

    let request_id = state.next_request_id();
    let mut dialog = TestConfigState::open(request_id, target, subject);
    let columns = dialog.columns_request(&state.project);
    if columns.is_none() {
        dialog.skip_columns();
    }

    debug!("Opening add-test dialog for {}", dialog.subject.title);
    state.test_config = Some(dialog);
    state.ui_mode = UiMode::TestConfig;
    UpdateResult::action(UpdateAction::LoadTestConfigData {
        request_id,
        target,
        columns,
    })
}

/// Close the add-test dialog, discarding everything entered
pub fn handle_close_add_test(state: &mut AppState) -> UpdateResult {
    state.test_config = None;
    state.ui_mode = if state.details.is_some() {
        state.details_mode()
    } else {
        UiMode::Normal
    };
    UpdateResult::none()
}

pub fn handle_submit_add_test(state: &mut AppState) -> UpdateResult {
    if state.mutation_in_flight {
        debug!("Ignoring add-test submit while a mutation is in flight");
        return UpdateResult::none();
    }
    let project = state.project.clone();
    let Some(dialog) = state.test_config.as_mut() else {
        return UpdateResult::none();
    };
    let Some(request) = dialog.to_request(&project) else {
        return UpdateResult::none();
    };

    let target = dialog.target;
    info!(
        "Adding {} test '{}' to {}",
        target.label(),
        request.test_config.test_type,
        dialog.subject.title
    );
    handle_close_add_test(state);
    state.mutation_in_flight = true;
    UpdateResult::action(UpdateAction::AddTest { target, request })
}

pub fn handle_input(state: &mut AppState, edit: TextEdit) -> UpdateResult {
    if let Some(dialog) = state.test_config.as_mut() {
        dialog.apply(&edit);
    }
    UpdateResult::none()
}

pub fn handle_focus(state: &mut AppState, forward: bool) -> UpdateResult {
    if let Some(dialog) = state.test_config.as_mut() {
        if forward {
            dialog.focus_next();
        } else {
            dialog.focus_previous();
        }
    }
    UpdateResult::none()
}

/// Left/Right on a choice row. Picking a type that references other
/// relations fetches the catalog the first time.
pub fn handle_cycle_option(state: &mut AppState, forward: bool) -> UpdateResult {
    let Some(dialog) = state.test_config.as_mut() else {
        return UpdateResult::none();
    };
    if dialog.cycle_focused(forward) {
        return UpdateResult::action(UpdateAction::LoadRelations {
            request_id: dialog.request_id,
            connection: ConnectionRequest::from(&state.project),
        });
    }
    UpdateResult::none()
}

pub fn handle_array_push(state: &mut AppState) -> UpdateResult {
    if let Some(dialog) = state.test_config.as_mut() {
        dialog.push_item();
    }
    UpdateResult::none()
}

fn current_dialog(state: &mut AppState, request_id: u64) -> Option<&mut TestConfigState> {
    match state.test_config.as_mut() {
        Some(dialog) if dialog.request_id == request_id => Some(dialog),
        _ => {
            debug!("Dropping response for stale add-test request {}", request_id);
            None
        }
    }
}

pub fn handle_test_types_loaded(
    state: &mut AppState,
    request_id: u64,
    test_types: Vec<TestType>,
) -> UpdateResult {
    if let Some(dialog) = current_dialog(state, request_id) {
        dialog.set_test_types(test_types);
    }
    UpdateResult::none()
}

pub fn handle_test_types_failed(
    state: &mut AppState,
    request_id: u64,
    error: String,
) -> UpdateResult {
    if let Some(dialog) = current_dialog(state, request_id) {
        warn!("Failed to fetch test types: {}", error);
        dialog.fail_test_types();
    }
    UpdateResult::none()
}

pub fn handle_columns_loaded(
    state: &mut AppState,
    request_id: u64,
    columns: Vec<ColumnInfo>,
) -> UpdateResult {
    if let Some(dialog) = current_dialog(state, request_id) {
        dialog.set_columns(columns);
    }
    UpdateResult::none()
}

pub fn handle_columns_failed(
    state: &mut AppState,
    request_id: u64,
    error: String,
) -> UpdateResult {
    if let Some(dialog) = current_dialog(state, request_id) {
        warn!("Failed to fetch columns: {}", error);
        dialog.fail_columns();
    }
    UpdateResult::none()
}

pub fn handle_relations_loaded(
    state: &mut AppState,
    request_id: u64,
    relations: RelationCatalog,
) -> UpdateResult {
    if let Some(dialog) = current_dialog(state, request_id) {
        dialog.set_relations(relations);
    }
    UpdateResult::none()
}

pub fn handle_relations_failed(
    state: &mut AppState,
    request_id: u64,
    error: String,
) -> UpdateResult {
    if let Some(dialog) = current_dialog(state, request_id) {
        warn!("Failed to fetch models and sources: {}", error);
        dialog.fail_relations();
    }
    UpdateResult::none()
}
