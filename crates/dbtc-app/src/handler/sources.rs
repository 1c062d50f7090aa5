//! Sources table and its details, edit and delete dialogs

use dbtc_api::DeleteSourceRequest;
use dbtc_core::prelude::*;
use dbtc_core::Source;

use crate::details::{DetailsState, DetailsTarget};
use crate::source_editor::SourceEditor;
use crate::state::{AppState, UiMode, View};

use super::navigation::load_view;
use super::{UpdateAction, UpdateResult};

pub const SOURCES_FAILED: &str = "Failed to fetch sources";
pub const SOURCE_UPDATED: &str = "Source updated successfully";
pub const SOURCE_DELETED: &str = "Source deleted successfully";

pub fn handle_sources_loaded(
    state: &mut AppState,
    generation: u64,
    sources: Vec<Source>,
) -> UpdateResult {
    if !state.sources.is_current(generation) {
        debug!("Dropping stale sources response (generation {})", generation);
        return UpdateResult::none();
    }
    debug!("Loaded {} sources", sources.len());
    state.sources.set_rows(sources);
    rebind_details(state);
    UpdateResult::none()
}

pub fn handle_sources_load_failed(
    state: &mut AppState,
    generation: u64,
    error: String,
) -> UpdateResult {
    if !state.sources.is_current(generation) {
        debug!("Dropping stale sources failure: {}", error);
        return UpdateResult::none();
    }
    error!("Failed to fetch sources: {}", error);
    state.sources.fail_loading();
    state.show_error(SOURCES_FAILED);
    UpdateResult::none()
}

/// Point the details dialog at the refreshed record, closing it when the
/// record is gone.
fn rebind_details(state: &mut AppState) {
    let Some(DetailsTarget::Source(key)) = state.details.as_ref().map(|d| d.target.clone()) else {
        return;
    };
    match state.find_source(&key).map(|s| s.tests.len()) {
        Some(test_count) => {
            if let Some(details) = state.details.as_mut() {
                details.clamp(test_count);
            }
        }
        None => {
            debug!("Source {}.{} disappeared, closing details", key.source, key.table);
            state.details = None;
            if state.ui_mode == UiMode::SourceDetails {
                state.ui_mode = UiMode::Normal;
            }
        }
    }
}

// ─────────────────────────────────────────────────────────
// Dialogs
// ─────────────────────────────────────────────────────────

pub fn handle_open_details(state: &mut AppState) -> UpdateResult {
    if let Some(source) = state.sources.selected() {
        state.details = Some(DetailsState::source(source.key()));
        state.ui_mode = UiMode::SourceDetails;
    }
    UpdateResult::none()
}

pub fn handle_open_edit(state: &mut AppState) -> UpdateResult {
    if let Some(source) = state.sources.selected() {
        state.source_editor = Some(SourceEditor::new(source));
        state.ui_mode = UiMode::EditSource;
    }
    UpdateResult::none()
}

pub fn handle_open_delete(state: &mut AppState) -> UpdateResult {
    if let Some(source) = state.sources.selected() {
        state.pending_delete = Some(source.clone());
        state.ui_mode = UiMode::ConfirmDeleteSource;
    }
    UpdateResult::none()
}

/// Save the edit dialog. Validation problems keep the dialog open.
pub fn handle_submit_edit(state: &mut AppState) -> UpdateResult {
    let path = state.project.dbt_project_path.clone();
    let Some(request) = state
        .source_editor
        .as_mut()
        .and_then(|editor| editor.to_request(&path))
    else {
        return UpdateResult::none();
    };

    info!(
        "Updating source {}.{}",
        request.original_source, request.original_table
    );
    state.source_editor = None;
    state.ui_mode = UiMode::Normal;
    state.mutation_in_flight = true;
    UpdateResult::action(UpdateAction::UpdateSource(request))
}

pub fn handle_confirm_delete(state: &mut AppState) -> UpdateResult {
    let Some(source) = state.pending_delete.take() else {
        state.ui_mode = UiMode::Normal;
        return UpdateResult::none();
    };

    info!("Deleting source {}.{}", source.source, source.table);
    state.ui_mode = UiMode::Normal;
    state.mutation_in_flight = true;
    UpdateResult::action(UpdateAction::DeleteSource(DeleteSourceRequest {
        dbt_project_path: state.project.dbt_project_path.clone(),
        source: source.source,
        table: source.table,
    }))
}

// ─────────────────────────────────────────────────────────
// Mutation Results
// ─────────────────────────────────────────────────────────

pub fn handle_source_saved(state: &mut AppState, message: String) -> UpdateResult {
    info!("Source updated: {}", message);
    finish_mutation(state, SOURCE_UPDATED)
}

pub fn handle_source_deleted(state: &mut AppState, message: String) -> UpdateResult {
    info!("Source deleted: {}", message);
    finish_mutation(state, SOURCE_DELETED)
}

fn finish_mutation(state: &mut AppState, toast: &str) -> UpdateResult {
    state.mutation_in_flight = false;
    state.show_success(toast);
    match load_view(state, View::Sources, true) {
        Some(action) => UpdateResult::action(action),
        None => UpdateResult::none(),
    }
}

pub fn handle_source_mutation_failed(state: &mut AppState, error: String) -> UpdateResult {
    warn!("Source mutation failed: {}", error);
    state.mutation_in_flight = false;
    state.show_error(error);
    UpdateResult::none()
}
