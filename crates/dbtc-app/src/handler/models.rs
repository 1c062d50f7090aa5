//! Models table and details dialog

use dbtc_core::prelude::*;
use dbtc_core::Model;

use crate::details::{DetailsState, DetailsTarget};
use crate::state::{AppState, UiMode};

use super::UpdateResult;

pub const MODELS_FAILED: &str = "Failed to fetch models";

pub fn handle_models_loaded(
    state: &mut AppState,
    generation: u64,
    models: Vec<Model>,
) -> UpdateResult {
    if !state.models.is_current(generation) {
        debug!("Dropping stale models response (generation {})", generation);
        return UpdateResult::none();
    }
    debug!("Loaded {} models", models.len());
    state.models.set_rows(models);

    if let Some(DetailsTarget::Model(id)) = state.details.as_ref().map(|d| d.target.clone()) {
        match state.find_model(&id).map(|m| m.tests.len()) {
            Some(test_count) => {
                if let Some(details) = state.details.as_mut() {
                    details.clamp(test_count);
                }
            }
            None => {
                debug!("Model {} disappeared, closing details", id);
                state.details = None;
                if state.ui_mode == UiMode::ModelDetails {
                    state.ui_mode = UiMode::Normal;
                }
            }
        }
    }
    UpdateResult::none()
}

pub fn handle_models_load_failed(
    state: &mut AppState,
    generation: u64,
    error: String,
) -> UpdateResult {
    if !state.models.is_current(generation) {
        debug!("Dropping stale models failure: {}", error);
        return UpdateResult::none();
    }
    error!("Failed to fetch models: {}", error);
    state.models.fail_loading();
    state.show_error(MODELS_FAILED);
    UpdateResult::none()
}

pub fn handle_open_details(state: &mut AppState) -> UpdateResult {
    if let Some(model) = state.models.selected() {
        state.details = Some(DetailsState::model(model.id.clone()));
        state.ui_mode = UiMode::ModelDetails;
    }
    UpdateResult::none()
}
