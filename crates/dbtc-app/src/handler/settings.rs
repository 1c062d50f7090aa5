//! Settings view: project settings form, persistence and backend sync

use dbtc_core::prelude::*;
use dbtc_core::ProjectSettings;

use crate::config::save_project_settings;
use crate::message::Message;
use crate::project_form::ProjectForm;
use crate::state::{AppState, View};
use crate::text_input::TextEdit;

use super::{UpdateAction, UpdateResult};

pub const SETTINGS_SAVED: &str = "Project settings saved successfully";

pub fn handle_input(state: &mut AppState, edit: TextEdit) -> UpdateResult {
    state.project_form.apply(&edit);
    UpdateResult::none()
}

pub fn handle_focus(state: &mut AppState, forward: bool) -> UpdateResult {
    if forward {
        state.project_form.focus_next();
    } else {
        state.project_form.focus_previous();
    }
    UpdateResult::none()
}

/// Validate, persist locally, then mirror to the backend and open Sources.
pub fn handle_save(state: &mut AppState) -> UpdateResult {
    let Some(settings) = state.project_form.validate() else {
        debug!("Project settings form has errors, not saving");
        return UpdateResult::none();
    };

    if let Err(e) = save_project_settings(&state.config_dir, &settings) {
        error!("Failed to save project settings: {}", e);
        state.show_error(format!("Failed to save project settings: {}", e.user_message()));
        return UpdateResult::none();
    }

    if settings != state.project {
        info!("Project settings changed, reloading lists");
        state.sources.invalidate();
        state.models.invalidate();
        state.close_dialogs();
    }
    state.project = settings.clone();
    state.project_form = ProjectForm::from_settings(&settings);
    state.show_success(SETTINGS_SAVED);

    UpdateResult::action(UpdateAction::PushProjectSettings(settings))
        .with_message(Message::SwitchView(View::Sources))
}

pub fn handle_synced(_state: &mut AppState) -> UpdateResult {
    debug!("Project settings stored on the backend");
    UpdateResult::none()
}

pub fn handle_sync_failed(state: &mut AppState, error: String) -> UpdateResult {
    warn!("Failed to store project settings on the backend: {}", error);
    state.show_error(format!("Failed to sync project settings: {}", error));
    UpdateResult::none()
}

/// Prefill an untouched form from the backend's copy of the settings
pub fn handle_backend_settings_loaded(
    state: &mut AppState,
    settings: Option<ProjectSettings>,
) -> UpdateResult {
    match settings {
        Some(settings) if state.project_form.is_empty() && !state.is_configured() => {
            info!("Prefilling project settings from the backend");
            state.project_form = ProjectForm::from_settings(&settings);
        }
        Some(_) => debug!("Ignoring backend project settings, form already filled in"),
        None => debug!("Backend has no stored project settings"),
    }
    UpdateResult::none()
}
