//! View switching, startup, health and table paging

use dbtc_api::ConnectionRequest;
use dbtc_core::prelude::*;

use crate::grid::Grid;
use crate::message::Message;
use crate::state::{AppState, BackendStatus, UiMode, View};

use super::{UpdateAction, UpdateResult};

pub const CONFIGURE_FIRST: &str = "Configure project settings first";

/// Row/page movement in the active table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum GridMove {
    Next,
    Previous,
    NextPage,
    PreviousPage,
    First,
    Last,
}

/// Check the backend and open the first view.
///
/// An unconfigured console asks the backend for stored project settings
/// so the form can be prefilled.
pub fn handle_startup(state: &mut AppState) -> UpdateResult {
    info!("Starting with view {:?}", state.view);
    let follow_up = if state.is_configured() {
        Message::SwitchView(state.view)
    } else {
        Message::LoadBackendSettings
    };
    UpdateResult::action(UpdateAction::CheckHealth).with_message(follow_up)
}

pub fn handle_switch_view(state: &mut AppState, view: View) -> UpdateResult {
    if view.requires_project() && !state.is_configured() {
        state.show_error(CONFIGURE_FIRST);
        return UpdateResult::none();
    }

    state.view = view;
    state.ui_mode = UiMode::Normal;

    match load_view(state, view, false) {
        Some(action) => UpdateResult::action(action),
        None => UpdateResult::none(),
    }
}

/// Tab order skips views that are disabled
pub fn handle_cycle_view(state: &mut AppState, forward: bool) -> UpdateResult {
    let mut candidate = state.view;
    for _ in 0..View::ALL.len() {
        candidate = if forward {
            candidate.next()
        } else {
            candidate.previous()
        };
        if candidate == state.view {
            break;
        }
        if !candidate.requires_project() || state.is_configured() {
            return handle_switch_view(state, candidate);
        }
    }
    UpdateResult::none()
}

/// `r`: re-check health and reload the active table
pub fn handle_refresh(state: &mut AppState) -> UpdateResult {
    match load_view(state, state.view, true) {
        Some(reload) => UpdateResult::action(reload).with_message(Message::CheckHealth),
        None => UpdateResult::action(UpdateAction::CheckHealth),
    }
}

pub fn handle_backend_healthy(state: &mut AppState, status: String) -> UpdateResult {
    debug!("Backend health: {}", status);
    state.backend_status = BackendStatus::Healthy;
    UpdateResult::none()
}

pub fn handle_backend_unreachable(state: &mut AppState, error: String) -> UpdateResult {
    warn!("Backend health check failed: {}", error);
    state.backend_status = BackendStatus::Unreachable(error);
    UpdateResult::none()
}

/// Start loading the table behind `view` if it has not been loaded for the
/// current project settings (or unconditionally when `force` is set).
pub(crate) fn load_view(state: &mut AppState, view: View, force: bool) -> Option<UpdateAction> {
    if !state.is_configured() {
        return None;
    }
    match view {
        View::Sources => {
            if !needs_load(&state.sources, force) {
                return None;
            }
            Some(UpdateAction::LoadSources {
                generation: state.sources.start_loading(),
                dbt_project_path: state.project.dbt_project_path.clone(),
            })
        }
        View::Models => {
            if !needs_load(&state.models, force) {
                return None;
            }
            Some(UpdateAction::LoadModels {
                generation: state.models.start_loading(),
                connection: ConnectionRequest::from(&state.project),
            })
        }
        View::Settings => None,
    }
}

fn needs_load<T>(grid: &Grid<T>, force: bool) -> bool {
    force || !(grid.loading || grid.loaded)
}

pub(crate) fn handle_grid_move(state: &mut AppState, movement: GridMove) -> UpdateResult {
    match state.view {
        View::Sources => apply_move(&mut state.sources, movement),
        View::Models => apply_move(&mut state.models, movement),
        View::Settings => {}
    }
    UpdateResult::none()
}

fn apply_move<T>(grid: &mut Grid<T>, movement: GridMove) {
    match movement {
        GridMove::Next => grid.select_next(),
        GridMove::Previous => grid.select_previous(),
        GridMove::NextPage => grid.next_page(),
        GridMove::PreviousPage => grid.previous_page(),
        GridMove::First => grid.select_first(),
        GridMove::Last => grid.select_last(),
    }
}
