//! Main render/view function (View in TEA pattern)


use dbtc_app::state::{AppState, UiMode, View};
use ratatui::style::Style;
use ratatui::widgets::Block;
use ratatui::Frame;

use super::{layout, widgets};
use crate::theme::palette;

/// Render the complete UI (View function in TEA)
///
/// Pure with respect to `state`: the active view fills the content area,
/// then the dialog for the current [`UiMode`] and finally the toast.
pub fn view(frame: &mut Frame, state: &AppState) {
    let area = frame.area();

    let bg_block = Block::default().style(Style::default().bg(palette::DEEPEST_BG));
    frame.render_widget(bg_block, area);

    let areas = layout::create(area);

    let project_name = state.project.project_name();
    let header = widgets::MainHeader::new(project_name.as_deref(), &state.backend_status)
        .with_view(state.view, state.is_configured());
    frame.render_widget(header, areas.header);

    match state.view {
        View::Sources => {
            frame.render_widget(widgets::SourcesTable::new(&state.sources), areas.content)
        }
        View::Models => {
            frame.render_widget(widgets::ModelsTable::new(&state.models), areas.content)
        }
        View::Settings => {
            frame.render_widget(widgets::SettingsForm::new(state), areas.content)
        }
    }

    frame.render_widget(widgets::Footer::new(state), areas.footer);

    match state.ui_mode {
        UiMode::Normal => {}
        UiMode::SourceDetails | UiMode::ModelDetails => render_details(frame, state),
        UiMode::EditSource => {
            if let Some(editor) = &state.source_editor {
                frame.render_widget(widgets::EditSourceDialog::new(editor), area);
            }
        }
        UiMode::ConfirmDeleteSource => {
            if let Some(source) = &state.pending_delete {
                frame.render_widget(widgets::ConfirmDeleteDialog::new(source), area);
            }
        }
        UiMode::AddSource => {
            if let Some(dialog) = &state.add_source {
                frame.render_widget(widgets::AddSourceDialog::new(dialog), area);
            }
        }
        UiMode::TestConfig => {
            // Opened from the details dialog, which stays visible beneath
            render_details(frame, state);
            if let Some(dialog) = &state.test_config {
                frame.render_widget(widgets::TestConfigDialog::new(dialog), area);
            }
        }
    }

    if let Some(toast) = &state.toast {
        frame.render_widget(widgets::ToastView::new(toast), area);
    }
}

fn render_details(frame: &mut Frame, state: &AppState) {
    let Some(details) = &state.details else {
        return;
    };
    let area = frame.area();
    if let Some(source) = state.details_source() {
        frame.render_widget(
            widgets::DetailsDialog::source(source, details.selected_test),
            area,
        );
    } else if let Some(model) = state.details_model() {
        frame.render_widget(
            widgets::DetailsDialog::model(model, details.selected_test),
            area,
        );
    }
}
