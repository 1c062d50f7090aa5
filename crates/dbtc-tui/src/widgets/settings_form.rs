//! Settings view: the project settings form

use dbtc_app::config::PROJECT_FILENAME;
use dbtc_app::project_form::{FIELD_HINTS, FIELD_LABELS};
use dbtc_app::state::BackendStatus;
use dbtc_app::AppState;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use super::form_field::{truncate, FormField};
use crate::theme::styles;

const LABEL_WIDTH: u16 = 20;
/// Input, hint and error line plus a blank separator
const FIELD_HEIGHT: u16 = 4;

pub struct SettingsForm<'a> {
    state: &'a AppState,
}

impl<'a> SettingsForm<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    fn status_line(&self) -> Line<'static> {
        let form = &self.state.project_form;
        if !self.state.is_configured() {
            Line::from(Span::styled(
                " Fill in all fields to unlock Sources and Models",
                styles::status_yellow(),
            ))
        } else if form.is_dirty(&self.state.project) {
            Line::from(Span::styled(
                " Unsaved changes (Ctrl+S to save)",
                styles::status_yellow(),
            ))
        } else {
            Line::from(Span::styled(" Saved", styles::status_green()))
        }
    }

    fn backend_line(&self) -> Line<'static> {
        let (icon, style) = styles::health_indicator(&self.state.backend_status);
        let mut spans = vec![
            Span::styled(
                format!(" {:<width$}", "Backend", width = LABEL_WIDTH as usize + 2),
                styles::text_secondary(),
            ),
            Span::styled(self.state.settings.backend.url.clone(), styles::text_primary()),
            Span::raw(" "),
            Span::styled(icon, style),
        ];
        if let BackendStatus::Unreachable(reason) = &self.state.backend_status {
            spans.push(Span::styled(
                format!(" {}", truncate(reason, 40)),
                styles::status_red(),
            ));
        }
        Line::from(spans)
    }
}

impl Widget for SettingsForm<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = styles::glass_block(true)
            .title(Span::styled(" Project Settings ", styles::accent_bold()));
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.height < 2 || inner.width < 10 {
            return;
        }

        let form = &self.state.project_form;
        let mut y = inner.y + 1;
        let bottom = inner.y + inner.height;

        for (index, label) in FIELD_LABELS.iter().enumerate() {
            if y >= bottom {
                break;
            }
            let value = form.input(index).map(|i| i.value()).unwrap_or_default();
            let error = form.error(index);
            let field_area = Rect::new(
                inner.x + 1,
                y,
                inner.width.saturating_sub(2),
                2.min(bottom - y),
            );
            FormField::new(label, value)
                .focused(form.focus == index)
                .error(error)
                .label_width(LABEL_WIDTH)
                .render(field_area, buf);

            // The hint sits where the error would; an error takes precedence
            if error.is_none() && y + 1 < bottom {
                let indent = " ".repeat(LABEL_WIDTH as usize + 4);
                Paragraph::new(Line::from(vec![
                    Span::raw(indent),
                    Span::styled(FIELD_HINTS[index], styles::text_muted()),
                ]))
                .render(Rect::new(inner.x + 1, y + 1, field_area.width, 1), buf);
            }
            y += FIELD_HEIGHT;
        }

        let footer_rows = [
            self.status_line(),
            self.backend_line(),
            Line::from(Span::styled(
                format!(
                    " Saved to {}",
                    self.state.config_dir.join(PROJECT_FILENAME).display()
                ),
                styles::text_muted(),
            )),
        ];
        for line in footer_rows {
            if y >= bottom {
                break;
            }
            Paragraph::new(line).render(Rect::new(inner.x, y, inner.width, 1), buf);
            y += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{configured_state, unconfigured_state, TestTerminal};
    use dbtc_app::text_input::TextEdit;

    fn draw(state: &AppState) -> TestTerminal {
        let mut term = TestTerminal::new();
        term.render_widget(SettingsForm::new(state), term.area());
        term
    }

    #[test]
    fn test_unconfigured_form() {
        let term = draw(&unconfigured_state());
        assert!(term.buffer_contains("Project Settings"));
        assert!(term.buffer_contains("DBT Project Path"));
        assert!(term.buffer_contains("Directory containing dbt_project.yml"));
        assert!(term.buffer_contains("Fill in all fields to unlock"));
        assert!(term.buffer_contains("project.toml"));
    }

    #[test]
    fn test_configured_form_shows_values() {
        let state = configured_state();
        let term = draw(&state);
        assert!(term.buffer_contains("/work/jaffle_shop"));
        assert!(term.buffer_contains("Saved"));
        assert!(term.buffer_contains("http://localhost:10000"));
    }

    #[test]
    fn test_dirty_form() {
        let mut state = configured_state();
        state.project_form.focus = 2;
        state.project_form.apply(&TextEdit::Insert('x'));
        assert!(draw(&state).buffer_contains("Unsaved changes"));
    }

    #[test]
    fn test_validation_error_replaces_hint() {
        let mut state = unconfigured_state();
        assert!(state.project_form.validate().is_none());
        let term = draw(&state);
        assert!(term.buffer_contains("DBT Project Path is required"));
        assert!(!term.buffer_contains("Directory containing dbt_project.yml"));
    }

    #[test]
    fn test_unreachable_backend_reason() {
        let mut state = configured_state();
        state.backend_status = BackendStatus::Unreachable("connection refused".into());
        let term = draw(&state);
        assert!(term.buffer_contains("✗"));
        assert!(term.buffer_contains("connection refused"));
    }
}
