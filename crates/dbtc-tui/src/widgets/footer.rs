//! Key hint bar at the bottom of the screen

use dbtc_app::{AppState, UiMode, View};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::Widget,
};

use crate::theme::styles;

/// `key action · key action` hint line
pub fn hint_line(hints: &[(&str, &str)]) -> Line<'static> {
    let mut spans = vec![Span::raw(" ")];
    for (i, (key, action)) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" · ", styles::text_muted()));
        }
        spans.push(Span::styled(key.to_string(), styles::keybinding()));
        spans.push(Span::styled(format!(" {}", action), styles::text_muted()));
    }
    Line::from(spans)
}

const SOURCES_HINTS: &[(&str, &str)] = &[
    ("↑↓", "select"),
    ("←→", "page"),
    ("Enter", "details"),
    ("e", "edit"),
    ("d", "delete"),
    ("a", "add"),
    ("r", "refresh"),
    ("Tab", "view"),
    ("q", "quit"),
];

const MODELS_HINTS: &[(&str, &str)] = &[
    ("↑↓", "select"),
    ("←→", "page"),
    ("Enter", "details"),
    ("r", "refresh"),
    ("Tab", "view"),
    ("q", "quit"),
];

const SETTINGS_HINTS: &[(&str, &str)] = &[
    ("↑↓", "field"),
    ("Enter", "next/save"),
    ("Ctrl+S", "save"),
    ("Ctrl+U", "clear"),
    ("Tab", "view"),
    ("Esc", "back"),
];

/// Hints for the current view; dialogs carry their own
pub struct Footer<'a> {
    state: &'a AppState,
}

impl<'a> Footer<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }
}

impl Widget for Footer<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if self.state.ui_mode == UiMode::Normal {
            let hints = match self.state.view {
                View::Sources => SOURCES_HINTS,
                View::Models => MODELS_HINTS,
                View::Settings => SETTINGS_HINTS,
            };
            hint_line(hints).render(area, buf);
        }

        if self.state.mutation_in_flight {
            let saving = Line::from(Span::styled(" Saving… ", styles::status_yellow()));
            let width = saving.width() as u16;
            if width <= area.width {
                buf.set_line(area.right() - width, area.y, &saving, width);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{configured_state, unconfigured_state, TestTerminal};

    #[test]
    fn test_hint_line_format() {
        let line = hint_line(&[("a", "add"), ("Esc", "close")]);
        let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text, " a add · Esc close");
    }

    #[test]
    fn test_footer_follows_view() {
        let mut term = TestTerminal::with_size(120, 1);
        term.render_widget(Footer::new(&configured_state()), term.area());
        assert!(term.buffer_contains("e edit"));

        term.render_widget(Footer::new(&unconfigured_state()), term.area());
        assert!(term.buffer_contains("Ctrl+S save"));
    }

    #[test]
    fn test_footer_shows_pending_mutation() {
        let mut state = configured_state();
        state.mutation_in_flight = true;
        let mut term = TestTerminal::with_size(200, 1);
        term.render_widget(Footer::new(&state), term.area());
        assert!(term.buffer_contains("Saving…"));
    }
}
