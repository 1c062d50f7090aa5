//! Test utilities for TUI rendering verification
//!
//! Widgets and full frames render into ratatui's `TestBackend`, and tests
//! assert on the resulting buffer text.
//!
//! ```ignore
//! let mut term = TestTerminal::new();
//! term.draw_with(|frame| view(frame, &state));
//! assert!(term.buffer_contains("Sources"));
//! ```

use std::path::PathBuf;

use dbtc_app::config::Settings;
use dbtc_app::AppState;
use dbtc_core::{Model, ProjectSettings, Source};
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::widgets::Widget;
use ratatui::{Frame, Terminal};

/// Standard test terminal size
pub const TEST_WIDTH: u16 = 100;
pub const TEST_HEIGHT: u16 = 30;

/// Wrapper around a `TestBackend` terminal with buffer assertions
pub struct TestTerminal {
    pub terminal: Terminal<TestBackend>,
}

impl TestTerminal {
    pub fn new() -> Self {
        Self::with_size(TEST_WIDTH, TEST_HEIGHT)
    }

    pub fn with_size(width: u16, height: u16) -> Self {
        let backend = TestBackend::new(width, height);
        let terminal = Terminal::new(backend).expect("Failed to create test terminal");
        Self { terminal }
    }

    pub fn area(&self) -> Rect {
        let size = self.terminal.size().expect("Failed to get terminal size");
        Rect::new(0, 0, size.width, size.height)
    }

    pub fn render_widget<W: Widget>(&mut self, widget: W, area: Rect) {
        self.terminal
            .draw(|frame| frame.render_widget(widget, area))
            .expect("Failed to render widget");
    }

    /// Draw a full frame, e.g. with `render::view`
    pub fn draw_with<F>(&mut self, f: F)
    where
        F: FnOnce(&mut Frame),
    {
        self.terminal.draw(f).expect("Failed to draw frame");
    }

    pub fn buffer(&self) -> &Buffer {
        self.terminal.backend().buffer()
    }

    pub fn buffer_contains(&self, text: &str) -> bool {
        buffer_to_string(self.buffer()).contains(text)
    }

    pub fn line_contains(&self, line: u16, text: &str) -> bool {
        get_line_content(self.buffer(), line).contains(text)
    }

    /// All content as a string, one line per row
    pub fn content(&self) -> String {
        buffer_to_string(self.buffer())
    }
}

impl Default for TestTerminal {
    fn default() -> Self {
        Self::new()
    }
}

fn buffer_to_string(buffer: &Buffer) -> String {
    let mut result = String::new();
    for y in 0..buffer.area.height {
        result.push_str(&get_line_content(buffer, y));
        result.push('\n');
    }
    result
}

fn get_line_content(buffer: &Buffer, line: u16) -> String {
    let mut result = String::new();
    if line < buffer.area.height {
        for x in 0..buffer.area.width {
            result.push_str(buffer[(x, line)].symbol());
        }
    }
    result
}

// ─────────────────────────────────────────────────────────
// Fixtures
// ─────────────────────────────────────────────────────────

pub fn test_project() -> ProjectSettings {
    ProjectSettings::new("/work/jaffle_shop", "/home/me/.dbt/profiles.yml", "dev")
}

/// State that opens on the Settings view
pub fn unconfigured_state() -> AppState {
    AppState::new(
        PathBuf::from("/nonexistent/dbtc"),
        Settings::default(),
        ProjectSettings::default(),
    )
}

/// State with project settings, opened on Sources
pub fn configured_state() -> AppState {
    AppState::new(
        PathBuf::from("/nonexistent/dbtc"),
        Settings::default(),
        test_project(),
    )
}

pub fn test_source(table: &str, tests: &[&str]) -> Source {
    Source {
        source: "raw".into(),
        schema: "public".into(),
        table: table.into(),
        tests: tests.iter().map(|t| t.to_string()).collect(),
        description: Some(format!("Raw {} table", table)),
    }
}

pub fn test_model(name: &str, tests: &[&str]) -> Model {
    Model {
        id: format!("model.jaffle_shop.{}", name),
        name: name.into(),
        schema: "analytics".into(),
        table: name.into(),
        tests: tests.iter().map(|t| t.to_string()).collect(),
        sql_path: format!("models/{}.sql", name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::widgets::Paragraph;

    #[test]
    fn test_terminal_creation() {
        let term = TestTerminal::new();
        assert_eq!(term.area().width, TEST_WIDTH);
        assert_eq!(term.area().height, TEST_HEIGHT);
    }

    #[test]
    fn test_buffer_and_line_contains() {
        let mut term = TestTerminal::with_size(20, 5);
        term.render_widget(Paragraph::new("Hello\nWorld"), term.area());

        assert!(term.buffer_contains("World"));
        assert!(term.line_contains(0, "Hello"));
        assert!(!term.line_contains(0, "World"));
        assert_eq!(term.content().lines().count(), 5);
    }

    #[test]
    fn test_fixture_states() {
        assert!(configured_state().is_configured());
        assert!(!unconfigured_state().is_configured());
    }
}
