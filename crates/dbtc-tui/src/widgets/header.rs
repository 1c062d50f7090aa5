//! Header bar: app title, project name, backend health and the view tabs

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Tabs, Widget},
};

use dbtc_app::{BackendStatus, View};

use crate::theme::{palette, styles};

pub struct MainHeader<'a> {
    project_name: Option<&'a str>,
    backend_status: &'a BackendStatus,
    active_view: View,
    configured: bool,
}

impl<'a> MainHeader<'a> {
    pub fn new(project_name: Option<&'a str>, backend_status: &'a BackendStatus) -> Self {
        Self {
            project_name,
            backend_status,
            active_view: View::Settings,
            configured: false,
        }
    }

    pub fn with_view(mut self, view: View, configured: bool) -> Self {
        self.active_view = view;
        self.configured = configured;
        self
    }

    fn tab_titles(&self) -> Vec<Line<'static>> {
        View::ALL
            .iter()
            .map(|view| {
                let enabled = self.configured || !view.requires_project();
                let style = if enabled {
                    styles::text_secondary()
                } else {
                    styles::text_muted()
                };
                Line::from(vec![
                    Span::styled(format!("{}", view.shortcut()), styles::keybinding()),
                    Span::styled(format!(" {}", view.title()), style),
                ])
            })
            .collect()
    }

    fn render_title_row(&self, area: Rect, buf: &mut Buffer) {
        let (icon, icon_style) = styles::health_indicator(self.backend_status);

        let left = Line::from(vec![
            Span::raw(" "),
            Span::styled(
                "dbt console",
                Style::default()
                    .fg(palette::ACCENT)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" "),
            Span::styled("/", styles::text_muted()),
            Span::raw(" "),
            Span::styled(
                self.project_name.unwrap_or("no project").to_string(),
                styles::text_secondary(),
            ),
        ]);
        buf.set_line(area.x, area.y, &left, area.width);

        let right = Line::from(vec![
            Span::styled("Backend ", styles::text_muted()),
            Span::styled(icon, icon_style),
            Span::raw(" "),
            Span::styled(self.backend_status.label(), styles::text_secondary()),
            Span::raw(" "),
        ]);
        let right_width = right.width() as u16;
        let left_width = left.width() as u16;
        if left_width + right_width + 2 <= area.width {
            buf.set_line(
                area.x + area.width - right_width,
                area.y,
                &right,
                right_width,
            );
        }
    }
}

impl Widget for MainHeader<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = styles::glass_block(false).style(Style::default().bg(palette::CARD_BG));
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 || inner.width == 0 {
            return;
        }

        self.render_title_row(Rect { height: 1, ..inner }, buf);

        if inner.height >= 2 {
            let selected = View::ALL
                .iter()
                .position(|v| *v == self.active_view)
                .unwrap_or(0);
            let tabs = Tabs::new(self.tab_titles())
                .select(selected)
                .highlight_style(styles::focused_selected())
                .divider(Span::styled("│", styles::text_muted()))
                .padding(" ", " ");
            tabs.render(
                Rect {
                    y: inner.y + 1,
                    height: 1,
                    ..inner
                },
                buf,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestTerminal;

    #[test]
    fn test_header_renders_title_and_project() {
        let mut term = TestTerminal::new();
        let status = BackendStatus::Healthy;
        term.render_widget(
            MainHeader::new(Some("jaffle_shop"), &status).with_view(View::Sources, true),
            term.area(),
        );

        assert!(term.buffer_contains("dbt console"));
        assert!(term.buffer_contains("jaffle_shop"));
        assert!(term.buffer_contains("● Connected"));
    }

    #[test]
    fn test_header_shows_unreachable_backend() {
        let mut term = TestTerminal::new();
        let status = BackendStatus::Unreachable("connection refused".into());
        term.render_widget(MainHeader::new(None, &status), term.area());

        assert!(term.buffer_contains("no project"));
        assert!(term.buffer_contains("✗ Unreachable"));
    }

    #[test]
    fn test_header_lists_every_view() {
        let mut term = TestTerminal::new();
        let status = BackendStatus::Unknown;
        term.render_widget(
            MainHeader::new(None, &status).with_view(View::Settings, false),
            term.area(),
        );

        assert!(term.line_contains(2, "1 Sources"));
        assert!(term.line_contains(2, "2 Models"));
        assert!(term.line_contains(2, "3 Settings"));
    }

    #[test]
    fn test_header_survives_tiny_area() {
        let mut term = TestTerminal::with_size(10, 2);
        let status = BackendStatus::Unknown;
        term.render_widget(MainHeader::new(None, &status), term.area());
    }
}
