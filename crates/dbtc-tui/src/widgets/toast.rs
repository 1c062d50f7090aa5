//! Toast notification in the bottom-right corner

use dbtc_app::toast::{Toast, ToastLevel};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use crate::theme::{palette, styles};

const MAX_WIDTH: u16 = 60;
const MAX_TEXT_LINES: u16 = 4;

pub struct ToastView<'a> {
    toast: &'a Toast,
}

impl<'a> ToastView<'a> {
    pub fn new(toast: &'a Toast) -> Self {
        Self { toast }
    }

    fn level_style(&self) -> (&'static str, Style) {
        match self.toast.level {
            ToastLevel::Success => ("✓", styles::status_green()),
            ToastLevel::Error => ("✗", styles::status_red()),
        }
    }

    /// Placement inside `area`: right-aligned, one row above the bottom edge
    pub fn rect(&self, area: Rect) -> Rect {
        let text_width = u16::try_from(self.toast.message.width())
            .unwrap_or(u16::MAX)
            .saturating_add(2);
        let width = text_width.saturating_add(4).min(MAX_WIDTH).min(area.width);
        let inner_width = width.saturating_sub(4).max(1);
        let lines = text_width.div_ceil(inner_width).clamp(1, MAX_TEXT_LINES);
        let height = (lines + 2).min(area.height);
        Rect {
            x: area.x + area.width.saturating_sub(width + 1),
            y: area.y + area.height.saturating_sub(height + 1),
            width,
            height,
        }
    }
}

impl Widget for ToastView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let rect = self.rect(area);
        if rect.width < 5 || rect.height < 3 {
            return;
        }
        let (icon, style) = self.level_style();

        Clear.render(rect, buf);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(style)
            .style(Style::default().bg(palette::POPUP_BG));
        let inner = block.inner(rect);
        block.render(rect, buf);

        Paragraph::new(Line::from(vec![
            Span::styled(format!("{} ", icon), style),
            Span::styled(self.toast.message.as_str(), styles::text_primary()),
        ]))
        .wrap(Wrap { trim: true })
        .render(
            Rect {
                x: inner.x + 1,
                width: inner.width.saturating_sub(2),
                ..inner
            },
            buf,
        );
    }
}
