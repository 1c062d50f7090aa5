//! Delete confirmation dialog

use dbtc_core::Source;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};

use super::modal_overlay::render_modal_frame;
use crate::theme::styles;

const WIDTH: u16 = 60;
const HEIGHT: u16 = 8;

pub struct ConfirmDeleteDialog<'a> {
    source: &'a Source,
}

impl<'a> ConfirmDeleteDialog<'a> {
    pub fn new(source: &'a Source) -> Self {
        Self { source }
    }
}

impl Widget for ConfirmDeleteDialog<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let inner = render_modal_frame(buf, area, WIDTH, HEIGHT, "Delete Source");
        if inner.height < 4 {
            return;
        }

        let message = format!(
            "Delete the source table \"{}\" from \"{}\"?",
            self.source.table, self.source.source
        );
        Paragraph::new(message)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .style(styles::status_yellow())
            .render(Rect::new(inner.x, inner.y + 1, inner.width, 2), buf);

        let buttons = Line::from(vec![
            Span::styled("[", styles::text_muted()),
            Span::styled("y", styles::status_green().add_modifier(Modifier::BOLD)),
            Span::styled("] Yes  ", styles::text_muted()),
            Span::styled("[", styles::text_muted()),
            Span::styled("n", styles::status_red().add_modifier(Modifier::BOLD)),
            Span::styled("] No", styles::text_muted()),
        ]);
        Paragraph::new(buttons)
            .alignment(Alignment::Center)
            .render(Rect::new(inner.x, inner.y + 4, inner.width, 1), buf);
    }
}
