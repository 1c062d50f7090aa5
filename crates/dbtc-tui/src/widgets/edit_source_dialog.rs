//! Edit-source dialog

use dbtc_app::source_editor::{SourceEditor, EDITOR_LABELS};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::Span,
    widgets::{Paragraph, Widget},
};

use super::footer::hint_line;
use super::form_field::FormField;
use super::modal_overlay::render_modal_frame;
use crate::theme::styles;

const WIDTH: u16 = 70;
const HEIGHT: u16 = 12;

pub struct EditSourceDialog<'a> {
    editor: &'a SourceEditor,
}

impl<'a> EditSourceDialog<'a> {
    pub fn new(editor: &'a SourceEditor) -> Self {
        Self { editor }
    }
}

impl Widget for EditSourceDialog<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = format!(
            "Edit Source: {}.{}",
            self.editor.original.source, self.editor.original.table
        );
        let inner = render_modal_frame(buf, area, WIDTH, HEIGHT, &title);
        if inner.height == 0 {
            return;
        }

        let mut y = inner.y + 1;
        for (index, label) in EDITOR_LABELS.iter().enumerate() {
            let value = self.editor.input(index).map_or("", |i| i.value());
            if y >= inner.bottom() {
                break;
            }
            FormField::new(label, value)
                .focused(self.editor.focus == index)
                .label_width(12)
                .render(Rect::new(inner.x, y, inner.width, 1), buf);
            y += 1;
        }

        if let Some(error) = &self.editor.error {
            let status_y = inner.bottom().saturating_sub(2);
            Paragraph::new(Span::styled(format!(" {}", error), styles::status_red()))
                .render(Rect::new(inner.x, status_y, inner.width, 1), buf);
        }

        hint_line(&[("Tab/↑↓", "field"), ("Enter", "save"), ("Esc", "cancel")]).render(
            Rect::new(inner.x, inner.bottom().saturating_sub(1), inner.width, 1),
            buf,
        );
    }
}
