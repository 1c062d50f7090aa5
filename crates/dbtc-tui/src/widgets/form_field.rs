//! Labelled single-line text input shared by the forms and dialogs

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::theme::styles;

const CURSOR: &str = "▏";

/// Cut `text` to `max_width` display columns, ending in `…` when cut
pub fn truncate(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > max_width - 1 {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

/// Keep the end of `text` so the cursor stays visible in `max_width` columns
pub fn tail_fit(text: &str, max_width: usize) -> &str {
    let mut used = 0;
    for (idx, c) in text.char_indices().rev() {
        used += c.width().unwrap_or(0);
        if used > max_width {
            return &text[idx + c.len_utf8()..];
        }
    }
    text
}

/// `label  [value▏]` with an optional error line underneath
pub struct FormField<'a> {
    label: &'a str,
    value: &'a str,
    focused: bool,
    error: Option<&'a str>,
    label_width: u16,
    placeholder: Option<&'a str>,
}

impl<'a> FormField<'a> {
    pub fn new(label: &'a str, value: &'a str) -> Self {
        Self {
            label,
            value,
            focused: false,
            error: None,
            label_width: 20,
            placeholder: None,
        }
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    pub fn error(mut self, error: Option<&'a str>) -> Self {
        self.error = error;
        self
    }

    pub fn label_width(mut self, width: u16) -> Self {
        self.label_width = width;
        self
    }

    pub fn placeholder(mut self, placeholder: &'a str) -> Self {
        self.placeholder = Some(placeholder);
        self
    }

    /// Rows needed: the input plus one for an error
    pub fn height(&self) -> u16 {
        if self.error.is_some() {
            2
        } else {
            1
        }
    }
}

impl Widget for FormField<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }

        let marker = if self.focused { "▶ " } else { "  " };
        let label = format!(
            "{}{:<width$}",
            marker,
            self.label,
            width = self.label_width as usize
        );
        let label_width = label.width() as u16;
        let input_width = area.width.saturating_sub(label_width + 1) as usize;

        let mut spans = vec![
            Span::styled(label, styles::label(self.focused)),
            Span::raw(" "),
        ];

        let cursor_width = usize::from(self.focused);
        let value = tail_fit(self.value, input_width.saturating_sub(cursor_width));
        if value.is_empty() && !self.focused {
            let hint = self.placeholder.unwrap_or("");
            spans.push(Span::styled(
                format!("{:<width$}", truncate(hint, input_width), width = input_width),
                styles::input(false).patch(styles::text_muted()),
            ));
        } else {
            let mut shown = value.to_string();
            if self.focused {
                shown.push_str(CURSOR);
            }
            let pad = input_width.saturating_sub(shown.width());
            shown.push_str(&" ".repeat(pad));
            spans.push(Span::styled(shown, styles::input(self.focused)));
        }

        Paragraph::new(Line::from(spans)).render(
            Rect {
                height: 1,
                ..area
            },
            buf,
        );

        if let Some(error) = self.error {
            if area.height >= 2 {
                let indent = " ".repeat(label_width as usize + 1);
                Paragraph::new(Line::from(vec![
                    Span::raw(indent),
                    Span::styled(error, styles::status_red()),
                ]))
                .render(
                    Rect {
                        y: area.y + 1,
                        height: 1,
                        ..area
                    },
                    buf,
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestTerminal;

    #[test]
    fn test_truncate_adds_ellipsis() {
        assert_eq!(truncate("orders", 10), "orders");
        assert_eq!(truncate("customer_orders", 8), "custome…");
        assert_eq!(truncate("abc", 0), "");
    }

    #[test]
    fn test_truncate_counts_wide_chars() {
        assert_eq!(truncate("日本語テキスト", 5), "日本…");
    }

    #[test]
    fn test_tail_fit_keeps_end() {
        assert_eq!(tail_fit("/home/me/project", 7), "project");
        assert_eq!(tail_fit("short", 10), "short");
    }

    #[test]
    fn test_renders_label_value_and_error() {
        let mut term = TestTerminal::with_size(60, 3);
        let field = FormField::new("Target Name", "dev")
            .focused(true)
            .error(Some("Target Name is required"));
        assert_eq!(field.height(), 2);

        term.render_widget(field, term.area());
        assert!(term.line_contains(0, "▶ Target Name"));
        assert!(term.line_contains(0, "dev▏"));
        assert!(term.line_contains(1, "Target Name is required"));
    }

    #[test]
    fn test_placeholder_when_empty_and_unfocused() {
        let mut term = TestTerminal::with_size(60, 1);
        term.render_widget(
            FormField::new("Source", "").placeholder("e.g. raw"),
            term.area(),
        );
        assert!(term.buffer_contains("e.g. raw"));
    }
}
