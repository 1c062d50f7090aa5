//! Add-test dialog
//!
//! The first two rows pick the test type and column. Below them the config
//! form generated from the type's descriptors is laid out one row per field,
//! with `dict` groups shown as indented headers.

use dbtc_app::test_config::{ConfigRow, FieldValue, TestConfigState};
use dbtc_core::TestTarget;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use super::footer::hint_line;
use super::form_field::{tail_fit, truncate, FormField};
use super::modal_overlay::render_modal_frame;
use crate::theme::styles;

const WIDTH: u16 = 90;
const HEIGHT: u16 = 26;
const LABEL_WIDTH: u16 = 22;

const TYPE_ROW: usize = 0;
const COLUMN_ROW: usize = 1;
const FORM_OFFSET: usize = 2;

pub struct TestConfigDialog<'a> {
    dialog: &'a TestConfigState,
}

impl<'a> TestConfigDialog<'a> {
    pub fn new(dialog: &'a TestConfigState) -> Self {
        Self { dialog }
    }

    fn title(&self) -> String {
        let kind = match self.dialog.target {
            TestTarget::Model => "Model",
            TestTarget::Source => "Source",
        };
        format!("Add Test to {}: {}", kind, self.dialog.subject.title)
    }

    fn type_value(&self) -> (String, bool) {
        if self.dialog.test_types_loading {
            return ("Loading test types...".into(), false);
        }
        if self.dialog.test_types.is_empty() {
            return ("No test types available".into(), false);
        }
        match self.dialog.selected_test_type() {
            Some(test_type) => (test_type.display_label(), true),
            None => ("Select a test type".into(), false),
        }
    }

    fn column_value(&self) -> (String, bool) {
        if self.dialog.columns_loading {
            return ("Loading columns...".into(), false);
        }
        match self
            .dialog
            .selected_column
            .and_then(|i| self.dialog.columns.get(i))
        {
            Some(column) => (column.display_label(), true),
            None => ("None (Table-level test)".into(), false),
        }
    }

    fn relation_value(&self, selected: Option<usize>) -> (String, bool) {
        if self.dialog.relations_loading {
            return ("Loading models and sources...".into(), false);
        }
        let entry = selected.and_then(|i| {
            self.dialog
                .relations
                .as_ref()
                .and_then(|catalog| catalog.entries().nth(i))
        });
        match entry {
            Some(entry) => (entry.display_label(), true),
            None => ("Select a model or source".into(), false),
        }
    }

    /// A `◀ value ▶` selector row
    fn render_choice(
        label: &str,
        depth: usize,
        (value, chosen): (String, bool),
        focused: bool,
        area: Rect,
        buf: &mut Buffer,
    ) {
        let label_span = row_label(label, depth, focused);
        let value_width = area.width.saturating_sub(LABEL_WIDTH + 7) as usize;
        let value_style = if chosen {
            styles::input(focused)
        } else {
            styles::input(focused).patch(styles::text_muted())
        };
        let arrow_style = if focused {
            styles::accent()
        } else {
            styles::text_muted()
        };
        Paragraph::new(Line::from(vec![
            label_span,
            Span::raw(" "),
            Span::styled("◀ ", arrow_style),
            Span::styled(truncate(&value, value_width), value_style),
            Span::styled(" ▶", arrow_style),
        ]))
        .render(area, buf);
    }

    fn render_list(
        row: &ConfigRow,
        items: &[String],
        input: &str,
        focused: bool,
        area: Rect,
        buf: &mut Buffer,
    ) {
        let mut spans = vec![row_label(&row.name, row.depth, focused), Span::raw(" ")];
        for item in items {
            spans.push(Span::styled(format!("[{}]", item), styles::accent()));
            spans.push(Span::raw(" "));
        }

        let used: usize = spans.iter().map(Span::width).sum();
        let remaining = (area.width as usize).saturating_sub(used + 1);
        if focused {
            let typed = tail_fit(input, remaining.saturating_sub(1));
            spans.push(Span::styled(format!("{}▏", typed), styles::input(true)));
        } else if items.is_empty() {
            spans.push(Span::styled(
                truncate("Type a value, Enter to add", remaining),
                styles::text_muted(),
            ));
        }
        Paragraph::new(Line::from(spans)).render(area, buf);
    }

    fn render_form_row(&self, index: usize, row: &ConfigRow, area: Rect, buf: &mut Buffer) {
        let focused = self.dialog.focus == index + FORM_OFFSET;
        let indent = row.depth as u16 * 2;
        match &row.value {
            FieldValue::Group => {
                Paragraph::new(Line::from(vec![
                    Span::raw(" ".repeat(indent as usize + 2)),
                    Span::styled(format!("{}:", row.name), styles::accent_bold()),
                ]))
                .render(area, buf);
            }
            FieldValue::Text(input) | FieldValue::Number(input) => {
                let placeholder = if matches!(row.value, FieldValue::Number(_)) {
                    "number"
                } else {
                    "text"
                };
                let field_area = Rect {
                    x: area.x + indent,
                    width: area.width.saturating_sub(indent),
                    ..area
                };
                FormField::new(&row.name, input.value())
                    .focused(focused)
                    .label_width(LABEL_WIDTH.saturating_sub(indent))
                    .placeholder(placeholder)
                    .render(field_area, buf);
            }
            FieldValue::Boolean(value) => {
                let shown = match value {
                    None => ("unset".to_string(), false),
                    Some(true) => ("True".to_string(), true),
                    Some(false) => ("False".to_string(), true),
                };
                Self::render_choice(&row.name, row.depth, shown, focused, area, buf);
            }
            FieldValue::Relation(selected) => {
                let shown = self.relation_value(*selected);
                Self::render_choice(&row.name, row.depth, shown, focused, area, buf);
            }
            FieldValue::List { items, input } => {
                Self::render_list(row, items, input.value(), focused, area, buf);
            }
        }
    }

    fn render_form(&self, area: Rect, buf: &mut Buffer) {
        if self.dialog.selected_test_type().is_none() {
            return;
        }
        let rows = self.dialog.form.rows();
        if rows.is_empty() {
            Paragraph::new(Span::styled(
                "  This test takes no configuration",
                styles::text_muted(),
            ))
            .render(area, buf);
            return;
        }

        // Scroll so the focused row stays visible
        let visible = area.height as usize;
        let focused = self.dialog.focused_form_row().unwrap_or(0);
        let skip = (focused + 1).saturating_sub(visible);
        for (line, (index, row)) in rows.iter().enumerate().skip(skip).take(visible).enumerate() {
            let row_area = Rect::new(area.x, area.y + line as u16, area.width, 1);
            self.render_form_row(index, row, row_area, buf);
        }
    }

    /// Description of the focused config field, or the status of the dialog
    fn status_line(&self) -> Line<'static> {
        if let Some(error) = &self.dialog.error {
            return Line::from(Span::styled(format!(" {}", error), styles::status_red()));
        }
        let description = self
            .dialog
            .focused_form_row()
            .and_then(|i| self.dialog.form.row(i))
            .map(|row| row.description.clone())
            .filter(|d| !d.is_empty());
        match description {
            Some(description) => Line::from(Span::styled(
                format!(" {}", description),
                styles::text_secondary(),
            )),
            None => Line::default(),
        }
    }
}

fn row_label(label: &str, depth: usize, focused: bool) -> Span<'static> {
    let marker = if focused { "▶ " } else { "  " };
    let indent = " ".repeat(depth * 2);
    let width = (LABEL_WIDTH as usize).saturating_sub(depth * 2);
    Span::styled(
        format!("{}{}{:<width$}", indent, marker, label, width = width),
        styles::label(focused),
    )
}

impl Widget for TestConfigDialog<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title = self.title();
        let inner = render_modal_frame(buf, area, WIDTH, HEIGHT, &title);
        if inner.height < 7 {
            return;
        }

        let [type_area, column_area, _, form_area, status_area, hints_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(inner);

        Self::render_choice(
            "Test Type",
            0,
            self.type_value(),
            self.dialog.focus == TYPE_ROW,
            type_area,
            buf,
        );
        Self::render_choice(
            "Column (Optional)",
            0,
            self.column_value(),
            self.dialog.focus == COLUMN_ROW,
            column_area,
            buf,
        );
        self.render_form(form_area, buf);
        Paragraph::new(self.status_line()).render(status_area, buf);

        let mut hints = vec![("Tab", "next"), ("←→", "choose")];
        if self.dialog.focused_is_list() {
            hints.push(("Enter", "add item"));
        }
        hints.extend([("Ctrl+S", "save"), ("Esc", "cancel")]);
        hint_line(&hints).render(hints_area, buf);
    }
}
