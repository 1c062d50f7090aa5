//! Add-source dialog: name, schema picker, table checklist and descriptions

use dbtc_app::add_source::{AddSourceFocus, AddSourceState};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, StatefulWidget, Widget},
};

use super::footer::hint_line;
use super::form_field::{truncate, FormField};
use super::modal_overlay::render_modal_frame;
use crate::theme::styles;

const WIDTH: u16 = 90;
const HEIGHT: u16 = 28;
const DESCRIPTION_LABEL_WIDTH: u16 = 22;

pub struct AddSourceDialog<'a> {
    dialog: &'a AddSourceState,
}

impl<'a> AddSourceDialog<'a> {
    pub fn new(dialog: &'a AddSourceState) -> Self {
        Self { dialog }
    }

    fn focused(&self, section: AddSourceFocus) -> bool {
        self.dialog.focus == section
    }

    fn section_block(&self, title: &str, section: AddSourceFocus) -> Block<'static> {
        let focused = self.focused(section);
        Block::default()
            .borders(Borders::TOP)
            .border_style(if focused {
                styles::border_active()
            } else {
                styles::border_inactive()
            })
            .title(Span::styled(format!(" {} ", title), styles::label(focused)))
    }

    /// Highlight for the cursor row of a list: strong when the list has focus
    fn cursor_style(&self, section: AddSourceFocus) -> Style {
        if self.focused(section) {
            styles::focused_selected()
        } else {
            styles::selected_row()
        }
    }

    fn render_placeholder(text: &str, area: Rect, buf: &mut Buffer) {
        Paragraph::new(Span::styled(format!(" {}", text), styles::text_muted())).render(area, buf);
    }

    fn render_schemas(&self, area: Rect, buf: &mut Buffer) {
        let block = self.section_block("Schema", AddSourceFocus::Schemas);
        let inner = block.inner(area);
        block.render(area, buf);

        if self.dialog.schemas_loading {
            return Self::render_placeholder("Loading schemas...", inner, buf);
        }
        if self.dialog.schemas.is_empty() {
            return Self::render_placeholder("No schemas found", inner, buf);
        }

        let items: Vec<ListItem> = self
            .dialog
            .schemas
            .iter()
            .map(|schema| {
                let chosen = self.dialog.is_current_schema(schema);
                let marker = if chosen { "● " } else { "  " };
                let style = if chosen {
                    styles::accent()
                } else {
                    styles::text_secondary()
                };
                ListItem::new(Line::from(vec![
                    Span::styled(marker, styles::accent()),
                    Span::styled(schema.as_str(), style),
                ]))
            })
            .collect();
        let list = List::new(items).highlight_style(self.cursor_style(AddSourceFocus::Schemas));
        let mut state = ListState::default().with_selected(Some(self.dialog.schema_cursor));
        StatefulWidget::render(list, inner, buf, &mut state);
    }

    fn render_tables(&self, area: Rect, buf: &mut Buffer) {
        let block = self.section_block("Tables", AddSourceFocus::Tables);
        let inner = block.inner(area);
        block.render(area, buf);

        if self.dialog.selected_schema.is_none() {
            return Self::render_placeholder("Choose a schema first", inner, buf);
        }
        if self.dialog.tables_loading {
            return Self::render_placeholder("Loading tables...", inner, buf);
        }
        if self.dialog.tables.is_empty() {
            return Self::render_placeholder("No tables found", inner, buf);
        }

        let items: Vec<ListItem> = self
            .dialog
            .tables
            .iter()
            .map(|table| {
                let checked = self.dialog.is_table_selected(&table.name);
                let checkbox = if checked { "[x] " } else { "[ ] " };
                ListItem::new(Line::from(vec![
                    Span::styled(checkbox, styles::accent()),
                    Span::styled(table.name.as_str(), styles::text_primary()),
                ]))
            })
            .collect();
        let list = List::new(items).highlight_style(self.cursor_style(AddSourceFocus::Tables));
        let mut state = ListState::default().with_selected(Some(self.dialog.table_cursor));
        StatefulWidget::render(list, inner, buf, &mut state);
    }

    fn render_descriptions(&self, area: Rect, buf: &mut Buffer) {
        let block = self.section_block("Descriptions", AddSourceFocus::Descriptions);
        let inner = block.inner(area);
        block.render(area, buf);

        if self.dialog.selected_tables.is_empty() {
            return Self::render_placeholder("Tick tables to describe them", inner, buf);
        }

        // Keep the cursor row on screen
        let visible = inner.height as usize;
        let skip = (self.dialog.description_cursor + 1).saturating_sub(visible);
        let focused = self.focused(AddSourceFocus::Descriptions);
        for (row, (index, table)) in self
            .dialog
            .selected_tables
            .iter()
            .enumerate()
            .skip(skip)
            .take(visible)
            .enumerate()
        {
            let label = truncate(&table.name, DESCRIPTION_LABEL_WIDTH as usize);
            FormField::new(&label, table.description.value())
                .focused(focused && index == self.dialog.description_cursor)
                .label_width(DESCRIPTION_LABEL_WIDTH)
                .placeholder("Description (optional)")
                .render(
                    Rect::new(inner.x, inner.y + row as u16, inner.width, 1),
                    buf,
                );
        }
    }

    fn render_status(&self, area: Rect, buf: &mut Buffer) {
        let line = if !self.dialog.errors.is_empty() {
            Line::from(Span::styled(
                format!(" {}", self.dialog.errors.join(" · ")),
                styles::status_red(),
            ))
        } else if self.dialog.saving {
            Line::from(Span::styled(" Creating sources...", styles::status_yellow()))
        } else {
            let count = self.dialog.selected_tables.len();
            Line::from(Span::styled(
                format!(" {} table(s) selected", count),
                styles::text_muted(),
            ))
        };
        Paragraph::new(line).render(area, buf);
    }
}

impl Widget for AddSourceDialog<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let inner = render_modal_frame(buf, area, WIDTH, HEIGHT, "Add Source");
        if inner.height < 8 {
            return;
        }

        let [name_area, lists_area, descriptions_area, status_area, hints_area] =
            Layout::vertical([
                Constraint::Length(2),
                Constraint::Fill(3),
                Constraint::Fill(2),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .areas(inner);

        FormField::new("Source Name", self.dialog.source_name.value())
            .focused(self.focused(AddSourceFocus::Name))
            .label_width(12)
            .placeholder("e.g. raw_data")
            .render(Rect { height: 1, ..name_area }, buf);

        let [schemas_area, tables_area] =
            Layout::horizontal([Constraint::Percentage(40), Constraint::Percentage(60)])
                .spacing(1)
                .areas(lists_area);
        self.render_schemas(schemas_area, buf);
        self.render_tables(tables_area, buf);
        self.render_descriptions(descriptions_area, buf);
        self.render_status(status_area, buf);

        hint_line(&[
            ("Tab", "section"),
            ("↑↓", "move"),
            ("Space/Enter", "choose"),
            ("Ctrl+S", "create"),
            ("Esc", "cancel"),
        ])
        .render(hints_area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestTerminal;
    use dbtc_app::text_input::TextEdit;
    use dbtc_core::TableInfo;

    fn table(name: &str) -> TableInfo {
        TableInfo {
            name: name.into(),
            description: Some(format!("{} from the app db", name)),
            identifier: None,
        }
    }

    fn draw(dialog: &AddSourceState) -> TestTerminal {
        let mut term = TestTerminal::new();
        term.render_widget(AddSourceDialog::new(dialog), term.area());
        term
    }

    #[test]
    fn test_loading_schemas() {
        let dialog = AddSourceState::open(1);
        let term = draw(&dialog);
        assert!(term.buffer_contains("Add Source"));
        assert!(term.buffer_contains("Loading schemas..."));
        assert!(term.buffer_contains("Choose a schema first"));
    }

    #[test]
    fn test_tables_loading_after_schema_choice() {
        let mut dialog = AddSourceState::open(1);
        dialog.set_schemas(vec!["public".into(), "staging".into()]);
        dialog.choose_schema();

        let term = draw(&dialog);
        assert!(term.buffer_contains("● public"));
        assert!(term.buffer_contains("Loading tables..."));
    }

    #[test]
    fn test_checked_tables_get_description_rows() {
        let mut dialog = AddSourceState::open(1);
        dialog.set_schemas(vec!["public".into()]);
        dialog.choose_schema();
        dialog.set_tables(vec![table("orders"), table("payments")]);
        dialog.focus = AddSourceFocus::Tables;
        dialog.toggle_table();

        let term = draw(&dialog);
        assert!(term.buffer_contains("[x] orders"));
        assert!(term.buffer_contains("[ ] payments"));
        assert!(term.buffer_contains("orders from the app db"));
        assert!(term.buffer_contains("1 table(s) selected"));
    }

    #[test]
    fn test_validation_errors_listed() {
        let mut dialog = AddSourceState::open(1);
        dialog.set_schemas(vec![]);
        dialog.apply(&TextEdit::Insert(' '));
        assert!(dialog.to_request("/work").is_none());

        let term = draw(&dialog);
        assert!(term.buffer_contains("Source name is required"));
        assert!(term.buffer_contains("No schemas found"));
    }
}
