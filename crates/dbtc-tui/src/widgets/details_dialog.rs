//! Details dialog for a source table or a model, with its test list

use dbtc_core::{Model, Source};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{List, ListItem, ListState, Paragraph, StatefulWidget, Widget},
};

use super::footer::hint_line;
use super::modal_overlay::render_modal_frame;
use crate::theme::styles;

const WIDTH: u16 = 72;
const LABEL_WIDTH: usize = 14;

pub struct DetailsDialog<'a> {
    title: String,
    fields: Vec<(&'static str, &'a str)>,
    tests: &'a [String],
    selected_test: usize,
}

impl<'a> DetailsDialog<'a> {
    pub fn source(source: &'a Source, selected_test: usize) -> Self {
        let description = source
            .description
            .as_deref()
            .filter(|d| !d.is_empty())
            .unwrap_or("No description");
        Self {
            title: format!("Source: {}.{}", source.source, source.table),
            fields: vec![
                ("Source", source.source.as_str()),
                ("Schema", source.schema.as_str()),
                ("Table", source.table.as_str()),
                ("Description", description),
            ],
            tests: &source.tests,
            selected_test,
        }
    }

    pub fn model(model: &'a Model, selected_test: usize) -> Self {
        Self {
            title: format!("Model: {}", model.name),
            fields: vec![
                ("File Path", model.sql_path.as_str()),
                ("Model Name", model.name.as_str()),
                ("Schema", model.schema.as_str()),
                ("Table", model.table.as_str()),
            ],
            tests: &model.tests,
            selected_test,
        }
    }

    fn height(&self) -> u16 {
        // border + section titles + fields + tests + spacing + hints
        let tests = self.tests.len().clamp(1, 10) as u16;
        2 + 1 + self.fields.len() as u16 + 1 + 1 + tests + 1 + 1
    }
}

impl Widget for DetailsDialog<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let inner = render_modal_frame(buf, area, WIDTH, self.height(), &self.title);
        if inner.height < 4 {
            return;
        }

        let [info_area, tests_area, hints_area] = Layout::vertical([
            Constraint::Length(self.fields.len() as u16 + 2),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .areas(inner);

        let mut info = vec![Line::from(Span::styled(
            "Basic Information",
            styles::accent_bold(),
        ))];
        info.extend(self.fields.iter().map(|(label, value)| {
            Line::from(vec![
                Span::styled(
                    format!(" {:<width$}", label, width = LABEL_WIDTH),
                    styles::text_muted(),
                ),
                Span::styled(*value, styles::text_primary()),
            ])
        }));
        Paragraph::new(info).render(info_area, buf);

        let [tests_title, tests_list] =
            Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(tests_area);
        Paragraph::new(Line::from(vec![
            Span::styled("Tests", styles::accent_bold()),
            Span::styled(format!(" ({})", self.tests.len()), styles::text_muted()),
        ]))
        .render(tests_title, buf);

        if self.tests.is_empty() {
            Paragraph::new(Span::styled(" No tests configured", styles::text_muted()))
                .render(tests_list, buf);
        } else {
            let items: Vec<ListItem> = self
                .tests
                .iter()
                .map(|t| ListItem::new(t.as_str()))
                .collect();
            let list = List::new(items)
                .highlight_style(styles::focused_selected())
                .highlight_symbol("▶ ");
            let mut state = ListState::default().with_selected(Some(self.selected_test));
            StatefulWidget::render(list, tests_list, buf, &mut state);
        }

        hint_line(
            &[
                ("j/k", "select"),
                ("a", "add test"),
                ("x", "remove test"),
                ("Esc", "close"),
            ],
        )
        .render(hints_area, buf);
    }
}
