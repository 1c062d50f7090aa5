//! Sources view table

use dbtc_app::grid::Grid;
use dbtc_core::Source;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    widgets::{Cell, Row, Widget},
};

use super::form_field::truncate;
use super::grid_table::{render_grid, GridColumns};
use crate::theme::styles;

const HEADERS: [&str; 5] = ["Source", "Schema", "Table", "Description", "Tests"];
const WIDTHS: [Constraint; 5] = [
    Constraint::Fill(2),
    Constraint::Fill(2),
    Constraint::Fill(2),
    Constraint::Fill(4),
    Constraint::Length(9),
];
const DESCRIPTION_WIDTH: usize = 40;

pub struct SourcesTable<'a> {
    grid: &'a Grid<Source>,
}

impl<'a> SourcesTable<'a> {
    pub fn new(grid: &'a Grid<Source>) -> Self {
        Self { grid }
    }
}

impl Widget for SourcesTable<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let rows = self
            .grid
            .page_rows()
            .iter()
            .map(|source| {
                let description = match source.description.as_deref() {
                    Some(text) if !text.is_empty() => {
                        Cell::from(truncate(text, DESCRIPTION_WIDTH))
                    }
                    _ => Cell::from("-").style(styles::text_muted()),
                };
                Row::new([
                    Cell::from(source.source.as_str()),
                    Cell::from(source.schema.as_str()),
                    Cell::from(source.table.as_str()),
                    description,
                    Cell::from(source.test_count_label()).style(styles::accent()),
                ])
            })
            .collect();

        render_grid(
            self.grid,
            "Sources",
            GridColumns {
                headers: &HEADERS,
                widths: &WIDTHS,
            },
            rows,
            "No sources found",
            area,
            buf,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{test_source, TestTerminal};

    #[test]
    fn test_sources_table_columns() {
        let mut grid = Grid::new(10);
        grid.set_rows(vec![
            test_source("orders", &["unique", "id: not_null"]),
            test_source("payments", &["unique"]),
        ]);

        let mut term = TestTerminal::new();
        term.render_widget(SourcesTable::new(&grid), term.area());

        assert!(term.buffer_contains("Description"));
        assert!(term.buffer_contains("orders"));
        assert!(term.buffer_contains("Raw orders table"));
        assert!(term.buffer_contains("2 tests"));
        assert!(term.buffer_contains("1 test "));
    }

    #[test]
    fn test_sources_table_empty_state() {
        let mut grid: Grid<Source> = Grid::new(10);
        grid.set_rows(vec![]);

        let mut term = TestTerminal::new();
        term.render_widget(SourcesTable::new(&grid), term.area());
        assert!(term.buffer_contains("No sources found"));
    }

    #[test]
    fn test_long_description_truncated() {
        let mut source = test_source("orders", &[]);
        source.description = Some("x".repeat(80));
        let mut grid = Grid::new(10);
        grid.set_rows(vec![source]);

        let mut term = TestTerminal::with_size(160, 20);
        term.render_widget(SourcesTable::new(&grid), term.area());
        assert!(term.buffer_contains(&format!("{}…", "x".repeat(39))));
        assert!(!term.buffer_contains(&"x".repeat(41)));
    }
}
