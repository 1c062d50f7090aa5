//! Models view table

use dbtc_app::grid::Grid;
use dbtc_core::Model;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    widgets::{Cell, Row, Widget},
};

use super::grid_table::{render_grid, GridColumns};
use crate::theme::styles;

const HEADERS: [&str; 4] = ["Model", "Schema", "Table", "Tests"];
const WIDTHS: [Constraint; 4] = [
    Constraint::Fill(4),
    Constraint::Fill(2),
    Constraint::Fill(2),
    Constraint::Length(9),
];

pub struct ModelsTable<'a> {
    grid: &'a Grid<Model>,
}

impl<'a> ModelsTable<'a> {
    pub fn new(grid: &'a Grid<Model>) -> Self {
        Self { grid }
    }
}

impl Widget for ModelsTable<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let rows = self
            .grid
            .page_rows()
            .iter()
            .map(|model| {
                Row::new([
                    Cell::from(model.sql_path.as_str()),
                    Cell::from(model.schema.as_str()),
                    Cell::from(model.table.as_str()),
                    Cell::from(model.test_count_label()).style(styles::accent()),
                ])
            })
            .collect();

        render_grid(
            self.grid,
            "Models",
            GridColumns {
                headers: &HEADERS,
                widths: &WIDTHS,
            },
            rows,
            "No models found",
            area,
            buf,
        );
    }
}
