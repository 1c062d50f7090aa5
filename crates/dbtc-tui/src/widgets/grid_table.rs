//! Paginated table frame shared by the Sources and Models views

use dbtc_app::grid::Grid;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Row, StatefulWidget, Table, TableState, Widget},
};

use crate::theme::{palette, styles};

/// Column layout and labels of one table view
pub struct GridColumns<'a> {
    pub headers: &'a [&'a str],
    pub widths: &'a [Constraint],
}

/// Render the current page of `grid` inside a titled block, or a loading or
/// empty placeholder
pub fn render_grid<T>(
    grid: &Grid<T>,
    title: &str,
    columns: GridColumns<'_>,
    rows: Vec<Row<'_>>,
    empty_text: &str,
    area: Rect,
    buf: &mut Buffer,
) {
    let block = styles::glass_block(true)
        .title(Line::from(vec![
            Span::raw(" "),
            Span::styled(title.to_string(), styles::accent_bold()),
            Span::styled(format!(" ({}) ", grid.len()), styles::text_muted()),
        ]))
        .title_bottom(page_footer(grid))
        .style(Style::default().bg(palette::CARD_BG));
    let inner = block.inner(area);
    block.render(area, buf);

    if inner.height == 0 || inner.width == 0 {
        return;
    }

    if grid.is_empty() {
        let text = if grid.loading || !grid.loaded {
            "Loading..."
        } else {
            empty_text
        };
        let y = inner.y + inner.height / 2;
        Paragraph::new(text)
            .alignment(Alignment::Center)
            .style(styles::text_muted())
            .render(Rect::new(inner.x, y, inner.width, 1), buf);
        return;
    }

    let header = Row::new(columns.headers.iter().copied())
        .style(styles::accent_bold())
        .bottom_margin(1);
    let table = Table::new(rows, columns.widths.iter().copied())
        .header(header)
        .column_spacing(2)
        .row_highlight_style(styles::selected_row())
        .highlight_symbol("▶ ");

    let mut state = TableState::default().with_selected(Some(grid.selected_in_page()));
    StatefulWidget::render(table, inner, buf, &mut state);
}

fn page_footer<T>(grid: &Grid<T>) -> Line<'static> {
    let mut spans = vec![Span::styled(
        format!(" Page {} of {} ", grid.page() + 1, grid.page_count()),
        styles::text_secondary(),
    )];
    if grid.loading {
        spans.push(Span::styled("· refreshing… ", styles::status_yellow()));
    } else if let Some(at) = grid.loaded_at {
        spans.push(Span::styled(
            format!("· updated {} ", at.format("%H:%M:%S")),
            styles::text_muted(),
        ));
    }
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestTerminal;

    const HEADERS: [&str; 1] = ["Name"];
    const WIDTHS: [Constraint; 1] = [Constraint::Fill(1)];

    fn draw(grid: &Grid<String>) -> TestTerminal {
        let mut term = TestTerminal::with_size(60, 12);
        let area = term.area();
        term.draw_with(|frame| {
            let rows = grid
                .page_rows()
                .iter()
                .map(|r| Row::new([r.clone()]))
                .collect();
            render_grid(
                grid,
                "Things",
                GridColumns {
                    headers: &HEADERS,
                    widths: &WIDTHS,
                },
                rows,
                "Nothing here",
                area,
                frame.buffer_mut(),
            );
        });
        term
    }

    #[test]
    fn test_loading_placeholder_before_first_fetch() {
        let grid: Grid<String> = Grid::new(5);
        assert!(draw(&grid).buffer_contains("Loading..."));
    }

    #[test]
    fn test_empty_placeholder_after_fetch() {
        let mut grid: Grid<String> = Grid::new(5);
        grid.set_rows(vec![]);
        let term = draw(&grid);
        assert!(term.buffer_contains("Nothing here"));
        assert!(term.buffer_contains("Page 1 of 1"));
    }

    #[test]
    fn test_renders_current_page_only() {
        let mut grid = Grid::new(2);
        grid.set_rows(vec!["alpha".into(), "beta".into(), "gamma".into()]);
        grid.next_page();

        let term = draw(&grid);
        assert!(term.buffer_contains("gamma"));
        assert!(!term.buffer_contains("alpha"));
        assert!(term.buffer_contains("Page 2 of 2"));
        assert!(term.buffer_contains("Things (3)"));
    }
}
