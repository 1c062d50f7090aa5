//! Screen layout definitions for the TUI

use ratatui::layout::{Constraint, Layout, Rect};

/// Header: top border + title row + tabs row + bottom border
pub const HEADER_HEIGHT: u16 = 4;
pub const FOOTER_HEIGHT: u16 = 1;

/// Screen areas for the main layout
#[derive(Debug, Clone, Copy)]
pub struct ScreenAreas {
    /// Title, project name, backend status and view tabs
    pub header: Rect,

    /// The active view
    pub content: Rect,

    /// Key hints for the current mode
    pub footer: Rect,
}

/// Split the terminal into header, content and footer
pub fn create(area: Rect) -> ScreenAreas {
    let chunks = Layout::vertical([
        Constraint::Length(HEADER_HEIGHT),
        Constraint::Min(3),
        Constraint::Length(FOOTER_HEIGHT),
    ])
    .split(area);

    ScreenAreas {
        header: chunks[0],
        content: chunks[1],
        footer: chunks[2],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_areas_contiguous() {
        let area = Rect::new(0, 0, 80, 24);
        let layout = create(area);

        assert_eq!(layout.header.height, HEADER_HEIGHT);
        assert_eq!(layout.content.y, HEADER_HEIGHT);
        assert_eq!(layout.footer.y, 23);
        assert_eq!(
            layout.header.height + layout.content.height + layout.footer.height,
            area.height
        );
    }

    #[test]
    fn test_content_keeps_minimum_height() {
        let layout = create(Rect::new(0, 0, 40, 6));
        assert!(layout.content.height >= 1);
    }
}
