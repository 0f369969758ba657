//! Screen regions.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// The page viewport above a one-row status bar.  The navbar is drawn over
/// the top of the viewport, the way a fixed navbar overlays the page.
pub struct AppLayout {
    pub page_area: Rect,
    pub nav_area: Rect,
    pub status_area: Rect,
}

/// Rows the fixed navbar covers.
pub const NAV_ROWS: u16 = 3;

impl AppLayout {
    pub fn from_area(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(NAV_ROWS), // page viewport
                Constraint::Length(1),     // status bar
            ])
            .split(area);
        let page_area = chunks[0];

        Self {
            page_area,
            nav_area: Rect {
                height: NAV_ROWS.min(page_area.height),
                ..page_area
            },
            status_area: chunks[1],
        }
    }
}
