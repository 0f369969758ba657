//! Rendering for the terminal preview.
//!
//! Reads the in-memory document the page has been mutating and draws it;
//! nothing in here changes page state.

pub mod hit;
pub mod layout;
pub mod navbar;
pub mod page_view;
pub mod popup;
pub mod smooth_scroll;
pub mod theme;

use ratatui::{widgets::Paragraph, Frame};

use folio::core::dom::Window;

use crate::app::state::AppState;
use layout::AppLayout;
use navbar::NavBar;
use page_view::PageView;
use popup::{ContactPopup, StatTooltipView};
use theme::Palette;

const HINT: &str = "←/→ slides  1-9 labels  t theme  c contact  ↑/↓ scroll  q quit";
const MODAL_HINT: &str = "Enter send demo message  Esc close";

/// Draw one frame and rebuild the hit map.
pub fn draw(frame: &mut Frame, state: &mut AppState) {
    let layout = AppLayout::from_area(frame.area());
    let page = &state.page;
    let dom = page.dom();
    let palette = Palette::new(page.theme());
    let mobile = page.is_mobile();
    let hits = &mut state.hits;
    hits.clear();

    frame.render_stateful_widget(
        PageView::new(dom, palette, state.scroll.visible_row(), mobile),
        layout.page_area,
        hits,
    );
    frame.render_stateful_widget(
        NavBar {
            dom,
            palette,
            mobile,
        },
        layout.nav_area,
        hits,
    );
    frame.render_widget(StatTooltipView { dom, palette }, layout.page_area);

    let modal_open = page.is_modal_open();
    if modal_open {
        frame.render_stateful_widget(ContactPopup { dom, palette }, layout.page_area, hits);
    }

    let hint = if modal_open { MODAL_HINT } else { HINT };
    let mode = if mobile { "mobile" } else { "desktop" };
    let status = format!(
        " {}  ·  {}px {mode}",
        state.status_message.as_deref().unwrap_or(hint),
        page.window().inner_width(),
    );
    frame.render_widget(
        Paragraph::new(status).style(palette.status_bar()),
        layout.status_area,
    );
}
