//! The fixed navbar.

use folio::core::dom::{Dom, Selector};
use folio::core::memory::MemoryDom;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    widgets::{Block, Borders, Clear, StatefulWidget, Widget},
};

use super::hit::HitMap;
use super::theme::Palette;

pub struct NavBar<'a> {
    pub dom: &'a MemoryDom,
    pub palette: Palette,
    pub mobile: bool,
}

impl StatefulWidget for NavBar<'_> {
    type State = HitMap;

    fn render(self, area: Rect, buf: &mut Buffer, hits: &mut HitMap) {
        let dom = self.dom;
        let Some(navbar) = dom.find(&Selector::class("navbar")) else {
            return;
        };
        Clear.render(area, buf);

        let raised = dom
            .style(navbar, "box-shadow")
            .is_some_and(|shadow| shadow != "none");
        let block = Block::default()
            .borders(Borders::BOTTOM)
            .border_style(if raised {
                self.palette.raised_border()
            } else {
                self.palette.border()
            })
            .style(self.palette.base());
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.height == 0 {
            return;
        }
        // Claim the bar so clicks on it never fall through to the page.
        hits.push(area, navbar);

        let row = inner.y + inner.height / 2;
        buf.set_string(inner.x + 1, row, "folio", self.palette.heading());
        let mut x = inner.x + 8;

        let links = if self.mobile {
            dom.find(&Selector::id("contact-trigger-mobile"))
                .into_iter()
                .collect()
        } else {
            dom.find(&Selector::class("nav-menu"))
                .map(|menu| dom.find_within(menu, &Selector::tag("a")))
                .unwrap_or_default()
        };
        let right_edge = inner.right().saturating_sub(4);
        for link in links {
            let text = format!(" {} ", dom.text(link));
            let w = text.chars().count() as u16;
            if x + w > right_edge {
                break;
            }
            let style = if dom.has_class(link, "active") {
                self.palette.active()
            } else {
                self.palette.base()
            };
            buf.set_string(x, row, &text, style);
            hits.push(Rect::new(x, row, w, 1), link);
            x += w + 1;
        }

        if let Some(toggle) = dom.find(&Selector::id("theme-toggle")) {
            let dark_icon = dom
                .find(&Selector::id("theme-icon"))
                .and_then(|icon| dom.attr(icon, "src"))
                .is_some_and(|src| src.contains("dark"));
            let x = right_edge + 1;
            if x + 2 <= inner.right() {
                buf.set_string(x, row, if dark_icon { "☾" } else { "☀" }, self.palette.heading());
                hits.push(Rect::new(x, row, 2, 1), toggle);
            }
        }
    }
}
