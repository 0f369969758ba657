//! Scroll-triggered fade-in for portfolio items and stat tiles.
//!
//! Elements start transparent and shifted down; once at least 10 % of an
//! element is inside the viewport (minus a 50 px strip at the bottom) it
//! fades in and is never looked at again.

use super::dom::{Dom, ElementId, Selector, Window};

const THRESHOLD: f64 = 0.1;
const BOTTOM_MARGIN: f64 = 50.0;

/// Fraction of an element's height inside the shrunk viewport.
///
/// Zero-height elements count as fully visible when their top lies inside.
pub fn visible_fraction(top: f64, height: f64, scroll_y: f64, viewport_height: f64) -> f64 {
    let view_top = scroll_y;
    let view_bottom = scroll_y + (viewport_height - BOTTOM_MARGIN).max(0.0);
    if height <= 0.0 {
        return if (view_top..=view_bottom).contains(&top) { 1.0 } else { 0.0 };
    }
    let overlap = (top + height).min(view_bottom) - top.max(view_top);
    (overlap.max(0.0) / height).min(1.0)
}

#[derive(Debug, Default)]
pub struct Reveal {
    pending: Vec<ElementId>,
}

impl Reveal {
    /// Hide every `.portfolio-item` and `.stat-item` and reveal whatever is
    /// already on screen.
    pub fn mount<D: Dom, W: Window>(dom: &mut D, window: &W) -> Self {
        let mut pending = dom.find_all(&Selector::class("portfolio-item"));
        pending.extend(dom.find_all(&Selector::class("stat-item")));
        for &el in &pending {
            dom.set_style(el, "opacity", "0");
            dom.set_style(el, "transform", "translateY(20px)");
            dom.set_style(el, "transition", "opacity 0.6s ease, transform 0.6s ease");
        }
        let mut reveal = Self { pending };
        reveal.check(dom, window);
        reveal
    }

    /// Elements still waiting to be revealed.
    pub fn pending(&self) -> &[ElementId] {
        &self.pending
    }

    /// Reveal everything that has scrolled into view.
    pub fn check<D: Dom, W: Window>(&mut self, dom: &mut D, window: &W) {
        let (y, h) = (window.scroll_y(), window.inner_height());
        self.pending.retain(|&el| {
            let seen = visible_fraction(dom.offset_top(el), dom.height(el), y, h) >= THRESHOLD;
            if seen {
                dom.set_style(el, "opacity", "1");
                dom.set_style(el, "transform", "translateY(0)");
            }
            !seen
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::memory::{MemoryDom, MemoryWindow};

    #[test]
    fn fraction_accounts_for_bottom_margin() {
        // Viewport 0..750 after the margin; element 700..800 is half in.
        assert_eq!(visible_fraction(700.0, 100.0, 0.0, 800.0), 0.5);
        assert_eq!(visible_fraction(760.0, 100.0, 0.0, 800.0), 0.0);
        assert_eq!(visible_fraction(100.0, 100.0, 0.0, 800.0), 1.0);
        assert_eq!(visible_fraction(0.0, 0.0, 10.0, 800.0), 0.0);
    }

    #[test]
    fn reveals_once_in_view() {
        let mut dom = MemoryDom::new();
        let body = dom.body();
        let near = dom.append(body, "div").class("stat-item").geometry(100.0, 200.0).done();
        let far = dom
            .append(body, "div")
            .class("portfolio-item")
            .geometry(2000.0, 400.0)
            .done();
        let mut win = MemoryWindow::new(1280.0, 800.0);
        let mut reveal = Reveal::mount(&mut dom, &win);

        assert_eq!(dom.style(near, "opacity").as_deref(), Some("1"));
        assert_eq!(dom.style(far, "opacity").as_deref(), Some("0"));
        assert_eq!(reveal.pending(), &[far]);

        win.scroll_y = 1300.0;
        reveal.check(&mut dom, &win);
        assert_eq!(dom.style(far, "transform").as_deref(), Some("translateY(0)"));
        assert!(reveal.pending().is_empty());
    }
}
