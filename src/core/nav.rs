//! In-page navigation: smooth anchor jumps, navbar shadow, active menu link.

use super::dom::{Dom, ElementId, Selector, Window};

/// Anchor whose click belongs to the contact modal, not to scrolling.
const CONTACT_TRIGGER_ID: &str = "contact-trigger";
/// Scroll depth (px) past which the navbar gets its shadow.
const NAVBAR_SHADOW_AFTER: f64 = 50.0;
/// A section counts as current once scrolled to within this many px of it.
const SECTION_LEAD: f64 = 100.0;

const SHADOW: &str = "0 4px 6px -1px rgba(0, 0, 0, 0.1)";

#[derive(Debug, Clone)]
struct Anchor {
    el: ElementId,
    /// `href` without the leading `#`.
    fragment: String,
}

#[derive(Debug)]
pub struct Navigation {
    anchors: Vec<Anchor>,
    menu_links: Vec<Anchor>,
    sections: Vec<(ElementId, String)>,
    navbar: Option<ElementId>,
    offset: f64,
}

fn fragment_anchors<D: Dom>(dom: &D, anchors: Vec<ElementId>) -> Vec<Anchor> {
    anchors
        .into_iter()
        .filter_map(|el| {
            let href = dom.attr(el, "href")?;
            let fragment = href.strip_prefix('#')?.to_string();
            Some(Anchor { el, fragment })
        })
        .collect()
}

impl Navigation {
    /// Collect `#fragment` anchors, `section[id]`s and the navbar, then
    /// paint the navbar for the current scroll position.
    pub fn mount<D: Dom, W: Window>(dom: &mut D, window: &W, offset: f64) -> Self {
        let anchors = fragment_anchors(dom, dom.find_all(&Selector::tag("a")));
        let menu_links = match dom.find(&Selector::class("nav-menu")) {
            Some(menu) => fragment_anchors(dom, dom.find_within(menu, &Selector::tag("a"))),
            None => Vec::new(),
        };
        let sections = dom
            .find_all(&Selector::tag("section"))
            .into_iter()
            .filter_map(|el| dom.element_id(el).map(|id| (el, id)))
            .collect();
        let nav = Self {
            anchors,
            menu_links,
            sections,
            navbar: dom.find(&Selector::class("navbar")),
            offset,
        };
        nav.paint_navbar(dom, window.scroll_y());
        nav
    }

    /// Smooth-scroll to the anchor's target.  Returns whether the click was
    /// consumed (the browser's own jump should then be suppressed).
    pub fn on_click<D: Dom, W: Window>(&self, dom: &D, window: &mut W, target: ElementId) -> bool {
        let Some(anchor) = self.anchors.iter().find(|a| dom.contains(a.el, target)) else {
            return false;
        };
        if dom.element_id(anchor.el).as_deref() == Some(CONTACT_TRIGGER_ID) {
            return false;
        }
        if let Some(section) = Selector::parse(&format!("#{}", anchor.fragment))
            .and_then(|sel| dom.find(&sel))
        {
            window.scroll_to(dom.offset_top(section) - self.offset);
        }
        true
    }

    pub fn on_scroll<D: Dom, W: Window>(&self, dom: &mut D, window: &W) {
        let y = window.scroll_y();
        self.paint_navbar(dom, y);

        let current = self
            .sections
            .iter()
            .filter(|(el, _)| y >= dom.offset_top(*el) - SECTION_LEAD)
            .last()
            .map(|(_, id)| id.as_str());
        for link in &self.menu_links {
            dom.set_class(link.el, "active", Some(link.fragment.as_str()) == current);
        }
    }

    fn paint_navbar<D: Dom>(&self, dom: &mut D, scroll_y: f64) {
        let Some(navbar) = self.navbar else {
            return;
        };
        if scroll_y > NAVBAR_SHADOW_AFTER {
            dom.set_style(navbar, "box-shadow", SHADOW);
            dom.set_style(navbar, "border-bottom-color", "var(--border-color)");
        } else {
            dom.set_style(navbar, "box-shadow", "none");
            dom.set_style(navbar, "border-bottom-color", "transparent");
        }
    }
}
