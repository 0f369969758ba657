//! Capability interfaces the page features are written against.
//!
//! [`Dom`] is the element tree, [`Window`] is everything that belongs to the
//! browsing context (viewport, scrolling, navigation).  Features only ever
//! see these traits, so they run unchanged against the in-memory document
//! used by tests and the terminal preview, or against the real browser.

use std::fmt;

/// Opaque handle to an element.  Only meaningful for the document that
/// produced it.
pub type ElementId = usize;

// ───────────────────────────────────────── selectors ─────────

/// The three selector shapes the page needs.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Selector {
    /// `#name`
    Id(String),
    /// `.name`
    Class(String),
    /// `name`
    Tag(String),
}

impl Selector {
    pub fn id(name: &str) -> Self {
        Self::Id(name.to_string())
    }

    pub fn class(name: &str) -> Self {
        Self::Class(name.to_string())
    }

    pub fn tag(name: &str) -> Self {
        Self::Tag(name.to_ascii_lowercase())
    }

    /// Parse `"#id"`, `".class"` or `"tag"`.  Compound selectors are not
    /// supported and yield `None`.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        if s.is_empty() || s.contains(char::is_whitespace) {
            return None;
        }
        if let Some(rest) = s.strip_prefix('#') {
            (!rest.is_empty()).then(|| Self::id(rest))
        } else if let Some(rest) = s.strip_prefix('.') {
            (!rest.is_empty()).then(|| Self::class(rest))
        } else {
            Some(Self::tag(s))
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Id(n) => write!(f, "#{n}"),
            Self::Class(n) => write!(f, ".{n}"),
            Self::Tag(n) => f.write_str(n),
        }
    }
}

// ───────────────────────────────────────── document ──────────

/// Element-tree capability.
///
/// Lookups return elements in document order.  Mutations on an unknown
/// handle are ignored.
pub trait Dom {
    /// First match in the whole document.
    fn find(&self, selector: &Selector) -> Option<ElementId> {
        self.find_all(selector).into_iter().next()
    }

    /// All matches in the whole document.
    fn find_all(&self, selector: &Selector) -> Vec<ElementId>;

    /// All matches among the descendants of `scope`.
    fn find_within(&self, scope: ElementId, selector: &Selector) -> Vec<ElementId>;

    /// The `<html>` element.
    fn root(&self) -> ElementId;

    /// The `<body>` element.
    fn body(&self) -> ElementId;

    /// Is `el` equal to `ancestor` or one of its descendants?
    fn contains(&self, ancestor: ElementId, el: ElementId) -> bool;

    /// Create a detached `<tag>` element.
    fn create_element(&mut self, tag: &str) -> ElementId;

    fn append_child(&mut self, parent: ElementId, child: ElementId);

    // ── class list ─────────────────────────────────────────────
    fn has_class(&self, el: ElementId, class: &str) -> bool;
    fn add_class(&mut self, el: ElementId, class: &str);
    fn remove_class(&mut self, el: ElementId, class: &str);

    /// Flip `class` and return whether it is now present.
    fn toggle_class(&mut self, el: ElementId, class: &str) -> bool {
        if self.has_class(el, class) {
            self.remove_class(el, class);
            false
        } else {
            self.add_class(el, class);
            true
        }
    }

    /// Add `class` when `on`, remove it otherwise.
    fn set_class(&mut self, el: ElementId, class: &str, on: bool) {
        if on {
            self.add_class(el, class);
        } else {
            self.remove_class(el, class);
        }
    }

    // ── content ────────────────────────────────────────────────
    fn text(&self, el: ElementId) -> String;
    fn set_text(&mut self, el: ElementId, text: &str);

    fn attr(&self, el: ElementId, name: &str) -> Option<String>;
    fn set_attr(&mut self, el: ElementId, name: &str, value: &str);

    /// Inline style property, `None` when unset.
    fn style(&self, el: ElementId, property: &str) -> Option<String>;
    /// Set an inline style property.  An empty value clears it.
    fn set_style(&mut self, el: ElementId, property: &str, value: &str);

    /// Current value of a form control.
    fn value(&self, el: ElementId) -> String;
    fn set_value(&mut self, el: ElementId, value: &str);

    // ── geometry ───────────────────────────────────────────────
    /// Distance from the top of the document in CSS pixels.
    fn offset_top(&self, el: ElementId) -> f64;
    /// Rendered height in CSS pixels.
    fn height(&self, el: ElementId) -> f64;

    /// Shorthand for the `id` attribute.
    fn element_id(&self, el: ElementId) -> Option<String> {
        self.attr(el, "id")
    }
}

// ───────────────────────────────────────── window ────────────

/// Browsing-context capability.
pub trait Window {
    fn inner_width(&self) -> f64;
    fn inner_height(&self) -> f64;
    fn scroll_y(&self) -> f64;

    /// Smoothly scroll the viewport so its top sits at `top`.
    fn scroll_to(&mut self, top: f64);

    /// Navigate the window (`mailto:` links open the mail client).
    fn navigate(&mut self, url: &str);

    /// Blocking notice to the user.
    fn alert(&mut self, message: &str);

    /// Uniform random index in `0..len`.  `len` is never zero.
    fn random_index(&mut self, len: usize) -> usize;
}

/// Viewports at or below this width (CSS px) use the mobile layout.
pub const MOBILE_BREAKPOINT: f64 = 768.0;

/// Does `width` fall in the mobile layout?
pub fn is_mobile_width(width: f64, breakpoint: f64) -> bool {
    width <= breakpoint
}

/// Sum offsets along a chain of positioned ancestors.  `step` returns an
/// element's offset from its positioned parent and that parent, if any, so
/// the total is the distance from the top of the document.
pub fn chained_offset<T>(start: T, mut step: impl FnMut(&T) -> (f64, Option<T>)) -> f64 {
    let mut total = 0.0;
    let mut current = Some(start);
    while let Some(el) = current {
        let (offset, parent) = step(&el);
        total += offset;
        current = parent;
    }
    total
}
