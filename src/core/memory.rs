//! In-memory document and window.
//!
//! [`MemoryDom`] stores elements in a flat arena and links them by index,
//! the same layout a real DOM exposes through parent/child pointers but
//! without any rendering engine behind it.  Tests and the terminal preview
//! both run the page against it.

use std::collections::BTreeMap;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::dom::{Dom, ElementId, Selector, Window};

// ───────────────────────────────────────── element ───────────

/// A single element in the arena.
#[derive(Debug, Clone, Default)]
pub struct MemoryElement {
    pub tag: String,
    pub attrs: BTreeMap<String, String>,
    /// Class list in insertion order, no duplicates.
    pub classes: Vec<String>,
    /// Own text (children contribute their text after it).
    pub text: String,
    pub styles: BTreeMap<String, String>,
    /// Form-control value.
    pub value: String,
    pub parent: Option<ElementId>,
    pub children: Vec<ElementId>,
    pub offset_top: f64,
    pub height: f64,
}

impl MemoryElement {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            ..Self::default()
        }
    }

    fn matches(&self, selector: &Selector) -> bool {
        match selector {
            Selector::Id(name) => self.attrs.get("id") == Some(name),
            Selector::Class(name) => self.classes.iter().any(|c| c == name),
            Selector::Tag(name) => &self.tag == name,
        }
    }
}

// ───────────────────────────────────────── document ──────────

/// Arena-backed document.  Index 0 is `<html>`, index 1 is `<body>`.
#[derive(Debug, Clone)]
pub struct MemoryDom {
    pub nodes: Vec<MemoryElement>,
}

const ROOT: ElementId = 0;
const BODY: ElementId = 1;

impl Default for MemoryDom {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDom {
    /// An empty `<html><body></body></html>` document.
    pub fn new() -> Self {
        let mut html = MemoryElement::new("html");
        html.children.push(BODY);
        let mut body = MemoryElement::new("body");
        body.parent = Some(ROOT);
        Self {
            nodes: vec![html, body],
        }
    }

    /// Append a new `<tag>` under `parent` and return a builder for it.
    pub fn append(&mut self, parent: ElementId, tag: &str) -> ElementBuilder<'_> {
        let id = self.create_element(tag);
        self.append_child(parent, id);
        ElementBuilder { dom: self, id }
    }

    pub fn get(&self, el: ElementId) -> Option<&MemoryElement> {
        self.nodes.get(el)
    }

    pub fn get_mut(&mut self, el: ElementId) -> Option<&mut MemoryElement> {
        self.nodes.get_mut(el)
    }

    /// Depth-first, document-order walk starting at (and including) `from`.
    fn collect(&self, from: ElementId, out: &mut Vec<ElementId>) {
        out.push(from);
        for &child in &self.nodes[from].children {
            self.collect(child, out);
        }
    }

    fn descendants(&self, scope: ElementId) -> Vec<ElementId> {
        let mut out = Vec::new();
        if scope < self.nodes.len() {
            self.collect(scope, &mut out);
            out.remove(0);
        }
        out
    }

    fn detach(&mut self, el: ElementId) {
        if let Some(parent) = self.nodes[el].parent.take() {
            self.nodes[parent].children.retain(|&c| c != el);
        }
    }
}

impl Dom for MemoryDom {
    fn find_all(&self, selector: &Selector) -> Vec<ElementId> {
        let mut all = Vec::new();
        self.collect(ROOT, &mut all);
        all.retain(|&id| self.nodes[id].matches(selector));
        all
    }

    fn find_within(&self, scope: ElementId, selector: &Selector) -> Vec<ElementId> {
        let mut found = self.descendants(scope);
        found.retain(|&id| self.nodes[id].matches(selector));
        found
    }

    fn root(&self) -> ElementId {
        ROOT
    }

    fn body(&self) -> ElementId {
        BODY
    }

    fn contains(&self, ancestor: ElementId, el: ElementId) -> bool {
        let mut cursor = Some(el);
        while let Some(id) = cursor {
            if id == ancestor {
                return true;
            }
            cursor = self.nodes.get(id).and_then(|n| n.parent);
        }
        false
    }

    fn create_element(&mut self, tag: &str) -> ElementId {
        self.nodes.push(MemoryElement::new(tag));
        self.nodes.len() - 1
    }

    fn append_child(&mut self, parent: ElementId, child: ElementId) {
        if parent >= self.nodes.len() || child >= self.nodes.len() || child == ROOT {
            return;
        }
        // Refuse cycles.
        if self.contains(child, parent) {
            return;
        }
        self.detach(child);
        self.nodes[child].parent = Some(parent);
        self.nodes[parent].children.push(child);
    }

    fn has_class(&self, el: ElementId, class: &str) -> bool {
        self.get(el)
            .is_some_and(|n| n.classes.iter().any(|c| c == class))
    }

    fn add_class(&mut self, el: ElementId, class: &str) {
        if let Some(node) = self.get_mut(el) {
            if !node.classes.iter().any(|c| c == class) {
                node.classes.push(class.to_string());
            }
        }
    }

    fn remove_class(&mut self, el: ElementId, class: &str) {
        if let Some(node) = self.get_mut(el) {
            node.classes.retain(|c| c != class);
        }
    }

    fn text(&self, el: ElementId) -> String {
        let Some(node) = self.get(el) else {
            return String::new();
        };
        let mut out = node.text.clone();
        for &child in &node.children {
            out.push_str(&self.text(child));
        }
        out
    }

    fn set_text(&mut self, el: ElementId, text: &str) {
        if el >= self.nodes.len() {
            return;
        }
        // textContent replaces the whole subtree.
        for child in std::mem::take(&mut self.nodes[el].children) {
            self.nodes[child].parent = None;
        }
        self.nodes[el].text = text.to_string();
    }

    fn attr(&self, el: ElementId, name: &str) -> Option<String> {
        self.get(el).and_then(|n| n.attrs.get(name).cloned())
    }

    fn set_attr(&mut self, el: ElementId, name: &str, value: &str) {
        if let Some(node) = self.get_mut(el) {
            node.attrs.insert(name.to_string(), value.to_string());
        }
    }

    fn style(&self, el: ElementId, property: &str) -> Option<String> {
        self.get(el).and_then(|n| n.styles.get(property).cloned())
    }

    fn set_style(&mut self, el: ElementId, property: &str, value: &str) {
        if let Some(node) = self.get_mut(el) {
            if value.is_empty() {
                node.styles.remove(property);
            } else {
                node.styles.insert(property.to_string(), value.to_string());
            }
        }
    }

    fn value(&self, el: ElementId) -> String {
        self.get(el).map(|n| n.value.clone()).unwrap_or_default()
    }

    fn set_value(&mut self, el: ElementId, value: &str) {
        if let Some(node) = self.get_mut(el) {
            node.value = value.to_string();
        }
    }

    fn offset_top(&self, el: ElementId) -> f64 {
        self.get(el).map_or(0.0, |n| n.offset_top)
    }

    fn height(&self, el: ElementId) -> f64 {
        self.get(el).map_or(0.0, |n| n.height)
    }
}

// ───────────────────────────────────────── builder ───────────

/// Chained setup for a freshly appended element.
pub struct ElementBuilder<'a> {
    dom: &'a mut MemoryDom,
    id: ElementId,
}

impl ElementBuilder<'_> {
    pub fn id(self, id: &str) -> Self {
        self.attr("id", id)
    }

    pub fn class(self, class: &str) -> Self {
        self.dom.add_class(self.id, class);
        self
    }

    pub fn text(self, text: &str) -> Self {
        self.dom.nodes[self.id].text = text.to_string();
        self
    }

    pub fn attr(self, name: &str, value: &str) -> Self {
        self.dom.set_attr(self.id, name, value);
        self
    }

    /// Vertical position and height in CSS pixels.
    pub fn geometry(self, offset_top: f64, height: f64) -> Self {
        let node = &mut self.dom.nodes[self.id];
        node.offset_top = offset_top;
        node.height = height;
        self
    }

    pub fn done(self) -> ElementId {
        self.id
    }
}

// ───────────────────────────────────────── window ────────────

/// Window double that records what the page asked of it.
#[derive(Debug, Clone)]
pub struct MemoryWindow {
    pub width: f64,
    pub height: f64,
    pub scroll_y: f64,
    /// Every URL passed to [`Window::navigate`], oldest first.
    pub navigations: Vec<String>,
    /// Every alert message, oldest first.
    pub alerts: Vec<String>,
    rng: StdRng,
}

impl MemoryWindow {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            scroll_y: 0.0,
            navigations: Vec::new(),
            alerts: Vec::new(),
            rng: StdRng::seed_from_u64(0),
        }
    }

    /// Draw random indices from `rng`.  A fresh window is seeded with a
    /// constant, so hosts that want variety hand in an entropy-seeded one.
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    pub fn with_seed(self, seed: u64) -> Self {
        self.with_rng(StdRng::seed_from_u64(seed))
    }
}

impl Window for MemoryWindow {
    fn inner_width(&self) -> f64 {
        self.width
    }

    fn inner_height(&self) -> f64 {
        self.height
    }

    fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    fn scroll_to(&mut self, top: f64) {
        self.scroll_y = top.max(0.0);
    }

    fn navigate(&mut self, url: &str) {
        self.navigations.push(url.to_string());
    }

    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }

    fn random_index(&mut self, len: usize) -> usize {
        self.rng.random_range(0..len.max(1))
    }
}
