//! Stat tile notes: a cursor-following tooltip on desktop, tap-to-expand
//! on mobile.

use std::collections::HashMap;
use std::time::Duration;

use super::dom::{Dom, ElementId, Selector};
use super::page::Task;
use super::scheduler::{Scheduler, TimerId};

const VISIBLE: &str = "visible";
const ACTIVE: &str = "active";
/// Gap between the cursor and the tooltip's top-left corner (px).
const CURSOR_OFFSET: f64 = 15.0;

#[derive(Debug)]
pub struct StatTooltips {
    /// Every `.stat-item`, noted or not.
    items: Vec<ElementId>,
    /// Note text for the items that carry a `.stat-note`.
    notes: HashMap<ElementId, String>,
    tooltip: ElementId,
    auto_close: HashMap<ElementId, TimerId>,
    note_timeout: Duration,
}

impl StatTooltips {
    /// Create the shared tooltip element and read every tile's note.
    pub fn mount<D: Dom>(dom: &mut D, note_timeout: Duration) -> Option<Self> {
        let items = dom.find_all(&Selector::class("stat-item"));
        if items.is_empty() {
            return None;
        }
        let tooltip = dom.create_element("div");
        dom.add_class(tooltip, "stat-tooltip");
        let body = dom.body();
        dom.append_child(body, tooltip);

        let notes = items
            .iter()
            .filter_map(|&item| {
                let note = *dom.find_within(item, &Selector::class("stat-note")).first()?;
                Some((item, dom.text(note)))
            })
            .collect();
        Some(Self {
            items,
            notes,
            tooltip,
            auto_close: HashMap::new(),
            note_timeout,
        })
    }

    pub fn tooltip(&self) -> ElementId {
        self.tooltip
    }

    /// The tile (noted or not) that contains `target`.
    fn item_at<D: Dom>(&self, dom: &D, target: ElementId) -> Option<ElementId> {
        self.items.iter().copied().find(|&item| dom.contains(item, target))
    }

    fn noted_item_at<D: Dom>(&self, dom: &D, target: ElementId) -> Option<ElementId> {
        self.item_at(dom, target).filter(|item| self.notes.contains_key(item))
    }

    // ── desktop ────────────────────────────────────────────────

    pub fn on_mouse_enter<D: Dom>(&self, dom: &mut D, mobile: bool, target: ElementId) {
        if mobile {
            return;
        }
        if let Some(note) = self.noted_item_at(dom, target).and_then(|i| self.notes.get(&i)) {
            dom.set_text(self.tooltip, note);
            dom.add_class(self.tooltip, VISIBLE);
        }
    }

    pub fn on_mouse_move<D: Dom>(&self, dom: &mut D, mobile: bool, target: ElementId, x: f64, y: f64) {
        if mobile || self.noted_item_at(dom, target).is_none() {
            return;
        }
        dom.set_style(self.tooltip, "left", &format!("{}px", x + CURSOR_OFFSET));
        dom.set_style(self.tooltip, "top", &format!("{}px", y + CURSOR_OFFSET));
    }

    pub fn on_mouse_leave<D: Dom>(&self, dom: &mut D, mobile: bool, target: ElementId) {
        if !mobile && self.noted_item_at(dom, target).is_some() {
            dom.remove_class(self.tooltip, VISIBLE);
        }
    }

    // ── mobile ─────────────────────────────────────────────────

    /// Tap handling.  A tap on a noted tile toggles it (closing the rest);
    /// a tap outside every tile closes them all.  Desktop clicks are
    /// ignored.
    pub fn on_click<D, S>(&mut self, dom: &mut D, timers: &mut S, mobile: bool, target: ElementId)
    where
        D: Dom,
        S: Scheduler<Task>,
    {
        if !mobile {
            return;
        }
        if let Some(item) = self.noted_item_at(dom, target) {
            self.cancel_auto_close(timers, item);
            let was_active = dom.has_class(item, ACTIVE);
            for other in self.items.clone() {
                if other != item {
                    dom.remove_class(other, ACTIVE);
                    self.cancel_auto_close(timers, other);
                }
            }
            if was_active {
                dom.remove_class(item, ACTIVE);
            } else {
                dom.add_class(item, ACTIVE);
                let id = timers.schedule(self.note_timeout, Task::CloseStatNote(item));
                self.auto_close.insert(item, id);
            }
        } else if self.item_at(dom, target).is_none() {
            for item in self.items.clone() {
                dom.remove_class(item, ACTIVE);
                self.cancel_auto_close(timers, item);
            }
        }
    }

    /// The auto-close timer for `item` fired.
    pub fn close_note<D: Dom>(&mut self, dom: &mut D, item: ElementId) {
        dom.remove_class(item, ACTIVE);
        self.auto_close.remove(&item);
    }

    /// Layout settled after a resize.
    pub fn on_resize<D: Dom>(&self, dom: &mut D, mobile: bool) {
        if mobile {
            dom.remove_class(self.tooltip, VISIBLE);
        } else {
            for &item in &self.items {
                dom.remove_class(item, ACTIVE);
            }
        }
    }

    fn cancel_auto_close<S: Scheduler<Task>>(&mut self, timers: &mut S, item: ElementId) {
        if let Some(id) = self.auto_close.remove(&item) {
            timers.cancel(id);
        }
    }
}
