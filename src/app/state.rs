//! Preview state.
//!
//! Everything the event loop mutates lives here: the page itself, the
//! terminal-side view state (scroll animation, hit regions, pointer) and the
//! status line.

use folio::core::dom::{ElementId, Window};
use folio::core::memory::{MemoryDom, MemoryWindow};
use folio::prefs::{FileStore, MemoryStore, PreferenceStore};
use folio::{Page, PageEvent};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::ui::hit::HitMap;
use crate::ui::page_view::ROW_PX;
use crate::ui::smooth_scroll::SmoothScroll;

// ───────────────────────────────────────── preferences ───────

/// Where the theme goes.  `--theme` pins it for one session without
/// touching the file.
pub enum SessionPrefs {
    File(FileStore),
    Session(MemoryStore),
}

impl PreferenceStore for SessionPrefs {
    fn get(&self, key: &str) -> folio::Result<Option<String>> {
        match self {
            SessionPrefs::File(store) => store.get(key),
            SessionPrefs::Session(store) => store.get(key),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> folio::Result<()> {
        match self {
            SessionPrefs::File(store) => store.set(key, value),
            SessionPrefs::Session(store) => store.set(key, value),
        }
    }
}

pub type PreviewPage = Page<MemoryDom, MemoryWindow, SessionPrefs>;

/// The preview's viewport.  Random picks (the contact modal's fun fact)
/// are seeded from the thread RNG, so every launch draws its own.
pub fn preview_window(width: f64, height: f64) -> MemoryWindow {
    MemoryWindow::new(width, height).with_rng(StdRng::from_rng(&mut rand::rng()))
}

// ───────────────────────────────────────── state ─────────────

/// A left-button press waiting for its release.
#[derive(Debug, Clone, Copy)]
pub struct Drag {
    pub column: u16,
    pub target: Option<ElementId>,
}

pub struct AppState {
    pub page: PreviewPage,
    /// `--width`: the viewport ignores terminal resizes.
    pub fixed_width: Option<f64>,
    pub should_quit: bool,
    pub status_message: Option<String>,
    pub scroll: SmoothScroll,
    /// Clickable regions from the last frame, topmost last.
    pub hits: HitMap,
    pub drag: Option<Drag>,
    /// Stat tile under the pointer.
    pub hovered: Option<ElementId>,
    /// Alerts already copied to the status line.
    seen_alerts: usize,
}

impl AppState {
    pub fn new(page: PreviewPage, fixed_width: Option<f64>) -> Self {
        Self {
            page,
            fixed_width,
            should_quit: false,
            status_message: None,
            scroll: SmoothScroll::new(0.35),
            hits: HitMap::default(),
            drag: None,
            hovered: None,
            seen_alerts: 0,
        }
    }

    /// Forward `event` to the page.  Programmatic scrolls (anchor jumps)
    /// are followed by the scroll event a browser would fire, and new
    /// alerts land in the status line.
    pub fn dispatch(&mut self, event: PageEvent) -> folio::Outcome {
        let before = self.page.window().scroll_y();
        let outcome = self.page.handle(event);
        if self.page.window().scroll_y() != before {
            self.page.handle(PageEvent::Scroll);
        }
        self.sync_scroll();

        let alerts = &self.page.window().alerts;
        if alerts.len() > self.seen_alerts {
            self.seen_alerts = alerts.len();
            self.status_message = alerts.last().cloned();
        }
        outcome
    }

    /// Feed the page's scroll position to the row animator.
    pub fn sync_scroll(&mut self) {
        let row = (self.page.window().scroll_y() / ROW_PX).round() as i64;
        self.scroll.set_target(row);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preview_windows_do_not_share_a_sequence() {
        let draws = |mut win: MemoryWindow| (0..32).map(|_| win.random_index(1000)).collect::<Vec<_>>();
        let first = draws(preview_window(1024.0, 800.0));
        let second = draws(preview_window(1024.0, 800.0));
        assert_ne!(first, second);
        assert!(first.iter().all(|&i| i < 1000));
    }
}
