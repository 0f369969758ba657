//! Portfolio carousel.
//!
//! On desktop a single slide is visible at a time, mirrored by one active
//! indicator dot and one active label.  [`SlideSet`] holds the index
//! arithmetic and the transition guard; [`CarouselController`] binds it to
//! the slide/indicator/label elements.  Below the mobile breakpoint the
//! controller does not exist and [`MobileLabels`] handles label taps.

use tracing::debug;

use super::dom::{Dom, ElementId, Selector};

/// Classes left over from the animated variant of the carousel.  Cleared on
/// every settle so a stale one never hides the active slide.
const LEGACY_SLIDE_CLASSES: &[&str] = &[
    "slide-out-left",
    "slide-out-right",
    "slide-in-from-left",
    "slide-in-from-right",
];

const ACTIVE: &str = "active";

// ───────────────────────────────────────── slide set ─────────

/// Index bookkeeping for a fixed, non-empty set of slides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlideSet {
    count: usize,
    current: usize,
    transitioning: bool,
}

impl SlideSet {
    /// `None` for an empty set.
    pub fn new(count: usize) -> Option<Self> {
        (count > 0).then_some(Self {
            count,
            current: 0,
            transitioning: false,
        })
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn is_transitioning(&self) -> bool {
        self.transitioning
    }

    /// Map any integer onto `0..count`, wrapping in both directions.
    pub fn wrap(&self, index: i64) -> usize {
        index.rem_euclid(self.count as i64) as usize
    }

    /// Take the transition guard.  `false` if it is already held.
    pub fn begin_transition(&mut self) -> bool {
        if self.transitioning {
            return false;
        }
        self.transitioning = true;
        true
    }

    pub fn end_transition(&mut self) {
        self.transitioning = false;
    }

    /// Move to `index` (wrapped) while holding the guard, running `settle`
    /// with the new index before the guard is released.  Returns `false`
    /// without doing anything if a transition is already in progress.
    pub fn go_to(&mut self, index: i64, settle: impl FnOnce(usize)) -> bool {
        if !self.begin_transition() {
            return false;
        }
        self.current = self.wrap(index);
        settle(self.current);
        self.end_transition();
        true
    }
}

// ───────────────────────────────────────── controller ────────

/// Desktop carousel bound to its elements.
#[derive(Debug)]
pub struct CarouselController {
    grid: ElementId,
    slides: Vec<ElementId>,
    indicators: Vec<ElementId>,
    labels: Vec<ElementId>,
    set: SlideSet,
    swipe_threshold: f64,
    touch_start_x: Option<f64>,
}

impl CarouselController {
    /// Bind to `.portfolio-grid` and its `.portfolio-item` children and
    /// show the first slide.  `None` if the grid or its slides are missing.
    pub fn mount<D: Dom>(dom: &mut D, swipe_threshold: f64) -> Option<Self> {
        let grid = dom.find(&Selector::class("portfolio-grid"))?;
        let slides = dom.find_within(grid, &Selector::class("portfolio-item"));
        let set = SlideSet::new(slides.len())?;
        let mut controller = Self {
            grid,
            indicators: dom.find_all(&Selector::class("portfolio-indicator")),
            labels: dom.find_all(&Selector::class("portfolio-label")),
            slides,
            set,
            swipe_threshold,
            touch_start_x: None,
        };
        controller.settle(dom, controller.set.current());
        debug!(slides = controller.slides.len(), "carousel mounted");
        Some(controller)
    }

    pub fn grid(&self) -> ElementId {
        self.grid
    }

    pub fn current(&self) -> usize {
        self.set.current()
    }

    pub fn slide_count(&self) -> usize {
        self.set.count()
    }

    pub fn slide_set_mut(&mut self) -> &mut SlideSet {
        &mut self.set
    }

    /// Show the slide at `index` (any integer, wrapped).
    pub fn go_to<D: Dom>(&mut self, dom: &mut D, index: i64) -> bool {
        let Self {
            set,
            slides,
            indicators,
            labels,
            ..
        } = self;
        set.go_to(index, |current| {
            apply_active(dom, slides, indicators, labels, current)
        })
    }

    pub fn next<D: Dom>(&mut self, dom: &mut D) -> bool {
        self.go_to(dom, self.set.current() as i64 + 1)
    }

    pub fn prev<D: Dom>(&mut self, dom: &mut D) -> bool {
        self.go_to(dom, self.set.current() as i64 - 1)
    }

    /// Indicator or label click.  Returns whether `target` belonged to the
    /// carousel.
    pub fn on_click<D: Dom>(&mut self, dom: &mut D, target: ElementId) -> bool {
        let hit = position_containing(dom, &self.indicators, target)
            .or_else(|| position_containing(dom, &self.labels, target));
        match hit {
            Some(index) => {
                self.go_to(dom, index as i64);
                true
            }
            None => false,
        }
    }

    pub fn on_touch_start<D: Dom>(&mut self, dom: &D, target: ElementId, x: f64) {
        if dom.contains(self.grid, target) {
            self.touch_start_x = Some(x);
        }
    }

    /// Finish a swipe.  A leftward swipe (start right of end) goes forward.
    pub fn on_touch_end<D: Dom>(&mut self, dom: &mut D, target: ElementId, x: f64) -> bool {
        if !dom.contains(self.grid, target) {
            return false;
        }
        let Some(start) = self.touch_start_x.take() else {
            return false;
        };
        let diff = start - x;
        if diff.abs() <= self.swipe_threshold {
            return false;
        }
        if diff > 0.0 {
            self.next(dom)
        } else {
            self.prev(dom)
        }
    }

    fn settle<D: Dom>(&mut self, dom: &mut D, current: usize) {
        apply_active(dom, &self.slides, &self.indicators, &self.labels, current);
    }
}

fn apply_active<D: Dom>(
    dom: &mut D,
    slides: &[ElementId],
    indicators: &[ElementId],
    labels: &[ElementId],
    current: usize,
) {
    for (i, &slide) in slides.iter().enumerate() {
        dom.remove_class(slide, ACTIVE);
        for class in LEGACY_SLIDE_CLASSES {
            dom.remove_class(slide, class);
        }
        if i == current {
            dom.add_class(slide, ACTIVE);
        }
    }
    for set in [indicators, labels] {
        for (i, &el) in set.iter().enumerate() {
            dom.set_class(el, ACTIVE, i == current);
        }
    }
}

fn position_containing<D: Dom>(dom: &D, set: &[ElementId], target: ElementId) -> Option<usize> {
    set.iter().position(|&el| dom.contains(el, target))
}

// ───────────────────────────────────────── mobile ────────────

/// Mobile label strip: a tap shows the matching slide, nothing else.
#[derive(Debug)]
pub struct MobileLabels {
    items: Vec<ElementId>,
    labels: Vec<ElementId>,
}

impl MobileLabels {
    pub fn mount<D: Dom>(dom: &D) -> Option<Self> {
        let grid = dom.find(&Selector::class("portfolio-grid"))?;
        let labels = dom.find_all(&Selector::class("portfolio-label"));
        if labels.is_empty() {
            return None;
        }
        Some(Self {
            items: dom.find_within(grid, &Selector::class("portfolio-item")),
            labels,
        })
    }

    /// Handle a label tap.  Returns whether `target` was a label.
    pub fn on_click<D: Dom>(&self, dom: &mut D, target: ElementId) -> bool {
        let Some(index) = position_containing(dom, &self.labels, target) else {
            return false;
        };
        for (i, &item) in self.items.iter().enumerate() {
            dom.set_class(item, ACTIVE, i == index);
        }
        for (i, &label) in self.labels.iter().enumerate() {
            dom.set_class(label, ACTIVE, i == index);
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::memory::MemoryDom;

    struct Fixture {
        dom: MemoryDom,
        slides: Vec<ElementId>,
        indicators: Vec<ElementId>,
        labels: Vec<ElementId>,
    }

    fn fixture(n: usize) -> Fixture {
        let mut dom = MemoryDom::new();
        let body = dom.body();
        let strip = dom.append(body, "nav").done();
        let labels = (0..n)
            .map(|i| dom.append(strip, "button").class("portfolio-label").text(&format!("L{i}")).done())
            .collect();
        let grid = dom.append(body, "div").class("portfolio-grid").done();
        let slides = (0..n)
            .map(|_| dom.append(grid, "article").class("portfolio-item").done())
            .collect();
        let dots = dom.append(body, "div").done();
        let indicators = (0..n)
            .map(|_| dom.append(dots, "span").class("portfolio-indicator").done())
            .collect();
        Fixture {
            dom,
            slides,
            indicators,
            labels,
        }
    }

    fn active_positions(dom: &MemoryDom, els: &[ElementId]) -> Vec<usize> {
        els.iter()
            .enumerate()
            .filter(|&(_, &el)| dom.has_class(el, ACTIVE))
            .map(|(i, _)| i)
            .collect()
    }

    fn assert_triple(f: &Fixture, index: usize) {
        assert_eq!(active_positions(&f.dom, &f.slides), vec![index]);
        assert_eq!(active_positions(&f.dom, &f.indicators), vec![index]);
        assert_eq!(active_positions(&f.dom, &f.labels), vec![index]);
    }

    #[test]
    fn mount_activates_first_slide() {
        let mut f = fixture(3);
        let c = CarouselController::mount(&mut f.dom, 50.0).expect("mounts");
        assert_eq!(c.current(), 0);
        assert_triple(&f, 0);
    }

    #[test]
    fn wraps_both_ways() {
        let mut f = fixture(3);
        let mut c = CarouselController::mount(&mut f.dom, 50.0).expect("mounts");
        c.prev(&mut f.dom);
        assert_eq!(c.current(), 2);
        assert_triple(&f, 2);
        c.next(&mut f.dom);
        assert_eq!(c.current(), 0);
        c.go_to(&mut f.dom, -7);
        assert_eq!(c.current(), 2);
    }

    #[test]
    fn single_slide_wraps_to_itself() {
        let mut f = fixture(1);
        let mut c = CarouselController::mount(&mut f.dom, 50.0).expect("mounts");
        assert!(c.next(&mut f.dom));
        assert!(c.prev(&mut f.dom));
        assert_triple(&f, 0);
    }

    #[test]
    fn held_guard_drops_navigation() {
        let mut f = fixture(3);
        let mut c = CarouselController::mount(&mut f.dom, 50.0).expect("mounts");
        assert!(c.slide_set_mut().begin_transition());
        assert!(!c.go_to(&mut f.dom, 2));
        assert_eq!(c.current(), 0);
        assert_triple(&f, 0);
        c.slide_set_mut().end_transition();
        assert!(c.go_to(&mut f.dom, 2));
        assert_triple(&f, 2);
    }

    #[test]
    fn indicator_and_label_clicks_jump() {
        let mut f = fixture(4);
        let mut c = CarouselController::mount(&mut f.dom, 50.0).expect("mounts");
        assert!(c.on_click(&mut f.dom, f.indicators[3]));
        assert_triple(&f, 3);
        assert!(c.on_click(&mut f.dom, f.labels[1]));
        assert_triple(&f, 1);
        let body = f.dom.body();
        assert!(!c.on_click(&mut f.dom, body));
    }

    #[test]
    fn swipe_respects_threshold() {
        let mut f = fixture(3);
        let mut c = CarouselController::mount(&mut f.dom, 50.0).expect("mounts");
        let slide = f.slides[0];
        c.on_touch_start(&f.dom, slide, 300.0);
        assert!(!c.on_touch_end(&mut f.dom, slide, 250.0));
        assert_eq!(c.current(), 0);
        c.on_touch_start(&f.dom, slide, 300.0);
        assert!(c.on_touch_end(&mut f.dom, slide, 200.0));
        assert_eq!(c.current(), 1);
        c.on_touch_start(&f.dom, slide, 100.0);
        assert!(c.on_touch_end(&mut f.dom, slide, 180.0));
        assert_eq!(c.current(), 0);
    }

    #[test]
    fn touch_end_without_start_is_ignored() {
        let mut f = fixture(3);
        let mut c = CarouselController::mount(&mut f.dom, 50.0).expect("mounts");
        let slide = f.slides[0];
        assert!(!c.on_touch_end(&mut f.dom, slide, 0.0));
    }

    #[test]
    fn settle_clears_legacy_classes() {
        let mut f = fixture(2);
        f.dom.add_class(f.slides[1], "slide-in-from-right");
        let mut c = CarouselController::mount(&mut f.dom, 50.0).expect("mounts");
        c.next(&mut f.dom);
        assert!(!f.dom.has_class(f.slides[1], "slide-in-from-right"));
    }

    #[test]
    fn no_grid_no_carousel() {
        let mut dom = MemoryDom::new();
        assert!(CarouselController::mount(&mut dom, 50.0).is_none());
        assert!(MobileLabels::mount(&dom).is_none());
    }

    #[test]
    fn mobile_labels_skip_indicators() {
        let mut f = fixture(3);
        let labels = MobileLabels::mount(&f.dom).expect("mounts");
        assert!(labels.on_click(&mut f.dom, f.labels[2]));
        assert_eq!(active_positions(&f.dom, &f.slides), vec![2]);
        assert_eq!(active_positions(&f.dom, &f.labels), vec![2]);
        assert!(active_positions(&f.dom, &f.indicators).is_empty());
    }
}
