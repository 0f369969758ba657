//! The page: every feature mounted on one document, fed by one event stream.
//!
//! [`Page`] owns the document, the window, the preference store and the
//! timer queue.  Hosts do two things with it: forward input as
//! [`PageEvent`]s and move time forward with [`Page::advance`].

use std::time::Duration;

use chrono::{Datelike, Local, NaiveDate};
use tracing::debug;

use super::carousel::{CarouselController, MobileLabels};
use super::counter::{coffee_liters, stamp_year, CoffeeCounter};
use super::dom::{is_mobile_width, Dom, ElementId, Window};
use super::modal::ContactModal;
use super::nav::Navigation;
use super::reveal::Reveal;
use super::scheduler::{Scheduler, TimerId, TimerQueue};
use super::theme::{Theme, ThemeSwitcher};
use super::tooltip::StatTooltips;
use super::typing::{TitleSequence, TypingAnimator};
use crate::config::PageConfig;
use crate::prefs::PreferenceStore;

// ───────────────────────────────────────── inputs ────────────

/// Keys the page reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    Escape,
    Other,
}

impl Key {
    /// Map a DOM `KeyboardEvent.key` value.
    pub fn from_dom_key(key: &str) -> Self {
        match key {
            "ArrowLeft" => Key::ArrowLeft,
            "ArrowRight" => Key::ArrowRight,
            "Escape" => Key::Escape,
            _ => Key::Other,
        }
    }
}

/// Everything a host can tell the page.
///
/// `Scroll` and `Resize` carry no payload: the host updates its [`Window`]
/// first, the page reads the new values from it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PageEvent {
    Click { target: ElementId },
    Key(Key),
    TouchStart { target: ElementId, x: f64 },
    TouchEnd { target: ElementId, x: f64 },
    Scroll,
    Resize,
    MouseEnter { target: ElementId },
    MouseMove { target: ElementId, x: f64, y: f64 },
    MouseLeave { target: ElementId },
    Submit { form: ElementId },
}

/// What a host should do with the native event after the page saw it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Outcome {
    /// Let the default action run.
    #[default]
    Continue,
    /// Suppress the default action (anchor jump, form post).
    PreventDefault,
}

/// Timer payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    StartTyping,
    TypingTick,
    CounterFrame,
    InitCarousel,
    ResizeSettled,
    CloseStatNote(ElementId),
}

// ───────────────────────────────────────── page ──────────────

pub struct Page<D, W, P> {
    dom: D,
    window: W,
    prefs: P,
    timers: TimerQueue<Task>,
    config: PageConfig,

    theme: Option<ThemeSwitcher>,
    nav: Navigation,
    reveal: Reveal,
    modal: Option<ContactModal>,
    typing: Option<TypingAnimator>,
    counter: Option<CoffeeCounter>,
    tooltips: Option<StatTooltips>,
    carousel: Option<CarouselController>,
    mobile_labels: Option<MobileLabels>,
    resize_timer: Option<TimerId>,
}

impl<D: Dom, W: Window, P: PreferenceStore> Page<D, W, P> {
    /// Mount every feature for today's date.
    pub fn new(dom: D, window: W, prefs: P, config: PageConfig) -> Self {
        Self::new_on(dom, window, prefs, config, Local::now().date_naive())
    }

    /// Mount every feature as if it were `today`.  Features whose elements
    /// are absent stay unmounted.
    pub fn new_on(mut dom: D, window: W, prefs: P, config: PageConfig, today: NaiveDate) -> Self {
        let mut timers = TimerQueue::new();

        let theme = ThemeSwitcher::mount(&mut dom, &prefs);
        let nav = Navigation::mount(&mut dom, &window, config.nav_offset);
        let reveal = Reveal::mount(&mut dom, &window);
        let modal = ContactModal::mount(&dom, &config.contact_email);
        stamp_year(&mut dom, today.year());

        let timings = config.typing_timings();
        let typing = TypingAnimator::mount(&dom, TitleSequence::new(config.titles.clone()), timings);
        if typing.is_some() {
            timers.schedule(timings.start_delay, Task::StartTyping);
        }

        let frames = config.counter_duration_ms / config.counter_frame().as_millis() as u64;
        let liters = coffee_liters(today, config.coffee_years, config.liters_per_cup);
        let counter = CoffeeCounter::mount(&dom, liters, frames);
        if counter.is_some() {
            timers.schedule(config.counter_frame(), Task::CounterFrame);
        }

        let tooltips = StatTooltips::mount(&mut dom, Duration::from_millis(config.stat_note_timeout_ms));
        let mobile_labels = MobileLabels::mount(&dom);
        timers.schedule(
            Duration::from_millis(config.carousel_init_delay_ms),
            Task::InitCarousel,
        );

        debug!(
            theme = theme.is_some(),
            modal = modal.is_some(),
            typing = typing.is_some(),
            counter = counter.is_some(),
            tooltips = tooltips.is_some(),
            "page mounted"
        );

        Self {
            dom,
            window,
            prefs,
            timers,
            config,
            theme,
            nav,
            reveal,
            modal,
            typing,
            counter,
            tooltips,
            carousel: None,
            mobile_labels,
            resize_timer: None,
        }
    }

    // ── accessors ──────────────────────────────────────────────

    pub fn dom(&self) -> &D {
        &self.dom
    }

    /// Hosts write form-control values through this, the way a user types
    /// into the real inputs.
    pub fn dom_mut(&mut self) -> &mut D {
        &mut self.dom
    }

    pub fn window(&self) -> &W {
        &self.window
    }

    /// Hosts update viewport size and scroll position through this, then
    /// send [`PageEvent::Resize`] or [`PageEvent::Scroll`].
    pub fn window_mut(&mut self) -> &mut W {
        &mut self.window
    }

    pub fn prefs(&self) -> &P {
        &self.prefs
    }

    pub fn config(&self) -> &PageConfig {
        &self.config
    }

    pub fn now(&self) -> Duration {
        self.timers.now()
    }

    /// Due time of the next pending timer.
    pub fn next_due(&mut self) -> Option<Duration> {
        self.timers.next_due()
    }

    pub fn carousel(&self) -> Option<&CarouselController> {
        self.carousel.as_ref()
    }

    pub fn carousel_mut(&mut self) -> Option<&mut CarouselController> {
        self.carousel.as_mut()
    }

    pub fn typing(&self) -> Option<&TypingAnimator> {
        self.typing.as_ref()
    }

    pub fn modal(&self) -> Option<&ContactModal> {
        self.modal.as_ref()
    }

    pub fn is_modal_open(&self) -> bool {
        self.modal.as_ref().is_some_and(|m| m.is_open(&self.dom))
    }

    pub fn theme(&self) -> Theme {
        self.theme.as_ref().map(ThemeSwitcher::theme).unwrap_or_default()
    }

    pub fn is_mobile(&self) -> bool {
        is_mobile_width(self.window.inner_width(), self.config.mobile_breakpoint)
    }

    // ── time ───────────────────────────────────────────────────

    /// Run every timer due within the next `dt`.
    pub fn advance(&mut self, dt: Duration) {
        self.advance_to(self.timers.now() + dt);
    }

    /// Run every timer due at or before `until`.
    pub fn advance_to(&mut self, until: Duration) {
        while let Some(task) = self.timers.pop_due(until) {
            self.run(task);
        }
        self.timers.settle_at(until);
    }

    fn run(&mut self, task: Task) {
        match task {
            Task::StartTyping => {
                if let Some(typing) = self.typing.as_mut() {
                    typing.start(&mut self.dom, &mut self.timers);
                }
            }
            Task::TypingTick => {
                if let Some(typing) = self.typing.as_mut() {
                    typing.tick(&mut self.dom, &mut self.timers);
                }
            }
            Task::CounterFrame => {
                if let Some(counter) = self.counter.as_mut() {
                    if counter.frame(&mut self.dom) {
                        self.timers.schedule(self.config.counter_frame(), Task::CounterFrame);
                    }
                }
            }
            Task::InitCarousel => self.init_carousel(),
            Task::ResizeSettled => {
                self.resize_timer = None;
                let mobile = self.is_mobile();
                if let Some(tooltips) = self.tooltips.as_ref() {
                    tooltips.on_resize(&mut self.dom, mobile);
                }
                self.init_carousel();
            }
            Task::CloseStatNote(item) => {
                if let Some(tooltips) = self.tooltips.as_mut() {
                    tooltips.close_note(&mut self.dom, item);
                }
            }
        }
    }

    /// Mount a fresh desktop carousel at the first slide, or tear it down
    /// below the breakpoint.  The previous controller is always dropped.
    fn init_carousel(&mut self) {
        if self.carousel.take().is_some() {
            debug!("previous carousel dropped");
        }
        if !self.is_mobile() {
            self.carousel = CarouselController::mount(&mut self.dom, self.config.swipe_threshold);
        }
    }

    // ── input ──────────────────────────────────────────────────

    pub fn handle(&mut self, event: PageEvent) -> Outcome {
        match event {
            PageEvent::Click { target } => self.on_click(target),
            PageEvent::Key(key) => {
                self.on_key(key);
                Outcome::Continue
            }
            PageEvent::TouchStart { target, x } => {
                if let Some(carousel) = self.carousel.as_mut() {
                    carousel.on_touch_start(&self.dom, target, x);
                }
                Outcome::Continue
            }
            PageEvent::TouchEnd { target, x } => {
                if let Some(carousel) = self.carousel.as_mut() {
                    carousel.on_touch_end(&mut self.dom, target, x);
                }
                Outcome::Continue
            }
            PageEvent::Scroll => {
                self.nav.on_scroll(&mut self.dom, &self.window);
                self.reveal.check(&mut self.dom, &self.window);
                Outcome::Continue
            }
            PageEvent::Resize => {
                if let Some(pending) = self.resize_timer.take() {
                    self.timers.cancel(pending);
                }
                self.resize_timer = Some(self.timers.schedule(
                    Duration::from_millis(self.config.resize_debounce_ms),
                    Task::ResizeSettled,
                ));
                self.reveal.check(&mut self.dom, &self.window);
                Outcome::Continue
            }
            PageEvent::MouseEnter { target } => {
                let mobile = self.is_mobile();
                if let Some(tooltips) = self.tooltips.as_ref() {
                    tooltips.on_mouse_enter(&mut self.dom, mobile, target);
                }
                Outcome::Continue
            }
            PageEvent::MouseMove { target, x, y } => {
                let mobile = self.is_mobile();
                if let Some(tooltips) = self.tooltips.as_ref() {
                    tooltips.on_mouse_move(&mut self.dom, mobile, target, x, y);
                }
                Outcome::Continue
            }
            PageEvent::MouseLeave { target } => {
                let mobile = self.is_mobile();
                if let Some(tooltips) = self.tooltips.as_ref() {
                    tooltips.on_mouse_leave(&mut self.dom, mobile, target);
                }
                Outcome::Continue
            }
            PageEvent::Submit { form } => {
                let sent = self
                    .modal
                    .as_ref()
                    .and_then(|m| m.on_submit(&mut self.dom, &mut self.window, form));
                if sent.is_some() {
                    Outcome::PreventDefault
                } else {
                    Outcome::Continue
                }
            }
        }
    }

    fn on_click(&mut self, target: ElementId) -> Outcome {
        let mut outcome = Outcome::Continue;

        if let Some(theme) = self.theme.as_mut() {
            theme.on_click(&mut self.dom, &mut self.prefs, target);
        }
        if self.nav.on_click(&self.dom, &mut self.window, target) {
            outcome = Outcome::PreventDefault;
        }
        if let Some(modal) = self.modal.as_ref() {
            if modal.on_click(&mut self.dom, &mut self.window, target) {
                outcome = Outcome::PreventDefault;
            }
        }

        let mobile = self.is_mobile();
        if mobile {
            if let Some(labels) = self.mobile_labels.as_ref() {
                labels.on_click(&mut self.dom, target);
            }
        } else if let Some(carousel) = self.carousel.as_mut() {
            carousel.on_click(&mut self.dom, target);
        }

        if let Some(tooltips) = self.tooltips.as_mut() {
            tooltips.on_click(&mut self.dom, &mut self.timers, mobile, target);
        }
        outcome
    }

    fn on_key(&mut self, key: Key) {
        match key {
            Key::Escape => {
                if let Some(modal) = self.modal.as_ref() {
                    modal.on_escape(&mut self.dom);
                }
            }
            Key::ArrowLeft => {
                if let Some(carousel) = self.carousel.as_mut() {
                    carousel.prev(&mut self.dom);
                }
            }
            Key::ArrowRight => {
                if let Some(carousel) = self.carousel.as_mut() {
                    carousel.next(&mut self.dom);
                }
            }
            Key::Other => {}
        }
    }
}
