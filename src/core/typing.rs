//! Typing animator: types a title in, holds it, deletes it, moves on.
//!
//! The animation is an explicit four-phase machine driven by timer ticks:
//!
//! ```text
//! Typing(i, n) ──n == len──▶ Holding(i) ──hold──▶ Deleting(i, len)
//!      ▲                                               │ n == 0
//!      └──────── gap ─────── Gap(i) ◀──────────────────┘   (then i + 1)
//! ```
//!
//! Each tick does one unit of work and schedules the next tick through the
//! page's [`Scheduler`], so a test can step through a whole cycle without
//! waiting on a real clock.

use std::time::Duration;

use tracing::debug;

use super::dom::{Dom, ElementId, Selector};
use super::page::Task;
use super::scheduler::Scheduler;

// ───────────────────────────────────────── timings ───────────

/// Per-phase delays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypingTimings {
    /// Between two typed characters.
    pub type_speed: Duration,
    /// Between two deleted characters.
    pub delete_speed: Duration,
    /// How long a fully typed title stays up.
    pub hold: Duration,
    /// Pause between an emptied title and the next one.
    pub gap: Duration,
    /// Delay after page load before the first cycle.
    pub start_delay: Duration,
}

impl Default for TypingTimings {
    fn default() -> Self {
        Self {
            type_speed: Duration::from_millis(80),
            delete_speed: Duration::from_millis(50),
            hold: Duration::from_millis(2000),
            gap: Duration::from_millis(300),
            start_delay: Duration::from_millis(500),
        }
    }
}

impl TypingTimings {
    /// Shortest delay between two ticks.  A zero step would keep a tick due
    /// forever and never let the clock move on.
    pub const MIN_STEP: Duration = Duration::from_millis(1);

    /// These timings with every per-step delay raised to [`Self::MIN_STEP`].
    pub fn clamped(self) -> Self {
        Self {
            type_speed: self.type_speed.max(Self::MIN_STEP),
            delete_speed: self.delete_speed.max(Self::MIN_STEP),
            hold: self.hold.max(Self::MIN_STEP),
            gap: self.gap.max(Self::MIN_STEP),
            start_delay: self.start_delay,
        }
    }
}

// ───────────────────────────────────────── titles ────────────

/// Fixed cyclic list of titles plus the index of the current one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleSequence {
    titles: Vec<String>,
    index: usize,
}

impl TitleSequence {
    pub fn new<I, S>(titles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            titles: titles.into_iter().map(Into::into).collect(),
            index: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.titles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn current(&self) -> Option<&str> {
        self.titles.get(self.index).map(String::as_str)
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.titles.get(index).map(String::as_str)
    }

    /// Step to the next title, wrapping after the last.
    pub fn advance(&mut self) {
        if !self.titles.is_empty() {
            self.index = (self.index + 1) % self.titles.len();
        }
    }
}

// ───────────────────────────────────────── phases ────────────

/// Where the animator is in its cycle.  `char_pos` counts characters, not
/// bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TypingPhase {
    /// Not started yet.
    #[default]
    Idle,
    Typing { index: usize, char_pos: usize },
    Holding { index: usize },
    Deleting { index: usize, char_pos: usize },
    Gap { index: usize },
}

/// First `chars` characters of `s`.
fn char_prefix(s: &str, chars: usize) -> &str {
    s.char_indices().nth(chars).map_or(s, |(byte, _)| &s[..byte])
}

// ───────────────────────────────────────── animator ──────────

#[derive(Debug)]
pub struct TypingAnimator {
    target: ElementId,
    cursor: ElementId,
    titles: TitleSequence,
    timings: TypingTimings,
    phase: TypingPhase,
    busy: bool,
}

impl TypingAnimator {
    /// Bind to `#typing-text` and `.typing-cursor`.  Returns `None` when
    /// either element is missing or there is nothing to type.
    pub fn mount<D: Dom>(dom: &D, titles: TitleSequence, timings: TypingTimings) -> Option<Self> {
        let target = dom.find(&Selector::id("typing-text"))?;
        let cursor = dom.find(&Selector::class("typing-cursor"))?;
        if titles.is_empty() {
            debug!("typing animator: empty title list, staying idle");
            return None;
        }
        Some(Self::new(target, cursor, titles, timings))
    }

    pub fn new(
        target: ElementId,
        cursor: ElementId,
        titles: TitleSequence,
        timings: TypingTimings,
    ) -> Self {
        Self {
            target,
            cursor,
            titles,
            timings: timings.clamped(),
            phase: TypingPhase::Idle,
            busy: false,
        }
    }

    pub fn phase(&self) -> TypingPhase {
        self.phase
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn titles(&self) -> &TitleSequence {
        &self.titles
    }

    pub fn timings(&self) -> TypingTimings {
        self.timings
    }

    /// Begin a cycle on the current title.  A no-op (returning `false`)
    /// while a cycle is already running or when there are no titles.
    pub fn start<D, S>(&mut self, dom: &mut D, timers: &mut S) -> bool
    where
        D: Dom,
        S: Scheduler<Task>,
    {
        if self.busy || self.titles.is_empty() {
            return false;
        }
        self.busy = true;
        dom.set_style(self.cursor, "opacity", "1");
        dom.set_text(self.target, "");
        self.phase = TypingPhase::Typing {
            index: self.titles.index(),
            char_pos: 0,
        };
        self.tick(dom, timers);
        true
    }

    /// Run one step of the current phase and schedule the next one.
    pub fn tick<D, S>(&mut self, dom: &mut D, timers: &mut S)
    where
        D: Dom,
        S: Scheduler<Task>,
    {
        match self.phase {
            TypingPhase::Idle => {}
            TypingPhase::Typing { index, char_pos } => {
                let title = self.titles.get(index).unwrap_or_default();
                if char_pos < title.chars().count() {
                    let char_pos = char_pos + 1;
                    dom.set_text(self.target, char_prefix(title, char_pos));
                    self.phase = TypingPhase::Typing { index, char_pos };
                    timers.schedule(self.timings.type_speed, Task::TypingTick);
                } else {
                    self.phase = TypingPhase::Holding { index };
                    timers.schedule(self.timings.hold, Task::TypingTick);
                }
            }
            TypingPhase::Holding { index } => {
                let len = self.titles.get(index).map_or(0, |t| t.chars().count());
                self.phase = TypingPhase::Deleting {
                    index,
                    char_pos: len,
                };
                // The first character goes as soon as the hold ends.
                self.tick(dom, timers);
            }
            TypingPhase::Deleting { index, char_pos } => {
                if char_pos > 0 {
                    let char_pos = char_pos - 1;
                    let title = self.titles.get(index).unwrap_or_default();
                    dom.set_text(self.target, char_prefix(title, char_pos));
                    self.phase = TypingPhase::Deleting { index, char_pos };
                    timers.schedule(self.timings.delete_speed, Task::TypingTick);
                } else {
                    self.phase = TypingPhase::Gap { index };
                    timers.schedule(self.timings.gap, Task::TypingTick);
                }
            }
            TypingPhase::Gap { .. } => {
                self.titles.advance();
                self.busy = false;
                self.start(dom, timers);
            }
        }
    }
}
