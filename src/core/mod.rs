//! Page model – DOM capability, timers, and every interactive feature.
//!
//! Nothing in this module depends on a terminal or a browser.  Features are
//! written against [`dom::Dom`] and [`dom::Window`] and schedule their work
//! through [`scheduler::Scheduler`], so the same code runs in tests, in the
//! terminal preview and in the browser.

pub mod carousel;
pub mod counter;
pub mod dom;
pub mod memory;
pub mod modal;
pub mod nav;
pub mod page;
pub mod reveal;
pub mod sample;
pub mod scheduler;
pub mod theme;
pub mod tooltip;
pub mod typing;
