//! Interactivity for a single-page portfolio.
//!
//! The [`core`] page model runs against any [`core::dom::Dom`] /
//! [`core::dom::Window`] pair.  Two hosts ship with the crate: the `folio`
//! terminal preview binary, and (with the `web` feature) a browser backend
//! in [`web`].

pub mod config;
pub mod core;
pub mod error;
pub mod prefs;
#[cfg(feature = "web")]
pub mod web;

pub use crate::config::PageConfig;
pub use crate::core::page::{Key, Outcome, Page, PageEvent};
pub use crate::error::{FolioError, Result};
