//! Light/dark theme switch with a persisted preference.

use std::fmt;

use tracing::warn;

use super::dom::{Dom, ElementId, Selector};
use crate::prefs::PreferenceStore;

/// Preference key holding `"light"` or `"dark"`.
pub const THEME_KEY: &str = "theme";
/// Class on `<html>` that switches the stylesheet to dark colours.
pub const DARK_CLASS: &str = "theme-dark";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    /// Anything other than `"dark"` reads as light.
    pub fn parse(s: &str) -> Self {
        if s.trim().eq_ignore_ascii_case("dark") {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn icon_src(self) -> &'static str {
        match self {
            Theme::Light => "svg/light.svg",
            Theme::Dark => "svg/dark.svg",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Read the stored theme, treating a broken store as "nothing stored".
pub fn stored_theme<P: PreferenceStore>(prefs: &P) -> Theme {
    match prefs.get(THEME_KEY) {
        Ok(value) => value.as_deref().map(Theme::parse).unwrap_or_default(),
        Err(e) => {
            warn!("reading theme preference: {e}");
            Theme::default()
        }
    }
}

/// `#theme-toggle` button plus `#theme-icon` image.
#[derive(Debug)]
pub struct ThemeSwitcher {
    toggle: ElementId,
    icon: ElementId,
    theme: Theme,
}

impl ThemeSwitcher {
    /// Bind the toggle and apply the stored theme.
    pub fn mount<D: Dom, P: PreferenceStore>(dom: &mut D, prefs: &P) -> Option<Self> {
        let toggle = dom.find(&Selector::id("theme-toggle"))?;
        let icon = dom.find(&Selector::id("theme-icon"))?;
        let theme = stored_theme(prefs);
        let switcher = Self {
            toggle,
            icon,
            theme,
        };
        switcher.apply(dom);
        Some(switcher)
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Returns whether `target` was the toggle.
    pub fn on_click<D: Dom, P: PreferenceStore>(
        &mut self,
        dom: &mut D,
        prefs: &mut P,
        target: ElementId,
    ) -> bool {
        if !dom.contains(self.toggle, target) {
            return false;
        }
        let root = dom.root();
        let dark = dom.toggle_class(root, DARK_CLASS);
        self.theme = if dark { Theme::Dark } else { Theme::Light };
        if let Err(e) = prefs.set(THEME_KEY, self.theme.as_str()) {
            warn!("saving theme preference: {e}");
        }
        dom.set_attr(self.icon, "src", self.theme.icon_src());
        true
    }

    fn apply<D: Dom>(&self, dom: &mut D) {
        let root = dom.root();
        dom.set_class(root, DARK_CLASS, self.theme == Theme::Dark);
        dom.set_attr(self.icon, "src", self.theme.icon_src());
    }
}
