//! Colour palettes for the light and dark page themes.

use folio::core::theme::Theme;
use ratatui::style::{Color, Modifier, Style};

const INK: Color = Color::Rgb(17, 24, 39);
const PAPER: Color = Color::Rgb(249, 250, 251);
const SLATE: Color = Color::Rgb(107, 114, 128);
const INDIGO: Color = Color::Rgb(99, 102, 241);
const LAVENDER: Color = Color::Rgb(165, 180, 252);

/// Styles for the current page theme.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    dark: bool,
}

impl Palette {
    pub fn new(theme: Theme) -> Self {
        Self {
            dark: theme == Theme::Dark,
        }
    }

    fn fg(&self) -> Color {
        if self.dark { PAPER } else { INK }
    }

    fn bg(&self) -> Color {
        if self.dark { INK } else { PAPER }
    }

    fn accent(&self) -> Color {
        if self.dark { LAVENDER } else { INDIGO }
    }

    // ── page ───────────────────────────────────────────────────
    pub fn base(&self) -> Style {
        Style::default().fg(self.fg()).bg(self.bg())
    }

    pub fn heading(&self) -> Style {
        self.base().add_modifier(Modifier::BOLD)
    }

    pub fn typed(&self) -> Style {
        self.base().fg(self.accent()).add_modifier(Modifier::BOLD)
    }

    pub fn cursor(&self, visible: bool) -> Style {
        if visible {
            self.base().fg(self.accent()).add_modifier(Modifier::SLOW_BLINK)
        } else {
            self.base().fg(self.bg())
        }
    }

    pub fn muted(&self) -> Style {
        self.base().fg(SLATE)
    }

    /// Content that has not faded in yet.
    pub fn unrevealed(&self) -> Style {
        self.base().fg(self.bg())
    }

    pub fn active(&self) -> Style {
        Style::default()
            .fg(self.bg())
            .bg(self.accent())
            .add_modifier(Modifier::BOLD)
    }

    pub fn indicator(&self, active: bool) -> Style {
        if active { self.base().fg(self.accent()) } else { self.muted() }
    }

    // ── chrome ─────────────────────────────────────────────────
    pub fn border(&self) -> Style {
        self.base().fg(SLATE)
    }

    /// Navbar border once the page has scrolled under it.
    pub fn raised_border(&self) -> Style {
        self.base().fg(self.accent()).add_modifier(Modifier::BOLD)
    }

    pub fn tooltip(&self) -> Style {
        Style::default().fg(self.bg()).bg(self.fg())
    }

    pub fn status_bar(&self) -> Style {
        Style::default().bg(Color::DarkGray).fg(Color::White)
    }
}
