//! Page configuration: titles, timings, thresholds and persistence.
//!
//! Settings are stored as a simple key-value text file at
//! `$XDG_CONFIG_HOME/folio/config.toml` (default `~/.config/folio/config.toml`).
//! Lists (the typing titles) are `|`-separated.

use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::warn;

use crate::core::typing::TypingTimings;
use crate::error::{FolioError, Result};

/// Everything tunable about the page.  Durations are whole milliseconds.
#[derive(Debug, Clone, PartialEq)]
pub struct PageConfig {
    /// Titles cycled by the typing animator.
    pub titles: Vec<String>,
    pub type_speed_ms: u64,
    pub delete_speed_ms: u64,
    pub hold_ms: u64,
    pub gap_ms: u64,
    pub typing_start_delay_ms: u64,
    /// Widths at or below this (CSS px) use the mobile layout.
    pub mobile_breakpoint: f64,
    /// Minimum horizontal travel (px) for a swipe.
    pub swipe_threshold: f64,
    /// Space left above a section after an in-page jump (px).
    pub nav_offset: f64,
    /// Quiet period before a resize is acted on.
    pub resize_debounce_ms: u64,
    /// Delay between document ready and the first carousel mount.
    pub carousel_init_delay_ms: u64,
    /// How long a tapped stat note stays open on mobile.
    pub stat_note_timeout_ms: u64,
    /// Recipient of the contact form.
    pub contact_email: String,
    /// Years of coffee behind the counter.
    pub coffee_years: u32,
    pub liters_per_cup: f64,
    pub counter_duration_ms: u64,
    pub counter_frame_ms: u64,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            titles: [
                "Product Designer",
                "Experience Designer",
                "Growth Designer",
                "AI Enthusiast",
                "Coffee Lover",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            type_speed_ms: 80,
            delete_speed_ms: 50,
            hold_ms: 2000,
            gap_ms: 300,
            typing_start_delay_ms: 500,
            mobile_breakpoint: crate::core::dom::MOBILE_BREAKPOINT,
            swipe_threshold: 50.0,
            nav_offset: 80.0,
            resize_debounce_ms: 250,
            carousel_init_delay_ms: 100,
            stat_note_timeout_ms: 5000,
            contact_email: "cykdesignworks@gmail.com".to_string(),
            coffee_years: 8,
            liters_per_cup: 0.24,
            counter_duration_ms: 2000,
            counter_frame_ms: 16,
        }
    }
}

impl PageConfig {
    pub fn typing_timings(&self) -> TypingTimings {
        TypingTimings {
            type_speed: Duration::from_millis(self.type_speed_ms),
            delete_speed: Duration::from_millis(self.delete_speed_ms),
            hold: Duration::from_millis(self.hold_ms),
            gap: Duration::from_millis(self.gap_ms),
            start_delay: Duration::from_millis(self.typing_start_delay_ms),
        }
        .clamped()
    }

    /// Delay between two coffee counter frames, never zero.
    pub fn counter_frame(&self) -> Duration {
        Duration::from_millis(self.counter_frame_ms.max(1))
    }

    // ── persistence ─────────────────────────────────────────────

    /// Load config from the default location, falling back to defaults.
    pub fn load() -> Self {
        Self::load_from(&config_path())
    }

    /// Load config from `path`, falling back to defaults.  Bad lines are
    /// logged and skipped.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match std::fs::read_to_string(path) {
            Ok(contents) => Self::parse_lenient(&contents),
            Err(e) => {
                warn!("config {}: {e}", path.display());
                Self::default()
            }
        }
    }

    /// Strict parse: the first malformed line is an error.
    pub fn parse(s: &str) -> Result<Self> {
        let mut config = Self::default();
        for (line_no, line) in s.lines().enumerate() {
            config.apply_line(line_no + 1, line)?;
        }
        Ok(config)
    }

    fn parse_lenient(s: &str) -> Self {
        let mut config = Self::default();
        for (line_no, line) in s.lines().enumerate() {
            if let Err(e) = config.apply_line(line_no + 1, line) {
                warn!("{e}");
            }
        }
        config
    }

    fn apply_line(&mut self, line_no: usize, line: &str) -> Result<()> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with('[') {
            return Ok(());
        }
        let bad = |message: String| FolioError::Config {
            line: line_no,
            message,
        };
        let Some((key, value)) = line.split_once('=') else {
            return Err(bad(format!("expected `key = value`, got `{line}`")));
        };
        let key = key.trim();
        let value = value.trim().trim_matches('"');

        let ms = |v: &str| {
            v.parse::<u64>()
                .map_err(|_| bad(format!("`{key}` wants milliseconds, got `{v}`")))
        };
        let px = |v: &str| match v.parse::<f64>() {
            Ok(n) if n.is_finite() && n >= 0.0 => Ok(n),
            _ => Err(bad(format!("`{key}` wants a non-negative number, got `{v}`"))),
        };

        match key {
            "titles" => {
                self.titles = value
                    .split('|')
                    .map(str::trim)
                    .filter(|t| !t.is_empty())
                    .map(String::from)
                    .collect();
            }
            // Typing steps and counter frames reschedule themselves; a zero
            // delay would spin the timer queue forever.
            "type_speed_ms" => self.type_speed_ms = ms(value)?.max(1),
            "delete_speed_ms" => self.delete_speed_ms = ms(value)?.max(1),
            "hold_ms" => self.hold_ms = ms(value)?.max(1),
            "gap_ms" => self.gap_ms = ms(value)?.max(1),
            "typing_start_delay_ms" => self.typing_start_delay_ms = ms(value)?,
            "mobile_breakpoint" => self.mobile_breakpoint = px(value)?,
            "swipe_threshold" => self.swipe_threshold = px(value)?,
            "nav_offset" => self.nav_offset = px(value)?,
            "resize_debounce_ms" => self.resize_debounce_ms = ms(value)?,
            "carousel_init_delay_ms" => self.carousel_init_delay_ms = ms(value)?,
            "stat_note_timeout_ms" => self.stat_note_timeout_ms = ms(value)?,
            "contact_email" => {
                if !value.contains('@') {
                    return Err(bad(format!("`{value}` is not an email address")));
                }
                self.contact_email = value.to_string();
            }
            "coffee_years" => {
                self.coffee_years = value
                    .parse()
                    .map_err(|_| bad(format!("`coffee_years` wants a whole number, got `{value}`")))?;
            }
            "liters_per_cup" => self.liters_per_cup = px(value)?,
            "counter_duration_ms" => self.counter_duration_ms = ms(value)?,
            "counter_frame_ms" => self.counter_frame_ms = ms(value)?.max(1),
            other => return Err(bad(format!("unknown key `{other}`"))),
        }
        Ok(())
    }

    /// Persist to the default location.
    pub fn save(&self) -> anyhow::Result<()> {
        self.save_to(&config_path())
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.serialise())?;
        Ok(())
    }

    pub fn serialise(&self) -> String {
        let lines = [
            "# folio configuration".to_string(),
            String::new(),
            "# Typing animation (titles are |-separated)".to_string(),
            format!("titles = {}", self.titles.join(" | ")),
            format!("type_speed_ms = {}", self.type_speed_ms),
            format!("delete_speed_ms = {}", self.delete_speed_ms),
            format!("hold_ms = {}", self.hold_ms),
            format!("gap_ms = {}", self.gap_ms),
            format!("typing_start_delay_ms = {}", self.typing_start_delay_ms),
            String::new(),
            "# Layout & input".to_string(),
            format!("mobile_breakpoint = {}", self.mobile_breakpoint),
            format!("swipe_threshold = {}", self.swipe_threshold),
            format!("nav_offset = {}", self.nav_offset),
            format!("resize_debounce_ms = {}", self.resize_debounce_ms),
            format!("carousel_init_delay_ms = {}", self.carousel_init_delay_ms),
            format!("stat_note_timeout_ms = {}", self.stat_note_timeout_ms),
            String::new(),
            "# Contact & counters".to_string(),
            format!("contact_email = {}", self.contact_email),
            format!("coffee_years = {}", self.coffee_years),
            format!("liters_per_cup = {}", self.liters_per_cup),
            format!("counter_duration_ms = {}", self.counter_duration_ms),
            format!("counter_frame_ms = {}", self.counter_frame_ms),
            String::new(),
        ];
        lines.join("\n")
    }
}

/// `$XDG_CONFIG_HOME/folio`, falling back to `~/.config/folio`.
pub fn config_dir() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            PathBuf::from(home).join(".config")
        });
    base.join("folio")
}

/// Return the config file path (`$XDG_CONFIG_HOME/folio/config.toml`).
pub fn config_path() -> PathBuf {
    config_dir().join("config.toml")
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;

    #[test]
    fn serialise_then_parse_is_identity() {
        let mut config = PageConfig::default();
        config.titles = vec!["One".into(), "Two words".into()];
        config.swipe_threshold = 64.5;
        let parsed = PageConfig::parse(&config.serialise()).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn strict_parse_reports_the_line() {
        let err = PageConfig::parse("# header\nhold_ms = soon\n").unwrap_err();
        match err {
            FolioError::Config { line, .. } => assert_eq!(line, 2),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn lenient_load_keeps_good_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "gap_ms = 10\nbogus = 1\nswipe_threshold = -4\n").unwrap();
        let config = PageConfig::load_from(&path);
        assert_eq!(config.gap_ms, 10);
        assert_eq!(config.swipe_threshold, 50.0);
    }

    #[test]
    fn missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(
            PageConfig::load_from(&dir.path().join("absent.toml")),
            PageConfig::default()
        );
    }

    #[test]
    fn zero_step_delays_are_raised_to_one_millisecond() {
        let config = PageConfig::parse(
            "type_speed_ms = 0\ndelete_speed_ms = 0\nhold_ms = 0\ngap_ms = 0\ncounter_frame_ms = 0\n",
        )
        .unwrap();
        assert_eq!(
            (config.type_speed_ms, config.delete_speed_ms, config.hold_ms, config.gap_ms),
            (1, 1, 1, 1)
        );
        assert_eq!(config.counter_frame(), Duration::from_millis(1));
    }

    #[test]
    fn typing_timings_never_carry_a_zero_step() {
        let config = PageConfig {
            type_speed_ms: 0,
            hold_ms: 0,
            typing_start_delay_ms: 0,
            ..PageConfig::default()
        };
        let timings = config.typing_timings();
        assert_eq!(timings.type_speed, Duration::from_millis(1));
        assert_eq!(timings.hold, Duration::from_millis(1));
        assert_eq!(timings.start_delay, Duration::ZERO);
    }

    #[test]
    fn empty_titles_are_dropped() {
        let config = PageConfig::parse("titles = A || B |").unwrap();
        assert_eq!(config.titles, vec!["A", "B"]);
    }

    #[test]
    fn save_to_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a").join("config.toml");
        PageConfig::default().save_to(&path).unwrap();
        assert_eq!(PageConfig::load_from(&path), PageConfig::default());
    }
}
