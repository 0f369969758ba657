//! Terminal preview of the portfolio page.
//!
//! Builds the sample portfolio document in memory, mounts the page on it and
//! renders it with ratatui.  Keys and mouse gestures are fed to the page as
//! the browser would feed clicks, swipes and scrolls; the page's timers run
//! on wall-clock time.

mod app;
mod ui;

use std::io::{self, stderr};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{self, disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{info, warn};

use folio::config::config_path;
use folio::core::sample::sample_document;
use folio::core::theme::THEME_KEY;
use folio::prefs::{FileStore, MemoryStore};
use folio::{Page, PageConfig};

use crate::app::{
    event::{spawn_event_reader, AppEvent},
    handler,
    state::{preview_window, AppState, SessionPrefs},
};
use crate::ui::page_view::{COL_PX, ROW_PX};

/// Redraw cadence; the typing animation's fastest step is 50 ms.
const FRAME: Duration = Duration::from_millis(16);

// ───────────────────────────────────────── CLI ───────────────

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), about = "Terminal preview of the portfolio page")]
struct Cli {
    /// Viewport width in CSS pixels (defaults to terminal columns × 10).
    #[arg(long)]
    width: Option<f64>,

    /// Theme for this session only; the saved preference is left alone.
    #[arg(long, value_parser = ["light", "dark"])]
    theme: Option<String>,

    /// Config file (defaults to `$XDG_CONFIG_HOME/folio/config.toml`).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write the effective configuration to the config file and exit.
    #[arg(long = "write-config")]
    write_config: bool,
}

fn open_prefs(theme: Option<&str>) -> SessionPrefs {
    if let Some(theme) = theme {
        return SessionPrefs::Session(MemoryStore::new().with(THEME_KEY, theme));
    }
    match FileStore::open(FileStore::default_path()) {
        Ok(store) => SessionPrefs::File(store),
        Err(e) => {
            warn!("preferences unavailable, theme will not persist: {e}");
            SessionPrefs::Session(MemoryStore::new())
        }
    }
}

// ───────────────────────────────────────── main ──────────────

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr) // stdout belongs to nobody while the TUI runs
        .init();

    let cli = Cli::parse();
    let config = match cli.config.as_deref() {
        Some(path) => PageConfig::load_from(path),
        None => PageConfig::load(),
    };
    if cli.write_config {
        let path = cli.config.unwrap_or_else(config_path);
        config.save_to(&path)?;
        println!("{}", path.display());
        return Ok(());
    }

    let (columns, rows) = terminal::size()?;
    let window = preview_window(
        cli.width.unwrap_or(columns as f64 * COL_PX),
        rows.saturating_sub(1) as f64 * ROW_PX,
    );
    let page = Page::new(
        sample_document(),
        window,
        open_prefs(cli.theme.as_deref()),
        config,
    );
    info!(
        width = page.window().width,
        theme = page.theme().as_str(),
        "preview starting"
    );
    let mut state = AppState::new(page, cli.width);

    // ── terminal setup ────────────────────────────────────────
    enable_raw_mode()?;
    execute!(stderr(), EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stderr());
    let mut terminal = Terminal::new(backend)?;

    // ── event loop ────────────────────────────────────────────
    let mut events = spawn_event_reader(FRAME);
    let started = Instant::now();
    loop {
        terminal.draw(|frame| ui::draw(frame, &mut state))?;

        tokio::select! {
            Some(event) = events.recv() => match event {
                AppEvent::Key(k) => handler::handle_key(&mut state, k),
                AppEvent::Mouse(m) => handler::handle_mouse(&mut state, m),
                AppEvent::Resize(w, h) => handler::handle_resize(&mut state, w, h),
                AppEvent::Tick => state.scroll.tick(),
            },
            else => break,
        }
        state.page.advance_to(started.elapsed());

        if state.should_quit {
            break;
        }
    }

    // ── teardown ──────────────────────────────────────────────
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    Ok(())
}
