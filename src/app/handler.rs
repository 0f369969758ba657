//! Input handling: terminal keys and mouse gestures become page events.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use tracing::debug;

use folio::core::dom::{Dom, ElementId, Selector, Window};
use folio::core::modal::FIELD_IDS;
use folio::core::sample::by_id;
use folio::{Key, PageEvent};

use super::state::{AppState, Drag};
use crate::ui::layout::NAV_ROWS;
use crate::ui::page_view::{document_height, COL_PX, ROW_PX};

/// Rows moved per arrow press or wheel notch.
const SCROLL_STEP_ROWS: f64 = 3.0;

/// What the demo submission types into the contact form.
const DEMO_MESSAGE: [&str; 5] = [
    "Terminal Visitor",
    "visitor@example.com",
    "Just browsing",
    "",
    "Sent from the terminal preview.",
];

pub fn handle_key(state: &mut AppState, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.should_quit = true;
        return;
    }
    state.status_message = None;

    let page_rows = (state.page.window().inner_height() / ROW_PX).max(1.0);
    match key.code {
        KeyCode::Char('q') => state.should_quit = true,
        KeyCode::Left => {
            state.dispatch(PageEvent::Key(Key::ArrowLeft));
        }
        KeyCode::Right => {
            state.dispatch(PageEvent::Key(Key::ArrowRight));
        }
        KeyCode::Esc => {
            state.dispatch(PageEvent::Key(Key::Escape));
        }
        KeyCode::Enter if state.page.is_modal_open() => submit_demo(state),
        KeyCode::Char('t') => click_id(state, "theme-toggle"),
        KeyCode::Char('c') => {
            let trigger = if state.page.is_mobile() {
                "contact-trigger-mobile"
            } else {
                "contact-trigger"
            };
            click_id(state, trigger);
        }
        KeyCode::Char(d @ '1'..='9') => {
            let index = d as usize - '1' as usize;
            let label = state
                .page
                .dom()
                .find_all(&Selector::class("portfolio-label"))
                .get(index)
                .copied();
            if let Some(label) = label {
                state.dispatch(PageEvent::Click { target: label });
            }
        }
        KeyCode::Up => scroll_by(state, -SCROLL_STEP_ROWS * ROW_PX),
        KeyCode::Down => scroll_by(state, SCROLL_STEP_ROWS * ROW_PX),
        KeyCode::PageUp => scroll_by(state, -(page_rows - NAV_ROWS as f64) * ROW_PX),
        KeyCode::PageDown => scroll_by(state, (page_rows - NAV_ROWS as f64) * ROW_PX),
        KeyCode::Home => scroll_by(state, f64::NEG_INFINITY),
        KeyCode::End => scroll_by(state, f64::INFINITY),
        _ => {}
    }
}

/// Left-button press and release on the same column is a click; a release
/// elsewhere is a swipe from the press point.  The wheel scrolls and plain
/// motion drives the stat tooltips.
pub fn handle_mouse(state: &mut AppState, mouse: MouseEvent) {
    let target = state.hits.at(mouse.column, mouse.row);
    let x = mouse.column as f64 * COL_PX;
    let y = mouse.row as f64 * ROW_PX;

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            state.drag = Some(Drag {
                column: mouse.column,
                target,
            });
        }
        MouseEventKind::Up(MouseButton::Left) => {
            let Some(drag) = state.drag.take() else {
                return;
            };
            if drag.column != mouse.column {
                if let Some(start) = drag.target {
                    state.dispatch(PageEvent::TouchStart {
                        target: start,
                        x: drag.column as f64 * COL_PX,
                    });
                    state.dispatch(PageEvent::TouchEnd { target: start, x });
                }
            } else {
                let body = state.page.dom().body();
                state.dispatch(PageEvent::Click {
                    target: target.unwrap_or(body),
                });
            }
        }
        MouseEventKind::ScrollUp => scroll_by(state, -SCROLL_STEP_ROWS * ROW_PX),
        MouseEventKind::ScrollDown => scroll_by(state, SCROLL_STEP_ROWS * ROW_PX),
        MouseEventKind::Moved => hover(state, target, x, y),
        _ => {}
    }
}

/// The terminal changed size.  A fixed `--width` keeps the viewport width.
pub fn handle_resize(state: &mut AppState, columns: u16, rows: u16) {
    let window = state.page.window_mut();
    window.width = state.fixed_width.unwrap_or(columns as f64 * COL_PX);
    // The status bar is not part of the viewport.
    window.height = rows.saturating_sub(1) as f64 * ROW_PX;
    state.dispatch(PageEvent::Resize);
}

fn click_id(state: &mut AppState, id: &str) {
    if let Some(target) = by_id(state.page.dom(), id) {
        state.dispatch(PageEvent::Click { target });
    }
}

/// Scroll the viewport by `dy` px, clamped to the document.  Locked while
/// the body's overflow is hidden (modal open).
fn scroll_by(state: &mut AppState, dy: f64) {
    let dom = state.page.dom();
    if dom.style(dom.body(), "overflow").as_deref() == Some("hidden") {
        return;
    }
    let max = (document_height(dom) - state.page.window().inner_height()).max(0.0);
    let y = (state.page.window().scroll_y() + dy).clamp(0.0, max);
    state.page.window_mut().scroll_to(y);
    state.dispatch(PageEvent::Scroll);
}

fn hover(state: &mut AppState, target: Option<ElementId>, x: f64, y: f64) {
    let tile = target.filter(|&t| state.page.dom().has_class(t, "stat-item"));
    if tile != state.hovered {
        if let Some(left) = state.hovered {
            state.dispatch(PageEvent::MouseLeave { target: left });
        }
        if let Some(entered) = tile {
            state.dispatch(PageEvent::MouseEnter { target: entered });
        }
        state.hovered = tile;
    }
    if let Some(tile) = tile {
        state.dispatch(PageEvent::MouseMove { target: tile, x, y });
    }
}

/// Fill the open contact form and submit it.
fn submit_demo(state: &mut AppState) {
    let Some(form) = state.page.modal().and_then(|m| m.form_element()) else {
        return;
    };
    for (id, value) in FIELD_IDS.iter().zip(DEMO_MESSAGE) {
        if let Some(field) = by_id(state.page.dom(), id) {
            state.page.dom_mut().set_value(field, value);
        }
    }
    state.dispatch(PageEvent::Submit { form });
    if let Some(url) = state.page.window().navigations.last() {
        debug!(%url, "mail client handoff");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use folio::core::memory::MemoryWindow;
    use folio::core::modal::THANK_YOU;
    use folio::core::sample::sample_document;
    use folio::prefs::MemoryStore;
    use folio::{Page, PageConfig};
    use ratatui::layout::Rect;
    use std::time::Duration;

    use crate::app::state::SessionPrefs;

    fn state(width: f64) -> AppState {
        let mut page = Page::new_on(
            sample_document(),
            MemoryWindow::new(width, 800.0),
            SessionPrefs::Session(MemoryStore::new()),
            PageConfig::default(),
            NaiveDate::from_ymd_opt(2026, 6, 1).unwrap(),
        );
        page.advance(Duration::from_millis(100));
        AppState::new(page, None)
    }

    fn press(state: &mut AppState, code: KeyCode) {
        handle_key(state, KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn mouse(state: &mut AppState, kind: MouseEventKind, column: u16, row: u16) {
        handle_mouse(
            state,
            MouseEvent {
                kind,
                column,
                row,
                modifiers: KeyModifiers::NONE,
            },
        );
    }

    #[test]
    fn demo_submission_reports_the_alert() {
        let mut s = state(1024.0);
        press(&mut s, KeyCode::Char('c'));
        assert!(s.page.is_modal_open());
        press(&mut s, KeyCode::Enter);
        assert!(!s.page.is_modal_open());
        assert_eq!(s.status_message.as_deref(), Some(THANK_YOU));
        assert!(s.page.window().navigations[0].contains("Terminal%20Visitor"));
    }

    #[test]
    fn number_keys_pick_labels() {
        let mut s = state(1024.0);
        press(&mut s, KeyCode::Char('3'));
        assert_eq!(s.page.carousel().unwrap().current(), 2);
        press(&mut s, KeyCode::Char('9'));
        assert_eq!(s.page.carousel().unwrap().current(), 2);
    }

    #[test]
    fn drag_across_the_slide_swipes() {
        let mut s = state(1024.0);
        let item = s.page.dom().find(&Selector::class("portfolio-item")).unwrap();
        s.hits.push(Rect::new(0, 5, 80, 8), item);
        mouse(&mut s, MouseEventKind::Down(MouseButton::Left), 40, 6);
        mouse(&mut s, MouseEventKind::Up(MouseButton::Left), 30, 6);
        assert_eq!(s.page.carousel().unwrap().current(), 1);
        // One column is only 10 px.
        mouse(&mut s, MouseEventKind::Down(MouseButton::Left), 40, 6);
        mouse(&mut s, MouseEventKind::Up(MouseButton::Left), 41, 6);
        assert_eq!(s.page.carousel().unwrap().current(), 1);
    }

    #[test]
    fn scrolling_is_clamped_and_locked_by_the_modal() {
        let mut s = state(1024.0);
        press(&mut s, KeyCode::End);
        assert_eq!(s.page.window().scroll_y(), 2120.0 - 800.0);
        press(&mut s, KeyCode::Home);
        assert_eq!(s.page.window().scroll_y(), 0.0);

        press(&mut s, KeyCode::Char('c'));
        press(&mut s, KeyCode::Down);
        assert_eq!(s.page.window().scroll_y(), 0.0);
    }

    #[test]
    fn fixed_width_survives_terminal_resizes() {
        let mut s = state(1024.0);
        s.fixed_width = Some(1024.0);
        handle_resize(&mut s, 40, 30);
        assert_eq!(s.page.window().inner_width(), 1024.0);
        assert_eq!(s.page.window().inner_height(), 580.0);
    }
}
