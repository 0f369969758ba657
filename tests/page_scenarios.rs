//! End-to-end behaviour of the mounted page on the sample document.

use std::time::Duration;

use chrono::NaiveDate;
use folio::core::dom::{Dom, ElementId, Selector, Window};
use folio::core::memory::{MemoryDom, MemoryWindow};
use folio::core::modal::{FIELD_IDS, THANK_YOU};
use folio::core::sample::{by_id, sample_document};
use folio::core::theme::{Theme, DARK_CLASS, THEME_KEY};
use folio::prefs::{MemoryStore, PreferenceStore};
use folio::{Key, Outcome, Page, PageConfig, PageEvent};

type TestPage = Page<MemoryDom, MemoryWindow, MemoryStore>;

fn page_at(width: f64, prefs: MemoryStore) -> TestPage {
    Page::new_on(
        sample_document(),
        MemoryWindow::new(width, 800.0),
        prefs,
        PageConfig::default(),
        NaiveDate::from_ymd_opt(2026, 6, 1).unwrap(),
    )
}

fn desktop() -> TestPage {
    let mut page = page_at(1024.0, MemoryStore::new());
    page.advance(Duration::from_millis(100));
    page
}

fn id(page: &TestPage, name: &str) -> ElementId {
    by_id(page.dom(), name).unwrap_or_else(|| panic!("#{name} missing"))
}

fn nth(page: &TestPage, class: &str, n: usize) -> ElementId {
    page.dom().find_all(&Selector::class(class))[n]
}

fn active(page: &TestPage, el: ElementId) -> bool {
    page.dom().has_class(el, "active")
}

// ───────────────────────────────────────── carousel ──────────

#[test]
fn carousel_mounts_after_the_init_delay() {
    let mut page = page_at(1024.0, MemoryStore::new());
    page.advance(Duration::from_millis(99));
    assert!(page.carousel().is_none());
    page.advance(Duration::from_millis(1));
    assert_eq!(page.carousel().map(|c| c.current()), Some(0));
}

#[test]
fn swipes_move_the_carousel() {
    let mut page = desktop();
    let grid = page.carousel().unwrap().grid();

    page.handle(PageEvent::TouchStart { target: grid, x: 300.0 });
    page.handle(PageEvent::TouchEnd { target: grid, x: 200.0 });
    assert_eq!(page.carousel().unwrap().current(), 1);

    page.handle(PageEvent::TouchStart { target: grid, x: 200.0 });
    page.handle(PageEvent::TouchEnd { target: grid, x: 300.0 });
    assert_eq!(page.carousel().unwrap().current(), 0);

    // 50 px is not enough.
    page.handle(PageEvent::TouchStart { target: grid, x: 250.0 });
    page.handle(PageEvent::TouchEnd { target: grid, x: 200.0 });
    assert_eq!(page.carousel().unwrap().current(), 0);
}

#[test]
fn arrows_and_indicators_drive_the_carousel() {
    let mut page = desktop();
    page.handle(PageEvent::Key(Key::ArrowLeft));
    assert_eq!(page.carousel().unwrap().current(), 2);
    page.handle(PageEvent::Key(Key::ArrowRight));
    assert_eq!(page.carousel().unwrap().current(), 0);

    let dot = nth(&page, "portfolio-indicator", 1);
    page.handle(PageEvent::Click { target: dot });
    assert_eq!(page.carousel().unwrap().current(), 1);
    assert!(active(&page, nth(&page, "portfolio-label", 1)));
    assert!(active(&page, nth(&page, "portfolio-item", 1)));
}

#[test]
fn shrinking_to_mobile_hands_over_to_the_labels() {
    let mut page = desktop();
    page.window_mut().width = 500.0;
    page.handle(PageEvent::Resize);

    // Debounced: still a carousel until the quiet period is over.
    page.advance(Duration::from_millis(249));
    assert!(page.carousel().is_some());
    page.advance(Duration::from_millis(1));
    assert!(page.carousel().is_none());
    assert!(page.is_mobile());

    page.handle(PageEvent::Key(Key::ArrowRight));
    assert!(active(&page, nth(&page, "portfolio-item", 0)));

    let label = nth(&page, "portfolio-label", 2);
    page.handle(PageEvent::Click { target: label });
    assert!(active(&page, nth(&page, "portfolio-item", 2)));
    assert!(!active(&page, nth(&page, "portfolio-item", 0)));
    assert!(active(&page, label));
}

#[test]
fn resize_bursts_settle_once() {
    let mut page = desktop();
    page.window_mut().width = 500.0;
    page.handle(PageEvent::Resize);
    page.advance(Duration::from_millis(200));
    page.handle(PageEvent::Resize);
    page.advance(Duration::from_millis(200));
    assert!(page.carousel().is_some());
    page.advance(Duration::from_millis(50));
    assert!(page.carousel().is_none());
}

#[test]
fn desktop_resize_restarts_at_the_first_slide() {
    let mut page = desktop();
    page.handle(PageEvent::Key(Key::ArrowRight));
    assert_eq!(page.carousel().unwrap().current(), 1);

    page.window_mut().width = 1280.0;
    page.handle(PageEvent::Resize);
    page.advance(Duration::from_millis(250));
    assert_eq!(page.carousel().unwrap().current(), 0);
    assert!(active(&page, nth(&page, "portfolio-item", 0)));
    assert!(!active(&page, nth(&page, "portfolio-item", 1)));
}

#[test]
fn growing_back_to_desktop_remounts_at_the_first_slide() {
    let mut page = page_at(500.0, MemoryStore::new());
    page.advance(Duration::from_millis(100));
    assert!(page.carousel().is_none());

    page.window_mut().width = 1280.0;
    page.handle(PageEvent::Resize);
    page.advance(Duration::from_millis(250));
    assert_eq!(page.carousel().map(|c| c.current()), Some(0));
}

// ───────────────────────────────────────── theme ─────────────

#[test]
fn theme_toggle_flips_and_persists() {
    let mut page = desktop();
    assert_eq!(page.theme(), Theme::Light);
    let toggle = id(&page, "theme-toggle");
    page.handle(PageEvent::Click { target: toggle });

    let root = page.dom().root();
    assert!(page.dom().has_class(root, DARK_CLASS));
    assert_eq!(page.theme(), Theme::Dark);
    assert_eq!(page.prefs().get(THEME_KEY).unwrap().as_deref(), Some("dark"));
}

#[test]
fn stored_dark_theme_applies_on_mount() {
    let page = page_at(1024.0, MemoryStore::new().with(THEME_KEY, "dark"));
    let root = page.dom().root();
    assert!(page.dom().has_class(root, DARK_CLASS));
    let icon = id(&page, "theme-icon");
    assert_eq!(page.dom().attr(icon, "src").as_deref(), Some(Theme::Dark.icon_src()));
}

// ───────────────────────────────────────── navigation ────────

#[test]
fn menu_links_scroll_and_highlight() {
    let mut page = desktop();
    let work_link = page
        .dom()
        .find_all(&Selector::tag("a"))
        .into_iter()
        .find(|&a| page.dom().attr(a, "href").as_deref() == Some("#work"))
        .unwrap();

    let outcome = page.handle(PageEvent::Click { target: work_link });
    assert_eq!(outcome, Outcome::PreventDefault);
    assert_eq!(page.window().scroll_y(), 520.0);

    page.handle(PageEvent::Scroll);
    assert!(active(&page, work_link));
    let navbar = page.dom().find(&Selector::class("navbar")).unwrap();
    assert_ne!(page.dom().style(navbar, "box-shadow").as_deref(), Some("none"));
}

#[test]
fn scrolling_reveals_the_stats() {
    let mut page = desktop();
    let tile = nth(&page, "stat-item", 0);
    assert_eq!(page.dom().style(tile, "opacity").as_deref(), Some("0"));

    page.window_mut().scroll_to(1000.0);
    page.handle(PageEvent::Scroll);
    assert_eq!(page.dom().style(tile, "opacity").as_deref(), Some("1"));
}

// ───────────────────────────────────────── contact ───────────

#[test]
fn contact_modal_opens_and_closes() {
    let mut page = desktop();
    let trigger = id(&page, "contact-trigger");
    assert_eq!(page.handle(PageEvent::Click { target: trigger }), Outcome::PreventDefault);
    assert!(page.is_modal_open());
    let body = page.dom().body();
    assert_eq!(page.dom().style(body, "overflow").as_deref(), Some("hidden"));

    let shown = page
        .dom()
        .find_all(&Selector::class("fun-fact-text"))
        .into_iter()
        .filter(|&f| page.dom().style(f, "display").as_deref() == Some("block"))
        .count();
    assert_eq!(shown, 1);

    page.handle(PageEvent::Key(Key::Escape));
    assert!(!page.is_modal_open());
    assert_eq!(page.dom().style(body, "overflow"), None);
}

#[test]
fn submitting_hands_off_to_the_mail_client() {
    let mut page = desktop();
    let trigger = id(&page, "contact-trigger");
    page.handle(PageEvent::Click { target: trigger });

    let values = ["Ana", "ana@example.com", "Recruiter", "", "Hello there"];
    for (field, value) in FIELD_IDS.iter().zip(values) {
        let el = id(&page, field);
        page.dom_mut().set_value(el, value);
    }
    let form = page.modal().unwrap().form_element().unwrap();
    assert_eq!(page.handle(PageEvent::Submit { form }), Outcome::PreventDefault);

    let url = &page.window().navigations[0];
    assert!(url.starts_with("mailto:cykdesignworks@gmail.com?subject=Contact%20from%20Ana"));
    assert!(url.contains("Hello%20there"));
    assert_eq!(page.window().alerts, vec![THANK_YOU.to_string()]);
    assert!(!page.is_modal_open());
    for field in FIELD_IDS {
        assert_eq!(page.dom().value(id(&page, field)), "");
    }
}

// ───────────────────────────────────────── about ─────────────

#[test]
fn coffee_counter_lands_on_target_and_year_is_stamped() {
    let mut page = desktop();
    assert_eq!(page.dom().text(id(&page, "year")), "2026");
    page.advance(Duration::from_secs(3));
    assert_eq!(page.dom().text(id(&page, "coffee-counter")), "701+");
}

#[test]
fn degenerate_timings_still_advance() {
    let config = PageConfig {
        titles: vec!["Hi".into(), "Yo".into()],
        type_speed_ms: 0,
        delete_speed_ms: 0,
        hold_ms: 0,
        gap_ms: 0,
        typing_start_delay_ms: 0,
        counter_duration_ms: 5,
        counter_frame_ms: 16,
        ..PageConfig::default()
    };
    let mut page = Page::new_on(
        sample_document(),
        MemoryWindow::new(1024.0, 800.0),
        MemoryStore::new(),
        config,
        NaiveDate::from_ymd_opt(2026, 6, 1).unwrap(),
    );

    let mut seen = Vec::new();
    for _ in 0..40 {
        page.advance(Duration::from_millis(1));
        seen.push(page.dom().text(id(&page, "typing-text")));
    }
    assert!(seen.iter().any(|t| t == "Hi"));
    assert!(seen.iter().any(|t| t == "Yo"));

    page.advance(Duration::from_secs(1));
    assert_eq!(page.now(), Duration::from_millis(1040));
    assert_eq!(page.dom().text(id(&page, "coffee-counter")), "701+");
}

#[test]
fn mobile_stat_notes_close_themselves() {
    let mut page = page_at(500.0, MemoryStore::new());
    let tile = nth(&page, "stat-item", 1);
    page.handle(PageEvent::Click { target: tile });
    assert!(active(&page, tile));
    page.advance(Duration::from_millis(4999));
    assert!(active(&page, tile));
    page.advance(Duration::from_millis(1));
    assert!(!active(&page, tile));
}

#[test]
fn desktop_hover_shows_the_tooltip() {
    let mut page = desktop();
    let tile = nth(&page, "stat-item", 0);
    let tooltip = page.dom().find(&Selector::class("stat-tooltip")).unwrap();

    page.handle(PageEvent::MouseEnter { target: tile });
    page.handle(PageEvent::MouseMove { target: tile, x: 40.0, y: 60.0 });
    assert!(page.dom().has_class(tooltip, "visible"));
    assert_eq!(page.dom().style(tooltip, "left").as_deref(), Some("55px"));

    page.handle(PageEvent::MouseLeave { target: tile });
    assert!(!page.dom().has_class(tooltip, "visible"));
}
