//! A complete portfolio document built in memory.
//!
//! Mirrors the markup the page script expects: navbar and menu, hero with
//! the typing target, project carousel (labels, slides, indicators), stat
//! tiles, contact modal and footer.  The terminal preview renders it and
//! the integration tests drive it.

use super::dom::{Dom, ElementId};
use super::memory::MemoryDom;

/// One carousel slide.
#[derive(Debug, Clone, Copy)]
pub struct Project {
    pub title: &'static str,
    pub blurb: &'static str,
}

pub const SAMPLE_PROJECTS: &[Project] = &[
    Project {
        title: "Checkout Redesign",
        blurb: "Cut drop-off in the payment step by a third.",
    },
    Project {
        title: "Onboarding Flows",
        blurb: "Guided first-run experience for a B2B dashboard.",
    },
    Project {
        title: "Design System",
        blurb: "Tokens, components and docs shared by four product teams.",
    },
];

/// (value, label, note).  The `None` value marks the coffee counter tile.
const STATS: &[(Option<&str>, &str, &str)] = &[
    (Some("8+"), "Years", "Shipping products since 2018."),
    (Some("40+"), "Launches", "From zero-to-one bets to redesigns."),
    (None, "Liters of coffee", "One cup a day, every day."),
];

const FUN_FACTS: &[&str] = &[
    "I sketch every interface on paper first.",
    "My first design tool was MS Paint.",
    "I have opinions about kerning.",
];

/// The sample document with [`SAMPLE_PROJECTS`].
pub fn sample_document() -> MemoryDom {
    portfolio_document(SAMPLE_PROJECTS)
}

/// Build the portfolio markup with one slide per project.
pub fn portfolio_document(projects: &[Project]) -> MemoryDom {
    let mut dom = MemoryDom::new();
    let body = dom.body();

    // ── navbar ────────────────────────────────────────────────
    let navbar = dom.append(body, "nav").class("navbar").geometry(0.0, 64.0).done();
    let menu = dom.append(navbar, "ul").class("nav-menu").done();
    for (href, text) in [("#home", "Home"), ("#work", "Work"), ("#about", "About")] {
        dom.append(menu, "a").attr("href", href).text(text);
    }
    dom.append(menu, "a")
        .id("contact-trigger")
        .attr("href", "#contact")
        .text("Contact");
    dom.append(navbar, "a")
        .id("contact-trigger-mobile")
        .attr("href", "#contact")
        .text("✉");
    let toggle = dom.append(navbar, "button").id("theme-toggle").done();
    dom.append(toggle, "img").id("theme-icon");

    // ── hero ──────────────────────────────────────────────────
    let hero = dom.append(body, "section").id("home").geometry(64.0, 536.0).done();
    dom.append(hero, "h1").text("Hi, I'm a ");
    dom.append(hero, "span").id("typing-text");
    dom.append(hero, "span").class("typing-cursor").text("|");

    // ── work ──────────────────────────────────────────────────
    let work = dom.append(body, "section").id("work").geometry(600.0, 800.0).done();
    let strip = dom.append(work, "div").class("portfolio-labels").done();
    for project in projects {
        dom.append(strip, "button").class("portfolio-label").text(project.title);
    }
    let grid = dom
        .append(work, "div")
        .class("portfolio-grid")
        .geometry(680.0, 560.0)
        .done();
    for project in projects {
        let item = dom
            .append(grid, "article")
            .class("portfolio-item")
            .geometry(680.0, 560.0)
            .done();
        dom.append(item, "h3").class("portfolio-title").text(project.title);
        dom.append(item, "p").class("portfolio-blurb").text(project.blurb);
    }
    let dots = dom.append(work, "div").class("portfolio-indicators").done();
    for _ in projects {
        dom.append(dots, "span").class("portfolio-indicator");
    }

    // ── about / stats ─────────────────────────────────────────
    let about = dom.append(body, "section").id("about").geometry(1400.0, 600.0).done();
    let stats = dom.append(about, "div").class("stats").done();
    for (i, (value, label, note)) in STATS.iter().enumerate() {
        let tile = dom
            .append(stats, "div")
            .class("stat-item")
            .geometry(1480.0 + 160.0 * i as f64, 140.0)
            .done();
        let value_el = dom.append(tile, "span").class("stat-value").done();
        match value {
            Some(v) => dom.set_text(value_el, v),
            None => dom.set_attr(value_el, "id", "coffee-counter"),
        }
        dom.append(tile, "span").class("stat-label").text(label);
        dom.append(tile, "p").class("stat-note").text(note);
    }

    // ── contact modal ─────────────────────────────────────────
    let modal = dom.append(body, "div").id("contact-modal").done();
    dom.append(modal, "div").class("modal-overlay");
    let content = dom.append(modal, "div").class("modal-content").done();
    dom.append(content, "button").class("modal-close").text("×");
    for fact in FUN_FACTS {
        dom.append(content, "p").class("fun-fact-text").text(fact);
    }
    let form = dom.append(content, "form").class("contact-form").done();
    for (tag, id) in [
        ("input", "modal-name"),
        ("input", "modal-email"),
        ("select", "modal-you-are"),
        ("input", "modal-subject"),
        ("textarea", "modal-message"),
    ] {
        dom.append(form, tag).id(id);
    }

    // ── footer ────────────────────────────────────────────────
    let footer = dom.append(body, "footer").geometry(2000.0, 120.0).done();
    dom.append(footer, "span").text("© ");
    dom.append(footer, "span").id("year");

    dom
}

/// Convenience for hosts: the element with `id`, if any.
pub fn by_id(dom: &MemoryDom, id: &str) -> Option<ElementId> {
    dom.find(&super::dom::Selector::id(id))
}
