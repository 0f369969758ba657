//! Contact modal and its mailto form.
//!
//! There is no backend: submitting the form composes a `mailto:` URL and
//! hands it to the window, which opens the visitor's mail client.

use tracing::debug;

use super::dom::{Dom, ElementId, Selector, Window};

const ACTIVE: &str = "active";
const DEFAULT_SUBJECT: &str = "Portfolio Inquiry";
pub const THANK_YOU: &str =
    "Thank you for your message! Your email client will open to send the message.";

// ───────────────────────────────────────── message ───────────

/// The five contact-form fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub you_are: String,
    pub subject: String,
    pub message: String,
}

impl ContactMessage {
    /// Mail subject line; an empty subject falls back to a generic one.
    pub fn subject_line(&self) -> String {
        let subject = if self.subject.is_empty() {
            DEFAULT_SUBJECT
        } else {
            &self.subject
        };
        format!("Contact from {} - {}", self.name, subject)
    }

    pub fn body(&self) -> String {
        format!(
            "Name: {}\nEmail: {}\nYou are: {}\nSubject: {}\n\nMessage:\n{}",
            self.name, self.email, self.you_are, self.subject, self.message
        )
    }

    pub fn mailto(&self, address: &str) -> String {
        format!(
            "mailto:{address}?subject={}&body={}",
            urlencoding::encode(&self.subject_line()),
            urlencoding::encode(&self.body()),
        )
    }
}

// ───────────────────────────────────────── form ──────────────

#[derive(Debug)]
struct ContactForm {
    form: ElementId,
    /// name, email, you-are, subject, message; any may be missing.
    fields: [Option<ElementId>; 5],
}

/// Contact form control ids, in [`ContactMessage`] field order.
pub const FIELD_IDS: [&str; 5] = [
    "modal-name",
    "modal-email",
    "modal-you-are",
    "modal-subject",
    "modal-message",
];

impl ContactForm {
    fn read<D: Dom>(&self, dom: &D) -> ContactMessage {
        let [name, email, you_are, subject, message] =
            self.fields.map(|f| f.map(|el| dom.value(el)).unwrap_or_default());
        ContactMessage {
            name,
            email,
            you_are,
            subject,
            message,
        }
    }

    fn reset<D: Dom>(&self, dom: &mut D) {
        for el in self.fields.iter().flatten() {
            dom.set_value(*el, "");
        }
    }
}

// ───────────────────────────────────────── modal ─────────────

#[derive(Debug)]
pub struct ContactModal {
    modal: ElementId,
    triggers: Vec<ElementId>,
    closers: Vec<ElementId>,
    fun_facts: Vec<ElementId>,
    form: Option<ContactForm>,
    address: String,
}

impl ContactModal {
    /// Bind `#contact-modal`, its triggers, close controls and form.
    pub fn mount<D: Dom>(dom: &D, address: &str) -> Option<Self> {
        let modal = dom.find(&Selector::id("contact-modal"))?;
        let triggers = ["contact-trigger", "contact-trigger-mobile"]
            .into_iter()
            .filter_map(|id| dom.find(&Selector::id(id)))
            .collect();
        let closers = ["modal-close", "modal-overlay"]
            .into_iter()
            .filter_map(|class| dom.find_within(modal, &Selector::class(class)).first().copied())
            .collect();
        let form = dom
            .find_within(modal, &Selector::class("contact-form"))
            .first()
            .map(|&form| ContactForm {
                form,
                fields: FIELD_IDS.map(|id| dom.find(&Selector::id(id))),
            });
        if form.is_none() {
            debug!("contact modal has no form");
        }
        Some(Self {
            modal,
            triggers,
            closers,
            fun_facts: dom.find_all(&Selector::class("fun-fact-text")),
            form,
            address: address.to_string(),
        })
    }

    pub fn element(&self) -> ElementId {
        self.modal
    }

    pub fn form_element(&self) -> Option<ElementId> {
        self.form.as_ref().map(|f| f.form)
    }

    pub fn is_open<D: Dom>(&self, dom: &D) -> bool {
        dom.has_class(self.modal, ACTIVE)
    }

    pub fn open<D: Dom, W: Window>(&self, dom: &mut D, window: &mut W) {
        dom.add_class(self.modal, ACTIVE);
        let body = dom.body();
        dom.set_style(body, "overflow", "hidden");
        self.show_random_fun_fact(dom, window);
    }

    pub fn close<D: Dom>(&self, dom: &mut D) {
        dom.remove_class(self.modal, ACTIVE);
        let body = dom.body();
        dom.set_style(body, "overflow", "");
    }

    /// Open on a trigger, close on the close button or overlay.  Returns
    /// whether the click was the modal's.
    pub fn on_click<D: Dom, W: Window>(&self, dom: &mut D, window: &mut W, target: ElementId) -> bool {
        if self.triggers.iter().any(|&t| dom.contains(t, target)) {
            self.open(dom, window);
            true
        } else if self.closers.iter().any(|&c| dom.contains(c, target)) {
            self.close(dom);
            true
        } else {
            false
        }
    }

    /// `Escape` closes an open modal.
    pub fn on_escape<D: Dom>(&self, dom: &mut D) -> bool {
        if self.is_open(dom) {
            self.close(dom);
            return true;
        }
        false
    }

    /// Compose the mailto link for `form` and hand it off.  Returns the
    /// message that was sent, or `None` if `form` is not the contact form.
    pub fn on_submit<D: Dom, W: Window>(
        &self,
        dom: &mut D,
        window: &mut W,
        form: ElementId,
    ) -> Option<ContactMessage> {
        let contact = self.form.as_ref().filter(|f| f.form == form)?;
        let message = contact.read(dom);
        window.navigate(&message.mailto(&self.address));
        window.alert(THANK_YOU);
        contact.reset(dom);
        self.close(dom);
        Some(message)
    }

    fn show_random_fun_fact<D: Dom, W: Window>(&self, dom: &mut D, window: &mut W) {
        if self.fun_facts.is_empty() {
            return;
        }
        let pick = window.random_index(self.fun_facts.len());
        for (i, &fact) in self.fun_facts.iter().enumerate() {
            dom.set_style(fact, "display", if i == pick { "block" } else { "none" });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::memory::{MemoryDom, MemoryWindow};

    #[test]
    fn mailto_encodes_subject_and_body() {
        let msg = ContactMessage {
            name: "Ana Lima".into(),
            email: "ana@example.com".into(),
            you_are: "Recruiter".into(),
            subject: String::new(),
            message: "Hi & bye".into(),
        };
        let url = msg.mailto("me@example.com");
        assert!(url.starts_with(
            "mailto:me@example.com?subject=Contact%20from%20Ana%20Lima%20-%20Portfolio%20Inquiry&body="
        ));
        assert!(url.contains("Hi%20%26%20bye"));
        assert!(url.contains("Name%3A%20Ana%20Lima%0AEmail"));
    }

    fn doc() -> (MemoryDom, ElementId, ElementId, ElementId, ElementId) {
        let mut dom = MemoryDom::new();
        let body = dom.body();
        let trigger = dom.append(body, "a").id("contact-trigger").attr("href", "#contact").done();
        let modal = dom.append(body, "div").id("contact-modal").done();
        let overlay = dom.append(modal, "div").class("modal-overlay").done();
        let form = dom.append(modal, "form").class("contact-form").done();
        for id in FIELD_IDS {
            dom.append(form, "input").id(id);
        }
        for fact in ["a", "b", "c"] {
            dom.append(modal, "p").class("fun-fact-text").text(fact);
        }
        (dom, trigger, modal, overlay, form)
    }

    #[test]
    fn open_shows_exactly_one_fun_fact() {
        let (mut dom, trigger, modal, _, _) = doc();
        let mut win = MemoryWindow::new(1280.0, 800.0);
        let m = ContactModal::mount(&dom, "me@example.com").unwrap();
        assert!(m.on_click(&mut dom, &mut win, trigger));
        assert!(dom.has_class(modal, ACTIVE));
        assert_eq!(dom.style(dom.body(), "overflow").as_deref(), Some("hidden"));
        let shown = dom
            .find_all(&Selector::class("fun-fact-text"))
            .into_iter()
            .filter(|&f| dom.style(f, "display").as_deref() == Some("block"))
            .count();
        assert_eq!(shown, 1);
    }

    #[test]
    fn overlay_and_escape_close() {
        let (mut dom, trigger, modal, overlay, _) = doc();
        let mut win = MemoryWindow::new(1280.0, 800.0);
        let m = ContactModal::mount(&dom, "me@example.com").unwrap();
        m.on_click(&mut dom, &mut win, trigger);
        assert!(m.on_click(&mut dom, &mut win, overlay));
        assert!(!dom.has_class(modal, ACTIVE));
        assert_eq!(dom.style(dom.body(), "overflow"), None);

        assert!(!m.on_escape(&mut dom));
        m.on_click(&mut dom, &mut win, trigger);
        assert!(m.on_escape(&mut dom));
        assert!(!m.is_open(&dom));
    }

    #[test]
    fn submit_navigates_alerts_and_resets() {
        let (mut dom, trigger, _, _, form) = doc();
        let mut win = MemoryWindow::new(1280.0, 800.0);
        let m = ContactModal::mount(&dom, "me@example.com").unwrap();
        m.on_click(&mut dom, &mut win, trigger);
        let name = dom.find(&Selector::id("modal-name")).unwrap();
        dom.set_value(name, "Bo");

        let sent = m.on_submit(&mut dom, &mut win, form).unwrap();
        assert_eq!(sent.name, "Bo");
        assert_eq!(win.navigations.len(), 1);
        assert_eq!(win.alerts, vec![THANK_YOU.to_string()]);
        assert_eq!(dom.value(name), "");
        assert!(!m.is_open(&dom));
    }

    #[test]
    fn submit_of_another_form_is_ignored() {
        let (mut dom, _, _, _, _) = doc();
        let mut win = MemoryWindow::new(1280.0, 800.0);
        let m = ContactModal::mount(&dom, "me@example.com").unwrap();
        let body = dom.body();
        assert!(m.on_submit(&mut dom, &mut win, body).is_none());
        assert!(win.navigations.is_empty());
    }
}
