//! Browser backend (feature `web`).
//!
//! [`WebDom`] and [`WebWindow`] implement the page's capability traits on
//! top of `web-sys`, [`LocalStorage`] persists the theme, and [`mount`]
//! wires native events to a [`Page`] and drives its timers from
//! `setInterval`.  Event closures are leaked on purpose: they live as long
//! as the page does.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use js_sys::Map;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Document, Element, Event, EventTarget, HtmlElement, HtmlInputElement, HtmlSelectElement,
    HtmlTextAreaElement, KeyboardEvent, MouseEvent, Node, NodeList, TouchEvent,
};

use crate::config::PageConfig;
use crate::core::dom::{chained_offset, Dom, ElementId, Selector, Window};
use crate::core::page::{Key, Outcome, Page, PageEvent};
use crate::error::{FolioError, Result};
use crate::prefs::PreferenceStore;

/// Timer pump period (one display frame).
const PUMP_MS: i32 = 16;

fn js_err(e: JsValue) -> FolioError {
    FolioError::Js(format!("{e:?}"))
}

// ───────────────────────────────────────── document ──────────

/// Live DOM.  Elements get a stable [`ElementId`] the first time the page
/// sees them.
pub struct WebDom {
    document: Document,
    table: RefCell<Vec<Element>>,
    /// Element object to its index in `table`; a JS `Map` keys on identity.
    index: Map,
}

impl WebDom {
    pub fn new(document: Document) -> Result<Self> {
        let root = document
            .document_element()
            .ok_or_else(|| FolioError::Js("document has no root element".into()))?;
        let body: Element = document
            .body()
            .ok_or_else(|| FolioError::Js("document has no body".into()))?
            .into();
        let dom = Self {
            document,
            table: RefCell::new(Vec::new()),
            index: Map::new(),
        };
        dom.intern(&root);
        dom.intern(&body);
        Ok(dom)
    }

    /// Handle for `el`, registering it on first sight.
    pub fn intern(&self, el: &Element) -> ElementId {
        if let Some(id) = self.index.get(el).as_f64() {
            return id as ElementId;
        }
        let mut table = self.table.borrow_mut();
        let id = table.len();
        table.push(el.clone());
        self.index.set(el, &JsValue::from_f64(id as f64));
        id
    }

    pub fn element(&self, id: ElementId) -> Option<Element> {
        self.table.borrow().get(id).cloned()
    }

    fn html(&self, id: ElementId) -> Option<HtmlElement> {
        self.element(id)?.dyn_into::<HtmlElement>().ok()
    }

    fn collect(&self, list: NodeList) -> Vec<ElementId> {
        (0..list.length())
            .filter_map(|i| list.get(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .map(|el| self.intern(&el))
            .collect()
    }
}

impl Dom for WebDom {
    fn find_all(&self, selector: &Selector) -> Vec<ElementId> {
        match self.document.query_selector_all(&selector.to_string()) {
            Ok(list) => self.collect(list),
            Err(_) => Vec::new(),
        }
    }

    fn find_within(&self, scope: ElementId, selector: &Selector) -> Vec<ElementId> {
        self.element(scope)
            .and_then(|el| el.query_selector_all(&selector.to_string()).ok())
            .map(|list| self.collect(list))
            .unwrap_or_default()
    }

    fn root(&self) -> ElementId {
        0
    }

    fn body(&self) -> ElementId {
        1
    }

    fn contains(&self, ancestor: ElementId, el: ElementId) -> bool {
        match (self.element(ancestor), self.element(el)) {
            (Some(a), Some(e)) => {
                let node: &Node = e.as_ref();
                a.contains(Some(node))
            }
            _ => false,
        }
    }

    fn create_element(&mut self, tag: &str) -> ElementId {
        match self.document.create_element(tag) {
            Ok(el) => self.intern(&el),
            // Invalid tag names are a programming error on our side; hand
            // back the body so callers stay total.
            Err(_) => self.body(),
        }
    }

    fn append_child(&mut self, parent: ElementId, child: ElementId) {
        if let (Some(p), Some(c)) = (self.element(parent), self.element(child)) {
            let _ = p.append_child(&c);
        }
    }

    fn has_class(&self, el: ElementId, class: &str) -> bool {
        self.element(el).is_some_and(|e| e.class_list().contains(class))
    }

    fn add_class(&mut self, el: ElementId, class: &str) {
        if let Some(e) = self.element(el) {
            let _ = e.class_list().add_1(class);
        }
    }

    fn remove_class(&mut self, el: ElementId, class: &str) {
        if let Some(e) = self.element(el) {
            let _ = e.class_list().remove_1(class);
        }
    }

    fn text(&self, el: ElementId) -> String {
        self.element(el)
            .and_then(|e| e.text_content())
            .unwrap_or_default()
    }

    fn set_text(&mut self, el: ElementId, text: &str) {
        if let Some(e) = self.element(el) {
            e.set_text_content(Some(text));
        }
    }

    fn attr(&self, el: ElementId, name: &str) -> Option<String> {
        self.element(el)?.get_attribute(name)
    }

    fn set_attr(&mut self, el: ElementId, name: &str, value: &str) {
        if let Some(e) = self.element(el) {
            let _ = e.set_attribute(name, value);
        }
    }

    fn style(&self, el: ElementId, property: &str) -> Option<String> {
        let value = self.html(el)?.style().get_property_value(property).ok()?;
        (!value.is_empty()).then_some(value)
    }

    fn set_style(&mut self, el: ElementId, property: &str, value: &str) {
        if let Some(e) = self.html(el) {
            let style = e.style();
            let _ = if value.is_empty() {
                style.remove_property(property).map(drop)
            } else {
                style.set_property(property, value)
            };
        }
    }

    fn value(&self, el: ElementId) -> String {
        let Some(e) = self.element(el) else {
            return String::new();
        };
        if let Some(input) = e.dyn_ref::<HtmlInputElement>() {
            input.value()
        } else if let Some(area) = e.dyn_ref::<HtmlTextAreaElement>() {
            area.value()
        } else if let Some(select) = e.dyn_ref::<HtmlSelectElement>() {
            select.value()
        } else {
            String::new()
        }
    }

    fn set_value(&mut self, el: ElementId, value: &str) {
        let Some(e) = self.element(el) else {
            return;
        };
        if let Some(input) = e.dyn_ref::<HtmlInputElement>() {
            input.set_value(value);
        } else if let Some(area) = e.dyn_ref::<HtmlTextAreaElement>() {
            area.set_value(value);
        } else if let Some(select) = e.dyn_ref::<HtmlSelectElement>() {
            select.set_value(value);
        }
    }

    /// `offsetTop` is relative to the offset parent; walk up to the document.
    fn offset_top(&self, el: ElementId) -> f64 {
        self.html(el).map_or(0.0, |e| {
            chained_offset(e, |e| {
                let parent = e.offset_parent().and_then(|p| p.dyn_into::<HtmlElement>().ok());
                (e.offset_top() as f64, parent)
            })
        })
    }

    fn height(&self, el: ElementId) -> f64 {
        self.html(el).map_or(0.0, |e| e.offset_height() as f64)
    }
}

// ───────────────────────────────────────── window ────────────

pub struct WebWindow {
    window: web_sys::Window,
}

impl WebWindow {
    pub fn new(window: web_sys::Window) -> Self {
        Self { window }
    }
}

impl Window for WebWindow {
    fn inner_width(&self) -> f64 {
        self.window
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0)
    }

    fn inner_height(&self) -> f64 {
        self.window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0)
    }

    fn scroll_y(&self) -> f64 {
        self.window.scroll_y().unwrap_or(0.0)
    }

    fn scroll_to(&mut self, top: f64) {
        let options = web_sys::ScrollToOptions::new();
        options.set_top(top);
        options.set_behavior(web_sys::ScrollBehavior::Smooth);
        self.window.scroll_to_with_scroll_to_options(&options);
    }

    fn navigate(&mut self, url: &str) {
        let _ = self.window.location().set_href(url);
    }

    fn alert(&mut self, message: &str) {
        let _ = self.window.alert_with_message(message);
    }

    fn random_index(&mut self, len: usize) -> usize {
        ((js_sys::Math::random() * len as f64) as usize).min(len.saturating_sub(1))
    }
}

// ───────────────────────────────────────── storage ───────────

/// `window.localStorage`.  Browsers may refuse access (private mode,
/// disabled storage); every call then fails with [`FolioError::Preference`].
pub struct LocalStorage {
    storage: Option<web_sys::Storage>,
}

impl LocalStorage {
    pub fn new(window: &web_sys::Window) -> Self {
        Self {
            storage: window.local_storage().ok().flatten(),
        }
    }

    fn storage(&self) -> Result<&web_sys::Storage> {
        self.storage
            .as_ref()
            .ok_or_else(|| FolioError::Preference("localStorage unavailable".into()))
    }
}

impl PreferenceStore for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.storage()?
            .get_item(key)
            .map_err(|e| FolioError::Preference(format!("{e:?}")))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.storage()?
            .set_item(key, value)
            .map_err(|e| FolioError::Preference(format!("{e:?}")))
    }
}

// ───────────────────────────────────────── wiring ────────────

pub type WebPage = Page<WebDom, WebWindow, LocalStorage>;

fn listen<T, F>(target: &T, kind: &str, handler: F) -> Result<()>
where
    T: AsRef<EventTarget>,
    F: FnMut(Event) + 'static,
{
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    target
        .as_ref()
        .add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())
        .map_err(js_err)?;
    closure.forget();
    Ok(())
}

fn target_of(page: &RefCell<WebPage>, event: &Event) -> Option<ElementId> {
    let el = event.target()?.dyn_into::<Element>().ok()?;
    Some(page.borrow().dom().intern(&el))
}

fn first_touch_x(event: &Event) -> Option<f64> {
    let touch = event.dyn_ref::<TouchEvent>()?.changed_touches().get(0)?;
    Some(touch.screen_x() as f64)
}

/// Mount the page on the current document and start its timer pump.
pub fn mount(config: PageConfig) -> Result<Rc<RefCell<WebPage>>> {
    let window = web_sys::window().ok_or_else(|| FolioError::Js("no window".into()))?;
    let document = window
        .document()
        .ok_or_else(|| FolioError::Js("no document".into()))?;

    let page = Rc::new(RefCell::new(Page::new(
        WebDom::new(document.clone())?,
        WebWindow::new(window.clone()),
        LocalStorage::new(&window),
        config,
    )));

    let p = Rc::clone(&page);
    listen(&document, "click", move |event| {
        if let Some(target) = target_of(&p, &event) {
            if p.borrow_mut().handle(PageEvent::Click { target }) == Outcome::PreventDefault {
                event.prevent_default();
            }
        }
    })?;

    let p = Rc::clone(&page);
    listen(&document, "keydown", move |event| {
        if let Some(key) = event.dyn_ref::<KeyboardEvent>() {
            p.borrow_mut()
                .handle(PageEvent::Key(Key::from_dom_key(&key.key())));
        }
    })?;

    for (kind, start) in [("touchstart", true), ("touchend", false)] {
        let p = Rc::clone(&page);
        listen(&document, kind, move |event| {
            let (Some(target), Some(x)) = (target_of(&p, &event), first_touch_x(&event)) else {
                return;
            };
            let ev = if start {
                PageEvent::TouchStart { target, x }
            } else {
                PageEvent::TouchEnd { target, x }
            };
            p.borrow_mut().handle(ev);
        })?;
    }

    let p = Rc::clone(&page);
    listen(&document, "submit", move |event| {
        if let Some(form) = target_of(&p, &event) {
            if p.borrow_mut().handle(PageEvent::Submit { form }) == Outcome::PreventDefault {
                event.prevent_default();
            }
        }
    })?;

    let p = Rc::clone(&page);
    listen(&window, "scroll", move |_| {
        p.borrow_mut().handle(PageEvent::Scroll);
    })?;

    let p = Rc::clone(&page);
    listen(&window, "resize", move |_| {
        p.borrow_mut().handle(PageEvent::Resize);
    })?;

    // mouseenter/mouseleave do not bubble; bind them per tile.
    let tiles = page.borrow().dom().find_all(&Selector::class("stat-item"));
    for tile in tiles {
        let Some(el) = page.borrow().dom().element(tile) else {
            continue;
        };
        let p = Rc::clone(&page);
        listen(&el, "mouseenter", move |_| {
            p.borrow_mut().handle(PageEvent::MouseEnter { target: tile });
        })?;
        let p = Rc::clone(&page);
        listen(&el, "mousemove", move |event| {
            if let Some(m) = event.dyn_ref::<MouseEvent>() {
                p.borrow_mut().handle(PageEvent::MouseMove {
                    target: tile,
                    x: m.client_x() as f64,
                    y: m.client_y() as f64,
                });
            }
        })?;
        let p = Rc::clone(&page);
        listen(&el, "mouseleave", move |_| {
            p.borrow_mut().handle(PageEvent::MouseLeave { target: tile });
        })?;
    }

    let p = Rc::clone(&page);
    let started = js_sys::Date::now();
    let pump = Closure::<dyn FnMut()>::new(move || {
        let elapsed = (js_sys::Date::now() - started).max(0.0);
        p.borrow_mut().advance_to(Duration::from_secs_f64(elapsed / 1000.0));
    });
    window
        .set_interval_with_callback_and_timeout_and_arguments_0(
            pump.as_ref().unchecked_ref(),
            PUMP_MS,
        )
        .map_err(js_err)?;
    pump.forget();

    Ok(page)
}

/// JS entry point: mount with the default configuration.
#[wasm_bindgen(js_name = mountPortfolio)]
pub fn mount_portfolio() -> std::result::Result<(), JsValue> {
    mount(PageConfig::default())
        .map(drop)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn document() -> Document {
        web_sys::window()
            .and_then(|w| w.document())
            .expect("browser document")
    }

    fn div(doc: &Document, parent: &Node, style: &str) -> Element {
        let el = doc.create_element("div").expect("create div");
        el.set_attribute("style", style).expect("style");
        parent.append_child(&el).expect("append");
        el
    }

    #[wasm_bindgen_test]
    fn nested_offsets_measure_from_the_document() {
        let doc = document();
        let body: Node = doc.body().expect("body").into();
        let grid = div(&doc, &body, "position: relative; margin-top: 1400px; height: 400px");
        let tile = div(&doc, grid.as_ref(), "position: absolute; top: 100px; height: 50px");

        let dom = WebDom::new(doc).expect("dom");
        let id = dom.intern(&tile);
        let local = tile.dyn_ref::<HtmlElement>().expect("html").offset_top() as f64;
        assert_eq!(local, 100.0);
        assert!(dom.offset_top(id) >= 1500.0);
        grid.remove();
    }

    #[wasm_bindgen_test]
    fn interning_is_stable_per_element() {
        let doc = document();
        let body: Node = doc.body().expect("body").into();
        let a = div(&doc, &body, "");
        let b = div(&doc, &body, "");

        let dom = WebDom::new(doc).expect("dom");
        let ia = dom.intern(&a);
        let ib = dom.intern(&b);
        assert_ne!(ia, ib);
        assert_eq!(dom.intern(&a), ia);
        assert_eq!(dom.element(ib).as_ref(), Some(&b));
        assert_eq!(dom.body(), 1);
        a.remove();
        b.remove();
    }
}
