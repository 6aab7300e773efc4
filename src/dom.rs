use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Event listener that unregisters itself when dropped. Components keep
/// these instead of leaking closures onto the page.
pub struct Listener {
    target: web::EventTarget,
    event: &'static str,
    closure: Option<Closure<dyn FnMut(web::Event)>>,
}

impl Listener {
    pub fn new(
        target: &web::EventTarget,
        event: &'static str,
        handler: impl FnMut(web::Event) + 'static,
    ) -> Self {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web::Event)>);
        _ = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
        Self {
            target: target.clone(),
            event,
            closure: Some(closure),
        }
    }

    /// Keep the handler registered for the lifetime of the page.
    pub fn forget(mut self) {
        if let Some(closure) = self.closure.take() {
            closure.forget();
        }
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        if let Some(closure) = self.closure.take() {
            _ = self
                .target
                .remove_event_listener_with_callback(self.event, closure.as_ref().unchecked_ref());
        }
    }
}

/// Click listener on the element with `element_id`, if it exists.
pub fn on_click(
    document: &web::Document,
    element_id: &str,
    mut handler: impl FnMut() + 'static,
) -> Option<Listener> {
    let el = document.get_element_by_id(element_id)?;
    Some(Listener::new(&el, "click", move |_| handler()))
}

/// Click listener on the first descendant of `root` matching `selector`.
pub fn on_click_within(
    root: &web::Element,
    selector: &str,
    mut handler: impl FnMut() + 'static,
) -> Option<Listener> {
    let el = root.query_selector(selector).ok().flatten()?;
    Some(Listener::new(&el, "click", move |_| handler()))
}

pub fn create_element(
    document: &web::Document,
    tag: &str,
    id: Option<&str>,
    class: &str,
) -> Option<web::HtmlElement> {
    let el = document.create_element(tag).ok()?;
    if let Some(id) = id {
        el.set_id(id);
    }
    if !class.is_empty() {
        el.set_class_name(class);
    }
    el.dyn_into::<web::HtmlElement>().ok()
}

/// Create a `<div>` with the given id, class, style and inner HTML and
/// append it to `<body>`.
pub fn append_to_body(
    document: &web::Document,
    id: Option<&str>,
    class: &str,
    style: &str,
    html: &str,
) -> Option<web::HtmlElement> {
    let body = document.body()?;
    let el = create_element(document, "div", id, class)?;
    if !style.is_empty() {
        _ = el.set_attribute("style", style);
    }
    el.set_inner_html(html);
    body.append_child(&el).ok()?;
    Some(el)
}

pub fn remove_by_id(document: &web::Document, id: &str) {
    if let Some(el) = document.get_element_by_id(id) {
        el.remove();
    }
}

pub fn by_id<T: JsCast>(document: &web::Document, id: &str) -> Option<T> {
    document.get_element_by_id(id)?.dyn_into::<T>().ok()
}

pub fn set_text(document: &web::Document, id: &str, text: &str) {
    if let Some(el) = document.get_element_by_id(id) {
        el.set_text_content(Some(text));
    }
}

pub fn set_style(el: &web::HtmlElement, property: &str, value: &str) {
    _ = el.style().set_property(property, value);
}

pub fn set_display(document: &web::Document, id: &str, value: &str) {
    if let Some(el) = by_id::<web::HtmlElement>(document, id) {
        set_style(&el, "display", value);
    }
}

pub fn input_value(document: &web::Document, id: &str) -> String {
    if let Some(input) = by_id::<web::HtmlInputElement>(document, id) {
        return input.value();
    }
    by_id::<web::HtmlTextAreaElement>(document, id)
        .map(|t| t.value())
        .unwrap_or_default()
}

pub fn set_input_value(document: &web::Document, id: &str, value: &str) {
    if let Some(input) = by_id::<web::HtmlInputElement>(document, id) {
        input.set_value(value);
    } else if let Some(area) = by_id::<web::HtmlTextAreaElement>(document, id) {
        area.set_value(value);
    }
}

/// Inject the stylesheet once; later calls are no-ops.
pub fn ensure_stylesheet(document: &web::Document, id: &str, css: &str) {
    if document.get_element_by_id(id).is_some() {
        return;
    }
    let Some(head) = document.head() else { return };
    if let Ok(style) = document.create_element("style") {
        style.set_id(id);
        style.set_text_content(Some(css));
        _ = head.append_child(&style);
    }
}

pub fn load_font(document: &web::Document, href: &str) {
    let Some(head) = document.head() else { return };
    if let Some(link) = document
        .create_element("link")
        .ok()
        .and_then(|l| l.dyn_into::<web::HtmlLinkElement>().ok())
    {
        link.set_rel("stylesheet");
        link.set_href(href);
        _ = head.append_child(&link);
    }
}

pub fn cookie(document: &web::Document) -> String {
    document
        .dyn_ref::<web::HtmlDocument>()
        .and_then(|d| d.cookie().ok())
        .unwrap_or_default()
}

pub fn pathname() -> String {
    web::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_default()
}

pub fn viewport(window: &web::Window) -> glam::Vec2 {
    let read = |v: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| {
        v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0) as f32
    };
    glam::Vec2::new(read(window.inner_width()), read(window.inner_height()))
}

pub fn tab_visible(document: &web::Document) -> bool {
    document.visibility_state() == web::VisibilityState::Visible
}

/// Text of the optional inline JSON config block.
pub fn config_json(document: &web::Document, id: &str) -> Option<String> {
    document.get_element_by_id(id)?.text_content()
}

/// Dark mode is signalled by a page global, a cookie or a loaded
/// `darkmode.css` stylesheet.
pub fn dark_mode_enabled(window: &web::Window, document: &web::Document) -> bool {
    if let Ok(flag) = js_sys::Reflect::get(window, &"use_darkmode".into()) {
        if !flag.is_undefined() {
            return flag.is_truthy();
        }
    }
    if cookie(document).contains("darkmode=1") {
        return true;
    }
    document
        .query_selector("link[href*=\"darkmode.css\"]")
        .ok()
        .flatten()
        .is_some()
}

pub fn add_root_class(document: &web::Document, class: &str) {
    if let Some(html) = document.document_element() {
        _ = html.class_list().add_1(class);
    }
    if let Some(body) = document.body() {
        _ = body.class_list().add_1(class);
    }
}
