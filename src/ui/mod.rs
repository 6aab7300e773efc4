pub mod countdown;
pub mod greeting;
pub mod wishes;

use wasm_bindgen::JsCast;
use web_sys as web;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusKind {
    Pending,
    Success,
    Error,
}

/// Inline status line under a form. `base` is the status element's own
/// class and `error`/`success` the modifier classes of that form family.
pub struct StatusLine {
    pub id: &'static str,
    pub base: &'static str,
    pub success: &'static str,
    pub error: &'static str,
}

impl StatusLine {
    pub fn set(&self, document: &web::Document, text: &str, kind: StatusKind) {
        let Some(el) = document.get_element_by_id(self.id) else {
            return;
        };
        el.set_text_content(Some(text));
        let class = match kind {
            StatusKind::Pending => self.base.to_string(),
            StatusKind::Success => format!("{} {}", self.base, self.success),
            StatusKind::Error => format!("{} {}", self.base, self.error),
        };
        el.set_class_name(&class);
    }

    pub fn clear(&self, document: &web::Document) {
        self.set(document, "", StatusKind::Pending);
    }
}

pub fn add_class(el: &web::Element, class: &str) {
    _ = el.class_list().add_1(class);
}

pub fn remove_class(el: &web::Element, class: &str) {
    _ = el.class_list().remove_1(class);
}

/// Element the event was dispatched to.
pub fn event_element(ev: &web::Event) -> Option<web::Element> {
    ev.target()?.dyn_into::<web::Element>().ok()
}

/// `true` when the click landed on `el` itself rather than a child.
pub fn is_backdrop_click(ev: &web::Event, el: &web::Element) -> bool {
    event_element(ev).map_or(false, |t| t == *el)
}

pub fn closest(el: &web::Element, selector: &str) -> Option<web::Element> {
    el.closest(selector).ok().flatten()
}

pub fn data_index(el: &web::Element) -> Option<usize> {
    el.get_attribute("data-index")?.parse().ok()
}
