use super::{add_class, is_backdrop_click, remove_class, StatusKind, StatusLine};
use crate::constants::{MODAL_CLOSE_MS, MODAL_OPEN_DELAY_MS, STATUS_CLOSE_DELAY_MS};
use crate::core::api::{self, Ack};
use crate::core::greeting::{
    build_pages, page_cues, validate_supporter_greeting, GreetingCheck, GreetingList,
    GreetingPage, Pager, PagerStep,
};
use crate::core::tier::DeviceTier;
use crate::dom::{self, Listener};
use crate::frame::SharedEffects;
use crate::markup;
use crate::net;
use crate::timers;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

const MODAL_ID: &str = "nyg-modal";
const FORM_MODAL_ID: &str = "nyg-supporter-form-modal";
const SUPPORTER_BTN_CONTAINER_ID: &str = "nyg-supporter-btn-container";
const TEST_BTN_CONTAINER_ID: &str = "nyg-test-btn-container";
const DEFAULT_YEAR: u32 = 2026;

const FORM_STATUS: StatusLine = StatusLine {
    id: "nyg-form-status",
    base: "nyg-form-status",
    success: "success",
    error: "error",
};

/// Everything the greeting feature keeps alive: entry buttons, the paged
/// modal and the supporter form. Handlers hold weak references back here.
pub struct GreetingUi {
    document: web::Document,
    effects: SharedEffects,
    tier: DeviceTier,
    buttons: Vec<Listener>,
    modal: Option<GreetingModal>,
    form: Option<SupporterForm>,
}

struct GreetingModal {
    root: web::HtmlElement,
    pages: Vec<GreetingPage>,
    pager: Pager,
    _listeners: Vec<Listener>,
}

struct SupporterForm {
    root: web::HtmlElement,
    _listeners: Vec<Listener>,
}

pub type SharedGreeting = Rc<RefCell<GreetingUi>>;

/// Ask the server what to show and wire the greeting feature accordingly.
pub fn init(document: web::Document, effects: SharedEffects, tier: DeviceTier) -> SharedGreeting {
    let ui = Rc::new(RefCell::new(GreetingUi {
        document,
        effects,
        tier,
        buttons: Vec::new(),
        modal: None,
        form: None,
    }));
    let weak = Rc::downgrade(&ui);
    spawn_local(async move {
        let Ok(check) = net::get_json::<GreetingCheck>(api::GREETING_CHECK).await else {
            return;
        };
        let Some(ui) = weak.upgrade() else { return };
        apply_check(&ui, check);
    });
    ui
}

fn apply_check(ui: &SharedGreeting, check: GreetingCheck) {
    let weak = Rc::downgrade(ui);
    let document = ui.borrow().document.clone();
    if check.can_send_supporter_greeting
        && dom::append_to_body(
            &document,
            Some(SUPPORTER_BTN_CONTAINER_ID),
            "",
            "",
            markup::SUPPORTER_BUTTON_HTML,
        )
        .is_some()
    {
        let w = weak.clone();
        let listener = dom::on_click(&document, "nyg-supporter-btn", move || {
            if let Some(ui) = w.upgrade() {
                open_supporter_form(&ui);
            }
        });
        ui.borrow_mut().buttons.extend(listener);
    }
    if check.is_superadmin
        && dom::append_to_body(
            &document,
            Some(TEST_BTN_CONTAINER_ID),
            "",
            "",
            markup::TEST_BUTTON_HTML,
        )
        .is_some()
    {
        let w = weak.clone();
        let listener = dom::on_click(&document, "nyg-test-btn", move || {
            if let Some(ui) = w.upgrade() {
                load_and_show(&ui);
            }
        });
        ui.borrow_mut().buttons.extend(listener);
    }
    if check.should_show {
        load_and_show(ui);
    }
}

fn load_and_show(ui: &SharedGreeting) {
    if ui.borrow().modal.is_some() {
        return;
    }
    let weak = Rc::downgrade(ui);
    spawn_local(async move {
        let Ok(list) = net::get_json::<GreetingList>(api::GREETING_LIST).await else {
            return;
        };
        if let Some(ui) = weak.upgrade() {
            show_modal(&ui, list);
        }
    });
}

fn show_modal(ui: &SharedGreeting, list: GreetingList) {
    let document = ui.borrow().document.clone();
    let year = list.year.unwrap_or(DEFAULT_YEAR);
    let pages = build_pages(&list.greetings);
    dom::remove_by_id(&document, MODAL_ID);
    let Some(root) = dom::append_to_body(
        &document,
        Some(MODAL_ID),
        "nyg-modal-overlay",
        "",
        &markup::greeting_modal_html(&pages, year),
    ) else {
        return;
    };

    let weak = Rc::downgrade(ui);
    let mut listeners = Vec::new();
    let nav = |step: fn(&mut Pager) -> PagerStep, w: Weak<RefCell<GreetingUi>>| {
        move || {
            if let Some(ui) = w.upgrade() {
                navigate(&ui, step);
            }
        }
    };
    listeners.extend(dom::on_click_within(
        &root,
        ".nyg-prev",
        nav(Pager::prev, weak.clone()),
    ));
    listeners.extend(dom::on_click_within(
        &root,
        ".nyg-next",
        nav(Pager::next, weak.clone()),
    ));
    if let Some(dots) = root.query_selector(".nyg-dots").ok().flatten() {
        let w = weak.clone();
        listeners.push(Listener::new(&dots, "click", move |ev| {
            let index = super::event_element(&ev)
                .and_then(|t| t.get_attribute("data-page"))
                .and_then(|p| p.parse::<usize>().ok());
            if let (Some(ui), Some(index)) = (w.upgrade(), index) {
                navigate(&ui, move |pager| pager.go_to(index));
            }
        }));
    }

    let host = root
        .query_selector(".nyg-fireworks-bg")
        .ok()
        .flatten();
    {
        let mut state = ui.borrow_mut();
        state.effects.borrow_mut().surface.set_modal_host(host);
        state.modal = Some(GreetingModal {
            root: root.clone(),
            pager: Pager::new(pages.len()),
            pages,
            _listeners: listeners,
        });
    }
    timers::set_timeout(MODAL_OPEN_DELAY_MS, move || add_class(&root, "nyg-active"));
    show_page(ui, 0);
}

fn navigate(ui: &SharedGreeting, step: impl FnOnce(&mut Pager) -> PagerStep) {
    let outcome = {
        let mut state = ui.borrow_mut();
        match state.modal.as_mut() {
            Some(modal) => step(&mut modal.pager),
            None => return,
        }
    };
    match outcome {
        PagerStep::Moved(index) => show_page(ui, index),
        PagerStep::Finish => finish(ui),
        PagerStep::Unchanged => {}
    }
}

fn show_page(ui: &SharedGreeting, index: usize) {
    let state = ui.borrow();
    let Some(modal) = state.modal.as_ref() else {
        return;
    };
    let root = &modal.root;
    if let Ok(pages) = root.query_selector_all(".nyg-page") {
        for i in 0..pages.length() {
            let Some(page) = pages
                .item(i)
                .and_then(|n| n.dyn_into::<web::HtmlElement>().ok())
            else {
                continue;
            };
            let display = if i as usize == index { "block" } else { "none" };
            dom::set_style(&page, "display", display);
        }
    }
    if let Ok(dots) = root.query_selector_all(".nyg-dot") {
        for i in 0..dots.length() {
            if let Some(dot) = dots.item(i).and_then(|n| n.dyn_into::<web::Element>().ok()) {
                if i as usize == index {
                    add_class(&dot, "active");
                } else {
                    remove_class(&dot, "active");
                }
            }
        }
    }
    if let Some(prev) = root
        .query_selector(".nyg-prev")
        .ok()
        .flatten()
        .and_then(|e| e.dyn_into::<web::HtmlElement>().ok())
    {
        let visibility = if modal.pager.is_first() { "hidden" } else { "visible" };
        dom::set_style(&prev, "visibility", visibility);
    }
    if let Some(next) = root.query_selector(".nyg-next").ok().flatten() {
        next.set_text_content(Some(modal.pager.next_label()));
        if modal.pager.is_last() {
            add_class(&next, "nyg-finish");
        } else {
            remove_class(&next, "nyg-finish");
        }
    }

    if let Some(page) = modal.pages.get(index) {
        let cues = page_cues(page, state.tier);
        if !cues.is_empty() {
            state.effects.borrow_mut().schedule_cues(&cues);
        }
    }
}

/// Last page confirmed: record it server-side, then animate out.
fn finish(ui: &SharedGreeting) {
    let weak = Rc::downgrade(ui);
    spawn_local(async move {
        let seen = net::post_json::<_, Ack>(api::GREETING_SEEN, &serde_json::Map::new()).await;
        if let Err(e) = seen {
            log::warn!("[api] could not mark greeting as seen: {}", e);
        }
        let Some(ui) = weak.upgrade() else { return };
        let root = match ui.borrow().modal.as_ref() {
            Some(modal) => modal.root.clone(),
            None => return,
        };
        add_class(&root, "nyg-closing");
        let w = Rc::downgrade(&ui);
        timers::set_timeout(MODAL_CLOSE_MS, move || {
            root.remove();
            if let Some(ui) = w.upgrade() {
                let mut state = ui.borrow_mut();
                state.modal = None;
                state.effects.borrow_mut().surface.set_modal_host(None);
            }
        });
    });
}

fn open_supporter_form(ui: &SharedGreeting) {
    let document = ui.borrow().document.clone();
    dom::remove_by_id(&document, FORM_MODAL_ID);
    let Some(root) = dom::append_to_body(
        &document,
        Some(FORM_MODAL_ID),
        "nyg-modal-overlay nyg-active",
        "",
        markup::SUPPORTER_FORM_HTML,
    ) else {
        return;
    };

    let weak = Rc::downgrade(ui);
    let mut listeners = Vec::new();
    {
        let w = weak.clone();
        listeners.extend(dom::on_click_within(&root, ".nyg-supporter-form-close", move || {
            if let Some(ui) = w.upgrade() {
                close_form(&ui);
            }
        }));
    }
    {
        let w = weak.clone();
        let backdrop: web::Element = root.clone().into();
        listeners.push(Listener::new(&root, "click", move |ev| {
            if is_backdrop_click(&ev, &backdrop) {
                if let Some(ui) = w.upgrade() {
                    close_form(&ui);
                }
            }
        }));
    }
    if let Some(area) = document.get_element_by_id("nyg-message") {
        let doc = document.clone();
        listeners.push(Listener::new(&area, "input", move |_| {
            let count = dom::input_value(&doc, "nyg-message").chars().count();
            dom::set_text(&doc, "nyg-char-current", &count.to_string());
        }));
    }
    {
        let w = weak.clone();
        listeners.extend(dom::on_click(&document, "nyg-submit-btn", move || {
            if let Some(ui) = w.upgrade() {
                submit_supporter_greeting(&ui);
            }
        }));
    }
    ui.borrow_mut().form = Some(SupporterForm {
        root,
        _listeners: listeners,
    });
}

fn close_form(ui: &SharedGreeting) {
    // Deferred so the handler that asked for the close is not dropped while
    // it is still running.
    let weak = Rc::downgrade(ui);
    timers::set_timeout(0, move || {
        if let Some(ui) = weak.upgrade() {
            if let Some(form) = ui.borrow_mut().form.take() {
                form.root.remove();
            }
        }
    });
}

fn submit_supporter_greeting(ui: &SharedGreeting) {
    let document = ui.borrow().document.clone();
    let request = validate_supporter_greeting(
        &dom::input_value(&document, "nyg-display-name"),
        &dom::input_value(&document, "nyg-message"),
    );
    let request = match request {
        Ok(r) => r,
        Err(e) => {
            FORM_STATUS.set(&document, &e.status_text(), StatusKind::Error);
            return;
        }
    };
    FORM_STATUS.set(&document, "⏳ Đang gửi...", StatusKind::Pending);
    let weak = Rc::downgrade(ui);
    spawn_local(async move {
        match net::post_json::<_, Ack>(api::GREETING_SUBMIT, &request).await {
            Ok(ack) => {
                FORM_STATUS.set(&document, &format!("✅ {}", ack.message), StatusKind::Success);
                dom::remove_by_id(&document, SUPPORTER_BTN_CONTAINER_ID);
                timers::set_timeout(STATUS_CLOSE_DELAY_MS, move || {
                    if let Some(ui) = weak.upgrade() {
                        close_form(&ui);
                    }
                });
            }
            Err(e) => FORM_STATUS.set(&document, &e.status_text(), StatusKind::Error),
        }
    });
}
