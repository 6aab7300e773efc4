use super::{add_class, closest, data_index, event_element, is_backdrop_click, remove_class};
use super::{StatusKind, StatusLine};
use crate::constants::{
    ENVELOPE_OPEN_DELAY_MS, ENVELOPE_STAGGER_MS, MODAL_CLOSE_MS, SEARCH_DEBOUNCE_MS,
    STATUS_CLOSE_DELAY_MS, WISH_STATS_DELAY_MS,
};
use crate::core::api::{self, Ack};
use crate::core::wishes::{
    mark_read, search_query, unread_badge, validate_limit, MarkReadRequest, UserHit, UserLimit, UserSearch,
    Wish, WishDraft, WishList, WishStats,
};
use crate::dom::{self, Listener};
use crate::frame::SharedEffects;
use crate::markup;
use crate::net;
use crate::timers::{self, Timeout};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

const CONTAINER_ID: &str = "tet-wish-container";
const SEND_MODAL_ID: &str = "tet-send-wish-modal";
const MAILBOX_MODAL_ID: &str = "tet-mailbox-modal";
const VIEW_MODAL_ID: &str = "tet-view-wish-modal";
const LIMIT_MODAL_ID: &str = "tet-set-limit-modal";

const SEARCH_ID: &str = "tet-receiver-search";
const DROPDOWN_ID: &str = "tet-receiver-dropdown";
const SELECTED_ID: &str = "tet-selected-receiver";
const BROADCAST_GROUP_ID: &str = "tet-broadcast-group";
const BROADCAST_ID: &str = "tet-broadcast-checkbox";
const MESSAGE_ID: &str = "tet-wish-message";
const CHAR_COUNT_ID: &str = "tet-char-count";
const ENVELOPES_ID: &str = "tet-envelopes-container";
const NO_WISHES_ID: &str = "tet-no-wishes";
const LIMIT_INPUT_ID: &str = "tet-limit-input";

const SEND_STATUS: StatusLine = StatusLine {
    id: "tet-send-status",
    base: "tet-status",
    success: "tet-status-success",
    error: "tet-status-error",
};
const LIMIT_STATUS: StatusLine = StatusLine {
    id: "tet-limit-status",
    base: "tet-status",
    success: "tet-status-success",
    error: "tet-status-error",
};

#[derive(Default)]
struct MailboxState {
    stats: WishStats,
    wishes: Vec<Wish>,
    users: Vec<UserHit>,
    receiver: Option<u64>,
    limit_user: Option<u64>,
    /// Pending debounced search; replacing it cancels the previous one.
    search: Option<Timeout>,
}

#[derive(Clone)]
struct Mailbox {
    document: web::Document,
    effects: SharedEffects,
    state: Rc<RefCell<MailboxState>>,
    send: web::HtmlElement,
    mailbox: web::HtmlElement,
    view: web::HtmlElement,
    limit: web::HtmlElement,
}

/// Mailbox buttons, their modals and every handler wired to them.
pub struct WishMailbox {
    _listeners: Vec<Listener>,
}

pub fn mount(document: &web::Document, effects: SharedEffects) -> Option<WishMailbox> {
    dom::append_to_body(document, Some(CONTAINER_ID), "", "", markup::WISH_BUTTONS_HTML)?;
    let modal = |id, class, html| dom::append_to_body(document, Some(id), class, "", html);
    let mb = Mailbox {
        document: document.clone(),
        effects,
        state: Rc::default(),
        send: modal(SEND_MODAL_ID, "tet-modal-overlay", markup::SEND_WISH_MODAL_HTML)?,
        mailbox: modal(MAILBOX_MODAL_ID, "tet-modal-overlay", markup::MAILBOX_MODAL_HTML)?,
        view: modal(VIEW_MODAL_ID, "tet-view-wish-overlay", markup::VIEW_WISH_MODAL_HTML)?,
        limit: modal(LIMIT_MODAL_ID, "tet-modal-overlay", markup::SET_LIMIT_MODAL_HTML)?,
    };

    let mut listeners = Vec::new();
    let on = |mb: &Mailbox, id: &str, f: fn(&Mailbox)| {
        let m = mb.clone();
        dom::on_click(&mb.document, id, move || f(&m))
    };
    listeners.extend(on(&mb, "tet-send-wish-btn", |m| add_class(&m.send, "active")));
    listeners.extend(on(&mb, "tet-mailbox-btn", |m| {
        m.load_wishes();
        add_class(&m.mailbox, "active");
    }));
    listeners.extend(on(&mb, "tet-submit-wish", Mailbox::submit_wish));
    listeners.extend(on(&mb, "tet-submit-limit", Mailbox::submit_limit));

    for modal in [&mb.send, &mb.mailbox, &mb.limit] {
        let el = modal.clone();
        listeners.extend(dom::on_click_within(modal, ".tet-modal-close", move || {
            remove_class(&el, "active")
        }));
    }
    for modal in [&mb.send, &mb.mailbox] {
        let el: web::Element = modal.clone().into();
        listeners.push(Listener::new(modal, "click", move |ev| {
            if is_backdrop_click(&ev, &el) {
                remove_class(&el, "active");
            }
        }));
    }
    {
        let m = mb.clone();
        listeners.extend(dom::on_click_within(&mb.view, ".tet-view-wish-close", move || {
            m.close_letter()
        }));
    }

    let listen = |id: &str, event: &'static str, handler: Box<dyn Fn(&Mailbox, web::Event)>| {
        let m = mb.clone();
        let el = mb.document.get_element_by_id(id)?;
        Some(Listener::new(&el, event, move |ev| handler(&m, ev)))
    };
    listeners.extend(listen(SEARCH_ID, "input", Box::new(|m, _| m.on_search_input())));
    listeners.extend(listen(MESSAGE_ID, "input", Box::new(|m, _| {
        let count = dom::input_value(&m.document, MESSAGE_ID).chars().count();
        dom::set_text(&m.document, CHAR_COUNT_ID, &count.to_string());
    })));
    listeners.extend(listen(DROPDOWN_ID, "click", Box::new(Mailbox::on_dropdown_click)));
    listeners.extend(listen(SELECTED_ID, "click", Box::new(|m, ev| {
        if event_element(&ev).and_then(|t| closest(&t, ".tet-remove-receiver")).is_some() {
            m.clear_receiver();
        }
    })));
    listeners.extend(listen(ENVELOPES_ID, "click", Box::new(|m, ev| {
        let index = event_element(&ev)
            .and_then(|t| closest(&t, ".tet-envelope"))
            .and_then(|e| data_index(&e));
        if let Some(index) = index {
            m.open_envelope(index);
        }
    })));
    {
        let doc = document.clone();
        listeners.push(Listener::new(document, "click", move |ev| {
            let inside = event_element(&ev).map_or(false, |t| {
                closest(&t, &format!("#{}", SEARCH_ID)).is_some()
                    || closest(&t, &format!("#{}", DROPDOWN_ID)).is_some()
            });
            if !inside {
                dom::set_display(&doc, DROPDOWN_ID, "none");
            }
        }));
    }

    let m = mb.clone();
    timers::set_timeout(WISH_STATS_DELAY_MS, move || m.load_stats());
    Some(WishMailbox {
        _listeners: listeners,
    })
}

impl Mailbox {
    fn load_stats(&self) {
        let m = self.clone();
        spawn_local(async move {
            let Ok(stats) = net::get_json::<WishStats>(api::WISH_STATS).await else {
                return;
            };
            dom::set_text(&m.document, "tet-remaining-badge", &stats.remaining_label());
            m.show_unread(stats.unread_count);
            if stats.is_superadmin {
                dom::set_display(&m.document, BROADCAST_GROUP_ID, "block");
            }
            m.state.borrow_mut().stats = stats;
        });
    }

    fn show_unread(&self, count: u32) {
        let Some(badge) = self.document.get_element_by_id("tet-unread-badge") else {
            return;
        };
        match unread_badge(count) {
            Some(text) => {
                badge.set_text_content(Some(&text));
                add_class(&badge, "show");
            }
            None => remove_class(&badge, "show"),
        }
    }

    fn on_search_input(&self) {
        let raw = dom::input_value(&self.document, SEARCH_ID);
        let mut state = self.state.borrow_mut();
        state.search = None;
        let Some(query) = search_query(&raw).map(str::to_string) else {
            if let Some(dropdown) = self.document.get_element_by_id(DROPDOWN_ID) {
                dropdown.set_inner_html("");
            }
            dom::set_display(&self.document, DROPDOWN_ID, "none");
            return;
        };
        let m = self.clone();
        state.search = Timeout::new(SEARCH_DEBOUNCE_MS, move || {
            spawn_local(async move {
                let url = api::search_users_url(&query);
                if let Ok(result) = net::get_plain::<UserSearch>(&url).await {
                    m.show_users(result.users);
                }
            });
        });
    }

    fn show_users(&self, users: Vec<UserHit>) {
        let mut state = self.state.borrow_mut();
        let html = markup::user_dropdown_html(&users, state.stats.is_superadmin);
        state.users = users;
        if let Some(dropdown) = self.document.get_element_by_id(DROPDOWN_ID) {
            dropdown.set_inner_html(&html);
        }
        dom::set_display(&self.document, DROPDOWN_ID, "block");
    }

    fn on_dropdown_click(&self, ev: web::Event) {
        let Some(target) = event_element(&ev) else {
            return;
        };
        if let Some(gear) = closest(&target, ".tet-set-limit-btn") {
            ev.stop_propagation();
            if let Some(index) = data_index(&gear) {
                self.open_limit(index);
            }
            return;
        }
        let Some(item) = closest(&target, ".tet-dropdown-item") else {
            return;
        };
        let classes = item.class_list();
        if classes.contains("tet-user-disabled") || classes.contains("tet-no-result") {
            return;
        }
        if let Some(index) = data_index(&item) {
            self.select_receiver(index);
        }
    }

    fn select_receiver(&self, index: usize) {
        let Some(user) = self.state.borrow().users.get(index).cloned() else {
            return;
        };
        self.state.borrow_mut().receiver = Some(user.id);
        dom::set_input_value(&self.document, SEARCH_ID, "");
        dom::set_display(&self.document, SEARCH_ID, "none");
        dom::set_display(&self.document, DROPDOWN_ID, "none");
        if let Some(selected) = self.document.get_element_by_id(SELECTED_ID) {
            selected.set_inner_html(&markup::selected_receiver_html(&user.username));
            add_class(&selected, "show");
        }
    }

    fn clear_receiver(&self) {
        self.state.borrow_mut().receiver = None;
        dom::set_display(&self.document, SEARCH_ID, "block");
        if let Some(selected) = self.document.get_element_by_id(SELECTED_ID) {
            remove_class(&selected, "show");
        }
    }

    fn submit_wish(&self) {
        let draft = WishDraft {
            receiver_id: self.state.borrow().receiver,
            message: dom::input_value(&self.document, MESSAGE_ID),
            is_broadcast: dom::by_id::<web::HtmlInputElement>(&self.document, BROADCAST_ID)
                .map_or(false, |c| c.checked()),
        };
        let request = match draft.validate() {
            Ok(r) => r,
            Err(e) => {
                SEND_STATUS.set(&self.document, &e.status_text(), StatusKind::Error);
                return;
            }
        };
        SEND_STATUS.set(&self.document, "⏳ Đang gửi...", StatusKind::Pending);
        let m = self.clone();
        spawn_local(async move {
            match net::post_json::<_, Ack>(api::WISH_SEND, &request).await {
                Ok(ack) => {
                    let doc = &m.document;
                    SEND_STATUS.set(doc, &format!("✅ {}", ack.message), StatusKind::Success);
                    dom::set_input_value(doc, MESSAGE_ID, "");
                    dom::set_text(doc, CHAR_COUNT_ID, "0");
                    m.clear_receiver();
                    if let Some(b) = dom::by_id::<web::HtmlInputElement>(doc, BROADCAST_ID) {
                        b.set_checked(false);
                    }
                    m.load_stats();
                    let m = m.clone();
                    timers::set_timeout(STATUS_CLOSE_DELAY_MS, move || {
                        remove_class(&m.send, "active");
                        SEND_STATUS.clear(&m.document);
                    });
                }
                Err(e) => SEND_STATUS.set(&m.document, &e.status_text(), StatusKind::Error),
            }
        });
    }

    fn load_wishes(&self) {
        let m = self.clone();
        spawn_local(async move {
            let Ok(list) = net::get_json::<WishList>(api::WISH_LIST).await else {
                return;
            };
            m.show_unread(list.unread_count);
            m.state.borrow_mut().wishes = list.wishes;
            m.render_envelopes();
        });
    }

    fn render_envelopes(&self) {
        let Some(container) = self.document.get_element_by_id(ENVELOPES_ID) else {
            return;
        };
        container.set_inner_html("");
        let state = self.state.borrow();
        if state.wishes.is_empty() {
            dom::set_display(&self.document, NO_WISHES_ID, "block");
            return;
        }
        dom::set_display(&self.document, NO_WISHES_ID, "none");
        for (i, wish) in state.wishes.iter().enumerate() {
            let (class, html) = markup::envelope_node(wish);
            let Some(envelope) = dom::create_element(&self.document, "div", None, &class) else {
                continue;
            };
            _ = envelope.set_attribute("data-index", &i.to_string());
            envelope.set_inner_html(&html);
            if container.append_child(&envelope).is_ok() {
                timers::set_timeout(i as i32 * ENVELOPE_STAGGER_MS, move || {
                    add_class(&envelope, "tet-envelope-visible");
                });
            }
        }
    }

    fn open_envelope(&self, index: usize) {
        let Some(wish) = self.state.borrow().wishes.get(index).cloned() else {
            return;
        };
        let doc = &self.document;
        dom::set_text(doc, "tet-letter-sender", &wish.sender_name);
        dom::set_text(doc, "tet-letter-message", &wish.message);
        dom::set_text(doc, "tet-letter-date", &format!("📅 {}", wish.created_at));
        if wish.is_from_superadmin {
            self.effects.borrow_mut().celebrate();
        }
        remove_class(&self.mailbox, "active");
        dom::set_style(&self.view, "display", "flex");
        let m = self.clone();
        timers::set_timeout(ENVELOPE_OPEN_DELAY_MS, move || {
            add_class(&m.view, "tet-view-wish-active");
            if let Some(anim) = m.document.get_element_by_id("tet-envelope-animation") {
                add_class(&anim, "tet-envelope-opened");
            }
        });

        if !wish.is_read {
            let m = self.clone();
            spawn_local(async move {
                let request = MarkReadRequest { wish_id: wish.id };
                if net::post_json::<_, Ack>(api::WISH_MARK_READ, &request)
                    .await
                    .is_ok()
                {
                    mark_read(&mut m.state.borrow_mut().wishes, wish.id);
                    m.load_stats();
                }
            });
        }
    }

    fn close_letter(&self) {
        remove_class(&self.view, "tet-view-wish-active");
        if let Some(anim) = self.document.get_element_by_id("tet-envelope-animation") {
            remove_class(&anim, "tet-envelope-opened");
        }
        let m = self.clone();
        timers::set_timeout(MODAL_CLOSE_MS, move || {
            dom::set_style(&m.view, "display", "none");
            m.load_wishes();
            add_class(&m.mailbox, "active");
        });
    }

    fn open_limit(&self, index: usize) {
        let Some(user) = self.state.borrow().users.get(index).cloned() else {
            return;
        };
        self.state.borrow_mut().limit_user = Some(user.id);
        dom::set_text(&self.document, "tet-limit-username", &user.username);
        LIMIT_STATUS.clear(&self.document);
        let m = self.clone();
        spawn_local(async move {
            let url = api::get_limit_url(user.id);
            if let Ok(limit) = net::get_json::<UserLimit>(&url).await {
                let doc = &m.document;
                dom::set_text(doc, "tet-limit-sent", &limit.sent_count.to_string());
                dom::set_text(doc, "tet-limit-current", &limit.max_wishes.to_string());
                dom::set_input_value(doc, LIMIT_INPUT_ID, &limit.max_wishes.to_string());
            }
        });
        add_class(&self.limit, "active");
    }

    fn submit_limit(&self) {
        let raw = dom::input_value(&self.document, LIMIT_INPUT_ID);
        let request = match validate_limit(self.state.borrow().limit_user, &raw) {
            Ok(r) => r,
            Err(e) => {
                LIMIT_STATUS.set(&self.document, &e.status_text(), StatusKind::Error);
                return;
            }
        };
        LIMIT_STATUS.set(&self.document, "⏳ Đang lưu...", StatusKind::Pending);
        let m = self.clone();
        spawn_local(async move {
            match net::post_json::<_, Ack>(api::WISH_SET_LIMIT, &request).await {
                Ok(ack) => {
                    LIMIT_STATUS.set(&m.document, &format!("✅ {}", ack.message), StatusKind::Success);
                    dom::set_text(
                        &m.document,
                        "tet-limit-current",
                        &request.max_wishes().to_string(),
                    );
                }
                Err(e) => LIMIT_STATUS.set(&m.document, &e.status_text(), StatusKind::Error),
            }
        });
    }
}
