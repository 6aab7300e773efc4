use crate::constants::{
    CHRISTMAS_FADE_IN_DELAY_MS, CHRISTMAS_FADE_OUT_MS, CHRISTMAS_GREETING_ID, CHRISTMAS_HOLD_MS,
    INTRO_FADE_IN_DELAY_MS, INTRO_FADE_OUT_MS, INTRO_HOLD_MS, INTRO_OVERLAY_ID,
};
use crate::dom;
use crate::markup;
use crate::timers;
use web_sys as web;

/// Fade `el` in after `delay_ms`, hold it, fade it out and remove it.
fn play_timeline(el: web::HtmlElement, delay_ms: i32, hold_ms: i32, fade_out_ms: i32) {
    timers::set_timeout(delay_ms, move || {
        dom::set_style(&el, "opacity", "1");
        timers::set_timeout(hold_ms, move || {
            dom::set_style(&el, "opacity", "0");
            timers::set_timeout(fade_out_ms, move || el.remove());
        });
    });
}

pub fn show_tet_intro(document: &web::Document) {
    dom::load_font(document, markup::TET_FONT_URL);
    dom::remove_by_id(document, INTRO_OVERLAY_ID);
    if let Some(el) = dom::append_to_body(
        document,
        Some(INTRO_OVERLAY_ID),
        "",
        "",
        markup::tet_intro_html(),
    ) {
        log::info!("[intro] showing new-year greeting");
        play_timeline(el, INTRO_FADE_IN_DELAY_MS, INTRO_HOLD_MS, INTRO_FADE_OUT_MS);
    }
}

pub fn show_christmas_intro(document: &web::Document) {
    dom::load_font(document, markup::CHRISTMAS_FONT_URL);
    dom::remove_by_id(document, CHRISTMAS_GREETING_ID);
    if let Some(el) = dom::append_to_body(document, Some(CHRISTMAS_GREETING_ID), "", "", "") {
        el.set_inner_text(markup::CHRISTMAS_GREETING_TEXT);
        log::info!("[intro] showing christmas greeting");
        play_timeline(
            el,
            CHRISTMAS_FADE_IN_DELAY_MS,
            CHRISTMAS_HOLD_MS,
            CHRISTMAS_FADE_OUT_MS,
        );
    }
}

/// Two swinging lanterns pinned to the top corners.
pub fn mount_lanterns(document: &web::Document) {
    for left in [true, false] {
        let node = markup::lantern_node(left);
        _ = dom::append_to_body(document, None, node.class, &node.style, &node.html);
    }
}
