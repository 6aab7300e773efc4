use crate::constants::{COUNTDOWN_ID, COUNTDOWN_REFRESH_MS};
use crate::core::countdown::Countdown;
use crate::core::session::SessionFlag;
use crate::dom::{self, Listener};
use crate::markup::{self, COUNTDOWN_CELL_IDS};
use crate::storage::SharedSession;
use crate::timers::Interval;
use web_sys as web;

const TITLE: &str = "🎊 Đếm ngược Tết Bính Tỵ 2026 🎊";

/// Floating countdown box. Dropping it stops the ticker and the close
/// handler; the element itself stays until closed.
pub struct CountdownWidget {
    _ticker: Option<Interval>,
    _close: Option<Listener>,
}

fn refresh(document: &web::Document, countdown: &Countdown) {
    let fields = countdown
        .display_at_epoch_ms(js_sys::Date::now())
        .fields();
    for (id, text) in COUNTDOWN_CELL_IDS.iter().zip(fields.iter()) {
        dom::set_text(document, id, text);
    }
}

pub fn mount(
    document: &web::Document,
    countdown: Countdown,
    session: SharedSession,
) -> Option<CountdownWidget> {
    if session.borrow().has_shown(SessionFlag::CountdownClosed) {
        return None;
    }
    let cells = countdown
        .display_at_epoch_ms(js_sys::Date::now())
        .fields();
    dom::remove_by_id(document, COUNTDOWN_ID);
    let container = dom::append_to_body(
        document,
        Some(COUNTDOWN_ID),
        "",
        "",
        &markup::countdown_html(TITLE, &cells),
    )?;

    let doc = document.clone();
    let ticker = Interval::new(COUNTDOWN_REFRESH_MS, move || refresh(&doc, &countdown));
    let close = dom::on_click(document, "tet-countdown-close", move || {
        dom::set_style(&container, "display", "none");
        session.borrow_mut().mark_shown(SessionFlag::CountdownClosed);
    });
    Some(CountdownWidget {
        _ticker: ticker,
        _close: close,
    })
}
