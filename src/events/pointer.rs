use crate::core::trail::CursorTrail;
use crate::dom::Listener;
use crate::frame::{EffectContext, SharedEffects};
use glam::Vec2;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Drop flowers behind the mouse pointer. The listener lives as long as the
/// page; it goes quiet once the effects are shut down.
pub fn wire_cursor_trail(document: &web::Document, effects: SharedEffects) {
    if !effects.borrow().scheduler.perf().cursor_trail_enabled {
        return;
    }
    let mut trail = CursorTrail::new();
    Listener::new(document, "mousemove", move |ev: web::Event| {
        let Some(mouse) = ev.dyn_ref::<web::MouseEvent>() else {
            return;
        };
        let pos = Vec2::new(mouse.client_x() as f32, mouse.client_y() as f32);
        if trail.should_spawn(pos, EffectContext::now_ms()) {
            if let Ok(mut fx) = effects.try_borrow_mut() {
                fx.spawn_cursor_flower(pos);
            }
        }
    })
    .forget();
}
