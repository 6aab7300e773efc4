use crate::core::greeting::PageCues;
use crate::core::scheduler::{EffectScheduler, FrameInput};
use crate::dom;
use crate::surface::DomSurface;
use glam::Vec2;
use rand::rngs::StdRng;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub type SharedEffects = Rc<RefCell<EffectContext>>;

/// Scheduler plus the DOM it draws into, driven once per animation frame.
pub struct EffectContext {
    pub scheduler: EffectScheduler<StdRng>,
    pub surface: DomSurface,
    window: web::Window,
    document: web::Document,
    /// Path the effects were started on; navigating away tears them down.
    start_path: String,
    stopped: bool,
}

impl EffectContext {
    pub fn new(
        scheduler: EffectScheduler<StdRng>,
        surface: DomSurface,
        window: web::Window,
        document: web::Document,
    ) -> Self {
        Self {
            scheduler,
            surface,
            window,
            document,
            start_path: dom::pathname(),
            stopped: false,
        }
    }

    #[inline]
    pub fn now_ms() -> f64 {
        instant::now()
    }

    pub fn viewport(&self) -> Vec2 {
        dom::viewport(&self.window)
    }

    /// Advance one tick. Returns `false` once the loop should stop.
    pub fn frame(&mut self) -> bool {
        if self.stopped {
            return false;
        }
        if dom::pathname() != self.start_path {
            log::info!("[scheduler] route changed; stopping effects");
            self.shutdown();
            return false;
        }
        let input = FrameInput {
            now_ms: Self::now_ms(),
            tab_visible: dom::tab_visible(&self.document),
            viewport: self.viewport(),
        };
        let report = self.scheduler.tick(input, &mut self.surface);
        if report.expired > 0 || report.spawned > 0 {
            log::debug!(
                "[scheduler] spawned={} expired={} live={}",
                report.spawned,
                report.expired,
                self.scheduler.live_count()
            );
        }
        true
    }

    pub fn schedule_cues(&mut self, cues: &PageCues) {
        let now = Self::now_ms();
        for (delay, cue) in cues {
            self.scheduler.schedule(*cue, *delay, now);
        }
    }

    pub fn celebrate(&mut self) {
        self.scheduler.celebrate(Self::now_ms());
    }

    pub fn spawn_cursor_flower(&mut self, at: Vec2) {
        if self.stopped {
            return;
        }
        self.scheduler
            .spawn_cursor_flower(at, Self::now_ms(), &mut self.surface);
    }

    pub fn shutdown(&mut self) {
        if self.stopped {
            return;
        }
        self.scheduler.teardown(&mut self.surface);
        self.surface.unmount();
        self.stopped = true;
    }
}

pub fn start_loop(ctx: SharedEffects) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        if !ctx.borrow_mut().frame() {
            return;
        }
        if let (Some(w), Some(cb)) = (web::window(), tick_clone.borrow().as_ref()) {
            _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
        }
    }) as Box<dyn FnMut()>));
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    };
}
