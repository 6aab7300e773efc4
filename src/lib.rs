#![cfg(target_arch = "wasm32")]
use crate::constants::{
    CONFIG_SCRIPT_ID, FIREWORK_CONTAINER_ID, GREETING_CHECK_DELAY_MS, PETAL_CONTAINER_ID,
    SNOWFLAKE_COUNT, SNOW_CONTAINER_ID, STYLE_ELEMENT_ID, Z_FIREWORKS, Z_PETALS, Z_TOP,
};
use crate::core::{
    effects_allowed, DeviceSignals, DeviceTier, EffectScheduler, FestiveConfig, Layer, PageKind,
    PerfSettings, Season, SessionEffectsState, SessionFlag,
};
use crate::frame::{EffectContext, SharedEffects};
use crate::storage::{BrowserSessionStore, SharedSession};
use crate::surface::DomSurface;
use crate::ui::countdown::CountdownWidget;
use crate::ui::greeting::SharedGreeting;
use crate::ui::wishes::WishMailbox;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod constants;
mod core;
mod dom;
mod events;
mod frame;
mod markup;
mod net;
mod overlay;
mod storage;
mod surface;
mod timers;
mod ui;

/// Everything that has to outlive `init`: the effect loop state and the
/// page widgets whose listeners unregister on drop.
struct App {
    _effects: SharedEffects,
    _session: SharedSession,
    _countdown: Option<CountdownWidget>,
    _greeting: Option<SharedGreeting>,
    _mailbox: Option<WishMailbox>,
}

thread_local! {
    static APP: RefCell<Option<App>> = const { RefCell::new(None) };
}

fn device_signals(window: &web::Window) -> DeviceSignals {
    let navigator = window.navigator();
    let prefers_reduced_motion = window
        .match_media("(prefers-reduced-motion: reduce)")
        .ok()
        .flatten()
        .map(|q| q.matches())
        .unwrap_or(false);
    DeviceSignals {
        hardware_concurrency: navigator.hardware_concurrency().max(0.0) as u32,
        user_agent: navigator.user_agent().unwrap_or_default(),
        viewport_width: window
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0),
        prefers_reduced_motion,
    }
}

// The host page exposes the signed-in user as `window.user`.
fn is_logged_in(window: &web::Window) -> bool {
    js_sys::Reflect::get(window, &"user".into())
        .ok()
        .filter(|u| u.is_object())
        .and_then(|u| js_sys::Reflect::get(&u, &"id".into()).ok())
        .map(|id| id.is_truthy())
        .unwrap_or(false)
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("festive-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let config = FestiveConfig::from_json_or_default(
        dom::config_json(&document, CONFIG_SCRIPT_ID).as_deref(),
    );
    let path = dom::pathname();
    if !effects_allowed(config.season, &path) {
        log::info!("[festive] effects disabled on {}", path);
        return Ok(());
    }
    let dark_mode = dom::dark_mode_enabled(&window, &document);
    if dark_mode {
        dom::add_root_class(&document, config.season.dark_mode_class());
    }
    dom::ensure_stylesheet(&document, STYLE_ELEMENT_ID, markup::STYLESHEET);

    let signals = device_signals(&window);
    let perf = PerfSettings::detect(&signals);
    log::info!(
        "[tier] {} (cores={}, mobile={}, width={})",
        perf.tier.label(),
        signals.hardware_concurrency,
        signals.is_mobile(),
        signals.viewport_width
    );
    if signals.prefers_reduced_motion {
        log::info!("[tier] reduced motion requested, effects kept minimal");
    }

    let session: SharedSession =
        Rc::new(RefCell::new(SessionEffectsState::new(BrowserSessionStore::open())));
    let now = EffectContext::now_ms();
    let mut surface = DomSurface::new(document.clone());
    let mut scheduler = EffectScheduler::new(
        perf.clone(),
        StdRng::from_entropy(),
        dom::viewport(&window),
    );
    let mut countdown = None;

    match config.season {
        Season::Christmas => {
            if surface.mount_layer(Layer::Snow, SNOW_CONTAINER_ID, Z_TOP) {
                let n = scheduler.populate_snow(SNOWFLAKE_COUNT, dark_mode, now, &mut surface);
                log::info!("[snow] {} flakes", n);
            }
            if config.intro_enabled
                && session
                    .borrow_mut()
                    .first_time(SessionFlag::ChristmasIntroShown)
            {
                overlay::show_christmas_intro(&document);
            }
        }
        Season::Tet => {
            let page = PageKind::from_path(&path);
            if !surface.mount_layer(Layer::Petals, PETAL_CONTAINER_ID, Z_PETALS) {
                anyhow::bail!("could not mount petal layer");
            }
            if page.shows_fireworks()
                && !surface.mount_layer(Layer::Fireworks, FIREWORK_CONTAINER_ID, Z_FIREWORKS)
            {
                anyhow::bail!("could not mount firework layer");
            }
            let n = scheduler.populate_petals(now, &mut surface);
            log::info!("[petals] {} petals", n);
            scheduler.start(page, &mut *session.borrow_mut(), now);
            overlay::mount_lanterns(&document);
            if config.intro_enabled && session.borrow_mut().first_time(SessionFlag::IntroShown) {
                overlay::show_tet_intro(&document);
            }
            if let Some(target) = config.countdown().filter(|_| config.countdown_enabled) {
                countdown = ui::countdown::mount(&document, target, session.clone());
            }
        }
    }

    let effects: SharedEffects = Rc::new(RefCell::new(EffectContext::new(
        scheduler,
        surface,
        window.clone(),
        document.clone(),
    )));
    if config.season == Season::Tet && perf.cursor_trail_enabled {
        events::wire_cursor_trail(&document, effects.clone());
    }
    frame::start_loop(effects.clone());

    let logged_in = config.season == Season::Tet && is_logged_in(&window);
    let mailbox = if logged_in && config.wishes_enabled {
        ui::wishes::mount(&document, effects.clone())
    } else {
        None
    };

    APP.with(|app| {
        *app.borrow_mut() = Some(App {
            _effects: effects.clone(),
            _session: session,
            _countdown: countdown,
            _greeting: None,
            _mailbox: mailbox,
        });
    });

    if logged_in && config.greetings_enabled {
        let modal_tier = DeviceTier::classify_modal(&signals);
        timers::set_timeout(GREETING_CHECK_DELAY_MS, move || {
            let greeting = ui::greeting::init(document, effects, modal_tier);
            APP.with(|app| {
                if let Some(app) = app.borrow_mut().as_mut() {
                    app._greeting = Some(greeting);
                }
            });
        });
    }
    Ok(())
}
