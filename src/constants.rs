/// Overlay, timing and threshold constants for the festive layer.
///
/// These keep magic numbers out of the scheduler and UI code. Durations are
/// milliseconds unless the name says otherwise.
// Overlay containers and page elements
pub const PETAL_CONTAINER_ID: &str = "tet-petal-container";
pub const FIREWORK_CONTAINER_ID: &str = "tet-firework-container";
pub const SNOW_CONTAINER_ID: &str = "snow-container";
pub const COUNTDOWN_ID: &str = "tet-countdown";
pub const INTRO_OVERLAY_ID: &str = "tet-greeting-overlay";
pub const CHRISTMAS_GREETING_ID: &str = "christmas-greeting";
pub const STYLE_ELEMENT_ID: &str = "festive-styles";
pub const CONFIG_SCRIPT_ID: &str = "festive-config";

// Stacking order (topmost first)
pub const Z_TOP: i64 = 2147483647;
pub const Z_PETALS: i64 = 2147483646;
pub const Z_FIREWORKS: i64 = 2147483645;
pub const Z_LIXI: i64 = 2147483644;
pub const Z_LANTERN: i64 = 999;

// Device tier thresholds
pub const VERY_LOW_MAX_CONCURRENCY: u32 = 2;
pub const LOW_MAX_CONCURRENCY: u32 = 4;
pub const SMALL_VIEWPORT_PX: f64 = 400.0;
pub const MODAL_SMALL_VIEWPORT_PX: f64 = 500.0;

// Particle lifetimes
pub const FIREWORK_TTL_MS: u64 = 3500;
pub const EXPLOSION_TTL_MS: u64 = 3000;
pub const LIXI_TTL_MS: u64 = 15000;
pub const CURSOR_FLOWER_TTL_MS: u64 = 1200;
pub const CURSOR_FLOWER_FADE_DELAY_MS: i32 = 100;
pub const MODAL_FIREWORK_TTL_MS: u64 = 2500;

// Rockets climb a fixed number of pixels per animation step
pub const ROCKET_STEP_MS: f64 = 16.0;
pub const ROCKET_SPEED_MIN_PX: f32 = 8.0;
pub const ROCKET_SPEED_SPAN_PX: f32 = 4.0;

// Ambient generators
pub const LIXI_CHANCE: f64 = 0.3;
pub const SNOWFLAKE_COUNT: u32 = 25;

// Cursor trail
pub const CURSOR_THROTTLE_MS: f64 = 50.0;
pub const CURSOR_MIN_TRAVEL_PX: f32 = 20.0;

// Welcome burst and initial salvo
pub const WELCOME_INTERVAL_HIGH_MS: u64 = 500;
pub const WELCOME_INTERVAL_LOW_MS: u64 = 800;
pub const WELCOME_STAGGER_MS: u64 = 150;
pub const SALVO_START_MS: u64 = 1000;
pub const SALVO_STAGGER_MS: u64 = 500;
pub const SALVO_ROCKET_START_MS: u64 = 2000;
pub const SALVO_ROCKET_STAGGER_MS: u64 = 800;

// Celebration fired when a superadmin wish is opened
pub const CELEBRATION_VOLLEYS: u64 = 5;
pub const CELEBRATION_STAGGER_MS: u64 = 300;

// Intro overlay timeline
pub const INTRO_FADE_IN_DELAY_MS: i32 = 300;
pub const INTRO_HOLD_MS: i32 = 4000;
pub const INTRO_FADE_OUT_MS: i32 = 600;
pub const CHRISTMAS_FADE_IN_DELAY_MS: i32 = 500;
pub const CHRISTMAS_HOLD_MS: i32 = 3000;
pub const CHRISTMAS_FADE_OUT_MS: i32 = 2000;

// Countdown
pub const COUNTDOWN_REFRESH_MS: i32 = 1000;

// Greeting / wish glue
pub const GREETING_CHECK_DELAY_MS: i32 = 1000;
pub const WISH_STATS_DELAY_MS: i32 = 500;
pub const MODAL_OPEN_DELAY_MS: i32 = 100;
pub const MODAL_CLOSE_MS: i32 = 500;
pub const STATUS_CLOSE_DELAY_MS: i32 = 2000;
pub const ENVELOPE_STAGGER_MS: i32 = 100;
pub const ENVELOPE_OPEN_DELAY_MS: i32 = 50;
pub const SEARCH_DEBOUNCE_MS: i32 = 300;
pub const SEARCH_MIN_CHARS: usize = 2;
pub const WISH_MAX_CHARS: usize = 500;
pub const DISPLAY_NAME_MAX_CHARS: usize = 100;
pub const WISH_LIMIT_MAX: u32 = 100;
pub const SUPPORTERS_PER_PAGE: usize = 6;
pub const UNREAD_BADGE_CAP: u32 = 99;
