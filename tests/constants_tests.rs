// Host-side tests for constants and their relationships.
// The main crate is wasm-only, so the constants module is included directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}

use constants::*;

#[test]
#[allow(clippy::assertions_on_constants)]
fn overlays_stack_in_the_documented_order() {
    assert!(Z_TOP > Z_PETALS);
    assert!(Z_PETALS > Z_FIREWORKS);
    assert!(Z_FIREWORKS > Z_LIXI);
    assert!(Z_LIXI > Z_LANTERN);
    assert_eq!(Z_TOP, i32::MAX as i64);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn tier_thresholds_are_ordered() {
    assert!(VERY_LOW_MAX_CONCURRENCY < LOW_MAX_CONCURRENCY);
    assert!(SMALL_VIEWPORT_PX < MODAL_SMALL_VIEWPORT_PX);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn lifetimes_cover_their_animations() {
    // Burst containers outlive their longest spark animation (2.5s willow).
    assert!(FIREWORK_TTL_MS >= 2500);
    assert!(EXPLOSION_TTL_MS >= 2000);
    assert!(MODAL_FIREWORK_TTL_MS >= 1800);
    // Floating icons rise for at most 13s.
    assert!(LIXI_TTL_MS >= 13_000);
    assert!((CURSOR_FLOWER_FADE_DELAY_MS as u64) < CURSOR_FLOWER_TTL_MS);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn timings_are_positive() {
    assert!(ROCKET_STEP_MS > 0.0);
    assert!(ROCKET_SPEED_MIN_PX > 0.0);
    assert!(CURSOR_THROTTLE_MS > 0.0);
    assert!(CURSOR_MIN_TRAVEL_PX > 0.0);
    assert!(COUNTDOWN_REFRESH_MS > 0);
    assert!(SEARCH_DEBOUNCE_MS > 0);
    assert!(WELCOME_INTERVAL_LOW_MS > WELCOME_INTERVAL_HIGH_MS);
    assert!(SALVO_ROCKET_START_MS > SALVO_START_MS);
    assert!(INTRO_HOLD_MS > INTRO_FADE_IN_DELAY_MS);
    assert!(CHRISTMAS_HOLD_MS > CHRISTMAS_FADE_IN_DELAY_MS);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn limits_are_consistent() {
    assert!(LIXI_CHANCE > 0.0 && LIXI_CHANCE <= 1.0);
    assert!(SEARCH_MIN_CHARS >= 1);
    assert!(WISH_MAX_CHARS > DISPLAY_NAME_MAX_CHARS);
    assert!(SUPPORTERS_PER_PAGE > 0);
    assert!(UNREAD_BADGE_CAP >= 9);
    assert!(WISH_LIMIT_MAX > 0);
}
