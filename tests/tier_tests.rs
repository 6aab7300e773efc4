// Device tier classification and the effect budgets derived from it.

#![allow(dead_code)]
#[path = "../src/constants.rs"]
mod constants;
#[path = "../src/core/mod.rs"]
mod core;

use crate::constants::MODAL_SMALL_VIEWPORT_PX;
use crate::core::tier::is_mobile_user_agent;
use crate::core::{DeviceSignals, DeviceTier, PerfSettings};

const DESKTOP_UA: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0 Safari/537.36";
const IPHONE_UA: &str =
    "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) AppleWebKit/605.1.15 Mobile/15E148";

fn signals(cores: u32, ua: &str, width: f64) -> DeviceSignals {
    DeviceSignals {
        hardware_concurrency: cores,
        user_agent: ua.to_string(),
        viewport_width: width,
        prefers_reduced_motion: false,
    }
}

#[test]
fn desktop_tiers_follow_core_count() {
    assert_eq!(DeviceTier::classify(&signals(2, DESKTOP_UA, 1920.0)), DeviceTier::VeryLow);
    assert_eq!(DeviceTier::classify(&signals(4, DESKTOP_UA, 1920.0)), DeviceTier::Low);
    assert_eq!(DeviceTier::classify(&signals(8, DESKTOP_UA, 1920.0)), DeviceTier::High);
}

#[test]
fn unknown_core_count_is_not_low_end() {
    assert_eq!(DeviceTier::classify(&signals(0, DESKTOP_UA, 1920.0)), DeviceTier::High);
}

#[test]
fn reduced_motion_always_means_very_low() {
    let mut s = signals(16, DESKTOP_UA, 2560.0);
    s.prefers_reduced_motion = true;
    assert_eq!(DeviceTier::classify(&s), DeviceTier::VeryLow);
}

#[test]
fn mobile_devices_are_never_high() {
    assert_eq!(DeviceTier::classify(&signals(8, IPHONE_UA, 390.0)), DeviceTier::VeryLow);
    assert_eq!(DeviceTier::classify(&signals(8, IPHONE_UA, 820.0)), DeviceTier::Low);
}

#[test]
fn modal_uses_a_wider_small_viewport() {
    let s = signals(8, IPHONE_UA, 450.0);
    assert_eq!(DeviceTier::classify(&s), DeviceTier::Low);
    assert_eq!(DeviceTier::classify_modal(&s), DeviceTier::VeryLow);
    assert!(s.viewport_width < MODAL_SMALL_VIEWPORT_PX);
}

#[test]
fn modal_tier_ignores_reduced_motion() {
    let mut s = signals(8, DESKTOP_UA, 1920.0);
    s.prefers_reduced_motion = true;
    assert_eq!(DeviceTier::classify(&s), DeviceTier::VeryLow);
    assert_eq!(DeviceTier::classify_modal(&s), DeviceTier::High);
}

#[test]
fn user_agent_markers_are_case_insensitive() {
    assert!(is_mobile_user_agent("Opera Mini/8.0"));
    assert!(is_mobile_user_agent("Mozilla/5.0 (Linux; ANDROID 14)"));
    assert!(!is_mobile_user_agent(DESKTOP_UA));
}

#[test]
fn budgets_shrink_monotonically_with_tier() {
    let high = PerfSettings::for_tier(DeviceTier::High, false);
    let low = PerfSettings::for_tier(DeviceTier::Low, false);
    let very_low = PerfSettings::for_tier(DeviceTier::VeryLow, false);

    for (better, worse) in [(&high, &low), (&low, &very_low)] {
        assert!(worse.petal_count <= better.petal_count);
        assert!(worse.firework_interval_ms >= better.firework_interval_ms);
        assert!(worse.lixi_interval_ms >= better.lixi_interval_ms);
        assert!(worse.max_cursor_flowers <= better.max_cursor_flowers);
        assert!(worse.firework_spark_scale <= better.firework_spark_scale);
        assert!(worse.welcome_bursts <= better.welcome_bursts);
        assert!(!worse.firework_enabled || better.firework_enabled);
        assert!(!worse.bottom_firework_enabled || better.bottom_firework_enabled);
        assert!(!worse.cursor_trail_enabled || better.cursor_trail_enabled);
        assert!(!worse.lixi_enabled || better.lixi_enabled);
    }
}

#[test]
fn very_low_tier_keeps_only_petals() {
    let perf = PerfSettings::for_tier(DeviceTier::VeryLow, false);
    assert_eq!(perf.petal_count, 5);
    assert!(!perf.firework_enabled);
    assert!(!perf.bottom_firework_enabled);
    assert!(!perf.cursor_trail_enabled);
    assert!(!perf.lixi_enabled);
}

#[test]
fn detect_disables_cursor_trail_on_mobile() {
    let perf = PerfSettings::detect(&signals(8, IPHONE_UA, 820.0));
    assert_eq!(perf.tier, DeviceTier::Low);
    assert!(!perf.cursor_trail_enabled);
    assert!(perf.firework_enabled);
}
