// Countdown arithmetic and the page config that feeds it.

#![allow(dead_code)]
#[path = "../src/constants.rs"]
mod constants;
#[path = "../src/core/mod.rs"]
mod core;

use crate::core::countdown::{ARRIVED_FIELDS, DEFAULT_TARGET_RFC3339};
use crate::core::{Countdown, CountdownDisplay, FestiveConfig, Season};
use chrono::DateTime;

fn tet() -> Countdown {
    Countdown::default_target().expect("default target is a valid instant")
}

fn at(rfc3339: &str) -> CountdownDisplay {
    let now = DateTime::parse_from_rfc3339(rfc3339).expect("valid timestamp");
    tet().display_at(now)
}

#[test]
fn default_target_is_tet_2026_in_vietnam() {
    let target = tet().target();
    assert_eq!(target.to_rfc3339(), "2026-02-17T00:00:00+07:00");
    assert_eq!(target.offset().local_minus_utc(), 7 * 3600);
    assert_eq!(Countdown::parse(DEFAULT_TARGET_RFC3339), Ok(tet()));
}

#[test]
fn remaining_time_decomposes_exactly() {
    assert_eq!(
        at("2026-02-15T22:58:57+07:00"),
        CountdownDisplay::Remaining {
            days: 1,
            hours: 1,
            minutes: 1,
            seconds: 3,
        }
    );
    // Same instant expressed in UTC.
    assert_eq!(at("2026-02-15T15:58:57Z"), at("2026-02-15T22:58:57+07:00"));
}

#[test]
fn partial_seconds_round_down() {
    assert_eq!(
        at("2026-02-16T23:59:58.500+07:00"),
        CountdownDisplay::Remaining {
            days: 0,
            hours: 0,
            minutes: 0,
            seconds: 1,
        }
    );
}

#[test]
fn arrival_is_reached_at_the_target_instant() {
    assert_eq!(at("2026-02-17T00:00:00+07:00"), CountdownDisplay::Arrived);
    assert_eq!(at("2026-03-01T00:00:00+07:00"), CountdownDisplay::Arrived);
    assert_eq!(CountdownDisplay::Arrived.fields(), ARRIVED_FIELDS.map(str::to_string));
}

#[test]
fn fields_are_zero_padded() {
    let display = CountdownDisplay::from_remaining_ms(5 * 60_000 + 9_000);
    assert_eq!(display.fields(), ["00", "00", "05", "09"].map(str::to_string));
    let far = CountdownDisplay::from_remaining_ms(123 * 86_400_000);
    assert_eq!(far.fields()[0], "123");
}

#[test]
fn epoch_input_matches_datetime_input() {
    let now = DateTime::parse_from_rfc3339("2026-01-01T08:30:00+07:00").expect("valid timestamp");
    let countdown = tet();
    assert_eq!(
        countdown.display_at_epoch_ms(now.timestamp_millis() as f64 + 0.75),
        countdown.display_at(now)
    );
}

#[test]
fn config_defaults_to_tet_with_everything_enabled() {
    let config = FestiveConfig::from_json_or_default(None);
    assert_eq!(config.season, Season::Tet);
    assert!(config.countdown_enabled && config.intro_enabled);
    assert!(config.greetings_enabled && config.wishes_enabled);
    assert_eq!(config.countdown(), Some(tet()));
}

#[test]
fn config_fields_are_optional() {
    let config = FestiveConfig::from_json(r#"{"season":"christmas","wishes_enabled":false}"#)
        .expect("valid config");
    assert_eq!(config.season, Season::Christmas);
    assert!(!config.wishes_enabled);
    assert!(config.countdown_enabled);
    assert_eq!(config.season.dark_mode_class(), "christmas-dark-mode");
}

#[test]
fn bad_config_falls_back_to_defaults() {
    assert_eq!(
        FestiveConfig::from_json_or_default(Some("{not json")),
        FestiveConfig::default()
    );
    assert_eq!(FestiveConfig::from_json_or_default(Some("  ")), FestiveConfig::default());

    let config = FestiveConfig::from_json(r#"{"countdown_target":"soon"}"#).expect("valid json");
    assert_eq!(config.countdown(), Some(tet()));
}
