// Runtime configuration read from an optional JSON block on the host page.

use super::countdown::{Countdown, DEFAULT_TARGET_RFC3339};
use serde::Deserialize;

#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    #[default]
    Tet,
    Christmas,
}

impl Season {
    pub fn dark_mode_class(self) -> &'static str {
        match self {
            Season::Tet => "tet-dark-mode",
            Season::Christmas => "christmas-dark-mode",
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct FestiveConfig {
    pub season: Season,
    /// RFC 3339 instant the countdown runs to.
    pub countdown_target: String,
    pub countdown_enabled: bool,
    pub intro_enabled: bool,
    pub greetings_enabled: bool,
    pub wishes_enabled: bool,
}

impl Default for FestiveConfig {
    fn default() -> Self {
        Self {
            season: Season::Tet,
            countdown_target: DEFAULT_TARGET_RFC3339.to_string(),
            countdown_enabled: true,
            intro_enabled: true,
            greetings_enabled: true,
            wishes_enabled: true,
        }
    }
}

impl FestiveConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Parse the page's config block, falling back to defaults on bad input.
    pub fn from_json_or_default(json: Option<&str>) -> Self {
        match json.map(str::trim).filter(|s| !s.is_empty()) {
            None => Self::default(),
            Some(text) => Self::from_json(text).unwrap_or_else(|e| {
                log::warn!("[config] ignoring invalid festive config: {}", e);
                Self::default()
            }),
        }
    }

    pub fn countdown(&self) -> Option<Countdown> {
        match Countdown::parse(&self.countdown_target) {
            Ok(c) => Some(c),
            Err(e) => {
                log::warn!(
                    "[config] bad countdown target {:?} ({}); using default",
                    self.countdown_target,
                    e
                );
                Countdown::default_target()
            }
        }
    }
}
