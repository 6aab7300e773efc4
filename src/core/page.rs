use super::config::Season;
use super::tier::PerfSettings;

/// Whether any festive layer is mounted on `path`. Problem pages are always
/// left alone; the Tet overlay also skips assignment pages.
pub fn effects_allowed(season: Season, path: &str) -> bool {
    if path.starts_with("/problem/") {
        return false;
    }
    match season {
        Season::Tet => !path.contains("/assignments/"),
        Season::Christmas => true,
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PageKind {
    Home,
    Member,
    About,
    Homework,
    Other,
}

impl PageKind {
    pub fn from_path(path: &str) -> Self {
        if path.is_empty() || path == "/" {
            PageKind::Home
        } else if path.starts_with("/user/") || path.starts_with("/users") {
            PageKind::Member
        } else if path.starts_with("/about") || path.starts_with("/gioi-thieu") {
            PageKind::About
        } else if path.starts_with("/homework") {
            PageKind::Homework
        } else {
            PageKind::Other
        }
    }

    /// Homework pages keep petals but hide the firework layer.
    #[inline]
    pub fn shows_fireworks(self) -> bool {
        self != PageKind::Homework
    }
}

/// Steady-state spawn cadence for the two ambient firework generators.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AmbientRates {
    pub firework_interval_ms: u64,
    pub firework_chance: f64,
    pub rocket_interval_ms: u64,
    pub rocket_chance: f64,
}

impl AmbientRates {
    pub fn for_page(page: PageKind, perf: &PerfSettings) -> Self {
        let mut rates = match page {
            PageKind::Home | PageKind::Member => AmbientRates {
                firework_interval_ms: 3000,
                firework_chance: 0.5,
                rocket_interval_ms: 2500,
                rocket_chance: 0.6,
            },
            PageKind::About => AmbientRates {
                firework_interval_ms: 2000,
                firework_chance: 0.7,
                rocket_interval_ms: 1800,
                rocket_chance: 0.75,
            },
            PageKind::Homework | PageKind::Other => AmbientRates {
                firework_interval_ms: 5000,
                firework_chance: 0.3,
                rocket_interval_ms: 4500,
                rocket_chance: 0.35,
            },
        };
        if perf.tier.is_low_end() {
            rates.firework_interval_ms = rates.firework_interval_ms.max(perf.firework_interval_ms);
            rates.rocket_interval_ms = rates.rocket_interval_ms.max(perf.firework_interval_ms);
            rates.firework_chance *= 0.5;
            rates.rocket_chance *= 0.5;
        }
        rates
    }
}
