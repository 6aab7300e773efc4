// Per-tab "already shown" flags for one-time effects.

use fnv::{FnvHashMap, FnvHashSet};

/// Key/value backing for session flags (sessionStorage in the browser).
pub trait SessionStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
}

/// In-memory store, used when sessionStorage is unavailable and in tests.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    values: FnvHashMap<String, String>,
}

impl SessionStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SessionFlag {
    IntroShown,
    ChristmasIntroShown,
    CountdownClosed,
    WelcomeShown,
}

impl SessionFlag {
    pub fn storage_key(self) -> &'static str {
        match self {
            SessionFlag::IntroShown => "tet2026_intro_shown",
            SessionFlag::ChristmasIntroShown => "christmas2025_intro_shown",
            SessionFlag::CountdownClosed => "tet_countdown_closed",
            SessionFlag::WelcomeShown => "tet_firework_welcomed",
        }
    }
}

const SHOWN: &str = "true";

/// Session-scoped one-shot state. Flags are cached locally so a failing
/// store still suppresses repeats for the lifetime of the page.
pub struct SessionEffectsState<S: SessionStore> {
    store: S,
    shown: FnvHashSet<SessionFlag>,
}

impl<S: SessionStore> SessionEffectsState<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            shown: FnvHashSet::default(),
        }
    }

    pub fn has_shown(&self, flag: SessionFlag) -> bool {
        self.shown.contains(&flag) || self.store.get(flag.storage_key()).as_deref() == Some(SHOWN)
    }

    pub fn mark_shown(&mut self, flag: SessionFlag) {
        self.shown.insert(flag);
        self.store.set(flag.storage_key(), SHOWN);
    }

    /// Returns `true` exactly once per session for `flag`, marking it shown.
    pub fn first_time(&mut self, flag: SessionFlag) -> bool {
        if self.has_shown(flag) {
            return false;
        }
        self.mark_shown(flag);
        true
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
