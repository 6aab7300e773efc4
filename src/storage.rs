use crate::core::session::{MemoryStore, SessionEffectsState, SessionStore};
use std::cell::RefCell;
use std::rc::Rc;
use web_sys as web;

pub type SharedSession = Rc<RefCell<SessionEffectsState<BrowserSessionStore>>>;

/// `sessionStorage`, falling back to memory when the browser refuses access
/// (private browsing, sandboxed frames).
pub enum BrowserSessionStore {
    Session(web::Storage),
    Memory(MemoryStore),
}

impl BrowserSessionStore {
    pub fn open() -> Self {
        match web::window().and_then(|w| w.session_storage().ok().flatten()) {
            Some(storage) => BrowserSessionStore::Session(storage),
            None => {
                log::warn!("[session] sessionStorage unavailable; flags last for this page only");
                BrowserSessionStore::Memory(MemoryStore::default())
            }
        }
    }
}

impl SessionStore for BrowserSessionStore {
    fn get(&self, key: &str) -> Option<String> {
        match self {
            BrowserSessionStore::Session(s) => s.get_item(key).ok().flatten(),
            BrowserSessionStore::Memory(m) => m.get(key),
        }
    }

    fn set(&mut self, key: &str, value: &str) {
        match self {
            BrowserSessionStore::Session(s) => {
                _ = s.set_item(key, value);
            }
            BrowserSessionStore::Memory(m) => m.set(key, value),
        }
    }
}
