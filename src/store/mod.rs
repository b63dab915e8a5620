//! Key-value persistence boundary. The backing mechanism is opaque to the
//! rest of the crate; it is injected at construction time rather than picked
//! up from ambient global state.

use std::cell::RefCell;
use std::collections::HashMap;

pub mod adapter;

pub use adapter::MoodStore;

/// Named storage keys. These are the durable contract shared with any other
/// client reading the same records.
pub mod keys {
    pub const MOOD_ENTRIES: &str = "mood-entries";
    pub const USER_PREFERENCES: &str = "user-preferences";
    pub const USER_STATS: &str = "user-stats";
    pub const HAS_SEEN_WELCOME: &str = "has-seen-welcome";
    pub const HAS_SEEN_ONBOARDING: &str = "has-seen-onboarding";
    pub const LAST_MOOD: &str = "lastMood";
    pub const MOOD_HISTORY: &str = "moodHistory";

    pub const ALL: [&str; 7] = [
        MOOD_ENTRIES,
        USER_PREFERENCES,
        USER_STATS,
        HAS_SEEN_WELCOME,
        HAS_SEEN_ONBOARDING,
        LAST_MOOD,
        MOOD_HISTORY,
    ];
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("storage backend error: {0}")]
    Backend(#[from] anyhow::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Opaque synchronous string-keyed storage. Every operation is a single
/// local attempt; there is no retry or transaction concept, and the crate
/// assumes one writer per process.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>>;
    fn set(&self, key: &str, value: &str) -> StoreResult<()>;
    fn remove(&self, key: &str) -> StoreResult<()>;
    fn clear(&self) -> StoreResult<()>;
}

/// In-process map store. Single-threaded by design, matching the crate's
/// synchronous execution model.
#[derive(Debug, Default)]
pub struct MemoryStore {
    data: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.data.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        self.data
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        self.data.borrow_mut().remove(key);
        Ok(())
    }

    fn clear(&self) -> StoreResult<()> {
        self.data.borrow_mut().clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_get_remove_round_trip() {
        let store = MemoryStore::new();
        assert!(store.get("missing").unwrap().is_none());

        store.set("k", "v").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));

        store.set("k", "v2").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v2"));

        store.remove("k").unwrap();
        assert!(store.get("k").unwrap().is_none());
    }

    #[test]
    fn clear_drops_everything() {
        let store = MemoryStore::new();
        store.set("a", "1").unwrap();
        store.set("b", "2").unwrap();
        store.clear().unwrap();
        assert!(store.get("a").unwrap().is_none());
        assert!(store.get("b").unwrap().is_none());
    }
}
