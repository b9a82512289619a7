//! Per-browser article flags (bookmarked, liked, viewed) kept as JSON maps
//! in durable key-value storage.

use std::{
    cell::RefCell,
    collections::{BTreeMap, HashMap},
};

/// Minimal slice of the Web Storage API.
pub trait KeyValueStorage {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&self, key: &str, value: &str);
}

impl<S: KeyValueStorage + ?Sized> KeyValueStorage for &S {
    fn get_item(&self, key: &str) -> Option<String> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) {
        (**self).set_item(key, value)
    }
}

/// Process-local storage for tests and the mock build.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: RefCell<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PreferenceKind {
    Bookmarked,
    Liked,
    Viewed,
}

impl PreferenceKind {
    pub const ALL: [PreferenceKind; 3] =
        [PreferenceKind::Bookmarked, PreferenceKind::Liked, PreferenceKind::Viewed];

    pub fn storage_key(&self) -> &'static str {
        match self {
            PreferenceKind::Bookmarked => "bookmarkedArticles",
            PreferenceKind::Liked => "likedArticles",
            PreferenceKind::Viewed => "viewedArticles",
        }
    }

    pub fn from_storage_key(key: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.storage_key() == key)
    }
}

pub type FlagMap = BTreeMap<String, bool>;

/// Read-modify-write access to the flag maps. Each mutation completes inside
/// one synchronous call, so a tab never interleaves two writes.
pub struct PreferenceStore<S> {
    storage: S,
}

impl<S: KeyValueStorage> PreferenceStore<S> {
    pub fn new(storage: S) -> Self {
        PreferenceStore {
            storage,
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Stored map; unreadable JSON counts as empty.
    pub fn read_map(&self, kind: PreferenceKind) -> FlagMap {
        let Some(raw) = self.storage.get_item(kind.storage_key()) else {
            return FlagMap::new();
        };
        match serde_json::from_str::<FlagMap>(&raw) {
            Ok(map) => map,
            Err(err) => {
                tracing::warn!(key = kind.storage_key(), error = %err, "discarding unreadable preference map");
                FlagMap::new()
            },
        }
    }

    fn write_map(&self, kind: PreferenceKind, map: &FlagMap) {
        match serde_json::to_string(map) {
            Ok(json) => self.storage.set_item(kind.storage_key(), &json),
            Err(err) => {
                tracing::error!(key = kind.storage_key(), error = %err, "failed to encode preference map")
            },
        }
    }

    pub fn is_set(&self, kind: PreferenceKind, article_id: &str) -> bool {
        self.read_map(kind)
            .get(article_id)
            .copied()
            .unwrap_or(false)
    }

    /// Set or clear one flag. Clearing removes the key.
    pub fn set(&self, kind: PreferenceKind, article_id: &str, value: bool) {
        let mut map = self.read_map(kind);
        map.retain(|_, flag| *flag);
        if value {
            map.insert(article_id.to_string(), true);
        } else {
            map.remove(article_id);
        }
        self.write_map(kind, &map);
    }

    /// Flip one flag and return its new value.
    pub fn toggle(&self, kind: PreferenceKind, article_id: &str) -> bool {
        let next = !self.is_set(kind, article_id);
        self.set(kind, article_id, next);
        next
    }

    /// Set the flag if it was clear. Returns `true` only for the call that
    /// set it.
    pub fn mark_once(&self, kind: PreferenceKind, article_id: &str) -> bool {
        if self.is_set(kind, article_id) {
            return false;
        }
        self.set(kind, article_id, true);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_twice_restores_map() {
        let store = PreferenceStore::new(MemoryStorage::new());
        store.set(PreferenceKind::Bookmarked, "pol-1", true);
        let before = store.read_map(PreferenceKind::Bookmarked);

        assert!(store.toggle(PreferenceKind::Bookmarked, "tech-2"));
        assert!(!store.toggle(PreferenceKind::Bookmarked, "tech-2"));

        assert_eq!(store.read_map(PreferenceKind::Bookmarked), before);
        assert_eq!(
            store.storage().get_item("bookmarkedArticles").as_deref(),
            Some(r#"{"pol-1":true}"#)
        );
    }

    #[test]
    fn corrupt_map_reads_empty_and_is_overwritten() {
        let storage = MemoryStorage::new();
        storage.set_item("likedArticles", "{not json");
        let store = PreferenceStore::new(&storage);
        assert!(!store.is_set(PreferenceKind::Liked, "pol-1"));
        store.set(PreferenceKind::Liked, "pol-1", true);
        assert_eq!(storage.get_item("likedArticles").as_deref(), Some(r#"{"pol-1":true}"#));
    }

    #[test]
    fn stored_false_entries_are_dropped_on_write() {
        let storage = MemoryStorage::new();
        storage.set_item("viewedArticles", r#"{"a":false,"b":true}"#);
        let store = PreferenceStore::new(&storage);
        assert!(!store.is_set(PreferenceKind::Viewed, "a"));
        assert!(store.mark_once(PreferenceKind::Viewed, "c"));
        assert!(!store.mark_once(PreferenceKind::Viewed, "c"));
        assert_eq!(storage.get_item("viewedArticles").as_deref(), Some(r#"{"b":true,"c":true}"#));
    }

    #[test]
    fn kinds_round_trip_through_storage_keys() {
        for kind in PreferenceKind::ALL {
            assert_eq!(PreferenceKind::from_storage_key(kind.storage_key()), Some(kind));
        }
        assert_eq!(PreferenceKind::from_storage_key("theme"), None);
    }
}
