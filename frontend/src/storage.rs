use times_roman_shared::preferences::{KeyValueStorage, PreferenceStore};
use web_sys::{window, Storage};

/// `window.localStorage`. Every call re-resolves the handle; storage that is
/// unavailable (private mode, disabled cookies) reads as empty and drops
/// writes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BrowserStorage;

impl BrowserStorage {
    fn handle() -> Option<Storage> {
        window().and_then(|win| win.local_storage().ok().flatten())
    }

    pub fn remove_item(&self, key: &str) {
        if let Some(storage) = Self::handle() {
            let _ = storage.remove_item(key);
        }
    }
}

impl KeyValueStorage for BrowserStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        Self::handle().and_then(|storage| storage.get_item(key).ok().flatten())
    }

    fn set_item(&self, key: &str, value: &str) {
        let Some(storage) = Self::handle() else {
            tracing::warn!(key, "localStorage unavailable, dropping write");
            return;
        };
        if let Err(err) = storage.set_item(key, value) {
            tracing::warn!(key, error = ?err, "localStorage write rejected");
        }
    }
}

pub type BrowserPreferences = PreferenceStore<BrowserStorage>;

pub fn preferences() -> BrowserPreferences {
    PreferenceStore::new(BrowserStorage)
}
