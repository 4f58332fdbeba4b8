//! localStorage-backed session persistence

use clinic_core::session::SessionStorage;

/// [`SessionStorage`] over `window.localStorage`. Every accessor is
/// soft-failing: a browser with storage disabled degrades to an
/// in-memory-only session.
#[derive(Debug, Default)]
pub struct LocalStorage;

impl LocalStorage {
    fn backing(&self) -> Option<web_sys::Storage> {
        web_sys::window().and_then(|w| w.local_storage().ok().flatten())
    }
}

impl SessionStorage for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.backing()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) {
        match self.backing() {
            Some(storage) => {
                if storage.set_item(key, value).is_err() {
                    tracing::warn!("Failed to persist {} to localStorage", key);
                }
            }
            None => tracing::warn!("localStorage unavailable, session will not persist"),
        }
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = self.backing() {
            let _ = storage.remove_item(key);
        }
    }
}
