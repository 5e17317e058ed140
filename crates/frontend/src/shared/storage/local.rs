use super::StorageService;
use web_sys::window;

fn get_local_storage() -> Option<web_sys::Storage> {
    window()?.local_storage().ok()?
}

/// `window.localStorage` backed storage.
///
/// Holds no handle; the storage object is looked up on each call.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorageService;

impl LocalStorageService {
    pub fn is_available() -> bool {
        get_local_storage().is_some()
    }
}

impl StorageService for LocalStorageService {
    fn get(&self, key: &str) -> Option<String> {
        get_local_storage()?.get_item(key).ok()?
    }

    fn set(&self, key: &str, value: &str) {
        if let Some(storage) = get_local_storage() {
            if storage.set_item(key, value).is_err() {
                log::warn!("localStorage rejected write for key '{}'", key);
            }
        }
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = get_local_storage() {
            let _ = storage.remove_item(key);
        }
    }
}
