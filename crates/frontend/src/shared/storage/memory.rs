use super::StorageService;
use std::collections::HashMap;
use std::sync::Mutex;

/// Process-local storage, used when localStorage is unavailable and in tests
#[derive(Debug, Default)]
pub struct MemoryStorageService {
    items: Mutex<HashMap<String, String>>,
}

impl MemoryStorageService {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageService for MemoryStorageService {
    fn get(&self, key: &str) -> Option<String> {
        self.items.lock().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        if let Ok(mut items) = self.items.lock() {
            items.insert(key.to_string(), value.to_string());
        }
    }

    fn remove(&self, key: &str) {
        if let Ok(mut items) = self.items.lock() {
            items.remove(key);
        }
    }
}
