//! Key-value persistence for the client.
//!
//! Components depend on the [`StorageService`] trait only; the concrete
//! backend is chosen once by [`storage_service_factory`] and installed at the
//! application root with [`provide_storage`].

mod local;
mod memory;

pub use local::LocalStorageService;
pub use memory::MemoryStorageService;

use leptos::prelude::*;
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage should be provided only once, at the application root")]
    AlreadyProvided,
}

/// String key-value store. No schema, no expiry.
pub trait StorageService: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// Handle to the storage service kept in the reactive context
#[derive(Clone)]
pub struct StorageContext {
    service: Arc<dyn StorageService>,
}

impl StorageContext {
    pub fn new(service: Arc<dyn StorageService>) -> Self {
        Self { service }
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.service.get(key)
    }

    pub fn set(&self, key: &str, value: &str) {
        self.service.set(key, value);
    }

    pub fn remove(&self, key: &str) {
        self.service.remove(key);
    }

    /// Read and deserialize a JSON value; unreadable entries are treated as absent
    pub fn get_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.service.get(key)?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                log::warn!("Ignoring malformed storage entry '{}': {}", key, e);
                None
            }
        }
    }

    pub fn set_json<T: Serialize>(&self, key: &str, value: &T) {
        match serde_json::to_string(value) {
            Ok(raw) => self.service.set(key, &raw),
            Err(e) => log::error!("Failed to serialize storage entry '{}': {}", key, e),
        }
    }
}

/// Browser local storage when available, in-memory otherwise
pub fn storage_service_factory() -> Arc<dyn StorageService> {
    if LocalStorageService::is_available() {
        Arc::new(LocalStorageService)
    } else {
        log::warn!("localStorage is not available, falling back to in-memory storage");
        Arc::new(MemoryStorageService::new())
    }
}

/// Install the factory-selected storage at the root of the component tree
pub fn provide_storage() -> Result<(), StorageError> {
    provide_storage_with(storage_service_factory())
}

pub fn provide_storage_with(service: Arc<dyn StorageService>) -> Result<(), StorageError> {
    if use_context::<StorageContext>().is_some() {
        return Err(StorageError::AlreadyProvided);
    }
    provide_context(StorageContext::new(service));
    Ok(())
}

pub fn use_storage() -> StorageContext {
    use_context::<StorageContext>().expect("StorageContext not provided; call provide_storage() in App")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Entry {
        name: String,
        count: u32,
    }

    fn memory_context() -> StorageContext {
        StorageContext::new(Arc::new(MemoryStorageService::new()))
    }

    #[test]
    fn json_round_trip_and_malformed_entry() {
        let storage = memory_context();
        let entry = Entry {
            name: "a".to_string(),
            count: 2,
        };
        storage.set_json("entry", &entry);
        assert_eq!(storage.get_json::<Entry>("entry"), Some(entry));

        storage.set("entry", "{not json");
        assert_eq!(storage.get_json::<Entry>("entry"), None);
        assert_eq!(storage.get("entry").as_deref(), Some("{not json"));
    }

    #[test]
    fn storage_can_be_provided_once() {
        let owner = Owner::new();
        owner.with(|| {
            assert!(provide_storage_with(Arc::new(MemoryStorageService::new())).is_ok());
            let second = provide_storage_with(Arc::new(MemoryStorageService::new()));
            assert!(matches!(second, Err(StorageError::AlreadyProvided)));

            let storage = use_storage();
            storage.set("k", "v");
            assert_eq!(use_storage().get("k").as_deref(), Some("v"));
        });
    }
}
