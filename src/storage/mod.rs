use crate::config::AppConfig;
use crate::error::StorageError;
use crate::models::{Item, OrderRecord};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

pub(crate) const DEFAULT_ITEMS_KEY: &str = "items";
pub(crate) const DEFAULT_ORDER_KEY: &str = "listOrder";

/// String key-value backend. Writes are full-payload overwrites.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn delete(&self, key: &str) -> Result<(), StorageError>;
}

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

/// `window.localStorage`, looked up on every call.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserStore;

impl KeyValueStore for BrowserStore {
    fn get(&self, key: &str) -> Option<String> {
        local_storage()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let storage = local_storage().ok_or(StorageError::Unavailable)?;
        storage.set_item(key, value).map_err(|_| StorageError::Write {
            key: key.to_string(),
        })
    }

    fn delete(&self, key: &str) -> Result<(), StorageError> {
        let storage = local_storage().ok_or(StorageError::Unavailable)?;
        storage.remove_item(key).map_err(|_| StorageError::Write {
            key: key.to_string(),
        })
    }
}

/// In-memory backend. Clones share the same entries.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<(), StorageError> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

/// Typed access to the item list and the order record.
#[derive(Clone, Debug)]
pub struct PersistentStore<S> {
    backend: S,
    items_key: String,
    order_key: String,
}

impl<S: KeyValueStore> PersistentStore<S> {
    pub fn new(backend: S) -> Self {
        Self::with_keys(backend, DEFAULT_ITEMS_KEY, DEFAULT_ORDER_KEY)
    }

    pub fn with_keys(backend: S, items_key: impl Into<String>, order_key: impl Into<String>) -> Self {
        Self {
            backend,
            items_key: items_key.into(),
            order_key: order_key.into(),
        }
    }

    pub fn from_config(backend: S, config: &AppConfig) -> Self {
        Self::with_keys(backend, config.items_key.clone(), config.order_key.clone())
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    fn load_json<T: for<'de> Deserialize<'de>>(&self, key: &str) -> Result<Option<T>, StorageError> {
        let Some(json) = self.backend.get(key) else {
            return Ok(None);
        };
        serde_json::from_str(&json)
            .map(Some)
            .map_err(|source| StorageError::Malformed {
                key: key.to_string(),
                source,
            })
    }

    fn save_json<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let json = serde_json::to_string(value)?;
        self.backend.set(key, &json)
    }

    /// Missing or unreadable data loads as an empty list.
    pub fn load_items(&self) -> Vec<Item> {
        match self.load_json::<Vec<Item>>(&self.items_key) {
            Ok(items) => items.unwrap_or_default(),
            Err(e) => {
                tracing::warn!(error = %e, "discarding stored items");
                Vec::new()
            }
        }
    }

    pub fn save_items(&self, items: &[Item]) {
        if let Err(e) = self.save_json(&self.items_key, &items) {
            tracing::warn!(error = %e, "failed to persist items");
        }
    }

    pub fn load_order(&self) -> Option<OrderRecord> {
        match self.load_json::<OrderRecord>(&self.order_key) {
            Ok(order) => order,
            Err(e) => {
                tracing::warn!(error = %e, "discarding stored list order");
                None
            }
        }
    }

    pub fn save_order(&self, order: &OrderRecord) {
        if let Err(e) = self.save_json(&self.order_key, order) {
            tracing::warn!(error = %e, "failed to persist list order");
        }
    }

    pub fn clear_items(&self) {
        if let Err(e) = self.backend.delete(&self.items_key) {
            tracing::warn!(error = %e, "failed to clear items");
        }
    }

    pub fn clear_order(&self) {
        if let Err(e) = self.backend.delete(&self.order_key) {
            tracing::warn!(error = %e, "failed to clear list order");
        }
    }
}
