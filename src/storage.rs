//! Browser localStorage adapter.

use bizops_core::session::{KeyValueStore, StorageError};
use wasm_bindgen::JsValue;

/// `window.localStorage`, or an error on every call when the browser denies it
pub struct LocalStore {
    storage: Option<web_sys::Storage>,
}

impl LocalStore {
    pub fn new() -> Self {
        let storage = web_sys::window().and_then(|w| w.local_storage().ok().flatten());
        Self { storage }
    }

    fn storage(&self) -> Result<&web_sys::Storage, StorageError> {
        self.storage.as_ref().ok_or_else(|| StorageError("localStorage is not available".to_string()))
    }
}

fn js_error(e: JsValue) -> StorageError {
    StorageError(e.as_string().unwrap_or_else(|| format!("{:?}", e)))
}

impl KeyValueStore for LocalStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.storage()?.get_item(key).map_err(js_error)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.storage()?.set_item(key, value).map_err(js_error)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.storage()?.remove_item(key).map_err(js_error)
    }
}
