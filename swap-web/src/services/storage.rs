//! `localStorage` wallet selection store

use gloo_utils::window;
use lib_core::{Error, Result, SelectionStore};
use web_sys::Storage;

/// Persists the selected connector under one `localStorage` key.
#[derive(Debug, Clone)]
pub struct LocalStorageStore {
    key: String,
}

impl LocalStorageStore {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    fn storage(&self) -> Result<Storage> {
        window()
            .local_storage()
            .map_err(|e| Error::Storage(format!("{:?}", e)))?
            .ok_or_else(|| Error::Storage("localStorage is unavailable".to_string()))
    }
}

impl SelectionStore for LocalStorageStore {
    fn load(&self) -> Result<Option<String>> {
        self.storage()?
            .get_item(&self.key)
            .map_err(|e| Error::Storage(format!("{:?}", e)))
    }

    fn save(&self, value: &str) -> Result<()> {
        self.storage()?
            .set_item(&self.key, value)
            .map_err(|e| Error::Storage(format!("{:?}", e)))
    }

    fn clear(&self) -> Result<()> {
        self.storage()?
            .remove_item(&self.key)
            .map_err(|e| Error::Storage(format!("{:?}", e)))
    }
}
