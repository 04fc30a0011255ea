//! # Wallet Selection Store
//!
//! Durable storage of the last successfully activated connector. The browser
//! app implements [`SelectionStore`] over `window.localStorage`; [`MemoryStore`]
//! serves tests and non-browser hosts.

use std::cell::RefCell;

use crate::error::Result;

/// Key/value slot holding one raw connector identifier.
pub trait SelectionStore {
    /// Read the stored value, if any.
    fn load(&self) -> Result<Option<String>>;

    /// Overwrite the stored value.
    fn save(&self, value: &str) -> Result<()>;

    /// Remove the stored value. Removing an empty slot is not an error.
    fn clear(&self) -> Result<()>;
}

/// In-memory store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    value: RefCell<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(value: impl Into<String>) -> Self {
        Self {
            value: RefCell::new(Some(value.into())),
        }
    }

    pub fn peek(&self) -> Option<String> {
        self.value.borrow().clone()
    }
}

impl SelectionStore for MemoryStore {
    fn load(&self) -> Result<Option<String>> {
        Ok(self.value.borrow().clone())
    }

    fn save(&self, value: &str) -> Result<()> {
        *self.value.borrow_mut() = Some(value.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        self.value.borrow_mut().take();
        Ok(())
    }
}

impl<S: SelectionStore + ?Sized> SelectionStore for std::rc::Rc<S> {
    fn load(&self) -> Result<Option<String>> {
        (**self).load()
    }

    fn save(&self, value: &str) -> Result<()> {
        (**self).save(value)
    }

    fn clear(&self) -> Result<()> {
        (**self).clear()
    }
}
