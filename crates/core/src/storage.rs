//! Key-value storage used to persist store fields across page reloads

use crate::error::CoreResult;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Minimal `localStorage`-shaped storage backend
#[cfg_attr(test, mockall::automock)]
pub trait KeyValueStorage {
    fn get_item(&self, key: &str) -> CoreResult<Option<String>>;
    fn set_item(&self, key: &str, value: &str) -> CoreResult<()>;
    fn remove_item(&self, key: &str) -> CoreResult<()>;
}

impl<S: KeyValueStorage + ?Sized> KeyValueStorage for Rc<S> {
    fn get_item(&self, key: &str) -> CoreResult<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> CoreResult<()> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> CoreResult<()> {
        (**self).remove_item(key)
    }
}

/// In-memory storage; clones share the same entries
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    items: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> CoreResult<Option<String>> {
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> CoreResult<()> {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> CoreResult<()> {
        self.items.borrow_mut().remove(key);
        Ok(())
    }
}
