use std::cell::RefCell;
use std::collections::HashMap;

use crate::error::StoreError;

/// A device-local string key-value store.
///
/// All methods take `&self`; backends use interior mutability where needed.
/// The whole crate is single-threaded, so implementations need not be `Sync`.
pub trait KvStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// In-memory store for tests.
///
/// [`MemoryStore::fail_writes`] makes every subsequent `set`/`remove` fail,
/// which is how tests simulate a full or disabled device store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: RefCell<HashMap<String, String>>,
    write_failure: RefCell<Option<StoreError>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_writes(&self, error: Option<StoreError>) {
        *self.write_failure.borrow_mut() = error;
    }

    /// Seed a raw value, bypassing any write failure.
    pub fn insert_raw(&self, key: &str, value: &str) {
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }

    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.values.borrow().keys().cloned().collect();
        keys.sort();
        keys
    }

    fn check_writable(&self) -> Result<(), StoreError> {
        match self.write_failure.borrow().as_ref() {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.values.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.check_writable()?;
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.check_writable()?;
        self.values.borrow_mut().remove(key);
        Ok(())
    }
}
