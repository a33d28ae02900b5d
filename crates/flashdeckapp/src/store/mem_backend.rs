use super::backend::KeyValueStore;
use crate::error::{FlashdeckError, Result};
use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

/// In-memory key/value backend.
///
/// Uses `RefCell` for interior mutability since the store is single-threaded.
/// Besides backing tests, it models a browser-style origin store: an optional
/// byte quota (keys + values, like `localStorage`) and switchable write
/// failures for exercising error paths.
#[derive(Default)]
pub struct MemBackend {
    items: RefCell<HashMap<String, String>>,
    quota_bytes: Option<usize>,
    simulate_write_error: RefCell<bool>,
    failing_keys: RefCell<HashSet<String>>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quota(mut self, bytes: usize) -> Self {
        self.quota_bytes = Some(bytes);
        self
    }

    /// Enable write error simulation for every key.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        *self.simulate_write_error.borrow_mut() = simulate;
    }

    /// Make writes to a single key fail until `clear_failures` is called.
    pub fn fail_writes_to(&self, key: &str) {
        self.failing_keys.borrow_mut().insert(key.to_string());
    }

    pub fn clear_failures(&self) {
        *self.simulate_write_error.borrow_mut() = false;
        self.failing_keys.borrow_mut().clear();
    }

    /// Test helper to plant a raw payload, bypassing quota and failure checks.
    pub fn insert_raw(&self, key: &str, value: &str) {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }

    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.items.borrow().keys().cloned().collect();
        keys.sort();
        keys
    }

    pub fn used_bytes(&self) -> usize {
        self.items
            .borrow()
            .iter()
            .map(|(k, v)| k.len() + v.len())
            .sum()
    }

    fn check_write(&self, key: &str, value: &str) -> Result<()> {
        if *self.simulate_write_error.borrow() || self.failing_keys.borrow().contains(key) {
            return Err(FlashdeckError::Store("Simulated write error".to_string()));
        }
        if let Some(limit) = self.quota_bytes {
            let current = self.items.borrow().get(key).map(|v| key.len() + v.len());
            let requested = self.used_bytes() - current.unwrap_or(0) + key.len() + value.len();
            if requested > limit {
                return Err(FlashdeckError::QuotaExceeded { requested, limit });
            }
        }
        Ok(())
    }
}

impl KeyValueStore for MemBackend {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.check_write(key, value)?;
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        self.items.borrow_mut().remove(key);
        Ok(())
    }
}
