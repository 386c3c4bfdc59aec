use super::KeyValueStore;
use crate::error::{AtlasError, Result};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;

/// In-memory key-value backend for testing.
///
/// Uses `RefCell` for interior mutability since atlas stores are
/// single-threaded. This keeps the `&self` signature of `KeyValueStore`
/// without the overhead of a lock.
#[derive(Default)]
pub struct MemBackend {
    entries: RefCell<HashMap<String, String>>,
    writes: Cell<usize>,
    simulate_write_error: Cell<bool>,
    failing_prefix: RefCell<Option<String>>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        self.simulate_write_error.set(simulate);
    }

    /// Fail writes only for keys starting with `prefix`. `None` clears it.
    pub fn set_failing_prefix(&self, prefix: Option<&str>) {
        *self.failing_prefix.borrow_mut() = prefix.map(str::to_string);
    }

    fn write_fails(&self, key: &str) -> bool {
        self.simulate_write_error.get()
            || self
                .failing_prefix
                .borrow()
                .as_deref()
                .is_some_and(|prefix| key.starts_with(prefix))
    }

    /// Number of successful `set` calls so far.
    pub fn write_count(&self) -> usize {
        self.writes.get()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.borrow().contains_key(key)
    }

    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.entries.borrow().keys().cloned().collect();
        keys.sort();
        keys
    }
}

impl KeyValueStore for MemBackend {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        if self.write_fails(key) {
            return Err(AtlasError::Store("Simulated write error".to_string()));
        }
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        if self.write_fails(key) {
            return Err(AtlasError::Store("Simulated write error".to_string()));
        }
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_remove() {
        let store = MemBackend::new();
        assert_eq!(store.get("theme").unwrap(), None);

        store.set("theme", "dark").unwrap();
        assert_eq!(store.get("theme").unwrap(), Some("dark".to_string()));
        assert_eq!(store.write_count(), 1);

        store.remove("theme").unwrap();
        assert_eq!(store.get("theme").unwrap(), None);

        // Removing again is fine
        store.remove("theme").unwrap();
    }

    #[test]
    fn test_simulated_write_error_leaves_entries_untouched() {
        let store = MemBackend::new();
        store.set("user", "{}").unwrap();
        store.set_simulate_write_error(true);

        assert!(store.set("user", "changed").is_err());
        assert!(store.remove("user").is_err());
        assert_eq!(store.get("user").unwrap(), Some("{}".to_string()));
        assert_eq!(store.write_count(), 1);
    }
}
