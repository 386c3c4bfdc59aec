//! # Storage Layer
//!
//! Everything atlas persists lives in a flat, string-keyed, string-valued store,
//! the same shape as a browser's local storage. The [`KeyValueStore`] trait is
//! that seam; the session and theme stores only ever talk to it.
//!
//! ## Keys
//!
//! | Key | Value |
//! |-----|-------|
//! | `user` | JSON [`User`](crate::model::User) of the active session, absent when logged out |
//! | `favorites_{id}` | JSON array of [`Country`](crate::model::Country) for user `id` |
//! | `theme` | `"dark"` or `"light"` |
//!
//! ## Failure Policy
//!
//! Reads are forgiving: [`read_json`] treats a missing key, an unreadable entry
//! and a value that does not parse as the same thing, "absent". A corrupt
//! favorites file must never lock a user out of their session. Writes are strict
//! and return errors so callers can keep their in-memory state unchanged.
//!
//! ## Implementations
//!
//! - [`fs_backend::FsBackend`]: one file per key under the data directory, written
//!   atomically.
//! - [`mem_backend::MemBackend`]: in-memory map for tests.

use crate::error::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::rc::Rc;

pub mod fs_backend;
pub mod mem_backend;

pub const USER_KEY: &str = "user";
pub const THEME_KEY: &str = "theme";

/// Storage key for a user's favorites list.
pub fn favorites_key(user_id: &str) -> String {
    format!("favorites_{}", user_id)
}

/// Synchronous string key-value storage.
///
/// All methods take `&self`; implementations use interior mutability since
/// atlas is single-threaded per store.
pub trait KeyValueStore {
    /// Returns Ok(None) if the key is not present.
    fn get(&self, key: &str) -> Result<Option<String>>;

    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<()>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Rc<S> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}

/// Read and parse a JSON value, treating every failure as absence.
pub fn read_json<T, S>(store: &S, key: &str) -> Option<T>
where
    T: DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            tracing::warn!(key, error = %e, "unreadable storage entry, treating as absent");
            return None;
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(key, error = %e, "unparseable storage entry, treating as absent");
            None
        }
    }
}

/// Serialize a value as JSON and store it under `key`.
pub fn write_json<T, S>(store: &S, key: &str, value: &T) -> Result<()>
where
    T: Serialize + ?Sized,
    S: KeyValueStore + ?Sized,
{
    let raw = serde_json::to_string(value)?;
    store.set(key, &raw)?;
    tracing::debug!(key, bytes = raw.len(), "stored entry");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::mem_backend::MemBackend;
    use super::*;
    use crate::model::User;

    #[test]
    fn test_favorites_key_format() {
        assert_eq!(favorites_key("1234567890"), "favorites_1234567890");
    }

    #[test]
    fn test_read_json_missing_is_none() {
        let store = MemBackend::new();
        let user: Option<User> = read_json(&store, USER_KEY);
        assert!(user.is_none());
    }

    #[test]
    fn test_read_json_garbage_is_none() {
        let store = MemBackend::new();
        store.set(USER_KEY, "{not json").unwrap();
        let user: Option<User> = read_json(&store, USER_KEY);
        assert!(user.is_none());
    }

    #[test]
    fn test_read_json_wrong_shape_is_none() {
        let store = MemBackend::new();
        for value in ["42", r#""str""#, r#"{"username":"x"}"#] {
            store.set(USER_KEY, value).unwrap();
            let user: Option<User> = read_json(&store, USER_KEY);
            assert!(user.is_none(), "{} should not parse as a user", value);
        }
    }

    #[test]
    fn test_write_then_read_json() {
        let store = MemBackend::new();
        let user = User::new("42").with_email("x@y.z");
        write_json(&store, USER_KEY, &user).unwrap();
        let loaded: Option<User> = read_json(&store, USER_KEY);
        assert_eq!(loaded, Some(user));
    }

    #[test]
    fn test_shared_backend_through_rc() {
        let backend = Rc::new(MemBackend::new());
        let a = Rc::clone(&backend);
        let b = Rc::clone(&backend);
        a.set("theme", "dark").unwrap();
        assert_eq!(b.get("theme").unwrap(), Some("dark".to_string()));
    }
}
