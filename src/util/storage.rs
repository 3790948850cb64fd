//! Durable storage for the session token.
//!
//! SYSTEM CONTEXT
//! ==============
//! The session store persists exactly one entry, `{ "token": "..." }`, under a
//! configured key. In the browser that entry lives in `localStorage`; native
//! builds and tests use `MemoryStorage` behind the same trait.
//!
//! TRADE-OFFS
//! ==========
//! `LocalStorage` looks the `Storage` handle up on every call instead of
//! caching it, so the type stays `Send + Sync` and can live inside a signal.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::state::session::SessionError;

/// Serialized shape of the persisted session entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredToken {
    pub token: String,
}

/// Key/value storage that survives page reloads.
pub trait TokenStorage {
    /// Read the raw value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::StorageUnavailable`] if the backend cannot be reached.
    fn read(&self, key: &str) -> Result<Option<String>, SessionError>;

    /// Overwrite the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::StorageUnavailable`] if the write fails.
    fn write(&mut self, key: &str, value: &str) -> Result<(), SessionError>;

    /// Remove `key`; removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::StorageUnavailable`] if the delete fails.
    fn remove(&mut self, key: &str) -> Result<(), SessionError>;
}

/// Load and parse the stored token entry, if any.
///
/// # Errors
///
/// Propagates storage failures and reports unparseable entries as
/// [`SessionError::StorageCorrupt`].
pub fn load_token<S: TokenStorage + ?Sized>(storage: &S, key: &str) -> Result<Option<StoredToken>, SessionError> {
    let Some(raw) = storage.read(key)? else {
        return Ok(None);
    };
    let entry = serde_json::from_str(&raw).map_err(SessionError::StorageCorrupt)?;
    Ok(Some(entry))
}

/// Serialize and persist `token` under `key`.
///
/// # Errors
///
/// Propagates storage failures.
pub fn save_token<S: TokenStorage + ?Sized>(storage: &mut S, key: &str, token: &str) -> Result<(), SessionError> {
    let raw = serde_json::to_string(&StoredToken { token: token.to_owned() }).map_err(SessionError::StorageCorrupt)?;
    storage.write(key, &raw)
}

/// In-memory storage for native builds and tests.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
    writes: usize,
    removes: usize,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw value under `key`, bypassing the trait.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Seed a raw value without counting it as a write.
    pub fn insert_raw(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_owned(), value.to_owned());
    }

    /// Number of successful `write` calls so far.
    pub fn write_count(&self) -> usize {
        self.writes
    }

    /// Number of `remove` calls so far.
    pub fn remove_count(&self) -> usize {
        self.removes
    }
}

impl TokenStorage for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>, SessionError> {
        Ok(self.entries.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), SessionError> {
        self.entries.insert(key.to_owned(), value.to_owned());
        self.writes += 1;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), SessionError> {
        self.entries.remove(key);
        self.removes += 1;
        Ok(())
    }
}

/// Browser `window.localStorage`.
///
/// Without the `hydrate` feature every call reports the storage as
/// unavailable, which the session store folds into the anonymous state.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStorage;

#[cfg(feature = "hydrate")]
fn browser_storage() -> Result<web_sys::Storage, SessionError> {
    web_sys::window()
        .ok_or_else(|| SessionError::StorageUnavailable("no window".to_owned()))?
        .local_storage()
        .map_err(|e| SessionError::StorageUnavailable(format!("{e:?}")))?
        .ok_or_else(|| SessionError::StorageUnavailable("localStorage disabled".to_owned()))
}

impl TokenStorage for LocalStorage {
    fn read(&self, key: &str) -> Result<Option<String>, SessionError> {
        #[cfg(feature = "hydrate")]
        {
            browser_storage()?
                .get_item(key)
                .map_err(|e| SessionError::StorageUnavailable(format!("{e:?}")))
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = key;
            Err(SessionError::StorageUnavailable("not in a browser".to_owned()))
        }
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), SessionError> {
        #[cfg(feature = "hydrate")]
        {
            browser_storage()?
                .set_item(key, value)
                .map_err(|e| SessionError::StorageUnavailable(format!("{e:?}")))
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (key, value);
            Err(SessionError::StorageUnavailable("not in a browser".to_owned()))
        }
    }

    fn remove(&mut self, key: &str) -> Result<(), SessionError> {
        #[cfg(feature = "hydrate")]
        {
            browser_storage()?
                .remove_item(key)
                .map_err(|e| SessionError::StorageUnavailable(format!("{e:?}")))
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = key;
            Err(SessionError::StorageUnavailable("not in a browser".to_owned()))
        }
    }
}
