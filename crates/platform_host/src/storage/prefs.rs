//! Lightweight preference storage contracts and adapters.

use std::{cell::RefCell, collections::HashMap, rc::Rc};

use serde::{de::DeserializeOwned, Serialize};

use crate::HostError;

/// Host service for lightweight preference values (JSON stored as text per key).
///
/// Calls complete synchronously; the desktop runtime's event loop never suspends.
pub trait PrefsStore {
    /// Loads a raw JSON string for a preference key.
    ///
    /// # Errors
    ///
    /// Returns an error when the backing medium cannot be read.
    fn load_pref(&self, key: &str) -> Result<Option<String>, HostError>;

    /// Saves a raw JSON string for a preference key.
    ///
    /// # Errors
    ///
    /// Returns an error when the backing medium cannot be written.
    fn save_pref(&self, key: &str, raw_json: &str) -> Result<(), HostError>;

    /// Deletes a preference key. Deleting a missing key succeeds.
    ///
    /// # Errors
    ///
    /// Returns an error when the backing medium cannot be written.
    fn delete_pref(&self, key: &str) -> Result<(), HostError>;
}

#[derive(Debug, Clone, Copy, Default)]
/// No-op preference store for hosts without durable storage.
pub struct NoopPrefsStore;

impl PrefsStore for NoopPrefsStore {
    fn load_pref(&self, _key: &str) -> Result<Option<String>, HostError> {
        Ok(None)
    }

    fn save_pref(&self, _key: &str, _raw_json: &str) -> Result<(), HostError> {
        Ok(())
    }

    fn delete_pref(&self, _key: &str) -> Result<(), HostError> {
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
/// In-memory preference store keyed by string. Clones share the same map.
pub struct MemoryPrefsStore {
    inner: Rc<RefCell<HashMap<String, String>>>,
}

impl PrefsStore for MemoryPrefsStore {
    fn load_pref(&self, key: &str) -> Result<Option<String>, HostError> {
        Ok(self.inner.borrow().get(key).cloned())
    }

    fn save_pref(&self, key: &str, raw_json: &str) -> Result<(), HostError> {
        self.inner
            .borrow_mut()
            .insert(key.to_string(), raw_json.to_string());
        Ok(())
    }

    fn delete_pref(&self, key: &str) -> Result<(), HostError> {
        self.inner.borrow_mut().remove(key);
        Ok(())
    }
}

/// Loads and deserializes a typed preference value through a [`PrefsStore`] implementation.
///
/// # Errors
///
/// Returns an error when the store or JSON deserialization fails.
pub fn load_pref_with<S: PrefsStore + ?Sized, T: DeserializeOwned>(
    store: &S,
    key: &str,
) -> Result<Option<T>, HostError> {
    let Some(raw) = store.load_pref(key)? else {
        return Ok(None);
    };
    let value = serde_json::from_str(&raw)?;
    Ok(Some(value))
}

/// Serializes and saves a typed preference value through a [`PrefsStore`] implementation.
///
/// # Errors
///
/// Returns an error when serialization or store save fails.
pub fn save_pref_with<S: PrefsStore + ?Sized, T: Serialize>(
    store: &S,
    key: &str,
    value: &T,
) -> Result<(), HostError> {
    let raw = serde_json::to_string(value)?;
    store.save_pref(key, &raw)
}
