//! Persistent credential store.
//!
//! One opaque bearer token lives under a fixed `localStorage` key. The store
//! is a durable slot and nothing more: no network access, no validation of
//! the token shape. Reads and writes never fail from the caller's point of
//! view; an unavailable storage area behaves like an empty slot.

#[cfg(test)]
#[path = "credentials_test.rs"]
mod credentials_test;

use std::cell::RefCell;

/// `localStorage` key holding the bearer token.
const STORAGE_KEY: &str = "devblog_token";

/// A durable slot for the session's bearer token.
pub trait CredentialStore {
    /// Read the stored token. `None` when nothing is stored or the storage
    /// area is unavailable.
    fn get(&self) -> Option<String>;

    /// Store a token, overwriting any existing value.
    fn set(&self, token: &str);

    /// Remove the stored token. Idempotent.
    fn clear(&self);
}

/// Credential store backed by browser `localStorage`.
///
/// Outside the browser (`csr` feature disabled) the slot reads as empty and
/// writes are no-ops.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalCredentialStore;

impl CredentialStore for LocalCredentialStore {
    fn get(&self) -> Option<String> {
        #[cfg(feature = "csr")]
        {
            let storage = web_sys::window()?.local_storage().ok().flatten()?;
            storage.get_item(STORAGE_KEY).ok().flatten()
        }
        #[cfg(not(feature = "csr"))]
        {
            None
        }
    }

    fn set(&self, token: &str) {
        #[cfg(feature = "csr")]
        {
            if let Some(storage) = web_sys::window().and_then(|w| w.local_storage().ok().flatten()) {
                let _ = storage.set_item(STORAGE_KEY, token);
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = token;
        }
    }

    fn clear(&self) {
        #[cfg(feature = "csr")]
        {
            if let Some(storage) = web_sys::window().and_then(|w| w.local_storage().ok().flatten()) {
                let _ = storage.remove_item(STORAGE_KEY);
            }
        }
    }
}

/// In-memory credential store for unit tests and non-browser builds.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    token: RefCell<Option<String>>,
}

impl MemoryCredentialStore {
    #[must_use]
    pub fn new(token: Option<&str>) -> Self {
        Self {
            token: RefCell::new(token.map(ToOwned::to_owned)),
        }
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn get(&self) -> Option<String> {
        self.token.borrow().clone()
    }

    fn set(&self, token: &str) {
        *self.token.borrow_mut() = Some(token.to_owned());
    }

    fn clear(&self) {
        *self.token.borrow_mut() = None;
    }
}
