//! Credential storage: a small key/value abstraction plus a typed cache
//! over the three session keys.
//!
//! TRADE-OFFS
//! ==========
//! The trait exists so session logic stays testable off-browser: the
//! real app uses `localStorage` under `hydrate`, tests and SSR use an
//! in-memory map. Storage writes are best-effort; a full or blocked
//! `localStorage` degrades to signed-out behavior, never a crash.

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use models::User;

use super::clock::parse_rfc3339_ms;

/// Key holding the opaque session token.
pub const TOKEN_KEY: &str = "auth_token";
/// Key holding the JSON-encoded user profile.
pub const USER_KEY: &str = "user_data";
/// Key holding the session expiry, RFC 3339, stored verbatim.
pub const EXPIRES_KEY: &str = "token_expires";

/// String key/value storage for session credentials.
pub trait CredentialStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// `localStorage`-backed store. Grabs the storage handle per call, so
/// the struct itself carries no browser state.
#[cfg(feature = "hydrate")]
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStorageStore;

#[cfg(feature = "hydrate")]
impl LocalStorageStore {
    fn storage() -> Option<web_sys::Storage> {
        web_sys::window().and_then(|w| w.local_storage().ok().flatten())
    }
}

#[cfg(feature = "hydrate")]
impl CredentialStore for LocalStorageStore {
    fn get(&self, key: &str) -> Option<String> {
        Self::storage().and_then(|s| s.get_item(key).ok().flatten())
    }

    fn set(&self, key: &str, value: &str) {
        if let Some(s) = Self::storage() {
            let _ = s.set_item(key, value);
        }
    }

    fn remove(&self, key: &str) {
        if let Some(s) = Self::storage() {
            let _ = s.remove_item(key);
        }
    }
}

/// In-memory store used for SSR and in tests.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl CredentialStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key.to_owned(), value.to_owned());
        }
    }

    fn remove(&self, key: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.remove(key);
        }
    }
}

/// Typed view over the three session keys.
#[derive(Clone)]
pub struct CredentialCache {
    store: Arc<dyn CredentialStore>,
}

impl CredentialCache {
    #[must_use]
    pub fn new(store: Arc<dyn CredentialStore>) -> Self {
        Self { store }
    }

    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.store.get(TOKEN_KEY)
    }

    pub fn set_token(&self, token: &str) {
        self.store.set(TOKEN_KEY, token);
    }

    /// Cached user profile. A malformed stored value clears all session
    /// keys and reads as `None`.
    #[must_use]
    pub fn user(&self) -> Option<User> {
        let raw = self.store.get(USER_KEY)?;
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(_) => {
                self.clear();
                None
            }
        }
    }

    pub fn set_user(&self, user: &User) {
        if let Ok(raw) = serde_json::to_string(user) {
            self.store.set(USER_KEY, &raw);
        }
    }

    /// Stored expiry string, verbatim as the server sent it.
    #[must_use]
    pub fn expires_at_raw(&self) -> Option<String> {
        self.store.get(EXPIRES_KEY)
    }

    /// Stored expiry parsed to epoch milliseconds.
    #[must_use]
    pub fn expires_at_ms(&self) -> Option<i64> {
        parse_rfc3339_ms(&self.store.get(EXPIRES_KEY)?)
    }

    pub fn set_expires_at(&self, raw: &str) {
        self.store.set(EXPIRES_KEY, raw);
    }

    /// Remove all three keys. Idempotent.
    pub fn clear(&self) {
        self.store.remove(TOKEN_KEY);
        self.store.remove(USER_KEY);
        self.store.remove(EXPIRES_KEY);
    }
}
