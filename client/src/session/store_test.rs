use std::sync::Arc;

use models::{User, UserRole};
use uuid::Uuid;

use super::*;

fn cache() -> (CredentialCache, MemoryStore) {
    let store = MemoryStore::new();
    (CredentialCache::new(Arc::new(store.clone())), store)
}

fn staff_user() -> User {
    User {
        id: Uuid::new_v4(),
        email: "ana@meridian.example".to_owned(),
        full_name: "Ana Ionescu".to_owned(),
        role: UserRole::Editor,
        is_active: true,
    }
}

#[test]
fn round_trips_token_and_expiry_verbatim() {
    let (cache, store) = cache();
    cache.set_token("deadbeef".repeat(8).as_str());
    cache.set_expires_at("2026-03-02T00:00:00Z");

    assert_eq!(cache.token().as_deref(), Some("deadbeef".repeat(8).as_str()));
    assert_eq!(cache.expires_at_raw().as_deref(), Some("2026-03-02T00:00:00Z"));
    // The raw string is what went in, byte for byte.
    assert_eq!(store.get(EXPIRES_KEY).as_deref(), Some("2026-03-02T00:00:00Z"));
}

#[test]
fn round_trips_user_profile() {
    let (cache, _) = cache();
    let user = staff_user();
    cache.set_user(&user);
    assert_eq!(cache.user(), Some(user));
}

#[test]
fn malformed_user_json_reads_as_none_and_clears_everything() {
    let (cache, store) = cache();
    cache.set_token("tok");
    cache.set_expires_at("2026-03-02T00:00:00Z");
    store.set(USER_KEY, "{not json");

    assert_eq!(cache.user(), None);
    assert_eq!(cache.token(), None);
    assert_eq!(cache.expires_at_raw(), None);
}

#[test]
fn expires_at_ms_parses_stored_string() {
    let (cache, _) = cache();
    cache.set_expires_at("2026-01-15T00:00:00Z");
    assert_eq!(cache.expires_at_ms(), Some(1_768_435_200_000));

    cache.set_expires_at("garbage");
    assert_eq!(cache.expires_at_ms(), None);
}

#[test]
fn clear_removes_all_keys_and_is_idempotent() {
    let (cache, _) = cache();
    cache.set_token("tok");
    cache.set_user(&staff_user());
    cache.set_expires_at("2026-03-02T00:00:00Z");

    cache.clear();
    cache.clear();

    assert_eq!(cache.token(), None);
    assert_eq!(cache.user(), None);
    assert_eq!(cache.expires_at_raw(), None);
}
