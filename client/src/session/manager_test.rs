use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use models::{LoginResponse, SessionValidationResponse, User, UserRole};
use uuid::Uuid;

use super::*;

fn staff_user() -> User {
    User {
        id: Uuid::new_v4(),
        email: "ana@meridian.example".to_owned(),
        full_name: "Ana Ionescu".to_owned(),
        role: UserRole::Editor,
        is_active: true,
    }
}

fn login_response(expires_at: &str) -> LoginResponse {
    LoginResponse {
        access_token: "a1".repeat(32),
        token_type: "bearer".to_owned(),
        expires_at: expires_at.to_owned(),
        user: staff_user(),
    }
}

// 2026-01-15T12:00:00Z
const MIDDAY_MS: i64 = 1_768_478_400_000;
// 2026-01-16T00:00:00Z, the next UTC midnight after midday.
const MIDNIGHT_MS: i64 = 1_768_521_600_000;

#[test]
fn login_persists_all_keys_and_arms_timer_at_expiry() {
    let manager = SessionManager::new_in_memory();
    manager.apply_login(&login_response("2026-01-16T00:00:00Z"), MIDDAY_MS);

    assert_eq!(manager.cache().token().as_deref(), Some("a1".repeat(32).as_str()));
    assert!(manager.cache().user().is_some());
    assert_eq!(manager.cache().expires_at_raw().as_deref(), Some("2026-01-16T00:00:00Z"));
    // Deadline equals the server-issued expiry exactly.
    assert_eq!(manager.timer_deadline_ms(), Some(MIDNIGHT_MS));
}

#[test]
fn midday_login_deadline_fires_at_next_utc_midnight_and_clears_storage() {
    let manager = SessionManager::new_in_memory();
    let generation = {
        manager.apply_login(&login_response("2026-01-16T00:00:00Z"), MIDDAY_MS);
        // The armed generation is the latest one.
        manager.arm_auto_logout(MIDNIGHT_MS, MIDDAY_MS)
    };
    assert_eq!(manager.timer_deadline_ms(), Some(MIDNIGHT_MS));

    manager.timer_fired(generation);
    assert_eq!(manager.cache().token(), None);
    assert_eq!(manager.cache().user(), None);
    assert_eq!(manager.cache().expires_at_raw(), None);
    assert_eq!(manager.timer_deadline_ms(), None);
}

#[test]
fn clear_local_removes_keys_regardless_of_server() {
    let manager = SessionManager::new_in_memory();
    manager.apply_login(&login_response("2026-01-16T00:00:00Z"), MIDDAY_MS);

    // The logout network call is best-effort; local clearing is not.
    manager.clear_local();
    assert_eq!(manager.cache().token(), None);
    assert_eq!(manager.cache().user(), None);
    assert_eq!(manager.cache().expires_at_raw(), None);
    assert_eq!(manager.timer_deadline_ms(), None);
}

#[test]
fn is_authenticated_true_before_expiry_false_after() {
    let manager = SessionManager::new_in_memory();
    manager.apply_login(&login_response("2026-01-16T00:00:00Z"), MIDDAY_MS);

    assert!(manager.is_authenticated(MIDDAY_MS));
    assert!(manager.is_authenticated(MIDNIGHT_MS - 1));
    assert!(!manager.is_authenticated(MIDNIGHT_MS));
}

#[test]
fn expired_session_is_lazily_cleaned_and_check_is_idempotent() {
    let manager = SessionManager::new_in_memory();
    manager.apply_login(&login_response("2026-01-16T00:00:00Z"), MIDDAY_MS);

    assert!(!manager.is_authenticated(MIDNIGHT_MS + 1));
    assert_eq!(manager.cache().token(), None);
    assert_eq!(manager.cache().user(), None);
    assert_eq!(manager.cache().expires_at_raw(), None);

    // Second call on the already-cleared cache is safe.
    assert!(!manager.is_authenticated(MIDNIGHT_MS + 1));
}

#[test]
fn unparseable_expiry_counts_as_expired() {
    let manager = SessionManager::new_in_memory();
    manager.cache().set_token("tok");
    manager.cache().set_expires_at("not a timestamp");

    assert!(!manager.is_authenticated(MIDDAY_MS));
    assert_eq!(manager.cache().token(), None);
}

#[test]
fn no_token_is_not_authenticated() {
    let manager = SessionManager::new_in_memory();
    assert!(!manager.is_authenticated(MIDDAY_MS));
}

#[test]
fn rejection_clears_credentials_and_notifies_listeners() {
    let manager = SessionManager::new_in_memory();
    manager.apply_login(&login_response("2026-01-16T00:00:00Z"), MIDDAY_MS);

    let fired = Arc::new(AtomicUsize::new(0));
    let fired_in_listener = fired.clone();
    manager.on_session_expired(move || {
        fired_in_listener.fetch_add(1, Ordering::Relaxed);
    });

    let seq = manager.begin_validation();
    let outcome = manager.apply_validation(seq, &SessionValidationResponse::rejected(), MIDDAY_MS);

    assert_eq!(outcome, ValidationOutcome::Rejected);
    assert_eq!(manager.cache().token(), None);
    assert_eq!(fired.load(Ordering::Relaxed), 1);
}

#[test]
fn rotation_stores_new_token_and_rearms_timer() {
    let manager = SessionManager::new_in_memory();
    manager.apply_login(&login_response("2026-01-16T00:00:00Z"), MIDDAY_MS);

    let rotated = SessionValidationResponse {
        valid: true,
        token_refreshed: true,
        new_token: Some("b2".repeat(32)),
        expires_at: Some("2026-01-17T00:00:00Z".to_owned()),
        user: Some(staff_user()),
    };
    let seq = manager.begin_validation();
    let outcome = manager.apply_validation(seq, &rotated, MIDDAY_MS);

    assert!(matches!(outcome, ValidationOutcome::Valid(Some(_))));
    assert_eq!(manager.cache().token().as_deref(), Some("b2".repeat(32).as_str()));
    assert_eq!(manager.cache().expires_at_raw().as_deref(), Some("2026-01-17T00:00:00Z"));
    // Timer re-armed for the new deadline, one day later.
    assert_eq!(manager.timer_deadline_ms(), Some(MIDNIGHT_MS + 86_400_000));
}

#[test]
fn valid_response_without_rotation_refreshes_user_only() {
    let manager = SessionManager::new_in_memory();
    manager.apply_login(&login_response("2026-01-16T00:00:00Z"), MIDDAY_MS);
    let original_token = manager.cache().token();

    let mut renamed = staff_user();
    renamed.full_name = "Ana I.".to_owned();
    let resp = SessionValidationResponse {
        valid: true,
        token_refreshed: false,
        new_token: None,
        expires_at: None,
        user: Some(renamed.clone()),
    };
    let seq = manager.begin_validation();
    manager.apply_validation(seq, &resp, MIDDAY_MS);

    assert_eq!(manager.cache().token(), original_token);
    assert_eq!(manager.cache().user(), Some(renamed));
}

#[test]
fn late_validation_response_is_discarded() {
    let manager = SessionManager::new_in_memory();
    manager.apply_login(&login_response("2026-01-16T00:00:00Z"), MIDDAY_MS);

    let first = manager.begin_validation();
    let second = manager.begin_validation();

    let fresh = SessionValidationResponse {
        valid: true,
        token_refreshed: false,
        new_token: None,
        expires_at: None,
        user: Some(staff_user()),
    };
    assert!(matches!(
        manager.apply_validation(second, &fresh, MIDDAY_MS),
        ValidationOutcome::Valid(_)
    ));

    // The earlier request's response lands afterwards; even a rejection
    // is ignored once a newer response has been applied.
    let outcome = manager.apply_validation(first, &SessionValidationResponse::rejected(), MIDDAY_MS);
    assert_eq!(outcome, ValidationOutcome::Stale);
    assert!(manager.cache().token().is_some());
}

#[test]
fn failed_startup_fetch_with_nothing_cached_clears_stale_credentials() {
    // A token with future expiry but no stored profile, and the server
    // refuses the profile fetch (session revoked). Keeping the keys
    // would bounce the guard between sign-in and the landing page.
    let manager = SessionManager::new_in_memory();
    manager.cache().set_token("c3".repeat(32).as_str());
    manager.cache().set_expires_at("2026-01-16T00:00:00Z");
    manager.arm_auto_logout(MIDNIGHT_MS, MIDDAY_MS);

    assert_eq!(manager.settle_profile_fetch(None, None), None);
    assert_eq!(manager.cache().token(), None);
    assert_eq!(manager.cache().expires_at_raw(), None);
    assert_eq!(manager.timer_deadline_ms(), None);
}

#[test]
fn failed_startup_fetch_keeps_a_cached_profile() {
    // Transient failure with a cached profile stays signed in; the
    // periodic validation decides.
    let manager = SessionManager::new_in_memory();
    manager.apply_login(&login_response("2026-01-16T00:00:00Z"), MIDDAY_MS);

    let settled = manager.settle_profile_fetch(manager.cache().user(), None);
    assert!(settled.is_some());
    assert!(manager.cache().token().is_some());
    assert_eq!(manager.timer_deadline_ms(), Some(MIDNIGHT_MS));
}

#[test]
fn fresh_profile_wins_over_the_cached_one() {
    let manager = SessionManager::new_in_memory();
    manager.apply_login(&login_response("2026-01-16T00:00:00Z"), MIDDAY_MS);

    let mut renamed = staff_user();
    renamed.full_name = "Ana I.".to_owned();
    let settled = manager.settle_profile_fetch(manager.cache().user(), Some(renamed.clone()));
    assert_eq!(settled, Some(renamed));
}

#[test]
fn stale_timer_generation_does_nothing() {
    let manager = SessionManager::new_in_memory();
    manager.apply_login(&login_response("2026-01-16T00:00:00Z"), MIDDAY_MS);

    let old_generation = manager.arm_auto_logout(MIDNIGHT_MS, MIDDAY_MS);
    // Rotation re-arms: the old sleeping task must become a no-op.
    manager.arm_auto_logout(MIDNIGHT_MS + 86_400_000, MIDDAY_MS);

    manager.timer_fired(old_generation);
    assert!(manager.cache().token().is_some());
    assert_eq!(manager.timer_deadline_ms(), Some(MIDNIGHT_MS + 86_400_000));
}

#[test]
fn cancelled_timer_never_fires() {
    let manager = SessionManager::new_in_memory();
    let generation = manager.arm_auto_logout(MIDNIGHT_MS, MIDDAY_MS);
    manager.cache().set_token("tok");

    manager.cancel_timer();
    manager.timer_fired(generation);
    assert_eq!(manager.cache().token().as_deref(), Some("tok"));
}

#[test]
fn timer_firing_notifies_expiry_listeners() {
    let manager = SessionManager::new_in_memory();
    manager.apply_login(&login_response("2026-01-16T00:00:00Z"), MIDDAY_MS);

    let fired = Arc::new(AtomicUsize::new(0));
    let fired_in_listener = fired.clone();
    manager.on_session_expired(move || {
        fired_in_listener.fetch_add(1, Ordering::Relaxed);
    });

    let generation = manager.arm_auto_logout(MIDNIGHT_MS, MIDDAY_MS);
    manager.timer_fired(generation);
    assert_eq!(fired.load(Ordering::Relaxed), 1);
}
