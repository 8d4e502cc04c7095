use super::*;
use axum::http::Request;

fn parts_with_headers(headers: &[(&str, &str)]) -> Parts {
    let mut builder = Request::builder().uri("/api/auth/me");
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }
    let (parts, ()) = builder.body(()).expect("request builds").into_parts();
    parts
}

// =============================================================================
// env_bool — uses unique env var names to avoid races with parallel tests.
// =============================================================================

#[test]
fn env_bool_true_variants() {
    for (i, val) in ["1", "true", "yes", "on"].iter().enumerate() {
        let key = format!("__TEST_EB_TRUE_{i}__");
        unsafe { std::env::set_var(&key, val) };
        assert_eq!(env_bool(&key), Some(true), "expected true for {val:?}");
        unsafe { std::env::remove_var(&key) };
    }
}

#[test]
fn env_bool_false_variants() {
    for (i, val) in ["0", "false", "no", "off"].iter().enumerate() {
        let key = format!("__TEST_EB_FALSE_{i}__");
        unsafe { std::env::set_var(&key, val) };
        assert_eq!(env_bool(&key), Some(false), "expected false for {val:?}");
        unsafe { std::env::remove_var(&key) };
    }
}

#[test]
fn env_bool_invalid_returns_none() {
    let key = "__TEST_EB_INVALID_5501__";
    unsafe { std::env::set_var(key, "maybe") };
    assert_eq!(env_bool(key), None);
    unsafe { std::env::remove_var(key) };
}

#[test]
fn env_bool_unset_returns_none() {
    assert_eq!(env_bool("__TEST_EB_SURELY_UNSET_XYZ_77__"), None);
}

// =============================================================================
// extract_token
// =============================================================================

#[test]
fn bearer_header_wins() {
    let parts = parts_with_headers(&[
        ("authorization", "Bearer abc123"),
        ("cookie", "session_token=from-cookie"),
    ]);
    assert_eq!(extract_token(&parts).as_deref(), Some("abc123"));
}

#[test]
fn cookie_is_the_fallback() {
    let parts = parts_with_headers(&[("cookie", "session_token=from-cookie")]);
    assert_eq!(extract_token(&parts).as_deref(), Some("from-cookie"));
}

#[test]
fn empty_bearer_falls_through_to_cookie() {
    let parts = parts_with_headers(&[
        ("authorization", "Bearer "),
        ("cookie", "session_token=from-cookie"),
    ]);
    assert_eq!(extract_token(&parts).as_deref(), Some("from-cookie"));
}

#[test]
fn non_bearer_authorization_is_ignored() {
    let parts = parts_with_headers(&[("authorization", "Basic dXNlcjpwYXNz")]);
    assert_eq!(extract_token(&parts), None);
}

#[test]
fn no_credentials_yields_none() {
    let parts = parts_with_headers(&[]);
    assert_eq!(extract_token(&parts), None);
}

#[test]
fn empty_cookie_value_yields_none() {
    let parts = parts_with_headers(&[("cookie", "session_token=")]);
    assert_eq!(extract_token(&parts), None);
}

// =============================================================================
// cookies
// =============================================================================

#[test]
fn session_cookie_is_http_only_lax() {
    let expires = OffsetDateTime::now_utc() + Duration::hours(8);
    let cookie = session_cookie("tok", expires);
    assert_eq!(cookie.name(), COOKIE_NAME);
    assert_eq!(cookie.value(), "tok");
    assert_eq!(cookie.http_only(), Some(true));
    assert_eq!(cookie.same_site(), Some(SameSite::Lax));
}

#[test]
fn clear_cookie_expires_immediately() {
    let cookie = clear_session_cookie();
    assert_eq!(cookie.value(), "");
    assert_eq!(cookie.max_age(), Some(Duration::ZERO));
}

// =============================================================================
// require_admin
// =============================================================================

fn auth_user(role: UserRole) -> AuthUser {
    AuthUser {
        user: User {
            id: uuid::Uuid::new_v4(),
            email: "staff@meridian.example".to_owned(),
            full_name: "Staff".to_owned(),
            role,
            is_active: true,
        },
        token: "tok".to_owned(),
        expires_at: OffsetDateTime::now_utc() + Duration::hours(8),
    }
}

#[test]
fn admin_passes_admin_gate() {
    assert!(auth_user(UserRole::Admin).require_admin().is_ok());
}

#[test]
fn editor_is_rejected_by_admin_gate() {
    let response = auth_user(UserRole::Editor).require_admin().unwrap_err();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}
