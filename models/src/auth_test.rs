use super::*;
use time::macros::datetime;

// =============================================================================
// ROLE PARSING
// =============================================================================

#[test]
fn role_round_trips_through_str() {
    assert_eq!(UserRole::from_str(UserRole::Admin.as_str()), Some(UserRole::Admin));
    assert_eq!(UserRole::from_str(UserRole::Editor.as_str()), Some(UserRole::Editor));
    assert_eq!(UserRole::from_str("superuser"), None);
}

#[test]
fn role_serializes_lowercase() {
    assert_eq!(serde_json::to_string(&UserRole::Admin).unwrap(), "\"admin\"");
    assert_eq!(serde_json::from_str::<UserRole>("\"editor\"").unwrap(), UserRole::Editor);
}

// =============================================================================
// VALIDATION RESPONSE DEFAULTS
// =============================================================================

#[test]
fn bare_rejection_deserializes_with_defaults() {
    let parsed: SessionValidationResponse = serde_json::from_str(r#"{"valid": false}"#).unwrap();
    assert_eq!(parsed, SessionValidationResponse::rejected());
}

#[test]
fn rotation_response_carries_new_token() {
    let parsed: SessionValidationResponse = serde_json::from_str(
        r#"{
            "valid": true,
            "token_refreshed": true,
            "new_token": "abc123",
            "expires_at": "2026-03-02T00:00:00Z",
            "user": {
                "id": "6f2a2e0a-8c5f-4a1e-9a57-0c2b0a9a1111",
                "email": "ops@meridian.example",
                "full_name": "Ops Admin",
                "role": "admin",
                "is_active": true
            }
        }"#,
    )
    .unwrap();

    assert!(parsed.valid);
    assert!(parsed.token_refreshed);
    assert_eq!(parsed.new_token.as_deref(), Some("abc123"));
    assert_eq!(parsed.expires_at.as_deref(), Some("2026-03-02T00:00:00Z"));
    assert_eq!(parsed.user.unwrap().email, "ops@meridian.example");
}

#[test]
fn check_auth_expires_at_defaults_to_none() {
    let parsed: AuthCheckResponse = serde_json::from_str(r#"{"authenticated": false}"#).unwrap();
    assert!(!parsed.authenticated);
    assert!(parsed.expires_at.is_none());
}

// =============================================================================
// LOGIN RESPONSE + PROFILE PROJECTION
// =============================================================================

#[test]
fn login_response_round_trips() {
    let user = User {
        id: Uuid::nil(),
        email: "teller@meridian.example".into(),
        full_name: "Branch Teller".into(),
        role: UserRole::Editor,
        is_active: true,
    };
    let resp = LoginResponse {
        access_token: "deadbeef".into(),
        token_type: "bearer".into(),
        expires_at: "2026-01-02T00:00:00Z".into(),
        user,
    };

    let json = serde_json::to_string(&resp).unwrap();
    let back: LoginResponse = serde_json::from_str(&json).unwrap();
    assert_eq!(back, resp);
}

#[test]
fn account_profile_drops_audit_fields() {
    let account = UserAccount {
        id: Uuid::nil(),
        email: "teller@meridian.example".into(),
        full_name: "Branch Teller".into(),
        role: UserRole::Editor,
        is_active: false,
        created_at: datetime!(2026-01-01 09:00 UTC),
        updated_at: datetime!(2026-01-05 09:00 UTC),
        last_login_at: None,
    };

    let profile = account.profile();
    assert_eq!(profile.id, account.id);
    assert_eq!(profile.email, account.email);
    assert!(!profile.is_active);
}
