use models::{User, UserRole};
use uuid::Uuid;

use super::*;

#[test]
fn redirects_when_not_loading_and_user_missing() {
    let state = AuthState { user: None, loading: false };
    assert!(should_redirect_unauth(&state));
}

#[test]
fn does_not_redirect_while_loading() {
    let state = AuthState { user: None, loading: true };
    assert!(!should_redirect_unauth(&state));
}

#[test]
fn does_not_redirect_when_user_exists() {
    let state = AuthState {
        user: Some(User {
            id: Uuid::new_v4(),
            email: "ana@meridian.example".to_owned(),
            full_name: "Ana Ionescu".to_owned(),
            role: UserRole::Editor,
            is_active: true,
        }),
        loading: false,
    };
    assert!(!should_redirect_unauth(&state));
}

#[test]
fn sign_in_and_sign_up_are_public() {
    assert!(is_public_admin_route("/admin/sign-in"));
    assert!(is_public_admin_route("/admin/sign-up"));
    assert!(!is_public_admin_route("/admin"));
    assert!(!is_public_admin_route("/admin/news"));
}
