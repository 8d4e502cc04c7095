use models::{User, UserRole};
use uuid::Uuid;

use super::*;

fn user(role: UserRole) -> User {
    User {
        id: Uuid::new_v4(),
        email: "staff@meridian.example".to_owned(),
        full_name: "Staff".to_owned(),
        role,
        is_active: true,
    }
}

#[test]
fn starts_loading_and_signed_out() {
    let state = AuthState::default();
    assert!(state.loading);
    assert!(state.user.is_none());
}

#[test]
fn is_admin_tracks_role() {
    assert!(!AuthState::default().is_admin());
    assert!(AuthState { user: Some(user(UserRole::Admin)), loading: false }.is_admin());
    assert!(!AuthState { user: Some(user(UserRole::Editor)), loading: false }.is_admin());
}
