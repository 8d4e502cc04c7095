//! Route guard helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every protected admin page applies identical unauthenticated
//! redirect behavior: wait for the initial session check, then send
//! signed-out visitors to the sign-in route.

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;

use leptos::prelude::*;
use leptos_router::NavigateOptions;

use crate::state::auth::AuthState;

/// Route the guard redirects to.
pub const SIGN_IN_ROUTE: &str = "/admin/sign-in";
/// Authenticated landing page.
pub const ADMIN_HOME_ROUTE: &str = "/admin";

/// True iff the initial session check finished and no user is present.
#[must_use]
pub fn should_redirect_unauth(state: &AuthState) -> bool {
    !state.loading && state.user.is_none()
}

/// Routes under `/admin` that are reachable while signed out.
#[must_use]
pub fn is_public_admin_route(path: &str) -> bool {
    matches!(path, "/admin/sign-in" | "/admin/sign-up")
}

/// Redirect to the sign-in route whenever auth has loaded and no user
/// is present. Protected pages install this once.
pub fn install_unauth_redirect<F>(auth: RwSignal<AuthState>, navigate: F)
where
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    Effect::new(move || {
        if should_redirect_unauth(&auth.get()) {
            navigate(SIGN_IN_ROUTE, NavigateOptions::default());
        }
    });
}
