//! Application root: SSR shell, router, and the auth context provider.
//!
//! SYSTEM CONTEXT
//! ==============
//! `shell` is what the server renders for the admin routes;
//! `App` mounts the router; `AuthProvider` constructs the one
//! `SessionManager` for this application instance, provides it (and the
//! `RwSignal<AuthState>`) via context, and runs the init / periodic /
//! focus validation flows.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::components::{Route, Router, Routes};
use leptos_router::path;

use crate::session::manager::SessionManager;
use crate::state::auth::AuthState;
use crate::state::ui::UiState;

/// HTML document shell rendered by the server for admin routes.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8" />
                <meta name="viewport" content="width=device-width, initial-scale=1" />
                <AutoReload options=options.clone() />
                <HydrationScripts options />
                <MetaTags />
            </head>
            <body>
                <App />
            </body>
        </html>
    }
}

/// Admin application root.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    view! {
        <Stylesheet id="leptos" href="/pkg/client.css" />
        <Title text="Meridian Bank — Admin" />
        <Router>
            <AuthProvider>
                <Routes fallback=|| view! { <p class="not-found">"Page not found."</p> }>
                    <Route path=path!("/admin") view=crate::pages::dashboard::DashboardPage />
                    <Route path=path!("/admin/sign-in") view=crate::pages::login::LoginPage />
                    <Route path=path!("/admin/sign-up") view=crate::pages::register::RegisterPage />
                    <Route path=path!("/admin/news") view=crate::pages::news::NewsPage />
                    <Route path=path!("/admin/banners") view=crate::pages::banners::BannersPage />
                    <Route path=path!("/admin/products") view=crate::pages::products::ProductsPage />
                    <Route path=path!("/admin/offerings") view=crate::pages::offerings::OfferingsPage />
                    <Route path=path!("/admin/team") view=crate::pages::team::TeamPage />
                    <Route path=path!("/admin/company") view=crate::pages::company::CompanyPage />
                    <Route path=path!("/admin/contacts") view=crate::pages::contacts::ContactsPage />
                    <Route path=path!("/admin/users") view=crate::pages::users::UsersPage />
                </Routes>
            </AuthProvider>
        </Router>
    }
}

/// Interval between background session validations.
#[cfg(feature = "hydrate")]
const VALIDATE_INTERVAL_SECS: u64 = 300;

/// Provides `RwSignal<AuthState>`, `RwSignal<UiState>`, and the
/// `SessionManager` to everything beneath it, and drives the session
/// lifecycle: init from cached credentials, periodic validation, focus
/// re-checks, and expiry fan-out.
#[component]
pub fn AuthProvider(children: Children) -> impl IntoView {
    let auth = RwSignal::new(AuthState::default());
    let ui = RwSignal::new(UiState { dark_mode: crate::util::dark_mode::read_preference() });
    crate::util::dark_mode::apply(ui.get_untracked().dark_mode);

    #[cfg(feature = "hydrate")]
    let manager = SessionManager::new_browser();
    #[cfg(not(feature = "hydrate"))]
    let manager = SessionManager::new_in_memory();

    provide_context(auth);
    provide_context(ui);
    provide_context(manager.clone());

    // Session-ended events (timer fired, server rejected validation)
    // only clear the user here; navigation happens through the route
    // guard each protected page installs.
    manager.on_session_expired(move || {
        auth.update(|a| a.user = None);
    });

    #[cfg(feature = "hydrate")]
    {
        init_session(auth, &manager);
        spawn_validation_loop(auth, &manager);
        install_focus_validation(auth, &manager);
    }
    #[cfg(not(feature = "hydrate"))]
    {
        // No browser storage on the server: render signed-out and let
        // hydration take over.
        auth.update(|a| a.loading = false);
    }

    children()
}

/// Populate auth state from cached credentials, then refresh the
/// profile from the server. With nothing cached, `loading` stays set
/// until the fetch settles so the guard cannot redirect against
/// credentials that are about to be cleared.
#[cfg(feature = "hydrate")]
fn init_session(auth: RwSignal<AuthState>, manager: &SessionManager) {
    let manager = manager.clone();
    leptos::task::spawn_local(async move {
        let now = crate::session::clock::now_ms();
        if !manager.is_authenticated(now) {
            auth.update(|a| {
                a.user = None;
                a.loading = false;
            });
            return;
        }

        // Instant render from the cached profile.
        let cached = manager.cache().user();
        if let Some(user) = cached.clone() {
            auth.update(|a| {
                a.user = Some(user);
                a.loading = false;
            });
        }

        // A page load dropped any previously armed timer task.
        if let Some(deadline) = manager.cache().expires_at_ms() {
            manager.arm_auto_logout(deadline, now);
        }

        let fetched = manager.current_user().await;
        match manager.settle_profile_fetch(cached, fetched) {
            Some(user) => {
                auth.update(|a| {
                    a.user = Some(user);
                    a.loading = false;
                });
                redirect_authenticated_off_public_routes();
            }
            None => {
                // Stale credentials were just cleared; the guard sends
                // protected routes to sign-in.
                auth.update(|a| {
                    a.user = None;
                    a.loading = false;
                });
            }
        }
    });
}

/// Signed-in staff landing on sign-in/sign-up go straight to the panel.
#[cfg(feature = "hydrate")]
fn redirect_authenticated_off_public_routes() {
    if let Some(window) = web_sys::window() {
        if let Ok(path) = window.location().pathname() {
            if crate::util::auth::is_public_admin_route(&path) {
                let _ = window.location().set_href(crate::util::auth::ADMIN_HOME_ROUTE);
            }
        }
    }
}

/// Re-validate the session every five minutes while authenticated.
#[cfg(feature = "hydrate")]
fn spawn_validation_loop(auth: RwSignal<AuthState>, manager: &SessionManager) {
    use crate::session::manager::ValidationOutcome;

    let manager = manager.clone();
    leptos::task::spawn_local(async move {
        loop {
            gloo_timers::future::sleep(std::time::Duration::from_secs(VALIDATE_INTERVAL_SECS)).await;
            if !manager.is_authenticated(crate::session::clock::now_ms()) {
                continue;
            }
            if let Some(ValidationOutcome::Valid(Some(user))) = manager.validate().await {
                auth.update(|a| a.user = Some(user));
            }
        }
    });
}

/// Validate on window focus: a laptop waking from sleep should learn
/// about an expired session immediately, not at the next interval.
#[cfg(feature = "hydrate")]
fn install_focus_validation(auth: RwSignal<AuthState>, manager: &SessionManager) {
    use wasm_bindgen::JsCast;
    use wasm_bindgen::closure::Closure;

    use crate::session::manager::ValidationOutcome;

    let Some(window) = web_sys::window() else {
        return;
    };
    let manager = manager.clone();
    let on_focus = Closure::<dyn FnMut()>::new(move || {
        let manager = manager.clone();
        leptos::task::spawn_local(async move {
            if manager.is_authenticated(crate::session::clock::now_ms()) {
                if let Some(ValidationOutcome::Valid(Some(user))) = manager.validate().await {
                    auth.update(|a| a.user = Some(user));
                }
            } else {
                // is_authenticated already did the lazy cleanup.
                auth.update(|a| a.user = None);
            }
        });
    });
    let _ = window.add_event_listener_with_callback("focus", on_focus.as_ref().unchecked_ref());
    // The listener lives for the whole page lifetime.
    on_focus.forget();
}
