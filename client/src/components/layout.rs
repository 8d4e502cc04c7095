//! Admin chrome: sidebar navigation, top bar, logout.
//!
//! Every protected page renders inside `AdminLayout`, which also
//! installs the unauthenticated-redirect guard, so individual pages
//! never re-implement it.

use leptos::prelude::*;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;

use crate::session::manager::SessionManager;
use crate::state::auth::AuthState;
use crate::state::ui::UiState;
use crate::util::auth::{SIGN_IN_ROUTE, install_unauth_redirect};

#[component]
pub fn AdminLayout(#[prop(into)] title: String, children: Children) -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let ui = expect_context::<RwSignal<UiState>>();
    let manager = expect_context::<SessionManager>();
    let navigate = use_navigate();

    install_unauth_redirect(auth, navigate);

    let on_logout = move |_| {
        let manager = manager.clone();
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            manager.logout().await;
            auth.update(|a| a.user = None);
            if let Some(window) = web_sys::window() {
                let _ = window.location().set_href(SIGN_IN_ROUTE);
            }
        });
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (manager, SIGN_IN_ROUTE);
        }
    };

    let staff_name = move || auth.get().user.map(|u| u.full_name).unwrap_or_default();

    view! {
        <div class="admin-shell">
            <aside class="admin-sidebar">
                <div class="admin-sidebar__brand">"Meridian Bank"</div>
                <nav class="admin-sidebar__nav">
                    <A href="/admin">"Dashboard"</A>
                    <A href="/admin/news">"News"</A>
                    <A href="/admin/banners">"Banners"</A>
                    <A href="/admin/products">"Products"</A>
                    <A href="/admin/offerings">"Services"</A>
                    <A href="/admin/team">"Team"</A>
                    <A href="/admin/company">"Company"</A>
                    <A href="/admin/contacts">"Contacts"</A>
                    <Show when=move || auth.get().is_admin()>
                        <A href="/admin/users">"Users"</A>
                    </Show>
                </nav>
            </aside>
            <div class="admin-main">
                <header class="admin-topbar">
                    <h1 class="admin-topbar__title">{title}</h1>
                    <span class="admin-topbar__spacer"></span>
                    <button
                        class="btn admin-topbar__dark-toggle"
                        title="Toggle dark mode"
                        on:click=move |_| {
                            let next = crate::util::dark_mode::toggle(ui.get().dark_mode);
                            ui.update(|u| u.dark_mode = next);
                        }
                    >
                        {move || if ui.get().dark_mode { "☀" } else { "☾" }}
                    </button>
                    <span class="admin-topbar__self">{staff_name}</span>
                    <button class="btn admin-topbar__logout" on:click=on_logout>
                        "Sign out"
                    </button>
                </header>
                <Show when=move || auth.get().loading>
                    <p class="admin-main__loading">"Loading..."</p>
                </Show>
                <main class="admin-content">{children()}</main>
            </div>
        </div>
    }
}
