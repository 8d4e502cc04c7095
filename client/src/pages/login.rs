//! Staff sign-in page.

use leptos::prelude::*;

use crate::session::manager::SessionManager;
use crate::state::auth::AuthState;
use crate::util::auth::ADMIN_HOME_ROUTE;

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let manager = expect_context::<SessionManager>();

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let error = RwSignal::new(String::new());
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let email_value = email.get().trim().to_owned();
        let password_value = password.get();
        if email_value.is_empty() || password_value.is_empty() {
            error.set("Enter your email and password.".to_owned());
            return;
        }
        busy.set(true);
        error.set(String::new());

        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (auth, &manager, email_value, password_value, ADMIN_HOME_ROUTE);
        }
        #[cfg(feature = "hydrate")]
        {
            let manager = manager.clone();
            leptos::task::spawn_local(async move {
                match manager.login(&email_value, &password_value).await {
                    Ok(user) => {
                        auth.update(|a| {
                            a.user = Some(user);
                            a.loading = false;
                        });
                        if let Some(window) = web_sys::window() {
                            let _ = window.location().set_href(ADMIN_HOME_ROUTE);
                        }
                    }
                    Err(message) => {
                        error.set(message);
                        busy.set(false);
                    }
                }
            });
        }
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"Meridian Bank"</h1>
                <p class="login-card__subtitle">"Content Management"</p>
                <form class="login-form" on:submit=on_submit>
                    <input
                        class="login-input"
                        type="email"
                        placeholder="you@meridian.example"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                    <input
                        class="login-input"
                        type="password"
                        placeholder="Password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <button class="login-button" type="submit" disabled=move || busy.get()>
                        {move || if busy.get() { "Signing in..." } else { "Sign in" }}
                    </button>
                </form>
                <Show when=move || !error.get().is_empty()>
                    <p class="login-message login-message--error">{move || error.get()}</p>
                </Show>
                <p class="login-card__footer">
                    "New here? "
                    <a href="/admin/sign-up">"Request an account"</a>
                </p>
            </div>
        </div>
    }
}
