//! Staff sign-up page. New accounts (after the first) start inactive
//! and wait for an admin to activate them.

use leptos::prelude::*;

#[component]
pub fn RegisterPage() -> impl IntoView {
    let email = RwSignal::new(String::new());
    let full_name = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let done = RwSignal::new(false);
    let busy = RwSignal::new(false);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let email_value = email.get().trim().to_owned();
        let name_value = full_name.get().trim().to_owned();
        let password_value = password.get();
        if email_value.is_empty() || name_value.is_empty() || password_value.is_empty() {
            info.set("All fields are required.".to_owned());
            return;
        }
        busy.set(true);
        info.set(String::new());

        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (email_value, name_value, password_value);
        }
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::api::register(&email_value, &password_value, &name_value).await {
                Ok(user) => {
                    done.set(true);
                    info.set(if user.is_active {
                        "Account created. You can sign in now.".to_owned()
                    } else {
                        "Account created. An administrator must activate it before you can sign in.".to_owned()
                    });
                }
                Err(message) => {
                    info.set(message);
                    busy.set(false);
                }
            }
        });
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"Meridian Bank"</h1>
                <p class="login-card__subtitle">"Request a staff account"</p>
                <Show
                    when=move || !done.get()
                    fallback=move || view! { <p class="login-message">{move || info.get()}</p> }
                >
                    <form class="login-form" on:submit=on_submit>
                        <input
                            class="login-input"
                            type="text"
                            placeholder="Full name"
                            prop:value=move || full_name.get()
                            on:input=move |ev| full_name.set(event_target_value(&ev))
                        />
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
                            placeholder="Password (min 8 characters)"
                            prop:value=move || password.get()
                            on:input=move |ev| password.set(event_target_value(&ev))
                        />
                        <button class="login-button" type="submit" disabled=move || busy.get()>
                            "Create account"
                        </button>
                    </form>
                    <Show when=move || !info.get().is_empty()>
                        <p class="login-message login-message--error">{move || info.get()}</p>
                    </Show>
                </Show>
                <p class="login-card__footer">
                    <a href="/admin/sign-in">"Back to sign-in"</a>
                </p>
            </div>
        </div>
    }
}
