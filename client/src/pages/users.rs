//! Staff account management. Admin role required; the server enforces
//! it too, this page just hides the controls from editors.

use leptos::prelude::*;

use models::{UserAccount, UserRole, UserStats};

use crate::components::confirm_dialog::ConfirmDialog;
use crate::components::layout::AdminLayout;
use crate::components::stat_cards::StatCard;
use crate::session::manager::SessionManager;
use crate::state::auth::AuthState;
use crate::util::format::short_date;

#[component]
pub fn UsersPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let manager = expect_context::<SessionManager>();

    let items = RwSignal::new(Vec::<UserAccount>::new());
    let stats = RwSignal::new(UserStats::default());
    let error = RwSignal::new(String::new());
    let show_editor = RwSignal::new(false);
    let delete_target = RwSignal::new(None::<UserAccount>);
    let reload_tick = RwSignal::new(0_u32);

    #[cfg(feature = "hydrate")]
    {
        let manager = manager.clone();
        Effect::new(move || {
            reload_tick.track();
            if !auth.get().is_admin() {
                return;
            }
            let Some(token) = manager.cache().token() else {
                return;
            };
            leptos::task::spawn_local(async move {
                match crate::net::api::get_json::<Vec<UserAccount>>("/api/admin/users", &token).await {
                    Ok(list) => {
                        items.set(list);
                        error.set(String::new());
                    }
                    Err(message) => error.set(message),
                }
                if let Ok(s) = crate::net::api::get_json::<UserStats>("/api/admin/users/stats", &token).await {
                    stats.set(s);
                }
            });
        });
    }

    let token_for = {
        let manager = manager.clone();
        move || manager.cache().token()
    };

    let on_toggle = {
        let token_for = token_for.clone();
        Callback::new(move |account: UserAccount| {
            let Some(token) = token_for() else {
                return;
            };
            #[cfg(feature = "hydrate")]
            leptos::task::spawn_local(async move {
                let path = format!("/api/admin/users/{}/toggle-active", account.id);
                match crate::net::api::post_empty::<UserAccount>(&path, &token).await {
                    Ok(_) => reload_tick.update(|t| *t += 1),
                    Err(message) => error.set(message),
                }
            });
            #[cfg(not(feature = "hydrate"))]
            {
                let _ = (token, account);
            }
        })
    };

    let on_delete = {
        let token_for = token_for.clone();
        Callback::new(move |()| {
            let Some(account) = delete_target.get_untracked() else {
                return;
            };
            delete_target.set(None);
            let Some(token) = token_for() else {
                return;
            };
            #[cfg(feature = "hydrate")]
            leptos::task::spawn_local(async move {
                let path = format!("/api/admin/users/{}", account.id);
                match crate::net::api::delete(&path, &token).await {
                    Ok(()) => reload_tick.update(|t| *t += 1),
                    Err(message) => error.set(message),
                }
            });
            #[cfg(not(feature = "hydrate"))]
            {
                let _ = (token, account);
            }
        })
    };

    view! {
        <AdminLayout title="Staff accounts">
            <Show
                when=move || auth.get().is_admin()
                fallback=move || view! { <p class="page-error">"Not enough permissions."</p> }
            >
                <section class="dashboard-stats">
                    <StatCard label="Total" value=Signal::derive(move || stats.get().total) />
                    <StatCard label="Active" value=Signal::derive(move || stats.get().active) />
                    <StatCard label="Awaiting activation" value=Signal::derive(move || stats.get().inactive) />
                    <StatCard label="Admins" value=Signal::derive(move || stats.get().admins) />
                </section>
                <div class="page-actions">
                    <button class="btn btn--primary" on:click=move |_| show_editor.set(true)>
                        "+ New account"
                    </button>
                </div>
                <Show when=move || !error.get().is_empty()>
                    <p class="page-error">{move || error.get()}</p>
                </Show>
                <table class="admin-table">
                    <thead>
                        <tr>
                            <th>"Name"</th>
                            <th>"Email"</th>
                            <th>"Role"</th>
                            <th>"Active"</th>
                            <th>"Last login"</th>
                            <th>"Actions"</th>
                        </tr>
                    </thead>
                    <tbody>
                        {move || {
                            let self_id = auth.get_untracked().user.map(|u| u.id);
                            items
                                .get()
                                .into_iter()
                                .map(|account| {
                                    let toggle_account = account.clone();
                                    let delete_account = account.clone();
                                    let is_self = self_id == Some(account.id);
                                    view! {
                                        <tr>
                                            <td>{account.full_name.clone()}</td>
                                            <td>{account.email.clone()}</td>
                                            <td>{account.role.as_str()}</td>
                                            <td>{if account.is_active { "Yes" } else { "No" }}</td>
                                            <td>
                                                {account
                                                    .last_login_at
                                                    .map(short_date)
                                                    .unwrap_or_else(|| "never".to_owned())}
                                            </td>
                                            <td class="admin-table__actions">
                                                <button
                                                    class="btn btn--small"
                                                    disabled=is_self
                                                    on:click=move |_| on_toggle.run(toggle_account.clone())
                                                >
                                                    {if account.is_active { "Deactivate" } else { "Activate" }}
                                                </button>
                                                <button
                                                    class="btn btn--small btn--danger"
                                                    disabled=is_self
                                                    on:click=move |_| delete_target.set(Some(delete_account.clone()))
                                                >
                                                    "Delete"
                                                </button>
                                            </td>
                                        </tr>
                                    }
                                })
                                .collect::<Vec<_>>()
                        }}
                    </tbody>
                </table>
                <Show when=move || show_editor.get()>
                    <UserEditorDialog
                        on_saved=Callback::new(move |()| {
                            show_editor.set(false);
                            reload_tick.update(|t| *t += 1);
                        })
                        on_cancel=Callback::new(move |()| show_editor.set(false))
                    />
                </Show>
                <Show when=move || delete_target.get().is_some()>
                    <ConfirmDialog
                        title="Delete account"
                        message="This permanently deletes the staff account and revokes its sessions."
                        on_confirm=on_delete
                        on_cancel=Callback::new(move |()| delete_target.set(None))
                    />
                </Show>
            </Show>
        </AdminLayout>
    }
}

#[component]
fn UserEditorDialog(on_saved: Callback<()>, on_cancel: Callback<()>) -> impl IntoView {
    let manager = expect_context::<SessionManager>();

    let full_name = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let role = RwSignal::new("editor".to_owned());
    let error = RwSignal::new(String::new());

    let submit = Callback::new(move |()| {
        if email.get_untracked().trim().is_empty() || password.get_untracked().is_empty() {
            error.set("Email and password are required.".to_owned());
            return;
        }
        let payload = serde_json::json!({
            "email": email.get_untracked().trim(),
            "password": password.get_untracked(),
            "full_name": full_name.get_untracked().trim(),
            "role": UserRole::from_str(&role.get_untracked()).unwrap_or(UserRole::Editor),
            "is_active": true,
        });
        let Some(token) = manager.cache().token() else {
            return;
        };
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::api::post_json::<serde_json::Value, UserAccount>("/api/admin/users", &token, &payload)
                .await
            {
                Ok(_) => on_saved.run(()),
                Err(message) => error.set(message),
            }
        });
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (token, payload, on_saved);
        }
    });

    view! {
        <div class="dialog-backdrop" on:click=move |_| on_cancel.run(())>
            <div class="dialog" on:click=move |ev| ev.stop_propagation()>
                <h2>"New staff account"</h2>
                <label class="dialog__label">
                    "Full name"
                    <input
                        class="dialog__input"
                        type="text"
                        prop:value=move || full_name.get()
                        on:input=move |ev| full_name.set(event_target_value(&ev))
                    />
                </label>
                <label class="dialog__label">
                    "Email"
                    <input
                        class="dialog__input"
                        type="email"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                </label>
                <label class="dialog__label">
                    "Password"
                    <input
                        class="dialog__input"
                        type="password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                </label>
                <label class="dialog__label">
                    "Role"
                    <select class="dialog__input" on:change=move |ev| role.set(event_target_value(&ev))>
                        <option value="editor">"Editor"</option>
                        <option value="admin">"Admin"</option>
                    </select>
                </label>
                <Show when=move || !error.get().is_empty()>
                    <p class="dialog__error">{move || error.get()}</p>
                </Show>
                <div class="dialog__actions">
                    <button class="btn" on:click=move |_| on_cancel.run(())>
                        "Cancel"
                    </button>
                    <button class="btn btn--primary" on:click=move |_| submit.run(())>
                        "Create"
                    </button>
                </div>
            </div>
        </div>
    }
}
