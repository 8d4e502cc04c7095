//! Team member management for the about-us page.

use leptos::prelude::*;

use models::{TeamMember, TeamMemberInput};

use crate::components::confirm_dialog::ConfirmDialog;
use crate::components::layout::AdminLayout;
use crate::session::manager::SessionManager;

#[component]
pub fn TeamPage() -> impl IntoView {
    let manager = expect_context::<SessionManager>();

    let items = RwSignal::new(Vec::<TeamMember>::new());
    let error = RwSignal::new(String::new());
    let show_editor = RwSignal::new(false);
    let delete_target = RwSignal::new(None::<TeamMember>);
    let reload_tick = RwSignal::new(0_u32);

    #[cfg(feature = "hydrate")]
    {
        let manager = manager.clone();
        Effect::new(move || {
            reload_tick.track();
            let Some(token) = manager.cache().token() else {
                return;
            };
            leptos::task::spawn_local(async move {
                match crate::net::api::get_json::<Vec<TeamMember>>("/api/admin/team", &token).await {
                    Ok(list) => {
                        items.set(list);
                        error.set(String::new());
                    }
                    Err(message) => error.set(message),
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
        Callback::new(move |member: TeamMember| {
            let Some(token) = token_for() else {
                return;
            };
            #[cfg(feature = "hydrate")]
            leptos::task::spawn_local(async move {
                let path = format!("/api/admin/team/{}/toggle-active", member.id);
                match crate::net::api::post_empty::<TeamMember>(&path, &token).await {
                    Ok(_) => reload_tick.update(|t| *t += 1),
                    Err(message) => error.set(message),
                }
            });
            #[cfg(not(feature = "hydrate"))]
            {
                let _ = (token, member);
            }
        })
    };

    let on_delete = {
        let token_for = token_for.clone();
        Callback::new(move |()| {
            let Some(member) = delete_target.get_untracked() else {
                return;
            };
            delete_target.set(None);
            let Some(token) = token_for() else {
                return;
            };
            #[cfg(feature = "hydrate")]
            leptos::task::spawn_local(async move {
                let path = format!("/api/admin/team/{}", member.id);
                match crate::net::api::delete(&path, &token).await {
                    Ok(()) => reload_tick.update(|t| *t += 1),
                    Err(message) => error.set(message),
                }
            });
            #[cfg(not(feature = "hydrate"))]
            {
                let _ = (token, member);
            }
        })
    };

    view! {
        <AdminLayout title="Team">
            <div class="page-actions">
                <button class="btn btn--primary" on:click=move |_| show_editor.set(true)>
                    "+ New member"
                </button>
            </div>
            <Show when=move || !error.get().is_empty()>
                <p class="page-error">{move || error.get()}</p>
            </Show>
            <table class="admin-table">
                <thead>
                    <tr>
                        <th>"Name"</th>
                        <th>"Title"</th>
                        <th>"Department"</th>
                        <th>"Active"</th>
                        <th>"Actions"</th>
                    </tr>
                </thead>
                <tbody>
                    {move || {
                        items
                            .get()
                            .into_iter()
                            .map(|member| {
                                let toggle_member = member.clone();
                                let delete_member = member.clone();
                                view! {
                                    <tr>
                                        <td>{member.name.clone()}</td>
                                        <td>{member.title.clone()}</td>
                                        <td>{member.department.clone().unwrap_or_default()}</td>
                                        <td>{if member.is_active { "Yes" } else { "No" }}</td>
                                        <td class="admin-table__actions">
                                            <button class="btn btn--small" on:click=move |_| on_toggle.run(toggle_member.clone())>
                                                {if member.is_active { "Deactivate" } else { "Activate" }}
                                            </button>
                                            <button
                                                class="btn btn--small btn--danger"
                                                on:click=move |_| delete_target.set(Some(delete_member.clone()))
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
                <TeamEditorDialog
                    on_saved=Callback::new(move |()| {
                        show_editor.set(false);
                        reload_tick.update(|t| *t += 1);
                    })
                    on_cancel=Callback::new(move |()| show_editor.set(false))
                />
            </Show>
            <Show when=move || delete_target.get().is_some()>
                <ConfirmDialog
                    title="Remove team member"
                    message="This removes the entry from the about-us page permanently."
                    confirm_label="Remove"
                    on_confirm=on_delete
                    on_cancel=Callback::new(move |()| delete_target.set(None))
                />
            </Show>
        </AdminLayout>
    }
}

#[component]
fn TeamEditorDialog(on_saved: Callback<()>, on_cancel: Callback<()>) -> impl IntoView {
    let manager = expect_context::<SessionManager>();

    let name = RwSignal::new(String::new());
    let title = RwSignal::new(String::new());
    let department = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let error = RwSignal::new(String::new());

    fn opt(value: String) -> Option<String> {
        let trimmed = value.trim();
        if trimmed.is_empty() { None } else { Some(trimmed.to_owned()) }
    }

    let submit = Callback::new(move |()| {
        if name.get_untracked().trim().is_empty() || title.get_untracked().trim().is_empty() {
            error.set("Name and title are required.".to_owned());
            return;
        }
        let input = TeamMemberInput {
            name: name.get_untracked().trim().to_owned(),
            title: title.get_untracked().trim().to_owned(),
            bio: None,
            department: opt(department.get_untracked()),
            email: opt(email.get_untracked()),
            phone: None,
            photo_url: None,
        };
        let Some(token) = manager.cache().token() else {
            return;
        };
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::api::post_json::<TeamMemberInput, TeamMember>("/api/admin/team", &token, &input).await
            {
                Ok(_) => on_saved.run(()),
                Err(message) => error.set(message),
            }
        });
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (token, input, on_saved);
        }
    });

    view! {
        <div class="dialog-backdrop" on:click=move |_| on_cancel.run(())>
            <div class="dialog" on:click=move |ev| ev.stop_propagation()>
                <h2>"New team member"</h2>
                <label class="dialog__label">
                    "Name"
                    <input
                        class="dialog__input"
                        type="text"
                        prop:value=move || name.get()
                        on:input=move |ev| name.set(event_target_value(&ev))
                    />
                </label>
                <label class="dialog__label">
                    "Job title"
                    <input
                        class="dialog__input"
                        type="text"
                        prop:value=move || title.get()
                        on:input=move |ev| title.set(event_target_value(&ev))
                    />
                </label>
                <label class="dialog__label">
                    "Department (optional)"
                    <input
                        class="dialog__input"
                        type="text"
                        prop:value=move || department.get()
                        on:input=move |ev| department.set(event_target_value(&ev))
                    />
                </label>
                <label class="dialog__label">
                    "Email (optional)"
                    <input
                        class="dialog__input"
                        type="email"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                </label>
                <Show when=move || !error.get().is_empty()>
                    <p class="dialog__error">{move || error.get()}</p>
                </Show>
                <div class="dialog__actions">
                    <button class="btn" on:click=move |_| on_cancel.run(())>
                        "Cancel"
                    </button>
                    <button class="btn btn--primary" on:click=move |_| submit.run(())>
                        "Save"
                    </button>
                </div>
            </div>
        </div>
    }
}
