//! Service offering management.

use leptos::prelude::*;

use models::{ServiceOffering, ServiceOfferingInput};

use crate::components::confirm_dialog::ConfirmDialog;
use crate::components::layout::AdminLayout;
use crate::session::manager::SessionManager;
use crate::util::format::truncate;

#[component]
pub fn OfferingsPage() -> impl IntoView {
    let manager = expect_context::<SessionManager>();

    let items = RwSignal::new(Vec::<ServiceOffering>::new());
    let error = RwSignal::new(String::new());
    let show_editor = RwSignal::new(false);
    let delete_target = RwSignal::new(None::<ServiceOffering>);
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
                match crate::net::api::get_json::<Vec<ServiceOffering>>("/api/admin/offerings", &token).await {
                    Ok(list) => {
                        items.set(list);
                        error.set(String::new());
                    }
                    Err(message) => error.set(message),
                }
            });
        });
    }

    let on_delete = {
        let manager = manager.clone();
        Callback::new(move |()| {
            let Some(offering) = delete_target.get_untracked() else {
                return;
            };
            delete_target.set(None);
            let Some(token) = manager.cache().token() else {
                return;
            };
            #[cfg(feature = "hydrate")]
            leptos::task::spawn_local(async move {
                let path = format!("/api/admin/offerings/{}", offering.id);
                match crate::net::api::delete(&path, &token).await {
                    Ok(()) => reload_tick.update(|t| *t += 1),
                    Err(message) => error.set(message),
                }
            });
            #[cfg(not(feature = "hydrate"))]
            {
                let _ = (token, offering);
            }
        })
    };

    view! {
        <AdminLayout title="Services">
            <div class="page-actions">
                <button class="btn btn--primary" on:click=move |_| show_editor.set(true)>
                    "+ New service"
                </button>
            </div>
            <Show when=move || !error.get().is_empty()>
                <p class="page-error">{move || error.get()}</p>
            </Show>
            <table class="admin-table">
                <thead>
                    <tr>
                        <th>"Name"</th>
                        <th>"Icon"</th>
                        <th>"Featured"</th>
                        <th>"Active"</th>
                        <th>"Actions"</th>
                    </tr>
                </thead>
                <tbody>
                    {move || {
                        items
                            .get()
                            .into_iter()
                            .map(|offering| {
                                let delete_offering = offering.clone();
                                view! {
                                    <tr>
                                        <td>
                                            <strong>{offering.name.clone()}</strong>
                                            <br />
                                            <small>{truncate(&offering.summary, 70)}</small>
                                        </td>
                                        <td>{offering.icon.clone().unwrap_or_default()}</td>
                                        <td>{if offering.is_featured { "Yes" } else { "No" }}</td>
                                        <td>{if offering.is_active { "Yes" } else { "No" }}</td>
                                        <td class="admin-table__actions">
                                            <button
                                                class="btn btn--small btn--danger"
                                                on:click=move |_| delete_target.set(Some(delete_offering.clone()))
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
                <OfferingEditorDialog
                    on_saved=Callback::new(move |()| {
                        show_editor.set(false);
                        reload_tick.update(|t| *t += 1);
                    })
                    on_cancel=Callback::new(move |()| show_editor.set(false))
                />
            </Show>
            <Show when=move || delete_target.get().is_some()>
                <ConfirmDialog
                    title="Delete service"
                    message="This removes the service from the public site permanently."
                    on_confirm=on_delete
                    on_cancel=Callback::new(move |()| delete_target.set(None))
                />
            </Show>
        </AdminLayout>
    }
}

#[component]
fn OfferingEditorDialog(on_saved: Callback<()>, on_cancel: Callback<()>) -> impl IntoView {
    let manager = expect_context::<SessionManager>();

    let name = RwSignal::new(String::new());
    let summary = RwSignal::new(String::new());
    let description = RwSignal::new(String::new());
    let icon = RwSignal::new(String::new());
    // One requirement per line.
    let requirements = RwSignal::new(String::new());
    let error = RwSignal::new(String::new());

    let submit = Callback::new(move |()| {
        if name.get_untracked().trim().is_empty() {
            error.set("Name is required.".to_owned());
            return;
        }
        let requirement_lines: Vec<String> = requirements
            .get_untracked()
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(ToOwned::to_owned)
            .collect();
        let icon_value = icon.get_untracked();
        let input = ServiceOfferingInput {
            name: name.get_untracked().trim().to_owned(),
            summary: summary.get_untracked(),
            description: description.get_untracked(),
            icon: if icon_value.trim().is_empty() { None } else { Some(icon_value.trim().to_owned()) },
            requirements: requirement_lines,
            is_featured: None,
        };
        let Some(token) = manager.cache().token() else {
            return;
        };
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::api::post_json::<ServiceOfferingInput, ServiceOffering>(
                "/api/admin/offerings",
                &token,
                &input,
            )
            .await
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
                <h2>"New service"</h2>
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
                    "Summary"
                    <input
                        class="dialog__input"
                        type="text"
                        prop:value=move || summary.get()
                        on:input=move |ev| summary.set(event_target_value(&ev))
                    />
                </label>
                <label class="dialog__label">
                    "Description"
                    <textarea
                        class="dialog__input dialog__textarea"
                        prop:value=move || description.get()
                        on:input=move |ev| description.set(event_target_value(&ev))
                    ></textarea>
                </label>
                <label class="dialog__label">
                    "Icon slug (optional)"
                    <input
                        class="dialog__input"
                        type="text"
                        placeholder="safe-deposit"
                        prop:value=move || icon.get()
                        on:input=move |ev| icon.set(event_target_value(&ev))
                    />
                </label>
                <label class="dialog__label">
                    "Requirements, one per line"
                    <textarea
                        class="dialog__input dialog__textarea"
                        prop:value=move || requirements.get()
                        on:input=move |ev| requirements.set(event_target_value(&ev))
                    ></textarea>
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
