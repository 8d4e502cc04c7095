//! Hero banner management: carousel content, activation, ordering.

use leptos::prelude::*;

use models::{HeroBanner, HeroBannerInput, ReorderRequest};

use crate::components::confirm_dialog::ConfirmDialog;
use crate::components::layout::AdminLayout;
use crate::session::manager::SessionManager;

#[component]
pub fn BannersPage() -> impl IntoView {
    let manager = expect_context::<SessionManager>();

    let items = RwSignal::new(Vec::<HeroBanner>::new());
    let error = RwSignal::new(String::new());
    let show_editor = RwSignal::new(false);
    let delete_target = RwSignal::new(None::<HeroBanner>);
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
                match crate::net::api::get_json::<Vec<HeroBanner>>("/api/admin/banners", &token).await {
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
        Callback::new(move |banner: HeroBanner| {
            let Some(token) = token_for() else {
                return;
            };
            #[cfg(feature = "hydrate")]
            leptos::task::spawn_local(async move {
                let path = format!("/api/admin/banners/{}/toggle-active", banner.id);
                match crate::net::api::post_empty::<HeroBanner>(&path, &token).await {
                    Ok(_) => reload_tick.update(|t| *t += 1),
                    Err(message) => error.set(message),
                }
            });
            #[cfg(not(feature = "hydrate"))]
            {
                let _ = (token, banner);
            }
        })
    };

    // Swap the banner with its neighbor and send the full id order.
    let on_move = {
        let token_for = token_for.clone();
        Callback::new(move |(banner, up): (HeroBanner, bool)| {
            let mut ids: Vec<_> = items.get_untracked().iter().map(|b| b.id).collect();
            let Some(index) = ids.iter().position(|id| *id == banner.id) else {
                return;
            };
            let target = if up { index.checked_sub(1) } else { index.checked_add(1) };
            let Some(target) = target.filter(|t| *t < ids.len()) else {
                return;
            };
            ids.swap(index, target);
            let Some(token) = token_for() else {
                return;
            };
            #[cfg(feature = "hydrate")]
            leptos::task::spawn_local(async move {
                let request = ReorderRequest { ids };
                match crate::net::api::post_json::<ReorderRequest, Vec<HeroBanner>>(
                    "/api/admin/banners/reorder",
                    &token,
                    &request,
                )
                .await
                {
                    Ok(list) => items.set(list),
                    Err(message) => error.set(message),
                }
            });
            #[cfg(not(feature = "hydrate"))]
            {
                let _ = (token, ids);
            }
        })
    };

    let on_delete = {
        let token_for = token_for.clone();
        Callback::new(move |()| {
            let Some(banner) = delete_target.get_untracked() else {
                return;
            };
            delete_target.set(None);
            let Some(token) = token_for() else {
                return;
            };
            #[cfg(feature = "hydrate")]
            leptos::task::spawn_local(async move {
                let path = format!("/api/admin/banners/{}", banner.id);
                match crate::net::api::delete(&path, &token).await {
                    Ok(()) => reload_tick.update(|t| *t += 1),
                    Err(message) => error.set(message),
                }
            });
            #[cfg(not(feature = "hydrate"))]
            {
                let _ = (token, banner);
            }
        })
    };

    view! {
        <AdminLayout title="Hero banners">
            <div class="page-actions">
                <button class="btn btn--primary" on:click=move |_| show_editor.set(true)>
                    "+ New banner"
                </button>
            </div>
            <Show when=move || !error.get().is_empty()>
                <p class="page-error">{move || error.get()}</p>
            </Show>
            <table class="admin-table">
                <thead>
                    <tr>
                        <th>"Order"</th>
                        <th>"Title"</th>
                        <th>"Button"</th>
                        <th>"Active"</th>
                        <th>"Actions"</th>
                    </tr>
                </thead>
                <tbody>
                    {move || {
                        items
                            .get()
                            .into_iter()
                            .map(|banner| {
                                let up_banner = banner.clone();
                                let down_banner = banner.clone();
                                let toggle_banner = banner.clone();
                                let delete_banner = banner.clone();
                                view! {
                                    <tr>
                                        <td>
                                            {banner.position}
                                            <button class="btn btn--small" on:click=move |_| on_move.run((up_banner.clone(), true))>
                                                "↑"
                                            </button>
                                            <button class="btn btn--small" on:click=move |_| on_move.run((down_banner.clone(), false))>
                                                "↓"
                                            </button>
                                        </td>
                                        <td>{banner.title.clone()}</td>
                                        <td>{banner.button_text.clone().unwrap_or_default()}</td>
                                        <td>{if banner.is_active { "Yes" } else { "No" }}</td>
                                        <td class="admin-table__actions">
                                            <button class="btn btn--small" on:click=move |_| on_toggle.run(toggle_banner.clone())>
                                                {if banner.is_active { "Deactivate" } else { "Activate" }}
                                            </button>
                                            <button
                                                class="btn btn--small btn--danger"
                                                on:click=move |_| delete_target.set(Some(delete_banner.clone()))
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
                <BannerEditorDialog
                    on_saved=Callback::new(move |()| {
                        show_editor.set(false);
                        reload_tick.update(|t| *t += 1);
                    })
                    on_cancel=Callback::new(move |()| show_editor.set(false))
                />
            </Show>
            <Show when=move || delete_target.get().is_some()>
                <ConfirmDialog
                    title="Delete banner"
                    message="This removes the banner from the carousel permanently."
                    on_confirm=on_delete
                    on_cancel=Callback::new(move |()| delete_target.set(None))
                />
            </Show>
        </AdminLayout>
    }
}

#[component]
fn BannerEditorDialog(on_saved: Callback<()>, on_cancel: Callback<()>) -> impl IntoView {
    let manager = expect_context::<SessionManager>();

    let title = RwSignal::new(String::new());
    let subtitle = RwSignal::new(String::new());
    let button_text = RwSignal::new(String::new());
    let button_link = RwSignal::new(String::new());
    let image_url = RwSignal::new(String::new());
    let error = RwSignal::new(String::new());

    fn opt(value: String) -> Option<String> {
        let trimmed = value.trim();
        if trimmed.is_empty() { None } else { Some(trimmed.to_owned()) }
    }

    let submit = Callback::new(move |()| {
        if title.get_untracked().trim().is_empty() {
            error.set("Title is required.".to_owned());
            return;
        }
        let input = HeroBannerInput {
            title: title.get_untracked().trim().to_owned(),
            subtitle: opt(subtitle.get_untracked()),
            description: None,
            button_text: opt(button_text.get_untracked()),
            button_link: opt(button_link.get_untracked()),
            image_url: opt(image_url.get_untracked()),
        };
        let Some(token) = manager.cache().token() else {
            return;
        };
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::api::post_json::<HeroBannerInput, HeroBanner>("/api/admin/banners", &token, &input)
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
                <h2>"New banner"</h2>
                <label class="dialog__label">
                    "Title"
                    <input
                        class="dialog__input"
                        type="text"
                        prop:value=move || title.get()
                        on:input=move |ev| title.set(event_target_value(&ev))
                    />
                </label>
                <label class="dialog__label">
                    "Subtitle"
                    <input
                        class="dialog__input"
                        type="text"
                        prop:value=move || subtitle.get()
                        on:input=move |ev| subtitle.set(event_target_value(&ev))
                    />
                </label>
                <label class="dialog__label">
                    "Button text"
                    <input
                        class="dialog__input"
                        type="text"
                        prop:value=move || button_text.get()
                        on:input=move |ev| button_text.set(event_target_value(&ev))
                    />
                </label>
                <label class="dialog__label">
                    "Button link"
                    <input
                        class="dialog__input"
                        type="text"
                        prop:value=move || button_link.get()
                        on:input=move |ev| button_link.set(event_target_value(&ev))
                    />
                </label>
                <label class="dialog__label">
                    "Image URL"
                    <input
                        class="dialog__input"
                        type="text"
                        prop:value=move || image_url.get()
                        on:input=move |ev| image_url.set(event_target_value(&ev))
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
