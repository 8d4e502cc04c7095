//! Banking product management.

use leptos::prelude::*;

use models::{Product, ProductInput};

use crate::components::confirm_dialog::ConfirmDialog;
use crate::components::layout::AdminLayout;
use crate::session::manager::SessionManager;
use crate::util::format::truncate;

#[component]
pub fn ProductsPage() -> impl IntoView {
    let manager = expect_context::<SessionManager>();

    let items = RwSignal::new(Vec::<Product>::new());
    let error = RwSignal::new(String::new());
    let show_editor = RwSignal::new(false);
    let delete_target = RwSignal::new(None::<Product>);
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
                match crate::net::api::get_json::<Vec<Product>>("/api/admin/products", &token).await {
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

    let on_toggle_featured = {
        let token_for = token_for.clone();
        Callback::new(move |product: Product| {
            let Some(token) = token_for() else {
                return;
            };
            #[cfg(feature = "hydrate")]
            leptos::task::spawn_local(async move {
                let path = format!("/api/admin/products/{}/toggle-featured", product.id);
                match crate::net::api::post_empty::<Product>(&path, &token).await {
                    Ok(_) => reload_tick.update(|t| *t += 1),
                    Err(message) => error.set(message),
                }
            });
            #[cfg(not(feature = "hydrate"))]
            {
                let _ = (token, product);
            }
        })
    };

    let on_delete = {
        let token_for = token_for.clone();
        Callback::new(move |()| {
            let Some(product) = delete_target.get_untracked() else {
                return;
            };
            delete_target.set(None);
            let Some(token) = token_for() else {
                return;
            };
            #[cfg(feature = "hydrate")]
            leptos::task::spawn_local(async move {
                let path = format!("/api/admin/products/{}", product.id);
                match crate::net::api::delete(&path, &token).await {
                    Ok(()) => reload_tick.update(|t| *t += 1),
                    Err(message) => error.set(message),
                }
            });
            #[cfg(not(feature = "hydrate"))]
            {
                let _ = (token, product);
            }
        })
    };

    view! {
        <AdminLayout title="Products">
            <div class="page-actions">
                <button class="btn btn--primary" on:click=move |_| show_editor.set(true)>
                    "+ New product"
                </button>
            </div>
            <Show when=move || !error.get().is_empty()>
                <p class="page-error">{move || error.get()}</p>
            </Show>
            <table class="admin-table">
                <thead>
                    <tr>
                        <th>"Name"</th>
                        <th>"Category"</th>
                        <th>"Rate"</th>
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
                            .map(|product| {
                                let toggle_product = product.clone();
                                let delete_product = product.clone();
                                view! {
                                    <tr>
                                        <td>
                                            <strong>{product.name.clone()}</strong>
                                            <br />
                                            <small>{truncate(&product.summary, 70)}</small>
                                        </td>
                                        <td>{product.category.clone()}</td>
                                        <td>{product.rate_info.clone().unwrap_or_default()}</td>
                                        <td>{if product.is_featured { "Yes" } else { "No" }}</td>
                                        <td>{if product.is_active { "Yes" } else { "No" }}</td>
                                        <td class="admin-table__actions">
                                            <button
                                                class="btn btn--small"
                                                on:click=move |_| on_toggle_featured.run(toggle_product.clone())
                                            >
                                                {if product.is_featured { "Unfeature" } else { "Feature" }}
                                            </button>
                                            <button
                                                class="btn btn--small btn--danger"
                                                on:click=move |_| delete_target.set(Some(delete_product.clone()))
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
                <ProductEditorDialog
                    on_saved=Callback::new(move |()| {
                        show_editor.set(false);
                        reload_tick.update(|t| *t += 1);
                    })
                    on_cancel=Callback::new(move |()| show_editor.set(false))
                />
            </Show>
            <Show when=move || delete_target.get().is_some()>
                <ConfirmDialog
                    title="Delete product"
                    message="This removes the product from the public site permanently."
                    on_confirm=on_delete
                    on_cancel=Callback::new(move |()| delete_target.set(None))
                />
            </Show>
        </AdminLayout>
    }
}

#[component]
fn ProductEditorDialog(on_saved: Callback<()>, on_cancel: Callback<()>) -> impl IntoView {
    let manager = expect_context::<SessionManager>();

    let name = RwSignal::new(String::new());
    let summary = RwSignal::new(String::new());
    let description = RwSignal::new(String::new());
    let category = RwSignal::new(String::new());
    let rate_info = RwSignal::new(String::new());
    // One feature per line in the textarea.
    let features = RwSignal::new(String::new());
    let error = RwSignal::new(String::new());

    let submit = Callback::new(move |()| {
        if name.get_untracked().trim().is_empty() || category.get_untracked().trim().is_empty() {
            error.set("Name and category are required.".to_owned());
            return;
        }
        let feature_lines: Vec<String> = features
            .get_untracked()
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(ToOwned::to_owned)
            .collect();
        let rate = rate_info.get_untracked();
        let input = ProductInput {
            name: name.get_untracked().trim().to_owned(),
            summary: summary.get_untracked(),
            description: description.get_untracked(),
            category: category.get_untracked().trim().to_owned(),
            rate_info: if rate.trim().is_empty() { None } else { Some(rate.trim().to_owned()) },
            features: feature_lines,
            image_url: None,
            is_featured: None,
        };
        let Some(token) = manager.cache().token() else {
            return;
        };
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::api::post_json::<ProductInput, Product>("/api/admin/products", &token, &input).await {
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
            <div class="dialog dialog--wide" on:click=move |ev| ev.stop_propagation()>
                <h2>"New product"</h2>
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
                    "Category (e.g. accounts, cards, loans)"
                    <input
                        class="dialog__input"
                        type="text"
                        prop:value=move || category.get()
                        on:input=move |ev| category.set(event_target_value(&ev))
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
                    "Rate line (optional)"
                    <input
                        class="dialog__input"
                        type="text"
                        placeholder="from 4.2% APR"
                        prop:value=move || rate_info.get()
                        on:input=move |ev| rate_info.set(event_target_value(&ev))
                    />
                </label>
                <label class="dialog__label">
                    "Features, one per line"
                    <textarea
                        class="dialog__input dialog__textarea"
                        prop:value=move || features.get()
                        on:input=move |ev| features.set(event_target_value(&ev))
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
