//! News and announcement management.

use leptos::prelude::*;

use models::{NewsArticle, NewsCategory, NewsInput, Page};

use crate::components::confirm_dialog::ConfirmDialog;
use crate::components::layout::AdminLayout;
use crate::components::pagination::Pagination;
use crate::session::manager::SessionManager;
use crate::util::format::{markdown_to_html, short_date, truncate};

#[component]
pub fn NewsPage() -> impl IntoView {
    let manager = expect_context::<SessionManager>();

    let page = RwSignal::new(1_i64);
    let pages = RwSignal::new(1_i64);
    let items = RwSignal::new(Vec::<NewsArticle>::new());
    let error = RwSignal::new(String::new());
    let show_editor = RwSignal::new(false);
    let delete_target = RwSignal::new(None::<NewsArticle>);
    let reload_tick = RwSignal::new(0_u32);

    #[cfg(feature = "hydrate")]
    {
        let manager = manager.clone();
        Effect::new(move || {
            reload_tick.track();
            let current_page = page.get();
            let Some(token) = manager.cache().token() else {
                return;
            };
            leptos::task::spawn_local(async move {
                let path = format!("/api/admin/news?page={current_page}&size=20");
                match crate::net::api::get_json::<Page<NewsArticle>>(&path, &token).await {
                    Ok(listing) => {
                        items.set(listing.items);
                        pages.set(listing.pages);
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

    let on_toggle_publish = {
        let token_for = token_for.clone();
        Callback::new(move |article: NewsArticle| {
            let Some(token) = token_for() else {
                return;
            };
            #[cfg(feature = "hydrate")]
            leptos::task::spawn_local(async move {
                let action = if article.is_published { "unpublish" } else { "publish" };
                let path = format!("/api/admin/news/{}/{action}", article.id);
                match crate::net::api::post_empty::<NewsArticle>(&path, &token).await {
                    Ok(_) => reload_tick.update(|t| *t += 1),
                    Err(message) => error.set(message),
                }
            });
            #[cfg(not(feature = "hydrate"))]
            {
                let _ = (token, article);
            }
        })
    };

    let on_delete = {
        let token_for = token_for.clone();
        Callback::new(move |()| {
            let Some(article) = delete_target.get_untracked() else {
                return;
            };
            delete_target.set(None);
            let Some(token) = token_for() else {
                return;
            };
            #[cfg(feature = "hydrate")]
            leptos::task::spawn_local(async move {
                let path = format!("/api/admin/news/{}", article.id);
                match crate::net::api::delete(&path, &token).await {
                    Ok(()) => reload_tick.update(|t| *t += 1),
                    Err(message) => error.set(message),
                }
            });
            #[cfg(not(feature = "hydrate"))]
            {
                let _ = (token, article);
            }
        })
    };

    view! {
        <AdminLayout title="News">
            <div class="page-actions">
                <button class="btn btn--primary" on:click=move |_| show_editor.set(true)>
                    "+ New article"
                </button>
            </div>
            <Show when=move || !error.get().is_empty()>
                <p class="page-error">{move || error.get()}</p>
            </Show>
            <table class="admin-table">
                <thead>
                    <tr>
                        <th>"Title"</th>
                        <th>"Category"</th>
                        <th>"Status"</th>
                        <th>"Views"</th>
                        <th>"Created"</th>
                        <th>"Actions"</th>
                    </tr>
                </thead>
                <tbody>
                    {move || {
                        items
                            .get()
                            .into_iter()
                            .map(|article| {
                                let toggle_article = article.clone();
                                let delete_article = article.clone();
                                view! {
                                    <tr>
                                        <td>
                                            <strong>{truncate(&article.title, 60)}</strong>
                                            <br />
                                            <small class="admin-table__slug">{article.slug.clone()}</small>
                                        </td>
                                        <td>{article.category.as_str()}</td>
                                        <td>
                                            {if article.is_published { "Published" } else { "Draft" }}
                                            {if article.is_sticky { " · sticky" } else { "" }}
                                        </td>
                                        <td>{article.views_count}</td>
                                        <td>{short_date(article.created_at)}</td>
                                        <td class="admin-table__actions">
                                            <button
                                                class="btn btn--small"
                                                on:click=move |_| on_toggle_publish.run(toggle_article.clone())
                                            >
                                                {if article.is_published { "Unpublish" } else { "Publish" }}
                                            </button>
                                            <button
                                                class="btn btn--small btn--danger"
                                                on:click=move |_| delete_target.set(Some(delete_article.clone()))
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
            <Pagination
                page=Signal::derive(move || page.get())
                pages=Signal::derive(move || pages.get())
                on_page=Callback::new(move |p| page.set(p))
            />
            <Show when=move || show_editor.get()>
                <NewsEditorDialog
                    on_saved=Callback::new(move |()| {
                        show_editor.set(false);
                        reload_tick.update(|t| *t += 1);
                    })
                    on_cancel=Callback::new(move |()| show_editor.set(false))
                />
            </Show>
            <Show when=move || delete_target.get().is_some()>
                <ConfirmDialog
                    title="Delete article"
                    message="This permanently removes the article from the site."
                    on_confirm=on_delete
                    on_cancel=Callback::new(move |()| delete_target.set(None))
                />
            </Show>
        </AdminLayout>
    }
}

/// Modal editor for creating an article.
#[component]
fn NewsEditorDialog(on_saved: Callback<()>, on_cancel: Callback<()>) -> impl IntoView {
    let manager = expect_context::<SessionManager>();

    let title = RwSignal::new(String::new());
    let summary = RwSignal::new(String::new());
    let body = RwSignal::new(String::new());
    let category = RwSignal::new("news".to_owned());
    let sticky = RwSignal::new(false);
    let preview = RwSignal::new(false);
    let error = RwSignal::new(String::new());

    let submit = Callback::new(move |()| {
        if title.get_untracked().trim().is_empty() {
            error.set("Title is required.".to_owned());
            return;
        }
        let input = NewsInput {
            title: title.get_untracked().trim().to_owned(),
            slug: None,
            summary: summary.get_untracked(),
            body: body.get_untracked(),
            category: NewsCategory::from_str(&category.get_untracked()),
            image_url: None,
            is_sticky: Some(sticky.get_untracked()),
            priority: None,
            announcement_expires_at: None,
        };
        let Some(token) = manager.cache().token() else {
            return;
        };
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            match crate::net::api::post_json::<NewsInput, NewsArticle>("/api/admin/news", &token, &input).await {
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
                <h2>"New article"</h2>
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
                    "Category"
                    <select
                        class="dialog__input"
                        on:change=move |ev| category.set(event_target_value(&ev))
                    >
                        <option value="news">"News"</option>
                        <option value="press_release">"Press release"</option>
                        <option value="announcement">"Announcement"</option>
                    </select>
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
                    "Body (markdown)"
                    <textarea
                        class="dialog__input dialog__textarea"
                        prop:value=move || body.get()
                        on:input=move |ev| body.set(event_target_value(&ev))
                    ></textarea>
                </label>
                <button class="btn btn--small" on:click=move |_| preview.update(|v| *v = !*v)>
                    {move || if preview.get() { "Hide preview" } else { "Preview" }}
                </button>
                <Show when=move || preview.get()>
                    <div class="dialog__preview" inner_html=move || markdown_to_html(&body.get())></div>
                </Show>
                <label class="dialog__label dialog__label--inline">
                    <input
                        type="checkbox"
                        prop:checked=move || sticky.get()
                        on:change=move |_| sticky.update(|v| *v = !*v)
                    />
                    "Sticky announcement"
                </label>
                <Show when=move || !error.get().is_empty()>
                    <p class="dialog__error">{move || error.get()}</p>
                </Show>
                <div class="dialog__actions">
                    <button class="btn" on:click=move |_| on_cancel.run(())>
                        "Cancel"
                    </button>
                    <button class="btn btn--primary" on:click=move |_| submit.run(())>
                        "Save draft"
                    </button>
                </div>
            </div>
        </div>
    }
}
