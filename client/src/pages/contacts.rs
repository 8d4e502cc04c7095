//! Contact message inbox: read, reply, delete.

use leptos::prelude::*;

use models::{ContactMessage, ContactStats, Page};

use crate::components::confirm_dialog::ConfirmDialog;
use crate::components::layout::AdminLayout;
use crate::components::pagination::Pagination;
use crate::components::stat_cards::StatCard;
use crate::session::manager::SessionManager;
use crate::util::format::date_time;

#[component]
pub fn ContactsPage() -> impl IntoView {
    let manager = expect_context::<SessionManager>();

    let page = RwSignal::new(1_i64);
    let pages = RwSignal::new(1_i64);
    let items = RwSignal::new(Vec::<ContactMessage>::new());
    let stats = RwSignal::new(ContactStats::default());
    let error = RwSignal::new(String::new());
    let selected = RwSignal::new(None::<ContactMessage>);
    let delete_target = RwSignal::new(None::<ContactMessage>);
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
                let path = format!("/api/admin/contacts?page={current_page}&size=20");
                match crate::net::api::get_json::<Page<ContactMessage>>(&path, &token).await {
                    Ok(listing) => {
                        items.set(listing.items);
                        pages.set(listing.pages);
                        error.set(String::new());
                    }
                    Err(message) => error.set(message),
                }
                if let Ok(s) = crate::net::api::get_json::<ContactStats>("/api/admin/contacts/stats", &token).await {
                    stats.set(s);
                }
            });
        });
    }

    let token_for = {
        let manager = manager.clone();
        move || manager.cache().token()
    };

    // Opening a message marks it read.
    let on_open = {
        let token_for = token_for.clone();
        Callback::new(move |message: ContactMessage| {
            let already_read = message.is_read;
            let id = message.id;
            selected.set(Some(message));
            if already_read {
                return;
            }
            let Some(token) = token_for() else {
                return;
            };
            #[cfg(feature = "hydrate")]
            leptos::task::spawn_local(async move {
                let path = format!("/api/admin/contacts/{id}/mark-read");
                if crate::net::api::post_empty::<ContactMessage>(&path, &token).await.is_ok() {
                    reload_tick.update(|t| *t += 1);
                }
            });
            #[cfg(not(feature = "hydrate"))]
            {
                let _ = (token, id);
            }
        })
    };

    let on_delete = {
        let token_for = token_for.clone();
        Callback::new(move |()| {
            let Some(message) = delete_target.get_untracked() else {
                return;
            };
            delete_target.set(None);
            let Some(token) = token_for() else {
                return;
            };
            #[cfg(feature = "hydrate")]
            leptos::task::spawn_local(async move {
                let path = format!("/api/admin/contacts/{}", message.id);
                match crate::net::api::delete(&path, &token).await {
                    Ok(()) => {
                        selected.set(None);
                        reload_tick.update(|t| *t += 1);
                    }
                    Err(msg) => error.set(msg),
                }
            });
            #[cfg(not(feature = "hydrate"))]
            {
                let _ = (token, message);
            }
        })
    };

    view! {
        <AdminLayout title="Contact messages">
            <section class="dashboard-stats">
                <StatCard label="Total" value=Signal::derive(move || stats.get().total) />
                <StatCard label="Unread" value=Signal::derive(move || stats.get().unread) />
                <StatCard label="Replied" value=Signal::derive(move || stats.get().replied) />
            </section>
            <Show when=move || !error.get().is_empty()>
                <p class="page-error">{move || error.get()}</p>
            </Show>
            <table class="admin-table">
                <thead>
                    <tr>
                        <th>"From"</th>
                        <th>"Subject"</th>
                        <th>"Received"</th>
                        <th>"Status"</th>
                        <th>"Actions"</th>
                    </tr>
                </thead>
                <tbody>
                    {move || {
                        items
                            .get()
                            .into_iter()
                            .map(|message| {
                                let open_message = message.clone();
                                let delete_message = message.clone();
                                let row_class = if message.is_read { "" } else { "admin-table__row--unread" };
                                view! {
                                    <tr class=row_class>
                                        <td>
                                            {message.name.clone()}
                                            <br />
                                            <small>{message.email.clone()}</small>
                                        </td>
                                        <td>{message.subject.clone()}</td>
                                        <td>{date_time(message.created_at)}</td>
                                        <td>
                                            {if message.is_replied {
                                                "Replied"
                                            } else if message.is_read {
                                                "Read"
                                            } else {
                                                "Unread"
                                            }}
                                        </td>
                                        <td class="admin-table__actions">
                                            <button class="btn btn--small" on:click=move |_| on_open.run(open_message.clone())>
                                                "Open"
                                            </button>
                                            <button
                                                class="btn btn--small btn--danger"
                                                on:click=move |_| delete_target.set(Some(delete_message.clone()))
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
            <Show when=move || selected.get().is_some()>
                <MessageDialog
                    message=Signal::derive(move || selected.get())
                    on_replied=Callback::new(move |()| {
                        selected.set(None);
                        reload_tick.update(|t| *t += 1);
                    })
                    on_close=Callback::new(move |()| selected.set(None))
                />
            </Show>
            <Show when=move || delete_target.get().is_some()>
                <ConfirmDialog
                    title="Delete message"
                    message="This permanently deletes the message and any recorded reply."
                    on_confirm=on_delete
                    on_cancel=Callback::new(move |()| delete_target.set(None))
                />
            </Show>
        </AdminLayout>
    }
}

/// Detail view with a reply box.
#[component]
fn MessageDialog(
    message: Signal<Option<ContactMessage>>,
    on_replied: Callback<()>,
    on_close: Callback<()>,
) -> impl IntoView {
    let manager = expect_context::<SessionManager>();
    let reply_text = RwSignal::new(String::new());
    let error = RwSignal::new(String::new());

    let on_reply = Callback::new(move |()| {
        let Some(current) = message.get_untracked() else {
            return;
        };
        let body = reply_text.get_untracked();
        if body.trim().is_empty() {
            error.set("Reply text is required.".to_owned());
            return;
        }
        let Some(token) = manager.cache().token() else {
            return;
        };
        #[cfg(feature = "hydrate")]
        leptos::task::spawn_local(async move {
            let path = format!("/api/admin/contacts/{}/reply", current.id);
            let payload = serde_json::json!({ "reply_message": body.trim() });
            match crate::net::api::post_json::<serde_json::Value, ContactMessage>(&path, &token, &payload).await {
                Ok(_) => on_replied.run(()),
                Err(msg) => error.set(msg),
            }
        });
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (token, current, body, on_replied);
        }
    });

    view! {
        <div class="dialog-backdrop" on:click=move |_| on_close.run(())>
            <div class="dialog dialog--wide" on:click=move |ev| ev.stop_propagation()>
                {move || {
                    message
                        .get()
                        .map(|m| {
                            view! {
                                <h2>{m.subject.clone()}</h2>
                                <p class="message-meta">
                                    {m.name.clone()} " <" {m.email.clone()} "> · " {date_time(m.created_at)}
                                </p>
                                <p class="message-body">{m.message.clone()}</p>
                                {m.is_replied.then(|| {
                                    view! {
                                        <p class="message-reply">
                                            <strong>"Reply sent: "</strong>
                                            {m.reply_message.clone().unwrap_or_default()}
                                        </p>
                                    }
                                })}
                            }
                        })
                }}
                <label class="dialog__label">
                    "Reply"
                    <textarea
                        class="dialog__input dialog__textarea"
                        prop:value=move || reply_text.get()
                        on:input=move |ev| reply_text.set(event_target_value(&ev))
                    ></textarea>
                </label>
                <Show when=move || !error.get().is_empty()>
                    <p class="dialog__error">{move || error.get()}</p>
                </Show>
                <div class="dialog__actions">
                    <button class="btn" on:click=move |_| on_close.run(())>
                        "Close"
                    </button>
                    <button class="btn btn--primary" on:click=move |_| on_reply.run(())>
                        "Record reply"
                    </button>
                </div>
            </div>
        </div>
    }
}
