//! Authenticated landing page: headline numbers and quick links.

use leptos::prelude::*;

use models::{ContactStats, NewsStats, UserStats};

use crate::components::layout::AdminLayout;
use crate::components::stat_cards::StatCard;
use crate::session::manager::SessionManager;
use crate::state::auth::AuthState;

#[component]
pub fn DashboardPage() -> impl IntoView {
    let auth = expect_context::<RwSignal<AuthState>>();
    let manager = expect_context::<SessionManager>();

    let news = RwSignal::new(NewsStats::default());
    let contacts = RwSignal::new(ContactStats::default());
    let users = RwSignal::new(UserStats::default());

    #[cfg(feature = "hydrate")]
    {
        let manager = manager.clone();
        Effect::new(move || {
            let state = auth.get();
            if state.loading || state.user.is_none() {
                return;
            }
            let is_admin = state.is_admin();
            let Some(token) = manager.cache().token() else {
                return;
            };
            leptos::task::spawn_local(async move {
                if let Ok(stats) = crate::net::api::get_json::<NewsStats>("/api/admin/news/stats", &token).await {
                    news.set(stats);
                }
                if let Ok(stats) =
                    crate::net::api::get_json::<ContactStats>("/api/admin/contacts/stats", &token).await
                {
                    contacts.set(stats);
                }
                if is_admin {
                    if let Ok(stats) =
                        crate::net::api::get_json::<UserStats>("/api/admin/users/stats", &token).await
                    {
                        users.set(stats);
                    }
                }
            });
        });
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = &manager;
    }

    view! {
        <AdminLayout title="Dashboard">
            <section class="dashboard-stats">
                <StatCard label="Articles" value=Signal::derive(move || news.get().total) />
                <StatCard label="Published" value=Signal::derive(move || news.get().published) />
                <StatCard label="Drafts" value=Signal::derive(move || news.get().drafts) />
                <StatCard label="Article views" value=Signal::derive(move || news.get().total_views) />
                <StatCard label="Unread messages" value=Signal::derive(move || contacts.get().unread) />
                <Show when=move || auth.get().is_admin()>
                    <StatCard label="Staff accounts" value=Signal::derive(move || users.get().total) />
                </Show>
            </section>
            <section class="dashboard-links">
                <a class="dashboard-link" href="/admin/news">"Write an article"</a>
                <a class="dashboard-link" href="/admin/banners">"Update the hero carousel"</a>
                <a class="dashboard-link" href="/admin/contacts">"Answer contact messages"</a>
            </section>
        </AdminLayout>
    }
}
