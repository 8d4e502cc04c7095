//! Small stat cards used by dashboard and list headers.

use leptos::prelude::*;

#[component]
pub fn StatCard(#[prop(into)] label: String, value: Signal<i64>) -> impl IntoView {
    view! {
        <div class="stat-card">
            <span class="stat-card__value">{move || value.get()}</span>
            <span class="stat-card__label">{label}</span>
        </div>
    }
}
