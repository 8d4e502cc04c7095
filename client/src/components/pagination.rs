//! Page selector for list views backed by the server's `Page<T>`
//! envelope.

use leptos::prelude::*;

#[component]
pub fn Pagination(
    page: Signal<i64>,
    pages: Signal<i64>,
    on_page: Callback<i64>,
) -> impl IntoView {
    view! {
        <div class="pagination">
            <button
                class="btn pagination__prev"
                disabled=move || page.get() <= 1
                on:click=move |_| on_page.run(page.get() - 1)
            >
                "Previous"
            </button>
            <span class="pagination__label">
                {move || format!("Page {} of {}", page.get(), pages.get().max(1))}
            </span>
            <button
                class="btn pagination__next"
                disabled=move || page.get() >= pages.get()
                on:click=move |_| on_page.run(page.get() + 1)
            >
                "Next"
            </button>
        </div>
    }
}
