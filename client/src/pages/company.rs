//! Company profile editor backing the public about-us page.

use leptos::prelude::*;

use models::{CompanyInfo, CompanyInput};

use crate::components::layout::AdminLayout;
use crate::session::manager::SessionManager;

#[component]
pub fn CompanyPage() -> impl IntoView {
    let manager = expect_context::<SessionManager>();

    let name = RwSignal::new(String::new());
    let tagline = RwSignal::new(String::new());
    let description = RwSignal::new(String::new());
    let mission = RwSignal::new(String::new());
    let address = RwSignal::new(String::new());
    let phone = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let founded_year = RwSignal::new(String::new());
    let notice = RwSignal::new(String::new());
    let saved = RwSignal::new(false);

    #[cfg(feature = "hydrate")]
    {
        let manager = manager.clone();
        Effect::new(move || {
            let Some(token) = manager.cache().token() else {
                return;
            };
            leptos::task::spawn_local(async move {
                // 404 just means the profile has never been saved.
                if let Ok(info) = crate::net::api::get_json::<CompanyInfo>("/api/admin/company", &token).await {
                    name.set(info.name);
                    tagline.set(info.tagline.unwrap_or_default());
                    description.set(info.description.unwrap_or_default());
                    mission.set(info.mission.unwrap_or_default());
                    address.set(info.address.unwrap_or_default());
                    phone.set(info.phone.unwrap_or_default());
                    email.set(info.email.unwrap_or_default());
                    founded_year.set(info.founded_year.map(|y| y.to_string()).unwrap_or_default());
                }
            });
        });
    }

    fn opt(value: String) -> Option<String> {
        let trimmed = value.trim();
        if trimmed.is_empty() { None } else { Some(trimmed.to_owned()) }
    }

    let on_save = {
        let manager = manager.clone();
        move |ev: leptos::ev::SubmitEvent| {
            ev.prevent_default();
            saved.set(false);
            if name.get_untracked().trim().is_empty() {
                notice.set("Company name is required.".to_owned());
                return;
            }
            let input = CompanyInput {
                name: name.get_untracked().trim().to_owned(),
                tagline: opt(tagline.get_untracked()),
                description: opt(description.get_untracked()),
                mission: opt(mission.get_untracked()),
                vision: None,
                address: opt(address.get_untracked()),
                phone: opt(phone.get_untracked()),
                email: opt(email.get_untracked()),
                website: None,
                founded_year: founded_year.get_untracked().trim().parse().ok(),
                logo_url: None,
            };
            let Some(token) = manager.cache().token() else {
                return;
            };
            #[cfg(feature = "hydrate")]
            leptos::task::spawn_local(async move {
                match crate::net::api::put_json::<CompanyInput, CompanyInfo>("/api/admin/company", &token, &input)
                    .await
                {
                    Ok(_) => {
                        saved.set(true);
                        notice.set("Saved.".to_owned());
                    }
                    Err(message) => notice.set(message),
                }
            });
            #[cfg(not(feature = "hydrate"))]
            {
                let _ = (token, input);
            }
        }
    };

    view! {
        <AdminLayout title="Company profile">
            <form class="company-form" on:submit=on_save>
                <label class="dialog__label">
                    "Company name"
                    <input
                        class="dialog__input"
                        type="text"
                        prop:value=move || name.get()
                        on:input=move |ev| name.set(event_target_value(&ev))
                    />
                </label>
                <label class="dialog__label">
                    "Tagline"
                    <input
                        class="dialog__input"
                        type="text"
                        prop:value=move || tagline.get()
                        on:input=move |ev| tagline.set(event_target_value(&ev))
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
                    "Mission"
                    <textarea
                        class="dialog__input dialog__textarea"
                        prop:value=move || mission.get()
                        on:input=move |ev| mission.set(event_target_value(&ev))
                    ></textarea>
                </label>
                <label class="dialog__label">
                    "Address"
                    <input
                        class="dialog__input"
                        type="text"
                        prop:value=move || address.get()
                        on:input=move |ev| address.set(event_target_value(&ev))
                    />
                </label>
                <label class="dialog__label">
                    "Phone"
                    <input
                        class="dialog__input"
                        type="text"
                        prop:value=move || phone.get()
                        on:input=move |ev| phone.set(event_target_value(&ev))
                    />
                </label>
                <label class="dialog__label">
                    "Contact email"
                    <input
                        class="dialog__input"
                        type="email"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                </label>
                <label class="dialog__label">
                    "Founded year"
                    <input
                        class="dialog__input"
                        type="number"
                        prop:value=move || founded_year.get()
                        on:input=move |ev| founded_year.set(event_target_value(&ev))
                    />
                </label>
                <Show when=move || !notice.get().is_empty()>
                    <p class=move || {
                        if saved.get() { "page-notice" } else { "page-error" }
                    }>{move || notice.get()}</p>
                </Show>
                <div class="dialog__actions">
                    <button class="btn btn--primary" type="submit">
                        "Save profile"
                    </button>
                </div>
            </form>
        </AdminLayout>
    }
}
