//! Admin panel theme switching.
//!
//! The preference lives under its own `localStorage` key, separate from
//! the session keys, so signing out keeps the staff member's theme.
//! With nothing stored, the OS-level `prefers-color-scheme` query
//! decides. The stylesheet keys everything off a `data-theme` attribute
//! on `<html>`; on the server there is no window, so every function
//! here degrades to the light default.

#[cfg(feature = "hydrate")]
const STORAGE_KEY: &str = "meridian_admin_dark";

#[cfg(feature = "hydrate")]
fn storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

/// Stored preference, falling back to the system color scheme.
#[must_use]
pub fn read_preference() -> bool {
    #[cfg(feature = "hydrate")]
    {
        if let Some(stored) = storage().and_then(|s| s.get_item(STORAGE_KEY).ok().flatten()) {
            return stored == "true";
        }
        web_sys::window()
            .and_then(|w| w.match_media("(prefers-color-scheme: dark)").ok().flatten())
            .is_some_and(|mq| mq.matches())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        false
    }
}

/// Set `data-theme` on the document element.
pub fn apply(enabled: bool) {
    #[cfg(feature = "hydrate")]
    {
        if let Some(el) = web_sys::window().and_then(|w| w.document()).and_then(|d| d.document_element()) {
            let _ = el.set_attribute("data-theme", if enabled { "dark" } else { "light" });
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = enabled;
    }
}

/// Flip the theme, persist the choice, and return the new value.
pub fn toggle(current: bool) -> bool {
    let next = !current;
    apply(next);
    #[cfg(feature = "hydrate")]
    {
        if let Some(s) = storage() {
            let _ = s.set_item(STORAGE_KEY, if next { "true" } else { "false" });
        }
    }
    next
}
