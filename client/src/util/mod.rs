//! Page-independent helpers: route guard, theming, formatting.

pub mod auth;
pub mod dark_mode;
pub mod format;
