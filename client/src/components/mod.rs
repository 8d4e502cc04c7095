//! Reusable admin UI components.

pub mod confirm_dialog;
pub mod layout;
pub mod pagination;
pub mod stat_cards;
