//! Chrome-level UI state: theme and transient banners.

/// UI state shared across admin pages.
#[derive(Clone, Debug, Default)]
pub struct UiState {
    pub dark_mode: bool,
}
