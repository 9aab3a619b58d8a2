//! Enumerations for TUI state management.

/// Application state for the terminal user interface.
#[derive(Clone, Copy, PartialEq)]
pub enum AppState {
    /// Moving between sections and lists.
    Browse,
    /// Keys go to the creation form.
    EditForm,
    /// Key binding overlay.
    Help,
}
