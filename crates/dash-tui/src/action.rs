//! Action enum — user intents flowing from components to the App.

use dash_core::prefs::Theme;

use crate::player::CardKey;

/// Unique identifier for a focusable component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentId {
    Dashboard,
    Settings,
}

/// All actions that can flow through the system.
/// Components produce Actions; the App dispatches them.
#[derive(Debug, Clone)]
pub enum Action {
    // ── Player ───────────────────────────────────────────────────────────────
    /// Exactly one toggle per user gesture, whether it came from the watch
    /// key or a click on the card row.
    TogglePlayer { key: CardKey, video_id: String },

    // ── Preferences / view ───────────────────────────────────────────────────
    ToggleTheme,
    OpenSettings,
    ApplySettings { theme: Theme, days_filter_raw: String },
    CloseSettings,
    Reload,

    // ── UI ───────────────────────────────────────────────────────────────────
    CopyToClipboard(String),

    // ── System ───────────────────────────────────────────────────────────────
    Quit,
}
