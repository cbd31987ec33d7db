//! AppState — shared data passed to all components during render/event.
//!
//! Components read this; only the App event loop writes to it. The view
//! tree inside is replaced wholesale, never patched while on screen.

use chrono::{DateTime, Utc};

use dash_core::prefs::Prefs;
use dash_core::snapshot::Snapshot;
use dash_core::view::ViewTree;

use crate::player::PlayerController;
use crate::theme::Palette;

/// Where the single best-effort load currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadPhase {
    Loading,
    Ready,
    Failed,
}

pub struct AppState {
    pub prefs: Prefs,
    /// The parsed snapshot, owned for the duration of one render cycle and
    /// replaced wholesale on reload.
    pub snapshot: Option<Snapshot>,
    pub phase: LoadPhase,
    pub view: ViewTree,
    /// When the last load resolved; the updated indicator is fixed to it.
    pub loaded_at: DateTime<Utc>,
    pub palette: Palette,
    pub players: PlayerController,
    /// One-line note for the status bar ("link copied", reload feedback).
    pub note: Option<String>,
    /// True while a reload is in flight; guards against concurrent fetches.
    pub reloading: bool,
}
