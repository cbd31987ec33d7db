//! dash-core — the display-free core of the tubedash feed dashboard.
//!
//! Everything here is testable without a terminal: the snapshot model, the
//! loader, the days filter, the view builder, and the persisted
//! preferences/config. The TUI crate only materializes what this crate
//! produces.

pub mod config;
pub mod filter;
pub mod loader;
pub mod platform;
pub mod prefs;
pub mod snapshot;
pub mod view;
