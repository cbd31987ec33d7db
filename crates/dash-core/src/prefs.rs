//! Persisted user preferences — theme and days filter.
//!
//! Both values are stored as free text in `prefs.toml` and interpreted on
//! read. Unparseable values degrade silently to the documented defaults; no
//! validation error is ever surfaced. Values persist until overwritten.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, warn};

use super::platform;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    /// Anything other than the literal `light` is dark, the default.
    fn parse(raw: &str) -> Self {
        if raw == "light" {
            Self::Light
        } else {
            Self::Dark
        }
    }
}

/// Raw on-disk shape. Values are kept as the strings the user entered.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct PrefsFile {
    #[serde(default)]
    theme: Option<String>,
    #[serde(default)]
    days_filter: Option<String>,
}

pub struct Prefs {
    path: PathBuf,
    raw: PrefsFile,
}

impl Prefs {
    pub fn load() -> Self {
        Self::load_from(platform::config_dir().join("prefs.toml"))
    }

    /// Missing or unparseable files mean defaults, never an error.
    pub fn load_from(path: PathBuf) -> Self {
        let raw = match std::fs::read_to_string(&path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(raw) => raw,
                Err(e) => {
                    debug!("prefs: ignoring malformed {}: {}", path.display(), e);
                    PrefsFile::default()
                }
            },
            Err(_) => PrefsFile::default(),
        };
        Self { path, raw }
    }

    pub fn theme(&self) -> Theme {
        self.raw.theme.as_deref().map(Theme::parse).unwrap_or_default()
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.raw.theme = Some(theme.as_str().to_string());
        self.save();
    }

    /// The days filter as a positive integer, or `None` ("show all") when
    /// unset, non-numeric, or non-positive.
    pub fn days_filter(&self) -> Option<usize> {
        let raw = self.raw.days_filter.as_deref()?.trim();
        match raw.parse::<i64>() {
            Ok(n) if n > 0 => Some(n as usize),
            _ => None,
        }
    }

    /// Store the value exactly as entered; interpretation happens on read.
    pub fn set_days_filter(&mut self, raw: &str) {
        self.raw.days_filter = Some(raw.trim().to_string());
        self.save();
    }

    /// The stored text, for pre-filling the settings field.
    pub fn days_filter_raw(&self) -> &str {
        self.raw.days_filter.as_deref().unwrap_or("")
    }

    fn save(&self) {
        let write = || -> anyhow::Result<()> {
            if let Some(parent) = self.path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let content = toml::to_string_pretty(&self.raw)?;
            std::fs::write(&self.path, content)?;
            Ok(())
        };
        if let Err(e) = write() {
            warn!("prefs: failed to write {}: {}", self.path.display(), e);
        }
    }
}
