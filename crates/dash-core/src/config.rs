use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::platform;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub snapshot: SnapshotConfig,
    #[serde(default)]
    pub player: PlayerConfig,
}

/// Snapshot source — either an https:// URL or a local file path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotConfig {
    /// URL or file path for the JSON snapshot. Defaults to `data.json`
    /// beside the working directory, matching the upstream writer's output.
    #[serde(default = "default_snapshot_source")]
    pub source: String,
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            source: default_snapshot_source(),
        }
    }
}

fn default_snapshot_source() -> String {
    "data.json".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerConfig {
    /// Disable to browse without spawning mpv (e.g. over ssh); the watch
    /// action then only tracks open/closed state.
    #[serde(default = "default_player_enabled")]
    pub enabled: bool,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            enabled: default_player_enabled(),
        }
    }
}

fn default_player_enabled() -> bool {
    true
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            let config = Self::default();
            config.save()?;
            return Ok(config);
        }

        let content = std::fs::read_to_string(&config_path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        platform::config_dir().join("config.toml")
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            snapshot: SnapshotConfig::default(),
            player: PlayerConfig::default(),
        }
    }
}
