//! Inline player controller — at most one mpv process per video card.
//!
//! Each card is a two-state machine: Closed (initial) and Open. Opening
//! validates the video id, builds the embed URL, and spawns mpv with
//! scripting disabled; an invalid id refuses the transition with no visible
//! effect. Closing kills the process and discards its state entirely — no
//! pause/resume memory. When the view tree is replaced the cards are gone,
//! so every player is closed first.

use std::collections::HashMap;
use std::process::Stdio;

use tracing::{debug, warn};

use dash_core::platform;
use dash_core::snapshot::is_embeddable_id;

/// Position of a card in the current tree: (section, channel, video).
pub type CardKey = (usize, usize, usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    Opened,
    Closed,
    /// Invalid id or failed spawn; state stays Closed, nothing is surfaced.
    Refused,
}

pub enum Launcher {
    Mpv,
    /// Tracks transitions without spawning anything — player disabled in
    /// config, and what the tests use.
    Null,
}

struct PlayerInstance {
    url: String,
    child: Option<tokio::process::Child>,
}

pub struct PlayerController {
    launcher: Launcher,
    open: HashMap<CardKey, PlayerInstance>,
}

impl PlayerController {
    pub fn new(launcher: Launcher) -> Self {
        Self {
            launcher,
            open: HashMap::new(),
        }
    }

    /// Exactly one transition per call: Open cards close, Closed cards open
    /// (or refuse).
    pub async fn toggle(&mut self, key: CardKey, video_id: &str) -> Toggle {
        if let Some(mut inst) = self.open.remove(&key) {
            if let Some(mut child) = inst.child.take() {
                let _ = child.kill().await;
            }
            debug!("player: closed card {:?}", key);
            return Toggle::Closed;
        }

        let url = match embed_url(video_id) {
            Some(url) => url,
            None => {
                debug!("player: refused invalid video id {:?}", video_id);
                return Toggle::Refused;
            }
        };

        let child = match self.launcher {
            Launcher::Mpv => match spawn_mpv(&url) {
                Ok(child) => Some(child),
                Err(e) => {
                    warn!("player: failed to start mpv: {:#}", e);
                    return Toggle::Refused;
                }
            },
            Launcher::Null => None,
        };

        debug!("player: opened card {:?} -> {}", key, url);
        self.open.insert(key, PlayerInstance { url, child });
        Toggle::Opened
    }

    pub fn is_open(&self, key: CardKey) -> bool {
        self.open.contains_key(&key)
    }

    pub fn open_url(&self, key: CardKey) -> Option<&str> {
        self.open.get(&key).map(|inst| inst.url.as_str())
    }

    pub fn open_count(&self) -> usize {
        self.open.len()
    }

    /// Drop cards whose mpv exited on its own (user closed the window).
    /// Returns true when anything changed.
    pub fn prune_exited(&mut self) -> bool {
        let before = self.open.len();
        self.open.retain(|key, inst| match inst.child.as_mut() {
            Some(child) => match child.try_wait() {
                Ok(None) => true,
                Ok(Some(status)) => {
                    debug!("player: mpv for {:?} exited: {}", key, status);
                    false
                }
                Err(e) => {
                    warn!("player: liveness check failed for {:?}: {}", key, e);
                    false
                }
            },
            None => true,
        });
        self.open.len() != before
    }

    /// Close everything — view replaced or app exiting. Terminal state of
    /// every card is Closed.
    pub async fn close_all(&mut self) {
        for (_, mut inst) in self.open.drain() {
            if let Some(mut child) = inst.child.take() {
                let _ = child.kill().await;
            }
        }
    }
}

/// Embed URL for a validated id; `None` refuses unsafe ids outright.
pub fn embed_url(video_id: &str) -> Option<String> {
    if !is_embeddable_id(video_id) {
        return None;
    }
    Some(format!(
        "https://www.youtube.com/embed/{}?autoplay=1",
        video_id
    ))
}

/// Shareable watch URL, same validation as the embed form.
pub fn watch_url(video_id: &str) -> Option<String> {
    if !is_embeddable_id(video_id) {
        return None;
    }
    Some(format!("https://www.youtube.com/watch?v={}", video_id))
}

fn spawn_mpv(url: &str) -> anyhow::Result<tokio::process::Child> {
    let mpv_binary = platform::find_mpv_binary()
        .ok_or_else(|| anyhow::anyhow!("mpv binary not found beside exe or on PATH"))?;

    let child = tokio::process::Command::new(&mpv_binary)
        .arg("--really-quiet")
        .arg("--load-scripts=no")
        .arg(url)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .kill_on_drop(true)
        .spawn()?;
    debug!("player: spawned mpv pid {:?}", child.id());
    Ok(child)
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: CardKey = (0, 0, 0);

    #[test]
    fn embed_url_requires_safe_id() {
        assert_eq!(
            embed_url("dQw4w9WgXcQ").as_deref(),
            Some("https://www.youtube.com/embed/dQw4w9WgXcQ?autoplay=1")
        );
        assert_eq!(embed_url("abc 123"), None);
        assert_eq!(embed_url("../etc"), None);
        assert_eq!(embed_url(""), None);
        assert_eq!(
            watch_url("a_b-C9").as_deref(),
            Some("https://www.youtube.com/watch?v=a_b-C9")
        );
    }

    #[tokio::test]
    async fn toggle_round_trip_leaves_no_player() {
        let mut players = PlayerController::new(Launcher::Null);
        assert_eq!(players.toggle(KEY, "abc123").await, Toggle::Opened);
        assert!(players.is_open(KEY));
        assert_eq!(players.toggle(KEY, "abc123").await, Toggle::Closed);
        assert!(!players.is_open(KEY));
        assert_eq!(players.open_count(), 0);
    }

    #[tokio::test]
    async fn invalid_id_never_attaches_a_player() {
        let mut players = PlayerController::new(Launcher::Null);
        // "abc 123" contains a space — every attempt must refuse.
        for _ in 0..3 {
            assert_eq!(players.toggle(KEY, "abc 123").await, Toggle::Refused);
            assert!(!players.is_open(KEY));
        }
        assert_eq!(players.open_count(), 0);
    }

    #[tokio::test]
    async fn cards_toggle_independently() {
        let mut players = PlayerController::new(Launcher::Null);
        let other: CardKey = (0, 0, 1);
        players.toggle(KEY, "one_1").await;
        players.toggle(other, "two_2").await;
        assert_eq!(players.open_count(), 2);

        players.toggle(KEY, "one_1").await;
        assert!(!players.is_open(KEY));
        assert!(players.is_open(other));
        assert_eq!(players.open_url(other).unwrap(), embed_url("two_2").unwrap());
    }

    #[tokio::test]
    async fn close_all_resets_every_card() {
        let mut players = PlayerController::new(Launcher::Null);
        players.toggle((0, 0, 0), "a1").await;
        players.toggle((0, 1, 0), "b2").await;
        players.close_all().await;
        assert_eq!(players.open_count(), 0);
    }
}
