//! App — event loop and dashboard orchestrator.
//!
//! Architecture:
//! - `App` owns the components and `AppState` (shared read-only data).
//! - A `tokio::mpsc` channel carries `AppMessage` events in from background
//!   tasks (terminal input, the snapshot loader).
//! - The loop draws a frame when something changed, then awaits the next
//!   message. Components return `Vec<Action>`; App dispatches each one.
//! - The ViewTree is rebuilt wholesale and swapped atomically; nothing else
//!   renders until the single in-flight load resolves.

use std::io;
use std::time::Duration;

use chrono::{Local, Utc};
use ratatui::crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    widgets::Block,
    Terminal,
};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use dash_core::config::Config;
use dash_core::loader::{self, LoadError};
use dash_core::prefs::Prefs;
use dash_core::snapshot::Snapshot;
use dash_core::view::{self, ViewTree};

use crate::{
    action::Action,
    app_state::{AppState, LoadPhase},
    component::Component,
    components::{dashboard::Dashboard, settings_overlay::SettingsOverlay},
    player::{Launcher, PlayerController, Toggle},
    theme::Palette,
    widgets::{header_bar, status_bar},
};

// ── Internal event bus ────────────────────────────────────────────────────────

enum AppMessage {
    Event(Event),
    SnapshotLoaded(Result<Snapshot, LoadError>),
}

pub struct App {
    config: Config,
    state: AppState,
    dashboard: Dashboard,
    settings: SettingsOverlay,
    msg_tx: Option<mpsc::Sender<AppMessage>>,
    /// Last-drawn dashboard rect, for mouse hit-testing.
    dashboard_area: Rect,
    should_quit: bool,
}

impl App {
    pub fn new(config: Config, prefs: Prefs) -> Self {
        let palette = Palette::for_theme(prefs.theme());
        let launcher = if config.player.enabled {
            Launcher::Mpv
        } else {
            Launcher::Null
        };
        let state = AppState {
            prefs,
            snapshot: None,
            phase: LoadPhase::Loading,
            view: ViewTree::loading(),
            loaded_at: Utc::now(),
            palette,
            players: PlayerController::new(launcher),
            note: None,
            reloading: false,
        };
        Self {
            config,
            state,
            dashboard: Dashboard::new(),
            settings: SettingsOverlay::new(),
            msg_tx: None,
            dashboard_area: Rect::default(),
            should_quit: false,
        }
    }

    pub async fn run(mut self) -> anyhow::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        debug!("run(): terminal created, size={:?}", terminal.size());

        let (tx, mut rx) = mpsc::channel::<AppMessage>(256);
        self.msg_tx = Some(tx.clone());

        // ── Background task: keyboard/mouse events ────────────────────────────
        let event_tx = tx.clone();
        tokio::task::spawn_blocking(move || loop {
            match event::read() {
                Ok(ev) => {
                    if event_tx.blocking_send(AppMessage::Event(ev)).is_err() {
                        break;
                    }
                }
                Err(_) => break,
            }
        });

        // ── The one load per page life ────────────────────────────────────────
        self.spawn_load();

        // Player liveness check (user may close the mpv window directly).
        let mut ui_tick = tokio::time::interval(Duration::from_millis(500));
        ui_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        // ── Main loop ─────────────────────────────────────────────────────────
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal.draw(|f| self.draw(f))?;
            }
            needs_redraw = false;

            if self.should_quit {
                break;
            }

            tokio::select! {
                Some(msg) = rx.recv() => {
                    needs_redraw = self.handle_message(msg).await;
                }
                _ = ui_tick.tick() => {
                    needs_redraw = self.on_tick();
                }
            }
        }

        // ── Teardown ──────────────────────────────────────────────────────────
        self.state.players.close_all().await;
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;
        Ok(())
    }

    fn spawn_load(&self) {
        let Some(tx) = self.msg_tx.clone() else {
            return;
        };
        let source = self.config.snapshot.source.clone();
        tokio::spawn(async move {
            info!("loading snapshot from {}", source);
            let result = loader::load(&source).await;
            let _ = tx.send(AppMessage::SnapshotLoaded(result)).await;
        });
    }

    async fn handle_message(&mut self, msg: AppMessage) -> bool {
        match msg {
            AppMessage::Event(Event::Key(key)) => {
                self.handle_key(key).await;
                true
            }
            AppMessage::Event(Event::Mouse(mouse)) => {
                if self.settings.visible {
                    return false;
                }
                let actions = self
                    .dashboard
                    .handle_mouse(mouse, self.dashboard_area, &self.state);
                for action in actions {
                    self.dispatch(action).await;
                }
                true
            }
            AppMessage::Event(Event::Resize(_, _)) => true,
            AppMessage::Event(_) => false,
            AppMessage::SnapshotLoaded(result) => {
                self.state.reloading = false;
                self.state.loaded_at = Utc::now();
                match result {
                    Ok(snapshot) => {
                        info!(
                            "snapshot loaded: {} day(s), updated {:?}",
                            snapshot.days.len(),
                            snapshot.last_updated
                        );
                        self.state.snapshot = Some(snapshot);
                        self.state.phase = LoadPhase::Ready;
                    }
                    Err(e) => {
                        // One failure category for display; the variants are
                        // for this log line only.
                        error!("snapshot load failed: {}", e);
                        self.state.snapshot = None;
                        self.state.phase = LoadPhase::Failed;
                    }
                }
                self.state.note = None;
                self.rebuild_view().await;
                true
            }
        }
    }

    async fn handle_key(&mut self, key: KeyEvent) {
        if key.kind == KeyEventKind::Release {
            return;
        }

        // The settings overlay consumes every key while open.
        if self.settings.visible {
            let actions = self.settings.handle_key(key, &self.state);
            for action in actions {
                self.dispatch(action).await;
            }
            return;
        }

        let global = match key.code {
            KeyCode::Char('q') => Some(Action::Quit),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(Action::Quit)
            }
            KeyCode::Char('t') => Some(Action::ToggleTheme),
            KeyCode::Char('s') => Some(Action::OpenSettings),
            KeyCode::Char('R') => Some(Action::Reload),
            _ => None,
        };
        if let Some(action) = global {
            self.dispatch(action).await;
            return;
        }

        let actions = self.dashboard.handle_key(key, &self.state);
        for action in actions {
            self.dispatch(action).await;
        }
    }

    async fn dispatch(&mut self, action: Action) {
        match action {
            Action::TogglePlayer { key, video_id } => {
                // Refusal is deliberately invisible: a malformed upstream id,
                // not a user mistake.
                if self.state.players.toggle(key, &video_id).await != Toggle::Refused {
                    self.dashboard.rebuild_rows(&self.state);
                }
            }
            Action::CopyToClipboard(text) => self.copy_to_clipboard(text),
            Action::ToggleTheme => {
                let next = self.state.prefs.theme().toggled();
                self.state.prefs.set_theme(next);
                self.state.palette = Palette::for_theme(next);
            }
            Action::OpenSettings => self.settings.show(&self.state.prefs),
            Action::CloseSettings => {}
            Action::ApplySettings {
                theme,
                days_filter_raw,
            } => {
                self.state.prefs.set_theme(theme);
                self.state.prefs.set_days_filter(&days_filter_raw);
                self.state.palette = Palette::for_theme(theme);
                self.rebuild_view().await;
            }
            Action::Reload => {
                if !self.state.reloading && self.state.phase != LoadPhase::Loading {
                    self.state.reloading = true;
                    self.state.note = Some("reloading…".to_string());
                    self.spawn_load();
                }
            }
            Action::Quit => self.should_quit = true,
        }
    }

    /// Rebuild the whole tree and swap it in. The outgoing tree's cards are
    /// gone, so every open player closes first.
    async fn rebuild_view(&mut self) {
        self.state.players.close_all().await;
        self.state.view = match self.state.phase {
            LoadPhase::Loading => ViewTree::loading(),
            LoadPhase::Ready => view::build(
                self.state.snapshot.as_ref(),
                self.state.prefs.days_filter(),
                Utc::now(),
                Local::now().date_naive(),
            ),
            LoadPhase::Failed => view::build(
                None,
                self.state.prefs.days_filter(),
                Utc::now(),
                Local::now().date_naive(),
            ),
        };
        self.dashboard.reset(&self.state);
    }

    fn copy_to_clipboard(&mut self, text: String) {
        match arboard::Clipboard::new().and_then(|mut clipboard| clipboard.set_text(text)) {
            Ok(()) => self.state.note = Some("link copied".to_string()),
            Err(e) => warn!("clipboard copy failed: {}", e),
        }
    }

    fn on_tick(&mut self) -> bool {
        let changed = self.state.players.prune_exited();
        if changed {
            self.dashboard.rebuild_rows(&self.state);
        }
        changed
    }

    fn draw(&mut self, frame: &mut ratatui::Frame) {
        let area = frame.area();

        // Fill the terminal with the theme background so both palettes read
        // correctly regardless of the terminal default.
        frame.render_widget(
            Block::default().style(Style::default().bg(self.state.palette.bg)),
            area,
        );

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(area);

        header_bar::draw_header(frame, rows[0], &self.state);
        self.dashboard.draw(frame, rows[1], &self.state);
        self.dashboard_area = rows[1];
        status_bar::draw_keys_bar(frame, rows[2], &self.state, self.settings.visible);

        self.settings.draw(frame, area, &self.state);
    }
}
