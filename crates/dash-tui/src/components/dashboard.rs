//! Dashboard component — materializes the ViewTree into terminal rows.
//!
//! The ViewTree stays pure data; this component flattens it into one row per
//! terminal line (headings, digests, channel groups, cards, open players)
//! and owns the transient browse state: selection, scroll, and which day
//! sections are currently expanded. Rows are rebuilt from scratch whenever
//! the tree, the expansion set, a player, or the width changes.

use ratatui::crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use dash_core::view::{msg_empty, DashboardBody, VideoCard, ViewClass, MSG_UNAVAILABLE};

use crate::{
    action::{Action, ComponentId},
    app_state::AppState,
    component::Component,
    player::{watch_url, CardKey},
};

const MSG_LOADING: &str = "Loading feed…";

/// How many wrapped lines a summary may take before it is cut with an
/// ellipsis.
const MAX_SUMMARY_LINES: usize = 4;

#[derive(Debug, Clone)]
enum Row {
    Blank,
    Fallback(String),
    DayHeading { section: usize },
    Digest { line: String },
    Channel { section: usize, channel: usize },
    CardTitle { key: CardKey },
    CardSummary { key: CardKey, line: String },
    Player { key: CardKey },
}

impl Row {
    fn selectable(&self) -> bool {
        matches!(
            self,
            Row::DayHeading { .. } | Row::Channel { .. } | Row::CardTitle { .. }
        )
    }
}

pub struct Dashboard {
    rows: Vec<Row>,
    selected: usize,
    scroll: usize,
    /// Runtime expansion state per section, seeded from the tree defaults.
    expanded: Vec<bool>,
    last_width: u16,
}

impl Dashboard {
    pub fn new() -> Self {
        Self {
            rows: Vec::new(),
            selected: 0,
            scroll: 0,
            expanded: Vec::new(),
            last_width: 80,
        }
    }

    /// Adopt a freshly swapped-in tree: reseed expansion defaults and reset
    /// the cursor.
    pub fn reset(&mut self, state: &AppState) {
        self.expanded = match &state.view.body {
            DashboardBody::Days(sections) => sections.iter().map(|s| s.expanded).collect(),
            _ => Vec::new(),
        };
        self.selected = 0;
        self.scroll = 0;
        self.rebuild_rows(state);
        if !self.rows.get(self.selected).map_or(false, Row::selectable) {
            self.move_selection(state, 1);
        }
    }

    /// Flatten the tree into display rows for the current width.
    pub fn rebuild_rows(&mut self, state: &AppState) {
        let width = (self.last_width as usize).max(20);
        let mut rows = Vec::new();

        match &state.view.body {
            DashboardBody::Loading => {
                rows.push(Row::Blank);
                rows.push(Row::Fallback(MSG_LOADING.to_string()));
            }
            DashboardBody::Unavailable => {
                rows.push(Row::Blank);
                rows.push(Row::Fallback(MSG_UNAVAILABLE.to_string()));
            }
            DashboardBody::Empty { days_hint } => {
                rows.push(Row::Blank);
                rows.push(Row::Fallback(msg_empty(*days_hint)));
            }
            DashboardBody::Days(sections) => {
                if self.expanded.len() != sections.len() {
                    self.expanded = sections.iter().map(|s| s.expanded).collect();
                }
                for (si, section) in sections.iter().enumerate() {
                    rows.push(Row::DayHeading { section: si });
                    if self.expanded[si] {
                        if let Some(digest) = &section.digest {
                            for line in wrap_text(digest, width.saturating_sub(4)) {
                                rows.push(Row::Digest { line });
                            }
                        }
                        for (ci, channel) in section.channels.iter().enumerate() {
                            rows.push(Row::Channel {
                                section: si,
                                channel: ci,
                            });
                            for (vi, card) in channel.videos.iter().enumerate() {
                                let key: CardKey = (si, ci, vi);
                                rows.push(Row::CardTitle { key });
                                let mut lines =
                                    wrap_text(card.summary.text(), width.saturating_sub(6));
                                if lines.len() > MAX_SUMMARY_LINES {
                                    lines.truncate(MAX_SUMMARY_LINES);
                                    if let Some(last) = lines.last_mut() {
                                        last.push_str(" …");
                                    }
                                }
                                for line in lines {
                                    rows.push(Row::CardSummary { key, line });
                                }
                                if state.players.is_open(key) {
                                    rows.push(Row::Player { key });
                                }
                            }
                        }
                    }
                    rows.push(Row::Blank);
                }
            }
        }

        self.rows = rows;
        if self.selected >= self.rows.len() {
            self.selected = self.rows.len().saturating_sub(1);
        }
    }

    fn toggle_section(&mut self, section: usize, state: &AppState) {
        if let Some(flag) = self.expanded.get_mut(section) {
            *flag = !*flag;
            self.rebuild_rows(state);
        }
    }

    /// Move to the next selectable row in `dir` (+1/-1); no-op at the edges.
    fn move_selection(&mut self, _state: &AppState, dir: isize) {
        let mut idx = self.selected as isize;
        loop {
            idx += dir;
            if idx < 0 || idx as usize >= self.rows.len() {
                return;
            }
            if self.rows[idx as usize].selectable() {
                self.selected = idx as usize;
                return;
            }
        }
    }

    fn select_edge(&mut self, last: bool) {
        let found = if last {
            self.rows.iter().rposition(Row::selectable)
        } else {
            self.rows.iter().position(Row::selectable)
        };
        if let Some(idx) = found {
            self.selected = idx;
        }
    }

    /// The single toggle action for the selected card, from either the watch
    /// key or a card click — never both for one gesture.
    fn toggle_action(&self, state: &AppState, key: CardKey) -> Vec<Action> {
        match card_at(state, key) {
            Some(card) => vec![Action::TogglePlayer {
                key,
                video_id: card.video_id.clone(),
            }],
            None => vec![],
        }
    }

    fn copy_action(&self, state: &AppState) -> Vec<Action> {
        match self.rows.get(self.selected) {
            Some(Row::CardTitle { key }) => card_at(state, *key)
                .and_then(|card| watch_url(&card.video_id))
                .map(|url| vec![Action::CopyToClipboard(url)])
                .unwrap_or_default(),
            Some(Row::Channel { section, channel }) => channel_url(state, *section, *channel)
                .map(|url| vec![Action::CopyToClipboard(url.to_string())])
                .unwrap_or_default(),
            _ => vec![],
        }
    }

    fn activate_selected(&mut self, state: &AppState) -> Vec<Action> {
        match self.rows.get(self.selected).cloned() {
            Some(Row::DayHeading { section }) => {
                self.toggle_section(section, state);
                vec![]
            }
            Some(Row::CardTitle { key }) => self.toggle_action(state, key),
            _ => vec![],
        }
    }

    fn ensure_visible(&mut self, height: usize) {
        if height == 0 {
            return;
        }
        if self.selected < self.scroll {
            self.scroll = self.selected;
        } else if self.selected >= self.scroll + height {
            self.scroll = self.selected.saturating_sub(height - 1);
        }
    }
}

impl Component for Dashboard {
    fn id(&self) -> ComponentId {
        ComponentId::Dashboard
    }

    fn handle_key(&mut self, key: KeyEvent, state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release {
            return vec![];
        }
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.move_selection(state, -1);
                vec![]
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.move_selection(state, 1);
                vec![]
            }
            KeyCode::PageUp => {
                for _ in 0..10 {
                    self.move_selection(state, -1);
                }
                vec![]
            }
            KeyCode::PageDown => {
                for _ in 0..10 {
                    self.move_selection(state, 1);
                }
                vec![]
            }
            KeyCode::Home | KeyCode::Char('g') => {
                self.select_edge(false);
                vec![]
            }
            KeyCode::End | KeyCode::Char('G') => {
                self.select_edge(true);
                vec![]
            }
            KeyCode::Enter | KeyCode::Char(' ') => self.activate_selected(state),
            KeyCode::Char('w') => match self.rows.get(self.selected) {
                Some(Row::CardTitle { key }) => self.toggle_action(state, *key),
                _ => vec![],
            },
            KeyCode::Char('y') => self.copy_action(state),
            _ => vec![],
        }
    }

    fn handle_mouse(&mut self, event: MouseEvent, area: Rect, state: &AppState) -> Vec<Action> {
        match event.kind {
            MouseEventKind::ScrollUp => {
                self.move_selection(state, -1);
                vec![]
            }
            MouseEventKind::ScrollDown => {
                self.move_selection(state, 1);
                vec![]
            }
            MouseEventKind::Down(MouseButton::Left) => {
                let clicked = self.scroll + event.row.saturating_sub(area.y) as usize;
                match self.rows.get(clicked).cloned() {
                    Some(Row::DayHeading { section }) => {
                        self.selected = clicked;
                        self.toggle_section(section, state);
                        vec![]
                    }
                    // A click anywhere on the card toggles its player; the
                    // summary lines belong to the same card, so either hit
                    // still dispatches exactly one toggle.
                    Some(Row::CardTitle { key }) | Some(Row::CardSummary { key, .. }) => {
                        if let Some(idx) = self.rows.iter().position(
                            |r| matches!(r, Row::CardTitle { key: k } if *k == key),
                        ) {
                            self.selected = idx;
                        }
                        self.toggle_action(state, key)
                    }
                    Some(Row::Channel { .. }) => {
                        self.selected = clicked;
                        vec![]
                    }
                    _ => vec![],
                }
            }
            _ => vec![],
        }
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, state: &AppState) {
        if area.width != self.last_width {
            self.last_width = area.width;
            self.rebuild_rows(state);
        }

        let height = area.height as usize;
        self.ensure_visible(height);

        let p = &state.palette;
        let end = (self.scroll + height).min(self.rows.len());
        let mut lines: Vec<Line> = Vec::with_capacity(height);

        for (idx, row) in self.rows[self.scroll..end].iter().enumerate() {
            let absolute = self.scroll + idx;
            let mut line = match row {
                Row::Blank => Line::from(""),
                Row::Fallback(msg) => Line::from(Span::styled(
                    format!("  {}", msg),
                    p.class_style(ViewClass::FallbackMessage),
                )),
                Row::DayHeading { section } => {
                    let (heading, open) = match &state.view.body {
                        DashboardBody::Days(sections) => (
                            sections[*section].heading.clone(),
                            self.expanded.get(*section).copied().unwrap_or(false),
                        ),
                        _ => (String::new(), false),
                    };
                    let marker = if open { "▾ " } else { "▸ " };
                    Line::from(vec![
                        Span::styled(marker, Style::default().fg(p.muted)),
                        Span::styled(heading, p.class_style(ViewClass::DayHeading)),
                    ])
                }
                Row::Digest { line } => Line::from(Span::styled(
                    format!("    {}", line),
                    p.class_style(ViewClass::DailyDigest),
                )),
                Row::Channel { section, channel } => {
                    let (name, linked) = match &state.view.body {
                        DashboardBody::Days(sections) => {
                            let group = &sections[*section].channels[*channel];
                            (group.name.clone(), group.url.is_some())
                        }
                        _ => (String::new(), false),
                    };
                    let mut spans = vec![
                        Span::raw("  "),
                        Span::styled(name, p.class_style(ViewClass::ChannelName)),
                    ];
                    if linked {
                        spans.push(Span::styled(" ↗", Style::default().fg(p.muted)));
                    }
                    Line::from(spans)
                }
                Row::CardTitle { key } => match card_at(state, *key) {
                    Some(card) => {
                        let badge = card
                            .duration
                            .as_ref()
                            .map(|d| format!(" [{}]", d))
                            .unwrap_or_default();
                        let has_thumb = !card.thumbnail_url.is_empty();
                        let avail = (self.last_width as usize)
                            .saturating_sub(6 + badge.width() + if has_thumb { 2 } else { 0 });
                        let mut spans = vec![
                            Span::raw("    "),
                            Span::styled("▶ ", p.class_style(ViewClass::BtnWatch)),
                        ];
                        if has_thumb {
                            spans.push(Span::styled(
                                "▦ ",
                                p.class_style(ViewClass::ThumbnailWrap),
                            ));
                        }
                        spans.push(Span::styled(
                            truncate_to_width(&card.title, avail),
                            p.class_style(ViewClass::VideoTitle),
                        ));
                        if !badge.is_empty() {
                            spans.push(Span::styled(
                                badge,
                                p.class_style(ViewClass::DurationBadge),
                            ));
                        }
                        Line::from(spans)
                    }
                    None => Line::from(""),
                },
                Row::CardSummary { key, line } => {
                    let style = card_at(state, *key)
                        .map(|card| p.style_for(card.summary.classes()))
                        .unwrap_or_default();
                    Line::from(Span::styled(format!("      {}", line), style))
                }
                Row::Player { key } => {
                    let url = state.players.open_url(*key).unwrap_or("");
                    Line::from(Span::styled(
                        format!("      ⏵ playing {}  (Enter closes)", url),
                        p.class_style(ViewClass::PlayerContainer),
                    ))
                }
            };

            if absolute == self.selected && self.rows[absolute].selectable() {
                line = line.style(p.style_selected());
            }
            lines.push(line);
        }

        frame.render_widget(Paragraph::new(lines), area);
    }
}

fn card_at(state: &AppState, key: CardKey) -> Option<&VideoCard> {
    let (si, ci, vi) = key;
    match &state.view.body {
        DashboardBody::Days(sections) => sections
            .get(si)
            .and_then(|s| s.channels.get(ci))
            .and_then(|c| c.videos.get(vi)),
        _ => None,
    }
}

fn channel_url(state: &AppState, section: usize, channel: usize) -> Option<&str> {
    match &state.view.body {
        DashboardBody::Days(sections) => sections
            .get(section)
            .and_then(|s| s.channels.get(channel))
            .and_then(|c| c.url.as_deref()),
        _ => None,
    }
}

/// Greedy word wrap on display width. Words wider than the line are split.
fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(8);
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_w = 0usize;

    for word in text.split_whitespace() {
        let word_w = word.width();
        if current_w > 0 && current_w + 1 + word_w > width {
            lines.push(std::mem::take(&mut current));
            current_w = 0;
        }
        if word_w > width {
            // Hard-split an oversized token.
            for ch in word.chars() {
                let ch_w = ch.width().unwrap_or(0);
                if current_w + ch_w > width {
                    lines.push(std::mem::take(&mut current));
                    current_w = 0;
                }
                current.push(ch);
                current_w += ch_w;
            }
            continue;
        }
        if current_w > 0 {
            current.push(' ');
            current_w += 1;
        }
        current.push_str(word);
        current_w += word_w;
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

fn truncate_to_width(s: &str, max: usize) -> String {
    if s.width() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    let mut w = 0usize;
    for ch in s.chars() {
        let ch_w = ch.width().unwrap_or(0);
        if w + ch_w + 1 > max {
            break;
        }
        out.push(ch);
        w += ch_w;
    }
    out.push('…');
    out
}
