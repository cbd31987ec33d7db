//! SettingsOverlay component — centered popup editing the two preferences.
//!
//! Pure key-value editing against the Preference Store: theme choice and the
//! days-filter text. Nothing is written until Enter; Esc discards.

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyEventKind, MouseEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use tui_input::{backend::crossterm::EventHandler, Input};

use dash_core::prefs::{Prefs, Theme};

use crate::{
    action::{Action, ComponentId},
    app_state::AppState,
    component::Component,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Theme,
    Days,
}

pub struct SettingsOverlay {
    pub visible: bool,
    field: Field,
    theme_choice: Theme,
    days_input: Input,
}

impl SettingsOverlay {
    pub fn new() -> Self {
        Self {
            visible: false,
            field: Field::Theme,
            theme_choice: Theme::Dark,
            days_input: Input::default(),
        }
    }

    /// Open, pre-filled from the store's current values.
    pub fn show(&mut self, prefs: &Prefs) {
        self.visible = true;
        self.field = Field::Theme;
        self.theme_choice = prefs.theme();
        self.days_input = Input::new(prefs.days_filter_raw().to_string());
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    fn apply(&mut self) -> Vec<Action> {
        self.hide();
        vec![Action::ApplySettings {
            theme: self.theme_choice,
            days_filter_raw: self.days_input.value().to_string(),
        }]
    }
}

impl Component for SettingsOverlay {
    fn id(&self) -> ComponentId {
        ComponentId::Settings
    }

    fn handle_key(&mut self, key: KeyEvent, _state: &AppState) -> Vec<Action> {
        if key.kind == KeyEventKind::Release || !self.visible {
            return vec![];
        }
        match key.code {
            KeyCode::Esc => {
                self.hide();
                return vec![Action::CloseSettings];
            }
            KeyCode::Enter => return self.apply(),
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
                self.field = match self.field {
                    Field::Theme => Field::Days,
                    Field::Days => Field::Theme,
                };
                return vec![];
            }
            _ => {}
        }
        match self.field {
            Field::Theme => {
                if matches!(
                    key.code,
                    KeyCode::Left | KeyCode::Right | KeyCode::Char(' ')
                ) {
                    self.theme_choice = self.theme_choice.toggled();
                }
            }
            Field::Days => {
                self.days_input
                    .handle_event(&ratatui::crossterm::event::Event::Key(key));
            }
        }
        vec![]
    }

    fn handle_mouse(&mut self, _event: MouseEvent, _area: Rect, _state: &AppState) -> Vec<Action> {
        vec![]
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, state: &AppState) {
        if !self.visible {
            return;
        }

        let p = &state.palette;
        let popup = centered_rect(50, 9, area);

        let field_style = |field: Field| {
            if self.field == field {
                Style::default().fg(p.primary).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(p.secondary)
            }
        };

        let theme_value = match self.theme_choice {
            Theme::Dark => "● dark   ○ light",
            Theme::Light => "○ dark   ● light",
        };

        let lines: Vec<Line> = vec![
            Line::from(Span::styled(
                " settings",
                Style::default().fg(p.primary).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled(" theme        ", field_style(Field::Theme)),
                Span::styled(theme_value, Style::default().fg(p.primary)),
            ]),
            Line::from(vec![
                Span::styled(" days filter  ", field_style(Field::Days)),
                Span::styled(
                    if self.days_input.value().is_empty() {
                        "(all days)".to_string()
                    } else {
                        self.days_input.value().to_string()
                    },
                    Style::default().fg(p.primary),
                ),
            ]),
            Line::from(""),
            Line::from(Span::styled(
                " non-numeric days filter means no filtering",
                Style::default().fg(p.muted),
            )),
            Line::from(Span::styled(
                " Enter save · Esc cancel",
                Style::default().fg(p.muted),
            )),
        ];

        frame.render_widget(Clear, popup);
        frame.render_widget(
            Paragraph::new(lines).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(p.separator))
                    .style(Style::default().bg(p.bg)),
            ),
            popup,
        );

        if self.field == Field::Days {
            let value_x = popup.x + 1 + 14 + self.days_input.visual_cursor() as u16;
            frame.set_cursor_position((
                value_x.min(popup.x + popup.width.saturating_sub(2)),
                popup.y + 4,
            ));
        }
    }
}

fn centered_rect(percent_x: u16, height: u16, r: Rect) -> Rect {
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vert[1])[1]
}
