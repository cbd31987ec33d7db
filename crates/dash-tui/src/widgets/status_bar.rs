//! Status bar — bottom row with keybindings and the last note.

use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app_state::AppState;

pub fn draw_keys_bar(frame: &mut Frame, area: Rect, state: &AppState, settings_open: bool) {
    let p = &state.palette;

    let keys = if settings_open {
        " Tab field  Space/←→ theme  Enter save  Esc cancel"
    } else {
        " ↑↓/jk select  Enter open/close  w watch  y copy link  t theme  s settings  R reload  q quit"
    };

    let mut spans = vec![Span::styled(keys, Style::default().fg(p.muted))];
    if let Some(note) = &state.note {
        spans.push(Span::styled(
            format!("  · {}", note),
            Style::default().fg(p.secondary),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
