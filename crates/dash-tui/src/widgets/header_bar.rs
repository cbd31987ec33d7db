//! Header bar — single top row: app name, updated indicator, theme tag.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app_state::{AppState, LoadPhase};

pub fn draw_header(frame: &mut Frame, area: Rect, state: &AppState) {
    let p = &state.palette;

    let mut left_spans = vec![
        Span::raw(" "),
        Span::styled(
            "tubedash",
            Style::default().fg(p.accent).add_modifier(Modifier::BOLD),
        ),
    ];

    if state.phase == LoadPhase::Loading {
        left_spans.push(Span::styled(
            "  loading feed…",
            Style::default().fg(p.muted),
        ));
    } else if let Some(updated) = &state.view.updated {
        left_spans.push(Span::styled(
            format!("  {}", updated),
            Style::default().fg(p.secondary),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(left_spans)), area);

    let theme_tag = format!("[{}] ", state.prefs.theme().as_str());
    let right = Line::from(Span::styled(theme_tag, Style::default().fg(p.muted))).right_aligned();
    frame.render_widget(Paragraph::new(right), area);
}
