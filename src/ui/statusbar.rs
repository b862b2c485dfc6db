use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::state::AppState;

pub fn draw_statusbar(f: &mut Frame, area: Rect, state: &AppState) {
    let done = state.runner.confirmed_count();
    let remaining = state.runner.question_count().saturating_sub(done);

    let mut spans = vec![
        Span::raw(" "),
        Span::styled(
            format!("✓ {} answered", done),
            Style::default().fg(Color::Green),
        ),
        Span::raw("   "),
        Span::styled(
            format!("○ {} remaining", remaining),
            Style::default().fg(Color::White),
        ),
    ];

    if state.runner.awaiting_advance() {
        spans.push(Span::raw("   "));
        spans.push(Span::styled(
            "moving on…",
            Style::default().fg(Color::Rgb(200, 200, 120)),
        ));
    }

    if let Some(notice) = &state.notice {
        spans.push(Span::raw("   "));
        spans.push(Span::styled(
            notice.clone(),
            Style::default().fg(Color::Yellow),
        ));
    }

    let widget =
        Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::Rgb(30, 30, 30)));
    f.render_widget(widget, area);
}
