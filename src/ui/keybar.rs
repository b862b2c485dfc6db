use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::model::QuestionKind;
use crate::state::AppState;

pub fn draw_keybar(f: &mut Frame, area: Rect, state: &AppState) {
    let bindings: Vec<(&str, &str)> = match state.runner.current_question().map(|q| &q.kind) {
        Some(QuestionKind::Multiple { .. }) => vec![
            ("a-z", "answer"),
            ("←/→", "prev/next"),
            ("Ctrl+Q", "quit"),
        ],
        Some(QuestionKind::Fill { .. }) | Some(QuestionKind::Matching { .. }) => vec![
            ("a-z", "grab word"),
            ("1-9", "drop in slot"),
            ("Backspace", "take out"),
            ("Esc", "let go"),
            ("←/→", "prev/next"),
            ("Ctrl+Q", "quit"),
        ],
        _ => vec![("←/→", "prev/next"), ("Ctrl+Q", "quit")],
    };

    let mut spans: Vec<Span> = vec![Span::raw(" ")];
    for (i, (key, action)) in bindings.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("   "));
        }
        spans.push(Span::styled(
            key.to_string(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::raw(format!(" {}", action)));
    }

    let widget =
        Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::Rgb(20, 20, 20)));
    f.render_widget(widget, area);
}
