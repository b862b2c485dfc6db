use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::score::result_message;
use crate::state::AppState;

pub fn draw_results(f: &mut Frame, area: Rect, state: &AppState) {
    let results = state.runner.results();

    let score_color = if results.percentage >= 70 {
        Color::Green
    } else if results.percentage >= 50 {
        Color::Yellow
    } else {
        Color::Red
    };

    let lines = vec![
        Line::from(""),
        Line::from(""),
        Line::from(Span::styled(
            "Quiz Complete",
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            format!("{}%", results.percentage),
            Style::default()
                .fg(score_color)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(format!(
            "{} out of {} questions correct",
            results.correct, results.total
        )),
        Line::from(""),
        Line::from(Span::styled(
            result_message(results.percentage),
            Style::default().fg(Color::Rgb(200, 200, 120)),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "[r] Restart   [Enter] Exit",
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
    ];

    let block = Block::default().borders(Borders::ALL);
    let widget = Paragraph::new(lines)
        .block(block)
        .alignment(ratatui::layout::Alignment::Center);
    f.render_widget(widget, area);
}
