use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::state::AppState;

pub fn draw_titlebar(f: &mut Frame, area: Rect, state: &AppState) {
    let title = if state.title.trim().is_empty() {
        "Quiz".to_string()
    } else {
        state.title.clone()
    };
    let title_text = format!("[ {} ]", title);
    let progress_text = format!(
        " {}/{} ",
        state.runner.current_index() + 1,
        state.runner.question_count()
    );

    let available = area.width as usize;
    let center_pad = available.saturating_sub(title_text.len()) / 2;
    let right_pad =
        available.saturating_sub(center_pad + title_text.len() + progress_text.len());

    let line = Line::from(vec![
        Span::raw(" ".repeat(center_pad)),
        Span::styled(
            title_text,
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" ".repeat(right_pad)),
        Span::styled(progress_text, Style::default().fg(Color::Rgb(200, 200, 120))),
    ]);

    let widget = Paragraph::new(line)
        .style(Style::default().bg(Color::DarkGray))
        .alignment(Alignment::Left);
    f.render_widget(widget, area);
}
