use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use crate::answer::AnswerState;
use crate::engine::InteractionEngine;
use crate::model::QuestionKind;
use crate::pool::Chip;
use crate::state::{AppState, Grab};
use crate::ui::markdown::markdown_to_lines;

const EMPTY_SLOT: &str = "______";

pub fn chip_letter(id: usize) -> char {
    (b'a' + (id % 26) as u8) as char
}

pub fn draw_question(f: &mut Frame, area: Rect, state: &AppState) {
    let mut lines: Vec<Line<'static>> = vec![Line::from("")];

    let Some(question) = state.runner.current_question() else {
        return;
    };

    if !question.prompt.trim().is_empty() {
        lines.extend(markdown_to_lines(&question.prompt));
    }

    if let Some(notice) = state.runner.current_notice() {
        lines.push(Line::from(Span::styled(
            format!("⚠ {}", notice),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(Span::styled(
            "This question cannot be answered.".to_string(),
            Style::default().fg(Color::DarkGray),
        )));
        render(f, area, lines);
        return;
    }

    match &question.kind {
        QuestionKind::Multiple { options, .. } => {
            lines.push(Line::from(""));
            lines.extend(choice_lines(state, options));
        }
        QuestionKind::Fill { sentence, .. } => {
            if let Some(engine) = state.runner.engine() {
                lines.push(Line::from(""));
                lines.extend(fill_lines(state, engine, sentence));
                lines.push(Line::from(""));
                lines.extend(chip_rows(state, engine));
            }
        }
        QuestionKind::Matching { pairs } => {
            if let Some(engine) = state.runner.engine() {
                lines.push(Line::from(""));
                for (i, pair) in pairs.iter().enumerate() {
                    lines.push(matching_row(state, engine, i, &pair.left));
                }
                lines.push(Line::from(""));
                lines.extend(chip_rows(state, engine));
            }
        }
        QuestionKind::Typing { .. } => {}
    }

    if state.runner.current_confirmed() {
        lines.push(Line::from(""));
        lines.push(confirmed_line(state));
    } else if state
        .runner
        .engine()
        .map(|e| e.ready_to_confirm())
        .unwrap_or(false)
    {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "[Enter] Check answer".to_string(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )));
    }

    render(f, area, lines);
}

fn render(f: &mut Frame, area: Rect, lines: Vec<Line<'static>>) {
    let widget = Paragraph::new(lines)
        .block(Block::default().borders(Borders::LEFT).border_style(
            Style::default().fg(Color::DarkGray),
        ))
        .wrap(Wrap { trim: false });
    f.render_widget(widget, area);
}

fn choice_lines(state: &AppState, options: &[crate::model::ChoiceOption]) -> Vec<Line<'static>> {
    let selected = match state.runner.current_answer() {
        Some(AnswerState::Multiple { selected }) => *selected,
        _ => None,
    };
    let confirmed = state.runner.current_confirmed();
    let expected = match state.runner.current_question().map(|q| &q.kind) {
        Some(QuestionKind::Multiple { correct_answer, .. }) => *correct_answer,
        _ => None,
    };

    options
        .iter()
        .enumerate()
        .map(|(i, option)| {
            let marker = if selected == Some(i) { "●" } else { "○" };
            let style = if confirmed {
                if expected == Some(i) {
                    Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
                } else if selected == Some(i) {
                    Style::default().fg(Color::Red)
                } else {
                    Style::default().fg(Color::DarkGray)
                }
            } else if selected == Some(i) {
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            Line::from(Span::styled(
                format!("  ({}) {} {}", chip_letter(i), marker, option.text),
                style,
            ))
        })
        .collect()
}

/// Sentence with the derived blanks rendered inline as numbered slots. A
/// non-positional layout prints the sentence untouched and the slots below.
fn fill_lines(
    state: &AppState,
    engine: &InteractionEngine,
    sentence: &str,
) -> Vec<Line<'static>> {
    let Some(layout) = engine.layout() else {
        return Vec::new();
    };

    if !layout.positional {
        let mut lines = vec![Line::from(format!("  {}", sentence))];
        lines.push(Line::from(""));
        for i in 0..layout.blanks.len() {
            lines.push(Line::from(vec![
                Span::raw("  "),
                slot_span(state, engine, i),
            ]));
        }
        return lines;
    }

    let mut spans: Vec<Span<'static>> = vec![Span::raw("  ")];
    let mut cursor = 0usize;
    for (i, blank) in layout.blanks.iter().enumerate() {
        spans.push(Span::raw(sentence[cursor..blank.position].to_string()));
        spans.push(slot_span(state, engine, i));
        cursor = blank.position + blank.length;
    }
    spans.push(Span::raw(sentence[cursor..].to_string()));
    vec![Line::from(spans)]
}

fn matching_row(
    state: &AppState,
    engine: &InteractionEngine,
    index: usize,
    left: &str,
) -> Line<'static> {
    Line::from(vec![
        Span::raw(format!("  {}  ", left)),
        Span::styled("→ ".to_string(), Style::default().fg(Color::DarkGray)),
        slot_span(state, engine, index),
    ])
}

/// One numbered drop slot: `[1 text]`. Color tells its story: grabbed,
/// filled, empty, or judged after confirmation.
fn slot_span(state: &AppState, engine: &InteractionEngine, slot: usize) -> Span<'static> {
    let text = engine
        .slot_text(slot)
        .map(|t| t.to_string())
        .unwrap_or_else(|| EMPTY_SLOT.to_string());
    let grabbed = state.grab == Some(Grab::Slot(slot));

    let style = if let Some(feedback) = engine.feedback() {
        if feedback.get(slot).copied().unwrap_or(false) {
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
        }
    } else if grabbed {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else if engine.slot_text(slot).is_some() {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let mark = if let Some(feedback) = engine.feedback() {
        if feedback.get(slot).copied().unwrap_or(false) {
            " ✓"
        } else {
            " ✗"
        }
    } else {
        ""
    };

    Span::styled(format!("[{} {}{}]", slot + 1, text, mark), style)
}

/// The word bank: every still-visible chip with its grab letter.
fn chip_rows(state: &AppState, engine: &InteractionEngine) -> Vec<Line<'static>> {
    let visible: Vec<&Chip> = engine.pool.visible_chips().collect();
    if visible.is_empty() {
        return vec![Line::from(Span::styled(
            "  (all words placed)".to_string(),
            Style::default().fg(Color::DarkGray),
        ))];
    }

    let mut spans: Vec<Span<'static>> = vec![Span::raw("  ")];
    for chip in visible {
        let grabbed = state.grab == Some(Grab::Chip(chip.id));
        let style = if grabbed {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White).bg(Color::Rgb(50, 50, 70))
        };
        spans.push(Span::styled(
            format!(" {}:{} ", chip_letter(chip.id), chip.text),
            style,
        ));
        spans.push(Span::raw(" "));
    }
    vec![Line::from(spans)]
}

fn confirmed_line(state: &AppState) -> Line<'static> {
    let correct = state
        .runner
        .current_question()
        .map(|q| crate::score::evaluate(q, state.runner.current_answer()).correct)
        .unwrap_or(false);
    if correct {
        Line::from(Span::styled(
            "✓ Correct".to_string(),
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ))
    } else {
        Line::from(Span::styled(
            "✗ Incorrect".to_string(),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ))
    }
}
