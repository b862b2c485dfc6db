use std::io;
use std::sync::mpsc;
use std::time::Duration;

use ratatui::crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use ratatui::crossterm::execute;
use ratatui::crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::prelude::CrosstermBackend;
use ratatui::Terminal;

use crate::model::QuestionKind;
use crate::slots::SlotCommand;
use crate::state::{AppState, Grab, Screen};
use crate::timer::{schedule_advance, RunnerEvent};

pub fn run_tui(mut state: AppState, advance_delay: Duration) -> Result<(), String> {
    enable_raw_mode().map_err(|e| format!("Cannot enable raw mode: {}", e))?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)
        .map_err(|e| format!("Cannot enter alternate screen: {}", e))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal =
        Terminal::new(backend).map_err(|e| format!("Cannot create terminal: {}", e))?;

    let (advance_tx, advance_rx) = mpsc::channel::<RunnerEvent>();

    let result = main_loop(
        &mut terminal,
        &mut state,
        &advance_tx,
        &advance_rx,
        advance_delay,
    );

    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();

    result
}

fn main_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    state: &mut AppState,
    advance_tx: &mpsc::Sender<RunnerEvent>,
    advance_rx: &mpsc::Receiver<RunnerEvent>,
    advance_delay: Duration,
) -> Result<(), String> {
    loop {
        terminal
            .draw(|f| crate::ui::draw(f, state))
            .map_err(|e| format!("Draw error: {}", e))?;

        if state.should_quit {
            break;
        }

        if event::poll(Duration::from_millis(100)).map_err(|e| format!("Poll error: {}", e))? {
            if let Event::Key(key) = event::read().map_err(|e| format!("Read error: {}", e))? {
                handle_key(key, state, advance_tx, advance_delay);
            }
        }

        while let Ok(RunnerEvent::AdvanceDue(token)) = advance_rx.try_recv() {
            apply_advance(state, token);
        }
    }

    Ok(())
}

/// An elapsed advance timer. Anything grabbed belongs to the board that just
/// went away, so the grab is dropped along with the old view.
fn apply_advance(state: &mut AppState, token: u64) {
    if state.runner.handle_advance(token) {
        state.clear_grab();
        if state.runner.is_finished() {
            state.screen = Screen::Results;
        }
    }
}

fn handle_key(
    key: KeyEvent,
    state: &mut AppState,
    advance_tx: &mpsc::Sender<RunnerEvent>,
    advance_delay: Duration,
) {
    state.notice = None;

    if key.code == KeyCode::Char('q') && key.modifiers.contains(KeyModifiers::CONTROL) {
        state.should_quit = true;
        return;
    }

    match state.screen {
        Screen::Running => handle_running_key(key, state, advance_tx, advance_delay),
        Screen::Results => handle_results_key(key, state),
    }
}

fn handle_running_key(
    key: KeyEvent,
    state: &mut AppState,
    advance_tx: &mpsc::Sender<RunnerEvent>,
    advance_delay: Duration,
) {
    match key.code {
        KeyCode::Left => {
            state.clear_grab();
            if !state.runner.prev_question() && state.runner.awaiting_advance() {
                state.notice = Some("Hold on, showing the answer…".to_string());
            }
        }
        KeyCode::Right => {
            state.clear_grab();
            if !state.runner.next_question() && state.runner.awaiting_advance() {
                state.notice = Some("Hold on, showing the answer…".to_string());
            }
        }
        KeyCode::Esc => {
            state.clear_grab();
        }
        KeyCode::Enter => {
            if let Some(token) = state.runner.confirm_current() {
                schedule_advance(advance_tx.clone(), token, advance_delay);
            }
        }
        KeyCode::Backspace | KeyCode::Delete => {
            if let Some(Grab::Slot(slot)) = state.grab {
                state.runner.dispatch_slot(SlotCommand::Remove { slot });
                state.clear_grab();
            }
        }
        KeyCode::Char(c @ 'a'..='z') => {
            handle_letter(c, state, advance_tx, advance_delay);
        }
        KeyCode::Char(c @ '1'..='9') => {
            let slot = (c as u8 - b'1') as usize;
            handle_slot_key(slot, state, advance_tx, advance_delay);
        }
        _ => {}
    }
}

/// Letters select an option on multiple choice, or grab a word chip on the
/// drag questions.
fn handle_letter(
    c: char,
    state: &mut AppState,
    advance_tx: &mpsc::Sender<RunnerEvent>,
    advance_delay: Duration,
) {
    let index = (c as u8 - b'a') as usize;

    match state.runner.current_question().map(|q| &q.kind) {
        Some(QuestionKind::Multiple { .. }) => {
            if let Some(token) = state.runner.select_choice(index) {
                schedule_advance(advance_tx.clone(), token, advance_delay);
            }
        }
        Some(QuestionKind::Fill { .. }) | Some(QuestionKind::Matching { .. }) => {
            let grabbable = state
                .runner
                .engine()
                .map(|e| index < e.pool.len() && e.pool.is_visible(index))
                .unwrap_or(false);
            if grabbable && !state.runner.current_confirmed() {
                state.grab = Some(Grab::Chip(index));
            }
        }
        _ => {}
    }
}

/// Number keys name a slot: drop the grabbed chip there, complete a
/// slot-to-slot drag, or pick up whatever the slot holds.
fn handle_slot_key(
    slot: usize,
    state: &mut AppState,
    advance_tx: &mpsc::Sender<RunnerEvent>,
    advance_delay: Duration,
) {
    let slot_count = state
        .runner
        .engine()
        .map(|e| e.board.len())
        .unwrap_or(0);
    if slot >= slot_count {
        return;
    }

    match state.grab.take() {
        Some(Grab::Chip(chip)) => {
            if let Some(token) = state.runner.dispatch_slot(SlotCommand::PlaceChip { chip, slot }) {
                schedule_advance(advance_tx.clone(), token, advance_delay);
            }
        }
        Some(Grab::Slot(from)) => {
            if from != slot {
                state.runner.dispatch_slot(SlotCommand::DragBetween { from, to: slot });
            }
        }
        None => {
            let occupied = state
                .runner
                .engine()
                .map(|e| e.board.slot(slot).occupied())
                .unwrap_or(false);
            if occupied && !state.runner.current_confirmed() {
                state.grab = Some(Grab::Slot(slot));
            }
        }
    }
}

fn handle_results_key(key: KeyEvent, state: &mut AppState) {
    match key.code {
        KeyCode::Char('r') => {
            state.runner.restart();
            state.clear_grab();
            state.screen = Screen::Running;
        }
        KeyCode::Enter => {
            state.should_quit = true;
        }
        _ => {}
    }
}
