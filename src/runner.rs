use std::collections::HashSet;
use std::time::Duration;

use crate::answer::AnswerState;
use crate::blanks::{derive_blanks, BlankLayout};
use crate::engine::{ConfirmPolicy, InteractionEngine, Signal};
use crate::model::{Question, QuestionKind, TestPayload};
use crate::pool::{random_shuffle, ShuffleFn};
use crate::score::{evaluate, final_score};
use crate::slots::SlotCommand;

pub const DEFAULT_ADVANCE_DELAY: Duration = Duration::from_millis(1500);

#[derive(Debug, Clone, Copy)]
pub struct RunnerConfig {
    /// Feedback window between confirmation and auto-advance.
    pub advance_delay: Duration,
    pub confirm_policy: ConfirmPolicy,
    pub shuffle: ShuffleFn,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        RunnerConfig {
            advance_delay: DEFAULT_ADVANCE_DELAY,
            confirm_policy: ConfirmPolicy::AutoOnFill,
            shuffle: random_shuffle,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Results {
    pub percentage: u32,
    pub correct: usize,
    pub total: usize,
}

/// One attempt at a quiz. Owns every answer record; the per-question
/// interaction engine only ever mutates them through `dispatch_slot` and
/// `confirm_current`, so there is a single writer for answer state.
///
/// Typing questions are filtered out up front; they are export-only.
pub struct TestRunner {
    questions: Vec<Question>,
    layouts: Vec<Option<BlankLayout>>,
    answers: Vec<Option<AnswerState>>,
    confirmed: HashSet<usize>,
    validation: Vec<Option<String>>,
    engine: Option<InteractionEngine>,
    current: usize,
    /// Bumped on every question display; pending auto-advance tokens from
    /// earlier displays no longer match and are dropped.
    generation: u64,
    awaiting_advance: bool,
    finished: bool,
    config: RunnerConfig,
}

impl TestRunner {
    pub fn new(payload: &TestPayload, config: RunnerConfig) -> Self {
        let questions: Vec<Question> = payload
            .questions
            .iter()
            .filter(|q| !q.is_typing())
            .cloned()
            .collect();
        let layouts: Vec<Option<BlankLayout>> = questions
            .iter()
            .map(|q| match &q.kind {
                QuestionKind::Fill { sentence, options } => {
                    Some(derive_blanks(sentence, options))
                }
                _ => None,
            })
            .collect();
        let answers = questions
            .iter()
            .zip(&layouts)
            .map(|(q, layout)| AnswerState::initial(&q.kind, layout.as_ref()))
            .collect();
        let validation = questions.iter().map(validate_question).collect();

        let mut runner = TestRunner {
            questions,
            layouts,
            answers,
            confirmed: HashSet::new(),
            validation,
            engine: None,
            current: 0,
            generation: 0,
            awaiting_advance: false,
            finished: false,
            config,
        };
        runner.display_current();
        runner
    }

    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current)
    }

    pub fn current_answer(&self) -> Option<&AnswerState> {
        self.answers.get(self.current).and_then(|a| a.as_ref())
    }

    pub fn current_layout(&self) -> Option<&BlankLayout> {
        self.layouts.get(self.current).and_then(|l| l.as_ref())
    }

    /// Validation notice for the current question, if it cannot be run.
    pub fn current_notice(&self) -> Option<&str> {
        self.validation
            .get(self.current)
            .and_then(|n| n.as_deref())
    }

    pub fn engine(&self) -> Option<&InteractionEngine> {
        self.engine.as_ref()
    }

    pub fn is_confirmed(&self, index: usize) -> bool {
        self.confirmed.contains(&index)
    }

    pub fn current_confirmed(&self) -> bool {
        self.is_confirmed(self.current)
    }

    pub fn awaiting_advance(&self) -> bool {
        self.awaiting_advance
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn confirmed_count(&self) -> usize {
        self.confirmed.len()
    }

    /// Select an option on a multiple-choice question. Confirms immediately;
    /// returns the advance token to schedule, or None if the input was
    /// refused.
    pub fn select_choice(&mut self, option: usize) -> Option<u64> {
        if self.finished
            || self.awaiting_advance
            || self.current_confirmed()
            || self.current_notice().is_some()
        {
            return None;
        }
        let in_range = match self.current_question()?.kind {
            QuestionKind::Multiple { ref options, .. } => option < options.len(),
            _ => false,
        };
        if !in_range {
            return None;
        }
        if let Some(Some(AnswerState::Multiple { selected })) = self.answers.get_mut(self.current) {
            *selected = Some(option);
        }
        Some(self.mark_confirmed())
    }

    /// Route a slot command to the current question's interaction engine.
    /// Returns the advance token when the command completed the question.
    pub fn dispatch_slot(&mut self, command: SlotCommand) -> Option<u64> {
        if self.finished || self.awaiting_advance || self.current_notice().is_some() {
            return None;
        }
        let engine = self.engine.as_mut()?;
        let answer = self.answers.get_mut(self.current)?.as_mut()?;
        match engine.dispatch(command, answer) {
            Signal::Confirmed => Some(self.mark_confirmed()),
            _ => None,
        }
    }

    /// Explicit confirm for the `ExplicitConfirm` policy.
    pub fn confirm_current(&mut self) -> Option<u64> {
        if self.finished || self.awaiting_advance || self.current_notice().is_some() {
            return None;
        }
        let engine = self.engine.as_mut()?;
        let answer = self.answers.get_mut(self.current)?.as_mut()?;
        match engine.confirm(answer) {
            Signal::Confirmed => Some(self.mark_confirmed()),
            _ => None,
        }
    }

    /// Handle an elapsed advance timer. Stale tokens, scheduled before the
    /// view changed, are ignored. Returns true when the view moved on.
    pub fn handle_advance(&mut self, token: u64) -> bool {
        if !self.awaiting_advance || token != self.generation {
            return false;
        }
        self.awaiting_advance = false;
        if self.current + 1 < self.questions.len() {
            self.current += 1;
            self.display_current();
        } else {
            self.finished = true;
        }
        true
    }

    /// Manual navigation; refused during the feedback window.
    pub fn next_question(&mut self) -> bool {
        if self.awaiting_advance || self.finished || self.current + 1 >= self.questions.len() {
            return false;
        }
        self.current += 1;
        self.display_current();
        true
    }

    pub fn prev_question(&mut self) -> bool {
        if self.awaiting_advance || self.finished || self.current == 0 {
            return false;
        }
        self.current -= 1;
        self.display_current();
        true
    }

    pub fn results(&self) -> Results {
        let total = self.questions.len();
        let correct = self
            .questions
            .iter()
            .zip(&self.answers)
            .filter(|(q, a)| evaluate(q, a.as_ref()).correct)
            .count();
        Results {
            percentage: final_score(correct, total),
            correct,
            total,
        }
    }

    /// Throw away the attempt and start over on the same questions.
    pub fn restart(&mut self) {
        self.answers = self
            .questions
            .iter()
            .zip(&self.layouts)
            .map(|(q, layout)| AnswerState::initial(&q.kind, layout.as_ref()))
            .collect();
        self.confirmed.clear();
        self.current = 0;
        self.awaiting_advance = false;
        self.finished = false;
        self.display_current();
    }

    fn mark_confirmed(&mut self) -> u64 {
        self.confirmed.insert(self.current);
        self.awaiting_advance = true;
        self.generation
    }

    /// Rebuild the interaction engine for the current question and replay
    /// its saved answer into it. Every display gets a fresh generation, so
    /// advance timers scheduled against earlier views die quietly.
    fn display_current(&mut self) {
        self.generation += 1;
        self.awaiting_advance = false;
        self.engine = None;

        let Some(question) = self.questions.get(self.current) else {
            return;
        };
        if self.validation[self.current].is_some() {
            return;
        }
        let layout = self.layouts[self.current].as_ref();
        if let Some(mut engine) = InteractionEngine::for_question(
            question,
            layout,
            self.config.confirm_policy,
            self.config.shuffle,
        ) {
            if let Some(answer) = self.answers[self.current].as_ref() {
                engine.restore(answer);
            }
            if self.confirmed.contains(&self.current) {
                engine.lock();
            }
            self.engine = Some(engine);
        }
    }
}

/// Authoring mistakes that make a question unrunnable. The question still
/// counts toward the total; it just renders a notice instead of controls.
fn validate_question(question: &Question) -> Option<String> {
    if question.prompt.trim().is_empty() {
        return Some("This question has no prompt text.".to_string());
    }
    match &question.kind {
        QuestionKind::Multiple {
            options,
            correct_answer,
        } => {
            if options.is_empty() {
                return Some("This question has no options to choose from.".to_string());
            }
            match correct_answer {
                Some(i) if *i < options.len() => None,
                _ => Some("This question has no correct answer marked.".to_string()),
            }
        }
        QuestionKind::Fill { sentence, options } => {
            if sentence.trim().is_empty() || options.is_empty() {
                Some("This question has no sentence or word bank.".to_string())
            } else {
                None
            }
        }
        QuestionKind::Matching { pairs } => {
            if pairs.is_empty() {
                Some("This question has no pairs to match.".to_string())
            } else {
                None
            }
        }
        QuestionKind::Typing { .. } => None,
    }
}
