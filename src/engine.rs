use crate::answer::AnswerState;
use crate::blanks::BlankLayout;
use crate::model::{Question, QuestionKind};
use crate::pool::{OptionPool, ShuffleFn};
use crate::slots::{SlotBoard, SlotChange, SlotCommand};

/// When a drag-based question counts as answered. The authoring tool shipped
/// both behaviors in different places; one policy applies uniformly here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmPolicy {
    /// Confirm the instant every slot is occupied (default).
    AutoOnFill,
    /// Keep a confirm action that only becomes available once every slot is
    /// occupied.
    ExplicitConfirm,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Signal {
    Updated,
    /// Board is full and waiting for an explicit confirm.
    ReadyToConfirm,
    Confirmed,
    Rejected,
}

#[derive(Debug, Clone)]
enum EngineMode {
    Fill { layout: BlankLayout },
    Matching,
}

/// Wires the slot board and option pool for the question currently on
/// screen, projects every mutation into the question's [`AnswerState`], and
/// decides when the answer is confirmed. The runner owns the answer; it is
/// only ever written through `dispatch`/`confirm` here.
#[derive(Debug, Clone)]
pub struct InteractionEngine {
    mode: EngineMode,
    pub board: SlotBoard,
    pub pool: OptionPool,
    policy: ConfirmPolicy,
    locked: bool,
    feedback: Option<Vec<bool>>,
}

impl InteractionEngine {
    /// Build the engine for a drag-based question. Multiple-choice and typing
    /// questions have no slots, so they get no engine.
    pub fn for_question(
        question: &Question,
        fill_layout: Option<&BlankLayout>,
        policy: ConfirmPolicy,
        shuffle: ShuffleFn,
    ) -> Option<Self> {
        match &question.kind {
            QuestionKind::Fill { options, .. } => {
                let layout = fill_layout?.clone();
                let pool = OptionPool::for_fill(options, &layout);
                let board = SlotBoard::new(layout.blanks.len());
                Some(InteractionEngine {
                    mode: EngineMode::Fill { layout },
                    board,
                    pool,
                    policy,
                    locked: false,
                    feedback: None,
                })
            }
            QuestionKind::Matching { pairs } => {
                let pool = OptionPool::for_matching(pairs, shuffle);
                let board = SlotBoard::new(pairs.len());
                Some(InteractionEngine {
                    mode: EngineMode::Matching,
                    board,
                    pool,
                    policy,
                    locked: false,
                    feedback: None,
                })
            }
            _ => None,
        }
    }

    pub fn locked(&self) -> bool {
        self.locked
    }

    pub fn feedback(&self) -> Option<&[bool]> {
        self.feedback.as_deref()
    }

    pub fn layout(&self) -> Option<&BlankLayout> {
        match &self.mode {
            EngineMode::Fill { layout } => Some(layout),
            EngineMode::Matching => None,
        }
    }

    /// True when the explicit-confirm action should be offered.
    pub fn ready_to_confirm(&self) -> bool {
        self.policy == ConfirmPolicy::ExplicitConfirm
            && !self.locked
            && self.board.all_occupied()
    }

    pub fn slot_text(&self, slot: usize) -> Option<&str> {
        self.board
            .slot(slot)
            .held()
            .map(|chip| self.pool.chip(chip).text.as_str())
    }

    pub fn dispatch(&mut self, command: SlotCommand, answer: &mut AnswerState) -> Signal {
        if self.locked {
            return Signal::Rejected;
        }
        let change = self.board.apply(&mut self.pool, command);
        if change == SlotChange::Rejected {
            return Signal::Rejected;
        }
        self.project_answer(answer);

        if self.board.all_occupied() {
            match self.policy {
                ConfirmPolicy::AutoOnFill => {
                    self.do_confirm(answer);
                    Signal::Confirmed
                }
                ConfirmPolicy::ExplicitConfirm => Signal::ReadyToConfirm,
            }
        } else {
            Signal::Updated
        }
    }

    /// Explicit confirmation; refused unless every slot is occupied.
    pub fn confirm(&mut self, answer: &mut AnswerState) -> Signal {
        if self.locked || !self.board.all_occupied() {
            return Signal::Rejected;
        }
        self.do_confirm(answer);
        Signal::Confirmed
    }

    /// Rebuild slot occupancy and pool visibility from a saved answer.
    /// Resets first, so calling it twice gives the same occupancy and never
    /// double-consumes chips; confirmation side effects are never re-run.
    pub fn restore(&mut self, answer: &AnswerState) {
        self.board.reset(&mut self.pool);
        match (&self.mode, answer) {
            (EngineMode::Fill { .. }, AnswerState::Fill { blanks, .. }) => {
                for (slot, filled) in blanks.iter().enumerate() {
                    if let Some(text) = filled {
                        if let Some(chip) = self.pool.find_visible_by_text(text) {
                            self.board
                                .apply(&mut self.pool, SlotCommand::PlaceChip { chip, slot });
                        }
                    }
                }
            }
            (EngineMode::Matching, AnswerState::Matching { matches, .. }) => {
                for (&slot, &original) in matches {
                    if slot >= self.board.len() {
                        continue;
                    }
                    if let Some(chip) = self.pool.find_visible_by_original(original) {
                        self.board
                            .apply(&mut self.pool, SlotCommand::PlaceChip { chip, slot });
                    }
                }
            }
            _ => {}
        }
    }

    /// Freeze the board. Recomputes display feedback for an already-answered
    /// question being shown again.
    pub fn lock(&mut self) {
        self.locked = true;
        if self.feedback.is_none() && self.board.all_occupied() {
            self.feedback = Some(self.compute_feedback());
        }
    }

    fn do_confirm(&mut self, answer: &mut AnswerState) {
        let feedback = self.compute_feedback();
        let correct_count = feedback.iter().filter(|&&ok| ok).count();
        match answer {
            AnswerState::Fill { completed, .. } => *completed = true,
            AnswerState::Matching {
                checked,
                correct_pairs,
                ..
            } => {
                *checked = true;
                *correct_pairs = correct_count;
            }
            AnswerState::Multiple { .. } => {}
        }
        self.feedback = Some(feedback);
        self.locked = true;
    }

    /// Per-slot display verdicts; independent of the all-or-nothing score.
    fn compute_feedback(&self) -> Vec<bool> {
        (0..self.board.len())
            .map(|slot| match self.board.slot(slot).held() {
                None => false,
                Some(chip) => match &self.mode {
                    EngineMode::Fill { layout } => {
                        let dropped = self.pool.chip(chip).text.trim().to_lowercase();
                        let wanted = layout.blanks[slot].word.trim().to_lowercase();
                        dropped == wanted
                    }
                    EngineMode::Matching => self.pool.chip(chip).original_index == slot,
                },
            })
            .collect()
    }

    /// Rewrite the answer's entries from the board, slot by slot. Keeping
    /// this a full projection makes swap and move updates atomic.
    fn project_answer(&self, answer: &mut AnswerState) {
        match (&self.mode, answer) {
            (EngineMode::Fill { .. }, AnswerState::Fill { blanks, .. }) => {
                for slot in 0..self.board.len() {
                    blanks[slot] = self
                        .board
                        .slot(slot)
                        .held()
                        .map(|chip| self.pool.chip(chip).text.clone());
                }
            }
            (EngineMode::Matching, AnswerState::Matching { matches, .. }) => {
                matches.clear();
                for slot in 0..self.board.len() {
                    if let Some(chip) = self.board.slot(slot).held() {
                        matches.insert(slot, self.pool.chip(chip).original_index);
                    }
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blanks::derive_blanks;
    use crate::model::Pair;
    use crate::pool::identity_shuffle;

    fn fill_question(sentence: &str, words: &[&str]) -> (Question, BlankLayout) {
        let options: Vec<String> = words.iter().map(|w| w.to_string()).collect();
        let layout = derive_blanks(sentence, &options);
        let question = Question {
            prompt: "Fill the gaps".to_string(),
            images: Vec::new(),
            kind: QuestionKind::Fill {
                sentence: sentence.to_string(),
                options,
            },
        };
        (question, layout)
    }

    fn matching_question(items: &[(&str, &str)]) -> Question {
        Question {
            prompt: "Match".to_string(),
            images: Vec::new(),
            kind: QuestionKind::Matching {
                pairs: items
                    .iter()
                    .map(|(l, r)| Pair {
                        left: l.to_string(),
                        right: r.to_string(),
                        left_images: Vec::new(),
                        right_images: Vec::new(),
                    })
                    .collect(),
            },
        }
    }

    fn fill_engine(
        sentence: &str,
        words: &[&str],
        policy: ConfirmPolicy,
    ) -> (InteractionEngine, AnswerState) {
        let (question, layout) = fill_question(sentence, words);
        let engine =
            InteractionEngine::for_question(&question, Some(&layout), policy, identity_shuffle)
                .unwrap();
        let answer = AnswerState::initial(&question.kind, Some(&layout)).unwrap();
        (engine, answer)
    }

    fn place_text(engine: &mut InteractionEngine, answer: &mut AnswerState, text: &str, slot: usize) -> Signal {
        let chip = engine.pool.find_visible_by_text(text).unwrap();
        engine.dispatch(SlotCommand::PlaceChip { chip, slot }, answer)
    }

    #[test]
    fn filling_last_slot_auto_confirms() {
        let (mut engine, mut answer) =
            fill_engine("a fast red car", &["fast", "red"], ConfirmPolicy::AutoOnFill);

        assert_eq!(place_text(&mut engine, &mut answer, "fast", 0), Signal::Updated);
        assert_eq!(place_text(&mut engine, &mut answer, "red", 1), Signal::Confirmed);

        assert!(engine.locked());
        assert_eq!(engine.feedback(), Some(&[true, true][..]));
        match answer {
            AnswerState::Fill { completed, blanks, .. } => {
                assert!(completed);
                assert_eq!(
                    blanks,
                    vec![Some("fast".to_string()), Some("red".to_string())]
                );
            }
            other => panic!("expected fill answer, got {:?}", other),
        }
    }

    #[test]
    fn explicit_policy_waits_for_confirm() {
        let (mut engine, mut answer) = fill_engine(
            "a fast red car",
            &["fast", "red"],
            ConfirmPolicy::ExplicitConfirm,
        );

        place_text(&mut engine, &mut answer, "fast", 0);
        let signal = place_text(&mut engine, &mut answer, "red", 1);
        assert_eq!(signal, Signal::ReadyToConfirm);
        assert!(engine.ready_to_confirm());
        assert!(!engine.locked());

        assert_eq!(engine.confirm(&mut answer), Signal::Confirmed);
        assert!(engine.locked());
    }

    #[test]
    fn confirm_refused_while_slots_remain_empty() {
        let (mut engine, mut answer) = fill_engine(
            "a fast red car",
            &["fast", "red"],
            ConfirmPolicy::ExplicitConfirm,
        );
        place_text(&mut engine, &mut answer, "fast", 0);
        assert_eq!(engine.confirm(&mut answer), Signal::Rejected);
    }

    #[test]
    fn locked_engine_rejects_all_commands() {
        let (mut engine, mut answer) =
            fill_engine("a red car", &["red"], ConfirmPolicy::AutoOnFill);
        assert_eq!(place_text(&mut engine, &mut answer, "red", 0), Signal::Confirmed);

        let before = answer.clone();
        assert_eq!(
            engine.dispatch(SlotCommand::Remove { slot: 0 }, &mut answer),
            Signal::Rejected
        );
        assert_eq!(answer, before);
    }

    #[test]
    fn swap_exchanges_answer_entries_exactly() {
        let (mut engine, mut answer) = fill_engine(
            "a fast red car",
            &["fast", "red"],
            ConfirmPolicy::ExplicitConfirm,
        );
        // Deliberately crossed.
        place_text(&mut engine, &mut answer, "red", 0);
        place_text(&mut engine, &mut answer, "fast", 1);

        engine.dispatch(SlotCommand::DragBetween { from: 0, to: 1 }, &mut answer);
        match &answer {
            AnswerState::Fill { blanks, .. } => {
                assert_eq!(
                    blanks,
                    &vec![Some("fast".to_string()), Some("red".to_string())]
                );
            }
            other => panic!("expected fill answer, got {:?}", other),
        }
        assert_eq!(engine.board.occupied_count(), 2);
    }

    #[test]
    fn move_relocates_single_answer_entry() {
        let (mut engine, mut answer) = fill_engine(
            "a fast red car",
            &["fast", "red"],
            ConfirmPolicy::ExplicitConfirm,
        );
        place_text(&mut engine, &mut answer, "red", 0);

        engine.dispatch(SlotCommand::DragBetween { from: 0, to: 1 }, &mut answer);
        match &answer {
            AnswerState::Fill { blanks, .. } => {
                assert_eq!(blanks, &vec![None, Some("red".to_string())]);
            }
            other => panic!("expected fill answer, got {:?}", other),
        }
    }

    #[test]
    fn restore_is_idempotent() {
        let (question, layout) = fill_question("the cat sat on the mat", &["the", "cat"]);
        let mut engine = InteractionEngine::for_question(
            &question,
            Some(&layout),
            ConfirmPolicy::AutoOnFill,
            identity_shuffle,
        )
        .unwrap();
        let answer = AnswerState::Fill {
            blanks: vec![Some("the".to_string()), Some("cat".to_string()), None],
            correct_words: layout.correct_words(),
            completed: false,
        };

        engine.restore(&answer);
        let occupied_first = engine.board.occupied_count();
        let visible_first = engine.pool.visible_chips().count();

        engine.restore(&answer);
        assert_eq!(engine.board.occupied_count(), occupied_first);
        assert_eq!(engine.pool.visible_chips().count(), visible_first);
        // Two chips consumed, one "the" chip still in the pool.
        assert_eq!(occupied_first, 2);
        assert_eq!(visible_first, 1);
        assert!(!engine.locked());
    }

    #[test]
    fn matching_confirm_counts_correct_pairs() {
        let question = matching_question(&[("1", "one"), ("2", "two"), ("3", "three")]);
        let mut engine = InteractionEngine::for_question(
            &question,
            None,
            ConfirmPolicy::AutoOnFill,
            identity_shuffle,
        )
        .unwrap();
        let mut answer = AnswerState::initial(&question.kind, None).unwrap();

        // Pair 0 correct, pairs 1 and 2 swapped.
        let one = engine.pool.find_visible_by_original(0).unwrap();
        engine.dispatch(SlotCommand::PlaceChip { chip: one, slot: 0 }, &mut answer);
        let three = engine.pool.find_visible_by_original(2).unwrap();
        engine.dispatch(SlotCommand::PlaceChip { chip: three, slot: 1 }, &mut answer);
        let two = engine.pool.find_visible_by_original(1).unwrap();
        let signal = engine.dispatch(SlotCommand::PlaceChip { chip: two, slot: 2 }, &mut answer);

        assert_eq!(signal, Signal::Confirmed);
        match answer {
            AnswerState::Matching {
                checked,
                correct_pairs,
                ..
            } => {
                assert!(checked);
                assert_eq!(correct_pairs, 1);
            }
            other => panic!("expected matching answer, got {:?}", other),
        }
        assert_eq!(engine.feedback(), Some(&[true, false, false][..]));
    }

    #[test]
    fn restoring_confirmed_matching_relocks_with_feedback() {
        let question = matching_question(&[("1", "one"), ("2", "two")]);
        let mut engine = InteractionEngine::for_question(
            &question,
            None,
            ConfirmPolicy::AutoOnFill,
            identity_shuffle,
        )
        .unwrap();
        let mut matches = std::collections::HashMap::new();
        matches.insert(0usize, 0usize);
        matches.insert(1usize, 1usize);
        let answer = AnswerState::Matching {
            matches,
            checked: true,
            correct_pairs: 2,
        };

        engine.restore(&answer);
        assert!(!engine.locked());
        engine.lock();
        assert!(engine.locked());
        assert_eq!(engine.feedback(), Some(&[true, true][..]));
    }
}
