use crate::answer::AnswerState;
use crate::model::{Question, QuestionKind};

/// All-or-nothing verdict for one question.
#[derive(Debug, Clone, PartialEq)]
pub struct Verdict {
    pub correct: bool,
    pub detail: ScoreDetail,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ScoreDetail {
    Multiple {
        selected: Option<usize>,
        expected: Option<usize>,
    },
    Fill {
        /// Per-blank verdicts in blank order.
        per_blank: Vec<bool>,
    },
    Matching {
        correct_pairs: usize,
        total_pairs: usize,
    },
    /// Typing questions and invalid answers are never correct.
    NotScorable,
}

/// Score one question against its recorded answer. Partial credit shows up
/// in the detail for display, never in `correct`.
pub fn evaluate(question: &Question, answer: Option<&AnswerState>) -> Verdict {
    match (&question.kind, answer) {
        (
            QuestionKind::Multiple { correct_answer, .. },
            Some(AnswerState::Multiple { selected }),
        ) => Verdict {
            correct: correct_answer.is_some() && selected == correct_answer,
            detail: ScoreDetail::Multiple {
                selected: *selected,
                expected: *correct_answer,
            },
        },
        (
            QuestionKind::Fill { .. },
            Some(AnswerState::Fill {
                blanks,
                correct_words,
                ..
            }),
        ) => {
            let per_blank: Vec<bool> = correct_words
                .iter()
                .enumerate()
                .map(|(i, word)| match blanks.get(i).and_then(|b| b.as_deref()) {
                    Some(filled) => {
                        filled.trim().to_lowercase() == word.trim().to_lowercase()
                    }
                    None => false,
                })
                .collect();
            // Length mismatch means an unanswered or stale record.
            let correct = blanks.len() == correct_words.len()
                && !per_blank.is_empty()
                && per_blank.iter().all(|&ok| ok);
            Verdict {
                correct,
                detail: ScoreDetail::Fill { per_blank },
            }
        }
        (
            QuestionKind::Matching { pairs },
            Some(AnswerState::Matching {
                checked,
                correct_pairs,
                ..
            }),
        ) => Verdict {
            correct: *checked && !pairs.is_empty() && *correct_pairs == pairs.len(),
            detail: ScoreDetail::Matching {
                correct_pairs: *correct_pairs,
                total_pairs: pairs.len(),
            },
        },
        _ => Verdict {
            correct: false,
            detail: ScoreDetail::NotScorable,
        },
    }
}

/// Final percentage, rounded to the nearest whole number.
pub fn final_score(correct: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (100.0 * correct as f64 / total as f64).round() as u32
}

/// Tiered closing message shown with the final score.
pub fn result_message(percentage: u32) -> &'static str {
    match percentage {
        90..=100 => "Excellent work!",
        80..=89 => "Great job!",
        70..=79 => "Good effort!",
        60..=69 => "Not bad, keep practicing!",
        _ => "Keep studying and try again!",
    }
}
