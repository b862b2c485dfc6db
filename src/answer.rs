use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::blanks::BlankLayout;
use crate::model::QuestionKind;

/// Per-question answer record, owned exclusively by the runner for the
/// duration of one attempt. Once a question is confirmed the record is
/// frozen; the locked interaction engine refuses further mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum AnswerState {
    Multiple {
        selected: Option<usize>,
    },
    Fill {
        /// Index-aligned with blank order; None = still empty.
        blanks: Vec<Option<String>>,
        #[serde(rename = "correctWords")]
        correct_words: Vec<String>,
        completed: bool,
    },
    Matching {
        /// correct pair index -> original index of the dropped right item.
        /// JSON map keys are strings; the internally tagged enum buffers
        /// content and loses the integer-key coercion, so parse them here.
        #[serde(deserialize_with = "usize_key_map")]
        matches: HashMap<usize, usize>,
        checked: bool,
        #[serde(rename = "correctPairs")]
        correct_pairs: usize,
    },
}

fn usize_key_map<'de, D>(deserializer: D) -> Result<HashMap<usize, usize>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw: HashMap<String, usize> = HashMap::deserialize(deserializer)?;
    raw.into_iter()
        .map(|(k, v)| k.parse::<usize>().map(|k| (k, v)).map_err(serde::de::Error::custom))
        .collect()
}

impl AnswerState {
    /// Fresh, empty answer for a runnable question. Fill answers need the
    /// derived layout so the blank array is sized and keyed up front.
    pub fn initial(kind: &QuestionKind, fill_layout: Option<&BlankLayout>) -> Option<Self> {
        match kind {
            QuestionKind::Multiple { .. } => Some(AnswerState::Multiple { selected: None }),
            QuestionKind::Fill { .. } => {
                let layout = fill_layout?;
                Some(AnswerState::Fill {
                    blanks: vec![None; layout.blanks.len()],
                    correct_words: layout.correct_words(),
                    completed: false,
                })
            }
            QuestionKind::Matching { .. } => Some(AnswerState::Matching {
                matches: HashMap::new(),
                checked: false,
                correct_pairs: 0,
            }),
            QuestionKind::Typing { .. } => None,
        }
    }
}
