use serde::{Deserialize, Deserializer, Serialize};

/// The in-memory payload handed to the runner at start:
/// `{title, instructions, questions}`. Field names match the authoring
/// tool's JSON so fixtures round-trip unchanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestPayload {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub instructions: String,
    pub questions: Vec<Question>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageRef {
    pub src: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChoiceOption {
    #[serde(default)]
    pub text: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<ImageRef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pair {
    #[serde(default)]
    pub left: String,
    #[serde(default)]
    pub right: String,
    #[serde(default, rename = "leftImages", skip_serializing_if = "Vec::is_empty")]
    pub left_images: Vec<ImageRef>,
    #[serde(default, rename = "rightImages", skip_serializing_if = "Vec::is_empty")]
    pub right_images: Vec<ImageRef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    /// Prompt text; may contain inline markdown.
    #[serde(default, rename = "question")]
    pub prompt: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<ImageRef>,
    #[serde(flatten)]
    pub kind: QuestionKind,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum QuestionKind {
    Multiple {
        options: Vec<ChoiceOption>,
        #[serde(
            default,
            rename = "correctAnswer",
            deserialize_with = "de_correct_index",
            skip_serializing_if = "Option::is_none"
        )]
        correct_answer: Option<usize>,
    },
    Fill {
        sentence: String,
        options: Vec<String>,
    },
    Matching {
        pairs: Vec<Pair>,
    },
    /// Typing questions are never run or scored; they exist only for the
    /// printable export.
    Typing {
        #[serde(default)]
        expected: String,
    },
}

/// The authoring tool writes -1 for "no correct answer selected".
fn de_correct_index<'de, D>(deserializer: D) -> Result<Option<usize>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<i64>::deserialize(deserializer)?;
    Ok(raw.and_then(|n| usize::try_from(n).ok()))
}

impl Question {
    pub fn type_name(&self) -> &'static str {
        match self.kind {
            QuestionKind::Multiple { .. } => "multiple",
            QuestionKind::Fill { .. } => "fill",
            QuestionKind::Matching { .. } => "matching",
            QuestionKind::Typing { .. } => "typing",
        }
    }

    pub fn is_typing(&self) -> bool {
        matches!(self.kind, QuestionKind::Typing { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_round_trips_through_json() {
        let json = r#"{
            "title": "Sample",
            "instructions": "Answer everything.",
            "questions": [
                {"type": "multiple", "question": "Pick one",
                 "options": [{"text": "a"}, {"text": "b"}], "correctAnswer": 1},
                {"type": "fill", "question": "", "sentence": "the cat sat",
                 "options": ["cat"]},
                {"type": "matching", "question": "Match",
                 "pairs": [{"left": "1", "right": "one"}]},
                {"type": "typing", "question": "Type it", "expected": "hello"}
            ]
        }"#;
        let payload: TestPayload = serde_json::from_str(json).unwrap();
        assert_eq!(payload.questions.len(), 4);
        assert_eq!(payload.questions[0].type_name(), "multiple");
        assert!(payload.questions[3].is_typing());

        let back = serde_json::to_string(&payload).unwrap();
        let again: TestPayload = serde_json::from_str(&back).unwrap();
        assert_eq!(again.title, "Sample");
        match &again.questions[0].kind {
            QuestionKind::Multiple { correct_answer, .. } => {
                assert_eq!(*correct_answer, Some(1));
            }
            other => panic!("expected multiple, got {:?}", other),
        }
    }

    #[test]
    fn negative_correct_answer_reads_as_unset() {
        let json = r#"{"type": "multiple", "question": "q",
                       "options": [{"text": "a"}], "correctAnswer": -1}"#;
        let q: Question = serde_json::from_str(json).unwrap();
        match q.kind {
            QuestionKind::Multiple { correct_answer, .. } => {
                assert_eq!(correct_answer, None);
            }
            other => panic!("expected multiple, got {:?}", other),
        }
    }
}
