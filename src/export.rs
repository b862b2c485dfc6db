use std::fs;
use std::path::Path;

use crate::blanks::derive_blanks;
use crate::model::{QuestionKind, TestPayload};

/// Write the printable version of a quiz: every question, including the
/// typing questions the interactive runner skips, with its answer key.
pub fn write_printable(payload: &TestPayload, path: &Path) -> Result<(), String> {
    let text = build_printable(payload);
    fs::write(path, text).map_err(|e| format!("Cannot write {}: {}", path.display(), e))
}

pub fn build_printable(payload: &TestPayload) -> String {
    let mut out = String::new();

    out.push_str(&format!("# {}\n", heading(&payload.title)));
    if !payload.instructions.trim().is_empty() {
        out.push_str(&format!("\n{}\n", payload.instructions.trim()));
    }

    for (number, question) in payload.questions.iter().enumerate() {
        out.push_str(&format!("\n## Question {}\n", number + 1));
        if !question.prompt.trim().is_empty() {
            out.push_str(&format!("\n{}\n", question.prompt.trim()));
        }
        match &question.kind {
            QuestionKind::Multiple {
                options,
                correct_answer,
            } => {
                out.push('\n');
                for (i, option) in options.iter().enumerate() {
                    let marker = if *correct_answer == Some(i) { "*" } else { " " };
                    out.push_str(&format!("  ({}) {} {}\n", letter(i), option.text, marker));
                }
            }
            QuestionKind::Fill { sentence, options } => {
                let layout = derive_blanks(sentence, options);
                out.push('\n');
                out.push_str(&format!("  {}\n", blanked_sentence(sentence, &layout)));
                out.push_str("  Word bank: ");
                out.push_str(&options.join(", "));
                out.push('\n');
                out.push_str("  Answers: ");
                out.push_str(&layout.correct_words().join(", "));
                out.push('\n');
            }
            QuestionKind::Matching { pairs } => {
                out.push('\n');
                for pair in pairs {
                    out.push_str(&format!("  {} -> {}\n", pair.left, pair.right));
                }
            }
            QuestionKind::Typing { expected } => {
                out.push_str("\n  Written answer.\n");
                if !expected.trim().is_empty() {
                    out.push_str(&format!("  Expected: {}\n", expected.trim()));
                }
            }
        }
    }

    out
}

fn heading(title: &str) -> &str {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        "Quiz"
    } else {
        trimmed
    }
}

fn letter(index: usize) -> char {
    (b'a' + (index % 26) as u8) as char
}

/// Sentence with every derived blank replaced by underscores. When the blank
/// layout is non-positional the sentence is printed untouched.
fn blanked_sentence(sentence: &str, layout: &crate::blanks::BlankLayout) -> String {
    if !layout.positional {
        return sentence.to_string();
    }
    let mut out = String::new();
    let mut cursor = 0usize;
    for blank in &layout.blanks {
        out.push_str(&sentence[cursor..blank.position]);
        out.push_str("______");
        cursor = blank.position + blank.length;
    }
    out.push_str(&sentence[cursor..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn printable_includes_typing_questions() {
        let payload: TestPayload = serde_json::from_str(
            r#"{
            "title": "Unit 3",
            "instructions": "Do your best.",
            "questions": [
                {"type": "fill", "question": "", "sentence": "the cat sat",
                 "options": ["cat"]},
                {"type": "typing", "question": "Describe photosynthesis",
                 "expected": "plants make sugar from light"}
            ]
        }"#,
        )
        .unwrap();

        let text = build_printable(&payload);
        assert!(text.contains("# Unit 3"));
        assert!(text.contains("the ______ sat"));
        assert!(text.contains("Word bank: cat"));
        assert!(text.contains("Describe photosynthesis"));
        assert!(text.contains("Expected: plants make sugar from light"));
    }

    #[test]
    fn correct_choice_is_marked() {
        let payload: TestPayload = serde_json::from_str(
            r#"{
            "title": "", "instructions": "",
            "questions": [
                {"type": "multiple", "question": "Pick",
                 "options": [{"text": "no"}, {"text": "yes"}], "correctAnswer": 1}
            ]
        }"#,
        )
        .unwrap();
        let text = build_printable(&payload);
        assert!(text.contains("(a) no  \n"));
        assert!(text.contains("(b) yes *\n"));
    }
}
