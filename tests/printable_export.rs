use std::path::Path;

use quizdrop::export::build_printable;
use quizdrop::loader::load_payload;

#[test]
fn printable_covers_every_question_type() {
    let payload = load_payload(Path::new("tests/fixtures/sample_quiz.json")).unwrap();
    let text = build_printable(&payload);

    assert!(text.contains("# Unit 4 Review"));
    assert!(text.contains("Answer every question."));

    // All four questions appear, including the typing one the runner skips.
    assert!(text.contains("## Question 1"));
    assert!(text.contains("## Question 4"));
    assert!(text.contains("Describe the water cycle."));
    assert!(text.contains("Expected: evaporation, condensation, precipitation"));

    // The fill sentence has its blanks knocked out and keyed.
    assert!(text.contains("water ______ at one ______ degrees"));
    assert!(text.contains("Answers: boils, hundred"));

    // Matching pairs print with their answers.
    assert!(text.contains("2 -> two"));
}
