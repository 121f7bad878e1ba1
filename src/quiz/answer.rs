//! Free-text answer checking for the typing quiz.

use serde::Serialize;

const IDEOGRAPHIC_SPACE: char = '\u{3000}';

/// Normalize an answer before comparison.
///
/// A missing answer becomes the empty string, full-width spaces become
/// ordinary spaces, surrounding whitespace is trimmed and the text is
/// lower-cased without regard to locale. Spaces inside the text are kept,
/// so "New York" stays a single comparable answer.
pub fn normalize(text: Option<&str>) -> String {
    let Some(text) = text else {
        return String::new();
    };
    text.replace(IDEOGRAPHIC_SPACE, " ").trim().to_lowercase()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum Evaluation {
    /// Nothing was typed; no judgement is made.
    Empty,
    Judged {
        correct: bool,
        correct_answer: String,
    },
}

/// Compare a typed answer with the expected English word by exact equality
/// of the normalized texts.
pub fn evaluate(raw_answer: Option<&str>, correct_english: &str) -> Evaluation {
    let answer = normalize(raw_answer);
    if answer.is_empty() {
        return Evaluation::Empty;
    }

    Evaluation::Judged {
        correct: answer == normalize(Some(correct_english)),
        correct_answer: correct_english.to_string(),
    }
}
