//! Mapping of dataset rows into [`Question`]s.

use thiserror::Error;

use crate::feedback::{FeedbackPicker, FeedbackPools};
use crate::model::{Category, Question, QuestionId, MAX_OPTIONS};
use crate::tabular::Row;

/// Column names recognized in dataset files.
pub mod columns {
    pub const MODE: &str = "mode";
    pub const ID: &str = "id";
    pub const YEAR: &str = "year";
    pub const SUBJECT: &str = "subject";
    pub const DIFFICULTY: &str = "difficulty";
    pub const STEM: &str = "stem";
    pub const OPTIONS: [&str; 4] = ["option_a", "option_b", "option_c", "option_d"];
    pub const CORRECT: &str = "correct";
    pub const FEEDBACK_CORRECT: &str = "feedback_correct";
    pub const FEEDBACK_WRONG: &str = "feedback_wrong";

    /// Full header in canonical order.
    pub const ALL: [&str; 13] = [
        MODE,
        ID,
        YEAR,
        SUBJECT,
        DIFFICULTY,
        STEM,
        OPTIONS[0],
        OPTIONS[1],
        OPTIONS[2],
        OPTIONS[3],
        CORRECT,
        FEEDBACK_CORRECT,
        FEEDBACK_WRONG,
    ];
}

/// Data problems found in a row. They never reject the row.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RecordIssue {
    #[error("missing correct letter, defaulting to A")]
    MissingCorrectLetter,

    #[error("unrecognized correct letter {raw:?}, defaulting to A")]
    UnknownCorrectLetter { raw: String },

    #[error("only {count} usable option(s)")]
    TooFewOptions { count: usize },

    #[error("correct option {index} is outside the {options} available option(s)")]
    CorrectOutOfRange { index: usize, options: usize },
}

/// A normalized question together with the issues noticed on the way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Normalized {
    pub question: Question,
    pub issues: Vec<RecordIssue>,
}

/// Map a trimmed, case-insensitive letter `A`..`D` to an option index.
#[must_use]
pub fn correct_index_from_letter(raw: &str) -> Option<usize> {
    match raw.trim().to_ascii_uppercase().as_str() {
        "A" => Some(0),
        "B" => Some(1),
        "C" => Some(2),
        "D" => Some(3),
        _ => None,
    }
}

/// Normalize one row, filling blank feedback from `pools` via `picker`.
pub fn normalize(row: &Row, pools: &FeedbackPools, picker: &mut dyn FeedbackPicker) -> Normalized {
    let mut issues = Vec::new();

    let options: Vec<String> = columns::OPTIONS
        .iter()
        .map(|column| row.get(column))
        .filter(|value| !value.is_empty())
        .take(MAX_OPTIONS)
        .map(str::to_string)
        .collect();

    let raw_correct = row.get(columns::CORRECT);
    let correct_index = match correct_index_from_letter(raw_correct) {
        Some(index) => index,
        None if raw_correct.trim().is_empty() => {
            issues.push(RecordIssue::MissingCorrectLetter);
            0
        }
        None => {
            issues.push(RecordIssue::UnknownCorrectLetter {
                raw: raw_correct.to_string(),
            });
            0
        }
    };

    if options.len() < 2 {
        issues.push(RecordIssue::TooFewOptions {
            count: options.len(),
        });
    }
    if correct_index >= options.len() {
        issues.push(RecordIssue::CorrectOutOfRange {
            index: correct_index,
            options: options.len(),
        });
    }

    let feedback_correct = match row.get(columns::FEEDBACK_CORRECT) {
        "" => pools.pick_correct(picker).to_string(),
        text => text.to_string(),
    };
    let feedback_wrong = match row.get(columns::FEEDBACK_WRONG) {
        "" => pools.pick_wrong(picker).to_string(),
        text => text.to_string(),
    };

    let question = Question {
        category: row.get(columns::MODE).parse::<Category>().ok(),
        id: QuestionId::new(row.get(columns::ID)),
        year: row.get(columns::YEAR).parse().ok(),
        subject: row.get(columns::SUBJECT).to_string(),
        difficulty: row.get(columns::DIFFICULTY).to_string(),
        stem: row.get(columns::STEM).to_string(),
        options,
        correct_index,
        feedback_correct,
        feedback_wrong,
    };

    Normalized { question, issues }
}
