use crate::model::category::Category;
use crate::model::ids::QuestionId;

/// Maximum number of answer options a question can carry.
pub const MAX_OPTIONS: usize = 4;

/// Letters shown next to options, by position.
pub const OPTION_LETTERS: [char; MAX_OPTIONS] = ['A', 'B', 'C', 'D'];

/// Letter for an option position, if the position is displayable.
#[must_use]
pub fn option_letter(index: usize) -> Option<char> {
    OPTION_LETTERS.get(index).copied()
}

/// One multiple-choice quiz item, normalized from a dataset row.
///
/// `options` holds at most [`MAX_OPTIONS`] non-empty entries in source order.
/// `correct_index` is not checked against `options.len()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub category: Option<Category>,
    pub id: QuestionId,
    pub year: Option<i32>,
    pub subject: String,
    pub difficulty: String,
    pub stem: String,
    pub options: Vec<String>,
    pub correct_index: usize,
    pub feedback_correct: String,
    pub feedback_wrong: String,
}

impl Question {
    #[must_use]
    pub fn is_correct(&self, option: usize) -> bool {
        option == self.correct_index
    }

    #[must_use]
    pub fn correct_option(&self) -> Option<&str> {
        self.options.get(self.correct_index).map(String::as_str)
    }

    /// Feedback text for an evaluated answer.
    #[must_use]
    pub fn feedback_for(&self, correct: bool) -> &str {
        if correct {
            &self.feedback_correct
        } else {
            &self.feedback_wrong
        }
    }
}

#[cfg(test)]
pub(crate) fn sample_question(id: &str, correct_index: usize) -> Question {
    Question {
        category: Some(Category::Enem),
        id: QuestionId::new(id),
        year: Some(2023),
        subject: "Math".to_string(),
        difficulty: "easy".to_string(),
        stem: format!("Stem {id}"),
        options: vec![
            "one".to_string(),
            "two".to_string(),
            "three".to_string(),
            "four".to_string(),
        ],
        correct_index,
        feedback_correct: format!("right {id}"),
        feedback_wrong: format!("wrong {id}"),
    }
}
