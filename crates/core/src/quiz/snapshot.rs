use crate::model::Question;

use super::{Feedback, PHASE_SIZE, PhaseMedal, QuizStatus, Selection};

/// Owned copy of everything presentation needs to draw one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizSnapshot {
    pub status: QuizStatus,
    pub selection: Selection,
    pub question: Option<Question>,
    pub index: usize,
    pub total: usize,
    pub score: usize,
    pub streak: usize,
    pub best_streak: usize,
    pub phase_correct: usize,
    pub feedback: Option<Feedback>,
    pub medal: Option<PhaseMedal>,
    pub can_answer: bool,
}

impl QuizSnapshot {
    /// 1-based phase the current question belongs to.
    #[must_use]
    pub fn phase_number(&self) -> usize {
        self.index / PHASE_SIZE + 1
    }

    /// 1-based position of the current question.
    #[must_use]
    pub fn question_number(&self) -> usize {
        self.index + 1
    }
}
