//! Quiz session state machine.
//!
//! `Home → Playing → (PhaseComplete → Playing)* → Finished → Home`.
//! Timing lives outside: `answer` hands out an [`AdvanceTicket`] that the
//! caller returns to `advance` once the feedback delay has passed.

mod snapshot;
mod state;
mod summary;

use thiserror::Error;

pub use snapshot::QuizSnapshot;
pub use state::{QuizState, Selection};
pub use summary::QuizSummary;

/// Questions per phase.
pub const PHASE_SIZE: usize = 5;

/// How long answer feedback stays up before the quiz moves on.
pub const FEEDBACK_DELAY_MS: u64 = 5_000;

/// Correct answers needed in a phase for the dance medal.
#[must_use]
pub const fn pass_threshold(phase_size: usize) -> usize {
    phase_size.div_ceil(2)
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizError {
    #[error("a quiz is already in progress")]
    AlreadyStarted,

    #[error("choose a category first")]
    MissingCategory,

    #[error("choose an avatar first")]
    MissingAvatar,

    #[error("no question is open for answering")]
    NotPlaying,

    #[error("feedback for the previous answer is still showing")]
    FeedbackPending,

    #[error("advance does not match the pending answer")]
    StaleAdvance,

    #[error("no phase medal to dismiss")]
    NoMedal,
}

/// Where the session is, derived from its fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizStatus {
    Home,
    Playing,
    PhaseComplete,
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackKind {
    Correct,
    Wrong,
}

/// Text shown under the question while the advance is pending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub kind: FeedbackKind,
    pub text: String,
}

/// Awarded at every phase boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseMedal {
    /// 1-based phase number.
    pub phase: usize,
    pub total_answered: usize,
    /// Phase passed (enough correct answers); shows the dance variant.
    pub dance: bool,
}

/// Claim on the single advance that follows an answer.
///
/// Goes stale when the session is reset or restarted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdvanceTicket {
    generation: u64,
    index: usize,
}

impl AdvanceTicket {
    /// Index of the question that was answered.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }
}

/// Things presentation may react to (sounds, confetti, overlays).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizEvent {
    AnswerCorrect,
    AnswerWrong,
    PhaseComplete(PhaseMedal),
    Finished,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerOutcome {
    pub correct: bool,
    pub feedback: Feedback,
    pub ticket: AdvanceTicket,
    pub event: QuizEvent,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdvanceOutcome {
    pub index: usize,
    pub events: Vec<QuizEvent>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_rounds_up() {
        assert_eq!(pass_threshold(PHASE_SIZE), 3);
        assert_eq!(pass_threshold(4), 2);
        assert_eq!(pass_threshold(1), 1);
    }
}
