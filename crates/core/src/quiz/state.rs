use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::model::{AvatarId, Category, Pool, Question};
use crate::time::Clock;

use super::{
    AdvanceOutcome, AdvanceTicket, AnswerOutcome, Feedback, FeedbackKind, PHASE_SIZE,
    PhaseMedal, QuizError, QuizEvent, QuizSnapshot, QuizStatus, QuizSummary, pass_threshold,
};

/// Home-screen choices. The name is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub category: Option<Category>,
    pub avatar: Option<AvatarId>,
    pub player_name: String,
}

impl Selection {
    #[must_use]
    pub fn can_start(&self) -> bool {
        self.category.is_some() && self.avatar.is_some()
    }

    /// Trimmed player name, `None` when blank.
    #[must_use]
    pub fn display_name(&self) -> Option<&str> {
        let name = self.player_name.trim();
        (!name.is_empty()).then_some(name)
    }
}

/// The single active quiz session.
///
/// Every transition either applies fully or returns a [`QuizError`] and
/// leaves the state untouched.
#[derive(Debug, Clone)]
pub struct QuizState {
    clock: Clock,
    selection: Selection,
    started: bool,
    pool: Pool,
    current_index: usize,
    score: usize,
    streak: usize,
    best_streak: usize,
    phase_correct: usize,
    feedback: Option<Feedback>,
    medal: Option<PhaseMedal>,
    medals: Vec<PhaseMedal>,
    pending: Option<AdvanceTicket>,
    generation: u64,
    started_at: Option<DateTime<Utc>>,
    finished_at: Option<DateTime<Utc>>,
}

impl Default for QuizState {
    fn default() -> Self {
        Self::new(Clock::default_clock())
    }
}

impl QuizState {
    #[must_use]
    pub fn new(clock: Clock) -> Self {
        Self {
            clock,
            selection: Selection::default(),
            started: false,
            pool: Arc::from(Vec::new()),
            current_index: 0,
            score: 0,
            streak: 0,
            best_streak: 0,
            phase_correct: 0,
            feedback: None,
            medal: None,
            medals: Vec::new(),
            pending: None,
            generation: 0,
            started_at: None,
            finished_at: None,
        }
    }

    //
    // ─── ACCESSORS ─────────────────────────────────────────────────────────────
    //

    #[must_use]
    pub fn status(&self) -> QuizStatus {
        if !self.started {
            QuizStatus::Home
        } else if self.medal.is_some() {
            QuizStatus::PhaseComplete
        } else if self.current_index >= self.pool.len() {
            QuizStatus::Finished
        } else {
            QuizStatus::Playing
        }
    }

    #[must_use]
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        if !self.started {
            return None;
        }
        self.pool.get(self.current_index)
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    #[must_use]
    pub fn total_questions(&self) -> usize {
        self.pool.len()
    }

    #[must_use]
    pub fn score(&self) -> usize {
        self.score
    }

    #[must_use]
    pub fn streak(&self) -> usize {
        self.streak
    }

    #[must_use]
    pub fn best_streak(&self) -> usize {
        self.best_streak
    }

    #[must_use]
    pub fn phase_correct(&self) -> usize {
        self.phase_correct
    }

    #[must_use]
    pub fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    #[must_use]
    pub fn medal(&self) -> Option<PhaseMedal> {
        self.medal
    }

    #[must_use]
    pub fn medals(&self) -> &[PhaseMedal] {
        &self.medals
    }

    /// The outstanding advance, if an answer is awaiting it.
    #[must_use]
    pub fn pending(&self) -> Option<AdvanceTicket> {
        self.pending
    }

    /// Answers are accepted only while playing with nothing pending.
    #[must_use]
    pub fn can_answer(&self) -> bool {
        self.status() == QuizStatus::Playing && self.pending.is_none()
    }

    #[must_use]
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    #[must_use]
    pub fn finished_at(&self) -> Option<DateTime<Utc>> {
        self.finished_at
    }

    #[must_use]
    pub fn snapshot(&self) -> QuizSnapshot {
        QuizSnapshot {
            status: self.status(),
            selection: self.selection.clone(),
            question: self.current_question().cloned(),
            index: self.current_index,
            total: self.pool.len(),
            score: self.score,
            streak: self.streak,
            best_streak: self.best_streak,
            phase_correct: self.phase_correct,
            feedback: self.feedback.clone(),
            medal: self.medal,
            can_answer: self.can_answer(),
        }
    }

    /// Summary of a finished session.
    #[must_use]
    pub fn summary(&self) -> Option<QuizSummary> {
        if self.status() != QuizStatus::Finished {
            return None;
        }
        Some(QuizSummary {
            category: self.selection.category?,
            avatar: self.selection.avatar?,
            player_name: self.selection.display_name().map(str::to_string),
            score: self.score,
            total: self.pool.len(),
            best_streak: self.best_streak,
            medals: self.medals.clone(),
            started_at: self.started_at?,
            finished_at: self.finished_at?,
        })
    }

    //
    // ─── HOME ──────────────────────────────────────────────────────────────────
    //

    /// # Errors
    ///
    /// Returns `QuizError::AlreadyStarted` outside the home screen.
    pub fn select_category(&mut self, category: Category) -> Result<(), QuizError> {
        self.ensure_home()?;
        self.selection.category = Some(category);
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `QuizError::AlreadyStarted` outside the home screen.
    pub fn select_avatar(&mut self, avatar: AvatarId) -> Result<(), QuizError> {
        self.ensure_home()?;
        self.selection.avatar = Some(avatar);
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `QuizError::AlreadyStarted` outside the home screen.
    pub fn set_name(&mut self, name: impl Into<String>) -> Result<(), QuizError> {
        self.ensure_home()?;
        self.selection.player_name = name.into();
        Ok(())
    }

    /// Begin a session over `pool`.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::AlreadyStarted` if a session is running, or
    /// `MissingCategory` / `MissingAvatar` when a choice is missing.
    pub fn start(&mut self, pool: Pool) -> Result<(), QuizError> {
        self.ensure_home()?;
        if self.selection.category.is_none() {
            return Err(QuizError::MissingCategory);
        }
        if self.selection.avatar.is_none() {
            return Err(QuizError::MissingAvatar);
        }

        let now = self.clock.now();
        self.clear_session();
        self.generation = self.generation.wrapping_add(1);
        self.started = true;
        self.pool = pool;
        self.started_at = Some(now);
        if self.pool.is_empty() {
            self.finished_at = Some(now);
        }
        Ok(())
    }

    //
    // ─── PLAYING ───────────────────────────────────────────────────────────────
    //

    /// Evaluate `option` against the current question.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NotPlaying` without an open question and
    /// `QuizError::FeedbackPending` while the previous answer awaits its advance.
    pub fn answer(&mut self, option: usize) -> Result<AnswerOutcome, QuizError> {
        if self.status() != QuizStatus::Playing {
            return Err(QuizError::NotPlaying);
        }
        if self.pending.is_some() {
            return Err(QuizError::FeedbackPending);
        }
        let Some(question) = self.pool.get(self.current_index) else {
            return Err(QuizError::NotPlaying);
        };

        let correct = question.is_correct(option);
        let feedback = Feedback {
            kind: if correct {
                FeedbackKind::Correct
            } else {
                FeedbackKind::Wrong
            },
            text: question.feedback_for(correct).to_string(),
        };

        let event = if correct {
            self.score += 1;
            self.streak += 1;
            self.best_streak = self.best_streak.max(self.streak);
            self.phase_correct += 1;
            QuizEvent::AnswerCorrect
        } else {
            self.streak = 0;
            QuizEvent::AnswerWrong
        };

        let ticket = AdvanceTicket {
            generation: self.generation,
            index: self.current_index,
        };
        self.feedback = Some(feedback.clone());
        self.pending = Some(ticket);

        Ok(AnswerOutcome {
            correct,
            feedback,
            ticket,
            event,
        })
    }

    /// Move past the answered question.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::StaleAdvance` unless `ticket` is the pending one.
    pub fn advance(&mut self, ticket: AdvanceTicket) -> Result<AdvanceOutcome, QuizError> {
        if self.pending != Some(ticket) {
            return Err(QuizError::StaleAdvance);
        }

        self.pending = None;
        self.feedback = None;
        self.current_index += 1;

        let mut events = Vec::new();
        if self.current_index % PHASE_SIZE == 0 {
            let medal = PhaseMedal {
                phase: self.current_index / PHASE_SIZE,
                total_answered: self.current_index,
                dance: self.phase_correct >= pass_threshold(PHASE_SIZE),
            };
            self.medal = Some(medal);
            self.medals.push(medal);
            self.phase_correct = 0;
            events.push(QuizEvent::PhaseComplete(medal));
        }
        if self.current_index >= self.pool.len() {
            self.finished_at = Some(self.clock.now());
            events.push(QuizEvent::Finished);
        }

        Ok(AdvanceOutcome {
            index: self.current_index,
            events,
        })
    }

    /// Close the medal overlay.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NoMedal` when no medal is showing.
    pub fn dismiss_medal(&mut self) -> Result<QuizStatus, QuizError> {
        if self.medal.take().is_none() {
            return Err(QuizError::NoMedal);
        }
        Ok(self.status())
    }

    /// Back to the home screen with everything cleared.
    ///
    /// Any outstanding [`AdvanceTicket`] becomes stale.
    pub fn reset(&mut self) {
        self.clear_session();
        self.selection = Selection::default();
        self.started = false;
        self.pool = Arc::from(Vec::new());
        self.generation = self.generation.wrapping_add(1);
    }

    fn ensure_home(&self) -> Result<(), QuizError> {
        if self.started {
            return Err(QuizError::AlreadyStarted);
        }
        Ok(())
    }

    fn clear_session(&mut self) {
        self.current_index = 0;
        self.score = 0;
        self.streak = 0;
        self.best_streak = 0;
        self.phase_correct = 0;
        self.feedback = None;
        self.medal = None;
        self.medals.clear();
        self.pending = None;
        self.started_at = None;
        self.finished_at = None;
    }
}
