use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use quiz_core::Clock;
use quiz_core::model::{AvatarId, Category, QuestionBank};
use quiz_core::quiz::{
    AdvanceTicket, AnswerOutcome, FEEDBACK_DELAY_MS, QuizError, QuizEvent, QuizSnapshot,
    QuizState, QuizStatus, QuizSummary,
};
use tokio::runtime::Handle;
use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use crate::error::QuizServiceError;

const EVENT_CAPACITY: usize = 32;

/// Drives a [`QuizState`] and schedules the delayed advance after each answer.
///
/// Every change is published as a [`QuizSnapshot`] on a watch channel;
/// notable moments are also broadcast as [`QuizEvent`]s.
#[derive(Clone)]
pub struct QuizController {
    inner: Arc<Inner>,
}

struct Inner {
    state: Mutex<QuizState>,
    bank: Mutex<Option<Arc<QuestionBank>>>,
    scheduled: Mutex<Option<JoinHandle<()>>>,
    snapshots: watch::Sender<QuizSnapshot>,
    events: broadcast::Sender<QuizEvent>,
    feedback_delay: Duration,
    runtime: Handle,
}

impl QuizController {
    /// `runtime` runs the delayed advance tasks.
    #[must_use]
    pub fn new(clock: Clock, feedback_delay: Duration, runtime: Handle) -> Self {
        let state = QuizState::new(clock);
        let (snapshots, _) = watch::channel(state.snapshot());
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            inner: Arc::new(Inner {
                state: Mutex::new(state),
                bank: Mutex::new(None),
                scheduled: Mutex::new(None),
                snapshots,
                events,
                feedback_delay,
                runtime,
            }),
        }
    }

    /// Controller with the standard 5 s feedback delay on the current runtime.
    ///
    /// # Panics
    ///
    /// Panics when called outside a Tokio runtime.
    #[must_use]
    pub fn with_default_delay(clock: Clock) -> Self {
        Self::new(
            clock,
            Duration::from_millis(FEEDBACK_DELAY_MS),
            Handle::current(),
        )
    }

    #[must_use]
    pub fn feedback_delay(&self) -> Duration {
        self.inner.feedback_delay
    }

    //
    // ─── BANK ──────────────────────────────────────────────────────────────────
    //

    /// Make `bank` the source of pools for future sessions.
    pub fn install_bank(&self, bank: QuestionBank) -> Arc<QuestionBank> {
        let bank = Arc::new(bank);
        *self.inner.lock_bank() = Some(Arc::clone(&bank));
        bank
    }

    #[must_use]
    pub fn bank(&self) -> Option<Arc<QuestionBank>> {
        self.inner.lock_bank().clone()
    }

    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.bank().is_some()
    }

    //
    // ─── OBSERVATION ───────────────────────────────────────────────────────────
    //

    #[must_use]
    pub fn snapshot(&self) -> QuizSnapshot {
        self.inner.snapshots.borrow().clone()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<QuizSnapshot> {
        self.inner.snapshots.subscribe()
    }

    #[must_use]
    pub fn subscribe_events(&self) -> broadcast::Receiver<QuizEvent> {
        self.inner.events.subscribe()
    }

    /// # Errors
    ///
    /// Returns `QuizServiceError::Poisoned` if the state lock is poisoned.
    pub fn summary(&self) -> Result<Option<QuizSummary>, QuizServiceError> {
        Ok(self.inner.lock_state()?.summary())
    }

    //
    // ─── INTENTS ───────────────────────────────────────────────────────────────
    //

    /// # Errors
    ///
    /// Returns `QuizServiceError::Quiz` outside the home screen.
    pub fn select_category(&self, category: Category) -> Result<(), QuizServiceError> {
        self.mutate(|state| state.select_category(category))
    }

    /// # Errors
    ///
    /// Returns `QuizServiceError::Quiz` outside the home screen.
    pub fn select_avatar(&self, avatar: AvatarId) -> Result<(), QuizServiceError> {
        self.mutate(|state| state.select_avatar(avatar))
    }

    /// # Errors
    ///
    /// Returns `QuizServiceError::Quiz` outside the home screen.
    pub fn set_name(&self, name: &str) -> Result<(), QuizServiceError> {
        self.mutate(|state| state.set_name(name))
    }

    /// Start a session over the selected category's pool.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::NotLoaded` before a bank is installed and
    /// `QuizServiceError::Quiz` when the selection is incomplete or a session
    /// is already running. A rejected start leaves that session untouched.
    pub fn start(&self) -> Result<(), QuizServiceError> {
        let bank = self.bank().ok_or(QuizServiceError::NotLoaded)?;
        self.mutate(|state| {
            let category = state
                .selection()
                .category
                .ok_or(QuizError::MissingCategory)?;
            // A complete bank always has the category; an empty pool finishes at once.
            let pool = bank.pool(category).unwrap_or_else(|| Arc::from(Vec::new()));
            state.start(pool)?;
            info!(%category, questions = state.total_questions(), "quiz started");
            Ok(())
        })?;
        // Only a successful start leaves the previous session's advance stale.
        self.cancel_scheduled();
        Ok(())
    }

    /// Answer the current question and schedule the advance.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::Quiz` when no question is open or feedback
    /// for a previous answer is still pending.
    pub fn answer(&self, option: usize) -> Result<AnswerOutcome, QuizServiceError> {
        let outcome = self.mutate(|state| state.answer(option))?;
        debug!(
            option,
            correct = outcome.correct,
            index = outcome.ticket.index(),
            "answer evaluated"
        );
        let _ = self.inner.events.send(outcome.event);
        self.schedule_advance(outcome.ticket);
        Ok(outcome)
    }

    /// # Errors
    ///
    /// Returns `QuizServiceError::Quiz` when no medal is showing.
    pub fn dismiss_medal(&self) -> Result<QuizStatus, QuizServiceError> {
        self.mutate(QuizState::dismiss_medal)
    }

    /// Return to the home screen, dropping any pending advance.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::Poisoned` if the state lock is poisoned.
    pub fn reset(&self) -> Result<(), QuizServiceError> {
        self.cancel_scheduled();
        self.mutate(|state| {
            state.reset();
            Ok(())
        })?;
        info!("quiz reset");
        Ok(())
    }

    fn mutate<T>(
        &self,
        f: impl FnOnce(&mut QuizState) -> Result<T, QuizError>,
    ) -> Result<T, QuizServiceError> {
        let mut state = self.inner.lock_state()?;
        let result = f(&mut *state)?;
        self.inner.snapshots.send_replace(state.snapshot());
        Ok(result)
    }

    fn schedule_advance(&self, ticket: AdvanceTicket) {
        let inner = Arc::clone(&self.inner);
        let delay = self.inner.feedback_delay;
        let task = self.inner.runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            inner.apply_advance(ticket);
        });
        if let Ok(mut scheduled) = self.inner.scheduled.lock() {
            if let Some(previous) = scheduled.replace(task) {
                previous.abort();
            }
        }
    }

    fn cancel_scheduled(&self) {
        if let Ok(mut scheduled) = self.inner.scheduled.lock() {
            if let Some(task) = scheduled.take() {
                task.abort();
            }
        }
    }
}

impl Inner {
    fn lock_state(&self) -> Result<MutexGuard<'_, QuizState>, QuizServiceError> {
        self.state
            .lock()
            .map_err(|e| QuizServiceError::Poisoned(e.to_string()))
    }

    // The bank is replaced wholesale, so a poisoned guard still holds a valid value.
    fn lock_bank(&self) -> MutexGuard<'_, Option<Arc<QuestionBank>>> {
        self.bank.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn apply_advance(&self, ticket: AdvanceTicket) {
        let mut state = match self.lock_state() {
            Ok(state) => state,
            Err(err) => {
                error!(%err, "advance dropped");
                return;
            }
        };
        match state.advance(ticket) {
            Ok(outcome) => {
                self.snapshots.send_replace(state.snapshot());
                drop(state);
                for event in outcome.events {
                    match event {
                        QuizEvent::PhaseComplete(medal) => {
                            info!(phase = medal.phase, dance = medal.dance, "phase complete");
                        }
                        QuizEvent::Finished => info!("quiz finished"),
                        _ => {}
                    }
                    let _ = self.events.send(event);
                }
            }
            Err(err) => debug!(%err, "stale advance ignored"),
        }
    }
}
