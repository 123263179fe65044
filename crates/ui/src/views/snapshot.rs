use std::sync::Arc;

use dioxus::prelude::*;
use quiz_core::quiz::QuizSnapshot;
use services::QuizController;
use tokio::sync::broadcast::error::RecvError;

use crate::vm::burst_class;

/// Mirror the controller's snapshots into a signal shared through context.
///
/// Timer-driven advances arrive on the watch channel, so the view updates
/// without any user input.
pub fn use_snapshot_provider(quiz: Arc<QuizController>) -> Signal<QuizSnapshot> {
    let snapshot = use_signal({
        let quiz = Arc::clone(&quiz);
        move || quiz.snapshot()
    });
    use_context_provider(|| snapshot);

    use_future(move || {
        let mut rx = quiz.subscribe();
        let mut snapshot = snapshot;
        async move {
            // Catch anything published between the first render and subscribing.
            let current = rx.borrow_and_update().clone();
            snapshot.set(current);
            while rx.changed().await.is_ok() {
                let next = rx.borrow_and_update().clone();
                snapshot.set(next);
            }
        }
    });

    snapshot
}

/// Celebration class driven by the controller's events.
///
/// Cleared by the view once its animation ends.
pub fn use_event_burst(quiz: Arc<QuizController>) -> Signal<Option<&'static str>> {
    let burst = use_signal(|| None::<&'static str>);

    use_future(move || {
        let mut rx = quiz.subscribe_events();
        let mut burst = burst;
        async move {
            loop {
                match rx.recv().await {
                    Ok(event) => burst.set(burst_class(event)),
                    // Only the latest celebration matters.
                    Err(RecvError::Lagged(_)) => {}
                    Err(RecvError::Closed) => break,
                }
            }
        }
    });

    burst
}
