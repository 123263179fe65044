use std::time::Duration;

use quiz_core::model::{AvatarId, Category, Question, QuestionBank, QuestionId};
use quiz_core::quiz::{QuizError, QuizEvent, QuizStatus};
use quiz_core::time::fixed_clock;
use services::{QuizController, QuizServiceError};
use tokio::runtime::Handle;

const DELAY: Duration = Duration::from_millis(5_000);

fn question(category: Category, n: usize) -> Question {
    Question {
        category: Some(category),
        id: QuestionId::new(format!("{category}-{n}")),
        year: Some(2024),
        subject: "Physics".into(),
        difficulty: "easy".into(),
        stem: format!("Question {n}"),
        options: vec!["right".into(), "wrong".into(), "also wrong".into()],
        correct_index: 0,
        feedback_correct: "Nice".into(),
        feedback_wrong: "Nope".into(),
    }
}

fn bank(ifes: usize, enem: usize) -> QuestionBank {
    let mut bank = QuestionBank::new();
    bank.insert_pool(
        Category::Ifes,
        (1..=ifes).map(|n| question(Category::Ifes, n)).collect(),
    );
    bank.insert_pool(
        Category::Enem,
        (1..=enem).map(|n| question(Category::Enem, n)).collect(),
    );
    bank
}

fn started(questions: usize) -> QuizController {
    let quiz = QuizController::new(fixed_clock(), DELAY, Handle::current());
    quiz.install_bank(bank(2, questions));
    quiz.select_category(Category::Enem).unwrap();
    quiz.select_avatar(AvatarId::Lia).unwrap();
    quiz.set_name("  Ana ").unwrap();
    quiz.start().unwrap();
    quiz
}

async fn wait_out_feedback() {
    tokio::time::sleep(DELAY + Duration::from_millis(1)).await;
}

#[tokio::test(start_paused = true)]
async fn start_requires_a_loaded_bank() {
    let quiz = QuizController::new(fixed_clock(), DELAY, Handle::current());
    quiz.select_category(Category::Ifes).unwrap();
    quiz.select_avatar(AvatarId::Ze).unwrap();

    assert!(!quiz.is_ready());
    assert!(matches!(quiz.start(), Err(QuizServiceError::NotLoaded)));
    assert_eq!(quiz.snapshot().status, QuizStatus::Home);
}

#[tokio::test(start_paused = true)]
async fn start_requires_a_complete_selection() {
    let quiz = QuizController::new(fixed_clock(), DELAY, Handle::current());
    quiz.install_bank(bank(1, 1));
    quiz.select_category(Category::Ifes).unwrap();

    let err = quiz.start().unwrap_err();
    assert!(matches!(
        err,
        QuizServiceError::Quiz(QuizError::MissingAvatar)
    ));
}

#[tokio::test(start_paused = true)]
async fn answer_advances_once_after_the_delay() {
    let quiz = started(3);

    let outcome = quiz.answer(0).unwrap();
    assert!(outcome.correct);
    let snapshot = quiz.snapshot();
    assert_eq!(snapshot.index, 0);
    assert_eq!(snapshot.score, 1);
    assert!(!snapshot.can_answer);
    assert_eq!(snapshot.feedback.map(|f| f.text), Some("Nice".to_string()));

    tokio::time::sleep(DELAY / 2).await;
    assert_eq!(quiz.snapshot().index, 0);

    wait_out_feedback().await;
    let snapshot = quiz.snapshot();
    assert_eq!(snapshot.index, 1);
    assert!(snapshot.feedback.is_none());
    assert!(snapshot.can_answer);

    wait_out_feedback().await;
    assert_eq!(quiz.snapshot().index, 1);
}

#[tokio::test(start_paused = true)]
async fn second_answer_during_feedback_is_rejected() {
    let quiz = started(3);
    quiz.answer(1).unwrap();

    let err = quiz.answer(0).unwrap_err();
    assert!(matches!(
        err,
        QuizServiceError::Quiz(QuizError::FeedbackPending)
    ));
    let snapshot = quiz.snapshot();
    assert_eq!(snapshot.score, 0);
    assert_eq!(snapshot.streak, 0);

    wait_out_feedback().await;
    assert_eq!(quiz.snapshot().index, 1);
}

#[tokio::test(start_paused = true)]
async fn reset_cancels_the_pending_advance() {
    let quiz = started(3);
    quiz.answer(0).unwrap();
    quiz.reset().unwrap();

    wait_out_feedback().await;
    let snapshot = quiz.snapshot();
    assert_eq!(snapshot.status, QuizStatus::Home);
    assert_eq!(snapshot.index, 0);
    assert_eq!(snapshot.score, 0);
    assert!(snapshot.selection.category.is_none());
}

#[tokio::test(start_paused = true)]
async fn start_during_a_session_keeps_the_pending_advance() {
    let quiz = started(3);
    quiz.answer(0).unwrap();
    assert!(matches!(
        quiz.start(),
        Err(QuizServiceError::Quiz(QuizError::AlreadyStarted))
    ));

    wait_out_feedback().await;
    let snapshot = quiz.snapshot();
    assert_eq!(snapshot.index, 1);
    assert!(snapshot.feedback.is_none());
    quiz.answer(0).unwrap();
}

#[tokio::test(start_paused = true)]
async fn restart_ignores_the_previous_sessions_advance() {
    let quiz = started(3);
    quiz.answer(0).unwrap();
    quiz.reset().unwrap();
    quiz.select_category(Category::Enem).unwrap();
    quiz.select_avatar(AvatarId::Dora).unwrap();
    quiz.start().unwrap();

    wait_out_feedback().await;
    let snapshot = quiz.snapshot();
    assert_eq!(snapshot.status, QuizStatus::Playing);
    assert_eq!(snapshot.index, 0);
    assert!(snapshot.can_answer);
}

#[tokio::test(start_paused = true)]
async fn fifth_answer_awards_a_phase_medal() {
    let quiz = started(7);
    let mut events = quiz.subscribe_events();

    for option in [0, 0, 1, 0, 2] {
        quiz.answer(option).unwrap();
        wait_out_feedback().await;
    }

    let snapshot = quiz.snapshot();
    assert_eq!(snapshot.status, QuizStatus::PhaseComplete);
    let medal = snapshot.medal.unwrap();
    assert_eq!(medal.phase, 1);
    assert_eq!(medal.total_answered, 5);
    assert!(medal.dance);
    assert_eq!(snapshot.phase_correct, 0);
    assert!(!snapshot.can_answer);

    let mut seen = Vec::new();
    while let Ok(event) = events.try_recv() {
        seen.push(event);
    }
    assert_eq!(seen.len(), 6);
    assert_eq!(seen.last(), Some(&QuizEvent::PhaseComplete(medal)));

    assert_eq!(quiz.dismiss_medal().unwrap(), QuizStatus::Playing);
    assert!(quiz.snapshot().can_answer);
}

#[tokio::test(start_paused = true)]
async fn last_answer_finishes_the_quiz() {
    let quiz = started(2);
    quiz.answer(0).unwrap();
    wait_out_feedback().await;
    quiz.answer(2).unwrap();
    wait_out_feedback().await;

    let snapshot = quiz.snapshot();
    assert_eq!(snapshot.status, QuizStatus::Finished);
    assert_eq!(snapshot.score, 1);
    assert_eq!(snapshot.best_streak, 1);

    let summary = quiz.summary().unwrap().unwrap();
    assert_eq!(summary.total, 2);
    assert_eq!(summary.accuracy_percent(), 50);
    assert_eq!(summary.player_name.as_deref(), Some("Ana"));
}

#[tokio::test(start_paused = true)]
async fn subscribers_see_every_published_snapshot() {
    let quiz = started(2);
    let mut rx = quiz.subscribe();

    quiz.answer(0).unwrap();
    rx.changed().await.unwrap();
    assert!(rx.borrow_and_update().feedback.is_some());

    rx.changed().await.unwrap();
    let snapshot = rx.borrow_and_update().clone();
    assert_eq!(snapshot.index, 1);
    assert!(snapshot.feedback.is_none());
}
