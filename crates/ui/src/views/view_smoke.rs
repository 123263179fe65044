use quiz_core::model::{AvatarId, Category};
use quiz_core::normalize::columns;
use quiz_core::tabular::write_tabular;
use storage::InMemorySource;

use super::test_harness::{ViewKind, dataset, full_source, mount, services_for};

#[tokio::test(flavor = "current_thread")]
async fn home_view_smoke_lists_choices() {
    let services = services_for(full_source());
    services.load_questions().await.expect("load questions");

    let mut harness = mount(ViewKind::Home, services);
    harness.rebuild();
    let html = harness.render();
    for expected in ["Choose a category", "IFES", "ENEM", "Kako", "Dora", "Start Phase 1"] {
        assert!(html.contains(expected), "missing {expected} in {html}");
    }
}

#[tokio::test(flavor = "current_thread")]
async fn home_view_smoke_marks_selected_cards() {
    let services = services_for(full_source());
    let quiz = services.quiz();
    quiz.select_category(Category::Ifes).expect("select category");
    quiz.select_avatar(AvatarId::Lia).expect("select avatar");

    let mut harness = mount(ViewKind::Home, services);
    harness.rebuild();
    let html = harness.render();
    assert_eq!(html.matches("card selected").count(), 2, "{html}");
}

#[tokio::test(flavor = "current_thread")]
async fn home_view_smoke_blocks_on_load_failure() {
    let source = InMemorySource::new().with(Category::Enem, dataset("enem", 1));
    let services = services_for(source);

    let mut harness = mount(ViewKind::Home, services.clone());
    harness.rebuild();
    let mut html = harness.render();
    for _ in 0..10 {
        if html.contains("Could not load the questions") {
            break;
        }
        harness.drive_async().await;
        html = harness.render();
    }
    assert!(
        html.contains("Could not load the questions"),
        "missing load notice in {html}"
    );
    assert!(!services.quiz().is_ready());
}

#[tokio::test(flavor = "current_thread")]
async fn play_view_smoke_renders_question() {
    let services = services_for(full_source());
    services.load_questions().await.expect("load questions");
    let quiz = services.quiz();
    quiz.select_category(Category::Enem).expect("select category");
    quiz.select_avatar(AvatarId::Ze).expect("select avatar");
    quiz.start().expect("start");

    let mut harness = mount(ViewKind::Play, services);
    harness.rebuild();
    let html = harness.render();
    for expected in [
        "[ENEM 2023] Question 1 of 2",
        "Subject: Biology",
        "Sample stem 1",
        "Cell",
        "Streak: 0",
        "Phase: 1",
    ] {
        assert!(html.contains(expected), "missing {expected} in {html}");
    }
}

#[tokio::test(flavor = "current_thread")]
async fn play_view_smoke_shows_feedback_after_answer() {
    let services = services_for(full_source());
    services.load_questions().await.expect("load questions");
    let quiz = services.quiz();
    quiz.select_category(Category::Ifes).expect("select category");
    quiz.select_avatar(AvatarId::Kako).expect("select avatar");
    quiz.start().expect("start");
    quiz.answer(1).expect("answer");

    let mut harness = mount(ViewKind::Play, services);
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("Not quite"), "missing feedback in {html}");
    assert!(html.contains("feedback wrong"), "missing tone in {html}");
    assert!(html.contains("disabled"), "options should be disabled in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn play_view_smoke_celebrates_a_correct_answer() {
    let services = services_for(full_source());
    services.load_questions().await.expect("load questions");
    let quiz = services.quiz();
    quiz.select_category(Category::Ifes).expect("select category");
    quiz.select_avatar(AvatarId::Ze).expect("select avatar");
    quiz.start().expect("start");

    let mut harness = mount(ViewKind::Play, services);
    harness.rebuild();
    assert!(!harness.render().contains("burst-"));

    quiz.answer(0).expect("answer");
    let mut html = harness.render();
    for _ in 0..10 {
        if html.contains("stage burst-correct") && html.contains("Well done") {
            break;
        }
        harness.drive_async().await;
        html = harness.render();
    }
    assert!(html.contains("stage burst-correct"), "missing burst in {html}");
    assert!(html.contains("Well done"), "missing feedback in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn play_view_smoke_finished_panel() {
    let source = full_source();
    source
        .set(Category::Enem, write_tabular(&columns::ALL, &[]))
        .expect("set dataset");
    let services = services_for(source);
    services.load_questions().await.expect("load questions");
    let quiz = services.quiz();
    quiz.select_category(Category::Enem).expect("select category");
    quiz.select_avatar(AvatarId::Dora).expect("select avatar");
    quiz.start().expect("start");

    let mut harness = mount(ViewKind::Play, services);
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("End of the ENEM set!"), "missing headline in {html}");
    assert!(html.contains("Final score: 0"), "missing score in {html}");
    assert!(html.contains("Play again"), "missing button in {html}");
}
