use dioxus::prelude::*;
use dioxus_router::{Link, use_navigator};
use quiz_core::quiz::{QuizSnapshot, QuizStatus};

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::use_event_burst;
use crate::vm::{FinishedVm, MedalVm, PlayVm, map_finished, map_medal, map_play};

#[component]
pub fn PlayView() -> Element {
    let ctx = use_context::<AppContext>();
    let snapshot = use_context::<Signal<QuizSnapshot>>();
    let navigator = use_navigator();
    let mut error = use_signal(|| None::<String>);
    let mut burst = use_event_burst(ctx.quiz());

    let answer = {
        let quiz = ctx.quiz();
        use_callback(move |option: usize| {
            // A click during the feedback window is expected and changes nothing.
            if let Err(err) = quiz.answer(option) {
                error.set(Some(err.to_string()));
            } else {
                error.set(None);
            }
        })
    };

    let dismiss_medal = {
        let quiz = ctx.quiz();
        use_callback(move |()| {
            if let Err(err) = quiz.dismiss_medal() {
                error.set(Some(err.to_string()));
            }
        })
    };

    let play_again = {
        let quiz = ctx.quiz();
        use_callback(move |()| {
            if let Err(err) = quiz.reset() {
                error.set(Some(err.to_string()));
                return;
            }
            let _ = navigator.push(Route::Home {});
        })
    };

    let current = snapshot.read().clone();
    if current.status == QuizStatus::Home {
        return rsx! {
            section { class: "page",
                p { "No quiz in progress." }
                Link { to: Route::Home {}, "Back to the start" }
            }
        };
    }

    let play = map_play(&current);
    let medal = current.medal.map(map_medal);
    let finished = (current.status == QuizStatus::Finished).then(|| {
        let summary = ctx.quiz().summary().ok().flatten();
        map_finished(&current, summary.as_ref())
    });

    let stage = match burst() {
        Some(class) => format!("stage {class}"),
        None => "stage".to_string(),
    };

    rsx! {
        div { class: "{stage}", onanimationend: move |_| burst.set(None),
            if let Some(vm) = finished {
                FinishedPanel { vm, on_play_again: play_again }
            } else if let Some(vm) = play {
                QuestionCard { vm, on_answer: answer }
            }
        }

        if let Some(message) = error() {
            p { class: "notice subtle", "{message}" }
        }

        if let Some(vm) = medal {
            MedalOverlay { vm, on_dismiss: dismiss_medal }
        }
    }
}

#[component]
fn QuestionCard(vm: PlayVm, on_answer: Callback<usize>) -> Element {
    let disabled = !vm.options_enabled;

    rsx! {
        section { class: "page card question",
            div { class: "question-meta",
                strong { "{vm.heading}" }
                span { "Subject: {vm.subject}" }
            }
            p { class: "stem", "{vm.stem}" }
            div { class: "options",
                for option in vm.options {
                    button {
                        key: "{option.index}",
                        class: "option",
                        disabled: disabled,
                        onclick: move |_| on_answer.call(option.index),
                        span { class: "option-letter", "{option.letter}." }
                        " {option.text}"
                    }
                }
            }
            if let Some(feedback) = vm.feedback {
                div { class: "feedback {feedback.tone}", "{feedback.text}" }
            }
            div { class: "chips",
                span { class: "chip", "Streak: {vm.streak}" }
                span { class: "chip", "Phase: {vm.phase}" }
                span { class: "chip", "Correct this phase: {vm.phase_correct}" }
            }
        }
    }
}

#[component]
fn MedalOverlay(vm: MedalVm, on_dismiss: Callback<()>) -> Element {
    rsx! {
        div { class: "overlay", onclick: move |_| on_dismiss.call(()),
            div { class: "medal",
                div { class: "medal-greeting", "Congratulations!" }
                div { class: "medal-icon", "🏅" }
                div { class: "medal-title", "{vm.title}" }
                div { class: "medal-caption", "{vm.answered}" }
                if vm.dance {
                    div { class: "dance", "🕺💃" }
                }
                button {
                    class: "continue",
                    onclick: move |evt| {
                        evt.stop_propagation();
                        on_dismiss.call(());
                    },
                    "Continue"
                }
            }
        }
    }
}

#[component]
fn FinishedPanel(vm: FinishedVm, on_play_again: Callback<()>) -> Element {
    rsx! {
        section { class: "page finished",
            div { class: "finish-flag", "🏁" }
            h2 { "{vm.headline}" }
            p { "{vm.score_line}" }
            if let Some(details) = vm.details {
                p { class: "finish-details", "{details}" }
            }
            button { class: "play-again", onclick: move |_| on_play_again.call(()), "Play again" }
        }
    }
}
