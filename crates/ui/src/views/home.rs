use dioxus::prelude::*;
use dioxus_router::use_navigator;
use quiz_core::model::{AvatarId, Category};
use quiz_core::quiz::QuizSnapshot;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ViewError, ViewState, view_state_from_resource};
use crate::vm::{AvatarCardVm, CategoryCardVm, map_home};

#[component]
pub fn HomeView() -> Element {
    let ctx = use_context::<AppContext>();
    let snapshot = use_context::<Signal<QuizSnapshot>>();
    let navigator = use_navigator();
    let mut error = use_signal(|| None::<String>);

    let services = ctx.services();
    let resource = use_resource(move || {
        let services = services.clone();
        async move {
            if let Some(bank) = services.quiz().bank() {
                return Ok(bank.total_questions());
            }
            match services.spawn_load().await {
                Ok(Ok(bank)) => Ok(bank.total_questions()),
                Ok(Err(_)) => Err(ViewError::LoadFailed),
                Err(_) => Err(ViewError::Unknown),
            }
        }
    });
    let load_state = view_state_from_resource(resource);
    let vm = map_home(&snapshot.read(), matches!(load_state, ViewState::Ready(_)));

    let select_category = {
        let quiz = ctx.quiz();
        use_callback(move |category: Category| {
            if let Err(err) = quiz.select_category(category) {
                error.set(Some(err.to_string()));
            }
        })
    };

    let select_avatar = {
        let quiz = ctx.quiz();
        use_callback(move |avatar: AvatarId| {
            if let Err(err) = quiz.select_avatar(avatar) {
                error.set(Some(err.to_string()));
            }
        })
    };

    let name_change = {
        let quiz = ctx.quiz();
        use_callback(move |value: String| {
            if let Err(err) = quiz.set_name(&value) {
                error.set(Some(err.to_string()));
            }
        })
    };

    let start = {
        let quiz = ctx.quiz();
        use_callback(move |()| match quiz.start() {
            Ok(()) => {
                error.set(None);
                let _ = navigator.push(Route::Play {});
            }
            Err(err) => error.set(Some(err.to_string())),
        })
    };

    rsx! {
        section { class: "page home",
            match load_state {
                ViewState::Error(err) => rsx! {
                    div { class: "notice notice-blocking", "{err.message()}" }
                },
                ViewState::Loading => rsx! {
                    p { class: "loading", "Loading questions..." }
                },
                ViewState::Idle | ViewState::Ready(_) => rsx! {},
            }

            h2 { "Choose a category" }
            div { class: "card-grid",
                for card in vm.categories {
                    CategoryCard { card, on_select: select_category }
                }
            }

            h2 { "Choose your character" }
            div { class: "card-grid",
                for card in vm.avatars {
                    AvatarCard { card, on_select: select_avatar }
                }
            }

            div { class: "start-row",
                input {
                    class: "name-input",
                    r#type: "text",
                    placeholder: "Type your name or nickname",
                    value: "{vm.player_name}",
                    oninput: move |evt| name_change.call(evt.value()),
                }
                p { class: "hint", "This name shows up in the header 🏆" }
                button {
                    class: "start",
                    disabled: !vm.can_start,
                    onclick: move |_| start.call(()),
                    "Start Phase 1"
                }
            }

            if let Some(message) = error() {
                p { class: "notice", "{message}" }
            }
        }
    }
}

#[component]
fn CategoryCard(card: CategoryCardVm, on_select: Callback<Category>) -> Element {
    let category = card.category;
    let class = if card.selected { "card selected" } else { "card" };
    rsx! {
        button {
            class: "{class}",
            onclick: move |_| on_select.call(category),
            div { class: "card-title", "{card.label}" }
            div { class: "card-caption", "{card.blurb}" }
        }
    }
}

#[component]
fn AvatarCard(card: AvatarCardVm, on_select: Callback<AvatarId>) -> Element {
    let id = card.id;
    let class = if card.selected { "card selected" } else { "card" };
    rsx! {
        button {
            class: "{class}",
            onclick: move |_| on_select.call(id),
            div { class: "card-emoji", "{card.emoji}" }
            div { class: "card-title", "{card.name}" }
            div { class: "card-caption", "{card.tagline}" }
        }
    }
}
