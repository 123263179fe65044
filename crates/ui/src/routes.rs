use dioxus::prelude::*;
use dioxus_router::{Outlet, Routable};
use quiz_core::quiz::QuizSnapshot;

use crate::context::AppContext;
use crate::views::{HomeView, PlayView, use_snapshot_provider};
use crate::vm::map_header;

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", HomeView)] Home {},
        #[route("/play", PlayView)] Play {},
}

#[component]
fn Layout() -> Element {
    let ctx = use_context::<AppContext>();
    let snapshot = use_snapshot_provider(ctx.quiz());

    rsx! {
        div { class: "app",
            Header { snapshot }
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}

#[component]
fn Header(snapshot: Signal<QuizSnapshot>) -> Element {
    let vm = map_header(&snapshot.read());

    rsx! {
        header { class: "topbar",
            h1 { "Knowledge Trail" }
            div { class: "chips",
                if let Some(category) = vm.category {
                    span { class: "chip", "{category}" }
                }
                if let Some(avatar) = vm.avatar {
                    span { class: "chip", "{avatar}" }
                }
                if let Some(name) = vm.player_name {
                    span { class: "chip", "{name}" }
                }
                span { class: "chip", "Score: {vm.score}" }
            }
        }
    }
}
