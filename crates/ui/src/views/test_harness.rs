use std::sync::Arc;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use quiz_core::model::Category;
use quiz_core::normalize::columns;
use quiz_core::tabular::write_tabular;
use quiz_core::time::fixed_clock;
use services::{AppServices, QuizOptions};
use storage::InMemorySource;
use tokio::runtime::Handle;

use crate::context::{UiApp, build_app_context};
use crate::views::{HomeView, PlayView, use_snapshot_provider};

#[derive(Clone)]
struct TestApp {
    services: Arc<AppServices>,
}

impl UiApp for TestApp {
    fn services(&self) -> Arc<AppServices> {
        Arc::clone(&self.services)
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Home,
    Play,
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for ViewHarnessProps {}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    let ctx = use_context_provider(|| build_app_context(&app));
    use_snapshot_provider(ctx.quiz());
    use_context_provider(|| props.view);
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    let view = use_context::<ViewKind>();
    match view {
        ViewKind::Home => rsx! { HomeView {} },
        ViewKind::Play => rsx! { PlayView {} },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

/// Dataset text with `count` two-option questions for `mode`.
pub fn dataset(mode: &str, count: usize) -> String {
    let rows: Vec<Vec<String>> = (1..=count)
        .map(|n| {
            vec![
                mode.to_string(),
                format!("{mode}-{n}"),
                "2023".into(),
                "Biology".into(),
                "easy".into(),
                format!("Sample stem {n}"),
                "Cell".into(),
                "Rock".into(),
                String::new(),
                String::new(),
                "A".into(),
                "Well done".into(),
                "Not quite".into(),
            ]
        })
        .collect();
    write_tabular(&columns::ALL, &rows)
}

pub fn full_source() -> InMemorySource {
    InMemorySource::new()
        .with(Category::Ifes, dataset("ifes", 3))
        .with(Category::Enem, dataset("enem", 2))
}

pub fn services_for(source: InMemorySource) -> Arc<AppServices> {
    let options = QuizOptions {
        clock: fixed_clock(),
        seed: Some(3),
        ..QuizOptions::default()
    };
    Arc::new(AppServices::new(
        Arc::new(source),
        options,
        Handle::current(),
    ))
}

pub fn mount(view: ViewKind, services: Arc<AppServices>) -> ViewHarness {
    let app = Arc::new(TestApp { services });
    let dom = VirtualDom::new_with_props(ViewRouterHarness, ViewHarnessProps { app, view });
    ViewHarness { dom }
}
