use std::sync::Arc;

use services::{AppServices, QuizController};

pub trait UiApp: Send + Sync {
    fn services(&self) -> Arc<AppServices>;
}

#[derive(Clone)]
pub struct AppContext {
    services: Arc<AppServices>,
    quiz: Arc<QuizController>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        let services = app.services();
        let quiz = services.quiz();
        Self { services, quiz }
    }

    #[must_use]
    pub fn services(&self) -> Arc<AppServices> {
        Arc::clone(&self.services)
    }

    #[must_use]
    pub fn quiz(&self) -> Arc<QuizController> {
        Arc::clone(&self.quiz)
    }
}

// Provided by the composition root in `crates/app`.

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
