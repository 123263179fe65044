use std::sync::Arc;
use std::time::Duration;

use quiz_core::model::QuestionBank;
use quiz_core::quiz::FEEDBACK_DELAY_MS;
use storage::QuestionSource;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::error;

use crate::error::LoadError;
use crate::loader::DatasetLoader;
use crate::quiz_controller::QuizController;
use crate::Clock;

/// Tunables shared by the app and tests.
#[derive(Debug, Clone, Copy)]
pub struct QuizOptions {
    pub clock: Clock,
    pub feedback_delay: Duration,
    pub seed: Option<u64>,
}

impl Default for QuizOptions {
    fn default() -> Self {
        Self {
            clock: Clock::default_clock(),
            feedback_delay: Duration::from_millis(FEEDBACK_DELAY_MS),
            seed: None,
        }
    }
}

/// Assembles app-facing services around one question source.
#[derive(Clone)]
pub struct AppServices {
    loader: Arc<DatasetLoader>,
    quiz: Arc<QuizController>,
    runtime: Handle,
}

impl AppServices {
    #[must_use]
    pub fn new(source: Arc<dyn QuestionSource>, options: QuizOptions, runtime: Handle) -> Self {
        let loader = DatasetLoader::new(source).with_seed(options.seed);
        let quiz = QuizController::new(options.clock, options.feedback_delay, runtime.clone());
        Self {
            loader: Arc::new(loader),
            quiz: Arc::new(quiz),
            runtime,
        }
    }

    #[must_use]
    pub fn loader(&self) -> Arc<DatasetLoader> {
        Arc::clone(&self.loader)
    }

    #[must_use]
    pub fn quiz(&self) -> Arc<QuizController> {
        Arc::clone(&self.quiz)
    }

    /// Load both datasets and install them for play.
    ///
    /// On failure nothing is installed and a previously installed bank stays.
    ///
    /// # Errors
    ///
    /// Returns `LoadError` when either dataset cannot be loaded.
    pub async fn load_questions(&self) -> Result<Arc<QuestionBank>, LoadError> {
        load_and_install(&self.loader, &self.quiz).await
    }

    /// Run [`AppServices::load_questions`] on the services runtime.
    ///
    /// For callers driven by another executor, such as the UI.
    #[must_use]
    pub fn spawn_load(&self) -> JoinHandle<Result<Arc<QuestionBank>, LoadError>> {
        let loader = Arc::clone(&self.loader);
        let quiz = Arc::clone(&self.quiz);
        self.runtime
            .spawn(async move { load_and_install(&loader, &quiz).await })
    }
}

async fn load_and_install(
    loader: &DatasetLoader,
    quiz: &QuizController,
) -> Result<Arc<QuestionBank>, LoadError> {
    match loader.load_all().await {
        Ok(bank) => Ok(quiz.install_bank(bank)),
        Err(err) => {
            error!(%err, "question load failed");
            Err(err)
        }
    }
}
