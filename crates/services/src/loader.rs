use std::sync::Arc;

use quiz_core::feedback::{FeedbackPicker, FeedbackPools};
use quiz_core::model::{Category, IssueReport, Question, QuestionBank};
use quiz_core::normalize::{Normalized, normalize};
use quiz_core::tabular::parse_tabular;
use storage::QuestionSource;
use tracing::{info, warn};

use crate::error::LoadError;
use crate::picker::RngPicker;

/// Questions and issues read from one category's dataset.
struct LoadedPool {
    category: Category,
    questions: Vec<Question>,
    issues: Vec<IssueReport>,
}

/// Fetches and normalizes both category datasets.
#[derive(Clone)]
pub struct DatasetLoader {
    source: Arc<dyn QuestionSource>,
    pools: FeedbackPools,
    seed: Option<u64>,
}

impl DatasetLoader {
    #[must_use]
    pub fn new(source: Arc<dyn QuestionSource>) -> Self {
        Self {
            source,
            pools: FeedbackPools::default(),
            seed: None,
        }
    }

    /// Fix the fallback-feedback generator so repeated loads pick the same lines.
    #[must_use]
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    #[must_use]
    pub fn with_pools(mut self, pools: FeedbackPools) -> Self {
        self.pools = pools;
        self
    }

    #[must_use]
    pub fn source(&self) -> &Arc<dyn QuestionSource> {
        &self.source
    }

    /// Load every category concurrently.
    ///
    /// Either all categories load or none does.
    ///
    /// # Errors
    ///
    /// Returns `LoadError::Failed` naming the first category that failed.
    pub async fn load_all(&self) -> Result<QuestionBank, LoadError> {
        let (ifes, enem) = tokio::try_join!(
            self.load_category(Category::Ifes),
            self.load_category(Category::Enem),
        )?;

        let mut bank = QuestionBank::new();
        for loaded in [ifes, enem] {
            bank.insert_pool(loaded.category, loaded.questions);
            bank.extend_issues(loaded.issues);
        }
        info!(
            questions = bank.total_questions(),
            issues = bank.issues().len(),
            "question bank ready"
        );
        Ok(bank)
    }

    async fn load_category(&self, category: Category) -> Result<LoadedPool, LoadError> {
        let location = self.source.describe(category);
        let text = self
            .source
            .fetch(category)
            .await
            .map_err(|source| LoadError::Failed {
                category,
                location: location.clone(),
                source,
            })?;

        let rows = parse_tabular(&text);
        let mut picker = self.picker_for(category);
        let mut questions = Vec::with_capacity(rows.len());
        let mut issues = Vec::new();

        for (idx, row) in rows.iter().enumerate() {
            let Normalized {
                question,
                issues: found,
            } = normalize(row, &self.pools, &mut *picker);
            for issue in found {
                warn!(
                    %category,
                    row = idx + 1,
                    id = %question.id,
                    %issue,
                    "malformed record"
                );
                issues.push(IssueReport {
                    category,
                    row: idx + 1,
                    question_id: question.id.clone(),
                    issue,
                });
            }
            questions.push(question);
        }

        info!(%category, %location, questions = questions.len(), "dataset loaded");
        Ok(LoadedPool {
            category,
            questions,
            issues,
        })
    }

    fn picker_for(&self, category: Category) -> Box<dyn FeedbackPicker + Send> {
        match self.seed {
            // Each category gets its own stream so load order does not matter.
            Some(seed) => Box::new(RngPicker::seeded(seed ^ category_salt(category))),
            None => Box::new(RngPicker::from_entropy()),
        }
    }
}

fn category_salt(category: Category) -> u64 {
    match category {
        Category::Ifes => 0x1F35,
        Category::Enem => 0xE9E3,
    }
}
