use std::collections::BTreeMap;
use std::sync::Arc;

use crate::model::category::Category;
use crate::model::ids::QuestionId;
use crate::model::question::Question;
use crate::normalize::RecordIssue;

/// Ordered questions of one category, shared between sessions.
pub type Pool = Arc<[Question]>;

/// Where a [`RecordIssue`] was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueReport {
    pub category: Category,
    /// 1-based position among the data rows (header excluded).
    pub row: usize,
    pub question_id: QuestionId,
    pub issue: RecordIssue,
}

/// Every loaded pool, keyed by category.
///
/// Built in one piece by the loader; a bank missing a category is never
/// handed out as "ready".
#[derive(Debug, Clone, Default)]
pub struct QuestionBank {
    pools: BTreeMap<Category, Pool>,
    issues: Vec<IssueReport>,
}

impl QuestionBank {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the pool for `category`, replacing any previous one.
    pub fn insert_pool(&mut self, category: Category, questions: Vec<Question>) {
        self.pools.insert(category, questions.into());
    }

    pub fn extend_issues(&mut self, issues: impl IntoIterator<Item = IssueReport>) {
        self.issues.extend(issues);
    }

    #[must_use]
    pub fn pool(&self, category: Category) -> Option<Pool> {
        self.pools.get(&category).map(Arc::clone)
    }

    #[must_use]
    pub fn len(&self, category: Category) -> usize {
        self.pools.get(&category).map_or(0, |pool| pool.len())
    }

    #[must_use]
    pub fn has_category(&self, category: Category) -> bool {
        self.pools.contains_key(&category)
    }

    /// True when every known category has a pool installed.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        Category::ALL.iter().all(|c| self.has_category(*c))
    }

    #[must_use]
    pub fn total_questions(&self) -> usize {
        self.pools.values().map(|pool| pool.len()).sum()
    }

    #[must_use]
    pub fn issues(&self) -> &[IssueReport] {
        &self.issues
    }

    pub fn issues_for(&self, category: Category) -> impl Iterator<Item = &IssueReport> {
        self.issues.iter().filter(move |report| report.category == category)
    }
}
