use async_trait::async_trait;
use quiz_core::model::Category;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by question sources.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SourceError {
    #[error("dataset not found: {0}")]
    NotFound(String),

    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("request to {url} failed with status {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error("source unavailable: {0}")]
    Unavailable(String),
}

/// Where raw dataset text comes from, one document per category.
#[async_trait]
pub trait QuestionSource: Send + Sync {
    /// Fetch the raw tabular text for `category`.
    ///
    /// # Errors
    ///
    /// Returns `SourceError` when the dataset cannot be retrieved.
    async fn fetch(&self, category: Category) -> Result<String, SourceError>;

    /// Human-readable location of the dataset, for logs and reports.
    fn describe(&self, category: Category) -> String;
}

/// Fixed in-memory datasets for tests and prototyping.
#[derive(Clone, Default)]
pub struct InMemorySource {
    texts: Arc<Mutex<HashMap<Category, String>>>,
}

impl InMemorySource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`InMemorySource::set`].
    #[must_use]
    pub fn with(self, category: Category, text: impl Into<String>) -> Self {
        // A fresh source cannot be poisoned.
        let _ = self.set(category, text);
        self
    }

    /// Replace the dataset served for `category`.
    ///
    /// # Errors
    ///
    /// Returns `SourceError::Unavailable` if the inner lock is poisoned.
    pub fn set(&self, category: Category, text: impl Into<String>) -> Result<(), SourceError> {
        let mut guard = self
            .texts
            .lock()
            .map_err(|e| SourceError::Unavailable(e.to_string()))?;
        guard.insert(category, text.into());
        Ok(())
    }

    /// Stop serving `category`, so fetching it fails.
    ///
    /// # Errors
    ///
    /// Returns `SourceError::Unavailable` if the inner lock is poisoned.
    pub fn remove(&self, category: Category) -> Result<(), SourceError> {
        let mut guard = self
            .texts
            .lock()
            .map_err(|e| SourceError::Unavailable(e.to_string()))?;
        guard.remove(&category);
        Ok(())
    }
}

#[async_trait]
impl QuestionSource for InMemorySource {
    async fn fetch(&self, category: Category) -> Result<String, SourceError> {
        let guard = self
            .texts
            .lock()
            .map_err(|e| SourceError::Unavailable(e.to_string()))?;
        guard
            .get(&category)
            .cloned()
            .ok_or_else(|| SourceError::NotFound(self.describe(category)))
    }

    fn describe(&self, category: Category) -> String {
        format!("memory:{}", category.dataset_file())
    }
}
