//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::model::Category;
use quiz_core::quiz::QuizError;
use storage::SourceError;

/// Emitted when a dataset cannot be loaded. Nothing is installed when this
/// happens.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LoadError {
    #[error("could not load {category} questions from {location}: {source}")]
    Failed {
        category: Category,
        location: String,
        #[source]
        source: SourceError,
    },
}

impl LoadError {
    #[must_use]
    pub fn category(&self) -> Category {
        match self {
            LoadError::Failed { category, .. } => *category,
        }
    }
}

/// Errors emitted by `QuizController`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizServiceError {
    #[error("questions are not loaded yet")]
    NotLoaded,
    #[error("quiz state is unavailable: {0}")]
    Poisoned(String),
    #[error(transparent)]
    Quiz(#[from] QuizError),
}
