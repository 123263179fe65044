#![forbid(unsafe_code)]

pub mod repository;
pub mod sources;

pub use repository::{InMemorySource, QuestionSource, SourceError};
pub use sources::{FsSource, HttpSource};
