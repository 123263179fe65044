use async_trait::async_trait;
use quiz_core::model::Category;
use std::path::{Path, PathBuf};

use crate::repository::{QuestionSource, SourceError};

/// Reads `<data_dir>/<dataset file>` from the local file system.
#[derive(Debug, Clone)]
pub struct FsSource {
    data_dir: PathBuf,
}

impl FsSource {
    #[must_use]
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    #[must_use]
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    #[must_use]
    pub fn path_for(&self, category: Category) -> PathBuf {
        self.data_dir.join(category.dataset_file())
    }
}

#[async_trait]
impl QuestionSource for FsSource {
    async fn fetch(&self, category: Category) -> Result<String, SourceError> {
        let path = self.path_for(category);
        match tokio::fs::read_to_string(&path).await {
            Ok(text) => Ok(text),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                Err(SourceError::NotFound(path.display().to_string()))
            }
            Err(source) => Err(SourceError::Io {
                path: path.display().to_string(),
                source,
            }),
        }
    }

    fn describe(&self, category: Category) -> String {
        self.path_for(category).display().to_string()
    }
}
