use async_trait::async_trait;
use quiz_core::model::Category;
use reqwest::header::CACHE_CONTROL;

use crate::repository::{QuestionSource, SourceError};

/// Fetches `<base_url>/<dataset file>` from a static file server.
///
/// Requests are sent with `Cache-Control: no-store`.
#[derive(Debug, Clone)]
pub struct HttpSource {
    base_url: String,
    client: reqwest::Client,
}

impl HttpSource {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, reqwest::Client::new())
    }

    #[must_use]
    pub fn with_client(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, client }
    }

    #[must_use]
    pub fn url_for(&self, category: Category) -> String {
        format!("{}/{}", self.base_url, category.dataset_file())
    }
}

#[async_trait]
impl QuestionSource for HttpSource {
    async fn fetch(&self, category: Category) -> Result<String, SourceError> {
        let url = self.url_for(category);
        let response = self
            .client
            .get(&url)
            .header(CACHE_CONTROL, "no-store")
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(SourceError::NotFound(url));
        }
        if !status.is_success() {
            return Err(SourceError::HttpStatus { url, status });
        }

        Ok(response.text().await?)
    }

    fn describe(&self, category: Category) -> String {
        self.url_for(category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_joins_without_double_slash() {
        let source = HttpSource::new("http://localhost:5173/data/");
        assert_eq!(
            source.url_for(Category::Enem),
            "http://localhost:5173/data/enem_2022_2024_simplificado.csv"
        );
    }
}
