use async_trait::async_trait;
use quiz_core::model::Question;

use crate::json::decode_pool;
use crate::repository::{QuestionSource, StorageError};

/// Fetches the pool as a static JSON document over HTTP.
///
/// One GET per fetch. No retries and no timeout beyond the client defaults.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: reqwest::Client,
    url: String,
}

impl HttpSource {
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
        }
    }
}

#[async_trait]
impl QuestionSource for HttpSource {
    async fn fetch_pool(&self) -> Result<Vec<Question>, StorageError> {
        let response = self.client.get(&self.url).send().await?;
        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(StorageError::NotFound(self.url.clone()));
        }
        let body = response.error_for_status()?.text().await?;
        decode_pool(&body)
    }
}
