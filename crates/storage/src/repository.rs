use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use quiz_core::model::Question;
use thiserror::Error;

use crate::http::HttpSource;
use crate::json::JsonFileSource;

/// Errors surfaced while fetching or decoding a question pool.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("question pool not found: {0}")]
    NotFound(String),

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Where a session's question pool comes from.
///
/// Fetched once at session start and again on every restart.
#[async_trait]
pub trait QuestionSource: Send + Sync {
    /// Fetch the full pool, unshuffled.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the pool cannot be read or is not a JSON array.
    async fn fetch_pool(&self) -> Result<Vec<Question>, StorageError>;
}

/// Simple in-memory source for tests and prototyping.
#[derive(Clone, Default)]
pub struct InMemorySource {
    pool: Arc<Mutex<Vec<Question>>>,
}

impl InMemorySource {
    #[must_use]
    pub fn new(pool: Vec<Question>) -> Self {
        Self {
            pool: Arc::new(Mutex::new(pool)),
        }
    }

    /// Swap the pool served by subsequent fetches.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the lock is poisoned.
    pub fn replace(&self, pool: Vec<Question>) -> Result<(), StorageError> {
        let mut guard = self
            .pool
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        *guard = pool;
        Ok(())
    }
}

#[async_trait]
impl QuestionSource for InMemorySource {
    async fn fetch_pool(&self) -> Result<Vec<Question>, StorageError> {
        let guard = self
            .pool
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.clone())
    }
}

/// Bundles the configured question source behind a trait object for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub questions: Arc<dyn QuestionSource>,
}

impl Storage {
    #[must_use]
    pub fn in_memory(pool: Vec<Question>) -> Self {
        Self {
            questions: Arc::new(InMemorySource::new(pool)),
        }
    }

    /// Pick a source from a location string: `http(s)://` URLs are fetched over HTTP,
    /// anything else is read as a local JSON file.
    #[must_use]
    pub fn from_location(location: &str) -> Self {
        let questions: Arc<dyn QuestionSource> =
            if location.starts_with("http://") || location.starts_with("https://") {
                Arc::new(HttpSource::new(location))
            } else {
                Arc::new(JsonFileSource::new(location))
            };
        Self { questions }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::QuestionId;

    fn fill(id: u64) -> Question {
        Question::fill_in_blank(QuestionId::new(id), format!("Q{id}"), vec!["a".into()]).unwrap()
    }

    #[tokio::test]
    async fn in_memory_source_serves_replaced_pool() {
        let source = InMemorySource::new(vec![fill(1)]);
        assert_eq!(source.fetch_pool().await.unwrap().len(), 1);

        source.replace(vec![fill(1), fill(2), fill(3)]).unwrap();
        let pool = source.fetch_pool().await.unwrap();
        assert_eq!(pool.len(), 3);
        assert_eq!(pool[2].id(), QuestionId::new(3));
    }
}
