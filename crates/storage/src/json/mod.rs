use std::path::{Path, PathBuf};

use async_trait::async_trait;
use quiz_core::model::{Question, QuestionId};

use crate::repository::{QuestionSource, StorageError};

mod mapping;

/// Decode a pool document: a JSON array of question records.
///
/// Records are decoded one at a time. Unknown variants and invalid records are logged
/// and dropped; ids follow the record position so they stay stable across fetches.
///
/// # Errors
///
/// Returns `StorageError::Serialization` if the document is not a JSON array.
pub fn decode_pool(json: &str) -> Result<Vec<Question>, StorageError> {
    let values: Vec<serde_json::Value> =
        serde_json::from_str(json).map_err(|e| StorageError::Serialization(e.to_string()))?;

    let mut pool = Vec::with_capacity(values.len());
    for (position, value) in values.into_iter().enumerate() {
        let id = QuestionId::new(u64::try_from(position).unwrap_or(u64::MAX));
        match mapping::decode_record(id, value) {
            Ok(question) => pool.push(question),
            Err(err) => {
                tracing::error!(position, error = %err, "dropping question record");
            }
        }
    }
    tracing::debug!(questions = pool.len(), "decoded question pool");
    Ok(pool)
}

/// Reads the pool from a local `questions.json` file.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    #[must_use]
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

#[async_trait]
impl QuestionSource for JsonFileSource {
    async fn fetch_pool(&self) -> Result<Vec<Question>, StorageError> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Err(StorageError::NotFound(self.path.display().to_string()));
            }
            Err(err) => return Err(err.into()),
        };
        decode_pool(&raw)
    }
}
