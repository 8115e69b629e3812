use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::{ContentItem, Creator, PerformanceSnapshot};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read data file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse data file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Read-only collaborator boundary the engine fetches through. Real
/// deployments back this with a database; the engine only ever reads.
#[async_trait]
pub trait ContentStore: Send + Sync {
    async fn creator_by_id(&self, creator_id: &str) -> Result<Option<Creator>, StoreError>;

    async fn content_by_id(&self, content_id: &str) -> Result<Option<ContentItem>, StoreError>;

    async fn content_by_creator(&self, creator_id: &str)
        -> Result<Vec<ContentItem>, StoreError>;

    async fn content_by_creator_between(
        &self,
        creator_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<ContentItem>, StoreError>;

    async fn performance_by_content(
        &self,
        content_id: &str,
    ) -> Result<Vec<PerformanceSnapshot>, StoreError>;
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Dataset {
    pub creators: Vec<Creator>,
    pub content: Vec<ContentItem>,
    pub performance: Vec<PerformanceSnapshot>,
}

/// JSON-file-backed store for the CLI, the demo server and tests.
pub struct JsonDataStore {
    dataset: Dataset,
}

impl JsonDataStore {
    pub async fn load(path: &Path) -> Result<Self, StoreError> {
        let dataset = if path.exists() {
            let data = tokio::fs::read_to_string(path).await?;
            if data.trim().is_empty() {
                Dataset::default()
            } else {
                serde_json::from_str(&data)?
            }
        } else {
            Dataset::default()
        };

        Ok(Self { dataset })
    }

    pub fn from_dataset(dataset: Dataset) -> Self {
        Self { dataset }
    }
}

#[async_trait]
impl ContentStore for JsonDataStore {
    async fn creator_by_id(&self, creator_id: &str) -> Result<Option<Creator>, StoreError> {
        Ok(self
            .dataset
            .creators
            .iter()
            .find(|creator| creator.id == creator_id)
            .cloned())
    }

    async fn content_by_id(&self, content_id: &str) -> Result<Option<ContentItem>, StoreError> {
        Ok(self
            .dataset
            .content
            .iter()
            .find(|item| item.id == content_id)
            .cloned())
    }

    async fn content_by_creator(
        &self,
        creator_id: &str,
    ) -> Result<Vec<ContentItem>, StoreError> {
        Ok(self
            .dataset
            .content
            .iter()
            .filter(|item| item.creator_id == creator_id)
            .cloned()
            .collect())
    }

    async fn content_by_creator_between(
        &self,
        creator_id: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<ContentItem>, StoreError> {
        Ok(self
            .dataset
            .content
            .iter()
            .filter(|item| item.creator_id == creator_id)
            .filter(|item| item.published_at >= start && item.published_at <= end)
            .cloned()
            .collect())
    }

    async fn performance_by_content(
        &self,
        content_id: &str,
    ) -> Result<Vec<PerformanceSnapshot>, StoreError> {
        Ok(self
            .dataset
            .performance
            .iter()
            .filter(|snapshot| snapshot.content_id == content_id)
            .cloned()
            .collect())
    }
}

/// Atomic dataset write: temp file then rename.
pub async fn save_dataset(path: &Path, dataset: &Dataset) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        if !parent.exists() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }
    let payload = serde_json::to_string_pretty(dataset)?;
    let tmp_path = path.with_extension("json.tmp");
    tokio::fs::write(&tmp_path, payload).await?;
    tokio::fs::rename(&tmp_path, path).await?;
    Ok(())
}

pub fn default_data_path() -> PathBuf {
    std::env::var("ANALYTICS_DATA_PATH")
        .ok()
        .filter(|value| !value.trim().is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("data/analytics.json"))
}
