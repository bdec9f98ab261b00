use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::error::HistoryError;
use crate::generation::generation_types::{GenerationRequest, GenerationResult, Platform};

pub const MAX_HISTORY_ENTRIES: usize = 20;
const TOPIC_MAX_CHARS: usize = 120;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub topic: String,
    pub tone: String,
    pub platform: Platform,
    pub posts: Vec<String>,
}

impl HistoryEntry {
    pub fn from_generation(request: &GenerationRequest, result: &GenerationResult) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            created_at: Utc::now(),
            topic: Self::topic_for(request, result),
            tone: request.tone.label().to_string(),
            platform: request.platform,
            posts: result.posts.clone(),
        }
    }

    fn topic_for(request: &GenerationRequest, result: &GenerationResult) -> String {
        let subject = match &result.title {
            Some(title) => title.clone(),
            None => {
                let content = request.content.trim();
                if content.chars().count() > TOPIC_MAX_CHARS {
                    let truncated: String = content.chars().take(TOPIC_MAX_CHARS).collect();
                    format!("{}…", truncated)
                } else {
                    content.to_string()
                }
            }
        };

        format!("{}{}", request.platform.topic_label(), subject)
    }
}

#[async_trait]
pub trait HistoryStore: Send + Sync {
    async fn append(&self, entry: HistoryEntry) -> Result<(), HistoryError>;

    /// Newest first.
    async fn recent(&self, limit: usize) -> Result<Vec<HistoryEntry>, HistoryError>;

    async fn clear(&self) -> Result<(), HistoryError>;
}

#[derive(Default)]
pub struct MemoryHistoryStore {
    entries: Mutex<Vec<HistoryEntry>>,
}

impl MemoryHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl HistoryStore for MemoryHistoryStore {
    async fn append(&self, entry: HistoryEntry) -> Result<(), HistoryError> {
        let mut entries = self.entries.lock().await;
        entries.insert(0, entry);
        entries.truncate(MAX_HISTORY_ENTRIES);
        Ok(())
    }

    async fn recent(&self, limit: usize) -> Result<Vec<HistoryEntry>, HistoryError> {
        let entries = self.entries.lock().await;
        Ok(entries.iter().take(limit).cloned().collect())
    }

    async fn clear(&self) -> Result<(), HistoryError> {
        self.entries.lock().await.clear();
        Ok(())
    }
}
