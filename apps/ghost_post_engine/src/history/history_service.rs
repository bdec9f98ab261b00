use std::sync::Arc;

use super::history_store::{HistoryEntry, HistoryStore, MAX_HISTORY_ENTRIES};
use crate::error::HistoryError;

#[derive(Clone)]
pub struct HistoryService {
    store: Option<Arc<dyn HistoryStore>>,
}

impl HistoryService {
    pub fn new(store: Arc<dyn HistoryStore>) -> Self {
        Self { store: Some(store) }
    }

    pub fn disabled() -> Self {
        Self { store: None }
    }

    /// Fire-and-forget append. Failures are logged and never reach the caller.
    pub fn record(&self, entry: HistoryEntry) -> Option<tokio::task::JoinHandle<()>> {
        let store = Arc::clone(self.store.as_ref()?);

        Some(tokio::spawn(async move {
            let id = entry.id.clone();
            match store.append(entry).await {
                Ok(()) => tracing::debug!(entry_id = %id, "Saved generation to history"),
                Err(e) => tracing::warn!(entry_id = %id, "Failed to save generation to history: {}", e),
            }
        }))
    }

    pub async fn recent(&self, limit: usize) -> Result<Vec<HistoryEntry>, HistoryError> {
        match &self.store {
            Some(store) => store.recent(limit.clamp(1, MAX_HISTORY_ENTRIES)).await,
            None => Ok(Vec::new()),
        }
    }

    pub async fn clear(&self) -> Result<(), HistoryError> {
        match &self.store {
            Some(store) => store.clear().await,
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::generation::generation_types::{
        GenerationRequest, GenerationResult, Platform, Tone,
    };
    use crate::history::history_store::MemoryHistoryStore;

    struct BrokenStore;

    #[async_trait]
    impl HistoryStore for BrokenStore {
        async fn append(&self, _entry: HistoryEntry) -> Result<(), HistoryError> {
            Err(std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only").into())
        }

        async fn recent(&self, _limit: usize) -> Result<Vec<HistoryEntry>, HistoryError> {
            Ok(Vec::new())
        }

        async fn clear(&self) -> Result<(), HistoryError> {
            Ok(())
        }
    }

    fn entry() -> HistoryEntry {
        HistoryEntry::from_generation(
            &GenerationRequest {
                content: "notes".to_string(),
                tone: Tone::Crazy,
                platform: Platform::Twitter,
            },
            &GenerationResult {
                title: Some("Notes".to_string()),
                posts: vec!["a".to_string()],
            },
        )
    }

    #[tokio::test]
    async fn record_appends_in_background() {
        let store = Arc::new(MemoryHistoryStore::new());
        let service = HistoryService::new(store.clone());

        service.record(entry()).unwrap().await.unwrap();

        assert_eq!(store.recent(5).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn record_swallows_store_failures() {
        let service = HistoryService::new(Arc::new(BrokenStore));
        let handle = service.record(entry()).unwrap();
        assert!(handle.await.is_ok());
    }

    #[tokio::test]
    async fn disabled_service_is_a_no_op() {
        let service = HistoryService::disabled();
        assert!(service.record(entry()).is_none());
        assert!(service.recent(5).await.unwrap().is_empty());
        service.clear().await.unwrap();
    }
}
