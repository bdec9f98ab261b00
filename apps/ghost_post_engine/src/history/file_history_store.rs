use std::{
    io::Write,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::history_store::{HistoryEntry, HistoryStore, MAX_HISTORY_ENTRIES};
use crate::error::HistoryError;

/// History kept in a single JSON file, newest entry first.
pub struct FileHistoryStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileHistoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<Vec<HistoryEntry>, HistoryError> {
        let raw = match tokio::fs::read(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_slice(&raw) {
            Ok(entries) => Ok(entries),
            Err(e) => {
                let backup = self.backup_path();
                match tokio::fs::rename(&self.path, &backup).await {
                    Ok(()) => tracing::warn!(
                        "Unreadable history file {} moved to {}: {}",
                        self.path.display(),
                        backup.display(),
                        e
                    ),
                    Err(rename_err) => tracing::warn!(
                        "Unreadable history file {} could not be moved aside ({}): {}",
                        self.path.display(),
                        rename_err,
                        e
                    ),
                }
                Ok(Vec::new())
            }
        }
    }

    pub fn backup_path(&self) -> PathBuf {
        self.path.with_extension("json.bak")
    }

    async fn save(&self, entries: &[HistoryEntry]) -> Result<(), HistoryError> {
        let data = serde_json::to_vec_pretty(entries)?;
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || write_atomically(&path, &data))
            .await
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))??;
        Ok(())
    }
}

/// Writes to a uniquely named sibling temp file, then renames it over `path`.
fn write_atomically(path: &Path, data: &[u8]) -> std::io::Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)?;

    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(data)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path)?;
    Ok(())
}

#[async_trait]
impl HistoryStore for FileHistoryStore {
    async fn append(&self, entry: HistoryEntry) -> Result<(), HistoryError> {
        let _guard = self.lock.lock().await;
        let mut entries = self.load().await?;
        entries.insert(0, entry);
        entries.truncate(MAX_HISTORY_ENTRIES);
        self.save(&entries).await
    }

    async fn recent(&self, limit: usize) -> Result<Vec<HistoryEntry>, HistoryError> {
        let _guard = self.lock.lock().await;
        let mut entries = self.load().await?;
        entries.truncate(limit);
        Ok(entries)
    }

    async fn clear(&self) -> Result<(), HistoryError> {
        let _guard = self.lock.lock().await;
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
