//! JSON file backed history.
//!
//! The file holds a versioned envelope so older builds can recognise data
//! written by newer ones. Such a file reads as empty and is never overwritten
//! by an append.

use super::{push_front_bounded, HistoryError, HistoryResult, HistoryStore};
use crate::types::GameResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

/// Schema version for the history file
/// Version 1: initial envelope with entries most recent first
pub const HISTORY_SCHEMA_VERSION: u32 = 1;

/// On-disk layout of the history file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryFile {
    pub schema_version: u32,
    /// Last write timestamp (ISO8601)
    pub saved_at: String,
    pub entries: Vec<GameResult>,
}

impl HistoryFile {
    pub fn new(entries: Vec<GameResult>) -> Self {
        Self {
            schema_version: HISTORY_SCHEMA_VERSION,
            saved_at: chrono::Utc::now().to_rfc3339(),
            entries,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.schema_version > HISTORY_SCHEMA_VERSION {
            return Err(format!(
                "History schema version {} is newer than supported version {}",
                self.schema_version, HISTORY_SCHEMA_VERSION
            ));
        }
        Ok(())
    }
}

/// Outcome of reading the history file
enum Loaded {
    Entries(Vec<GameResult>),
    /// Read error or corrupt data; replaced by the next append
    Unreadable,
    /// Written by a newer build; left untouched
    NewerSchema(u32),
}

impl Loaded {
    fn into_entries(self) -> Vec<GameResult> {
        match self {
            Loaded::Entries(entries) => entries,
            Loaded::Unreadable | Loaded::NewerSchema(_) => Vec::new(),
        }
    }
}

pub struct JsonFileHistoryStore {
    path: PathBuf,
    limit: usize,
    /// Serializes read-modify-write cycles within this process
    write_lock: Mutex<()>,
}

impl JsonFileHistoryStore {
    pub fn new(path: impl Into<PathBuf>, limit: usize) -> Self {
        Self {
            path: path.into(),
            limit,
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Loaded {
        let data = match tokio::fs::read_to_string(&self.path).await {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Loaded::Entries(Vec::new())
            }
            Err(e) => {
                tracing::warn!("Failed to read history {}: {}", self.path.display(), e);
                return Loaded::Unreadable;
            }
        };

        let file: HistoryFile = match serde_json::from_str(&data) {
            Ok(file) => file,
            Err(e) => {
                tracing::warn!(
                    "History file {} is corrupt, treating as empty: {}",
                    self.path.display(),
                    e
                );
                return Loaded::Unreadable;
            }
        };

        if let Err(e) = file.validate() {
            tracing::warn!("Ignoring history file {}: {}", self.path.display(), e);
            return Loaded::NewerSchema(file.schema_version);
        }

        Loaded::Entries(file.entries)
    }

    async fn save(&self, entries: Vec<GameResult>) -> HistoryResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_string_pretty(&HistoryFile::new(entries))?;

        // Write next to the target and rename so a crash never leaves half a file
        let tmp = self.path.with_extension("tmp");
        tokio::fs::write(&tmp, json).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl HistoryStore for JsonFileHistoryStore {
    async fn append(&self, result: GameResult) -> HistoryResult<()> {
        let _guard = self.write_lock.lock().await;
        let mut entries = match self.load().await {
            Loaded::NewerSchema(version) => return Err(HistoryError::NewerSchema(version)),
            loaded => loaded.into_entries(),
        };
        push_front_bounded(&mut entries, result, self.limit);
        let count = entries.len();
        self.save(entries).await?;

        tracing::debug!("History now holds {} games", count);
        Ok(())
    }

    async fn read_all(&self) -> Vec<GameResult> {
        self.load().await.into_entries()
    }

    async fn clear(&self) -> HistoryResult<()> {
        let _guard = self.write_lock.lock().await;
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::sample_result;

    fn store_in(dir: &tempfile::TempDir) -> JsonFileHistoryStore {
        JsonFileHistoryStore::new(dir.path().join("history.json"), 100)
    }

    #[tokio::test]
    async fn test_missing_file_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        assert!(store.read_all().await.is_empty());
    }

    #[tokio::test]
    async fn test_append_and_read_back() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        store.append(sample_result("one", false)).await.unwrap();
        store.append(sample_result("two", true)).await.unwrap();

        // A second handle on the same file sees the same data
        let reopened = store_in(&dir);
        let all = reopened.read_all().await;
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].word, "two");
        assert_eq!(all[1].word, "one");
    }

    #[tokio::test]
    async fn test_capacity_bound() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileHistoryStore::new(dir.path().join("history.json"), 3);

        for i in 0..5 {
            store
                .append(sample_result(&format!("w{}", i), false))
                .await
                .unwrap();
        }

        let words: Vec<_> = store.read_all().await.into_iter().map(|r| r.word).collect();
        assert_eq!(words, vec!["w4", "w3", "w2"]);
    }

    #[tokio::test]
    async fn test_corrupt_file_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        tokio::fs::write(store.path(), "{ not valid json").await.unwrap();

        assert!(store.read_all().await.is_empty());

        // Appending over corrupt data starts a fresh history
        store.append(sample_result("fresh", false)).await.unwrap();
        assert_eq!(store.read_all().await.len(), 1);
    }

    #[tokio::test]
    async fn test_newer_schema_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        let mut file = HistoryFile::new(vec![sample_result("future", true)]);
        file.schema_version = HISTORY_SCHEMA_VERSION + 1;
        tokio::fs::write(store.path(), serde_json::to_string(&file).unwrap())
            .await
            .unwrap();

        assert!(store.read_all().await.is_empty());
    }

    #[tokio::test]
    async fn test_append_keeps_newer_schema_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        let mut file = HistoryFile::new(vec![
            sample_result("future1", true),
            sample_result("future2", false),
        ]);
        file.schema_version = HISTORY_SCHEMA_VERSION + 1;
        let written = serde_json::to_string(&file).unwrap();
        tokio::fs::write(store.path(), &written).await.unwrap();

        let result = store.append(sample_result("now", false)).await;
        assert!(matches!(
            result,
            Err(HistoryError::NewerSchema(v)) if v == HISTORY_SCHEMA_VERSION + 1
        ));

        let on_disk = tokio::fs::read_to_string(store.path()).await.unwrap();
        assert_eq!(on_disk, written);
    }

    #[tokio::test]
    async fn test_clear_removes_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        store.append(sample_result("one", false)).await.unwrap();
        store.clear().await.unwrap();
        assert!(!store.path().exists());
        assert!(store.read_all().await.is_empty());

        // Clearing an already empty history is fine
        store.clear().await.unwrap();
    }

    #[tokio::test]
    async fn test_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileHistoryStore::new(dir.path().join("nested/deeper/history.json"), 100);

        store.append(sample_result("one", false)).await.unwrap();
        assert_eq!(store.read_all().await.len(), 1);
    }
}
