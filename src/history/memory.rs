use super::{push_front_bounded, HistoryResult, HistoryStore, DEFAULT_HISTORY_LIMIT};
use crate::types::GameResult;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

/// History kept for the lifetime of the process only
#[derive(Debug, Clone)]
pub struct InMemoryHistoryStore {
    entries: Arc<RwLock<Vec<GameResult>>>,
    limit: usize,
}

impl InMemoryHistoryStore {
    pub fn new(limit: usize) -> Self {
        Self {
            entries: Arc::new(RwLock::new(Vec::new())),
            limit,
        }
    }
}

impl Default for InMemoryHistoryStore {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_LIMIT)
    }
}

#[async_trait]
impl HistoryStore for InMemoryHistoryStore {
    async fn append(&self, result: GameResult) -> HistoryResult<()> {
        let mut entries = self.entries.write().await;
        push_front_bounded(&mut entries, result, self.limit);
        Ok(())
    }

    async fn read_all(&self) -> Vec<GameResult> {
        self.entries.read().await.clone()
    }

    async fn clear(&self) -> HistoryResult<()> {
        self.entries.write().await.clear();
        Ok(())
    }
}
