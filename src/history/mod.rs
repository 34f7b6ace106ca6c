//! Persisted record of finished games, most recent first.
//!
//! Storage sits behind the [`HistoryStore`] trait so the session layer never
//! touches the medium directly. Reads are forgiving: data that cannot be
//! decoded is reported as an empty history rather than an error.

mod file;
mod memory;

use crate::types::{GameResult, HistoryStats};
use async_trait::async_trait;

pub use file::{HistoryFile, JsonFileHistoryStore, HISTORY_SCHEMA_VERSION};
pub use memory::InMemoryHistoryStore;

/// Default number of results kept
pub const DEFAULT_HISTORY_LIMIT: usize = 100;

/// Result type for history writes
pub type HistoryResult<T> = Result<T, HistoryError>;

/// Errors that can occur while writing history
#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    #[error("History storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("History serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error(
        "History file has schema version {0}, newer than supported version {max}",
        max = HISTORY_SCHEMA_VERSION
    )]
    NewerSchema(u32),
}

/// Append-only list of game results capped at a fixed capacity
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// Add a result at the front, dropping the oldest entries beyond capacity
    async fn append(&self, result: GameResult) -> HistoryResult<()>;

    /// All stored results, most recent first. Never fails.
    async fn read_all(&self) -> Vec<GameResult>;

    async fn clear(&self) -> HistoryResult<()>;

    async fn stats(&self) -> HistoryStats {
        HistoryStats::from_results(&self.read_all().await)
    }
}

/// Insert at the front and cut the list down to `limit`
fn push_front_bounded(entries: &mut Vec<GameResult>, result: GameResult, limit: usize) {
    entries.insert(0, result);
    entries.truncate(limit);
}

#[cfg(test)]
pub(crate) fn sample_result(word: &str, imposter_won: bool) -> GameResult {
    GameResult {
        id: ulid::Ulid::new().to_string(),
        word: word.to_string(),
        category: Some("food".to_string()),
        players: vec!["Alice".into(), "Bob".into(), "Carol".into()],
        imposter_name: "Bob".to_string(),
        imposter_guessed_word: None,
        imposter_caught: !imposter_won,
        imposter_guessed_correctly: false,
        winners_are_imposters: imposter_won,
        created_at: chrono::Utc::now(),
    }
}
