mod game;

use crate::config::AppConfig;
use crate::history::{HistoryStore, InMemoryHistoryStore};
use crate::types::*;
use crate::words::{WordBank, WordSource};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::RwLock;

/// Shared session state: the round in progress plus its collaborators
#[derive(Clone)]
pub struct AppState {
    pub game: Arc<RwLock<Option<GameState>>>,
    pub history: Arc<dyn HistoryStore>,
    pub words: Arc<dyn WordSource>,
    pub config: AppConfig,
    rng: Arc<Mutex<StdRng>>,
}

impl AppState {
    pub fn new(
        history: Arc<dyn HistoryStore>,
        words: Arc<dyn WordSource>,
        config: AppConfig,
    ) -> Self {
        Self {
            game: Arc::new(RwLock::new(None)),
            history,
            words,
            config,
            rng: Arc::new(Mutex::new(StdRng::from_os_rng())),
        }
    }

    /// Built-in words and history that lives only as long as the process
    pub fn in_memory() -> Self {
        let config = AppConfig {
            history_path: None,
            ..AppConfig::default()
        };
        Self::new(
            Arc::new(InMemoryHistoryStore::new(config.history_limit)),
            Arc::new(WordBank::builtin()),
            config,
        )
    }

    /// Replace the random source with a seeded one (reproducible games in tests)
    pub fn with_seed(self, seed: u64) -> Self {
        Self {
            rng: Arc::new(Mutex::new(StdRng::seed_from_u64(seed))),
            ..self
        }
    }

    /// Run `f` with exclusive access to the generator. Must not be held across an await.
    fn with_rng<T>(&self, f: impl FnOnce(&mut StdRng) -> T) -> T {
        let mut rng = self.rng.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut rng)
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::in_memory()
    }
}
