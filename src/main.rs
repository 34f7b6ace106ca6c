use std::sync::Arc;
use tokio::io::BufReader;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use imposter_word::config::AppConfig;
use imposter_word::console::{Console, ConsoleError};
use imposter_word::history::{HistoryStore, InMemoryHistoryStore, JsonFileHistoryStore};
use imposter_word::state::AppState;
use imposter_word::words::{WordBank, WordSource};

const USAGE: &str = "Usage: imposter-word [play|history|stats|categories|clear-history]";

#[tokio::main]
async fn main() {
    // Load .env file if present (before any env var reads)
    if let Err(e) = dotenvy::dotenv() {
        // Not an error if .env doesn't exist, only log if it's a different issue
        if !matches!(e, dotenvy::Error::Io(_)) {
            eprintln!("Warning: Failed to load .env file: {}", e);
        }
    }

    // Logs go to stderr so they never mix with the game text
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "imposter_word=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let command = std::env::args().nth(1).unwrap_or_else(|| "play".to_string());
    if matches!(command.as_str(), "-h" | "--help" | "help") {
        println!("{}", USAGE);
        return;
    }

    let config = AppConfig::from_env();
    let state = build_state(config).await;

    let input = BufReader::new(tokio::io::stdin());
    let mut console = Console::new(state, input, tokio::io::stdout());
    let outcome = match command.as_str() {
        "play" => console.run().await,
        "history" => console.show_history().await,
        "stats" => console.show_stats().await,
        "categories" => console.show_categories().await,
        "clear-history" => console.clear_history().await,
        other => {
            eprintln!("Unknown command '{}'\n{}", other, USAGE);
            std::process::exit(2);
        }
    };

    match outcome {
        Ok(()) => {}
        Err(ConsoleError::InputClosed) => tracing::debug!("Input closed, exiting"),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

async fn build_state(config: AppConfig) -> AppState {
    let words: Arc<dyn WordSource> = match &config.words_file {
        Some(path) => match WordBank::load(path).await {
            Ok(bank) => {
                tracing::info!(
                    "Loaded {} words from {}",
                    bank.word_count(),
                    path.display()
                );
                Arc::new(bank)
            }
            Err(e) => {
                tracing::warn!(
                    "Failed to load word list {}: {}. Using built-in words.",
                    path.display(),
                    e
                );
                Arc::new(WordBank::builtin())
            }
        },
        None => Arc::new(WordBank::builtin()),
    };

    let history: Arc<dyn HistoryStore> = match &config.history_path {
        Some(path) => {
            tracing::info!("Game history stored in {}", path.display());
            Arc::new(JsonFileHistoryStore::new(path, config.history_limit))
        }
        None => {
            tracing::info!("Game history kept in memory only");
            Arc::new(InMemoryHistoryStore::new(config.history_limit))
        }
    };

    AppState::new(history, words, config)
}
