use crate::history::DEFAULT_HISTORY_LIMIT;
use crate::types::Category;
use std::path::PathBuf;

pub const DEFAULT_HISTORY_PATH: &str = "imposter-history.json";

/// Runtime configuration
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// History file; `None` keeps history in memory only
    pub history_path: Option<PathBuf>,
    /// Maximum number of results kept in history
    pub history_limit: usize,
    /// Category preselected for new games, `None` draws from every category
    pub default_category: Option<Category>,
    /// Custom word list replacing the built-in one
    pub words_file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            history_path: Some(PathBuf::from(DEFAULT_HISTORY_PATH)),
            history_limit: DEFAULT_HISTORY_LIMIT,
            default_category: None,
            words_file: None,
        }
    }
}

/// Read a variable, treating blank values as unset
fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().and_then(|value| {
        let trimmed = value.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    })
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        // Unset means the default file, an explicitly empty value disables the file
        let history_path = match std::env::var("IMPOSTER_HISTORY_PATH") {
            Ok(path) => {
                let trimmed = path.trim();
                (!trimmed.is_empty()).then(|| PathBuf::from(trimmed))
            }
            Err(_) => Some(PathBuf::from(DEFAULT_HISTORY_PATH)),
        };

        let history_limit = non_empty_var("IMPOSTER_HISTORY_LIMIT")
            .and_then(|s| s.parse::<usize>().ok())
            .filter(|limit| *limit > 0)
            .unwrap_or(DEFAULT_HISTORY_LIMIT);

        Self {
            history_path,
            history_limit,
            default_category: non_empty_var("IMPOSTER_CATEGORY").map(|c| c.to_lowercase()),
            words_file: non_empty_var("IMPOSTER_WORDS_FILE").map(PathBuf::from),
        }
    }
}
