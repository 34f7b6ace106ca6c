use super::GameError;
use std::collections::HashSet;

pub const MIN_PLAYERS: usize = 3;
pub const MAX_PLAYERS: usize = 10;
pub const MAX_NAME_CHARS: usize = 20;

/// Clean up the names typed in at setup.
///
/// Names are trimmed and blank entries dropped. The remaining list must hold
/// between `MIN_PLAYERS` and `MAX_PLAYERS` names that are unique ignoring case.
pub fn validate_player_names<S: AsRef<str>>(names: &[S]) -> Result<Vec<String>, GameError> {
    let cleaned: Vec<String> = names
        .iter()
        .map(|n| n.as_ref().trim().to_string())
        .filter(|n| !n.is_empty())
        .collect();

    if cleaned.len() < MIN_PLAYERS {
        return Err(GameError::TooFewPlayers {
            min: MIN_PLAYERS,
            got: cleaned.len(),
        });
    }
    if cleaned.len() > MAX_PLAYERS {
        return Err(GameError::TooManyPlayers {
            max: MAX_PLAYERS,
            got: cleaned.len(),
        });
    }

    let mut seen = HashSet::new();
    for name in &cleaned {
        if name.chars().count() > MAX_NAME_CHARS {
            return Err(GameError::NameTooLong(name.clone()));
        }
        if !seen.insert(name.to_lowercase()) {
            return Err(GameError::DuplicateName(name.clone()));
        }
    }

    Ok(cleaned)
}
