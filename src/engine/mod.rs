//! Pure game-state machine.
//!
//! Every operation takes a `GameState` by reference and returns a fresh value,
//! so callers can keep earlier states around. Nothing in here performs I/O;
//! randomness comes from the generator passed in by the caller.

mod game;
mod outcome;
mod setup;
mod vote;

#[cfg(test)]
pub(crate) mod test_support;

pub use game::{
    create_game, create_game_at, current_player, group_accuse, is_last_reveal, progress_percent,
    rematch, reveal_word, skip_to_result, speaking_order, start_voting,
};
pub use outcome::{check_winner, create_game_result, imposter};
pub use setup::{validate_player_names, MAX_NAME_CHARS, MAX_PLAYERS, MIN_PLAYERS};
pub use vote::{cast_vote, most_voted_player, try_cast_vote, vote_candidates, vote_results};

use crate::types::{Category, GamePhase, PlayerId};

/// Errors raised by checked engine and session operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("Need at least {min} players, got {got}")]
    TooFewPlayers { min: usize, got: usize },

    #[error("At most {max} players can play, got {got}")]
    TooManyPlayers { max: usize, got: usize },

    #[error("Player name '{0}' is longer than {max} characters", max = MAX_NAME_CHARS)]
    NameTooLong(String),

    #[error("Player names must be unique: '{0}' appears more than once")]
    DuplicateName(String),

    #[error("Unknown category '{0}'")]
    UnknownCategory(Category),

    #[error("No words available to draw from")]
    NoWords,

    #[error("Player '{0}' not found")]
    UnknownPlayer(PlayerId),

    #[error("Players cannot vote for themselves")]
    SelfVote,

    #[error("Expected phase {expected:?} but game is in {actual:?}")]
    InvalidPhase {
        expected: GamePhase,
        actual: GamePhase,
    },

    #[error("No active game")]
    NoActiveGame,
}
