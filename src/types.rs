use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Opaque ID types for type safety
pub type GameId = String;
pub type PlayerId = String;
/// Word category identifier. `None` in a category slot means the whole pool.
pub type Category = String;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum GamePhase {
    Setup,
    Reveal,
    Discuss,
    Vote,
    Result,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub is_imposter: bool,
    pub has_revealed: bool,
    pub voted_for: Option<PlayerId>,
}

/// A single round of the game. Transitions never mutate a `GameState` in place;
/// every engine operation returns a new value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameState {
    pub id: GameId,
    /// Random seating order fixed at creation
    pub players: Vec<Player>,
    pub word: String,
    pub category: Option<Category>,
    pub phase: GamePhase,
    /// Only meaningful during `Reveal`
    pub current_player_index: usize,
    /// voter id -> suspect id
    pub votes: HashMap<PlayerId, PlayerId>,
    pub voting_skipped: bool,
    pub created_at: DateTime<Utc>,
}

impl GameState {
    pub fn player(&self, id: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }
}

/// Ballots received by one player
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct VoteCount {
    pub player_id: PlayerId,
    pub votes: u32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// No player carries the imposter flag
    NoImposter,
    /// No single most-voted player
    Tied,
    Caught,
    WronglyAccused,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WinnerCheck {
    pub imposter_wins: bool,
    pub verdict: Verdict,
    /// User-facing explanation of the outcome
    pub reason: String,
}

/// Persisted summary of one finished game
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GameResult {
    pub id: GameId,
    pub word: String,
    pub category: Option<Category>,
    /// Player names in seating order
    pub players: Vec<String>,
    pub imposter_name: String,
    pub imposter_guessed_word: Option<String>,
    pub imposter_caught: bool,
    pub imposter_guessed_correctly: bool,
    pub winners_are_imposters: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct HistoryStats {
    pub total_games: usize,
    pub imposter_wins: usize,
    pub crew_wins: usize,
    /// Crew win rate in whole percent
    pub win_rate: u32,
}

impl HistoryStats {
    pub fn from_results(results: &[GameResult]) -> Self {
        let total_games = results.len();
        let imposter_wins = results.iter().filter(|r| r.winners_are_imposters).count();
        let crew_wins = total_games - imposter_wins;
        let win_rate = if total_games > 0 {
            (crew_wins as f64 * 100.0 / total_games as f64).round() as u32
        } else {
            0
        };

        Self {
            total_games,
            imposter_wins,
            crew_wins,
            win_rate,
        }
    }
}
