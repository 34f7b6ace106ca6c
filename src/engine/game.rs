use super::GameError;
use crate::engine::vote::cast_vote;
use crate::types::*;
use crate::words::WordSource;
use chrono::{DateTime, Utc};
use rand::seq::SliceRandom;
use rand::Rng;

/// ULID built from the injected generator so seeded runs reproduce ids
fn new_id<R: Rng>(rng: &mut R, at: DateTime<Utc>) -> String {
    let millis = at.timestamp_millis().max(0) as u64;
    ulid::Ulid::from_parts(millis, rng.random::<u128>()).to_string()
}

/// Start a new round with the current time as creation timestamp.
///
/// The caller is expected to pass names that went through
/// [`validate_player_names`](super::validate_player_names); only an empty list
/// and an unusable word source are reported here.
pub fn create_game<R: Rng>(
    player_names: &[String],
    category: Option<&str>,
    words: &dyn WordSource,
    rng: &mut R,
) -> Result<GameState, GameError> {
    create_game_at(player_names, category, words, rng, Utc::now())
}

/// Same as [`create_game`] with an explicit creation time
pub fn create_game_at<R: Rng>(
    player_names: &[String],
    category: Option<&str>,
    words: &dyn WordSource,
    rng: &mut R,
    created_at: DateTime<Utc>,
) -> Result<GameState, GameError> {
    if player_names.is_empty() {
        return Err(GameError::TooFewPlayers {
            min: super::MIN_PLAYERS,
            got: 0,
        });
    }

    let imposter_index = rng.random_range(0..player_names.len());

    let mut players: Vec<Player> = player_names
        .iter()
        .enumerate()
        .map(|(index, name)| Player {
            id: new_id(rng, created_at),
            name: name.clone(),
            is_imposter: index == imposter_index,
            has_revealed: false,
            voted_for: None,
        })
        .collect();

    // Seating order must not leak entry order or the imposter's slot
    players.shuffle(rng);

    let word = words
        .random_word(category, rng)
        .ok_or_else(|| match category {
            Some(c) => GameError::UnknownCategory(c.to_string()),
            None => GameError::NoWords,
        })?;

    Ok(GameState {
        id: new_id(rng, created_at),
        players,
        word,
        category: category.map(str::to_string),
        phase: GamePhase::Reveal,
        current_player_index: 0,
        votes: Default::default(),
        voting_skipped: false,
        created_at,
    })
}

/// Start the next round from a finished game's line-up and category
pub fn rematch<R: Rng>(
    previous: &GameResult,
    words: &dyn WordSource,
    rng: &mut R,
) -> Result<GameState, GameError> {
    create_game(&previous.players, previous.category.as_deref(), words, rng)
}

/// The player holding the device during the reveal, `None` once everyone has seen their word
pub fn current_player(state: &GameState) -> Option<&Player> {
    state.players.get(state.current_player_index)
}

/// True when the current player is the last one still to reveal
pub fn is_last_reveal(state: &GameState) -> bool {
    state.phase == GamePhase::Reveal && state.current_player_index + 1 == state.players.len()
}

/// Mark the current player as having seen their word and pass the device on.
/// Revealing for the last player moves the game straight to `Discuss`.
pub fn reveal_word(state: &GameState) -> GameState {
    if current_player(state).is_none() {
        return state.clone();
    }

    let mut next = state.clone();
    next.players[state.current_player_index].has_revealed = true;
    next.current_player_index = state.current_player_index + 1;
    next.phase = if next.current_player_index >= next.players.len() {
        GamePhase::Discuss
    } else {
        GamePhase::Reveal
    };
    next
}

pub fn start_voting(state: &GameState) -> GameState {
    GameState {
        phase: GamePhase::Vote,
        votes: Default::default(),
        ..state.clone()
    }
}

/// Jump from discussion straight to the result without individual ballots
pub fn skip_to_result(state: &GameState) -> GameState {
    GameState {
        phase: GamePhase::Result,
        votes: Default::default(),
        voting_skipped: true,
        ..state.clone()
    }
}

/// Group accusation: everyone's ballot goes to `accused_id` and the game ends
pub fn group_accuse(state: &GameState, accused_id: &str) -> GameState {
    let mut next = GameState {
        votes: Default::default(),
        ..state.clone()
    };
    for voter_id in state.players.iter().map(|p| p.id.clone()) {
        next = cast_vote(&next, &voter_id, accused_id);
    }
    next.voting_skipped = true;
    next.phase = GamePhase::Result;
    next
}

/// Seating order rotated to begin at a random player
pub fn speaking_order<'a, R: Rng>(state: &'a GameState, rng: &mut R) -> Vec<&'a Player> {
    if state.players.is_empty() {
        return Vec::new();
    }
    let start = rng.random_range(0..state.players.len());
    state.players[start..]
        .iter()
        .chain(state.players[..start].iter())
        .collect()
}

/// Rough progress through the round for a progress bar, 0-100
pub fn progress_percent(state: &GameState) -> f64 {
    let total = state.players.len().max(1) as f64;
    match state.phase {
        GamePhase::Setup => 0.0,
        GamePhase::Reveal => 33.0 * state.current_player_index as f64 / total,
        GamePhase::Discuss => 33.0,
        GamePhase::Vote => 33.0 + 33.0 * state.votes.len() as f64 / total,
        GamePhase::Result => 100.0,
    }
}
