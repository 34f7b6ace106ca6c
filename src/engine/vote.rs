use super::GameError;
use crate::types::*;
use std::collections::HashMap;

/// Record (or overwrite) a ballot. Once as many distinct voters as there are
/// players have voted, the game moves to `Result`.
///
/// No checks are made on the ids; see [`try_cast_vote`] for the validated form.
pub fn cast_vote(state: &GameState, voter_id: &str, suspect_id: &str) -> GameState {
    let mut next = state.clone();
    next.votes.insert(voter_id.to_string(), suspect_id.to_string());

    if let Some(voter) = next.players.iter_mut().find(|p| p.id == voter_id) {
        voter.voted_for = Some(suspect_id.to_string());
    }

    next.phase = if next.votes.len() == next.players.len() {
        GamePhase::Result
    } else {
        GamePhase::Vote
    };
    next
}

/// Validated ballot: the game must be voting, both ids must belong to
/// seated players, and nobody may accuse themselves.
pub fn try_cast_vote(
    state: &GameState,
    voter_id: &str,
    suspect_id: &str,
) -> Result<GameState, GameError> {
    if state.phase != GamePhase::Vote {
        return Err(GameError::InvalidPhase {
            expected: GamePhase::Vote,
            actual: state.phase,
        });
    }
    if state.player(voter_id).is_none() {
        return Err(GameError::UnknownPlayer(voter_id.to_string()));
    }
    if state.player(suspect_id).is_none() {
        return Err(GameError::UnknownPlayer(suspect_id.to_string()));
    }
    if voter_id == suspect_id {
        return Err(GameError::SelfVote);
    }

    Ok(cast_vote(state, voter_id, suspect_id))
}

/// Players the given voter may accuse, in seating order
pub fn vote_candidates<'a>(state: &'a GameState, voter_id: &str) -> Vec<&'a Player> {
    state.players.iter().filter(|p| p.id != voter_id).collect()
}

/// Ballot counts for every seated player, most votes first.
/// Equal counts keep seating order.
pub fn vote_results(state: &GameState) -> Vec<VoteCount> {
    let mut counts: HashMap<&str, u32> = HashMap::new();
    for suspect_id in state.votes.values() {
        *counts.entry(suspect_id.as_str()).or_insert(0) += 1;
    }

    let mut results: Vec<VoteCount> = state
        .players
        .iter()
        .map(|p| VoteCount {
            player_id: p.id.clone(),
            votes: counts.get(p.id.as_str()).copied().unwrap_or(0),
        })
        .collect();

    // sort_by is stable, so ties stay in seating order
    results.sort_by(|a, b| b.votes.cmp(&a.votes));
    results
}

/// The single player with the most votes; `None` when the top spot is shared
/// (which includes the case where nobody has voted)
pub fn most_voted_player(state: &GameState) -> Option<&Player> {
    let results = vote_results(state);
    let top = results.first()?;

    let tied = results.iter().filter(|r| r.votes == top.votes).count();
    if tied > 1 {
        return None;
    }

    state.player(&top.player_id)
}
