use super::AppState;
use crate::engine::{self, GameError};
use crate::history::HistoryResult;
use crate::types::*;

impl AppState {
    /// Validate the line-up and deal a new round. A missing category falls back
    /// to the configured default, which may itself be "whole pool".
    pub async fn new_game(
        &self,
        player_names: &[String],
        category: Option<&str>,
    ) -> Result<GameState, GameError> {
        let names = engine::validate_player_names(player_names)?;

        let category = category
            .map(|c| c.trim().to_lowercase())
            .filter(|c| !c.is_empty())
            .or_else(|| self.config.default_category.clone());
        if let Some(ref c) = category {
            if !self.words.has_category(c) {
                return Err(GameError::UnknownCategory(c.clone()));
            }
        }

        let game = self.with_rng(|rng| {
            engine::create_game(&names, category.as_deref(), self.words.as_ref(), rng)
        })?;

        tracing::info!(
            "Started game {} with {} players (category: {})",
            game.id,
            game.players.len(),
            game.category.as_deref().unwrap_or("any")
        );

        *self.game.write().await = Some(game.clone());
        Ok(game)
    }

    /// Deal a fresh round with the line-up and category of a finished game
    pub async fn play_again(&self, previous: &GameResult) -> Result<GameState, GameError> {
        let game = self.with_rng(|rng| engine::rematch(previous, self.words.as_ref(), rng))?;
        tracing::info!("Rematch {} after game {}", game.id, previous.id);

        *self.game.write().await = Some(game.clone());
        Ok(game)
    }

    /// Get current game
    pub async fn get_game(&self) -> Option<GameState> {
        self.game.read().await.clone()
    }

    /// Apply a transition to the current game if it is in the expected phase
    async fn advance<F>(&self, expected: GamePhase, transition: F) -> Result<GameState, GameError>
    where
        F: FnOnce(&GameState) -> Result<GameState, GameError>,
    {
        let mut slot = self.game.write().await;
        let current = slot.as_ref().ok_or(GameError::NoActiveGame)?;

        if current.phase != expected {
            return Err(GameError::InvalidPhase {
                expected,
                actual: current.phase,
            });
        }

        let next = transition(current)?;
        if next.phase != current.phase {
            tracing::debug!(
                "Game {} moved from {:?} to {:?}",
                next.id,
                current.phase,
                next.phase
            );
        }

        *slot = Some(next.clone());
        Ok(next)
    }

    pub async fn reveal_next(&self) -> Result<GameState, GameError> {
        self.advance(GamePhase::Reveal, |g| Ok(engine::reveal_word(g)))
            .await
    }

    pub async fn start_voting(&self) -> Result<GameState, GameError> {
        self.advance(GamePhase::Discuss, |g| Ok(engine::start_voting(g)))
            .await
    }

    pub async fn skip_to_result(&self) -> Result<GameState, GameError> {
        self.advance(GamePhase::Discuss, |g| Ok(engine::skip_to_result(g)))
            .await
    }

    pub async fn group_accuse(&self, accused_id: &str) -> Result<GameState, GameError> {
        self.advance(GamePhase::Discuss, |g| {
            if g.player(accused_id).is_none() {
                return Err(GameError::UnknownPlayer(accused_id.to_string()));
            }
            Ok(engine::group_accuse(g, accused_id))
        })
        .await
    }

    pub async fn cast_vote(
        &self,
        voter_id: &str,
        suspect_id: &str,
    ) -> Result<GameState, GameError> {
        self.advance(GamePhase::Vote, |g| {
            engine::try_cast_vote(g, voter_id, suspect_id)
        })
        .await
    }

    /// Seating order starting from a random player, for the discussion
    pub async fn speaking_order(&self) -> Result<Vec<Player>, GameError> {
        let game = self.game.read().await;
        let game = game.as_ref().ok_or(GameError::NoActiveGame)?;

        Ok(self.with_rng(|rng| {
            engine::speaking_order(game, rng)
                .into_iter()
                .cloned()
                .collect()
        }))
    }

    /// Close out the round: summarize it, record it in history and discard the state.
    ///
    /// A history write failure is logged but does not lose the result.
    pub async fn finish_game(&self, imposter_guess: Option<&str>) -> Result<GameResult, GameError> {
        let game = {
            let mut slot = self.game.write().await;
            match slot.as_ref() {
                None => return Err(GameError::NoActiveGame),
                Some(g) if g.phase != GamePhase::Result => {
                    return Err(GameError::InvalidPhase {
                        expected: GamePhase::Result,
                        actual: g.phase,
                    })
                }
                Some(_) => {}
            }
            slot.take().ok_or(GameError::NoActiveGame)?
        };

        let result = engine::create_game_result(&game, imposter_guess);
        tracing::info!(
            "Game {} finished: imposter {} (caught: {}, guessed word: {})",
            result.id,
            if result.winners_are_imposters {
                "wins"
            } else {
                "loses"
            },
            result.imposter_caught,
            result.imposter_guessed_correctly
        );

        if let Err(e) = self.history.append(result.clone()).await {
            tracing::error!("Failed to save game {} to history: {}", result.id, e);
        }

        Ok(result)
    }

    pub async fn history_stats(&self) -> HistoryStats {
        self.history.stats().await
    }

    pub async fn clear_history(&self) -> HistoryResult<()> {
        self.history.clear().await?;
        tracing::info!("Cleared game history");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|n| n.to_string()).collect()
    }

    async fn discussing(state: &AppState) -> GameState {
        let mut game = state
            .new_game(&names(&["Alice", "Bob", "Carol"]), None)
            .await
            .unwrap();
        while game.phase == GamePhase::Reveal {
            game = state.reveal_next().await.unwrap();
        }
        game
    }

    #[tokio::test]
    async fn test_new_game_validates_names() {
        let state = AppState::in_memory();
        let result = state.new_game(&names(&["Alice", "alice", "Bob"]), None).await;
        assert_eq!(result, Err(GameError::DuplicateName("alice".to_string())));
        assert!(state.get_game().await.is_none());
    }

    #[tokio::test]
    async fn test_new_game_checks_category() {
        let state = AppState::in_memory();
        let players = names(&["Alice", "Bob", "Carol"]);

        let result = state.new_game(&players, Some("dinosaurs")).await;
        assert_eq!(
            result,
            Err(GameError::UnknownCategory("dinosaurs".to_string()))
        );

        let game = state.new_game(&players, Some(" Animals ")).await.unwrap();
        assert_eq!(game.category.as_deref(), Some("animals"));
    }

    #[tokio::test]
    async fn test_default_category_from_config() {
        let mut state = AppState::in_memory();
        state.config.default_category = Some("colors".to_string());

        let game = state
            .new_game(&names(&["Alice", "Bob", "Carol"]), None)
            .await
            .unwrap();
        assert_eq!(game.category.as_deref(), Some("colors"));
    }

    #[tokio::test]
    async fn test_phase_guards() {
        let state = AppState::in_memory().with_seed(1);
        assert_eq!(state.reveal_next().await, Err(GameError::NoActiveGame));

        state
            .new_game(&names(&["Alice", "Bob", "Carol"]), None)
            .await
            .unwrap();
        assert_eq!(
            state.start_voting().await,
            Err(GameError::InvalidPhase {
                expected: GamePhase::Discuss,
                actual: GamePhase::Reveal,
            })
        );
        assert!(matches!(
            state.finish_game(None).await,
            Err(GameError::InvalidPhase { .. })
        ));
    }

    #[tokio::test]
    async fn test_full_vote_round_is_recorded() {
        let state = AppState::in_memory().with_seed(2);
        discussing(&state).await;
        let game = state.start_voting().await.unwrap();

        let ids: Vec<_> = game.players.iter().map(|p| p.id.clone()).collect();
        state.cast_vote(&ids[0], &ids[1]).await.unwrap();
        state.cast_vote(&ids[1], &ids[2]).await.unwrap();
        let game = state.cast_vote(&ids[2], &ids[0]).await.unwrap();
        assert_eq!(game.phase, GamePhase::Result);

        // One vote each: a tie, the imposter escapes
        let result = state.finish_game(None).await.unwrap();
        assert!(result.winners_are_imposters);
        assert!(state.get_game().await.is_none());

        let history = state.history.read_all().await;
        assert_eq!(history.len(), 1);
        assert_eq!(history[0], result);
        assert_eq!(state.history_stats().await.imposter_wins, 1);
    }

    #[tokio::test]
    async fn test_cast_vote_rejects_self_vote() {
        let state = AppState::in_memory().with_seed(3);
        discussing(&state).await;
        let game = state.start_voting().await.unwrap();
        let id = game.players[0].id.clone();

        assert_eq!(state.cast_vote(&id, &id).await, Err(GameError::SelfVote));
    }

    #[tokio::test]
    async fn test_group_accuse_and_guess() {
        let state = AppState::in_memory().with_seed(4);
        let game = discussing(&state).await;
        let imposter = engine::imposter(&game).unwrap().clone();

        assert!(matches!(
            state.group_accuse("nobody").await,
            Err(GameError::UnknownPlayer(_))
        ));

        let game = state.group_accuse(&imposter.id).await.unwrap();
        assert!(game.voting_skipped);

        let word = game.word.clone();
        let result = state.finish_game(Some(&word.to_uppercase())).await.unwrap();
        assert!(result.imposter_caught);
        assert!(result.winners_are_imposters);
        assert_eq!(result.imposter_name, imposter.name);
    }

    #[tokio::test]
    async fn test_speaking_order_and_play_again() {
        let state = AppState::in_memory().with_seed(6);
        let game = discussing(&state).await;

        let order = state.speaking_order().await.unwrap();
        assert_eq!(order.len(), game.players.len());

        state.skip_to_result().await.unwrap();
        let result = state.finish_game(None).await.unwrap();

        let next = state.play_again(&result).await.unwrap();
        assert_eq!(next.phase, GamePhase::Reveal);
        assert_ne!(next.id, game.id);
        assert_eq!(state.get_game().await.map(|g| g.id), Some(next.id));
    }

    #[tokio::test]
    async fn test_clear_history() {
        let state = AppState::in_memory().with_seed(7);
        discussing(&state).await;
        state.skip_to_result().await.unwrap();
        state.finish_game(None).await.unwrap();

        assert_eq!(state.history_stats().await.total_games, 1);
        state.clear_history().await.unwrap();
        assert_eq!(state.history_stats().await.total_games, 0);
    }
}
