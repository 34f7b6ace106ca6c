use super::vote::most_voted_player;
use crate::types::*;

pub fn imposter(state: &GameState) -> Option<&Player> {
    state.players.iter().find(|p| p.is_imposter)
}

/// Decide who won the vote. A tied or empty vote lets the imposter escape.
pub fn check_winner(state: &GameState) -> WinnerCheck {
    let Some(imposter) = imposter(state) else {
        return WinnerCheck {
            imposter_wins: false,
            verdict: Verdict::NoImposter,
            reason: "No imposter found".to_string(),
        };
    };

    match most_voted_player(state) {
        None => WinnerCheck {
            imposter_wins: true,
            verdict: Verdict::Tied,
            reason: "Vote was tied - imposter escapes!".to_string(),
        },
        Some(accused) if accused.id == imposter.id => WinnerCheck {
            imposter_wins: false,
            verdict: Verdict::Caught,
            reason: format!("{} was caught! The word was \"{}\"", imposter.name, state.word),
        },
        Some(accused) => WinnerCheck {
            imposter_wins: true,
            verdict: Verdict::WronglyAccused,
            reason: format!(
                "{} was wrongly accused! {} was the imposter.",
                accused.name, imposter.name
            ),
        },
    }
}

/// Summarize a finished game for the history store.
///
/// A caught imposter still wins if their guess matches the secret word,
/// ignoring case and surrounding whitespace. The guess is recorded as typed;
/// a blank guess counts as no guess.
pub fn create_game_result(state: &GameState, imposter_guess: Option<&str>) -> GameResult {
    let imposter_wins = check_winner(state).imposter_wins;
    let guess = imposter_guess.filter(|g| !g.trim().is_empty());
    let imposter_guessed_correctly =
        guess.is_some_and(|g| g.trim().to_lowercase() == state.word.trim().to_lowercase());

    GameResult {
        id: state.id.clone(),
        word: state.word.clone(),
        category: state.category.clone(),
        players: state.players.iter().map(|p| p.name.clone()).collect(),
        imposter_name: imposter(state)
            .map(|p| p.name.clone())
            .unwrap_or_else(|| "Unknown".to_string()),
        imposter_guessed_word: guess.map(str::to_string),
        imposter_caught: !imposter_wins,
        imposter_guessed_correctly,
        winners_are_imposters: imposter_wins || imposter_guessed_correctly,
        created_at: state.created_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::test_support::sample_game;
    use crate::engine::{cast_vote, group_accuse, skip_to_result, start_voting};

    /// Three-player game in the voting phase, returning (game, imposter id, crew ids)
    fn voting_game() -> (GameState, String, Vec<String>) {
        let mut game = sample_game(&["Alice", "Bob", "Carol"], 17);
        game.phase = GamePhase::Discuss;
        let game = start_voting(&game);
        let imposter_id = imposter(&game).unwrap().id.clone();
        let crew = game
            .players
            .iter()
            .filter(|p| !p.is_imposter)
            .map(|p| p.id.clone())
            .collect();
        (game, imposter_id, crew)
    }

    #[test]
    fn test_exactly_one_imposter() {
        let (game, imposter_id, crew) = voting_game();
        assert_eq!(crew.len(), 2);
        assert!(!crew.contains(&imposter_id));
        assert!(game.player(&imposter_id).unwrap().is_imposter);
    }

    #[test]
    fn test_no_imposter() {
        let (mut game, _, _) = voting_game();
        for player in &mut game.players {
            player.is_imposter = false;
        }
        let check = check_winner(&game);
        assert!(!check.imposter_wins);
        assert_eq!(check.verdict, Verdict::NoImposter);
    }

    #[test]
    fn test_tie_lets_imposter_escape() {
        let (mut game, imposter_id, crew) = voting_game();
        game = cast_vote(&game, &crew[0], &crew[1]);
        game = cast_vote(&game, &crew[1], &imposter_id);

        let check = check_winner(&game);
        assert!(check.imposter_wins);
        assert_eq!(check.verdict, Verdict::Tied);
        assert_eq!(check.reason, "Vote was tied - imposter escapes!");
    }

    #[test]
    fn test_skipped_vote_is_a_tie() {
        let (game, _, _) = voting_game();
        let check = check_winner(&skip_to_result(&game));
        assert_eq!(check.verdict, Verdict::Tied);
        assert!(check.imposter_wins);
    }

    #[test]
    fn test_imposter_caught() {
        let (mut game, imposter_id, crew) = voting_game();
        game = cast_vote(&game, &crew[0], &imposter_id);
        game = cast_vote(&game, &crew[1], &imposter_id);
        game = cast_vote(&game, &imposter_id, &crew[0]);
        assert_eq!(game.phase, GamePhase::Result);

        let check = check_winner(&game);
        assert!(!check.imposter_wins);
        assert_eq!(check.verdict, Verdict::Caught);
        assert!(check.reason.contains("was caught"));
        assert!(check.reason.contains("apple"));

        let result = create_game_result(&game, None);
        assert!(result.imposter_caught);
        assert!(!result.imposter_guessed_correctly);
        assert!(!result.winners_are_imposters);
        assert_eq!(result.imposter_guessed_word, None);
    }

    #[test]
    fn test_wrong_accusation() {
        let (game, imposter_id, crew) = voting_game();
        let result_state = group_accuse(&game, &crew[0]);

        let check = check_winner(&result_state);
        assert!(check.imposter_wins);
        assert_eq!(check.verdict, Verdict::WronglyAccused);

        let imposter_name = &result_state.player(&imposter_id).unwrap().name;
        let accused_name = &result_state.player(&crew[0]).unwrap().name;
        assert_eq!(
            check.reason,
            format!(
                "{} was wrongly accused! {} was the imposter.",
                accused_name, imposter_name
            )
        );

        let result = create_game_result(&result_state, None);
        assert!(!result.imposter_caught);
        assert!(result.winners_are_imposters);
    }

    #[test]
    fn test_correct_guess_overrides_capture() {
        let (game, imposter_id, _) = voting_game();
        let caught = group_accuse(&game, &imposter_id);

        let result = create_game_result(&caught, Some("  APPLE "));
        assert!(result.imposter_caught);
        assert!(result.imposter_guessed_correctly);
        assert!(result.winners_are_imposters);
        assert_eq!(result.imposter_guessed_word.as_deref(), Some("  APPLE "));
    }

    #[test]
    fn test_wrong_or_blank_guess() {
        let (game, imposter_id, _) = voting_game();
        let caught = group_accuse(&game, &imposter_id);

        let wrong = create_game_result(&caught, Some("pear"));
        assert!(!wrong.imposter_guessed_correctly);
        assert!(!wrong.winners_are_imposters);

        let blank = create_game_result(&caught, Some("   "));
        assert_eq!(blank.imposter_guessed_word, None);
        assert!(!blank.imposter_guessed_correctly);
    }

    #[test]
    fn test_result_is_deterministic_projection() {
        let (game, imposter_id, _) = voting_game();
        let caught = group_accuse(&game, &imposter_id);

        let a = create_game_result(&caught, Some("apple"));
        let b = create_game_result(&caught, Some("apple"));
        assert_eq!(a, b);
        assert_eq!(a.id, caught.id);
        assert_eq!(a.created_at, caught.created_at);
        assert_eq!(
            a.players,
            caught
                .players
                .iter()
                .map(|p| p.name.clone())
                .collect::<Vec<_>>()
        );
        assert_eq!(
            a.winners_are_imposters,
            !a.imposter_caught || a.imposter_guessed_correctly
        );
    }
}
