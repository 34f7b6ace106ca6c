//! Line-based pass-the-device driver.
//!
//! Reads from any async line source and writes plain text, so the same code
//! serves the terminal binary and scripted tests.

use crate::engine::{self, GameError, MAX_PLAYERS};
use crate::state::AppState;
use crate::types::*;
use crate::words::category_label;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, Lines};

/// Errors that end a console session
#[derive(Debug, thiserror::Error)]
pub enum ConsoleError {
    #[error("Console I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Input closed")]
    InputClosed,

    #[error(transparent)]
    Game(#[from] GameError),
}

/// Blank lines printed to push a revealed word off screen
const HIDE_LINES: usize = 40;

/// Parse a 1-based menu choice
pub fn parse_choice(input: &str, options: usize) -> Option<usize> {
    let n: usize = input.trim().parse().ok()?;
    (1..=options).contains(&n).then(|| n - 1)
}

pub struct Console<R, W> {
    state: AppState,
    lines: Lines<R>,
    out: W,
}

impl<R, W> Console<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(state: AppState, input: R, out: W) -> Self {
        Self {
            state,
            lines: input.lines(),
            out,
        }
    }

    pub fn into_output(self) -> W {
        self.out
    }

    async fn say(&mut self, text: &str) -> Result<(), ConsoleError> {
        self.out.write_all(text.as_bytes()).await?;
        self.out.write_all(b"\n").await?;
        self.out.flush().await?;
        Ok(())
    }

    async fn ask(&mut self, prompt: &str) -> Result<String, ConsoleError> {
        self.out.write_all(prompt.as_bytes()).await?;
        self.out.write_all(b" ").await?;
        self.out.flush().await?;
        match self.lines.next_line().await? {
            Some(line) => Ok(line.trim().to_string()),
            None => Err(ConsoleError::InputClosed),
        }
    }

    /// Ask until the answer picks one of `options` entries
    async fn choose(&mut self, prompt: &str, options: usize) -> Result<usize, ConsoleError> {
        loop {
            let answer = self.ask(prompt).await?;
            match parse_choice(&answer, options) {
                Some(index) => return Ok(index),
                None => self.say(&format!("Pick a number from 1 to {}.", options)).await?,
            }
        }
    }

    /// Play rounds until the group stops
    pub async fn run(&mut self) -> Result<(), ConsoleError> {
        self.say("=== Imposter Word ===").await?;
        self.say("One player doesn't know the word. Find them!").await?;

        let mut game = self.setup().await?;
        loop {
            let result = self.play_round(game).await?;

            let again = self.ask("Play again with the same players? [y/N]").await?;
            if !again.eq_ignore_ascii_case("y") {
                return Ok(());
            }
            game = self.state.play_again(&result).await?;
        }
    }

    async fn setup(&mut self) -> Result<GameState, ConsoleError> {
        loop {
            let names = self.read_names().await?;
            let category = self.read_category().await?;

            match self.state.new_game(&names, category.as_deref()).await {
                Ok(game) => return Ok(game),
                Err(e) => self.say(&format!("Can't start: {}", e)).await?,
            }
        }
    }

    async fn read_names(&mut self) -> Result<Vec<String>, ConsoleError> {
        self.say(&format!(
            "Enter player names, one per line ({}-{}). Blank line when done.",
            engine::MIN_PLAYERS,
            MAX_PLAYERS
        ))
        .await?;

        loop {
            let mut names = Vec::new();
            loop {
                let name = self.ask(&format!("Player {}:", names.len() + 1)).await?;
                if name.is_empty() {
                    break;
                }
                names.push(name);
            }

            match engine::validate_player_names(&names) {
                Ok(names) => return Ok(names),
                Err(e) => {
                    self.say(&format!("{}. Let's try again.", e)).await?;
                }
            }
        }
    }

    async fn read_category(&mut self) -> Result<Option<Category>, ConsoleError> {
        let categories = self.state.words.categories();
        self.say("Word category:").await?;
        self.say("  0. Random (any category)").await?;
        for (i, category) in categories.iter().enumerate() {
            self.say(&format!("  {}. {}", i + 1, category_label(category)))
                .await?;
        }

        loop {
            let answer = self.ask("Category [0]:").await?;
            if answer.is_empty() || answer == "0" {
                return Ok(None);
            }
            if let Some(index) = parse_choice(&answer, categories.len()) {
                return Ok(Some(categories[index].clone()));
            }
            let lowered = answer.to_lowercase();
            if categories.contains(&lowered) {
                return Ok(Some(lowered));
            }
            self.say("Unknown category.").await?;
        }
    }

    async fn play_round(&mut self, mut game: GameState) -> Result<GameResult, ConsoleError> {
        while let Some(player) = engine::current_player(&game).cloned() {
            self.ask(&format!(
                "Pass the device to {}. Press Enter when only you can see the screen.",
                player.name
            ))
            .await?;

            if player.is_imposter {
                self.say("You are the IMPOSTER! Blend in without knowing the word.")
                    .await?;
            } else {
                self.say(&format!("The word is: {}", game.word)).await?;
            }

            let next = if engine::is_last_reveal(&game) {
                "Press Enter to start the discussion."
            } else {
                "Press Enter to hide it and pass the device on."
            };
            self.ask(next).await?;
            self.say(&"\n".repeat(HIDE_LINES)).await?;

            game = self.state.reveal_next().await?;
        }

        self.discuss(&game).await?;
        let game = self.decide(&game).await?;
        self.finish(&game).await
    }

    async fn discuss(&mut self, game: &GameState) -> Result<(), ConsoleError> {
        let order = self.state.speaking_order().await?;
        self.say("--- Discussion ---").await?;
        self.say("Take turns giving one-word clues.").await?;
        if let Some(first) = order.first() {
            self.say(&format!("First to speak: {}", first.name)).await?;
        }
        let names: Vec<_> = order.iter().map(|p| p.name.as_str()).collect();
        self.say(&format!("Speaking order: {}", names.join(", ")))
            .await?;
        self.say(&format!("{} players this round.", game.players.len()))
            .await
    }

    async fn decide(&mut self, game: &GameState) -> Result<GameState, ConsoleError> {
        loop {
            let choice = self
                .ask("[v] secret votes, [a] group accusation, [s] skip to result:")
                .await?;
            match choice.to_lowercase().as_str() {
                "v" => return self.collect_votes().await,
                "a" => {
                    self.say("Who does the group think is the imposter?").await?;
                    self.list_players(&game.players).await?;
                    let index = self.choose("Accused:", game.players.len()).await?;
                    return Ok(self.state.group_accuse(&game.players[index].id).await?);
                }
                "s" => return Ok(self.state.skip_to_result().await?),
                _ => self.say("Please answer v, a or s.").await?,
            }
        }
    }

    async fn collect_votes(&mut self) -> Result<GameState, ConsoleError> {
        let mut game = self.state.start_voting().await?;
        let voters: Vec<Player> = game.players.clone();

        for voter in voters {
            let candidates: Vec<Player> = engine::vote_candidates(&game, &voter.id)
                .into_iter()
                .cloned()
                .collect();

            self.say(&format!("{}, who is the imposter?", voter.name))
                .await?;
            self.list_players(&candidates).await?;
            let index = self.choose("Vote:", candidates.len()).await?;
            game = self.state.cast_vote(&voter.id, &candidates[index].id).await?;
            self.say(&"\n".repeat(HIDE_LINES)).await?;
        }

        Ok(game)
    }

    async fn list_players(&mut self, players: &[Player]) -> Result<(), ConsoleError> {
        for (i, player) in players.iter().enumerate() {
            self.say(&format!("  {}. {}", i + 1, player.name)).await?;
        }
        Ok(())
    }

    async fn finish(&mut self, game: &GameState) -> Result<GameResult, ConsoleError> {
        let check = engine::check_winner(game);
        self.say("--- Result ---").await?;

        if !game.votes.is_empty() && !game.voting_skipped {
            for tally in engine::vote_results(game) {
                let name = game
                    .player(&tally.player_id)
                    .map(|p| p.name.as_str())
                    .unwrap_or("?");
                self.say(&format!("  {}: {} vote(s)", name, tally.votes))
                    .await?;
            }
        }
        self.say(&check.reason).await?;

        // A caught imposter gets one shot at the word
        let guess = match (check.verdict, engine::imposter(game)) {
            (Verdict::Caught, Some(imposter)) => {
                let prompt = format!(
                    "{}, guess the secret word to steal the win (Enter to skip):",
                    imposter.name
                );
                Some(self.ask(&prompt).await?)
            }
            _ => None,
        };

        let result = self.state.finish_game(guess.as_deref()).await?;
        if result.imposter_guessed_correctly {
            self.say("The imposter guessed the word!").await?;
        }
        self.say(&format!("The word was \"{}\".", result.word))
            .await?;
        self.say(if result.winners_are_imposters {
            "Imposter wins!"
        } else {
            "Crew wins!"
        })
        .await?;
        Ok(result)
    }

    pub async fn show_history(&mut self) -> Result<(), ConsoleError> {
        let history = self.state.history.read_all().await;
        if history.is_empty() {
            return self.say("No games played yet.").await;
        }

        for game in history {
            let winner = if game.winners_are_imposters {
                "imposter"
            } else {
                "crew"
            };
            let category = game
                .category
                .as_deref()
                .map(category_label)
                .unwrap_or_else(|| "Random".to_string());
            self.say(&format!(
                "{}  {:<12} {:<12} imposter: {:<10} winner: {}",
                game.created_at.format("%Y-%m-%d %H:%M"),
                game.word,
                category,
                game.imposter_name,
                winner
            ))
            .await?;
        }
        Ok(())
    }

    pub async fn show_stats(&mut self) -> Result<(), ConsoleError> {
        let stats = self.state.history_stats().await;
        self.say(&format!("Games played:  {}", stats.total_games))
            .await?;
        self.say(&format!("Crew wins:     {}", stats.crew_wins))
            .await?;
        self.say(&format!("Imposter wins: {}", stats.imposter_wins))
            .await?;
        self.say(&format!("Crew win rate: {}%", stats.win_rate))
            .await
    }

    pub async fn clear_history(&mut self) -> Result<(), ConsoleError> {
        match self.state.clear_history().await {
            Ok(()) => self.say("History cleared.").await,
            Err(e) => self.say(&format!("Could not clear history: {}", e)).await,
        }
    }

    pub async fn show_categories(&mut self) -> Result<(), ConsoleError> {
        for category in self.state.words.categories() {
            self.say(&category).await?;
        }
        Ok(())
    }
}
