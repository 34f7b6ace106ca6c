use super::create_game;
use crate::types::GameState;
use crate::words::WordBank;
use rand::rngs::StdRng;
use rand::SeedableRng;

pub fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|n| n.to_string()).collect()
}

/// One category, one word: the secret word is always "apple"
pub fn single_word_bank() -> WordBank {
    WordBank::new(vec![("fruit".to_string(), vec!["apple".to_string()])])
        .expect("static bank is valid")
}

pub fn sample_game(players: &[&str], seed: u64) -> GameState {
    create_game(
        &names(players),
        None,
        &single_word_bank(),
        &mut StdRng::seed_from_u64(seed),
    )
    .expect("sample game")
}
