use thiserror::Error;
use crate::Action;

#[derive(Debug, Error)]
pub enum CoupError {
    #[error("a game needs between 2 and {max} players, got {got}")]
    InvalidPlayerCount { got: usize, max: usize },
    #[error("player name {0:?} is used twice")]
    DuplicateName(String),
    #[error("{players} players need at least {needed} cards but the rules build {built}")]
    NotEnoughCards { players: usize, needed: usize, built: usize },
    #[error("invalid rules: {0}")]
    InvalidRules(String),

    #[error("{player} chose {action}, which is not legal right now")]
    IllegalAction { player: String, action: Action },
    #[error("{player} chose an illegal target for {action}")]
    IllegalTarget { player: String, action: Action },
    #[error("{player} chose card {index} but holds {held}")]
    IllegalCard { player: String, index: usize, held: usize },
    #[error("{player} returned cards {chosen:?} out of {available} during an exchange")]
    IllegalExchange { player: String, chosen: [usize; 2], available: usize },
    #[error("{player} chose counter option {index} of {available}")]
    IllegalCounter { player: String, index: usize, available: usize },
    #[error("could not get an answer from {player}: {reason}")]
    NoAnswer { player: String, reason: String },

    #[error("coins are not conserved: expected {expected}, found {found}")]
    CoinsNotConserved { expected: u32, found: u32 },
    #[error("cards are not conserved: expected {expected}, found {found}")]
    CardsNotConserved { expected: usize, found: usize },
    #[error("the deck ran out of cards")]
    DeckExhausted,
    #[error("the game is already over")]
    GameOver,

    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
