// seats at the table and the deciders behind them

use std::fmt::{Debug, Display, Formatter};
use crate::{Action, Card, Character, CoupError, GameHistory};

/// What a player knows about themself when asked to decide.
#[derive(Debug)]
pub struct Seat<'a> {
    pub name: &'a str,
    pub coins: u8,
    pub cards: &'a [Card],
}

/// The public face of another active player.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Opponent {
    pub idx: usize,
    pub name: String,
    pub coins: u8,
    pub cards: usize,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Decision {
    pub action: Action,
    /// Player index of the target, for actions that need one.
    pub target: Option<usize>,
}

impl Decision {
    pub fn new(action: Action) -> Self {
        Self { action, target: None }
    }

    pub fn against(action: Action, target: usize) -> Self {
        Self { action, target: Some(target) }
    }
}

/// Every answer may fail, for example when a prompt loses its terminal. A failure ends the game.
pub trait Decider {
    /// Picks one of `options`. Targets must come from `opponents`.
    fn choose_action(&mut self, seat: &Seat, options: &[Action], opponents: &[Opponent], history: &GameHistory) -> Result<Decision, CoupError>;

    fn determine_challenge(&mut self, seat: &Seat, claimant: &Opponent, claimed: Character, history: &GameHistory) -> Result<bool, CoupError>;

    fn determine_counter(&mut self, seat: &Seat, claimant: &Opponent, action: Action, history: &GameHistory) -> Result<bool, CoupError>;

    /// Which of the legal blocking roles to claim, as an index into `options`.
    fn choose_counter(&mut self, _seat: &Seat, _action: Action, _options: &[Character]) -> Result<usize, CoupError> {
        Ok(0)
    }

    /// Index into `seat.cards` of the influence to give up.
    fn choose_card_to_lose(&mut self, seat: &Seat, history: &GameHistory) -> Result<usize, CoupError>;

    /// Two distinct indices into `seat.cards` followed by `drawn`, naming the cards to send back.
    fn choose_exchange_cards(&mut self, seat: &Seat, drawn: &[Card], history: &GameHistory) -> Result<[usize; 2], CoupError>;

    /// Asked when this player is knocked out while being the only human at the table.
    fn end_game_early(&mut self, _seat: &Seat) -> Result<bool, CoupError> {
        Ok(false)
    }
}

pub struct Player {
    pub(crate) name: String,
    pub(crate) cards: Vec<Card>,
    pub(crate) coins: u8,
    pub(crate) is_active: bool,
    is_ai: bool,
    decider: Box<dyn Decider>,
}

impl Debug for Player {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Player")
            .field("name", &self.name)
            .field("cards", &self.cards)
            .field("coins", &self.coins)
            .field("is_active", &self.is_active)
            .field("is_ai", &self.is_ai)
            .finish_non_exhaustive()
    }
}

impl Display for Player {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

impl Player {
    pub fn new(name: impl Into<String>, is_ai: bool, decider: Box<dyn Decider>) -> Self {
        Self {
            name: name.into(),
            cards: Vec::with_capacity(4),
            coins: 0,
            is_active: false,
            is_ai,
            decider,
        }
    }

    pub fn ai(name: impl Into<String>, decider: impl Decider + 'static) -> Self {
        Self::new(name, true, Box::new(decider))
    }

    pub fn human(name: impl Into<String>, decider: impl Decider + 'static) -> Self {
        Self::new(name, false, Box::new(decider))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn coins(&self) -> u8 {
        self.coins
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn is_ai(&self) -> bool {
        self.is_ai
    }

    /// Lookup only; the hand is left untouched.
    pub fn find_card(&self, character: Character) -> Option<&Card> {
        self.cards.iter().find(|card| card.character() == character)
    }

    pub(crate) fn opponent(&self, idx: usize) -> Opponent {
        Opponent {
            idx,
            name: self.name.clone(),
            coins: self.coins,
            cards: self.cards.len(),
        }
    }

    pub(crate) fn reset(&mut self, coins: u8) {
        self.cards.clear();
        self.coins = coins;
        self.is_active = true;
    }

    /// Takes the first card of `character` out of the hand.
    pub(crate) fn take_card(&mut self, character: Character) -> Option<Card> {
        let idx = self.cards.iter().position(|card| card.character() == character)?;
        Some(self.cards.remove(idx))
    }

    /// Loses one influence. A lone card goes without asking; an empty hand loses nothing.
    pub(crate) fn remove_card(&mut self, history: &GameHistory) -> Result<Option<Card>, CoupError> {
        match self.cards.len() {
            0 => Ok(None),
            1 => Ok(self.cards.pop()),
            held => {
                let seat = Seat { name: &self.name, coins: self.coins, cards: &self.cards };
                let index = self.decider.choose_card_to_lose(&seat, history)?;
                if index >= held {
                    return Err(CoupError::IllegalCard { player: self.name.clone(), index, held });
                }
                Ok(Some(self.cards.remove(index)))
            }
        }
    }

    /// Merges `drawn` into the hand and hands back the two cards the decider returns.
    pub(crate) fn exchange(&mut self, drawn: [Card; 2], history: &GameHistory) -> Result<[Card; 2], CoupError> {
        let seat = Seat { name: &self.name, coins: self.coins, cards: &self.cards };
        let chosen = match self.decider.choose_exchange_cards(&seat, &drawn, history) {
            Ok(chosen) => chosen,
            Err(err) => {
                self.cards.extend(drawn);
                return Err(err);
            }
        };

        let available = self.cards.len() + drawn.len();
        let [a, b] = chosen;
        if a == b || a >= available || b >= available {
            // the drawn cards still have to land somewhere for the deck count to hold
            self.cards.extend(drawn);
            return Err(CoupError::IllegalExchange { player: self.name.clone(), chosen, available });
        }

        self.cards.extend(drawn);

        // remove the higher index first so the lower one stays put
        let (low, high) = if a < b { (a, b) } else { (b, a) };
        let second = self.cards.remove(high);
        let first = self.cards.remove(low);
        Ok([first, second])
    }

    pub(crate) fn decide_action(&mut self, options: &[Action], opponents: &[Opponent], history: &GameHistory) -> Result<Decision, CoupError> {
        let seat = Seat { name: &self.name, coins: self.coins, cards: &self.cards };
        self.decider.choose_action(&seat, options, opponents, history)
    }

    pub(crate) fn decide_challenge(&mut self, claimant: &Opponent, claimed: Character, history: &GameHistory) -> Result<bool, CoupError> {
        let seat = Seat { name: &self.name, coins: self.coins, cards: &self.cards };
        self.decider.determine_challenge(&seat, claimant, claimed, history)
    }

    pub(crate) fn decide_counter(&mut self, claimant: &Opponent, action: Action, history: &GameHistory) -> Result<bool, CoupError> {
        let seat = Seat { name: &self.name, coins: self.coins, cards: &self.cards };
        self.decider.determine_counter(&seat, claimant, action, history)
    }

    pub(crate) fn decide_counter_role(&mut self, action: Action, options: &[Character]) -> Result<Character, CoupError> {
        let seat = Seat { name: &self.name, coins: self.coins, cards: &self.cards };
        let index = self.decider.choose_counter(&seat, action, options)?;
        options.get(index).copied().ok_or_else(|| CoupError::IllegalCounter {
            player: self.name.clone(),
            index,
            available: options.len(),
        })
    }

    pub(crate) fn wants_to_quit(&mut self) -> Result<bool, CoupError> {
        let seat = Seat { name: &self.name, coins: self.coins, cards: &self.cards };
        self.decider.end_game_early(&seat)
    }
}
