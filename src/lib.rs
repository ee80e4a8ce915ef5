pub mod action;
pub mod ai;
pub mod card;
pub mod challenge;
pub mod error;
mod execute;
pub mod history;
#[cfg(feature = "cli")]
pub mod human;
pub mod player;
pub mod rules;
pub mod treasury;

pub use action::{Action, CounterAction};
pub use card::{Card, Character, Deck};
pub use challenge::{ChallengeResult, Claim};
pub use error::CoupError;
pub use history::{FinalState, GameHistory, PlayerState, TurnRecord};
pub use player::{Decider, Decision, Opponent, Player, Seat};
pub use rules::Rules;
pub use treasury::Treasury;

use std::collections::HashSet;
use std::fmt::{Debug, Formatter};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;
use crate::challenge::ChallengeResult::{ChallengeFailed, ChallengeSucceeded, NoChallenge};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TurnOutcome {
    Continue,
    // index of the last player standing
    GameOver(usize),
    // the only human was knocked out and chose to stop
    Abandoned,
}

/// One game at one table. Owns every card, every coin and the turn log.
pub struct Coup {
    turn: usize,
    current_player_idx: usize,
    deck: Deck,
    discard: Vec<Card>,
    players: Vec<Player>,
    treasury: Treasury,
    rules: Rules,
    history: GameHistory,
    messages: Vec<String>,
    rng: Pcg64,
    finished: bool,
}

impl Debug for Coup {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(format!("T {} | P {} | D {} | $ {}\n", self.turn, self.current_player_idx, self.deck.len(), self.treasury.balance()).as_str())?;
        for (player_idx, player) in self.players.iter().enumerate() {
            let cards: Vec<Character> = player.cards.iter().map(Card::character).collect();
            f.write_str(format!("\tP {player_idx}: {} ${} | {:?}{}\n", player.name, player.coins, cards, if player.is_active { "" } else { " (out)" }).as_str())?;
        }
        Ok(())
    }
}

impl Coup {
    /// Seats `players` and deals the opening hands.
    pub fn new(players: Vec<Player>, rules: Rules, seed: u64) -> Result<Self, CoupError> {
        rules.validate_for(players.len())?;

        let mut names = HashSet::new();
        for player in &players {
            if !names.insert(player.name()) {
                return Err(CoupError::DuplicateName(player.name().to_string()));
            }
        }

        let mut game = Self {
            turn: 0,
            current_player_idx: 0,
            deck: Deck::default(),
            discard: Vec::new(),
            players,
            treasury: Treasury::default(),
            rules,
            history: GameHistory::default(),
            messages: Vec::new(),
            rng: Pcg64::seed_from_u64(seed),
            finished: false,
        };
        game.setup_game()?;

        Ok(game)
    }

    /// Resets the table: fresh shuffled deck, two cards and the starting coins each,
    /// a random first player and an empty history.
    pub fn setup_game(&mut self) -> Result<(), CoupError> {
        self.deck = Deck::build(self.rules.copies_per_character);
        self.deck.shuffle(&mut self.rng);
        self.discard.clear();

        let dealt = self.rules.starting_coins * self.players.len() as u8;
        self.treasury = Treasury::new(self.rules.total_coins - dealt);

        for player in self.players.iter_mut() {
            player.reset(self.rules.starting_coins);
            for _ in 0..2 {
                let card = self.deck.draw().ok_or(CoupError::DeckExhausted)?;
                player.cards.push(card);
            }
        }

        self.current_player_idx = self.rng.gen_range(0..self.players.len());
        self.history = GameHistory::default();
        self.turn = 0;
        self.messages.clear();
        self.finished = false;

        log::info!("new game with {} players, {} to start", self.players.len(), self.players[self.current_player_idx].name);
        Ok(())
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn current_player(&self) -> &Player {
        &self.players[self.current_player_idx]
    }

    pub fn current_player_idx(&self) -> usize {
        self.current_player_idx
    }

    pub fn turn(&self) -> usize {
        self.turn
    }

    pub fn treasury(&self) -> u8 {
        self.treasury.balance()
    }

    pub fn deck_len(&self) -> usize {
        self.deck.len()
    }

    pub fn discarded(&self) -> &[Card] {
        &self.discard
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    pub fn history(&self) -> &GameHistory {
        &self.history
    }

    /// Appends a line to the turn being resolved, or to the next one if called between turns.
    pub fn log_message(&mut self, message: impl Into<String>) {
        let message = message.into();
        log::debug!("{message}");
        self.messages.push(message);
    }

    /// Plays one turn. `Ok(true)` means the game is over or was abandoned.
    pub fn handle_turn(&mut self) -> Result<bool, CoupError> {
        Ok(self.resolve_turn()? != TurnOutcome::Continue)
    }

    pub fn resolve_turn(&mut self) -> Result<TurnOutcome, CoupError> {
        if self.finished || self.winner().is_some() {
            return Err(CoupError::GameOver);
        }

        self.turn += 1;

        let actor = self.current_player_idx;
        self.history.open(self.turn, &self.players[actor].name);

        let Decision { action, target } = self.action_phase(actor)?;

        let challenge = if action.can_be_challenged() {
            let accusers = self.other_active(actor);
            self.resolve_challenge(actor, Claim::Action(action), &accusers)?
        } else {
            NoChallenge
        };

        match challenge {
            // bluff called, the action never happens
            ChallengeSucceeded => {}
            ChallengeFailed => self.execute(action, actor, target, false)?,
            NoChallenge if !action.can_be_countered() => self.execute(action, actor, target, false)?,
            NoChallenge => {
                let countered = match self.counter_phase(actor, action)? {
                    Some((countering, counter)) => {
                        let accusers = self.other_active(countering);
                        let result = self.resolve_challenge(countering, Claim::Counter(counter), &accusers)?;
                        result != ChallengeSucceeded
                    }
                    None => false,
                };
                self.execute(action, actor, target, countered)?;
            }
        }

        let abandoned = self.elimination_sweep()?;

        if let Some(winner) = self.winner() {
            let name = self.players[winner].name.clone();
            log::info!("{name} wins after {} turns", self.turn);
            self.log_message(format!("Congratulations {name}! You are the final survivor!"));
            self.finished = true;
            self.close_turn();
            self.check_invariants()?;
            return Ok(TurnOutcome::GameOver(winner));
        }

        if abandoned {
            self.finished = true;
            self.close_turn();
            self.check_invariants()?;
            return Ok(TurnOutcome::Abandoned);
        }

        self.close_turn();
        self.current_player_idx = self.next_living_player();
        self.check_invariants()?;

        Ok(TurnOutcome::Continue)
    }

    /// Everything `player_idx` may declare right now.
    pub fn legal_actions(&self, player_idx: usize) -> Vec<Action> {
        let coins = self.players[player_idx].coins;

        // forced coup
        if coins >= self.rules.forced_coup_threshold {
            return vec![Action::Coup];
        }

        let mut actions = Vec::with_capacity(7);
        actions.push(Action::Income);
        actions.push(Action::ForeignAid);
        actions.push(Action::Tax);
        actions.push(Action::Exchange);
        actions.push(Action::Steal);

        if coins >= self.rules.assassinate_cost {
            actions.push(Action::Assassinate);
        }
        if coins >= self.rules.coup_cost {
            actions.push(Action::Coup);
        }

        actions
    }

    /// Only other players still in the game can be targeted.
    pub fn legal_targets(&self, player_idx: usize) -> Vec<usize> {
        self.other_active(player_idx)
    }

    pub fn winner(&self) -> Option<usize> {
        let mut active = self.players.iter().enumerate().filter(|(_, player)| player.is_active);
        match (active.next(), active.next()) {
            (Some((idx, _)), None) => Some(idx),
            _ => None,
        }
    }

    /// Checks that no coin or card has been created or destroyed.
    pub fn check_invariants(&self) -> Result<(), CoupError> {
        let coins = self.treasury.balance() as u32 + self.players.iter().map(|player| player.coins as u32).sum::<u32>();
        if coins != self.rules.total_coins as u32 {
            return Err(CoupError::CoinsNotConserved { expected: self.rules.total_coins as u32, found: coins });
        }

        let cards = self.deck.len() + self.discard.len() + self.players.iter().map(|player| player.cards.len()).sum::<usize>();
        if cards != self.rules.total_cards() {
            return Err(CoupError::CardsNotConserved { expected: self.rules.total_cards(), found: cards });
        }

        Ok(())
    }

    fn action_phase(&mut self, actor: usize) -> Result<Decision, CoupError> {
        let options = self.legal_actions(actor);
        let opponents = self.opponents(actor);

        let decision = self.players[actor].decide_action(&options, &opponents, &self.history)?;

        if !options.contains(&decision.action) {
            return Err(CoupError::IllegalAction { player: self.players[actor].name.clone(), action: decision.action });
        }

        let target_ok = match (decision.action.requires_target(), decision.target) {
            (true, Some(target)) => opponents.iter().any(|opponent| opponent.idx == target),
            (false, None) => true,
            _ => false,
        };
        if !target_ok {
            return Err(CoupError::IllegalTarget { player: self.players[actor].name.clone(), action: decision.action });
        }

        let target_name = decision.target.map(|target| self.players[target].name.as_str());
        let message = action::describe(&self.players[actor].name, decision.action, target_name);
        log::info!("turn {:<4}{message}", self.turn);
        self.log_message(message);

        Ok(decision)
    }

    /// Asks the other players in seat order whether they block; the first yes wins.
    fn counter_phase(&mut self, actor: usize, action: Action) -> Result<Option<(usize, CounterAction)>, CoupError> {
        let claims = self.rules.counters_for(action).to_vec();
        if claims.is_empty() {
            return Ok(None);
        }

        let claimant = self.players[actor].opponent(actor);

        for countering in self.other_active(actor) {
            if !self.players[countering].decide_counter(&claimant, action, &self.history)? {
                continue;
            }

            let claimed = self.players[countering].decide_counter_role(action, &claims)?;
            let counter = CounterAction { blocks: action, claimed };
            let message = action::describe_counter(&self.players[countering].name, &claimant.name, counter);
            log::info!("{message}");
            self.log_message(message);

            return Ok(Some((countering, counter)));
        }

        Ok(None)
    }

    /// Knocks out everyone left without cards. Returns true if the game should stop early,
    /// which the only human can ask for once they are out and nobody has won yet.
    fn elimination_sweep(&mut self) -> Result<bool, CoupError> {
        let mut lone_human_out = None;

        while let Some(idx) = self.players.iter().position(|player| player.is_active && player.cards.is_empty()) {
            let player = &mut self.players[idx];
            player.is_active = false;
            let coins = player.coins;
            let returned = self.treasury.collect(player, coins);

            let name = self.players[idx].name.clone();
            log::info!("{name} is out, {returned} coins return to the treasury");
            self.log_message(format!("{name} was defeated!"));

            let humans = self.players.iter().filter(|player| !player.is_ai()).count();
            if !self.players[idx].is_ai() && humans == 1 {
                lone_human_out = Some(idx);
            }
        }

        match lone_human_out {
            Some(idx) if self.winner().is_none() => self.players[idx].wants_to_quit(),
            _ => Ok(false),
        }
    }

    /// Loses one influence, face up onto the discard pile.
    pub(crate) fn lose_influence(&mut self, player_idx: usize) -> Result<(), CoupError> {
        if let Some(card) = self.players[player_idx].remove_card(&self.history)? {
            let name = self.players[player_idx].name.clone();
            self.log_message(format!("{name} discards their {card} card"));
            self.discard.push(card);
        }
        Ok(())
    }

    fn close_turn(&mut self) {
        let snapshot = self.snapshot();
        let messages = std::mem::take(&mut self.messages);
        self.history.close(messages, snapshot);
    }

    fn snapshot(&self) -> FinalState {
        FinalState {
            player_states: self.players
                .iter()
                .map(|player| PlayerState {
                    name: player.name.clone(),
                    number_of_coins: player.coins,
                    number_of_cards: player.cards.len(),
                })
                .collect(),
            number_of_cards_in_deck: self.deck.len(),
            number_of_coins_in_treasury: self.treasury.balance(),
        }
    }

    // seat order, not rotated around `exclude_idx`
    fn other_active(&self, exclude_idx: usize) -> Vec<usize> {
        self.players
            .iter()
            .enumerate()
            .filter(|(idx, player)| *idx != exclude_idx && player.is_active)
            .map(|(idx, _)| idx)
            .collect()
    }

    fn opponents(&self, player_idx: usize) -> Vec<Opponent> {
        self.other_active(player_idx)
            .into_iter()
            .map(|idx| self.players[idx].opponent(idx))
            .collect()
    }

    fn next_living_player(&self) -> usize {
        let mut idx = self.current_player_idx;

        idx = (idx + 1) % self.players.len();
        while !self.players[idx].is_active {
            idx = (idx + 1) % self.players.len();
        }

        idx
    }
}
