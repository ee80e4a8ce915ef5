// computer-controlled deciders

use std::collections::VecDeque;
use rand::seq::{index, SliceRandom};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;
use crate::player::{Decider, Decision, Opponent, Seat};
use crate::{Action, Card, Character, CoupError, GameHistory};

/// Plays uniformly at random among legal options, with fixed odds of calling bluffs and blocking.
#[derive(Clone, Debug)]
pub struct RandomDecider {
    rng: Pcg64,
    challenge_rate: f64,
    counter_rate: f64,
}

impl RandomDecider {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg64::seed_from_u64(seed),
            challenge_rate: 0.2,
            counter_rate: 0.25,
        }
    }

    pub fn with_rates(mut self, challenge_rate: f64, counter_rate: f64) -> Self {
        self.challenge_rate = challenge_rate.clamp(0.0, 1.0);
        self.counter_rate = counter_rate.clamp(0.0, 1.0);
        self
    }
}

impl Decider for RandomDecider {
    fn choose_action(&mut self, _seat: &Seat, options: &[Action], opponents: &[Opponent], _history: &GameHistory) -> Result<Decision, CoupError> {
        let action = options.choose(&mut self.rng).copied().unwrap_or(Action::Income);
        let target = if action.requires_target() {
            opponents.choose(&mut self.rng).map(|opponent| opponent.idx)
        } else {
            None
        };

        Ok(Decision { action, target })
    }

    fn determine_challenge(&mut self, seat: &Seat, _claimant: &Opponent, claimed: Character, _history: &GameHistory) -> Result<bool, CoupError> {
        // a claim on a role we hold ourselves is more likely a bluff
        let holding = seat.cards.iter().filter(|card| card.character() == claimed).count();
        let rate = if holding > 0 { self.challenge_rate * 2.0 } else { self.challenge_rate };
        Ok(self.rng.gen_bool(rate.min(1.0)))
    }

    fn determine_counter(&mut self, _seat: &Seat, _claimant: &Opponent, _action: Action, _history: &GameHistory) -> Result<bool, CoupError> {
        Ok(self.rng.gen_bool(self.counter_rate))
    }

    fn choose_counter(&mut self, seat: &Seat, _action: Action, options: &[Character]) -> Result<usize, CoupError> {
        let held = options
            .iter()
            .position(|&claim| seat.cards.iter().any(|card| card.character() == claim));
        Ok(held.unwrap_or_else(|| self.rng.gen_range(0..options.len().max(1))))
    }

    fn choose_card_to_lose(&mut self, seat: &Seat, _history: &GameHistory) -> Result<usize, CoupError> {
        Ok(self.rng.gen_range(0..seat.cards.len().max(1)))
    }

    fn choose_exchange_cards(&mut self, seat: &Seat, drawn: &[Card], _history: &GameHistory) -> Result<[usize; 2], CoupError> {
        let picked = index::sample(&mut self.rng, seat.cards.len() + drawn.len(), 2);
        Ok([picked.index(0), picked.index(1)])
    }
}

/// Replays queued answers, falling back to fixed defaults once a queue runs dry.
#[derive(Clone, Debug, Default)]
pub struct Scripted {
    actions: VecDeque<Decision>,
    challenges: VecDeque<bool>,
    counters: VecDeque<bool>,
    counter_option: usize,
    discard: usize,
    exchange: Option<[usize; 2]>,
    quit: bool,
}

impl Scripted {
    pub fn acting(mut self, decision: Decision) -> Self {
        self.actions.push_back(decision);
        self
    }

    pub fn challenging(mut self, answers: &[bool]) -> Self {
        self.challenges.extend(answers);
        self
    }

    pub fn countering(mut self, answers: &[bool]) -> Self {
        self.counters.extend(answers);
        self
    }

    pub fn counter_option(mut self, option: usize) -> Self {
        self.counter_option = option;
        self
    }

    pub fn discarding(mut self, index: usize) -> Self {
        self.discard = index;
        self
    }

    pub fn exchanging(mut self, indices: [usize; 2]) -> Self {
        self.exchange = Some(indices);
        self
    }

    pub fn quitting(mut self) -> Self {
        self.quit = true;
        self
    }
}

impl Decider for Scripted {
    fn choose_action(&mut self, _seat: &Seat, options: &[Action], opponents: &[Opponent], _history: &GameHistory) -> Result<Decision, CoupError> {
        if let Some(decision) = self.actions.pop_front() {
            return Ok(decision);
        }

        let action = options.first().copied().unwrap_or(Action::Income);
        let target = if action.requires_target() {
            opponents.first().map(|opponent| opponent.idx)
        } else {
            None
        };
        Ok(Decision { action, target })
    }

    fn determine_challenge(&mut self, _seat: &Seat, _claimant: &Opponent, _claimed: Character, _history: &GameHistory) -> Result<bool, CoupError> {
        Ok(self.challenges.pop_front().unwrap_or(false))
    }

    fn determine_counter(&mut self, _seat: &Seat, _claimant: &Opponent, _action: Action, _history: &GameHistory) -> Result<bool, CoupError> {
        Ok(self.counters.pop_front().unwrap_or(false))
    }

    fn choose_counter(&mut self, _seat: &Seat, _action: Action, _options: &[Character]) -> Result<usize, CoupError> {
        Ok(self.counter_option)
    }

    fn choose_card_to_lose(&mut self, _seat: &Seat, _history: &GameHistory) -> Result<usize, CoupError> {
        Ok(self.discard)
    }

    fn choose_exchange_cards(&mut self, seat: &Seat, drawn: &[Card], _history: &GameHistory) -> Result<[usize; 2], CoupError> {
        // default sends the drawn cards straight back
        let available = seat.cards.len() + drawn.len();
        Ok(self.exchange.unwrap_or([available - 2, available - 1]))
    }

    fn end_game_early(&mut self, _seat: &Seat) -> Result<bool, CoupError> {
        Ok(self.quit)
    }
}

#[cfg(test)]
mod tests {
    use crate::ai::{RandomDecider, Scripted};
    use crate::player::{Decider, Opponent, Seat};
    use crate::{Action, Card, GameHistory};
    use crate::Character::{Captain, Contessa, Duke};

    fn opponents() -> Vec<Opponent> {
        vec![
            Opponent { idx: 1, name: "Bo".into(), coins: 2, cards: 2 },
            Opponent { idx: 3, name: "Cy".into(), coins: 0, cards: 1 },
        ]
    }

    #[test]
    fn random_targets_come_from_opponents() {
        let mut decider = RandomDecider::new(11);
        let cards = [Card::new(Duke), Card::new(Captain)];
        let seat = Seat { name: "Ana", coins: 10, cards: &cards };
        let history = GameHistory::default();

        for _ in 0..50 {
            let decision = decider.choose_action(&seat, &[Action::Coup], &opponents(), &history).unwrap();
            assert_eq!(decision.action, Action::Coup);
            assert!(matches!(decision.target, Some(1) | Some(3)));
        }
    }

    #[test]
    fn random_exchange_picks_distinct_cards() {
        let mut decider = RandomDecider::new(5);
        let cards = [Card::new(Duke)];
        let drawn = [Card::new(Captain), Card::new(Contessa)];
        let seat = Seat { name: "Ana", coins: 2, cards: &cards };

        for _ in 0..50 {
            let [a, b] = decider.choose_exchange_cards(&seat, &drawn, &GameHistory::default()).unwrap();
            assert_ne!(a, b);
            assert!(a < 3 && b < 3);
        }
    }

    #[test]
    fn random_counter_prefers_a_held_role() {
        let mut decider = RandomDecider::new(1);
        let cards = [Card::new(Duke), Card::new(Contessa)];
        let seat = Seat { name: "Ana", coins: 2, cards: &cards };
        assert_eq!(decider.choose_counter(&seat, Action::Assassinate, &[Captain, Contessa]).unwrap(), 1);
    }

    #[test]
    fn scripted_falls_back_when_dry() {
        let mut decider = Scripted::default().challenging(&[true]);
        let cards = [Card::new(Duke)];
        let seat = Seat { name: "Ana", coins: 2, cards: &cards };
        let history = GameHistory::default();
        let opponents = opponents();
        let claimant = &opponents[0];

        assert!(decider.determine_challenge(&seat, claimant, Duke, &history).unwrap());
        assert!(!decider.determine_challenge(&seat, claimant, Duke, &history).unwrap());

        let decision = decider.choose_action(&seat, &[Action::Steal, Action::Income], &opponents, &history).unwrap();
        assert_eq!(decision.action, Action::Steal);
        assert_eq!(decision.target, Some(1));
    }
}
