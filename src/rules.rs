// game-balance configuration, overridable from JSON

use std::path::Path;
use serde::{Deserialize, Serialize};
use crate::{Action, Character, CoupError};
use crate::card::CHARACTER_VARIANTS;
use crate::Character::{Ambassador, Captain, Contessa, Duke};

pub const MAX_PLAYERS: usize = 6;

// cards drawn by an exchange, and returned by it
pub const EXCHANGE_DRAW: usize = 2;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterRule {
    pub action: Action,
    pub claims: Vec<Character>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Rules {
    pub starting_coins: u8,
    pub total_coins: u8,
    pub copies_per_character: usize,
    /// At or above this many coins the only legal action is a coup.
    pub forced_coup_threshold: u8,
    pub income: u8,
    pub foreign_aid: u8,
    pub tax: u8,
    pub coup_cost: u8,
    pub assassinate_cost: u8,
    pub steal_amount: u8,
    pub counters: Vec<CounterRule>,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            starting_coins: 2,
            total_coins: 50,
            copies_per_character: 3,
            forced_coup_threshold: 10,
            income: 1,
            foreign_aid: 2,
            tax: 3,
            coup_cost: 7,
            assassinate_cost: 3,
            steal_amount: 2,
            counters: vec![
                CounterRule { action: Action::ForeignAid, claims: vec![Duke] },
                CounterRule { action: Action::Assassinate, claims: vec![Contessa] },
                CounterRule { action: Action::Steal, claims: vec![Captain, Ambassador] },
            ],
        }
    }
}

impl Rules {
    pub fn from_json(json: &str) -> Result<Self, CoupError> {
        let rules: Rules = serde_json::from_str(json)?;
        rules.validate()?;
        Ok(rules)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, CoupError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn total_cards(&self) -> usize {
        self.copies_per_character * CHARACTER_VARIANTS.len()
    }

    /// Roles that may legally block `action`. Empty when nothing blocks it.
    pub fn counters_for(&self, action: Action) -> &[Character] {
        self.counters
            .iter()
            .find(|rule| rule.action == action)
            .map(|rule| rule.claims.as_slice())
            .unwrap_or(&[])
    }

    pub fn validate(&self) -> Result<(), CoupError> {
        if self.coup_cost == 0 || self.coup_cost > self.forced_coup_threshold {
            return Err(CoupError::InvalidRules(format!(
                "coup cost {} must be between 1 and the forced coup threshold {}",
                self.coup_cost, self.forced_coup_threshold
            )));
        }

        for rule in &self.counters {
            if !rule.action.can_be_countered() {
                return Err(CoupError::InvalidRules(format!("{} cannot be countered", rule.action)));
            }
            if rule.claims.is_empty() {
                return Err(CoupError::InvalidRules(format!("no counter roles listed for {}", rule.action)));
            }
        }

        Ok(())
    }

    /// Checks that `players` seats can be dealt in and still leave enough for an exchange.
    pub fn validate_for(&self, players: usize) -> Result<(), CoupError> {
        self.validate()?;

        if !(2..=MAX_PLAYERS).contains(&players) {
            return Err(CoupError::InvalidPlayerCount { got: players, max: MAX_PLAYERS });
        }

        let needed = players * 2 + EXCHANGE_DRAW;
        if self.total_cards() < needed {
            return Err(CoupError::NotEnoughCards { players, needed, built: self.total_cards() });
        }

        let dealt = self.starting_coins as usize * players;
        if dealt > self.total_coins as usize {
            return Err(CoupError::InvalidRules(format!(
                "{players} players need {dealt} starting coins but only {} exist",
                self.total_coins
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::rules::Rules;
    use crate::{Action, CoupError};
    use crate::Character::{Ambassador, Captain, Contessa};

    #[test]
    fn classic_counters() {
        let rules = Rules::default();
        assert_eq!(rules.counters_for(Action::Steal), &[Captain, Ambassador]);
        assert_eq!(rules.counters_for(Action::Assassinate), &[Contessa]);
        assert!(rules.counters_for(Action::Tax).is_empty());
        assert_eq!(rules.total_cards(), 15);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let rules = Rules::from_json(r#"{ "forced_coup_threshold": 12, "tax": 4 }"#).unwrap();
        assert_eq!(rules.forced_coup_threshold, 12);
        assert_eq!(rules.tax, 4);
        assert_eq!(rules.coup_cost, 7);
        assert_eq!(rules.counters, Rules::default().counters);
    }

    #[test]
    fn rejects_uncounterable_rule() {
        let json = r#"{ "counters": [ { "action": "Tax", "claims": ["Duke"] } ] }"#;
        assert!(matches!(Rules::from_json(json), Err(CoupError::InvalidRules(_))));
    }

    #[test]
    fn player_limits() {
        let rules = Rules::default();
        assert!(rules.validate_for(2).is_ok());
        assert!(rules.validate_for(6).is_ok());
        assert!(matches!(rules.validate_for(1), Err(CoupError::InvalidPlayerCount { .. })));
        assert!(matches!(rules.validate_for(7), Err(CoupError::InvalidPlayerCount { .. })));

        let small = Rules { copies_per_character: 1, ..Rules::default() };
        assert!(matches!(small.validate_for(2), Err(CoupError::NotEnoughCards { .. })));
    }
}
