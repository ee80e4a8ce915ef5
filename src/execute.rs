use crate::rules::EXCHANGE_DRAW;
use crate::treasury::transfer;
use crate::{Action, Coup, CoupError, Player};

impl Coup {
    /// Applies the effect of an action that has already survived its challenge and counter phases.
    /// Legality is the caller's job; a target with no cards left is simply skipped.
    pub(crate) fn execute(&mut self, action: Action, actor: usize, target: Option<usize>, countered: bool) -> Result<(), CoupError> {
        let actor_name = self.players[actor].name.clone();

        match action {
            Action::Income => {
                let paid = self.treasury.grant(&mut self.players[actor], self.rules.income);
                self.log_message(format!("{actor_name}'s coins are increased by {paid}"));
            }
            Action::ForeignAid => {
                if countered {
                    self.log_message(format!("{actor_name}'s Foreign Aid is blocked"));
                } else {
                    let paid = self.treasury.grant(&mut self.players[actor], self.rules.foreign_aid);
                    self.log_message(format!("{actor_name}'s coins are increased by {paid}"));
                }
            }
            Action::Tax => {
                let paid = self.treasury.grant(&mut self.players[actor], self.rules.tax);
                self.log_message(format!("{actor_name}'s coins are increased by {paid}"));
            }
            Action::Coup => {
                let paid = self.treasury.collect(&mut self.players[actor], self.rules.coup_cost);
                if let Some(target) = target {
                    let target_name = self.players[target].name.clone();
                    self.log_message(format!("{actor_name} pays {paid} coins and performs the coup against {target_name}"));
                    if !self.players[target].cards.is_empty() {
                        self.lose_influence(target)?;
                    }
                }
            }
            Action::Assassinate => {
                // the fee is spent whether or not the hit lands
                let paid = self.treasury.collect(&mut self.players[actor], self.rules.assassinate_cost);
                self.log_message(format!("{actor_name} pays {paid} coins to the Assassin"));

                if let Some(target) = target {
                    let target_name = self.players[target].name.clone();
                    if countered {
                        self.log_message(format!("{target_name} survives the assassination"));
                    } else if !self.players[target].cards.is_empty() {
                        self.log_message(format!("{actor_name} assassinates {target_name}"));
                        self.lose_influence(target)?;
                    }
                }
            }
            Action::Steal => {
                if let Some(target) = target {
                    let target_name = self.players[target].name.clone();
                    if countered {
                        self.log_message(format!("{actor_name} fails to steal from {target_name}"));
                    } else {
                        let (from, to) = pair_mut(&mut self.players, target, actor);
                        let stolen = transfer(from, to, self.rules.steal_amount);
                        self.log_message(format!("{actor_name} steals {stolen} coins from {target_name}"));
                    }
                }
            }
            Action::Exchange => self.exchange(actor)?,
        }

        Ok(())
    }

    fn exchange(&mut self, actor: usize) -> Result<(), CoupError> {
        if self.deck.len() < EXCHANGE_DRAW {
            return Err(CoupError::DeckExhausted);
        }

        let first = self.deck.draw().ok_or(CoupError::DeckExhausted)?;
        let second = self.deck.draw().ok_or(CoupError::DeckExhausted)?;

        let returned = self.players[actor].exchange([first, second], &self.history)?;
        for card in returned {
            self.deck.put_back(card);
        }
        self.deck.shuffle(&mut self.rng);

        let name = self.players[actor].name.clone();
        self.log_message(format!("{name} exchanges 2 cards"));
        Ok(())
    }
}

/// Two distinct players borrowed mutably at once.
fn pair_mut(players: &mut [Player], a: usize, b: usize) -> (&mut Player, &mut Player) {
    debug_assert_ne!(a, b);
    if a < b {
        let (left, right) = players.split_at_mut(b);
        (&mut left[a], &mut right[0])
    } else {
        let (left, right) = players.split_at_mut(a);
        (&mut right[0], &mut left[b])
    }
}

#[cfg(test)]
mod tests {
    use crate::ai::Scripted;
    use crate::tests::{give, set_coins, table};
    use crate::Action;
    use crate::Character::{Ambassador, Captain, Contessa, Duke};

    #[test]
    fn income_and_tax() {
        let mut coup = table(vec![Scripted::default(), Scripted::default()]);

        coup.execute(Action::Income, 0, None, false).unwrap();
        assert_eq!(coup.players[0].coins, 3);

        coup.execute(Action::Tax, 0, None, false).unwrap();
        assert_eq!(coup.players[0].coins, 6);
        assert_eq!(coup.treasury.balance(), 50 - 6 - 2);
    }

    #[test]
    fn countered_foreign_aid_pays_nothing() {
        let mut coup = table(vec![Scripted::default(), Scripted::default()]);

        coup.execute(Action::ForeignAid, 0, None, true).unwrap();
        assert_eq!(coup.players[0].coins, 2);

        coup.execute(Action::ForeignAid, 0, None, false).unwrap();
        assert_eq!(coup.players[0].coins, 4);
    }

    #[test]
    fn countered_assassination_still_costs() {
        let mut coup = table(vec![Scripted::default(), Scripted::default()]);
        set_coins(&mut coup, 0, 3);

        coup.execute(Action::Assassinate, 0, Some(1), true).unwrap();
        assert_eq!(coup.players[0].coins, 0);
        assert_eq!(coup.players[1].cards.len(), 2);
    }

    #[test]
    fn assassination_takes_a_card() {
        let mut coup = table(vec![Scripted::default(), Scripted::default().discarding(1)]);
        set_coins(&mut coup, 0, 3);
        give(&mut coup, 1, &[Duke, Contessa]);

        coup.execute(Action::Assassinate, 0, Some(1), false).unwrap();
        assert_eq!(coup.players[0].coins, 0);
        assert_eq!(coup.players[1].cards.len(), 1);
        assert_eq!(coup.players[1].cards[0].character(), Duke);
        assert_eq!(coup.discard[0].character(), Contessa);
    }

    #[test]
    fn coup_on_an_empty_hand_is_a_no_op() {
        let mut coup = table(vec![Scripted::default(), Scripted::default()]);
        set_coins(&mut coup, 0, 7);
        give(&mut coup, 1, &[]);

        coup.execute(Action::Coup, 0, Some(1), false).unwrap();
        assert_eq!(coup.players[0].coins, 0);
        assert!(coup.discard.is_empty());
    }

    #[test]
    fn steal_takes_at_most_two() {
        let mut coup = table(vec![Scripted::default(), Scripted::default(), Scripted::default()]);
        set_coins(&mut coup, 2, 1);

        coup.execute(Action::Steal, 0, Some(1), false).unwrap();
        assert_eq!((coup.players[0].coins, coup.players[1].coins), (4, 0));

        coup.execute(Action::Steal, 0, Some(2), false).unwrap();
        assert_eq!((coup.players[0].coins, coup.players[2].coins), (5, 0));

        // stealing from an empty stack moves nothing
        coup.execute(Action::Steal, 0, Some(1), false).unwrap();
        assert_eq!(coup.players[0].coins, 5);
    }

    #[test]
    fn countered_steal_moves_nothing() {
        let mut coup = table(vec![Scripted::default(), Scripted::default()]);

        coup.execute(Action::Steal, 1, Some(0), true).unwrap();
        assert_eq!((coup.players[0].coins, coup.players[1].coins), (2, 2));
    }

    #[test]
    fn exchange_returns_two_cards() {
        // keep both drawn cards, send back the hand we started with
        let mut coup = table(vec![Scripted::default().exchanging([0, 1]), Scripted::default()]);
        give(&mut coup, 0, &[Ambassador, Captain]);
        let deck_before = coup.deck.len();

        coup.execute(Action::Exchange, 0, None, false).unwrap();

        assert_eq!(coup.players[0].cards.len(), 2);
        assert_eq!(coup.deck.len(), deck_before);
        assert!(coup.check_invariants().is_ok());
        assert_eq!(coup.messages.last().unwrap(), "P0 exchanges 2 cards");
    }
}
