use crate::{Action, Character, Coup, CoupError, CounterAction};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ChallengeResult {
    NoChallenge,
    // the claimant had the card; the challenger pays
    ChallengeFailed,
    // the claimant was bluffing
    ChallengeSucceeded,
}

/// Something a player said they could do because of a role they hold.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Claim {
    Action(Action),
    Counter(CounterAction),
}

impl Claim {
    pub fn character(&self) -> Option<Character> {
        match self {
            Claim::Action(action) => action.associated_character(),
            Claim::Counter(counter) => Some(counter.claimed),
        }
    }
}

impl Coup {
    /// Offers each accuser, in order, the chance to call `claim`. Only the first taker challenges.
    pub(crate) fn resolve_challenge(&mut self, claimant: usize, claim: Claim, accusers: &[usize]) -> Result<ChallengeResult, CoupError> {
        let Some(claimed) = claim.character() else {
            return Ok(ChallengeResult::NoChallenge);
        };

        let claimant_view = self.players[claimant].opponent(claimant);

        for &challenger in accusers {
            if !self.players[challenger].decide_challenge(&claimant_view, claimed, &self.history)? {
                continue;
            }

            let claimant_name = claimant_view.name.clone();
            let challenger_name = self.players[challenger].name.clone();
            log::info!("{challenger_name} challenges {claimant_name}'s {claimed}");
            self.log_message(format!("{challenger_name} is challenging {claimant_name}!"));

            return match self.players[claimant].take_card(claimed) {
                Some(card) => {
                    self.log_message(format!("{claimant_name} reveals their {card} card!"));
                    self.log_message(format!("{challenger_name} loses the challenge"));
                    self.lose_influence(challenger)?;

                    self.log_message(format!("{claimant_name} gets a new card"));
                    self.deck.put_back(card);
                    self.deck.shuffle(&mut self.rng);
                    let replacement = self.deck.draw().ok_or(CoupError::DeckExhausted)?;
                    self.players[claimant].cards.push(replacement);

                    Ok(ChallengeResult::ChallengeFailed)
                }
                None => {
                    self.log_message(format!("{claimant_name} bluffed! They do not have the {claimed} card!"));
                    self.lose_influence(claimant)?;

                    Ok(ChallengeResult::ChallengeSucceeded)
                }
            };
        }

        Ok(ChallengeResult::NoChallenge)
    }
}

#[cfg(test)]
mod tests {
    use crate::ai::Scripted;
    use crate::challenge::{ChallengeResult, Claim};
    use crate::tests::{give, table};
    use crate::{Action, CounterAction};
    use crate::Character::{Captain, Contessa, Duke};

    #[test]
    fn nobody_challenges() {
        let mut coup = table(vec![Scripted::default(), Scripted::default(), Scripted::default()]);
        give(&mut coup, 0, &[Captain, Captain]);

        let result = coup.resolve_challenge(0, Claim::Action(Action::Tax), &[1, 2]).unwrap();
        assert_eq!(result, ChallengeResult::NoChallenge);
        assert_eq!(coup.players[0].cards.len(), 2);
        assert!(coup.messages.is_empty());
    }

    #[test]
    fn first_accuser_to_challenge_is_the_only_one() {
        let mut coup = table(vec![
            Scripted::default(),
            Scripted::default().challenging(&[true]),
            Scripted::default().challenging(&[true]),
        ]);
        give(&mut coup, 0, &[Duke, Captain]);
        give(&mut coup, 1, &[Contessa, Contessa]);
        give(&mut coup, 2, &[Captain, Contessa]);

        let result = coup.resolve_challenge(0, Claim::Action(Action::Tax), &[1, 2]).unwrap();
        assert_eq!(result, ChallengeResult::ChallengeFailed);

        // player 2 was never asked
        assert_eq!(coup.players[1].cards.len(), 1);
        assert_eq!(coup.players[2].cards.len(), 2);
        assert_eq!(coup.discard.len(), 1);
        assert!(coup.messages[0].contains("is challenging"));
    }

    #[test]
    fn counter_claims_are_checked_against_the_claimed_role() {
        let mut coup = table(vec![
            Scripted::default().challenging(&[true]),
            Scripted::default(),
        ]);
        give(&mut coup, 0, &[Duke, Duke]);
        give(&mut coup, 1, &[Duke, Captain]);

        // player 1 claims Contessa to block an assassination but holds none
        let counter = CounterAction { blocks: Action::Assassinate, claimed: Contessa };
        let result = coup.resolve_challenge(1, Claim::Counter(counter), &[0]).unwrap();

        assert_eq!(result, ChallengeResult::ChallengeSucceeded);
        assert_eq!(coup.players[1].cards.len(), 1);
        assert_eq!(coup.players[0].cards.len(), 2);
    }

    fn position(messages: &[String], needle: &str) -> usize {
        messages.iter().position(|m| m.contains(needle)).unwrap()
    }

    #[test]
    fn reveal_is_narrated_before_the_challenger_pays() {
        let mut coup = table(vec![
            Scripted::default(),
            Scripted::default().challenging(&[true]),
        ]);
        give(&mut coup, 0, &[Duke, Captain]);
        give(&mut coup, 1, &[Contessa, Captain]);

        coup.resolve_challenge(0, Claim::Action(Action::Tax), &[1]).unwrap();

        let messages = &coup.messages;
        let challenging = position(messages, "P1 is challenging P0!");
        let reveal = position(messages, "P0 reveals their Duke card!");
        let lost = position(messages, "P1 loses the challenge");
        let discard = position(messages, "P1 discards their");
        let redraw = position(messages, "P0 gets a new card");
        assert!(challenging < reveal && reveal < lost && lost < discard && discard < redraw);
    }

    #[test]
    fn bluff_is_narrated_before_the_claimant_pays() {
        let mut coup = table(vec![
            Scripted::default(),
            Scripted::default().challenging(&[true]),
        ]);
        give(&mut coup, 0, &[Captain, Contessa]);

        coup.resolve_challenge(0, Claim::Action(Action::Tax), &[1]).unwrap();

        let messages = &coup.messages;
        let challenging = position(messages, "is challenging");
        let bluffed = position(messages, "P0 bluffed!");
        let discard = position(messages, "P0 discards their");
        assert!(challenging < bluffed && bluffed < discard);
        assert_eq!(discard, messages.len() - 1);
    }

    #[test]
    fn unchallengeable_claims_never_ask() {
        let mut coup = table(vec![Scripted::default(), Scripted::default().challenging(&[true])]);
        let result = coup.resolve_challenge(0, Claim::Action(Action::Income), &[1]).unwrap();
        assert_eq!(result, ChallengeResult::NoChallenge);
    }
}
