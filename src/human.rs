use colored::Colorize;
use dialoguer::{Confirm, Select};
use crate::player::{Decider, Decision, Opponent, Seat};
use crate::{Action, Card, Character, CoupError, GameHistory};

/// Prompts a person at the terminal for every decision.
#[derive(Debug, Default)]
pub struct Console;

fn paint(card: &Card) -> String {
    card.to_string().as_str().color(card.style()).bold().to_string()
}

fn show_seat(seat: &Seat) {
    let hand: Vec<String> = seat.cards.iter().map(paint).collect();
    println!("{} | {} coins | {}", seat.name.bold(), seat.coins, hand.join(", "));
}

fn no_answer(player: &str, err: dialoguer::Error) -> CoupError {
    log::error!("prompt for {player} failed: {err}");
    CoupError::NoAnswer { player: player.to_string(), reason: err.to_string() }
}

fn select(seat: &Seat, prompt: &str, items: &[String]) -> Result<usize, CoupError> {
    Select::new()
        .with_prompt(prompt)
        .items(items)
        .default(0)
        .interact()
        .map_err(|err| no_answer(seat.name, err))
}

fn confirm(seat: &Seat, prompt: &str) -> Result<bool, CoupError> {
    Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map_err(|err| no_answer(seat.name, err))
}

impl Decider for Console {
    fn choose_action(&mut self, seat: &Seat, options: &[Action], opponents: &[Opponent], _history: &GameHistory) -> Result<Decision, CoupError> {
        show_seat(seat);

        let names: Vec<String> = options.iter().map(|action| action.to_string()).collect();
        let action = options.get(select(seat, "Choose an action", &names)?).copied().unwrap_or(Action::Income);

        let target = if action.requires_target() {
            let names: Vec<String> = opponents
                .iter()
                .map(|opponent| format!("{} ({} coins, {} cards)", opponent.name, opponent.coins, opponent.cards))
                .collect();
            opponents.get(select(seat, "Choose a target", &names)?).map(|opponent| opponent.idx)
        } else {
            None
        };

        Ok(Decision { action, target })
    }

    fn determine_challenge(&mut self, seat: &Seat, claimant: &Opponent, claimed: Character, _history: &GameHistory) -> Result<bool, CoupError> {
        show_seat(seat);
        confirm(seat, &format!("{} claims the {claimed}. Challenge?", claimant.name))
    }

    fn determine_counter(&mut self, seat: &Seat, claimant: &Opponent, action: Action, _history: &GameHistory) -> Result<bool, CoupError> {
        show_seat(seat);
        confirm(seat, &format!("Block {}'s {action}?", claimant.name))
    }

    fn choose_counter(&mut self, seat: &Seat, action: Action, options: &[Character]) -> Result<usize, CoupError> {
        if options.len() == 1 {
            return Ok(0);
        }
        let names: Vec<String> = options.iter().map(|character| character.to_string()).collect();
        select(seat, &format!("Block the {action} as"), &names)
    }

    fn choose_card_to_lose(&mut self, seat: &Seat, _history: &GameHistory) -> Result<usize, CoupError> {
        let names: Vec<String> = seat.cards.iter().map(paint).collect();
        select(seat, "You lose an influence. Discard which card?", &names)
    }

    fn choose_exchange_cards(&mut self, seat: &Seat, drawn: &[Card], _history: &GameHistory) -> Result<[usize; 2], CoupError> {
        let names: Vec<String> = seat.cards.iter().chain(drawn).map(paint).collect();

        let first = select(seat, "Return the first card to the deck", &names)?;
        let rest: Vec<usize> = (0..names.len()).filter(|&idx| idx != first).collect();
        let rest_names: Vec<String> = rest.iter().map(|&idx| names[idx].clone()).collect();
        let second = select(seat, "Return the second card to the deck", &rest_names)?;

        // `second` indexes the shortened list
        Ok([first, rest.get(second).copied().unwrap_or(first)])
    }

    fn end_game_early(&mut self, seat: &Seat) -> Result<bool, CoupError> {
        confirm(seat, "Do you want to end the game early?")
    }
}
