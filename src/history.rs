use std::fmt::{Display, Formatter};
use std::io::Write;
use serde::{Deserialize, Serialize};
use crate::CoupError;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    pub name: String,
    pub number_of_coins: u8,
    pub number_of_cards: usize,
}

/// Table snapshot taken once a turn has resolved.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinalState {
    pub player_states: Vec<PlayerState>,
    pub number_of_cards_in_deck: usize,
    pub number_of_coins_in_treasury: u8,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnRecord {
    pub turn: usize,
    pub current_player: String,
    pub messages: Vec<String>,
    pub final_state: Option<FinalState>,
}

/// Append-only log of every turn played so far.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameHistory {
    history: Vec<TurnRecord>,
}

#[derive(Serialize)]
struct SnapshotRow<'a> {
    turn: usize,
    current_player: &'a str,
    player: &'a str,
    coins: u8,
    cards: usize,
    deck: usize,
    treasury: u8,
}

impl GameHistory {
    pub fn records(&self) -> &[TurnRecord] {
        &self.history
    }

    pub fn last(&self) -> Option<&TurnRecord> {
        self.history.last()
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    pub(crate) fn open(&mut self, turn: usize, current_player: &str) {
        self.history.push(TurnRecord {
            turn,
            current_player: current_player.to_string(),
            messages: Vec::new(),
            final_state: None,
        });
    }

    // the only mutation an opened record ever sees
    pub(crate) fn close(&mut self, messages: Vec<String>, final_state: FinalState) {
        if let Some(record) = self.history.last_mut() {
            record.messages = messages;
            record.final_state = Some(final_state);
        }
    }

    pub fn to_json(&self) -> Result<String, CoupError> {
        Ok(serde_json::to_string_pretty(&self.history)?)
    }

    /// One row per player per closed turn.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<(), CoupError> {
        let mut csv = csv::Writer::from_writer(writer);

        for record in &self.history {
            let Some(state) = &record.final_state else { continue };
            for player in &state.player_states {
                csv.serialize(SnapshotRow {
                    turn: record.turn,
                    current_player: &record.current_player,
                    player: &player.name,
                    coins: player.number_of_coins,
                    cards: player.number_of_cards,
                    deck: state.number_of_cards_in_deck,
                    treasury: state.number_of_coins_in_treasury,
                })?;
            }
        }

        csv.flush()?;
        Ok(())
    }
}

impl Display for TurnRecord {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Turn {}:", self.turn)?;
        writeln!(f, "  Current Player: {}", self.current_player)?;
        for message in &self.messages {
            writeln!(f, "    {message}")?;
        }
        if let Some(state) = &self.final_state {
            writeln!(f, "  Final State:")?;
            for player in &state.player_states {
                writeln!(f, "    {}: Coins - {}, Cards - {}", player.name, player.number_of_coins, player.number_of_cards)?;
            }
            writeln!(f, "    Deck: {} cards", state.number_of_cards_in_deck)?;
            writeln!(f, "    Treasury: {} coins", state.number_of_coins_in_treasury)?;
        }
        Ok(())
    }
}

impl Display for GameHistory {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for record in &self.history {
            Display::fmt(record, f)?;
        }
        Ok(())
    }
}
