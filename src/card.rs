use std::fmt::{Display, Formatter};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use crate::Character::{Ambassador, Assassin, Captain, Contessa, Duke};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Character {
    Duke,
    Assassin,
    Captain,
    Ambassador,
    Contessa,
}

pub static CHARACTER_VARIANTS: [Character; 5] = [
    Duke,
    Assassin,
    Captain,
    Ambassador,
    Contessa,
];

impl Character {
    /// Colour name used when rendering the card.
    pub fn style(&self) -> &'static str {
        match self {
            Duke => "magenta",
            Assassin => "white",
            Captain => "blue",
            Ambassador => "green",
            Contessa => "red",
        }
    }
}

impl Display for Character {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Duke => "Duke",
            Assassin => "Assassin",
            Captain => "Captain",
            Ambassador => "Ambassador",
            Contessa => "Contessa",
        };
        f.write_str(name)
    }
}

/// An influence card. Cards are only ever moved, never copied.
#[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    character: Character,
}

impl Card {
    pub fn new(character: Character) -> Self {
        Self { character }
    }

    pub fn character(&self) -> Character {
        self.character
    }

    pub fn style(&self) -> &'static str {
        self.character.style()
    }
}

impl Display for Card {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.character, f)
    }
}

/// The face-down draw pile. Draws come off the end.
#[derive(Debug, Default)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Builds `copies` of every character, unshuffled.
    pub fn build(copies: usize) -> Self {
        let cards = CHARACTER_VARIANTS.iter()
            .flat_map(|&character| std::iter::repeat(character).take(copies))
            .map(Card::new)
            .collect();

        Self { cards }
    }

    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
    }

    pub fn draw(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    // callers must shuffle before the next draw
    pub fn put_back(&mut self, card: Card) {
        self.cards.push(card);
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    #[cfg(test)]
    pub(crate) fn take(&mut self, character: Character) -> Option<Card> {
        let idx = self.cards.iter().position(|card| card.character == character)?;
        Some(self.cards.remove(idx))
    }

    pub fn count(&self, character: Character) -> usize {
        self.cards.iter().filter(|card| card.character == character).count()
    }
}

#[cfg(test)]
mod tests {
    use rand_pcg::Pcg64;
    use rand::SeedableRng;
    use crate::card::{Card, Deck, CHARACTER_VARIANTS};
    use crate::Character::{Contessa, Duke};

    #[test]
    fn build_has_every_character() {
        let deck = Deck::build(3);
        assert_eq!(deck.len(), 15);
        for character in CHARACTER_VARIANTS {
            assert_eq!(deck.count(character), 3);
        }
    }

    #[test]
    fn draw_takes_from_the_end() {
        let mut deck = Deck::default();
        deck.put_back(Card::new(Duke));
        deck.put_back(Card::new(Contessa));

        assert_eq!(deck.draw(), Some(Card::new(Contessa)));
        assert_eq!(deck.draw(), Some(Card::new(Duke)));
        assert_eq!(deck.draw(), None);
        assert!(deck.is_empty());
    }

    #[test]
    fn shuffle_keeps_cards() {
        let mut rng = Pcg64::seed_from_u64(7);
        let mut deck = Deck::build(2);
        deck.shuffle(&mut rng);

        assert_eq!(deck.len(), 10);
        for character in CHARACTER_VARIANTS {
            assert_eq!(deck.count(character), 2);
        }
    }
}
