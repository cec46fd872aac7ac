//! Playing cards and the dealing shoe

use rand::seq::SliceRandom;
use rand_chacha::ChaCha12Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Suit {
    Spades,
    Hearts,
    Diamonds,
    Clubs,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Spades, Suit::Hearts, Suit::Diamonds, Suit::Clubs];
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            Suit::Spades => '\u{2660}',
            Suit::Hearts => '\u{2665}',
            Suit::Diamonds => '\u{2666}',
            Suit::Clubs => '\u{2663}',
        };
        write!(f, "{symbol}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rank {
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
}

impl Rank {
    pub const ALL: [Rank; 13] = [
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
    ];

    /// Base value of the rank: face cards count 10, an ace counts 11 until
    /// the hand total downgrades it.
    pub fn value(self) -> u32 {
        match self {
            Rank::Two => 2,
            Rank::Three => 3,
            Rank::Four => 4,
            Rank::Five => 5,
            Rank::Six => 6,
            Rank::Seven => 7,
            Rank::Eight => 8,
            Rank::Nine => 9,
            Rank::Ten | Rank::Jack | Rank::Queen | Rank::King => 10,
            Rank::Ace => 11,
        }
    }

    pub fn is_ace(self) -> bool {
        self == Rank::Ace
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
            Rank::Ace => "A",
        };
        write!(f, "{label}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    pub fn new(rank: Rank, suit: Suit) -> Self {
        Card { rank, suit }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}

/// The dealing shoe: one or more shuffled decks, drawn from the top.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shoe {
    cards: Vec<Card>,
}

impl Shoe {
    /// A fresh shoe of `decks` standard decks, shuffled with the match RNG.
    pub fn shuffled(decks: usize, rng: &mut ChaCha12Rng) -> Self {
        let mut cards = Vec::with_capacity(decks * 52);
        for _ in 0..decks {
            for &suit in &Suit::ALL {
                for &rank in &Rank::ALL {
                    cards.push(Card::new(rank, suit));
                }
            }
        }
        cards.shuffle(rng);
        Shoe { cards }
    }

    /// Deal the next card, or `None` when the shoe is exhausted.
    pub fn draw(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    pub fn remaining(&self) -> usize {
        self.cards.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_shoe_has_fifty_two_cards_per_deck() {
        let mut rng = ChaCha12Rng::seed_from_u64(3);
        assert_eq!(Shoe::shuffled(1, &mut rng).remaining(), 52);
        assert_eq!(Shoe::shuffled(4, &mut rng).remaining(), 208);
    }

    #[test]
    fn test_draw_depletes_the_shoe() {
        let mut rng = ChaCha12Rng::seed_from_u64(3);
        let mut shoe = Shoe::shuffled(1, &mut rng);
        let mut seen = std::collections::HashSet::new();
        while let Some(card) = shoe.draw() {
            seen.insert(card);
        }
        assert_eq!(seen.len(), 52);
        assert!(shoe.draw().is_none());
    }

    #[test]
    fn test_same_seed_same_order() {
        let mut rng1 = ChaCha12Rng::seed_from_u64(12);
        let mut rng2 = ChaCha12Rng::seed_from_u64(12);
        let mut shoe1 = Shoe::shuffled(1, &mut rng1);
        let mut shoe2 = Shoe::shuffled(1, &mut rng2);
        for _ in 0..52 {
            assert_eq!(shoe1.draw(), shoe2.draw());
        }
    }

    #[test]
    fn test_card_display() {
        let card = Card::new(Rank::Ace, Suit::Spades);
        assert_eq!(card.to_string(), "A\u{2660}");
        let ten = Card::new(Rank::Ten, Suit::Hearts);
        assert_eq!(ten.to_string(), "10\u{2665}");
    }
}
