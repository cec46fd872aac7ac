//! A dealt hand and its total

use crate::twentyone::cards::Card;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An ordered sequence of dealt cards.
///
/// The total is always recomputed from the cards; there is no cached
/// running value to drift out of sync.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    pub fn new() -> Self {
        Hand::default()
    }

    pub fn push(&mut self, card: Card) {
        self.cards.push(card);
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Hand total against a bust threshold. Every ace starts at 11 and is
    /// downgraded to 1, one at a time, while the total exceeds `target`.
    pub fn total(&self, target: u32) -> u32 {
        let mut total: u32 = self.cards.iter().map(|card| card.rank.value()).sum();
        let mut flexible_aces = self.cards.iter().filter(|card| card.rank.is_ace()).count();
        while total > target && flexible_aces > 0 {
            total -= 10;
            flexible_aces -= 1;
        }
        total
    }

    pub fn is_busted(&self, target: u32) -> bool {
        self.total(target) > target
    }

    /// Whether the hand sits exactly on the target total.
    pub fn hits_target(&self, target: u32) -> bool {
        self.total(target) == target
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let labels: Vec<String> = self.cards.iter().map(|card| card.to_string()).collect();
        write!(f, "{}", labels.join(" | "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::twentyone::cards::{Rank, Suit};

    fn hand_of(ranks: &[Rank]) -> Hand {
        let mut hand = Hand::new();
        for &rank in ranks {
            hand.push(Card::new(rank, Suit::Clubs));
        }
        hand
    }

    #[test]
    fn test_ace_king_is_twenty_one() {
        let hand = hand_of(&[Rank::Ace, Rank::King]);
        assert_eq!(hand.total(21), 21);
        assert!(hand.hits_target(21));
        assert!(!hand.is_busted(21));
    }

    #[test]
    fn test_aces_downgrade_one_at_a_time() {
        // A + A + 9: 11 + 11 + 9 = 31, downgrade one ace -> 21
        let hand = hand_of(&[Rank::Ace, Rank::Ace, Rank::Nine]);
        assert_eq!(hand.total(21), 21);

        // A + A + A: 33 -> 23 -> 13
        let triple = hand_of(&[Rank::Ace, Rank::Ace, Rank::Ace]);
        assert_eq!(triple.total(21), 13);
    }

    #[test]
    fn test_face_cards_bust() {
        let hand = hand_of(&[Rank::King, Rank::Queen, Rank::Five]);
        assert_eq!(hand.total(21), 25);
        assert!(hand.is_busted(21));
    }

    #[test]
    fn test_all_aces_downgraded_can_still_bust() {
        // A + K + Q + 2: 11 + 10 + 10 + 2 = 33 -> 23, no aces left flexible
        let hand = hand_of(&[Rank::Ace, Rank::King, Rank::Queen, Rank::Two]);
        assert_eq!(hand.total(21), 23);
        assert!(hand.is_busted(21));
    }

    #[test]
    fn test_total_respects_configured_target() {
        // Same hand, different threshold: A + 6 = 17 under 21, but an ace
        // downgrades against a lower target
        let hand = hand_of(&[Rank::Ace, Rank::Six]);
        assert_eq!(hand.total(21), 17);
        assert_eq!(hand.total(16), 7);
    }

    #[test]
    fn test_total_recomputes_from_scratch() {
        let mut hand = hand_of(&[Rank::Ace]);
        assert_eq!(hand.total(21), 11);
        hand.push(Card::new(Rank::King, Suit::Hearts));
        assert_eq!(hand.total(21), 21);
        hand.push(Card::new(Rank::Three, Suit::Hearts));
        // The ace flips to 1 now that 11 would bust
        assert_eq!(hand.total(21), 14);
    }
}
