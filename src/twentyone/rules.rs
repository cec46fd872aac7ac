//! Twenty-one rules: the deal, the hit/stand turns, and the showdown

use crate::engine::{RoundOutcome, Rules, Seat};
use crate::twentyone::cards::Shoe;
use crate::twentyone::hand::Hand;
use crate::{ParlorError, Result};
use rand_chacha::ChaCha12Rng;
use serde::{Deserialize, Serialize};
use smallvec::{smallvec, SmallVec};
use std::fmt;

/// A turn action at the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HandAction {
    Hit,
    Stand,
}

impl fmt::Display for HandAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HandAction::Hit => write!(f, "hit"),
            HandAction::Stand => write!(f, "stand"),
        }
    }
}

/// Where the round stands. Seat A plays out first, then the dealer seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TablePhase {
    PlayerTurn,
    DealerTurn,
    Complete,
}

/// One round's table: both hands, the shoe, and the phase marker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableState {
    hands: [Hand; 2],
    shoe: Shoe,
    phase: TablePhase,
    target: u32,
}

impl TableState {
    pub fn hand(&self, seat: Seat) -> &Hand {
        &self.hands[seat.index()]
    }

    pub fn phase(&self) -> TablePhase {
        self.phase
    }

    /// Total for a seat's hand under this table's target.
    pub fn total(&self, seat: Seat) -> u32 {
        self.hands[seat.index()].total(self.target)
    }
}

#[cfg(test)]
impl TableState {
    /// Test seam: swap in a handcrafted dealer hand.
    pub(crate) fn with_dealer_hand(mut self, hand: Hand) -> Self {
        self.hands[Seat::B.index()] = hand;
        self
    }
}

impl fmt::Display for TableState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let player = &self.hands[Seat::A.index()];
        writeln!(f, "Player: {}  (total {})", player, player.total(self.target))?;

        let dealer = &self.hands[Seat::B.index()];
        if self.phase == TablePhase::PlayerTurn && !dealer.is_empty() {
            // Hole card stays face down until the player's turn is over
            let mut labels = vec!["\u{1F0A0}".to_string()];
            labels.extend(dealer.cards()[1..].iter().map(|card| card.to_string()));
            writeln!(f, "Dealer: {}", labels.join(" | "))?;
        } else {
            writeln!(f, "Dealer: {}  (total {})", dealer, dealer.total(self.target))?;
        }
        Ok(())
    }
}

/// Immutable table configuration: target total, the dealer's stand
/// threshold, and how many decks the shoe holds.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TwentyOneRules {
    target: u32,
    dealer_stand: u32,
    decks: usize,
}

impl TwentyOneRules {
    pub fn new(target: u32, dealer_stand: u32, decks: usize) -> Result<Self> {
        if target < 2 {
            return Err(ParlorError::InvalidConfig(format!(
                "target total must be at least 2, got {target}"
            )));
        }
        if dealer_stand == 0 || dealer_stand > target {
            return Err(ParlorError::InvalidConfig(format!(
                "dealer stand threshold {dealer_stand} must be between 1 and the target {target}"
            )));
        }
        if decks == 0 {
            return Err(ParlorError::InvalidConfig(
                "the shoe needs at least one deck".to_string(),
            ));
        }
        Ok(TwentyOneRules {
            target,
            dealer_stand,
            decks,
        })
    }

    /// House rules: 21, dealer stands on 17, single deck.
    pub fn standard() -> Result<Self> {
        Self::new(21, 17, 1)
    }

    pub fn target(&self) -> u32 {
        self.target
    }

    pub fn dealer_stand(&self) -> u32 {
        self.dealer_stand
    }

    fn draw_into(&self, state: &mut TableState, seat: Seat) -> Result<()> {
        let card = state.shoe.draw().ok_or_else(|| {
            ParlorError::InvalidMove("the shoe is out of cards".to_string())
        })?;
        state.hands[seat.index()].push(card);
        Ok(())
    }
}

impl Rules for TwentyOneRules {
    type State = TableState;
    type Move = HandAction;

    fn new_round(&self, rng: &mut ChaCha12Rng) -> TableState {
        let mut state = TableState {
            hands: [Hand::new(), Hand::new()],
            shoe: Shoe::shuffled(self.decks, rng),
            phase: TablePhase::PlayerTurn,
            target: self.target,
        };
        // Opening deal alternates player, dealer, player, dealer. A fresh
        // multi-deck shoe always covers four cards, so the draws cannot fail.
        for _ in 0..2 {
            for seat in [Seat::A, Seat::B] {
                if let Some(card) = state.shoe.draw() {
                    state.hands[seat.index()].push(card);
                }
            }
        }
        // A natural on either side ends the round before anyone acts
        if state.hands[Seat::A.index()].hits_target(self.target)
            || state.hands[Seat::B.index()].hits_target(self.target)
        {
            state.phase = TablePhase::Complete;
        }
        state
    }

    fn to_act(&self, state: &TableState) -> Option<Seat> {
        match state.phase {
            TablePhase::PlayerTurn => Some(Seat::A),
            TablePhase::DealerTurn => Some(Seat::B),
            TablePhase::Complete => None,
        }
    }

    fn legal_moves(&self, state: &TableState) -> SmallVec<[HandAction; 8]> {
        match state.phase {
            TablePhase::Complete => SmallVec::new(),
            _ => smallvec![HandAction::Hit, HandAction::Stand],
        }
    }

    fn apply(&self, state: &mut TableState, seat: Seat, mv: &HandAction) -> Result<()> {
        let expected = self.to_act(state);
        if expected != Some(seat) {
            return Err(ParlorError::InvalidMove(format!(
                "{seat} cannot act in phase {:?}",
                state.phase
            )));
        }

        match mv {
            HandAction::Hit => {
                self.draw_into(state, seat)?;
                let hand = &state.hands[seat.index()];
                match seat {
                    Seat::A => {
                        if hand.is_busted(self.target) {
                            // Busted player loses outright; the dealer never plays
                            state.phase = TablePhase::Complete;
                        } else if hand.hits_target(self.target) {
                            // A made hand has nothing left to decide
                            state.phase = TablePhase::DealerTurn;
                        }
                    }
                    Seat::B => {
                        if hand.is_busted(self.target) {
                            state.phase = TablePhase::Complete;
                        }
                    }
                }
            }
            HandAction::Stand => {
                state.phase = match seat {
                    Seat::A => TablePhase::DealerTurn,
                    Seat::B => TablePhase::Complete,
                };
            }
        }
        Ok(())
    }

    fn outcome(&self, state: &TableState) -> Option<RoundOutcome> {
        if state.phase != TablePhase::Complete {
            return None;
        }
        let player = &state.hands[Seat::A.index()];
        let dealer = &state.hands[Seat::B.index()];
        if player.is_busted(self.target) {
            return Some(RoundOutcome::Win(Seat::B));
        }
        if dealer.is_busted(self.target) {
            return Some(RoundOutcome::Win(Seat::A));
        }
        let player_total = player.total(self.target);
        let dealer_total = dealer.total(self.target);
        Some(match player_total.cmp(&dealer_total) {
            std::cmp::Ordering::Greater => RoundOutcome::Win(Seat::A),
            std::cmp::Ordering::Less => RoundOutcome::Win(Seat::B),
            std::cmp::Ordering::Equal => RoundOutcome::Draw,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::twentyone::cards::{Card, Rank, Suit};
    use rand::SeedableRng;

    fn rng() -> ChaCha12Rng {
        ChaCha12Rng::seed_from_u64(21)
    }

    /// Build a mid-round state directly, bypassing the shoe.
    fn table(player: &[Rank], dealer: &[Rank], phase: TablePhase) -> TableState {
        let mut rng = rng();
        let mut hands = [Hand::new(), Hand::new()];
        for &rank in player {
            hands[0].push(Card::new(rank, Suit::Spades));
        }
        for &rank in dealer {
            hands[1].push(Card::new(rank, Suit::Hearts));
        }
        TableState {
            hands,
            shoe: Shoe::shuffled(1, &mut rng),
            phase,
            target: 21,
        }
    }

    #[test]
    fn test_config_validation() {
        assert!(TwentyOneRules::new(21, 0, 1).is_err());
        assert!(TwentyOneRules::new(21, 22, 1).is_err());
        assert!(TwentyOneRules::new(1, 1, 1).is_err());
        assert!(TwentyOneRules::new(21, 17, 0).is_err());
        assert!(TwentyOneRules::standard().is_ok());
    }

    #[test]
    fn test_new_round_deals_two_cards_each() {
        let rules = TwentyOneRules::standard().unwrap();
        let state = rules.new_round(&mut rng());
        assert_eq!(state.hand(Seat::A).len(), 2);
        assert_eq!(state.hand(Seat::B).len(), 2);
        assert_eq!(state.shoe.remaining(), 48);
    }

    #[test]
    fn test_player_acts_first_then_dealer() {
        let rules = TwentyOneRules::standard().unwrap();
        let mut state = table(&[Rank::Five, Rank::Six], &[Rank::Nine, Rank::Seven], TablePhase::PlayerTurn);
        assert_eq!(rules.to_act(&state), Some(Seat::A));

        rules.apply(&mut state, Seat::A, &HandAction::Stand).unwrap();
        assert_eq!(state.phase(), TablePhase::DealerTurn);
        assert_eq!(rules.to_act(&state), Some(Seat::B));

        rules.apply(&mut state, Seat::B, &HandAction::Stand).unwrap();
        assert_eq!(state.phase(), TablePhase::Complete);
        assert_eq!(rules.to_act(&state), None);
        assert!(rules.legal_moves(&state).is_empty());
    }

    #[test]
    fn test_acting_out_of_phase_is_rejected() {
        let rules = TwentyOneRules::standard().unwrap();
        let mut state = table(&[Rank::Five, Rank::Six], &[Rank::Nine, Rank::Seven], TablePhase::PlayerTurn);
        let result = rules.apply(&mut state, Seat::B, &HandAction::Hit);
        assert!(matches!(result, Err(ParlorError::InvalidMove(_))));
        assert_eq!(state.phase(), TablePhase::PlayerTurn);
        assert_eq!(state.hand(Seat::B).len(), 2);
    }

    #[test]
    fn test_player_bust_completes_the_round() {
        let rules = TwentyOneRules::standard().unwrap();
        // 10 + 9 sitting at 19: hitting runs a real risk; force it by
        // drawing until the hand busts
        let mut state = table(&[Rank::Ten, Rank::Nine], &[Rank::Nine, Rank::Seven], TablePhase::PlayerTurn);
        while state.phase() == TablePhase::PlayerTurn {
            rules.apply(&mut state, Seat::A, &HandAction::Hit).unwrap();
            if state.hand(Seat::A).is_busted(21) {
                break;
            }
            if state.hand(Seat::A).hits_target(21) {
                // Made hand: turn passed to the dealer automatically
                assert_eq!(state.phase(), TablePhase::DealerTurn);
                return;
            }
        }
        assert_eq!(state.phase(), TablePhase::Complete);
        assert_eq!(rules.outcome(&state), Some(RoundOutcome::Win(Seat::B)));
    }

    #[test]
    fn test_dealer_bust_wins_for_player() {
        let rules = TwentyOneRules::standard().unwrap();
        let state = table(
            &[Rank::Ten, Rank::Nine],
            &[Rank::King, Rank::Queen, Rank::Five],
            TablePhase::Complete,
        );
        assert_eq!(rules.outcome(&state), Some(RoundOutcome::Win(Seat::A)));
    }

    #[test]
    fn test_equal_totals_push() {
        let rules = TwentyOneRules::standard().unwrap();
        let state = table(
            &[Rank::Ten, Rank::Nine],
            &[Rank::Nine, Rank::Ten],
            TablePhase::Complete,
        );
        assert_eq!(rules.outcome(&state), Some(RoundOutcome::Draw));
    }

    #[test]
    fn test_higher_total_wins() {
        let rules = TwentyOneRules::standard().unwrap();
        let state = table(
            &[Rank::Ten, Rank::Nine],
            &[Rank::Nine, Rank::Eight],
            TablePhase::Complete,
        );
        assert_eq!(rules.outcome(&state), Some(RoundOutcome::Win(Seat::A)));
    }

    #[test]
    fn test_no_outcome_while_round_is_live() {
        let rules = TwentyOneRules::standard().unwrap();
        let state = table(&[Rank::Five, Rank::Six], &[Rank::Nine, Rank::Seven], TablePhase::PlayerTurn);
        assert_eq!(rules.outcome(&state), None);
    }

    #[test]
    fn test_hole_card_hidden_until_player_stands() {
        let rules = TwentyOneRules::standard().unwrap();
        let mut state = table(&[Rank::Five, Rank::Six], &[Rank::Nine, Rank::Seven], TablePhase::PlayerTurn);
        let hidden = state.to_string();
        assert!(hidden.contains('\u{1F0A0}'));
        assert!(!hidden.contains("9\u{2665}"));

        rules.apply(&mut state, Seat::A, &HandAction::Stand).unwrap();
        let revealed = state.to_string();
        assert!(revealed.contains("9\u{2665}"));
    }
}
