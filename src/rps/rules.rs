//! Rock-paper-scissors rules

use crate::engine::{RoundOutcome, Rules, Seat};
use crate::{ParlorError, Result};
use rand_chacha::ChaCha12Rng;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Throw {
    Rock,
    Paper,
    Scissors,
}

impl Throw {
    pub const ALL: [Throw; 3] = [Throw::Rock, Throw::Paper, Throw::Scissors];

    pub fn beats(self, other: Throw) -> bool {
        matches!(
            (self, other),
            (Throw::Rock, Throw::Scissors)
                | (Throw::Paper, Throw::Rock)
                | (Throw::Scissors, Throw::Paper)
        )
    }

    pub fn parse(input: &str) -> Option<Throw> {
        match input.to_lowercase().as_str() {
            "rock" => Some(Throw::Rock),
            "paper" => Some(Throw::Paper),
            "scissors" => Some(Throw::Scissors),
            _ => None,
        }
    }
}

impl fmt::Display for Throw {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Throw::Rock => write!(f, "rock"),
            Throw::Paper => write!(f, "paper"),
            Throw::Scissors => write!(f, "scissors"),
        }
    }
}

/// One round's picks. Both seats throw once; the round resolves when both
/// picks are in. Seat A is asked first, but picks stay hidden until the
/// reveal so ordering leaks nothing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RpsState {
    picks: [Option<Throw>; 2],
}

impl RpsState {
    pub fn pick(&self, seat: Seat) -> Option<Throw> {
        self.picks[seat.index()]
    }

    fn is_resolved(&self) -> bool {
        self.picks.iter().all(|pick| pick.is_some())
    }
}

impl fmt::Display for RpsState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_resolved() {
            for seat in [Seat::A, Seat::B] {
                if let Some(throw) = self.picks[seat.index()] {
                    writeln!(f, "{seat} chose: {throw}")?;
                }
            }
            Ok(())
        } else {
            writeln!(f, "(choices hidden)")
        }
    }
}

/// Stateless rules: every throw is always legal until both are in.
#[derive(Debug, Clone, Copy, Default)]
pub struct RpsRules;

impl Rules for RpsRules {
    type State = RpsState;
    type Move = Throw;

    fn new_round(&self, _rng: &mut ChaCha12Rng) -> RpsState {
        RpsState::default()
    }

    fn to_act(&self, state: &RpsState) -> Option<Seat> {
        [Seat::A, Seat::B]
            .into_iter()
            .find(|seat| state.picks[seat.index()].is_none())
    }

    fn legal_moves(&self, state: &RpsState) -> SmallVec<[Throw; 8]> {
        if state.is_resolved() {
            SmallVec::new()
        } else {
            SmallVec::from_slice(&Throw::ALL)
        }
    }

    fn apply(&self, state: &mut RpsState, seat: Seat, mv: &Throw) -> Result<()> {
        if self.to_act(state) != Some(seat) {
            return Err(ParlorError::InvalidMove(format!(
                "{seat} has already thrown"
            )));
        }
        state.picks[seat.index()] = Some(*mv);
        Ok(())
    }

    fn outcome(&self, state: &RpsState) -> Option<RoundOutcome> {
        let a = state.picks[Seat::A.index()]?;
        let b = state.picks[Seat::B.index()]?;
        Some(if a.beats(b) {
            RoundOutcome::Win(Seat::A)
        } else if b.beats(a) {
            RoundOutcome::Win(Seat::B)
        } else {
            RoundOutcome::Draw
        })
    }
}
