//! Seat markers for the two participants of a match

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the two seats at the table.
///
/// Every game in this crate is strictly two-participant; whoever is
/// "current" is tracked inside the game state and toggled via [`Seat::opponent`]
/// after each applied move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Seat {
    A,
    B,
}

impl Seat {
    /// The other seat.
    pub fn opponent(self) -> Seat {
        match self {
            Seat::A => Seat::B,
            Seat::B => Seat::A,
        }
    }

    /// Index into per-seat arrays (`[T; 2]`).
    pub fn index(self) -> usize {
        match self {
            Seat::A => 0,
            Seat::B => 1,
        }
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Seat::A => write!(f, "Player 1"),
            Seat::B => write!(f, "Player 2"),
        }
    }
}
