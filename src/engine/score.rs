//! Match scoring across rounds

use crate::engine::rules::RoundOutcome;
use crate::engine::Seat;
use crate::{ParlorError, Result};
use serde::{Deserialize, Serialize};

/// Win/draw tallies for one match.
///
/// Scores persist across rounds within a match and reset when a new match
/// starts. The match ends once either seat reaches `winning_score`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scoreboard {
    wins: [u32; 2],
    draws: u32,
    winning_score: u32,
}

impl Scoreboard {
    /// Create a scoreboard for a first-to-`winning_score` match.
    ///
    /// A threshold of zero would end the match before any round is played,
    /// so it is rejected up front.
    pub fn new(winning_score: u32) -> Result<Self> {
        if winning_score == 0 {
            return Err(ParlorError::InvalidConfig(
                "winning score must be at least 1".to_string(),
            ));
        }
        Ok(Scoreboard {
            wins: [0, 0],
            draws: 0,
            winning_score,
        })
    }

    /// Record a finished round.
    pub fn record(&mut self, outcome: RoundOutcome) {
        match outcome {
            RoundOutcome::Win(seat) => self.wins[seat.index()] += 1,
            RoundOutcome::Draw => self.draws += 1,
        }
    }

    pub fn wins(&self, seat: Seat) -> u32 {
        self.wins[seat.index()]
    }

    pub fn draws(&self) -> u32 {
        self.draws
    }

    pub fn winning_score(&self) -> u32 {
        self.winning_score
    }

    /// The seat that has reached the winning score, if any.
    pub fn match_winner(&self) -> Option<Seat> {
        if self.wins[Seat::A.index()] >= self.winning_score {
            Some(Seat::A)
        } else if self.wins[Seat::B.index()] >= self.winning_score {
            Some(Seat::B)
        } else {
            None
        }
    }

    /// Clear all tallies for a new match.
    pub fn reset(&mut self) {
        self.wins = [0, 0];
        self.draws = 0;
    }
}
