//! Agent trait: the interface between the match loop and move producers
//!
//! The match loop calls the agent when a decision is needed; the agent
//! inspects the state and the legal-move set and returns exactly one move.
//! Human agents prompt on stdin and retry until the input is legal; scripted
//! agents never produce an illegal move in the first place.

use crate::engine::rules::{RoundOutcome, Rules};
use crate::engine::Seat;
use rand_chacha::ChaCha12Rng;

/// A move-producing participant, human or scripted.
pub trait Agent<R: Rules> {
    /// The seat this agent occupies for the whole match.
    fn seat(&self) -> Seat;

    /// Choose one move from the legal set.
    ///
    /// `legal` is never empty when this is called. The RNG is the
    /// match-owned generator, passed down so scripted agents stay
    /// deterministic under a fixed seed.
    fn choose(&mut self, rules: &R, state: &R::State, legal: &[R::Move], rng: &mut ChaCha12Rng)
        -> R::Move;

    /// Called once when a round ends, before scores are tallied.
    fn on_round_end(&mut self, _state: &R::State, _outcome: RoundOutcome) {}

    /// Polled between rounds; returning `false` forfeits the match.
    ///
    /// This is the only supported exit checkpoint - there is no mid-round
    /// cancellation.
    fn wants_rematch(&mut self) -> bool {
        true
    }
}
