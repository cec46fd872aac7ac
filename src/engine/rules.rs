//! Rules trait: pure, stateless evaluation over a game state
//!
//! A `Rules` value holds only immutable configuration (board size, marker
//! characters, bust thresholds). All round data lives in the associated
//! `State` type, created fresh per round.

use crate::engine::Seat;
use crate::Result;
use rand_chacha::ChaCha12Rng;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

/// How a finished round ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundOutcome {
    /// The given seat won the round
    Win(Seat),
    /// Neither seat won (full board, push, matching throws)
    Draw,
}

/// Stateless evaluator of legality and outcomes for one game.
///
/// Invariants every implementation upholds:
/// - `legal_moves` returns an empty set exactly when `outcome` is `Some`.
/// - `outcome` has no side effects and reports at most one result.
/// - `apply` rejects any move outside the current legal set with
///   [`ParlorError::InvalidMove`](crate::ParlorError::InvalidMove) and leaves
///   the state untouched.
pub trait Rules {
    /// Per-round mutable state (board, hands, picks). `Display` renders the
    /// table for the console surface.
    type State: fmt::Display;

    /// One move: a square, a hit/stand action, a throw.
    type Move: Clone + PartialEq + fmt::Debug + fmt::Display;

    /// Start a fresh round. The RNG is used for per-round setup such as
    /// shuffling a shoe; board games ignore it.
    fn new_round(&self, rng: &mut ChaCha12Rng) -> Self::State;

    /// Which seat acts next, or `None` once the round is over.
    fn to_act(&self, state: &Self::State) -> Option<Seat>;

    /// The set of moves currently permitted for the seat to act.
    fn legal_moves(&self, state: &Self::State) -> SmallVec<[Self::Move; 8]>;

    /// Apply one move for `seat`, mutating the state.
    fn apply(&self, state: &mut Self::State, seat: Seat, mv: &Self::Move) -> Result<()>;

    /// Terminal check: `Some` once the round has a result.
    fn outcome(&self, state: &Self::State) -> Option<RoundOutcome>;
}
