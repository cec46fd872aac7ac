//! Random agent for testing and baseline gameplay
//!
//! Makes uniform random choices from the legal set. Serves as a baseline
//! opponent and as the workhorse of the simulation mode.

use crate::engine::agent::Agent;
use crate::engine::rules::Rules;
use crate::engine::Seat;
use rand::Rng;
use rand_chacha::ChaCha12Rng;
use std::marker::PhantomData;

/// An agent that picks uniformly at random from the legal moves.
pub struct RandomAgent<R: Rules> {
    seat: Seat,
    _rules: PhantomData<R>,
}

impl<R: Rules> RandomAgent<R> {
    pub fn new(seat: Seat) -> Self {
        RandomAgent {
            seat,
            _rules: PhantomData,
        }
    }
}

impl<R: Rules> Agent<R> for RandomAgent<R> {
    fn seat(&self) -> Seat {
        self.seat
    }

    fn choose(
        &mut self,
        _rules: &R,
        _state: &R::State,
        legal: &[R::Move],
        rng: &mut ChaCha12Rng,
    ) -> R::Move {
        let index = rng.gen_range(0..legal.len());
        legal[index].clone()
    }
}
