//! Rock-paper-scissors agents: the adaptive computer and the console human

use crate::engine::{Agent, RoundOutcome, Seat};
use crate::rps::rules::{RpsRules, RpsState, Throw};
use crate::ui;
use rand::Rng;
use rand_chacha::ChaCha12Rng;
use rustc_hash::FxHashMap;

/// Running record for one throw.
#[derive(Debug, Clone, Copy, Default)]
struct ThrowRecord {
    plays: u32,
    losses: u32,
}

impl ThrowRecord {
    fn loss_weight(&self) -> f64 {
        if self.plays == 0 {
            0.0
        } else {
            f64::from(self.losses) / f64::from(self.plays)
        }
    }
}

/// Threshold above which a throw is retired from the candidate pool.
const LOSS_CUTOFF: f64 = 0.6;

/// Adaptive agent: tracks how often each of its own throws has lost and
/// stops using throws that lose at least 60% of the time. Within the
/// remaining candidates the pick is uniform.
pub struct AdaptiveAgent {
    seat: Seat,
    history: FxHashMap<Throw, ThrowRecord>,
    last_throw: Option<Throw>,
}

impl AdaptiveAgent {
    pub fn new(seat: Seat) -> Self {
        AdaptiveAgent {
            seat,
            history: FxHashMap::default(),
            last_throw: None,
        }
    }

    fn candidates(&self) -> Vec<Throw> {
        let open: Vec<Throw> = Throw::ALL
            .iter()
            .copied()
            .filter(|throw| {
                self.history
                    .get(throw)
                    .map_or(true, |record| record.loss_weight() < LOSS_CUTOFF)
            })
            .collect();
        if open.is_empty() {
            // Everything is losing; no reason to stop playing the game
            Throw::ALL.to_vec()
        } else {
            open
        }
    }
}

impl Agent<RpsRules> for AdaptiveAgent {
    fn seat(&self) -> Seat {
        self.seat
    }

    fn choose(
        &mut self,
        _rules: &RpsRules,
        _state: &RpsState,
        _legal: &[Throw],
        rng: &mut ChaCha12Rng,
    ) -> Throw {
        let candidates = self.candidates();
        let throw = candidates[rng.gen_range(0..candidates.len())];
        self.last_throw = Some(throw);
        throw
    }

    fn on_round_end(&mut self, _state: &RpsState, outcome: RoundOutcome) {
        if let Some(throw) = self.last_throw.take() {
            let record = self.history.entry(throw).or_default();
            record.plays += 1;
            if outcome == RoundOutcome::Win(self.seat.opponent()) {
                record.losses += 1;
            }
        }
    }
}

/// Console agent: prompts for a full throw name until one parses.
pub struct ConsoleAgent {
    seat: Seat,
}

impl ConsoleAgent {
    pub fn new(seat: Seat) -> Self {
        ConsoleAgent { seat }
    }
}

impl Agent<RpsRules> for ConsoleAgent {
    fn seat(&self) -> Seat {
        self.seat
    }

    fn choose(
        &mut self,
        _rules: &RpsRules,
        _state: &RpsState,
        _legal: &[Throw],
        _rng: &mut ChaCha12Rng,
    ) -> Throw {
        loop {
            let answer = ui::ask("Choose rock, paper, or scissors:");
            if let Some(throw) = Throw::parse(&answer) {
                return throw;
            }
            ui::prompt("Invalid choice.");
        }
    }

    fn on_round_end(&mut self, state: &RpsState, outcome: RoundOutcome) {
        print!("{state}");
        match outcome {
            RoundOutcome::Win(seat) if seat == self.seat => ui::prompt("You won!"),
            RoundOutcome::Win(_) => ui::prompt("You lost."),
            RoundOutcome::Draw => ui::prompt("It's a tie."),
        }
    }

    fn wants_rematch(&mut self) -> bool {
        ui::confirm("Play again? (y/n)")
    }
}
