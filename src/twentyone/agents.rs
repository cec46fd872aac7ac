//! Twenty-one agents: the threshold policy and the console human

use crate::engine::{Agent, RoundOutcome, Seat};
use crate::twentyone::rules::{HandAction, TableState, TwentyOneRules};
use crate::ui;
use rand_chacha::ChaCha12Rng;

/// Scripted agent with a fixed hit/stand threshold: hit while the hand
/// total is below `stand_at`, stand otherwise. With the threshold set to
/// the rules' dealer stand value this is exactly the house dealer.
pub struct ThresholdAgent {
    seat: Seat,
    stand_at: u32,
    /// Pace hits with a short sleep and a progress line (for play against
    /// a human; simulations leave this off)
    paced: bool,
}

impl ThresholdAgent {
    pub fn new(seat: Seat, stand_at: u32) -> Self {
        ThresholdAgent {
            seat,
            stand_at,
            paced: false,
        }
    }

    /// The house dealer for the given rules.
    pub fn dealer(rules: &TwentyOneRules) -> Self {
        Self::new(Seat::B, rules.dealer_stand())
    }

    pub fn with_pacing(mut self, paced: bool) -> Self {
        self.paced = paced;
        self
    }
}

impl Agent<TwentyOneRules> for ThresholdAgent {
    fn seat(&self) -> Seat {
        self.seat
    }

    fn choose(
        &mut self,
        _rules: &TwentyOneRules,
        state: &TableState,
        _legal: &[HandAction],
        _rng: &mut ChaCha12Rng,
    ) -> HandAction {
        let total = state.total(self.seat);
        let action = if total < self.stand_at {
            HandAction::Hit
        } else {
            HandAction::Stand
        };
        if self.paced {
            ui::prompt("Dealer's turn...");
            ui::pause(500);
        }
        action
    }
}

/// Console agent: shows the table (dealer hole card hidden) and prompts
/// hit-or-stand until the answer parses.
pub struct ConsoleAgent {
    seat: Seat,
}

impl ConsoleAgent {
    pub fn new(seat: Seat) -> Self {
        ConsoleAgent { seat }
    }
}

impl Agent<TwentyOneRules> for ConsoleAgent {
    fn seat(&self) -> Seat {
        self.seat
    }

    fn choose(
        &mut self,
        _rules: &TwentyOneRules,
        state: &TableState,
        _legal: &[HandAction],
        _rng: &mut ChaCha12Rng,
    ) -> HandAction {
        ui::clear_screen();
        println!("{state}");
        loop {
            let answer = ui::ask("Hit (h) or Stand (s)?").to_lowercase();
            if answer.starts_with('h') {
                return HandAction::Hit;
            }
            if answer.starts_with('s') {
                return HandAction::Stand;
            }
            ui::prompt("Please answer h or s.");
        }
    }

    fn on_round_end(&mut self, state: &TableState, outcome: RoundOutcome) {
        println!("\n{state}");
        match outcome {
            RoundOutcome::Win(seat) if seat == self.seat => ui::prompt("You win!"),
            RoundOutcome::Win(_) => ui::prompt("House wins."),
            RoundOutcome::Draw => ui::prompt("Push."),
        }
    }

    fn wants_rematch(&mut self) -> bool {
        ui::confirm("Play again? (y/n)")
    }
}
