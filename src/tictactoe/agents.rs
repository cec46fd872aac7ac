//! Tic-tac-toe agents: scripted heuristic play and the console human

use crate::engine::{Agent, RoundOutcome, Seat};
use crate::tictactoe::grid::{Grid, Square};
use crate::tictactoe::rules::TicTacToeRules;
use crate::ui;
use rand::Rng;
use rand_chacha::ChaCha12Rng;

/// Scripted agent with a fixed priority policy:
///
/// 1. take an immediate winning square,
/// 2. block the opponent's immediate winning square,
/// 3. take the center square,
/// 4. otherwise pick uniformly at random from the legal squares.
///
/// Taking the win and blocking are two distinct checks, in that order; a
/// winning move is never passed up to block.
pub struct ScriptedAgent {
    seat: Seat,
}

impl ScriptedAgent {
    pub fn new(seat: Seat) -> Self {
        ScriptedAgent { seat }
    }
}

impl Agent<TicTacToeRules> for ScriptedAgent {
    fn seat(&self) -> Seat {
        self.seat
    }

    fn choose(
        &mut self,
        rules: &TicTacToeRules,
        state: &Grid,
        legal: &[Square],
        rng: &mut ChaCha12Rng,
    ) -> Square {
        if let Some(winning) = rules.at_risk_square(state, self.seat) {
            return winning;
        }
        if let Some(block) = rules.at_risk_square(state, self.seat.opponent()) {
            return block;
        }
        let center = state.center_square();
        if state.owner(center).is_none() {
            return center;
        }
        legal[rng.gen_range(0..legal.len())]
    }
}

/// Console agent: renders the grid and prompts for a square until the
/// answer is one of the open squares.
pub struct ConsoleAgent {
    seat: Seat,
}

impl ConsoleAgent {
    pub fn new(seat: Seat) -> Self {
        ConsoleAgent { seat }
    }
}

impl Agent<TicTacToeRules> for ConsoleAgent {
    fn seat(&self) -> Seat {
        self.seat
    }

    fn choose(
        &mut self,
        _rules: &TicTacToeRules,
        state: &Grid,
        legal: &[Square],
        _rng: &mut ChaCha12Rng,
    ) -> Square {
        ui::clear_screen();
        println!("{state}");
        println!("You are {}.", state.marker(self.seat));
        loop {
            let answer = ui::ask(&format!(
                "Choose a square ({}):",
                ui::joinor(legal, ", ", "or")
            ));
            match ui::parse_number(&answer) {
                Ok(n) if legal.contains(&Square(n)) => return Square(n),
                _ => ui::prompt("Sorry, that is not a valid choice."),
            }
        }
    }

    fn on_round_end(&mut self, state: &Grid, outcome: RoundOutcome) {
        println!("\n{state}");
        match outcome {
            RoundOutcome::Win(seat) if seat == self.seat => ui::prompt("You won!"),
            RoundOutcome::Win(_) => ui::prompt("You lost."),
            RoundOutcome::Draw => ui::prompt("It's a tie."),
        }
    }

    fn wants_rematch(&mut self) -> bool {
        let answer = ui::ask("Ready? Press <enter> or forfeit (f)").to_lowercase();
        !answer.starts_with('f')
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Rules;
    use rand::SeedableRng;

    fn rng() -> ChaCha12Rng {
        ChaCha12Rng::seed_from_u64(1)
    }

    fn play(grid: &mut Grid, seat: Seat, squares: &[usize]) {
        for &n in squares {
            grid.mark(Square(n), seat).unwrap();
        }
    }

    #[test]
    fn test_scripted_takes_the_win() {
        let rules = TicTacToeRules::standard().unwrap();
        let mut grid = rules.new_round(&mut rng());
        play(&mut grid, Seat::A, &[1, 2]);
        play(&mut grid, Seat::B, &[4, 5]);

        let legal = rules.legal_moves(&grid);
        let mut agent = ScriptedAgent::new(Seat::A);
        // Both 3 (win) and 6 (block) complete a line; winning comes first
        assert_eq!(agent.choose(&rules, &grid, &legal, &mut rng()), Square(3));
    }

    #[test]
    fn test_scripted_blocks_when_it_cannot_win() {
        let rules = TicTacToeRules::standard().unwrap();
        let mut grid = rules.new_round(&mut rng());
        play(&mut grid, Seat::A, &[1, 2]);
        play(&mut grid, Seat::B, &[5]);

        let legal = rules.legal_moves(&grid);
        let mut agent = ScriptedAgent::new(Seat::B);
        assert_eq!(agent.choose(&rules, &grid, &legal, &mut rng()), Square(3));
    }

    #[test]
    fn test_scripted_prefers_center() {
        let rules = TicTacToeRules::standard().unwrap();
        let mut grid = rules.new_round(&mut rng());
        play(&mut grid, Seat::A, &[1]);

        let legal = rules.legal_moves(&grid);
        let mut agent = ScriptedAgent::new(Seat::B);
        assert_eq!(agent.choose(&rules, &grid, &legal, &mut rng()), Square(5));
    }

    #[test]
    fn test_scripted_falls_back_to_a_legal_square() {
        let rules = TicTacToeRules::standard().unwrap();
        let mut grid = rules.new_round(&mut rng());
        // Opening move for A: no win, no block, center already gone
        play(&mut grid, Seat::B, &[5]);

        let legal = rules.legal_moves(&grid);
        let mut agent = ScriptedAgent::new(Seat::A);
        let chosen = agent.choose(&rules, &grid, &legal, &mut rng());
        assert!(legal.contains(&chosen));
        assert_ne!(chosen, Square(5));
    }
}
