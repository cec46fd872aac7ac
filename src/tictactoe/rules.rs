//! Tic-tac-toe rules: line generation, legality, and win detection

use crate::engine::{RoundOutcome, Rules, Seat};
use crate::tictactoe::grid::{Grid, Square};
use crate::{ParlorError, Result};
use rand_chacha::ChaCha12Rng;
use smallvec::SmallVec;

/// Immutable tic-tac-toe configuration: grid size, marker characters, first
/// seat, and the generated winning-line tables (rows, columns, diagonals).
#[derive(Debug, Clone)]
pub struct TicTacToeRules {
    size: usize,
    markers: [char; 2],
    first: Seat,
    lines: Vec<Vec<usize>>,
}

impl TicTacToeRules {
    /// Build rules for an N-by-N grid. Sizes seen in play are 3, 5, and 9;
    /// anything from 3 up to 9 is accepted.
    pub fn new(size: usize, markers: [char; 2], first: Seat) -> Result<Self> {
        if !(3..=9).contains(&size) {
            return Err(ParlorError::InvalidConfig(format!(
                "grid size must be between 3 and 9, got {size}"
            )));
        }
        if markers[0] == markers[1] {
            return Err(ParlorError::InvalidConfig(format!(
                "both seats use the marker '{}'",
                markers[0]
            )));
        }
        Ok(TicTacToeRules {
            size,
            markers,
            first,
            lines: generate_lines(size),
        })
    }

    /// Standard 3x3 game: X moves first.
    pub fn standard() -> Result<Self> {
        Self::new(3, ['X', 'O'], Seat::A)
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// A square that completes a line for `seat` on the next move, if one
    /// exists: the line has every other cell owned by `seat` and exactly one
    /// empty cell. Used both to take a win and to block the opponent's.
    pub fn at_risk_square(&self, grid: &Grid, seat: Seat) -> Option<Square> {
        for line in &self.lines {
            let owned = line
                .iter()
                .filter(|&&i| grid.cell_at(i) == Some(seat))
                .count();
            if owned == self.size - 1 {
                if let Some(&empty) = line.iter().find(|&&i| grid.cell_at(i).is_none()) {
                    return Some(Square(empty + 1));
                }
            }
        }
        None
    }

    /// The seat holding a completed line, if any.
    fn line_winner(&self, grid: &Grid) -> Option<Seat> {
        for line in &self.lines {
            if let Some(seat) = grid.cell_at(line[0]) {
                if line.iter().all(|&i| grid.cell_at(i) == Some(seat)) {
                    return Some(seat);
                }
            }
        }
        None
    }
}

impl Rules for TicTacToeRules {
    type State = Grid;
    type Move = Square;

    fn new_round(&self, _rng: &mut ChaCha12Rng) -> Grid {
        Grid::new(self.size, self.markers, self.first)
    }

    fn to_act(&self, state: &Grid) -> Option<Seat> {
        if self.outcome(state).is_some() {
            None
        } else {
            Some(state.to_move())
        }
    }

    fn legal_moves(&self, state: &Grid) -> SmallVec<[Square; 8]> {
        if self.outcome(state).is_some() {
            SmallVec::new()
        } else {
            state.empty_squares()
        }
    }

    fn apply(&self, state: &mut Grid, seat: Seat, mv: &Square) -> Result<()> {
        if self.outcome(state).is_some() {
            return Err(ParlorError::InvalidMove(
                "the round is already over".to_string(),
            ));
        }
        if state.to_move() != seat {
            return Err(ParlorError::InvalidMove(format!(
                "it is not {seat}'s turn"
            )));
        }
        state.mark(*mv, seat)
    }

    fn outcome(&self, state: &Grid) -> Option<RoundOutcome> {
        if let Some(seat) = self.line_winner(state) {
            Some(RoundOutcome::Win(seat))
        } else if state.is_full() {
            Some(RoundOutcome::Draw)
        } else {
            None
        }
    }
}

/// Rows, columns, and both diagonals as 0-based cell indices.
fn generate_lines(size: usize) -> Vec<Vec<usize>> {
    let mut lines = Vec::with_capacity(2 * size + 2);
    for row in 0..size {
        lines.push((0..size).map(|col| row * size + col).collect());
    }
    for col in 0..size {
        lines.push((0..size).map(|row| row * size + col).collect());
    }
    lines.push((0..size).map(|i| i * size + i).collect());
    lines.push((0..size).map(|i| i * size + (size - 1 - i)).collect());
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn rng() -> ChaCha12Rng {
        ChaCha12Rng::seed_from_u64(0)
    }

    fn grid_with(rules: &TicTacToeRules, a: &[usize], b: &[usize]) -> Grid {
        // Interleave marks so the turn marker stays consistent
        let mut grid = rules.new_round(&mut rng());
        let mut a_iter = a.iter();
        let mut b_iter = b.iter();
        loop {
            match (a_iter.next(), b_iter.next()) {
                (None, None) => break,
                (sa, sb) => {
                    if let Some(&n) = sa {
                        grid.mark(Square(n), Seat::A).unwrap();
                    }
                    if let Some(&n) = sb {
                        grid.mark(Square(n), Seat::B).unwrap();
                    }
                }
            }
        }
        grid
    }

    #[test]
    fn test_line_generation_counts() {
        assert_eq!(generate_lines(3).len(), 8);
        assert_eq!(generate_lines(5).len(), 12);
        assert_eq!(generate_lines(9).len(), 20);
    }

    #[test]
    fn test_standard_lines_match_known_table() {
        // The familiar 3x3 table, as 1-based squares
        let known: Vec<Vec<usize>> = vec![
            vec![1, 2, 3],
            vec![4, 5, 6],
            vec![7, 8, 9],
            vec![1, 4, 7],
            vec![2, 5, 8],
            vec![3, 6, 9],
            vec![1, 5, 9],
            vec![3, 5, 7],
        ];
        let generated: Vec<Vec<usize>> = generate_lines(3)
            .into_iter()
            .map(|line| line.into_iter().map(|i| i + 1).collect())
            .collect();
        assert_eq!(generated, known);
    }

    #[test]
    fn test_rejects_bad_config() {
        assert!(TicTacToeRules::new(2, ['X', 'O'], Seat::A).is_err());
        assert!(TicTacToeRules::new(10, ['X', 'O'], Seat::A).is_err());
        assert!(TicTacToeRules::new(3, ['X', 'X'], Seat::A).is_err());
    }

    #[test]
    fn test_legal_moves_are_exactly_the_empty_squares() {
        let rules = TicTacToeRules::standard().unwrap();
        let grid = grid_with(&rules, &[1, 5], &[9]);
        let legal = rules.legal_moves(&grid);
        assert_eq!(legal.as_slice(), grid.empty_squares().as_slice());
        assert_eq!(legal.len(), 6);
    }

    #[test]
    fn test_no_winner_reported_for_live_round() {
        let rules = TicTacToeRules::standard().unwrap();
        let grid = grid_with(&rules, &[1, 2], &[4, 5]);
        assert_eq!(rules.outcome(&grid), None);
        assert_eq!(rules.to_act(&grid), Some(Seat::A));
    }

    #[test]
    fn test_completed_row_wins_and_ends_round() {
        let rules = TicTacToeRules::standard().unwrap();
        // A holds 1 and 2; B plays elsewhere and never blocks
        let mut grid = grid_with(&rules, &[1, 2], &[4, 5]);
        rules.apply(&mut grid, Seat::A, &Square(3)).unwrap();

        assert_eq!(rules.outcome(&grid), Some(RoundOutcome::Win(Seat::A)));
        assert_eq!(rules.to_act(&grid), None);
        assert!(rules.legal_moves(&grid).is_empty());
    }

    #[test]
    fn test_column_and_diagonal_wins() {
        let rules = TicTacToeRules::standard().unwrap();
        let column = grid_with(&rules, &[2, 5, 8], &[1, 3]);
        assert_eq!(rules.outcome(&column), Some(RoundOutcome::Win(Seat::A)));

        let diagonal = grid_with(&rules, &[2, 4], &[1, 5, 9]);
        assert_eq!(rules.outcome(&diagonal), Some(RoundOutcome::Win(Seat::B)));
    }

    #[test]
    fn test_full_grid_without_line_is_a_draw() {
        let rules = TicTacToeRules::standard().unwrap();
        // X X O / O O X / X O X - no line
        let grid = grid_with(&rules, &[1, 2, 6, 7, 9], &[3, 4, 5, 8]);
        assert_eq!(rules.outcome(&grid), Some(RoundOutcome::Draw));
    }

    #[test]
    fn test_apply_after_win_is_rejected() {
        let rules = TicTacToeRules::standard().unwrap();
        let mut grid = grid_with(&rules, &[1, 2, 3], &[4, 5]);
        assert!(rules.outcome(&grid).is_some());
        let result = rules.apply(&mut grid, Seat::B, &Square(6));
        assert!(matches!(result, Err(ParlorError::InvalidMove(_))));
    }

    #[test]
    fn test_apply_out_of_turn_is_rejected() {
        let rules = TicTacToeRules::standard().unwrap();
        let mut grid = rules.new_round(&mut rng());
        let result = rules.apply(&mut grid, Seat::B, &Square(1));
        assert!(matches!(result, Err(ParlorError::InvalidMove(_))));
    }

    #[test]
    fn test_at_risk_square_finds_win_and_block() {
        let rules = TicTacToeRules::standard().unwrap();
        let grid = grid_with(&rules, &[1, 2], &[4, 5]);
        // A can complete the top row at 3; B can complete the middle row at 6
        assert_eq!(rules.at_risk_square(&grid, Seat::A), Some(Square(3)));
        assert_eq!(rules.at_risk_square(&grid, Seat::B), Some(Square(6)));
    }

    #[test]
    fn test_at_risk_square_ignores_blocked_lines() {
        let rules = TicTacToeRules::standard().unwrap();
        // A holds 1 and 2 but B already took 3: the top row is dead
        let grid = grid_with(&rules, &[1, 2], &[3, 5]);
        assert_eq!(rules.at_risk_square(&grid, Seat::A), None);
    }

    #[test]
    fn test_five_by_five_win_requires_full_line() {
        let rules = TicTacToeRules::new(5, ['X', 'O'], Seat::A).unwrap();
        let mut grid = rules.new_round(&mut rng());
        // A fills the top row while B shadows on the second row
        for (a, b) in [(1, 6), (2, 7), (3, 8), (4, 9)] {
            grid.mark(Square(a), Seat::A).unwrap();
            grid.mark(Square(b), Seat::B).unwrap();
            assert_eq!(rules.outcome(&grid), None);
        }
        grid.mark(Square(5), Seat::A).unwrap();
        assert_eq!(rules.outcome(&grid), Some(RoundOutcome::Win(Seat::A)));
    }
}
