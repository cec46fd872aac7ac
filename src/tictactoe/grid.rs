//! Grid state: squares, occupancy, and the console render

use crate::engine::Seat;
use crate::{ParlorError, Result};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

/// A square on the grid, numbered 1 through N*N reading left-to-right,
/// top-to-bottom. The 1-based numbering is what the console surface shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Square(pub usize);

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One round's board: N*N cells, each empty or owned by a seat, plus the
/// whose-turn marker toggled after every applied move.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Grid {
    size: usize,
    cells: Vec<Option<Seat>>,
    markers: [char; 2],
    to_move: Seat,
}

impl Grid {
    pub fn new(size: usize, markers: [char; 2], first: Seat) -> Self {
        Grid {
            size,
            cells: vec![None; size * size],
            markers,
            to_move: first,
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of squares on the grid.
    pub fn square_count(&self) -> usize {
        self.cells.len()
    }

    /// Seat whose turn it is.
    pub fn to_move(&self) -> Seat {
        self.to_move
    }

    /// Owner of a square, if marked. Out-of-range squares read as empty.
    pub fn owner(&self, square: Square) -> Option<Seat> {
        self.index_of(square).and_then(|i| self.cells[i])
    }

    /// The marker character shown for a seat.
    pub fn marker(&self, seat: Seat) -> char {
        self.markers[seat.index()]
    }

    /// All currently unmarked squares, in numeric order.
    pub fn empty_squares(&self) -> SmallVec<[Square; 8]> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_none())
            .map(|(i, _)| Square(i + 1))
            .collect()
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|cell| cell.is_some())
    }

    /// The middle square (exact center for odd N).
    pub fn center_square(&self) -> Square {
        Square(self.cells.len() / 2 + 1)
    }

    /// Mark a square for `seat` and toggle the turn.
    ///
    /// Fails without mutating anything if the square is out of range or
    /// already occupied.
    pub fn mark(&mut self, square: Square, seat: Seat) -> Result<()> {
        let index = self.index_of(square).ok_or_else(|| {
            ParlorError::InvalidMove(format!(
                "square {square} is out of range (1-{})",
                self.cells.len()
            ))
        })?;
        if self.cells[index].is_some() {
            return Err(ParlorError::InvalidMove(format!(
                "square {square} is already marked"
            )));
        }
        self.cells[index] = Some(seat);
        self.to_move = self.to_move.opponent();
        Ok(())
    }

    /// Owner of a cell by 0-based index (for line scans).
    pub(crate) fn cell_at(&self, index: usize) -> Option<Seat> {
        self.cells[index]
    }

    fn index_of(&self, square: Square) -> Option<usize> {
        if square.0 >= 1 && square.0 <= self.cells.len() {
            Some(square.0 - 1)
        } else {
            None
        }
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cell_text = |row: usize, col: usize| -> char {
            match self.cells[row * self.size + col] {
                Some(seat) => self.markers[seat.index()],
                None => ' ',
            }
        };
        let blank_row = vec!["     "; self.size].join("|").trim_end().to_string();
        let rule_row = vec!["-----"; self.size].join("+");

        for row in 0..self.size {
            if row > 0 {
                writeln!(f, "{rule_row}")?;
            }
            writeln!(f, "{blank_row}")?;
            let marks: Vec<String> = (0..self.size)
                .map(|col| format!("  {}  ", cell_text(row, col)))
                .collect();
            writeln!(f, "{}", marks.join("|").trim_end())?;
            writeln!(f, "{blank_row}")?;
        }
        Ok(())
    }
}
