//! Tic-tac-toe on an N-by-N grid

pub mod agents;
pub mod grid;
pub mod rules;

pub use agents::{ConsoleAgent, ScriptedAgent};
pub use grid::{Grid, Square};
pub use rules::TicTacToeRules;
