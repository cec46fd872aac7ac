//! Twenty-one: shoe, hands, and the hit/stand round

pub mod agents;
pub mod cards;
pub mod hand;
pub mod rules;

pub use agents::{ConsoleAgent, ThresholdAgent};
pub use cards::{Card, Rank, Shoe, Suit};
pub use hand::Hand;
pub use rules::{HandAction, TablePhase, TableState, TwentyOneRules};
