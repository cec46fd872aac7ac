//! Generic match engine shared by all games
//!
//! The engine separates the four concerns every game in this crate repeats:
//! state (per-game types), rules (legality and outcomes), agents (move
//! producers), and the match loop (round alternation and scoring).

pub mod agent;
pub mod logger;
pub mod match_loop;
pub mod random_agent;
pub mod rules;
pub mod score;
pub mod seat;

pub use agent::Agent;
pub use logger::{MatchLogger, OutputMode, VerbosityLevel};
pub use match_loop::{MatchConfig, MatchEndReason, MatchLoop, MatchPhase, MatchResult};
pub use random_agent::RandomAgent;
pub use rules::{RoundOutcome, Rules};
pub use score::Scoreboard;
pub use seat::Seat;
