//! Rock-paper-scissors with an adaptive computer opponent

pub mod agents;
pub mod rules;

pub use agents::{AdaptiveAgent, ConsoleAgent};
pub use rules::{RpsRules, RpsState, Throw};
