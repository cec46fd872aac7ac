//! Simulation mode: run many AI-vs-AI matches and collect statistics
//!
//! Matches run sequentially on the calling thread; each match gets its own
//! seed derived from the base seed so a whole simulation replays exactly.

use crate::engine::{
    Agent, MatchConfig, MatchEndReason, MatchLogger, MatchLoop, OutputMode, RandomAgent, Rules,
    Seat, VerbosityLevel,
};
use crate::rps::{AdaptiveAgent, RpsRules};
use crate::tictactoe::{ScriptedAgent, TicTacToeRules};
use crate::twentyone::{ThresholdAgent, TwentyOneRules};
use crate::Result;
use serde::Serialize;
use std::time::Instant;

/// Which game to simulate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimGame {
    Tictactoe,
    Twentyone,
    Rps,
}

/// Agent kind for a simulated seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimAgentKind {
    /// The game's scripted policy (heuristic, dealer threshold, adaptive)
    Scripted,
    /// Uniform random over the legal moves
    Random,
}

/// Statistics collected over a simulation run.
#[derive(Debug, Default, Serialize)]
pub struct SimStats {
    pub games: usize,
    pub p1_wins: usize,
    pub p2_wins: usize,
    pub unfinished: usize,
    pub total_rounds: u64,
    pub elapsed_ms: u128,
}

impl SimStats {
    fn record(&mut self, winner: Option<Seat>, rounds: u32) {
        self.games += 1;
        self.total_rounds += u64::from(rounds);
        match winner {
            Some(Seat::A) => self.p1_wins += 1,
            Some(Seat::B) => self.p2_wins += 1,
            None => self.unfinished += 1,
        }
    }
}

/// Run `games` matches of the chosen game and matchup.
///
/// Every match is first-to-`winning_score`; match `i` is seeded with
/// `seed + i`.
pub fn run_sim(
    game: SimGame,
    p1: SimAgentKind,
    p2: SimAgentKind,
    games: usize,
    winning_score: u32,
    seed: u64,
) -> Result<SimStats> {
    let start = Instant::now();
    let mut stats = SimStats::default();

    for index in 0..games {
        let match_seed = seed.wrapping_add(index as u64);
        let result = match game {
            SimGame::Tictactoe => {
                let rules = TicTacToeRules::standard()?;
                let mut a = make_ttt_agent(p1, Seat::A);
                let mut b = make_ttt_agent(p2, Seat::B);
                run_one(rules, winning_score, match_seed, a.as_mut(), b.as_mut())?
            }
            SimGame::Twentyone => {
                let rules = TwentyOneRules::standard()?;
                let mut a = make_twentyone_agent(&rules, p1, Seat::A);
                let mut b = make_twentyone_agent(&rules, p2, Seat::B);
                run_one(rules, winning_score, match_seed, a.as_mut(), b.as_mut())?
            }
            SimGame::Rps => {
                let mut a = make_rps_agent(p1, Seat::A);
                let mut b = make_rps_agent(p2, Seat::B);
                run_one(RpsRules, winning_score, match_seed, a.as_mut(), b.as_mut())?
            }
        };
        stats.record(result.0, result.1);
    }

    stats.elapsed_ms = start.elapsed().as_millis();
    Ok(stats)
}

fn run_one<R: Rules>(
    rules: R,
    winning_score: u32,
    seed: u64,
    agent_a: &mut dyn Agent<R>,
    agent_b: &mut dyn Agent<R>,
) -> Result<(Option<Seat>, u32)> {
    let config = MatchConfig::new(winning_score)?;
    let logger =
        MatchLogger::new(VerbosityLevel::Silent).with_output_mode(OutputMode::Memory);
    let mut match_loop = MatchLoop::new(rules, config)?
        .with_seed(seed)
        .with_logger(logger);
    let result = match_loop.run_match(agent_a, agent_b)?;
    debug_assert!(!matches!(result.end_reason, MatchEndReason::Forfeit(_)));
    Ok((result.winner, result.rounds_played))
}

fn make_ttt_agent(kind: SimAgentKind, seat: Seat) -> Box<dyn Agent<TicTacToeRules>> {
    match kind {
        SimAgentKind::Scripted => Box::new(ScriptedAgent::new(seat)),
        SimAgentKind::Random => Box::new(RandomAgent::new(seat)),
    }
}

fn make_twentyone_agent(
    rules: &TwentyOneRules,
    kind: SimAgentKind,
    seat: Seat,
) -> Box<dyn Agent<TwentyOneRules>> {
    match kind {
        SimAgentKind::Scripted => Box::new(ThresholdAgent::new(seat, rules.dealer_stand())),
        SimAgentKind::Random => Box::new(RandomAgent::new(seat)),
    }
}

fn make_rps_agent(kind: SimAgentKind, seat: Seat) -> Box<dyn Agent<RpsRules>> {
    match kind {
        SimAgentKind::Scripted => Box::new(AdaptiveAgent::new(seat)),
        SimAgentKind::Random => Box::new(RandomAgent::new(seat)),
    }
}

/// Print a text summary of a finished simulation.
pub fn print_summary(stats: &SimStats) {
    println!("=== Simulation Results ===");
    println!("Matches:      {}", stats.games);
    println!(
        "Player 1:     {} wins ({:.1}%)",
        stats.p1_wins,
        percentage(stats.p1_wins, stats.games)
    );
    println!(
        "Player 2:     {} wins ({:.1}%)",
        stats.p2_wins,
        percentage(stats.p2_wins, stats.games)
    );
    println!("Unfinished:   {}", stats.unfinished);
    println!("Total rounds: {}", stats.total_rounds);
    println!("Elapsed:      {}ms", stats.elapsed_ms);
}

fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        100.0 * part as f64 / whole as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sim_runs_requested_match_count() {
        let stats = run_sim(
            SimGame::Tictactoe,
            SimAgentKind::Scripted,
            SimAgentKind::Random,
            10,
            1,
            1234,
        )
        .unwrap();
        assert_eq!(stats.games, 10);
        assert_eq!(stats.p1_wins + stats.p2_wins + stats.unfinished, 10);
        assert!(stats.total_rounds >= 10);
    }

    #[test]
    fn test_scripted_dominates_random_at_tictactoe() {
        let stats = run_sim(
            SimGame::Tictactoe,
            SimAgentKind::Scripted,
            SimAgentKind::Random,
            30,
            1,
            42,
        )
        .unwrap();
        // Win-take-block beats uniform random play comfortably
        assert!(stats.p1_wins > stats.p2_wins);
    }

    #[test]
    fn test_sim_is_reproducible() {
        let run = || {
            run_sim(
                SimGame::Twentyone,
                SimAgentKind::Scripted,
                SimAgentKind::Scripted,
                20,
                3,
                7,
            )
            .unwrap()
        };
        let first = run();
        let second = run();
        assert_eq!(first.p1_wins, second.p1_wins);
        assert_eq!(first.p2_wins, second.p2_wins);
        assert_eq!(first.total_rounds, second.total_rounds);
    }

    #[test]
    fn test_rps_sim_completes() {
        let stats = run_sim(
            SimGame::Rps,
            SimAgentKind::Scripted,
            SimAgentKind::Random,
            15,
            2,
            9,
        )
        .unwrap();
        assert_eq!(stats.games, 15);
    }
}
