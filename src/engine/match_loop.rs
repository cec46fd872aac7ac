//! Match loop: alternates agents across rounds until a score threshold
//!
//! The loop owns the match RNG, the scoreboard, and the logger. One round is
//! played to completion by repeatedly asking the rules whose turn it is and
//! the corresponding agent for a move; finished rounds are tallied until a
//! seat reaches the winning score, an agent forfeits between rounds, or the
//! round-limit safety stop fires.

use crate::engine::agent::Agent;
use crate::engine::logger::{MatchLogger, VerbosityLevel};
use crate::engine::rules::{RoundOutcome, Rules};
use crate::engine::score::Scoreboard;
use crate::engine::Seat;
use crate::{ParlorError, Result};
use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;
use serde::{Deserialize, Serialize};

/// Phase of the match state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchPhase {
    /// Waiting for the current agent to supply a move
    AwaitingMove,
    /// The round has a result; scores are being tallied
    TerminalRound,
    /// Between rounds, polling agents for forfeit
    AwaitingContinue,
    /// The match is over
    MatchOver,
}

/// Reason the match ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchEndReason {
    /// A seat reached the winning score
    ScoreReached(Seat),
    /// A seat declined to continue between rounds
    Forfeit(Seat),
    /// The round-limit safety stop fired
    RoundLimit,
}

/// Result of running a match to completion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResult {
    /// Winner of the match (None on forfeit or round limit)
    pub winner: Option<Seat>,
    /// Total rounds played, including draws
    pub rounds_played: u32,
    /// Reason the match ended
    pub end_reason: MatchEndReason,
}

/// Immutable match configuration, validated at construction.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MatchConfig {
    /// First seat to reach this many round wins takes the match
    pub winning_score: u32,
    /// Safety stop: maximum rounds before the match is abandoned
    pub max_rounds: u32,
}

impl MatchConfig {
    pub fn new(winning_score: u32) -> Result<Self> {
        let config = MatchConfig {
            winning_score,
            max_rounds: 1000,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn with_max_rounds(mut self, max_rounds: u32) -> Result<Self> {
        self.max_rounds = max_rounds;
        self.validate()?;
        Ok(self)
    }

    fn validate(&self) -> Result<()> {
        if self.winning_score == 0 {
            return Err(ParlorError::InvalidConfig(
                "winning score must be at least 1".to_string(),
            ));
        }
        if self.max_rounds < self.winning_score {
            return Err(ParlorError::InvalidConfig(format!(
                "round limit {} cannot be below the winning score {}",
                self.max_rounds, self.winning_score
            )));
        }
        Ok(())
    }
}

/// Orchestrator for one match between two agents.
pub struct MatchLoop<R: Rules> {
    rules: R,
    config: MatchConfig,
    scoreboard: Scoreboard,
    logger: MatchLogger,
    rng: ChaCha12Rng,
    phase: MatchPhase,
    rounds_played: u32,
}

impl<R: Rules> MatchLoop<R> {
    pub fn new(rules: R, config: MatchConfig) -> Result<Self> {
        let scoreboard = Scoreboard::new(config.winning_score)?;
        Ok(MatchLoop {
            rules,
            config,
            scoreboard,
            logger: MatchLogger::new(VerbosityLevel::Normal),
            rng: ChaCha12Rng::from_entropy(),
            phase: MatchPhase::AwaitingMove,
            rounds_played: 0,
        })
    }

    /// Seed the match RNG for deterministic play.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = ChaCha12Rng::seed_from_u64(seed);
        self
    }

    /// Replace the default logger (verbosity, capture mode).
    pub fn with_logger(mut self, logger: MatchLogger) -> Self {
        self.logger = logger;
        self
    }

    pub fn phase(&self) -> MatchPhase {
        self.phase
    }

    pub fn scoreboard(&self) -> &Scoreboard {
        &self.scoreboard
    }

    pub fn logger(&self) -> &MatchLogger {
        &self.logger
    }

    /// Run rounds until the match ends.
    ///
    /// Scores reset at match start. Returns an error only on a programming
    /// defect: an agent producing a move outside the legal set, or rules
    /// whose round stalls without an outcome.
    pub fn run_match<'a>(
        &mut self,
        agent_a: &'a mut dyn Agent<R>,
        agent_b: &'a mut dyn Agent<R>,
    ) -> Result<MatchResult> {
        self.scoreboard.reset();
        self.rounds_played = 0;
        self.phase = MatchPhase::AwaitingMove;

        loop {
            let outcome = self.play_round(agent_a, agent_b)?;

            self.phase = MatchPhase::TerminalRound;
            self.scoreboard.record(outcome);
            self.rounds_played += 1;
            self.log_round_result(outcome);

            if let Some(winner) = self.scoreboard.match_winner() {
                self.phase = MatchPhase::MatchOver;
                self.logger
                    .minimal(&format!("{winner} wins the match!"));
                return Ok(MatchResult {
                    winner: Some(winner),
                    rounds_played: self.rounds_played,
                    end_reason: MatchEndReason::ScoreReached(winner),
                });
            }

            if self.rounds_played >= self.config.max_rounds {
                self.phase = MatchPhase::MatchOver;
                self.logger.minimal("Round limit reached.");
                return Ok(MatchResult {
                    winner: None,
                    rounds_played: self.rounds_played,
                    end_reason: MatchEndReason::RoundLimit,
                });
            }

            self.phase = MatchPhase::AwaitingContinue;
            for agent in [&mut *agent_a, &mut *agent_b] {
                if !agent.wants_rematch() {
                    let seat = agent.seat();
                    self.phase = MatchPhase::MatchOver;
                    self.logger.minimal(&format!("{seat} forfeits."));
                    return Ok(MatchResult {
                        winner: None,
                        rounds_played: self.rounds_played,
                        end_reason: MatchEndReason::Forfeit(seat),
                    });
                }
            }
            self.phase = MatchPhase::AwaitingMove;
        }
    }

    /// Play one round to completion and return its outcome.
    fn play_round(
        &mut self,
        agent_a: &mut dyn Agent<R>,
        agent_b: &mut dyn Agent<R>,
    ) -> Result<RoundOutcome> {
        self.logger
            .verbose(&format!("--- Round {} ---", self.rounds_played + 1));
        let mut state = self.rules.new_round(&mut self.rng);

        while let Some(seat) = self.rules.to_act(&state) {
            let legal = self.rules.legal_moves(&state);
            if legal.is_empty() {
                // to_act and legal_moves disagree: the rules are broken
                return Err(ParlorError::InvalidMove(format!(
                    "{seat} to act but no legal moves"
                )));
            }

            let agent: &mut dyn Agent<R> = match seat {
                Seat::A => &mut *agent_a,
                Seat::B => &mut *agent_b,
            };
            let mv = agent.choose(&self.rules, &state, &legal, &mut self.rng);
            if !legal.contains(&mv) {
                return Err(ParlorError::InvalidMove(format!(
                    "{seat} chose {mv} which is not a legal move"
                )));
            }

            self.rules.apply(&mut state, seat, &mv)?;
            self.logger.verbose(&format!("{seat} plays {mv}"));
            self.logger.verbose(&state.to_string());
        }

        let outcome = self.rules.outcome(&state).ok_or_else(|| {
            ParlorError::InvalidMove("round ended without an outcome".to_string())
        })?;
        agent_a.on_round_end(&state, outcome);
        agent_b.on_round_end(&state, outcome);
        Ok(outcome)
    }

    fn log_round_result(&mut self, outcome: RoundOutcome) {
        match outcome {
            RoundOutcome::Win(seat) => self.logger.normal(&format!("{seat} won the round.")),
            RoundOutcome::Draw => self.logger.normal("The round is a tie."),
        }
        let score_line = format!(
            "Score: {} {} | {} {} (first to {})",
            Seat::A,
            self.scoreboard.wins(Seat::A),
            Seat::B,
            self.scoreboard.wins(Seat::B),
            self.scoreboard.winning_score()
        );
        self.logger.normal(&score_line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::logger::OutputMode;
    use crate::engine::RandomAgent;
    use crate::tictactoe::TicTacToeRules;

    fn quiet_logger() -> MatchLogger {
        MatchLogger::new(VerbosityLevel::Silent).with_output_mode(OutputMode::Memory)
    }

    #[test]
    fn test_config_rejects_zero_winning_score() {
        assert!(MatchConfig::new(0).is_err());
    }

    #[test]
    fn test_config_rejects_round_limit_below_threshold() {
        assert!(MatchConfig::new(10).unwrap().with_max_rounds(5).is_err());
    }

    #[test]
    fn test_random_match_reaches_a_result() {
        let rules = TicTacToeRules::standard().unwrap();
        let config = MatchConfig::new(2).unwrap();
        let mut match_loop = MatchLoop::new(rules, config)
            .unwrap()
            .with_seed(11)
            .with_logger(quiet_logger());

        let mut a = RandomAgent::new(Seat::A);
        let mut b = RandomAgent::new(Seat::B);
        let result = match_loop.run_match(&mut a, &mut b).unwrap();

        assert!(result.rounds_played >= 2);
        match result.end_reason {
            MatchEndReason::ScoreReached(seat) => assert_eq!(result.winner, Some(seat)),
            MatchEndReason::RoundLimit => assert_eq!(result.winner, None),
            MatchEndReason::Forfeit(_) => panic!("random agents never forfeit"),
        }
        assert_eq!(match_loop.phase(), MatchPhase::MatchOver);
    }

    #[test]
    fn test_seeded_matches_are_deterministic() {
        let config = MatchConfig::new(3).unwrap();
        let run = || {
            let rules = TicTacToeRules::standard().unwrap();
            let mut match_loop = MatchLoop::new(rules, config)
                .unwrap()
                .with_seed(99)
                .with_logger(quiet_logger());
            let mut a = RandomAgent::new(Seat::A);
            let mut b = RandomAgent::new(Seat::B);
            match_loop.run_match(&mut a, &mut b).unwrap()
        };

        let first = run();
        let second = run();
        assert_eq!(first.winner, second.winner);
        assert_eq!(first.rounds_played, second.rounds_played);
        assert_eq!(first.end_reason, second.end_reason);
    }

    #[test]
    fn test_forfeit_between_rounds() {
        /// Declines the rematch poll after the first round.
        struct OneRoundAgent {
            inner: RandomAgent<TicTacToeRules>,
        }

        impl Agent<TicTacToeRules> for OneRoundAgent {
            fn seat(&self) -> Seat {
                self.inner.seat()
            }

            fn choose(
                &mut self,
                rules: &TicTacToeRules,
                state: &<TicTacToeRules as Rules>::State,
                legal: &[<TicTacToeRules as Rules>::Move],
                rng: &mut ChaCha12Rng,
            ) -> <TicTacToeRules as Rules>::Move {
                self.inner.choose(rules, state, legal, rng)
            }

            fn wants_rematch(&mut self) -> bool {
                false
            }
        }

        let rules = TicTacToeRules::standard().unwrap();
        let config = MatchConfig::new(100).unwrap();
        let mut match_loop = MatchLoop::new(rules, config)
            .unwrap()
            .with_seed(5)
            .with_logger(quiet_logger());

        let mut a = OneRoundAgent {
            inner: RandomAgent::new(Seat::A),
        };
        let mut b = RandomAgent::new(Seat::B);
        let result = match_loop.run_match(&mut a, &mut b).unwrap();

        assert_eq!(result.rounds_played, 1);
        assert_eq!(result.winner, None);
        assert_eq!(result.end_reason, MatchEndReason::Forfeit(Seat::A));
    }
}
