//! Parlor Games - Main Binary
//!
//! Console matches of tic-tac-toe, twenty-one, and rock-paper-scissors,
//! plus a batch simulation mode for AI-vs-AI statistics.

use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use parlor_games::{
    engine::{Agent, MatchConfig, MatchLogger, MatchLoop, RandomAgent, Rules, Seat, VerbosityLevel},
    rps,
    sim::{self, SimAgentKind, SimGame},
    tictactoe,
    twentyone,
    ui,
};

/// Agent type for a seat
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum AgentType {
    /// Prompt a human on stdin
    Human,
    /// The game's scripted policy (win/block/center, dealer threshold)
    Scripted,
    /// Uniform random over the legal moves
    Random,
    /// Loss-tracking adaptive policy (rock-paper-scissors only)
    Adaptive,
}

/// Verbosity level for match output (supports both names and numbers)
#[derive(Debug, Clone, Copy)]
struct VerbosityArg(VerbosityLevel);

impl std::str::FromStr for VerbosityArg {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "silent" | "0" => Ok(VerbosityArg(VerbosityLevel::Silent)),
            "minimal" | "1" => Ok(VerbosityArg(VerbosityLevel::Minimal)),
            "normal" | "2" => Ok(VerbosityArg(VerbosityLevel::Normal)),
            "verbose" | "3" => Ok(VerbosityArg(VerbosityLevel::Verbose)),
            _ => Err(format!(
                "invalid verbosity level '{s}' (expected: silent/0, minimal/1, normal/2, verbose/3)"
            )),
        }
    }
}

/// Game selector for simulation mode
#[derive(Debug, Clone, Copy, ValueEnum)]
enum GameArg {
    Tictactoe,
    Twentyone,
    Rps,
}

impl From<GameArg> for SimGame {
    fn from(arg: GameArg) -> Self {
        match arg {
            GameArg::Tictactoe => SimGame::Tictactoe,
            GameArg::Twentyone => SimGame::Twentyone,
            GameArg::Rps => SimGame::Rps,
        }
    }
}

/// Scripted-or-random selector for simulation seats
#[derive(Debug, Clone, Copy, ValueEnum)]
enum SimAgentArg {
    Scripted,
    Random,
}

impl From<SimAgentArg> for SimAgentKind {
    fn from(arg: SimAgentArg) -> Self {
        match arg {
            SimAgentArg::Scripted => SimAgentKind::Scripted,
            SimAgentArg::Random => SimAgentKind::Random,
        }
    }
}

#[derive(Parser)]
#[command(name = "parlor")]
#[command(about = "Parlor Games - turn-based console game engine", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Tic-tac-toe on an N-by-N grid
    Tictactoe {
        /// Player 1 agent type (marks X, moves first)
        #[arg(long, value_enum, default_value = "human")]
        p1: AgentType,

        /// Player 2 agent type (marks O)
        #[arg(long, value_enum, default_value = "scripted")]
        p2: AgentType,

        /// Grid size (3, 5, or up to 9)
        #[arg(long, default_value_t = 3)]
        size: usize,

        /// Round wins needed to take the match
        #[arg(long, default_value_t = 5)]
        winning_score: u32,

        /// Set random seed for deterministic play
        #[arg(long)]
        seed: Option<u64>,

        /// Verbosity level (0=silent, 1=minimal, 2=normal, 3=verbose)
        #[arg(long, default_value = "normal", short = 'v')]
        verbosity: VerbosityArg,
    },

    /// Twenty-one against the house dealer
    Twentyone {
        /// Player 1 agent type (acts first)
        #[arg(long, value_enum, default_value = "human")]
        p1: AgentType,

        /// Player 2 agent type (the dealer seat)
        #[arg(long, value_enum, default_value = "scripted")]
        p2: AgentType,

        /// Number of decks in the shoe
        #[arg(long, default_value_t = 1)]
        decks: usize,

        /// Round wins needed to take the match
        #[arg(long, default_value_t = 5)]
        winning_score: u32,

        /// Set random seed for deterministic play
        #[arg(long)]
        seed: Option<u64>,

        /// Verbosity level (0=silent, 1=minimal, 2=normal, 3=verbose)
        #[arg(long, default_value = "normal", short = 'v')]
        verbosity: VerbosityArg,
    },

    /// Rock-paper-scissors against an adaptive computer
    Rps {
        /// Player 1 agent type
        #[arg(long, value_enum, default_value = "human")]
        p1: AgentType,

        /// Player 2 agent type
        #[arg(long, value_enum, default_value = "adaptive")]
        p2: AgentType,

        /// Round wins needed to take the match
        #[arg(long, default_value_t = 5)]
        winning_score: u32,

        /// Set random seed for deterministic play
        #[arg(long)]
        seed: Option<u64>,

        /// Verbosity level (0=silent, 1=minimal, 2=normal, 3=verbose)
        #[arg(long, default_value = "normal", short = 'v')]
        verbosity: VerbosityArg,
    },

    /// Run AI-vs-AI matches and collect statistics
    Sim {
        /// Which game to simulate
        #[arg(long, value_enum)]
        game: GameArg,

        /// Player 1 agent kind
        #[arg(long, value_enum, default_value = "scripted")]
        p1: SimAgentArg,

        /// Player 2 agent kind
        #[arg(long, value_enum, default_value = "random")]
        p2: SimAgentArg,

        /// Number of matches to run
        #[arg(long, short = 'g', default_value_t = 100)]
        games: usize,

        /// Round wins needed to take each match
        #[arg(long, default_value_t = 1)]
        winning_score: u32,

        /// Base seed; match i runs with seed + i
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Print statistics as JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Tictactoe {
            p1,
            p2,
            size,
            winning_score,
            seed,
            verbosity,
        } => run_tictactoe(p1, p2, size, winning_score, seed, verbosity.0),
        Commands::Twentyone {
            p1,
            p2,
            decks,
            winning_score,
            seed,
            verbosity,
        } => run_twentyone(p1, p2, decks, winning_score, seed, verbosity.0),
        Commands::Rps {
            p1,
            p2,
            winning_score,
            seed,
            verbosity,
        } => run_rps(p1, p2, winning_score, seed, verbosity.0),
        Commands::Sim {
            game,
            p1,
            p2,
            games,
            winning_score,
            seed,
            json,
        } => run_sim(game, p1, p2, games, winning_score, seed, json),
    }
}

/// After match-over, a human at the table is offered a whole new match;
/// AI-only matches run once and exit.
fn another_match(p1: AgentType, p2: AgentType) -> bool {
    (p1 == AgentType::Human || p2 == AgentType::Human)
        && ui::confirm("Play another game? (y/n)")
}

fn build_loop<R: Rules>(
    rules: R,
    winning_score: u32,
    seed: Option<u64>,
    verbosity: VerbosityLevel,
) -> anyhow::Result<MatchLoop<R>> {
    let config = MatchConfig::new(winning_score).context("invalid match configuration")?;
    let mut match_loop =
        MatchLoop::new(rules, config)?.with_logger(MatchLogger::new(verbosity));
    if let Some(seed) = seed {
        match_loop = match_loop.with_seed(seed);
    }
    Ok(match_loop)
}

fn run_tictactoe(
    p1: AgentType,
    p2: AgentType,
    size: usize,
    winning_score: u32,
    seed: Option<u64>,
    verbosity: VerbosityLevel,
) -> anyhow::Result<()> {
    let rules = tictactoe::TicTacToeRules::new(size, ['X', 'O'], Seat::A)
        .context("invalid tic-tac-toe configuration")?;
    let mut agent_a = ttt_agent(p1, Seat::A)?;
    let mut agent_b = ttt_agent(p2, Seat::B)?;

    ui::prompt(&format!(
        "Welcome to Tic Tac Toe! First to {winning_score} wins."
    ));
    let mut match_loop = build_loop(rules, winning_score, seed, verbosity)?;
    loop {
        match_loop
            .run_match(agent_a.as_mut(), agent_b.as_mut())
            .context("match aborted")?;
        if !another_match(p1, p2) {
            break;
        }
    }
    ui::prompt("Thanks for playing Tic Tac Toe!");
    Ok(())
}

fn run_twentyone(
    p1: AgentType,
    p2: AgentType,
    decks: usize,
    winning_score: u32,
    seed: Option<u64>,
    verbosity: VerbosityLevel,
) -> anyhow::Result<()> {
    let rules = twentyone::TwentyOneRules::new(21, 17, decks)
        .context("invalid twenty-one configuration")?;
    let human_at_table = p1 == AgentType::Human || p2 == AgentType::Human;
    let mut agent_a = twentyone_agent(&rules, p1, Seat::A, human_at_table)?;
    let mut agent_b = twentyone_agent(&rules, p2, Seat::B, human_at_table)?;

    ui::prompt("Welcome to Twenty-One!");
    let mut match_loop = build_loop(rules, winning_score, seed, verbosity)?;
    loop {
        match_loop
            .run_match(agent_a.as_mut(), agent_b.as_mut())
            .context("match aborted")?;
        if !another_match(p1, p2) {
            break;
        }
    }
    ui::prompt("Thanks for playing Twenty-One!");
    Ok(())
}

fn run_rps(
    p1: AgentType,
    p2: AgentType,
    winning_score: u32,
    seed: Option<u64>,
    verbosity: VerbosityLevel,
) -> anyhow::Result<()> {
    let mut agent_a = rps_agent(p1, Seat::A)?;
    let mut agent_b = rps_agent(p2, Seat::B)?;

    ui::prompt("Welcome to Rock, Paper, Scissors!");
    let mut match_loop = build_loop(rps::RpsRules, winning_score, seed, verbosity)?;
    loop {
        match_loop
            .run_match(agent_a.as_mut(), agent_b.as_mut())
            .context("match aborted")?;
        if !another_match(p1, p2) {
            break;
        }
    }
    ui::prompt("Thanks for playing!");
    Ok(())
}

fn run_sim(
    game: GameArg,
    p1: SimAgentArg,
    p2: SimAgentArg,
    games: usize,
    winning_score: u32,
    seed: u64,
    json: bool,
) -> anyhow::Result<()> {
    let stats = sim::run_sim(
        game.into(),
        p1.into(),
        p2.into(),
        games,
        winning_score,
        seed,
    )
    .context("simulation failed")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        sim::print_summary(&stats);
    }
    Ok(())
}

fn ttt_agent(
    kind: AgentType,
    seat: Seat,
) -> anyhow::Result<Box<dyn Agent<tictactoe::TicTacToeRules>>> {
    Ok(match kind {
        AgentType::Human => Box::new(tictactoe::ConsoleAgent::new(seat)),
        AgentType::Scripted => Box::new(tictactoe::ScriptedAgent::new(seat)),
        AgentType::Random => Box::new(RandomAgent::new(seat)),
        AgentType::Adaptive => bail!("the adaptive agent only plays rock-paper-scissors"),
    })
}

fn twentyone_agent(
    rules: &twentyone::TwentyOneRules,
    kind: AgentType,
    seat: Seat,
    paced: bool,
) -> anyhow::Result<Box<dyn Agent<twentyone::TwentyOneRules>>> {
    Ok(match kind {
        AgentType::Human => Box::new(twentyone::ConsoleAgent::new(seat)),
        AgentType::Scripted => Box::new(
            twentyone::ThresholdAgent::new(seat, rules.dealer_stand())
                .with_pacing(paced && seat == Seat::B),
        ),
        AgentType::Random => Box::new(RandomAgent::new(seat)),
        AgentType::Adaptive => bail!("the adaptive agent only plays rock-paper-scissors"),
    })
}

fn rps_agent(kind: AgentType, seat: Seat) -> anyhow::Result<Box<dyn Agent<rps::RpsRules>>> {
    Ok(match kind {
        AgentType::Human => Box::new(rps::ConsoleAgent::new(seat)),
        AgentType::Adaptive => Box::new(rps::AdaptiveAgent::new(seat)),
        AgentType::Random => Box::new(RandomAgent::new(seat)),
        AgentType::Scripted => bail!("rock-paper-scissors agents are human, adaptive, or random"),
    })
}
