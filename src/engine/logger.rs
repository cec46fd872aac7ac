//! Centralized logger for match events
//!
//! All engine output flows through one logger so verbosity is applied
//! uniformly and tests can capture the round flow without touching stdout.

use serde::{Deserialize, Serialize};

/// Verbosity level for match output
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Default,
    Serialize,
    Deserialize,
)]
pub enum VerbosityLevel {
    /// Silent - no output during the match
    Silent = 0,
    /// Minimal - only the match outcome
    Minimal = 1,
    /// Normal - round results and scores (default)
    #[default]
    Normal = 2,
    /// Verbose - every move and state render
    Verbose = 3,
}

/// Output destination for log messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum OutputMode {
    /// Output only to stdout (default)
    #[default]
    Stdout,
    /// Capture only to the in-memory buffer (no stdout)
    Memory,
    /// Both stdout and the in-memory buffer
    Both,
}

/// A captured log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub level: VerbosityLevel,
    pub message: String,
}

/// Verbosity-filtered logger with optional in-memory capture.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchLogger {
    verbosity: VerbosityLevel,
    output_mode: OutputMode,
    json: bool,
    buffer: Vec<LogEntry>,
}

impl MatchLogger {
    pub fn new(verbosity: VerbosityLevel) -> Self {
        MatchLogger {
            verbosity,
            output_mode: OutputMode::Stdout,
            json: false,
            buffer: Vec::new(),
        }
    }

    /// Capture entries in memory instead of (or as well as) printing them.
    pub fn with_output_mode(mut self, mode: OutputMode) -> Self {
        self.output_mode = mode;
        self
    }

    /// Emit one JSON object per line instead of plain text.
    pub fn with_json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }

    pub fn verbosity(&self) -> VerbosityLevel {
        self.verbosity
    }

    pub fn set_verbosity(&mut self, verbosity: VerbosityLevel) {
        self.verbosity = verbosity;
    }

    /// Log a message at the given level; filtered by the current verbosity.
    pub fn log(&mut self, level: VerbosityLevel, message: &str) {
        if level > self.verbosity {
            return;
        }
        if matches!(self.output_mode, OutputMode::Stdout | OutputMode::Both) {
            if self.json {
                let entry = LogEntry {
                    level,
                    message: message.to_string(),
                };
                // A LogEntry of plain strings cannot fail to serialize
                if let Ok(line) = serde_json::to_string(&entry) {
                    println!("{line}");
                }
            } else {
                println!("{message}");
            }
        }
        if matches!(self.output_mode, OutputMode::Memory | OutputMode::Both) {
            self.buffer.push(LogEntry {
                level,
                message: message.to_string(),
            });
        }
    }

    /// Log at Minimal level (match outcomes).
    pub fn minimal(&mut self, message: &str) {
        self.log(VerbosityLevel::Minimal, message);
    }

    /// Log at Normal level (round results, scores).
    pub fn normal(&mut self, message: &str) {
        self.log(VerbosityLevel::Normal, message);
    }

    /// Log at Verbose level (moves, state renders).
    pub fn verbose(&mut self, message: &str) {
        self.log(VerbosityLevel::Verbose, message);
    }

    /// Captured entries (empty unless the mode captures to memory).
    pub fn entries(&self) -> &[LogEntry] {
        &self.buffer
    }
}
