//! Console services: prompts, line input, screen clearing, pacing
//!
//! The interactive agents treat the console as a line-based surface: every
//! read is one line of text, trimmed, and every invalid answer produces a
//! visible re-prompt. Nothing here is reachable from the scripted agents.

use crate::{ParlorError, Result};
use std::fmt;
use std::io::{self, Write};
use std::thread;
use std::time::Duration;

/// Print a prompt line in the "=> message" house style.
pub fn prompt(message: &str) {
    println!("=> {message}");
}

/// Read one line from stdin, trimmed. Read errors re-prompt rather than
/// propagate; interactive input never fails, it only retries.
pub fn read_trimmed() -> String {
    loop {
        let mut input = String::new();
        match io::stdin().read_line(&mut input) {
            Ok(_) => return input.trim().to_string(),
            Err(_) => {
                eprintln!("Error reading input");
            }
        }
    }
}

/// Prompt and read one trimmed line.
pub fn ask(message: &str) -> String {
    prompt(message);
    read_trimmed()
}

/// Ask a yes/no question, re-prompting until the answer starts with y or n.
pub fn confirm(message: &str) -> bool {
    loop {
        let answer = ask(message).to_lowercase();
        if answer.starts_with('y') {
            return true;
        }
        if answer.starts_with('n') {
            return false;
        }
        prompt("Please answer y or n.");
    }
}

/// Clear the terminal and move the cursor home.
pub fn clear_screen() {
    print!("\x1B[2J\x1B[1;1H");
    let _ = io::stdout().flush();
}

/// Short sleep for dealing/reveal pacing.
pub fn pause(millis: u64) {
    thread::sleep(Duration::from_millis(millis));
}

/// Parse one answer as a number. The error is recovered by the caller's
/// re-prompt loop, never surfaced to the user as a failure.
pub fn parse_number(input: &str) -> Result<usize> {
    input
        .trim()
        .parse::<usize>()
        .map_err(|_| ParlorError::InvalidInput(format!("'{input}' is not a number")))
}

/// Join items into a spoken-style list: "1, 2, 3, or 9".
pub fn joinor<T: fmt::Display>(items: &[T], delimiter: &str, conjunction: &str) -> String {
    match items {
        [] => String::new(),
        [only] => only.to_string(),
        [first, second] => format!("{first} {conjunction} {second}"),
        _ => {
            let all_but_last: Vec<String> = items[..items.len() - 1]
                .iter()
                .map(|item| item.to_string())
                .collect();
            format!(
                "{}{delimiter}{conjunction} {}",
                all_but_last.join(delimiter),
                items[items.len() - 1]
            )
        }
    }
}
