//! Interactive prompts

use std::io::{self, BufRead, Write};

use buffer_core::DEFAULT_CAPACITY;
use tracing::debug;

use crate::console::Console;

/// `yes` or `y`, ignoring case and surrounding whitespace
pub fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "yes" | "y")
}

/// Parse a capacity answer: digits only, greater than zero
pub fn parse_capacity(answer: &str) -> Option<usize> {
    let answer = answer.trim();
    if answer.is_empty() || !answer.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    answer.parse::<usize>().ok().filter(|&capacity| capacity > 0)
}

/// Ask whether to change the default capacity and read the new one.
///
/// Anything unusable falls back to [`DEFAULT_CAPACITY`] with a message.
pub fn select_capacity<R: BufRead, W: Write>(console: &mut Console<R, W>) -> io::Result<usize> {
    let question = format!(
        "The default capacity is {}. Do you want to change it? (yes/no): ",
        DEFAULT_CAPACITY
    );
    let change = console.ask(&question)?.is_some_and(|answer| is_yes(&answer));

    if !change {
        console.say(&format!("Using the default capacity of {}.", DEFAULT_CAPACITY))?;
        return Ok(DEFAULT_CAPACITY);
    }

    let answer = console.ask("Enter the capacity: ")?.unwrap_or_default();
    match parse_capacity(&answer) {
        Some(capacity) => {
            debug!(capacity, "capacity selected");
            Ok(capacity)
        }
        None => {
            console.say(&format!(
                "Invalid capacity. Using the default capacity of {}.",
                DEFAULT_CAPACITY
            ))?;
            Ok(DEFAULT_CAPACITY)
        }
    }
}
