//! Command parsing
//!
//! A command line is a verb, optionally followed by a single space and a raw
//! argument. Numeric arguments are validated here, once, so the buffer only
//! ever sees typed counts.

use thiserror::Error;

/// Command parsing error
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("Invalid command: {0}")]
    UnknownCommand(String),

    #[error("Invalid {what} '{raw}'. Please enter a non-negative integer.")]
    InvalidCount { what: &'static str, raw: String },

    #[error("No argument provided for {verb} command.")]
    MissingArgument { verb: &'static str },

    #[error("Empty command")]
    EmptyLine,
}

/// Parsed command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Insert text at the cursor
    Insert(String),
    /// Delete one character, located `n` positions before the cursor
    Delete(usize),
    /// Move the cursor left
    MoveLeft(usize),
    /// Move the cursor right
    MoveRight(usize),
    /// Print the buffer and record it in the transcript
    Render,
    /// Clear the buffer
    Reset,
    /// Stop processing
    Exit,
}

impl Command {
    pub const INSERT: &'static str = "AddText";
    pub const DELETE: &'static str = "DeleteText";
    pub const MOVE_LEFT: &'static str = "MoveLeft";
    pub const MOVE_RIGHT: &'static str = "MoveRight";
    pub const RENDER: &'static str = "PrintText";
    pub const RESET: &'static str = "EmptyEditor";
    pub const EXIT: &'static str = "Exit";

    /// Verb as written in the command language
    pub fn verb(&self) -> &'static str {
        match self {
            Command::Insert(_) => Self::INSERT,
            Command::Delete(_) => Self::DELETE,
            Command::MoveLeft(_) => Self::MOVE_LEFT,
            Command::MoveRight(_) => Self::MOVE_RIGHT,
            Command::Render => Self::RENDER,
            Command::Reset => Self::RESET,
            Command::Exit => Self::EXIT,
        }
    }
}

/// Split a line at the first space into verb and raw argument.
///
/// The argument is returned verbatim, including any further spaces.
pub fn split_line(line: &str) -> (&str, Option<&str>) {
    match line.split_once(' ') {
        Some((verb, rest)) => (verb, Some(rest)),
        None => (line, None),
    }
}

/// Parse a count: one or more ASCII digits, nothing else.
///
/// Values too large for `usize` saturate; every count-taking operation
/// clamps, so the result is the same as with unbounded integers.
pub fn parse_count(raw: &str, what: &'static str) -> Result<usize, CommandError> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CommandError::InvalidCount {
            what,
            raw: raw.to_string(),
        });
    }

    Ok(raw.bytes().fold(0usize, |acc, b| {
        acc.saturating_mul(10).saturating_add(usize::from(b - b'0'))
    }))
}

/// Parse a full command line
pub fn parse_command(line: &str) -> Result<Command, CommandError> {
    let (verb, arg) = split_line(line);
    let arg = arg.filter(|a| !a.is_empty());

    match verb {
        // Blank lines get their own message rather than `Invalid command: `
        "" => Err(CommandError::EmptyLine),
        Command::INSERT => arg
            .map(|text| Command::Insert(text.to_string()))
            .ok_or(CommandError::MissingArgument {
                verb: Command::INSERT,
            }),
        Command::DELETE => {
            let raw = required(arg, Command::DELETE)?;
            parse_count(raw, "number of backspaces").map(Command::Delete)
        }
        Command::MOVE_LEFT => {
            let raw = required(arg, Command::MOVE_LEFT)?;
            parse_count(raw, "number of arrow strokes").map(Command::MoveLeft)
        }
        Command::MOVE_RIGHT => {
            let raw = required(arg, Command::MOVE_RIGHT)?;
            parse_count(raw, "number of arrow strokes").map(Command::MoveRight)
        }
        Command::RENDER => Ok(Command::Render),
        Command::RESET => Ok(Command::Reset),
        Command::EXIT => Ok(Command::Exit),
        _ => Err(CommandError::UnknownCommand(verb.to_string())),
    }
}

fn required<'a>(arg: Option<&'a str>, verb: &'static str) -> Result<&'a str, CommandError> {
    arg.ok_or(CommandError::MissingArgument { verb })
}
