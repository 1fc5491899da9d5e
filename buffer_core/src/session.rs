//! Editing session
//!
//! Routes parsed commands to a [`CursorBuffer`] and turns every result into a
//! [`SessionOutcome`]. Nothing here is fatal: rejected commands come back as
//! diagnostics and leave the buffer untouched.

use core::fmt;

use tracing::debug;

use crate::{
    buffer::CursorBuffer,
    command::{parse_command, Command, CommandError},
    error::BufferError,
    snapshot::BufferSnapshot,
    transcript::Transcript,
};

/// Category of a non-fatal diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
    /// Malformed or missing argument
    Validation,
    /// Insert does not fit in the remaining capacity
    CapacityExceeded,
    /// Nothing to delete or print
    EmptyOperation,
    /// Unrecognised verb
    UnknownCommand,
    /// Buffer structure found inconsistent
    Internal,
}

/// Non-fatal signal surfaced to the driver
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub message: String,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Informational only; not a rejected command
    pub fn is_informational(&self) -> bool {
        self.kind == DiagnosticKind::EmptyOperation
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl From<BufferError> for Diagnostic {
    fn from(err: BufferError) -> Self {
        let kind = match err {
            BufferError::CapacityExceeded { .. } => DiagnosticKind::CapacityExceeded,
            BufferError::EmptyText | BufferError::NothingToDelete | BufferError::NothingToPrint => {
                DiagnosticKind::EmptyOperation
            }
            BufferError::ZeroCapacity => DiagnosticKind::Validation,
            BufferError::Corrupted(_) => DiagnosticKind::Internal,
        };
        Self::new(kind, err.to_string())
    }
}

impl From<CommandError> for Diagnostic {
    fn from(err: CommandError) -> Self {
        let kind = match err {
            CommandError::UnknownCommand(_) => DiagnosticKind::UnknownCommand,
            CommandError::InvalidCount { .. }
            | CommandError::MissingArgument { .. }
            | CommandError::EmptyLine => DiagnosticKind::Validation,
        };
        Self::new(kind, err.to_string())
    }
}

/// Outcome from applying a command to the session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    /// Buffer or cursor updated
    Changed,
    /// Rendered buffer contents (already recorded in the transcript)
    Rendered(String),
    /// Command rejected or had nothing to do
    Diagnostic(Diagnostic),
    /// Request to stop processing
    Exit,
}

/// Running counters for a session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub applied: usize,
    pub rendered: usize,
    pub diagnostics: usize,
}

/// Command dispatcher owning one buffer
#[derive(Debug, Clone, Default)]
pub struct EditorSession {
    buffer: CursorBuffer,
    stats: SessionStats,
}

impl EditorSession {
    pub fn new(buffer: CursorBuffer) -> Self {
        Self {
            buffer,
            stats: SessionStats::default(),
        }
    }

    /// Session over an empty buffer of the given capacity
    pub fn with_capacity(capacity: usize) -> Result<Self, BufferError> {
        CursorBuffer::with_capacity(capacity).map(Self::new)
    }

    /// Parse and apply one command line
    pub fn apply_line(&mut self, line: &str) -> SessionOutcome {
        match parse_command(line) {
            Ok(command) => self.apply(command),
            Err(err) => self.diagnostic(err.into()),
        }
    }

    /// Apply an already parsed command
    pub fn apply(&mut self, command: Command) -> SessionOutcome {
        let verb = command.verb();
        let outcome = match command {
            Command::Insert(text) => self.buffer.insert(&text).map(|_| SessionOutcome::Changed),
            Command::Delete(n) => self.buffer.delete(n).map(|_| SessionOutcome::Changed),
            Command::MoveLeft(n) => {
                self.buffer.move_left(n);
                Ok(SessionOutcome::Changed)
            }
            Command::MoveRight(n) => {
                self.buffer.move_right(n);
                Ok(SessionOutcome::Changed)
            }
            Command::Render => self.buffer.render().map(SessionOutcome::Rendered),
            Command::Reset => {
                self.buffer.reset();
                Ok(SessionOutcome::Changed)
            }
            Command::Exit => return SessionOutcome::Exit,
        };

        match outcome {
            Ok(outcome) => {
                self.stats.applied += 1;
                if matches!(outcome, SessionOutcome::Rendered(_)) {
                    self.stats.rendered += 1;
                }
                debug!(verb, cursor = self.buffer.cursor(), "applied");
                outcome
            }
            Err(err) => self.diagnostic(err.into()),
        }
    }

    fn diagnostic(&mut self, diagnostic: Diagnostic) -> SessionOutcome {
        self.stats.diagnostics += 1;
        debug!(kind = ?diagnostic.kind, message = %diagnostic.message, "diagnostic");
        SessionOutcome::Diagnostic(diagnostic)
    }

    pub fn buffer(&self) -> &CursorBuffer {
        &self.buffer
    }

    pub fn transcript(&self) -> &Transcript {
        self.buffer.transcript()
    }

    pub fn snapshot(&self) -> BufferSnapshot {
        self.buffer.snapshot()
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }
}
