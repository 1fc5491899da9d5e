//! Line-oriented console
//!
//! Wraps an input reader and an output writer so every mode can run against
//! stdin/stdout or in-memory buffers alike.

use std::io::{self, BufRead, Write};
use std::string::FromUtf8Error;

use buffer_core::{Diagnostic, SessionOutcome};
use tracing::warn;

/// Diagnostic shown for an input line that is not UTF-8
pub const INVALID_UTF8: &str = "Line is not valid UTF-8.";

/// Read one line without its line terminator. `None` at end of input.
///
/// Undecodable bytes are not an I/O failure: the line is consumed and
/// handed back as `Some(Err(..))` so the caller can report it and go on.
pub fn read_raw_line<B: BufRead>(
    input: &mut B,
) -> io::Result<Option<Result<String, FromUtf8Error>>> {
    let mut bytes = Vec::new();
    if input.read_until(b'\n', &mut bytes)? == 0 {
        return Ok(None);
    }
    while matches!(bytes.last(), Some(b'\n' | b'\r')) {
        bytes.pop();
    }
    Ok(Some(String::from_utf8(bytes)))
}

/// Line console over any reader and writer
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Read one line without its line terminator. `None` at end of input.
    ///
    /// Lines that are not UTF-8 are reported and skipped.
    pub fn read_line(&mut self) -> io::Result<Option<String>> {
        loop {
            match read_raw_line(&mut self.input)? {
                Some(Ok(line)) => return Ok(Some(line)),
                Some(Err(err)) => {
                    warn!(error = %err, "skipping undecodable input line");
                    self.error(INVALID_UTF8)?;
                }
                None => return Ok(None),
            }
        }
    }

    /// Print `question` and read the answer
    pub fn ask(&mut self, question: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", question)?;
        self.output.flush()?;
        self.read_line()
    }

    pub fn say(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.output, "{}", message)
    }

    pub fn report(&mut self, diagnostic: &Diagnostic) -> io::Result<()> {
        self.error(&diagnostic.message)
    }

    pub fn error(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.output, "Error: {}", message)
    }

    /// Print whatever a session outcome has to show
    pub fn show(&mut self, outcome: &SessionOutcome) -> io::Result<()> {
        match outcome {
            SessionOutcome::Rendered(text) => self.say(text),
            SessionOutcome::Diagnostic(diagnostic) => self.report(diagnostic),
            SessionOutcome::Changed | SessionOutcome::Exit => Ok(()),
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }
}
