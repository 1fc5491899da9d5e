//! Script mode
//!
//! Runs a command file line by line and writes the transcript of every
//! render to the configured output file.

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use buffer_core::{EditorSession, SessionOutcome, SessionStats};
use tracing::{debug, info, warn};

use crate::console::{read_raw_line, Console, INVALID_UTF8};
use crate::error::ConsoleError;
use crate::settings::ConsoleSettings;

/// Diagnostic shown when the script path is not a file
pub const MISSING_SCRIPT: &str = "File name or path does not exist.";

/// Summary of a finished script run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptReport {
    pub stats: SessionStats,
    /// Lines read, including the `Exit` line if any
    pub lines_read: usize,
    /// Lines skipped because they were not UTF-8
    pub undecodable: usize,
    /// Whether processing stopped at an `Exit` command
    pub exited: bool,
}

/// Feed every line of `script` to the session.
///
/// Lines are stripped of surrounding whitespace. Processing stops at `Exit`
/// or end of input; bad lines are reported and skipped.
pub fn process_script<S: BufRead, R: BufRead, W: Write>(
    session: &mut EditorSession,
    mut script: S,
    console: &mut Console<R, W>,
) -> io::Result<ScriptReport> {
    let mut lines_read = 0;
    let mut undecodable = 0;
    let mut exited = false;

    while let Some(line) = read_raw_line(&mut script)? {
        lines_read += 1;
        let line = match line {
            Ok(line) => line,
            Err(err) => {
                warn!(line = lines_read, error = %err, "script line is not UTF-8");
                undecodable += 1;
                console.error(INVALID_UTF8)?;
                continue;
            }
        };

        let outcome = session.apply_line(line.trim());
        if outcome == SessionOutcome::Exit {
            exited = true;
            break;
        }
        if let SessionOutcome::Diagnostic(diagnostic) = &outcome {
            debug!(line = lines_read, message = %diagnostic, "script line rejected");
        }
        console.show(&outcome)?;
    }

    Ok(ScriptReport {
        stats: session.stats(),
        lines_read,
        undecodable,
        exited,
    })
}

/// Run the script at `input` and write the transcript.
///
/// Returns `Ok(None)` after reporting a diagnostic if `input` is not an
/// existing file; no transcript is written in that case.
pub fn run_script<R: BufRead, W: Write>(
    input: &Path,
    settings: &ConsoleSettings,
    console: &mut Console<R, W>,
) -> Result<Option<ScriptReport>, ConsoleError> {
    if !input.is_file() {
        warn!(path = %input.display(), "script not found");
        console.error(MISSING_SCRIPT)?;
        return Ok(None);
    }

    let mut session = EditorSession::with_capacity(settings.capacity)?;
    let script = BufReader::new(File::open(input)?);
    let report = process_script(&mut session, script, console)?;

    write_transcript(&session, &settings.transcript_path)?;

    info!(
        script = %input.display(),
        transcript = %settings.transcript_path.display(),
        lines = report.lines_read,
        rendered = report.stats.rendered,
        diagnostics = report.stats.diagnostics,
        "script finished"
    );
    Ok(Some(report))
}

/// Write the session transcript to `path`, one render per line
pub fn write_transcript(session: &EditorSession, path: &Path) -> Result<(), ConsoleError> {
    let to_error = |source| ConsoleError::Transcript {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(to_error)?;
    session
        .transcript()
        .write_to(BufWriter::new(file))
        .map_err(to_error)
}
