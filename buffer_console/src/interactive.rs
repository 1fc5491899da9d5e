//! Interactive mode
//!
//! Reads command lines from the console until `Exit` or end of input,
//! printing render output and diagnostics as they happen.

use std::io::{self, BufRead, Write};

use buffer_core::{EditorSession, SessionOutcome, SessionStats};
use tracing::info;

use crate::console::Console;

/// Run an interactive session to completion
pub fn run_interactive<R: BufRead, W: Write>(
    session: &mut EditorSession,
    console: &mut Console<R, W>,
) -> io::Result<SessionStats> {
    while let Some(line) = console.read_line()? {
        let outcome = session.apply_line(&line);
        if outcome == SessionOutcome::Exit {
            break;
        }
        console.show(&outcome)?;
    }

    let stats = session.stats();
    info!(
        applied = stats.applied,
        rendered = stats.rendered,
        diagnostics = stats.diagnostics,
        "interactive session finished"
    );
    Ok(stats)
}
